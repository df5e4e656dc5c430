use chrono::{NaiveDateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::IdList;

/// A venue that collects reviews
///
/// `star_rating` is a denormalized running average over the grades of the
/// reviews listed in `review_ids`; it is 0 when the list is empty.
#[derive(Queryable, Selectable, Insertable, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[diesel(table_name = crate::schema::stores)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct Store {
    id: String,
    name: String,
    star_rating: f64,
    #[serde(rename = "reviews")]
    review_ids: IdList,
    created_at: NaiveDateTime,
}

impl Store {
    /// Creates a store with no reviews and a rating of 0
    pub fn new(name: String) -> Self {
        Self {
            id: Uuid::now_v7().to_string(),
            name,
            star_rating: 0.0,
            review_ids: IdList::default(),
            created_at: Utc::now().naive_utc(),
        }
    }

    pub fn get_id(&self) -> String {
        self.id.clone()
    }

    pub fn get_name(&self) -> String {
        self.name.clone()
    }

    pub fn get_star_rating(&self) -> f64 {
        self.star_rating
    }

    pub fn set_star_rating(&mut self, star_rating: f64) {
        self.star_rating = star_rating;
    }

    pub fn get_review_ids(&self) -> &IdList {
        &self.review_ids
    }

    pub fn get_review_ids_mut(&mut self) -> &mut IdList {
        &mut self.review_ids
    }

    /// Number of reviews currently counted in the rating
    pub fn review_count(&self) -> usize {
        self.review_ids.len()
    }

    pub fn get_created_at(&self) -> NaiveDateTime {
        self.created_at
    }
}
