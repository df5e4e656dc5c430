use chrono::{NaiveDateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::User;

#[derive(Queryable, Selectable, Insertable, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[diesel(table_name = crate::schema::reviews)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct Review {
    /// Unique identifier for the review (UUID v7 as string)
    id: String,

    /// The author of the review
    user_id: String,

    /// The store being reviewed
    store_id: String,

    /// Star grade between 1 and 5
    grade: i32,

    content: String,

    /// The author's nickname when the review was written
    user_nickname: String,

    /// The author's name when the review was written
    user_name: String,

    created_at: NaiveDateTime,

    updated_at: NaiveDateTime,
}

impl Review {
    /// Creates a review of `store_id` by `author`, snapshotting the author's
    /// nickname and name
    ///
    /// ### Arguments
    ///
    /// * `store_id` - The store being reviewed
    /// * `author` - The user writing the review
    /// * `grade` - The star grade, already validated
    /// * `content` - The review text
    pub fn new(store_id: &str, author: &User, grade: i32, content: String) -> Self {
        let now = Utc::now().naive_utc();
        Self {
            id: Uuid::now_v7().to_string(),
            user_id: author.get_id(),
            store_id: store_id.to_string(),
            grade,
            content,
            user_nickname: author.get_nickname(),
            user_name: author.get_name(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn get_id(&self) -> String {
        self.id.clone()
    }

    pub fn get_user_id(&self) -> String {
        self.user_id.clone()
    }

    pub fn get_store_id(&self) -> String {
        self.store_id.clone()
    }

    pub fn get_grade(&self) -> i32 {
        self.grade
    }

    pub fn get_content(&self) -> String {
        self.content.clone()
    }

    pub fn get_user_nickname(&self) -> String {
        self.user_nickname.clone()
    }

    pub fn get_user_name(&self) -> String {
        self.user_name.clone()
    }

    pub fn get_created_at(&self) -> NaiveDateTime {
        self.created_at
    }

    pub fn get_updated_at(&self) -> NaiveDateTime {
        self.updated_at
    }
}
