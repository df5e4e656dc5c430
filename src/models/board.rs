use chrono::{NaiveDate, NaiveDateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::schema::boards;

/// A community post announcing a meetup at a store on a given date
#[derive(Queryable, Selectable, Insertable, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[diesel(table_name = boards)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct Board {
    /// Unique identifier (UUID v7, so ids sort by creation time)
    id: String,

    /// The user who posted the board
    user_id: String,

    /// The store the meetup is planned at, if any
    store_id: Option<String>,

    title: String,

    content: String,

    /// The day the meetup takes place
    meet_date: NaiveDate,

    /// Free-form region the meetup is in, matched exactly by search
    region: String,

    /// Location string of the uploaded image
    image: String,

    created_at: NaiveDateTime,
}

/// The validated fields of a board post, before an owner and image are attached
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardDraft {
    pub store_id: Option<String>,
    pub title: String,
    pub content: String,
    pub meet_date: NaiveDate,
    pub region: String,
}

/// A partial board update; `None` leaves the column untouched
#[derive(AsChangeset, Debug, Clone, Default, PartialEq, Eq)]
#[diesel(table_name = boards)]
pub struct BoardChanges {
    pub title: Option<String>,
    pub content: Option<String>,
    pub meet_date: Option<NaiveDate>,
    pub region: Option<String>,
}

impl BoardChanges {
    /// Whether the update would leave every column as it is
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.content.is_none()
            && self.meet_date.is_none()
            && self.region.is_none()
    }
}

impl Board {
    /// Creates a new board owned by `user_id` showing the image at `image`
    pub fn new(user_id: String, draft: BoardDraft, image: String) -> Self {
        Self {
            id: Uuid::now_v7().to_string(),
            user_id,
            store_id: draft.store_id,
            title: draft.title,
            content: draft.content,
            meet_date: draft.meet_date,
            region: draft.region,
            image,
            created_at: Utc::now().naive_utc(),
        }
    }

    pub fn get_id(&self) -> String {
        self.id.clone()
    }

    pub fn get_user_id(&self) -> String {
        self.user_id.clone()
    }

    /// Whether `user_id` is the owner of this board
    pub fn is_owned_by(&self, user_id: &str) -> bool {
        self.user_id == user_id
    }

    pub fn get_store_id(&self) -> Option<String> {
        self.store_id.clone()
    }

    pub fn get_title(&self) -> String {
        self.title.clone()
    }

    pub fn get_content(&self) -> String {
        self.content.clone()
    }

    pub fn get_meet_date(&self) -> NaiveDate {
        self.meet_date
    }

    pub fn get_region(&self) -> String {
        self.region.clone()
    }

    pub fn get_image(&self) -> String {
        self.image.clone()
    }

    pub fn get_created_at(&self) -> NaiveDateTime {
        self.created_at
    }

    /// Overrides the creation timestamp; used to seed ordered fixtures
    pub fn set_created_at(&mut self, created_at: NaiveDateTime) {
        self.created_at = created_at;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> BoardDraft {
        BoardDraft {
            store_id: None,
            title: "Dinner".to_string(),
            content: "Anyone up for ramen?".to_string(),
            meet_date: NaiveDate::from_ymd_opt(2024, 3, 9).unwrap(),
            region: "Seoul".to_string(),
        }
    }

    #[test]
    fn test_board_new() {
        let board = Board::new("user-1".to_string(), draft(), "/uploads/a.png".to_string());

        assert_eq!(board.get_user_id(), "user-1");
        assert_eq!(board.get_title(), "Dinner");
        assert_eq!(board.get_image(), "/uploads/a.png");
        assert!(board.is_owned_by("user-1"));
        assert!(!board.is_owned_by("user-2"));
    }

    #[test]
    fn test_board_serializes_meet_date_as_calendar_date() {
        let board = Board::new("user-1".to_string(), draft(), "/uploads/a.png".to_string());
        let json = serde_json::to_value(&board).unwrap();

        assert_eq!(json["meetDate"], "2024-03-09");
        assert_eq!(json["userId"], "user-1");
    }

    #[test]
    fn test_empty_changes() {
        assert!(BoardChanges::default().is_empty());

        let changes = BoardChanges {
            title: Some(String::new()),
            ..Default::default()
        };
        assert!(!changes.is_empty());
    }
}
