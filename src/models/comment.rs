use chrono::{NaiveDateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A reply posted under a board
#[derive(Queryable, Selectable, Insertable, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[diesel(table_name = crate::schema::comments)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    id: String,
    user_id: String,
    board_id: String,
    content: String,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
}

impl Comment {
    pub fn new(user_id: String, board_id: String, content: String) -> Self {
        let now = Utc::now().naive_utc();
        Self {
            id: Uuid::now_v7().to_string(),
            user_id,
            board_id,
            content,
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

    pub fn is_owned_by(&self, user_id: &str) -> bool {
        self.user_id == user_id
    }

    pub fn get_board_id(&self) -> String {
        self.board_id.clone()
    }

    pub fn get_content(&self) -> String {
        self.content.clone()
    }

    pub fn get_created_at(&self) -> NaiveDateTime {
        self.created_at
    }

    pub fn get_updated_at(&self) -> NaiveDateTime {
        self.updated_at
    }
}
