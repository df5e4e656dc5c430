use chrono::{NaiveDateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A member of the community as known to the board service
///
/// Identity itself lives with the authentication gateway; this record only
/// carries the profile fields that other records display.
#[derive(Queryable, Selectable, Insertable, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct User {
    id: String,
    nickname: String,
    name: String,
    profile_image: Option<String>,
    created_at: NaiveDateTime,
}

impl User {
    /// Creates a new user with a fresh id
    pub fn new(nickname: String, name: String, profile_image: Option<String>) -> Self {
        Self {
            id: Uuid::now_v7().to_string(),
            nickname,
            name,
            profile_image,
            created_at: Utc::now().naive_utc(),
        }
    }

    pub fn get_id(&self) -> String {
        self.id.clone()
    }

    pub fn get_nickname(&self) -> String {
        self.nickname.clone()
    }

    pub fn get_name(&self) -> String {
        self.name.clone()
    }

    pub fn get_profile_image(&self) -> Option<String> {
        self.profile_image.clone()
    }

    pub fn get_created_at(&self) -> NaiveDateTime {
        self.created_at
    }
}

/// The populated form of a user reference: what boards and comments embed
/// in place of a bare user id
#[derive(Queryable, Selectable, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: String,
    pub nickname: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
}

impl UserSummary {
    /// The summary reduced to id and nickname, as listings embed it
    pub fn nickname_only(self) -> Self {
        Self {
            profile_image: None,
            ..self
        }
    }
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.get_id(),
            nickname: user.get_nickname(),
            profile_image: user.get_profile_image(),
        }
    }
}
