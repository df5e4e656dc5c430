use crate::db::DbPool;
use crate::models::User;
use crate::schema::users;
use anyhow::Result;
use diesel::prelude::*;
use tracing::{debug, instrument};

/// Creates a new user profile
///
/// ### Arguments
///
/// * `pool` - A reference to the database connection pool
/// * `nickname` - The display nickname
/// * `name` - The user's name
/// * `profile_image` - Optional location of an avatar image
///
/// ### Returns
///
/// A Result containing the newly created User if successful
#[instrument(skip(pool))]
pub async fn create_user(
    pool: &DbPool,
    nickname: String,
    name: String,
    profile_image: Option<String>,
) -> Result<User> {
    let conn = &mut pool.get()?;
    let new_user = User::new(nickname, name, profile_image);

    diesel::insert_into(users::table)
        .values(&new_user)
        .execute(conn)?;

    debug!("Created user {}", new_user.get_id());
    Ok(new_user)
}

/// Retrieves a user by id, or `None` if there is no such user
pub fn get_user(pool: &DbPool, id: &str) -> Result<Option<User>> {
    let conn = &mut pool.get()?;
    find_user(conn, id)
}

pub(crate) fn find_user(conn: &mut SqliteConnection, id: &str) -> Result<Option<User>> {
    let result = users::table
        .find(id)
        .select(User::as_select())
        .first(conn)
        .optional()?;
    Ok(result)
}
