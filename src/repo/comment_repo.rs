use crate::db::DbPool;
use crate::models::{Comment, UserSummary};
use crate::schema::{comments, users};
use anyhow::Result;
use diesel::prelude::*;
use tracing::{debug, instrument};

/// Posts a comment under a board
///
/// ### Errors
///
/// Returns an error if the insert fails, including when `board_id` does not
/// name an existing board
#[instrument(skip(pool, content))]
pub async fn create_comment(
    pool: &DbPool,
    user_id: String,
    board_id: String,
    content: String,
) -> Result<Comment> {
    let conn = &mut pool.get()?;
    let new_comment = Comment::new(user_id, board_id, content);

    diesel::insert_into(comments::table)
        .values(&new_comment)
        .execute(conn)?;

    debug!("Inserted comment {}", new_comment.get_id());
    Ok(new_comment)
}

/// Retrieves a comment by id, or `None` if there is no such comment
pub fn get_comment(pool: &DbPool, id: &str) -> Result<Option<Comment>> {
    let conn = &mut pool.get()?;
    let result = comments::table
        .find(id)
        .select(Comment::as_select())
        .first(conn)
        .optional()?;
    Ok(result)
}

/// Retrieves a comment together with its owner's public profile
pub fn get_comment_with_owner(
    pool: &DbPool,
    id: &str,
) -> Result<Option<(Comment, Option<UserSummary>)>> {
    let conn = &mut pool.get()?;
    let result = comments::table
        .left_join(users::table)
        .filter(comments::id.eq(id))
        .select((Comment::as_select(), Option::<UserSummary>::as_select()))
        .first(conn)
        .optional()?;
    Ok(result)
}

/// Lists the comments of a board, oldest first, with owners populated
pub fn list_comments_for_board(
    pool: &DbPool,
    board_id: &str,
) -> Result<Vec<(Comment, Option<UserSummary>)>> {
    let conn = &mut pool.get()?;
    let result = comments::table
        .left_join(users::table)
        .filter(comments::board_id.eq(board_id))
        .order((comments::created_at.asc(), comments::id.asc()))
        .select((Comment::as_select(), Option::<UserSummary>::as_select()))
        .load(conn)?;
    Ok(result)
}

/// Deletes a comment, returning whether one was deleted
#[instrument(skip(pool))]
pub async fn delete_comment(pool: &DbPool, id: &str) -> Result<bool> {
    let conn = &mut pool.get()?;
    let deleted = diesel::delete(comments::table.find(id)).execute(conn)?;
    Ok(deleted > 0)
}
