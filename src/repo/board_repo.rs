use crate::db::DbPool;
use crate::models::{Board, BoardChanges, UserSummary};
use crate::schema::{boards, users};
use anyhow::Result;
use diesel::prelude::*;
use tracing::{debug, instrument};

/// Persists a new board
///
/// ### Arguments
///
/// * `pool` - A reference to the database connection pool
/// * `board` - The board to insert, with owner and image already attached
///
/// ### Returns
///
/// A Result containing the stored board
///
/// ### Errors
///
/// Returns an error if the connection cannot be obtained or the insert fails
/// (for example when `store_id` names a store that does not exist)
#[instrument(skip(pool, board), fields(board_id = %board.get_id()))]
pub async fn create_board(pool: &DbPool, board: Board) -> Result<Board> {
    let conn = &mut pool.get()?;

    diesel::insert_into(boards::table)
        .values(&board)
        .execute(conn)?;

    debug!("Inserted board");
    Ok(board)
}

/// Retrieves a board by id, or `None` if there is no such board
pub fn get_board(pool: &DbPool, id: &str) -> Result<Option<Board>> {
    let conn = &mut pool.get()?;
    let result = boards::table
        .find(id)
        .select(Board::as_select())
        .first(conn)
        .optional()?;
    Ok(result)
}

/// Retrieves a board together with its owner's public profile
///
/// The owner is `None` when the board's user id has no profile record.
pub fn get_board_with_owner(pool: &DbPool, id: &str) -> Result<Option<(Board, Option<UserSummary>)>> {
    let conn = &mut pool.get()?;
    let result = boards::table
        .left_join(users::table)
        .filter(boards::id.eq(id))
        .select((Board::as_select(), Option::<UserSummary>::as_select()))
        .first(conn)
        .optional()?;
    Ok(result)
}

/// Lists the boards whose region equals `region` exactly, newest first
pub fn search_boards_by_region(pool: &DbPool, region: &str) -> Result<Vec<Board>> {
    let conn = &mut pool.get()?;
    let result = boards::table
        .filter(boards::region.eq(region))
        .order(boards::id.desc())
        .select(Board::as_select())
        .load(conn)?;
    Ok(result)
}

/// Counts every board
pub fn count_boards(pool: &DbPool) -> Result<i64> {
    let conn = &mut pool.get()?;
    let count = boards::table.count().get_result(conn)?;
    Ok(count)
}

/// Lists one window of boards, newest first, with owners populated
///
/// ### Arguments
///
/// * `pool` - A reference to the database connection pool
/// * `offset` - How many boards to skip
/// * `limit` - The maximum number of boards to return
pub fn list_boards_page(
    pool: &DbPool,
    offset: i64,
    limit: i64,
) -> Result<Vec<(Board, Option<UserSummary>)>> {
    let conn = &mut pool.get()?;
    let result = boards::table
        .left_join(users::table)
        .order((boards::created_at.desc(), boards::id.desc()))
        .offset(offset)
        .limit(limit)
        .select((Board::as_select(), Option::<UserSummary>::as_select()))
        .load(conn)?;
    Ok(result)
}

/// Applies a partial update to a board
///
/// Only the fields set in `changes` are written. An empty change set leaves
/// the row alone and returns it as stored.
///
/// ### Returns
///
/// The board after the update, or `None` if there is no board with `id`
#[instrument(skip(pool, changes))]
pub async fn update_board(pool: &DbPool, id: &str, changes: BoardChanges) -> Result<Option<Board>> {
    if changes.is_empty() {
        return get_board(pool, id);
    }

    let conn = &mut pool.get()?;
    let result = diesel::update(boards::table.find(id))
        .set(&changes)
        .returning(Board::as_returning())
        .get_result(conn)
        .optional()?;
    Ok(result)
}

/// Deletes a board and, through the foreign key, its comments
///
/// ### Returns
///
/// Whether a board was deleted
#[instrument(skip(pool))]
pub async fn delete_board(pool: &DbPool, id: &str) -> Result<bool> {
    let conn = &mut pool.get()?;
    let deleted = diesel::delete(boards::table.find(id)).execute(conn)?;
    Ok(deleted > 0)
}
