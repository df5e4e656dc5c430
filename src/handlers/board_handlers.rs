use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use crate::ListingDefaults;
use crate::auth::CurrentUser;
use crate::db::DbPool;
use crate::dto::{
    BoardDetail, BoardForm, BoardPage, BoardView, CommentView, PageQuery, SearchQuery,
    UpdateBoardDto, UploadedImage, format_date, format_timestamp,
};
use crate::errors::ApiError;
use crate::models::{Board, UserSummary};
use crate::pagination::{PageWindow, validate_page_params};
use crate::repo;
use crate::uploads::UploadStore;

/// Handler for reading one board with its comments
///
/// This function handles GET requests to `/boards/{id}`.
///
/// ### Returns
///
/// The board and its comments (oldest first), both with owners populated
/// and creation dates shortened to `YYYY-MM-DD`
#[instrument(skip(pool))]
pub async fn get_board_detail_handler(
    State(pool): State<Arc<DbPool>>,
    Path(board_id): Path<String>,
) -> Result<Json<BoardDetail>, ApiError> {
    let (board, owner) = repo::get_board_with_owner(&pool, &board_id)
        .map_err(ApiError::Database)?
        .ok_or(ApiError::NotFound("Board"))?;

    let comments = repo::list_comments_for_board(&pool, &board_id)
        .map_err(ApiError::Database)?
        .into_iter()
        .map(|(comment, owner)| CommentView::new(&comment, owner, format_date))
        .collect::<Vec<_>>();

    debug!("Board has {} comments", comments.len());
    Ok(Json(BoardDetail {
        board: BoardView::new(&board, owner, format_date),
        comments,
    }))
}

/// Handler for finding boards by region
///
/// This function handles GET requests to `/boards/search?value=<region>`.
/// The region must match exactly; without a value nothing matches.
#[instrument(skip(pool, query))]
pub async fn search_boards_handler(
    State(pool): State<Arc<DbPool>>,
    query: Result<Query<SearchQuery>, QueryRejection>,
) -> Result<Json<Vec<Board>>, ApiError> {
    let Query(query) = query?;
    let Some(region) = query.value else {
        return Ok(Json(Vec::new()));
    };

    let boards = repo::search_boards_by_region(&pool, &region).map_err(ApiError::Database)?;
    debug!("Found {} boards in {:?}", boards.len(), region);
    Ok(Json(boards))
}

/// Handler for the paged board listing
///
/// This function handles GET requests to `/boards?pageNo=&countPerPage=`.
/// A page past the end shows the last full page instead of nothing.
/// Owners are embedded by id and nickname only.
///
/// ### Errors
///
/// `InvalidInput` if either parameter is below 1 or not a number
#[instrument(skip(pool, listing, query))]
pub async fn list_boards_handler(
    State(pool): State<Arc<DbPool>>,
    State(listing): State<ListingDefaults>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> Result<Json<BoardPage>, ApiError> {
    let Query(query) = query?;
    let count_per_page = query.count_per_page.unwrap_or(listing.count_per_page);
    let page_no = query.page_no.unwrap_or(1);
    validate_page_params(count_per_page, page_no).map_err(ApiError::InvalidInput)?;

    let total_count = repo::count_boards(&pool).map_err(ApiError::Database)?;
    let window = PageWindow::compute(total_count, count_per_page, page_no);
    debug!(?window, "Listing boards");

    let data = repo::list_boards_page(&pool, window.offset, window.limit)
        .map_err(ApiError::Database)?
        .into_iter()
        .map(|(board, owner)| {
            BoardView::new(&board, owner.map(UserSummary::nickname_only), format_timestamp)
        })
        .collect();

    Ok(Json(BoardPage {
        success: true,
        data,
        current_page: page_no,
        total_pages: window.total_pages,
        total_count,
    }))
}

/// Handler for posting a new board
///
/// This function handles multipart POST requests to `/boards` with the text
/// fields `region`, `title`, `content`, `meetDate` and optionally `storeId`,
/// plus a file field `image`.
///
/// Everything is checked before the image is written. If the insert fails
/// afterwards the image is removed again.
///
/// ### Errors
///
/// - `MissingFields` when the caller is anonymous or a required field is absent
/// - `InvalidInput` for a malformed date or an unknown store
/// - `Upload` or `Database` when storing fails
#[instrument(skip_all, fields(user_id = ?user_id))]
pub async fn create_board_handler(
    State(pool): State<Arc<DbPool>>,
    State(uploads): State<Arc<UploadStore>>,
    CurrentUser(user_id): CurrentUser,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<Board>), ApiError> {
    let mut form = BoardForm::default();
    while let Some(field) = multipart.next_field().await? {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };
        if name == "image" {
            let file_name = field.file_name().map(str::to_string);
            let bytes = field.bytes().await?;
            form.image = Some(UploadedImage {
                file_name,
                bytes: bytes.to_vec(),
            });
        } else {
            let value = field.text().await?;
            form.set_text(&name, value);
        }
    }

    let (owner, draft, image) = form.into_parts(user_id)?;

    if let Some(store_id) = &draft.store_id {
        if repo::get_store(&pool, store_id)
            .map_err(ApiError::Database)?
            .is_none()
        {
            return Err(ApiError::InvalidInput(format!(
                "storeId {:?} does not name a store",
                store_id
            )));
        }
    }

    let location = uploads
        .save(image.file_name.as_deref(), &image.bytes)
        .await
        .map_err(ApiError::Upload)?;

    let board = Board::new(owner, draft, location.clone());
    match repo::create_board(&pool, board).await {
        Ok(board) => {
            info!("Created board {}", board.get_id());
            Ok((StatusCode::CREATED, Json(board)))
        }
        Err(e) => {
            if let Err(cleanup) = uploads.remove(&location).await {
                warn!("Could not remove orphaned upload {}: {}", location, cleanup);
            }
            Err(ApiError::Database(e))
        }
    }
}

/// Handler for editing a board
///
/// This function handles PATCH requests to `/boards/{id}`. Only the keys
/// present in the body are changed.
///
/// ### Errors
///
/// - `NotFound` if the board does not exist
/// - `Forbidden` if an authenticated caller does not own the board
#[instrument(skip(pool, payload))]
pub async fn edit_board_handler(
    State(pool): State<Arc<DbPool>>,
    CurrentUser(user_id): CurrentUser,
    Path(board_id): Path<String>,
    payload: Result<Json<UpdateBoardDto>, JsonRejection>,
) -> Result<Json<Board>, ApiError> {
    let Json(payload) = payload?;

    let board = repo::get_board(&pool, &board_id)
        .map_err(ApiError::Database)?
        .ok_or(ApiError::NotFound("Board"))?;

    if let Some(user_id) = &user_id {
        if !board.is_owned_by(user_id) {
            return Err(ApiError::Forbidden("You can't edit this board".to_string()));
        }
    }

    let updated = repo::update_board(&pool, &board_id, payload.into())
        .await
        .map_err(ApiError::Database)?
        .ok_or(ApiError::NotFound("Board"))?;

    info!("Updated board {}", board_id);
    Ok(Json(updated))
}

/// Handler for deleting a board
///
/// This function handles DELETE requests to `/boards/{id}`. The board's
/// comments go with it, and its stored image is removed.
///
/// ### Errors
///
/// `Forbidden` unless the caller is authenticated and owns an existing board
#[instrument(skip(pool, uploads))]
pub async fn delete_board_handler(
    State(pool): State<Arc<DbPool>>,
    State(uploads): State<Arc<UploadStore>>,
    CurrentUser(user_id): CurrentUser,
    Path(board_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let board = repo::get_board(&pool, &board_id).map_err(ApiError::Database)?;

    let board = match (board, user_id) {
        (Some(board), Some(user_id)) if board.is_owned_by(&user_id) => board,
        _ => return Err(ApiError::Forbidden("You can't delete this board".to_string())),
    };

    repo::delete_board(&pool, &board_id)
        .await
        .map_err(ApiError::Database)?;

    if let Err(e) = uploads.remove(&board.get_image()).await {
        warn!("Could not remove image of deleted board: {}", e);
    }

    info!("Deleted board {}", board_id);
    Ok(StatusCode::OK)
}

#[cfg(test)]
mod tests;
