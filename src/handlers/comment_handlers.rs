use axum::{
    Json,
    extract::rejection::JsonRejection,
    extract::{Path, State},
    http::StatusCode,
};
use std::sync::Arc;
use tracing::{info, instrument};

use crate::auth::CurrentUser;
use crate::db::DbPool;
use crate::dto::{CommentView, CreateCommentDto, format_date, format_timestamp};
use crate::errors::ApiError;
use crate::models::UserSummary;
use crate::repo;

/// Handler for commenting on a board
///
/// This function handles POST requests to `/boards/{id}/comments`.
///
/// ### Returns
///
/// 201 with the stored comment, its owner populated and its creation date
/// shortened to `YYYY-MM-DD`
///
/// ### Errors
///
/// - `MissingFields` when the caller is anonymous or `content` is empty
/// - `NotFound` if the board does not exist
#[instrument(skip(pool, payload))]
pub async fn create_comment_handler(
    State(pool): State<Arc<DbPool>>,
    CurrentUser(user_id): CurrentUser,
    Path(board_id): Path<String>,
    payload: Result<Json<CreateCommentDto>, JsonRejection>,
) -> Result<(StatusCode, Json<CommentView>), ApiError> {
    let Json(payload) = payload?;

    let mut missing = Vec::new();
    if user_id.is_none() {
        missing.push("userId");
    }
    if payload.content.as_deref().is_none_or(str::is_empty) {
        missing.push("content");
    }
    if !missing.is_empty() {
        return Err(ApiError::MissingFields(missing.join(", ")));
    }
    let (Some(user_id), Some(content)) = (user_id, payload.content) else {
        return Err(ApiError::MissingFields("userId, content".to_string()));
    };

    if repo::get_board(&pool, &board_id)
        .map_err(ApiError::Database)?
        .is_none()
    {
        return Err(ApiError::NotFound("Board"));
    }

    let comment = repo::create_comment(&pool, user_id, board_id, content)
        .await
        .map_err(ApiError::Database)?;

    let (comment, owner) = repo::get_comment_with_owner(&pool, &comment.get_id())
        .map_err(ApiError::Database)?
        .ok_or(ApiError::NotFound("Comment"))?;

    info!("Created comment {}", comment.get_id());
    Ok((
        StatusCode::CREATED,
        Json(CommentView::new(&comment, owner, format_date)),
    ))
}

/// Handler for reading one comment
///
/// This function handles GET requests to `/comments/{id}`. The owner is
/// embedded by id and nickname only.
#[instrument(skip(pool))]
pub async fn get_comment_handler(
    State(pool): State<Arc<DbPool>>,
    Path(comment_id): Path<String>,
) -> Result<Json<CommentView>, ApiError> {
    let (comment, owner) = repo::get_comment_with_owner(&pool, &comment_id)
        .map_err(ApiError::Database)?
        .ok_or(ApiError::NotFound("Comment"))?;

    let owner = owner.map(UserSummary::nickname_only);
    Ok(Json(CommentView::new(&comment, owner, format_timestamp)))
}

/// Handler for deleting a comment
///
/// This function handles DELETE requests to `/comments/{id}`.
///
/// ### Errors
///
/// `Forbidden` unless the caller is authenticated and owns an existing comment
#[instrument(skip(pool))]
pub async fn delete_comment_handler(
    State(pool): State<Arc<DbPool>>,
    CurrentUser(user_id): CurrentUser,
    Path(comment_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let comment = repo::get_comment(&pool, &comment_id).map_err(ApiError::Database)?;

    match (comment, user_id) {
        (Some(comment), Some(user_id)) if comment.is_owned_by(&user_id) => {}
        _ => return Err(ApiError::Forbidden("You can't delete this comment".to_string())),
    }

    repo::delete_comment(&pool, &comment_id)
        .await
        .map_err(ApiError::Database)?;

    info!("Deleted comment {}", comment_id);
    Ok(StatusCode::OK)
}
