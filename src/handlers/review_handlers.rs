use axum::{
    Json,
    extract::rejection::JsonRejection,
    extract::{Path, State},
    http::StatusCode,
};
use std::sync::Arc;
use tracing::{debug, info, instrument};

use crate::auth::CurrentUser;
use crate::db::DbPool;
use crate::dto::ReviewDto;
use crate::errors::ApiError;
use crate::models::{Review, Store};
use crate::repo;

/// Handler for reading one review
///
/// This function handles GET requests to `/reviews/{id}`.
///
/// ### Returns
///
/// The review as JSON, or null if not found
#[instrument(skip(pool))]
pub async fn get_review_handler(
    State(pool): State<Arc<DbPool>>,
    Path(review_id): Path<String>,
) -> Result<Json<Option<Review>>, ApiError> {
    let review = repo::get_review(&pool, &review_id).map_err(ApiError::Database)?;

    if review.is_none() {
        debug!("Review not found");
    }
    Ok(Json(review))
}

/// Handler for listing the reviews of a store
///
/// This function handles GET requests to `/stores/{id}/reviews`.
#[instrument(skip(pool))]
pub async fn list_store_reviews_handler(
    State(pool): State<Arc<DbPool>>,
    Path(store_id): Path<String>,
) -> Result<Json<Vec<Review>>, ApiError> {
    repo::get_store(&pool, &store_id)
        .map_err(ApiError::Database)?
        .ok_or(ApiError::NotFound("Store"))?;

    let reviews = repo::list_reviews_for_store(&pool, &store_id).map_err(ApiError::Database)?;
    debug!("Store has {} reviews", reviews.len());
    Ok(Json(reviews))
}

/// Handler for reviewing a store
///
/// This function handles POST requests to `/stores/{id}/reviews`. The grade
/// is folded into the store's star rating in the same transaction that
/// stores the review.
///
/// ### Errors
///
/// - `MissingFields` when the caller is anonymous or grade or content is missing
/// - `InvalidInput` when the grade is outside 1..=5
/// - `NotFound` if the store or the caller's user record does not exist
#[instrument(skip(pool, payload))]
pub async fn create_review_handler(
    State(pool): State<Arc<DbPool>>,
    CurrentUser(user_id): CurrentUser,
    Path(store_id): Path<String>,
    payload: Result<Json<ReviewDto>, JsonRejection>,
) -> Result<(StatusCode, Json<Review>), ApiError> {
    let Json(payload) = payload?;
    let user_id = user_id.ok_or_else(|| ApiError::MissingFields("userId".to_string()))?;
    let (grade, content) = payload.validate()?;

    let review = repo::create_review(&pool, &store_id, &user_id, grade, content).await?;

    info!("Store {} received review {}", store_id, review.get_id());
    Ok((StatusCode::CREATED, Json(review)))
}

/// Handler for changing a review
///
/// This function handles PUT requests to `/reviews/{id}`.
///
/// ### Returns
///
/// 201 with the reviewed store, its rating already adjusted
#[instrument(skip(pool, payload))]
pub async fn edit_review_handler(
    State(pool): State<Arc<DbPool>>,
    Path(review_id): Path<String>,
    payload: Result<Json<ReviewDto>, JsonRejection>,
) -> Result<(StatusCode, Json<Store>), ApiError> {
    let Json(payload) = payload?;
    let (grade, content) = payload.validate()?;

    let store = repo::edit_review(&pool, &review_id, grade, content).await?;

    info!("Edited review {}", review_id);
    Ok((StatusCode::CREATED, Json(store)))
}

/// Handler for deleting a review
///
/// This function handles DELETE requests to `/reviews/{id}`.
#[instrument(skip(pool))]
pub async fn delete_review_handler(
    State(pool): State<Arc<DbPool>>,
    Path(review_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let store = repo::delete_review(&pool, &review_id).await?;

    info!(
        "Deleted review {}; store {} now rated {}",
        review_id,
        store.get_id(),
        store.get_star_rating()
    );
    Ok(StatusCode::OK)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{seed_store, seed_user, setup_test_db};

    fn body(grade: Option<i32>, content: &str) -> Result<Json<ReviewDto>, JsonRejection> {
        Ok(Json(ReviewDto {
            grade,
            content: Some(content.to_string()),
        }))
    }

    #[tokio::test]
    async fn test_create_review_handler() {
        let pool = setup_test_db();
        let store = seed_store(&pool, "Cafe").await;
        let author = seed_user(&pool, "rabbit").await;

        let (status, Json(review)) = create_review_handler(
            State(pool.clone()),
            CurrentUser(Some(author.get_id())),
            Path(store.get_id()),
            body(Some(4), "Cozy"),
        )
        .await
        .unwrap();

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(review.get_grade(), 4);
        assert_eq!(review.get_content(), "Cozy");

        let store = repo::get_store(&pool, &store.get_id()).unwrap().unwrap();
        assert_eq!(store.get_star_rating(), 4.0);
    }

    #[tokio::test]
    async fn test_create_review_handler_rejects_bad_input() {
        let pool = setup_test_db();
        let store = seed_store(&pool, "Cafe").await;
        let author = seed_user(&pool, "rabbit").await;

        let anonymous = create_review_handler(
            State(pool.clone()),
            CurrentUser(None),
            Path(store.get_id()),
            body(Some(4), "Cozy"),
        )
        .await;
        assert!(matches!(anonymous, Err(ApiError::MissingFields(_))));

        let out_of_range = create_review_handler(
            State(pool.clone()),
            CurrentUser(Some(author.get_id())),
            Path(store.get_id()),
            body(Some(6), "Cozy"),
        )
        .await;
        assert!(matches!(out_of_range, Err(ApiError::InvalidInput(_))));

        let no_grade = create_review_handler(
            State(pool.clone()),
            CurrentUser(Some(author.get_id())),
            Path(store.get_id()),
            body(None, "Cozy"),
        )
        .await;
        assert!(matches!(no_grade, Err(ApiError::MissingFields(_))));

        let store = repo::get_store(&pool, &store.get_id()).unwrap().unwrap();
        assert!(store.get_review_ids().is_empty());
    }

    #[tokio::test]
    async fn test_create_review_for_unknown_user() {
        let pool = setup_test_db();
        let store = seed_store(&pool, "Cafe").await;

        let result = create_review_handler(
            State(pool),
            CurrentUser(Some("ghost".to_string())),
            Path(store.get_id()),
            body(Some(3), "Hmm"),
        )
        .await;
        assert!(matches!(result, Err(ApiError::NotFound("User"))));
    }

    #[tokio::test]
    async fn test_edit_review_handler_returns_store() {
        let pool = setup_test_db();
        let store = seed_store(&pool, "Cafe").await;
        let author = seed_user(&pool, "rabbit").await;
        let review = repo::create_review(&pool, &store.get_id(), &author.get_id(), 3, "Ok".to_string())
            .await
            .unwrap();
        repo::create_review(&pool, &store.get_id(), &author.get_id(), 5, "Great".to_string())
            .await
            .unwrap();

        let (status, Json(store)) =
            edit_review_handler(State(pool), Path(review.get_id()), body(Some(5), "Great too"))
                .await
                .unwrap();
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(store.get_star_rating(), 5.0);
    }

    #[tokio::test]
    async fn test_get_and_delete_review_handlers() {
        let pool = setup_test_db();
        let store = seed_store(&pool, "Cafe").await;
        let author = seed_user(&pool, "rabbit").await;
        let review = repo::create_review(&pool, &store.get_id(), &author.get_id(), 2, "Meh".to_string())
            .await
            .unwrap();

        let Json(found) = get_review_handler(State(pool.clone()), Path(review.get_id()))
            .await
            .unwrap();
        assert_eq!(found, Some(review.clone()));

        let status = delete_review_handler(State(pool.clone()), Path(review.get_id()))
            .await
            .unwrap();
        assert_eq!(status, StatusCode::OK);

        let Json(gone) = get_review_handler(State(pool.clone()), Path(review.get_id()))
            .await
            .unwrap();
        assert!(gone.is_none());

        let again = delete_review_handler(State(pool), Path(review.get_id())).await;
        assert!(matches!(again, Err(ApiError::NotFound("Review"))));
    }

    #[tokio::test]
    async fn test_list_store_reviews_handler() {
        let pool = setup_test_db();
        let store = seed_store(&pool, "Cafe").await;
        let author = seed_user(&pool, "rabbit").await;
        repo::create_review(&pool, &store.get_id(), &author.get_id(), 2, "Meh".to_string())
            .await
            .unwrap();

        let Json(reviews) = list_store_reviews_handler(State(pool.clone()), Path(store.get_id()))
            .await
            .unwrap();
        assert_eq!(reviews.len(), 1);

        let missing = list_store_reviews_handler(State(pool), Path("missing".to_string())).await;
        assert!(matches!(missing, Err(ApiError::NotFound("Store"))));
    }
}
