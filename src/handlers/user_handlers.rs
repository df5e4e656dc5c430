use axum::{
    Json,
    extract::rejection::JsonRejection,
    extract::{Path, State},
    http::StatusCode,
};
use std::sync::Arc;
use tracing::{info, instrument};

use crate::db::DbPool;
use crate::dto::CreateUserDto;
use crate::errors::ApiError;
use crate::models::User;
use crate::repo;

/// Handler for registering a user profile
///
/// This function handles POST requests to `/users`.
#[instrument(skip(pool, payload))]
pub async fn create_user_handler(
    State(pool): State<Arc<DbPool>>,
    payload: Result<Json<CreateUserDto>, JsonRejection>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    let Json(payload) = payload?;

    let mut missing = Vec::new();
    if payload.nickname.trim().is_empty() {
        missing.push("nickname");
    }
    if payload.name.trim().is_empty() {
        missing.push("name");
    }
    if !missing.is_empty() {
        return Err(ApiError::MissingFields(missing.join(", ")));
    }

    let user = repo::create_user(&pool, payload.nickname, payload.name, payload.profile_image)
        .await
        .map_err(ApiError::Database)?;

    info!("Registered user {}", user.get_id());
    Ok((StatusCode::CREATED, Json(user)))
}

/// Handler for reading a user profile
///
/// This function handles GET requests to `/users/{id}`.
#[instrument(skip(pool))]
pub async fn get_user_handler(
    State(pool): State<Arc<DbPool>>,
    Path(user_id): Path<String>,
) -> Result<Json<User>, ApiError> {
    let user = repo::get_user(&pool, &user_id)
        .map_err(ApiError::Database)?
        .ok_or(ApiError::NotFound("User"))?;
    Ok(Json(user))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::setup_test_db;

    #[tokio::test]
    async fn test_create_and_get_user_handlers() {
        let pool = setup_test_db();
        let payload = CreateUserDto {
            nickname: "rabbit".to_string(),
            name: "Kim".to_string(),
            profile_image: None,
        };

        let (status, Json(user)) = create_user_handler(State(pool.clone()), Ok(Json(payload)))
            .await
            .unwrap();
        assert_eq!(status, StatusCode::CREATED);

        let Json(fetched) = get_user_handler(State(pool), Path(user.get_id())).await.unwrap();
        assert_eq!(fetched.get_nickname(), "rabbit");
    }

    #[tokio::test]
    async fn test_create_user_lists_missing_fields() {
        let pool = setup_test_db();
        let payload = CreateUserDto {
            nickname: String::new(),
            name: String::new(),
            profile_image: None,
        };

        match create_user_handler(State(pool), Ok(Json(payload))).await {
            Err(ApiError::MissingFields(fields)) => assert_eq!(fields, "nickname, name"),
            other => panic!("expected MissingFields, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_get_missing_user() {
        let pool = setup_test_db();
        let result = get_user_handler(State(pool), Path("missing".to_string())).await;
        assert!(matches!(result, Err(ApiError::NotFound("User"))));
    }
}
