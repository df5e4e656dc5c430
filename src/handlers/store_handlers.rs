use axum::{
    Json,
    extract::rejection::JsonRejection,
    extract::{Path, State},
    http::StatusCode,
};
use std::sync::Arc;
use tracing::{info, instrument};

use crate::db::DbPool;
use crate::dto::CreateStoreDto;
use crate::errors::ApiError;
use crate::models::Store;
use crate::repo;

/// Handler for registering a store
///
/// This function handles POST requests to `/stores`. New stores start with a
/// rating of 0 and no reviews.
#[instrument(skip(pool, payload))]
pub async fn create_store_handler(
    State(pool): State<Arc<DbPool>>,
    payload: Result<Json<CreateStoreDto>, JsonRejection>,
) -> Result<(StatusCode, Json<Store>), ApiError> {
    let Json(payload) = payload?;
    if payload.name.trim().is_empty() {
        return Err(ApiError::MissingFields("name".to_string()));
    }

    let store = repo::create_store(&pool, payload.name)
        .await
        .map_err(ApiError::Database)?;

    info!("Registered store {}", store.get_id());
    Ok((StatusCode::CREATED, Json(store)))
}

/// Handler for reading a store with its rating and review ids
///
/// This function handles GET requests to `/stores/{id}`.
#[instrument(skip(pool))]
pub async fn get_store_handler(
    State(pool): State<Arc<DbPool>>,
    Path(store_id): Path<String>,
) -> Result<Json<Store>, ApiError> {
    let store = repo::get_store(&pool, &store_id)
        .map_err(ApiError::Database)?
        .ok_or(ApiError::NotFound("Store"))?;
    Ok(Json(store))
}
