/// Storeboard: community meetup boards and store reviews
///
/// This library provides the data models, database access and HTTP API of a
/// small community service. Users post boards announcing meetups, comment on
/// them, and review stores; every store keeps a running average of the
/// grades of its reviews.
///
/// ### Modules
///
/// - `db`: Database connection management
/// - `models`: Records stored in the database
/// - `repo`: Repository layer for database operations
/// - `handlers`: HTTP handlers for each resource
/// - `rating`: Running-average arithmetic for store ratings
/// - `pagination`: Page window arithmetic for the board listing
///
/// ### Web API
///
/// - `GET /boards`, `POST /boards`: Paged listing, multipart board post
/// - `GET /boards/search?value=`: Boards in a region
/// - `GET|PATCH|DELETE /boards/{id}`: Board detail with comments, edit, delete
/// - `POST /boards/{id}/comments`: Comment on a board
/// - `GET|DELETE /comments/{id}`: Read or delete a comment
/// - `POST /stores`, `GET /stores/{id}`: Register or read a store
/// - `GET|POST /stores/{id}/reviews`: List or write reviews of a store
/// - `GET|PUT|DELETE /reviews/{id}`: Read, change or delete a review
/// - `POST /users`, `GET /users/{id}`: Register or read a user profile
/// - `GET /uploads/{file}`: Stored board images

/// Authenticated-caller extraction
pub mod auth;

/// Configuration loading
pub mod config;

/// Database connection module
pub mod db;

/// Request and response shapes
pub mod dto;

/// API error type
pub mod errors;

/// HTTP handlers
pub mod handlers;

/// Logging setup
pub mod logging;

/// Data models module
pub mod models;

/// Page window arithmetic
pub mod pagination;

/// Store rating arithmetic
pub mod rating;

/// Repository module for database operations
pub mod repo;

/// Database schema module
pub mod schema;

/// Image upload storage
pub mod uploads;

#[cfg(test)]
pub mod test_utils;

use axum::{
    Router,
    extract::{DefaultBodyLimit, FromRef},
    routing::{get, post},
};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::handlers::*;
use crate::uploads::{UPLOADS_ROUTE, UploadStore};

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Listing parameters that apply when a request leaves them out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListingDefaults {
    pub count_per_page: i64,
}

impl Default for ListingDefaults {
    fn default() -> Self {
        Self { count_per_page: 10 }
    }
}

/// Everything the handlers share
///
/// Handlers extract only the part they need through `FromRef`.
#[derive(Clone)]
pub struct AppState {
    pub pool: Arc<db::DbPool>,
    pub uploads: Arc<UploadStore>,
    pub listing: ListingDefaults,
    /// Largest accepted request body, in bytes
    pub max_body_bytes: usize,
}

impl AppState {
    /// State with default listing size and a 10 MB body limit
    pub fn new(pool: Arc<db::DbPool>, uploads: UploadStore) -> Self {
        Self {
            pool,
            uploads: Arc::new(uploads),
            listing: ListingDefaults::default(),
            max_body_bytes: 10 * 1024 * 1024,
        }
    }

    /// State configured from `config`
    pub fn from_config(pool: Arc<db::DbPool>, config: &config::Config) -> Self {
        Self {
            pool,
            uploads: Arc::new(UploadStore::new(&config.upload_dir)),
            listing: ListingDefaults {
                count_per_page: config.count_per_page,
            },
            max_body_bytes: config.max_upload_bytes(),
        }
    }
}

impl FromRef<AppState> for Arc<db::DbPool> {
    fn from_ref(state: &AppState) -> Self {
        state.pool.clone()
    }
}

impl FromRef<AppState> for Arc<UploadStore> {
    fn from_ref(state: &AppState) -> Self {
        state.uploads.clone()
    }
}

impl FromRef<AppState> for ListingDefaults {
    fn from_ref(state: &AppState) -> Self {
        state.listing
    }
}

/// Creates the application router with all routes configured
///
/// ### Arguments
///
/// * `state` - The shared state handed to every handler
///
/// ### Returns
///
/// An Axum Router configured with all API routes, request tracing, CORS and
/// the static file service for uploads
pub fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/boards", get(list_boards_handler).post(create_board_handler))
        .route("/boards/search", get(search_boards_handler))
        .route(
            "/boards/{id}",
            get(get_board_detail_handler)
                .patch(edit_board_handler)
                .delete(delete_board_handler),
        )
        .route("/boards/{id}/comments", post(create_comment_handler))
        .route(
            "/comments/{id}",
            get(get_comment_handler).delete(delete_comment_handler),
        )
        .route("/stores", post(create_store_handler))
        .route("/stores/{id}", get(get_store_handler))
        .route(
            "/stores/{id}/reviews",
            get(list_store_reviews_handler).post(create_review_handler),
        )
        .route(
            "/reviews/{id}",
            get(get_review_handler)
                .put(edit_review_handler)
                .delete(delete_review_handler),
        )
        .route("/users", post(create_user_handler))
        .route("/users/{id}", get(get_user_handler))
        .nest_service(UPLOADS_ROUTE, ServeDir::new(state.uploads.dir()))
        .layer(DefaultBodyLimit::max(state.max_body_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Applies any pending embedded migrations
pub fn run_migrations(conn: &mut diesel::SqliteConnection) -> anyhow::Result<()> {
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| anyhow::anyhow!("Failed to run migrations: {}", e))?;
    if !applied.is_empty() {
        tracing::info!("Applied {} migrations", applied.len());
    }
    Ok(())
}
