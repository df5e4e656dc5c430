/// Repository module
///
/// This module provides the data access layer for the application.
/// Every function takes the connection pool and returns `anyhow::Result`;
/// lookups that may miss return `Option` rather than an error.

mod user_repo;
mod store_repo;
mod board_repo;
mod comment_repo;
mod review_repo;

// Re-export all repository functions
pub use user_repo::*;
pub use store_repo::*;
pub use board_repo::*;
pub use comment_repo::*;
pub use review_repo::*;
