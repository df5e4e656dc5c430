/// Web API Handlers
///
/// This module contains the handlers for the RESTful API endpoints.
/// Each handler extracts what it needs from the request, checks it, calls
/// the repository layer and shapes the response. Failures are reported
/// through `ApiError`, which renders every error as `{"message": ...}`.

mod board_handlers;
mod comment_handlers;
mod review_handlers;
mod store_handlers;
mod user_handlers;

// Re-export all handlers
pub use board_handlers::*;
pub use comment_handlers::*;
pub use review_handlers::*;
pub use store_handlers::*;
pub use user_handlers::*;
