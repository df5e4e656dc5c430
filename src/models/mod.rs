/// Data models module
///
/// This module defines the records stored by the service and the
/// column types they use.

mod id_list;
pub use id_list::IdList;

mod user;
pub use user::{User, UserSummary};

mod store;
pub use store::Store;

mod board;
pub use board::{Board, BoardChanges, BoardDraft};

mod comment;
pub use comment::Comment;

mod review;
pub use review::Review;
