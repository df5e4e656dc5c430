pub mod board;
pub mod comment;
pub mod review;
pub mod store;
pub mod user;
