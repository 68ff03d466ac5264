//! Request handlers.
//!
//! Handlers delegate to the [`TodoRepository`](pinboard_db::TodoRepository)
//! in [`AppState`](crate::state::AppState) and map errors via
//! [`AppError`](crate::error::AppError).

pub mod fallback;
pub mod pages;
pub mod todos;
