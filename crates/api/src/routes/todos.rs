//! Route definitions for the todo resource, mounted under `/api`.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::todos;
use crate::state::AppState;

/// ```text
/// GET    /todos          -> list
/// POST   /todos          -> create
/// PUT    /todos/{id}     -> update
/// DELETE /todos/{id}     -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/todos", get(todos::list).post(todos::create))
        .route("/todos/{id}", put(todos::update).delete(todos::delete))
}
