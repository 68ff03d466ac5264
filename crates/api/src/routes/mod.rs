pub mod health;
pub mod pages;
pub mod todos;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /todos                 list, create
/// /todos/{id}            update, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().merge(todos::router())
}
