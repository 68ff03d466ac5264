use axum::routing::get;
use axum::Router;

use crate::handlers::pages;
use crate::state::AppState;

/// HTML pages served at the root.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(pages::index))
}
