use std::sync::Arc;

use pinboard_db::TodoRepository;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Todo store (Postgres, or in-memory when no database is configured).
    pub todos: Arc<dyn TodoRepository>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}
