use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use pinboard_core::error::CoreError;
use serde_json::json;

/// Body message for every 404.
pub const NOT_FOUND_MESSAGE: &str = "Not found";

/// Body message for unexpected 500s.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Everything a todo handler can fail with.
///
/// Rendered as a `{ "error", "code" }` JSON body. Store and internal
/// details go to the log only.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A store operation failed. `message` is what the client sees.
    #[error("{message}: {source}")]
    Persistence {
        message: &'static str,
        #[source]
        source: sqlx::Error,
    },

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// No route or resource matched.
    #[error("Not found")]
    NotFound,

    /// An internal error with a message for the logs only.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Handler return type.
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Build a `map_err` adapter that tags a store error with the message
    /// returned to the client.
    pub fn persistence(message: &'static str) -> impl FnOnce(sqlx::Error) -> Self {
        move |source| Self::Persistence { message, source }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        tracing::debug!(error = %rejection.body_text(), "Unmatched path parameter");
        Self::NotFound
    }
}

impl AppError {
    /// Status, machine-readable code and client-facing message.
    ///
    /// Server-side detail is logged here and never copied into the message.
    fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            Self::Core(CoreError::NotFound { entity, id }) => {
                tracing::debug!(entity, id, "Entity not found");
                not_found()
            }
            Self::Core(CoreError::Validation(msg)) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
            }
            Self::Core(CoreError::Internal(detail)) | Self::InternalError(detail) => {
                tracing::error!(error = %detail, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    INTERNAL_ERROR_MESSAGE.to_string(),
                )
            }
            Self::Persistence { message, source } => {
                tracing::error!(error = %source, "{message}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    (*message).to_string(),
                )
            }
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            Self::NotFound => not_found(),
        }
    }
}

fn not_found() -> (StatusCode, &'static str, String) {
    (StatusCode::NOT_FOUND, "NOT_FOUND", NOT_FOUND_MESSAGE.to_string())
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.parts();
        (status, axum::Json(json!({ "error": message, "code": code }))).into_response()
    }
}
