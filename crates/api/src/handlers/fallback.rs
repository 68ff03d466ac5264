use crate::error::AppError;

/// Fallback for unmatched routes: JSON `{"error": "Not found"}` with 404.
pub async fn not_found() -> AppError {
    AppError::NotFound
}
