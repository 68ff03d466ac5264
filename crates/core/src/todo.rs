//! Todo field rules shared by the HTTP layer and the repositories.

use crate::error::CoreError;

/// Maximum title length in characters (matches the `VARCHAR(100)` column).
pub const MAX_TITLE_LEN: usize = 100;

/// Message returned when a title is missing or blank.
pub const TITLE_REQUIRED: &str = "Title is required";

/// Validate a todo title and return it trimmed.
///
/// `None`, empty and whitespace-only titles are rejected with
/// [`TITLE_REQUIRED`]; titles longer than [`MAX_TITLE_LEN`] characters are
/// rejected as well.
pub fn normalize_title(title: Option<&str>) -> Result<String, CoreError> {
    let title = title.map(str::trim).unwrap_or_default();

    if title.is_empty() {
        return Err(CoreError::Validation(TITLE_REQUIRED.to_string()));
    }
    if title.chars().count() > MAX_TITLE_LEN {
        return Err(CoreError::Validation(format!(
            "Title must be at most {MAX_TITLE_LEN} characters"
        )));
    }

    Ok(title.to_string())
}
