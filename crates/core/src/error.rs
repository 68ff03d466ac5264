use crate::types::DbId;

/// Domain errors shared by the HTTP layer and the thumbnail pipeline.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// No row of kind `entity` has this id.
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: DbId },

    /// User input or configuration rejected. The message is safe to show.
    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
