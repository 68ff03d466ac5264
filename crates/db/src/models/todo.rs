//! Todo entity model and DTOs.

use pinboard_core::error::CoreError;
use pinboard_core::todo::normalize_title;
use pinboard_core::types::{DbId, Timestamp};
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;

/// A row from the `todos` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Todo {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Request body for creating a todo.
///
/// `title` is optional here so that a missing title is reported as a
/// validation error rather than a deserialization failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateTodo {
    pub title: Option<String>,
    pub description: Option<String>,
}

impl CreateTodo {
    /// Validate the payload into an insertable [`NewTodo`].
    pub fn validate(self) -> Result<NewTodo, CoreError> {
        Ok(NewTodo {
            title: normalize_title(self.title.as_deref())?,
            description: self.description,
        })
    }
}

/// A validated todo ready to insert.
#[derive(Debug, Clone)]
pub struct NewTodo {
    pub title: String,
    pub description: Option<String>,
}

/// Partial update. Only fields present in the body are applied.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTodo {
    pub title: Option<String>,
    /// `None` when absent, `Some(None)` when sent as `null` (clears it).
    #[serde(default, deserialize_with = "present")]
    pub description: Option<Option<String>>,
    pub completed: Option<bool>,
}

/// Wrap any present value, `null` included, in `Some`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

impl UpdateTodo {
    /// Normalize a supplied title; an explicitly blank title is rejected.
    pub fn validate(mut self) -> Result<Self, CoreError> {
        if let Some(title) = self.title.as_deref() {
            self.title = Some(normalize_title(Some(title))?);
        }
        Ok(self)
    }
}
