//! Repository layer.
//!
//! [`TodoRepository`] is the seam the HTTP handlers depend on. It is a trait
//! object rather than static functions over a pool so the API tests can run
//! against [`MemoryTodoRepo`] (or a failing store) without Postgres.
//! [`PgTodoRepo`] is the production implementation; [`MemoryTodoRepo`] also
//! backs local runs without a database.

use async_trait::async_trait;
use pinboard_core::types::DbId;

use crate::models::todo::{NewTodo, Todo, UpdateTodo};

pub mod memory_todo_repo;
pub mod todo_repo;

pub use memory_todo_repo::MemoryTodoRepo;
pub use todo_repo::PgTodoRepo;

/// CRUD operations over the todo table.
#[async_trait]
pub trait TodoRepository: Send + Sync + 'static {
    /// All todos, newest first.
    async fn list(&self) -> Result<Vec<Todo>, sqlx::Error>;

    /// Insert a todo. `created_at` and `updated_at` are equal on the result.
    async fn create(&self, input: &NewTodo) -> Result<Todo, sqlx::Error>;

    /// Apply the `Some` fields of `input` and refresh `updated_at`.
    ///
    /// Returns `None` if no row with the given `id` exists.
    async fn update(&self, id: DbId, input: &UpdateTodo) -> Result<Option<Todo>, sqlx::Error>;

    /// Delete by ID. Returns `true` if a row was removed.
    async fn delete(&self, id: DbId) -> Result<bool, sqlx::Error>;

    /// Check the backing store is reachable.
    async fn ping(&self) -> Result<(), sqlx::Error>;
}
