//! Repository for the `todos` table.

use async_trait::async_trait;
use pinboard_core::types::DbId;
use sqlx::PgPool;

use super::TodoRepository;
use crate::models::todo::{NewTodo, Todo, UpdateTodo};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, description, completed, created_at, updated_at";

/// Postgres-backed todo store.
///
/// Every mutation runs in its own transaction: commit on success, rollback
/// when the transaction is dropped on any error path.
#[derive(Clone)]
pub struct PgTodoRepo {
    pool: PgPool,
}

impl PgTodoRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TodoRepository for PgTodoRepo {
    async fn list(&self) -> Result<Vec<Todo>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM todos ORDER BY created_at DESC, id DESC");
        sqlx::query_as::<_, Todo>(&query).fetch_all(&self.pool).await
    }

    async fn create(&self, input: &NewTodo) -> Result<Todo, sqlx::Error> {
        // Both timestamps come from the same NOW(), so they are equal.
        let query = format!(
            "INSERT INTO todos (title, description)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        let mut tx = self.pool.begin().await?;
        let todo = sqlx::query_as::<_, Todo>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .fetch_one(&mut *tx)
            .await?;
        tx.commit().await?;

        tracing::debug!(todo_id = todo.id, "Inserted todo");
        Ok(todo)
    }

    async fn update(&self, id: DbId, input: &UpdateTodo) -> Result<Option<Todo>, sqlx::Error> {
        let query = format!(
            "UPDATE todos SET
                title = COALESCE($2, title),
                description = CASE WHEN $5 THEN $3 ELSE description END,
                completed = COALESCE($4, completed),
                updated_at = GREATEST(NOW(), updated_at + INTERVAL '1 microsecond')
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let mut tx = self.pool.begin().await?;
        let todo = sqlx::query_as::<_, Todo>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(input.description.as_ref().and_then(|d| d.as_deref()))
            .bind(input.completed)
            .bind(input.description.is_some())
            .fetch_optional(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(todo)
    }

    async fn delete(&self, id: DbId) -> Result<bool, sqlx::Error> {
        let mut tx = self.pool.begin().await?;
        let result = sqlx::query("DELETE FROM todos WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> Result<(), sqlx::Error> {
        crate::health_check(&self.pool).await
    }
}
