//! In-memory todo store, used when no `DATABASE_URL` is configured.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use pinboard_core::types::{DbId, Timestamp};
use tokio::sync::RwLock;

use super::TodoRepository;
use crate::models::todo::{NewTodo, Todo, UpdateTodo};

#[derive(Default)]
struct Table {
    next_id: DbId,
    rows: BTreeMap<DbId, Todo>,
}

/// Todo store kept in process memory. Contents are lost on restart.
#[derive(Default)]
pub struct MemoryTodoRepo {
    table: RwLock<Table>,
}

impl MemoryTodoRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

/// `Utc::now()`, but strictly after `previous` so updates always advance.
fn next_timestamp(previous: Timestamp) -> Timestamp {
    Utc::now().max(previous + Duration::microseconds(1))
}

#[async_trait]
impl TodoRepository for MemoryTodoRepo {
    async fn list(&self) -> Result<Vec<Todo>, sqlx::Error> {
        let table = self.table.read().await;
        let mut todos: Vec<Todo> = table.rows.values().cloned().collect();
        todos.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(todos)
    }

    async fn create(&self, input: &NewTodo) -> Result<Todo, sqlx::Error> {
        let mut table = self.table.write().await;
        table.next_id += 1;

        let now = Utc::now();
        let todo = Todo {
            id: table.next_id,
            title: input.title.clone(),
            description: input.description.clone(),
            completed: false,
            created_at: now,
            updated_at: now,
        };
        table.rows.insert(todo.id, todo.clone());
        Ok(todo)
    }

    async fn update(&self, id: DbId, input: &UpdateTodo) -> Result<Option<Todo>, sqlx::Error> {
        let mut table = self.table.write().await;
        let Some(todo) = table.rows.get_mut(&id) else {
            return Ok(None);
        };

        if let Some(title) = &input.title {
            todo.title = title.clone();
        }
        if let Some(description) = &input.description {
            todo.description = description.clone();
        }
        if let Some(completed) = input.completed {
            todo.completed = completed;
        }
        todo.updated_at = next_timestamp(todo.updated_at);

        Ok(Some(todo.clone()))
    }

    async fn delete(&self, id: DbId) -> Result<bool, sqlx::Error> {
        Ok(self.table.write().await.rows.remove(&id).is_some())
    }

    async fn ping(&self) -> Result<(), sqlx::Error> {
        Ok(())
    }
}
