//! Handlers for the `/api/todos` resource.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use pinboard_core::error::CoreError;
use pinboard_core::types::DbId;
use pinboard_db::models::todo::{CreateTodo, Todo, UpdateTodo};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /api/todos
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Todo>>> {
    let todos = state
        .todos
        .list()
        .await
        .map_err(AppError::persistence("Failed to load todos"))?;
    Ok(Json(todos))
}

/// POST /api/todos
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<CreateTodo>, JsonRejection>,
) -> AppResult<(StatusCode, Json<Todo>)> {
    let Json(input) = payload?;
    let new_todo = input.validate()?;

    let todo = state
        .todos
        .create(&new_todo)
        .await
        .map_err(AppError::persistence("Failed to create todo"))?;

    tracing::info!(todo_id = todo.id, title = %todo.title, "Created todo");
    Ok((StatusCode::CREATED, Json(todo)))
}

/// PUT /api/todos/{id}
pub async fn update(
    State(state): State<AppState>,
    id: Result<Path<DbId>, PathRejection>,
    payload: Result<Json<UpdateTodo>, JsonRejection>,
) -> AppResult<Json<Todo>> {
    let Path(id) = id?;
    let Json(input) = payload?;
    let changes = input.validate()?;

    let todo = state
        .todos
        .update(id, &changes)
        .await
        .map_err(AppError::persistence("Failed to update todo"))?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Todo", id }))?;

    tracing::info!(todo_id = todo.id, title = %todo.title, "Updated todo");
    Ok(Json(todo))
}

/// DELETE /api/todos/{id}
pub async fn delete(
    State(state): State<AppState>,
    id: Result<Path<DbId>, PathRejection>,
) -> AppResult<StatusCode> {
    let Path(id) = id?;

    let deleted = state
        .todos
        .delete(id)
        .await
        .map_err(AppError::persistence("Failed to delete todo"))?;

    if deleted {
        tracing::info!(todo_id = id, "Deleted todo");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound { entity: "Todo", id }))
    }
}
