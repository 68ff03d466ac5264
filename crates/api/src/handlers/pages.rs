//! Server-rendered HTML listing at `/`.

use std::fmt::Write;

use axum::extract::State;
use axum::response::Html;
use pinboard_db::models::todo::Todo;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /
pub async fn index(State(state): State<AppState>) -> AppResult<Html<String>> {
    let todos = state
        .todos
        .list()
        .await
        .map_err(AppError::persistence("Failed to load todos"))?;
    Ok(Html(render_index(&todos)))
}

/// Render the todo list page, newest first, as passed in.
pub fn render_index(todos: &[Todo]) -> String {
    let mut items = String::new();
    for todo in todos {
        let class = if todo.completed { "todo done" } else { "todo" };
        let _ = write!(
            items,
            "    <li class=\"{class}\" data-id=\"{id}\">\n      <h2>{title}</h2>\n",
            id = todo.id,
            title = escape_html(&todo.title),
        );
        if let Some(description) = todo.description.as_deref().filter(|d| !d.is_empty()) {
            let _ = writeln!(items, "      <p>{}</p>", escape_html(description));
        }
        let _ = writeln!(
            items,
            "      <time datetime=\"{created}\">{created_short}</time>\n    </li>",
            created = todo.created_at.to_rfc3339(),
            created_short = todo.created_at.format("%Y-%m-%d %H:%M"),
        );
    }

    if todos.is_empty() {
        items.push_str("    <li class=\"empty\">Nothing to do yet.</li>\n");
    }

    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n  <meta charset=\"utf-8\">\n  \
         <title>Todos</title>\n</head>\n<body>\n  <h1>Todos</h1>\n  <ul>\n{items}  </ul>\n\
         </body>\n</html>\n"
    )
}

/// Escape the five HTML-significant characters.
fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}
