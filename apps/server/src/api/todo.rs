//! Todo REST endpoints.
//!
//! A simpler alternate path over the same store as the GraphQL surface.

use axum::{extract::State, Json};
use entities::Todo;
use serde::Deserialize;
use todo_store::NewTodo;
use uuid::Uuid;

use crate::error::ServerResult;
use crate::state::SharedState;

/// Request body for creating a todo.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTodoRequest {
    /// Title of the todo.
    pub title: String,
    /// Optional user to assign the todo to.
    #[serde(default)]
    pub user_id: Option<Uuid>,
}

/// Lists all todos.
pub async fn list_todos(State(state): State<SharedState>) -> ServerResult<Json<Vec<Todo>>> {
    let todos = state.store.list_todos().await?;
    Ok(Json(todos))
}

/// Creates a todo.
pub async fn create_todo(
    State(state): State<SharedState>,
    Json(request): Json<CreateTodoRequest>,
) -> ServerResult<Json<Todo>> {
    let todo = state
        .store
        .create_todo(NewTodo {
            title: request.title,
            user_id: request.user_id,
        })
        .await?;

    tracing::info!(todo_id = %todo.id, "Todo created");

    Ok(Json(todo))
}
