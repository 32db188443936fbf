//! API endpoints.

pub mod todo;

use axum::{
    routing::{get, post},
    Router,
};

use crate::graphql;
use crate::state::SharedState;

/// Creates the API router with all endpoints.
pub fn create_router() -> Router<SharedState> {
    Router::new()
        // GraphQL endpoint (playground on GET)
        .route(
            "/graphql",
            post(graphql::graphql_handler).get(graphql::graphql_playground),
        )
        // REST todo endpoints
        .route("/api/todos", get(todo::list_todos).post(todo::create_todo))
        // Health check
        .route("/health", get(health_check))
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}
