//! GraphQL schema and resolvers.

mod todo;
mod user;

pub use todo::*;
pub use user::*;

use std::sync::Arc;

use async_graphql::http::GraphQLPlaygroundConfig;
use async_graphql::{EmptySubscription, Error, MergedObject, Result, Schema, ID};
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{
    extract::State,
    response::{Html, IntoResponse},
};
use todo_store::TodoStore;
use uuid::Uuid;

use crate::state::SharedState;

/// GraphQL schema type.
pub type AppSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

#[derive(MergedObject, Default)]
pub struct QueryRoot(TodoQuery, UserQuery);

#[derive(MergedObject, Default)]
pub struct MutationRoot(TodoMutation, UserMutation);

/// Builds the GraphQL schema.
///
/// The store handle is not baked into the schema; the handler injects it
/// into each request's context so every request carries its own handle.
pub fn build_schema() -> AppSchema {
    Schema::build(
        QueryRoot::default(),
        MutationRoot::default(),
        EmptySubscription,
    )
    .finish()
}

/// GraphQL query/mutation handler.
pub async fn graphql_handler(
    State(state): State<SharedState>,
    req: GraphQLRequest,
) -> GraphQLResponse {
    let request = req.into_inner().data::<Arc<dyn TodoStore>>(state.store.clone());
    state.schema.execute(request).await.into()
}

/// GraphQL playground, served on GET for development.
pub async fn graphql_playground() -> impl IntoResponse {
    Html(async_graphql::http::playground_source(
        GraphQLPlaygroundConfig::new("/graphql"),
    ))
}

/// Parses a GraphQL ID into a UUID.
fn parse_id(id: &ID) -> Result<Uuid> {
    Uuid::parse_str(id.as_str()).map_err(|_| Error::new(format!("invalid id: {}", id.as_str())))
}
