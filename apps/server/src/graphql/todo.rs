//! Todo GraphQL objects and resolvers.

use std::sync::Arc;

use async_graphql::{
    ComplexObject, Context, InputObject, MaybeUndefined, Object, Result, SimpleObject, ID,
};
use todo_store::{NewTodo, TodoPatch, TodoStore};
use uuid::Uuid;

use crate::graphql::{parse_id, User};

/// A todo item.
#[derive(Debug, SimpleObject)]
#[graphql(complex)]
pub struct Todo {
    pub id: ID,
    pub title: String,
    pub completed: bool,
    #[graphql(skip)]
    pub user_id: Option<Uuid>,
}

impl From<entities::Todo> for Todo {
    fn from(todo: entities::Todo) -> Self {
        Self {
            id: ID(todo.id.to_string()),
            title: todo.title,
            completed: todo.completed,
            user_id: todo.user_id,
        }
    }
}

#[ComplexObject]
impl Todo {
    /// The user this todo is assigned to, if any.
    async fn user(&self, ctx: &Context<'_>) -> Result<Option<User>> {
        let Some(user_id) = self.user_id else {
            return Ok(None);
        };
        let store = ctx.data_unchecked::<Arc<dyn TodoStore>>();
        Ok(store.get_user(user_id).await?.map(User::from))
    }
}

#[derive(Default)]
pub struct TodoQuery;

#[Object]
impl TodoQuery {
    /// Lists all todos.
    async fn todos(&self, ctx: &Context<'_>) -> Result<Vec<Todo>> {
        let store = ctx.data_unchecked::<Arc<dyn TodoStore>>();
        let todos = store.list_todos().await?;
        Ok(todos.into_iter().map(Todo::from).collect())
    }
}

/// Input for creating a todo.
#[derive(Debug, InputObject)]
pub struct CreateTodoInput {
    pub title: String,
    pub user_id: Option<ID>,
}

/// Input for updating a todo. Omitted fields are left unchanged; `userId`
/// distinguishes omitted from an explicit null (which unassigns the todo).
#[derive(Debug, InputObject)]
pub struct UpdateTodoInput {
    pub id: ID,
    pub title: Option<String>,
    pub done: Option<bool>,
    pub user_id: MaybeUndefined<ID>,
}

#[derive(Default)]
pub struct TodoMutation;

#[Object]
impl TodoMutation {
    /// Creates a new todo, optionally assigned to a user.
    async fn create_todo(&self, ctx: &Context<'_>, input: CreateTodoInput) -> Result<Todo> {
        let store = ctx.data_unchecked::<Arc<dyn TodoStore>>();
        let user_id = input.user_id.as_ref().map(parse_id).transpose()?;
        let todo = store
            .create_todo(NewTodo {
                title: input.title,
                user_id,
            })
            .await?;
        Ok(todo.into())
    }

    /// Updates the supplied fields of a todo.
    async fn update_todo(&self, ctx: &Context<'_>, input: UpdateTodoInput) -> Result<Todo> {
        let store = ctx.data_unchecked::<Arc<dyn TodoStore>>();
        let user_id = match &input.user_id {
            MaybeUndefined::Undefined => None,
            MaybeUndefined::Null => Some(None),
            MaybeUndefined::Value(id) => Some(Some(parse_id(id)?)),
        };
        let patch = TodoPatch {
            title: input.title,
            completed: input.done,
            user_id,
        };
        let todo = store.update_todo(parse_id(&input.id)?, patch).await?;
        Ok(todo.into())
    }

    /// Deletes a todo. Returns whether a todo was deleted.
    async fn delete_todo(&self, ctx: &Context<'_>, id: ID) -> Result<bool> {
        let store = ctx.data_unchecked::<Arc<dyn TodoStore>>();
        Ok(store.delete_todo(parse_id(&id)?).await?)
    }
}
