//! User GraphQL objects and resolvers.

use std::sync::Arc;

use async_graphql::{ComplexObject, Context, InputObject, Object, Result, SimpleObject, ID};
use todo_store::{NewUser, TodoStore, UserPatch};

use crate::graphql::{parse_id, Todo};

/// A user that todos can be assigned to.
#[derive(Debug, SimpleObject)]
#[graphql(complex)]
pub struct User {
    pub id: ID,
    pub email: String,
    pub name: String,
}

impl From<entities::User> for User {
    fn from(user: entities::User) -> Self {
        Self {
            id: ID(user.id.to_string()),
            email: user.email,
            name: user.name,
        }
    }
}

#[ComplexObject]
impl User {
    /// The todos assigned to this user.
    async fn todos(&self, ctx: &Context<'_>) -> Result<Vec<Todo>> {
        let store = ctx.data_unchecked::<Arc<dyn TodoStore>>();
        let todos = store.list_todos_for_user(parse_id(&self.id)?).await?;
        Ok(todos.into_iter().map(Todo::from).collect())
    }
}

#[derive(Default)]
pub struct UserQuery;

#[Object]
impl UserQuery {
    /// Lists all users.
    async fn users(&self, ctx: &Context<'_>) -> Result<Vec<User>> {
        let store = ctx.data_unchecked::<Arc<dyn TodoStore>>();
        let users = store.list_users().await?;
        Ok(users.into_iter().map(User::from).collect())
    }
}

/// Input for creating a user.
#[derive(Debug, InputObject)]
pub struct CreateUserInput {
    pub email: String,
    pub name: String,
}

/// Input for updating a user. Omitted fields are left unchanged.
#[derive(Debug, InputObject)]
pub struct UpdateUserInput {
    pub id: ID,
    pub email: Option<String>,
    pub name: Option<String>,
}

#[derive(Default)]
pub struct UserMutation;

#[Object]
impl UserMutation {
    /// Creates a new user.
    async fn create_user(&self, ctx: &Context<'_>, input: CreateUserInput) -> Result<User> {
        let store = ctx.data_unchecked::<Arc<dyn TodoStore>>();
        let user = store
            .create_user(NewUser {
                email: input.email,
                name: input.name,
            })
            .await?;
        Ok(user.into())
    }

    /// Updates the supplied fields of a user.
    async fn update_user(&self, ctx: &Context<'_>, input: UpdateUserInput) -> Result<User> {
        let store = ctx.data_unchecked::<Arc<dyn TodoStore>>();
        let patch = UserPatch {
            email: input.email,
            name: input.name,
        };
        let user = store.update_user(parse_id(&input.id)?, patch).await?;
        Ok(user.into())
    }

    /// Deletes a user. Returns whether a user was deleted.
    ///
    /// Todos assigned to the user are left as they are; their `user` field
    /// resolves to null afterwards.
    async fn delete_user(&self, ctx: &Context<'_>, id: ID) -> Result<bool> {
        let store = ctx.data_unchecked::<Arc<dyn TodoStore>>();
        Ok(store.delete_user(parse_id(&id)?).await?)
    }
}
