//! Todo store trait definitions.

use async_trait::async_trait;
use entities::{Todo, User};
use uuid::Uuid;

use crate::TodoStoreResult;

/// Input for creating a todo.
#[derive(Debug, Clone)]
pub struct NewTodo {
    /// Title of the todo.
    pub title: String,
    /// Optional user to assign the todo to.
    pub user_id: Option<Uuid>,
}

/// Input for creating a user.
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Email address, unique across all users.
    pub email: String,
    /// Display name.
    pub name: String,
}

/// Partial update for a todo. Fields left as `None` are not touched.
///
/// `user_id` is doubly optional: the outer `Option` records whether the
/// field was supplied at all, the inner one carries the new value
/// (`Some(None)` explicitly unassigns the todo).
#[derive(Debug, Clone, Default)]
pub struct TodoPatch {
    /// New title.
    pub title: Option<String>,
    /// New completion state.
    pub completed: Option<bool>,
    /// New assignment.
    pub user_id: Option<Option<Uuid>>,
}

/// Partial update for a user. Fields left as `None` are not touched.
#[derive(Debug, Clone, Default)]
pub struct UserPatch {
    /// New email address.
    pub email: Option<String>,
    /// New display name.
    pub name: Option<String>,
}

/// Trait for todo and user storage operations.
///
/// List operations return rows in creation order. Writes touch exactly one
/// row; assignment writes verify the referenced user exists first.
#[async_trait]
pub trait TodoStore: Send + Sync {
    // =========================================================================
    // Todo operations
    // =========================================================================

    /// Lists all todos.
    async fn list_todos(&self) -> TodoStoreResult<Vec<Todo>>;

    /// Gets a todo by ID.
    async fn get_todo(&self, id: Uuid) -> TodoStoreResult<Option<Todo>>;

    /// Lists the todos assigned to a user.
    async fn list_todos_for_user(&self, user_id: Uuid) -> TodoStoreResult<Vec<Todo>>;

    /// Creates a new todo.
    async fn create_todo(&self, new: NewTodo) -> TodoStoreResult<Todo>;

    /// Applies a partial update to a todo.
    async fn update_todo(&self, id: Uuid, patch: TodoPatch) -> TodoStoreResult<Todo>;

    /// Deletes a todo. Returns whether a row was deleted.
    async fn delete_todo(&self, id: Uuid) -> TodoStoreResult<bool>;

    // =========================================================================
    // User operations
    // =========================================================================

    /// Lists all users.
    async fn list_users(&self) -> TodoStoreResult<Vec<User>>;

    /// Gets a user by ID.
    async fn get_user(&self, id: Uuid) -> TodoStoreResult<Option<User>>;

    /// Gets a user by email.
    async fn get_user_by_email(&self, email: &str) -> TodoStoreResult<Option<User>>;

    /// Creates a new user.
    async fn create_user(&self, new: NewUser) -> TodoStoreResult<User>;

    /// Applies a partial update to a user.
    async fn update_user(&self, id: Uuid, patch: UserPatch) -> TodoStoreResult<User>;

    /// Deletes a user. Returns whether a row was deleted.
    ///
    /// Dependent todos are left untouched: their `user_id` keeps pointing at
    /// the removed user and resolves to no user from then on.
    async fn delete_user(&self, id: Uuid) -> TodoStoreResult<bool>;
}
