//! In-memory todo store implementation for tests and local development.

use std::sync::Arc;

use async_trait::async_trait;
use entities::{Todo, User};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{NewTodo, NewUser, TodoPatch, TodoStore, TodoStoreError, TodoStoreResult, UserPatch};

/// In-memory todo store.
///
/// Rows are kept in vectors so list order is insertion order, matching the
/// creation order the SQLite store returns.
#[derive(Debug, Default)]
pub struct MemoryTodoStore {
    todos: Arc<RwLock<Vec<Todo>>>,
    users: Arc<RwLock<Vec<User>>>,
}

impl MemoryTodoStore {
    /// Creates a new in-memory todo store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TodoStore for MemoryTodoStore {
    // =========================================================================
    // Todo operations
    // =========================================================================

    async fn list_todos(&self) -> TodoStoreResult<Vec<Todo>> {
        let todos = self.todos.read().await;
        Ok(todos.clone())
    }

    async fn get_todo(&self, id: Uuid) -> TodoStoreResult<Option<Todo>> {
        let todos = self.todos.read().await;
        Ok(todos.iter().find(|t| t.id == id).cloned())
    }

    async fn list_todos_for_user(&self, user_id: Uuid) -> TodoStoreResult<Vec<Todo>> {
        let todos = self.todos.read().await;
        Ok(todos
            .iter()
            .filter(|t| t.user_id == Some(user_id))
            .cloned()
            .collect())
    }

    async fn create_todo(&self, new: NewTodo) -> TodoStoreResult<Todo> {
        if let Some(user_id) = new.user_id {
            let users = self.users.read().await;
            if !users.iter().any(|u| u.id == user_id) {
                return Err(TodoStoreError::UserNotFound(user_id));
            }
        }

        let mut todo = Todo::new(new.title);
        todo.user_id = new.user_id;

        let mut todos = self.todos.write().await;
        todos.push(todo.clone());
        Ok(todo)
    }

    async fn update_todo(&self, id: Uuid, patch: TodoPatch) -> TodoStoreResult<Todo> {
        if let Some(Some(user_id)) = patch.user_id {
            let users = self.users.read().await;
            if !users.iter().any(|u| u.id == user_id) {
                return Err(TodoStoreError::UserNotFound(user_id));
            }
        }

        let mut todos = self.todos.write().await;
        let todo = todos
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| TodoStoreError::not_found("Todo", id.to_string()))?;

        if let Some(title) = patch.title {
            todo.title = title;
        }
        if let Some(completed) = patch.completed {
            todo.completed = completed;
        }
        if let Some(user_id) = patch.user_id {
            todo.user_id = user_id;
        }
        todo.updated_at = chrono::Utc::now();

        Ok(todo.clone())
    }

    async fn delete_todo(&self, id: Uuid) -> TodoStoreResult<bool> {
        let mut todos = self.todos.write().await;
        let before = todos.len();
        todos.retain(|t| t.id != id);
        Ok(todos.len() < before)
    }

    // =========================================================================
    // User operations
    // =========================================================================

    async fn list_users(&self) -> TodoStoreResult<Vec<User>> {
        let users = self.users.read().await;
        Ok(users.clone())
    }

    async fn get_user(&self, id: Uuid) -> TodoStoreResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.id == id).cloned())
    }

    async fn get_user_by_email(&self, email: &str) -> TodoStoreResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.email == email).cloned())
    }

    async fn create_user(&self, new: NewUser) -> TodoStoreResult<User> {
        let mut users = self.users.write().await;
        if users.iter().any(|u| u.email == new.email) {
            return Err(TodoStoreError::DuplicateEmail(new.email));
        }

        let user = User::new(new.email, new.name);
        users.push(user.clone());
        Ok(user)
    }

    async fn update_user(&self, id: Uuid, patch: UserPatch) -> TodoStoreResult<User> {
        let mut users = self.users.write().await;

        if let Some(email) = &patch.email {
            if users.iter().any(|u| u.email == *email && u.id != id) {
                return Err(TodoStoreError::DuplicateEmail(email.clone()));
            }
        }

        let user = users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or_else(|| TodoStoreError::not_found("User", id.to_string()))?;

        if let Some(email) = patch.email {
            user.email = email;
        }
        if let Some(name) = patch.name {
            user.name = name;
        }
        user.updated_at = chrono::Utc::now();

        Ok(user.clone())
    }

    async fn delete_user(&self, id: Uuid) -> TodoStoreResult<bool> {
        // Dependent todos keep their user_id; resolving it yields no user.
        let mut users = self.users.write().await;
        let before = users.len();
        users.retain(|u| u.id != id);
        Ok(users.len() < before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_todo_crud() {
        let store = MemoryTodoStore::new();

        // Create
        let created = store
            .create_todo(NewTodo {
                title: "Write spec".to_string(),
                user_id: None,
            })
            .await
            .unwrap();
        assert_eq!(created.title, "Write spec");
        assert!(!created.completed);
        assert!(created.user_id.is_none());

        // Get
        let fetched = store.get_todo(created.id).await.unwrap().unwrap();
        assert_eq!(fetched.title, "Write spec");

        // List
        let todos = store.list_todos().await.unwrap();
        assert_eq!(todos.len(), 1);

        // Delete
        assert!(store.delete_todo(created.id).await.unwrap());
        assert!(store.get_todo(created.id).await.unwrap().is_none());

        // Deleting again is an idempotent false
        assert!(!store.delete_todo(created.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_todo_partial_update() {
        let store = MemoryTodoStore::new();
        let user = store
            .create_user(NewUser {
                email: "ann@x.com".to_string(),
                name: "Ann".to_string(),
            })
            .await
            .unwrap();
        let todo = store
            .create_todo(NewTodo {
                title: "Write spec".to_string(),
                user_id: Some(user.id),
            })
            .await
            .unwrap();

        // Only `completed` supplied: title and assignment stay.
        let updated = store
            .update_todo(
                todo.id,
                TodoPatch {
                    completed: Some(true),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert!(updated.completed);
        assert_eq!(updated.title, "Write spec");
        assert_eq!(updated.user_id, Some(user.id));

        // Explicitly unassign.
        let updated = store
            .update_todo(
                todo.id,
                TodoPatch {
                    user_id: Some(None),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert!(updated.user_id.is_none());
        assert!(updated.completed);
    }

    #[tokio::test]
    async fn test_update_missing_todo() {
        let store = MemoryTodoStore::new();
        let err = store
            .update_todo(Uuid::new_v4(), TodoPatch::default())
            .await
            .unwrap_err();
        assert!(matches!(err, TodoStoreError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_create_todo_with_unknown_user() {
        let store = MemoryTodoStore::new();
        let err = store
            .create_todo(NewTodo {
                title: "Orphan".to_string(),
                user_id: Some(Uuid::new_v4()),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, TodoStoreError::UserNotFound(_)));
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let store = MemoryTodoStore::new();
        store
            .create_user(NewUser {
                email: "ann@x.com".to_string(),
                name: "Ann".to_string(),
            })
            .await
            .unwrap();

        let err = store
            .create_user(NewUser {
                email: "ann@x.com".to_string(),
                name: "Another Ann".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, TodoStoreError::DuplicateEmail(_)));
    }

    #[tokio::test]
    async fn test_get_user_by_email() {
        let store = MemoryTodoStore::new();
        let ann = store
            .create_user(NewUser {
                email: "ann@x.com".to_string(),
                name: "Ann".to_string(),
            })
            .await
            .unwrap();

        let found = store.get_user_by_email("ann@x.com").await.unwrap().unwrap();
        assert_eq!(found.id, ann.id);
        assert_eq!(found.name, "Ann");

        assert!(store
            .get_user_by_email("nobody@x.com")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_todos_for_user() {
        let store = MemoryTodoStore::new();
        let ann = store
            .create_user(NewUser {
                email: "ann@x.com".to_string(),
                name: "Ann".to_string(),
            })
            .await
            .unwrap();
        let bob = store
            .create_user(NewUser {
                email: "bob@x.com".to_string(),
                name: "Bob".to_string(),
            })
            .await
            .unwrap();

        let first = store
            .create_todo(NewTodo {
                title: "First".to_string(),
                user_id: Some(ann.id),
            })
            .await
            .unwrap();
        let second = store
            .create_todo(NewTodo {
                title: "Second".to_string(),
                user_id: Some(ann.id),
            })
            .await
            .unwrap();
        store
            .create_todo(NewTodo {
                title: "Other".to_string(),
                user_id: Some(bob.id),
            })
            .await
            .unwrap();

        let todos = store.list_todos_for_user(ann.id).await.unwrap();
        assert_eq!(
            todos.iter().map(|t| t.id).collect::<Vec<_>>(),
            vec![first.id, second.id]
        );

        let empty_user = store
            .create_user(NewUser {
                email: "carol@x.com".to_string(),
                name: "Carol".to_string(),
            })
            .await
            .unwrap();
        assert!(store
            .list_todos_for_user(empty_user.id)
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_delete_user_leaves_todos_dangling() {
        let store = MemoryTodoStore::new();
        let ann = store
            .create_user(NewUser {
                email: "ann@x.com".to_string(),
                name: "Ann".to_string(),
            })
            .await
            .unwrap();
        let todo = store
            .create_todo(NewTodo {
                title: "Write spec".to_string(),
                user_id: Some(ann.id),
            })
            .await
            .unwrap();

        assert!(store.delete_user(ann.id).await.unwrap());

        let fetched = store.get_todo(todo.id).await.unwrap().unwrap();
        assert_eq!(fetched.user_id, Some(ann.id));
        assert!(store.get_user(ann.id).await.unwrap().is_none());
    }
}
