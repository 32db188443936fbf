//! Todo entity definitions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single todo item, optionally assigned to a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Todo {
    /// Unique identifier.
    pub id: Uuid,
    /// Title of the todo.
    pub title: String,
    /// Whether the todo is completed.
    pub completed: bool,
    /// The user this todo is assigned to, if any.
    pub user_id: Option<Uuid>,
    /// When this record was created.
    pub created_at: DateTime<Utc>,
    /// When this record was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Todo {
    /// Creates a new, uncompleted and unassigned todo.
    pub fn new(title: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            completed: false,
            user_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Assigns the todo to a user.
    pub fn with_user(mut self, user_id: Uuid) -> Self {
        self.user_id = Some(user_id);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_todo_creation() {
        let todo = Todo::new("Write spec");

        assert_eq!(todo.title, "Write spec");
        assert!(!todo.completed);
        assert!(todo.user_id.is_none());
    }

    #[test]
    fn test_todo_assignment() {
        let user_id = Uuid::new_v4();
        let todo = Todo::new("Write spec").with_user(user_id);

        assert_eq!(todo.user_id, Some(user_id));
    }
}
