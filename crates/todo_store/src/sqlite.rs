//! SQLite todo store implementation backed by `sqlx`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use entities::{Todo, User};
use sqlx::{sqlite::SqlitePoolOptions, FromRow, Pool, Sqlite};
use uuid::Uuid;

use crate::{NewTodo, NewUser, TodoPatch, TodoStore, TodoStoreError, TodoStoreResult, UserPatch};

/// First-run table creation.
///
/// `todos.user_id` deliberately carries no FOREIGN KEY clause: deleting a
/// user leaves its todos' assignment in place, so the column must be able to
/// hold an id with no matching user row. Referenced-user existence is checked
/// at write time instead.
const SCHEMA_SQL: &str = "
CREATE TABLE IF NOT EXISTS users (
    id TEXT PRIMARY KEY,
    email TEXT NOT NULL UNIQUE,
    name TEXT NOT NULL,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS todos (
    id TEXT PRIMARY KEY,
    title TEXT NOT NULL,
    completed INTEGER NOT NULL DEFAULT 0,
    user_id TEXT,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);
";

/// Database row for User.
#[derive(Debug, FromRow)]
struct UserRow {
    id: String,
    email: String,
    name: String,
    created_at: String,
    updated_at: String,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: parse_uuid(&row.id),
            email: row.email,
            name: row.name,
            created_at: parse_timestamp(&row.created_at),
            updated_at: parse_timestamp(&row.updated_at),
        }
    }
}

/// Database row for Todo.
#[derive(Debug, FromRow)]
struct TodoRow {
    id: String,
    title: String,
    completed: bool,
    user_id: Option<String>,
    created_at: String,
    updated_at: String,
}

impl From<TodoRow> for Todo {
    fn from(row: TodoRow) -> Self {
        Todo {
            id: parse_uuid(&row.id),
            title: row.title,
            completed: row.completed,
            user_id: row.user_id.as_deref().map(parse_uuid),
            created_at: parse_timestamp(&row.created_at),
            updated_at: parse_timestamp(&row.updated_at),
        }
    }
}

fn parse_uuid(s: &str) -> Uuid {
    Uuid::parse_str(s).unwrap_or_default()
}

fn parse_timestamp(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now())
}

/// SQLite-backed todo store.
pub struct SqliteTodoStore {
    pool: Pool<Sqlite>,
}

impl SqliteTodoStore {
    /// Connects to the database at `database_url` and creates the tables on
    /// first run.
    pub async fn connect(database_url: &str) -> TodoStoreResult<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await?;

        let store = Self { pool };
        store.run_migrations().await?;
        Ok(store)
    }

    /// Opens a fresh in-memory database.
    ///
    /// Limited to a single connection: every `sqlite::memory:` connection is
    /// its own database.
    pub async fn in_memory() -> TodoStoreResult<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await?;

        let store = Self { pool };
        store.run_migrations().await?;
        Ok(store)
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }

    async fn run_migrations(&self) -> TodoStoreResult<()> {
        sqlx::raw_sql(SCHEMA_SQL)
            .execute(&self.pool)
            .await
            .map_err(|e| TodoStoreError::Other(format!("migration failed: {e}")))?;
        Ok(())
    }

    async fn ensure_user_exists(&self, user_id: Uuid) -> TodoStoreResult<()> {
        if self.get_user(user_id).await?.is_none() {
            return Err(TodoStoreError::UserNotFound(user_id));
        }
        Ok(())
    }
}

fn map_email_conflict(e: sqlx::Error, email: &str) -> TodoStoreError {
    match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            TodoStoreError::DuplicateEmail(email.to_string())
        }
        _ => TodoStoreError::Database(e),
    }
}

#[async_trait]
impl TodoStore for SqliteTodoStore {
    // =========================================================================
    // Todo operations
    // =========================================================================

    async fn list_todos(&self) -> TodoStoreResult<Vec<Todo>> {
        let rows: Vec<TodoRow> = sqlx::query_as(
            "SELECT id, title, completed, user_id, created_at, updated_at
             FROM todos
             ORDER BY created_at, id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Todo::from).collect())
    }

    async fn get_todo(&self, id: Uuid) -> TodoStoreResult<Option<Todo>> {
        let row: Option<TodoRow> = sqlx::query_as(
            "SELECT id, title, completed, user_id, created_at, updated_at
             FROM todos
             WHERE id = ?",
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Todo::from))
    }

    async fn list_todos_for_user(&self, user_id: Uuid) -> TodoStoreResult<Vec<Todo>> {
        let rows: Vec<TodoRow> = sqlx::query_as(
            "SELECT id, title, completed, user_id, created_at, updated_at
             FROM todos
             WHERE user_id = ?
             ORDER BY created_at, id",
        )
        .bind(user_id.to_string())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Todo::from).collect())
    }

    async fn create_todo(&self, new: NewTodo) -> TodoStoreResult<Todo> {
        if let Some(user_id) = new.user_id {
            self.ensure_user_exists(user_id).await?;
        }

        let mut todo = Todo::new(new.title);
        todo.user_id = new.user_id;

        sqlx::query(
            "INSERT INTO todos (id, title, completed, user_id, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(todo.id.to_string())
        .bind(&todo.title)
        .bind(todo.completed)
        .bind(todo.user_id.map(|id| id.to_string()))
        .bind(todo.created_at.to_rfc3339())
        .bind(todo.updated_at.to_rfc3339())
        .execute(&self.pool)
        .await?;

        Ok(todo)
    }

    async fn update_todo(&self, id: Uuid, patch: TodoPatch) -> TodoStoreResult<Todo> {
        if let Some(Some(user_id)) = patch.user_id {
            self.ensure_user_exists(user_id).await?;
        }

        let mut todo = self
            .get_todo(id)
            .await?
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
        todo.updated_at = Utc::now();

        sqlx::query(
            "UPDATE todos SET title = ?, completed = ?, user_id = ?, updated_at = ?
             WHERE id = ?",
        )
        .bind(&todo.title)
        .bind(todo.completed)
        .bind(todo.user_id.map(|uid| uid.to_string()))
        .bind(todo.updated_at.to_rfc3339())
        .bind(todo.id.to_string())
        .execute(&self.pool)
        .await?;

        Ok(todo)
    }

    async fn delete_todo(&self, id: Uuid) -> TodoStoreResult<bool> {
        let result = sqlx::query("DELETE FROM todos WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    // =========================================================================
    // User operations
    // =========================================================================

    async fn list_users(&self) -> TodoStoreResult<Vec<User>> {
        let rows: Vec<UserRow> = sqlx::query_as(
            "SELECT id, email, name, created_at, updated_at
             FROM users
             ORDER BY created_at, id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(User::from).collect())
    }

    async fn get_user(&self, id: Uuid) -> TodoStoreResult<Option<User>> {
        let row: Option<UserRow> = sqlx::query_as(
            "SELECT id, email, name, created_at, updated_at
             FROM users
             WHERE id = ?",
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(User::from))
    }

    async fn get_user_by_email(&self, email: &str) -> TodoStoreResult<Option<User>> {
        let row: Option<UserRow> = sqlx::query_as(
            "SELECT id, email, name, created_at, updated_at
             FROM users
             WHERE email = ?",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(User::from))
    }

    async fn create_user(&self, new: NewUser) -> TodoStoreResult<User> {
        let user = User::new(new.email, new.name);

        sqlx::query(
            "INSERT INTO users (id, email, name, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(user.id.to_string())
        .bind(&user.email)
        .bind(&user.name)
        .bind(user.created_at.to_rfc3339())
        .bind(user.updated_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| map_email_conflict(e, &user.email))?;

        Ok(user)
    }

    async fn update_user(&self, id: Uuid, patch: UserPatch) -> TodoStoreResult<User> {
        let mut user = self
            .get_user(id)
            .await?
            .ok_or_else(|| TodoStoreError::not_found("User", id.to_string()))?;

        if let Some(email) = patch.email {
            user.email = email;
        }
        if let Some(name) = patch.name {
            user.name = name;
        }
        user.updated_at = Utc::now();

        sqlx::query(
            "UPDATE users SET email = ?, name = ?, updated_at = ?
             WHERE id = ?",
        )
        .bind(&user.email)
        .bind(&user.name)
        .bind(user.updated_at.to_rfc3339())
        .bind(user.id.to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| map_email_conflict(e, &user.email))?;

        Ok(user)
    }

    async fn delete_user(&self, id: Uuid) -> TodoStoreResult<bool> {
        // Dependent todos keep their user_id; resolving it yields no user.
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
