//! Application state.

use std::sync::Arc;

use todo_store::TodoStore;

use crate::config::Config;
use crate::graphql::{build_schema, AppSchema};

/// Shared application state.
///
/// The store is held as `Arc<dyn TodoStore>` because the same handle is
/// injected into every GraphQL request context, which needs one nameable
/// type.
pub struct AppState {
    /// Server configuration.
    pub config: Config,
    /// Todo store.
    pub store: Arc<dyn TodoStore>,
    /// GraphQL schema.
    pub schema: AppSchema,
}

impl AppState {
    /// Creates new application state.
    pub fn new(config: Config, store: Arc<dyn TodoStore>) -> Self {
        Self {
            config,
            store,
            schema: build_schema(),
        }
    }
}

/// Type alias for shared state.
pub type SharedState = Arc<AppState>;

/// Creates shared state from config and store.
pub fn create_shared_state(config: Config, store: Arc<dyn TodoStore>) -> SharedState {
    Arc::new(AppState::new(config, store))
}
