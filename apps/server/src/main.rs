//! Todo backend server binary.

use std::net::SocketAddr;
use std::sync::Arc;

use todo_server::{config::Config, create_app, create_state, init_tracing};
use todo_store::SqliteTodoStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env if present
    dotenvy::dotenv().ok();

    let config = Config::from_env()?;
    init_tracing(&config.log_level);

    tracing::info!(database_url = %config.database_url, "Starting todo server");

    let store = SqliteTodoStore::connect(&config.database_url).await?;
    let state = create_state(config.clone(), Arc::new(store));
    let app = create_app(state);

    let addr: SocketAddr = config.server_addr().parse()?;

    tracing::info!(addr = %addr, "Server listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
