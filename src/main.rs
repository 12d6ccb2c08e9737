use anyhow::{Context, Result};
use mimalloc::MiMalloc;
use pk_contacts::{router, AppState, Config, ContactStore, SqliteContactStore};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = Config::from_env().context("Failed to load configuration")?;

    std::fs::create_dir_all(&config.public_dir).with_context(|| {
        format!("Failed to create public directory {}", config.public_dir.display())
    })?;

    let store = SqliteContactStore::open(&config.database_path, config.db_max_connections)
        .await
        .context("Failed to open contact store")?;
    let store: Arc<dyn ContactStore> = Arc::new(store);

    let app = router(AppState::new(store), &config.public_dir);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Server running on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "Failed to listen for shutdown signal");
    }
}
