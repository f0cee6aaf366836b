//! Contacts API service - main entry point.
//!
//! Serves the `/api/v1/contactos` REST API over a MongoDB collection, or over an
//! in-memory store when `STORE_BACKEND=memory`.

use anyhow::Result;
use contactos_service::config::StoreBackend;
use contactos_service::server::run_server;
use contactos_service::services::{ContactService, ContactServiceImpl};
use contactos_service::store::{DocumentStore, MemoryStore, MongoStore};
use contactos_service::Config;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            // Logging is not up yet; fall back to stderr.
            eprintln!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    // RUST_LOG wins over LOG_LEVEL
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    info!(env = %config.env, "Configuration loaded successfully");

    let store: Arc<dyn DocumentStore> = match config.store_backend {
        StoreBackend::Mongo => {
            info!("Using MongoDB at {}", config.redacted_uri());
            Arc::new(MongoStore::from_config(&config))
        }
        StoreBackend::Memory => {
            info!("Using in-memory store; data is lost on exit");
            Arc::new(MemoryStore::new())
        }
    };

    let contacts = Arc::new(
        ContactServiceImpl::new(store.clone())
            .with_empty_list_is_not_found(config.empty_list_is_not_found),
    ) as Arc<dyn ContactService>;

    let listener = match TcpListener::bind(config.listen_addr()).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind {}: {}", config.listen_addr(), e);
            return Err(e.into());
        }
    };

    run_server(listener, contacts, store).await?;

    info!("Contacts service shutdown complete");
    Ok(())
}
