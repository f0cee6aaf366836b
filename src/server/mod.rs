//! HTTP server for the contacts API.
//!
//! Routes live under `/api/v1`. Every request is traced, and a handler panic is
//! converted into an internal error that goes through the same error pipeline as a
//! returned error.

pub mod handlers;
pub mod pipeline;

pub use handlers::AppState;

use crate::services::ContactService;
use crate::store::DocumentStore;
use anyhow::Result;
use axum::extract::Request;
use axum::routing::{delete, get};
use axum::{Router, ServiceExt};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::{Layer, ServiceBuilder};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

/// Prefix every contacts route is mounted under.
pub const API_PREFIX: &str = "/api/v1";

/// The router with trailing slashes trimmed before route matching.
pub type App = NormalizePath<Router>;

/// Build the application around `contacts`.
///
/// `/api/v1/contactos/` and `/api/v1/contactos` reach the same handler.
pub fn router(contacts: Arc<dyn ContactService>) -> App {
    let api = Router::new()
        .route(
            "/contactos",
            get(handlers::list_contacts).post(handlers::create_contact),
        )
        .route("/contactos/:id", delete(handlers::delete_contact))
        .route("/contactos/nombre/:nombre", get(handlers::find_by_name))
        .route("/contactos/telefono/:telefono", get(handlers::find_by_phone))
        .route("/contactos/email/:email", get(handlers::find_by_email));

    let app = Router::new()
        .nest(API_PREFIX, api)
        .with_state(AppState { contacts })
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CatchPanicLayer::custom(pipeline::panic_response)),
        );

    // Router::layer runs after matching, so path normalization wraps the router.
    NormalizePathLayer::trim_trailing_slash().layer(app)
}

/// Serve the API on `listener` until Ctrl-C, then close the store connection.
pub async fn run_server(
    listener: TcpListener,
    contacts: Arc<dyn ContactService>,
    store: Arc<dyn DocumentStore>,
) -> Result<()> {
    let addr = listener.local_addr()?;
    info!("Contacts API listening on http://{}{}", addr, API_PREFIX);

    let app = ServiceExt::<Request>::into_make_service(router(contacts));
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    store.disconnect().await?;
    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => {
            warn!("Failed to listen for shutdown signal: {}", e);
            std::future::pending::<()>().await;
        }
    }
}
