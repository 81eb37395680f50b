//! Appointment scheduler server
//!
//! Exposes the scheduling store over a small JSON RPC surface. Storage is one
//! of the [`appointment_store`] backends, chosen at startup.

pub mod api;
pub mod config;
pub mod error;
pub mod state;

use std::{net::SocketAddr, sync::Arc};

use appointment_store::{SchedulingBackend, SchedulingStore};
use axum::{Router, http::HeaderValue};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::Config;
use crate::state::{AppState, create_shared_state};

/// Creates the application router with all routes configured.
pub fn create_app<B: SchedulingBackend + 'static>(state: Arc<AppState<B>>) -> Router {
    let cors = cors_layer(&state.config.cors_origins);

    api::create_router()
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Creates the application state with the given configuration and backend.
pub fn create_state<B: SchedulingBackend>(config: Config, backend: B) -> Arc<AppState<B>> {
    create_shared_state(config, SchedulingStore::new(backend))
}

/// Builds the CORS layer. An empty origin list, or `*`, allows any origin.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if origins.is_empty() || origins.iter().any(|o| o == "*") {
        return layer.allow_origin(Any);
    }

    let parsed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    layer.allow_origin(AllowOrigin::list(parsed))
}

/// Initializes tracing with the given log level.
pub fn init_tracing(log_level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();
}

/// Serves the API on the configured address until Ctrl-C.
pub async fn serve<B: SchedulingBackend + 'static>(config: Config, backend: B) -> anyhow::Result<()> {
    let addr: SocketAddr = config.server_addr().parse()?;
    let app = create_app(create_state(config, backend));

    tracing::info!(addr = %addr, "Server listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
