//! HTTP server assembly
//!
//! The shared application state is built once at startup and handed to each
//! protocol exposure; the exposures produce axum routers that are merged into
//! a single application here.

pub mod exposure;

use anyhow::Result;
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::schema::Schema;
use crate::store::Store;
use exposure::{GraphQlExposure, RestExposure, health_routes};

/// Shared application state: the immutable store and static schema.
///
/// Both are initialized before any request is served; handlers only ever
/// read through them, so the state is freely cloneable across workers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<Store>,
    pub schema: Arc<Schema>,
}

impl AppState {
    pub fn new(store: Store, schema: Schema) -> Self {
        Self {
            store: Arc::new(store),
            schema: Arc::new(schema),
        }
    }
}

/// Build the full application router: health, REST projections, and the
/// graph query endpoint, with request tracing and permissive CORS.
pub fn build_router(state: AppState) -> Router {
    health_routes()
        .merge(RestExposure::build_router(state.clone()))
        .merge(GraphQlExposure::build_router(state))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Serve the application with graceful shutdown on Ctrl+C or SIGTERM.
pub async fn serve(state: AppState, addr: SocketAddr) -> Result<()> {
    let app = build_router(state);
    let listener = TcpListener::bind(addr).await?;

    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Wait for shutdown signal (SIGTERM or Ctrl+C)
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}
