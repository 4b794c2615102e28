//! HTTP application assembly
//!
//! [`create_router`] builds the full router with its middleware stack and
//! [`serve`] runs it until a shutdown signal arrives.

pub mod response;

use axum::{
    extract::{DefaultBodyLimit, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use std::{net::SocketAddr, time::Duration};
use tokio::signal;
use tower_http::compression::CompressionLayer;

use self::response::{HealthResponse, MessageResponse};
use crate::config::Config;
use crate::features;
use crate::middleware;
use crate::store::SharedBookStore;

/// Upper bound on the post-signal drain wait
const MAX_SHUTDOWN_DRAIN_SECS: u64 = 5;

/// Bind the configured address and serve until Ctrl+C or SIGTERM
pub async fn serve(config: &Config, store: SharedBookStore) -> anyhow::Result<()> {
    let app = create_router(store, config);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(config.server.shutdown_timeout_secs))
        .await?;

    tracing::info!("Server shut down gracefully");
    Ok(())
}

/// Create the application router with all routes and middleware
pub fn create_router(store: SharedBookStore, config: &Config) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .nest("/api", features::router())
        .with_state(store)
        // Applies to both JSON bodies and multipart uploads
        .layer(DefaultBodyLimit::max(config.import.max_upload_bytes))
        .layer(CompressionLayer::new())
        .layer(middleware::tracing_layer())
        .layer(middleware::cors_layer(&config.cors))
}

async fn root() -> impl IntoResponse {
    Json(MessageResponse::new("Welcome to Homepage"))
}

async fn health(State(store): State<SharedBookStore>) -> Response {
    match store.health_check().await {
        Ok(()) => (
            StatusCode::OK,
            Json(HealthResponse {
                status: "healthy".to_string(),
                store: "connected".to_string(),
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Store health check failed: {:?}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthResponse {
                    status: "unhealthy".to_string(),
                    store: "unreachable".to_string(),
                }),
            )
                .into_response()
        },
    }
}

/// Graceful shutdown signal handler
async fn shutdown_signal(timeout_secs: u64) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting graceful shutdown");
        },
        _ = terminate => {
            tracing::info!("Received terminate signal, starting graceful shutdown");
        },
    }

    let drain = timeout_secs.min(MAX_SHUTDOWN_DRAIN_SECS);
    tracing::info!("Waiting up to {} seconds for connections to close", drain);
    tokio::time::sleep(Duration::from_secs(drain)).await;
}
