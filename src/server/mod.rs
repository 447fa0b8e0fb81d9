//! HTTP transport shell around the forecast engine.
//!
//! The shell decodes and validates requests, hands validated inputs to the
//! engine, and renders its output; it holds no forecasting logic of its
//! own.

pub mod handlers;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tracing::info;

use crate::forecast::ForecastEngine;

/// Server settings.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

/// Shared application state.
///
/// The engine is configuration-only, so handlers clone it per request and
/// no mutable state crosses concurrent invocations.
#[derive(Debug)]
pub struct AppState {
    pub engine: ForecastEngine,
}

/// Build the service router.
pub fn app_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/forecast", post(handlers::forecast_handler))
        .route("/health", get(handlers::health_handler))
        .with_state(state)
}

/// Bind and serve until the process is stopped.
pub async fn serve(config: ServerConfig, engine: ForecastEngine) -> std::io::Result<()> {
    let state = Arc::new(AppState { engine });
    let app = app_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("forecast service listening on {}", addr);

    axum::serve(listener, app).await
}
