//! Request/response schemas and handlers.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::error::Error;
use crate::series::Series;
use crate::server::AppState;

/// Service name reported by the liveness probe.
pub const SERVICE_NAME: &str = "aircast forecast service";

fn default_horizon() -> usize {
    24
}

fn default_window() -> usize {
    24
}

/// One observation on the wire.
///
/// The timestamp is accepted for compatibility with upstream producers and
/// ignored: the engine is position-based.
#[derive(Debug, Clone, Deserialize)]
pub struct SeriesPoint {
    #[serde(default)]
    pub ts: Option<String>,
    pub y: f64,
}

/// Forecast request body.
#[derive(Debug, Clone, Deserialize)]
pub struct ForecastRequest {
    #[serde(default)]
    pub city: Option<String>,
    pub series: Vec<SeriesPoint>,
    #[serde(default = "default_horizon")]
    pub horizon: usize,
    #[serde(default = "default_window")]
    pub window: usize,
}

/// Forecast response body.
#[derive(Debug, Clone, Serialize)]
pub struct ForecastResponse {
    pub forecast: Vec<f64>,
    pub interval: IntervalBody,
    pub horizon: usize,
    pub model: String,
}

/// Fixed two-field interval record on the wire.
#[derive(Debug, Clone, Serialize)]
pub struct IntervalBody {
    pub lower: Vec<f64>,
    pub upper: Vec<f64>,
}

/// Liveness probe body.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

/// Client-facing error body.
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: String,
    pub status: u16,
}

impl ApiError {
    fn bad_request(message: impl Into<String>) -> Self {
        ApiError {
            error: message.into(),
            status: 400,
        }
    }

    fn internal() -> Self {
        ApiError {
            error: "forecast failed".to_string(),
            status: 500,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}

impl From<Error> for ApiError {
    fn from(e: Error) -> Self {
        match e {
            // Client fault: report the violated constraint.
            Error::InvalidRequest(_) => ApiError::bad_request(e.to_string()),
            // Server fault: log the cause, return a generic body. An
            // InsufficientData escaping the engine is an invariant
            // violation and lands here too.
            Error::InsufficientData { .. } | Error::EngineFailure(_) => {
                error!("forecast failed: {}", e);
                ApiError::internal()
            }
        }
    }
}

/// POST /forecast
pub async fn forecast_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ForecastRequest>,
) -> Result<Json<ForecastResponse>, ApiError> {
    // Shape validation before the engine ever runs.
    if req.series.is_empty() {
        return Err(ApiError::bad_request("series must not be empty"));
    }
    if req.window == 0 || req.horizon == 0 {
        return Err(ApiError::bad_request(
            "window and horizon must be positive integers",
        ));
    }

    let values: Vec<f64> = req.series.iter().map(|p| p.y).collect();
    let series = Series::new(values, req.city.clone())?;
    let window = req.window;
    let horizon = req.horizon;

    debug!(
        city = req.city.as_deref(),
        points = series.len(),
        window,
        horizon,
        "forecast request"
    );

    // Model fitting is CPU-bound; run it off the async workers. Each call
    // owns its series and engine clone, so concurrent requests share
    // nothing mutable.
    let engine = state.engine.clone();
    let forecast =
        tokio::task::spawn_blocking(move || engine.forecast(&series, window, horizon))
            .await
            .map_err(|e| {
                error!("forecast task failed to complete: {}", e);
                ApiError::internal()
            })??;

    Ok(Json(ForecastResponse {
        forecast: forecast.values,
        interval: IntervalBody {
            lower: forecast.interval.lower,
            upper: forecast.interval.upper,
        },
        horizon,
        model: forecast.method.as_str().to_string(),
    }))
}

/// GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        service: SERVICE_NAME,
        version: crate::VERSION,
    })
}
