use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use aircast::forecast::{EngineConfigBuilder, ForecastEngine};
use aircast::server::{app_router, AppState};

fn test_app() -> Router {
    let engine = ForecastEngine::new(
        EngineConfigBuilder::new()
            .n_estimators(20)
            .random_seed(42)
            .build(),
    );
    app_router(Arc::new(AppState { engine }))
}

fn forecast_body(values: &[f64], window: usize, horizon: usize) -> Value {
    let series: Vec<Value> = values.iter().map(|v| json!({ "y": v })).collect();
    json!({ "series": series, "window": window, "horizon": horizon })
}

async fn post_forecast(app: Router, body: &Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri("/forecast")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

#[tokio::test]
async fn test_health_probe() {
    let request = Request::builder()
        .method("GET")
        .uri("/health")
        .body(Body::empty())
        .unwrap();

    let response = test_app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_forecast_round_trip() {
    let values = vec![
        10.0, 12.0, 11.0, 13.0, 12.0, 14.0, 13.0, 15.0, 14.0, 16.0, 15.0, 17.0, 16.0, 18.0,
    ];
    let body = forecast_body(&values, 5, 3);
    let (status, response) = post_forecast(test_app(), &body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["horizon"], 3);
    assert_eq!(response["model"], "rfr_window");
    assert_eq!(response["forecast"].as_array().unwrap().len(), 3);
    assert_eq!(response["interval"]["lower"].as_array().unwrap().len(), 3);
    assert_eq!(response["interval"]["upper"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_forecast_fallback_response() {
    let body = forecast_body(&[5.0, 5.0, 5.0, 5.0], 3, 2);
    let (status, response) = post_forecast(test_app(), &body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["model"], "persistence");
    assert_eq!(response["forecast"], json!([5.0, 5.0]));
    assert_eq!(response["interval"]["lower"], response["interval"]["upper"]);
}

#[tokio::test]
async fn test_empty_series_rejected() {
    let body = json!({ "series": [], "window": 3, "horizon": 2 });
    let (status, response) = post_forecast(test_app(), &body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(response["error"].as_str().unwrap().contains("series"));
}

#[tokio::test]
async fn test_non_positive_horizon_rejected() {
    let body = forecast_body(&[1.0, 2.0, 3.0, 4.0], 2, 0);
    let (status, _) = post_forecast(test_app(), &body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_short_series_rejected() {
    // Three points cannot fill a window of five.
    let body = forecast_body(&[1.0, 2.0, 3.0], 5, 2);
    let (status, response) = post_forecast(test_app(), &body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(response["error"].as_str().unwrap().contains("window"));
}

#[tokio::test]
async fn test_timestamps_accepted_and_ignored() {
    let series: Vec<Value> = (0..8)
        .map(|i| json!({ "ts": format!("2026-01-0{}T00:00:00Z", i + 1), "y": 5.0 + i as f64 }))
        .collect();
    let body = json!({ "city": "osaka", "series": series, "window": 2, "horizon": 2 });
    let (status, response) = post_forecast(test_app(), &body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["forecast"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_defaults_applied() {
    // Window and horizon default to 24; 30 points cover the default window.
    let values: Vec<f64> = (0..30).map(|i| 10.0 + (i % 4) as f64).collect();
    let series: Vec<Value> = values.iter().map(|v| json!({ "y": v })).collect();
    let body = json!({ "series": series });
    let (status, response) = post_forecast(test_app(), &body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["horizon"], 24);
    assert_eq!(response["forecast"].as_array().unwrap().len(), 24);
}
