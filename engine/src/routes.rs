use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::{sync::Arc, time::Instant};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

use crate::{
    engine::PhishingDetector,
    error::AppError,
    types::{PredictRequest, PredictResponse},
};

#[derive(Clone)]
pub struct AppState {
    pub detector: Arc<PhishingDetector>,
    /// Present when the Prometheus recorder was installed.
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    pub fn new(detector: PhishingDetector, metrics: Option<PrometheusHandle>) -> Self {
        Self {
            detector: Arc::new(detector),
            metrics,
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/predict", post(predict_handler))
        .route("/health", get(health_handler))
        .route("/metrics", get(metrics_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Decodes the body as JSON whatever the declared content type.
async fn predict_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<PredictResponse>, AppError> {
    let request: PredictRequest = serde_json::from_slice(&body)
        .map_err(|e| AppError::InvalidInput(format!("request body is not valid JSON: {}", e)))?;
    let start = Instant::now();

    let url = request.url.trim();
    let response = state.detector.predict(url);

    let label = if response.label == 1 { "phishing" } else { "benign" };
    metrics::counter!("predictions_total", "label" => label).increment(1);
    metrics::histogram!("prediction_duration_ms").record(start.elapsed().as_secs_f64() * 1000.0);

    info!(
        "Prediction for {:?}: label={} p={:.3}",
        url, response.label, response.phishing_probability
    );
    Ok(Json(response))
}

async fn health_handler(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION"),
        "model_loaded": state.detector.model_loaded(),
    }))
}

async fn metrics_handler(State(state): State<AppState>) -> Response {
    match &state.metrics {
        Some(handle) => handle.render().into_response(),
        None => (StatusCode::NOT_FOUND, "metrics exporter disabled\n").into_response(),
    }
}
