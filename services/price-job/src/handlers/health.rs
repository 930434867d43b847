use axum::{extract::State, http::StatusCode, response::Json};
use prometheus::{Encoder, TextEncoder};
use serde_json::{json, Value};

use crate::AppState;

pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": "pricecheck-price-job",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

pub async fn metrics_handler(State(state): State<AppState>) -> Result<String, StatusCode> {
    let encoder = TextEncoder::new();
    let mut buffer = Vec::new();

    encoder
        .encode(&state.registry.gather(), &mut buffer)
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to encode metrics");
            StatusCode::INTERNAL_SERVER_ERROR
        })?;

    String::from_utf8(buffer).map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}
