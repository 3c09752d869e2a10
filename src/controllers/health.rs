use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use std::sync::Arc;

use crate::domain::speech::SpeechSynthesisService;

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

/// Ready once the speech provider has credentials; storage settings are
/// mandatory at startup so they are always present here.
pub async fn health_ready(State(service): State<Arc<SpeechSynthesisService>>) -> impl IntoResponse {
    if service.is_configured() {
        (
            StatusCode::OK,
            Json(json!({
                "status": "ready",
                "tts": "configured",
                "storage": "configured"
            })),
        )
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "status": "not_ready",
                "tts": "missing_api_key",
                "storage": "configured"
            })),
        )
    }
}
