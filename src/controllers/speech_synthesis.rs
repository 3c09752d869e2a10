use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    Json,
};
use std::sync::Arc;

use crate::{
    domain::speech::{
        SpeechSynthesisRequest, SpeechSynthesisResponse, SpeechSynthesisService,
        SpeechSynthesisServiceApi,
    },
    error::{AppError, AppResult},
};

pub struct SpeechSynthesisController {
    speech_service: Arc<SpeechSynthesisService>,
}

impl SpeechSynthesisController {
    pub fn new(speech_service: Arc<SpeechSynthesisService>) -> Self {
        Self { speech_service }
    }

    /// POST /api/speech-synthesis - Synthesize text and return the public audio URL
    ///
    /// The body is parsed here rather than by the `Json` extractor so that a
    /// missing provider key is reported before anything about the body,
    /// including a body too large to buffer.
    pub async fn synthesize(
        State(controller): State<Arc<SpeechSynthesisController>>,
        body: Result<Bytes, BytesRejection>,
    ) -> AppResult<Json<SpeechSynthesisResponse>> {
        let body = match body {
            Ok(body) => body,
            Err(rejection) if controller.speech_service.is_configured() => {
                tracing::warn!(error = %rejection, "Request body rejected");
                return Err(rejection.into());
            }
            Err(_) => Bytes::new(),
        };
        let request = parse_request(&body);

        let url = controller
            .speech_service
            .synthesize(request)
            .await
            .map_err(AppError::from)?;

        Ok(Json(SpeechSynthesisResponse { data: url }))
    }

    /// Any method other than POST on the synthesis route
    pub async fn method_not_allowed() -> AppError {
        AppError::MethodNotAllowed
    }
}

/// Unreadable bodies are treated as having no fields
fn parse_request(body: &[u8]) -> SpeechSynthesisRequest {
    serde_json::from_slice(body).unwrap_or_else(|e| {
        tracing::debug!(error = %e, "Request body is not a valid synthesis request");
        SpeechSynthesisRequest::default()
    })
}
