pub mod request_id;

use axum::{
    extract::Request,
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::controllers::{health, speech_synthesis::SpeechSynthesisController};
use crate::domain::speech::SpeechSynthesisService;
use crate::infrastructure::config::Config;

pub use request_id::{request_id_middleware, RequestId, X_REQUEST_ID};

/// Build the application router with all routes and layers
pub fn build_router(
    speech_service: Arc<SpeechSynthesisService>,
    speech_controller: Arc<SpeechSynthesisController>,
) -> Router {
    // Speech synthesis (POST only; other methods get the JSON error envelope)
    let speech_routes = Router::new()
        .route(
            "/api/speech-synthesis",
            post(SpeechSynthesisController::synthesize)
                .fallback(SpeechSynthesisController::method_not_allowed),
        )
        .with_state(speech_controller);

    let health_routes = Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::health_ready))
        .with_state(speech_service);

    Router::new()
        .merge(health_routes)
        .merge(speech_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http().make_span_with(|request: &Request| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id = tracing::field::Empty,
                    )
                }))
                .layer(middleware::from_fn(request_id_middleware)),
        )
}

/// Start the HTTP server with all routes configured
pub async fn start_http_server(
    config: Arc<Config>,
    speech_service: Arc<SpeechSynthesisService>,
    speech_controller: Arc<SpeechSynthesisController>,
) -> Result<(), Box<dyn std::error::Error>> {
    let app = build_router(speech_service, speech_controller);

    let listener =
        tokio::net::TcpListener::bind(format!("{}:{}", config.host, config.port)).await?;

    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
