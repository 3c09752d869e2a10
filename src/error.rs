use axum::{
    extract::rejection::BytesRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::domain::shared::error_dto::ErrorResponse;

pub const CONFIGURATION_ERROR_MESSAGE: &str = "Server configuration error";
pub const MISSING_FIELDS_MESSAGE: &str = "Missing text or voiceId in the request body.";
pub const METHOD_NOT_ALLOWED_MESSAGE: &str = "Method Not Allowed";

/// Main application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid input: {0}")]
    BadRequest(String),

    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    /// Failure reported by the speech provider, relayed with its own status
    #[error("Upstream error {status}: {message}")]
    Upstream { status: StatusCode, message: String },

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            Self::Upstream { status, .. } => *status,
            Self::Configuration(_) | Self::Storage(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Message placed in the response envelope
    pub fn message(&self) -> String {
        match self {
            Self::Configuration(msg)
            | Self::BadRequest(msg)
            | Self::PayloadTooLarge(msg)
            | Self::Storage(msg)
            | Self::Internal(msg) => msg.clone(),
            Self::MethodNotAllowed => METHOD_NOT_ALLOWED_MESSAGE.to_string(),
            Self::Upstream { message, .. } => message.clone(),
        }
    }

    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse::new(self.status_code().as_u16(), self.message())
    }
}

/// Implement IntoResponse for automatic conversion in handlers
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        tracing::error!(
            error = %self,
            status = %status.as_u16(),
            "Request failed"
        );

        (status, Json(self.to_response())).into_response()
    }
}

/// Body that could not be buffered, usually because it exceeds the size limit
impl From<BytesRejection> for AppError {
    fn from(rejection: BytesRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            Self::PayloadTooLarge(rejection.body_text())
        } else {
            Self::BadRequest(rejection.body_text())
        }
    }
}

/// Custom result type for the application
pub type AppResult<T> = Result<T, AppError>;
