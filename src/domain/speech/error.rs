use crate::error::{AppError, CONFIGURATION_ERROR_MESSAGE};
use crate::infrastructure::repositories::{SpeechRepositoryError, StorageRepositoryError};
use axum::http::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum SpeechServiceError {
    #[error("speech provider is not configured")]
    Configuration,
    #[error("invalid input: {0}")]
    Validation(String),
    #[error("provider error {status}: {message}")]
    Upstream { status: u16, message: String },
    #[error("storage error: {0}")]
    Storage(String),
    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

impl From<SpeechRepositoryError> for SpeechServiceError {
    fn from(err: SpeechRepositoryError) -> Self {
        match err {
            SpeechRepositoryError::Upstream { status, body } => SpeechServiceError::Upstream {
                status,
                message: body,
            },
            SpeechRepositoryError::Transport(_) => SpeechServiceError::Unexpected(err.into()),
        }
    }
}

impl From<StorageRepositoryError> for SpeechServiceError {
    fn from(err: StorageRepositoryError) -> Self {
        SpeechServiceError::Storage(err.to_string())
    }
}

impl From<std::io::Error> for SpeechServiceError {
    fn from(err: std::io::Error) -> Self {
        SpeechServiceError::Unexpected(err.into())
    }
}

impl From<SpeechServiceError> for AppError {
    fn from(err: SpeechServiceError) -> Self {
        match err {
            SpeechServiceError::Configuration => {
                AppError::Configuration(CONFIGURATION_ERROR_MESSAGE.to_string())
            }
            SpeechServiceError::Validation(msg) => AppError::BadRequest(msg),
            SpeechServiceError::Upstream { status, message } => AppError::Upstream {
                status: StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY),
                message,
            },
            SpeechServiceError::Storage(msg) => AppError::Storage(msg),
            SpeechServiceError::Unexpected(e) => {
                AppError::Internal(format!("Failed to convert text to speech: {}", e))
            }
        }
    }
}
