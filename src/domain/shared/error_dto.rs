use serde::{Deserialize, Serialize};

/// Error envelope returned by every failing request
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorDetail {
    pub status_code: u16,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(status_code: u16, message: impl Into<String>) -> Self {
        Self {
            error: ErrorDetail {
                status_code,
                message: message.into(),
            },
        }
    }
}
