use gcp_auth::AuthError;
use thiserror::Error;

use crate::codes;

/// FCM Client Error Types
#[derive(Error, Debug)]
pub enum FcmError {
    #[error("Failed to get access token: {0}")]
    Auth(#[from] AuthError),

    #[error("FCM send request failed: {0}")]
    SendRequestError(String),

    #[error("Failed to parse FCM response: {0}")]
    ResponseParseError(String),

    #[error("FCM API error: {http_status} {code} - {message}")]
    ApiError {
        http_status: u16,
        code: &'static str,
        message: String,
    },
}

impl FcmError {
    /// Provider error code, in the `messaging/*` / `app/*` namespace
    pub fn code(&self) -> &'static str {
        match self {
            FcmError::Auth(_) => codes::INVALID_CREDENTIAL,
            FcmError::SendRequestError(_) => codes::NETWORK_ERROR,
            FcmError::ResponseParseError(_) => codes::UNKNOWN_ERROR,
            FcmError::ApiError { code, .. } => *code,
        }
    }

    /// Human readable message without the code prefix
    pub fn message(&self) -> String {
        match self {
            FcmError::ApiError { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}
