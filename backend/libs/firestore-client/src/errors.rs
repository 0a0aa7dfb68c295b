use gcp_auth::AuthError;
use thiserror::Error;

/// Firestore Client Error Types
#[derive(Error, Debug)]
pub enum FirestoreError {
    #[error("Failed to get access token: {0}")]
    Auth(#[from] AuthError),

    #[error("Firestore request failed: {0}")]
    RequestError(String),

    #[error("Failed to parse Firestore response: {0}")]
    ResponseParseError(String),

    #[error("Firestore API error: {status} - {message}")]
    ApiError { status: u16, message: String },
}
