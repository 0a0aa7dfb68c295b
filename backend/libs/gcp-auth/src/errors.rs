use thiserror::Error;

/// Auth Error Types
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Failed to read service account key {path}: {source}")]
    KeyFileRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid service account key: {0}")]
    KeyFileParse(#[from] serde_json::Error),

    #[error("Failed to parse private key: {0}")]
    KeyParseError(String),

    #[error("Failed to encode JWT: {0}")]
    JwtEncodeError(String),

    #[error("Failed to get access token: {0}")]
    TokenError(String),

    #[error("Token request failed with status: {0}")]
    TokenRequestFailed(String),

    #[error("Failed to parse token response: {0}")]
    TokenParseError(String),
}
