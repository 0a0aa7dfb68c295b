use gcp_auth::AuthError;
use thiserror::Error;

use crate::config::ConfigError;
use crate::store::StoreError;

/// Errors that abort a sweep
///
/// Per-token send and prune failures are never surfaced here; they end up
/// in the sweep report instead.
#[derive(Error, Debug)]
pub enum SweepError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to load credentials: {0}")]
    Auth(#[from] AuthError),

    #[error("Failed to read agent records: {0}")]
    Collect(#[from] StoreError),
}
