/// Push provider seam
use async_trait::async_trait;
use fcm_shared::{FcmClient, FcmNotification};
use thiserror::Error;

use crate::models::Notification;

/// Failed send as reported by the provider
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{code}: {message}")]
pub struct PushError {
    pub code: String,
    pub message: String,
}

impl PushError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

#[async_trait]
pub trait PushProvider: Send + Sync {
    /// Deliver one notification; returns the provider's message id
    async fn send(&self, token: &str, notification: &Notification) -> Result<String, PushError>;
}

/// FCM-backed push provider
pub struct FcmPushProvider {
    client: FcmClient,
    validate_only: bool,
}

impl FcmPushProvider {
    pub fn new(client: FcmClient) -> Self {
        Self {
            client,
            validate_only: false,
        }
    }

    /// Ask FCM to validate messages without delivering them
    pub fn validate_only(mut self, validate_only: bool) -> Self {
        self.validate_only = validate_only;
        self
    }
}

#[async_trait]
impl PushProvider for FcmPushProvider {
    async fn send(&self, token: &str, notification: &Notification) -> Result<String, PushError> {
        let payload = FcmNotification::new(notification.title.clone(), notification.body.clone());

        self.client
            .send(token, &payload, self.validate_only)
            .await
            .map(|result| result.message_id)
            .map_err(|e| PushError::new(e.code(), e.message()))
    }
}
