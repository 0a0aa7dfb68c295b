use gcp_auth::AccessTokenProvider;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

use crate::codes;
use crate::errors::FcmError;
use crate::models::*;

pub const DEFAULT_FCM_BASE_URL: &str = "https://fcm.googleapis.com";

/// Firebase Cloud Messaging Client
///
/// Sends notifications through the FCM HTTP v1 API. Access tokens come from
/// the supplied provider, which owns caching and refresh.
pub struct FcmClient {
    pub project_id: String,
    base_url: String,
    token_provider: Arc<dyn AccessTokenProvider>,
    http_client: reqwest::Client,
}

impl FcmClient {
    /// Create new FCM client
    ///
    /// # Arguments
    /// * `project_id` - Firebase project ID
    /// * `token_provider` - Source of OAuth2 bearer tokens
    pub fn new(project_id: String, token_provider: Arc<dyn AccessTokenProvider>) -> Self {
        Self {
            project_id,
            base_url: DEFAULT_FCM_BASE_URL.to_string(),
            token_provider,
            http_client: reqwest::Client::new(),
        }
    }

    /// Point the client at a different API host (mock servers)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn send_url(&self) -> String {
        format!(
            "{}/v1/projects/{}/messages:send",
            self.base_url, self.project_id
        )
    }

    /// Send a notification to a single device
    ///
    /// With `validate_only` FCM checks the message and token without
    /// delivering anything.
    pub async fn send(
        &self,
        device_token: &str,
        notification: &FcmNotification,
        validate_only: bool,
    ) -> Result<FcmSendResult, FcmError> {
        let access_token = self.token_provider.access_token().await?;

        let message = FcmMessage {
            validate_only,
            message: FcmMessageContent {
                token: device_token,
                notification,
            },
        };

        let response = self
            .http_client
            .post(self.send_url())
            .bearer_auth(access_token)
            .json(&message)
            .send()
            .await
            .map_err(|e| FcmError::SendRequestError(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            let fcm_response: FcmApiResponse = response
                .json()
                .await
                .map_err(|e| FcmError::ResponseParseError(e.to_string()))?;

            return Ok(FcmSendResult {
                message_id: fcm_response
                    .name
                    .unwrap_or_else(|| Uuid::new_v4().to_string()),
            });
        }

        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        debug!("FCM returned {}: {}", status, error_text);

        Err(api_error(status.as_u16(), &error_text))
    }
}

fn api_error(http_status: u16, body: &str) -> FcmError {
    match serde_json::from_str::<FcmErrorEnvelope>(body) {
        Ok(envelope) => FcmError::ApiError {
            http_status,
            code: codes::code_for_status(&envelope.error),
            message: envelope.error.message,
        },
        Err(_) => FcmError::ApiError {
            http_status,
            code: codes::UNKNOWN_ERROR,
            message: body.to_string(),
        },
    }
}
