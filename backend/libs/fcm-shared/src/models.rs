use serde::{Deserialize, Serialize};

/// FCM Send Result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FcmSendResult {
    pub message_id: String,
}

/// FCM Message Request
#[derive(Debug, Serialize)]
pub struct FcmMessage<'a> {
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub validate_only: bool,
    pub message: FcmMessageContent<'a>,
}

/// FCM Message Content
#[derive(Debug, Serialize)]
pub struct FcmMessageContent<'a> {
    pub token: &'a str,
    pub notification: &'a FcmNotification,
}

/// FCM Notification Payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FcmNotification {
    pub title: String,
    pub body: String,
}

impl FcmNotification {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }
}

/// FCM API Response
#[derive(Debug, Deserialize)]
pub struct FcmApiResponse {
    pub name: Option<String>,
}

/// FCM error envelope: `{"error": {...}}`
#[derive(Debug, Deserialize)]
pub struct FcmErrorEnvelope {
    pub error: FcmErrorStatus,
}

/// Google RPC status carried by a failed send
#[derive(Debug, Deserialize)]
pub struct FcmErrorStatus {
    #[serde(default)]
    pub code: u16,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub details: Vec<FcmErrorDetail>,
}

#[derive(Debug, Deserialize)]
pub struct FcmErrorDetail {
    #[serde(rename = "@type", default)]
    pub type_url: String,
    #[serde(rename = "errorCode")]
    pub error_code: Option<String>,
}
