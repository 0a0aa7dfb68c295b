//! Provider error codes reported for failed sends.
//!
//! FCM v1 reports failures as a Google RPC status plus an optional
//! `FcmError` detail. Callers get the stable `messaging/*` code strings
//! the Firebase Admin SDKs use, so token handling does not depend on the
//! shape of the HTTP response.

use crate::models::FcmErrorStatus;

pub const REGISTRATION_TOKEN_NOT_REGISTERED: &str = "messaging/registration-token-not-registered";
pub const INVALID_REGISTRATION_TOKEN: &str = "messaging/invalid-registration-token";
pub const INVALID_ARGUMENT: &str = "messaging/invalid-argument";
pub const MISMATCHED_CREDENTIAL: &str = "messaging/mismatched-credential";
pub const MESSAGE_RATE_EXCEEDED: &str = "messaging/message-rate-exceeded";
pub const SERVER_UNAVAILABLE: &str = "messaging/server-unavailable";
pub const INTERNAL_ERROR: &str = "messaging/internal-error";
pub const THIRD_PARTY_AUTH_ERROR: &str = "messaging/third-party-auth-error";
pub const AUTHENTICATION_ERROR: &str = "messaging/authentication-error";
pub const UNKNOWN_ERROR: &str = "messaging/unknown-error";

pub const NETWORK_ERROR: &str = "app/network-error";
pub const INVALID_CREDENTIAL: &str = "app/invalid-credential";

/// Map an FCM error status to a provider error code
pub fn code_for_status(status: &FcmErrorStatus) -> &'static str {
    let fcm_code = status
        .details
        .iter()
        .find(|d| d.type_url.ends_with("google.firebase.fcm.v1.FcmError"))
        .and_then(|d| d.error_code.as_deref())
        .or(status.status.as_deref())
        .unwrap_or("");

    match fcm_code {
        "UNREGISTERED" | "NOT_FOUND" => REGISTRATION_TOKEN_NOT_REGISTERED,
        "INVALID_ARGUMENT" if mentions_registration_token(&status.message) => {
            INVALID_REGISTRATION_TOKEN
        }
        "INVALID_ARGUMENT" => INVALID_ARGUMENT,
        "SENDER_ID_MISMATCH" => MISMATCHED_CREDENTIAL,
        "QUOTA_EXCEEDED" => MESSAGE_RATE_EXCEEDED,
        "UNAVAILABLE" => SERVER_UNAVAILABLE,
        "INTERNAL" => INTERNAL_ERROR,
        "THIRD_PARTY_AUTH_ERROR" => THIRD_PARTY_AUTH_ERROR,
        "UNAUTHENTICATED" | "PERMISSION_DENIED" => AUTHENTICATION_ERROR,
        _ => UNKNOWN_ERROR,
    }
}

fn mentions_registration_token(message: &str) -> bool {
    message.to_lowercase().contains("registration token")
}
