/// FCM Shared Library
///
/// This library provides a Firebase Cloud Messaging (FCM) HTTP v1 client
/// for sending push notifications to individual device tokens.
///
/// It handles:
/// - Bearer auth through a pluggable access token provider
/// - Single-device message delivery, optionally validate-only
/// - Mapping FCM error responses to stable provider error codes

pub mod client;
pub mod codes;
pub mod errors;
pub mod models;

pub use client::FcmClient;
pub use errors::FcmError;
pub use models::{FcmNotification, FcmSendResult};
