/// Google Cloud Auth Library
///
/// This library obtains OAuth2 access tokens for Google APIs (Firestore and
/// Firebase Cloud Messaging) on behalf of a service account.
///
/// It handles:
/// - Service account key loading
/// - JWT-bearer assertion signing and token exchange
/// - Token caching with automatic refresh
/// - Fixed tokens for emulators and tests

pub mod errors;
pub mod models;
pub mod provider;

pub use errors::AuthError;
pub use models::ServiceAccountKey;
pub use provider::{AccessTokenProvider, ServiceAccountTokenProvider, StaticTokenProvider};
