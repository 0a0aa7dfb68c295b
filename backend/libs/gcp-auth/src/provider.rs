use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

use crate::errors::AuthError;
use crate::models::*;

pub const CLOUD_PLATFORM_SCOPE: &str = "https://www.googleapis.com/auth/cloud-platform";

/// Source of bearer tokens for Google API requests
#[async_trait]
pub trait AccessTokenProvider: Send + Sync {
    async fn access_token(&self) -> Result<String, AuthError>;
}

/// Service account token provider
///
/// Signs a JWT with the service account's private key, exchanges it for an
/// OAuth2 access token and caches the result until shortly before expiry.
pub struct ServiceAccountTokenProvider {
    credentials: Arc<ServiceAccountKey>,
    token_cache: Mutex<Option<TokenCache>>,
    http_client: reqwest::Client,
}

impl ServiceAccountTokenProvider {
    pub fn new(credentials: ServiceAccountKey) -> Self {
        Self {
            credentials: Arc::new(credentials),
            token_cache: Mutex::new(None),
            http_client: reqwest::Client::new(),
        }
    }

    fn sign_assertion(&self) -> Result<String, AuthError> {
        let now = Utc::now();
        let claims = JwtClaims {
            iss: self.credentials.client_email.clone(),
            sub: self.credentials.client_email.clone(),
            scope: CLOUD_PLATFORM_SCOPE.to_string(),
            aud: self.credentials.token_uri.clone(),
            exp: (now + Duration::hours(1)).timestamp(),
            iat: now.timestamp(),
        };

        let mut header = Header::new(Algorithm::RS256);
        if !self.credentials.private_key_id.is_empty() {
            header.kid = Some(self.credentials.private_key_id.clone());
        }

        let encoding_key = EncodingKey::from_rsa_pem(self.credentials.private_key.as_bytes())
            .map_err(|e| AuthError::KeyParseError(e.to_string()))?;

        encode(&header, &claims, &encoding_key).map_err(|e| AuthError::JwtEncodeError(e.to_string()))
    }

    async fn exchange(&self, assertion: &str) -> Result<GoogleTokenResponse, AuthError> {
        let params = [
            ("grant_type", "urn:ietf:params:oauth:grant-type:jwt-bearer"),
            ("assertion", assertion),
        ];

        let response = self
            .http_client
            .post(&self.credentials.token_uri)
            .form(&params)
            .send()
            .await
            .map_err(|e| AuthError::TokenError(e.to_string()))?;

        if !response.status().is_success() {
            return Err(AuthError::TokenRequestFailed(response.status().to_string()));
        }

        response
            .json()
            .await
            .map_err(|e| AuthError::TokenParseError(e.to_string()))
    }
}

#[async_trait]
impl AccessTokenProvider for ServiceAccountTokenProvider {
    async fn access_token(&self) -> Result<String, AuthError> {
        // Held across the exchange so concurrent callers share one refresh
        let mut cache = self.token_cache.lock().await;
        if let Some(cached) = cache.as_ref() {
            if cached.is_fresh(Utc::now().timestamp()) {
                return Ok(cached.access_token.clone());
            }
        }

        debug!(
            "Requesting access token for {}",
            self.credentials.client_email
        );
        let assertion = self.sign_assertion()?;
        let token_response = self.exchange(&assertion).await?;

        *cache = Some(TokenCache {
            access_token: token_response.access_token.clone(),
            expires_at: Utc::now().timestamp() + token_response.expires_in,
        });

        Ok(token_response.access_token)
    }
}

/// Fixed token provider, used against emulators and in tests
#[derive(Debug, Clone)]
pub struct StaticTokenProvider {
    token: String,
}

impl StaticTokenProvider {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    /// Token accepted by the Firestore emulator with admin privileges
    pub fn emulator_owner() -> Self {
        Self::new("owner")
    }
}

#[async_trait]
impl AccessTokenProvider for StaticTokenProvider {
    async fn access_token(&self) -> Result<String, AuthError> {
        Ok(self.token.clone())
    }
}
