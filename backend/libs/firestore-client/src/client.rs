use gcp_auth::AccessTokenProvider;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::debug;

use crate::document::{Document, ListDocumentsResponse};
use crate::errors::FirestoreError;
use crate::value::Value;

pub const DEFAULT_FIRESTORE_BASE_URL: &str = "https://firestore.googleapis.com";
pub const DEFAULT_DATABASE: &str = "(default)";
pub const DEFAULT_PAGE_SIZE: u32 = 300;

/// Firestore REST client
pub struct FirestoreClient {
    pub project_id: String,
    database_id: String,
    base_url: String,
    page_size: u32,
    token_provider: Arc<dyn AccessTokenProvider>,
    http_client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorStatus,
}

#[derive(Debug, Deserialize)]
struct ErrorStatus {
    #[serde(default)]
    message: String,
}

impl FirestoreClient {
    pub fn new(project_id: String, token_provider: Arc<dyn AccessTokenProvider>) -> Self {
        Self {
            project_id,
            database_id: DEFAULT_DATABASE.to_string(),
            base_url: DEFAULT_FIRESTORE_BASE_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            token_provider,
            http_client: reqwest::Client::new(),
        }
    }

    /// Point the client at a different host, e.g. `http://localhost:8080`
    /// for the emulator
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_database(mut self, database_id: impl Into<String>) -> Self {
        self.database_id = database_id.into();
        self
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    /// `projects/{p}/databases/{db}/documents`
    pub fn documents_root(&self) -> String {
        format!(
            "projects/{}/databases/{}/documents",
            self.project_id, self.database_id
        )
    }

    fn url(&self, resource: &str) -> String {
        format!("{}/v1/{}", self.base_url, resource)
    }

    /// List every document in a top-level collection, following page tokens
    pub async fn list_documents(&self, collection: &str) -> Result<Vec<Document>, FirestoreError> {
        let url = self.url(&format!("{}/{}", self.documents_root(), collection));
        let page_size = self.page_size.to_string();

        let mut documents = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let access_token = self.token_provider.access_token().await?;

            let mut query = vec![("pageSize", page_size.as_str())];
            if let Some(token) = page_token.as_deref() {
                query.push(("pageToken", token));
            }

            let response = self
                .http_client
                .get(&url)
                .bearer_auth(access_token)
                .query(&query)
                .send()
                .await
                .map_err(|e| FirestoreError::RequestError(e.to_string()))?;

            let page: ListDocumentsResponse = parse_response(response).await?;
            debug!(
                "Fetched {} documents from {}",
                page.documents.len(),
                collection
            );
            documents.extend(page.documents);

            match page.next_page_token {
                Some(token) if !token.is_empty() => page_token = Some(token),
                _ => break,
            }
        }

        Ok(documents)
    }

    /// Delete one field from an existing document
    pub async fn delete_field(&self, document_name: &str, field: &str) -> Result<(), FirestoreError> {
        let access_token = self.token_provider.access_token().await?;
        let field_path = quote_field_path(field);

        // A field named in the mask but absent from the body is deleted
        let response = self
            .http_client
            .patch(self.url(document_name))
            .bearer_auth(access_token)
            .query(&[
                ("updateMask.fieldPaths", field_path.as_str()),
                ("currentDocument.exists", "true"),
            ])
            .json(&json!({ "fields": {} }))
            .send()
            .await
            .map_err(|e| FirestoreError::RequestError(e.to_string()))?;

        let _: Document = parse_response(response).await?;
        Ok(())
    }

    /// Remove every occurrence of `values` from an array field
    pub async fn array_remove(
        &self,
        document_name: &str,
        field: &str,
        values: Vec<Value>,
    ) -> Result<(), FirestoreError> {
        let access_token = self.token_provider.access_token().await?;

        let body = json!({
            "writes": [{
                "transform": {
                    "document": document_name,
                    "fieldTransforms": [{
                        "fieldPath": quote_field_path(field),
                        "removeAllFromArray": { "values": values }
                    }]
                },
                "currentDocument": { "exists": true }
            }]
        });

        let response = self
            .http_client
            .post(self.url(&format!("{}:commit", self.documents_root())))
            .bearer_auth(access_token)
            .json(&body)
            .send()
            .await
            .map_err(|e| FirestoreError::RequestError(e.to_string()))?;

        let _: serde_json::Value = parse_response(response).await?;
        Ok(())
    }
}

async fn parse_response<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, FirestoreError> {
    let status = response.status();
    if status.is_success() {
        return response
            .json()
            .await
            .map_err(|e| FirestoreError::ResponseParseError(e.to_string()));
    }

    let text = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());
    let message = serde_json::from_str::<ErrorEnvelope>(&text)
        .map(|e| e.error.message)
        .unwrap_or(text);

    Err(FirestoreError::ApiError {
        status: status.as_u16(),
        message,
    })
}

/// Back-quote field names that are not simple identifiers
pub fn quote_field_path(field: &str) -> String {
    let mut chars = field.chars();
    let simple = matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');

    if simple {
        field.to_string()
    } else {
        format!("`{}`", field.replace('\\', "\\\\").replace('`', "\\`"))
    }
}
