use serde::Deserialize;
use std::ffi::OsString;
use std::path::PathBuf;
use thiserror::Error;

use crate::models::{DEFAULT_NOTIFICATION_BODY, DEFAULT_NOTIFICATION_TITLE};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read environment: {0}")]
    Env(#[from] envy::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Sweeper configuration, read from the environment
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Service account key file
    pub google_application_credentials: Option<PathBuf>,
    /// Overrides the project id from the key file
    pub firebase_project_id: Option<String>,
    #[serde(default = "default_agents_collection")]
    pub agents_collection: String,
    #[serde(default = "default_token_field")]
    pub token_field: String,
    #[serde(default = "default_notification_title")]
    pub notification_title: String,
    #[serde(default = "default_notification_body")]
    pub notification_body: String,
    #[serde(default)]
    pub dry_run: bool,
    #[serde(default = "default_page_size")]
    pub firestore_page_size: u32,
    /// Firestore database id
    #[serde(default = "default_firestore_database")]
    pub firestore_database: String,
    /// `host:port` of a Firestore emulator
    pub firestore_emulator_host: Option<String>,
    #[serde(default = "default_log_format")]
    pub log_format: String,
}

fn default_agents_collection() -> String {
    "agents".to_string()
}

fn default_token_field() -> String {
    "fsmToken".to_string()
}

fn default_notification_title() -> String {
    DEFAULT_NOTIFICATION_TITLE.to_string()
}

fn default_notification_body() -> String {
    DEFAULT_NOTIFICATION_BODY.to_string()
}

fn default_page_size() -> u32 {
    300
}

fn default_firestore_database() -> String {
    "(default)".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

impl Config {
    /// Load from the process environment, after an optional `.env` file
    ///
    /// Variables whose name or value is not valid Unicode are ignored.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_iter(unicode_vars(std::env::vars_os()))
    }

    pub fn from_iter<I>(vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let config: Config = envy::from_iter(vars)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.agents_collection.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "AGENTS_COLLECTION must not be empty".to_string(),
            ));
        }
        if self.token_field.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "TOKEN_FIELD must not be empty".to_string(),
            ));
        }
        if self.firestore_database.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "FIRESTORE_DATABASE must not be empty".to_string(),
            ));
        }
        if self.firestore_page_size == 0 {
            return Err(ConfigError::Invalid(
                "FIRESTORE_PAGE_SIZE must be greater than zero".to_string(),
            ));
        }
        if self.google_application_credentials.is_none() {
            return Err(ConfigError::Invalid(
                "GOOGLE_APPLICATION_CREDENTIALS must be set".to_string(),
            ));
        }
        if !matches!(self.log_format.as_str(), "text" | "json") {
            return Err(ConfigError::Invalid(format!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            )));
        }
        Ok(())
    }

    pub fn json_logs(&self) -> bool {
        self.log_format == "json"
    }
}

fn unicode_vars<I>(vars: I) -> impl Iterator<Item = (String, String)>
where
    I: IntoIterator<Item = (OsString, OsString)>,
{
    vars.into_iter()
        .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
}
