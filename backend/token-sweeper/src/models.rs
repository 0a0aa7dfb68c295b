use std::collections::HashMap;

pub const DEFAULT_NOTIFICATION_TITLE: &str = "Basic Notification";
pub const DEFAULT_NOTIFICATION_BODY: &str = "This is a basic notification sent from the server!";

/// Store-neutral view of a document field
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Integer(i64),
    Double(f64),
    String(String),
    List(Vec<FieldValue>),
    Map(HashMap<String, FieldValue>),
    /// Timestamps, bytes, references, geo points
    Other,
}

/// Reference to a stored agent record
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecordRef {
    /// Full path used for updates
    pub path: String,
    /// Short id used in log lines
    pub id: String,
}

impl RecordRef {
    pub fn new(path: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            id: id.into(),
        }
    }
}

/// Agent document as read from the store
#[derive(Debug, Clone, PartialEq)]
pub struct AgentRecord {
    pub reference: RecordRef,
    pub fields: HashMap<String, FieldValue>,
}

/// One push token found on an agent record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenEntry {
    pub record: RecordRef,
    /// Trimmed, never empty
    pub token: String,
    /// True when the token was one element of a list field
    pub from_list: bool,
}

/// Notification payload sent to every token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub body: String,
}

impl Default for Notification {
    fn default() -> Self {
        Self {
            title: DEFAULT_NOTIFICATION_TITLE.to_string(),
            body: DEFAULT_NOTIFICATION_BODY.to_string(),
        }
    }
}

/// Shortened token for log lines
pub fn token_preview(token: &str) -> String {
    token.chars().take(8).collect()
}
