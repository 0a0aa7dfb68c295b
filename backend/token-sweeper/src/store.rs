/// Document store seam
///
/// The sweeper only needs three operations from the store: read a whole
/// collection, delete a field, and remove a value from a list field.
use async_trait::async_trait;
use firestore_client::{Document, FirestoreClient, FirestoreError, Value};
use std::collections::HashMap;
use thiserror::Error;

use crate::models::{AgentRecord, FieldValue, RecordRef};

#[derive(Error, Debug)]
pub enum StoreError {
    #[error(transparent)]
    Firestore(#[from] FirestoreError),

    #[error("Store backend error: {0}")]
    Backend(String),
}

#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Every record of a collection, fully materialised
    async fn list_records(&self, collection: &str) -> Result<Vec<AgentRecord>, StoreError>;

    /// Remove `field` from the record entirely
    async fn delete_field(&self, record: &RecordRef, field: &str) -> Result<(), StoreError>;

    /// Remove every element equal to `value` from the list `field`
    async fn remove_from_list(
        &self,
        record: &RecordRef,
        field: &str,
        value: &str,
    ) -> Result<(), StoreError>;
}

/// Firestore-backed agent store
pub struct FirestoreAgentStore {
    client: FirestoreClient,
}

impl FirestoreAgentStore {
    pub fn new(client: FirestoreClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl DocumentStore for FirestoreAgentStore {
    async fn list_records(&self, collection: &str) -> Result<Vec<AgentRecord>, StoreError> {
        let documents = self.client.list_documents(collection).await?;
        Ok(documents.into_iter().map(to_agent_record).collect())
    }

    async fn delete_field(&self, record: &RecordRef, field: &str) -> Result<(), StoreError> {
        self.client.delete_field(&record.path, field).await?;
        Ok(())
    }

    async fn remove_from_list(
        &self,
        record: &RecordRef,
        field: &str,
        value: &str,
    ) -> Result<(), StoreError> {
        self.client
            .array_remove(&record.path, field, vec![Value::string(value)])
            .await?;
        Ok(())
    }
}

fn to_agent_record(document: Document) -> AgentRecord {
    let reference = RecordRef::new(document.name.clone(), document.id());
    let fields = document
        .fields
        .into_iter()
        .map(|(name, value)| (name, to_field_value(value)))
        .collect();

    AgentRecord { reference, fields }
}

fn to_field_value(value: Value) -> FieldValue {
    match value {
        Value::NullValue(_) => FieldValue::Null,
        Value::BooleanValue(b) => FieldValue::Bool(b),
        Value::IntegerValue(raw) => raw.parse().map(FieldValue::Integer).unwrap_or(FieldValue::Other),
        Value::DoubleValue(d) => FieldValue::Double(d),
        Value::StringValue(s) => FieldValue::String(s),
        Value::ArrayValue(array) => {
            FieldValue::List(array.values.into_iter().map(to_field_value).collect())
        }
        Value::MapValue(map) => FieldValue::Map(
            map.fields
                .into_iter()
                .map(|(k, v)| (k, to_field_value(v)))
                .collect::<HashMap<_, _>>(),
        ),
        Value::TimestampValue(_)
        | Value::BytesValue(_)
        | Value::ReferenceValue(_)
        | Value::GeoPointValue(_) => FieldValue::Other,
    }
}
