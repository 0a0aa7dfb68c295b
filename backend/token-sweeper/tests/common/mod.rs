//! In-memory store and scripted push provider for sweeper tests.
#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use token_sweeper::{
    AgentRecord, DocumentStore, FieldValue, Notification, PushError, PushProvider, RecordRef,
    StoreError,
};

pub const FIELD: &str = "fsmToken";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    DeleteField {
        record: String,
        field: String,
    },
    RemoveFromList {
        record: String,
        field: String,
        value: String,
    },
}

/// Mock document store backed by a vector of records
#[derive(Default)]
pub struct InMemoryStore {
    records: Mutex<Vec<AgentRecord>>,
    mutations: Mutex<Vec<Mutation>>,
    fail_list: bool,
    fail_updates: bool,
}

impl InMemoryStore {
    pub fn new(records: Vec<AgentRecord>) -> Self {
        Self {
            records: Mutex::new(records),
            ..Default::default()
        }
    }

    /// Every read of the collection fails
    pub fn failing_list(mut self) -> Self {
        self.fail_list = true;
        self
    }

    /// Every field update fails
    pub fn failing_updates(mut self) -> Self {
        self.fail_updates = true;
        self
    }

    pub fn mutations(&self) -> Vec<Mutation> {
        self.mutations.lock().unwrap().clone()
    }

    pub fn field(&self, id: &str, field: &str) -> Option<FieldValue> {
        self.records
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.reference.id == id)
            .and_then(|r| r.fields.get(field).cloned())
    }
}

#[async_trait]
impl DocumentStore for InMemoryStore {
    async fn list_records(&self, _collection: &str) -> Result<Vec<AgentRecord>, StoreError> {
        if self.fail_list {
            return Err(StoreError::Backend("permission denied".to_string()));
        }
        Ok(self.records.lock().unwrap().clone())
    }

    async fn delete_field(&self, record: &RecordRef, field: &str) -> Result<(), StoreError> {
        if self.fail_updates {
            return Err(StoreError::Backend("update rejected".to_string()));
        }
        self.mutations.lock().unwrap().push(Mutation::DeleteField {
            record: record.id.clone(),
            field: field.to_string(),
        });

        let mut records = self.records.lock().unwrap();
        if let Some(r) = records.iter_mut().find(|r| r.reference == *record) {
            r.fields.remove(field);
        }
        Ok(())
    }

    async fn remove_from_list(
        &self,
        record: &RecordRef,
        field: &str,
        value: &str,
    ) -> Result<(), StoreError> {
        if self.fail_updates {
            return Err(StoreError::Backend("update rejected".to_string()));
        }
        self.mutations.lock().unwrap().push(Mutation::RemoveFromList {
            record: record.id.clone(),
            field: field.to_string(),
            value: value.to_string(),
        });

        let mut records = self.records.lock().unwrap();
        if let Some(r) = records.iter_mut().find(|r| r.reference == *record) {
            if let Some(FieldValue::List(items)) = r.fields.get_mut(field) {
                items.retain(|item| !matches!(item, FieldValue::String(s) if s == value));
            }
        }
        Ok(())
    }
}

/// Push provider that fails for scripted tokens and succeeds otherwise
#[derive(Default)]
pub struct ScriptedPush {
    failures: HashMap<String, PushError>,
    sent: Mutex<Vec<String>>,
}

impl ScriptedPush {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail(mut self, token: &str, code: &str) -> Self {
        self.failures
            .insert(token.to_string(), PushError::new(code, format!("{code} for {token}")));
        self
    }

    /// Tokens in the order they were attempted
    pub fn attempts(&self) -> Vec<String> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl PushProvider for ScriptedPush {
    async fn send(&self, token: &str, _notification: &Notification) -> Result<String, PushError> {
        let mut sent = self.sent.lock().unwrap();
        sent.push(token.to_string());

        match self.failures.get(token) {
            Some(err) => Err(err.clone()),
            None => Ok(format!("projects/test-project/messages/{}", sent.len())),
        }
    }
}

pub fn record(id: &str, token: Option<FieldValue>) -> AgentRecord {
    let mut fields = HashMap::new();
    fields.insert("name".to_string(), FieldValue::String(format!("Agent {id}")));
    if let Some(value) = token {
        fields.insert(FIELD.to_string(), value);
    }
    AgentRecord {
        reference: RecordRef::new(format!("agents/{id}"), id),
        fields,
    }
}

pub fn s(v: &str) -> FieldValue {
    FieldValue::String(v.to_string())
}

pub fn list(values: &[&str]) -> FieldValue {
    FieldValue::List(values.iter().map(|v| s(v)).collect())
}
