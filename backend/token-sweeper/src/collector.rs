//! Token collection: flattens the token field of every agent record into
//! one entry per usable token.

use tracing::debug;

use crate::models::{AgentRecord, FieldValue, TokenEntry};
use crate::store::{DocumentStore, StoreError};

/// Extract token entries from already-loaded records
///
/// A string field yields one entry; a list yields one entry per non-empty
/// string element. Every other shape is ignored.
pub fn collect_tokens(records: &[AgentRecord], field: &str) -> Vec<TokenEntry> {
    let mut entries = Vec::new();

    for record in records {
        match record.fields.get(field) {
            Some(FieldValue::String(raw)) => {
                if let Some(token) = usable_token(raw) {
                    entries.push(TokenEntry {
                        record: record.reference.clone(),
                        token,
                        from_list: false,
                    });
                }
            }
            Some(FieldValue::List(items)) => {
                for item in items {
                    if let FieldValue::String(raw) = item {
                        if let Some(token) = usable_token(raw) {
                            entries.push(TokenEntry {
                                record: record.reference.clone(),
                                token,
                                from_list: true,
                            });
                        }
                    }
                }
            }
            other => {
                debug!(record = %record.reference.id, "No usable token field: {:?}", other);
            }
        }
    }

    entries
}

fn usable_token(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Read the whole collection and collect its token entries
pub async fn gather_tokens(
    store: &dyn DocumentStore,
    collection: &str,
    field: &str,
) -> Result<Vec<TokenEntry>, StoreError> {
    let records = store.list_records(collection).await?;
    debug!("Loaded {} records from {}", records.len(), collection);
    Ok(collect_tokens(&records, field))
}
