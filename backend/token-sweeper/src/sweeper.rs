/// Send-and-prune driver
///
/// Sends the configured notification to every collected token, one at a
/// time, and removes tokens the provider reports as dead:
/// - a token stored as the whole field deletes the field
/// - a token stored in a list is removed from the list
///
/// Nothing is retried. A failed send or prune is logged and the sweep moves
/// on; re-running the job is the retry.
use fcm_shared::FcmClient;
use firestore_client::FirestoreClient;
use gcp_auth::{AccessTokenProvider, ServiceAccountKey, ServiceAccountTokenProvider, StaticTokenProvider};
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::classify::{classify, FailureKind};
use crate::collector::gather_tokens;
use crate::config::Config;
use crate::error::SweepError;
use crate::models::{token_preview, Notification, TokenEntry};
use crate::push::{FcmPushProvider, PushProvider};
use crate::store::{DocumentStore, FirestoreAgentStore, StoreError};

/// How a dead token was (or would be) removed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PruneAction {
    DeletedField,
    RemovedFromList,
}

/// Result of processing one token entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryOutcome {
    Sent { message_id: String },
    Pruned(PruneAction),
    /// Dry run: the token is dead but the store was not touched
    WouldPrune(PruneAction),
    Skipped { code: String, message: String },
    PruneFailed { action: PruneAction, error: String },
}

/// Summary of one sweep, outcomes in processing order
#[derive(Debug, Clone, Default)]
pub struct SweepReport {
    pub found: usize,
    pub outcomes: Vec<EntryOutcome>,
}

impl SweepReport {
    pub fn sent(&self) -> usize {
        self.count(|o| matches!(o, EntryOutcome::Sent { .. }))
    }

    pub fn pruned(&self) -> usize {
        self.count(|o| matches!(o, EntryOutcome::Pruned(_) | EntryOutcome::WouldPrune(_)))
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, EntryOutcome::Skipped { .. }))
    }

    pub fn prune_failed(&self) -> usize {
        self.count(|o| matches!(o, EntryOutcome::PruneFailed { .. }))
    }

    fn count(&self, f: impl Fn(&EntryOutcome) -> bool) -> usize {
        self.outcomes.iter().filter(|o| f(o)).count()
    }
}

#[derive(Debug, Clone)]
pub struct SweepSettings {
    pub collection: String,
    pub token_field: String,
    pub notification: Notification,
    pub dry_run: bool,
}

impl Default for SweepSettings {
    fn default() -> Self {
        Self {
            collection: "agents".to_string(),
            token_field: "fsmToken".to_string(),
            notification: Notification::default(),
            dry_run: false,
        }
    }
}

impl From<&Config> for SweepSettings {
    fn from(config: &Config) -> Self {
        Self {
            collection: config.agents_collection.clone(),
            token_field: config.token_field.clone(),
            notification: Notification {
                title: config.notification_title.clone(),
                body: config.notification_body.clone(),
            },
            dry_run: config.dry_run,
        }
    }
}

pub struct TokenSweeper {
    store: Arc<dyn DocumentStore>,
    push: Arc<dyn PushProvider>,
    settings: SweepSettings,
}

impl TokenSweeper {
    pub fn new(
        store: Arc<dyn DocumentStore>,
        push: Arc<dyn PushProvider>,
        settings: SweepSettings,
    ) -> Self {
        Self {
            store,
            push,
            settings,
        }
    }

    /// Wire Firestore and FCM clients from configuration
    pub fn from_config(config: &Config) -> Result<Self, SweepError> {
        config.validate()?;

        // validate() guarantees the path is set
        let key_path = config.google_application_credentials.clone().unwrap_or_default();
        let key = ServiceAccountKey::from_file(&key_path)?;
        let project_id = config
            .firebase_project_id
            .clone()
            .unwrap_or_else(|| key.project_id.clone());

        let google_auth: Arc<dyn AccessTokenProvider> =
            Arc::new(ServiceAccountTokenProvider::new(key));

        let firestore = match &config.firestore_emulator_host {
            Some(host) => {
                info!("Using Firestore emulator at {}", host);
                FirestoreClient::new(
                    project_id.clone(),
                    Arc::new(StaticTokenProvider::emulator_owner()),
                )
                .with_base_url(format!("http://{}", host))
            }
            None => FirestoreClient::new(project_id.clone(), google_auth.clone()),
        }
        .with_database(config.firestore_database.clone())
        .with_page_size(config.firestore_page_size);

        let fcm = FcmClient::new(project_id, google_auth);

        Ok(Self::new(
            Arc::new(FirestoreAgentStore::new(firestore)),
            Arc::new(FcmPushProvider::new(fcm).validate_only(config.dry_run)),
            SweepSettings::from(config),
        ))
    }

    /// Collect every token, then send to and prune each one in turn
    ///
    /// Only a failure to read the collection is returned as an error.
    pub async fn run(&self) -> Result<SweepReport, SweepError> {
        let entries = gather_tokens(
            self.store.as_ref(),
            &self.settings.collection,
            &self.settings.token_field,
        )
        .await?;

        info!("Found {} token entries, attempting sends…", entries.len());
        if self.settings.dry_run {
            info!("[DRY RUN] Sends are validate-only and no tokens will be removed");
        }

        let mut report = SweepReport {
            found: entries.len(),
            outcomes: Vec::with_capacity(entries.len()),
        };

        for entry in &entries {
            let outcome = self.process_entry(entry).await;
            report.outcomes.push(outcome);
        }

        info!(
            "Sweep complete: found={}, sent={}, pruned={}, skipped={}, prune_failed={}",
            report.found,
            report.sent(),
            report.pruned(),
            report.skipped(),
            report.prune_failed()
        );

        Ok(report)
    }

    /// Send to one token and prune it if the provider says it is dead
    pub async fn process_entry(&self, entry: &TokenEntry) -> EntryOutcome {
        let preview = token_preview(&entry.token);

        let err = match self
            .push
            .send(&entry.token, &self.settings.notification)
            .await
        {
            Ok(message_id) => {
                info!(record = %entry.record.id, "✅ Sent to {}…: {}", preview, message_id);
                return EntryOutcome::Sent { message_id };
            }
            Err(err) => err,
        };

        if classify(&err.code) == FailureKind::Other {
            warn!(
                record = %entry.record.id,
                "⚠️ Skipped {}… - {}: {}", preview, err.code, err.message
            );
            return EntryOutcome::Skipped {
                code: err.code,
                message: err.message,
            };
        }

        let action = if entry.from_list {
            PruneAction::RemovedFromList
        } else {
            PruneAction::DeletedField
        };

        if self.settings.dry_run {
            info!(
                record = %entry.record.id,
                "[DRY RUN] Would remove token {}… ({}): {:?}", preview, err.code, action
            );
            return EntryOutcome::WouldPrune(action);
        }

        match self.prune(entry, action).await {
            Ok(()) => {
                match action {
                    PruneAction::RemovedFromList => info!(
                        "🗑 Removed expired token {}… from array in {}",
                        preview, entry.record.id
                    ),
                    PruneAction::DeletedField => info!(
                        "🗑 Deleted {} field from {}",
                        self.settings.token_field, entry.record.id
                    ),
                }
                EntryOutcome::Pruned(action)
            }
            Err(e) => {
                error!(
                    record = %entry.record.id,
                    "❌ Failed to remove token {}…: {}", preview, e
                );
                EntryOutcome::PruneFailed {
                    action,
                    error: e.to_string(),
                }
            }
        }
    }

    async fn prune(&self, entry: &TokenEntry, action: PruneAction) -> Result<(), StoreError> {
        let field = &self.settings.token_field;
        match action {
            PruneAction::RemovedFromList => {
                self.store
                    .remove_from_list(&entry.record, field, &entry.token)
                    .await
            }
            PruneAction::DeletedField => self.store.delete_field(&entry.record, field).await,
        }
    }
}
