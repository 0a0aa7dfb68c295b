/// Agent push-token sweeper
///
/// One-shot maintenance job: reads every push token stored on agent
/// documents, sends a test notification to each, and removes the tokens the
/// push provider reports as unregistered or invalid.
pub mod classify;
pub mod collector;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod push;
pub mod store;
pub mod sweeper;

pub use classify::{classify, FailureKind};
pub use config::Config;
pub use error::SweepError;
pub use models::{AgentRecord, FieldValue, Notification, RecordRef, TokenEntry};
pub use push::{FcmPushProvider, PushError, PushProvider};
pub use store::{DocumentStore, FirestoreAgentStore, StoreError};
pub use sweeper::{EntryOutcome, PruneAction, SweepReport, SweepSettings, TokenSweeper};
