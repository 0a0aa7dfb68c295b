/// Send-and-prune behaviour of TokenSweeper against in-memory collaborators
mod common;

use common::{list, record, s, InMemoryStore, Mutation, ScriptedPush, FIELD};
use std::sync::Arc;
use token_sweeper::{EntryOutcome, FieldValue, PruneAction, SweepError, SweepSettings, TokenSweeper};

const NOT_REGISTERED: &str = "messaging/registration-token-not-registered";
const INVALID_TOKEN: &str = "messaging/invalid-registration-token";
const RATE_EXCEEDED: &str = "messaging/message-rate-exceeded";

fn sweeper(store: &Arc<InMemoryStore>, push: &Arc<ScriptedPush>) -> TokenSweeper {
    TokenSweeper::new(store.clone(), push.clone(), SweepSettings::default())
}

#[tokio::test]
async fn test_example_scenario() {
    let store = Arc::new(InMemoryStore::new(vec![
        record("A", Some(s("tok1"))),
        record("B", Some(list(&["tok2", "tok3"]))),
    ]));
    let push = Arc::new(
        ScriptedPush::new()
            .fail("tok1", NOT_REGISTERED)
            .fail("tok3", INVALID_TOKEN),
    );

    let report = sweeper(&store, &push).run().await.unwrap();

    assert_eq!(report.found, 3);
    assert_eq!(push.attempts(), vec!["tok1", "tok2", "tok3"]);
    assert_eq!(
        report.outcomes[0],
        EntryOutcome::Pruned(PruneAction::DeletedField)
    );
    assert!(matches!(report.outcomes[1], EntryOutcome::Sent { .. }));
    assert_eq!(
        report.outcomes[2],
        EntryOutcome::Pruned(PruneAction::RemovedFromList)
    );

    assert_eq!(store.field("A", FIELD), None);
    assert_eq!(store.field("B", FIELD), Some(list(&["tok2"])));
    assert_eq!(
        store.mutations(),
        vec![
            Mutation::DeleteField {
                record: "A".to_string(),
                field: FIELD.to_string(),
            },
            Mutation::RemoveFromList {
                record: "B".to_string(),
                field: FIELD.to_string(),
                value: "tok3".to_string(),
            },
        ]
    );
}

#[tokio::test]
async fn test_successful_sends_never_mutate() {
    let store = Arc::new(InMemoryStore::new(vec![
        record("A", Some(s("tok1"))),
        record("B", Some(list(&["tok2", "tok3"]))),
    ]));
    let push = Arc::new(ScriptedPush::new());

    let report = sweeper(&store, &push).run().await.unwrap();

    assert_eq!(report.sent(), 3);
    assert!(store.mutations().is_empty());
    assert_eq!(store.field("A", FIELD), Some(s("tok1")));
}

#[tokio::test]
async fn test_scalar_prune_touches_only_owner() {
    let store = Arc::new(InMemoryStore::new(vec![
        record("A", Some(s("dead"))),
        record("B", Some(s("alive"))),
        record("C", Some(list(&["also-alive"]))),
    ]));
    let push = Arc::new(ScriptedPush::new().fail("dead", NOT_REGISTERED));

    sweeper(&store, &push).run().await.unwrap();

    assert_eq!(
        store.mutations(),
        vec![Mutation::DeleteField {
            record: "A".to_string(),
            field: FIELD.to_string(),
        }]
    );
    assert_eq!(store.field("B", FIELD), Some(s("alive")));
    assert_eq!(store.field("C", FIELD), Some(list(&["also-alive"])));
}

#[tokio::test]
async fn test_list_prune_removes_only_that_value() {
    let store = Arc::new(InMemoryStore::new(vec![record(
        "B",
        Some(list(&["keep-1", "dead", "keep-2"])),
    )]));
    let push = Arc::new(ScriptedPush::new().fail("dead", "UNREGISTERED"));

    let report = sweeper(&store, &push).run().await.unwrap();

    assert_eq!(report.pruned(), 1);
    assert_eq!(store.field("B", FIELD), Some(list(&["keep-1", "keep-2"])));
}

#[tokio::test]
async fn test_list_prune_removes_all_equal_occurrences() {
    let store = Arc::new(InMemoryStore::new(vec![record(
        "B",
        Some(list(&["dup", "other", "dup"])),
    )]));
    let push = Arc::new(ScriptedPush::new().fail("dup", NOT_REGISTERED));

    let report = sweeper(&store, &push).run().await.unwrap();

    // Both occurrences are collected and attempted; the first prune removes both
    assert_eq!(push.attempts(), vec!["dup", "other", "dup"]);
    assert_eq!(report.pruned(), 2);
    assert_eq!(store.field("B", FIELD), Some(list(&["other"])));
}

#[tokio::test]
async fn test_unrelated_error_is_skipped() {
    let store = Arc::new(InMemoryStore::new(vec![
        record("A", Some(s("tok1"))),
        record("B", Some(list(&["tok2"]))),
    ]));
    let push = Arc::new(
        ScriptedPush::new()
            .fail("tok1", RATE_EXCEEDED)
            .fail("tok2", "app/network-error"),
    );

    let report = sweeper(&store, &push).run().await.unwrap();

    assert_eq!(report.skipped(), 2);
    assert!(store.mutations().is_empty());
    match &report.outcomes[0] {
        EntryOutcome::Skipped { code, message } => {
            assert_eq!(code, RATE_EXCEEDED);
            assert!(message.contains("tok1"));
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
}

#[tokio::test]
async fn test_failure_does_not_stop_later_entries() {
    let store = Arc::new(InMemoryStore::new(vec![
        record("A", Some(s("t1"))),
        record("B", Some(s("t2"))),
        record("C", Some(s("t3"))),
        record("D", Some(s("t4"))),
    ]));
    let push = Arc::new(
        ScriptedPush::new()
            .fail("t1", RATE_EXCEEDED)
            .fail("t2", NOT_REGISTERED),
    );

    let report = sweeper(&store, &push).run().await.unwrap();

    assert_eq!(push.attempts(), vec!["t1", "t2", "t3", "t4"]);
    assert_eq!(report.outcomes.len(), 4);
    assert_eq!(report.sent(), 2);
}

#[tokio::test]
async fn test_failed_prune_is_reported_and_sweep_continues() {
    let store = Arc::new(
        InMemoryStore::new(vec![
            record("A", Some(s("dead"))),
            record("B", Some(s("alive"))),
        ])
        .failing_updates(),
    );
    let push = Arc::new(ScriptedPush::new().fail("dead", NOT_REGISTERED));

    let report = sweeper(&store, &push).run().await.unwrap();

    assert!(matches!(
        report.outcomes[0],
        EntryOutcome::PruneFailed {
            action: PruneAction::DeletedField,
            ..
        }
    ));
    assert!(matches!(report.outcomes[1], EntryOutcome::Sent { .. }));
    assert_eq!(report.prune_failed(), 1);
}

#[tokio::test]
async fn test_collection_failure_is_fatal() {
    let store = Arc::new(InMemoryStore::new(vec![record("A", Some(s("tok1")))]).failing_list());
    let push = Arc::new(ScriptedPush::new());

    let result = sweeper(&store, &push).run().await;

    assert!(matches!(result, Err(SweepError::Collect(_))));
    assert!(push.attempts().is_empty());
}

#[tokio::test]
async fn test_dry_run_never_mutates() {
    let store = Arc::new(InMemoryStore::new(vec![
        record("A", Some(s("tok1"))),
        record("B", Some(list(&["tok2"]))),
    ]));
    let push = Arc::new(
        ScriptedPush::new()
            .fail("tok1", NOT_REGISTERED)
            .fail("tok2", INVALID_TOKEN),
    );
    let settings = SweepSettings {
        dry_run: true,
        ..SweepSettings::default()
    };

    let report = TokenSweeper::new(store.clone(), push.clone(), settings)
        .run()
        .await
        .unwrap();

    assert_eq!(
        report.outcomes,
        vec![
            EntryOutcome::WouldPrune(PruneAction::DeletedField),
            EntryOutcome::WouldPrune(PruneAction::RemovedFromList),
        ]
    );
    assert!(store.mutations().is_empty());
}

#[tokio::test]
async fn test_records_without_tokens_are_not_sent() {
    let store = Arc::new(InMemoryStore::new(vec![
        record("missing", None),
        record("null", Some(FieldValue::Null)),
        record("number", Some(FieldValue::Integer(7))),
        record("blank", Some(s("  "))),
    ]));
    let push = Arc::new(ScriptedPush::new());

    let report = sweeper(&store, &push).run().await.unwrap();

    assert_eq!(report.found, 0);
    assert!(push.attempts().is_empty());
}

#[tokio::test]
async fn test_custom_token_field() {
    let mut agent = record("A", Some(s("ignored")));
    agent.fields.insert("pushToken".to_string(), s("dead"));
    let store = Arc::new(InMemoryStore::new(vec![agent]));
    let push = Arc::new(ScriptedPush::new().fail("dead", NOT_REGISTERED));
    let settings = SweepSettings {
        token_field: "pushToken".to_string(),
        ..SweepSettings::default()
    };

    TokenSweeper::new(store.clone(), push.clone(), settings)
        .run()
        .await
        .unwrap();

    assert_eq!(push.attempts(), vec!["dead"]);
    assert_eq!(store.field("A", "pushToken"), None);
    assert_eq!(store.field("A", FIELD), Some(s("ignored")));
}
