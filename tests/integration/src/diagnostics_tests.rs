//! Degraded-input behavior across whole cycles

use drift_core::InputRole;
use drift_test_utils::{CycleHarness, FakeRemoteStore, StoreKey};
use drift_value::{FlatCodec, StructuredCodec};
use pretty_assertions::assert_eq;
use serde_json::json;

#[test]
fn test_transient_malformed_payload_does_not_corrupt_state() {
    let mut store = FakeRemoteStore::new();
    let key = StoreKey::new("zone-9", "settings");
    store.put(key.clone(), json!({"mode": "strict", "ttl": "60"}));

    let mut harness = CycleHarness::new(FlatCodec::new(), key.clone());
    harness.adopt_baseline(&store);
    harness.declare(json!({"mode": "strict"}));
    let outcome = harness.run_cycle(&store);
    assert!(outcome.diagnostics.is_clean());

    // The remote briefly serves garbage. The pass degrades: issues are
    // reported, the persisted state rides through unchanged.
    store.put(key.clone(), json!(["oops"]));
    let outcome = harness.run_cycle(&store);
    assert_eq!(outcome.diagnostics.issues().len(), 1);
    assert_eq!(outcome.diagnostics.issues()[0].input, InputRole::Live);
    harness.assert_baseline(&json!({"mode": "strict", "ttl": "60"}));
    harness.assert_managed(&json!({"mode": "strict"}));

    // Service recovers with an externally changed value; drift detection
    // still works against the preserved baseline.
    store.put(key, json!({"mode": "strict", "ttl": "300"}));
    let outcome = harness.run_cycle(&store);
    assert!(outcome.diagnostics.is_clean());
    assert_eq!(outcome.drift.len(), 1);
    assert_eq!(outcome.drift[0].key, "ttl");
    harness.assert_managed(&json!({"mode": "strict", "ttl": "300"}));
}

#[test]
fn test_bad_declaration_is_reported_with_entry_paths() {
    let mut store = FakeRemoteStore::new();
    let key = StoreKey::new("zone-9", "settings");
    store.put(key.clone(), json!({"mode": "strict"}));

    let mut harness = CycleHarness::new(FlatCodec::new(), key);
    harness.adopt_baseline(&store);
    // Two malformed entries; both must surface in one pass.
    harness.declare(json!({"mode": 1, "ttl": true}));

    let outcome = harness.run_cycle(&store);

    let paths: Vec<&str> = outcome
        .diagnostics
        .issues()
        .iter()
        .map(|issue| issue.path.as_str())
        .collect();
    assert_eq!(paths, vec!["mode", "ttl"]);
    assert!(outcome
        .diagnostics
        .issues()
        .iter()
        .all(|issue| issue.input == InputRole::Managed));

    // The failed declaration participates as empty but stays present.
    harness.assert_managed(&json!({}));
}

#[test]
fn test_structured_issues_carry_nested_paths_across_inputs() {
    let mut store = FakeRemoteStore::new();
    let key = StoreKey::new("zone-9", "tls_config");
    store.put(key.clone(), json!({"tls": {"ciphers": ["aes"]}}));

    let mut harness = CycleHarness::new(StructuredCodec::new(), key);
    harness.adopt_baseline(&store);

    let outcome = harness.run_cycle(&store);

    // Both the adopted baseline and the live fetch carry the same bad
    // payload, so the same path is reported for each input role.
    let reported: Vec<(InputRole, &str)> = outcome
        .diagnostics
        .issues()
        .iter()
        .map(|issue| (issue.input, issue.path.as_str()))
        .collect();
    assert_eq!(
        reported,
        vec![
            (InputRole::Live, "tls.ciphers"),
            (InputRole::Baseline, "tls.ciphers"),
        ]
    );
}

#[test]
fn test_strict_callers_can_fail_on_any_issue() {
    let mut store = FakeRemoteStore::new();
    let key = StoreKey::new("zone-9", "settings");
    store.put(key.clone(), json!({"mode": 5}));

    let mut harness = CycleHarness::new(FlatCodec::new(), key);
    let outcome = harness.run_cycle(&store);

    let error = outcome.diagnostics.into_result().unwrap_err();
    let message = error.to_string();
    assert!(message.contains("live input"), "got: {}", message);
    assert!(message.contains("mode"), "got: {}", message);
}
