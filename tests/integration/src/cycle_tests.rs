//! Full reconciliation lifecycles against the fake remote store

use drift_test_utils::{CycleHarness, FakeRemoteStore, StoreKey};
use drift_value::{FlatCodec, StructuredCodec};
use pretty_assertions::assert_eq;
use serde_json::json;

fn seeded_store() -> (FakeRemoteStore, StoreKey) {
    let mut store = FakeRemoteStore::new();
    let key = StoreKey::new("zone-7", "settings");
    store.put(
        key.clone(),
        json!({
            "always_use_https": "on",
            "browser_check": "on",
            "min_tls_version": "1.0"
        }),
    );
    (store, key)
}

#[test]
fn test_steady_state_cycles_converge() {
    let (store, key) = seeded_store();
    let mut harness = CycleHarness::new(FlatCodec::new(), key);
    harness.adopt_baseline(&store);
    harness.declare(json!({"min_tls_version": "1.0"}));

    for _ in 0..3 {
        let outcome = harness.run_cycle(&store);
        assert!(outcome.drift.is_empty());
        assert!(outcome.diagnostics.is_clean());
    }

    harness.assert_managed(&json!({"min_tls_version": "1.0"}));
    harness.assert_baseline(&json!({
        "always_use_https": "on",
        "browser_check": "on",
        "min_tls_version": "1.0"
    }));
}

#[test]
fn test_external_edit_is_promoted_then_settles() {
    let (mut store, key) = seeded_store();
    let mut harness = CycleHarness::new(FlatCodec::new(), key.clone());
    harness.adopt_baseline(&store);
    harness.declare(json!({"min_tls_version": "1.0"}));

    let outcome = harness.run_cycle(&store);
    assert!(outcome.drift.is_empty());

    // An operator flips an undeclared setting in the remote console.
    store.set_entry(&key, "browser_check", json!("off"));

    let outcome = harness.run_cycle(&store);
    assert_eq!(outcome.drift.len(), 1);
    let entry = &outcome.drift[0];
    assert_eq!(entry.key, "browser_check");
    assert_eq!(entry.baseline, "on");
    assert_eq!(entry.live, "off");
    assert!(entry.promoted);
    harness.assert_managed(&json!({
        "browser_check": "off",
        "min_tls_version": "1.0"
    }));

    // The promoted key is tracked from now on; the next cycle is quiet.
    let outcome = harness.run_cycle(&store);
    assert!(outcome.drift.is_empty());
    harness.assert_managed(&json!({
        "browser_check": "off",
        "min_tls_version": "1.0"
    }));
    harness.assert_baseline(&json!({
        "always_use_https": "on",
        "browser_check": "off",
        "min_tls_version": "1.0"
    }));
}

#[test]
fn test_novel_declaration_follows_the_remote_once_reported() {
    let (mut store, key) = seeded_store();
    let mut harness = CycleHarness::new(FlatCodec::new(), key.clone());
    harness.adopt_baseline(&store);
    harness.declare(json!({"min_tls_version": "1.0", "waf": "on"}));

    // The remote has never reported `waf`; the declaration rides along
    // unchanged and never enters the baseline.
    let outcome = harness.run_cycle(&store);
    assert!(outcome.drift.is_empty());
    harness.assert_managed(&json!({"min_tls_version": "1.0", "waf": "on"}));
    harness.assert_baseline(&json!({
        "always_use_https": "on",
        "browser_check": "on",
        "min_tls_version": "1.0"
    }));

    // Once the remote starts reporting it, the declared key continuously
    // tracks the remote's value. The baseline key set still never grows.
    store.set_entry(&key, "waf", json!("off"));
    let outcome = harness.run_cycle(&store);
    assert!(outcome.drift.is_empty());
    harness.assert_managed(&json!({"min_tls_version": "1.0", "waf": "off"}));
    harness.assert_baseline(&json!({
        "always_use_https": "on",
        "browser_check": "on",
        "min_tls_version": "1.0"
    }));
}

#[test]
fn test_remote_withdrawing_the_surface_freezes_state() {
    let (mut store, key) = seeded_store();
    let mut harness = CycleHarness::new(FlatCodec::new(), key.clone());
    harness.adopt_baseline(&store);
    harness.declare(json!({"min_tls_version": "1.0"}));
    harness.run_cycle(&store);

    // The remote stops reporting the surface entirely.
    store.delete(&key);
    let outcome = harness.run_cycle(&store);

    assert!(outcome.drift.is_empty());
    assert!(outcome.diagnostics.is_clean());
    harness.assert_managed(&json!({"min_tls_version": "1.0"}));
    harness.assert_baseline(&json!({
        "always_use_https": "on",
        "browser_check": "on",
        "min_tls_version": "1.0"
    }));
}

#[test]
fn test_consumer_redeclaring_midstream_resyncs_next_cycle() {
    let (store, key) = seeded_store();
    let mut harness = CycleHarness::new(FlatCodec::new(), key);
    harness.adopt_baseline(&store);
    harness.declare(json!({"min_tls_version": "1.0"}));
    harness.run_cycle(&store);

    // The consumer edits the declaration: a new key, and a value the
    // remote does not have yet. The sync pass snaps the declared value
    // back to the remote's current one.
    harness.declare(json!({"min_tls_version": "1.2", "browser_check": "on"}));
    let outcome = harness.run_cycle(&store);

    assert!(outcome.drift.is_empty());
    harness.assert_managed(&json!({
        "browser_check": "on",
        "min_tls_version": "1.0"
    }));
}

#[test]
fn test_placeholder_lifecycle_on_a_structured_surface() {
    let mut store = FakeRemoteStore::new();
    let key = StoreKey::new("zone-7", "tls_config");
    store.put(
        key.clone(),
        json!({
            "mode": "strict",
            "certificate": {"$unknown": true}
        }),
    );

    let mut harness = CycleHarness::new(StructuredCodec::new(), key.clone());
    harness.adopt_baseline(&store);
    harness.declare(json!({"mode": "strict"}));

    // Cycle 1: the certificate is still provisioning. Quiet.
    let outcome = harness.run_cycle(&store);
    assert!(outcome.drift.is_empty());
    harness.assert_baseline(&json!({
        "mode": "strict",
        "certificate": {"$unknown": true}
    }));

    // Cycle 2: the placeholder resolves. Still not drift.
    store.set_entry(&key, "certificate", json!("cert-800"));
    let outcome = harness.run_cycle(&store);
    assert!(outcome.drift.is_empty());
    harness.assert_baseline(&json!({
        "mode": "strict",
        "certificate": "cert-800"
    }));
    harness.assert_managed(&json!({"mode": "strict"}));

    // Cycle 3: the certificate is rotated externally. Now it drifts and is
    // promoted into the managed set.
    store.set_entry(&key, "certificate", json!("cert-801"));
    let outcome = harness.run_cycle(&store);
    assert_eq!(outcome.drift.len(), 1);
    assert!(outcome.drift[0].promoted);
    harness.assert_managed(&json!({
        "mode": "strict",
        "certificate": "cert-801"
    }));
}

#[test]
fn test_independent_surfaces_do_not_interfere() {
    let mut store = FakeRemoteStore::new();
    let settings = StoreKey::new("zone-7", "settings");
    let cache = StoreKey::new("zone-7", "tiered_cache");
    store.put(settings.clone(), json!({"min_tls_version": "1.0"}));
    store.put(cache.clone(), json!({"topology": "smart"}));

    let mut settings_harness = CycleHarness::new(FlatCodec::new(), settings.clone());
    settings_harness.adopt_baseline(&store);
    let mut cache_harness = CycleHarness::new(FlatCodec::new(), cache);
    cache_harness.adopt_baseline(&store);

    store.set_entry(&settings, "min_tls_version", json!("1.3"));

    let outcome = settings_harness.run_cycle(&store);
    assert_eq!(outcome.drift.len(), 1);

    let outcome = cache_harness.run_cycle(&store);
    assert!(outcome.drift.is_empty());
    cache_harness.assert_baseline(&json!({"topology": "smart"}));
}
