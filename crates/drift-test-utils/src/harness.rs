//! [`CycleHarness`], a per-surface reconciliation cycle driver.

use drift_core::{Diagnostics, DriftEntry, SurfaceCodec, reconcile_surface};
use serde_json::Value;

use crate::store::{FakeRemoteStore, StoreKey};

/// Drives repeated reconciliation passes for one surface, standing in for
/// the caller's scheduling loop and durable state store.
///
/// The harness holds the persisted baseline and managed set between passes
/// and replaces both together after every pass, the transactional pairing
/// the engine requires of real callers.
///
/// # Example
///
/// ```
/// use drift_test_utils::{CycleHarness, FakeRemoteStore, StoreKey};
/// use drift_value::FlatCodec;
/// use serde_json::json;
///
/// let mut store = FakeRemoteStore::new();
/// let key = StoreKey::new("zone-7", "settings");
/// store.put(key.clone(), json!({"mode": "strict"}));
///
/// let mut harness = CycleHarness::new(FlatCodec::new(), key);
/// harness.adopt_baseline(&store);
/// harness.declare(json!({"mode": "strict"}));
///
/// let outcome = harness.run_cycle(&store);
/// assert!(outcome.drift.is_empty());
/// ```
pub struct CycleHarness<C: SurfaceCodec> {
    codec: C,
    key: StoreKey,
    baseline: Option<Value>,
    managed: Option<Value>,
}

/// What one pass produced, before persistence.
pub struct CycleOutcome<V> {
    /// Externally caused changes detected by the pass.
    pub drift: Vec<DriftEntry<V>>,
    /// Decode issues found across the three inputs.
    pub diagnostics: Diagnostics,
}

impl<C: SurfaceCodec> CycleHarness<C> {
    /// Start a harness with nothing persisted yet.
    pub fn new(codec: C, key: StoreKey) -> Self {
        Self {
            codec,
            key,
            baseline: None,
            managed: None,
        }
    }

    /// Record the consumer's declared managed set, as the declaration
    /// surface would.
    pub fn declare(&mut self, managed: Value) {
        self.managed = Some(managed);
    }

    /// Seed the baseline from the remote's current report, as a caller does
    /// right after creating the resource.
    pub fn adopt_baseline(&mut self, store: &FakeRemoteStore) {
        self.baseline = store.get(&self.key);
    }

    /// Run one reconciliation pass: fetch live, reconcile, persist both
    /// outputs together.
    pub fn run_cycle(&mut self, store: &FakeRemoteStore) -> CycleOutcome<C::Value> {
        let live = store.get(&self.key);
        let pass = reconcile_surface(
            &self.codec,
            live.as_ref(),
            self.baseline.as_ref(),
            self.managed.as_ref(),
        );

        self.baseline = pass.new_baseline;
        self.managed = pass.new_managed;

        CycleOutcome {
            drift: pass.drift,
            diagnostics: pass.diagnostics,
        }
    }

    /// The persisted baseline after the last pass.
    pub fn baseline(&self) -> Option<&Value> {
        self.baseline.as_ref()
    }

    /// The persisted managed set after the last pass.
    pub fn managed(&self) -> Option<&Value> {
        self.managed.as_ref()
    }

    /// Assert that the persisted managed set equals `expected`.
    ///
    /// # Panics
    /// Panics with a descriptive message when nothing is persisted or the
    /// value differs.
    pub fn assert_managed(&self, expected: &Value) {
        match &self.managed {
            Some(current) => assert_eq!(current, expected, "persisted managed set differs"),
            None => panic!("no managed set persisted, expected {}", expected),
        }
    }

    /// Assert that the persisted baseline equals `expected`.
    ///
    /// # Panics
    /// Panics with a descriptive message when nothing is persisted or the
    /// value differs.
    pub fn assert_baseline(&self, expected: &Value) {
        match &self.baseline {
            Some(current) => assert_eq!(current, expected, "persisted baseline differs"),
            None => panic!("no baseline persisted, expected {}", expected),
        }
    }
}
