//! Three-way reconciliation of one configuration surface

use serde::{Deserialize, Serialize};

use crate::snapshot::SettingsMap;
use crate::value::ReconcileValue;

/// Evidence of one externally caused change detected during a pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriftEntry<V> {
    /// The setting key that changed
    pub key: String,
    /// The value the baseline had recorded for this key
    pub baseline: V,
    /// The value observed live for this key
    pub live: V,
    /// True when detection pulled a previously undeclared key into the
    /// managed set
    pub promoted: bool,
}

/// Outcome of one reconciliation pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reconciliation<V> {
    /// Refreshed defaults snapshot; `None` iff the baseline input was unset
    pub new_baseline: Option<SettingsMap<V>>,
    /// Updated managed set; `None` iff the managed input was unset and no
    /// key was promoted
    pub new_managed: Option<SettingsMap<V>>,
    /// Externally caused changes detected this pass, in key order
    pub drift: Vec<DriftEntry<V>>,
}

impl<V> Reconciliation<V> {
    /// True when no externally caused change was detected
    pub fn is_clean(&self) -> bool {
        self.drift.is_empty()
    }
}

/// Reconcile one configuration surface.
///
/// `live` is the remote authority's current mapping, `baseline` the defaults
/// snapshot recorded by the previous pass, and `managed` the locally declared
/// subset. `None` means the whole mapping is unset, which is distinct from
/// present-but-empty; an unset input participates as empty.
///
/// Key-set guarantees: the new baseline covers exactly the keys of
/// `baseline`, and the new managed set covers the keys of `managed` plus
/// every key that drifted this pass. No key is ever dropped.
pub fn reconcile<V: ReconcileValue>(
    live: Option<&SettingsMap<V>>,
    baseline: Option<&SettingsMap<V>>,
    managed: Option<&SettingsMap<V>>,
) -> Reconciliation<V> {
    let empty = SettingsMap::new();
    let live_map = live.unwrap_or(&empty);
    let baseline_map = baseline.unwrap_or(&empty);
    let managed_map = managed.unwrap_or(&empty);

    let mut baseline_out = baseline_map.clone();
    let mut managed_out = managed_map.clone();
    let mut drift = Vec::new();

    // 1) Sync pass: every declared key the live snapshot covers takes the
    //    live value, changed or not. Placeholders copy through as-is.
    for (key, live_value) in live_map {
        if let Some(current) = managed_out.get_mut(key) {
            *current = live_value.clone();
        }
    }

    // 2) Drift pass: walk the recorded defaults against the live snapshot.
    for (key, baseline_value) in baseline_map {
        let Some(live_value) = live_map.get(key) else {
            // No longer reported live: the baseline keeps its last known
            // value. Disappearance is not deletion.
            continue;
        };

        if live_value.drifted_from(baseline_value) {
            let promoted = !managed_map.contains_key(key);
            tracing::debug!(key = %key, promoted, "Externally changed setting detected");
            managed_out.insert(key.clone(), live_value.clone());
            drift.push(DriftEntry {
                key: key.clone(),
                baseline: baseline_value.clone(),
                live: live_value.clone(),
                promoted,
            });
        }

        // The baseline tracks whatever was last observed, drifted or not.
        baseline_out.insert(key.clone(), live_value.clone());
    }

    // 3) Declared keys absent from both live and baseline are already in
    //    `managed_out`, untouched.

    let promoted_any = drift.iter().any(|entry| entry.promoted);
    Reconciliation {
        new_baseline: baseline.is_some().then_some(baseline_out),
        new_managed: (managed.is_some() || promoted_any).then_some(managed_out),
        drift,
    }
}
