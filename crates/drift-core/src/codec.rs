//! Wire-level reconciliation driver
//!
//! Callers hold the three inputs as loosely typed JSON mappings. A
//! [`SurfaceCodec`] converts between that wire form and a typed surface;
//! [`reconcile_surface`] wires decoding, the engine, and re-encoding
//! together, aggregating every decode issue instead of failing fast.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::engine::{self, DriftEntry};
use crate::error::{DecodeIssue, Diagnostics};
use crate::snapshot::{InputRole, SettingsMap};
use crate::value::ReconcileValue;

/// Decodes and encodes one value domain at the JSON boundary
pub trait SurfaceCodec {
    /// The typed value this codec produces
    type Value: ReconcileValue;

    /// Decode one input mapping
    ///
    /// Implementations report every malformed entry they find, not just the
    /// first; any issue fails the whole input.
    fn decode(
        &self,
        input: InputRole,
        wire: &Value,
    ) -> Result<SettingsMap<Self::Value>, Vec<DecodeIssue>>;

    /// Encode a surface back to its wire form
    fn encode(&self, surface: &SettingsMap<Self::Value>) -> Value;
}

/// Wire-level outcome of one reconciliation pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurfaceReconciliation<V> {
    /// Refreshed defaults snapshot in wire form; `None` iff the baseline
    /// input was unset
    pub new_baseline: Option<Value>,
    /// Updated managed set in wire form; `None` iff the managed input was
    /// unset and no key was promoted
    pub new_managed: Option<Value>,
    /// Externally caused changes detected this pass, in key order
    pub drift: Vec<DriftEntry<V>>,
    /// Every decode issue found across the three inputs
    pub diagnostics: Diagnostics,
}

/// Run one reconciliation pass at the wire boundary.
///
/// Each input decodes independently. An input that fails structural decoding
/// participates as an empty mapping while every issue it produced is carried
/// in the returned diagnostics, so outputs are always produced on a
/// best-effort basis. A failed input still counts as present: its outputs do
/// not revert to unset.
pub fn reconcile_surface<C: SurfaceCodec>(
    codec: &C,
    live: Option<&Value>,
    baseline: Option<&Value>,
    managed: Option<&Value>,
) -> SurfaceReconciliation<C::Value> {
    let mut diagnostics = Diagnostics::new();

    let live_map = decode_input(codec, InputRole::Live, live, &mut diagnostics);
    let baseline_map = decode_input(codec, InputRole::Baseline, baseline, &mut diagnostics);
    let managed_map = decode_input(codec, InputRole::Managed, managed, &mut diagnostics);

    let outcome = engine::reconcile(live_map.as_ref(), baseline_map.as_ref(), managed_map.as_ref());

    tracing::debug!(
        drifted = outcome.drift.len(),
        issues = diagnostics.issues().len(),
        "Reconciliation pass complete"
    );

    SurfaceReconciliation {
        new_baseline: outcome.new_baseline.as_ref().map(|surface| codec.encode(surface)),
        new_managed: outcome.new_managed.as_ref().map(|surface| codec.encode(surface)),
        drift: outcome.drift,
        diagnostics,
    }
}

fn decode_input<C: SurfaceCodec>(
    codec: &C,
    input: InputRole,
    wire: Option<&Value>,
    diagnostics: &mut Diagnostics,
) -> Option<SettingsMap<C::Value>> {
    let wire = wire?;
    match codec.decode(input, wire) {
        Ok(surface) => Some(surface),
        Err(issues) => {
            tracing::warn!(
                input = %input,
                issues = issues.len(),
                "Input failed structural decoding, participating as empty"
            );
            diagnostics.extend(issues);
            Some(SettingsMap::new())
        }
    }
}
