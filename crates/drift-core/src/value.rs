//! Value-domain abstraction for reconciliation
//!
//! The engine is generic over the value type stored in a surface. A value
//! domain supplies structural equality through `PartialEq` and tells the
//! engine which values are concrete; drift is only ever concluded between
//! two fully concrete values.

/// A value that can participate in three-way reconciliation
pub trait ReconcileValue: Clone + PartialEq {
    /// Whether this value is fully determined
    ///
    /// Placeholder values awaiting remote computation report `false` and
    /// never conclude drift, not even against an identical placeholder.
    /// Container values report `false` when any nested value is a
    /// placeholder.
    fn is_concrete(&self) -> bool;

    /// Whether `self`, observed live, has drifted from the recorded
    /// `baseline` value: both sides concrete and structurally unequal
    fn drifted_from(&self, baseline: &Self) -> bool {
        self.is_concrete() && baseline.is_concrete() && self != baseline
    }
}

/// Uniform string surfaces; every value is concrete
impl ReconcileValue for String {
    fn is_concrete(&self) -> bool {
        true
    }
}
