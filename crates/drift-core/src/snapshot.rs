//! Surface mappings and input roles
//!
//! A configuration surface is a flat mapping from setting key to value.
//! Surfaces are `BTreeMap`s so iteration is deterministic and reconciliation
//! output never depends on hash order.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// One flat configuration surface: setting key to value
pub type SettingsMap<V> = BTreeMap<String, V>;

/// Which of the three reconciliation inputs a value came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputRole {
    /// The remote authority's currently effective settings
    Live,
    /// The defaults snapshot recorded by the previous pass
    Baseline,
    /// The locally declared managed subset
    Managed,
}

impl fmt::Display for InputRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputRole::Live => write!(f, "live"),
            InputRole::Baseline => write!(f, "baseline"),
            InputRole::Managed => write!(f, "managed"),
        }
    }
}
