//! Three-way reconciliation for remotely managed configuration surfaces
//!
//! A remote authority owns the full set of effective settings for a
//! resource; a local consumer declares the subset it wants to control. Each
//! pass merges three mappings:
//!
//! - **live**: the authority's currently effective settings
//! - **baseline**: the defaults snapshot recorded by the previous pass
//! - **managed**: the consumer's declared subset
//!
//! and produces a refreshed baseline, an updated managed set, and evidence
//! for every externally caused change. A setting changed outside the
//! consumer's control is promoted into the managed set so the consumer sees
//! the drift and keeps tracking the key from then on.
//!
//! The engine is pure: no I/O, no retries, no state across passes. Callers
//! fetch the live snapshot, persist the two outputs atomically together,
//! and serialize passes per resource.
//!
//! # Example
//!
//! ```
//! use drift_core::{SettingsMap, reconcile};
//!
//! let live: SettingsMap<String> =
//!     [("retention".to_string(), "30d".to_string())].into();
//! let baseline: SettingsMap<String> =
//!     [("retention".to_string(), "7d".to_string())].into();
//!
//! let outcome = reconcile(Some(&live), Some(&baseline), None);
//! assert_eq!(outcome.drift.len(), 1);
//! assert!(outcome.drift[0].promoted);
//! ```

pub mod codec;
pub mod engine;
pub mod error;
pub mod snapshot;
pub mod value;

pub use codec::{SurfaceCodec, SurfaceReconciliation, reconcile_surface};
pub use engine::{DriftEntry, Reconciliation, reconcile};
pub use error::{DecodeIssue, Diagnostics, Error, Result};
pub use snapshot::{InputRole, SettingsMap};
pub use value::ReconcileValue;
