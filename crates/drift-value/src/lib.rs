//! Value-domain codecs for the drift reconciler
//!
//! Two realizations of the wire boundary: [`FlatCodec`] for uniform
//! string-valued surfaces and [`StructuredCodec`] for heterogeneously typed
//! surfaces with nested mappings and a "not yet determined" placeholder.

pub mod flat;
pub mod structured;

pub use flat::FlatCodec;
pub use structured::{Scalar, SettingValue, StructuredCodec};
