//! Shared test utilities for the drift-reconciler workspace.
//!
//! This crate provides in-process stand-ins for the engine's external
//! collaborators so crate and workspace test suites do not each duplicate
//! them. It is a dev-dependency only and never published.
//!
//! # Modules
//!
//! - [`store`] — [`FakeRemoteStore`], the remote-state fetcher fake
//! - [`harness`] — [`CycleHarness`], the per-surface cycle driver

pub mod harness;
pub mod store;

pub use harness::{CycleHarness, CycleOutcome};
pub use store::{FakeRemoteStore, StoreKey};
