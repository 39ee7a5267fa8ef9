//! # og-core
//!
//! Gate types, the slot registry, and error definitions for oncegate.
//!
//! This crate provides the building blocks for process-wide lazy
//! initialization: the three gate policies ([`RacyGate`], [`LockedGate`],
//! [`DeferredGate`]), the [`Registry`] context object, and the error
//! hierarchy.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Public modules ───────────────────────────────────────────────────────────

/// Error types and the `ensure!` / `fail!` macros.
pub mod errors;

/// Initialization gates: racy, locked, deferred.
pub mod gate;

/// Named singleton slots owned by an explicit context object.
pub mod registry;

// ── Re-exports for convenience ────────────────────────────────────────────────

pub use errors::{Error, Result};
pub use gate::{DeferredGate, GateState, InitGate, LockedGate, RacyGate};
pub use registry::Registry;
