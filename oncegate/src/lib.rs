//! # oncegate
//!
//! At-most-once lazy initialization gates for process-wide shared state.
//!
//! This crate is a **façade** that re-exports the public items of the
//! underlying workspace crates.  Application code should depend on this
//! crate rather than on `og-core` directly.
//!
//! ## Quick start
//!
//! ```toml
//! [dependencies]
//! oncegate = "0.1"
//! ```
//!
//! ```rust
//! use oncegate::LockedGate;
//!
//! static GATE: LockedGate<String> = LockedGate::new();
//!
//! let value = GATE.get_or_init(|| String::from("shared"));
//! assert_eq!(&*value, "shared");
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Gate types, the slot registry, and error definitions.
pub use og_core as core;

pub use og_core::{
    DeferredGate, Error, GateState, InitGate, LockedGate, RacyGate, Registry, Result,
};
pub use og_core::{ensure, fail, lazy_global};
