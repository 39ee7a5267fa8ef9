//! Initialization gates.
//!
//! A gate guards one lazily-created shared instance: the first call through
//! the gate constructs the instance, every later call returns a handle to the
//! same one, and construction arguments supplied after the first successful
//! call are discarded.  Handles are `Arc<T>`, so "same instance" is
//! observable as [`Arc::ptr_eq`] identity.
//!
//! Three policies are provided:
//!
//! * [`RacyGate`]: unsynchronized check-then-create.  **Broken under
//!   concurrent first access**; kept as a negative example and test fixture.
//! * [`LockedGate`]: one mutex scopes the whole check-and-create sequence.
//!   Safe for any number of concurrent first calls, and the only policy that
//!   supports fallible construction with retry.
//! * [`DeferredGate`]: delegates the at-most-once guarantee to
//!   `std::sync::OnceLock`; no lock object appears in the API.

pub mod deferred;
pub mod locked;
pub mod racy;

pub use deferred::DeferredGate;
pub use locked::LockedGate;
pub use racy::RacyGate;

use std::fmt;
use std::sync::Arc;

/// The lifecycle tag of a gate.
///
/// A gate moves from `Uninitialized` to `Initialized` exactly once, on
/// whichever call wins the construction step; there is no transition back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GateState {
    /// No construction has completed yet.
    Uninitialized,
    /// The shared instance exists; all further calls return it.
    Initialized,
}

impl GateState {
    /// Return `true` for [`GateState::Initialized`].
    pub fn is_initialized(&self) -> bool {
        matches!(self, GateState::Initialized)
    }
}

impl fmt::Display for GateState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GateState::Uninitialized => write!(f, "Uninitialized"),
            GateState::Initialized => write!(f, "Initialized"),
        }
    }
}

/// The access-point seam shared by every gate policy.
///
/// Collaborators and tests that only need "get me the instance, creating it
/// on first use" can run generically over this trait instead of naming a
/// concrete policy.
pub trait InitGate<T> {
    /// Return the shared instance, constructing it with `init` if this is
    /// the first call through the gate.
    fn get_or_init<F>(&self, init: F) -> Arc<T>
    where
        F: FnOnce() -> T;

    /// Return the shared instance if it has been constructed, without
    /// constructing it.
    fn get(&self) -> Option<Arc<T>>;

    /// Report the gate's lifecycle tag.
    fn state(&self) -> GateState {
        if self.get().is_some() {
            GateState::Initialized
        } else {
            GateState::Uninitialized
        }
    }
}
