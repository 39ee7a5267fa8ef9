//! Deferred initialization via `std::sync::OnceLock` (the implicit policy).
//!
//! `OnceLock` already guarantees at-most-once, order-safe initialization on
//! first use, so no lock object appears in this gate's API.  The observable
//! contract is the same as [`LockedGate`][crate::LockedGate]'s for
//! constructors that cannot fail; when construction can fail and needs to be
//! retried, use `LockedGate` instead.
//!
//! For statics whose construction is infallible there is also the
//! [`lazy_global!`][crate::lazy_global] macro, which declares a
//! `std::sync::LazyLock` directly.

use std::fmt;
use std::sync::{Arc, OnceLock};

use crate::gate::{GateState, InitGate};

/// A gate that delegates its at-most-once guarantee to `OnceLock`.
///
/// # Example
/// ```
/// use og_core::DeferredGate;
///
/// static GATE: DeferredGate<Vec<u8>> = DeferredGate::new();
///
/// let first = GATE.get_or_init(|| vec![1, 2, 3]);
/// let second = GATE.get_or_init(Vec::new);
/// assert!(std::sync::Arc::ptr_eq(&first, &second));
/// ```
pub struct DeferredGate<T> {
    slot: OnceLock<Arc<T>>,
}

impl<T> DeferredGate<T> {
    /// Create an uninitialized gate.
    pub const fn new() -> Self {
        Self {
            slot: OnceLock::new(),
        }
    }

    /// Return the shared instance, constructing it with `init` if this call
    /// wins the gate.
    ///
    /// `OnceLock` runs `init` at most once across all threads; callers that
    /// arrive during construction block until it completes.
    pub fn get_or_init<F>(&self, init: F) -> Arc<T>
    where
        F: FnOnce() -> T,
    {
        self.slot.get_or_init(|| Arc::new(init())).clone()
    }

    /// Return the shared instance if it has been constructed.
    pub fn get(&self) -> Option<Arc<T>> {
        self.slot.get().cloned()
    }

    /// Report the gate's lifecycle tag.
    pub fn state(&self) -> GateState {
        if self.get().is_some() {
            GateState::Initialized
        } else {
            GateState::Uninitialized
        }
    }
}

impl<T> InitGate<T> for DeferredGate<T> {
    fn get_or_init<F>(&self, init: F) -> Arc<T>
    where
        F: FnOnce() -> T,
    {
        DeferredGate::get_or_init(self, init)
    }

    fn get(&self) -> Option<Arc<T>> {
        DeferredGate::get(self)
    }
}

impl<T> Default for DeferredGate<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for DeferredGate<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DeferredGate({})", self.state())
    }
}

/// Declare a lazily-initialized process-wide static backed by
/// `std::sync::LazyLock`.
///
/// The static is initialized on first access, at most once, with the
/// language-level thread-safety guarantees of `LazyLock`.  Use it for values
/// whose construction cannot fail.
///
/// # Example
/// ```
/// use og_core::lazy_global;
///
/// lazy_global! {
///     /// Application-wide defaults.
///     static DEFAULTS: Vec<u32> = vec![1, 2, 3];
/// }
///
/// assert_eq!(DEFAULTS.len(), 3);
/// ```
#[macro_export]
macro_rules! lazy_global {
    ($(#[$meta:meta])* $vis:vis static $name:ident: $ty:ty = $init:expr;) => {
        $(#[$meta])*
        $vis static $name: ::std::sync::LazyLock<$ty> =
            ::std::sync::LazyLock::new(|| $init);
    };
}
