//! Mutex-guarded lazy initialization (the thread-safe policy).
//!
//! One `std::sync::Mutex` scopes both the "already constructed" check and the
//! construction/publication step, so concurrent first calls serialize: the
//! first lock holder constructs, every later holder observes the filled slot
//! and skips construction.  The lock is released on every exit path (normal
//! return, error return, or panic), so a failed construction never leaves
//! other callers blocked forever.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::errors::Result;
use crate::gate::{GateState, InitGate};

/// A gate that serializes the whole check-and-create sequence behind a mutex.
///
/// Guarantees: for any number of concurrent first calls, exactly one
/// construction occurs, and every caller receives a handle to the same
/// instance.  Callers that arrive while construction is in progress block
/// (unbounded, no timeout) until the lock is released, then re-check state.
///
/// `new` is `const`, so a `LockedGate` can back a `static` directly.
///
/// # Example
/// ```
/// use og_core::LockedGate;
///
/// static GATE: LockedGate<String> = LockedGate::new();
///
/// let first = GATE.get_or_init(|| String::from("first"));
/// let second = GATE.get_or_init(|| String::from("ignored"));
/// assert!(std::sync::Arc::ptr_eq(&first, &second));
/// assert_eq!(&*second, "first");
/// ```
pub struct LockedGate<T> {
    slot: Mutex<Option<Arc<T>>>,
}

impl<T> LockedGate<T> {
    /// Create an uninitialized gate.
    pub const fn new() -> Self {
        Self {
            slot: Mutex::new(None),
        }
    }

    /// Return the shared instance, constructing it with `init` if this call
    /// wins the gate.
    ///
    /// Arguments captured by `init` are honored only on the winning call;
    /// every later call discards its closure unexecuted.
    pub fn get_or_init<F>(&self, init: F) -> Arc<T>
    where
        F: FnOnce() -> T,
    {
        let mut slot = self.lock_slot();
        if let Some(existing) = slot.as_ref() {
            return existing.clone();
        }
        let value = Arc::new(init());
        *slot = Some(value.clone());
        value
    }

    /// Fallible form of [`get_or_init`][Self::get_or_init].
    ///
    /// If `init` fails, the error propagates to this caller, the lock is
    /// released, and the gate stays uninitialized so a later call may retry.
    ///
    /// # Example
    /// ```
    /// use og_core::{fail, LockedGate};
    ///
    /// let gate: LockedGate<String> = LockedGate::new();
    ///
    /// let attempt = gate.get_or_try_init(|| fail!("backend unreachable"));
    /// assert!(attempt.is_err());
    /// assert!(gate.get().is_none());
    ///
    /// // The gate is still open for a retry.
    /// let retry = gate.get_or_try_init(|| Ok(String::from("recovered")));
    /// assert_eq!(&*retry.unwrap(), "recovered");
    /// ```
    pub fn get_or_try_init<F>(&self, init: F) -> Result<Arc<T>>
    where
        F: FnOnce() -> Result<T>,
    {
        let mut slot = self.lock_slot();
        if let Some(existing) = slot.as_ref() {
            return Ok(existing.clone());
        }
        // On failure the `?` drops the guard with the slot still empty.
        let value = Arc::new(init()?);
        *slot = Some(value.clone());
        Ok(value)
    }

    /// Return the shared instance if it has been constructed.
    pub fn get(&self) -> Option<Arc<T>> {
        self.lock_slot().clone()
    }

    /// Report the gate's lifecycle tag.
    pub fn state(&self) -> GateState {
        if self.get().is_some() {
            GateState::Initialized
        } else {
            GateState::Uninitialized
        }
    }

    /// Lock the slot, recovering from poisoning.
    ///
    /// The slot is written only after construction succeeds, so a lock
    /// poisoned by a panicking constructor still guards a consistent (empty)
    /// slot; later callers take over and retry.
    fn lock_slot(&self) -> MutexGuard<'_, Option<Arc<T>>> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T> InitGate<T> for LockedGate<T> {
    fn get_or_init<F>(&self, init: F) -> Arc<T>
    where
        F: FnOnce() -> T,
    {
        LockedGate::get_or_init(self, init)
    }

    fn get(&self) -> Option<Arc<T>> {
        LockedGate::get(self)
    }
}

impl<T> Default for LockedGate<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for LockedGate<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LockedGate({})", self.state())
    }
}
