//! Unsynchronized lazy initialization (the naive policy).
//!
//! `RacyGate` checks its "already constructed" flag with **no mutual
//! exclusion** around the check-and-create sequence.  Two threads can both
//! observe the flag unset, both construct, and each return its own instance;
//! the later publication then overwrites the earlier one for subsequent
//! readers.  That is the classic naive-singleton race, reproduced here on
//! purpose: this gate exists as a negative example and as the fixture for
//! the race-observability tests.
//!
//! **Only correct under single-threaded first access.**  Where concurrent
//! first access is possible, use [`LockedGate`][crate::LockedGate] or
//! [`DeferredGate`][crate::DeferredGate] instead.
//!
//! The slot itself sits behind a mutex, so the race mis-creates instances
//! but never corrupts memory.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use crate::gate::{GateState, InitGate};

/// A gate whose check-and-create sequence is not mutually excluded.
#[derive(Debug)]
pub struct RacyGate<T> {
    constructed: AtomicBool,
    slot: Mutex<Option<Arc<T>>>,
}

impl<T> RacyGate<T> {
    /// Create an uninitialized gate.
    pub const fn new() -> Self {
        Self {
            constructed: AtomicBool::new(false),
            slot: Mutex::new(None),
        }
    }

    /// Return the shared instance, constructing it if the flag is unset.
    ///
    /// Every caller that passes the unset check constructs and returns its
    /// own instance; which of those instances later readers observe depends
    /// on write order.
    pub fn get_or_init<F>(&self, init: F) -> Arc<T>
    where
        F: FnOnce() -> T,
    {
        if self.constructed.load(Ordering::Acquire) {
            if let Some(existing) = self.get() {
                return existing;
            }
        }
        // Any caller that reaches this point before the flag is published
        // constructs independently.
        let value = Arc::new(init());
        *self.slot.lock().expect("slot mutex poisoned") = Some(value.clone());
        self.constructed.store(true, Ordering::Release);
        value
    }

    /// Return the most recently published instance, if any.
    pub fn get(&self) -> Option<Arc<T>> {
        self.slot.lock().expect("slot mutex poisoned").clone()
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

impl<T> InitGate<T> for RacyGate<T> {
    fn get_or_init<F>(&self, init: F) -> Arc<T>
    where
        F: FnOnce() -> T,
    {
        RacyGate::get_or_init(self, init)
    }

    fn get(&self) -> Option<Arc<T>> {
        RacyGate::get(self)
    }
}

impl<T> Default for RacyGate<T> {
    fn default() -> Self {
        Self::new()
    }
}
