//! Named singleton slots owned by an explicit context object.
//!
//! A [`Registry`] replaces ambient global state: collaborators receive a
//! reference to a registry instead of reaching for a process-wide static, so
//! each unit test can build its own registry (its own gate/instance pairs)
//! without sharing hidden state with other tests.
//!
//! Every slot follows the guarded policy: at most one construction per
//! name, later construction arguments discarded, failed constructions
//! leaving the slot vacant for retry.  The registry exclusively owns its
//! slots; dropping it (and any outstanding handles) releases every instance.

use std::any::Any;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::errors::{Error, Result};

type Slot = Arc<dyn Any + Send + Sync>;

/// An owned collection of named, lazily-constructed shared instances.
///
/// # Example
/// ```
/// use og_core::Registry;
///
/// let registry = Registry::new();
///
/// let first = registry
///     .get_or_init("motd", || Ok(String::from("hello")))
///     .unwrap();
/// let second = registry
///     .get_or_init("motd", || Ok(String::from("ignored")))
///     .unwrap();
///
/// assert!(std::sync::Arc::ptr_eq(&first, &second));
/// assert_eq!(&*second, "hello");
/// ```
pub struct Registry {
    slots: Mutex<HashMap<String, Slot>>,
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            slots: Mutex::new(HashMap::new()),
        }
    }

    /// Return the instance stored under `name`, constructing it with `init`
    /// if the slot is vacant.
    ///
    /// At most one construction occurs per name; calls after the first
    /// discard their closure unexecuted.  If `init` fails, the slot stays
    /// vacant and a later call may retry.  Requesting an occupied slot under
    /// a different payload type yields [`Error::WrongType`].
    ///
    /// Construction runs while the registry lock is held, so all slots share
    /// one serialization point.
    pub fn get_or_init<T, F>(&self, name: &str, init: F) -> Result<Arc<T>>
    where
        T: Send + Sync + 'static,
        F: FnOnce() -> Result<T>,
    {
        let mut slots = self.lock_slots();
        if let Some(existing) = slots.get(name) {
            return downcast(name, existing);
        }
        let value = Arc::new(init()?);
        slots.insert(name.to_owned(), value.clone());
        Ok(value)
    }

    /// Return the instance stored under `name`, if the slot is occupied with
    /// the requested type.
    pub fn get<T>(&self, name: &str) -> Option<Arc<T>>
    where
        T: Send + Sync + 'static,
    {
        let slots = self.lock_slots();
        let slot = slots.get(name)?;
        slot.clone().downcast::<T>().ok()
    }

    /// Return `true` if a slot named `name` is occupied.
    pub fn contains(&self, name: &str) -> bool {
        self.lock_slots().contains_key(name)
    }

    /// Number of occupied slots.
    pub fn len(&self) -> usize {
        self.lock_slots().len()
    }

    /// Return `true` if no slot is occupied.
    pub fn is_empty(&self) -> bool {
        self.lock_slots().is_empty()
    }

    // Slots are inserted only after construction succeeds, so a poisoned
    // lock still guards a consistent map; recover it and move on.
    fn lock_slots(&self) -> MutexGuard<'_, HashMap<String, Slot>> {
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

fn downcast<T: Send + Sync + 'static>(name: &str, slot: &Slot) -> Result<Arc<T>> {
    slot.clone().downcast::<T>().map_err(|_| Error::WrongType {
        name: name.to_owned(),
    })
}
