//! Error types for oncegate.
//!
//! Construction of a shared instance happens at most once, on whichever call
//! wins the gate.  This module defines the single failure class that call can
//! surface, plus the `ensure!` / `fail!` convenience macros used inside
//! fallible constructors.

use thiserror::Error;

/// The top-level error type used throughout oncegate.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// Construction of the shared instance failed on the winning call.
    ///
    /// A gate that reported this is still uninitialized: the failing call
    /// released the lock without publishing, so any later call may retry.
    #[error("construction failed: {0}")]
    Construction(String),

    /// A registry slot was requested under a different payload type than the
    /// one it was constructed with.
    #[error("slot `{name}` holds a different type")]
    WrongType {
        /// The slot name that was requested.
        name: String,
    },
}

/// Shorthand `Result` type used throughout oncegate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Return `Err(Error::Construction(...))` from a constructor if `$cond` is
/// false.
///
/// # Example
/// ```
/// use og_core::{ensure, LockedGate};
///
/// let gate: LockedGate<String> = LockedGate::new();
/// let result = gate.get_or_try_init(|| {
///     ensure!(false, "refusing to build");
///     Ok(String::new())
/// });
/// assert!(result.is_err());
/// assert!(gate.get().is_none());
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $($msg:tt)*) => {
        if !$cond {
            return Err($crate::errors::Error::Construction(
                format!($($msg)*)
            ));
        }
    };
}

/// Return `Err(Error::Construction(...))` from a constructor immediately.
///
/// # Example
/// ```
/// use og_core::{fail, errors::Result};
///
/// fn build_connection(addr: &str) -> Result<String> {
///     if addr.is_empty() {
///         fail!("no address supplied");
///     }
///     Ok(format!("connected to {addr}"))
/// }
/// assert!(build_connection("").is_err());
/// assert!(build_connection("10.0.0.1:4000").is_ok());
/// ```
#[macro_export]
macro_rules! fail {
    ($($msg:tt)*) => {
        return Err($crate::errors::Error::Construction(format!($($msg)*)))
    };
}
