//! Lock poisoning helpers
//!
//! The registry, the extension sets and the rewindable writer all guard their
//! state with std locks. These helpers turn a poisoned lock into the caller's
//! own error type so that a panic on one thread surfaces as a regular error on
//! the next caller instead of a second panic.

use std::sync::{LockResult, MutexGuard, RwLockReadGuard, RwLockWriteGuard};

/// Convert a poisoned `Mutex::lock` result into a domain error
///
/// # Examples
/// ```
/// use std::sync::Mutex;
/// use orgfolder::core::sync::handle_mutex_poison;
///
/// let state = Mutex::new(0u8);
/// let guard = handle_mutex_poison(state.lock(), |message| message).unwrap();
/// assert_eq!(*guard, 0);
/// ```
pub fn handle_mutex_poison<'a, T, E>(
    result: LockResult<MutexGuard<'a, T>>,
    error_constructor: impl FnOnce(String) -> E,
) -> Result<MutexGuard<'a, T>, E> {
    result.map_err(|poison_err| {
        error_constructor(format!(
            "Internal synchronisation error (mutex poisoned). A panic occurred while holding the lock: {}",
            poison_err
        ))
    })
}

/// Convert a poisoned `RwLock::read` result into a domain error
pub fn handle_rwlock_read<'a, T, E>(
    result: LockResult<RwLockReadGuard<'a, T>>,
    error_constructor: impl FnOnce(String) -> E,
) -> Result<RwLockReadGuard<'a, T>, E> {
    result.map_err(|poison_err| {
        error_constructor(format!(
            "Internal synchronisation error (RwLock read poisoned). A writer panicked while holding the lock: {}",
            poison_err
        ))
    })
}

/// Convert a poisoned `RwLock::write` result into a domain error
pub fn handle_rwlock_write<'a, T, E>(
    result: LockResult<RwLockWriteGuard<'a, T>>,
    error_constructor: impl FnOnce(String) -> E,
) -> Result<RwLockWriteGuard<'a, T>, E> {
    result.map_err(|poison_err| {
        error_constructor(format!(
            "Internal synchronisation error (RwLock write poisoned). A panic occurred while holding the lock: {}",
            poison_err
        ))
    })
}
