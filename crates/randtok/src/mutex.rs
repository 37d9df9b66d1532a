#[cfg(feature = "parking-lot")]
pub(crate) use parking_lot::{Mutex, MutexGuard};
#[cfg(not(feature = "parking-lot"))]
pub(crate) use std::sync::{Mutex, MutexGuard, PoisonError};

/// Acquires `mutex`.
///
/// A std mutex poisoned by a panicking holder is recovered: the guarded
/// values in this crate are RNG states, which stay valid after any partial
/// draw.
#[cfg(not(feature = "parking-lot"))]
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Acquires `mutex`. `parking_lot` mutexes never poison.
#[cfg(feature = "parking-lot")]
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock()
}
