//! Lock primitives, switchable to `parking_lot` with the `parking-lot` feature.

#[cfg(feature = "parking-lot")]
pub(crate) use parking_lot::{Mutex, MutexGuard, RwLock, RwLockReadGuard, RwLockWriteGuard};

#[cfg(not(feature = "parking-lot"))]
pub(crate) use std::sync::{Mutex, MutexGuard, RwLock, RwLockReadGuard, RwLockWriteGuard};

// Poisoned locks are recovered: no guarded structure is left half-updated by
// a panicking factory.

#[inline]
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    #[cfg(feature = "parking-lot")]
    {
        mutex.lock()
    }
    #[cfg(not(feature = "parking-lot"))]
    {
        mutex.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

#[inline]
pub(crate) fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    #[cfg(feature = "parking-lot")]
    {
        lock.read()
    }
    #[cfg(not(feature = "parking-lot"))]
    {
        lock.read().unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

#[inline]
pub(crate) fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    #[cfg(feature = "parking-lot")]
    {
        lock.write()
    }
    #[cfg(not(feature = "parking-lot"))]
    {
        lock.write().unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}
