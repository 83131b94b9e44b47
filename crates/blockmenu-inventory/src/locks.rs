//! Per-owner mutual exclusion for read-modify-write sequences.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// One lock per owner name, created on demand and dropped when unused.
#[derive(Default)]
pub struct OwnerLocks {
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

/// Drops the owner's map entry once nobody else holds or waits on it.
/// Runs on unwind too, so a panicking closure does not leak the entry.
struct Release<'a> {
    locks: &'a OwnerLocks,
    owner: &'a str,
    lock: Arc<Mutex<()>>,
}

impl Drop for Release<'_> {
    fn drop(&mut self) {
        // Clones are only taken under the map lock, so a count of 2 (map + ours)
        // means nobody else is waiting on this owner.
        let mut locks = self.locks.map();
        if Arc::strong_count(&self.lock) == 2 {
            locks.remove(self.owner);
        }
    }
}

impl OwnerLocks {
    pub fn new() -> Self {
        Self::default()
    }

    // The map and the per-owner `()` carry no invariant a panic could break,
    // so poisoning is ignored.
    fn map(&self) -> MutexGuard<'_, HashMap<String, Arc<Mutex<()>>>> {
        self.locks.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run `f` while holding the lock for `owner`.
    pub fn with_lock<T>(&self, owner: &str, f: impl FnOnce() -> T) -> T {
        let lock = Arc::clone(self.map().entry(owner.to_string()).or_default());
        let release = Release {
            locks: self,
            owner,
            lock,
        };
        let _guard = release.lock.lock().unwrap_or_else(PoisonError::into_inner);
        f()
    }

    /// Number of owners with a live lock.
    pub fn len(&self) -> usize {
        self.map().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
