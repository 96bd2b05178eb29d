//! Per-key async locks.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Arc, Mutex as StdMutex, PoisonError};

use tokio::sync::{Mutex, OwnedMutexGuard};

type LockMap<K> = Arc<StdMutex<HashMap<K, Arc<Mutex<()>>>>>;

/// Hands out one mutex per key. Holders of the same key run in arrival
/// order; distinct keys never contend beyond the map lookup.
///
/// An entry lives only while someone holds or waits for its lock, so the
/// map stays as large as the number of keys currently in flight.
pub struct KeyedLocks<K: Eq + Hash> {
    locks: LockMap<K>,
}

impl<K: Eq + Hash + Clone> KeyedLocks<K> {
    pub fn new() -> Self {
        Self {
            locks: Arc::new(StdMutex::new(HashMap::new())),
        }
    }

    /// Waits for the lock of `key`. Released when the guard drops.
    pub async fn lock(&self, key: &K) -> KeyedGuard<K> {
        let entry = {
            let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
            locks.entry(key.clone()).or_default().clone()
        };
        let guard = entry.clone().lock_owned().await;

        KeyedGuard {
            key: key.clone(),
            entry,
            guard: Some(guard),
            locks: self.locks.clone(),
        }
    }

    /// Keys currently held or awaited.
    pub fn len(&self) -> usize {
        self.locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<K: Eq + Hash + Clone> Default for KeyedLocks<K> {
    fn default() -> Self {
        Self::new()
    }
}

/// Holds one key's lock; drops the map entry when nobody else wants it.
pub struct KeyedGuard<K: Eq + Hash> {
    key: K,
    entry: Arc<Mutex<()>>,
    guard: Option<OwnedMutexGuard<()>>,
    locks: LockMap<K>,
}

impl<K: Eq + Hash> Drop for KeyedGuard<K> {
    fn drop(&mut self) {
        self.guard.take();
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        // Clones are only handed out under the map lock: the map and this
        // guard are the last two references when nobody is waiting.
        if Arc::strong_count(&self.entry) == 2 {
            locks.remove(&self.key);
        }
    }
}
