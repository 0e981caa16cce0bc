//! Nullable store: thread-safe in-memory storage for testing.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use redeem_store::{KeyValueStore, StoreError};

/// An in-memory key/value store for testing.
///
/// Writes can be made to fail, to exercise quota-exceeded paths.
pub struct NullKvStore {
    entries: Mutex<HashMap<String, String>>,
    fail_writes: AtomicBool,
    failing_keys: Mutex<HashSet<String>>,
}

impl NullKvStore {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            fail_writes: AtomicBool::new(false),
            failing_keys: Mutex::new(HashSet::new()),
        }
    }

    /// Make every subsequent `set` fail with [`StoreError::Full`].
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Make writes to `key` alone fail with [`StoreError::Full`].
    pub fn fail_writes_to(&self, key: &str) {
        self.failing_keys.lock().unwrap().insert(key.to_string());
    }

    /// Write directly, bypassing the failure switch.
    pub fn seed(&self, key: &str, value: &str) {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().unwrap().is_empty()
    }
}

impl Default for NullKvStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyValueStore for NullKvStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.lock().unwrap().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let refused = self.fail_writes.load(Ordering::SeqCst)
            || self.failing_keys.lock().unwrap().contains(key);
        if refused {
            return Err(StoreError::Full(format!("refusing write to {key}")));
        }
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.entries.lock().unwrap().remove(key);
        Ok(())
    }
}
