//! Resource-keyed read cache for client-side collections.
//!
//! The cache holds the last-known value of a query keyed by its resource
//! name. Reads are served from the cache until a writer calls
//! [`QueryCache::invalidate`], at which point the next read misses and the
//! caller re-fetches from the server. The cache is display state only and
//! is never treated as the source of truth.

use std::collections::HashMap;
use std::sync::Mutex;

/// A process-wide mapping from resource name to its last-known value.
///
/// All operations are protected by a `Mutex`, so a single cache can be
/// shared across tasks. Values are cloned out on read.
pub struct QueryCache<T> {
    entries: Mutex<HashMap<String, T>>,
}

impl<T: Clone> QueryCache<T> {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the cached value for `key`, if an entry is fresh.
    pub fn get(&self, key: &str) -> Option<T> {
        let entries = self.entries.lock().unwrap();
        entries.get(key).cloned()
    }

    /// Stores `value` under `key`, replacing any prior entry.
    pub fn put(&self, key: &str, value: T) {
        let mut entries = self.entries.lock().unwrap();
        entries.insert(key.to_string(), value);
    }

    /// Drops the entry for `key`, forcing the next read to re-fetch.
    /// Invalidating an absent key is a no-op.
    pub fn invalidate(&self, key: &str) {
        let mut entries = self.entries.lock().unwrap();
        entries.remove(key);
    }
}

impl<T: Clone> Default for QueryCache<T> {
    fn default() -> Self {
        Self::new()
    }
}
