//! In-memory `KeyValueStore` backend.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use super::{KeyValueStore, NAMESPACE_SEPARATOR, StoreError};

/// Browsers cap a storage origin at roughly five megabytes.
pub const DEFAULT_QUOTA_BYTES: usize = 5 * 1024 * 1024;

/// Namespace part of a scoped key. Unscoped keys share the `None` bucket.
fn namespace_of(key: &str) -> Option<&str> {
    key.split_once(NAMESPACE_SEPARATOR).map(|(ns, _)| ns)
}

pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
    quota: usize,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::with_quota(DEFAULT_QUOTA_BYTES)
    }

    /// Create a store that rejects a write once the keys plus values of the
    /// written key's namespace would exceed `quota` bytes.
    #[must_use]
    pub fn with_quota(quota: usize) -> Self {
        Self { entries: RwLock::new(HashMap::new()), quota }
    }

    /// Bytes currently held across all namespaces (keys plus values).
    #[must_use]
    pub fn used_bytes(&self) -> usize {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries.iter().map(|(k, v)| k.len() + v.len()).sum()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: String) -> Result<(), StoreError> {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);

        let namespace = namespace_of(key);
        let current: usize = entries
            .iter()
            .filter(|(k, _)| namespace_of(k) == namespace)
            .map(|(k, v)| k.len() + v.len())
            .sum();
        let replaced = entries.get(key).map_or(0, |v| key.len() + v.len());
        let used = current - replaced + key.len() + value.len();
        if used > self.quota {
            return Err(StoreError::QuotaExceeded { used, quota: self.quota });
        }

        entries.insert(key.to_owned(), value);
        Ok(())
    }

    fn remove(&self, key: &str) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
    }

    fn keys_with_prefix(&self, prefix: &str) -> Vec<String> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .filter(|k| k.starts_with(prefix))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
#[path = "memory_test.rs"]
mod tests;
