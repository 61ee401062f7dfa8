//! Client-scoped key-value storage.
//!
//! DESIGN
//! ======
//! Every browser client owns one namespace in a shared `KeyValueStore`
//! backend. Handlers never touch the backend directly: they receive a
//! `ClientStore` opened for their client's namespace, which prefixes every
//! key and can tear the whole namespace down with `clear`.
//!
//! Values are JSON strings, mirroring how the portal historically kept its
//! session and application draft in browser storage.

pub mod memory;

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::error;

pub use memory::MemoryStore;

/// Well-known keys inside a client namespace.
pub mod keys {
    pub const TOKEN: &str = "token";
    pub const USER: &str = "user";
    pub const ADMIN_TOKEN: &str = "adminToken";
    pub const ADMIN_USER: &str = "adminUser";
    pub const APPLICATION_DATA: &str = "applicationData";
}

pub(crate) const NAMESPACE_SEPARATOR: char = ':';

// =============================================================================
// ERROR TYPE
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("storage quota exceeded ({used} of {quota} bytes)")]
    QuotaExceeded { used: usize, quota: usize },
}

// =============================================================================
// BACKEND TRAIT
// =============================================================================

/// Raw string storage shared by all client namespaces.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&self, key: &str, value: String) -> Result<(), StoreError>;

    fn remove(&self, key: &str);

    /// Every stored key starting with `prefix`.
    fn keys_with_prefix(&self, prefix: &str) -> Vec<String>;
}

// =============================================================================
// CLIENT STORE
// =============================================================================

/// A handle onto a single client's namespace.
#[derive(Clone)]
pub struct ClientStore {
    backend: Arc<dyn KeyValueStore>,
    namespace: String,
}

impl std::fmt::Debug for ClientStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientStore").field("namespace", &self.namespace).finish()
    }
}

impl ClientStore {
    /// Open the namespace `namespace` on `backend`.
    #[must_use]
    pub fn open(backend: Arc<dyn KeyValueStore>, namespace: impl Into<String>) -> Self {
        Self { backend, namespace: namespace.into() }
    }

    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    fn scoped(&self, key: &str) -> String {
        format!("{}{NAMESPACE_SEPARATOR}{key}", self.namespace)
    }

    #[must_use]
    pub fn get_raw(&self, key: &str) -> Option<String> {
        self.backend.get(&self.scoped(key))
    }

    pub fn set_raw(&self, key: &str, value: impl Into<String>) -> Result<(), StoreError> {
        self.backend.set(&self.scoped(key), value.into())
    }

    pub fn remove(&self, key: &str) {
        self.backend.remove(&self.scoped(key));
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.get_raw(key).is_some()
    }

    /// Serialize `value` as JSON under `key`.
    pub fn set_json<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let raw = serde_json::to_string(value)?;
        self.set_raw(key, raw)
    }

    /// Read and parse `key`, distinguishing "absent" from "malformed".
    pub fn try_get_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        match self.get_raw(key) {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    /// Read and parse `key`. Malformed values are logged and read as absent.
    #[must_use]
    pub fn get_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.try_get_json(key).unwrap_or_else(|e| {
            error!(namespace = %self.namespace, key, error = %e, "discarding unreadable stored value");
            None
        })
    }

    /// Remove every key in this namespace.
    pub fn clear(&self) {
        let prefix = self.scoped("");
        for key in self.backend.keys_with_prefix(&prefix) {
            self.backend.remove(&key);
        }
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
