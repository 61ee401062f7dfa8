//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor.
//! It holds the key-value backend every client namespace lives in, the
//! in-progress wizards keyed by client, when each client was last seen, and
//! the fixed reviewer list.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::api_client::ApiClient;
use crate::config::Config;
use crate::lifecycle::{ClientActivity, WizardRegistry};
use crate::services::admin::{self, ApplicationRecord};
use crate::store::{ClientStore, KeyValueStore, MemoryStore};

/// Shared application state, injected into Axum handlers via State extractor.
/// Clone is required by Axum; all inner fields are Arc-wrapped or Clone.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub store: Arc<dyn KeyValueStore>,
    /// Wizards in progress: client namespace -> wizard.
    pub wizards: Arc<RwLock<WizardRegistry>>,
    pub clients: Arc<ClientActivity>,
    pub applications: Arc<Vec<ApplicationRecord>>,
    pub api: ApiClient,
}

impl AppState {
    #[must_use]
    pub fn new(config: Config, store: Arc<dyn KeyValueStore>) -> Self {
        let api = ApiClient::new(&config.api_base_url);
        let wizards = WizardRegistry::new(config.wizard_ttl);
        Self {
            config: Arc::new(config),
            store,
            wizards: Arc::new(RwLock::new(wizards)),
            clients: Arc::new(ClientActivity::default()),
            applications: Arc::new(admin::mock_applications()),
            api,
        }
    }

    /// State backed by a fresh in-memory store.
    #[must_use]
    pub fn in_memory(config: Config) -> Self {
        Self::new(config, Arc::new(MemoryStore::new()))
    }

    /// Open the namespace belonging to `client_id`.
    #[must_use]
    pub fn client_store(&self, client_id: &str) -> ClientStore {
        ClientStore::open(self.store.clone(), client_id)
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================


#[cfg(test)]
#[path = "state_test.rs"]
mod tests;
