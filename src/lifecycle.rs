//! Lifetimes of per-client server state.
//!
//! DESIGN
//! ======
//! Two things accumulate per browser: the wizard in progress and the client
//! namespace in the store. Wizards unused for `wizard_ttl` are dropped;
//! clients unseen for `client_ttl` lose both their wizard and their
//! namespace. Expired wizards are swept whenever a new one is created, and a
//! background task sweeps idle clients every `sweep_interval`.
//!
//! Time-dependent methods have an `_at` variant taking an explicit `Instant`
//! so tests never sleep.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::services::wizard::Wizard;
use crate::state::AppState;

fn is_expired(touched: Instant, now: Instant, ttl: Duration) -> bool {
    now.saturating_duration_since(touched) >= ttl
}

// =============================================================================
// WIZARD REGISTRY
// =============================================================================

struct WizardEntry {
    wizard: Wizard,
    touched: Instant,
}

/// In-progress wizards keyed by client id, each expiring after `ttl` unused.
pub struct WizardRegistry {
    ttl: Duration,
    entries: HashMap<String, WizardEntry>,
}

impl WizardRegistry {
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self { ttl, entries: HashMap::new() }
    }

    /// The client's wizard, created with `make` when absent or expired.
    pub fn get_or_insert_with(&mut self, id: &str, make: impl FnOnce() -> Wizard) -> &mut Wizard {
        self.get_or_insert_with_at(id, Instant::now(), make)
    }

    pub(crate) fn get_or_insert_with_at(
        &mut self,
        id: &str,
        now: Instant,
        make: impl FnOnce() -> Wizard,
    ) -> &mut Wizard {
        let ttl = self.ttl;
        let live = self.entries.get(id).is_some_and(|e| !is_expired(e.touched, now, ttl));
        if !live {
            // Also drops this client's expired wizard, if any.
            self.sweep_at(now);
        }
        let entry = self
            .entries
            .entry(id.to_owned())
            .or_insert_with(|| WizardEntry { wizard: make(), touched: now });
        entry.touched = now;
        &mut entry.wizard
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Wizard> {
        self.entries.get(id).map(|e| &e.wizard)
    }

    pub fn remove(&mut self, id: &str) -> Option<Wizard> {
        self.entries.remove(id).map(|e| e.wizard)
    }

    #[must_use]
    pub fn contains_key(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop wizards unused for `ttl`. Returns how many were dropped.
    pub fn sweep_at(&mut self, now: Instant) -> usize {
        let before = self.entries.len();
        let ttl = self.ttl;
        self.entries.retain(|_, e| !is_expired(e.touched, now, ttl));
        let dropped = before - self.entries.len();
        if dropped > 0 {
            debug!(dropped, "expired idle wizards");
        }
        dropped
    }
}

// =============================================================================
// CLIENT ACTIVITY
// =============================================================================

/// Last time each client id was seen on a request.
#[derive(Default)]
pub struct ClientActivity {
    last_seen: Mutex<HashMap<String, Instant>>,
}

impl ClientActivity {
    pub fn touch(&self, id: &str) {
        self.touch_at(id, Instant::now());
    }

    pub(crate) fn touch_at(&self, id: &str, now: Instant) {
        let mut last_seen = self.last_seen.lock().unwrap_or_else(PoisonError::into_inner);
        last_seen.insert(id.to_owned(), now);
    }

    /// Stop tracking `id`.
    pub fn forget(&self, id: &str) {
        let mut last_seen = self.last_seen.lock().unwrap_or_else(PoisonError::into_inner);
        last_seen.remove(id);
    }

    #[must_use]
    pub fn is_tracked(&self, id: &str) -> bool {
        let last_seen = self.last_seen.lock().unwrap_or_else(PoisonError::into_inner);
        last_seen.contains_key(id)
    }

    /// Remove and return every client unseen for `ttl`.
    pub fn take_idle_at(&self, now: Instant, ttl: Duration) -> Vec<String> {
        let mut last_seen = self.last_seen.lock().unwrap_or_else(PoisonError::into_inner);
        let idle: Vec<String> = last_seen
            .iter()
            .filter(|(_, seen)| is_expired(**seen, now, ttl))
            .map(|(id, _)| id.clone())
            .collect();
        for id in &idle {
            last_seen.remove(id);
        }
        idle
    }
}

// =============================================================================
// SWEEPER
// =============================================================================

/// What one sweep removed.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SweepReport {
    pub clients: usize,
    pub wizards: usize,
}

/// Forget one client entirely: namespace, wizard and activity record.
pub async fn forget_client(state: &AppState, id: &str) {
    state.client_store(id).clear();
    state.wizards.write().await.remove(id);
    state.clients.forget(id);
}

/// Drop idle clients' namespaces and wizards, then any expired wizards.
pub async fn sweep_at(state: &AppState, now: Instant) -> SweepReport {
    let idle = state.clients.take_idle_at(now, state.config.client_ttl);
    let mut wizards = state.wizards.write().await;
    for id in &idle {
        state.client_store(id).clear();
        wizards.remove(id);
    }
    SweepReport { clients: idle.len(), wizards: wizards.sweep_at(now) }
}

/// Spawn the periodic sweep. Returns a handle for shutdown.
pub fn spawn_sweeper(state: AppState) -> JoinHandle<()> {
    let every = state.config.sweep_interval;
    info!(
        sweep_secs = every.as_secs(),
        client_ttl_secs = state.config.client_ttl.as_secs(),
        wizard_ttl_secs = state.config.wizard_ttl.as_secs(),
        "client sweeper configured"
    );
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
        loop {
            ticker.tick().await;
            let report = sweep_at(&state, Instant::now()).await;
            if report != SweepReport::default() {
                info!(clients = report.clients, wizards = report.wizards, "swept idle client state");
            }
        }
    })
}

#[cfg(test)]
#[path = "lifecycle_test.rs"]
mod tests;
