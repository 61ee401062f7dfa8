//! Dreamers application-intake portal.
//!
//! Applicants register or log in, walk a three-step application wizard and
//! land on a confirmation page. A fixed admin account gets a read-only review
//! dashboard over mock applications. All per-browser state (session, admin
//! session, submitted application) lives in a client namespace of an
//! injected key-value store.

pub mod api_client;
pub mod config;
pub mod error;
pub mod lifecycle;
pub mod routes;
pub mod services;
pub mod state;
pub mod store;
