//! Domain services used by the HTTP routes.
//!
//! ARCHITECTURE
//! ============
//! Service modules own the portal's rules and their effect on a client's
//! store, so route handlers can stay focused on request/response plumbing.

pub mod admin;
pub mod catalog;
pub mod session;
pub mod support;
pub mod wizard;
