//! Applicant session management.
//!
//! ARCHITECTURE
//! ============
//! Authentication is simulated. `login` and `register` fabricate a user
//! record, pair it with a constant token, and write both into the client's
//! store; `rehydrate` reads them back on every request. There is no password
//! check and no expiry: the session lives until `logout` or until the
//! client's namespace is cleared.
//!
//! TRADE-OFFS
//! ==========
//! A stored user that no longer parses is treated as a logged-out client and
//! both keys are dropped. The caller never sees that as an error.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::services::catalog::{self, ReviewStatus};
use crate::store::{ClientStore, StoreError, keys};

/// Token handed out by the simulated auth backend.
pub const MOCK_TOKEN: &str = "mock-jwt-token";

pub const MIN_PASSWORD_LEN: usize = 6;

// =============================================================================
// USER / SESSION
// =============================================================================

/// Applicant identity kept in the client store under `user`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub incubation_centre: Option<String>,
    #[serde(default)]
    pub status: ReviewStatus,
}

/// A logged-in identity: token plus user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Session {
    pub token: String,
    pub user: User,
}

/// Snapshot of the client's auth state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AuthState {
    pub user: Option<User>,
    pub token: Option<String>,
    pub loading: bool,
}

impl AuthState {
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// The session, when both halves are present.
    #[must_use]
    pub fn session(&self) -> Option<Session> {
        match (&self.token, &self.user) {
            (Some(token), Some(user)) => Some(Session { token: token.clone(), user: user.clone() }),
            _ => None,
        }
    }
}

// =============================================================================
// REGISTRATION
// =============================================================================

/// Raw registration form as submitted.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    #[serde(default)]
    pub contact: String,
    #[serde(default)]
    pub incubation_centre: String,
}

/// A registration that passed form validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub contact: String,
    /// Display name of the selected centre.
    pub incubation_centre: String,
    pub incubation_email: String,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RegistrationError {
    #[error("Please fill in all required fields")]
    MissingFields(Vec<&'static str>),
    #[error("Passwords do not match")]
    PasswordMismatch,
    #[error("Password must be at least 6 characters long")]
    PasswordTooShort,
    #[error("Please select an incubation centre")]
    MissingCentre,
}

impl RegistrationForm {
    /// Check the form and resolve the selected centre. Name and email are
    /// required before any password check runs.
    ///
    /// An id missing from the catalog is kept verbatim with no head-office email.
    pub fn validate(self) -> Result<Registration, RegistrationError> {
        let missing: Vec<&'static str> = [("name", &self.name), ("email", &self.email)]
            .into_iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(field, _)| field)
            .collect();
        if !missing.is_empty() {
            return Err(RegistrationError::MissingFields(missing));
        }
        if self.password != self.confirm_password {
            return Err(RegistrationError::PasswordMismatch);
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(RegistrationError::PasswordTooShort);
        }
        let centre_id = self.incubation_centre.trim();
        if centre_id.is_empty() {
            return Err(RegistrationError::MissingCentre);
        }

        let (incubation_centre, incubation_email) = match catalog::find_centre(centre_id) {
            Some(centre) => (centre.name.to_owned(), centre.email.to_owned()),
            None => (centre_id.to_owned(), String::new()),
        };

        Ok(Registration {
            name: self.name.trim().to_owned(),
            email: self.email.trim().to_owned(),
            contact: self.contact.trim().to_owned(),
            incubation_centre,
            incubation_email,
        })
    }
}

// =============================================================================
// OPERATIONS
// =============================================================================

/// Display name derived from an email's local part.
fn name_from_email(email: &str) -> String {
    email.split('@').next().unwrap_or_default().to_owned()
}

fn persist(store: &ClientStore, user: User) -> Result<Session, StoreError> {
    let session = Session { token: MOCK_TOKEN.to_owned(), user };
    store.set_raw(keys::TOKEN, session.token.as_str())?;
    if let Err(e) = store.set_json(keys::USER, &session.user) {
        store.remove(keys::TOKEN);
        return Err(e);
    }
    Ok(session)
}

/// Log in. Any credentials are accepted.
pub fn login(store: &ClientStore, email: &str, _password: &str) -> Result<Session, StoreError> {
    let email = email.trim();
    let user = User {
        id: Uuid::new_v4(),
        name: name_from_email(email),
        email: email.to_owned(),
        contact: None,
        role: None,
        incubation_centre: None,
        status: ReviewStatus::Pending,
    };
    let session = persist(store, user)?;
    info!(namespace = store.namespace(), user_id = %session.user.id, "applicant logged in");
    Ok(session)
}

/// Register a validated applicant and log them in.
pub fn register(store: &ClientStore, registration: &Registration) -> Result<Session, StoreError> {
    let user = User {
        id: Uuid::new_v4(),
        name: registration.name.clone(),
        email: registration.email.clone(),
        contact: Some(registration.contact.clone()).filter(|c| !c.is_empty()),
        role: Some("founder".to_owned()),
        incubation_centre: Some(registration.incubation_centre.clone()),
        status: ReviewStatus::Pending,
    };
    let session = persist(store, user)?;
    info!(
        namespace = store.namespace(),
        user_id = %session.user.id,
        centre = %registration.incubation_centre,
        "applicant registered"
    );
    Ok(session)
}

/// Drop the session.
pub fn logout(store: &ClientStore) {
    store.remove(keys::TOKEN);
    store.remove(keys::USER);
    info!(namespace = store.namespace(), "applicant logged out");
}

/// Rebuild auth state from the client store.
#[must_use]
pub fn rehydrate(store: &ClientStore) -> AuthState {
    let logged_out = AuthState { user: None, token: None, loading: false };

    let Some(token) = store.get_raw(keys::TOKEN) else {
        return logged_out;
    };
    match store.try_get_json::<User>(keys::USER) {
        Ok(Some(user)) => AuthState { user: Some(user), token: Some(token), loading: false },
        Ok(None) => logged_out,
        Err(e) => {
            warn!(namespace = store.namespace(), error = %e, "discarding malformed session");
            store.remove(keys::TOKEN);
            store.remove(keys::USER);
            logged_out
        }
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
