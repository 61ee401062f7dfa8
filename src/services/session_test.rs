use super::*;
use std::sync::Arc;

use crate::store::MemoryStore;

fn store() -> ClientStore {
    ClientStore::open(Arc::new(MemoryStore::new()), "client-1")
}

fn form() -> RegistrationForm {
    RegistrationForm {
        name: "Asha Rao".into(),
        email: "asha@orbit.dev".into(),
        password: "hunter22".into(),
        confirm_password: "hunter22".into(),
        contact: "+91 9000000000".into(),
        incubation_centre: "iit-delhi".into(),
    }
}

// =============================================================================
// login / register
// =============================================================================

#[test]
fn login_persists_token_and_user() {
    let store = store();
    let session = login(&store, "asha@orbit.dev", "whatever").unwrap();
    assert_eq!(session.token, MOCK_TOKEN);
    assert_eq!(session.user.email, "asha@orbit.dev");
    assert_eq!(session.user.name, "asha");
    assert_eq!(store.get_raw(keys::TOKEN).as_deref(), Some(MOCK_TOKEN));
}

#[test]
fn login_round_trips_through_rehydrate() {
    let store = store();
    let session = login(&store, "asha@orbit.dev", "pw").unwrap();
    let state = rehydrate(&store);
    assert!(state.is_authenticated());
    assert!(!state.loading);
    assert_eq!(state.session(), Some(session));
}

#[test]
fn login_accepts_empty_credentials() {
    let store = store();
    let session = login(&store, "", "").unwrap();
    assert_eq!(session.user.name, "");
    assert!(rehydrate(&store).is_authenticated());
}

#[test]
fn register_round_trips_through_rehydrate() {
    let store = store();
    let registration = form().validate().unwrap();
    let session = register(&store, &registration).unwrap();
    assert_eq!(session.user.role.as_deref(), Some("founder"));
    assert_eq!(session.user.incubation_centre.as_deref(), Some("IIT Delhi Incubation Centre"));
    assert_eq!(session.user.status, ReviewStatus::Pending);
    assert_eq!(rehydrate(&store).session(), Some(session));
}

#[test]
fn register_drops_blank_contact() {
    let store = store();
    let mut raw = form();
    raw.contact = "   ".into();
    let session = register(&store, &raw.validate().unwrap()).unwrap();
    assert!(session.user.contact.is_none());
}

#[test]
fn login_store_failure_leaves_no_token() {
    // Room for the token but not for the user record.
    let store = ClientStore::open(Arc::new(MemoryStore::with_quota(40)), "c");
    let err = login(&store, "someone@example.com", "pw").unwrap_err();
    assert!(matches!(err, StoreError::QuotaExceeded { .. }));
    assert!(!store.contains(keys::TOKEN));
}

// =============================================================================
// logout / rehydrate
// =============================================================================

#[test]
fn logout_clears_session() {
    let store = store();
    login(&store, "a@b.c", "pw").unwrap();
    logout(&store);
    assert!(!store.contains(keys::TOKEN));
    assert!(!store.contains(keys::USER));
    let state = rehydrate(&store);
    assert!(!state.is_authenticated());
    assert!(state.session().is_none());
}

#[test]
fn logout_without_session_is_noop() {
    let store = store();
    logout(&store);
    assert_eq!(rehydrate(&store), AuthState::default());
}

#[test]
fn rehydrate_empty_store_is_logged_out() {
    let state = rehydrate(&store());
    assert!(state.user.is_none());
    assert!(state.token.is_none());
    assert!(!state.loading);
}

#[test]
fn rehydrate_token_without_user_is_logged_out() {
    let store = store();
    store.set_raw(keys::TOKEN, "tok").unwrap();
    let state = rehydrate(&store);
    assert!(!state.is_authenticated());
    // Nothing malformed, so nothing is discarded.
    assert!(store.contains(keys::TOKEN));
}

#[test]
fn rehydrate_malformed_user_discards_both_keys() {
    let store = store();
    store.set_raw(keys::TOKEN, "tok").unwrap();
    store.set_raw(keys::USER, "{\"id\": ").unwrap();
    let state = rehydrate(&store);
    assert!(!state.is_authenticated());
    assert!(!store.contains(keys::TOKEN));
    assert!(!store.contains(keys::USER));
}

#[test]
fn rehydrate_user_without_status_defaults_pending() {
    let store = store();
    store.set_raw(keys::TOKEN, "tok").unwrap();
    store
        .set_raw(keys::USER, r#"{"id":"00000000-0000-0000-0000-000000000000","name":"n","email":"e"}"#)
        .unwrap();
    let user = rehydrate(&store).user.unwrap();
    assert_eq!(user.status, ReviewStatus::Pending);
    assert!(user.contact.is_none());
}

// =============================================================================
// RegistrationForm::validate
// =============================================================================

#[test]
fn validate_rejects_blank_name_and_email() {
    let mut raw = form();
    raw.name = "   ".into();
    raw.email = String::new();
    assert_eq!(raw.validate(), Err(RegistrationError::MissingFields(vec!["name", "email"])));
}

#[test]
fn validate_checks_required_fields_before_passwords() {
    let mut raw = form();
    raw.email = " ".into();
    raw.confirm_password = "other".into();
    assert_eq!(raw.validate(), Err(RegistrationError::MissingFields(vec!["email"])));
}

#[test]
fn validate_rejects_mismatched_passwords() {
    let mut raw = form();
    raw.confirm_password = "hunter23".into();
    assert_eq!(raw.validate(), Err(RegistrationError::PasswordMismatch));
}

#[test]
fn validate_rejects_short_password() {
    let mut raw = form();
    raw.password = "abc".into();
    raw.confirm_password = "abc".into();
    assert_eq!(raw.validate(), Err(RegistrationError::PasswordTooShort));
}

#[test]
fn validate_checks_mismatch_before_length() {
    let mut raw = form();
    raw.password = "a".into();
    raw.confirm_password = "b".into();
    assert_eq!(raw.validate(), Err(RegistrationError::PasswordMismatch));
}

#[test]
fn validate_rejects_missing_centre() {
    let mut raw = form();
    raw.incubation_centre = String::new();
    assert_eq!(raw.validate(), Err(RegistrationError::MissingCentre));
}

#[test]
fn validate_resolves_known_centre() {
    let registration = form().validate().unwrap();
    assert_eq!(registration.incubation_centre, "IIT Delhi Incubation Centre");
    assert_eq!(registration.incubation_email, "head@iitdelhi-incubation.com");
}

#[test]
fn validate_keeps_unknown_centre_verbatim() {
    let mut raw = form();
    raw.incubation_centre = "garage-lab".into();
    let registration = raw.validate().unwrap();
    assert_eq!(registration.incubation_centre, "garage-lab");
    assert_eq!(registration.incubation_email, "");
}

#[test]
fn registration_error_messages() {
    assert_eq!(
        RegistrationError::MissingFields(vec!["name"]).to_string(),
        "Please fill in all required fields"
    );
    assert_eq!(RegistrationError::PasswordMismatch.to_string(), "Passwords do not match");
    assert_eq!(
        RegistrationError::PasswordTooShort.to_string(),
        "Password must be at least 6 characters long"
    );
}

// =============================================================================
// User serde
// =============================================================================

#[test]
fn user_serializes_camel_case() {
    let user = User {
        id: Uuid::nil(),
        name: "n".into(),
        email: "e".into(),
        contact: None,
        role: None,
        incubation_centre: Some("T-Hub Hyderabad".into()),
        status: ReviewStatus::Approved,
    };
    let value = serde_json::to_value(&user).unwrap();
    assert_eq!(value["incubationCentre"], "T-Hub Hyderabad");
    assert_eq!(value["status"], "approved");
    assert!(value.get("contact").is_none());
}
