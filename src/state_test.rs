use super::*;
use crate::store::keys;

#[test]
fn new_state_has_mock_applications() {
    let state = test_helpers::test_app_state();
    assert_eq!(state.applications.len(), 3);
}

#[test]
fn api_client_uses_configured_base() {
    let config = Config { api_base_url: "https://api.example.com".into(), ..Config::default() };
    let state = AppState::in_memory(config);
    assert_eq!(state.api.endpoints().login, "https://api.example.com/auth/login");
}

#[test]
fn client_stores_share_backend_by_namespace() {
    let state = test_helpers::test_app_state();
    let first = test_helpers::logged_in_client(&state, "client-a");
    let again = state.client_store("client-a");
    let other = state.client_store("client-b");
    assert_eq!(again.get_raw(keys::TOKEN), first.get_raw(keys::TOKEN));
    assert!(other.get_raw(keys::TOKEN).is_none());
}

#[test]
fn clones_share_state() {
    let state = test_helpers::test_app_state();
    let clone = state.clone();
    state.client_store("x").set_raw("k", "v").unwrap();
    assert!(clone.client_store("x").contains("k"));
}

#[tokio::test]
async fn wizards_start_empty() {
    let state = test_helpers::test_app_state();
    assert!(state.wizards.read().await.is_empty());
}
