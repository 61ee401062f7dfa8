use axum::http::{Method, StatusCode};
use serde_json::json;

use crate::routes::app;
use crate::routes::test_support::{cookie, json_body, send};
use crate::state::test_helpers::test_app_state;

#[tokio::test]
async fn support_returns_mailto_link() {
    let app = app(test_app_state());
    let body = json!({
        "name": "Asha",
        "email": "asha@orbit.dev",
        "subject": "Upload fails",
        "message": "The certificate upload spins forever.",
        "priority": "high",
    });
    let response = send(&app, Method::POST, "/api/support", Some(&cookie('a')), Some(body)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = json_body(response).await;
    assert_eq!(json["notice"]["title"], "Support Request Initiated");
    let mailto = json["data"]["mailto"].as_str().unwrap();
    assert!(mailto.starts_with("mailto:support@dreamers.com?subject=Support%20Request%3A%20Upload%20fails"));
    assert!(mailto.contains("Priority%3A%20high"));
}

#[tokio::test]
async fn support_lists_missing_fields() {
    let app = app(test_app_state());
    let body = json!({ "name": "Asha", "message": "help" });
    let response = send(&app, Method::POST, "/api/support", Some(&cookie('a')), Some(body)).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let json = json_body(response).await;
    assert_eq!(json["fields"], json!(["email", "subject"]));
}
