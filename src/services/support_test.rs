use super::*;

fn request() -> SupportRequest {
    SupportRequest {
        name: "Asha".into(),
        email: "asha@orbit.dev".into(),
        subject: "Upload stuck".into(),
        message: "The certificate upload never finishes & I'm stuck.".into(),
        priority: Priority::High,
    }
}

#[test]
fn mailto_targets_support_address() {
    let url = request().mailto().unwrap();
    assert!(url.starts_with("mailto:support@dreamers.com?subject="));
}

#[test]
fn mailto_encodes_subject() {
    let url = request().mailto().unwrap();
    assert!(url.contains("subject=Support%20Request%3A%20Upload%20stuck&body="));
}

#[test]
fn mailto_body_round_trips() {
    let url = request().mailto().unwrap();
    let (_, encoded) = url.split_once("&body=").unwrap();
    let body = urlencoding::decode(encoded).unwrap();
    assert!(body.contains("Name: Asha"));
    assert!(body.contains("Priority: high"));
    assert!(body.contains("never finishes & I'm stuck."));
    assert!(body.contains("Dreamers Application Portal"));
}

#[test]
fn mailto_escapes_ampersand_in_message() {
    let url = request().mailto().unwrap();
    // Exactly one raw '&' separating subject and body.
    assert_eq!(url.matches('&').count(), 1);
}

#[test]
fn missing_fields_reported_in_order() {
    let req = SupportRequest { subject: "x".into(), ..SupportRequest::default() };
    assert_eq!(req.mailto(), Err(SupportError::MissingFields(vec!["name", "email", "message"])));
}

#[test]
fn blank_message_rejected() {
    let mut req = request();
    req.message = "  \n ".into();
    assert!(req.mailto().is_err());
}

#[test]
fn priority_defaults_to_medium() {
    let req: SupportRequest = serde_json::from_str(r#"{"name":"a","email":"b","subject":"c","message":"d"}"#).unwrap();
    assert_eq!(req.priority, Priority::Medium);
}

#[test]
fn error_message_matches_form_notice() {
    assert_eq!(SupportError::MissingFields(vec![]).to_string(), "Please fill in all required fields");
}
