//! Public contact endpoints over HTTP.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::missing_panics_doc,
    missing_debug_implementations
)]
mod common;

use chrono::{SubsecRound, Utc};
use folio_desk::api::dto::SubmitMessageRequest;
use folio_desk::client::{AdminApi, ClientError, ContactApi, ContactForm, FormState};
use folio_desk::domain::{MessageStatus, StatusFilter};
use folio_desk::error::ErrorResponse;
use reqwest::StatusCode;

use common::{TestApp, jane_doe};

#[tokio::test]
async fn valid_submission_is_stored_as_new() {
    let app = TestApp::spawn().await;
    let before = Utc::now().trunc_subsecs(6);

    let data = app.client.submit_message(&jane_doe()).await.unwrap();
    assert!(data.submitted_at >= before && data.submitted_at <= Utc::now());

    let stored = app.state.admin_service.store().get(data.message_id).await.unwrap();
    assert_eq!(stored.status, MessageStatus::New);
    assert_eq!(stored.name, "Jane Doe");
    assert_eq!(stored.version, 1);
}

#[tokio::test]
async fn submission_envelope_shape() {
    let app = TestApp::spawn().await;

    let resp = app
        .http
        .post(app.url("/api/contact/message"))
        .json(&jane_doe())
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["success"], true);
    assert!(body["message"].as_str().unwrap().contains("24 hours"));
    assert!(body["data"]["message_id"].is_string());
}

#[tokio::test]
async fn invalid_submission_is_rejected_and_not_stored() {
    let app = TestApp::spawn().await;
    let request = SubmitMessageRequest {
        email: "not-an-email".to_string(),
        ..jane_doe()
    };

    let err = app.client.submit_message(&request).await.unwrap_err();
    let ClientError::Api { status, code, retryable, .. } = &err else {
        panic!("expected api error, got {err:?}");
    };
    assert_eq!(*status, 400);
    assert_eq!(*code, 1001);
    assert!(!retryable);
    assert_eq!(app.state.admin_service.store().count().await.unwrap(), 0);
}

#[tokio::test]
async fn missing_fields_are_validation_errors() {
    let app = TestApp::spawn().await;

    let resp = app
        .http
        .post(app.url("/api/contact/message"))
        .json(&serde_json::json!({ "name": "Only a name" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: ErrorResponse = resp.json().await.unwrap();
    assert!(!body.success);
    assert_eq!(body.error.code, 1001);
    assert!(body.error.message.contains("email"));
}

#[tokio::test]
async fn unknown_availability_is_rejected() {
    let app = TestApp::spawn().await;
    let request = SubmitMessageRequest {
        availability_preference: Some("midnight".to_string()),
        ..jane_doe()
    };

    let err = app.client.submit_message(&request).await.unwrap_err();
    assert_eq!(err.code(), Some(1001));
}

#[tokio::test]
async fn forwarded_address_is_recorded() {
    let app = TestApp::spawn().await;

    let resp = app
        .http
        .post(app.url("/api/contact/message"))
        .header("x-forwarded-for", "203.0.113.7, 10.0.0.1")
        .json(&jane_doe())
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);

    let list = app
        .client
        .list_messages(StatusFilter::All, Default::default())
        .await
        .unwrap();
    assert_eq!(list.messages[0].ip_address.as_deref(), Some("203.0.113.7"));
}

#[tokio::test]
async fn contact_info_comes_from_config() {
    let app = TestApp::spawn().await;
    let info = app.client.contact_info().await.unwrap();
    assert_eq!(info, app.config.contact_info);
}

#[tokio::test]
async fn contact_form_round_trip() {
    let app = TestApp::spawn().await;
    let mut form = ContactForm::new();
    *form.draft_mut() = jane_doe();
    form.draft_mut().email = String::new();

    assert!(form.submit(&app.client).await.is_err());
    assert!(!form.can_retry());
    assert_eq!(form.draft().name, "Jane Doe");

    form.draft_mut().email = "jane@x.com".to_string();
    let data = form.submit(&app.client).await.unwrap();
    assert_eq!(form.state(), &FormState::Sent(data));
    assert!(form.draft().email.is_empty());
}

#[tokio::test]
async fn unreachable_server_is_retryable() {
    // Bind and drop to get a port nobody listens on.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = folio_desk::client::PortfolioClient::new(format!("http://{addr}")).unwrap();
    let err = client.submit_message(&jane_doe()).await.unwrap_err();
    assert!(matches!(err, ClientError::Transport(_)));
    assert!(err.is_retryable());
}
