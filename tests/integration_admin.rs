//! Admin triage endpoints over HTTP.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::missing_panics_doc,
    missing_debug_implementations
)]
mod common;

use folio_desk::api::dto::{Pagination, SubmitMessageRequest};
use folio_desk::client::{AdminApi, AdminDashboard, ClientError, ContactApi};
use folio_desk::config::AppConfig;
use folio_desk::domain::{MessageId, MessageStatus, StatusChange, StatusFilter, TransitionPolicy};
use folio_desk::error::ErrorResponse;
use reqwest::StatusCode;
use reqwest::header::CONTENT_DISPOSITION;

use common::{TestApp, jane_doe};

fn only(status: MessageStatus) -> StatusFilter {
    StatusFilter::Only(status)
}

async fn submit_named(app: &TestApp, name: &str) -> MessageId {
    let request = SubmitMessageRequest {
        name: name.to_string(),
        ..jane_doe()
    };
    app.client.submit_message(&request).await.unwrap().message_id
}

#[tokio::test]
async fn jane_doe_scenario() {
    let app = TestApp::spawn().await;
    let page = Pagination::default();

    let id = app.client.submit_message(&jane_doe()).await.unwrap().message_id;

    let all = app.client.list_messages(StatusFilter::All, page).await.unwrap();
    assert_eq!(all.messages.len(), 1);
    let original = all.messages[0].clone();
    assert_eq!(original.id, id);
    assert_eq!(original.status, MessageStatus::New);

    let updated = app
        .client
        .set_status(id, StatusChange::to(MessageStatus::Read))
        .await
        .unwrap();
    assert_eq!(updated.status, MessageStatus::Read);

    let new = app.client.list_messages(only(MessageStatus::New), page).await.unwrap();
    assert!(new.messages.is_empty());

    let read = app.client.list_messages(only(MessageStatus::Read), page).await.unwrap();
    assert_eq!(read.messages.len(), 1);
    assert_eq!(read.messages[0].id, id);
    assert_eq!(read.messages[0].submitted_at, original.submitted_at);
}

#[tokio::test]
async fn list_is_newest_first_and_paginated() {
    let app = TestApp::spawn().await;
    for name in ["first", "second", "third"] {
        submit_named(&app, name).await;
    }

    let page = Pagination {
        skip: 0,
        limit: Some(2),
    };
    let list = app.client.list_messages(StatusFilter::All, page).await.unwrap();
    assert_eq!(list.total, 3);
    assert_eq!(list.showing, 2);
    assert!(list.has_more);
    assert_eq!(list.messages[0].name, "third");
    assert_eq!(list.messages[1].name, "second");

    let rest = Pagination {
        skip: 2,
        limit: Some(2),
    };
    let list = app.client.list_messages(StatusFilter::All, rest).await.unwrap();
    assert_eq!(list.showing, 1);
    assert!(!list.has_more);
    assert_eq!(list.messages[0].name, "first");
}

#[tokio::test]
async fn unknown_status_filter_is_rejected() {
    let app = TestApp::spawn().await;

    let resp = app
        .http
        .get(app.url("/api/admin/messages?status=spam"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: ErrorResponse = resp.json().await.unwrap();
    assert_eq!(body.error.code, 1002);
}

#[tokio::test]
async fn unknown_target_status_is_rejected() {
    let app = TestApp::spawn().await;
    let id = submit_named(&app, "a").await;

    let resp = app
        .http
        .put(app.url(&format!("/api/admin/messages/{id}/status?new_status=archived")))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: ErrorResponse = resp.json().await.unwrap();
    assert_eq!(body.error.code, 1002);
}

#[tokio::test]
async fn missing_message_is_not_found() {
    let app = TestApp::spawn().await;
    let ghost = MessageId::new();

    let err = app
        .client
        .set_status(ghost, StatusChange::to(MessageStatus::Read))
        .await
        .unwrap_err();
    assert_eq!(err.code(), Some(2001));

    let err = app.client.delete_message(ghost).await.unwrap_err();
    let ClientError::Api { status, .. } = err else {
        panic!("expected api error");
    };
    assert_eq!(status, 404);
}

#[tokio::test]
async fn stale_version_conflicts() {
    let app = TestApp::spawn().await;
    let id = submit_named(&app, "a").await;

    let first = app
        .client
        .set_status(id, StatusChange::guarded(MessageStatus::Read, 1))
        .await
        .unwrap();
    assert_eq!(first.version, 2);

    let err = app
        .client
        .set_status(id, StatusChange::guarded(MessageStatus::Responded, 1))
        .await
        .unwrap_err();
    let ClientError::Api { status, code, .. } = err else {
        panic!("expected api error");
    };
    assert_eq!(status, 409);
    assert_eq!(code, 2002);
}

#[tokio::test]
async fn backward_move_refused_under_forward_only() {
    let app = TestApp::spawn().await;
    let id = submit_named(&app, "a").await;
    app.client
        .set_status(id, StatusChange::to(MessageStatus::Responded))
        .await
        .unwrap();

    let err = app
        .client
        .set_status(id, StatusChange::to(MessageStatus::New))
        .await
        .unwrap_err();
    assert_eq!(err.code(), Some(2003));
}

#[tokio::test]
async fn backward_move_allowed_when_unrestricted() {
    let mut config = AppConfig::for_tests();
    config.transition_policy = TransitionPolicy::Unrestricted;
    let app = TestApp::spawn_with_config(config).await;
    let id = submit_named(&app, "a").await;
    app.client
        .set_status(id, StatusChange::to(MessageStatus::Responded))
        .await
        .unwrap();

    let back = app
        .client
        .set_status(id, StatusChange::to(MessageStatus::New))
        .await
        .unwrap();
    assert_eq!(back.status, MessageStatus::New);
}

#[tokio::test]
async fn stats_track_status_changes_and_deletes() {
    let app = TestApp::spawn().await;
    let a = submit_named(&app, "a").await;
    submit_named(&app, "b").await;

    let stats = app.client.stats().await.unwrap();
    assert_eq!(stats.total_messages, 2);
    assert_eq!(stats.status_breakdown.new, 2);
    assert_eq!(stats.recent_messages_7_days, 2);

    app.client
        .set_status(a, StatusChange::to(MessageStatus::Responded))
        .await
        .unwrap();
    let stats = app.client.stats().await.unwrap();
    assert_eq!(stats.status_breakdown.new, 1);
    assert_eq!(stats.status_breakdown.responded, 1);

    app.client.delete_message(a).await.unwrap();
    let stats = app.client.stats().await.unwrap();
    assert_eq!(stats.total_messages, 1);
    assert_eq!(stats.status_breakdown.responded, 0);
}

#[tokio::test]
async fn delete_returns_no_content_and_removes() {
    let app = TestApp::spawn().await;
    let id = submit_named(&app, "a").await;

    let resp = app
        .http
        .delete(app.url(&format!("/api/admin/messages/{id}")))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let list = app
        .client
        .list_messages(StatusFilter::All, Pagination::default())
        .await
        .unwrap();
    assert!(list.messages.iter().all(|m| m.id != id));
}

#[tokio::test]
async fn export_is_an_attachment_with_every_message() {
    let app = TestApp::spawn().await;
    let a = submit_named(&app, "a").await;
    submit_named(&app, "b").await;
    app.client
        .set_status(a, StatusChange::to(MessageStatus::Read))
        .await
        .unwrap();

    let resp = app
        .http
        .get(app.url("/api/admin/messages/export"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let disposition = resp
        .headers()
        .get(CONTENT_DISPOSITION)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(disposition.starts_with("attachment; filename=\"portfolio-messages-"));
    assert!(disposition.ends_with(".json\""));

    let download = app.client.export_messages().await.unwrap();
    let list = app
        .client
        .list_messages(StatusFilter::All, Pagination::default())
        .await
        .unwrap();
    assert_eq!(download.export.total_messages, 2);
    assert_eq!(download.export.messages, list.messages);
    assert!(disposition.contains(&download.file_name));
}

#[tokio::test]
async fn dashboard_drives_the_server() {
    let app = TestApp::spawn().await;
    let id = submit_named(&app, "a").await;
    let mut dash = AdminDashboard::new();

    dash.load(&app.client).await.unwrap();
    assert_eq!(dash.messages().len(), 1);

    dash.update_status(&app.client, id, MessageStatus::Read)
        .await
        .unwrap();
    assert_eq!(dash.messages()[0].status, MessageStatus::Read);
    assert_eq!(dash.stats().unwrap().status_breakdown.read, 1);

    dash.delete(&app.client, id).await.unwrap();
    assert!(dash.messages().is_empty());
    assert_eq!(dash.stats().unwrap().total_messages, 0);
}
