//! Integration tests for notification dispatch.

mod helpers;

use std::sync::Arc;

use serde_json::json;

use carepanel_core::types::{DispatchResult, NotificationMessage};
use carepanel_notify::{DispatchError, NotificationDispatcher, PermissionDecision};
use carepanel_transport::{Method, TransportError};

use helpers::{DISPATCH_PATH, ScriptedTransport, TOKENS_PATH};

fn dispatcher(
    transport: &Arc<ScriptedTransport>,
    lifecycle: &carepanel_notify::TokenLifecycle,
) -> NotificationDispatcher {
    NotificationDispatcher::new(transport.clone(), lifecycle.subscribe(), DISPATCH_PATH, 10)
}

#[tokio::test]
async fn test_empty_title_fails_validation_without_network() {
    let transport = ScriptedTransport::new();
    transport.reply(TOKENS_PATH, 200, json!({"token": "tok-1"}));
    let lifecycle = helpers::lifecycle(transport.clone(), PermissionDecision::Granted);
    lifecycle.request_permission().await.unwrap();
    let dispatcher = dispatcher(&transport, &lifecycle);
    let calls_before = transport.calls().len();

    for title in ["", "   "] {
        let result = dispatcher
            .dispatch(&NotificationMessage::new(title, "body"))
            .await;
        assert!(matches!(result, Err(DispatchError::Validation(_))));
    }

    assert_eq!(transport.calls().len(), calls_before);
    assert!(dispatcher.history().is_empty());
}

#[tokio::test]
async fn test_missing_token_fails_without_network() {
    let transport = ScriptedTransport::new();
    let lifecycle = helpers::lifecycle(transport.clone(), PermissionDecision::Denied);
    let dispatcher = dispatcher(&transport, &lifecycle);

    let message = NotificationMessage::new("Reminder", "Submit the monthly report");
    assert_eq!(
        dispatcher.dispatch(&message).await,
        Err(DispatchError::NoToken)
    );

    let _ = lifecycle.request_permission().await;
    assert_eq!(
        dispatcher.dispatch(&message).await,
        Err(DispatchError::NoToken)
    );
    assert!(transport.calls().is_empty());
}

#[tokio::test]
async fn test_delivered_submits_token_and_message_once() {
    let transport = ScriptedTransport::new();
    transport.reply(TOKENS_PATH, 200, json!({"token": "tok-1"}));
    transport.reply(DISPATCH_PATH, 200, json!({"name": "msg/1"}));
    let lifecycle = helpers::lifecycle(transport.clone(), PermissionDecision::Granted);
    lifecycle.request_permission().await.unwrap();
    let dispatcher = dispatcher(&transport, &lifecycle);

    let result = dispatcher
        .dispatch(&NotificationMessage::new("Clinic closed", ""))
        .await
        .unwrap();

    assert_eq!(result, DispatchResult::Delivered);
    let sent = transport.calls_to(DISPATCH_PATH);
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].method, Method::POST);
    assert_eq!(
        sent[0].body,
        Some(json!({
            "token": "tok-1",
            "notification": {"title": "Clinic closed", "body": ""},
        }))
    );
    assert_eq!(dispatcher.history().len(), 1);
}

#[tokio::test]
async fn test_transport_failure_maps_to_failed_without_retry() {
    let transport = ScriptedTransport::new();
    transport.reply(TOKENS_PATH, 200, json!({"token": "tok-1"}));
    transport.on(
        DISPATCH_PATH,
        Err(TransportError::Network("connection reset".into())),
    );
    transport.reply(DISPATCH_PATH, 200, json!({}));
    let lifecycle = helpers::lifecycle(transport.clone(), PermissionDecision::Granted);
    lifecycle.request_permission().await.unwrap();
    let dispatcher = dispatcher(&transport, &lifecycle);

    let message = NotificationMessage::new("Reminder", "Visits due");
    let first = dispatcher.dispatch(&message).await.unwrap();
    assert!(matches!(
        first,
        DispatchResult::Failed(ref reason) if reason.contains("connection reset")
    ));
    assert_eq!(transport.calls_to(DISPATCH_PATH).len(), 1);

    // The composed message is still ours; the operator retries explicitly.
    let second = dispatcher.dispatch(&message).await.unwrap();
    assert_eq!(second, DispatchResult::Delivered);
    assert_eq!(transport.calls_to(DISPATCH_PATH).len(), 2);

    let history = dispatcher.history();
    assert_eq!(history[0].result, DispatchResult::Delivered);
    assert!(!history[1].result.is_delivered());
}

#[tokio::test]
async fn test_http_error_maps_to_failed() {
    let transport = ScriptedTransport::new();
    transport.reply(TOKENS_PATH, 200, json!({"token": "tok-1"}));
    transport.reply(DISPATCH_PATH, 500, json!({"error": "backend down"}));
    let lifecycle = helpers::lifecycle(transport.clone(), PermissionDecision::Granted);
    lifecycle.request_permission().await.unwrap();
    let dispatcher = dispatcher(&transport, &lifecycle);

    let result = dispatcher
        .dispatch(&NotificationMessage::new("Reminder", ""))
        .await
        .unwrap();
    assert!(matches!(result, DispatchResult::Failed(ref reason) if reason.contains("500")));
}

#[tokio::test]
async fn test_dispatch_follows_rotated_token() {
    let transport = ScriptedTransport::new();
    transport.reply(TOKENS_PATH, 200, json!({"token": "tok-1"}));
    transport.reply(TOKENS_PATH, 200, json!({"token": "tok-2"}));
    transport.reply(DISPATCH_PATH, 200, json!({}));
    let lifecycle = helpers::lifecycle(transport.clone(), PermissionDecision::Granted);
    lifecycle.request_permission().await.unwrap();
    let dispatcher = dispatcher(&transport, &lifecycle);

    lifecycle.handle_rotation().await.unwrap();
    dispatcher
        .dispatch(&NotificationMessage::new("Reminder", ""))
        .await
        .unwrap();

    let sent = transport.calls_to(DISPATCH_PATH);
    assert_eq!(sent[0].body.as_ref().unwrap()["token"], "tok-2");
}

#[tokio::test]
async fn test_stale_token_is_never_used() {
    let transport = ScriptedTransport::new();
    transport.reply(TOKENS_PATH, 200, json!({"token": "tok-1"}));
    transport.reply(TOKENS_PATH, 503, json!({"error": "unavailable"}));
    let lifecycle = helpers::lifecycle(transport.clone(), PermissionDecision::Granted);
    lifecycle.request_permission().await.unwrap();
    let dispatcher = dispatcher(&transport, &lifecycle);

    assert!(lifecycle.handle_rotation().await.is_err());
    assert_eq!(
        dispatcher
            .dispatch(&NotificationMessage::new("Reminder", ""))
            .await,
        Err(DispatchError::NoToken)
    );
    assert!(transport.calls_to(DISPATCH_PATH).is_empty());
}
