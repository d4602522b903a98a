// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Startup wiring of the service subcommands: mandatory addresses are fatal,
//! optional ones degrade, and the built routers answer health checks.

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use privacypilot_cli::commands::serve::CoordinatorAddress;
use privacypilot_cli::commands::{
    AnonymizerArgs, CoordinatorArgs, GatewayArgs, ModerationArgs, OllamaAdapterArgs,
};
use serde_json::{json, Value};
use tower::ServiceExt;

async fn health(app: Router) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[test]
fn gateway_without_downstream_address_fails_to_start() {
    let args = GatewayArgs {
        port: 8080,
        anonymizer_url: Some("http://anonymizer-service:8081".into()),
        moderation_url: None,
        api_token: Some("valid-token".into()),
    };
    let err = args.router().unwrap_err();
    assert!(format!("{:#}", err).contains("MODERATION_SERVICE_URL"));
}

#[test]
fn domain_services_require_coordinator_address() {
    let anonymizer = AnonymizerArgs {
        port: 8081,
        coordinator: CoordinatorAddress { coordinator_url: None },
    };
    assert!(format!("{:#}", anonymizer.router().unwrap_err()).contains("AI_COORDINATOR_URL"));

    let moderation = ModerationArgs {
        port: 8082,
        coordinator: CoordinatorAddress {
            coordinator_url: Some("not a url".into()),
        },
    };
    assert!(moderation.router().is_err());
}

#[tokio::test]
async fn coordinator_starts_without_adapter() {
    let args = CoordinatorArgs {
        port: 8083,
        ollama_adapter_url: None,
    };
    let (status, body) = health(args.router().unwrap()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["task_types"], json!([]));

    let args = CoordinatorArgs {
        port: 8083,
        ollama_adapter_url: Some("http://ollama-adapter:8084/".into()),
    };
    let (_, body) = health(args.router().unwrap()).await;
    assert_eq!(body["task_types"], json!(["anonymize_text"]));
}

#[tokio::test]
async fn gateway_health_is_open() {
    let args = GatewayArgs {
        port: 8080,
        anonymizer_url: Some("http://anonymizer-service:8081".into()),
        moderation_url: Some("http://moderation-service:8082".into()),
        api_token: Some("valid-token".into()),
    };
    let (status, body) = health(args.router().unwrap()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["service"], "api-gateway");
}

#[tokio::test]
async fn adapter_health_reports_default_model() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/api/tags")
        .with_status(200)
        .with_body(r#"{"models":[]}"#)
        .create_async()
        .await;

    let args = OllamaAdapterArgs {
        port: 8084,
        ollama_api_url: Some(server.url()),
        default_model: None,
    };
    let (status, body) = health(args.router().unwrap()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["default_model"], "mistral:7b");
}
