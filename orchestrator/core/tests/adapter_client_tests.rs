// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Integration tests for the two adapter-client layers against stub HTTP
//! servers:
//! - `OllamaProvider`: chunk folding, deadline header, provider failures
//! - `OllamaAdapterClient`: payload validation, model hint forwarding,
//!   failure classification

use mockito::Matcher;
use privacypilot_core::domain::adapter::TaskAdapter;
use privacypilot_core::domain::deadline::Deadline;
use privacypilot_core::domain::error::ErrorKind;
use privacypilot_core::domain::llm::{Completion, GenerationOptions, GenerationRequest, LLMProvider};
use privacypilot_core::domain::task::{TaskPayload, TaskType};
use privacypilot_core::infrastructure::adapters::OllamaAdapterClient;
use privacypilot_core::infrastructure::llm::OllamaProvider;
use serde_json::json;
use std::time::Duration;

fn generation(model: &str) -> GenerationRequest {
    GenerationRequest {
        model: model.to_string(),
        prompt: "Anonymize the following text:\n\n\"Alice\"".to_string(),
        system: None,
        options: GenerationOptions {
            temperature: Some(0.2),
        },
    }
}

fn text_payload(text: &str) -> TaskPayload {
    json!({ "text": text }).as_object().unwrap().clone()
}

fn minute() -> Deadline {
    Deadline::after(Duration::from_secs(60))
}

#[tokio::test]
async fn provider_folds_many_chunks_with_empty_terminal_chunk() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/generate")
        .match_body(Matcher::PartialJson(json!({"model": "mistral:7b", "stream": false})))
        .with_status(200)
        .with_header("content-type", "application/x-ndjson")
        .with_body(concat!(
            "{\"response\":\"Al\",\"done\":false}\n",
            "{\"response\":\"ice\",\"done\":false}\n",
            "{\"response\":\"\",\"done\":true}\n",
        ))
        .create_async()
        .await;

    let provider = OllamaProvider::new(server.url());
    let completion = provider.generate(&generation("mistral:7b"), minute()).await.unwrap();

    assert_eq!(completion, Completion::Text("Alice".to_string()));
    mock.assert_async().await;
}

#[tokio::test]
async fn provider_single_chunk_without_trailing_newline() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/api/generate")
        .with_status(200)
        .with_body(r#"{"response":"[NAME] says hi","done":true,"eval_count":7}"#)
        .create_async()
        .await;

    let provider = OllamaProvider::new(server.url());
    let completion = provider.generate(&generation("mistral:7b"), minute()).await.unwrap();
    assert_eq!(completion.text(), "[NAME] says hi");
}

#[tokio::test]
async fn provider_zero_chunks_is_empty_result() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/api/generate")
        .with_status(200)
        .with_body("")
        .create_async()
        .await;

    let provider = OllamaProvider::new(server.url());
    let completion = provider.generate(&generation("mistral:7b"), minute()).await.unwrap();
    assert!(completion.is_empty());
}

#[tokio::test]
async fn provider_forwards_remaining_budget_not_its_ceiling() {
    let mut server = mockito::Server::new_async().await;
    // Remaining budget is 2s while the provider ceiling is 55s.
    let mock = server
        .mock("POST", "/api/generate")
        .match_header(
            "x-request-timeout-ms",
            Matcher::Regex(r"^(2000|1\d{3}|\d{1,3})$".to_string()),
        )
        .with_status(200)
        .with_body("{\"response\":\"ok\",\"done\":true}\n")
        .create_async()
        .await;

    let provider = OllamaProvider::new(server.url());
    let deadline = Deadline::after(Duration::from_secs(2));
    provider.generate(&generation("mistral:7b"), deadline).await.unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn provider_error_chunk_and_missing_model_are_rejections() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/api/generate")
        .match_body(Matcher::PartialJson(json!({"model": "broken"})))
        .with_status(200)
        .with_body("{\"response\":\"par\",\"done\":false}\n{\"error\":\"model crashed\"}\n")
        .create_async()
        .await;
    server
        .mock("POST", "/api/generate")
        .match_body(Matcher::PartialJson(json!({"model": "missing"})))
        .with_status(404)
        .with_body(r#"{"error":"model 'missing' not found"}"#)
        .create_async()
        .await;

    let provider = OllamaProvider::new(server.url());

    let err = provider.generate(&generation("broken"), minute()).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UpstreamRejected);
    assert!(err.to_string().contains("model crashed"));

    let err = provider.generate(&generation("missing"), minute()).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UpstreamRejected);
    assert!(err.to_string().contains("model 'missing' not found"));
}

#[tokio::test]
async fn provider_health_probes_tags() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/tags")
        .with_status(200)
        .with_body(r#"{"models":[]}"#)
        .create_async()
        .await;

    assert!(OllamaProvider::new(server.url()).health_check().await.is_ok());
    mock.assert_async().await;

    let err = OllamaProvider::new("http://127.0.0.1:9").health_check().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UpstreamUnavailable);
}

#[tokio::test]
async fn adapter_client_sends_model_hint_or_omits_it() {
    let mut server = mockito::Server::new_async().await;
    let hinted = server
        .mock("POST", "/anonymize")
        .match_body(Matcher::Json(json!({"text": "Alice", "model": "model-b"})))
        .with_status(200)
        .with_body(r#"{"anonymized_text":"[NAME]","model_used":"model-b"}"#)
        .create_async()
        .await;
    let defaulted = server
        .mock("POST", "/anonymize")
        .match_body(Matcher::Json(json!({"text": "Alice"})))
        .with_status(200)
        .with_body(r#"{"anonymized_text":"[NAME]","model_used":"mistral:7b"}"#)
        .create_async()
        .await;

    let client = OllamaAdapterClient::new(server.url());

    let output = client
        .invoke(TaskType::AnonymizeText, &text_payload("Alice"), Some("model-b"), minute())
        .await
        .unwrap();
    assert_eq!(output.model_used, "model-b");
    assert_eq!(output.fields["anonymized_text"], json!("[NAME]"));

    let output = client
        .invoke(TaskType::AnonymizeText, &text_payload("Alice"), None, minute())
        .await
        .unwrap();
    assert_eq!(output.model_used, "mistral:7b");
    assert!(output.fields.get("empty_result").is_none());

    hinted.assert_async().await;
    defaulted.assert_async().await;
}

#[tokio::test]
async fn adapter_client_validates_payload_before_any_call() {
    let mut server = mockito::Server::new_async().await;
    let mock = server.mock("POST", "/anonymize").expect(0).create_async().await;

    let client = OllamaAdapterClient::new(server.url());
    for payload in [TaskPayload::new(), text_payload(""), json!({"text": 42}).as_object().unwrap().clone()] {
        let err = client
            .invoke(TaskType::AnonymizeText, &payload, None, minute())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    let err = client
        .invoke(TaskType::ModerateText, &text_payload("hi"), None, minute())
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Unsupported);

    mock.assert_async().await;
}

#[tokio::test]
async fn adapter_client_classifies_failures() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/anonymize")
        .with_status(500)
        .with_body(r#"{"error":"ollama rejected the request: model crashed","kind":"upstream_rejected"}"#)
        .create_async()
        .await;

    let err = OllamaAdapterClient::new(server.url())
        .invoke(TaskType::AnonymizeText, &text_payload("Alice"), None, minute())
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UpstreamRejected);
    assert_eq!(err.hop(), Some("ollama-adapter"));
    assert!(err.to_string().contains("model crashed"));

    let err = OllamaAdapterClient::new("http://127.0.0.1:9")
        .invoke(TaskType::AnonymizeText, &text_payload("Alice"), None, minute())
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UpstreamUnavailable);
}

#[tokio::test]
async fn adapter_client_reports_empty_results() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/anonymize")
        .with_status(200)
        .with_body(r#"{"anonymized_text":"","model_used":"mistral:7b","empty_result":true}"#)
        .create_async()
        .await;

    let output = OllamaAdapterClient::new(server.url())
        .invoke(TaskType::AnonymizeText, &text_payload("Alice"), None, minute())
        .await
        .unwrap();
    assert_eq!(output.fields["empty_result"], json!(true));
}
