// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

// Anonymizer service HTTP surface: `POST /anonymize`, `GET /health`.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::error;

use super::error::{failure_response, validation_response};
use super::inbound_deadline;
use crate::application::anonymization::AnonymizationService;
use crate::domain::error::{ErrorKind, PipelineError};
use crate::domain::requests::AnonymizeRequest;
use crate::domain::service_config::DOMAIN_SERVICE_REQUEST_BUDGET;

pub const ANONYMIZER_SERVICE: &str = "anonymizer-service";

const FAILURE_SUMMARY: &str = "Failed to process anonymization request via AI Coordinator";

pub fn app(service: Arc<AnonymizationService>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/anonymize", post(anonymize))
        .layer(TraceLayer::new_for_http())
        .with_state(service)
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "OK", "service": ANONYMIZER_SERVICE }))
}

async fn anonymize(
    State(service): State<Arc<AnonymizationService>>,
    headers: HeaderMap,
    payload: Result<Json<AnonymizeRequest>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return validation_response(&rejection.body_text()),
    };

    let deadline = inbound_deadline(&headers, DOMAIN_SERVICE_REQUEST_BUDGET);
    match deadline.run(ANONYMIZER_SERVICE, service.anonymize(request, deadline)).await {
        Ok(response) => Json(response).into_response(),
        Err(PipelineError::Validation(message)) => validation_response(&message),
        Err(err) => {
            error!("Anonymization failed: {}", err);
            let status = if err.kind() == ErrorKind::Timeout {
                StatusCode::GATEWAY_TIMEOUT
            } else {
                StatusCode::INTERNAL_SERVER_ERROR
            };
            failure_response(status, FAILURE_SUMMARY, &err)
        }
    }
}
