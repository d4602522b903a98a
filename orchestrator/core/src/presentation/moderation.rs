// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

// Moderation service HTTP surface: `POST /moderate`, `GET /health`.

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
use crate::application::moderation::ModerationService;
use crate::domain::error::{ErrorKind, PipelineError};
use crate::domain::requests::ModerationRequest;
use crate::domain::service_config::DOMAIN_SERVICE_REQUEST_BUDGET;

pub const MODERATION_SERVICE: &str = "moderation-service";

const FAILURE_SUMMARY: &str = "An internal error occurred while processing the moderation request.";

pub fn app(service: Arc<ModerationService>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/moderate", post(moderate))
        .layer(TraceLayer::new_for_http())
        .with_state(service)
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "OK", "service": MODERATION_SERVICE }))
}

async fn moderate(
    State(service): State<Arc<ModerationService>>,
    headers: HeaderMap,
    payload: Result<Json<ModerationRequest>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return validation_response(&rejection.body_text()),
    };
    if request.validate().is_err() {
        return validation_response("text or imageUrl is required");
    }

    let deadline = inbound_deadline(&headers, DOMAIN_SERVICE_REQUEST_BUDGET);
    match deadline.run(MODERATION_SERVICE, service.moderate(request, deadline)).await {
        Ok(result) => Json(result).into_response(),
        Err(PipelineError::Validation(message)) => validation_response(&message),
        Err(err) => {
            error!("Moderation failed: {}", err);
            let status = if err.kind() == ErrorKind::Timeout {
                StatusCode::GATEWAY_TIMEOUT
            } else {
                StatusCode::INTERNAL_SERVER_ERROR
            };
            failure_response(status, FAILURE_SUMMARY, &err)
        }
    }
}
