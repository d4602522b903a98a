// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

// Ollama adapter service HTTP surface: `POST /anonymize`, `GET /health`.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

use super::error::{failure_response, status_for, validation_response};
use super::inbound_deadline;
use crate::application::model_anonymizer::ModelAnonymizer;
use crate::domain::error::PipelineError;
use crate::domain::requests::AdapterAnonymizeRequest;
use crate::domain::service_config::ADAPTER_REQUEST_BUDGET;

pub const ADAPTER_SERVICE: &str = "ollama-adapter";

pub fn app(anonymizer: Arc<ModelAnonymizer>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/anonymize", post(anonymize))
        .layer(TraceLayer::new_for_http())
        .with_state(anonymizer)
}

async fn health(State(anonymizer): State<Arc<ModelAnonymizer>>) -> Response {
    match anonymizer.provider().health_check().await {
        Ok(()) => Json(json!({
            "status": "OK",
            "default_model": anonymizer.default_model(),
            "ollama_host_status": "Reachable",
        }))
        .into_response(),
        Err(e) => {
            warn!("Ollama health probe failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "status": "Unavailable", "ollama_error": e.to_string() })),
            )
                .into_response()
        }
    }
}

async fn anonymize(
    State(anonymizer): State<Arc<ModelAnonymizer>>,
    headers: HeaderMap,
    payload: Result<Json<AdapterAnonymizeRequest>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return validation_response(&rejection.body_text()),
    };

    let deadline = inbound_deadline(&headers, ADAPTER_REQUEST_BUDGET);
    let outcome = deadline
        .run(
            ADAPTER_SERVICE,
            anonymizer.anonymize(&request.text, request.model.as_deref(), deadline),
        )
        .await;

    match outcome {
        Ok(response) => Json(response).into_response(),
        Err(PipelineError::Validation(message)) => validation_response(&message),
        Err(err) => {
            error!("Anonymization via Ollama failed: {}", err);
            failure_response(status_for(err.kind()), &err.to_string(), &err)
        }
    }
}
