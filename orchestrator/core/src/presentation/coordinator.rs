// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

// Coordinator HTTP surface: `POST /process`, `GET /health`.
// Every answer to /process is a TaskResponse envelope.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use super::error::status_for;
use super::inbound_deadline;
use crate::application::coordinator::{TaskCoordinator, COORDINATOR_SERVICE};
use crate::domain::error::PipelineError;
use crate::domain::service_config::COORDINATOR_REQUEST_BUDGET;
use crate::domain::task::{TaskRequest, TaskResponse};

pub fn app(coordinator: Arc<TaskCoordinator>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/process", post(process))
        .layer(TraceLayer::new_for_http())
        .with_state(coordinator)
}

async fn health(State(coordinator): State<Arc<TaskCoordinator>>) -> Json<serde_json::Value> {
    Json(json!({
        "status": "OK",
        "service": COORDINATOR_SERVICE,
        "task_types": coordinator.registry().task_types(),
    }))
}

async fn process(
    State(coordinator): State<Arc<TaskCoordinator>>,
    headers: HeaderMap,
    payload: Result<Json<TaskRequest>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            let err = PipelineError::Validation(rejection.body_text());
            return (StatusCode::BAD_REQUEST, Json(TaskResponse::failed(&err))).into_response();
        }
    };

    let deadline = inbound_deadline(&headers, COORDINATOR_REQUEST_BUDGET);
    let response = coordinator.dispatch(request, deadline).await;
    let status = match response.error_kind {
        None => StatusCode::OK,
        Some(kind) => status_for(kind),
    };
    (status, Json(response)).into_response()
}
