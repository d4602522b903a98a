// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

// API Gateway HTTP surface.
//
// `/api/v1/*` routes sit behind the bearer-token gate. Requests are checked
// for the fields their domain service needs, then proxied verbatim.

use axum::extract::{Request, State};
use axum::http::{header, HeaderMap, Method, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde_json::json;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{debug, warn};

use super::error::{failure_response, validation_response};
use super::inbound_deadline;
use crate::domain::auth::{bearer_token, CredentialCheck, CredentialValidator};
use crate::domain::error::{ErrorKind, PipelineError};
use crate::domain::requests::{AnonymizeRequest, ModerationRequest};
use crate::domain::service_config::GATEWAY_REQUEST_BUDGET;
use crate::infrastructure::http::REQUEST_ID_HEADER;
use crate::infrastructure::proxy::DownstreamProxy;

pub const GATEWAY_SERVICE: &str = "api-gateway";

pub struct GatewayState {
    pub anonymizer: DownstreamProxy,
    pub moderation: DownstreamProxy,
    pub validator: Arc<dyn CredentialValidator>,
}

pub fn app(state: Arc<GatewayState>) -> Router {
    let api = Router::new()
        .route("/api/v1/anonymize", post(anonymize))
        .route("/api/v1/moderate", post(moderate))
        .layer(middleware::from_fn_with_state(state.clone(), require_bearer));

    Router::new()
        .route("/health", get(health))
        .merge(api)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "OK", "service": GATEWAY_SERVICE }))
}

/// Authentication gate: no downstream dispatch happens unless the bearer
/// token validates.
async fn require_bearer(State(state): State<Arc<GatewayState>>, mut request: Request, next: Next) -> Response {
    let token = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(bearer_token);

    match token.map(|t| state.validator.validate(t)) {
        Some(CredentialCheck::Valid(identity)) => {
            debug!(subject = %identity.subject, "Request authenticated");
            request.extensions_mut().insert(identity);
            next.run(request).await
        }
        _ => {
            warn!(path = %request.uri().path(), "Rejected unauthenticated request");
            (StatusCode::UNAUTHORIZED, Json(json!({ "error": "Unauthorized" }))).into_response()
        }
    }
}

async fn anonymize(State(state): State<Arc<GatewayState>>, headers: HeaderMap, body: Bytes) -> Response {
    if let Err(message) = precheck::<AnonymizeRequest>(&body, |r| r.validate()) {
        return validation_response(&message);
    }
    forward(&state.anonymizer, "/anonymize", &headers, body).await
}

async fn moderate(State(state): State<Arc<GatewayState>>, headers: HeaderMap, body: Bytes) -> Response {
    if let Err(message) = precheck::<ModerationRequest>(&body, |r| r.validate()) {
        return validation_response(&message);
    }
    forward(&state.moderation, "/moderate", &headers, body).await
}

/// Decode `body` only to check it; the original bytes are what gets forwarded.
fn precheck<T: DeserializeOwned>(
    body: &[u8],
    validate: impl FnOnce(&T) -> Result<(), PipelineError>,
) -> Result<(), String> {
    let request: T = serde_json::from_slice(body).map_err(|e| format!("malformed JSON body: {}", e))?;
    validate(&request).map_err(|e| match e {
        PipelineError::Validation(message) => message,
        other => other.to_string(),
    })
}

async fn forward(proxy: &DownstreamProxy, path: &str, headers: &HeaderMap, body: Bytes) -> Response {
    let request_id = headers
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
    let deadline = inbound_deadline(headers, GATEWAY_REQUEST_BUDGET);

    let outcome = deadline
        .run(
            proxy.service(),
            proxy.forward(Method::POST, path, headers, body, &request_id, deadline),
        )
        .await;

    match outcome {
        Ok(response) => response,
        Err(err) => {
            warn!(request_id = %request_id, "{} service failed: {}", proxy.service(), err);
            let status = match err.kind() {
                ErrorKind::Timeout => StatusCode::GATEWAY_TIMEOUT,
                _ => StatusCode::SERVICE_UNAVAILABLE,
            };
            let summary = format!("Failed to process request with {} service", proxy.service());
            failure_response(status, &summary, &err)
        }
    }
}
