// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

// HTTP mapping of pipeline failures.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::domain::error::{ErrorKind, PipelineError};

/// Default status for each failure class.
pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::Validation | ErrorKind::Unsupported => StatusCode::BAD_REQUEST,
        ErrorKind::UpstreamUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorKind::UpstreamRejected => StatusCode::BAD_GATEWAY,
        ErrorKind::Timeout => StatusCode::GATEWAY_TIMEOUT,
        ErrorKind::Authentication => StatusCode::UNAUTHORIZED,
    }
}

/// `{"error", "kind", "hop"?, "detail"}` where `error` is the caller-facing
/// summary and `detail` the full failure chain.
pub fn failure_response(status: StatusCode, summary: &str, err: &PipelineError) -> Response {
    let mut body = json!({
        "error": summary,
        "kind": err.kind(),
        "detail": err.to_string(),
    });
    if let Some(hop) = err.hop() {
        body["hop"] = json!(hop);
    }
    (status, Json(body)).into_response()
}

/// 400 with the validation message as the summary.
pub fn validation_response(message: &str) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({ "error": message, "kind": ErrorKind::Validation })),
    )
        .into_response()
}
