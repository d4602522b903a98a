// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

// Outbound HTTP helpers shared by every client in the chain.
//
// Maps reqwest transport failures and non-2xx answers onto PipelineError so
// that each client reports failures the same way.

use serde_json::Value;

use crate::domain::error::{ErrorKind, PipelineError};

/// Request id header. The gateway assigns one per call and forwards it to the
/// domain service it proxies to.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Classify a reqwest failure talking to `hop`.
pub fn classify(hop: &str, err: reqwest::Error) -> PipelineError {
    if err.is_timeout() {
        PipelineError::timeout(hop, err.to_string())
    } else if err.is_decode() {
        PipelineError::rejected(hop, None, format!("undecodable response: {}", err))
    } else {
        PipelineError::unavailable(hop, err.to_string())
    }
}

/// Turn a non-2xx response from `hop` into a failure, keeping whatever error
/// text and error class the remote side reported.
pub async fn failure_from_response(hop: &str, response: reqwest::Response) -> PipelineError {
    let status = response.status().as_u16();
    match response.text().await {
        Ok(body) => {
            let (message, kind) = remote_failure(&body);
            let message = message.unwrap_or_else(|| format!("HTTP {}", status));
            PipelineError::from_remote(hop, Some(status), kind, message)
        }
        Err(e) => classify(hop, e),
    }
}

/// Pull `error` and `kind`/`error_kind` out of a JSON error body. Non-JSON
/// bodies are kept as the message when non-empty.
pub fn remote_failure(body: &str) -> (Option<String>, Option<ErrorKind>) {
    let Ok(value) = serde_json::from_str::<Value>(body) else {
        let trimmed = body.trim();
        return ((!trimmed.is_empty()).then(|| trimmed.to_string()), None);
    };

    let message = ["error", "detail", "message"]
        .iter()
        .find_map(|key| value.get(key).and_then(Value::as_str))
        .map(str::to_string);
    let kind = ["error_kind", "kind"]
        .iter()
        .find_map(|key| value.get(key).and_then(Value::as_str))
        .and_then(|k| k.parse().ok());

    (message, kind)
}
