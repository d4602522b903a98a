// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

// Downstream Proxy
//
// Forwards an authenticated gateway request to one domain service and
// streams the answer back. Non-5xx answers pass through verbatim (status,
// end-to-end headers, body). 5xx answers and transport failures become
// PipelineError so the gateway can report them uniformly.

use axum::body::Body;
use axum::http::{header, HeaderMap, HeaderName, Method};
use axum::response::Response;
use bytes::Bytes;
use std::time::Duration;
use tracing::{debug, warn};

use crate::domain::deadline::{Deadline, DEADLINE_HEADER};
use crate::domain::error::PipelineError;
use crate::domain::service_config::GATEWAY_DOWNSTREAM_TIMEOUT;
use crate::infrastructure::http::{classify, failure_from_response, REQUEST_ID_HEADER};

/// Headers that describe one connection and are never copied across it.
const HOP_BY_HOP: [&str; 8] = [
    "connection",
    "keep-alive",
    "proxy-authenticate",
    "proxy-authorization",
    "te",
    "trailer",
    "transfer-encoding",
    "upgrade",
];

#[derive(Clone)]
pub struct DownstreamProxy {
    client: reqwest::Client,
    service: String,
    base_url: String,
    ceiling: Duration,
}

impl DownstreamProxy {
    pub fn new(service: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            service: service.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            ceiling: GATEWAY_DOWNSTREAM_TIMEOUT,
        }
    }

    pub fn with_ceiling(mut self, ceiling: Duration) -> Self {
        self.ceiling = ceiling;
        self
    }

    /// Downstream service name, also the hop name in errors.
    pub fn service(&self) -> &str {
        &self.service
    }

    pub async fn forward(
        &self,
        method: Method,
        path: &str,
        headers: &HeaderMap,
        body: Bytes,
        request_id: &str,
        deadline: Deadline,
    ) -> Result<Response, PipelineError> {
        let timeout = deadline.timeout_for(&self.service, self.ceiling)?;
        let url = format!("{}{}", self.base_url, path);
        debug!("Proxying {} {} (timeout {:?})", method, url, timeout);

        let mut outbound = self
            .client
            .request(method, &url)
            .header(REQUEST_ID_HEADER, request_id)
            .header(DEADLINE_HEADER, Deadline::header_value(timeout))
            .timeout(timeout)
            .body(body);
        for name in [header::CONTENT_TYPE, header::ACCEPT] {
            if let Some(value) = headers.get(&name) {
                outbound = outbound.header(name, value.clone());
            }
        }

        let response = outbound.send().await.map_err(|e| classify(&self.service, e))?;
        let status = response.status();

        if status.is_server_error() {
            warn!("{} service answered {}", self.service, status);
            return Err(failure_from_response(&self.service, response).await);
        }

        let mut builder = Response::builder().status(status);
        for (name, value) in response.headers() {
            if !is_hop_by_hop(name) {
                builder = builder.header(name, value);
            }
        }

        builder
            .body(Body::from_stream(response.bytes_stream()))
            .map_err(|e| PipelineError::rejected(&self.service, Some(status.as_u16()), e.to_string()))
    }
}

fn is_hop_by_hop(name: &HeaderName) -> bool {
    HOP_BY_HOP.contains(&name.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hop_by_hop_headers_are_recognised() {
        assert!(is_hop_by_hop(&header::CONNECTION));
        assert!(is_hop_by_hop(&header::TRANSFER_ENCODING));
        assert!(!is_hop_by_hop(&header::CONTENT_TYPE));
        assert!(!is_hop_by_hop(&HeaderName::from_static("x-request-id")));
    }
}
