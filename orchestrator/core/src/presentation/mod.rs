// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Presentation Layer (`privacypilot-core`)
//!
//! HTTP surface of every service in the pipeline. Handlers translate requests
//! into application service calls and map [`PipelineError`] onto status codes.
//! No business logic lives here.
//!
//! | Module | Service | Routes |
//! |--------|---------|--------|
//! | [`gateway`] | api-gateway | `GET /health`, `POST /api/v1/anonymize`, `POST /api/v1/moderate` |
//! | [`anonymizer`] | anonymizer-service | `GET /health`, `POST /anonymize` |
//! | [`moderation`] | moderation-service | `GET /health`, `POST /moderate` |
//! | [`coordinator`] | ai-coordinator | `GET /health`, `POST /process` |
//! | [`ollama_adapter`] | ollama-adapter | `GET /health`, `POST /anonymize` |
//!
//! [`PipelineError`]: crate::domain::error::PipelineError

use axum::http::HeaderMap;
use std::time::Duration;

use crate::domain::deadline::{Deadline, DEADLINE_HEADER};

pub mod anonymizer;
pub mod coordinator;
pub mod error;
pub mod gateway;
pub mod moderation;
pub mod ollama_adapter;

/// Inbound deadline: the caller's announced budget, capped by `budget`.
pub fn inbound_deadline(headers: &HeaderMap, budget: Duration) -> Deadline {
    Deadline::from_header(
        headers.get(DEADLINE_HEADER).and_then(|v| v.to_str().ok()),
        budget,
    )
}
