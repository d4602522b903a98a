// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

// Coordinator Client
//
// Domain-service side of `POST /process`. One instance per process, shared by
// every request handler.

use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

use crate::domain::deadline::{Deadline, DEADLINE_HEADER};
use crate::domain::error::PipelineError;
use crate::domain::service_config::COORDINATOR_CALL_TIMEOUT;
use crate::domain::task::{TaskPayload, TaskRequest, TaskResponse, TaskSubmitter};
use crate::infrastructure::http::{classify, remote_failure};

pub const COORDINATOR_HOP: &str = "ai-coordinator";

#[derive(Clone)]
pub struct CoordinatorClient {
    client: reqwest::Client,
    base_url: String,
    ceiling: Duration,
}

impl CoordinatorClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            ceiling: COORDINATOR_CALL_TIMEOUT,
        }
    }

    pub fn with_ceiling(mut self, ceiling: Duration) -> Self {
        self.ceiling = ceiling;
        self
    }
}

#[async_trait]
impl TaskSubmitter for CoordinatorClient {
    async fn submit(&self, request: TaskRequest, deadline: Deadline) -> Result<TaskPayload, PipelineError> {
        let timeout = deadline.timeout_for(COORDINATOR_HOP, self.ceiling)?;
        debug!("Submitting task '{}' to coordinator", request.task_type);

        let response = self
            .client
            .post(format!("{}/process", self.base_url))
            .header(DEADLINE_HEADER, Deadline::header_value(timeout))
            .timeout(timeout)
            .json(&request)
            .send()
            .await
            .map_err(|e| classify(COORDINATOR_HOP, e))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| classify(COORDINATOR_HOP, e))?;

        let envelope: TaskResponse = match serde_json::from_str(&body) {
            Ok(envelope) => envelope,
            Err(e) if status.is_success() => {
                return Err(PipelineError::rejected(
                    COORDINATOR_HOP,
                    Some(status.as_u16()),
                    format!("undecodable response: {}", e),
                ));
            }
            Err(_) => {
                let (message, kind) = remote_failure(&body);
                return Err(PipelineError::from_remote(
                    COORDINATOR_HOP,
                    Some(status.as_u16()),
                    kind,
                    message.unwrap_or_else(|| format!("HTTP {}", status)),
                ));
            }
        };

        match envelope {
            TaskResponse {
                success: true,
                result: Some(result),
                error: None,
                ..
            } if status.is_success() => Ok(result),
            TaskResponse { error, error_kind, .. } => Err(PipelineError::from_remote(
                COORDINATOR_HOP,
                Some(status.as_u16()),
                error_kind,
                error.unwrap_or_else(|| format!("task failed with HTTP {}", status)),
            )),
        }
    }
}
