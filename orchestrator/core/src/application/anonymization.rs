// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

// Anonymization Service
//
// Stable anonymize contract in front of the task coordinator. Callers never
// see task types or the envelope.

use serde_json::Value;
use std::sync::Arc;
use tracing::info;

use crate::domain::deadline::Deadline;
use crate::domain::error::PipelineError;
use crate::domain::requests::{AnonymizeRequest, AnonymizeResponse};
use crate::domain::task::{TaskPayload, TaskRequest, TaskSubmitter, TaskType};
use crate::infrastructure::coordinator_client::COORDINATOR_HOP;

pub struct AnonymizationService {
    coordinator: Arc<dyn TaskSubmitter>,
}

impl AnonymizationService {
    pub fn new(coordinator: Arc<dyn TaskSubmitter>) -> Self {
        Self { coordinator }
    }

    pub async fn anonymize(
        &self,
        request: AnonymizeRequest,
        deadline: Deadline,
    ) -> Result<AnonymizeResponse, PipelineError> {
        request.validate()?;

        let mut payload = TaskPayload::new();
        payload.insert("text".into(), Value::String(request.text.clone()));

        let result = self
            .coordinator
            .submit(TaskRequest::new(TaskType::AnonymizeText, payload), deadline)
            .await?;

        let anonymized_text = result
            .get("anonymized_text")
            .and_then(Value::as_str)
            .ok_or_else(|| {
                PipelineError::rejected(COORDINATOR_HOP, None, "result is missing 'anonymized_text'")
            })?
            .to_string();

        if let Some(model) = result.get("model_used").and_then(Value::as_str) {
            info!("Text anonymized by model {}", model);
        }

        Ok(AnonymizeResponse {
            original_text: request.text,
            anonymized_text,
        })
    }
}
