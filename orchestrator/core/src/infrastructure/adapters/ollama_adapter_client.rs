// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

// Ollama Adapter Client
//
// Coordinator-side client for the ollama-adapter service. Translates the
// generic anonymize_text payload into `POST /anonymize {text, model?}`.

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use crate::domain::adapter::{AdapterDescriptor, AdapterOutput, TaskAdapter};
use crate::domain::deadline::{Deadline, DEADLINE_HEADER};
use crate::domain::error::PipelineError;
use crate::domain::requests::{AdapterAnonymizeRequest, AdapterAnonymizeResponse};
use crate::domain::service_config::ADAPTER_CALL_TIMEOUT;
use crate::domain::task::{TaskPayload, TaskType};
use crate::infrastructure::http::{classify, failure_from_response};

pub const OLLAMA_ADAPTER_NAME: &str = "ollama-adapter";

pub struct OllamaAdapterClient {
    client: reqwest::Client,
    descriptor: AdapterDescriptor,
}

impl OllamaAdapterClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_descriptor(
            AdapterDescriptor::new(OLLAMA_ADAPTER_NAME, base_url, ADAPTER_CALL_TIMEOUT)
                .with_capability(TaskType::AnonymizeText),
        )
    }

    pub fn with_descriptor(descriptor: AdapterDescriptor) -> Self {
        Self {
            client: reqwest::Client::new(),
            descriptor,
        }
    }

    fn required_text<'a>(task_type: TaskType, payload: &'a TaskPayload) -> Result<&'a str, PipelineError> {
        payload
            .get("text")
            .and_then(Value::as_str)
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| {
                PipelineError::Validation(format!(
                    "payload field 'text' is required for task type '{}'",
                    task_type
                ))
            })
    }
}

#[async_trait]
impl TaskAdapter for OllamaAdapterClient {
    fn descriptor(&self) -> &AdapterDescriptor {
        &self.descriptor
    }

    async fn invoke(
        &self,
        task_type: TaskType,
        payload: &TaskPayload,
        model_hint: Option<&str>,
        deadline: Deadline,
    ) -> Result<AdapterOutput, PipelineError> {
        let hop = self.descriptor.name.as_str();
        if !self.descriptor.supports(task_type) {
            return Err(PipelineError::Unsupported(format!(
                "adapter '{}' does not handle task type '{}'",
                hop, task_type
            )));
        }

        let text = Self::required_text(task_type, payload)?;
        let timeout = deadline.timeout_for(hop, self.descriptor.timeout)?;

        let body = AdapterAnonymizeRequest {
            text: text.to_string(),
            model: model_hint.map(str::to_string),
        };
        let url = format!("{}/anonymize", self.descriptor.base_url);
        debug!("Calling {} with timeout {:?}", url, timeout);

        let response = self
            .client
            .post(&url)
            .header(DEADLINE_HEADER, Deadline::header_value(timeout))
            .timeout(timeout)
            .json(&body)
            .send()
            .await
            .map_err(|e| classify(hop, e))?;

        if !response.status().is_success() {
            return Err(failure_from_response(hop, response).await);
        }

        let parsed: AdapterAnonymizeResponse = response.json().await.map_err(|e| classify(hop, e))?;

        let mut fields = TaskPayload::new();
        fields.insert("anonymized_text".into(), Value::String(parsed.anonymized_text));
        if parsed.empty_result {
            fields.insert("empty_result".into(), Value::Bool(true));
        }

        Ok(AdapterOutput {
            fields,
            model_used: parsed.model_used,
        })
    }
}
