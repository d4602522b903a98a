// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

// Ollama LLM Provider Adapter
//
// Anti-Corruption Layer for Ollama local models.
// Always asks for non-streaming output, yet reads the body as newline
// delimited chunks so that one, many or zero chunks fold the same way.

use async_trait::async_trait;
use futures::StreamExt;
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

use crate::domain::deadline::{Deadline, DEADLINE_HEADER};
use crate::domain::error::PipelineError;
use crate::domain::llm::{ChunkFold, Completion, GenerationRequest, LLMProvider, ProviderChunk};
use crate::domain::service_config::PROVIDER_CALL_TIMEOUT;
use crate::infrastructure::http::{classify, failure_from_response};

const HEALTH_TIMEOUT: Duration = Duration::from_secs(5);

pub struct OllamaProvider {
    client: reqwest::Client,
    endpoint: String,
    ceiling: Duration,
}

#[derive(Serialize)]
struct OllamaRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<&'a str>,
    stream: bool,
    options: OllamaOptions,
}

#[derive(Serialize)]
struct OllamaOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

impl OllamaProvider {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            ceiling: PROVIDER_CALL_TIMEOUT,
        }
    }

    /// Override the per-call ceiling (the deadline still clamps it).
    pub fn with_ceiling(mut self, ceiling: Duration) -> Self {
        self.ceiling = ceiling;
        self
    }

    fn fold_line(&self, fold: &mut ChunkFold, line: &[u8]) -> Result<(), PipelineError> {
        if line.iter().all(u8::is_ascii_whitespace) {
            return Ok(());
        }
        let chunk: ProviderChunk = serde_json::from_slice(line).map_err(|e| {
            PipelineError::rejected(self.name(), None, format!("malformed output chunk: {}", e))
        })?;
        fold.push(chunk)
            .map_err(|message| PipelineError::rejected(self.name(), None, message))
    }
}

#[async_trait]
impl LLMProvider for OllamaProvider {
    fn name(&self) -> &str {
        "ollama"
    }

    async fn generate(
        &self,
        request: &GenerationRequest,
        deadline: Deadline,
    ) -> Result<Completion, PipelineError> {
        let timeout = deadline.timeout_for(self.name(), self.ceiling)?;

        let body = OllamaRequest {
            model: &request.model,
            prompt: &request.prompt,
            system: request.system.as_deref(),
            stream: false,
            options: OllamaOptions {
                temperature: request.options.temperature,
            },
        };

        let url = format!("{}/api/generate", self.endpoint);

        let response = self
            .client
            .post(&url)
            .header(DEADLINE_HEADER, Deadline::header_value(timeout))
            .timeout(timeout)
            .json(&body)
            .send()
            .await
            .map_err(|e| classify(self.name(), e))?;

        if !response.status().is_success() {
            if response.status() == reqwest::StatusCode::NOT_FOUND {
                return Err(PipelineError::rejected(
                    self.name(),
                    Some(404),
                    format!("model '{}' not found", request.model),
                ));
            }
            return Err(failure_from_response(self.name(), response).await);
        }

        let mut fold = ChunkFold::new();
        let mut pending: Vec<u8> = Vec::new();
        let mut stream = response.bytes_stream();

        while let Some(frame) = stream.next().await {
            let frame = frame.map_err(|e| classify(self.name(), e))?;
            pending.extend_from_slice(&frame);
            while let Some(pos) = pending.iter().position(|b| *b == b'\n') {
                let line: Vec<u8> = pending.drain(..=pos).collect();
                self.fold_line(&mut fold, &line)?;
            }
        }
        self.fold_line(&mut fold, &pending)?;

        debug!(
            "Ollama returned {} chunk(s), done={} for model {}",
            fold.chunks(),
            fold.is_done(),
            request.model
        );
        Ok(fold.finish())
    }

    async fn health_check(&self) -> Result<(), PipelineError> {
        // Listing local models proves the server is up
        let url = format!("{}/api/tags", self.endpoint);

        let response = self
            .client
            .get(&url)
            .timeout(HEALTH_TIMEOUT)
            .send()
            .await
            .map_err(|e| classify(self.name(), e))?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(PipelineError::rejected(
                self.name(),
                Some(response.status().as_u16()),
                format!("HTTP {}", response.status()),
            ))
        }
    }
}
