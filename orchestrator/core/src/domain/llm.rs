// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Llm
//!
//! LLM Provider Domain Interface (Anti-Corruption Layer)
//!
//! Isolates the adapter service from the provider's HTTP API. Implementations
//! live in `infrastructure/llm/`.
//!
//! Providers are always asked for non-streaming output, but the response may
//! still arrive as any number of chunks. [`ChunkFold`] folds them into a single
//! [`Completion`], ending at the chunk flagged `done`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::deadline::Deadline;
use super::error::PipelineError;

#[async_trait]
pub trait LLMProvider: Send + Sync {
    /// Provider name used as the hop name in errors (e.g., "ollama")
    fn name(&self) -> &str;

    /// Generate a completion, never exceeding `deadline`
    async fn generate(
        &self,
        request: &GenerationRequest,
        deadline: Deadline,
    ) -> Result<Completion, PipelineError>;

    /// Check if provider is healthy and accessible
    async fn health_check(&self) -> Result<(), PipelineError>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    /// Always resolved by the caller; providers never pick a model themselves
    pub model: String,
    pub prompt: String,
    pub system: Option<String>,
    pub options: GenerationOptions,
}

/// Options for LLM generation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerationOptions {
    /// Sampling temperature (0.0 = deterministic, 1.0 = creative)
    pub temperature: Option<f32>,
}

/// Final provider output.
///
/// `Empty` is advisory: the provider answered but produced no text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    Text(String),
    Empty,
}

impl Completion {
    pub fn text(&self) -> &str {
        match self {
            Completion::Text(text) => text,
            Completion::Empty => "",
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Completion::Empty)
    }
}

/// One provider output chunk.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ProviderChunk {
    #[serde(default)]
    pub response: String,
    #[serde(default)]
    pub done: bool,
    #[serde(default)]
    pub error: Option<String>,
}

impl ProviderChunk {
    pub fn text(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
            ..Self::default()
        }
    }

    pub fn done() -> Self {
        Self {
            done: true,
            ..Self::default()
        }
    }
}

/// Accumulates provider chunks into one buffer.
#[derive(Debug, Default)]
pub struct ChunkFold {
    buffer: String,
    chunks: usize,
    done: bool,
}

impl ChunkFold {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one chunk. A chunk carrying an `error` aborts the fold with the
    /// provider's message. Chunks after `done` are ignored.
    pub fn push(&mut self, chunk: ProviderChunk) -> Result<(), String> {
        if self.done {
            debug!("Ignoring provider chunk received after done signal");
            return Ok(());
        }
        if let Some(error) = chunk.error.filter(|e| !e.is_empty()) {
            return Err(error);
        }
        self.chunks += 1;
        self.buffer.push_str(&chunk.response);
        self.done = chunk.done;
        Ok(())
    }

    pub fn chunks(&self) -> usize {
        self.chunks
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    pub fn finish(self) -> Completion {
        let text = self.buffer.trim();
        if text.is_empty() {
            Completion::Empty
        } else {
            Completion::Text(text.to_string())
        }
    }
}

/// Fold a whole chunk sequence.
pub fn accumulate<I>(chunks: I) -> Result<Completion, String>
where
    I: IntoIterator<Item = ProviderChunk>,
{
    let mut fold = ChunkFold::new();
    for chunk in chunks {
        fold.push(chunk)?;
    }
    Ok(fold.finish())
}
