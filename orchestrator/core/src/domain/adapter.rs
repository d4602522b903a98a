// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Adapter
//!
//! Domain interface for model adapters (Anti-Corruption Layer).
//!
//! An adapter translates a generic task into one backend provider's wire
//! protocol. The coordinator only sees this trait; concrete clients live in
//! `infrastructure::adapters`.

use async_trait::async_trait;
use std::collections::BTreeSet;
use std::time::Duration;

use super::deadline::Deadline;
use super::error::PipelineError;
use super::task::{TaskPayload, TaskType};

/// Static description of one configured adapter.
///
/// Built once at startup and shared read-only by every request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdapterDescriptor {
    pub name: String,
    pub base_url: String,
    /// Per-call ceiling; the effective timeout is never longer than the
    /// caller's remaining budget.
    pub timeout: Duration,
    pub capabilities: BTreeSet<TaskType>,
}

impl AdapterDescriptor {
    pub fn new(name: impl Into<String>, base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            name: name.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout,
            capabilities: BTreeSet::new(),
        }
    }

    pub fn with_capability(mut self, task_type: TaskType) -> Self {
        self.capabilities.insert(task_type);
        self
    }

    pub fn supports(&self, task_type: TaskType) -> bool {
        self.capabilities.contains(&task_type)
    }
}

/// What an adapter hands back on success.
#[derive(Debug, Clone, PartialEq)]
pub struct AdapterOutput {
    /// Task-specific result fields (e.g. `anonymized_text`).
    pub fields: TaskPayload,
    /// Model that actually served the request.
    pub model_used: String,
}

#[async_trait]
pub trait TaskAdapter: Send + Sync {
    fn descriptor(&self) -> &AdapterDescriptor;

    /// Run `task_type` against the backend.
    ///
    /// Payloads missing a required field fail with
    /// [`PipelineError::Validation`] before any network call.
    async fn invoke(
        &self,
        task_type: TaskType,
        payload: &TaskPayload,
        model_hint: Option<&str>,
        deadline: Deadline,
    ) -> Result<AdapterOutput, PipelineError>;
}
