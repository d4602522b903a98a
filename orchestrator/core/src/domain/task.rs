// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Task
//!
//! Generic task envelope exchanged between domain services and the
//! coordinator (`POST /process`).

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use super::deadline::Deadline;
use super::error::{ErrorKind, PipelineError};

/// Task-specific payload. Its shape is validated by the adapter, never by the
/// coordinator.
pub type TaskPayload = Map<String, Value>;

/// Config key carrying the optional model hint.
pub const MODEL_HINT_KEY: &str = "model";

/// Statically known task types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskType {
    AnonymizeText,
    ModerateText,
    ModerateImage,
}

impl TaskType {
    pub const ALL: [TaskType; 3] = [
        TaskType::AnonymizeText,
        TaskType::ModerateText,
        TaskType::ModerateImage,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskType::AnonymizeText => "anonymize_text",
            TaskType::ModerateText => "moderate_text",
            TaskType::ModerateImage => "moderate_image",
        }
    }
}

impl fmt::Display for TaskType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskType {
    type Err = PipelineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        TaskType::ALL
            .into_iter()
            .find(|t| t.as_str() == normalized)
            .ok_or_else(|| PipelineError::Unsupported(format!("unsupported task type: {}", s)))
    }
}

/// Request sent to the coordinator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskRequest {
    pub task_type: String,
    pub payload: TaskPayload,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub config: HashMap<String, String>,
}

impl TaskRequest {
    pub fn new(task_type: TaskType, payload: TaskPayload) -> Self {
        Self {
            task_type: task_type.as_str().to_string(),
            payload,
            config: HashMap::new(),
        }
    }

    pub fn with_model_hint(mut self, model: impl Into<String>) -> Self {
        self.config.insert(MODEL_HINT_KEY.to_string(), model.into());
        self
    }

    /// Opaque model hint; empty means "let the adapter choose".
    pub fn model_hint(&self) -> Option<&str> {
        self.config
            .get(MODEL_HINT_KEY)
            .map(|m| m.trim())
            .filter(|m| !m.is_empty())
    }
}

/// Uniform result/error envelope returned by the coordinator.
///
/// `success` is true exactly when `result` is present and `error` is absent;
/// only the constructors below build it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<TaskPayload>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<ErrorKind>,
}

impl TaskResponse {
    pub fn succeeded(result: TaskPayload) -> Self {
        Self {
            success: true,
            result: Some(result),
            error: None,
            error_kind: None,
        }
    }

    pub fn failed(err: &PipelineError) -> Self {
        Self {
            success: false,
            result: None,
            error: Some(err.to_string()),
            error_kind: Some(err.kind()),
        }
    }
}

impl From<Result<TaskPayload, PipelineError>> for TaskResponse {
    fn from(outcome: Result<TaskPayload, PipelineError>) -> Self {
        match outcome {
            Ok(result) => TaskResponse::succeeded(result),
            Err(e) => TaskResponse::failed(&e),
        }
    }
}

/// Seam between a domain service and whatever executes its tasks.
#[async_trait]
pub trait TaskSubmitter: Send + Sync {
    async fn submit(&self, request: TaskRequest, deadline: Deadline) -> Result<TaskPayload, PipelineError>;
}
