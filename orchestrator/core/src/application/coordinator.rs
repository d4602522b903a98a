// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

// Task Coordinator - Application Service
//
// Routes an abstract task to the single adapter registered for its type and
// normalizes the outcome into the TaskResponse envelope. Stateless between
// calls; the only side effect is the outbound adapter call. No retries.

use serde_json::Value;
use tracing::{info, warn};

use crate::domain::deadline::Deadline;
use crate::domain::error::PipelineError;
use crate::domain::task::{TaskPayload, TaskRequest, TaskResponse, TaskType};
use crate::infrastructure::adapters::AdapterRegistry;

/// Service name of the coordinator on the wire.
pub const COORDINATOR_SERVICE: &str = "ai-coordinator";

pub struct TaskCoordinator {
    registry: AdapterRegistry,
}

impl TaskCoordinator {
    pub fn new(registry: AdapterRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &AdapterRegistry {
        &self.registry
    }

    /// Dispatch one task under `deadline` and wrap the outcome in the
    /// uniform envelope.
    pub async fn dispatch(&self, request: TaskRequest, deadline: Deadline) -> TaskResponse {
        let outcome = self.process(&request, deadline).await;
        if let Err(e) = &outcome {
            warn!(task_type = %request.task_type, kind = %e.kind(), "Task failed: {}", e);
        }
        TaskResponse::from(outcome)
    }

    /// Resolve the adapter and invoke it once. The adapter call is abandoned
    /// when `deadline` passes; either way a failure names the task type and
    /// the adapter.
    pub async fn process(&self, request: &TaskRequest, deadline: Deadline) -> Result<TaskPayload, PipelineError> {
        let task_type: TaskType = request.task_type.parse()?;

        let adapter = self.registry.route(task_type).ok_or_else(|| {
            PipelineError::Unsupported(format!("adapter not configured for task type '{}'", task_type))
        })?;
        let adapter_name = adapter.descriptor().name.clone();
        let model_hint = request.model_hint();

        info!(
            task_type = %task_type,
            adapter = %adapter_name,
            model_hint = model_hint.unwrap_or("<default>"),
            "Dispatching task"
        );

        let output = deadline
            .run(
                &adapter_name,
                adapter.invoke(task_type, &request.payload, model_hint, deadline),
            )
            .await
            .map_err(|e| {
                e.with_context(format!(
                    "failed to process task '{}' via adapter '{}'",
                    task_type, adapter_name
                ))
            })?;

        info!(
            task_type = %task_type,
            adapter = %adapter_name,
            model_used = %output.model_used,
            "Task completed"
        );

        let mut result = output.fields;
        result.insert("model_used".into(), Value::String(output.model_used));
        result.insert("adapter".into(), Value::String(adapter_name));
        Ok(result)
    }
}
