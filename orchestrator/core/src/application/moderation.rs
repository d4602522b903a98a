// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

// Moderation Service
//
// Chooses moderate_image when an image is supplied (text becomes its
// context), moderate_text otherwise. The coordinator's result mapping is
// returned as is.

use serde_json::Value;
use std::sync::Arc;

use crate::domain::deadline::Deadline;
use crate::domain::error::PipelineError;
use crate::domain::requests::ModerationRequest;
use crate::domain::task::{TaskPayload, TaskRequest, TaskSubmitter, TaskType};

pub struct ModerationService {
    coordinator: Arc<dyn TaskSubmitter>,
}

impl ModerationService {
    pub fn new(coordinator: Arc<dyn TaskSubmitter>) -> Self {
        Self { coordinator }
    }

    pub fn task_for(request: &ModerationRequest) -> Result<TaskRequest, PipelineError> {
        request.validate()?;

        let mut payload = TaskPayload::new();
        let task_type = match request.image_url() {
            Some(image_url) => {
                payload.insert("imageUrl".into(), Value::String(image_url.to_string()));
                if let Some(text) = request.text() {
                    payload.insert("textContext".into(), Value::String(text.to_string()));
                }
                TaskType::ModerateImage
            }
            None => {
                let text = request.text().unwrap_or_default();
                payload.insert("text".into(), Value::String(text.to_string()));
                TaskType::ModerateText
            }
        };
        Ok(TaskRequest::new(task_type, payload))
    }

    pub async fn moderate(
        &self,
        request: ModerationRequest,
        deadline: Deadline,
    ) -> Result<TaskPayload, PipelineError> {
        let task = Self::task_for(&request)?;
        self.coordinator.submit(task, deadline).await
    }
}
