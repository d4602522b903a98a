// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

// Model Anonymizer - Application Service
//
// Runs inside the adapter service: builds the anonymization prompt, picks the
// model and asks the LLM provider for a completion.

use std::sync::Arc;
use tracing::{info, warn};

use crate::domain::deadline::Deadline;
use crate::domain::error::PipelineError;
use crate::domain::llm::{GenerationOptions, GenerationRequest, LLMProvider};
use crate::domain::requests::AdapterAnonymizeResponse;

const SYSTEM_PROMPT: &str = "You are an expert text anonymizer. Your task is to identify and replace \
Personal Identifiable Information (PII) in the provided text with placeholders like [NAME], [EMAIL], \
[PHONE], [ADDRESS], [CREDIT_CARD], [SSN], etc. Only output the anonymized text, without any \
introductory phrases, explanations, or markdown formatting. Preserve the original structure and \
non-sensitive parts of the text.";

const TEMPERATURE: f32 = 0.2;

pub struct ModelAnonymizer {
    provider: Arc<dyn LLMProvider>,
    default_model: String,
}

impl ModelAnonymizer {
    pub fn new(provider: Arc<dyn LLMProvider>, default_model: impl Into<String>) -> Self {
        Self {
            provider,
            default_model: default_model.into(),
        }
    }

    pub fn default_model(&self) -> &str {
        &self.default_model
    }

    pub fn provider(&self) -> &Arc<dyn LLMProvider> {
        &self.provider
    }

    /// An explicit, non-blank hint wins; otherwise the process default.
    pub fn select_model<'a>(&'a self, hint: Option<&'a str>) -> &'a str {
        hint.map(str::trim)
            .filter(|m| !m.is_empty())
            .unwrap_or(self.default_model.as_str())
    }

    pub async fn anonymize(
        &self,
        text: &str,
        model_hint: Option<&str>,
        deadline: Deadline,
    ) -> Result<AdapterAnonymizeResponse, PipelineError> {
        if text.trim().is_empty() {
            return Err(PipelineError::Validation("text is required".into()));
        }

        let model = self.select_model(model_hint).to_string();
        let request = GenerationRequest {
            model: model.clone(),
            prompt: format!("Anonymize the following text:\n\n\"{}\"", text),
            system: Some(SYSTEM_PROMPT.to_string()),
            options: GenerationOptions {
                temperature: Some(TEMPERATURE),
            },
        };

        info!("Anonymizing {} chars with model {}", text.len(), model);
        let completion = self.provider.generate(&request, deadline).await?;

        if completion.is_empty() {
            warn!("Model {} returned an empty anonymization result", model);
        }

        Ok(AdapterAnonymizeResponse {
            anonymized_text: completion.text().to_string(),
            model_used: model,
            empty_result: completion.is_empty(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::llm::Completion;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use std::time::Duration;

    #[derive(Default)]
    struct RecordingProvider {
        seen: Mutex<Vec<GenerationRequest>>,
        reply: Option<Completion>,
    }

    #[async_trait]
    impl LLMProvider for RecordingProvider {
        fn name(&self) -> &str {
            "recording"
        }

        async fn generate(
            &self,
            request: &GenerationRequest,
            _deadline: Deadline,
        ) -> Result<Completion, PipelineError> {
            self.seen.lock().unwrap().push(request.clone());
            Ok(self.reply.clone().unwrap_or(Completion::Empty))
        }

        async fn health_check(&self) -> Result<(), PipelineError> {
            Ok(())
        }
    }

    fn deadline() -> Deadline {
        Deadline::after(Duration::from_secs(60))
    }

    #[tokio::test]
    async fn hint_overrides_default_model() {
        let provider = Arc::new(RecordingProvider {
            reply: Some(Completion::Text("[NAME] here".into())),
            ..Default::default()
        });
        let anonymizer = ModelAnonymizer::new(provider.clone(), "mistral:7b");

        let out = anonymizer.anonymize("Bob here", Some("model-b"), deadline()).await.unwrap();
        assert_eq!(out.model_used, "model-b");
        assert_eq!(out.anonymized_text, "[NAME] here");
        assert!(!out.empty_result);

        let out = anonymizer.anonymize("Bob here", Some(" "), deadline()).await.unwrap();
        assert_eq!(out.model_used, "mistral:7b");

        let seen = provider.seen.lock().unwrap();
        assert_eq!(seen[0].model, "model-b");
        assert_eq!(seen[0].prompt, "Anonymize the following text:\n\n\"Bob here\"");
        assert_eq!(seen[0].options.temperature, Some(0.2));
        assert!(seen[0].system.as_deref().unwrap().contains("[EMAIL]"));
    }

    #[tokio::test]
    async fn empty_completion_is_flagged_not_failed() {
        let provider = Arc::new(RecordingProvider::default());
        let anonymizer = ModelAnonymizer::new(provider, "mistral:7b");

        let out = anonymizer.anonymize("Bob", None, deadline()).await.unwrap();
        assert!(out.empty_result);
        assert_eq!(out.anonymized_text, "");
    }

    #[tokio::test]
    async fn blank_text_never_reaches_the_provider() {
        let provider = Arc::new(RecordingProvider::default());
        let anonymizer = ModelAnonymizer::new(provider.clone(), "mistral:7b");

        let err = anonymizer.anonymize("  ", None, deadline()).await.unwrap_err();
        assert!(matches!(err, PipelineError::Validation(_)));
        assert!(provider.seen.lock().unwrap().is_empty());
    }
}
