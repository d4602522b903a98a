// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Public request/response contracts of the gateway and the domain services.

use serde::{Deserialize, Serialize};

use super::error::PipelineError;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnonymizeRequest {
    #[serde(default)]
    pub text: String,
}

impl AnonymizeRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn validate(&self) -> Result<(), PipelineError> {
        if self.text.trim().is_empty() {
            return Err(PipelineError::Validation("text is required".into()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnonymizeResponse {
    pub original_text: String,
    pub anonymized_text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModerationRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(rename = "imageUrl", default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl ModerationRequest {
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref().filter(|t| !t.trim().is_empty())
    }

    pub fn image_url(&self) -> Option<&str> {
        self.image_url.as_deref().filter(|u| !u.trim().is_empty())
    }

    pub fn validate(&self) -> Result<(), PipelineError> {
        if self.text().is_none() && self.image_url().is_none() {
            return Err(PipelineError::Validation(
                "text or imageUrl must be provided".into(),
            ));
        }
        Ok(())
    }
}

/// Body of the adapter service's `POST /anonymize`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AdapterAnonymizeRequest {
    #[serde(default)]
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdapterAnonymizeResponse {
    pub anonymized_text: String,
    pub model_used: String,
    /// Set when the provider answered without producing any text.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub empty_result: bool,
}

/// Expected shape of a moderation result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModerationVerdict {
    pub is_acceptable: bool,
    #[serde(default)]
    pub flags: Vec<String>,
    #[serde(default)]
    pub details: String,
    #[serde(default)]
    pub confidence_score: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn moderation_needs_text_or_image() {
        let empty: ModerationRequest = serde_json::from_str("{}").unwrap();
        assert!(empty.validate().is_err());

        let blank: ModerationRequest = serde_json::from_str(r#"{"text": "", "imageUrl": " "}"#).unwrap();
        assert!(blank.validate().is_err());

        let image: ModerationRequest =
            serde_json::from_str(r#"{"imageUrl": "https://example.com/cat.png"}"#).unwrap();
        assert!(image.validate().is_ok());
        assert_eq!(image.image_url(), Some("https://example.com/cat.png"));
    }

    #[test]
    fn adapter_response_only_flags_empty_results() {
        let full = AdapterAnonymizeResponse {
            anonymized_text: "[NAME]".into(),
            model_used: "mistral:7b".into(),
            empty_result: false,
        };
        let wire = serde_json::to_value(&full).unwrap();
        assert!(wire.get("empty_result").is_none());

        let parsed: AdapterAnonymizeResponse =
            serde_json::from_str(r#"{"anonymized_text": "", "model_used": "m", "empty_result": true}"#).unwrap();
        assert!(parsed.empty_result);
    }

    #[test]
    fn anonymize_needs_text() {
        let missing: AnonymizeRequest = serde_json::from_str("{}").unwrap();
        let err = missing.validate().unwrap_err();
        assert!(err.to_string().contains("text is required"));
        assert!(AnonymizeRequest::new("Alice").validate().is_ok());
    }
}
