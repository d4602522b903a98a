// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;

use privacypilot_core::domain::requests::{
    AnonymizeRequest, AnonymizeResponse, ModerationRequest, ModerationVerdict,
};

use crate::error::{ClientError, Result};

/// Client for the PrivacyPilot API gateway.
pub struct PrivacyPilotClient {
    base_url: String,
    client: Client,
    api_key: Option<String>,
}

impl PrivacyPilotClient {
    /// Create a new client for the gateway at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: Client::new(),
            api_key: None,
        }
    }

    /// Set the bearer token sent with every `/api/v1` call.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Replace personal data in `text` with placeholders.
    pub async fn anonymize(&self, text: &str) -> Result<AnonymizeResponse> {
        let body = AnonymizeRequest::new(text);
        body.validate()
            .map_err(|e| ClientError::InvalidRequest(e.to_string()))?;

        let req = self
            .client
            .post(format!("{}/api/v1/anonymize", self.base_url))
            .json(&body);
        Self::decode(self.authorized(req).send().await?).await
    }

    /// Moderate text, an image, or an image with text as its context.
    pub async fn moderate(&self, text: Option<&str>, image_url: Option<&str>) -> Result<ModerationVerdict> {
        let body = ModerationRequest {
            text: text.map(str::to_string),
            image_url: image_url.map(str::to_string),
        };
        body.validate()
            .map_err(|e| ClientError::InvalidRequest(e.to_string()))?;

        let req = self
            .client
            .post(format!("{}/api/v1/moderate", self.base_url))
            .json(&body);
        Self::decode(self.authorized(req).send().await?).await
    }

    /// Gateway liveness.
    pub async fn health(&self) -> Result<Value> {
        let response = self
            .client
            .get(format!("{}/health", self.base_url))
            .send()
            .await?;
        Self::decode(response).await
    }

    fn authorized(&self, req: RequestBuilder) -> RequestBuilder {
        match &self.api_key {
            Some(key) => req.header("Authorization", format!("Bearer {}", key)),
            None => req,
        }
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json().await?);
        }

        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<Value>(&text)
            .ok()
            .and_then(|v| v.get("error").and_then(Value::as_str).map(str::to_string))
            .unwrap_or(text);
        Err(ClientError::Api {
            status: status.as_u16(),
            message,
        })
    }
}
