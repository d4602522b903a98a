// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

// Service Configuration Types
//
// One struct per service binary. Mandatory downstream addresses are checked
// here so that a missing address fails at startup; optional ones only degrade
// the feature that depends on them.
//
// Request budgets and per-hop ceilings are defined alongside, since every hop
// derives its outbound timeout from them (see domain::deadline).

use std::time::Duration;
use url::Url;

/// Whole-request budget of the gateway.
pub const GATEWAY_REQUEST_BUDGET: Duration = Duration::from_secs(60);
/// Ceiling for one gateway -> domain service call.
pub const GATEWAY_DOWNSTREAM_TIMEOUT: Duration = Duration::from_secs(30);

/// Whole-request budget of the anonymizer and moderation services.
pub const DOMAIN_SERVICE_REQUEST_BUDGET: Duration = Duration::from_secs(30);
/// Ceiling for one domain service -> coordinator call.
pub const COORDINATOR_CALL_TIMEOUT: Duration = Duration::from_secs(20);

/// Whole-request budget of the coordinator.
pub const COORDINATOR_REQUEST_BUDGET: Duration = Duration::from_secs(65);
/// Ceiling for one coordinator -> adapter call.
pub const ADAPTER_CALL_TIMEOUT: Duration = Duration::from_secs(65);

/// Whole-request budget of the adapter service.
pub const ADAPTER_REQUEST_BUDGET: Duration = Duration::from_secs(60);
/// Ceiling for one adapter -> provider generate call.
pub const PROVIDER_CALL_TIMEOUT: Duration = Duration::from_secs(55);

pub const DEFAULT_OLLAMA_API_URL: &str = "http://host.docker.internal:11434";
pub const DEFAULT_OLLAMA_MODEL: &str = "mistral:7b";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    pub anonymizer_url: String,
    pub moderation_url: String,
    pub api_token: String,
}

impl GatewayConfig {
    pub fn resolve(
        anonymizer_url: Option<String>,
        moderation_url: Option<String>,
        api_token: Option<String>,
    ) -> anyhow::Result<Self> {
        let api_token = api_token
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .ok_or_else(|| anyhow::anyhow!("GATEWAY_API_TOKEN must be set for the API gateway"))?;

        Ok(Self {
            anonymizer_url: required_base_url("ANONYMIZER_SERVICE_URL", anonymizer_url)?,
            moderation_url: required_base_url("MODERATION_SERVICE_URL", moderation_url)?,
            api_token,
        })
    }
}

/// Shared by the anonymizer and moderation services.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainServiceConfig {
    pub coordinator_url: String,
}

impl DomainServiceConfig {
    pub fn resolve(coordinator_url: Option<String>) -> anyhow::Result<Self> {
        Ok(Self {
            coordinator_url: required_base_url("AI_COORDINATOR_URL", coordinator_url)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoordinatorConfig {
    /// Optional: without it `anonymize_text` answers "adapter not configured".
    pub ollama_adapter_url: Option<String>,
}

impl CoordinatorConfig {
    pub fn resolve(ollama_adapter_url: Option<String>) -> anyhow::Result<Self> {
        Ok(Self {
            ollama_adapter_url: optional_base_url("OLLAMA_ADAPTER_URL", ollama_adapter_url)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OllamaAdapterConfig {
    pub ollama_api_url: String,
    pub default_model: String,
}

impl OllamaAdapterConfig {
    pub fn resolve(ollama_api_url: Option<String>, default_model: Option<String>) -> anyhow::Result<Self> {
        let ollama_api_url = optional_base_url("OLLAMA_API_URL", ollama_api_url)?
            .unwrap_or_else(|| DEFAULT_OLLAMA_API_URL.to_string());
        let default_model = default_model
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| DEFAULT_OLLAMA_MODEL.to_string());

        Ok(Self {
            ollama_api_url,
            default_model,
        })
    }
}

/// Validate an absolute http(s) base URL and strip trailing slashes.
pub fn normalize_base_url(name: &str, raw: &str) -> anyhow::Result<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    let parsed = Url::parse(trimmed)
        .map_err(|e| anyhow::anyhow!("{} is not a valid URL ('{}'): {}", name, raw, e))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        anyhow::bail!("{} must use http or https, got '{}'", name, parsed.scheme());
    }
    Ok(trimmed.to_string())
}

fn required_base_url(name: &str, raw: Option<String>) -> anyhow::Result<String> {
    optional_base_url(name, raw)?
        .ok_or_else(|| anyhow::anyhow!("{} environment variable not set", name))
}

fn optional_base_url(name: &str, raw: Option<String>) -> anyhow::Result<Option<String>> {
    match raw {
        Some(value) if !value.trim().is_empty() => normalize_base_url(name, &value).map(Some),
        _ => Ok(None),
    }
}
