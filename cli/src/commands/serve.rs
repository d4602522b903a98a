// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Service subcommands
//!
//! One argument set per service binary role. Each builds its router from
//! validated configuration, then hands it to [`crate::server::serve`].

use anyhow::{Context, Result};
use axum::Router;
use clap::Args;
use std::sync::Arc;
use tracing::{info, warn};

use privacypilot_core::application::{
    AnonymizationService, ModelAnonymizer, ModerationService, TaskCoordinator,
};
use privacypilot_core::domain::llm::LLMProvider;
use privacypilot_core::domain::service_config::{
    CoordinatorConfig, DomainServiceConfig, GatewayConfig, OllamaAdapterConfig,
};
use privacypilot_core::infrastructure::adapters::{AdapterRegistry, OllamaAdapterClient};
use privacypilot_core::infrastructure::llm::OllamaProvider;
use privacypilot_core::infrastructure::{CoordinatorClient, DownstreamProxy, StaticTokenValidator};
use privacypilot_core::presentation::gateway::{GatewayState, GATEWAY_SERVICE};
use privacypilot_core::presentation::{anonymizer, coordinator, gateway, moderation, ollama_adapter};

use crate::server::serve;

#[derive(Args, Debug, Clone)]
pub struct GatewayArgs {
    /// HTTP listen port
    #[arg(long, env = "PORT", default_value = "8080")]
    pub port: u16,

    /// Base URL of the anonymizer service
    #[arg(long, env = "ANONYMIZER_SERVICE_URL")]
    pub anonymizer_url: Option<String>,

    /// Base URL of the moderation service
    #[arg(long, env = "MODERATION_SERVICE_URL")]
    pub moderation_url: Option<String>,

    /// Bearer token clients must present
    #[arg(long, env = "GATEWAY_API_TOKEN", hide_env_values = true)]
    pub api_token: Option<String>,
}

impl GatewayArgs {
    pub fn router(&self) -> Result<Router> {
        let config = GatewayConfig::resolve(
            self.anonymizer_url.clone(),
            self.moderation_url.clone(),
            self.api_token.clone(),
        )
        .context("Invalid gateway configuration")?;

        info!(
            "Gateway routes: anonymize -> {}, moderate -> {}",
            config.anonymizer_url, config.moderation_url
        );

        Ok(gateway::app(Arc::new(GatewayState {
            anonymizer: DownstreamProxy::new("anonymizer", config.anonymizer_url),
            moderation: DownstreamProxy::new("moderation", config.moderation_url),
            validator: Arc::new(StaticTokenValidator::new(config.api_token)),
        })))
    }

    pub async fn run(self, host: &str) -> Result<()> {
        let app = self.router()?;
        serve(GATEWAY_SERVICE, host, self.port, app).await
    }
}

/// Coordinator address shared by both domain services.
#[derive(Args, Debug, Clone)]
pub struct CoordinatorAddress {
    /// Base URL of the AI coordinator
    #[arg(long, env = "AI_COORDINATOR_URL")]
    pub coordinator_url: Option<String>,
}

impl CoordinatorAddress {
    fn client(&self) -> Result<Arc<CoordinatorClient>> {
        let config = DomainServiceConfig::resolve(self.coordinator_url.clone())
            .context("Invalid service configuration")?;
        info!("Using AI coordinator at {}", config.coordinator_url);
        Ok(Arc::new(CoordinatorClient::new(config.coordinator_url)))
    }
}

#[derive(Args, Debug, Clone)]
pub struct AnonymizerArgs {
    /// HTTP listen port
    #[arg(long, env = "PORT", default_value = "8081")]
    pub port: u16,

    #[command(flatten)]
    pub coordinator: CoordinatorAddress,
}

impl AnonymizerArgs {
    pub fn router(&self) -> Result<Router> {
        let service = AnonymizationService::new(self.coordinator.client()?);
        Ok(anonymizer::app(Arc::new(service)))
    }

    pub async fn run(self, host: &str) -> Result<()> {
        let app = self.router()?;
        serve(anonymizer::ANONYMIZER_SERVICE, host, self.port, app).await
    }
}

#[derive(Args, Debug, Clone)]
pub struct ModerationArgs {
    /// HTTP listen port
    #[arg(long, env = "PORT", default_value = "8082")]
    pub port: u16,

    #[command(flatten)]
    pub coordinator: CoordinatorAddress,
}

impl ModerationArgs {
    pub fn router(&self) -> Result<Router> {
        let service = ModerationService::new(self.coordinator.client()?);
        Ok(moderation::app(Arc::new(service)))
    }

    pub async fn run(self, host: &str) -> Result<()> {
        let app = self.router()?;
        serve(moderation::MODERATION_SERVICE, host, self.port, app).await
    }
}

#[derive(Args, Debug, Clone)]
pub struct CoordinatorArgs {
    /// HTTP listen port
    #[arg(long, env = "PORT", default_value = "8083")]
    pub port: u16,

    /// Base URL of the Ollama adapter (anonymize_text is unavailable without it)
    #[arg(long, env = "OLLAMA_ADAPTER_URL")]
    pub ollama_adapter_url: Option<String>,
}

impl CoordinatorArgs {
    pub fn router(&self) -> Result<Router> {
        let config = CoordinatorConfig::resolve(self.ollama_adapter_url.clone())
            .context("Invalid coordinator configuration")?;

        let mut registry = AdapterRegistry::new();
        match config.ollama_adapter_url {
            Some(url) => registry
                .register(Arc::new(OllamaAdapterClient::new(url)))
                .context("Failed to register Ollama adapter")?,
            None => warn!("OLLAMA_ADAPTER_URL not set; anonymize_text tasks will be rejected"),
        }

        Ok(coordinator::app(Arc::new(TaskCoordinator::new(registry))))
    }

    pub async fn run(self, host: &str) -> Result<()> {
        let app = self.router()?;
        serve(
            privacypilot_core::application::coordinator::COORDINATOR_SERVICE,
            host,
            self.port,
            app,
        )
        .await
    }
}

#[derive(Args, Debug, Clone)]
pub struct OllamaAdapterArgs {
    /// HTTP listen port
    #[arg(long, env = "PORT", default_value = "8084")]
    pub port: u16,

    /// Base URL of the Ollama API
    #[arg(long, env = "OLLAMA_API_URL")]
    pub ollama_api_url: Option<String>,

    /// Model used when a request carries no model hint
    #[arg(long, env = "OLLAMA_ANONYMIZE_MODEL")]
    pub default_model: Option<String>,
}

impl OllamaAdapterArgs {
    fn anonymizer(&self) -> Result<Arc<ModelAnonymizer>> {
        let config = OllamaAdapterConfig::resolve(self.ollama_api_url.clone(), self.default_model.clone())
            .context("Invalid adapter configuration")?;
        info!(
            "Ollama adapter using {} (default model {})",
            config.ollama_api_url, config.default_model
        );

        let provider = Arc::new(OllamaProvider::new(config.ollama_api_url));
        Ok(Arc::new(ModelAnonymizer::new(provider, config.default_model)))
    }

    pub fn router(&self) -> Result<Router> {
        Ok(ollama_adapter::app(self.anonymizer()?))
    }

    pub async fn run(self, host: &str) -> Result<()> {
        let anonymizer = self.anonymizer()?;

        // Unreachable Ollama is not fatal; /health keeps reporting it
        if let Err(e) = anonymizer.provider().health_check().await {
            warn!("Ollama is not reachable at startup: {}", e);
        }

        serve(ollama_adapter::ADAPTER_SERVICE, host, self.port, ollama_adapter::app(anonymizer)).await
    }
}
