// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Gateway client commands
//!
//! Commands: anonymize, moderate, health

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use colored::Colorize;

use privacypilot_sdk::PrivacyPilotClient;

#[derive(Args, Debug, Clone)]
pub struct ClientArgs {
    /// Base URL of the API gateway
    #[arg(long, env = "PRIVACYPILOT_GATEWAY_URL", default_value = "http://localhost:8080")]
    pub gateway_url: String,

    /// Bearer token for /api/v1 calls
    #[arg(long, env = "GATEWAY_API_TOKEN", hide_env_values = true)]
    pub api_token: Option<String>,

    #[command(subcommand)]
    pub command: ClientCommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ClientCommand {
    /// Replace personal data in a text with placeholders
    Anonymize {
        #[arg(value_name = "TEXT")]
        text: String,
    },

    /// Moderate a text, an image, or both
    Moderate {
        #[arg(long)]
        text: Option<String>,

        #[arg(long)]
        image_url: Option<String>,
    },

    /// Check gateway liveness
    Health,
}

pub async fn handle_command(args: ClientArgs) -> Result<()> {
    let mut client = PrivacyPilotClient::new(&args.gateway_url);
    if let Some(token) = args.api_token {
        client = client.with_api_key(token);
    }

    match args.command {
        ClientCommand::Anonymize { text } => {
            let response = client.anonymize(&text).await.context("Anonymization failed")?;
            println!("{} {}", "Original:  ".dimmed(), response.original_text);
            println!("{} {}", "Anonymized:".green().bold(), response.anonymized_text);
        }
        ClientCommand::Moderate { text, image_url } => {
            let verdict = client
                .moderate(text.as_deref(), image_url.as_deref())
                .await
                .context("Moderation failed")?;
            let label = if verdict.is_acceptable {
                "acceptable".green().bold()
            } else {
                "not acceptable".red().bold()
            };
            println!("Verdict:    {}", label);
            if !verdict.flags.is_empty() {
                println!("Flags:      {}", verdict.flags.join(", ").yellow());
            }
            println!("Details:    {}", verdict.details);
            println!("Confidence: {:.2}", verdict.confidence_score);
        }
        ClientCommand::Health => {
            let health = client.health().await.context("Gateway health check failed")?;
            println!("{} {}", "✓".green(), serde_json::to_string_pretty(&health)?);
        }
    }

    Ok(())
}
