// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! # PrivacyPilot CLI
//!
//! The `privacypilot` binary runs any service of the pipeline and talks to a
//! running gateway.
//!
//! ## Commands
//!
//! - `privacypilot gateway` - authenticated API gateway
//! - `privacypilot anonymizer` / `privacypilot moderation` - domain services
//! - `privacypilot coordinator` - task coordinator
//! - `privacypilot ollama-adapter` - Ollama model adapter
//! - `privacypilot client anonymize|moderate|health` - gateway client

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use privacypilot_cli::commands::{
    self, AnonymizerArgs, ClientArgs, CoordinatorArgs, GatewayArgs, ModerationArgs, OllamaAdapterArgs,
};

/// PrivacyPilot - privacy-preserving text and content processing
#[derive(Parser)]
#[command(name = "privacypilot")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Listen address for service commands
    #[arg(long, global = true, env = "PRIVACYPILOT_HOST", default_value = "0.0.0.0")]
    host: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, env = "PRIVACYPILOT_LOG_LEVEL", default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the API gateway
    Gateway(GatewayArgs),

    /// Run the anonymizer service
    Anonymizer(AnonymizerArgs),

    /// Run the moderation service
    Moderation(ModerationArgs),

    /// Run the AI task coordinator
    Coordinator(CoordinatorArgs),

    /// Run the Ollama adapter
    #[command(name = "ollama-adapter")]
    OllamaAdapter(OllamaAdapterArgs),

    /// Call a running gateway
    Client(ClientArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is fine
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Initialize logging
    init_logging(&cli.log_level)?;

    match cli.command {
        Commands::Gateway(args) => args.run(&cli.host).await,
        Commands::Anonymizer(args) => args.run(&cli.host).await,
        Commands::Moderation(args) => args.run(&cli.host).await,
        Commands::Coordinator(args) => args.run(&cli.host).await,
        Commands::OllamaAdapter(args) => args.run(&cli.host).await,
        Commands::Client(args) => commands::client::handle_command(args).await,
    }
}

/// Initialize tracing subscriber for logging
fn init_logging(level: &str) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(level))
        .context("Failed to create log filter")?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .init();

    Ok(())
}
