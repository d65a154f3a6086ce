// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Password bot binary

use anyhow::Context;
use clap::Parser;
use pb_bot::{BotConfig, BotServer};
use pb_logging::CliLoggingArgs;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file
    #[arg(short, long, default_value = "config.yml")]
    config: PathBuf,

    /// Bot API token, overrides the config file
    #[arg(long, env = "PASSBOT_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Port for the webhook server, overrides the config file
    #[arg(short, long)]
    port: Option<u16>,

    #[command(flatten)]
    logging: CliLoggingArgs,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = BotConfig::load(&args.config)
        .with_context(|| format!("failed to load {}", args.config.display()))?;
    if let Some(token) = args.token {
        config.token = token;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    args.logging.with_config(&config.logging).init("pb-bot")?;

    tracing::info!("Starting password bot");

    let server = BotServer::new(config).await?;
    server.run().await?;

    Ok(())
}
