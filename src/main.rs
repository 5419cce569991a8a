// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::{anyhow, Result};
use clap::Parser;
use keyword_harvest::{api::start_server, config::AppConfig, version};
use std::env;

/// Keyword harvest HTTP service
#[derive(Parser, Debug)]
#[command(name = "keyword-harvest")]
#[command(version)]
#[command(about = "Search or scrape by keyword and archive discovered images", long_about = None)]
struct Args {
    /// Address to bind
    #[arg(long, env = "API_HOST")]
    host: Option<String>,

    /// Port to bind
    #[arg(long, env = "API_PORT")]
    port: Option<u16>,

    /// Validate configuration and exit
    #[arg(long)]
    check_config: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    // Initialize tracing subscriber for logging
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }
    tracing_subscriber::fmt::init();

    let args = Args::parse();

    let mut config = AppConfig::from_env().map_err(|e| anyhow!("Invalid configuration: {}", e))?;
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    config
        .validate()
        .map_err(|e| anyhow!("Invalid configuration: {}", e))?;

    tracing::info!("Starting {}", version::get_version_string());
    tracing::info!(
        "Storage backend {:?}, bucket {}, request budget {}s",
        config.storage.backend,
        config.storage.bucket,
        config.server.request_budget_secs
    );

    if args.check_config {
        tracing::info!("Configuration OK");
        return Ok(());
    }

    start_server(&config).await
}
