// src/main.rs
use anyhow::{Context, Result};
use clap::Parser;
use std::process::ExitCode;
use tracing::{info, warn};

use liveness_check::{
    cli::Cli,
    config::{self, Config},
    health::{LivenessCheck, LivenessChecker},
};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("liveness_check=info".parse()?),
        )
        .init();

    let args = Cli::parse();

    let config = match &args.config {
        Some(path) => {
            info!("Loading configuration from: {}", path.display());
            config::load_config(path).await?
        }
        None => Config::from_env().context("Invalid liveness check environment")?,
    };

    let selected: Vec<LivenessCheck> = config
        .select(args.checks.as_slice())?
        .into_iter()
        .map(LivenessCheck::from)
        .collect();

    let checker = LivenessChecker::from_config(&config).context("Failed to create HTTP client")?;

    let mut failed = 0;
    for check in &selected {
        if !checker.execute(check).await.passed() {
            failed += 1;
        }
    }

    if failed > 0 {
        warn!("{} of {} liveness checks failed", failed, selected.len());
        return Ok(ExitCode::FAILURE);
    }

    Ok(ExitCode::SUCCESS)
}
