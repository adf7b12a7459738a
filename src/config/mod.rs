// src/config/mod.rs
mod models;

pub use models::*;

use anyhow::{Context, Result};
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid URL in {var} ({value}): {source}")]
    InvalidUrl {
        var: String,
        value: String,
        #[source]
        source: url::ParseError,
    },

    #[error("invalid value for {var}: {value}")]
    InvalidValue { var: String, value: String },

    #[error("unsupported URL scheme `{scheme}` for check {check}")]
    UnsupportedScheme { check: String, scheme: String },

    #[error("expected body content for check {0} must not be empty")]
    EmptyExpectation(String),

    #[error("timeout must be greater than zero")]
    ZeroTimeout,

    #[error("no checks configured")]
    NoChecks,

    #[error("duplicate check name: {0}")]
    DuplicateCheck(String),

    #[error("unknown check: {0}")]
    UnknownCheck(String),
}

/// Load configuration from a file (YAML or JSON)
pub async fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let path = path.as_ref();
    let contents = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read config file {}", path.display()))?;

    let config: Config = match path.extension().and_then(|s| s.to_str()) {
        Some("yaml") | Some("yml") => {
            serde_yaml::from_str(&contents).context("Failed to parse YAML config")?
        }
        _ => serde_json::from_str(&contents).context("Failed to parse JSON config")?,
    };

    config.validate()?;
    Ok(config)
}
