// src/lib.rs
pub mod cli;
pub mod config;
pub mod health;

pub use config::{load_config, CheckConfig, Config, ConfigError};
pub use health::{CheckError, CheckOutcome, CheckStatus, ErrorKind, LivenessCheck, LivenessChecker};
