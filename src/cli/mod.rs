//! Command-line interface for liveness-check

use clap::Parser;
use std::path::PathBuf;

/// Probe Jenkins and Nginx with a single HTTP GET per check
#[derive(Parser, Debug)]
#[command(name = "liveness-check")]
#[command(version, about, long_about = None)]
#[command(after_help = r#"ENVIRONMENT VARIABLES:
    JENKINS_URL              Jenkins target (default: http://localhost:8080)
    NGINX_URL                Nginx target (default: http://localhost)
    JENKINS_USER             Basic-auth username for jenkins-auth
    JENKINS_API_TOKEN        Basic-auth token for jenkins-auth
    LIVENESS_TIMEOUT_SECS    Per-request timeout (default: 5)
"#)]
pub struct Cli {
    /// YAML or JSON file listing checks; replaces the environment defaults
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Checks to run, in order (default: all configured checks)
    pub checks: Vec<String>,
}
