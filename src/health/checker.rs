// src/health/checker.rs
use super::status::CheckOutcome;
use super::target::{Expectation, LivenessCheck};
use crate::config::Config;
use reqwest::{Client, StatusCode};
use std::error::Error as _;
use std::time::{Duration, Instant};
use tracing::{debug, error, info};

/// The two ways a liveness check can fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// DNS failure, refused connection, timeout, broken body stream.
    Connectivity,
    /// Wrong status code or missing expected content.
    UnexpectedResponse,
}

#[derive(Debug, thiserror::Error)]
pub enum CheckError {
    // `cause` already carries the flattened chain; `error` is not a source.
    #[error("{service} connection failed: {cause}")]
    Connectivity {
        service: String,
        cause: String,
        error: reqwest::Error,
    },

    #[error("{service} is not responding (HTTP {status})")]
    UnexpectedStatus { service: String, status: StatusCode },

    #[error("{message}")]
    MissingContent { message: String },
}

impl CheckError {
    fn connectivity(service: &str, error: reqwest::Error) -> Self {
        Self::Connectivity {
            service: service.to_string(),
            cause: describe(&error),
            error,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Connectivity { .. } => ErrorKind::Connectivity,
            Self::UnexpectedStatus { .. } | Self::MissingContent { .. } => {
                ErrorKind::UnexpectedResponse
            }
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Connectivity { error, .. } if error.is_timeout())
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::UnexpectedStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}

// reqwest's Display stops at the outermost layer; the useful part
// ("Connection refused", "operation timed out") sits further down the chain.
fn describe(err: &reqwest::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}

/// Judge a response that has already been received.
pub fn evaluate(check: &LivenessCheck, status: StatusCode, body: &str) -> Result<(), CheckError> {
    if status != StatusCode::OK {
        return Err(CheckError::UnexpectedStatus {
            service: check.service.clone(),
            status,
        });
    }

    match &check.expectation {
        Expectation::StatusOnly => Ok(()),
        Expectation::BodyContains { needle, message } => {
            if body.to_lowercase().contains(&needle.to_lowercase()) {
                Ok(())
            } else {
                Err(CheckError::MissingContent {
                    message: message.clone(),
                })
            }
        }
    }
}

pub struct LivenessChecker {
    client: Client,
}

impl LivenessChecker {
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }

    pub fn from_config(config: &Config) -> Result<Self, reqwest::Error> {
        Self::new(config.timeout())
    }

    /// Issue exactly one GET for `check` and judge the response.
    pub async fn run(&self, check: &LivenessCheck) -> Result<(), CheckError> {
        let target = &check.target;
        let mut request = self.client.get(target.url.as_str());
        if let Some(credentials) = &target.credentials {
            request = request.basic_auth(&credentials.username, Some(&credentials.token));
        }

        debug!(
            check = %check.name,
            url = %target.url,
            authenticated = target.credentials.is_some(),
            "Sending liveness probe"
        );

        let response = request
            .send()
            .await
            .map_err(|e| CheckError::connectivity(&check.service, e))?;

        let status = response.status();
        let body = if status == StatusCode::OK && check.expectation.needs_body() {
            response
                .text()
                .await
                .map_err(|e| CheckError::connectivity(&check.service, e))?
        } else {
            String::new()
        };

        evaluate(check, status, &body)
    }

    /// Run `check` and record the result, logging pass or fail.
    pub async fn execute(&self, check: &LivenessCheck) -> CheckOutcome {
        let outcome = CheckOutcome::pending(check.name.as_str());
        let start = Instant::now();
        let result = self.run(check).await;
        let outcome = outcome.complete(result, start.elapsed());

        match &outcome.error {
            None => info!(
                "Check {} passed in {}ms",
                outcome.name,
                outcome.elapsed.as_millis()
            ),
            Some(e) => error!("Check {} failed: {}", outcome.name, e),
        }

        outcome
    }
}
