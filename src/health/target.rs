// src/health/target.rs
use crate::config::CheckConfig;
use url::Url;

/// Basic-auth username/token pair.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub token: String,
}

impl Credentials {
    /// Both halves must be present and non-empty, otherwise no auth is sent.
    pub fn from_parts(username: Option<&str>, token: Option<&str>) -> Option<Self> {
        match (username, token) {
            (Some(user), Some(token)) if !user.is_empty() && !token.is_empty() => Some(Self {
                username: user.to_string(),
                token: token.to_string(),
            }),
            _ => None,
        }
    }
}

// Keep the token out of logs.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("token", &"***")
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub url: Url,
    pub credentials: Option<Credentials>,
}

impl Target {
    pub fn new(url: Url) -> Self {
        Self {
            url,
            credentials: None,
        }
    }

    pub fn with_credentials(mut self, credentials: Option<Credentials>) -> Self {
        self.credentials = credentials;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expectation {
    StatusOnly,
    /// Lowercased body must contain `needle`; `message` is the failure text.
    BodyContains { needle: String, message: String },
}

impl Expectation {
    pub fn body_contains(needle: impl Into<String>, message: impl Into<String>) -> Self {
        Self::BodyContains {
            needle: needle.into().to_lowercase(),
            message: message.into(),
        }
    }

    pub fn needs_body(&self) -> bool {
        matches!(self, Self::BodyContains { .. })
    }
}

/// A single named probe: one GET against `target`, judged by `expectation`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LivenessCheck {
    pub name: String,
    pub service: String,
    pub target: Target,
    pub expectation: Expectation,
}

impl LivenessCheck {
    pub fn new(
        name: impl Into<String>,
        service: impl Into<String>,
        target: Target,
        expectation: Expectation,
    ) -> Self {
        Self {
            name: name.into(),
            service: service.into(),
            target,
            expectation,
        }
    }
}

impl From<&CheckConfig> for LivenessCheck {
    fn from(config: &CheckConfig) -> Self {
        let credentials =
            Credentials::from_parts(config.username.as_deref(), config.token.as_deref());

        let expectation = match &config.expect_body {
            Some(needle) => {
                let message = config.failure_message.clone().unwrap_or_else(|| {
                    format!("{} page does not contain \"{}\"", config.service, needle)
                });
                Expectation::body_contains(needle.as_str(), message)
            }
            None => Expectation::StatusOnly,
        };

        Self::new(
            config.name.clone(),
            config.service.clone(),
            Target::new(config.url.clone()).with_credentials(credentials),
            expectation,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_need_both_parts() {
        assert!(Credentials::from_parts(Some("bot"), Some("tok")).is_some());
        assert!(Credentials::from_parts(Some("bot"), None).is_none());
        assert!(Credentials::from_parts(None, Some("tok")).is_none());
        assert!(Credentials::from_parts(Some(""), Some("tok")).is_none());
    }

    #[test]
    fn test_debug_hides_token() {
        let creds = Credentials::from_parts(Some("bot"), Some("hunter2")).unwrap();
        let rendered = format!("{:?}", creds);
        assert!(rendered.contains("bot"));
        assert!(!rendered.contains("hunter2"));
    }

    #[test]
    fn test_check_from_config() {
        let config = CheckConfig {
            name: "grafana".to_string(),
            service: "Grafana".to_string(),
            url: Url::parse("http://localhost:3000").unwrap(),
            username: Some("admin".to_string()),
            token: Some("admin".to_string()),
            expect_body: Some("Grafana".to_string()),
            failure_message: None,
        };

        let check = LivenessCheck::from(&config);
        assert!(check.target.credentials.is_some());
        assert_eq!(
            check.expectation,
            Expectation::BodyContains {
                needle: "grafana".to_string(),
                message: "Grafana page does not contain \"Grafana\"".to_string(),
            }
        );
    }
}
