// src/config/models.rs
use serde::Deserialize;
use std::collections::HashSet;
use std::time::Duration;
use url::Url;

use super::ConfigError;

pub const DEFAULT_TIMEOUT_SECS: u64 = 5;
pub const DEFAULT_JENKINS_URL: &str = "http://localhost:8080";
pub const DEFAULT_NGINX_URL: &str = "http://localhost";

pub const JENKINS_URL_VAR: &str = "JENKINS_URL";
pub const NGINX_URL_VAR: &str = "NGINX_URL";
pub const JENKINS_USER_VAR: &str = "JENKINS_USER";
pub const JENKINS_API_TOKEN_VAR: &str = "JENKINS_API_TOKEN";
pub const TIMEOUT_VAR: &str = "LIVENESS_TIMEOUT_SECS";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    pub checks: Vec<CheckConfig>,
}

/// One named check as it appears in a config file or is derived from the
/// environment.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CheckConfig {
    pub name: String,
    /// Human-readable label used in failure messages ("Jenkins", "Nginx").
    pub service: String,
    pub url: Url,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub token: Option<String>,
    /// Substring the lowercased body must contain. `None` checks status only.
    #[serde(default)]
    pub expect_body: Option<String>,
    #[serde(default)]
    pub failure_message: Option<String>,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Config {
    /// Resolve the built-in Jenkins and Nginx checks from the process
    /// environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`Config::from_env`] but reads variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let timeout_secs = match var(TIMEOUT_VAR) {
            Some(raw) => raw.trim().parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                var: TIMEOUT_VAR.to_string(),
                value: raw.clone(),
            })?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        let jenkins_url = parse_url(
            JENKINS_URL_VAR,
            var(JENKINS_URL_VAR).as_deref().unwrap_or(DEFAULT_JENKINS_URL),
        )?;
        let nginx_url = parse_url(
            NGINX_URL_VAR,
            var(NGINX_URL_VAR).as_deref().unwrap_or(DEFAULT_NGINX_URL),
        )?;

        let checks = vec![
            CheckConfig {
                name: "jenkins".to_string(),
                service: "Jenkins".to_string(),
                url: jenkins_url.clone(),
                username: None,
                token: None,
                expect_body: Some("redirect".to_string()),
                failure_message: Some("Jenkins login page not found".to_string()),
            },
            CheckConfig {
                name: "jenkins-auth".to_string(),
                service: "Jenkins".to_string(),
                url: jenkins_url,
                username: var(JENKINS_USER_VAR),
                token: var(JENKINS_API_TOKEN_VAR),
                expect_body: None,
                failure_message: None,
            },
            CheckConfig {
                name: "nginx".to_string(),
                service: "Nginx".to_string(),
                url: nginx_url,
                username: None,
                token: None,
                expect_body: Some("nginx".to_string()),
                failure_message: Some(
                    "Nginx page does not contain expected content".to_string(),
                ),
            },
        ];

        let config = Self { timeout_secs, checks };
        config.validate()?;
        Ok(config)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        if self.checks.is_empty() {
            return Err(ConfigError::NoChecks);
        }

        let mut seen = HashSet::new();
        for check in &self.checks {
            if !seen.insert(check.name.as_str()) {
                return Err(ConfigError::DuplicateCheck(check.name.clone()));
            }
            match check.url.scheme() {
                "http" | "https" => {}
                other => {
                    return Err(ConfigError::UnsupportedScheme {
                        check: check.name.clone(),
                        scheme: other.to_string(),
                    })
                }
            }
            if matches!(&check.expect_body, Some(needle) if needle.trim().is_empty()) {
                return Err(ConfigError::EmptyExpectation(check.name.clone()));
            }
        }

        Ok(())
    }

    /// Pick checks by name, in the order given. An empty selection means all.
    pub fn select<S: AsRef<str>>(&self, names: &[S]) -> Result<Vec<&CheckConfig>, ConfigError> {
        if names.is_empty() {
            return Ok(self.checks.iter().collect());
        }

        names
            .iter()
            .map(|name| {
                let name = name.as_ref();
                self.checks
                    .iter()
                    .find(|c| c.name == name)
                    .ok_or_else(|| ConfigError::UnknownCheck(name.to_string()))
            })
            .collect()
    }
}

fn parse_url(var: &str, raw: &str) -> Result<Url, ConfigError> {
    Url::parse(raw.trim()).map_err(|source| ConfigError::InvalidUrl {
        var: var.to_string(),
        value: raw.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    fn check<'a>(config: &'a Config, name: &str) -> &'a CheckConfig {
        config.checks.iter().find(|c| c.name == name).unwrap()
    }

    #[test]
    fn test_defaults_when_environment_is_empty() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();

        assert_eq!(config.timeout(), Duration::from_secs(5));
        assert_eq!(check(&config, "jenkins").url.as_str(), "http://localhost:8080/");
        assert_eq!(check(&config, "nginx").url.as_str(), "http://localhost/");
        assert_eq!(check(&config, "jenkins").expect_body.as_deref(), Some("redirect"));
        assert_eq!(check(&config, "nginx").expect_body.as_deref(), Some("nginx"));
        assert!(check(&config, "jenkins-auth").username.is_none());
        assert!(check(&config, "jenkins-auth").expect_body.is_none());
    }

    #[test]
    fn test_url_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("JENKINS_URL", "http://ci.internal:9090/"),
            ("NGINX_URL", "https://web.internal"),
        ]))
        .unwrap();

        assert_eq!(check(&config, "jenkins").url.as_str(), "http://ci.internal:9090/");
        assert_eq!(check(&config, "jenkins-auth").url.as_str(), "http://ci.internal:9090/");
        assert_eq!(check(&config, "nginx").url.as_str(), "https://web.internal/");
    }

    #[test]
    fn test_credentials_only_on_authenticated_check() {
        let config = Config::from_lookup(lookup_from(&[
            ("JENKINS_USER", "jenkins-bot"),
            ("JENKINS_API_TOKEN", "s3cr3t-token"),
        ]))
        .unwrap();

        let auth = check(&config, "jenkins-auth");
        assert_eq!(auth.username.as_deref(), Some("jenkins-bot"));
        assert_eq!(auth.token.as_deref(), Some("s3cr3t-token"));
        assert!(check(&config, "jenkins").username.is_none());
    }

    #[test]
    fn test_blank_variables_are_treated_as_unset() {
        let config = Config::from_lookup(lookup_from(&[
            ("JENKINS_URL", "  "),
            ("JENKINS_USER", ""),
        ]))
        .unwrap();

        assert_eq!(check(&config, "jenkins").url.as_str(), "http://localhost:8080/");
        assert!(check(&config, "jenkins-auth").username.is_none());
    }

    #[test]
    fn test_invalid_url_is_rejected() {
        let err = Config::from_lookup(lookup_from(&[("NGINX_URL", "not a url")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidUrl { ref var, .. } if var == "NGINX_URL"));
    }

    #[test]
    fn test_timeout_override() {
        let config =
            Config::from_lookup(lookup_from(&[("LIVENESS_TIMEOUT_SECS", "12")])).unwrap();
        assert_eq!(config.timeout_secs, 12);

        let err = Config::from_lookup(lookup_from(&[("LIVENESS_TIMEOUT_SECS", "soon")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));

        let err =
            Config::from_lookup(lookup_from(&[("LIVENESS_TIMEOUT_SECS", "0")])).unwrap_err();
        assert!(matches!(err, ConfigError::ZeroTimeout));
    }

    #[test]
    fn test_validate_rejects_bad_check_lists() {
        let mut config = Config::from_lookup(lookup_from(&[])).unwrap();

        config.checks[1].name = "jenkins".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::DuplicateCheck(name)) if name == "jenkins"));

        config.checks[1].name = "jenkins-auth".to_string();
        config.checks[2].url = Url::parse("ftp://localhost/").unwrap();
        assert!(matches!(config.validate(), Err(ConfigError::UnsupportedScheme { .. })));

        config.checks.clear();
        assert!(matches!(config.validate(), Err(ConfigError::NoChecks)));
    }

    #[test]
    fn test_select_keeps_requested_order() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();

        let all = config.select::<&str>(&[]).unwrap();
        assert_eq!(all.len(), 3);

        let picked = config.select(&["nginx", "jenkins"]).unwrap();
        let names: Vec<_> = picked.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["nginx", "jenkins"]);

        let err = config.select(&["tomcat"]).unwrap_err();
        assert_eq!(err.to_string(), "unknown check: tomcat");
    }
}
