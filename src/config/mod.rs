//! Configuration for the skill handler and the home intent receiver
//!
//! The forwarder target is fixed when the crate is built. `HER_HOME_SCHEME`,
//! `HER_HOME_HOST` and `HER_HOME_PATH` may be set in the build environment to
//! bake a different target into the binary; nothing is read at runtime.

pub mod home;

pub use home::{ApiConfig, HomeConfig, IntentConf, MqttConfig};

use crate::error::{Result, SkillError};
use crate::utils::parse_url_safe;
use std::time::Duration;

/// Scheme used to reach the home server (`http` if the home server has no TLS)
pub const HOME_SCHEME: &str = match option_env!("HER_HOME_SCHEME") {
    Some(scheme) => scheme,
    None => "https",
};

/// Host of the home server
pub const HOME_HOST: &str = match option_env!("HER_HOME_HOST") {
    Some(host) => host,
    None => "alexa.mydomain.com",
};

/// Path where the home server accepts commands (`/` if none)
pub const HOME_PATH: &str = match option_env!("HER_HOME_PATH") {
    Some(path) => path,
    None => "/alexa/",
};

/// Upper bound for a single forwarded request, connect included
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Where and how the skill forwards commands
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillConfig {
    pub home_scheme: String,
    pub home_host: String,
    pub home_path: String,
    pub request_timeout: Duration,
}

impl Default for SkillConfig {
    fn default() -> Self {
        Self {
            home_scheme: HOME_SCHEME.to_string(),
            home_host: HOME_HOST.to_string(),
            home_path: HOME_PATH.to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

impl SkillConfig {
    /// Point the forwarder at another home server, keeping the compiled path
    pub fn with_home<S: Into<String>, H: Into<String>>(mut self, scheme: S, host: H) -> Self {
        self.home_scheme = scheme.into();
        self.home_host = host.into();
        self
    }

    pub fn with_path<S: Into<String>>(mut self, path: S) -> Self {
        self.home_path = path.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.home_scheme != "http" && self.home_scheme != "https" {
            return Err(SkillError::config(format!(
                "Unsupported home scheme '{}', expected http or https",
                self.home_scheme
            )));
        }

        if self.home_host.trim().is_empty() {
            return Err(SkillError::config("Home host is empty"));
        }

        if !self.home_path.starts_with('/') {
            return Err(SkillError::config(format!(
                "Home path '{}' must start with '/'",
                self.home_path
            )));
        }

        if self.request_timeout.is_zero() {
            return Err(SkillError::config("Request timeout must be greater than zero"));
        }

        Ok(())
    }

    /// Full URL commands are posted to
    pub fn home_url(&self) -> Result<url::Url> {
        self.validate()?;
        parse_url_safe(
            &format!("{}://{}{}", self.home_scheme, self.home_host, self.home_path),
            "home server",
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_targets_compiled_home() {
        let config = SkillConfig::default();
        assert_eq!(config.home_host, HOME_HOST);
        assert_eq!(config.home_path, HOME_PATH);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_home_url() {
        let config = SkillConfig::default()
            .with_home("http", "127.0.0.1:8080")
            .with_path("/alexa/");
        assert_eq!(
            config.home_url().unwrap().as_str(),
            "http://127.0.0.1:8080/alexa/"
        );
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let config = SkillConfig::default().with_home("ftp", "example.com");
        assert!(matches!(config.validate(), Err(SkillError::Config(_))));

        let config = SkillConfig::default().with_home("https", "  ");
        assert!(config.validate().is_err());

        let config = SkillConfig::default().with_path("alexa");
        assert!(config.home_url().is_err());

        let config = SkillConfig::default().with_timeout(Duration::ZERO);
        assert!(config.validate().is_err());
    }
}
