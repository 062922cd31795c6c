//! Home intent receiver configuration
//!
//! Loaded from a TOML file:
//!
//! ```toml
//! [api]
//! host = "0.0.0.0"
//! port = 8080
//!
//! [mqtt]
//! broker_url = "tcp://localhost:1883"
//!
//! [[intents]]
//! action = "switch-on"
//! room = "cucina"
//! topic = "home/kitchen/light/set"
//! message = "ON"
//! ```

use crate::command::Action;
use crate::error::{Result, SkillError};
use config::{Config, File, FileFormat};
use serde::Deserialize;
use std::path::Path;
use url::Url;

/// Port used when the file omits it or sets it to 0
pub const DEFAULT_API_PORT: u16 = 8080;

/// Broker port when the URL does not carry one
pub const DEFAULT_MQTT_PORT: u16 = 1883;

/// Listener settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_api_host")]
    pub host: String,
    #[serde(default)]
    pub port: u16,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_api_host(),
            port: DEFAULT_API_PORT,
        }
    }
}

impl ApiConfig {
    /// `host:port` to bind, with the default port substituted for 0
    pub fn listen_address(&self) -> String {
        let port = if self.port == 0 {
            DEFAULT_API_PORT
        } else {
            self.port
        };
        format!("{}:{}", self.host, port)
    }
}

fn default_api_host() -> String {
    "0.0.0.0".to_string()
}

/// Broker the home receiver publishes to
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MqttConfig {
    #[serde(default = "default_broker_url")]
    pub broker_url: String,
    #[serde(default = "default_client_id")]
    pub client_id: String,
}

impl Default for MqttConfig {
    fn default() -> Self {
        Self {
            broker_url: default_broker_url(),
            client_id: default_client_id(),
        }
    }
}

impl MqttConfig {
    /// Broker host and port from `broker_url` (`tcp://` or `mqtt://`)
    pub fn endpoint(&self) -> Result<(String, u16)> {
        let url = Url::parse(&self.broker_url).map_err(|e| {
            SkillError::config(format!("Invalid MQTT broker URL '{}': {e}", self.broker_url))
        })?;

        if !matches!(url.scheme(), "tcp" | "mqtt") {
            return Err(SkillError::config(format!(
                "Unsupported MQTT broker scheme '{}'",
                url.scheme()
            )));
        }

        let host = url
            .host_str()
            .filter(|host| !host.is_empty())
            .ok_or_else(|| SkillError::config("MQTT broker URL has no host"))?;

        Ok((host.to_string(), url.port().unwrap_or(DEFAULT_MQTT_PORT)))
    }
}

fn default_broker_url() -> String {
    format!("tcp://localhost:{DEFAULT_MQTT_PORT}")
}

fn default_client_id() -> String {
    "her".to_string()
}

/// One entry of the intent table: which bus message a command turns into
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct IntentConf {
    pub action: Action,
    pub room: String,
    pub topic: String,
    pub message: String,
}

impl IntentConf {
    fn validate(&self, index: usize) -> Result<()> {
        if self.room.is_empty() {
            return Err(SkillError::config(format!(
                "Intent #{index} ({}) is missing the room",
                self.action
            )));
        }

        if self.topic.is_empty() {
            return Err(SkillError::config(format!(
                "Intent #{index} ({} {}) is missing the topic",
                self.action, self.room
            )));
        }

        if self.message.is_empty() {
            return Err(SkillError::config(format!(
                "Intent #{index} ({} {}) is missing the message",
                self.action, self.room
            )));
        }

        Ok(())
    }
}

/// Complete home receiver configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct HomeConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub mqtt: MqttConfig,
    #[serde(default)]
    pub intents: Vec<IntentConf>,
}

impl HomeConfig {
    /// Load and validate a TOML configuration file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(SkillError::config(format!(
                "Error opening the config file {}",
                path.display()
            )));
        }

        Self::load(File::from(path).format(FileFormat::Toml))
    }

    /// Load and validate configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Self::load(File::from_str(content, FileFormat::Toml))
    }

    fn load<S>(source: S) -> Result<Self>
    where
        S: config::Source + Send + Sync + 'static,
    {
        let config: HomeConfig = Config::builder()
            .add_source(source)
            .build()?
            .try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.api.host.is_empty() {
            return Err(SkillError::config("API host is empty"));
        }

        if self.mqtt.client_id.is_empty() {
            return Err(SkillError::config("MQTT client id is empty"));
        }
        self.mqtt.endpoint()?;

        for (index, intent) in self.intents.iter().enumerate() {
            intent.validate(index)?;
        }

        Ok(())
    }
}
