//! Error types for the skill handler and the home intent receiver
//!
//! Handler failures never reach the person talking to the device: the
//! dispatcher turns every error into the fallback phrase. The classification
//! helpers here only decide how loudly an error is logged.

use thiserror::Error;

/// Result type alias for skill operations
pub type Result<T> = std::result::Result<T, SkillError>;

/// Error types for skill and home receiver operations
#[derive(Error, Debug)]
pub enum SkillError {
    /// Listener or connection errors
    #[error("Connection error: {0}")]
    Connection(String),

    /// HTTP client errors
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON encoding or decoding errors
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Configuration file loading errors
    #[error("Configuration file error: {0}")]
    ConfigFile(#[from] config::ConfigError),

    /// Invalid input errors (malformed envelopes, bad URLs)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A request handler gave up
    #[error("Handler failed: {0}")]
    Handler(String),

    /// The outbound channel towards the home automation bus is gone
    #[error("Channel closed: {0}")]
    ChannelClosed(String),

    /// MQTT client errors
    #[error("MQTT error: {0}")]
    Mqtt(String),

    /// Generic I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Expected conditions worth a note in the logs
    Warning,
    /// Failed operation
    Error,
    /// The process cannot do useful work until someone intervenes
    Critical,
}

impl SkillError {
    /// Create a connection error
    pub fn connection<S: Into<String>>(msg: S) -> Self {
        Self::Connection(msg.into())
    }

    /// Create a configuration error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    /// Create an invalid input error
    pub fn invalid_input<S: Into<String>>(msg: S) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a handler error
    pub fn handler<S: Into<String>>(msg: S) -> Self {
        Self::Handler(msg.into())
    }

    /// Create a channel closed error
    pub fn channel_closed<S: Into<String>>(msg: S) -> Self {
        Self::ChannelClosed(msg.into())
    }

    /// Create an MQTT error
    pub fn mqtt<S: Into<String>>(msg: S) -> Self {
        Self::Mqtt(msg.into())
    }

    /// Get error severity
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            SkillError::Config(_) | SkillError::ConfigFile(_) => ErrorSeverity::Critical,
            SkillError::ChannelClosed(_) => ErrorSeverity::Critical,
            SkillError::InvalidInput(_) | SkillError::Http(_) | SkillError::Json(_) => {
                ErrorSeverity::Warning
            }
            _ => ErrorSeverity::Error,
        }
    }

    /// Check if error is retryable
    ///
    /// Nothing in this crate retries; the flag is reported in logs so an
    /// operator can tell a flaky home link from a broken deployment.
    pub fn is_retryable(&self) -> bool {
        match self {
            SkillError::Http(e) => e.is_timeout() || e.is_connect(),
            SkillError::Connection(_) | SkillError::Mqtt(_) | SkillError::Io(_) => true,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors_keep_message() {
        let error = SkillError::config("missing home host");
        assert_eq!(error.to_string(), "Configuration error: missing home host");

        let error = SkillError::handler("sink rejected command");
        assert_eq!(error.to_string(), "Handler failed: sink rejected command");
    }

    #[test]
    fn test_severity_classification() {
        assert_eq!(
            SkillError::config("test").severity(),
            ErrorSeverity::Critical
        );
        assert_eq!(
            SkillError::invalid_input("test").severity(),
            ErrorSeverity::Warning
        );
        assert_eq!(SkillError::handler("test").severity(), ErrorSeverity::Error);
        assert_eq!(
            SkillError::channel_closed("test").severity(),
            ErrorSeverity::Critical
        );
    }

    #[test]
    fn test_retryable() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionReset, "reset");
        assert!(SkillError::from(io).is_retryable());
        assert!(!SkillError::handler("test").is_retryable());
        assert!(!SkillError::config("test").is_retryable());
        assert!(SkillError::mqtt("broker went away").is_retryable());
    }

    #[test]
    fn test_json_conversion() {
        let err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let error: SkillError = err.into();
        assert!(matches!(error, SkillError::Json(_)));
        assert_eq!(error.severity(), ErrorSeverity::Warning);
    }
}
