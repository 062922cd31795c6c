//! Logging setup shared by the binaries

use crate::error::{Result, SkillError};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Output format of the fmt layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

/// Build the level filter
///
/// A forced level wins over `RUST_LOG`; otherwise `RUST_LOG` is honoured and
/// `default_level` applies when it is unset or invalid.
pub fn build_filter(forced_level: Option<&str>, default_level: &str) -> EnvFilter {
    match forced_level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
    }
}

/// Install the global subscriber
pub fn init_logging(filter: EnvFilter, format: LogFormat) -> Result<()> {
    let registry = tracing_subscriber::registry().with(filter);

    let result = match format {
        LogFormat::Compact => registry.with(fmt::layer().compact()).try_init(),
        LogFormat::Json => registry.with(fmt::layer().json()).try_init(),
    };

    result.map_err(|e| SkillError::config(format!("Failed to initialize logging: {e}")))
}
