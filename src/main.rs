//! her-skill - voice platform endpoint
//!
//! Serves the skill over HTTP and forwards light commands to the home server
//! compiled into the binary.

use her_skill::config::{SkillConfig, HOME_HOST, HOME_PATH};
use her_skill::forwarder::HomeForwarder;
use her_skill::logging::{build_filter, init_logging, LogFormat};
use her_skill::skill::{Dispatcher, SkillServer};
use her_skill::utils::parse_socket_addr_safe;
use her_skill::Result;

use clap::Parser;
use std::sync::Arc;
use tracing::info;

/// Skill endpoint configuration
#[derive(Parser, Debug)]
#[command(name = "her-skill")]
#[command(about = "Voice skill endpoint that switches home lights")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Config {
    /// Address to listen on
    #[arg(long, env = "HER_SKILL_LISTEN", default_value = "0.0.0.0:3000")]
    listen: String,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    log_json: bool,
}

impl Config {
    /// Initialize logging based on debug flag
    fn initialize_logging(&self) -> Result<()> {
        let filter = build_filter(self.debug.then_some("debug"), "info");
        let format = if self.log_json {
            LogFormat::Json
        } else {
            LogFormat::Compact
        };
        init_logging(filter, format)
    }

    /// Validate configuration
    fn validate(&self) -> Result<()> {
        parse_socket_addr_safe(&self.listen, "--listen")?;
        Ok(())
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::parse();
    config.initialize_logging()?;
    config.validate()?;

    info!("🚀 Starting her-skill v{}", env!("CARGO_PKG_VERSION"));

    let forwarder = HomeForwarder::new(&SkillConfig::default())?;
    info!(
        "🏠 Forwarding light commands to {} (host {}, path {})",
        forwarder.url(),
        HOME_HOST,
        HOME_PATH
    );

    let dispatcher = Dispatcher::new(Arc::new(forwarder));
    SkillServer::new(dispatcher, config.listen).start().await
}
