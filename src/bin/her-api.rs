//! her-api - home receiver for forwarded light commands
//!
//! Usage: `her-api [opts] <config file>`; the config file must be a TOML
//! file with the `[api]` listener, the `[mqtt]` broker and the `[[intents]]`
//! table.

use anyhow::Context;
use clap::{ArgAction, Parser};
use her_skill::config::HomeConfig;
use her_skill::home::{drain, HomeReceiver, HomeServer, IntentTable, MqttPublisher};
use her_skill::logging::{build_filter, init_logging, LogFormat};
use std::path::PathBuf;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{info, warn};

/// Messages waiting for the bus before senders are held back
const BUS_CAPACITY: usize = 64;

/// How long the event loop gets to deliver the disconnect
const MQTT_SHUTDOWN_GRACE: Duration = Duration::from_millis(250);

#[derive(Parser, Debug)]
#[command(name = "her-api")]
#[command(about = "Receives light commands from the skill and publishes them to MQTT")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Args {
    /// TOML file with a valid configuration
    config: PathBuf,

    /// Verbose logging: -v for info, -vv for debug
    #[arg(short, action = ArgAction::Count)]
    verbose: u8,

    /// Emit logs as JSON lines
    #[arg(long)]
    log_json: bool,
}

impl Args {
    fn log_level(&self) -> Option<&'static str> {
        match self.verbose {
            0 => None,
            1 => Some("info"),
            _ => Some("debug"),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let format = if args.log_json {
        LogFormat::Json
    } else {
        LogFormat::Compact
    };
    init_logging(build_filter(args.log_level(), "warn"), format)?;

    let config = HomeConfig::from_file(&args.config)
        .with_context(|| format!("loading {}", args.config.display()))?;
    info!(intents = config.intents.len(), "Configuration loaded");

    let (publisher, eventloop) =
        MqttPublisher::connect(&config.mqtt).context("setting up the MQTT client")?;

    let (tx, rx) = mpsc::channel(BUS_CAPACITY);
    let bus = {
        let publisher = publisher.clone();
        tokio::spawn(async move { drain(rx, &publisher).await })
    };

    let receiver = HomeReceiver::new(IntentTable::new(config.intents), tx);
    let server = HomeServer::new(receiver, config.api.listen_address());
    let served = server.start().await;

    // dropping the server closes the channel and lets the bus task finish
    drop(server);
    let published = bus.await.context("bus task panicked")?;
    info!(published, "Bus drained");

    if let Err(e) = publisher.disconnect().await {
        warn!(error = %e, "MQTT disconnect failed");
    }
    drop(publisher);
    match tokio::time::timeout(MQTT_SHUTDOWN_GRACE, eventloop).await {
        Ok(Ok(())) => {}
        Ok(Err(e)) => warn!(error = %e, "MQTT event loop ended abnormally"),
        Err(_) => warn!("MQTT broker unreachable, giving up on a clean disconnect"),
    }
    info!("Done");

    served.map_err(Into::into)
}
