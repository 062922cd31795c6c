//! Fire-and-forget command forwarding to the home server
//!
//! The skill answers the user before the home server does. The POST runs on
//! a detached task and its outcome only ever reaches the logs: no retry, no
//! acknowledgment, no authentication.

use crate::command::Command;
use crate::config::SkillConfig;
use crate::error::{Result, SkillError};
use reqwest::header::CONTENT_TYPE;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, info_span, warn, Instrument};

/// Destination for light switch commands
///
/// An error returned here is a handler failure: the dispatcher answers with
/// the fallback phrase.
pub trait CommandSink: Send + Sync {
    fn send(&self, command: Command) -> Result<()>;
}

/// Posts commands to the configured home server
#[derive(Debug, Clone)]
pub struct HomeForwarder {
    client: reqwest::Client,
    url: url::Url,
}

impl HomeForwarder {
    /// Create a forwarder for the configured home server
    pub fn new(config: &SkillConfig) -> Result<Self> {
        let url = config.home_url()?;
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self { client, url })
    }

    /// URL commands are posted to
    pub fn url(&self) -> &url::Url {
        &self.url
    }

    /// Encode the command and launch the POST on the current runtime
    ///
    /// Returns as soon as the request task is spawned. The handle resolves
    /// once the response body (or the transport error) has been logged.
    pub fn forward(&self, command: Command) -> Result<JoinHandle<()>> {
        let runtime = Handle::try_current().map_err(|e| {
            SkillError::handler(format!("No async runtime to forward command on: {e}"))
        })?;

        let body = serde_json::to_vec(&command)?;
        let request = self
            .client
            .post(self.url.clone())
            .header(CONTENT_TYPE, "application/json")
            .body(body);

        let span = info_span!(
            "forward_command",
            action = %command.action,
            room = %command.room,
            url = %self.url
        );

        debug!(action = %command.action, room = %command.room, "Forwarding command to home server");

        Ok(runtime.spawn(
            async move {
                match request.send().await {
                    Ok(response) => {
                        let status = response.status();
                        match response.text().await {
                            Ok(body) => info!(%status, %body, "Home server answered"),
                            Err(e) => warn!(%status, error = %e, "Failed to read home server answer"),
                        }
                    }
                    Err(e) => {
                        let error = SkillError::from(e);
                        error!(
                            error = %error,
                            retryable = error.is_retryable(),
                            "Failed to forward command to home server"
                        );
                    }
                }
            }
            .instrument(span),
        ))
    }
}

impl CommandSink for HomeForwarder {
    fn send(&self, command: Command) -> Result<()> {
        // detached: the task outlives the request
        self.forward(command).map(drop)
    }
}
