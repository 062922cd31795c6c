//! Home automation bus: publishes intent messages to the MQTT broker

use super::intents::HomeMessage;
use crate::config::MqttConfig;
use crate::error::{Result, SkillError};
use async_trait::async_trait;
use rumqttc::{AsyncClient, ConnectionError, Event, EventLoop, MqttOptions, Outgoing, Packet, QoS};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

const KEEP_ALIVE: Duration = Duration::from_secs(30);
const RECONNECT_DELAY: Duration = Duration::from_secs(2);

/// Requests the client queues before `publish` waits on the event loop
const REQUEST_CAPACITY: usize = 16;

/// Destination for bus messages
#[async_trait]
pub trait Publisher: Send + Sync {
    async fn publish(&self, message: &HomeMessage) -> Result<()>;
}

/// Publisher backed by an MQTT broker connection
#[derive(Clone)]
pub struct MqttPublisher {
    client: AsyncClient,
}

impl MqttPublisher {
    /// Create the client and spawn the event loop that drives its connection
    ///
    /// The connection is established lazily by the event loop and re-tried on
    /// failure; messages published meanwhile wait in the client queue.
    pub fn connect(config: &MqttConfig) -> Result<(Self, JoinHandle<()>)> {
        let (host, port) = config.endpoint()?;
        let mut options = MqttOptions::new(config.client_id.clone(), host.clone(), port);
        options.set_keep_alive(KEEP_ALIVE);

        let (client, eventloop) = AsyncClient::new(options, REQUEST_CAPACITY);
        info!(%host, port, "Connecting to MQTT broker");

        Ok((Self { client }, tokio::spawn(drive(eventloop))))
    }

    /// Ask the event loop to disconnect and stop
    pub async fn disconnect(&self) -> Result<()> {
        info!("Disconnecting MQTT");
        self.client
            .disconnect()
            .await
            .map_err(|e| SkillError::mqtt(format!("disconnect failed: {e}")))
    }
}

#[async_trait]
impl Publisher for MqttPublisher {
    async fn publish(&self, message: &HomeMessage) -> Result<()> {
        // retained, so late subscribers see the last state of the light
        self.client
            .publish(
                message.topic.clone(),
                QoS::AtMostOnce,
                true,
                message.message.clone(),
            )
            .await
            .map_err(|e| SkillError::mqtt(format!("publish to {} failed: {e}", message.topic)))
    }
}

async fn drive(mut eventloop: EventLoop) {
    loop {
        match eventloop.poll().await {
            Ok(Event::Incoming(Packet::ConnAck(_))) => info!("Connected to MQTT broker"),
            Ok(Event::Outgoing(Outgoing::Disconnect)) => break,
            Ok(event) => debug!(?event, "MQTT event"),
            Err(ConnectionError::RequestsDone) => break,
            Err(e) => {
                warn!(error = %e, "MQTT connection error, retrying");
                tokio::time::sleep(RECONNECT_DELAY).await;
            }
        }
    }
    debug!("MQTT event loop stopped");
}

/// Publish every message received on `rx` until all senders are gone
///
/// Returns how many messages were published. Failures are logged and the
/// message is dropped.
pub async fn drain(mut rx: mpsc::Receiver<HomeMessage>, publisher: &dyn Publisher) -> usize {
    let mut published = 0;

    while let Some(message) = rx.recv().await {
        match publisher.publish(&message).await {
            Ok(()) => {
                published += 1;
                info!(
                    topic = %message.topic,
                    message = %String::from_utf8_lossy(&message.message),
                    "Published message"
                );
            }
            Err(e) => error!(
                topic = %message.topic,
                error = %e,
                retryable = e.is_retryable(),
                "Failed to publish message"
            ),
        }
    }

    debug!("Bus channel closed");
    published
}
