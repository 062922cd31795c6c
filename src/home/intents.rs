//! Intent table: which bus message a light command turns into

use crate::command::Command;
use crate::config::IntentConf;
use crate::error::{Result, SkillError};
use tokio::sync::mpsc;
use tracing::{info, warn};

/// Message for the home automation bus
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomeMessage {
    pub topic: String,
    pub message: Vec<u8>,
}

/// Ordered `(action, room) -> (topic, message)` table
#[derive(Debug, Clone, Default)]
pub struct IntentTable {
    intents: Vec<IntentConf>,
}

impl IntentTable {
    pub fn new(intents: Vec<IntentConf>) -> Self {
        Self { intents }
    }

    /// First entry whose action and room match exactly
    pub fn lookup(&self, command: &Command) -> Option<&IntentConf> {
        self.intents
            .iter()
            .find(|intent| intent.action == command.action && intent.room == command.room)
    }
}

/// Applies received commands by emitting their bus message
#[derive(Debug, Clone)]
pub struct HomeReceiver {
    table: IntentTable,
    outbound: mpsc::Sender<HomeMessage>,
}

impl HomeReceiver {
    pub fn new(table: IntentTable, outbound: mpsc::Sender<HomeMessage>) -> Self {
        Self { table, outbound }
    }

    /// Emit the message configured for `command`
    ///
    /// Returns `false` when no entry matches; that is logged, not an error.
    pub async fn apply(&self, command: &Command) -> Result<bool> {
        let Some(intent) = self.table.lookup(command) else {
            warn!(action = %command.action, room = %command.room, "Cannot find intent");
            return Ok(false);
        };

        info!(action = %command.action, room = %command.room, topic = %intent.topic, "Applying intent");

        self.outbound
            .send(HomeMessage {
                topic: intent.topic.clone(),
                message: intent.message.clone().into_bytes(),
            })
            .await
            .map_err(|_| SkillError::channel_closed("home bus receiver dropped"))?;

        Ok(true)
    }
}
