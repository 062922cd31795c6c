//! Light switch command exchanged between the skill and the home server

use serde::{Deserialize, Serialize};
use std::fmt;

/// Light switch action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Action {
    SwitchOn,
    SwitchOff,
}

impl Action {
    /// Wire name of the action
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::SwitchOn => "switch-on",
            Action::SwitchOff => "switch-off",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Command sent to the home server: `{"action": ..., "room": ...}`
///
/// Built per request and dropped once handed to the forwarder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Command {
    pub action: Action,
    pub room: String,
}

impl Command {
    pub fn new<S: Into<String>>(action: Action, room: S) -> Self {
        Self {
            action,
            room: room.into(),
        }
    }
}
