//! Test fixtures and doubles for consistent test setup

use her_skill::skill::envelope::{Intent, RequestEnvelope};
use her_skill::{Command, CommandSink, Dispatcher, Result, SkillError};
use rstest::*;
use std::sync::{Arc, Mutex};

/// Sink that records commands instead of sending them
#[derive(Default)]
pub struct RecordingSink {
    commands: Mutex<Vec<Command>>,
}

impl RecordingSink {
    pub fn commands(&self) -> Vec<Command> {
        self.commands.lock().unwrap().clone()
    }
}

impl CommandSink for RecordingSink {
    fn send(&self, command: Command) -> Result<()> {
        self.commands.lock().unwrap().push(command);
        Ok(())
    }
}

/// Sink that fails every command
pub struct FailingSink;

impl CommandSink for FailingSink {
    fn send(&self, command: Command) -> Result<()> {
        Err(SkillError::handler(format!(
            "refusing to switch {}",
            command.room
        )))
    }
}

/// Dispatcher wired to a recording sink
#[fixture]
pub fn recording() -> (Dispatcher, Arc<RecordingSink>) {
    let sink = Arc::new(RecordingSink::default());
    (Dispatcher::new(sink.clone()), sink)
}

/// Intent request envelope with an optional room slot
pub fn room_intent(name: &str, room: Option<&str>) -> RequestEnvelope {
    let intent = match room {
        Some(room) => Intent::new(name).with_slot("room", room),
        None => Intent::new(name),
    };
    RequestEnvelope::intent(intent)
}
