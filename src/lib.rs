//! Voice assistant skill for switching home lights
//!
//! The skill turns platform intent requests into short spoken answers and,
//! for the light switch intents, forwards a `{action, room}` command to the
//! home server without waiting for it. The home side of that exchange lives
//! in [`home`]: it maps received commands to bus messages through a
//! configured intent table.
//!
//! # Binaries
//!
//! - `her-skill`: web-service endpoint for the voice platform
//! - `her-api`: home receiver for forwarded commands

pub mod command;
pub mod config;
pub mod error;
pub mod forwarder;
pub mod home;
pub mod http;
pub mod logging;
pub mod skill;
pub mod utils;

// Re-export main types for convenience
pub use command::{Action, Command};
pub use config::{HomeConfig, SkillConfig};
pub use error::{Result, SkillError};
pub use forwarder::{CommandSink, HomeForwarder};
pub use skill::{Dispatcher, RequestEnvelope, ResponseEnvelope};
