//! Home side: receives forwarded light commands and publishes them on the bus

pub mod bus;
pub mod intents;
pub mod server;

pub use bus::{drain, MqttPublisher, Publisher};
pub use intents::{HomeMessage, HomeReceiver, IntentTable};
pub use server::{HomeServer, COMMAND_PATH};
