//! Request handlers
//!
//! Every handler produces exactly one [`SpokenResponse`]. Only the light
//! switch handlers touch the outside world, and only through a
//! [`CommandSink`].

use super::speech::{self, SpokenResponse};
use crate::command::{Action, Command};
use crate::error::{ErrorSeverity, Result, SkillError};
use crate::forwarder::CommandSink;
use tracing::{debug, error, info, warn};

/// Slot carrying the room name in the light switch intents
pub const ROOM_SLOT: &str = "room";

pub fn launch() -> SpokenResponse {
    SpokenResponse::ask(speech::WELCOME)
}

pub fn help() -> SpokenResponse {
    SpokenResponse::ask(speech::HELP)
}

pub fn cancel_or_stop() -> SpokenResponse {
    SpokenResponse::speak(speech::GOODBYE)
}

pub fn session_ended(reason: Option<&str>) -> SpokenResponse {
    debug!(reason = reason.unwrap_or("unspecified"), "Session ended");
    SpokenResponse::empty()
}

/// Repeat the name of an intent nothing else handles
pub fn reflect(intent_name: &str) -> SpokenResponse {
    debug!(intent = intent_name, "Reflecting unhandled intent");
    SpokenResponse::speak(speech::reflect(intent_name))
}

/// Switch the light in `room`
///
/// A missing or blank room is a user-input condition: the action's apology
/// is returned and nothing is sent. A sink error is a handler failure.
pub fn switch_the_light(
    sink: &dyn CommandSink,
    action: Action,
    room: Option<&str>,
) -> Result<SpokenResponse> {
    let Some(room) = room.map(str::trim).filter(|room| !room.is_empty()) else {
        info!(%action, "No room in request, nothing to switch");
        return Ok(SpokenResponse::speak(speech::missing_room(action)));
    };

    sink.send(Command::new(action, room))?;
    info!(%action, room, "Light command forwarded");

    Ok(SpokenResponse::speak(speech::switching(action, room)))
}

/// Generic answer for any request that could not be handled
pub fn fallback(error: &SkillError) -> SpokenResponse {
    match error.severity() {
        ErrorSeverity::Warning => warn!(error = %error, "Error handled"),
        ErrorSeverity::Error | ErrorSeverity::Critical => error!(error = %error, "Error handled"),
    }
    SpokenResponse::ask(speech::DID_NOT_UNDERSTAND)
}
