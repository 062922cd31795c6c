//! Request routing
//!
//! Routes are tried in a fixed order and the first match wins. Named intents
//! come before the reflector, which claims every remaining intent. Requests
//! no route claims, and handlers that fail, end in the fallback.

use super::envelope::{Intent, Request, RequestEnvelope, ResponseEnvelope};
use super::handlers::{self, ROOM_SLOT};
use super::speech::SpokenResponse;
use crate::command::Action;
use crate::error::{Result, SkillError};
use crate::forwarder::CommandSink;
use std::sync::Arc;
use tracing::{debug, debug_span};

pub const SWITCH_OFF_INTENT: &str = "SwitchOffTheLight";
pub const SWITCH_ON_INTENT: &str = "SwitchOnTheLight";
pub const HELP_INTENT: &str = "AMAZON.HelpIntent";
pub const CANCEL_INTENT: &str = "AMAZON.CancelIntent";
pub const STOP_INTENT: &str = "AMAZON.StopIntent";

/// Handler selected for a request
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Route<'a> {
    Launch,
    SwitchOff(&'a Intent),
    SwitchOn(&'a Intent),
    Help,
    CancelOrStop,
    SessionEnded(Option<&'a str>),
    Reflector(&'a str),
    Unhandled,
}

/// Pick the handler for a request, in declared order
pub fn route(request: &Request) -> Route<'_> {
    match request {
        Request::Launch(_) => Route::Launch,
        Request::Intent(r) if r.intent.name == SWITCH_OFF_INTENT => Route::SwitchOff(&r.intent),
        Request::Intent(r) if r.intent.name == SWITCH_ON_INTENT => Route::SwitchOn(&r.intent),
        Request::Intent(r) if r.intent.name == HELP_INTENT => Route::Help,
        Request::Intent(r) if r.intent.name == CANCEL_INTENT || r.intent.name == STOP_INTENT => {
            Route::CancelOrStop
        }
        Request::SessionEnded(r) => Route::SessionEnded(r.reason.as_deref()),
        // must stay the last intent arm
        Request::Intent(r) => Route::Reflector(&r.intent.name),
        Request::Unknown => Route::Unhandled,
    }
}

/// Stateless request dispatcher
#[derive(Clone)]
pub struct Dispatcher {
    sink: Arc<dyn CommandSink>,
}

impl Dispatcher {
    pub fn new(sink: Arc<dyn CommandSink>) -> Self {
        Self { sink }
    }

    /// Run the handler chain without the fallback
    pub fn handle(&self, request: &Request) -> Result<SpokenResponse> {
        let route = route(request);
        debug!(?route, "Routed request");

        match route {
            Route::Launch => Ok(handlers::launch()),
            Route::SwitchOff(intent) => handlers::switch_the_light(
                self.sink.as_ref(),
                Action::SwitchOff,
                intent.slot_value(ROOM_SLOT),
            ),
            Route::SwitchOn(intent) => handlers::switch_the_light(
                self.sink.as_ref(),
                Action::SwitchOn,
                intent.slot_value(ROOM_SLOT),
            ),
            Route::Help => Ok(handlers::help()),
            Route::CancelOrStop => Ok(handlers::cancel_or_stop()),
            Route::SessionEnded(reason) => Ok(handlers::session_ended(reason)),
            Route::Reflector(name) => Ok(handlers::reflect(name)),
            Route::Unhandled => Err(SkillError::invalid_input(
                "Unable to find a suitable request handler",
            )),
        }
    }

    /// Answer a request envelope; never fails
    pub fn dispatch(&self, envelope: &RequestEnvelope) -> ResponseEnvelope {
        let request = &envelope.request;
        let span = debug_span!(
            "dispatch",
            request_type = request.type_name(),
            intent = request.intent_name().unwrap_or("-"),
            request_id = request.request_id().unwrap_or("-"),
            session_id = envelope.session_id().unwrap_or("-")
        );
        let _guard = span.enter();

        let response = self
            .handle(request)
            .unwrap_or_else(|error| handlers::fallback(&error));
        response.into_envelope()
    }

    /// Answer a raw request body; bodies that do not decode get the fallback
    pub fn dispatch_body(&self, body: &[u8]) -> ResponseEnvelope {
        match RequestEnvelope::from_slice(body) {
            Ok(envelope) => self.dispatch(&envelope),
            Err(error) => handlers::fallback(&error).into_envelope(),
        }
    }
}
