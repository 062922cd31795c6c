//! Canned phrases and the per-request spoken response

use super::envelope::{OutputSpeech, Reprompt, ResponseBody, ResponseEnvelope, RESPONSE_VERSION};
use crate::command::Action;

pub const WELCOME: &str = "Welcome, you can say Hello or Help. Which would you like to try?";
pub const HELP: &str = "Puoi usarmi per accendere la luce. Cosa devo accendere?";
pub const GOODBYE: &str = "Ciao!";
pub const DID_NOT_UNDERSTAND: &str = "Non ho capito cosa mi hai chiesto";

/// Apology when the room slot is missing or empty
pub fn missing_room(action: Action) -> &'static str {
    match action {
        Action::SwitchOn => "Non ho capito cosa devo accendere",
        Action::SwitchOff => "Non ho capito cosa devo spengere",
    }
}

/// Confirmation for a forwarded command
pub fn switching(action: Action, room: &str) -> String {
    match action {
        Action::SwitchOn => format!("Ok, accendo {room}"),
        Action::SwitchOff => format!("Ok, spengo {room}"),
    }
}

/// Echo of an intent no handler claims
pub fn reflect(intent_name: &str) -> String {
    format!("Hai lanciato {intent_name}")
}

/// What the skill says back for one request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpokenResponse {
    pub speech: Option<String>,
    pub reprompt: Option<String>,
}

impl SpokenResponse {
    /// Say something and let the session end
    pub fn speak<S: Into<String>>(text: S) -> Self {
        Self {
            speech: Some(text.into()),
            reprompt: None,
        }
    }

    /// Say something and repeat it if the user stays silent
    pub fn ask<S: Into<String>>(text: S) -> Self {
        let text = text.into();
        Self {
            reprompt: Some(text.clone()),
            speech: Some(text),
        }
    }

    /// No speech at all
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn into_envelope(self) -> ResponseEnvelope {
        // a reprompt only makes sense if the session stays open
        let should_end_session = self.reprompt.as_ref().map(|_| false);

        ResponseEnvelope {
            version: RESPONSE_VERSION.to_string(),
            response: ResponseBody {
                output_speech: self.speech.map(OutputSpeech::plain_text),
                reprompt: self.reprompt.map(|text| Reprompt {
                    output_speech: OutputSpeech::plain_text(text),
                }),
                should_end_session,
            },
        }
    }
}
