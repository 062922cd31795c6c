//! Request and response envelopes exchanged with the voice platform
//!
//! Only the fields the dispatcher reads are modelled. Anything else in the
//! platform's JSON is ignored, and request types this skill does not know
//! deserialize to [`Request::Unknown`].

use crate::error::Result;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;

/// Envelope version this skill answers with
pub const RESPONSE_VERSION: &str = "1.0";

/// Incoming request envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestEnvelope {
    #[serde(default, deserialize_with = "null_as_default")]
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session: Option<Session>,
    pub request: Request,
}

/// Session block; its id tags the dispatch span
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    #[serde(default)]
    pub new: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

/// Request kinds, tagged by the platform's `type` field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Request {
    #[serde(rename = "LaunchRequest")]
    Launch(RequestMeta),
    #[serde(rename = "IntentRequest")]
    Intent(IntentRequest),
    #[serde(rename = "SessionEndedRequest")]
    SessionEnded(SessionEndedRequest),
    #[serde(other)]
    Unknown,
}

/// Fields common to every request kind
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntentRequest {
    #[serde(flatten)]
    pub meta: RequestMeta,
    pub intent: Intent,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionEndedRequest {
    #[serde(flatten)]
    pub meta: RequestMeta,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// A classified user request with its slots
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Intent {
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub slots: HashMap<String, Slot>,
}

/// Named parameter extracted from the utterance
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Slot {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

/// Treat an explicit `null` like a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Intent {
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            slots: HashMap::new(),
        }
    }

    pub fn with_slot<N: Into<String>, V: Into<String>>(mut self, name: N, value: V) -> Self {
        let name = name.into();
        self.slots.insert(
            name.clone(),
            Slot {
                name,
                value: Some(value.into()),
            },
        );
        self
    }

    /// Value of a slot; `None` when the slot or its value is absent
    pub fn slot_value(&self, name: &str) -> Option<&str> {
        self.slots.get(name).and_then(|slot| slot.value.as_deref())
    }
}

impl Request {
    /// Platform name of the request type
    pub fn type_name(&self) -> &'static str {
        match self {
            Request::Launch(_) => "LaunchRequest",
            Request::Intent(_) => "IntentRequest",
            Request::SessionEnded(_) => "SessionEndedRequest",
            Request::Unknown => "Unknown",
        }
    }

    pub fn intent_name(&self) -> Option<&str> {
        match self {
            Request::Intent(request) => Some(request.intent.name.as_str()),
            _ => None,
        }
    }

    pub fn request_id(&self) -> Option<&str> {
        let meta = match self {
            Request::Launch(meta) => meta,
            Request::Intent(request) => &request.meta,
            Request::SessionEnded(request) => &request.meta,
            Request::Unknown => return None,
        };
        meta.request_id.as_deref()
    }
}

impl RequestEnvelope {
    /// Decode a request body
    pub fn from_slice(body: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(body)?)
    }

    /// Session id, when the platform sent one
    pub fn session_id(&self) -> Option<&str> {
        self.session
            .as_ref()
            .and_then(|session| session.session_id.as_deref())
    }

    /// Wrap a bare request
    pub fn new(request: Request) -> Self {
        Self {
            version: RESPONSE_VERSION.to_string(),
            session: None,
            request,
        }
    }

    pub fn launch() -> Self {
        Self::new(Request::Launch(RequestMeta::default()))
    }

    pub fn intent(intent: Intent) -> Self {
        Self::new(Request::Intent(IntentRequest {
            meta: RequestMeta::default(),
            intent,
        }))
    }

    pub fn session_ended() -> Self {
        Self::new(Request::SessionEnded(SessionEndedRequest::default()))
    }
}

/// Outgoing response envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    pub version: String,
    pub response: ResponseBody,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_speech: Option<OutputSpeech>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reprompt: Option<Reprompt>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub should_end_session: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputSpeech {
    #[serde(rename = "type")]
    pub kind: String,
    pub text: String,
}

impl OutputSpeech {
    pub fn plain_text<S: Into<String>>(text: S) -> Self {
        Self {
            kind: "PlainText".to_string(),
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reprompt {
    pub output_speech: OutputSpeech,
}

impl ResponseEnvelope {
    /// Spoken text, if any
    pub fn speech(&self) -> Option<&str> {
        self.response
            .output_speech
            .as_ref()
            .map(|speech| speech.text.as_str())
    }

    /// Reprompt text, if any
    pub fn reprompt(&self) -> Option<&str> {
        self.response
            .reprompt
            .as_ref()
            .map(|reprompt| reprompt.output_speech.text.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_parse_intent_request() {
        let envelope: RequestEnvelope = serde_json::from_value(json!({
            "version": "1.0",
            "session": {"new": true, "sessionId": "amzn1.echo-api.session.1", "application": {}},
            "context": {"System": {}},
            "request": {
                "type": "IntentRequest",
                "requestId": "amzn1.echo-api.request.1",
                "timestamp": "2020-01-05T18:24:51Z",
                "locale": "it-IT",
                "intent": {
                    "name": "SwitchOnTheLight",
                    "confirmationStatus": "NONE",
                    "slots": {"room": {"name": "room", "value": "cucina", "confirmationStatus": "NONE"}}
                }
            }
        }))
        .unwrap();

        assert_eq!(envelope.request.type_name(), "IntentRequest");
        assert_eq!(envelope.request.intent_name(), Some("SwitchOnTheLight"));
        assert_eq!(
            envelope.request.request_id(),
            Some("amzn1.echo-api.request.1")
        );
        match &envelope.request {
            Request::Intent(request) => {
                assert_eq!(request.intent.slot_value("room"), Some("cucina"));
                assert_eq!(request.meta.locale.as_deref(), Some("it-IT"));
            }
            other => panic!("unexpected request {other:?}"),
        }
        assert!(envelope.session.unwrap().new);
    }

    #[test]
    fn test_slot_without_value() {
        let envelope: RequestEnvelope = serde_json::from_value(json!({
            "request": {
                "type": "IntentRequest",
                "intent": {"name": "SwitchOffTheLight", "slots": {"room": {"name": "room"}}}
            }
        }))
        .unwrap();

        let Request::Intent(request) = envelope.request else {
            panic!("expected an intent request");
        };
        assert_eq!(request.intent.slot_value("room"), None);
        assert_eq!(request.intent.slot_value("colour"), None);
    }

    #[test]
    fn test_null_slots_and_names() {
        let envelope: RequestEnvelope = serde_json::from_value(json!({
            "version": null,
            "request": {
                "type": "IntentRequest",
                "intent": {"name": "SwitchOnTheLight", "slots": null}
            }
        }))
        .unwrap();
        assert_eq!(envelope.request.intent_name(), Some("SwitchOnTheLight"));
        assert_eq!(envelope.version, "");

        let envelope: RequestEnvelope = serde_json::from_value(json!({
            "request": {
                "type": "IntentRequest",
                "intent": {"name": "SwitchOnTheLight", "slots": {"room": {"name": null, "value": "bagno"}}}
            }
        }))
        .unwrap();
        let Request::Intent(request) = envelope.request else {
            panic!("expected an intent request");
        };
        assert_eq!(request.intent.slot_value("room"), Some("bagno"));
    }

    #[test]
    fn test_intent_request_without_intent_does_not_decode() {
        let err = RequestEnvelope::from_slice(
            br#"{"request":{"type":"IntentRequest","requestId":"r"}}"#,
        )
        .unwrap_err();
        assert!(matches!(err, crate::error::SkillError::Json(_)));
    }

    #[test]
    fn test_session_id() {
        let envelope = RequestEnvelope::from_slice(
            br#"{"session":{"sessionId":"s-9"},"request":{"type":"LaunchRequest"}}"#,
        )
        .unwrap();
        assert_eq!(envelope.session_id(), Some("s-9"));
        assert_eq!(RequestEnvelope::launch().session_id(), None);
    }

    #[test]
    fn test_unknown_request_type() {
        let envelope: RequestEnvelope = serde_json::from_value(json!({
            "version": "1.0",
            "request": {"type": "CanFulfillIntentRequest", "requestId": "x"}
        }))
        .unwrap();
        assert_eq!(envelope.request, Request::Unknown);
        assert_eq!(envelope.request.request_id(), None);
    }

    #[test]
    fn test_response_omits_unset_fields() {
        let envelope = ResponseEnvelope {
            version: RESPONSE_VERSION.to_string(),
            response: ResponseBody {
                output_speech: Some(OutputSpeech::plain_text("Ciao!")),
                ..Default::default()
            },
        };
        assert_eq!(
            serde_json::to_value(&envelope).unwrap(),
            json!({
                "version": "1.0",
                "response": {"outputSpeech": {"type": "PlainText", "text": "Ciao!"}}
            })
        );
    }
}
