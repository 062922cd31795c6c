//! Voice skill: envelopes, routing, handlers and the HTTP endpoint

pub mod dispatcher;
pub mod envelope;
pub mod handlers;
pub mod server;
pub mod speech;

pub use dispatcher::{route, Dispatcher, Route};
pub use envelope::{Intent, Request, RequestEnvelope, ResponseEnvelope};
pub use server::SkillServer;
pub use speech::SpokenResponse;
