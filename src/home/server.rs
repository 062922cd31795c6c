//! HTTP surface of the home receiver

use super::intents::HomeReceiver;
use crate::command::Command;
use crate::error::{Result, SkillError};
use crate::http::{bind, request_span, shutdown_signal};
use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

/// Path the skill posts commands to
pub const COMMAND_PATH: &str = "/alexa/";

/// Home receiver web service
pub struct HomeServer {
    receiver: HomeReceiver,
    address: String,
}

impl HomeServer {
    pub fn new<S: Into<String>>(receiver: HomeReceiver, address: S) -> Self {
        Self {
            receiver,
            address: address.into(),
        }
    }

    pub fn create_router(&self) -> Router {
        router(self.receiver.clone())
    }

    /// Serve until CTRL+C or SIGTERM
    pub async fn start(&self) -> Result<()> {
        let listener = bind(&self.address).await?;
        info!("🏠 Listening on {}", self.address);

        axum::serve(listener, self.create_router())
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| SkillError::connection(format!("HTTP server error: {e}")))?;

        Ok(())
    }
}

/// Router for the home receiver
pub fn router(receiver: HomeReceiver) -> Router {
    Router::new()
        .route("/", get(home))
        .route(COMMAND_PATH, post(command))
        .layer(TraceLayer::new_for_http().make_span_with(request_span))
        .with_state(receiver)
}

async fn home() -> &'static str {
    "Welcome home!"
}

async fn command(State(receiver): State<HomeReceiver>, body: Bytes) -> Response {
    let command: Command = match serde_json::from_slice(&body) {
        Ok(command) => command,
        Err(e) => {
            warn!(error = %e, "Rejecting malformed command");
            return (StatusCode::BAD_REQUEST, e.to_string()).into_response();
        }
    };

    match receiver.apply(&command).await {
        Ok(_) => "ok".into_response(),
        Err(e) => {
            error!(error = %e, "Failed to apply command");
            (StatusCode::SERVICE_UNAVAILABLE, e.to_string()).into_response()
        }
    }
}
