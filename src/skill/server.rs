//! HTTP endpoint exposing the dispatcher to the voice platform

use super::dispatcher::Dispatcher;
use super::envelope::ResponseEnvelope;
use crate::error::{Result, SkillError};
use crate::http::{bind, request_span, shutdown_signal};
use axum::body::Bytes;
use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use tower_http::trace::TraceLayer;
use tracing::info;

/// Skill web service
pub struct SkillServer {
    dispatcher: Dispatcher,
    address: String,
}

impl SkillServer {
    pub fn new<S: Into<String>>(dispatcher: Dispatcher, address: S) -> Self {
        Self {
            dispatcher,
            address: address.into(),
        }
    }

    /// Create the router with all endpoints
    pub fn create_router(&self) -> Router {
        router(self.dispatcher.clone())
    }

    /// Serve until CTRL+C or SIGTERM
    pub async fn start(&self) -> Result<()> {
        let listener = bind(&self.address).await?;
        info!("🎙️ Skill endpoint listening on {}", self.address);

        axum::serve(listener, self.create_router())
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| SkillError::connection(format!("HTTP server error: {e}")))?;

        info!("Skill endpoint stopped");
        Ok(())
    }
}

/// Router for the skill endpoint
pub fn router(dispatcher: Dispatcher) -> Router {
    Router::new()
        .route("/", post(skill_request))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http().make_span_with(request_span))
        .with_state(dispatcher)
}

async fn skill_request(
    State(dispatcher): State<Dispatcher>,
    body: Bytes,
) -> Json<ResponseEnvelope> {
    Json(dispatcher.dispatch_body(&body))
}

async fn health() -> &'static str {
    "ok"
}
