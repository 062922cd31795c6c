//! Listener plumbing shared by the skill endpoint and the home receiver

use crate::error::{Result, SkillError};
use axum::body::Body;
use axum::http::Request;
use tokio::net::TcpListener;
use tracing::{info, info_span, warn, Span};
use uuid::Uuid;

/// Bind a listener on `host:port`
pub async fn bind(address: &str) -> Result<TcpListener> {
    TcpListener::bind(address)
        .await
        .map_err(|e| SkillError::connection(format!("Failed to bind to {address}: {e}")))
}

/// Span for one HTTP request, tagged with a fresh correlation id
pub fn request_span(request: &Request<Body>) -> Span {
    info_span!(
        "http_request",
        method = %request.method(),
        uri = %request.uri(),
        request_id = %Uuid::new_v4()
    )
}

/// Resolve on CTRL+C or SIGTERM
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for CTRL+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal caught, doing clean shutdown");
}
