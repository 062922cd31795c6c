//! Error handling helper functions
//!
//! Parsing helpers that attach the context of the value being parsed to the
//! error message.

use crate::error::{Result, SkillError};
use std::net::SocketAddr;

/// Parse an HTTP(S) URL with validation and context
pub fn parse_url_safe(url: &str, context: &str) -> Result<url::Url> {
    if url.is_empty() {
        return Err(SkillError::invalid_input(format!(
            "Empty URL provided for {context}"
        )));
    }

    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(SkillError::invalid_input(format!(
            "Invalid URL scheme for {context}: {url}"
        )));
    }

    url::Url::parse(url).map_err(|e| {
        SkillError::invalid_input(format!("Failed to parse URL for {context} - {url}: {e}"))
    })
}

/// Parse a socket address with validation
pub fn parse_socket_addr_safe(addr: &str, context: &str) -> Result<SocketAddr> {
    if addr.is_empty() {
        return Err(SkillError::invalid_input(format!(
            "Empty socket address provided for {context}"
        )));
    }

    addr.parse::<SocketAddr>().map_err(|e| {
        SkillError::invalid_input(format!(
            "Failed to parse socket address for {context} - {addr}: {e}"
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_url_safe() {
        assert!(parse_url_safe("http://127.0.0.1:8080/alexa/", "test").is_ok());
        assert!(parse_url_safe("https://alexa.mydomain.com/alexa/", "test").is_ok());

        assert!(parse_url_safe("", "test").is_err());
        assert!(parse_url_safe("not a url", "test").is_err());
        assert!(parse_url_safe("ws://localhost:9000", "test").is_err());
    }

    #[test]
    fn test_parse_socket_addr_safe() {
        let addr = parse_socket_addr_safe("0.0.0.0:8080", "listener").unwrap();
        assert_eq!(addr.port(), 8080);

        let err = parse_socket_addr_safe("localhost", "listener").unwrap_err();
        assert!(err.to_string().contains("listener"));
        assert!(parse_socket_addr_safe("", "listener").is_err());
    }
}
