//! WireMock-based home server mocking infrastructure
//!
//! Stands in for the home receiver so forwarded commands can be inspected
//! without a real home automation server.

use her_skill::SkillConfig;
use serde_json::Value;
use std::time::Duration;
use wiremock::{
    matchers::{method, path},
    Mock, MockServer, Request, ResponseTemplate,
};

/// Path the compiled skill posts to
pub const HOME_PATH: &str = "/alexa/";

/// Mock home server for testing
pub struct MockHomeServer {
    pub server: MockServer,
}

impl MockHomeServer {
    /// Start a server that answers every command with `ok`
    pub async fn start() -> Self {
        let mock = Self::bare().await;
        Mock::given(method("POST"))
            .and(path(HOME_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
            .mount(&mock.server)
            .await;
        mock
    }

    /// Start a server with no mocks mounted
    pub async fn bare() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// Add a custom mock
    pub async fn add_mock(&self, mock: Mock) {
        mock.mount(&self.server).await;
    }

    /// Skill configuration pointing at this server
    pub fn skill_config(&self) -> SkillConfig {
        SkillConfig::default()
            .with_home("http", self.server.address().to_string())
            .with_path(HOME_PATH)
            .with_timeout(Duration::from_secs(2))
    }

    /// Requests received so far
    pub async fn requests(&self) -> Vec<Request> {
        self.server.received_requests().await.unwrap_or_default()
    }

    /// JSON bodies of the requests received so far
    pub async fn bodies(&self) -> Vec<Value> {
        self.requests()
            .await
            .iter()
            .map(|request| serde_json::from_slice(&request.body).expect("JSON body"))
            .collect()
    }

    /// Wait until at least `count` requests arrived, or give up after 2s
    pub async fn wait_for_requests(&self, count: usize) -> Vec<Request> {
        for _ in 0..200 {
            let requests = self.requests().await;
            if requests.len() >= count {
                return requests;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        self.requests().await
    }
}
