//! Mock Capsule Server
//!
//! A thin wrapper over `wiremock` that mounts Capsule-shaped responses.
//! Point a client at [`MockCapsule::uri`] and register the endpoints a
//! test expects to be called.

use serde_json::Value;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// API token the mock expects in the basic auth header
pub const TEST_TOKEN: &str = "test-token";

/// Running mock of the Capsule REST API
pub struct MockCapsule {
    server: MockServer,
}

impl MockCapsule {
    /// Starts a server on a random local port
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// Base URL to hand to the client configuration
    pub fn uri(&self) -> String {
        self.server.uri()
    }

    /// Access to the raw server for custom matchers
    pub fn server(&self) -> &MockServer {
        &self.server
    }

    /// Answers `GET path` with a JSON body
    pub async fn mount_get(&self, endpoint: &str, body: Value) {
        Mock::given(method("GET"))
            .and(path(endpoint))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    /// Answers `POST path` with `201 Created` and a `Location` header
    /// naming the new record, and expects exactly one call
    pub async fn mount_created(&self, endpoint: &str, location: &str) {
        Mock::given(method("POST"))
            .and(path(endpoint))
            .respond_with(ResponseTemplate::new(201).insert_header("Location", location))
            .expect(1)
            .mount(&self.server)
            .await;
    }

    /// Answers `method path` with an empty response of `status`
    pub async fn mount_status(&self, verb: &str, endpoint: &str, status: u16) {
        Mock::given(method(verb))
            .and(path(endpoint))
            .respond_with(ResponseTemplate::new(status))
            .mount(&self.server)
            .await;
    }

    /// Expects exactly `times` calls of `method path`, answered with 200
    pub async fn expect_call(&self, verb: &str, endpoint: &str, times: u64) {
        Mock::given(method(verb))
            .and(path(endpoint))
            .respond_with(ResponseTemplate::new(200))
            .expect(times)
            .mount(&self.server)
            .await;
    }

    /// Returns the JSON bodies of every request received so far
    pub async fn received_bodies(&self) -> Vec<Value> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .filter_map(|request| serde_json::from_slice(&request.body).ok())
            .collect()
    }
}
