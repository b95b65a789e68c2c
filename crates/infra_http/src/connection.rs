//! Capsule REST connection
//!
//! Signs every request with HTTP basic auth (the API token as user name,
//! `x` as password), asks for JSON and turns non-success statuses into
//! [`HttpError`]s. The connection keeps no state between calls and can be
//! cloned and shared freely.

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, LOCATION, RETRY_AFTER};
use reqwest::{Client, RequestBuilder, Response};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, instrument, warn};
use url::Url;

use core_kernel::payload::id_from_location;

use crate::config::CapsuleConfig;
use crate::error::HttpError;

const DEFAULT_RETRY_AFTER_SECS: u64 = 60;

/// HTTP connection to one Capsule account
#[derive(Debug, Clone)]
pub struct CapsuleConnection {
    client: Client,
    base_url: Url,
    api_token: String,
    timeout: Duration,
}

impl CapsuleConnection {
    /// Creates a connection from validated configuration
    ///
    /// # Errors
    ///
    /// Returns `HttpError::Config` when the token or the account is missing
    pub fn new(config: &CapsuleConfig) -> Result<Self, HttpError> {
        config.validate()?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.clone())
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url()?,
            api_token: config.api_token.clone(),
            timeout: config.timeout(),
        })
    }

    /// Returns the API root requests are sent to
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolves `path` below the base URL, keeping any path prefix
    fn url(&self, path: &str) -> Result<Url, HttpError> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }

    /// GETs `path` and parses the body as JSON
    #[instrument(skip(self, query))]
    pub async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<Value, HttpError> {
        let request = self.client.get(self.url(path)?).query(query);
        let response = self.send(request, "GET", path).await?;
        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| HttpError::Decode(e.to_string()))
    }

    /// POSTs `body` to `path`
    ///
    /// Returns the id from the last segment of the `Location` header, or
    /// `None` when Capsule sent no numeric id.
    #[instrument(skip(self, body))]
    pub async fn post(&self, path: &str, body: Option<&Value>) -> Result<Option<u64>, HttpError> {
        let mut request = self.client.post(self.url(path)?);
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = self.send(request, "POST", path).await?;

        let id = response
            .headers()
            .get(LOCATION)
            .and_then(|value| value.to_str().ok())
            .and_then(id_from_location);
        debug!(?id, "record created");
        Ok(id)
    }

    /// PUTs `body` to `path`
    #[instrument(skip(self, body))]
    pub async fn put(&self, path: &str, body: &Value) -> Result<(), HttpError> {
        let request = self.client.put(self.url(path)?).json(body);
        self.send(request, "PUT", path).await?;
        Ok(())
    }

    /// DELETEs `path`
    #[instrument(skip(self))]
    pub async fn delete(&self, path: &str) -> Result<(), HttpError> {
        let request = self.client.delete(self.url(path)?);
        self.send(request, "DELETE", path).await?;
        Ok(())
    }

    async fn send(&self, request: RequestBuilder, method: &str, path: &str) -> Result<Response, HttpError> {
        debug!(%method, %path, "sending Capsule request");

        let response = request
            .basic_auth(&self.api_token, Some("x"))
            .send()
            .await
            .map_err(|err| {
                if err.is_timeout() {
                    HttpError::Timeout {
                        operation: format!("{method} {path}"),
                        duration_ms: self.timeout.as_millis() as u64,
                    }
                } else {
                    HttpError::Request(err)
                }
            })?;

        debug!(%method, %path, status = %response.status(), "received Capsule response");
        check_response(response).await
    }
}

/// Passes successful responses through and maps every other status
pub async fn check_response(response: Response) -> Result<Response, HttpError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let path = response.url().path().to_string();
    warn!(status = status.as_u16(), %path, "Capsule request failed");

    match status.as_u16() {
        429 => Err(HttpError::RateLimited {
            retry_after_secs: parse_retry_after(&response),
        }),
        404 => Err(HttpError::NotFound { path }),
        code @ (401 | 403) => Err(HttpError::Unauthorized {
            status: code,
            message: response.text().await.unwrap_or_default(),
        }),
        code if status.is_server_error() => Err(HttpError::Server {
            status: code,
            message: response.text().await.unwrap_or_default(),
        }),
        code => Err(HttpError::Api {
            status: code,
            message: response.text().await.unwrap_or_default(),
        }),
    }
}

/// Parses `Retry-After` as seconds, falling back to 60
fn parse_retry_after(response: &Response) -> u64 {
    response
        .headers()
        .get(RETRY_AFTER)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().parse::<u64>().ok())
        .unwrap_or(DEFAULT_RETRY_AFTER_SECS)
}
