//! Paced HTTP transport with bounded retry.
//!
//! Every request goes through [`HttpClient::send`]:
//!
//! - each attempt has a fixed timeout
//! - a courtesy delay is slept after every attempt, successful or not
//! - connection-level failures are retried with exponential backoff
//!   (`backoff_base * 2^attempt`) until `max_attempts` is used up
//! - a non-2xx status is terminal and never retried

use crate::error::{Result, ScanError};
use jobwatch_core::ScanningConfig;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, warn};

/// A single request, rebuilt for every attempt.
#[derive(Debug, Clone)]
pub struct Request {
    method: Method,
    url: String,
    query: Vec<(String, String)>,
    headers: HeaderMap,
    body: Option<serde_json::Value>,
}

impl Request {
    /// GET request.
    #[must_use]
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: Method::GET,
            url: url.into(),
            query: Vec::new(),
            headers: HeaderMap::new(),
            body: None,
        }
    }

    /// POST request with a JSON body.
    pub fn post_json(url: impl Into<String>, body: &impl Serialize) -> Result<Self> {
        Ok(Self {
            method: Method::POST,
            url: url.into(),
            query: Vec::new(),
            headers: HeaderMap::new(),
            body: Some(serde_json::to_value(body)?),
        })
    }

    /// Add a query parameter.
    #[must_use]
    pub fn query(mut self, key: &str, value: impl ToString) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    /// Add a header.
    #[must_use]
    pub fn header(mut self, name: &'static str, value: &'static str) -> Self {
        self.headers.insert(
            HeaderName::from_static(name),
            HeaderValue::from_static(value),
        );
        self
    }

    /// Target URL without query string.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

/// HTTP client shared by every adapter in a run.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: reqwest::Client,
    request_delay: Duration,
    max_attempts: u32,
    backoff_base: Duration,
}

impl HttpClient {
    /// Build a client from the scanning settings.
    pub fn new(config: &ScanningConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(ScanError::Client)?;

        Ok(Self {
            client,
            request_delay: Duration::from_millis(config.request_delay_ms),
            max_attempts: config.max_attempts.max(1),
            backoff_base: Duration::from_millis(config.backoff_base_ms),
        })
    }

    /// Send a request and return the response body as text.
    pub async fn fetch_text(&self, request: &Request) -> Result<String> {
        self.send(request).await
    }

    /// Send a request and decode the JSON response body.
    pub async fn fetch_json<T: DeserializeOwned>(&self, request: &Request) -> Result<T> {
        let body = self.send(request).await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn send(&self, request: &Request) -> Result<String> {
        let mut attempt = 0;
        loop {
            let result = self.attempt(request).await;
            tokio::time::sleep(self.request_delay).await;

            match result {
                Ok(Ok(body)) => return Ok(body),
                Ok(Err(status)) => {
                    debug!(url = %request.url, status, "non-success status, not retrying");
                    return Err(ScanError::HttpStatus {
                        url: request.url.clone(),
                        status,
                    });
                }
                Err(source) => {
                    attempt += 1;
                    if attempt >= self.max_attempts {
                        return Err(ScanError::Transport {
                            url: request.url.clone(),
                            attempts: attempt,
                            source,
                        });
                    }
                    let backoff = self.backoff_for(attempt - 1);
                    warn!(
                        url = %request.url,
                        attempt,
                        max_attempts = self.max_attempts,
                        ?backoff,
                        error = %source,
                        "request failed, retrying"
                    );
                    tokio::time::sleep(backoff).await;
                }
            }
        }
    }

    /// One attempt. The outer error is a transport failure, the inner one a
    /// non-2xx status code.
    async fn attempt(
        &self,
        request: &Request,
    ) -> std::result::Result<std::result::Result<String, u16>, reqwest::Error> {
        let mut builder = self
            .client
            .request(request.method.clone(), &request.url)
            .headers(request.headers.clone());
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Ok(Err(status.as_u16()));
        }
        Ok(Ok(response.text().await?))
    }

    fn backoff_for(&self, attempt: u32) -> Duration {
        self.backoff_base
            .saturating_mul(2u32.saturating_pow(attempt))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn fast_config() -> ScanningConfig {
        ScanningConfig {
            request_delay_ms: 0,
            timeout_secs: 5,
            max_attempts: 3,
            backoff_base_ms: 0,
            ..ScanningConfig::default()
        }
    }

    #[test]
    fn test_backoff_doubles() {
        let client = HttpClient::new(&ScanningConfig {
            backoff_base_ms: 100,
            ..fast_config()
        })
        .expect("build client");
        assert_eq!(client.backoff_for(0), Duration::from_millis(100));
        assert_eq!(client.backoff_for(1), Duration::from_millis(200));
        assert_eq!(client.backoff_for(2), Duration::from_millis(400));
    }

    #[tokio::test]
    async fn test_get_with_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/jobs"))
            .and(query_param("c", "engineering"))
            .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
            .expect(1)
            .mount(&server)
            .await;

        let client = HttpClient::new(&fast_config()).expect("build client");
        let body = client
            .fetch_text(&Request::get(format!("{}/jobs", server.uri())).query("c", "engineering"))
            .await
            .expect("fetch");
        assert_eq!(body, "ok");
    }

    #[tokio::test]
    async fn test_post_json_with_header() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/search"))
            .and(header("x-csrf-token", "x"))
            .and(body_json(serde_json::json!({"page": 0})))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"n": 1})))
            .expect(1)
            .mount(&server)
            .await;

        let client = HttpClient::new(&fast_config()).expect("build client");
        let request = Request::post_json(
            format!("{}/search", server.uri()),
            &serde_json::json!({"page": 0}),
        )
        .expect("build request")
        .header("x-csrf-token", "x");
        let value: serde_json::Value = client.fetch_json(&request).await.expect("fetch");
        assert_eq!(value["n"], 1);
    }

    #[tokio::test]
    async fn test_server_error_is_not_retried() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .expect(1)
            .mount(&server)
            .await;

        let client = HttpClient::new(&fast_config()).expect("build client");
        let err = client
            .fetch_text(&Request::get(server.uri()))
            .await
            .expect_err("503 should fail");
        assert!(matches!(err, ScanError::HttpStatus { status: 503, .. }));
    }

    #[tokio::test]
    async fn test_connection_failure_uses_every_attempt() {
        // Grab a free port, then close the listener so connections are refused.
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
            listener.local_addr().expect("addr").port()
        };

        let client = HttpClient::new(&fast_config()).expect("build client");
        let err = client
            .fetch_text(&Request::get(format!("http://127.0.0.1:{port}/jobs")))
            .await
            .expect_err("refused connection should fail");
        assert!(matches!(err, ScanError::Transport { attempts: 3, .. }));
    }

    #[tokio::test]
    async fn test_invalid_json_is_parse_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&server)
            .await;

        let client = HttpClient::new(&fast_config()).expect("build client");
        let result: Result<serde_json::Value> =
            client.fetch_json(&Request::get(server.uri())).await;
        assert!(matches!(result, Err(ScanError::Json(_))));
    }
}
