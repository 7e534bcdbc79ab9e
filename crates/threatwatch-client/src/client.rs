//! HTTP feed client implementation.

use crate::config::ClientConfig;
use async_trait::async_trait;
use reqwest::Client as HttpClient;
use std::sync::Arc;
use std::time::Duration;
use threatwatch_core::{extract_records, Result, ThreatError, ThreatRecord};
use tracing::{debug, warn};

/// Anything that can produce the records of a threat feed.
///
/// [`FeedClient`] is the real implementation; tests substitute canned sources.
#[async_trait]
pub trait FeedSource: Send + Sync {
    /// Fetch `url` and return the records under its `data` key
    async fn get_feed(&self, url: &str) -> Result<Vec<ThreatRecord>>;
}

/// HTTP client for JSON threat feeds
#[derive(Clone)]
pub struct FeedClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http: HttpClient,
    timeout: Duration,
}

impl FeedClient {
    /// Create a client with default settings
    pub fn new() -> Result<Self> {
        FeedClientBuilder::new().build()
    }

    /// Create a builder for custom configuration
    #[must_use]
    pub fn builder() -> FeedClientBuilder {
        FeedClientBuilder::new()
    }

    /// Perform a GET request and parse the body as JSON
    pub async fn get_json(&self, url: &str) -> Result<serde_json::Value> {
        debug!(url = %url, "GET request");

        let response = self
            .inner
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| self.transport_error(&e))?;

        let status = response.status();
        if !status.is_success() {
            warn!(url = %url, status = status.as_u16(), "feed returned error status");
            return Err(ThreatError::Status {
                code: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| self.transport_error(&e))?;

        serde_json::from_slice(&body).map_err(ThreatError::Json)
    }

    /// Convert a reqwest error into the matching transport error
    fn transport_error(&self, err: &reqwest::Error) -> ThreatError {
        warn!(error = %err, "feed request failed");

        if err.is_timeout() {
            ThreatError::Timeout(self.inner.timeout.as_secs())
        } else if err.is_connect() {
            ThreatError::Connection(err.to_string())
        } else {
            ThreatError::Http(err.to_string())
        }
    }
}

#[async_trait]
impl FeedSource for FeedClient {
    async fn get_feed(&self, url: &str) -> Result<Vec<ThreatRecord>> {
        let document = self.get_json(url).await?;
        extract_records(document)
    }
}

impl std::fmt::Debug for FeedClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeedClient")
            .field("timeout", &self.inner.timeout)
            .finish_non_exhaustive()
    }
}

/// Builder for configuring a [`FeedClient`]
#[derive(Debug, Default)]
pub struct FeedClientBuilder {
    config: ClientConfig,
}

impl FeedClientBuilder {
    /// Create a builder with default settings
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing configuration
    #[must_use]
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the request timeout
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config = self.config.timeout(timeout);
        self
    }

    /// Set the User-Agent header
    #[must_use]
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config = self.config.user_agent(agent);
        self
    }

    /// Build the client
    pub fn build(self) -> Result<FeedClient> {
        let http = HttpClient::builder()
            .timeout(self.config.timeout)
            .user_agent(&self.config.user_agent)
            .gzip(true)
            .build()
            .map_err(|e| ThreatError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(FeedClient {
            inner: Arc::new(ClientInner {
                http,
                timeout: self.config.timeout,
            }),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn serve(body: ResponseTemplate) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/feed"))
            .respond_with(body)
            .mount(&server)
            .await;
        server
    }

    #[tokio::test]
    async fn test_get_feed_returns_data_records() {
        let server = serve(
            ResponseTemplate::new(200)
                .set_body_json(json!({"data": [{"severity": 7}, {"id": "x"}]})),
        )
        .await;

        let client = FeedClient::new().unwrap();
        let records = client.get_feed(&format!("{}/feed", server.uri())).await.unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].as_value(), &json!({"severity": 7}));
    }

    #[tokio::test]
    async fn test_error_status_is_transport_failure() {
        let server = serve(ResponseTemplate::new(503)).await;

        let client = FeedClient::new().unwrap();
        let err = client.get_feed(&format!("{}/feed", server.uri())).await.unwrap_err();

        assert!(err.is_transport());
        assert_eq!(err.status_code(), Some(503));
    }

    #[tokio::test]
    async fn test_invalid_json_is_not_transport_failure() {
        let server = serve(ResponseTemplate::new(200).set_body_string("<html>nope</html>")).await;

        let client = FeedClient::new().unwrap();
        let err = client.get_feed(&format!("{}/feed", server.uri())).await.unwrap_err();

        assert!(matches!(err, ThreatError::Json(_)));
        assert!(!err.is_transport());
    }

    #[tokio::test]
    async fn test_invalid_utf8_body_is_json_error() {
        let mut body = br#"{"data":[{"severity":9,"id":""#.to_vec();
        body.extend_from_slice(&[0xff, 0xfe]);
        body.extend_from_slice(br#""}]}"#);
        let server = serve(ResponseTemplate::new(200).set_body_raw(body, "application/json")).await;

        let client = FeedClient::new().unwrap();
        let err = client.get_feed(&format!("{}/feed", server.uri())).await.unwrap_err();

        assert!(matches!(err, ThreatError::Json(_)));
    }

    #[tokio::test]
    async fn test_timeout() {
        let server = serve(
            ResponseTemplate::new(200)
                .set_body_json(json!({"data": []}))
                .set_delay(Duration::from_secs(2)),
        )
        .await;

        let client = FeedClient::builder()
            .timeout(Duration::from_millis(200))
            .build()
            .unwrap();
        let err = client.get_feed(&format!("{}/feed", server.uri())).await.unwrap_err();

        assert!(matches!(err, ThreatError::Timeout(_)));
    }

    #[tokio::test]
    async fn test_unparseable_url_is_transport_failure() {
        let client = FeedClient::new().unwrap();
        let err = client.get_feed("not a url").await.unwrap_err();
        assert!(err.is_transport());
    }

    #[tokio::test]
    async fn test_sends_user_agent() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(wiremock::matchers::header("user-agent", "threatwatch-test"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(1)
            .mount(&server)
            .await;

        let client = FeedClient::builder()
            .user_agent("threatwatch-test")
            .build()
            .unwrap();
        let records = client.get_feed(&server.uri()).await.unwrap();

        assert!(records.is_empty());
    }
}
