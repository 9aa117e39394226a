//! Security and Compliance Center API client.
//!
//! Low-level HTTP transport that handles authentication, retries, body
//! compression and raw requests. Operations live on the two API surfaces
//! returned by [`SccClient::account`] and [`SccClient::instance`].

use std::io::Write;
use std::sync::Arc;

use flate2::write::GzEncoder;
use flate2::Compression;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_ENCODING};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

use crate::config::ClientConfig;
use crate::error::{Result, SccError};
use crate::request::{ApiRequest, CORRELATION_ID_HEADER, REQUEST_ID_HEADER};
use crate::response::{DetailedResponse, RawResponse};
use crate::retry::{self, RetryPolicy};
use crate::services::{AccountApi, InstanceApi};

const USER_AGENT: &str = concat!("sccapi/", env!("CARGO_PKG_VERSION"));

/// Low-level Security and Compliance Center API client.
///
/// This struct is cheaply cloneable; clones reference the same underlying
/// connection pool. The setters take `&mut self`, so a handle cannot be
/// reconfigured while one of its calls is in flight.
///
/// # Example
///
/// ```no_run
/// use sccapi::SccClient;
///
/// # fn example() -> sccapi::Result<()> {
/// // Create from environment variables
/// let client = SccClient::from_env()?;
///
/// // Or configure manually
/// let client = SccClient::new("your-token", "https://us-south.compliance.cloud.ibm.com")?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct SccClient {
    http: Client,
    base_url: Arc<Url>,
    token: Option<String>,
    default_headers: HeaderMap,
    retry: RetryPolicy,
    gzip: bool,
}

impl std::fmt::Debug for SccClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SccClient")
            .field("base_url", &self.base_url.as_str())
            .field("retry", &self.retry)
            .field("gzip", &self.gzip)
            .finish_non_exhaustive()
    }
}

impl SccClient {
    /// Create a client from environment variables.
    ///
    /// See [`ClientConfig::from_env`] for the variables read.
    ///
    /// # Errors
    ///
    /// Returns an error if `SCC_AUTH_TOKEN` is not set or a value is invalid.
    pub fn from_env() -> Result<Self> {
        Self::with_config(ClientConfig::from_env()?)
    }

    /// Create a new client with the provided bearer token and service URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the service URL is invalid.
    pub fn new(token: &str, service_url: &str) -> Result<Self> {
        Self::with_config(ClientConfig::new(service_url).with_token(token))
    }

    /// Create a client from an explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the service URL is invalid or the HTTP client
    /// cannot be built.
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let base_url = Self::parse_service_url(&config.service_url)?;

        let http = Client::builder()
            .user_agent(USER_AGENT)
            .brotli(true)
            .gzip(true)
            .deflate(true)
            .timeout(config.timeout)
            .build()
            .map_err(SccError::Http)?;

        Ok(Self {
            http,
            base_url: Arc::new(base_url),
            token: config.token,
            default_headers: config.default_headers,
            retry: config.retry,
            gzip: config.gzip,
        })
    }

    fn parse_service_url(service_url: &str) -> Result<Url> {
        // Ensure base URL ends with /
        let normalized = if service_url.ends_with('/') {
            service_url.to_string()
        } else {
            format!("{service_url}/")
        };
        Ok(Url::parse(&normalized)?)
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The account-scoped API surface (`api/v3/...`).
    pub fn account(&self) -> AccountApi<'_> {
        AccountApi::new(self)
    }

    /// The instance-scoped API surface (`instances/{instance_id}/v3/...`).
    ///
    /// An empty `instance_id` is reported as a validation error by each call.
    pub fn instance(&self, instance_id: impl Into<String>) -> InstanceApi<'_> {
        InstanceApi::new(self, instance_id.into())
    }

    /// Point the client at a different service URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid; the client is left unchanged.
    pub fn set_service_url(&mut self, service_url: &str) -> Result<()> {
        self.base_url = Arc::new(Self::parse_service_url(service_url)?);
        Ok(())
    }

    /// Replace the headers sent with every request.
    pub fn set_default_headers(&mut self, headers: HeaderMap) {
        self.default_headers = headers;
    }

    /// Retry transient failures up to `max_retries` times.
    pub fn enable_retries(&mut self, max_retries: u32, max_interval: std::time::Duration) {
        self.retry = RetryPolicy::new(max_retries, max_interval);
    }

    pub fn disable_retries(&mut self) {
        self.retry = RetryPolicy::disabled();
    }

    /// Toggle gzip compression of request bodies.
    pub fn set_gzip_compression(&mut self, enabled: bool) {
        self.gzip = enabled;
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry
    }

    /// Send a request and decode its JSON body into `T`.
    ///
    /// Every operation method goes through here; it is public so callers can
    /// reach endpoints that have no dedicated method yet.
    ///
    /// # Errors
    ///
    /// Returns a validation error before any I/O if the request is
    /// incomplete, otherwise any transport, server or decode error.
    pub async fn execute<T: DeserializeOwned>(
        &self,
        request: ApiRequest,
    ) -> Result<DetailedResponse<T>> {
        self.send(request).await?.decode()
    }

    /// Validate, send and status-check a request, retrying per the policy.
    #[tracing::instrument(skip(self, request), fields(operation = request.operation_id()))]
    pub(crate) async fn send(&self, request: ApiRequest) -> Result<RawResponse> {
        let url = request.build_url(&self.base_url)?;
        let headers = request.header_map(&self.default_headers)?;
        let body = match request.body() {
            Some(raw) if self.gzip => Some(gzip(raw)?),
            Some(raw) => Some(raw.to_vec()),
            None => None,
        };
        let method = request.method().clone();

        let mut attempt = 0;
        loop {
            let mut builder = self
                .http
                .request(method.clone(), url.clone())
                .headers(headers.clone());
            if let Some(token) = &self.token {
                builder = builder.bearer_auth(token);
            }
            if let Some(bytes) = &body {
                if self.gzip {
                    builder = builder.header(CONTENT_ENCODING, HeaderValue::from_static("gzip"));
                }
                builder = builder.body(bytes.clone());
            }

            debug!(%method, %url, attempt, "sending request");
            match builder.send().await {
                Ok(response) => {
                    let status = response.status();
                    debug!(status = status.as_u16(), "received response");

                    if attempt < self.retry.max_retries
                        && self.retry.should_retry_status(&method, status)
                    {
                        let delay = self
                            .retry
                            .delay_for(attempt, retry::retry_after(response.headers()));
                        warn!(
                            "{} {} returned {}, retry {} after {:?}",
                            method,
                            url,
                            status,
                            attempt + 1,
                            delay
                        );
                        tokio::time::sleep(delay).await;
                        attempt += 1;
                        continue;
                    }

                    return Self::check_response(response).await;
                }
                Err(e)
                    if attempt < self.retry.max_retries
                        && self.retry.should_retry_error(&method, &e) =>
                {
                    let delay = self.retry.delay_for(attempt, None);
                    warn!("{} {} failed: {}, retry {} after {:?}", method, url, e, attempt + 1, delay);
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => return Err(SccError::Http(e)),
            }
        }
    }

    /// Check response status and convert errors.
    async fn check_response(response: Response) -> Result<RawResponse> {
        let status = response.status();

        if status.is_success() {
            let headers = response.headers().clone();
            let body = response.bytes().await.map_err(SccError::Http)?;
            return Ok(RawResponse {
                status_code: status.as_u16(),
                headers,
                body: body.to_vec(),
            });
        }

        // Handle rate limiting
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(SccError::RateLimited {
                retry_after_secs: retry::retry_after(response.headers()).map(|d| d.as_secs()),
            });
        }

        let headers = response.headers();
        let echoed = [CORRELATION_ID_HEADER, REQUEST_ID_HEADER]
            .into_iter()
            .find_map(|name| headers.get(name).and_then(|v| v.to_str().ok()))
            .map(str::to_string);
        let text = response.text().await.unwrap_or_default();
        Err(Self::api_error(status, &text, echoed))
    }

    /// Build an API error from a failed response body.
    ///
    /// Understands the `{"errors":[{"code","message"}],"trace"}` envelope and
    /// falls back to top-level `message`/`error` fields or the raw text.
    fn api_error(status: StatusCode, text: &str, echoed: Option<String>) -> SccError {
        let body = serde_json::from_str::<serde_json::Value>(text).ok();

        let message = body
            .as_ref()
            .and_then(|json| {
                json.get("errors")
                    .and_then(|errs| errs.get(0))
                    .and_then(|e| e.get("message"))
                    .or_else(|| json.get("message"))
                    .or_else(|| json.get("error"))
                    .and_then(|m| m.as_str())
                    .map(str::to_string)
            })
            .unwrap_or_else(|| {
                if text.trim().is_empty() {
                    format!("HTTP {status}")
                } else {
                    text.to_string()
                }
            });

        let trace = body
            .as_ref()
            .and_then(|json| json.get("trace"))
            .and_then(|t| t.as_str())
            .map(str::to_string)
            .or(echoed);

        SccError::Api {
            status_code: status.as_u16(),
            message,
            trace,
            body,
        }
    }
}

fn gzip(raw: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(raw)?;
    Ok(encoder.finish()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    #[test]
    fn test_client_debug() {
        let client = SccClient::new("test-token", "https://scc.example.com").unwrap();
        let debug = format!("{:?}", client);
        assert!(debug.contains("SccClient"));
        assert!(debug.contains("base_url"));
        // Token should not be in debug output
        assert!(!debug.contains("test-token"));
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let client1 = SccClient::new("token", "https://scc.example.com/base").unwrap();
        let client2 = SccClient::new("token", "https://scc.example.com/base/").unwrap();
        assert_eq!(client1.base_url().as_str(), client2.base_url().as_str());
    }

    #[test]
    fn test_set_service_url_keeps_old_on_error() {
        let mut client = SccClient::new("token", "https://scc.example.com").unwrap();
        assert!(client.set_service_url("not a url").is_err());
        assert_eq!(client.base_url().as_str(), "https://scc.example.com/");
    }

    #[test]
    fn test_retry_toggles() {
        let mut client = SccClient::new("token", "https://scc.example.com").unwrap();
        assert!(!client.retry_policy().is_enabled());
        client.enable_retries(3, std::time::Duration::from_secs(2));
        assert_eq!(client.retry_policy().max_retries, 3);
        client.disable_retries();
        assert!(!client.retry_policy().is_enabled());
    }

    #[test]
    fn test_api_error_from_errors_envelope() {
        let text = r#"{"errors":[{"code":"not_found","message":"Control library not found"}],"trace":"abc-123","status_code":404}"#;
        match SccClient::api_error(StatusCode::NOT_FOUND, text, Some("ignored".to_string())) {
            SccError::Api {
                status_code,
                message,
                trace,
                body,
            } => {
                assert_eq!(status_code, 404);
                assert_eq!(message, "Control library not found");
                assert_eq!(trace.as_deref(), Some("abc-123"));
                assert!(body.is_some());
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_api_error_plain_text() {
        match SccClient::api_error(StatusCode::BAD_GATEWAY, "", Some("corr-1".to_string())) {
            SccError::Api { message, trace, body, .. } => {
                assert_eq!(message, "HTTP 502 Bad Gateway");
                assert_eq!(trace.as_deref(), Some("corr-1"));
                assert!(body.is_none());
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_gzip_round_trip() {
        let compressed = gzip(br#"{"a":1}"#).unwrap();
        let mut decoded = String::new();
        flate2::read::GzDecoder::new(compressed.as_slice())
            .read_to_string(&mut decoded)
            .unwrap();
        assert_eq!(decoded, r#"{"a":1}"#);
    }
}
