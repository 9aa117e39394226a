//! Client configuration.
//!
//! Configuration is either built in code or read from the environment:
//!
//! - `SCC_AUTH_TOKEN` (required) - bearer token sent on every request
//! - `SCC_URL` (optional) - service URL (defaults to `https://us-south.compliance.cloud.ibm.com`)
//! - `SCC_MAX_RETRIES` (optional) - retries for transient failures (default 0)
//! - `SCC_MAX_RETRY_INTERVAL` (optional) - cap on a single retry delay, in seconds
//! - `SCC_ENABLE_GZIP` (optional) - `true`/`1` to gzip request bodies

use std::env;
use std::time::Duration;

use reqwest::header::HeaderMap;

use crate::error::{Result, SccError};
use crate::retry::RetryPolicy;

/// Default service URL.
pub const DEFAULT_SERVICE_URL: &str = "https://us-south.compliance.cloud.ibm.com";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);

/// Settings used to build an [`SccClient`](crate::SccClient).
#[derive(Clone)]
pub struct ClientConfig {
    pub service_url: String,
    pub token: Option<String>,
    pub retry: RetryPolicy,
    pub gzip: bool,
    pub timeout: Duration,
    pub default_headers: HeaderMap,
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("service_url", &self.service_url)
            .field("retry", &self.retry)
            .field("gzip", &self.gzip)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            service_url: DEFAULT_SERVICE_URL.to_string(),
            token: None,
            retry: RetryPolicy::disabled(),
            gzip: false,
            timeout: DEFAULT_TIMEOUT,
            default_headers: HeaderMap::new(),
        }
    }
}

impl ClientConfig {
    /// Configuration for `service_url` with everything else defaulted.
    pub fn new(service_url: impl Into<String>) -> Self {
        Self {
            service_url: service_url.into(),
            ..Self::default()
        }
    }

    /// Read configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`SccError::ConfigMissing`] if `SCC_AUTH_TOKEN` is not set and
    /// [`SccError::ConfigInvalid`] if a numeric or boolean variable cannot be
    /// parsed.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let token = lookup("SCC_AUTH_TOKEN").ok_or_else(|| {
            SccError::ConfigMissing("SCC_AUTH_TOKEN environment variable not set".to_string())
        })?;

        let mut config = Self::new(
            lookup("SCC_URL").unwrap_or_else(|| DEFAULT_SERVICE_URL.to_string()),
        )
        .with_token(token);

        if let Some(raw) = lookup("SCC_MAX_RETRIES") {
            let max_retries = raw.trim().parse::<u32>().map_err(|_| {
                SccError::ConfigInvalid(format!("SCC_MAX_RETRIES must be an integer, got '{raw}'"))
            })?;
            config.retry.max_retries = max_retries;
        }

        if let Some(raw) = lookup("SCC_MAX_RETRY_INTERVAL") {
            let secs = raw.trim().parse::<u64>().map_err(|_| {
                SccError::ConfigInvalid(format!(
                    "SCC_MAX_RETRY_INTERVAL must be a number of seconds, got '{raw}'"
                ))
            })?;
            config.retry.max_interval = Duration::from_secs(secs);
        }

        if let Some(raw) = lookup("SCC_ENABLE_GZIP") {
            config.gzip = match raw.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" => true,
                "0" | "false" | "no" | "" => false,
                _ => {
                    return Err(SccError::ConfigInvalid(format!(
                        "SCC_ENABLE_GZIP must be true or false, got '{raw}'"
                    )))
                }
            };
        }

        Ok(config)
    }

    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Enable retries with the given limits.
    #[must_use]
    pub fn with_retries(mut self, max_retries: u32, max_interval: Duration) -> Self {
        self.retry = RetryPolicy::new(max_retries, max_interval);
        self
    }

    #[must_use]
    pub fn with_gzip(mut self, enabled: bool) -> Self {
        self.gzip = enabled;
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_default_headers(mut self, headers: HeaderMap) -> Self {
        self.default_headers = headers;
        self
    }
}
