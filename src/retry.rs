//! Retry policy for transient transport and server failures.
//!
//! Retries are off unless the caller enables them. Validation errors never
//! reach this layer.

use std::time::Duration;

use reqwest::header::{HeaderMap, RETRY_AFTER};
use reqwest::{Method, StatusCode};

/// Delay before the first retry.
pub const INITIAL_RETRY_DELAY: Duration = Duration::from_secs(1);

/// Default cap on a single retry delay.
pub const DEFAULT_MAX_RETRY_INTERVAL: Duration = Duration::from_secs(30);

const RETRY_MULTIPLIER: u32 = 2;

/// Exponential backoff policy applied by the client transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Maximum number of retries after the first attempt. Zero disables retries.
    pub max_retries: u32,
    /// Upper bound on any single delay, including server `Retry-After` hints.
    pub max_interval: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::disabled()
    }
}

impl RetryPolicy {
    /// No retries.
    #[must_use]
    pub const fn disabled() -> Self {
        Self {
            max_retries: 0,
            max_interval: DEFAULT_MAX_RETRY_INTERVAL,
        }
    }

    /// Retry up to `max_retries` times, never waiting longer than `max_interval`.
    #[must_use]
    pub const fn new(max_retries: u32, max_interval: Duration) -> Self {
        Self {
            max_retries,
            max_interval,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.max_retries > 0
    }

    /// Delay before retry number `attempt` (0-based).
    pub fn delay_for(&self, attempt: u32, retry_after: Option<Duration>) -> Duration {
        let backoff = retry_after.unwrap_or_else(|| {
            INITIAL_RETRY_DELAY.saturating_mul(RETRY_MULTIPLIER.saturating_pow(attempt))
        });
        backoff.min(self.max_interval)
    }

    /// Whether a response with `status` should be retried.
    ///
    /// 429 is retried for every method since the server did not process the
    /// request. Server errors are retried only for idempotent methods.
    pub fn should_retry_status(&self, method: &Method, status: StatusCode) -> bool {
        match status.as_u16() {
            429 => true,
            500 | 502 | 503 | 504 => is_idempotent(method),
            _ => false,
        }
    }

    /// Whether a transport failure should be retried.
    pub fn should_retry_error(&self, method: &Method, error: &reqwest::Error) -> bool {
        (error.is_connect() || error.is_timeout()) && is_idempotent(method)
    }
}

/// GET, HEAD, PUT, DELETE and OPTIONS may be safely repeated.
pub fn is_idempotent(method: &Method) -> bool {
    matches!(method.as_str(), "GET" | "HEAD" | "PUT" | "DELETE" | "OPTIONS")
}

/// Parse a `Retry-After` header given in seconds.
pub fn retry_after(headers: &HeaderMap) -> Option<Duration> {
    headers
        .get(RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok())
        .map(Duration::from_secs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    #[test]
    fn test_default_is_disabled() {
        assert!(!RetryPolicy::default().is_enabled());
        assert!(RetryPolicy::new(3, Duration::from_secs(5)).is_enabled());
    }

    #[test]
    fn test_delay_grows_and_is_capped() {
        let policy = RetryPolicy::new(5, Duration::from_secs(5));
        assert_eq!(policy.delay_for(0, None), Duration::from_secs(1));
        assert_eq!(policy.delay_for(1, None), Duration::from_secs(2));
        assert_eq!(policy.delay_for(2, None), Duration::from_secs(4));
        assert_eq!(policy.delay_for(3, None), Duration::from_secs(5));
        assert_eq!(policy.delay_for(40, None), Duration::from_secs(5));
    }

    #[test]
    fn test_retry_after_is_capped() {
        let policy = RetryPolicy::new(2, Duration::from_secs(10));
        assert_eq!(
            policy.delay_for(0, Some(Duration::from_secs(3))),
            Duration::from_secs(3)
        );
        assert_eq!(
            policy.delay_for(0, Some(Duration::from_secs(120))),
            Duration::from_secs(10)
        );
    }

    #[test]
    fn test_status_rules() {
        let policy = RetryPolicy::new(2, Duration::from_secs(1));
        assert!(policy.should_retry_status(&Method::POST, StatusCode::TOO_MANY_REQUESTS));
        assert!(policy.should_retry_status(&Method::GET, StatusCode::SERVICE_UNAVAILABLE));
        assert!(!policy.should_retry_status(&Method::POST, StatusCode::SERVICE_UNAVAILABLE));
        assert!(!policy.should_retry_status(&Method::GET, StatusCode::NOT_IMPLEMENTED));
        assert!(!policy.should_retry_status(&Method::GET, StatusCode::NOT_FOUND));
    }

    #[test]
    fn test_parse_retry_after() {
        let mut headers = HeaderMap::new();
        assert_eq!(retry_after(&headers), None);
        headers.insert(RETRY_AFTER, HeaderValue::from_static("7"));
        assert_eq!(retry_after(&headers), Some(Duration::from_secs(7)));
        headers.insert(RETRY_AFTER, HeaderValue::from_static("Wed, 21 Oct 2015 07:28:00 GMT"));
        assert_eq!(retry_after(&headers), None);
    }
}
