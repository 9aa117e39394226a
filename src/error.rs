//! Error types for Security and Compliance Center API operations.

use thiserror::Error;

/// Errors that can occur during Security and Compliance Center API operations.
///
/// [`SccError::Validation`] is raised before any network I/O. Every other
/// request-time variant comes from the transport, the server, or decoding.
#[derive(Debug, Error)]
pub enum SccError {
    /// A required option was missing or empty. No request was sent.
    #[error("invalid option '{field}': {reason}")]
    Validation {
        field: &'static str,
        reason: &'static str,
    },

    /// Configuration is missing or incomplete.
    #[error("SCC configuration required: {0}")]
    ConfigMissing(String),

    /// Configuration value could not be used.
    #[error("invalid SCC configuration: {0}")]
    ConfigInvalid(String),

    /// The server answered with a non-2xx status.
    #[error("SCC API error ({status_code}): {message}")]
    Api {
        status_code: u16,
        message: String,
        /// Server trace id, or the correlation id echoed back.
        trace: Option<String>,
        /// Raw JSON error body, when the server sent one.
        body: Option<serde_json::Value>,
    },

    /// Rate limited and no retries were left.
    #[error("Rate limited, retry after {retry_after_secs:?} seconds")]
    RateLimited { retry_after_secs: Option<u64> },

    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A 2xx response body did not match the expected model.
    #[error("Failed to decode response (HTTP {status_code}): {source}")]
    Decode {
        status_code: u16,
        #[source]
        source: serde_json::Error,
    },

    /// A request body could not be serialized.
    #[error("Failed to serialize request: {0}")]
    Serialize(#[from] serde_json::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// Local I/O failure while encoding a request body.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SccError {
    pub fn validation(field: &'static str, reason: &'static str) -> Self {
        Self::Validation { field, reason }
    }

    /// True for errors raised before any request was sent.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::Validation { .. } | Self::ConfigMissing(_) | Self::ConfigInvalid(_)
        )
    }

    /// HTTP status of the response that caused this error, if one was received.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Api { status_code, .. } | Self::Decode { status_code, .. } => Some(*status_code),
            Self::RateLimited { .. } => Some(429),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Result type alias for SCC operations.
pub type Result<T> = core::result::Result<T, SccError>;
