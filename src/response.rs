//! Response metadata and decoding.

use reqwest::header::HeaderMap;
use serde::de::DeserializeOwned;

use crate::error::{Result, SccError};
use crate::request::CORRELATION_ID_HEADER;

/// The decoded result of a call together with the raw response metadata.
#[derive(Debug, Clone)]
pub struct DetailedResponse<T> {
    /// HTTP status code.
    pub status_code: u16,
    /// Response headers.
    pub headers: HeaderMap,
    /// Decoded body, `None` when the server sent no body.
    pub result: Option<T>,
}

impl<T> DetailedResponse<T> {
    /// Borrow the decoded body.
    pub fn result(&self) -> Option<&T> {
        self.result.as_ref()
    }

    /// Take the decoded body, dropping the metadata.
    pub fn into_result(self) -> Option<T> {
        self.result
    }

    /// A response header as a string, if present and valid UTF-8.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// The correlation id echoed by the server.
    pub fn correlation_id(&self) -> Option<&str> {
        self.header(CORRELATION_ID_HEADER)
    }
}

/// A successful response whose body has not been decoded yet.
#[derive(Debug)]
pub(crate) struct RawResponse {
    pub status_code: u16,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl RawResponse {
    /// Decode the body into `T`.
    ///
    /// A failure on any field fails the whole decode; nothing partial is
    /// returned.
    pub(crate) fn decode<T: DeserializeOwned>(self) -> Result<DetailedResponse<T>> {
        let result = if self.body.iter().all(u8::is_ascii_whitespace) {
            None
        } else {
            let value = serde_json::from_slice(&self.body).map_err(|source| SccError::Decode {
                status_code: self.status_code,
                source,
            })?;
            Some(value)
        };

        Ok(DetailedResponse {
            status_code: self.status_code,
            headers: self.headers,
            result,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Thing {
        id: Option<String>,
        count: Option<i64>,
    }

    fn raw(body: &str) -> RawResponse {
        RawResponse {
            status_code: 200,
            headers: HeaderMap::new(),
            body: body.as_bytes().to_vec(),
        }
    }

    #[test]
    fn test_decode_ignores_unknown_fields() {
        let response: DetailedResponse<Thing> =
            raw(r#"{"id":"x","surprise":true}"#).decode().unwrap();
        assert_eq!(
            response.result,
            Some(Thing {
                id: Some("x".to_string()),
                count: None
            })
        );
    }

    #[test]
    fn test_decode_empty_body() {
        let response: DetailedResponse<Thing> = raw("  ").decode().unwrap();
        assert!(response.result.is_none());
        assert_eq!(response.status_code, 200);
    }

    #[test]
    fn test_decode_failure_is_fatal() {
        let err = raw(r#"{"id":"x","count":"seven"}"#)
            .decode::<Thing>()
            .unwrap_err();
        match err {
            SccError::Decode { status_code, .. } => assert_eq!(status_code, 200),
            other => panic!("expected decode error, got {other:?}"),
        }
    }
}
