//! Request construction.
//!
//! An [`ApiRequest`] names one operation: method, path template, path
//! parameters, query parameters, caller headers and an optional JSON body.
//! Nothing is validated until the client turns it into a URL and header
//! map, and that happens before any network I/O.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::Method;
use serde::Serialize;
use url::Url;

use crate::error::{Result, SccError};

/// Header identifying the calling SDK, service and operation.
pub const SDK_ANALYTICS_HEADER: &str = "x-scc-sdk-analytics";
/// Caller-settable correlation id, echoed by the server.
pub const CORRELATION_ID_HEADER: &str = "x-correlation-id";
/// Caller-settable request/transaction id, echoed by the server.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

pub(crate) const SERVICE_NAME: &str = "security_and_compliance_center";
pub(crate) const SERVICE_VERSION: &str = "V3";

/// Per-call headers accepted by every operation.
///
/// Values set here always win over client defaults and SDK headers.
#[derive(Debug, Clone, Default)]
pub struct CallHeaders {
    /// Sent as `X-Correlation-Id`. Server-generated when absent.
    pub correlation_id: Option<String>,
    /// Sent as `X-Request-Id`. Server-generated when absent.
    pub request_id: Option<String>,
    /// Arbitrary extra headers merged in last.
    pub extra: HeaderMap,
}

impl CallHeaders {
    /// Empty header set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the correlation id.
    #[must_use]
    pub fn correlation_id(mut self, id: impl Into<String>) -> Self {
        self.correlation_id = Some(id.into());
        self
    }

    /// Set the request id.
    #[must_use]
    pub fn request_id(mut self, id: impl Into<String>) -> Self {
        self.request_id = Some(id.into());
        self
    }

    /// Add an extra header.
    #[must_use]
    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.extra.insert(name, value);
        self
    }
}

/// A fully described, not yet validated, API request.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    method: Method,
    operation_id: &'static str,
    template: &'static str,
    path_params: Vec<(&'static str, String)>,
    query: Vec<(&'static str, String)>,
    headers: CallHeaders,
    body: Option<Vec<u8>>,
}

impl ApiRequest {
    /// Start a request for `operation_id` against a path template such as
    /// `api/v3/profiles/{profiles_id}`.
    pub fn new(method: Method, operation_id: &'static str, template: &'static str) -> Self {
        Self {
            method,
            operation_id,
            template,
            path_params: Vec::new(),
            query: Vec::new(),
            headers: CallHeaders::default(),
            body: None,
        }
    }

    pub fn get(operation_id: &'static str, template: &'static str) -> Self {
        Self::new(Method::GET, operation_id, template)
    }

    pub fn post(operation_id: &'static str, template: &'static str) -> Self {
        Self::new(Method::POST, operation_id, template)
    }

    pub fn put(operation_id: &'static str, template: &'static str) -> Self {
        Self::new(Method::PUT, operation_id, template)
    }

    pub fn patch(operation_id: &'static str, template: &'static str) -> Self {
        Self::new(Method::PATCH, operation_id, template)
    }

    pub fn delete(operation_id: &'static str, template: &'static str) -> Self {
        Self::new(Method::DELETE, operation_id, template)
    }

    /// Bind a value to `{name}` in the path template.
    #[must_use]
    pub fn path_param(mut self, name: &'static str, value: &str) -> Self {
        self.path_params.push((name, value.to_string()));
        self
    }

    /// Add a query parameter when `value` is set.
    #[must_use]
    pub fn query_opt<T: ToString>(mut self, name: &'static str, value: Option<T>) -> Self {
        if let Some(v) = value {
            self.query.push((name, v.to_string()));
        }
        self
    }

    /// Attach the caller's per-call headers.
    #[must_use]
    pub fn headers(mut self, headers: &CallHeaders) -> Self {
        self.headers = headers.clone();
        self
    }

    /// Serialize `body` as the JSON request body.
    ///
    /// # Errors
    ///
    /// Returns [`SccError::Serialize`] if the body cannot be encoded.
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self> {
        self.body = Some(serde_json::to_vec(body)?);
        Ok(self)
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn operation_id(&self) -> &'static str {
        self.operation_id
    }

    pub fn body(&self) -> Option<&[u8]> {
        self.body.as_deref()
    }

    /// Substitute path parameters into the template.
    ///
    /// # Errors
    ///
    /// Returns [`SccError::Validation`] if a bound value is empty, is `.` or
    /// `..`, or a placeholder has no binding.
    pub fn resolve_path(&self) -> Result<String> {
        let mut path = String::with_capacity(self.template.len());
        let mut rest = self.template;

        while let Some(open) = rest.find('{') {
            let close = rest[open..]
                .find('}')
                .map(|i| open + i)
                .ok_or(SccError::validation("path", "unterminated placeholder"))?;
            path.push_str(&rest[..open]);

            let name = &rest[open + 1..close];
            let &(field, ref value) = self
                .path_params
                .iter()
                .find(|(n, _)| *n == name)
                .ok_or(SccError::validation("path", "unbound path parameter"))?;
            if value.trim().is_empty() {
                return Err(SccError::validation(field, "must not be empty"));
            }
            // URL resolution would collapse these into a different endpoint
            if value == "." || value == ".." {
                return Err(SccError::validation(field, "must not be a dot segment"));
            }
            path.push_str(&urlencoding::encode(value));

            rest = &rest[close + 1..];
        }
        path.push_str(rest);

        Ok(path)
    }

    /// Resolve the full request URL against `base`.
    ///
    /// # Errors
    ///
    /// Fails on path validation or if the joined URL is invalid.
    pub fn build_url(&self, base: &Url) -> Result<Url> {
        let mut url = base.join(&self.resolve_path()?)?;
        if !self.query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (name, value) in &self.query {
                pairs.append_pair(name, value);
            }
        }
        Ok(url)
    }

    /// Merge headers: SDK headers, then client defaults, then the caller's
    /// per-call headers. Later layers replace earlier ones.
    ///
    /// # Errors
    ///
    /// Returns [`SccError::Validation`] if a correlation or request id is
    /// not a legal header value.
    pub fn header_map(&self, defaults: &HeaderMap) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        if self.body.is_some() {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }
        let analytics = format!(
            "service_name={SERVICE_NAME};service_version={SERVICE_VERSION};operation_id={}",
            self.operation_id
        );
        headers.insert(
            HeaderName::from_static(SDK_ANALYTICS_HEADER),
            HeaderValue::from_str(&analytics)
                .map_err(|_| SccError::validation("operation_id", "not a valid header value"))?,
        );

        merge_layer(&mut headers, defaults);

        if let Some(id) = &self.headers.correlation_id {
            headers.insert(
                HeaderName::from_static(CORRELATION_ID_HEADER),
                HeaderValue::from_str(id)
                    .map_err(|_| SccError::validation("correlation_id", "not a valid header value"))?,
            );
        }
        if let Some(id) = &self.headers.request_id {
            headers.insert(
                HeaderName::from_static(REQUEST_ID_HEADER),
                HeaderValue::from_str(id)
                    .map_err(|_| SccError::validation("request_id", "not a valid header value"))?,
            );
        }
        merge_layer(&mut headers, &self.headers.extra);

        Ok(headers)
    }
}

/// Replace every header named in `layer`, keeping all of its values.
fn merge_layer(headers: &mut HeaderMap, layer: &HeaderMap) {
    for name in layer.keys() {
        headers.remove(name);
    }
    for (name, value) in layer {
        headers.append(name.clone(), value.clone());
    }
}

/// Fail with a validation error when a required string is empty.
pub(crate) fn require_non_empty(field: &'static str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(SccError::validation(field, "must not be empty"));
    }
    Ok(())
}

/// Fail with a validation error when a required list is empty.
pub(crate) fn require_items<T>(field: &'static str, items: &[T]) -> Result<()> {
    if items.is_empty() {
        return Err(SccError::validation(field, "must contain at least one item"));
    }
    Ok(())
}
