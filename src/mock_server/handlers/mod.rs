//! HTTP request handlers for the mock server.
//!
//! Every route is mounted under both `/api/v3` and
//! `/instances/:instance_id/v3`, so handlers read their path parameters by
//! name and ignore `instance_id`.

pub mod attachments;
pub mod control_libraries;
pub mod profiles;
pub mod scans;

pub use attachments::*;
pub use control_libraries::*;
pub use profiles::*;
pub use scans::*;

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use axum::{
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use tokio::sync::RwLock;

use crate::mock_server::state::MockState;
use crate::PageRef;

/// State handle passed to every handler.
pub type SharedState = Arc<RwLock<MockState>>;

/// Named path parameters of a route.
pub type PathParams = HashMap<String, String>;

const DEFAULT_LIMIT: i64 = 50;
const MAX_LIMIT: i64 = 200;

static TRACE_COUNTER: AtomicU64 = AtomicU64::new(1);

/// An error in the service's `{"errors": [...], "trace": ...}` envelope.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    code: &'static str,
    message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
        }
    }

    pub fn not_found(kind: &str, id: &str) -> Self {
        Self::new(
            StatusCode::NOT_FOUND,
            "not_found",
            format!("{} with id {} was not found", kind, id),
        )
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "bad_request", message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, "forbidden", message)
    }

    pub fn unauthorized() -> Self {
        Self::new(
            StatusCode::UNAUTHORIZED,
            "unauthorized",
            "a valid bearer token is required",
        )
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let trace = format!("mock-trace-{}", TRACE_COUNTER.fetch_add(1, Ordering::Relaxed));
        (
            self.status,
            Json(serde_json::json!({
                "errors": [{ "code": self.code, "message": self.message }],
                "status_code": self.status.as_u16(),
                "trace": trace,
            })),
        )
            .into_response()
    }
}

/// Reject the request unless it carries the state's required token.
pub fn authorize(state: &MockState, headers: &HeaderMap) -> Result<(), ApiError> {
    let Some(ref required) = state.required_token else {
        return Ok(());
    };
    let presented = headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "));
    if presented == Some(required.as_str()) {
        Ok(())
    } else {
        Err(ApiError::unauthorized())
    }
}

/// Look up a required path parameter.
pub fn param<'a>(params: &'a PathParams, name: &str) -> Result<&'a str, ApiError> {
    params
        .get(name)
        .map(String::as_str)
        .ok_or_else(|| ApiError::bad_request(format!("missing path parameter {}", name)))
}

/// Query parameters shared by list endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub limit: Option<i64>,
    pub start: Option<String>,
}

/// One page of a listing plus its page references.
pub struct Page<T> {
    pub items: Vec<T>,
    pub limit: i64,
    pub total_count: i64,
    pub first: PageRef,
    pub next: Option<PageRef>,
}

/// Slice `items` by the numeric `start` offset and `limit` of the query.
pub fn paginate<T: Clone>(items: Vec<&T>, query: &PageQuery, path: &str) -> Result<Page<T>, ApiError> {
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT);
    if !(1..=MAX_LIMIT).contains(&limit) {
        return Err(ApiError::bad_request(format!(
            "limit must be between 1 and {}",
            MAX_LIMIT
        )));
    }
    let offset = match query.start.as_deref() {
        Some(start) => start
            .parse::<usize>()
            .map_err(|_| ApiError::bad_request("start is not a valid page token"))?,
        None => 0,
    };

    let total = items.len();
    let end = offset.saturating_add(limit as usize).min(total);
    let page_items = if offset < total {
        items[offset..end].iter().map(|item| (*item).clone()).collect()
    } else {
        vec![]
    };

    let next = (end < total).then(|| PageRef {
        href: Some(format!("{}?limit={}&start={}", path, limit, end)),
        start: Some(end.to_string()),
    });

    Ok(Page {
        items: page_items,
        limit,
        total_count: total as i64,
        first: PageRef {
            href: Some(format!("{}?limit={}", path, limit)),
            start: None,
        },
        next,
    })
}
