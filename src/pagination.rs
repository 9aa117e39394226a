//! Pagination utilities for collection responses.
//!
//! List operations return `total_count`, `limit` and optional `first` and
//! `next` page references. There is no automatic iteration: pass the value of
//! [`Paginated::next_start`] as the `start` option of the next list call.

use serde::{Deserialize, Serialize};
use url::Url;

/// A reference to another page of a collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRef {
    /// Absolute URL of the page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    /// Opaque cursor for the page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,
}

impl PageRef {
    /// The cursor for this page.
    ///
    /// Uses `start` when the server sent it, otherwise the `start` query
    /// parameter of `href`.
    pub fn start_token(&self) -> Option<String> {
        if let Some(start) = &self.start {
            return Some(start.clone());
        }
        let href = self.href.as_deref()?;
        // Servers sometimes send a path-only href.
        let url = Url::parse(href)
            .or_else(|_| Url::parse("http://placeholder.invalid/")?.join(href))
            .ok()?;
        url.query_pairs()
            .find(|(k, _)| k == "start")
            .map(|(_, v)| v.into_owned())
    }
}

/// A collection response with page references.
pub trait Paginated {
    /// Total number of items across all pages, if reported.
    fn total_count(&self) -> Option<i64>;

    /// Reference to the next page, if any.
    fn next_page(&self) -> Option<&PageRef>;

    /// The cursor to request the next page with.
    fn next_start(&self) -> Option<String> {
        self.next_page().and_then(PageRef::start_token)
    }

    /// Whether the server reported another page.
    fn has_more(&self) -> bool {
        self.next_start().is_some()
    }
}
