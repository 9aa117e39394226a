//! Scan models and operation options.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::request::{require_non_empty, CallHeaders};

/// A single evaluation run against an attachment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scan {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub attachment_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub report_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_scan_time: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_scan_time: Option<DateTime<Utc>>,

    /// `ondemand` for scans started through the API.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scan_type: Option<String>,

    // Wire name as sent by the API.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub occurence: Option<i64>,
}

/// Options for starting an on-demand scan.
#[derive(Debug, Clone, Default)]
pub struct CreateScanOptions {
    pub attachment_id: String,
    pub headers: CallHeaders,
}

impl CreateScanOptions {
    pub fn new(attachment_id: impl Into<String>) -> Self {
        Self {
            attachment_id: attachment_id.into(),
            headers: CallHeaders::default(),
        }
    }

    /// # Errors
    ///
    /// Returns a validation error if `attachment_id` is empty.
    pub fn validate(&self) -> Result<()> {
        require_non_empty("attachment_id", &self.attachment_id)
    }
}

/// Request body of a create scan call.
#[derive(Debug, Serialize)]
pub(crate) struct ScanPrototype<'a> {
    pub attachment_id: &'a str,
}
