//! Attachment models and operation options.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::pagination::{PageRef, Paginated};
use crate::request::{require_items, require_non_empty, CallHeaders};

/// An attachment binds a profile to a scope with a scan schedule and a
/// notification policy.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<Vec<MultiCloudScope>>,

    /// `enabled` or `disabled`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    /// `daily`, `every_7_days` or `every_30_days`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub notifications: Option<AttachmentNotifications>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub attachment_parameters: Option<Vec<AttachmentParameter>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_scan: Option<LastScan>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_scan_time: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_on: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_on: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_by: Option<String>,
}

impl Attachment {
    pub fn is_enabled(&self) -> bool {
        self.status.as_deref() == Some("enabled")
    }
}

/// The resources an attachment evaluates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MultiCloudScope {
    /// e.g. `ibm-cloud`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub environment: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<Vec<ScopeProperty>>,
}

impl MultiCloudScope {
    /// A scope in `environment` with the given `name = value` properties.
    pub fn new<I, K, V>(environment: impl Into<String>, properties: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<serde_json::Value>,
    {
        Self {
            environment: Some(environment.into()),
            properties: Some(
                properties
                    .into_iter()
                    .map(|(name, value)| ScopeProperty {
                        name: Some(name.into()),
                        value: Some(value.into()),
                    })
                    .collect(),
            ),
        }
    }
}

/// A `name = value` pair narrowing a scope, such as `scope_id`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScopeProperty {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// A string, or a list of exclusions for `exclusions`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<serde_json::Value>,
}

/// When the attachment notifies about failed controls.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AttachmentNotifications {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub controls: Option<FailedControls>,
}

/// Thresholds for failed-control notifications.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FailedControls {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threshold_limit: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub failed_control_ids: Option<Vec<String>>,
}

/// An assessment parameter override on an attachment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AttachmentParameter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assessment_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub assessment_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameter_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameter_value: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameter_display_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameter_type: Option<String>,
}

/// The most recent scan of an attachment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LastScan {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<DateTime<Utc>>,
}

/// A page of attachments.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AttachmentCollection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_count: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub first: Option<PageRef>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<PageRef>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub attachments: Option<Vec<Attachment>>,
}

impl Paginated for AttachmentCollection {
    fn total_count(&self) -> Option<i64> {
        self.total_count
    }

    fn next_page(&self) -> Option<&PageRef> {
        self.next.as_ref()
    }
}

/// Response of a create attachment request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AttachmentCreated {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub attachments: Option<Vec<Attachment>>,
}

/// Body of one attachment in a create or replace request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AttachmentPrototype {
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub scope: Vec<MultiCloudScope>,

    pub status: String,

    pub schedule: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub notifications: Option<AttachmentNotifications>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub attachment_parameters: Option<Vec<AttachmentParameter>>,
}

impl AttachmentPrototype {
    /// An enabled attachment over `scope` scanned on `schedule`.
    pub fn new(name: impl Into<String>, scope: Vec<MultiCloudScope>, schedule: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            scope,
            status: "enabled".to_string(),
            schedule: schedule.into(),
            ..Self::default()
        }
    }

    /// # Errors
    ///
    /// Returns a validation error if a required field is empty.
    pub fn validate(&self) -> Result<()> {
        require_non_empty("name", &self.name)?;
        require_items("scope", &self.scope)?;
        require_non_empty("status", &self.status)?;
        require_non_empty("schedule", &self.schedule)
    }
}

/// Options for listing the attachments of a profile.
#[derive(Debug, Clone, Default)]
pub struct ListAttachmentsOptions {
    pub profile_id: String,
    pub limit: Option<i64>,
    pub start: Option<String>,
    pub headers: CallHeaders,
}

impl ListAttachmentsOptions {
    pub fn new(profile_id: impl Into<String>) -> Self {
        Self {
            profile_id: profile_id.into(),
            ..Self::default()
        }
    }
}

/// Options for listing every attachment visible to the caller.
#[derive(Debug, Clone, Default)]
pub struct ListAllAttachmentsOptions {
    pub limit: Option<i64>,
    pub start: Option<String>,
    pub headers: CallHeaders,
}

/// Options for attaching a profile to one or more scopes.
#[derive(Debug, Clone, Default)]
pub struct CreateAttachmentOptions {
    pub profile_id: String,
    /// At least one attachment is required.
    pub attachments: Vec<AttachmentPrototype>,
    pub headers: CallHeaders,
}

impl CreateAttachmentOptions {
    pub fn new(profile_id: impl Into<String>, attachments: Vec<AttachmentPrototype>) -> Self {
        Self {
            profile_id: profile_id.into(),
            attachments,
            headers: CallHeaders::default(),
        }
    }

    /// # Errors
    ///
    /// Returns a validation error if `attachments` is empty or any
    /// attachment is missing a required field.
    pub fn validate(&self) -> Result<()> {
        require_items("attachments", &self.attachments)?;
        self.attachments.iter().try_for_each(AttachmentPrototype::validate)
    }
}

/// Options for fetching one attachment of a profile.
#[derive(Debug, Clone, Default)]
pub struct GetProfileAttachmentOptions {
    pub profile_id: String,
    pub attachment_id: String,
    pub headers: CallHeaders,
}

impl GetProfileAttachmentOptions {
    pub fn new(profile_id: impl Into<String>, attachment_id: impl Into<String>) -> Self {
        Self {
            profile_id: profile_id.into(),
            attachment_id: attachment_id.into(),
            headers: CallHeaders::default(),
        }
    }
}

/// Options for replacing one attachment of a profile.
#[derive(Debug, Clone, Default)]
pub struct ReplaceProfileAttachmentOptions {
    pub profile_id: String,
    pub attachment_id: String,
    pub attachment: AttachmentPrototype,
    pub headers: CallHeaders,
}

impl ReplaceProfileAttachmentOptions {
    pub fn new(
        profile_id: impl Into<String>,
        attachment_id: impl Into<String>,
        attachment: AttachmentPrototype,
    ) -> Self {
        Self {
            profile_id: profile_id.into(),
            attachment_id: attachment_id.into(),
            attachment,
            headers: CallHeaders::default(),
        }
    }
}

/// Options for deleting one attachment of a profile.
#[derive(Debug, Clone, Default)]
pub struct DeleteProfileAttachmentOptions {
    pub profile_id: String,
    pub attachment_id: String,
    pub headers: CallHeaders,
}

impl DeleteProfileAttachmentOptions {
    pub fn new(profile_id: impl Into<String>, attachment_id: impl Into<String>) -> Self {
        Self {
            profile_id: profile_id.into(),
            attachment_id: attachment_id.into(),
            headers: CallHeaders::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SccError;

    fn account_scope() -> MultiCloudScope {
        MultiCloudScope::new(
            "ibm-cloud",
            [("scope_id", "acct-1"), ("scope_type", "account")],
        )
    }

    #[test]
    fn test_attachment_decode() {
        let json = r#"{
            "id": "att-1",
            "profile_id": "prof-1",
            "status": "enabled",
            "schedule": "every_7_days",
            "scope": [{"environment": "ibm-cloud", "properties": [{"name": "scope_id", "value": "acct-1"}]}],
            "notifications": {"enabled": true, "controls": {"threshold_limit": 15, "failed_control_ids": []}},
            "last_scan": {"id": "scan-1", "status": "completed", "time": "2024-05-01T12:00:00Z"},
            "next_scan_time": "2024-05-08T12:00:00Z"
        }"#;
        let attachment: Attachment = serde_json::from_str(json).unwrap();

        assert!(attachment.is_enabled());
        let notifications = attachment.notifications.as_ref().unwrap();
        assert_eq!(
            notifications.controls.as_ref().unwrap().threshold_limit,
            Some(15)
        );
        assert_eq!(
            attachment.last_scan.as_ref().unwrap().status.as_deref(),
            Some("completed")
        );
        assert!(attachment.attachment_parameters.is_none());
    }

    #[test]
    fn test_bad_timestamp_fails_whole_decode() {
        let json = r#"{"id": "att-1", "last_scan": {"time": "yesterday"}}"#;
        assert!(serde_json::from_str::<Attachment>(json).is_err());
    }

    #[test]
    fn test_prototype_body() {
        let prototype = AttachmentPrototype::new("weekly", vec![account_scope()], "every_7_days");
        assert_eq!(
            serde_json::to_value(&prototype).unwrap(),
            serde_json::json!({
                "name": "weekly",
                "scope": [{
                    "environment": "ibm-cloud",
                    "properties": [
                        {"name": "scope_id", "value": "acct-1"},
                        {"name": "scope_type", "value": "account"}
                    ]
                }],
                "status": "enabled",
                "schedule": "every_7_days"
            })
        );
    }

    #[test]
    fn test_create_requires_attachments() {
        let options = CreateAttachmentOptions::new("prof-1", vec![]);
        match options.validate() {
            Err(SccError::Validation { field, .. }) => assert_eq!(field, "attachments"),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_create_validates_each_attachment() {
        let options = CreateAttachmentOptions::new(
            "prof-1",
            vec![
                AttachmentPrototype::new("ok", vec![account_scope()], "daily"),
                AttachmentPrototype::new("no scope", vec![], "daily"),
            ],
        );
        match options.validate() {
            Err(SccError::Validation { field, .. }) => assert_eq!(field, "scope"),
            other => panic!("expected validation error, got {other:?}"),
        }
    }
}
