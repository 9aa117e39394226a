//! Service settings models and operation options.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::request::CallHeaders;

/// Account-level service settings.
///
/// Also the body of an update: sections left `None` are not sent and stay
/// unchanged on the server.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_notifications: Option<EventNotifications>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub object_storage: Option<ObjectStorage>,
}

/// Event Notifications integration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventNotifications {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance_crn: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_on: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_name: Option<String>,
}

/// Object Storage bucket receiving scan results.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ObjectStorage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance_crn: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub bucket: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub bucket_location: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub bucket_endpoint: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_on: Option<DateTime<Utc>>,
}

/// Options for reading the settings.
#[derive(Debug, Clone, Default)]
pub struct GetSettingsOptions {
    pub headers: CallHeaders,
}

/// Options for updating the settings.
#[derive(Debug, Clone, Default)]
pub struct UpdateSettingsOptions {
    pub settings: Settings,
    pub headers: CallHeaders,
}
