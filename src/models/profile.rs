//! Profile models and operation options.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::control_library::{ControlDocs, ControlSpecification};
use crate::pagination::{PageRef, Paginated};
use crate::request::{require_items, require_non_empty, CallHeaders};

/// A profile.
///
/// A named selection of controls from one or more control libraries, with
/// default parameter values. Profiles are attached to scopes to run scans.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_description: Option<String>,

    /// `predefined` or `custom`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_version: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub version_group_label: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub hierarchy_enabled: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_on: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_by: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_on: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub controls_count: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub control_parents_count: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub attachments_count: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub controls: Option<Vec<ProfileControl>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_parameters: Option<Vec<DefaultParameter>>,
}

impl Profile {
    pub fn is_custom(&self) -> bool {
        self.profile_type.as_deref() == Some("custom")
    }
}

/// A control as it appears inside a profile.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileControl {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub control_library_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub control_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub control_library_version: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub control_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub control_description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub control_category: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub control_parent: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub control_requirement: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub control_docs: Option<ControlDocs>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub control_specifications_count: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub control_specifications: Option<Vec<ControlSpecification>>,
}

/// Selects a control from a control library when writing a profile.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileControlRef {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub control_library_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub control_id: Option<String>,
}

impl ProfileControlRef {
    pub fn new(control_library_id: impl Into<String>, control_id: impl Into<String>) -> Self {
        Self {
            control_library_id: Some(control_library_id.into()),
            control_id: Some(control_id.into()),
        }
    }
}

/// The default value of an assessment parameter within a profile.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DefaultParameter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assessment_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub assessment_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameter_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameter_default_value: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameter_display_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameter_type: Option<String>,
}

/// A page of profiles.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileCollection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_count: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub first: Option<PageRef>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<PageRef>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub profiles: Option<Vec<Profile>>,
}

impl Paginated for ProfileCollection {
    fn total_count(&self) -> Option<i64> {
        self.total_count
    }

    fn next_page(&self) -> Option<&PageRef> {
        self.next.as_ref()
    }
}

/// Body of a create or replace profile request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfilePrototype {
    pub profile_name: String,

    pub profile_description: String,

    pub profile_type: String,

    pub controls: Vec<ProfileControlRef>,

    /// Always sent; an empty list keeps every assessment default.
    pub default_parameters: Vec<DefaultParameter>,
}

impl ProfilePrototype {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        profile_type: impl Into<String>,
        controls: Vec<ProfileControlRef>,
    ) -> Self {
        Self {
            profile_name: name.into(),
            profile_description: description.into(),
            profile_type: profile_type.into(),
            controls,
            default_parameters: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_default_parameters(mut self, parameters: Vec<DefaultParameter>) -> Self {
        self.default_parameters = parameters;
        self
    }

    /// # Errors
    ///
    /// Returns a validation error if a required field is empty.
    pub fn validate(&self) -> Result<()> {
        require_non_empty("profile_name", &self.profile_name)?;
        require_non_empty("profile_description", &self.profile_description)?;
        require_non_empty("profile_type", &self.profile_type)?;
        require_items("controls", &self.controls)
    }
}

/// Options for listing profiles.
#[derive(Debug, Clone, Default)]
pub struct ListProfilesOptions {
    pub limit: Option<i64>,
    /// Filter by `predefined` or `custom`.
    pub profile_type: Option<String>,
    pub start: Option<String>,
    pub headers: CallHeaders,
}

/// Options for creating a profile.
#[derive(Debug, Clone, Default)]
pub struct CreateProfileOptions {
    pub profile: ProfilePrototype,
    pub headers: CallHeaders,
}

impl CreateProfileOptions {
    pub fn new(profile: ProfilePrototype) -> Self {
        Self {
            profile,
            headers: CallHeaders::default(),
        }
    }
}

/// Options for fetching one profile.
#[derive(Debug, Clone, Default)]
pub struct GetProfileOptions {
    pub profile_id: String,
    pub headers: CallHeaders,
}

impl GetProfileOptions {
    pub fn new(profile_id: impl Into<String>) -> Self {
        Self {
            profile_id: profile_id.into(),
            headers: CallHeaders::default(),
        }
    }
}

/// Options for replacing a profile.
#[derive(Debug, Clone, Default)]
pub struct ReplaceProfileOptions {
    pub profile_id: String,
    pub profile: ProfilePrototype,
    pub headers: CallHeaders,
}

impl ReplaceProfileOptions {
    pub fn new(profile_id: impl Into<String>, profile: ProfilePrototype) -> Self {
        Self {
            profile_id: profile_id.into(),
            profile,
            headers: CallHeaders::default(),
        }
    }
}

/// Options for deleting a custom profile.
#[derive(Debug, Clone, Default)]
pub struct DeleteCustomProfileOptions {
    pub profile_id: String,
    pub headers: CallHeaders,
}

impl DeleteCustomProfileOptions {
    pub fn new(profile_id: impl Into<String>) -> Self {
        Self {
            profile_id: profile_id.into(),
            headers: CallHeaders::default(),
        }
    }
}
