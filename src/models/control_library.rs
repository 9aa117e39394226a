//! Control library models and operation options.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::pagination::{PageRef, Paginated};
use crate::request::{require_items, require_non_empty, CallHeaders};

/// A control library.
///
/// A named collection of controls, each with specifications and the
/// automated or manual assessments that evaluate them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ControlLibrary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub control_library_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub control_library_description: Option<String>,

    /// `predefined` or `custom`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub control_library_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub control_library_version: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub version_group_label: Option<String>,

    /// Whether this is the latest version in its version group.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub hierarchy_enabled: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_on: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_on: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_by: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub controls_count: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub control_parents_count: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub controls: Option<Vec<Control>>,
}

impl ControlLibrary {
    /// Whether this library was created by the account rather than shipped
    /// with the service.
    pub fn is_custom(&self) -> bool {
        self.control_library_type.as_deref() == Some("custom")
    }

    /// Iterate the library's controls (empty when none were returned).
    pub fn controls(&self) -> impl Iterator<Item = &Control> {
        self.controls.iter().flatten()
    }
}

/// A control inside a control library.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Control {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub control_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub control_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub control_description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub control_category: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub control_parent: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub control_tags: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub control_specifications: Option<Vec<ControlSpecification>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub control_docs: Option<ControlDocs>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub control_requirement: Option<bool>,

    /// `enabled` or `disabled`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// How a control is implemented for one component and environment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ControlSpecification {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub control_specification_id: Option<String>,

    /// `user`, `shared` or `ibm-cloud`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub responsibility: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub component_id: Option<String>,

    // The API spells this field "componenet_name".
    #[serde(rename = "componenet_name", skip_serializing_if = "Option::is_none")]
    pub component_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub environment: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub control_specification_description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub assessments_count: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub assessments: Option<Vec<Assessment>>,
}

/// An automated or manual check that evaluates a control specification.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assessment_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub assessment_method: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub assessment_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub assessment_description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameter_count: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Vec<Parameter>>,
}

/// A tunable input of an assessment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameter_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameter_display_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameter_type: Option<String>,

    /// Free-form value; the type depends on `parameter_type`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameter_value: Option<serde_json::Value>,
}

/// Reference documentation for a control.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ControlDocs {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub control_docs_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub control_docs_type: Option<String>,
}

/// Result of deleting a custom control library.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ControlLibraryDelete {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted: Option<String>,
}

/// A page of control libraries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ControlLibraryCollection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_count: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub first: Option<PageRef>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<PageRef>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub control_libraries: Option<Vec<ControlLibrary>>,
}

impl Paginated for ControlLibraryCollection {
    fn total_count(&self) -> Option<i64> {
        self.total_count
    }

    fn next_page(&self) -> Option<&PageRef> {
        self.next.as_ref()
    }
}

/// Body of a create or replace control library request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ControlLibraryPrototype {
    pub control_library_name: String,

    pub control_library_description: String,

    /// Must be `custom` for libraries created through the API.
    pub control_library_type: String,

    pub controls: Vec<Control>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub version_group_label: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub control_library_version: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest: Option<bool>,
}

impl ControlLibraryPrototype {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        library_type: impl Into<String>,
        controls: Vec<Control>,
    ) -> Self {
        Self {
            control_library_name: name.into(),
            control_library_description: description.into(),
            control_library_type: library_type.into(),
            controls,
            ..Self::default()
        }
    }

    /// # Errors
    ///
    /// Returns a validation error if a required field is empty.
    pub fn validate(&self) -> Result<()> {
        require_non_empty("control_library_name", &self.control_library_name)?;
        require_non_empty("control_library_description", &self.control_library_description)?;
        require_non_empty("control_library_type", &self.control_library_type)?;
        require_items("controls", &self.controls)
    }
}

/// Options for listing control libraries.
#[derive(Debug, Clone, Default)]
pub struct ListControlLibrariesOptions {
    /// Maximum number of items per page.
    pub limit: Option<i64>,
    /// Filter by `predefined` or `custom`.
    pub control_library_type: Option<String>,
    /// Cursor from a previous page's `next`.
    pub start: Option<String>,
    pub headers: CallHeaders,
}

/// Options for creating a custom control library.
#[derive(Debug, Clone, Default)]
pub struct CreateCustomControlLibraryOptions {
    pub library: ControlLibraryPrototype,
    pub headers: CallHeaders,
}

impl CreateCustomControlLibraryOptions {
    pub fn new(library: ControlLibraryPrototype) -> Self {
        Self {
            library,
            headers: CallHeaders::default(),
        }
    }
}

/// Options for fetching one control library.
#[derive(Debug, Clone, Default)]
pub struct GetControlLibraryOptions {
    pub control_library_id: String,
    pub headers: CallHeaders,
}

impl GetControlLibraryOptions {
    pub fn new(control_library_id: impl Into<String>) -> Self {
        Self {
            control_library_id: control_library_id.into(),
            headers: CallHeaders::default(),
        }
    }
}

/// Options for replacing a custom control library.
#[derive(Debug, Clone, Default)]
pub struct ReplaceCustomControlLibraryOptions {
    pub control_library_id: String,
    pub library: ControlLibraryPrototype,
    pub headers: CallHeaders,
}

impl ReplaceCustomControlLibraryOptions {
    pub fn new(control_library_id: impl Into<String>, library: ControlLibraryPrototype) -> Self {
        Self {
            control_library_id: control_library_id.into(),
            library,
            headers: CallHeaders::default(),
        }
    }
}

/// Options for deleting a custom control library.
#[derive(Debug, Clone, Default)]
pub struct DeleteCustomControlLibraryOptions {
    pub control_library_id: String,
    pub headers: CallHeaders,
}

impl DeleteCustomControlLibraryOptions {
    pub fn new(control_library_id: impl Into<String>) -> Self {
        Self {
            control_library_id: control_library_id.into(),
            headers: CallHeaders::default(),
        }
    }
}
