//! Test data fixtures for the mock server.
//!
//! Provides factory functions for creating realistic test data.

use crate::{
    Attachment, Control, ControlLibrary, MultiCloudScope, Profile, ProfileControl, Settings,
};

/// Collection of fixture factories for test data.
pub struct Fixtures;

impl Fixtures {
    // =========================================================================
    // Control Library Fixtures
    // =========================================================================

    /// Create a control library with a name, a type and no controls.
    pub fn minimal_control_library(id: &str, name: &str, library_type: &str) -> ControlLibrary {
        ControlLibrary {
            id: Some(id.to_string()),
            account_id: Some("mock-account".to_string()),
            control_library_name: Some(name.to_string()),
            control_library_description: Some(format!("{} controls", name)),
            control_library_type: Some(library_type.to_string()),
            control_library_version: Some("1.0.0".to_string()),
            latest: Some(true),
            controls_count: Some(0),
            ..Default::default()
        }
    }

    /// Create a predefined library holding the named controls.
    pub fn predefined_library(id: &str, name: &str, control_names: &[&str]) -> ControlLibrary {
        let mut library = Self::minimal_control_library(id, name, "predefined");
        let controls: Vec<Control> = control_names
            .iter()
            .enumerate()
            .map(|(i, control_name)| Control {
                control_name: Some(control_name.to_string()),
                control_id: Some(format!("{}-control-{}", id, i + 1)),
                control_category: Some("Access Control".to_string()),
                control_requirement: Some(true),
                status: Some("enabled".to_string()),
                ..Default::default()
            })
            .collect();
        library.controls_count = Some(controls.len() as i64);
        library.controls = Some(controls);
        library
    }

    // =========================================================================
    // Profile Fixtures
    // =========================================================================

    /// Create a profile referencing every control of `library`.
    pub fn profile_for_library(id: &str, name: &str, library: &ControlLibrary) -> Profile {
        let controls: Vec<ProfileControl> = library
            .controls()
            .map(|c| ProfileControl {
                control_library_id: library.id.clone(),
                control_id: c.control_id.clone(),
                control_name: c.control_name.clone(),
                control_library_version: library.control_library_version.clone(),
                ..Default::default()
            })
            .collect();

        Profile {
            id: Some(id.to_string()),
            profile_name: Some(name.to_string()),
            profile_description: Some(format!("{} profile", name)),
            profile_type: Some("predefined".to_string()),
            profile_version: Some("1.0.0".to_string()),
            latest: Some(true),
            controls_count: Some(controls.len() as i64),
            attachments_count: Some(0),
            controls: Some(controls),
            default_parameters: Some(vec![]),
            ..Default::default()
        }
    }

    // =========================================================================
    // Attachment Fixtures
    // =========================================================================

    /// Create an enabled daily attachment scoped to one account.
    pub fn account_attachment(id: &str, profile_id: &str, account_id: &str) -> Attachment {
        Attachment {
            id: Some(id.to_string()),
            profile_id: Some(profile_id.to_string()),
            account_id: Some(account_id.to_string()),
            name: Some(format!("{} attachment", account_id)),
            scope: Some(vec![MultiCloudScope::new(
                "ibm-cloud",
                [("scope_id", account_id), ("scope_type", "account")],
            )]),
            status: Some("enabled".to_string()),
            schedule: Some("daily".to_string()),
            ..Default::default()
        }
    }

    // =========================================================================
    // Scenario Builders
    // =========================================================================

    /// Create a default set of test data for common scenarios.
    pub fn default_scenario() -> DefaultScenario {
        DefaultScenario::new()
    }
}

/// A complete test scenario with related entities.
pub struct DefaultScenario {
    pub control_libraries: Vec<ControlLibrary>,
    pub profiles: Vec<Profile>,
    pub attachments: Vec<Attachment>,
    pub settings: Settings,
}

impl DefaultScenario {
    fn new() -> Self {
        let library = Fixtures::predefined_library(
            "cl-123",
            "IBM Cloud Framework for Financial Services",
            &["AC-1", "AC-2", "SC-7"],
        );
        let custom = Fixtures::minimal_control_library("cl-custom", "Team Controls", "custom");

        let mut profile =
            Fixtures::profile_for_library("profile-fs", "Financial Services", &library);
        profile.attachments_count = Some(1);

        let attachments = vec![Fixtures::account_attachment(
            "att-1",
            "profile-fs",
            "mock-account",
        )];

        Self {
            control_libraries: vec![library, custom],
            profiles: vec![profile],
            attachments,
            settings: Settings::default(),
        }
    }
}
