//! Mock server state management.
//!
//! Provides the in-memory data store for the mock Security and Compliance
//! Center server.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::{Attachment, ControlLibrary, Profile, Scan, Settings};

/// Shared state for the mock server.
///
/// This struct holds all the mock data that the server will serve.
/// It's wrapped in `Arc<RwLock<_>>` for concurrent access. Account and
/// instance routes read the same collections.
#[derive(Debug, Default)]
pub struct MockState {
    /// Control libraries indexed by id.
    pub control_libraries: HashMap<String, ControlLibrary>,

    /// Profiles indexed by id.
    pub profiles: HashMap<String, Profile>,

    /// Attachments indexed by id. Each one names its profile.
    pub attachments: HashMap<String, Attachment>,

    /// Scans in creation order.
    pub scans: Vec<Scan>,

    pub settings: Settings,

    /// Optional authentication token. If set, requests must carry it as a
    /// bearer token.
    pub required_token: Option<String>,

    next_id: u64,
}

impl MockState {
    /// Create a new empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create state wrapped in Arc<RwLock> for sharing.
    pub fn shared(self) -> Arc<RwLock<Self>> {
        Arc::new(RwLock::new(self))
    }

    /// Add a control library to the state. Libraries without an id are
    /// skipped.
    pub fn with_control_library(mut self, library: ControlLibrary) -> Self {
        if let Some(id) = library.id.clone() {
            self.control_libraries.insert(id, library);
        }
        self
    }

    /// Add a profile to the state.
    pub fn with_profile(mut self, profile: Profile) -> Self {
        if let Some(id) = profile.id.clone() {
            self.profiles.insert(id, profile);
        }
        self
    }

    /// Add an attachment to the state.
    pub fn with_attachment(mut self, attachment: Attachment) -> Self {
        if let Some(id) = attachment.id.clone() {
            self.attachments.insert(id, attachment);
        }
        self
    }

    /// Set the required authentication token.
    pub fn with_required_token(mut self, token: &str) -> Self {
        self.required_token = Some(token.to_string());
        self
    }

    /// Allocate a fresh id such as `profile-3`.
    pub fn next_id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{}-{}", prefix, self.next_id)
    }

    /// List control libraries sorted by id, optionally filtered by type.
    pub fn list_control_libraries(&self, library_type: Option<&str>) -> Vec<&ControlLibrary> {
        let mut libraries: Vec<_> = self
            .control_libraries
            .values()
            .filter(|l| {
                library_type
                    .map(|t| l.control_library_type.as_deref() == Some(t))
                    .unwrap_or(true)
            })
            .collect();
        libraries.sort_by(|a, b| a.id.cmp(&b.id));
        libraries
    }

    /// List profiles sorted by id, optionally filtered by type.
    pub fn list_profiles(&self, profile_type: Option<&str>) -> Vec<&Profile> {
        let mut profiles: Vec<_> = self
            .profiles
            .values()
            .filter(|p| {
                profile_type
                    .map(|t| p.profile_type.as_deref() == Some(t))
                    .unwrap_or(true)
            })
            .collect();
        profiles.sort_by(|a, b| a.id.cmp(&b.id));
        profiles
    }

    /// List attachments sorted by id, optionally limited to one profile.
    pub fn list_attachments(&self, profile_id: Option<&str>) -> Vec<&Attachment> {
        let mut attachments: Vec<_> = self
            .attachments
            .values()
            .filter(|a| {
                profile_id
                    .map(|p| a.profile_id.as_deref() == Some(p))
                    .unwrap_or(true)
            })
            .collect();
        attachments.sort_by(|a, b| a.id.cmp(&b.id));
        attachments
    }

    /// Get an attachment only if it belongs to `profile_id`.
    pub fn get_profile_attachment(&self, profile_id: &str, id: &str) -> Option<&Attachment> {
        self.attachments
            .get(id)
            .filter(|a| a.profile_id.as_deref() == Some(profile_id))
    }

    /// Recount the attachments of a profile after attachments change.
    pub fn refresh_attachment_count(&mut self, profile_id: &str) {
        let count = self.list_attachments(Some(profile_id)).len() as i64;
        if let Some(profile) = self.profiles.get_mut(profile_id) {
            profile.attachments_count = Some(count);
        }
    }
}
