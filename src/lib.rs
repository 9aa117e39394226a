//! Security and Compliance Center API client library.
//!
//! A Rust library for the Security and Compliance Center v3 REST API:
//! typed models for control libraries, profiles, attachments, scans and
//! settings, and one async method per API operation.
//!
//! # Quick Start
//!
//! ```no_run
//! use sccapi::{GetControlLibraryOptions, ListProfilesOptions, Paginated, SccClient};
//!
//! #[tokio::main]
//! async fn main() -> sccapi::Result<()> {
//!     // Create client from environment variables
//!     let client = SccClient::from_env()?;
//!
//!     // Get a control library by id
//!     let response = client
//!         .account()
//!         .get_control_library(&GetControlLibraryOptions::new("cl-123"))
//!         .await?;
//!     println!("HTTP {}", response.status_code);
//!
//!     // Walk profile pages by hand
//!     let mut options = ListProfilesOptions { limit: Some(50), ..Default::default() };
//!     loop {
//!         let page = client.account().list_profiles(&options).await?;
//!         let Some(page) = page.result else { break };
//!         for profile in page.profiles.iter().flatten() {
//!             println!("{:?}", profile.profile_name);
//!         }
//!         match page.next_start() {
//!             Some(start) => options.start = Some(start),
//!             None => break,
//!         }
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! Every operation runs the same pipeline: validate the options, resolve
//! the path template, merge headers, add query parameters, serialize the
//! body, send, and decode the response into a [`DetailedResponse`].
//!
//! - [`AccountApi`] - operations under `api/v3/...`
//! - [`InstanceApi`] - operations under `instances/{instance_id}/v3/...`
//!
//! Missing required options fail with [`SccError::Validation`] before any
//! request is sent.
//!
//! # Configuration
//!
//! [`SccClient::from_env`] reads:
//!
//! - `SCC_AUTH_TOKEN` (required) - bearer token
//! - `SCC_URL` (optional) - service URL (defaults to `https://us-south.compliance.cloud.ibm.com`)
//! - `SCC_MAX_RETRIES`, `SCC_MAX_RETRY_INTERVAL` (optional) - retry policy
//! - `SCC_ENABLE_GZIP` (optional) - gzip request bodies

pub mod cli;
mod client;
mod config;
mod error;
mod models;
pub mod output;
mod pagination;
mod request;
mod response;
mod retry;
mod services;

#[cfg(feature = "test-server")]
pub mod mock_server;

// Re-export core types
pub use client::SccClient;
pub use config::{ClientConfig, DEFAULT_SERVICE_URL};
pub use error::{Result, SccError};
pub use pagination::{PageRef, Paginated};
pub use request::{
    ApiRequest, CallHeaders, CORRELATION_ID_HEADER, REQUEST_ID_HEADER, SDK_ANALYTICS_HEADER,
};
pub use response::DetailedResponse;
pub use retry::RetryPolicy;

// Re-export API surfaces
pub use services::{AccountApi, InstanceApi};

// Re-export models
pub use models::{
    // Control library types
    Assessment,
    Control,
    ControlDocs,
    ControlLibrary,
    ControlLibraryCollection,
    ControlLibraryDelete,
    ControlLibraryPrototype,
    ControlSpecification,
    CreateCustomControlLibraryOptions,
    DeleteCustomControlLibraryOptions,
    GetControlLibraryOptions,
    ListControlLibrariesOptions,
    Parameter,
    ReplaceCustomControlLibraryOptions,
    // Profile types
    CreateProfileOptions,
    DefaultParameter,
    DeleteCustomProfileOptions,
    GetProfileOptions,
    ListProfilesOptions,
    Profile,
    ProfileCollection,
    ProfileControl,
    ProfileControlRef,
    ProfilePrototype,
    ReplaceProfileOptions,
    // Attachment types
    Attachment,
    AttachmentCollection,
    AttachmentCreated,
    AttachmentNotifications,
    AttachmentParameter,
    AttachmentPrototype,
    CreateAttachmentOptions,
    DeleteProfileAttachmentOptions,
    FailedControls,
    GetProfileAttachmentOptions,
    LastScan,
    ListAllAttachmentsOptions,
    ListAttachmentsOptions,
    MultiCloudScope,
    ReplaceProfileAttachmentOptions,
    ScopeProperty,
    // Scan types
    CreateScanOptions,
    Scan,
    // Settings types
    EventNotifications,
    GetSettingsOptions,
    ObjectStorage,
    Settings,
    UpdateSettingsOptions,
};
