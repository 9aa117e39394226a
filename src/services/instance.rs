//! Instance-scoped API surface (`instances/{instance_id}/v3/...`).
//!
//! Covers the same resources as the account surface but addresses them
//! through a service instance, with its own path parameter names.

use crate::client::SccClient;
use crate::error::Result;
use crate::models::{
    Attachment, AttachmentCollection, AttachmentCreated, ControlLibrary,
    ControlLibraryCollection, ControlLibraryDelete, CreateAttachmentOptions,
    CreateCustomControlLibraryOptions, CreateProfileOptions, CreateScanOptions,
    DeleteCustomControlLibraryOptions, DeleteCustomProfileOptions,
    DeleteProfileAttachmentOptions, GetControlLibraryOptions, GetProfileAttachmentOptions,
    GetProfileOptions, GetSettingsOptions, ListAllAttachmentsOptions, ListAttachmentsOptions,
    ListControlLibrariesOptions, ListProfilesOptions, Profile, ProfileCollection,
    ReplaceCustomControlLibraryOptions, ReplaceProfileAttachmentOptions, ReplaceProfileOptions,
    Scan, ScanPrototype, Settings, UpdateSettingsOptions,
};
use crate::request::ApiRequest;
use crate::response::DetailedResponse;
use crate::services::account::AttachmentsBody;

/// Operations on resources of one service instance.
///
/// Obtained from [`SccClient::instance`]. The instance id is a required
/// path parameter of every call.
///
/// # Example
///
/// ```no_run
/// use sccapi::{ListProfilesOptions, SccClient};
///
/// # async fn example() -> sccapi::Result<()> {
/// let client = SccClient::from_env()?;
/// let page = client
///     .instance("acd7032c-15a3-484f-bf5b-67d41534d940")
///     .list_profiles(&ListProfilesOptions::default())
///     .await?;
/// println!("status {}", page.status_code);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct InstanceApi<'a> {
    client: &'a SccClient,
    instance_id: String,
}

impl<'a> InstanceApi<'a> {
    pub(crate) fn new(client: &'a SccClient, instance_id: String) -> Self {
        Self {
            client,
            instance_id,
        }
    }

    pub fn instance_id(&self) -> &str {
        &self.instance_id
    }

    fn request(&self, request: ApiRequest) -> ApiRequest {
        request.path_param("instance_id", &self.instance_id)
    }

    // -------------------------------------------------------------------------
    // Control libraries
    // -------------------------------------------------------------------------

    /// List the control libraries of the instance.
    #[tracing::instrument(skip(self, options), fields(instance = %self.instance_id))]
    pub async fn list_control_libraries(
        &self,
        options: &ListControlLibrariesOptions,
    ) -> Result<DetailedResponse<ControlLibraryCollection>> {
        let request = self
            .request(ApiRequest::get(
                "ListControlLibraries",
                "instances/{instance_id}/v3/control_libraries",
            ))
            .query_opt("limit", options.limit)
            .query_opt("control_library_type", options.control_library_type.as_deref())
            .query_opt("start", options.start.as_deref())
            .headers(&options.headers);
        self.client.execute(request).await
    }

    /// Create a custom control library in the instance.
    #[tracing::instrument(skip(self, options), fields(instance = %self.instance_id))]
    pub async fn create_custom_control_library(
        &self,
        options: &CreateCustomControlLibraryOptions,
    ) -> Result<DetailedResponse<ControlLibrary>> {
        options.library.validate()?;
        let request = self
            .request(ApiRequest::post(
                "CreateCustomControlLibrary",
                "instances/{instance_id}/v3/control_libraries",
            ))
            .headers(&options.headers)
            .json(&options.library)?;
        self.client.execute(request).await
    }

    #[tracing::instrument(skip(self, options), fields(instance = %self.instance_id, id = %options.control_library_id))]
    pub async fn get_control_library(
        &self,
        options: &GetControlLibraryOptions,
    ) -> Result<DetailedResponse<ControlLibrary>> {
        let request = self
            .request(ApiRequest::get(
                "GetControlLibrary",
                "instances/{instance_id}/v3/control_libraries/{control_library_id}",
            ))
            .path_param("control_library_id", &options.control_library_id)
            .headers(&options.headers);
        self.client.execute(request).await
    }

    #[tracing::instrument(skip(self, options), fields(instance = %self.instance_id, id = %options.control_library_id))]
    pub async fn replace_custom_control_library(
        &self,
        options: &ReplaceCustomControlLibraryOptions,
    ) -> Result<DetailedResponse<ControlLibrary>> {
        options.library.validate()?;
        let request = self
            .request(ApiRequest::put(
                "ReplaceCustomControlLibrary",
                "instances/{instance_id}/v3/control_libraries/{control_library_id}",
            ))
            .path_param("control_library_id", &options.control_library_id)
            .headers(&options.headers)
            .json(&options.library)?;
        self.client.execute(request).await
    }

    #[tracing::instrument(skip(self, options), fields(instance = %self.instance_id, id = %options.control_library_id))]
    pub async fn delete_custom_control_library(
        &self,
        options: &DeleteCustomControlLibraryOptions,
    ) -> Result<DetailedResponse<ControlLibraryDelete>> {
        let request = self
            .request(ApiRequest::delete(
                "DeleteCustomControlLibrary",
                "instances/{instance_id}/v3/control_libraries/{control_library_id}",
            ))
            .path_param("control_library_id", &options.control_library_id)
            .headers(&options.headers);
        self.client.execute(request).await
    }

    // -------------------------------------------------------------------------
    // Profiles
    // -------------------------------------------------------------------------

    #[tracing::instrument(skip(self, options), fields(instance = %self.instance_id))]
    pub async fn list_profiles(
        &self,
        options: &ListProfilesOptions,
    ) -> Result<DetailedResponse<ProfileCollection>> {
        let request = self
            .request(ApiRequest::get(
                "ListProfiles",
                "instances/{instance_id}/v3/profiles",
            ))
            .query_opt("limit", options.limit)
            .query_opt("profile_type", options.profile_type.as_deref())
            .query_opt("start", options.start.as_deref())
            .headers(&options.headers);
        self.client.execute(request).await
    }

    #[tracing::instrument(skip(self, options), fields(instance = %self.instance_id))]
    pub async fn create_profile(
        &self,
        options: &CreateProfileOptions,
    ) -> Result<DetailedResponse<Profile>> {
        options.profile.validate()?;
        let request = self
            .request(ApiRequest::post(
                "CreateProfile",
                "instances/{instance_id}/v3/profiles",
            ))
            .headers(&options.headers)
            .json(&options.profile)?;
        self.client.execute(request).await
    }

    #[tracing::instrument(skip(self, options), fields(instance = %self.instance_id, id = %options.profile_id))]
    pub async fn get_profile(
        &self,
        options: &GetProfileOptions,
    ) -> Result<DetailedResponse<Profile>> {
        let request = self
            .request(ApiRequest::get(
                "GetProfile",
                "instances/{instance_id}/v3/profiles/{profile_id}",
            ))
            .path_param("profile_id", &options.profile_id)
            .headers(&options.headers);
        self.client.execute(request).await
    }

    #[tracing::instrument(skip(self, options), fields(instance = %self.instance_id, id = %options.profile_id))]
    pub async fn replace_profile(
        &self,
        options: &ReplaceProfileOptions,
    ) -> Result<DetailedResponse<Profile>> {
        options.profile.validate()?;
        let request = self
            .request(ApiRequest::put(
                "ReplaceProfile",
                "instances/{instance_id}/v3/profiles/{profile_id}",
            ))
            .path_param("profile_id", &options.profile_id)
            .headers(&options.headers)
            .json(&options.profile)?;
        self.client.execute(request).await
    }

    #[tracing::instrument(skip(self, options), fields(instance = %self.instance_id, id = %options.profile_id))]
    pub async fn delete_custom_profile(
        &self,
        options: &DeleteCustomProfileOptions,
    ) -> Result<DetailedResponse<Profile>> {
        let request = self
            .request(ApiRequest::delete(
                "DeleteCustomProfile",
                "instances/{instance_id}/v3/profiles/{profile_id}",
            ))
            .path_param("profile_id", &options.profile_id)
            .headers(&options.headers);
        self.client.execute(request).await
    }

    // -------------------------------------------------------------------------
    // Attachments
    // -------------------------------------------------------------------------

    #[tracing::instrument(skip(self, options), fields(instance = %self.instance_id, profile = %options.profile_id))]
    pub async fn list_profile_attachments(
        &self,
        options: &ListAttachmentsOptions,
    ) -> Result<DetailedResponse<AttachmentCollection>> {
        let request = self
            .request(ApiRequest::get(
                "ListProfileAttachments",
                "instances/{instance_id}/v3/profiles/{profile_id}/attachments",
            ))
            .path_param("profile_id", &options.profile_id)
            .query_opt("limit", options.limit)
            .query_opt("start", options.start.as_deref())
            .headers(&options.headers);
        self.client.execute(request).await
    }

    /// List every attachment of the instance, across profiles.
    #[tracing::instrument(skip(self, options), fields(instance = %self.instance_id))]
    pub async fn list_attachments(
        &self,
        options: &ListAllAttachmentsOptions,
    ) -> Result<DetailedResponse<AttachmentCollection>> {
        let request = self
            .request(ApiRequest::get(
                "ListAttachments",
                "instances/{instance_id}/v3/attachments",
            ))
            .query_opt("limit", options.limit)
            .query_opt("start", options.start.as_deref())
            .headers(&options.headers);
        self.client.execute(request).await
    }

    #[tracing::instrument(skip(self, options), fields(instance = %self.instance_id, profile = %options.profile_id))]
    pub async fn create_profile_attachment(
        &self,
        options: &CreateAttachmentOptions,
    ) -> Result<DetailedResponse<AttachmentCreated>> {
        options.validate()?;
        let request = self
            .request(ApiRequest::post(
                "CreateProfileAttachment",
                "instances/{instance_id}/v3/profiles/{profile_id}/attachments",
            ))
            .path_param("profile_id", &options.profile_id)
            .headers(&options.headers)
            .json(&AttachmentsBody {
                attachments: &options.attachments,
            })?;
        self.client.execute(request).await
    }

    #[tracing::instrument(skip(self, options), fields(instance = %self.instance_id, id = %options.attachment_id))]
    pub async fn get_profile_attachment(
        &self,
        options: &GetProfileAttachmentOptions,
    ) -> Result<DetailedResponse<Attachment>> {
        let request = self
            .request(ApiRequest::get(
                "GetProfileAttachment",
                "instances/{instance_id}/v3/profiles/{profile_id}/attachments/{attachment_id}",
            ))
            .path_param("profile_id", &options.profile_id)
            .path_param("attachment_id", &options.attachment_id)
            .headers(&options.headers);
        self.client.execute(request).await
    }

    #[tracing::instrument(skip(self, options), fields(instance = %self.instance_id, id = %options.attachment_id))]
    pub async fn replace_profile_attachment(
        &self,
        options: &ReplaceProfileAttachmentOptions,
    ) -> Result<DetailedResponse<Attachment>> {
        options.attachment.validate()?;
        let request = self
            .request(ApiRequest::put(
                "ReplaceProfileAttachment",
                "instances/{instance_id}/v3/profiles/{profile_id}/attachments/{attachment_id}",
            ))
            .path_param("profile_id", &options.profile_id)
            .path_param("attachment_id", &options.attachment_id)
            .headers(&options.headers)
            .json(&options.attachment)?;
        self.client.execute(request).await
    }

    #[tracing::instrument(skip(self, options), fields(instance = %self.instance_id, id = %options.attachment_id))]
    pub async fn delete_profile_attachment(
        &self,
        options: &DeleteProfileAttachmentOptions,
    ) -> Result<DetailedResponse<Attachment>> {
        let request = self
            .request(ApiRequest::delete(
                "DeleteProfileAttachment",
                "instances/{instance_id}/v3/profiles/{profile_id}/attachments/{attachment_id}",
            ))
            .path_param("profile_id", &options.profile_id)
            .path_param("attachment_id", &options.attachment_id)
            .headers(&options.headers);
        self.client.execute(request).await
    }

    // -------------------------------------------------------------------------
    // Scans and settings
    // -------------------------------------------------------------------------

    #[tracing::instrument(skip(self, options), fields(instance = %self.instance_id, attachment = %options.attachment_id))]
    pub async fn create_scan(&self, options: &CreateScanOptions) -> Result<DetailedResponse<Scan>> {
        options.validate()?;
        let request = self
            .request(ApiRequest::post("CreateScan", "instances/{instance_id}/v3/scans"))
            .headers(&options.headers)
            .json(&ScanPrototype {
                attachment_id: &options.attachment_id,
            })?;
        self.client.execute(request).await
    }

    #[tracing::instrument(skip(self, options), fields(instance = %self.instance_id))]
    pub async fn get_settings(
        &self,
        options: &GetSettingsOptions,
    ) -> Result<DetailedResponse<Settings>> {
        let request = self
            .request(ApiRequest::get("GetSettings", "instances/{instance_id}/v3/settings"))
            .headers(&options.headers);
        self.client.execute(request).await
    }

    #[tracing::instrument(skip(self, options), fields(instance = %self.instance_id))]
    pub async fn update_settings(
        &self,
        options: &UpdateSettingsOptions,
    ) -> Result<DetailedResponse<Settings>> {
        let request = self
            .request(ApiRequest::patch(
                "UpdateSettings",
                "instances/{instance_id}/v3/settings",
            ))
            .headers(&options.headers)
            .json(&options.settings)?;
        self.client.execute(request).await
    }
}
