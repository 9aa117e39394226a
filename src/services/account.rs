//! Account-scoped API surface (`api/v3/...`).

use serde::Serialize;

use crate::client::SccClient;
use crate::error::Result;
use crate::models::{
    Attachment, AttachmentCollection, AttachmentCreated, AttachmentPrototype, ControlLibrary,
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

/// Body of a create attachment call.
#[derive(Serialize)]
pub(crate) struct AttachmentsBody<'a> {
    pub attachments: &'a [AttachmentPrototype],
}

/// Operations on resources owned by the caller's account.
///
/// Obtained from [`SccClient::account`].
///
/// # Example
///
/// ```no_run
/// use sccapi::{GetControlLibraryOptions, SccClient};
///
/// # async fn example() -> sccapi::Result<()> {
/// let client = SccClient::from_env()?;
/// let response = client
///     .account()
///     .get_control_library(&GetControlLibraryOptions::new("cl-123"))
///     .await?;
/// if let Some(library) = response.result {
///     println!("{:?}", library.control_library_name);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct AccountApi<'a> {
    client: &'a SccClient,
}

impl<'a> AccountApi<'a> {
    pub(crate) fn new(client: &'a SccClient) -> Self {
        Self { client }
    }

    // -------------------------------------------------------------------------
    // Control libraries
    // -------------------------------------------------------------------------

    /// List control libraries.
    #[tracing::instrument(skip(self, options))]
    pub async fn list_control_libraries(
        &self,
        options: &ListControlLibrariesOptions,
    ) -> Result<DetailedResponse<ControlLibraryCollection>> {
        let request = ApiRequest::get("ListControlLibraries", "api/v3/control_libraries")
            .query_opt("limit", options.limit)
            .query_opt("control_library_type", options.control_library_type.as_deref())
            .query_opt("start", options.start.as_deref())
            .headers(&options.headers);
        self.client.execute(request).await
    }

    /// Create a custom control library.
    #[tracing::instrument(skip(self, options))]
    pub async fn create_custom_control_library(
        &self,
        options: &CreateCustomControlLibraryOptions,
    ) -> Result<DetailedResponse<ControlLibrary>> {
        options.library.validate()?;
        let request =
            ApiRequest::post("CreateCustomControlLibrary", "api/v3/control_libraries")
                .headers(&options.headers)
                .json(&options.library)?;
        self.client.execute(request).await
    }

    /// Get a control library by id.
    #[tracing::instrument(skip(self, options), fields(id = %options.control_library_id))]
    pub async fn get_control_library(
        &self,
        options: &GetControlLibraryOptions,
    ) -> Result<DetailedResponse<ControlLibrary>> {
        let request = ApiRequest::get(
            "GetControlLibrary",
            "api/v3/control_libraries/{control_libraries_id}",
        )
        .path_param("control_libraries_id", &options.control_library_id)
        .headers(&options.headers);
        self.client.execute(request).await
    }

    /// Replace a custom control library.
    #[tracing::instrument(skip(self, options), fields(id = %options.control_library_id))]
    pub async fn replace_custom_control_library(
        &self,
        options: &ReplaceCustomControlLibraryOptions,
    ) -> Result<DetailedResponse<ControlLibrary>> {
        options.library.validate()?;
        let request = ApiRequest::put(
            "ReplaceCustomControlLibrary",
            "api/v3/control_libraries/{control_libraries_id}",
        )
        .path_param("control_libraries_id", &options.control_library_id)
        .headers(&options.headers)
        .json(&options.library)?;
        self.client.execute(request).await
    }

    /// Delete a custom control library.
    #[tracing::instrument(skip(self, options), fields(id = %options.control_library_id))]
    pub async fn delete_custom_control_library(
        &self,
        options: &DeleteCustomControlLibraryOptions,
    ) -> Result<DetailedResponse<ControlLibraryDelete>> {
        let request = ApiRequest::delete(
            "DeleteCustomControlLibrary",
            "api/v3/control_libraries/{control_libraries_id}",
        )
        .path_param("control_libraries_id", &options.control_library_id)
        .headers(&options.headers);
        self.client.execute(request).await
    }

    // -------------------------------------------------------------------------
    // Profiles
    // -------------------------------------------------------------------------

    /// List profiles.
    #[tracing::instrument(skip(self, options))]
    pub async fn list_profiles(
        &self,
        options: &ListProfilesOptions,
    ) -> Result<DetailedResponse<ProfileCollection>> {
        let request = ApiRequest::get("ListProfiles", "api/v3/profiles")
            .query_opt("limit", options.limit)
            .query_opt("profile_type", options.profile_type.as_deref())
            .query_opt("start", options.start.as_deref())
            .headers(&options.headers);
        self.client.execute(request).await
    }

    /// Create a custom profile.
    #[tracing::instrument(skip(self, options))]
    pub async fn create_profile(
        &self,
        options: &CreateProfileOptions,
    ) -> Result<DetailedResponse<Profile>> {
        options.profile.validate()?;
        let request = ApiRequest::post("CreateProfile", "api/v3/profiles")
            .headers(&options.headers)
            .json(&options.profile)?;
        self.client.execute(request).await
    }

    /// Get a profile by id.
    #[tracing::instrument(skip(self, options), fields(id = %options.profile_id))]
    pub async fn get_profile(
        &self,
        options: &GetProfileOptions,
    ) -> Result<DetailedResponse<Profile>> {
        let request = ApiRequest::get("GetProfile", "api/v3/profiles/{profiles_id}")
            .path_param("profiles_id", &options.profile_id)
            .headers(&options.headers);
        self.client.execute(request).await
    }

    /// Replace a custom profile.
    #[tracing::instrument(skip(self, options), fields(id = %options.profile_id))]
    pub async fn replace_profile(
        &self,
        options: &ReplaceProfileOptions,
    ) -> Result<DetailedResponse<Profile>> {
        options.profile.validate()?;
        let request = ApiRequest::put("ReplaceProfile", "api/v3/profiles/{profiles_id}")
            .path_param("profiles_id", &options.profile_id)
            .headers(&options.headers)
            .json(&options.profile)?;
        self.client.execute(request).await
    }

    /// Delete a custom profile. Returns the deleted profile.
    #[tracing::instrument(skip(self, options), fields(id = %options.profile_id))]
    pub async fn delete_custom_profile(
        &self,
        options: &DeleteCustomProfileOptions,
    ) -> Result<DetailedResponse<Profile>> {
        let request = ApiRequest::delete("DeleteCustomProfile", "api/v3/profiles/{profiles_id}")
            .path_param("profiles_id", &options.profile_id)
            .headers(&options.headers);
        self.client.execute(request).await
    }

    // -------------------------------------------------------------------------
    // Attachments
    // -------------------------------------------------------------------------

    /// List the attachments of a profile.
    #[tracing::instrument(skip(self, options), fields(profile = %options.profile_id))]
    pub async fn list_attachments(
        &self,
        options: &ListAttachmentsOptions,
    ) -> Result<DetailedResponse<AttachmentCollection>> {
        let request = ApiRequest::get(
            "ListAttachments",
            "api/v3/profiles/{profiles_id}/attachments",
        )
        .path_param("profiles_id", &options.profile_id)
        .query_opt("limit", options.limit)
        .query_opt("start", options.start.as_deref())
        .headers(&options.headers);
        self.client.execute(request).await
    }

    /// List every attachment in the account, across profiles.
    #[tracing::instrument(skip(self, options))]
    pub async fn list_all_attachments(
        &self,
        options: &ListAllAttachmentsOptions,
    ) -> Result<DetailedResponse<AttachmentCollection>> {
        let request = ApiRequest::get("ListAllAttachments", "api/v3/attachments")
            .query_opt("limit", options.limit)
            .query_opt("start", options.start.as_deref())
            .headers(&options.headers);
        self.client.execute(request).await
    }

    /// Attach a profile to one or more scopes.
    #[tracing::instrument(skip(self, options), fields(profile = %options.profile_id))]
    pub async fn create_attachment(
        &self,
        options: &CreateAttachmentOptions,
    ) -> Result<DetailedResponse<AttachmentCreated>> {
        options.validate()?;
        let request = ApiRequest::post(
            "CreateAttachment",
            "api/v3/profiles/{profiles_id}/attachments",
        )
        .path_param("profiles_id", &options.profile_id)
        .headers(&options.headers)
        .json(&AttachmentsBody {
            attachments: &options.attachments,
        })?;
        self.client.execute(request).await
    }

    /// Get one attachment of a profile.
    #[tracing::instrument(skip(self, options), fields(profile = %options.profile_id, id = %options.attachment_id))]
    pub async fn get_profile_attachment(
        &self,
        options: &GetProfileAttachmentOptions,
    ) -> Result<DetailedResponse<Attachment>> {
        let request = ApiRequest::get(
            "GetProfileAttachment",
            "api/v3/profiles/{profiles_id}/attachments/{attachment_id}",
        )
        .path_param("profiles_id", &options.profile_id)
        .path_param("attachment_id", &options.attachment_id)
        .headers(&options.headers);
        self.client.execute(request).await
    }

    /// Replace one attachment of a profile.
    #[tracing::instrument(skip(self, options), fields(profile = %options.profile_id, id = %options.attachment_id))]
    pub async fn replace_profile_attachment(
        &self,
        options: &ReplaceProfileAttachmentOptions,
    ) -> Result<DetailedResponse<Attachment>> {
        options.attachment.validate()?;
        let request = ApiRequest::put(
            "ReplaceProfileAttachment",
            "api/v3/profiles/{profiles_id}/attachments/{attachment_id}",
        )
        .path_param("profiles_id", &options.profile_id)
        .path_param("attachment_id", &options.attachment_id)
        .headers(&options.headers)
        .json(&options.attachment)?;
        self.client.execute(request).await
    }

    /// Delete one attachment of a profile. Returns the deleted attachment.
    #[tracing::instrument(skip(self, options), fields(profile = %options.profile_id, id = %options.attachment_id))]
    pub async fn delete_profile_attachment(
        &self,
        options: &DeleteProfileAttachmentOptions,
    ) -> Result<DetailedResponse<Attachment>> {
        let request = ApiRequest::delete(
            "DeleteProfileAttachment",
            "api/v3/profiles/{profiles_id}/attachments/{attachment_id}",
        )
        .path_param("profiles_id", &options.profile_id)
        .path_param("attachment_id", &options.attachment_id)
        .headers(&options.headers);
        self.client.execute(request).await
    }

    // -------------------------------------------------------------------------
    // Scans and settings
    // -------------------------------------------------------------------------

    /// Start an on-demand scan of an attachment.
    #[tracing::instrument(skip(self, options), fields(attachment = %options.attachment_id))]
    pub async fn create_scan(&self, options: &CreateScanOptions) -> Result<DetailedResponse<Scan>> {
        options.validate()?;
        let request = ApiRequest::post("CreateScan", "api/v3/scans")
            .headers(&options.headers)
            .json(&ScanPrototype {
                attachment_id: &options.attachment_id,
            })?;
        self.client.execute(request).await
    }

    /// Read the account settings.
    #[tracing::instrument(skip(self, options))]
    pub async fn get_settings(
        &self,
        options: &GetSettingsOptions,
    ) -> Result<DetailedResponse<Settings>> {
        let request = ApiRequest::get("GetSettings", "api/v3/settings").headers(&options.headers);
        self.client.execute(request).await
    }

    /// Update the account settings. Unset sections are left unchanged.
    #[tracing::instrument(skip(self, options))]
    pub async fn update_settings(
        &self,
        options: &UpdateSettingsOptions,
    ) -> Result<DetailedResponse<Settings>> {
        let request = ApiRequest::patch("UpdateSettings", "api/v3/settings")
            .headers(&options.headers)
            .json(&options.settings)?;
        self.client.execute(request).await
    }
}
