//! Profile endpoint handlers.

use axum::{
    extract::{OriginalUri, Path, Query, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use chrono::Utc;
use serde::Deserialize;

use super::{authorize, paginate, param, ApiError, PageQuery, PathParams, SharedState};
use crate::mock_server::state::MockState;
use crate::{Profile, ProfileCollection, ProfileControl, ProfilePrototype};

/// Query parameters for listing profiles.
#[derive(Debug, Default, Deserialize)]
pub struct ListProfilesQuery {
    pub limit: Option<i64>,
    pub start: Option<String>,
    pub profile_type: Option<String>,
}

/// Build a profile, resolving each control reference against the stored
/// control libraries.
fn profile_from_prototype(
    state: &MockState,
    id: String,
    prototype: ProfilePrototype,
) -> Result<Profile, ApiError> {
    let mut controls = Vec::with_capacity(prototype.controls.len());
    for reference in &prototype.controls {
        let library_id = reference.control_library_id.as_deref().unwrap_or_default();
        let control_id = reference.control_id.as_deref().unwrap_or_default();
        let library = state
            .control_libraries
            .get(library_id)
            .ok_or_else(|| ApiError::bad_request(format!("unknown control library {}", library_id)))?;
        let control = library
            .controls()
            .find(|c| c.control_id.as_deref() == Some(control_id));
        controls.push(ProfileControl {
            control_library_id: Some(library_id.to_string()),
            control_id: Some(control_id.to_string()),
            control_library_version: library.control_library_version.clone(),
            control_name: control.and_then(|c| c.control_name.clone()),
            control_description: control.and_then(|c| c.control_description.clone()),
            control_category: control.and_then(|c| c.control_category.clone()),
            ..Default::default()
        });
    }

    let now = Utc::now();
    Ok(Profile {
        id: Some(id),
        profile_name: Some(prototype.profile_name),
        profile_description: Some(prototype.profile_description),
        profile_type: Some(prototype.profile_type),
        profile_version: Some("1.0.0".to_string()),
        latest: Some(true),
        controls_count: Some(controls.len() as i64),
        attachments_count: Some(0),
        controls: Some(controls),
        default_parameters: Some(prototype.default_parameters),
        created_on: Some(now),
        created_by: Some("mock-user".to_string()),
        updated_on: Some(now),
        updated_by: Some("mock-user".to_string()),
        ..Default::default()
    })
}

/// GET /profiles
pub async fn list_profiles(
    State(state): State<SharedState>,
    OriginalUri(uri): OriginalUri,
    headers: HeaderMap,
    Query(query): Query<ListProfilesQuery>,
) -> Result<Json<ProfileCollection>, ApiError> {
    let state = state.read().await;
    authorize(&state, &headers)?;

    let profiles = state.list_profiles(query.profile_type.as_deref());
    let page_query = PageQuery {
        limit: query.limit,
        start: query.start,
    };
    let page = paginate(profiles, &page_query, uri.path())?;

    Ok(Json(ProfileCollection {
        limit: Some(page.limit),
        total_count: Some(page.total_count),
        first: Some(page.first),
        next: page.next,
        profiles: Some(page.items),
    }))
}

/// POST /profiles
pub async fn create_profile(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Json(prototype): Json<ProfilePrototype>,
) -> Result<(StatusCode, Json<Profile>), ApiError> {
    let mut state = state.write().await;
    authorize(&state, &headers)?;

    if prototype.controls.is_empty() {
        return Err(ApiError::bad_request("a profile needs at least one control"));
    }

    let id = state.next_id("profile");
    let profile = profile_from_prototype(&state, id.clone(), prototype)?;
    state.profiles.insert(id, profile.clone());

    Ok((StatusCode::CREATED, Json(profile)))
}

/// GET /profiles/{id}
pub async fn get_profile(
    State(state): State<SharedState>,
    Path(params): Path<PathParams>,
    headers: HeaderMap,
) -> Result<Json<Profile>, ApiError> {
    let state = state.read().await;
    authorize(&state, &headers)?;

    let id = param(&params, "profile_id")?;
    state
        .profiles
        .get(id)
        .cloned()
        .map(Json)
        .ok_or_else(|| ApiError::not_found("profile", id))
}

/// PUT /profiles/{id}
pub async fn replace_profile(
    State(state): State<SharedState>,
    Path(params): Path<PathParams>,
    headers: HeaderMap,
    Json(prototype): Json<ProfilePrototype>,
) -> Result<Json<Profile>, ApiError> {
    let mut state = state.write().await;
    authorize(&state, &headers)?;

    let id = param(&params, "profile_id")?;
    let (created_on, attachments_count) = match state.profiles.get(id) {
        Some(existing) => (existing.created_on, existing.attachments_count),
        None => return Err(ApiError::not_found("profile", id)),
    };

    let mut profile = profile_from_prototype(&state, id.to_string(), prototype)?;
    profile.created_on = created_on;
    profile.attachments_count = attachments_count;
    state.profiles.insert(id.to_string(), profile.clone());

    Ok(Json(profile))
}

/// DELETE /profiles/{id}
///
/// Fails while the profile still has attachments.
pub async fn delete_profile(
    State(state): State<SharedState>,
    Path(params): Path<PathParams>,
    headers: HeaderMap,
) -> Result<Json<Profile>, ApiError> {
    let mut state = state.write().await;
    authorize(&state, &headers)?;

    let id = param(&params, "profile_id")?;
    if !state.profiles.contains_key(id) {
        return Err(ApiError::not_found("profile", id));
    }
    if !state.list_attachments(Some(id)).is_empty() {
        return Err(ApiError::bad_request(
            "remove the profile's attachments before deleting it",
        ));
    }

    state
        .profiles
        .remove(id)
        .map(Json)
        .ok_or_else(|| ApiError::not_found("profile", id))
}
