//! Attachment endpoint handlers.

use axum::{
    extract::{OriginalUri, Path, Query, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use chrono::Utc;
use serde::Deserialize;

use super::{authorize, paginate, param, ApiError, PageQuery, PathParams, SharedState};
use crate::{Attachment, AttachmentCollection, AttachmentCreated, AttachmentPrototype};

/// Body of a create attachment request.
#[derive(Debug, Deserialize)]
pub struct CreateAttachmentsBody {
    pub attachments: Vec<AttachmentPrototype>,
}

fn attachment_from_prototype(
    id: String,
    profile_id: &str,
    prototype: AttachmentPrototype,
) -> Attachment {
    let now = Utc::now();
    Attachment {
        id: Some(id),
        profile_id: Some(profile_id.to_string()),
        account_id: Some("mock-account".to_string()),
        name: Some(prototype.name),
        description: prototype.description,
        scope: Some(prototype.scope),
        status: Some(prototype.status),
        schedule: Some(prototype.schedule),
        notifications: prototype.notifications,
        attachment_parameters: prototype.attachment_parameters,
        created_on: Some(now),
        created_by: Some("mock-user".to_string()),
        updated_on: Some(now),
        updated_by: Some("mock-user".to_string()),
        ..Default::default()
    }
}

fn collection(page: super::Page<Attachment>) -> AttachmentCollection {
    AttachmentCollection {
        limit: Some(page.limit),
        total_count: Some(page.total_count),
        first: Some(page.first),
        next: page.next,
        attachments: Some(page.items),
    }
}

/// GET /profiles/{profile_id}/attachments
pub async fn list_profile_attachments(
    State(state): State<SharedState>,
    Path(params): Path<PathParams>,
    OriginalUri(uri): OriginalUri,
    headers: HeaderMap,
    Query(query): Query<PageQuery>,
) -> Result<Json<AttachmentCollection>, ApiError> {
    let state = state.read().await;
    authorize(&state, &headers)?;

    let profile_id = param(&params, "profile_id")?;
    if !state.profiles.contains_key(profile_id) {
        return Err(ApiError::not_found("profile", profile_id));
    }

    let attachments = state.list_attachments(Some(profile_id));
    let page = paginate(attachments, &query, uri.path())?;
    Ok(Json(collection(page)))
}

/// GET /attachments
pub async fn list_all_attachments(
    State(state): State<SharedState>,
    OriginalUri(uri): OriginalUri,
    headers: HeaderMap,
    Query(query): Query<PageQuery>,
) -> Result<Json<AttachmentCollection>, ApiError> {
    let state = state.read().await;
    authorize(&state, &headers)?;

    let attachments = state.list_attachments(None);
    let page = paginate(attachments, &query, uri.path())?;
    Ok(Json(collection(page)))
}

/// POST /profiles/{profile_id}/attachments
pub async fn create_attachments(
    State(state): State<SharedState>,
    Path(params): Path<PathParams>,
    headers: HeaderMap,
    Json(body): Json<CreateAttachmentsBody>,
) -> Result<(StatusCode, Json<AttachmentCreated>), ApiError> {
    let mut state = state.write().await;
    authorize(&state, &headers)?;

    let profile_id = param(&params, "profile_id")?;
    if !state.profiles.contains_key(profile_id) {
        return Err(ApiError::not_found("profile", profile_id));
    }
    if body.attachments.is_empty() {
        return Err(ApiError::bad_request("attachments must not be empty"));
    }

    let mut created = Vec::with_capacity(body.attachments.len());
    for prototype in body.attachments {
        let id = state.next_id("att");
        let attachment = attachment_from_prototype(id.clone(), profile_id, prototype);
        state.attachments.insert(id, attachment.clone());
        created.push(attachment);
    }
    state.refresh_attachment_count(profile_id);

    Ok((
        StatusCode::CREATED,
        Json(AttachmentCreated {
            profile_id: Some(profile_id.to_string()),
            attachments: Some(created),
        }),
    ))
}

/// GET /profiles/{profile_id}/attachments/{attachment_id}
pub async fn get_profile_attachment(
    State(state): State<SharedState>,
    Path(params): Path<PathParams>,
    headers: HeaderMap,
) -> Result<Json<Attachment>, ApiError> {
    let state = state.read().await;
    authorize(&state, &headers)?;

    let profile_id = param(&params, "profile_id")?;
    let id = param(&params, "attachment_id")?;
    state
        .get_profile_attachment(profile_id, id)
        .cloned()
        .map(Json)
        .ok_or_else(|| ApiError::not_found("attachment", id))
}

/// PUT /profiles/{profile_id}/attachments/{attachment_id}
pub async fn replace_profile_attachment(
    State(state): State<SharedState>,
    Path(params): Path<PathParams>,
    headers: HeaderMap,
    Json(prototype): Json<AttachmentPrototype>,
) -> Result<Json<Attachment>, ApiError> {
    let mut state = state.write().await;
    authorize(&state, &headers)?;

    let profile_id = param(&params, "profile_id")?;
    let id = param(&params, "attachment_id")?;
    let (created_on, last_scan) = match state.get_profile_attachment(profile_id, id) {
        Some(existing) => (existing.created_on, existing.last_scan.clone()),
        None => return Err(ApiError::not_found("attachment", id)),
    };

    let mut attachment = attachment_from_prototype(id.to_string(), profile_id, prototype);
    attachment.created_on = created_on;
    attachment.last_scan = last_scan;
    state.attachments.insert(id.to_string(), attachment.clone());

    Ok(Json(attachment))
}

/// DELETE /profiles/{profile_id}/attachments/{attachment_id}
pub async fn delete_profile_attachment(
    State(state): State<SharedState>,
    Path(params): Path<PathParams>,
    headers: HeaderMap,
) -> Result<Json<Attachment>, ApiError> {
    let mut state = state.write().await;
    authorize(&state, &headers)?;

    let profile_id = param(&params, "profile_id")?;
    let id = param(&params, "attachment_id")?;
    if state.get_profile_attachment(profile_id, id).is_none() {
        return Err(ApiError::not_found("attachment", id));
    }

    let removed = state
        .attachments
        .remove(id)
        .ok_or_else(|| ApiError::not_found("attachment", id))?;
    state.refresh_attachment_count(profile_id);

    Ok(Json(removed))
}
