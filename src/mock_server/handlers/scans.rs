//! Scan and settings endpoint handlers.

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    Json,
};
use chrono::{Duration, Utc};
use serde::Deserialize;

use super::{authorize, ApiError, SharedState};
use crate::{LastScan, Scan, Settings};

/// Body of a create scan request.
#[derive(Debug, Deserialize)]
pub struct CreateScanBody {
    pub attachment_id: String,
}

/// POST /scans
///
/// Records an on-demand scan and marks it on the attachment.
pub async fn create_scan(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Json(body): Json<CreateScanBody>,
) -> Result<(StatusCode, Json<Scan>), ApiError> {
    let mut state = state.write().await;
    authorize(&state, &headers)?;

    let id = state.next_id("scan");
    let now = Utc::now();
    let attachment = state
        .attachments
        .get_mut(&body.attachment_id)
        .ok_or_else(|| ApiError::not_found("attachment", &body.attachment_id))?;
    attachment.last_scan = Some(LastScan {
        id: Some(id.clone()),
        status: Some("in_progress".to_string()),
        time: Some(now),
    });
    let next_scan_time = now + Duration::days(1);
    attachment.next_scan_time = Some(next_scan_time);
    let account_id = attachment.account_id.clone();

    let occurence = state
        .scans
        .iter()
        .filter(|s| s.attachment_id.as_deref() == Some(body.attachment_id.as_str()))
        .count() as i64
        + 1;
    let scan = Scan {
        id: Some(id),
        account_id,
        attachment_id: Some(body.attachment_id),
        report_id: None,
        status: Some("in_progress".to_string()),
        last_scan_time: Some(now),
        next_scan_time: Some(next_scan_time),
        scan_type: Some("ondemand".to_string()),
        occurence: Some(occurence),
    };
    state.scans.push(scan.clone());

    Ok((StatusCode::CREATED, Json(scan)))
}

/// GET /settings
pub async fn get_settings(
    State(state): State<SharedState>,
    headers: HeaderMap,
) -> Result<Json<Settings>, ApiError> {
    let state = state.read().await;
    authorize(&state, &headers)?;
    Ok(Json(state.settings.clone()))
}

/// PATCH /settings
///
/// Sections present in the body replace the stored ones.
pub async fn update_settings(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Json(patch): Json<Settings>,
) -> Result<Json<Settings>, ApiError> {
    let mut state = state.write().await;
    authorize(&state, &headers)?;

    let now = Utc::now();
    if let Some(mut notifications) = patch.event_notifications {
        notifications.updated_on = Some(now);
        state.settings.event_notifications = Some(notifications);
    }
    if let Some(mut storage) = patch.object_storage {
        storage.updated_on = Some(now);
        state.settings.object_storage = Some(storage);
    }

    Ok(Json(state.settings.clone()))
}
