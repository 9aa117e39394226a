//! Control library endpoint handlers.

use axum::{
    extract::{OriginalUri, Path, Query, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use chrono::Utc;
use serde::Deserialize;

use super::{authorize, paginate, param, ApiError, PageQuery, PathParams, SharedState};
use crate::{ControlLibrary, ControlLibraryCollection, ControlLibraryDelete, ControlLibraryPrototype};

/// Query parameters for listing control libraries.
#[derive(Debug, Default, Deserialize)]
pub struct ListControlLibrariesQuery {
    pub limit: Option<i64>,
    pub start: Option<String>,
    pub control_library_type: Option<String>,
}

fn library_from_prototype(id: String, prototype: ControlLibraryPrototype) -> ControlLibrary {
    let now = Utc::now();
    ControlLibrary {
        id: Some(id),
        account_id: Some("mock-account".to_string()),
        control_library_name: Some(prototype.control_library_name),
        control_library_description: Some(prototype.control_library_description),
        control_library_type: Some(prototype.control_library_type),
        control_library_version: prototype.control_library_version,
        version_group_label: prototype.version_group_label,
        latest: prototype.latest.or(Some(true)),
        controls_count: Some(prototype.controls.len() as i64),
        controls: Some(prototype.controls),
        created_on: Some(now),
        created_by: Some("mock-user".to_string()),
        updated_on: Some(now),
        updated_by: Some("mock-user".to_string()),
        ..Default::default()
    }
}

/// GET /control_libraries
pub async fn list_control_libraries(
    State(state): State<SharedState>,
    OriginalUri(uri): OriginalUri,
    headers: HeaderMap,
    Query(query): Query<ListControlLibrariesQuery>,
) -> Result<Json<ControlLibraryCollection>, ApiError> {
    let state = state.read().await;
    authorize(&state, &headers)?;

    let libraries = state.list_control_libraries(query.control_library_type.as_deref());
    let page_query = PageQuery {
        limit: query.limit,
        start: query.start,
    };
    let page = paginate(libraries, &page_query, uri.path())?;

    Ok(Json(ControlLibraryCollection {
        limit: Some(page.limit),
        total_count: Some(page.total_count),
        first: Some(page.first),
        next: page.next,
        control_libraries: Some(page.items),
    }))
}

/// POST /control_libraries
pub async fn create_control_library(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Json(prototype): Json<ControlLibraryPrototype>,
) -> Result<(StatusCode, Json<ControlLibrary>), ApiError> {
    let mut state = state.write().await;
    authorize(&state, &headers)?;

    if prototype.control_library_type != "custom" {
        return Err(ApiError::bad_request(
            "control_library_type must be custom",
        ));
    }

    let id = state.next_id("cl");
    let library = library_from_prototype(id.clone(), prototype);
    state.control_libraries.insert(id, library.clone());

    Ok((StatusCode::CREATED, Json(library)))
}

/// GET /control_libraries/{id}
pub async fn get_control_library(
    State(state): State<SharedState>,
    Path(params): Path<PathParams>,
    headers: HeaderMap,
) -> Result<Json<ControlLibrary>, ApiError> {
    let state = state.read().await;
    authorize(&state, &headers)?;

    let id = param(&params, "library_id")?;
    state
        .control_libraries
        .get(id)
        .cloned()
        .map(Json)
        .ok_or_else(|| ApiError::not_found("control library", id))
}

/// PUT /control_libraries/{id}
pub async fn replace_control_library(
    State(state): State<SharedState>,
    Path(params): Path<PathParams>,
    headers: HeaderMap,
    Json(prototype): Json<ControlLibraryPrototype>,
) -> Result<Json<ControlLibrary>, ApiError> {
    let mut state = state.write().await;
    authorize(&state, &headers)?;

    let id = param(&params, "library_id")?;
    let existing = state
        .control_libraries
        .get(id)
        .ok_or_else(|| ApiError::not_found("control library", id))?;
    if !existing.is_custom() {
        return Err(ApiError::forbidden("predefined control libraries cannot be replaced"));
    }

    let mut library = library_from_prototype(id.to_string(), prototype);
    library.created_on = existing.created_on;
    library.created_by = existing.created_by.clone();
    state.control_libraries.insert(id.to_string(), library.clone());

    Ok(Json(library))
}

/// DELETE /control_libraries/{id}
pub async fn delete_control_library(
    State(state): State<SharedState>,
    Path(params): Path<PathParams>,
    headers: HeaderMap,
) -> Result<Json<ControlLibraryDelete>, ApiError> {
    let mut state = state.write().await;
    authorize(&state, &headers)?;

    let id = param(&params, "library_id")?;
    match state.control_libraries.get(id) {
        None => return Err(ApiError::not_found("control library", id)),
        Some(library) if !library.is_custom() => {
            return Err(ApiError::forbidden(
                "predefined control libraries cannot be deleted",
            ))
        }
        Some(_) => {}
    }
    state.control_libraries.remove(id);

    Ok(Json(ControlLibraryDelete {
        deleted: Some(id.to_string()),
    }))
}
