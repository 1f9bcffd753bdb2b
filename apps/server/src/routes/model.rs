// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Read access to the model, plus the two operator actions the command
//! relies on between phases: switching the active view and dragging a plane.

use axum::{
    extract::{Path, State},
    Json,
};
use viewrange_core::{
    absolute_elevation, read_configuration, resolve_level, ElementId, HostModel, PlaneRole,
};
use viewrange_document::Document;
use viewrange_geometry::find_marked_proxies;
use viewrange_processing::{EligiblePlanViews, ViewSelector};

use crate::error::ApiError;
use crate::types::{
    ActiveViewRequest, MoveProxyRequest, PlaneInfo, ProxySummary, ViewRangeResponse, ViewSummary,
};
use crate::AppState;

fn parse_id(raw: &str) -> Result<ElementId, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::BadRequest(format!("invalid element id {raw:?}")))
}

/// Runs `f` on the document off the async runtime.
async fn blocking<T, F>(state: &AppState, f: F) -> Result<T, ApiError>
where
    T: Send + 'static,
    F: FnOnce(&mut Document) -> Result<T, ApiError> + Send + 'static,
{
    let session = state.session.clone();
    tokio::task::spawn_blocking(move || session.with_document(f)).await??
}

/// GET /api/v1/views - Plan views eligible for visualization.
pub async fn list_views(State(state): State<AppState>) -> Result<Json<Vec<ViewSummary>>, ApiError> {
    let views = blocking(&state, |doc| {
        Ok(EligiblePlanViews
            .eligible_views(&*doc)
            .into_iter()
            .map(ViewSummary::from)
            .collect())
    })
    .await?;
    Ok(Json(views))
}

/// GET /api/v1/views/:id/range - Stored view range with absolute elevations.
pub async fn view_range(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ViewRangeResponse>, ApiError> {
    let id = parse_id(&id)?;
    let response = blocking(&state, move |doc| {
        let view = doc
            .view(id)
            .ok_or_else(|| ApiError::NotFound(format!("view {id}")))?;
        let configuration = read_configuration(&*doc, id)?;

        let mut planes = Vec::new();
        for (role, setting) in configuration.planes() {
            let level = resolve_level(&*doc, setting.level)?;
            planes.push(PlaneInfo {
                plane_name: role.display_name().to_string(),
                elevation: absolute_elevation(&level, setting.offset),
                level_name: level.name,
                offset: setting.offset,
            });
        }
        let unlimited = PlaneRole::ALL
            .into_iter()
            .filter(|role| configuration.get(*role).is_none())
            .map(|role| role.display_name().to_string())
            .collect();

        Ok(ViewRangeResponse {
            view_id: id,
            view_name: view.name,
            planes,
            unlimited,
        })
    })
    .await?;
    Ok(Json(response))
}

/// GET /api/v1/proxies - View range planes currently in the model.
pub async fn list_proxies(
    State(state): State<AppState>,
) -> Result<Json<Vec<ProxySummary>>, ApiError> {
    let proxies = blocking(&state, |doc| {
        Ok(find_marked_proxies(&*doc)
            .iter()
            .map(ProxySummary::from)
            .collect())
    })
    .await?;
    Ok(Json(proxies))
}

/// POST /api/v1/proxies/:id/move - Move a view range plane vertically.
pub async fn move_proxy(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<MoveProxyRequest>,
) -> Result<Json<ProxySummary>, ApiError> {
    let id = parse_id(&id)?;
    if !request.offset.is_finite() {
        return Err(ApiError::BadRequest("offset must be finite".to_string()));
    }

    let summary = blocking(&state, move |doc| {
        let is_proxy = find_marked_proxies(&*doc).iter().any(|p| p.id == id);
        if !is_proxy {
            return Err(ApiError::NotFound(format!("view range plane {id}")));
        }
        doc.translate_shape(id, request.offset)?;
        let shape = doc
            .shape(id)
            .ok_or_else(|| ApiError::NotFound(format!("view range plane {id}")))?;
        tracing::debug!(element = %id, offset = request.offset, "plane moved");
        Ok(ProxySummary::from(&shape))
    })
    .await?;
    Ok(Json(summary))
}

/// PUT /api/v1/active-view - Change the view the operator is looking at.
pub async fn set_active_view(
    State(state): State<AppState>,
    Json(request): Json<ActiveViewRequest>,
) -> Result<Json<ViewSummary>, ApiError> {
    let id = parse_id(&request.view_id)?;
    let view = blocking(&state, move |doc| {
        doc.set_active_view(id)?;
        doc.active_view()
            .ok_or_else(|| ApiError::NotFound(format!("view {id}")))
    })
    .await?;
    Ok(Json(ViewSummary::from(view)))
}
