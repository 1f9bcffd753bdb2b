// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The view-range command endpoint.

use axum::{extract::State, Json};
use viewrange_processing::{CommandResponse, ViewRangeRequest};

use crate::error::ApiError;
use crate::AppState;

/// POST /api/v1/view-range - Run one phase of the view-range command.
///
/// Command failures come back as `200` with `success: false`; only transport
/// problems (busy document, bad JSON) use other status codes.
pub async fn execute(
    State(state): State<AppState>,
    Json(request): Json<ViewRangeRequest>,
) -> Result<Json<CommandResponse>, ApiError> {
    tracing::debug!(action = ?request.action, view_id = ?request.view_id, view_name = ?request.view_name, "view range request");

    let session = state.session.clone();
    let response = tokio::task::spawn_blocking(move || session.execute(&request)).await??;

    tracing::info!(success = response.is_success(), "view range request finished");
    Ok(Json(response))
}
