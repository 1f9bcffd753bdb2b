// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Response types for the API.

use serde::Serialize;
use viewrange_core::{ElementId, ShapeElement, ViewInfo, ViewKind};
use viewrange_geometry::{current_elevation, extract_metadata};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewSummary {
    pub id: ElementId,
    pub name: String,
    pub kind: ViewKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discipline: Option<String>,
}

impl From<ViewInfo> for ViewSummary {
    fn from(view: ViewInfo) -> Self {
        Self {
            id: view.id,
            name: view.name,
            kind: view.kind,
            discipline: view.discipline,
        }
    }
}

/// One finite plane of a view range.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaneInfo {
    pub plane_name: String,
    pub level_name: String,
    pub offset: f64,
    /// Absolute elevation.
    pub elevation: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewRangeResponse {
    pub view_id: ElementId,
    pub view_name: String,
    pub planes: Vec<PlaneInfo>,
    /// Planes without a limit.
    pub unlimited: Vec<String>,
}

/// A marked view range plane as it sits in the model.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxySummary {
    pub element_id: ElementId,
    pub name: String,
    /// `false` when the plane's metadata cannot be read.
    pub recognized: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plane_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_view_id: Option<ElementId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_elevation: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elevation: Option<f64>,
}

impl From<&ShapeElement> for ProxySummary {
    fn from(shape: &ShapeElement) -> Self {
        let metadata = extract_metadata(shape);
        Self {
            element_id: shape.id,
            name: shape.name.clone(),
            recognized: metadata.is_some(),
            plane_name: metadata
                .as_ref()
                .map(|m| m.role.display_name().to_string()),
            source_view_id: metadata.as_ref().map(|m| m.source_view),
            original_elevation: metadata.as_ref().map(|m| m.original_elevation),
            elevation: current_elevation(shape),
        }
    }
}
