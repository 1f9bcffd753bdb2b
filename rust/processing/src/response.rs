// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Request and result objects exchanged with the dispatcher.

use serde::{Deserialize, Serialize};
use viewrange_core::ElementId;

use crate::error::CommandError;
use crate::reconcile::{Direction, MovementRecord};

/// Requested action. `Visualize` and `Update` are advisory: the presence of
/// proxies in the model decides which phase runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    #[default]
    Visualize,
    Update,
    Preview,
    Cancel,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewRangeRequest {
    #[serde(default)]
    pub action: Action,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub view_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub view_name: Option<String>,
}

impl ViewRangeRequest {
    pub fn new(action: Action) -> Self {
        Self {
            action,
            ..Self::default()
        }
    }

    pub fn with_view_id(mut self, id: ElementId) -> Self {
        self.view_id = Some(id.to_string());
        self
    }

    pub fn with_view_name(mut self, name: impl Into<String>) -> Self {
        self.view_name = Some(name.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedPlane {
    pub plane_name: String,
    pub color: String,
    pub elevation: f64,
    pub element_id: ElementId,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MovementInfo {
    pub plane_name: String,
    pub direction: Direction,
    pub distance: f64,
}

impl From<&MovementRecord> for MovementInfo {
    fn from(record: &MovementRecord) -> Self {
        Self {
            plane_name: record.role.display_name().to_string(),
            direction: record.direction,
            distance: record.distance,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VisualizeReport {
    pub success: bool,
    pub action: Action,
    pub view_name: String,
    pub planes_created: Vec<CreatedPlane>,
    pub planes_skipped: Vec<String>,
    pub message: String,
}

/// Result of an update or a preview.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateReport {
    pub success: bool,
    pub action: Action,
    pub view_name: String,
    pub movement_info: Vec<MovementInfo>,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelReport {
    pub success: bool,
    pub action: Action,
    pub removed_count: usize,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FailureReport {
    pub success: bool,
    pub error: String,
    pub message: String,
}

impl FailureReport {
    pub fn new(action: Action, error: &CommandError) -> Self {
        let message = match action {
            Action::Visualize | Action::Update => "View range command failed",
            Action::Preview => "View range preview failed",
            Action::Cancel => "Could not remove view range planes",
        };
        Self {
            success: false,
            error: error.to_string(),
            message: message.to_string(),
        }
    }
}

/// Structured result of one controller call. Serializes flat, without a tag.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CommandResponse {
    Visualized(VisualizeReport),
    Reconciled(UpdateReport),
    Cancelled(CancelReport),
    Failed(FailureReport),
}

impl CommandResponse {
    pub fn is_success(&self) -> bool {
        !matches!(self, CommandResponse::Failed(_))
    }

    pub fn message(&self) -> &str {
        match self {
            CommandResponse::Visualized(r) => &r.message,
            CommandResponse::Reconciled(r) => &r.message,
            CommandResponse::Cancelled(r) => &r.message,
            CommandResponse::Failed(r) => &r.message,
        }
    }
}
