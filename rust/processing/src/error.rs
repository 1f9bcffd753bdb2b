// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Failures of a view-range command.

use thiserror::Error;
use viewrange_core::{ElementId, PlaneRole};
use viewrange_geometry::HierarchyViolation;

/// Everything that can stop a visualize, update, preview or cancel call.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("The active view must be a 3D view to show view range planes")]
    NotIn3dView,

    #[error("Invalid view id: {0:?}")]
    InvalidViewId(String),

    #[error("No view found with id {0}")]
    ViewIdNotFound(ElementId),

    #[error("View '{0}' is not a plan view")]
    NotAPlanView(String),

    #[error("No plan view named '{0}'")]
    ViewNameNotFound(String),

    #[error("No eligible plan view found")]
    NoEligibleView,

    #[error("View '{0}' has no crop boundary")]
    NoCropBoundary(String),

    #[error("The plan view these planes belong to (id {0}) no longer exists")]
    SourceViewMissing(ElementId),

    #[error("None of the {0} view range plane(s) in the model carry readable metadata")]
    NoRecognizedProxies(usize),

    #[error("No view range planes are pending")]
    NothingPending,

    #[error("No reference level for the {0} plane")]
    NoReferenceLevel(PlaneRole),

    #[error("Invalid view range: {0}")]
    Hierarchy(#[from] HierarchyViolation),

    #[error(transparent)]
    Host(#[from] viewrange_core::Error),

    #[error(transparent)]
    Geometry(viewrange_geometry::Error),

    #[error("Unexpected failure: {0}")]
    Unexpected(String),
}

impl From<viewrange_geometry::Error> for CommandError {
    fn from(err: viewrange_geometry::Error) -> Self {
        match err {
            viewrange_geometry::Error::HostError(host) => CommandError::Host(host),
            other => CommandError::Geometry(other),
        }
    }
}

impl CommandError {
    /// Short machine-readable category.
    pub fn code(&self) -> &'static str {
        match self {
            CommandError::NotIn3dView
            | CommandError::InvalidViewId(_)
            | CommandError::ViewIdNotFound(_)
            | CommandError::NotAPlanView(_)
            | CommandError::ViewNameNotFound(_)
            | CommandError::NoEligibleView
            | CommandError::NoCropBoundary(_)
            | CommandError::SourceViewMissing(_)
            | CommandError::NoRecognizedProxies(_)
            | CommandError::NothingPending => "INPUT",
            CommandError::Hierarchy(_) => "INVARIANT",
            CommandError::NoReferenceLevel(_) | CommandError::Host(_) => "HOST",
            CommandError::Geometry(_) => "GEOMETRY",
            CommandError::Unexpected(_) => "UNEXPECTED",
        }
    }
}
