// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # View-Range Processing
//!
//! The two-phase command that lets an operator edit a plan view's range by
//! dragging planes in a 3D view.
//!
//! 1. **Visualize**: one colored proxy per finite plane is created across the
//!    view's crop boundary, each stamped with its role and origin.
//! 2. **Update**: the proxies' live elevations are validated, converted back
//!    to level offsets and written in one call; the proxies are deleted.
//!
//! The [`Controller`] decides the phase from the model itself, so it carries
//! no state between calls.
//!
//! ```rust,ignore
//! use viewrange_core::HostContext;
//! use viewrange_processing::{Action, Controller, Settings, ViewRangeRequest};
//!
//! let controller = Controller::new(Settings::default());
//! let active = document.active_view();
//! let response = controller.execute(
//!     HostContext::new(&mut document, active),
//!     &ViewRangeRequest::new(Action::Visualize).with_view_name("Level 1"),
//! );
//! assert!(response.is_success());
//! ```

pub mod controller;
pub mod error;
pub mod reconcile;
pub mod response;
pub mod selection;
pub mod settings;

pub use controller::{detect_state, Controller, ControllerState};
pub use error::CommandError;
pub use reconcile::{
    preview, reconcile, summarize, Direction, MovementRecord, Preview, Reconciliation,
    NO_MOVEMENT_SUMMARY,
};
pub use response::{
    Action, CancelReport, CommandResponse, CreatedPlane, FailureReport, MovementInfo,
    UpdateReport, ViewRangeRequest, VisualizeReport,
};
pub use selection::{is_eligible, resolve_target_view, EligiblePlanViews, ViewSelector};
pub use settings::{Settings, DEFAULT_MOVEMENT_EPSILON};
