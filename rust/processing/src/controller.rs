// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The two-phase view-range command.
//!
//! The controller keeps no memory between calls. Whether marked proxies exist
//! in the model decides the phase: none means the call creates them, any
//! means the call writes them back. Every outcome, panics included, comes
//! back as a [`CommandResponse`].

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use viewrange_core::{
    absolute_elevation, absolute_elevations, read_configuration, resolve_level,
    with_transaction, ElementId, HostContext, HostModel, PlaneRole, ShapeElement, ViewInfo,
};
use viewrange_geometry::{
    create_proxy, extract_metadata, find_marked_proxies, validate_hierarchy, CropBoundary,
};

use crate::error::CommandError;
use crate::reconcile::{preview, reconcile};
use crate::response::{
    Action, CancelReport, CommandResponse, CreatedPlane, FailureReport, MovementInfo,
    UpdateReport, ViewRangeRequest, VisualizeReport,
};
use crate::selection::{resolve_target_view, EligiblePlanViews, ViewSelector};
use crate::settings::Settings;

pub const VISUALIZE_TRANSACTION: &str = "Visualize View Range";
pub const UPDATE_TRANSACTION: &str = "Update View Range";
pub const CANCEL_TRANSACTION: &str = "Cancel View Range";

/// Phase of the command, read from the model at call entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerState {
    Idle,
    PendingReconciliation,
}

pub fn detect_state<M: HostModel + ?Sized>(model: &M) -> ControllerState {
    if find_marked_proxies(model).is_empty() {
        ControllerState::Idle
    } else {
        ControllerState::PendingReconciliation
    }
}

/// Entry point for view-range requests.
#[derive(Debug, Clone, Default)]
pub struct Controller<S = EligiblePlanViews> {
    settings: Settings,
    selector: S,
}

impl Controller {
    pub fn new(settings: Settings) -> Self {
        Self::with_selector(settings, EligiblePlanViews)
    }
}

impl<S: ViewSelector> Controller<S> {
    pub fn with_selector(settings: Settings, selector: S) -> Self {
        Self { settings, selector }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Runs one request against the host. Never panics; an open transaction
    /// left behind by a failure is rolled back.
    pub fn execute<M: HostModel + ?Sized>(
        &self,
        ctx: HostContext<'_, M>,
        request: &ViewRangeRequest,
    ) -> CommandResponse {
        let HostContext { model, active_view } = ctx;

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            self.dispatch(&mut *model, active_view.as_ref(), request)
        }));

        let result = match outcome {
            Ok(result) => result,
            Err(payload) => {
                let reason = panic_message(payload.as_ref());
                tracing::error!(%reason, "view range command panicked");
                Err(CommandError::Unexpected(reason))
            }
        };

        if model.in_transaction() {
            if let Err(err) = model.rollback_transaction() {
                tracing::error!(error = %err, "failed to roll back after command failure");
            }
        }

        result.unwrap_or_else(|err| {
            tracing::warn!(action = ?request.action, code = err.code(), error = %err, "view range command failed");
            CommandResponse::Failed(FailureReport::new(request.action, &err))
        })
    }

    fn dispatch<M: HostModel + ?Sized>(
        &self,
        model: &mut M,
        active_view: Option<&ViewInfo>,
        request: &ViewRangeRequest,
    ) -> Result<CommandResponse, CommandError> {
        let state = detect_state(model);
        tracing::debug!(action = ?request.action, ?state, "dispatching view range command");

        match (state, request.action) {
            (ControllerState::Idle, Action::Visualize | Action::Update) => self
                .visualize(model, active_view, request)
                .map(CommandResponse::Visualized),
            (ControllerState::Idle, Action::Preview | Action::Cancel) => {
                Err(CommandError::NothingPending)
            }
            (ControllerState::PendingReconciliation, Action::Visualize | Action::Update) => {
                self.update(model).map(CommandResponse::Reconciled)
            }
            (ControllerState::PendingReconciliation, Action::Preview) => {
                self.preview(model).map(CommandResponse::Reconciled)
            }
            (ControllerState::PendingReconciliation, Action::Cancel) => {
                cancel(model).map(CommandResponse::Cancelled)
            }
        }
    }

    fn visualize<M: HostModel + ?Sized>(
        &self,
        model: &mut M,
        active_view: Option<&ViewInfo>,
        request: &ViewRangeRequest,
    ) -> Result<VisualizeReport, CommandError> {
        let view = resolve_target_view(
            model,
            &self.selector,
            request.view_id.as_deref(),
            request.view_name.as_deref(),
        )?;

        if !active_view.is_some_and(|v| v.kind.is_3d()) {
            return Err(CommandError::NotIn3dView);
        }

        let corners = model
            .crop_boundary(view.id)
            .ok_or_else(|| CommandError::NoCropBoundary(view.name.clone()))?;
        let boundary = CropBoundary::from_corners(&corners)?;

        let configuration = read_configuration(model, view.id)?;
        validate_hierarchy(&absolute_elevations(model, &configuration)?)?;

        let planes_created = with_transaction(model, VISUALIZE_TRANSACTION, |model| {
            let mut created = Vec::new();
            for (role, setting) in configuration.planes() {
                let level = resolve_level(model, setting.level)?;
                let elevation = absolute_elevation(&level, setting.offset);
                let id = create_proxy(model, &boundary, elevation, role, &level.name, view.id)?;
                tracing::debug!(%role, elevation, element = %id, "created view range plane");
                created.push(CreatedPlane {
                    plane_name: role.display_name().to_string(),
                    color: role.color().name(),
                    elevation,
                    element_id: id,
                });
            }
            Ok::<_, CommandError>(created)
        })?;

        let planes_skipped: Vec<String> = PlaneRole::ALL
            .into_iter()
            .filter(|role| configuration.get(*role).is_none())
            .map(|role| role.display_name().to_string())
            .collect();

        tracing::info!(
            view = %view.name,
            created = planes_created.len(),
            skipped = planes_skipped.len(),
            "view range planes created"
        );

        let mut message = format!(
            "Created {} view range plane(s) for '{}'. Move them vertically in the 3D view, then run the command again to apply the changes.",
            planes_created.len(),
            view.name
        );
        if !planes_skipped.is_empty() {
            message.push_str(&format!(
                " Unlimited planes not shown: {}.",
                planes_skipped.join(", ")
            ));
        }

        Ok(VisualizeReport {
            success: true,
            action: Action::Visualize,
            view_name: view.name,
            planes_created,
            planes_skipped,
            message,
        })
    }

    fn update<M: HostModel + ?Sized>(&self, model: &mut M) -> Result<UpdateReport, CommandError> {
        let proxies = find_marked_proxies(model);
        let view = source_view(model, &proxies)?;

        let reconciliation = with_transaction(model, UPDATE_TRANSACTION, |model| {
            let reconciliation = reconcile(model, view.id, &proxies, &self.settings)?;
            for proxy in &proxies {
                model.delete_element(proxy.id)?;
            }
            Ok::<_, CommandError>(reconciliation)
        })?;

        Ok(UpdateReport {
            success: true,
            action: Action::Update,
            view_name: view.name,
            movement_info: reconciliation.movements.iter().map(MovementInfo::from).collect(),
            message: reconciliation.summary,
        })
    }

    fn preview<M: HostModel + ?Sized>(&self, model: &M) -> Result<UpdateReport, CommandError> {
        let proxies = find_marked_proxies(model);
        let view = source_view(model, &proxies)?;
        let preview = preview(model, view.id, &proxies, &self.settings)?;

        Ok(UpdateReport {
            success: true,
            action: Action::Preview,
            view_name: view.name,
            movement_info: preview.movements.iter().map(MovementInfo::from).collect(),
            message: preview.summary,
        })
    }
}

/// Removes every marked proxy and leaves the range untouched.
fn cancel<M: HostModel + ?Sized>(model: &mut M) -> Result<CancelReport, CommandError> {
    let proxies = find_marked_proxies(model);
    let ids: Vec<ElementId> = proxies.iter().map(|p| p.id).collect();

    with_transaction(model, CANCEL_TRANSACTION, |model| {
        for id in &ids {
            model.delete_element(*id)?;
        }
        Ok::<_, CommandError>(())
    })?;

    tracing::info!(removed = ids.len(), "view range planes removed");
    Ok(CancelReport {
        success: true,
        action: Action::Cancel,
        removed_count: ids.len(),
        message: format!("Removed {} view range plane(s).", ids.len()),
    })
}

/// The plan view the proxies were created from, via the first readable metadata.
fn source_view<M: HostModel + ?Sized>(
    model: &M,
    proxies: &[ShapeElement],
) -> Result<ViewInfo, CommandError> {
    let source = proxies
        .iter()
        .find_map(extract_metadata)
        .map(|m| m.source_view)
        .ok_or(CommandError::NoRecognizedProxies(proxies.len()))?;
    model
        .view(source)
        .ok_or(CommandError::SourceViewMissing(source))
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
