// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Picking the plan view a visualize call targets.

use viewrange_core::{ElementId, HostModel, ViewInfo};

use crate::error::CommandError;

/// Discipline value that excludes a view from automatic selection.
const COORDINATION_DISCIPLINE: &str = "coordination";

/// Lists the plan views a visualize call may target when none is named.
pub trait ViewSelector {
    fn eligible_views<M: HostModel + ?Sized>(&self, model: &M) -> Vec<ViewInfo>;
}

/// Default selector: every non-template plan view outside the coordination
/// discipline, in host order.
#[derive(Debug, Clone, Copy, Default)]
pub struct EligiblePlanViews;

impl ViewSelector for EligiblePlanViews {
    fn eligible_views<M: HostModel + ?Sized>(&self, model: &M) -> Vec<ViewInfo> {
        model.views().into_iter().filter(is_eligible).collect()
    }
}

/// Whether a view is a candidate for automatic selection.
pub fn is_eligible(view: &ViewInfo) -> bool {
    !view.is_template
        && view.kind.is_plan()
        && !view
            .discipline
            .as_deref()
            .is_some_and(|d| d.trim().eq_ignore_ascii_case(COORDINATION_DISCIPLINE))
}

/// Resolves the target view: explicit id, then explicit name, then the first
/// eligible view.
pub fn resolve_target_view<M, S>(
    model: &M,
    selector: &S,
    view_id: Option<&str>,
    view_name: Option<&str>,
) -> Result<ViewInfo, CommandError>
where
    M: HostModel + ?Sized,
    S: ViewSelector,
{
    if let Some(raw) = view_id.filter(|s| !s.trim().is_empty()) {
        let id: ElementId = raw
            .parse()
            .map_err(|_| CommandError::InvalidViewId(raw.to_string()))?;
        let view = model.view(id).ok_or(CommandError::ViewIdNotFound(id))?;
        if !view.kind.is_plan() {
            return Err(CommandError::NotAPlanView(view.name));
        }
        return Ok(view);
    }

    if let Some(name) = view_name.map(str::trim).filter(|s| !s.is_empty()) {
        let plans: Vec<ViewInfo> = model
            .views()
            .into_iter()
            .filter(|v| v.kind.is_plan())
            .collect();
        let exact = plans.iter().find(|v| v.name == name);
        let loose = || plans.iter().find(|v| v.name.eq_ignore_ascii_case(name));
        return exact
            .or_else(loose)
            .cloned()
            .ok_or_else(|| CommandError::ViewNameNotFound(name.to_string()));
    }

    selector
        .eligible_views(model)
        .into_iter()
        .next()
        .ok_or(CommandError::NoEligibleView)
}
