// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Host model records exchanged through [`HostModel`](crate::HostModel).

use crate::ids::ElementId;
use crate::role::{PlaneRole, ProxyColor};

/// A named horizontal datum with an absolute elevation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Level {
    pub id: ElementId,
    pub name: String,
    pub elevation: f64,
}

/// Kind of a host view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ViewKind {
    FloorPlan,
    CeilingPlan,
    StructuralPlan,
    ThreeD,
    Section,
    Elevation,
    Other,
}

impl ViewKind {
    /// Plan kinds are the ones carrying a view range.
    pub fn is_plan(self) -> bool {
        matches!(
            self,
            ViewKind::FloorPlan | ViewKind::CeilingPlan | ViewKind::StructuralPlan
        )
    }

    pub fn is_3d(self) -> bool {
        self == ViewKind::ThreeD
    }
}

/// Read-only description of a view.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ViewInfo {
    pub id: ElementId,
    pub name: String,
    pub kind: ViewKind,
    pub is_template: bool,
    /// Value of the view's discipline parameter, if set.
    pub discipline: Option<String>,
    /// Level the view was generated from (plan views only).
    pub associated_level: Option<ElementId>,
}

/// A single plane of a view range: an offset from a reference level.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlaneSetting {
    pub level: ElementId,
    pub offset: f64,
}

impl PlaneSetting {
    pub fn new(level: ElementId, offset: f64) -> Self {
        Self { level, offset }
    }
}

/// The persisted four-plane view range of a plan view.
///
/// A `None` plane is unlimited: it has no finite clip and no proxy.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RangeConfiguration {
    pub top: Option<PlaneSetting>,
    pub cut: Option<PlaneSetting>,
    pub bottom: Option<PlaneSetting>,
    pub view_depth: Option<PlaneSetting>,
}

impl RangeConfiguration {
    pub fn get(&self, role: PlaneRole) -> Option<PlaneSetting> {
        match role {
            PlaneRole::Top => self.top,
            PlaneRole::Cut => self.cut,
            PlaneRole::Bottom => self.bottom,
            PlaneRole::ViewDepth => self.view_depth,
        }
    }

    pub fn set(&mut self, role: PlaneRole, setting: Option<PlaneSetting>) {
        let slot = match role {
            PlaneRole::Top => &mut self.top,
            PlaneRole::Cut => &mut self.cut,
            PlaneRole::Bottom => &mut self.bottom,
            PlaneRole::ViewDepth => &mut self.view_depth,
        };
        *slot = setting;
    }

    /// Finite planes in chain order.
    pub fn planes(&self) -> impl Iterator<Item = (PlaneRole, PlaneSetting)> + '_ {
        PlaneRole::ALL
            .iter()
            .filter_map(move |&role| self.get(role).map(|s| (role, s)))
    }
}

/// Request to create a generic colored shape in the host model.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeSpec {
    pub name: String,
    /// The shape's single free-text slot.
    pub comment: String,
    pub color: ProxyColor,
    pub vertices: Vec<[f64; 3]>,
    pub triangles: Vec<[u32; 3]>,
}

/// A generic shape as it currently exists in the host model.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShapeElement {
    pub id: ElementId,
    pub name: String,
    pub comment: String,
    pub color: ProxyColor,
    /// Live vertex positions; reflects any move made after creation.
    pub vertices: Vec<[f64; 3]>,
}
