// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The contract every host model must fulfil.
//!
//! Services never reach for global host state. They receive the model (and,
//! at the controller entry point, a [`HostContext`]) explicitly, which keeps
//! them testable against the in-memory document.

use crate::error::Result;
use crate::ids::ElementId;
use crate::model::{Level, RangeConfiguration, ShapeElement, ShapeSpec, ViewInfo};

/// Model access required by the view-range services.
///
/// Mutating calls are only valid inside a transaction opened with
/// [`begin_transaction`](HostModel::begin_transaction); see
/// [`with_transaction`](crate::with_transaction).
pub trait HostModel {
    fn level(&self, id: ElementId) -> Option<Level>;

    fn view(&self, id: ElementId) -> Option<ViewInfo>;

    /// All views in host order.
    fn views(&self) -> Vec<ViewInfo>;

    /// Crop boundary corners of a view in plan coordinates, if it has one.
    fn crop_boundary(&self, view: ElementId) -> Option<Vec<[f64; 2]>>;

    fn view_range(&self, view: ElementId) -> Result<RangeConfiguration>;

    /// Replaces all four planes at once. On rejection nothing is written.
    fn set_view_range(&mut self, view: ElementId, range: &RangeConfiguration) -> Result<()>;

    /// Generic shapes currently in the model.
    fn shapes(&self) -> Vec<ShapeElement>;

    fn create_shape(&mut self, shape: ShapeSpec) -> Result<ElementId>;

    fn delete_element(&mut self, id: ElementId) -> Result<()>;

    fn begin_transaction(&mut self, name: &str) -> Result<()>;

    fn commit_transaction(&mut self) -> Result<()>;

    fn rollback_transaction(&mut self) -> Result<()>;

    fn in_transaction(&self) -> bool;
}

/// Explicit stand-in for the host's implicit UI state.
pub struct HostContext<'a, M: HostModel + ?Sized> {
    pub model: &'a mut M,
    /// The scene the operator is looking at.
    pub active_view: Option<ViewInfo>,
}

impl<'a, M: HostModel + ?Sized> HostContext<'a, M> {
    pub fn new(model: &'a mut M, active_view: Option<ViewInfo>) -> Self {
        Self { model, active_view }
    }
}
