// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Shared fixtures for the pipeline tests.

#![allow(dead_code)]

use viewrange_core::{
    proxy_name, with_transaction, ElementId, Error, HostContext, HostModel, Level, PlaneRole,
    PlaneSetting, RangeConfiguration, Result, ShapeElement, ShapeSpec, ViewInfo,
};
use viewrange_document::{Document, NewView};
use viewrange_geometry::find_marked_proxies;
use viewrange_processing::{CommandResponse, Controller, Settings, ViewRangeRequest};

pub const CROP: [[f64; 2]; 4] = [[0.0, 0.0], [30.0, 0.0], [30.0, 20.0], [0.0, 20.0]];

pub struct Fixture {
    pub doc: Document,
    pub l1: ElementId,
    pub l2: ElementId,
    pub plan: ElementId,
    pub three_d: ElementId,
}

/// L1 at 0 and L2 at 100. "Level 1" has Top = L2 + 20 (120), Cut = L1 + 90,
/// Bottom = L1 + 0 and View Depth = L1 - 40. The 3D view is active.
pub fn fixture() -> Fixture {
    fixture_with(|l1, l2| RangeConfiguration {
        top: Some(PlaneSetting::new(l2, 20.0)),
        cut: Some(PlaneSetting::new(l1, 90.0)),
        bottom: Some(PlaneSetting::new(l1, 0.0)),
        view_depth: Some(PlaneSetting::new(l1, -40.0)),
    })
}

pub fn fixture_with(range: impl FnOnce(ElementId, ElementId) -> RangeConfiguration) -> Fixture {
    let mut doc = Document::new();
    let l1 = doc.add_level("L1", 0.0);
    let l2 = doc.add_level("L2", 100.0);
    let plan = doc.add_view(NewView::floor_plan(
        "Level 1",
        l1,
        CROP.to_vec(),
        range(l1, l2),
    ));
    let three_d = doc.add_view(NewView::three_d("{3D}"));
    doc.set_active_view(three_d).unwrap();
    Fixture {
        doc,
        l1,
        l2,
        plan,
        three_d,
    }
}

pub fn run<M: HostModel>(model: &mut M, active: Option<ViewInfo>, request: ViewRangeRequest) -> CommandResponse {
    Controller::new(Settings::default()).execute(HostContext::new(model, active), &request)
}

pub fn run_doc(doc: &mut Document, request: ViewRangeRequest) -> CommandResponse {
    let active = doc.active_view();
    run(doc, active, request)
}

pub fn proxy(doc: &Document, role: PlaneRole) -> ShapeElement {
    let name = proxy_name(role);
    find_marked_proxies(doc)
        .into_iter()
        .find(|p| p.name == name)
        .unwrap_or_else(|| panic!("no proxy for {role}"))
}

pub fn proxy_count(doc: &Document) -> usize {
    find_marked_proxies(doc).len()
}

/// Moves the proxy for `role` by `dz`, as an operator would.
pub fn drag(doc: &mut Document, role: PlaneRole, dz: f64) {
    let id = proxy(doc, role).id;
    doc.translate_shape(id, dz).unwrap();
}

/// Deletes the proxy for `role` behind the controller's back.
pub fn delete_proxy(doc: &mut Document, role: PlaneRole) {
    let id = proxy(doc, role).id;
    with_transaction(doc, "Delete proxy", |m| m.delete_element(id)).unwrap();
}

/// Adds a shape that carries the proxy marker but unreadable metadata.
pub fn add_corrupt_proxy(doc: &mut Document) -> ElementId {
    with_transaction(doc, "Stray proxy", |m| {
        m.create_shape(ShapeSpec {
            name: proxy_name(PlaneRole::Cut),
            comment: "edited by hand".to_string(),
            color: PlaneRole::Cut.color(),
            vertices: vec![[0.0, 0.0, 5.0], [1.0, 0.0, 5.0], [0.0, 1.0, 5.0]],
            triangles: vec![[0, 1, 2]],
        })
    })
    .unwrap()
}

/// Host wrapper that fails or panics on demand.
pub struct FlakyHost {
    pub inner: Document,
    /// 1-based index of the `create_shape` call that fails.
    pub fail_on_create: Option<usize>,
    pub panic_on_write: bool,
    creates: usize,
}

impl FlakyHost {
    pub fn new(inner: Document) -> Self {
        Self {
            inner,
            fail_on_create: None,
            panic_on_write: false,
            creates: 0,
        }
    }
}

impl HostModel for FlakyHost {
    fn level(&self, id: ElementId) -> Option<Level> {
        self.inner.level(id)
    }

    fn view(&self, id: ElementId) -> Option<ViewInfo> {
        self.inner.view(id)
    }

    fn views(&self) -> Vec<ViewInfo> {
        self.inner.views()
    }

    fn crop_boundary(&self, view: ElementId) -> Option<Vec<[f64; 2]>> {
        self.inner.crop_boundary(view)
    }

    fn view_range(&self, view: ElementId) -> Result<RangeConfiguration> {
        self.inner.view_range(view)
    }

    fn set_view_range(&mut self, view: ElementId, range: &RangeConfiguration) -> Result<()> {
        if self.panic_on_write {
            panic!("host crashed while writing the view range");
        }
        self.inner.set_view_range(view, range)
    }

    fn shapes(&self) -> Vec<ShapeElement> {
        self.inner.shapes()
    }

    fn create_shape(&mut self, shape: ShapeSpec) -> Result<ElementId> {
        self.creates += 1;
        if self.fail_on_create == Some(self.creates) {
            return Err(Error::Rejected("out of shape quota".to_string()));
        }
        self.inner.create_shape(shape)
    }

    fn delete_element(&mut self, id: ElementId) -> Result<()> {
        self.inner.delete_element(id)
    }

    fn begin_transaction(&mut self, name: &str) -> Result<()> {
        self.inner.begin_transaction(name)
    }

    fn commit_transaction(&mut self) -> Result<()> {
        self.inner.commit_transaction()
    }

    fn rollback_transaction(&mut self) -> Result<()> {
        self.inner.rollback_transaction()
    }

    fn in_transaction(&self) -> bool {
        self.inner.in_transaction()
    }
}
