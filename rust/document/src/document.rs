// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Storage for the in-memory model.
//!
//! The [`Document`] owns every level, view and shape. Elements live in ordered
//! maps keyed by [`ElementId`], so iteration follows creation order, the way a
//! host lists its elements. Ids are never reused, even after a rollback.
//!
//! Authoring methods here (`add_level`, `add_view`, `translate_shape`, ...)
//! stand for things that happen outside the view-range services: loading a
//! project, the operator dragging a proxy, someone deleting a view. They do
//! not need a transaction. Everything the services do goes through
//! [`HostModel`](viewrange_core::HostModel), which does.

use std::collections::BTreeMap;

use viewrange_core::{
    ElementId, Error, Level, ProxyColor, RangeConfiguration, Result, ShapeElement, ViewInfo,
    ViewKind,
};

#[derive(Debug, Clone)]
pub(crate) struct LevelData {
    pub name: String,
    pub elevation: f64,
}

#[derive(Debug, Clone)]
pub(crate) struct ViewData {
    pub name: String,
    pub kind: ViewKind,
    pub is_template: bool,
    pub discipline: Option<String>,
    pub associated_level: Option<ElementId>,
    pub crop: Option<Vec<[f64; 2]>>,
    pub range: Option<RangeConfiguration>,
}

#[derive(Debug, Clone)]
pub(crate) struct ShapeData {
    pub name: String,
    pub comment: String,
    pub color: ProxyColor,
    pub vertices: Vec<[f64; 3]>,
    pub triangles: Vec<[u32; 3]>,
}

/// Everything a transaction can roll back.
#[derive(Debug, Clone, Default)]
pub(crate) struct Elements {
    pub levels: BTreeMap<ElementId, LevelData>,
    pub views: BTreeMap<ElementId, ViewData>,
    pub shapes: BTreeMap<ElementId, ShapeData>,
}

#[derive(Debug)]
pub(crate) struct OpenTransaction {
    pub name: String,
    pub snapshot: Elements,
    pub active_view: Option<ElementId>,
}

/// Definition of a new view.
#[derive(Debug, Clone)]
pub struct NewView {
    pub name: String,
    pub kind: ViewKind,
    pub is_template: bool,
    pub discipline: Option<String>,
    pub associated_level: Option<ElementId>,
    pub crop: Option<Vec<[f64; 2]>>,
    pub range: Option<RangeConfiguration>,
}

impl NewView {
    /// A floor plan generated from `level`, with a crop box and a view range.
    pub fn floor_plan(
        name: impl Into<String>,
        level: ElementId,
        crop: Vec<[f64; 2]>,
        range: RangeConfiguration,
    ) -> Self {
        Self {
            name: name.into(),
            kind: ViewKind::FloorPlan,
            is_template: false,
            discipline: Some("Architectural".to_string()),
            associated_level: Some(level),
            crop: Some(crop),
            range: Some(range),
        }
    }

    /// A 3D view.
    pub fn three_d(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ViewKind::ThreeD,
            is_template: false,
            discipline: None,
            associated_level: None,
            crop: None,
            range: None,
        }
    }
}

/// In-memory host model.
///
/// # Example
///
/// ```
/// use viewrange_core::{HostModel, PlaneSetting, RangeConfiguration};
/// use viewrange_document::{Document, NewView};
///
/// let mut doc = Document::new();
/// let l1 = doc.add_level("L1", 0.0);
/// let range = RangeConfiguration {
///     top: Some(PlaneSetting::new(l1, 12.0)),
///     cut: Some(PlaneSetting::new(l1, 4.0)),
///     bottom: Some(PlaneSetting::new(l1, 0.0)),
///     view_depth: Some(PlaneSetting::new(l1, 0.0)),
/// };
/// let plan = doc.add_view(NewView::floor_plan(
///     "Level 1",
///     l1,
///     vec![[0.0, 0.0], [10.0, 0.0], [10.0, 10.0], [0.0, 10.0]],
///     range,
/// ));
///
/// assert_eq!(doc.view_range(plan).unwrap(), range);
/// ```
#[derive(Debug)]
pub struct Document {
    pub(crate) elements: Elements,
    pub(crate) active_view: Option<ElementId>,
    pub(crate) transaction: Option<OpenTransaction>,
    next_id: u64,
}

impl Document {
    /// Creates an empty document.
    pub fn new() -> Self {
        Self {
            elements: Elements::default(),
            active_view: None,
            transaction: None,
            next_id: 1,
        }
    }

    pub(crate) fn allocate_id(&mut self) -> ElementId {
        let id = ElementId(self.next_id);
        self.next_id += 1;
        id
    }

    // --- Authoring ---

    /// Adds a level at an absolute elevation.
    pub fn add_level(&mut self, name: impl Into<String>, elevation: f64) -> ElementId {
        let id = self.allocate_id();
        self.elements.levels.insert(
            id,
            LevelData {
                name: name.into(),
                elevation,
            },
        );
        id
    }

    /// Adds a view. A view range is only kept for plan kinds.
    pub fn add_view(&mut self, view: NewView) -> ElementId {
        let id = self.allocate_id();
        let range = if view.kind.is_plan() { view.range } else { None };
        self.elements.views.insert(
            id,
            ViewData {
                name: view.name,
                kind: view.kind,
                is_template: view.is_template,
                discipline: view.discipline,
                associated_level: view.associated_level,
                crop: view.crop,
                range,
            },
        );
        id
    }

    /// Removes a view, as an operator deleting it from the project would.
    pub fn remove_view(&mut self, id: ElementId) -> Result<()> {
        self.elements
            .views
            .remove(&id)
            .ok_or(Error::ViewNotFound(id))?;
        if self.active_view == Some(id) {
            self.active_view = None;
        }
        Ok(())
    }

    /// Makes `id` the view the operator is looking at.
    pub fn set_active_view(&mut self, id: ElementId) -> Result<()> {
        if !self.elements.views.contains_key(&id) {
            return Err(Error::ViewNotFound(id));
        }
        self.active_view = Some(id);
        Ok(())
    }

    /// The view the operator is looking at.
    pub fn active_view(&self) -> Option<ViewInfo> {
        self.active_view.and_then(|id| self.view_info(id))
    }

    /// Moves a shape vertically, as an operator dragging it would.
    pub fn translate_shape(&mut self, id: ElementId, dz: f64) -> Result<()> {
        let shape = self
            .elements
            .shapes
            .get_mut(&id)
            .ok_or(Error::ElementNotFound(id))?;
        for vertex in &mut shape.vertices {
            vertex[2] += dz;
        }
        Ok(())
    }

    /// Raw shape insertion used when loading snapshots.
    pub(crate) fn insert_shape(&mut self, shape: ShapeData) -> ElementId {
        let id = self.allocate_id();
        self.elements.shapes.insert(id, shape);
        id
    }

    // --- Queries ---

    pub(crate) fn level_info(&self, id: ElementId) -> Option<Level> {
        self.elements.levels.get(&id).map(|l| Level {
            id,
            name: l.name.clone(),
            elevation: l.elevation,
        })
    }

    pub(crate) fn view_info(&self, id: ElementId) -> Option<ViewInfo> {
        self.elements.views.get(&id).map(|v| ViewInfo {
            id,
            name: v.name.clone(),
            kind: v.kind,
            is_template: v.is_template,
            discipline: v.discipline.clone(),
            associated_level: v.associated_level,
        })
    }

    pub(crate) fn shape_element(&self, id: ElementId) -> Option<ShapeElement> {
        self.elements.shapes.get(&id).map(|s| ShapeElement {
            id,
            name: s.name.clone(),
            comment: s.comment.clone(),
            color: s.color,
            vertices: s.vertices.clone(),
        })
    }

    /// Looks up a shape by id.
    pub fn shape(&self, id: ElementId) -> Option<ShapeElement> {
        self.shape_element(id)
    }

    /// Looks up a view by name.
    pub fn view_by_name(&self, name: &str) -> Option<ViewInfo> {
        self.elements
            .views
            .iter()
            .find(|(_, v)| v.name == name)
            .and_then(|(&id, _)| self.view_info(id))
    }

    /// Looks up a level by name.
    pub fn level_by_name(&self, name: &str) -> Option<Level> {
        self.elements
            .levels
            .iter()
            .find(|(_, l)| l.name == name)
            .and_then(|(&id, _)| self.level_info(id))
    }

    pub fn level_count(&self) -> usize {
        self.elements.levels.len()
    }

    pub fn view_count(&self) -> usize {
        self.elements.views.len()
    }

    pub fn shape_count(&self) -> usize {
        self.elements.shapes.len()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
