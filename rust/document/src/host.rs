// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! [`HostModel`] implementation for [`Document`].
//!
//! Mutations require an open transaction. Beginning a transaction snapshots
//! all elements; rollback restores the snapshot wholesale.

use viewrange_core::{
    absolute_elevation, ElementId, Error, HostModel, Level, PlaneRole, RangeConfiguration, Result,
    ShapeElement, ShapeSpec, ViewInfo,
};

use crate::document::{Document, OpenTransaction, ShapeData};

/// Ordering slack when validating a range, in model units.
const RANGE_TOLERANCE: f64 = 1e-9;

impl Document {
    fn require_transaction(&self) -> Result<()> {
        if self.transaction.is_none() {
            return Err(Error::NoTransaction);
        }
        Ok(())
    }

    /// Rejects ranges whose absolute elevations are out of order, the way a
    /// host validates a view range before accepting it.
    fn check_range(&self, range: &RangeConfiguration) -> Result<()> {
        let mut previous: Option<(PlaneRole, f64)> = None;
        for (role, setting) in range.planes() {
            let level = self
                .level_info(setting.level)
                .ok_or(Error::LevelNotFound(setting.level))?;
            let z = absolute_elevation(&level, setting.offset);
            if !z.is_finite() {
                return Err(Error::Rejected(format!("{} elevation is not finite", role)));
            }
            if let Some((upper, upper_z)) = previous {
                if upper_z < z - RANGE_TOLERANCE {
                    return Err(Error::Rejected(format!(
                        "{} ({:.3}) would be below {} ({:.3})",
                        upper, upper_z, role, z
                    )));
                }
            }
            previous = Some((role, z));
        }
        Ok(())
    }
}

impl HostModel for Document {
    fn level(&self, id: ElementId) -> Option<Level> {
        self.level_info(id)
    }

    fn view(&self, id: ElementId) -> Option<ViewInfo> {
        self.view_info(id)
    }

    fn views(&self) -> Vec<ViewInfo> {
        self.elements
            .views
            .keys()
            .filter_map(|&id| self.view_info(id))
            .collect()
    }

    fn crop_boundary(&self, view: ElementId) -> Option<Vec<[f64; 2]>> {
        self.elements.views.get(&view).and_then(|v| v.crop.clone())
    }

    fn view_range(&self, view: ElementId) -> Result<RangeConfiguration> {
        let data = self
            .elements
            .views
            .get(&view)
            .ok_or(Error::ViewNotFound(view))?;
        data.range.ok_or(Error::NoViewRange(view))
    }

    fn set_view_range(&mut self, view: ElementId, range: &RangeConfiguration) -> Result<()> {
        self.require_transaction()?;
        self.check_range(range)?;

        let data = self
            .elements
            .views
            .get_mut(&view)
            .ok_or(Error::ViewNotFound(view))?;
        if data.range.is_none() {
            return Err(Error::NoViewRange(view));
        }
        data.range = Some(*range);
        Ok(())
    }

    fn shapes(&self) -> Vec<ShapeElement> {
        self.elements
            .shapes
            .keys()
            .filter_map(|&id| self.shape_element(id))
            .collect()
    }

    fn create_shape(&mut self, shape: ShapeSpec) -> Result<ElementId> {
        self.require_transaction()?;

        if shape.triangles.is_empty() {
            return Err(Error::Rejected(format!("shape '{}' has no faces", shape.name)));
        }
        let vertex_count = shape.vertices.len();
        if shape
            .triangles
            .iter()
            .flatten()
            .any(|&i| i as usize >= vertex_count)
        {
            return Err(Error::Rejected(format!(
                "shape '{}' references a missing vertex",
                shape.name
            )));
        }
        if shape.vertices.iter().flatten().any(|c| !c.is_finite()) {
            return Err(Error::Rejected(format!(
                "shape '{}' has non-finite coordinates",
                shape.name
            )));
        }

        Ok(self.insert_shape(ShapeData {
            name: shape.name,
            comment: shape.comment,
            color: shape.color,
            vertices: shape.vertices,
            triangles: shape.triangles,
        }))
    }

    fn delete_element(&mut self, id: ElementId) -> Result<()> {
        self.require_transaction()?;

        let removed = self.elements.shapes.remove(&id).is_some()
            || self.elements.views.remove(&id).is_some()
            || self.elements.levels.remove(&id).is_some();
        if !removed {
            return Err(Error::ElementNotFound(id));
        }
        if self.active_view == Some(id) {
            self.active_view = None;
        }
        Ok(())
    }

    fn begin_transaction(&mut self, name: &str) -> Result<()> {
        if let Some(open) = &self.transaction {
            return Err(Error::TransactionOpen(open.name.clone()));
        }
        self.transaction = Some(OpenTransaction {
            name: name.to_string(),
            snapshot: self.elements.clone(),
            active_view: self.active_view,
        });
        Ok(())
    }

    fn commit_transaction(&mut self) -> Result<()> {
        self.transaction.take().ok_or(Error::NoTransaction)?;
        Ok(())
    }

    fn rollback_transaction(&mut self) -> Result<()> {
        let open = self.transaction.take().ok_or(Error::NoTransaction)?;
        self.elements = open.snapshot;
        self.active_view = open.active_view;
        Ok(())
    }

    fn in_transaction(&self) -> bool {
        self.transaction.is_some()
    }
}
