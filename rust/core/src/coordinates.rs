// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Conversions between level-relative offsets and absolute elevations, and
//! access to a view's persisted range configuration.

use crate::error::{Error, Result};
use crate::host::HostModel;
use crate::ids::ElementId;
use crate::model::{Level, PlaneSetting, RangeConfiguration};
use crate::role::PlaneElevations;

/// Absolute elevation of an offset measured from `level`.
#[inline]
pub fn absolute_elevation(level: &Level, offset: f64) -> f64 {
    level.elevation + offset
}

/// Offset from `level` that places a plane at `absolute`.
#[inline]
pub fn level_offset(level: &Level, absolute: f64) -> f64 {
    absolute - level.elevation
}

/// Looks up a level, failing with a reference error when it is gone.
pub fn resolve_level<M: HostModel + ?Sized>(model: &M, id: ElementId) -> Result<Level> {
    model.level(id).ok_or(Error::LevelNotFound(id))
}

/// Absolute elevation of one plane setting.
pub fn plane_elevation<M: HostModel + ?Sized>(model: &M, setting: &PlaneSetting) -> Result<f64> {
    let level = resolve_level(model, setting.level)?;
    Ok(absolute_elevation(&level, setting.offset))
}

/// Reads the view range of a plan view.
pub fn read_configuration<M: HostModel + ?Sized>(
    model: &M,
    view: ElementId,
) -> Result<RangeConfiguration> {
    if model.view(view).is_none() {
        return Err(Error::ViewNotFound(view));
    }
    model.view_range(view)
}

/// Writes all four planes in one host call.
pub fn write_configuration<M: HostModel + ?Sized>(
    model: &mut M,
    view: ElementId,
    configuration: &RangeConfiguration,
) -> Result<()> {
    if model.view(view).is_none() {
        return Err(Error::ViewNotFound(view));
    }
    model.set_view_range(view, configuration)
}

/// Absolute elevation of every finite plane in `configuration`.
pub fn absolute_elevations<M: HostModel + ?Sized>(
    model: &M,
    configuration: &RangeConfiguration,
) -> Result<PlaneElevations> {
    let mut elevations = PlaneElevations::new();
    for (role, setting) in configuration.planes() {
        elevations.set(role, plane_elevation(model, &setting)?);
    }
    Ok(elevations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn level(elevation: f64) -> Level {
        Level {
            id: ElementId(1),
            name: "L2".to_string(),
            elevation,
        }
    }

    #[test]
    fn offset_and_absolute_are_inverse() {
        let l2 = level(12.5);
        let z = absolute_elevation(&l2, -3.25);
        assert_relative_eq!(z, 9.25);
        assert_relative_eq!(level_offset(&l2, z), -3.25);
    }

    #[test]
    fn level_at_origin_is_identity() {
        let l1 = level(0.0);
        assert_relative_eq!(absolute_elevation(&l1, 80.0), 80.0);
        assert_relative_eq!(level_offset(&l1, 80.0), 80.0);
    }
}
