// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Writing moved proxies back into a view's range configuration.
//!
//! The proxies are the operator's edit surface: each one remembers the
//! elevation it was created at and its live geometry says where it is now.
//! Reconciliation turns those absolute elevations back into level offsets,
//! guards the plane ordering, and writes all four planes in one host call.

use serde::Serialize;
use viewrange_core::{
    absolute_elevations, level_offset, read_configuration, resolve_level, write_configuration,
    ElementId, HostModel, PlaneElevations, PlaneRole, PlaneSetting, RangeConfiguration,
    ShapeElement, ViewInfo,
};
use viewrange_geometry::{
    extract_metadata, extract_proxies, validate_hierarchy, ProxyExtraction, ProxyPlane,
};

use crate::error::CommandError;
use crate::settings::Settings;

/// Summary line used when no plane moved beyond the epsilon.
pub const NO_MOVEMENT_SUMMARY: &str = "No planes were moved.";

/// Vertical direction a proxy was dragged in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    None,
}

/// How far one plane moved between visualize and update.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MovementRecord {
    pub role: PlaneRole,
    pub direction: Direction,
    /// Absolute distance; `0.0` when the direction is [`Direction::None`].
    pub distance: f64,
}

impl MovementRecord {
    pub fn between(role: PlaneRole, original: f64, current: f64, epsilon: f64) -> Self {
        let delta = current - original;
        if delta.abs() < epsilon {
            return Self {
                role,
                direction: Direction::None,
                distance: 0.0,
            };
        }
        Self {
            role,
            direction: if delta > 0.0 { Direction::Up } else { Direction::Down },
            distance: delta.abs(),
        }
    }

    #[inline]
    pub fn moved(&self) -> bool {
        self.direction != Direction::None
    }

    fn of(plane: &ProxyPlane, epsilon: f64) -> Self {
        Self::between(
            plane.role(),
            plane.metadata.original_elevation,
            plane.current_elevation,
            epsilon,
        )
    }
}

/// Outcome of a successful write.
#[derive(Debug, Clone)]
pub struct Reconciliation {
    pub view: ViewInfo,
    pub previous: RangeConfiguration,
    pub updated: RangeConfiguration,
    /// One record per recognized proxy, in chain order.
    pub movements: Vec<MovementRecord>,
    pub summary: String,
    /// Proxies that were ignored: corrupt metadata, another source view or a
    /// duplicate role.
    pub skipped: Vec<ElementId>,
}

/// Outcome of a dry run.
#[derive(Debug, Clone)]
pub struct Preview {
    pub movements: Vec<MovementRecord>,
    pub summary: String,
    pub skipped: Vec<ElementId>,
}

/// One line per moved plane, or [`NO_MOVEMENT_SUMMARY`].
pub fn summarize(movements: &[MovementRecord]) -> String {
    let lines: Vec<String> = movements
        .iter()
        .filter(|m| m.moved())
        .map(|m| {
            let direction = match m.direction {
                Direction::Up => "up",
                Direction::Down => "down",
                Direction::None => "nowhere",
            };
            format!("{} moved {} by {:.3}", m.role, direction, m.distance)
        })
        .collect();

    if lines.is_empty() {
        NO_MOVEMENT_SUMMARY.to_string()
    } else {
        lines.join("\n")
    }
}

fn recognize(
    proxies: &[ShapeElement],
    view_id: ElementId,
) -> Result<ProxyExtraction, CommandError> {
    let (foreign, own): (Vec<ShapeElement>, Vec<ShapeElement>) = proxies
        .iter()
        .cloned()
        .partition(|p| extract_metadata(p).is_some_and(|m| m.source_view != view_id));

    let mut extraction = extract_proxies(&own);
    for id in &extraction.skipped {
        tracing::debug!(element = %id, "skipping proxy without readable metadata");
    }
    for id in &extraction.duplicates {
        tracing::warn!(element = %id, "ignoring duplicate proxy for an already seen role");
    }
    for proxy in &foreign {
        tracing::warn!(
            element = %proxy.id,
            view = %view_id,
            "skipping proxy created for another view"
        );
        extraction.skipped.push(proxy.id);
    }

    if extraction.is_empty() {
        return Err(CommandError::NoRecognizedProxies(proxies.len()));
    }
    Ok(extraction)
}

fn movements(extraction: &ProxyExtraction, settings: &Settings) -> Vec<MovementRecord> {
    extraction
        .planes
        .iter()
        .map(|p| MovementRecord::of(p, settings.movement_epsilon))
        .collect()
}

fn skipped(extraction: &ProxyExtraction) -> Vec<ElementId> {
    extraction
        .skipped
        .iter()
        .chain(&extraction.duplicates)
        .copied()
        .collect()
}

/// Elevations the view would end up with: submitted planes plus every finite
/// plane of the stored configuration that has no proxy.
fn combined_elevations<M: HostModel + ?Sized>(
    model: &M,
    submitted: &PlaneElevations,
    stored: &RangeConfiguration,
) -> Result<PlaneElevations, CommandError> {
    let mut combined = submitted.clone();
    combined.fill_missing_from(&absolute_elevations(model, stored)?);
    Ok(combined)
}

/// Reports what an update would do without touching the model.
pub fn preview<M: HostModel + ?Sized>(
    model: &M,
    view_id: ElementId,
    proxies: &[ShapeElement],
    settings: &Settings,
) -> Result<Preview, CommandError> {
    let extraction = recognize(proxies, view_id)?;
    let submitted = extraction.elevations();
    validate_hierarchy(&submitted)?;

    let stored = read_configuration(model, view_id)?;
    validate_hierarchy(&combined_elevations(model, &submitted, &stored)?)?;

    let movements = movements(&extraction, settings);
    Ok(Preview {
        summary: summarize(&movements),
        movements,
        skipped: skipped(&extraction),
    })
}

/// Writes the proxies' live elevations into the view's range.
///
/// Fails without mutation when the result would break the plane ordering or
/// a plane has no level to measure its offset from. Does not delete the
/// proxies; the caller owns cleanup.
pub fn reconcile<M: HostModel + ?Sized>(
    model: &mut M,
    view_id: ElementId,
    proxies: &[ShapeElement],
    settings: &Settings,
) -> Result<Reconciliation, CommandError> {
    let extraction = recognize(proxies, view_id)?;
    let submitted = extraction.elevations();
    validate_hierarchy(&submitted)?;

    let view = model
        .view(view_id)
        .ok_or(CommandError::SourceViewMissing(view_id))?;
    let previous = read_configuration(model, view_id)?;
    let movements = movements(&extraction, settings);

    // Every recognized plane is written from its live elevation; the epsilon
    // only shapes the movement report.
    let mut updated = previous;
    for plane in &extraction.planes {
        let role = plane.role();
        let level_id = previous
            .get(role)
            .map(|s| s.level)
            .or(view.associated_level)
            .ok_or(CommandError::NoReferenceLevel(role))?;
        let level = resolve_level(model, level_id)?;
        let offset = level_offset(&level, plane.current_elevation);
        updated.set(role, Some(PlaneSetting::new(level_id, offset)));
    }

    validate_hierarchy(&combined_elevations(model, &submitted, &previous)?)?;

    write_configuration(model, view_id, &updated)?;
    tracing::info!(
        view = %view.name,
        planes = extraction.planes.len(),
        moved = movements.iter().filter(|m| m.moved()).count(),
        "view range updated"
    );

    Ok(Reconciliation {
        summary: summarize(&movements),
        skipped: skipped(&extraction),
        view,
        previous,
        updated,
        movements,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn movement_within_epsilon_is_none() {
        let m = MovementRecord::between(PlaneRole::Cut, 90.0, 90.0004, 0.001);
        assert_eq!(m.direction, Direction::None);
        assert_eq!(m.distance, 0.0);
        assert!(!m.moved());
    }

    #[test]
    fn movement_direction_and_distance() {
        let down = MovementRecord::between(PlaneRole::Cut, 90.0, 80.0, 0.001);
        assert_eq!(down.direction, Direction::Down);
        assert_relative_eq!(down.distance, 10.0);

        let up = MovementRecord::between(PlaneRole::Top, 100.0, 102.5, 0.001);
        assert_eq!(up.direction, Direction::Up);
        assert_relative_eq!(up.distance, 2.5);
    }

    #[test]
    fn summary_lists_moved_planes_only() {
        let movements = [
            MovementRecord::between(PlaneRole::Top, 100.0, 100.0, 0.001),
            MovementRecord::between(PlaneRole::Cut, 90.0, 80.0, 0.001),
        ];
        assert_eq!(summarize(&movements), "Cut moved down by 10.000");
    }

    #[test]
    fn summary_without_movement() {
        let movements = [MovementRecord::between(PlaneRole::Bottom, 0.0, 0.0, 0.001)];
        assert_eq!(summarize(&movements), NO_MOVEMENT_SUMMARY);
        assert_eq!(summarize(&[]), NO_MOVEMENT_SUMMARY);
    }

    #[test]
    fn direction_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Direction::Down).unwrap(), "\"down\"");
        assert_eq!(serde_json::to_string(&Direction::None).unwrap(), "\"none\"");
    }
}
