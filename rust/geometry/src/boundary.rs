// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Crop boundary of a plan view, the footprint every proxy spans.

use nalgebra::{Point2, Point3};
use smallvec::SmallVec;

use crate::error::{Error, Result};

/// Points closer than this are treated as the same corner.
const CORNER_TOLERANCE: f64 = 1e-9;

/// Closed planar outline in plan coordinates, counter-clockwise.
#[derive(Debug, Clone, PartialEq)]
pub struct CropBoundary {
    points: SmallVec<[Point2<f64>; 8]>,
}

impl CropBoundary {
    /// Builds a boundary from host corners.
    ///
    /// Repeated corners (including an explicit closing point) and corners lying
    /// on a straight edge are dropped, and clockwise input is reversed. Fails for fewer than three distinct
    /// corners or an outline without area.
    pub fn from_corners(corners: &[[f64; 2]]) -> Result<Self> {
        let mut points: SmallVec<[Point2<f64>; 8]> = SmallVec::with_capacity(corners.len());
        for &[x, y] in corners {
            if !x.is_finite() || !y.is_finite() {
                return Err(Error::DegenerateBoundary(format!(
                    "non-finite corner ({}, {})",
                    x, y
                )));
            }
            let p = Point2::new(x, y);
            if points
                .last()
                .map_or(true, |last| (p - last).norm() > CORNER_TOLERANCE)
            {
                points.push(p);
            }
        }
        if points.len() > 1 && (points[0] - points[points.len() - 1]).norm() <= CORNER_TOLERANCE {
            points.pop();
        }
        drop_collinear(&mut points);

        if points.len() < 3 {
            return Err(Error::DegenerateBoundary(format!(
                "need at least 3 distinct corners, got {}",
                points.len()
            )));
        }

        let area = signed_area(&points);
        if area.abs() < CORNER_TOLERANCE {
            return Err(Error::DegenerateBoundary("outline has no area".to_string()));
        }
        if area < 0.0 {
            points.reverse();
        }

        Ok(Self { points })
    }

    /// Corners in counter-clockwise order.
    pub fn points(&self) -> &[Point2<f64>] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Enclosed area.
    pub fn area(&self) -> f64 {
        signed_area(&self.points).abs()
    }

    /// The outline lifted to a horizontal plane at `z`.
    pub fn at_elevation(&self, z: f64) -> Vec<Point3<f64>> {
        self.points.iter().map(|p| Point3::new(p.x, p.y, z)).collect()
    }
}

/// Removes corners whose neighbours lie on one line through them.
fn drop_collinear(points: &mut SmallVec<[Point2<f64>; 8]>) {
    let mut i = 0;
    while points.len() >= 3 && i < points.len() {
        let n = points.len();
        let prev = points[(i + n - 1) % n];
        let next = points[(i + 1) % n];
        let (a, b) = (points[i] - prev, next - points[i]);
        let cross = a.x * b.y - a.y * b.x;
        if cross.abs() <= CORNER_TOLERANCE * a.norm() * b.norm() {
            points.remove(i);
            i = i.saturating_sub(1);
        } else {
            i += 1;
        }
    }
}

/// Shoelace formula; positive for counter-clockwise outlines.
fn signed_area(points: &[Point2<f64>]) -> f64 {
    let n = points.len();
    let mut twice = 0.0;
    for i in 0..n {
        let a = &points[i];
        let b = &points[(i + 1) % n];
        twice += a.x * b.y - b.x * a.y;
    }
    twice / 2.0
}
