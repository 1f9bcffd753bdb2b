// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Flat triangle meshes for proxy surfaces

use nalgebra::{Point2, Point3};

use crate::boundary::CropBoundary;
use crate::error::{Error, Result};

/// Horizontal polygon mesh at a single elevation
#[derive(Debug, Clone, PartialEq)]
pub struct PlaneMesh {
    /// Vertex positions
    pub vertices: Vec<Point3<f64>>,
    /// Triangle indices into `vertices`
    pub triangles: Vec<[u32; 3]>,
}

impl PlaneMesh {
    /// Triangulate `boundary` and place it at elevation `z`
    pub fn from_boundary(boundary: &CropBoundary, z: f64) -> Result<Self> {
        let indices = triangulate_outline(boundary.points())?;
        let triangles = indices
            .chunks_exact(3)
            .map(|t| [t[0] as u32, t[1] as u32, t[2] as u32])
            .collect();

        Ok(Self {
            vertices: boundary.at_elevation(z),
            triangles,
        })
    }

    /// Elevation of the mesh (mean vertex Z)
    pub fn elevation(&self) -> Option<f64> {
        mean_z(self.vertices.iter().map(|p| p.z))
    }

    /// Vertex positions as plain arrays for the host
    pub fn vertex_array(&self) -> Vec<[f64; 3]> {
        self.vertices.iter().map(|p| [p.x, p.y, p.z]).collect()
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }
}

/// Mean of a set of Z values, `None` when empty or non-finite
pub(crate) fn mean_z(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0usize), |(s, n), z| (s + z, n + 1));
    if count == 0 {
        return None;
    }
    let mean = sum / count as f64;
    mean.is_finite().then_some(mean)
}

/// Check if a polygon is convex (all turns have the same sign)
#[inline]
fn is_convex(points: &[Point2<f64>]) -> bool {
    let n = points.len();
    let mut sign = 0i8;

    for i in 0..n {
        let p0 = &points[i];
        let p1 = &points[(i + 1) % n];
        let p2 = &points[(i + 2) % n];

        let cross = (p1.x - p0.x) * (p2.y - p1.y) - (p1.y - p0.y) * (p2.x - p1.x);
        if cross.abs() > 1e-10 {
            let current = if cross > 0.0 { 1i8 } else { -1i8 };
            if sign == 0 {
                sign = current;
            } else if sign != current {
                return false;
            }
        }
    }

    true
}

/// Triangulate a simple outline, returning flat triangle indices
///
/// Convex outlines (the usual rectangular crop box) are fanned from the first
/// corner; anything else goes through earcutr.
pub fn triangulate_outline(points: &[Point2<f64>]) -> Result<Vec<usize>> {
    let n = points.len();
    if n < 3 {
        return Err(Error::TriangulationError(
            "Need at least 3 points to triangulate".to_string(),
        ));
    }

    if is_convex(points) {
        let mut indices = Vec::with_capacity((n - 2) * 3);
        for i in 1..n - 1 {
            indices.extend_from_slice(&[0, i, i + 1]);
        }
        return Ok(indices);
    }

    let flat: Vec<f64> = points.iter().flat_map(|p| [p.x, p.y]).collect();
    let indices = earcutr::earcut(&flat, &[], 2)
        .map_err(|e| Error::TriangulationError(format!("{:?}", e)))?;

    if indices.is_empty() {
        return Err(Error::TriangulationError(
            "Outline produced no triangles".to_string(),
        ));
    }
    Ok(indices)
}
