// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Plane proxies: visible stand-ins for the invisible view-range planes.
//!
//! A proxy is a flat colored shape spanning the view's crop boundary. Its
//! free-text slot carries [`PlaneMetadata`]; its live vertices carry the
//! elevation the operator moved it to.

use viewrange_core::{
    is_proxy_name, proxy_name, ElementId, HostModel, PlaneElevations, PlaneMetadata, PlaneRole,
    ShapeElement, ShapeSpec,
};

use crate::boundary::CropBoundary;
use crate::error::Result;
use crate::mesh::{mean_z, PlaneMesh};

/// Vertical drift below this is geometry noise, not an operator's move.
const MOVE_TOLERANCE: f64 = 1e-9;

/// Creates one proxy for `role` at `elevation` and returns its element id.
pub fn create_proxy<M: HostModel + ?Sized>(
    model: &mut M,
    boundary: &CropBoundary,
    elevation: f64,
    role: PlaneRole,
    source_level_name: &str,
    source_view: ElementId,
) -> Result<ElementId> {
    let mesh = PlaneMesh::from_boundary(boundary, elevation)?;
    let metadata = PlaneMetadata {
        role,
        original_elevation: elevation,
        source_view,
        source_level_name: source_level_name.to_string(),
    };

    let id = model.create_shape(ShapeSpec {
        name: proxy_name(role),
        comment: metadata.encode(),
        color: role.color(),
        vertices: mesh.vertex_array(),
        triangles: mesh.triangles,
    })?;
    Ok(id)
}

/// All shapes carrying the proxy marker, valid metadata or not.
pub fn find_marked_proxies<M: HostModel + ?Sized>(model: &M) -> Vec<ShapeElement> {
    model
        .shapes()
        .into_iter()
        .filter(|shape| is_proxy_name(&shape.name))
        .collect()
}

/// Metadata of a proxy, `None` if missing or corrupt.
pub fn extract_metadata(shape: &ShapeElement) -> Option<PlaneMetadata> {
    PlaneMetadata::decode(&shape.comment)
}

/// Live elevation of a proxy, read from its geometry.
pub fn current_elevation(shape: &ShapeElement) -> Option<f64> {
    mean_z(shape.vertices.iter().map(|v| v[2]))
}

/// A recognized proxy with its metadata and live elevation.
#[derive(Debug, Clone, PartialEq)]
pub struct ProxyPlane {
    pub element: ElementId,
    pub metadata: PlaneMetadata,
    pub current_elevation: f64,
}

impl ProxyPlane {
    #[inline]
    pub fn role(&self) -> PlaneRole {
        self.metadata.role
    }

    /// Whether the live geometry left the elevation the proxy was created at.
    pub fn was_moved(&self) -> bool {
        (self.current_elevation - self.metadata.original_elevation).abs() > MOVE_TOLERANCE
    }
}

/// Outcome of reading a set of proxies.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProxyExtraction {
    /// Recognized proxies, at most one per role, in chain order.
    pub planes: Vec<ProxyPlane>,
    /// Proxies without usable metadata or geometry.
    pub skipped: Vec<ElementId>,
    /// Proxies that lost their role to another proxy.
    pub duplicates: Vec<ElementId>,
}

impl ProxyExtraction {
    /// Current elevation per recognized role.
    pub fn elevations(&self) -> PlaneElevations {
        self.planes
            .iter()
            .map(|p| (p.role(), p.current_elevation))
            .collect()
    }

    pub fn plane(&self, role: PlaneRole) -> Option<&ProxyPlane> {
        self.planes.iter().find(|p| p.role() == role)
    }

    pub fn is_empty(&self) -> bool {
        self.planes.is_empty()
    }
}

/// Reads metadata and live elevation from every proxy.
///
/// Unrecognized proxies are skipped rather than reported as errors. For a role
/// with several proxies the first moved one wins, else the first one seen.
pub fn extract_proxies(shapes: &[ShapeElement]) -> ProxyExtraction {
    let mut extraction = ProxyExtraction::default();

    for shape in shapes {
        let (metadata, elevation) = match (extract_metadata(shape), current_elevation(shape)) {
            (Some(m), Some(z)) => (m, z),
            _ => {
                extraction.skipped.push(shape.id);
                continue;
            }
        };

        let candidate = ProxyPlane {
            element: shape.id,
            metadata,
            current_elevation: elevation,
        };

        match extraction
            .planes
            .iter_mut()
            .find(|p| p.role() == candidate.role())
        {
            // A moved copy replaces an untouched proxy for the same role.
            Some(existing) if candidate.was_moved() && !existing.was_moved() => {
                extraction.duplicates.push(existing.element);
                *existing = candidate;
            }
            Some(_) => extraction.duplicates.push(candidate.element),
            None => extraction.planes.push(candidate),
        }
    }

    extraction.planes.sort_by_key(|p| p.role());
    extraction
}

/// Current elevation per role over a set of proxies.
pub fn extract_elevations(shapes: &[ShapeElement]) -> PlaneElevations {
    extract_proxies(shapes).elevations()
}
