//! View-Range Proxy Geometry
//!
//! Builds the flat, colored proxy surfaces that make view-range planes
//! visible, reads them back, and checks plane ordering. Triangulation uses
//! earcutr, points use nalgebra.

pub mod boundary;
pub mod error;
pub mod hierarchy;
pub mod mesh;
pub mod proxy;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point2, Point3};

pub use boundary::CropBoundary;
pub use error::{Error, Result};
pub use hierarchy::{validate_hierarchy, HierarchyViolation, ORDER_TOLERANCE};
pub use mesh::{triangulate_outline, PlaneMesh};
pub use proxy::{
    create_proxy, current_elevation, extract_elevations, extract_metadata, extract_proxies,
    find_marked_proxies, ProxyExtraction, ProxyPlane,
};
