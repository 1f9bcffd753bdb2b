// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Vertical ordering of view-range planes.
//!
//! Top ≥ Cut ≥ Bottom ≥ View Depth must hold over whichever planes are
//! present. The chain is total, so checking each pair of neighbouring present
//! planes covers every pair.

use viewrange_core::{PlaneElevations, PlaneRole};

/// Slack for floating-point noise when comparing elevations.
pub const ORDER_TOLERANCE: f64 = 1e-9;

/// Two planes in the wrong vertical order.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{upper} plane ({upper_elevation:.3}) is below {lower} plane ({lower_elevation:.3})")]
pub struct HierarchyViolation {
    pub upper: PlaneRole,
    pub upper_elevation: f64,
    pub lower: PlaneRole,
    pub lower_elevation: f64,
}

/// Checks plane ordering; absent planes are not checked.
pub fn validate_hierarchy(elevations: &PlaneElevations) -> Result<(), HierarchyViolation> {
    let present: Vec<(PlaneRole, f64)> = elevations.iter().collect();

    for pair in present.windows(2) {
        let (upper, upper_elevation) = pair[0];
        let (lower, lower_elevation) = pair[1];
        if upper_elevation < lower_elevation - ORDER_TOLERANCE {
            return Err(HierarchyViolation {
                upper,
                upper_elevation,
                lower,
                lower_elevation,
            });
        }
    }

    Ok(())
}
