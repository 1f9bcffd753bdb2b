// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The four planes of a view range and their per-plane attributes.

use std::fmt;

/// One of the four planes bounding a plan view's visible slice.
///
/// Declaration order is the vertical chain order: each plane must sit at or
/// above the next one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PlaneRole {
    Top = 0,
    Cut = 1,
    Bottom = 2,
    ViewDepth = 3,
}

impl PlaneRole {
    /// All roles, top to bottom.
    pub const ALL: [PlaneRole; 4] = [
        PlaneRole::Top,
        PlaneRole::Cut,
        PlaneRole::Bottom,
        PlaneRole::ViewDepth,
    ];

    /// Index of this role in chain order.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Human-readable name used in reports.
    pub fn display_name(self) -> &'static str {
        match self {
            PlaneRole::Top => "Top",
            PlaneRole::Cut => "Cut",
            PlaneRole::Bottom => "Bottom",
            PlaneRole::ViewDepth => "View Depth",
        }
    }

    /// Stable key used in proxy names and metadata.
    pub fn key(self) -> &'static str {
        match self {
            PlaneRole::Top => "top",
            PlaneRole::Cut => "cut",
            PlaneRole::Bottom => "bottom",
            PlaneRole::ViewDepth => "view_depth",
        }
    }

    /// Parses a metadata key back into a role.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "top" => Some(PlaneRole::Top),
            "cut" => Some(PlaneRole::Cut),
            "bottom" => Some(PlaneRole::Bottom),
            "view_depth" => Some(PlaneRole::ViewDepth),
            _ => None,
        }
    }

    /// Fixed proxy color for this role.
    pub fn color(self) -> ProxyColor {
        match self {
            PlaneRole::Top => ProxyColor::RED,
            PlaneRole::Cut => ProxyColor::GREEN,
            PlaneRole::Bottom => ProxyColor::BLUE,
            PlaneRole::ViewDepth => ProxyColor::ORANGE,
        }
    }
}

impl fmt::Display for PlaneRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// RGB color applied to a proxy shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProxyColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl ProxyColor {
    pub const RED: ProxyColor = ProxyColor::new(255, 0, 0);
    pub const GREEN: ProxyColor = ProxyColor::new(0, 255, 0);
    pub const BLUE: ProxyColor = ProxyColor::new(0, 0, 255);
    pub const ORANGE: ProxyColor = ProxyColor::new(255, 165, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Color name for the role palette, hex notation otherwise.
    pub fn name(&self) -> String {
        match *self {
            ProxyColor::RED => "Red".to_string(),
            ProxyColor::GREEN => "Green".to_string(),
            ProxyColor::BLUE => "Blue".to_string(),
            ProxyColor::ORANGE => "Orange".to_string(),
            ProxyColor { r, g, b } => format!("#{:02X}{:02X}{:02X}", r, g, b),
        }
    }
}

/// Absolute elevation per role; any subset of roles may be present.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PlaneElevations {
    values: [Option<f64>; 4],
}

impl PlaneElevations {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn get(&self, role: PlaneRole) -> Option<f64> {
        self.values[role.index()]
    }

    #[inline]
    pub fn set(&mut self, role: PlaneRole, elevation: f64) {
        self.values[role.index()] = Some(elevation);
    }

    #[inline]
    pub fn contains(&self, role: PlaneRole) -> bool {
        self.values[role.index()].is_some()
    }

    /// Present roles with their elevations, in chain order.
    pub fn iter(&self) -> impl Iterator<Item = (PlaneRole, f64)> + '_ {
        PlaneRole::ALL
            .iter()
            .filter_map(move |&role| self.get(role).map(|z| (role, z)))
    }

    pub fn len(&self) -> usize {
        self.values.iter().filter(|v| v.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Copies every role present in `other` but missing here.
    pub fn fill_missing_from(&mut self, other: &PlaneElevations) {
        for (role, z) in other.iter() {
            if !self.contains(role) {
                self.set(role, z);
            }
        }
    }
}

impl FromIterator<(PlaneRole, f64)> for PlaneElevations {
    fn from_iter<I: IntoIterator<Item = (PlaneRole, f64)>>(iter: I) -> Self {
        let mut elevations = PlaneElevations::new();
        for (role, z) in iter {
            elevations.set(role, z);
        }
        elevations
    }
}
