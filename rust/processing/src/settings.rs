// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Tunables for the view-range pipeline.

/// Movements smaller than this (in model length units) count as unchanged.
pub const DEFAULT_MOVEMENT_EPSILON: f64 = 0.001;

/// Pipeline settings.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Absorbs floating-point noise from the host's geometry kernel.
    pub movement_epsilon: f64,
}

impl Settings {
    pub fn with_movement_epsilon(mut self, epsilon: f64) -> Self {
        self.movement_epsilon = epsilon.abs();
        self
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            movement_epsilon: DEFAULT_MOVEMENT_EPSILON,
        }
    }
}
