// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Host element identifiers.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Opaque identifier of an element in the host model.
///
/// Callers pass ids as decimal strings; the host hands them out as integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ElementId(pub u64);

impl ElementId {
    /// Returns the raw integer value.
    #[inline]
    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ElementId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u64>()
            .map(ElementId)
            .map_err(|_| Error::InvalidElementId(s.to_owned()))
    }
}

impl From<u64> for ElementId {
    fn from(value: u64) -> Self {
        ElementId(value)
    }
}
