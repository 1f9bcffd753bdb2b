// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for host model access.

use crate::ids::ElementId;

/// Result type alias for host model operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the host model or the coordinate service.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A level referenced by a view range does not exist.
    #[error("reference not found: level {0}")]
    LevelNotFound(ElementId),

    /// A view id does not resolve to a view.
    #[error("view not found: {0}")]
    ViewNotFound(ElementId),

    /// The view exists but has no view range (not a plan view).
    #[error("view {0} has no view range")]
    NoViewRange(ElementId),

    /// Any element id that does not resolve.
    #[error("element not found: {0}")]
    ElementNotFound(ElementId),

    /// The host refused a modification.
    #[error("host rejected the change: {0}")]
    Rejected(String),

    /// A modification was attempted outside a transaction.
    #[error("modification requires an open transaction")]
    NoTransaction,

    /// A transaction was started while another one is open.
    #[error("transaction '{0}' is already open")]
    TransactionOpen(String),

    /// An element id string could not be parsed.
    #[error("invalid element id: {0:?}")]
    InvalidElementId(String),
}
