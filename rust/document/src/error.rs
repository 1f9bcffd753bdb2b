// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for document loading and authoring.

/// Result type alias for document operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or loading a document.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A snapshot references a level name that is not defined.
    #[error("unknown level: {0:?}")]
    UnknownLevel(String),

    /// A snapshot references a view name that is not defined.
    #[error("unknown view: {0:?}")]
    UnknownView(String),

    /// Two levels or two views share a name.
    #[error("duplicate name: {0:?}")]
    DuplicateName(String),

    /// Host-level failure while applying a snapshot.
    #[error(transparent)]
    Host(#[from] viewrange_core::Error),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
