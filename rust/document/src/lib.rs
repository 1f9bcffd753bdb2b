// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # View-Range Document
//!
//! An in-memory host model implementing [`viewrange_core::HostModel`].
//!
//! The [`Document`] is the central owner of levels, views and generic shapes.
//! It behaves like a host where it matters to the view-range services:
//! mutations need a transaction, rollback restores the exact prior state, and
//! view-range writes are validated and rejected atomically. Documents load
//! from and save to JSON snapshots that reference elements by name.

pub mod document;
pub mod error;
pub mod host;
pub mod serialization;

pub use document::{Document, NewView};
pub use error::{Error, Result};
pub use serialization::{
    DocumentSnapshot, LevelSnapshot, PlaneSnapshot, RangeSnapshot, ShapeSnapshot, ViewSnapshot,
};
