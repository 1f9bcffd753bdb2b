// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # View-Range Core
//!
//! Domain types and host contract for plan-view range editing.
//!
//! A plan view shows the slice of the model between four planes (Top, Cut,
//! Bottom, View Depth), each stored as an offset from a reference level. This
//! crate provides:
//!
//! - **Domain types**: [`PlaneRole`], [`RangeConfiguration`], [`PlaneElevations`]
//! - **Host contract**: [`HostModel`], passed explicitly through [`HostContext`]
//! - **Units of work**: [`with_transaction`]
//! - **Coordinate service**: offset/elevation conversions in [`coordinates`]
//! - **Proxy metadata**: the versioned text codec in [`metadata`], parsed with
//!   [nom](https://docs.rs/nom)
//!
//! ## Quick Start
//!
//! ```rust
//! use viewrange_core::{ElementId, PlaneMetadata, PlaneRole};
//!
//! let meta = PlaneMetadata {
//!     role: PlaneRole::Cut,
//!     original_elevation: 4.0,
//!     source_view: ElementId(7),
//!     source_level_name: "Level 1".to_string(),
//! };
//! let text = meta.encode();
//! assert_eq!(PlaneMetadata::decode(&text), Some(meta));
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: derive `Serialize`/`Deserialize` on the domain types

pub mod coordinates;
pub mod error;
pub mod host;
pub mod ids;
pub mod metadata;
pub mod model;
pub mod role;
pub mod transaction;

pub use coordinates::{
    absolute_elevation, absolute_elevations, level_offset, plane_elevation, read_configuration,
    resolve_level, write_configuration,
};
pub use error::{Error, Result};
pub use host::{HostContext, HostModel};
pub use ids::ElementId;
pub use metadata::{is_proxy_name, proxy_name, PlaneMetadata, PROXY_NAME_PREFIX};
pub use model::{
    Level, PlaneSetting, RangeConfiguration, ShapeElement, ShapeSpec, ViewInfo, ViewKind,
};
pub use role::{PlaneElevations, PlaneRole, ProxyColor};
pub use transaction::with_transaction;
