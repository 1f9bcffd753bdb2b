// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Request types for the API.

use serde::Deserialize;

/// Vertical drag of a view range plane.
#[derive(Debug, Clone, Deserialize)]
pub struct MoveProxyRequest {
    /// Signed distance in model units; positive is up.
    pub offset: f64,
}

/// Switches the view the operator is looking at.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveViewRequest {
    pub view_id: String,
}
