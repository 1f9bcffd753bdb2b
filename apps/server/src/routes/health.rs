// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Health check endpoint.

use axum::Json;
use serde::Serialize;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub service: &'static str,
}

/// API information response.
#[derive(Debug, Serialize)]
pub struct ApiInfoResponse {
    pub service: &'static str,
    pub version: &'static str,
    pub description: &'static str,
    pub endpoints: Vec<EndpointInfo>,
}

/// Endpoint information.
#[derive(Debug, Serialize)]
pub struct EndpointInfo {
    pub method: &'static str,
    pub path: &'static str,
    pub description: &'static str,
}

const ENDPOINTS: [(&str, &str, &str); 7] = [
    ("GET", "/api/v1/health", "Health check endpoint"),
    ("POST", "/api/v1/view-range", "Visualize, update, preview or cancel view range planes"),
    ("GET", "/api/v1/views", "Plan views eligible for visualization"),
    ("GET", "/api/v1/views/:id/range", "View range of a plan view with absolute elevations"),
    ("GET", "/api/v1/proxies", "View range planes currently in the model"),
    ("POST", "/api/v1/proxies/:id/move", "Move a view range plane vertically"),
    ("PUT", "/api/v1/active-view", "Change the active view"),
];

/// GET /api/v1/health - Health check endpoint.
pub async fn check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        service: "viewrange-server",
    })
}

/// GET / - API information endpoint.
pub async fn info() -> Json<ApiInfoResponse> {
    Json(ApiInfoResponse {
        service: "viewrange-server",
        version: env!("CARGO_PKG_VERSION"),
        description: "Edit plan view ranges by moving planes in a 3D view",
        endpoints: ENDPOINTS
            .iter()
            .map(|&(method, path, description)| EndpointInfo {
                method,
                path,
                description,
            })
            .collect(),
    })
}
