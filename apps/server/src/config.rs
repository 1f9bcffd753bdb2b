// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Server configuration loaded from environment variables.

use std::path::PathBuf;

use viewrange_processing::DEFAULT_MOVEMENT_EPSILON;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Port to listen on.
    pub port: u16,
    /// JSON document snapshot to load. The built-in demo model is used when unset.
    pub model_path: Option<PathBuf>,
    /// Request timeout in seconds.
    pub request_timeout_secs: u64,
    /// Plane movements below this distance are reported as unchanged.
    pub movement_epsilon: f64,
    /// Allowed CORS origins (comma-separated, or "*" for all in development).
    pub cors_origins: Vec<String>,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            port: var("PORT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(8080),
            model_path: var("MODEL_PATH")
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from),
            request_timeout_secs: var("REQUEST_TIMEOUT_SECS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
            movement_epsilon: var("MOVEMENT_EPSILON")
                .and_then(|v| v.parse::<f64>().ok())
                .filter(|e| e.is_finite() && *e >= 0.0)
                .unwrap_or(DEFAULT_MOVEMENT_EPSILON),
            cors_origins: var("CORS_ORIGINS")
                .unwrap_or_else(|| {
                    // Default: allow common development origins
                    "http://localhost:3000,http://localhost:5173,http://127.0.0.1:3000,http://127.0.0.1:5173".into()
                })
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}
