// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! View-Range Server - dispatcher for the two-phase view-range command.
//!
//! The server holds one model in memory and exposes the command that lets an
//! operator edit a plan view's range by dragging planes in a 3D view.
//!
//! # Endpoints
//!
//! - `GET /api/v1/health` - Health check
//! - `POST /api/v1/view-range` - Visualize, update, preview or cancel
//! - `GET /api/v1/views` - Eligible plan views
//! - `GET /api/v1/views/:id/range` - Stored view range of a plan view
//! - `GET /api/v1/proxies` - View range planes in the model
//! - `POST /api/v1/proxies/:id/move` - Drag a plane vertically
//! - `PUT /api/v1/active-view` - Switch the active view

use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, post, put},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

mod config;
mod error;
mod routes;
mod services;
mod types;

use config::Config;
use services::Session;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub session: Arc<Session>,
    pub config: Arc<Config>,
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.iter().any(|o| o == "*") {
        return CorsLayer::permissive();
    }
    let origins: Vec<HeaderValue> = origins.iter().filter_map(|o| o.parse().ok()).collect();
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::PUT])
        .allow_headers([header::CONTENT_TYPE])
}

/// Request timeout, tracing and CORS, applied to every route.
fn with_middleware(router: Router<AppState>, config: &Config) -> Router<AppState> {
    router
        .layer(TimeoutLayer::new(Duration::from_secs(config.request_timeout_secs)))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config.cors_origins))
}

/// Builds the router with all routes and middleware.
pub fn app(state: AppState) -> Router {
    let router = Router::new()
        // Root endpoint - API information
        .route("/", get(routes::health::info))
        // Health check
        .route("/api/v1/health", get(routes::health::check))
        // The command
        .route("/api/v1/view-range", post(routes::view_range::execute))
        // Model access
        .route("/api/v1/views", get(routes::model::list_views))
        .route("/api/v1/views/:id/range", get(routes::model::view_range))
        .route("/api/v1/proxies", get(routes::model::list_proxies))
        .route("/api/v1/proxies/:id/move", post(routes::model::move_proxy))
        .route("/api/v1/active-view", put(routes::model::set_active_view));

    let config = Arc::clone(&state.config);
    with_middleware(router, &config).with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "info,tower_http=debug,viewrange_server=debug".into()),
        )
        .pretty()
        .init();

    let config = Config::from_env();

    tracing::info!(
        port = config.port,
        model = ?config.model_path,
        request_timeout_secs = config.request_timeout_secs,
        movement_epsilon = config.movement_epsilon,
        "Starting View-Range Server"
    );

    let session = Arc::new(Session::load(&config)?);
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));

    let state = AppState {
        session,
        config: Arc::new(config),
    };

    tracing::info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app(state)).await?;
    Ok(())
}
