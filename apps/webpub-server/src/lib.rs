//! Web publication server library
//!
//! Serves EPUB archives over HTTP as a JSON publication manifest plus
//! the assets packed inside them. The binary in main.rs wires this into
//! a listener; integration tests drive [`app`] directly.
//!
//! # Modules
//!
//! - `epub`: archive access, container/package parsing, manifest projection
//! - `mediatype`: registry of known media types
//! - `routes`: HTTP handlers

pub mod config;
pub mod epub;
pub mod error;
pub mod html;
pub mod mediatype;
pub mod routes;
pub mod state;

use std::time::Duration;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use state::AppState;

/// Per-request time limit
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Build the full application.
///
/// Files under the public directory are served first; requests that match
/// no file fall through to the publication routes.
pub fn app(state: AppState) -> Router {
    let public_dir = state.config().library.public_dir.clone();

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let routes = Router::new()
        .merge(routes::health::router())
        .merge(routes::publication::router())
        .fallback(routes::not_found)
        .with_state(state);

    Router::new()
        .fallback_service(ServeDir::new(public_dir).fallback(routes))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(REQUEST_TIMEOUT))
        .layer(cors)
}
