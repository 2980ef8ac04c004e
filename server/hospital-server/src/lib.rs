//! Hospital Engine Server - appointment booking API
//!
//! Patients book appointments with doctors; each side sees only its own
//! bookings. This library holds the HTTP surface: bearer-token
//! authentication, the appointment access policy, handlers, routes and the
//! OpenAPI document. The binary in `main.rs` wires it to configuration and a
//! listener.

pub mod auth;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod server;
pub mod services;
pub mod validation;

// Re-export commonly used types
pub use error::*;
pub use server::AppState;

use axum::{middleware::from_fn, Router};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

/// Create the main application router with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    let timeout = Duration::from_secs(state.settings.server.request_timeout_secs);
    let cors = middleware::create_cors_layer(&state.settings.server);

    routes::create_routes()
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors)
                .layer(from_fn(middleware::request_timing_middleware))
                .layer(TimeoutLayer::new(timeout)),
        )
        .with_state(state)
}
