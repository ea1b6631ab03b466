//! Quill HTTP server.
//!
//! Wires the core library into an Axum application: server-rendered
//! pages at `/`, document CRUD under `/{name}`, and user routes under
//! `/users/*`. Every request passes through the session middleware,
//! which resolves or issues the `quill_session` cookie.

use std::sync::Arc;

use axum::middleware as axum_mw;
use axum::Router;

pub mod config;
pub mod error;
pub mod middleware;
pub mod pages;
pub mod routes;
pub mod session;
pub mod state;

use state::AppState;

/// Build the application router with the session middleware applied.
///
/// Kept separate from `main` so integration tests can drive the exact
/// router the binary serves.
pub fn app(state: Arc<AppState>) -> Router {
    routes::router()
        .layer(axum_mw::from_fn(middleware::session_middleware))
        .with_state(state)
}
