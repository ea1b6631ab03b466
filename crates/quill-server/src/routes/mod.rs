//! HTTP route table for the Quill server.
//!
//! Static routes (`/new`, `/users/*`) take precedence over the
//! `/{name}` document captures, so a document can never shadow an
//! application page.

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;

use crate::state::AppState;

pub mod documents;
pub mod users;

/// Build the full route table.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(documents::index))
        .route("/new", get(documents::new_form).post(documents::create))
        .route("/users/new", get(users::register_form).post(users::register))
        .route("/users/login", get(users::login_form).post(users::login))
        .route("/users/logout", post(users::logout))
        .route("/{name}", get(documents::show).post(documents::update))
        .route("/{name}/edit", get(documents::edit_form))
        .route("/{name}/delete", post(documents::delete))
        .route("/{name}/duplicate", post(documents::duplicate))
}
