//! User routes: registration, sign-in, sign-out.
//!
//! All of these are public; registration and sign-in are how a visitor
//! becomes a signed-in user in the first place. Sign-out clears the
//! session unconditionally (a no-op when not signed in).

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use axum::{Extension, Form};
use serde::Deserialize;
use tracing::info;

use quill_core::CredentialError;

use crate::error::AppError;
use crate::middleware::SessionToken;
use crate::pages;
use crate::session::Flash;
use crate::state::AppState;

// ── Request types ────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

// ── Handlers ─────────────────────────────────────────────────────────

/// GET `/users/new`: the registration form.
pub async fn register_form(
    State(state): State<Arc<AppState>>,
    Extension(SessionToken(token)): Extension<SessionToken>,
) -> Response {
    let username = state.sessions.username(&token).await;
    let flash = state.sessions.take_flash(&token).await;
    pages::page(username.as_deref(), &flash, &pages::register_form("")).into_response()
}

/// POST `/users/new`: create a user and sign them in.
pub async fn register(
    State(state): State<Arc<AppState>>,
    Extension(SessionToken(token)): Extension<SessionToken>,
    Form(form): Form<Credentials>,
) -> Result<Response, AppError> {
    let username = form.username;

    // The credential file is a flat `name: hash` mapping, so a name that
    // is blank or contains ':' can never be stored faithfully.
    if username.trim().is_empty() || username.contains(':') {
        return Ok(register_rejected(&username, "Invalid username"));
    }

    match state.credentials.create(&username, &form.password).await {
        Ok(()) => {
            info!(username, "user registered");
            state.sessions.login(&token, &username).await;
            Ok(Redirect::to("/").into_response())
        }
        Err(CredentialError::UsernameTaken { .. }) => Ok(register_rejected(
            &username,
            &format!("{username} already has an account"),
        )),
        Err(e) => Err(e.into()),
    }
}

/// GET `/users/login`: the sign-in form.
pub async fn login_form(
    State(state): State<Arc<AppState>>,
    Extension(SessionToken(token)): Extension<SessionToken>,
) -> Response {
    let username = state.sessions.username(&token).await;
    let flash = state.sessions.take_flash(&token).await;
    pages::page(username.as_deref(), &flash, &pages::login_form("")).into_response()
}

/// POST `/users/login`: verify credentials and open the session.
pub async fn login(
    State(state): State<Arc<AppState>>,
    Extension(SessionToken(token)): Extension<SessionToken>,
    Form(form): Form<Credentials>,
) -> Result<Response, AppError> {
    match state.credentials.verify(&form.username, &form.password).await {
        Ok(()) => {
            // Usernames match case-insensitively, so the session records
            // the lowercased spelling as the canonical one.
            let username = form.username.to_lowercase();
            info!(username, "user signed in");
            state.sessions.login(&token, &username).await;
            state.sessions.flash_success(&token, "Welcome!").await;
            Ok(Redirect::to("/").into_response())
        }
        Err(CredentialError::InvalidCredentials) => {
            let content = pages::login_form(&form.username);
            let body = pages::page(None, &Flash::error("Invalid credentials"), &content);
            Ok((StatusCode::UNPROCESSABLE_ENTITY, body).into_response())
        }
        Err(e) => Err(e.into()),
    }
}

/// POST `/users/logout`: close the session.
pub async fn logout(
    State(state): State<Arc<AppState>>,
    Extension(SessionToken(token)): Extension<SessionToken>,
) -> Response {
    state.sessions.logout(&token).await;
    state
        .sessions
        .flash_success(&token, "You have been signed out")
        .await;
    Redirect::to("/").into_response()
}

// ── Helpers ──────────────────────────────────────────────────────────

/// Re-render the registration form with an inline error at 422.
fn register_rejected(username: &str, error: &str) -> Response {
    let content = pages::register_form(username);
    let body = pages::page(None, &Flash::error(error), &content);
    (StatusCode::UNPROCESSABLE_ENTITY, body).into_response()
}
