//! Document routes: listing, viewing, and CRUD.
//!
//! Mutating routes are gated on a signed-in session; the gate flashes
//! "You must be signed in to do that" and bounces to the listing without
//! touching storage. Validation failures re-render the originating form
//! inline with HTTP 422.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Redirect, Response};
use axum::{Extension, Form};
use serde::Deserialize;
use tracing::info;

use quill_core::{render, DocumentError, DocumentStore, RenderMode};

use crate::error::AppError;
use crate::middleware::SessionToken;
use crate::pages;
use crate::session::Flash;
use crate::state::AppState;

/// Flash shown when a mutating route is hit without a session.
const SIGN_IN_REQUIRED: &str = "You must be signed in to do that";

// ── Request types ────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CreateDocument {
    pub filename: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateDocument {
    pub content: String,
}

// ── Handlers ─────────────────────────────────────────────────────────

/// GET `/`: the public document listing.
pub async fn index(
    State(state): State<Arc<AppState>>,
    Extension(SessionToken(token)): Extension<SessionToken>,
) -> Result<Response, AppError> {
    let files = state.documents.list().await?;
    let username = state.sessions.username(&token).await;
    let flash = state.sessions.take_flash(&token).await;

    let content = pages::listing(&files, username.is_some());
    Ok(pages::page(username.as_deref(), &flash, &content).into_response())
}

/// GET `/new`: the new-document form.
pub async fn new_form(
    State(state): State<Arc<AppState>>,
    Extension(SessionToken(token)): Extension<SessionToken>,
) -> Result<Response, AppError> {
    let username = require_signed_in(&state, &token).await?;
    let flash = state.sessions.take_flash(&token).await;

    let content = pages::new_document_form("");
    Ok(pages::page(Some(&username), &flash, &content).into_response())
}

/// POST `/new`: create an empty document.
pub async fn create(
    State(state): State<Arc<AppState>>,
    Extension(SessionToken(token)): Extension<SessionToken>,
    Form(form): Form<CreateDocument>,
) -> Result<Response, AppError> {
    let username = require_signed_in(&state, &token).await?;
    let name = form.filename;

    if let Err(DocumentError::InvalidName { reason }) = DocumentStore::validate_new_name(&name) {
        let content = pages::new_document_form(&name);
        let body = pages::page(Some(&username), &Flash::error(reason), &content);
        return Ok((StatusCode::UNPROCESSABLE_ENTITY, body).into_response());
    }

    state.documents.write(&name, "").await?;
    info!(name, user = username, "document created");

    state
        .sessions
        .flash_success(&token, &format!("{name} was created"))
        .await;
    Ok(Redirect::to("/").into_response())
}

/// GET `/{name}`: view a document.
///
/// `.md` renders to HTML inside the page shell; `.txt` streams verbatim
/// as `text/plain`; anything else is treated as nonexistent.
pub async fn show(
    State(state): State<Arc<AppState>>,
    Extension(SessionToken(token)): Extension<SessionToken>,
    Path(name): Path<String>,
) -> Result<Response, AppError> {
    let mode = RenderMode::for_name(&name);

    let content = match mode {
        Some(_) => match state.documents.read(&name).await {
            Ok(content) => content,
            Err(DocumentError::NotFound { .. }) => {
                return Ok(missing_document(&state, &token, &name).await);
            }
            Err(e) => return Err(e.into()),
        },
        // Unsupported extension (or none): same flash as a missing file.
        None => return Ok(missing_document(&state, &token, &name).await),
    };

    match mode {
        Some(RenderMode::Plain) => Ok((
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            content,
        )
            .into_response()),
        _ => {
            let username = state.sessions.username(&token).await;
            let flash = state.sessions.take_flash(&token).await;
            let fragment = render::markdown_to_html(&content);
            let body = pages::document(&fragment);
            Ok(pages::page(username.as_deref(), &flash, &body).into_response())
        }
    }
}

/// GET `/{name}/edit`: the edit form with current content.
pub async fn edit_form(
    State(state): State<Arc<AppState>>,
    Extension(SessionToken(token)): Extension<SessionToken>,
    Path(name): Path<String>,
) -> Result<Response, AppError> {
    let username = require_signed_in(&state, &token).await?;

    let content = match state.documents.read(&name).await {
        Ok(content) => content,
        Err(DocumentError::NotFound { .. }) => {
            return Ok(missing_document(&state, &token, &name).await);
        }
        Err(e) => return Err(e.into()),
    };

    let flash = state.sessions.take_flash(&token).await;
    let body = pages::edit_form(&name, &content);
    Ok(pages::page(Some(&username), &flash, &body).into_response())
}

/// POST `/{name}`: overwrite a document's content.
pub async fn update(
    State(state): State<Arc<AppState>>,
    Extension(SessionToken(token)): Extension<SessionToken>,
    Path(name): Path<String>,
    Form(form): Form<UpdateDocument>,
) -> Result<Response, AppError> {
    let username = require_signed_in(&state, &token).await?;

    // A name that never resolves (percent-encoded traversal) reads as
    // missing, not as a server fault.
    match state.documents.write(&name, &form.content).await {
        Ok(()) => {}
        Err(DocumentError::NotFound { .. }) => {
            return Ok(missing_document(&state, &token, &name).await);
        }
        Err(e) => return Err(e.into()),
    }
    info!(name, user = username, "document updated");

    state
        .sessions
        .flash_success(&token, &format!("{name} has been updated"))
        .await;
    Ok(Redirect::to("/").into_response())
}

/// POST `/{name}/delete`: remove a document.
///
/// A missing file is accepted silently: the outcome the user asked for
/// already holds.
pub async fn delete(
    State(state): State<Arc<AppState>>,
    Extension(SessionToken(token)): Extension<SessionToken>,
    Path(name): Path<String>,
) -> Result<Response, AppError> {
    let username = require_signed_in(&state, &token).await?;

    match state.documents.delete(&name).await {
        Ok(()) | Err(DocumentError::NotFound { .. }) => {}
        Err(e) => return Err(e.into()),
    }
    info!(name, user = username, "document deleted");

    state
        .sessions
        .flash_success(&token, &format!("{name} has been deleted"))
        .await;
    Ok(Redirect::to("/").into_response())
}

/// POST `/{name}/duplicate`: copy a document to `copy_of_<name>`.
pub async fn duplicate(
    State(state): State<Arc<AppState>>,
    Extension(SessionToken(token)): Extension<SessionToken>,
    Path(name): Path<String>,
) -> Result<Response, AppError> {
    let username = require_signed_in(&state, &token).await?;

    match state.documents.duplicate(&name).await {
        Ok(copy) => {
            info!(name, copy, user = username, "document duplicated");
        }
        Err(DocumentError::NotFound { .. }) => {
            return Ok(missing_document(&state, &token, &name).await);
        }
        Err(e) => return Err(e.into()),
    }

    state
        .sessions
        .flash_success(&token, &format!("{name} has been duplicated"))
        .await;
    Ok(Redirect::to("/").into_response())
}

// ── Helpers ──────────────────────────────────────────────────────────

/// Resolve the signed-in username, or short-circuit with the gate
/// redirect. The requested mutation never runs when this fails.
pub(crate) async fn require_signed_in(state: &AppState, token: &str) -> Result<String, AppError> {
    match state.sessions.username(token).await {
        Some(username) => Ok(username),
        None => {
            state.sessions.flash_error(token, SIGN_IN_REQUIRED).await;
            Err(AppError::SignInRequired)
        }
    }
}

/// Flash `"<name> does not exist."` and bounce to the listing.
async fn missing_document(state: &AppState, token: &str, name: &str) -> Response {
    state
        .sessions
        .flash_error(token, &format!("{name} does not exist."))
        .await;
    Redirect::to("/").into_response()
}
