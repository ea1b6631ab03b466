//! HTTP error type for the Quill server.
//!
//! Validation and not-found outcomes are part of the normal page flow
//! (inline 422 or flash + redirect) and are handled in the route
//! handlers. This type covers the two cases that short-circuit a handler
//! via `?`: the authorization gate, and the generic failure path where
//! storage I/O or password hashing breaks. No request error is ever
//! fatal to the process.

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use tracing::error;

use quill_core::{CredentialError, DocumentError};

/// Application-level error returned from HTTP handlers.
#[derive(Debug)]
pub enum AppError {
    /// A mutating route was hit without a session. The gate flash is
    /// already set by the time this is constructed; the response is the
    /// bounce to the listing.
    SignInRequired,
    /// Internal server error (storage I/O, hashing).
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            Self::SignInRequired => Redirect::to("/").into_response(),
            Self::Internal(message) => {
                error!(message, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Html("<h1>Something went wrong</h1>".to_owned()),
                )
                    .into_response()
            }
        }
    }
}

impl From<DocumentError> for AppError {
    fn from(err: DocumentError) -> Self {
        // NotFound and InvalidName are intercepted by handlers before
        // reaching this conversion; anything left is an I/O failure.
        Self::Internal(err.to_string())
    }
}

impl From<CredentialError> for AppError {
    fn from(err: CredentialError) -> Self {
        Self::Internal(err.to_string())
    }
}
