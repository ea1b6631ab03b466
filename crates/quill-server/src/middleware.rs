//! Session middleware for the Quill server.
//!
//! Ensures every request carries a session token: an existing
//! `quill_session` cookie is reused, otherwise a fresh token is issued
//! and set on the response. The token is injected into the request
//! extensions for handlers to read session state with.

use axum::extract::Request;
use axum::http::header::{COOKIE, SET_COOKIE};
use axum::http::HeaderValue;
use axum::middleware::Next;
use axum::response::Response;

use crate::session::{SessionStore, SESSION_COOKIE};

/// Session token injected into request extensions.
#[derive(Debug, Clone)]
pub struct SessionToken(pub String);

/// Middleware that resolves or issues the session cookie.
pub async fn session_middleware(mut req: Request, next: Next) -> Response {
    let existing = req
        .headers()
        .get(COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(cookie_token);

    let (token, fresh) = match existing {
        Some(token) => (token, false),
        None => (SessionStore::issue_token(), true),
    };

    req.extensions_mut().insert(SessionToken(token.clone()));
    let mut response = next.run(req).await;

    if fresh {
        // Token is base64url, so the header value is always valid.
        if let Ok(value) = HeaderValue::from_str(&format!(
            "{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax"
        )) {
            response.headers_mut().append(SET_COOKIE, value);
        }
    }

    response
}

/// Extract the session token from a `Cookie` header value.
fn cookie_token(header: &str) -> Option<String> {
    header.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        (name == SESSION_COOKIE).then(|| value.to_owned())
    })
}
