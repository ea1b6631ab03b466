//! Cookie-bound session store.
//!
//! Each client is identified by a random 256-bit token carried in the
//! `quill_session` cookie; the session fields themselves live server-side
//! in an in-memory map. A session holds at most three fields: the
//! signed-in username and one-shot `error`/`success` flash messages.
//!
//! Flash semantics: a flash is set on one response and consumed by the
//! next page render. [`SessionStore::take_flash`] reads and clears both
//! fields in one call, so a flash can never be displayed twice.

use std::collections::HashMap;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use rand::rngs::OsRng;
use rand::RngCore;
use tokio::sync::RwLock;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "quill_session";

/// Per-client session fields.
#[derive(Debug, Default, Clone)]
struct Session {
    username: Option<String>,
    error: Option<String>,
    success: Option<String>,
}

/// One-shot flash messages consumed by a single page render.
#[derive(Debug, Default, Clone)]
pub struct Flash {
    pub error: Option<String>,
    pub success: Option<String>,
}

impl Flash {
    /// A flash carrying only an error, for inline 422 form re-renders.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            success: None,
        }
    }
}

/// In-memory session map keyed by cookie token.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: RwLock<HashMap<String, Session>>,
}

impl SessionStore {
    /// Create an empty session store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Generate a fresh session token: 32 bytes of OS randomness,
    /// URL-safe base64 without padding.
    #[must_use]
    pub fn issue_token() -> String {
        let mut bytes = [0u8; 32];
        OsRng.fill_bytes(&mut bytes);
        URL_SAFE_NO_PAD.encode(bytes)
    }

    /// The signed-in username for this session, if any.
    pub async fn username(&self, token: &str) -> Option<String> {
        let sessions = self.sessions.read().await;
        sessions.get(token).and_then(|s| s.username.clone())
    }

    /// Record a successful sign-in.
    pub async fn login(&self, token: &str, username: &str) {
        let mut sessions = self.sessions.write().await;
        sessions.entry(token.to_owned()).or_default().username = Some(username.to_owned());
    }

    /// Clear the signed-in username. A no-op when not signed in.
    ///
    /// A session left with no username and no pending flash is dropped
    /// from the map entirely.
    pub async fn logout(&self, token: &str) {
        let mut sessions = self.sessions.write().await;
        if let Some(session) = sessions.get_mut(token) {
            session.username = None;
            if session.error.is_none() && session.success.is_none() {
                sessions.remove(token);
            }
        }
    }

    /// Set the one-shot error flash for the next page render.
    pub async fn flash_error(&self, token: &str, message: &str) {
        let mut sessions = self.sessions.write().await;
        sessions.entry(token.to_owned()).or_default().error = Some(message.to_owned());
    }

    /// Set the one-shot success flash for the next page render.
    pub async fn flash_success(&self, token: &str, message: &str) {
        let mut sessions = self.sessions.write().await;
        sessions.entry(token.to_owned()).or_default().success = Some(message.to_owned());
    }

    /// Read and clear both flash fields.
    ///
    /// Draining the flash of an anonymous session empties it, so the
    /// entry is removed rather than left to accumulate.
    pub async fn take_flash(&self, token: &str) -> Flash {
        let mut sessions = self.sessions.write().await;
        let Some(session) = sessions.get_mut(token) else {
            return Flash::default();
        };

        let flash = Flash {
            error: session.error.take(),
            success: session.success.take(),
        };
        if session.username.is_none() {
            sessions.remove(token);
        }
        flash
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_are_unique_and_url_safe() {
        let a = SessionStore::issue_token();
        let b = SessionStore::issue_token();
        assert_ne!(a, b);
        assert!(a.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
    }

    #[tokio::test]
    async fn login_logout_cycle() {
        let store = SessionStore::new();
        let token = SessionStore::issue_token();

        assert_eq!(store.username(&token).await, None);

        store.login(&token, "admin").await;
        assert_eq!(store.username(&token).await, Some("admin".to_owned()));

        store.logout(&token).await;
        assert_eq!(store.username(&token).await, None);
    }

    #[tokio::test]
    async fn flash_is_consumed_exactly_once() {
        let store = SessionStore::new();
        let token = SessionStore::issue_token();

        store.flash_error(&token, "oops").await;
        store.flash_success(&token, "done").await;

        let flash = store.take_flash(&token).await;
        assert_eq!(flash.error.as_deref(), Some("oops"));
        assert_eq!(flash.success.as_deref(), Some("done"));

        let again = store.take_flash(&token).await;
        assert!(again.error.is_none());
        assert!(again.success.is_none());
    }

    #[tokio::test]
    async fn taking_flash_preserves_login() {
        let store = SessionStore::new();
        let token = SessionStore::issue_token();

        store.login(&token, "admin").await;
        store.flash_success(&token, "Welcome!").await;
        store.take_flash(&token).await;

        assert_eq!(store.username(&token).await, Some("admin".to_owned()));
    }

    #[tokio::test]
    async fn anonymous_session_is_dropped_once_flash_drains() {
        let store = SessionStore::new();
        let token = SessionStore::issue_token();

        // The shape of a gate bounce: flash set, never signed in.
        store.flash_error(&token, "You must be signed in to do that").await;
        assert_eq!(store.sessions.read().await.len(), 1);

        let flash = store.take_flash(&token).await;
        assert!(flash.error.is_some());
        assert!(store.sessions.read().await.is_empty());
    }

    #[tokio::test]
    async fn logout_drops_session_without_pending_flash() {
        let store = SessionStore::new();
        let token = SessionStore::issue_token();

        store.login(&token, "admin").await;
        store.logout(&token).await;

        assert!(store.sessions.read().await.is_empty());
    }

    #[tokio::test]
    async fn logout_keeps_session_while_flash_is_pending() {
        let store = SessionStore::new();
        let token = SessionStore::issue_token();

        store.login(&token, "admin").await;
        store.flash_success(&token, "You have been signed out").await;
        store.logout(&token).await;

        let flash = store.take_flash(&token).await;
        assert_eq!(flash.success.as_deref(), Some("You have been signed out"));
        assert!(store.sessions.read().await.is_empty());
    }

    #[tokio::test]
    async fn sessions_are_isolated_by_token() {
        let store = SessionStore::new();
        let a = SessionStore::issue_token();
        let b = SessionStore::issue_token();

        store.login(&a, "admin").await;
        store.flash_error(&a, "only for a").await;

        assert_eq!(store.username(&b).await, None);
        assert!(store.take_flash(&b).await.error.is_none());
    }
}
