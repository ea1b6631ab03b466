//! Shared application state for the Quill server.
//!
//! A single [`AppState`] is constructed at startup and shared across all
//! Axum handlers via `Arc`. It holds the document store, the credential
//! store, and the in-memory session map.

use quill_core::{CredentialStore, DocumentStore};

use crate::config::ServerConfig;
use crate::session::SessionStore;

/// Shared application state passed to all HTTP handlers.
#[derive(Debug)]
pub struct AppState {
    /// Flat-file document CRUD.
    pub documents: DocumentStore,
    /// Username → password-hash mapping.
    pub credentials: CredentialStore,
    /// Cookie-bound sessions and flash messages.
    pub sessions: SessionStore,
}

impl AppState {
    /// Build the state from resolved configuration.
    #[must_use]
    pub fn from_config(config: &ServerConfig) -> Self {
        Self {
            documents: DocumentStore::new(&config.data_dir),
            credentials: CredentialStore::new(&config.users_file),
            sessions: SessionStore::new(),
        }
    }
}
