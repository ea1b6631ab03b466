//! Core library for Quill, a minimal flat-file CMS.
//!
//! Three concerns live here, all free of HTTP details:
//!
//! - [`document`]: CRUD over a single flat content directory.
//! - [`credentials`]: the persisted username → password-hash mapping,
//!   with Argon2id hashing and verification.
//! - [`render`]: markdown to HTML conversion for `.md` documents.
//!
//! The HTTP layer in `quill-server` wires these into route handlers.

pub mod credentials;
pub mod document;
pub mod error;
pub mod render;

pub use credentials::CredentialStore;
pub use document::{DocumentStore, RenderMode, COPY_PREFIX};
pub use error::{CredentialError, DocumentError};
