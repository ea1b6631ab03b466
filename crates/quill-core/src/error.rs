//! Error types for `quill-core`.
//!
//! Each variant carries enough context to build a user-facing message
//! without a debugger. Credential errors never include password material,
//! only usernames and operation descriptions.

/// Errors from the flat-file document store.
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    /// The named document does not exist in the content directory.
    #[error("{name} does not exist.")]
    NotFound { name: String },

    /// The proposed document name failed validation.
    ///
    /// The reason is a complete user-facing sentence and is rendered
    /// inline with the originating form.
    #[error("{reason}")]
    InvalidName { reason: String },

    /// The underlying filesystem operation failed.
    #[error("document storage error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

/// Errors from the credential store.
#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    /// The username is already registered.
    #[error("{username} already has an account")]
    UsernameTaken { username: String },

    /// The username/password pair did not match a stored credential.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Password hashing or hash parsing failed.
    #[error("password hash error: {reason}")]
    Hash { reason: String },

    /// Reading or writing the credential file failed.
    #[error("credential storage error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}
