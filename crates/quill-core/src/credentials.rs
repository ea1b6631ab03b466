//! Credential store backed by a single flat text file.
//!
//! The file is a human-readable `username: hash` mapping, one entry per
//! line. Passwords are hashed with Argon2id; plaintext never touches
//! storage. The mapping is re-read from disk on every check; there is
//! deliberately no in-memory cache, so external edits to the file are
//! visible immediately and no staleness invariant needs to hold.
//!
//! Username matching is case-insensitive at login and case-sensitive at
//! registration, so `Admin` and `admin` cannot coexist as separate
//! accounts by accident but either spelling signs in.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use tracing::debug;

use crate::error::CredentialError;

/// The persisted username → password-hash mapping.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    /// Create a store persisted at the given file path.
    ///
    /// The file does not need to exist yet; a missing file reads as an
    /// empty mapping and is created on the first registration.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The file this store reads and writes.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the full mapping from disk.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialError::Io`] if the file exists but cannot be
    /// read.
    pub async fn load(&self) -> Result<BTreeMap<String, String>, CredentialError> {
        let text = match tokio::fs::read_to_string(&self.path).await {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(e.into()),
        };

        let mut credentials = BTreeMap::new();
        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line == "---" {
                continue;
            }
            if let Some((username, hash)) = line.split_once(':') {
                credentials.insert(username.trim().to_owned(), hash.trim().to_owned());
            }
        }
        Ok(credentials)
    }

    /// Check whether a username is registered (case-sensitive).
    ///
    /// # Errors
    ///
    /// Returns [`CredentialError::Io`] if the credential file cannot be
    /// read.
    pub async fn exists(&self, username: &str) -> Result<bool, CredentialError> {
        Ok(self.load().await?.contains_key(username))
    }

    /// Verify a plaintext password against the stored hash.
    ///
    /// The username is matched case-insensitively against stored entries.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialError::InvalidCredentials`] when the username
    /// is unknown or the password does not match, and
    /// [`CredentialError::Io`] if the credential file cannot be read.
    pub async fn verify(&self, username: &str, password: &str) -> Result<(), CredentialError> {
        let credentials = self.load().await?;

        let Some((_, stored_hash)) = credentials
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(username))
        else {
            return Err(CredentialError::InvalidCredentials);
        };

        let parsed = PasswordHash::new(stored_hash).map_err(|e| CredentialError::Hash {
            reason: e.to_string(),
        })?;

        if Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
        {
            Ok(())
        } else {
            Err(CredentialError::InvalidCredentials)
        }
    }

    /// Register a new user, hashing the password and persisting the full
    /// mapping back to the file.
    ///
    /// This store is the single writer of the credential file; no
    /// concurrent-write protection is attempted at this scale.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialError::UsernameTaken`] if the username is
    /// already registered, [`CredentialError::Hash`] if hashing fails,
    /// and [`CredentialError::Io`] if the file cannot be written.
    pub async fn create(&self, username: &str, password: &str) -> Result<(), CredentialError> {
        let mut credentials = self.load().await?;

        if credentials.contains_key(username) {
            return Err(CredentialError::UsernameTaken {
                username: username.to_owned(),
            });
        }

        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| CredentialError::Hash {
                reason: e.to_string(),
            })?
            .to_string();

        credentials.insert(username.to_owned(), hash);
        self.persist(&credentials).await?;
        debug!(username, "credential stored");
        Ok(())
    }

    /// Write the full mapping to the credential file.
    async fn persist(
        &self,
        credentials: &BTreeMap<String, String>,
    ) -> Result<(), CredentialError> {
        let mut out = String::with_capacity(credentials.len() * 128);
        for (username, hash) in credentials {
            out.push_str(username);
            out.push_str(": ");
            out.push_str(hash);
            out.push('\n');
        }
        tokio::fs::write(&self.path, out).await?;
        Ok(())
    }
}
