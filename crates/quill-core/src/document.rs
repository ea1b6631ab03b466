//! Flat-file document store.
//!
//! Documents are plain UTF-8 files in a single directory, with no
//! subdirectories, no metadata beyond filename and extension. Every write
//! fully overwrites the file; concurrent writers are externally
//! synchronized (last writer wins, acceptable for a single-operator tool).
//!
//! Names containing path separators or `..` never resolve, so a request
//! can never escape the content directory.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::DocumentError;

/// Prefix applied to the target name by [`DocumentStore::duplicate`].
pub const COPY_PREFIX: &str = "copy_of_";

/// Extensions accepted when creating a new document.
const ALLOWED_EXTENSIONS: [&str; 4] = ["md", "txt", "jpg", "png"];

/// How a document is presented to a viewer, decided by its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// `.md`: converted to HTML and embedded in the page shell.
    Markdown,
    /// `.txt`: returned verbatim as `text/plain`.
    Plain,
}

impl RenderMode {
    /// Determine the render mode for a filename.
    ///
    /// Returns `None` for any extension other than `.md`/`.txt`: such
    /// documents are treated as nonexistent by the viewing routes.
    #[must_use]
    pub fn for_name(name: &str) -> Option<Self> {
        match Path::new(name).extension().and_then(|e| e.to_str()) {
            Some("md") => Some(Self::Markdown),
            Some("txt") => Some(Self::Plain),
            _ => None,
        }
    }
}

/// A document store over a single flat directory.
///
/// The directory path is resolved once at startup and never changes.
#[derive(Debug, Clone)]
pub struct DocumentStore {
    root: PathBuf,
}

impl DocumentStore {
    /// Create a store rooted at the given content directory.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The content directory this store reads and writes.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// List the filenames currently present, sorted for stable output.
    ///
    /// Subdirectories and non-UTF-8 names are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::Io`] if the directory cannot be read.
    pub async fn list(&self) -> Result<Vec<String>, DocumentError> {
        let mut entries = tokio::fs::read_dir(&self.root).await?;
        let mut names = Vec::new();

        while let Some(entry) = entries.next_entry().await? {
            if entry.file_type().await?.is_file() {
                if let Ok(name) = entry.file_name().into_string() {
                    names.push(name);
                }
            }
        }

        names.sort();
        Ok(names)
    }

    /// Read a document's content as text.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::NotFound`] if the document is absent and
    /// [`DocumentError::Io`] on any other filesystem failure.
    pub async fn read(&self, name: &str) -> Result<String, DocumentError> {
        let path = self.resolve(name)?;
        match tokio::fs::read_to_string(&path).await {
            Ok(content) => Ok(content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(not_found(name)),
            Err(e) => Err(e.into()),
        }
    }

    /// Create or fully overwrite a document.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::Io`] if the write fails. An invalid name
    /// surfaces as [`DocumentError::NotFound`].
    pub async fn write(&self, name: &str, content: &str) -> Result<(), DocumentError> {
        let path = self.resolve(name)?;
        tokio::fs::write(&path, content).await?;
        debug!(name, bytes = content.len(), "document written");
        Ok(())
    }

    /// Remove a document.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::NotFound`] if the document is absent and
    /// [`DocumentError::Io`] on any other filesystem failure.
    pub async fn delete(&self, name: &str) -> Result<(), DocumentError> {
        let path = self.resolve(name)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                debug!(name, "document removed");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(not_found(name)),
            Err(e) => Err(e.into()),
        }
    }

    /// Copy a document to `copy_of_<name>` with identical content.
    ///
    /// A second duplication silently overwrites the prior copy. Returns
    /// the name of the copy.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::NotFound`] if the source is absent and
    /// [`DocumentError::Io`] on any other filesystem failure.
    pub async fn duplicate(&self, name: &str) -> Result<String, DocumentError> {
        let content = self.read(name).await?;
        let copy_name = format!("{COPY_PREFIX}{name}");
        self.write(&copy_name, &content).await?;
        Ok(copy_name)
    }

    /// Check whether a document exists.
    #[must_use]
    pub async fn exists(&self, name: &str) -> bool {
        match self.resolve(name) {
            Ok(path) => tokio::fs::metadata(&path)
                .await
                .map(|m| m.is_file())
                .unwrap_or(false),
            Err(_) => false,
        }
    }

    /// Validate a proposed name for a new document.
    ///
    /// The emptiness check runs before the extension check, so a blank
    /// name with a valid extension still reports "A name is required.".
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::InvalidName`] with a user-facing reason.
    pub fn validate_new_name(name: &str) -> Result<(), DocumentError> {
        if name.trim().is_empty() {
            return Err(invalid_name("A name is required."));
        }

        if name.contains(['/', '\\']) || name.contains("..") {
            return Err(invalid_name("Invalid extension"));
        }

        let allowed = Path::new(name)
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| ALLOWED_EXTENSIONS.contains(&ext));

        if allowed {
            Ok(())
        } else {
            Err(invalid_name("Invalid extension"))
        }
    }

    /// Resolve a document name to its path inside the content directory.
    ///
    /// Rejects names that could traverse outside the flat directory.
    fn resolve(&self, name: &str) -> Result<PathBuf, DocumentError> {
        if name.is_empty() || name.contains(['/', '\\']) || name.contains("..") {
            return Err(not_found(name));
        }
        Ok(self.root.join(name))
    }
}

fn not_found(name: &str) -> DocumentError {
    DocumentError::NotFound {
        name: name.to_owned(),
    }
}

fn invalid_name(reason: &str) -> DocumentError {
    DocumentError::InvalidName {
        reason: reason.to_owned(),
    }
}
