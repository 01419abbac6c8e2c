//! Source document type.

use std::path::{Path, PathBuf};

/// An HTML source document loaded into memory.
///
/// The text is fixed at load time; locators, the shell harvester and the
/// pipeline only ever borrow it.
#[derive(Debug, Clone)]
pub struct SourceDocument {
    text: String,
    path: Option<PathBuf>,
}

impl SourceDocument {
    /// Create a document from in-memory text.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            path: None,
        }
    }

    /// Attach the path the document was read from.
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Full document text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Path the document was loaded from, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Length of the document in bytes.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Check if the document is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

impl AsRef<str> for SourceDocument {
    fn as_ref(&self) -> &str {
        &self.text
    }
}
