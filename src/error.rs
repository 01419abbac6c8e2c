//! Error types for unpage library.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for unpage operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while extracting pages or archives.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading the source document or other files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The source document is not valid UTF-8.
    #[error("Source is not valid UTF-8: {0}")]
    Decode(#[from] std::string::FromUtf8Error),

    /// No region with the given identifier exists in the document.
    #[error("Page not found: {0}")]
    RegionNotFound(String),

    /// An opening tag was found but its region has no balanced end.
    #[error("Malformed region boundary for '{identifier}': {reason}")]
    MalformedBoundary {
        /// Identifier being located
        identifier: String,
        /// What went wrong while matching the boundary
        reason: String,
    },

    /// More than one element carries the identifier.
    #[error("Identifier '{identifier}' matches {count} elements")]
    AmbiguousIdentifier {
        /// Identifier being located
        identifier: String,
        /// Number of matching opening tags
        count: usize,
    },

    /// Writing an output page failed.
    #[error("Failed to write {}: {source}", path.display())]
    Write {
        /// Target path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// A CSS selector could not be built.
    #[error("Invalid selector: {0}")]
    Selector(String),

    /// Invalid configuration (page map, options).
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// The archive is corrupt or uses an unsupported feature.
    #[error("Archive error: {0}")]
    Archive(String),

    /// An archive entry would be written outside the target directory.
    #[error("Unsafe archive entry: {0}")]
    UnsafeEntry(String),
}

impl Error {
    /// Whether this error prevents every page of a run from being produced.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::Io(_) | Error::Decode(_))
    }
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        Error::Archive(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Config(err.to_string())
    }
}
