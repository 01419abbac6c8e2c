//! Per-page outcomes and run summaries.

use crate::error::Error;
use crate::locate::Strategy;
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// Why a page could not be produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// The region's boundary could not be matched
    MalformedBoundary,
    /// Several elements carry the identifier
    Ambiguous,
    /// The output file could not be written
    Write,
    /// Anything else
    Other,
}

impl From<&Error> for FailureKind {
    fn from(err: &Error) -> Self {
        match err {
            Error::MalformedBoundary { .. } => FailureKind::MalformedBoundary,
            Error::AmbiguousIdentifier { .. } => FailureKind::Ambiguous,
            Error::Write { .. } => FailureKind::Write,
            _ => FailureKind::Other,
        }
    }
}

/// What happened to one configured page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    /// The page was written
    Written {
        /// Output file
        path: PathBuf,
        /// Bytes written
        bytes: usize,
        /// Page title
        title: String,
    },

    /// No region carries the identifier
    NotFound,

    /// The page was located or written with an error
    Failed {
        /// Failure category
        kind: FailureKind,
        /// Error message
        message: String,
    },
}

/// Outcome of one page, keyed by its configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractionResult {
    /// Page identifier
    pub identifier: String,

    /// Output slot
    pub output_slot: String,

    /// What happened
    #[serde(flatten)]
    pub outcome: Outcome,
}

impl ExtractionResult {
    /// Record a failure from an error.
    pub fn failed(identifier: &str, output_slot: &str, err: &Error) -> Self {
        Self {
            identifier: identifier.to_string(),
            output_slot: output_slot.to_string(),
            outcome: Outcome::Failed {
                kind: err.into(),
                message: err.to_string(),
            },
        }
    }

    /// Whether the page was written.
    pub fn is_written(&self) -> bool {
        matches!(self.outcome, Outcome::Written { .. })
    }

    /// Whether the page was missing from the source.
    pub fn is_not_found(&self) -> bool {
        matches!(self.outcome, Outcome::NotFound)
    }

    /// Whether the page failed.
    pub fn is_failed(&self) -> bool {
        matches!(self.outcome, Outcome::Failed { .. })
    }

    /// Written path, if any.
    pub fn path(&self) -> Option<&PathBuf> {
        match &self.outcome {
            Outcome::Written { path, .. } => Some(path),
            _ => None,
        }
    }
}

/// Results of a whole extraction run, in page map order.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    /// Source document path, if it was loaded from disk
    pub source: Option<PathBuf>,

    /// Strategy used
    pub strategy: Strategy,

    /// Base output directory
    pub output_dir: PathBuf,

    /// Pages written
    pub written: usize,

    /// Pages missing from the source
    pub not_found: usize,

    /// Pages that failed
    pub failed: usize,

    /// Per-page results
    pub results: Vec<ExtractionResult>,
}

impl RunSummary {
    /// Build a summary, counting outcomes.
    pub fn new(
        source: Option<PathBuf>,
        strategy: Strategy,
        output_dir: PathBuf,
        results: Vec<ExtractionResult>,
    ) -> Self {
        let written = results.iter().filter(|r| r.is_written()).count();
        let not_found = results.iter().filter(|r| r.is_not_found()).count();
        let failed = results.iter().filter(|r| r.is_failed()).count();
        Self {
            source,
            strategy,
            output_dir,
            written,
            not_found,
            failed,
            results,
        }
    }

    /// Total number of configured pages.
    pub fn total(&self) -> usize {
        self.results.len()
    }

    /// Whether every page was written.
    pub fn is_complete(&self) -> bool {
        self.written == self.total()
    }

    /// Result for one identifier.
    pub fn get(&self, identifier: &str) -> Option<&ExtractionResult> {
        self.results.iter().find(|r| r.identifier == identifier)
    }

    /// Serialize the summary as pretty JSON.
    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Extracted {} of {} pages ({} not found, {} failed)",
            self.written,
            self.total(),
            self.not_found,
            self.failed
        )
    }
}
