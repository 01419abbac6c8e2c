//! # unpage
//!
//! Extract named page regions from a static HTML document into standalone
//! files.
//!
//! A single-page HTML demo often keeps every screen in its own
//! `<div id="..." class="page">`. This library finds those regions, wraps
//! each one in a minimal standalone document (shared `<head>`, fonts and the
//! styles harvested from the source) and writes it to
//! `<output>/<slot>/index.html`.
//!
//! ## Quick Start
//!
//! ```no_run
//! use unpage::{extract_pages, PageMap};
//!
//! fn main() -> unpage::Result<()> {
//!     let pages = PageMap::from_json(r#"{"dashboard": "dashboard", "groundHandling": "ground-handling"}"#)?;
//!     let summary = extract_pages("demo-complete-umroh-app.html", &pages, "page-backups")?;
//!     println!("{}", summary);
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Two locators**: a tree-based locator (default) and a text-scanning
//!   locator with balanced tag matching
//! - **Shared shell**: styles harvested once and reused for every page
//! - **Per-page outcomes**: missing or broken pages never stop a run
//! - **Archive extraction**: unpack ZIP exports with an inventory of entries

pub mod archive;
pub mod assemble;
pub mod error;
pub mod loader;
pub mod locate;
pub mod model;
pub mod pipeline;
pub mod write;

// Re-export commonly used types
pub use archive::{extract_archive, list_files, ArchiveEntry, ArchiveInventory};
pub use assemble::{Shell, ShellOptions};
pub use error::{Error, Result};
pub use loader::load_file;
pub use locate::{LocateOptions, PatternLocator, RegionLocator, Strategy, StructuralLocator};
pub use model::{AssembledPage, LocatedRegion, PageMap, PageSpec, SourceDocument};
pub use pipeline::{ExtractOptions, ExtractionResult, Outcome, Pipeline, RunSummary};
pub use write::PageWriter;

use std::path::{Path, PathBuf};

/// Extract pages from an HTML file with default options.
///
/// # Arguments
///
/// * `source` - Path to the HTML document
/// * `pages` - Pages to extract
/// * `output_dir` - Base directory; each slot directory must already exist
///
/// # Example
///
/// ```no_run
/// use unpage::{extract_pages, PageMap};
///
/// let pages = PageMap::from_pairs(["dashboard", "jamaah"]).unwrap();
/// let summary = extract_pages("demo.html", &pages, "page-backups").unwrap();
/// assert_eq!(summary.total(), 2);
/// ```
pub fn extract_pages<P, Q>(source: P, pages: &PageMap, output_dir: Q) -> Result<RunSummary>
where
    P: AsRef<Path>,
    Q: Into<PathBuf>,
{
    Unpage::new()
        .with_output_dir(output_dir)
        .load(source)?
        .extract(pages)
}

/// Locate a single region in an HTML file.
///
/// Returns [`Error::RegionNotFound`] if no page carries the identifier.
///
/// # Example
///
/// ```no_run
/// use unpage::locate_region;
///
/// let region = locate_region("demo.html", "dashboard").unwrap();
/// println!("{}", region.display_title());
/// ```
pub fn locate_region<P: AsRef<Path>>(source: P, identifier: &str) -> Result<LocatedRegion> {
    Unpage::new().load(source)?.require(identifier)
}

/// Builder for configuring and running page extraction.
///
/// # Example
///
/// ```no_run
/// use unpage::{PageMap, Strategy, Unpage};
///
/// let pages = PageMap::from_pairs(["dashboard"])?;
/// let summary = Unpage::new()
///     .with_strategy(Strategy::Pattern)
///     .with_output_dir("page-backups")
///     .raw()
///     .load("demo.html")?
///     .extract(&pages)?;
/// # Ok::<(), unpage::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Unpage {
    options: ExtractOptions,
}

impl Unpage {
    /// Create a new Unpage builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Select the locator strategy.
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.options = self.options.with_strategy(strategy);
        self
    }

    /// Set what page containers look like.
    pub fn with_locate_options(mut self, options: LocateOptions) -> Self {
        self.options = self.options.with_locate_options(options);
        self
    }

    /// Set the shell wrapped around assembled pages.
    pub fn with_shell_options(mut self, options: ShellOptions) -> Self {
        self.options = self.options.with_shell_options(options);
        self
    }

    /// Write raw regions instead of assembled pages.
    pub fn raw(mut self) -> Self {
        self.options = self.options.raw();
        self
    }

    /// Assemble and write pages in parallel.
    pub fn parallel(mut self) -> Self {
        self.options = self.options.with_parallel(true);
        self
    }

    /// Set the output base directory.
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.options = self.options.with_output_dir(dir);
        self
    }

    /// Create missing slot directories.
    pub fn create_dirs(mut self) -> Self {
        self.options = self.options.with_create_dirs(true);
        self
    }

    /// Load the source document from a file.
    pub fn load<P: AsRef<Path>>(self, path: P) -> Result<UnpageSession> {
        let document = load_file(path)?;
        Ok(self.with_document(document))
    }

    /// Use an in-memory source document.
    pub fn with_document(self, document: SourceDocument) -> UnpageSession {
        UnpageSession {
            document,
            options: self.options,
        }
    }

    /// Extraction options.
    pub fn options(&self) -> &ExtractOptions {
        &self.options
    }
}

/// A loaded source document together with extraction options.
pub struct UnpageSession {
    document: SourceDocument,
    options: ExtractOptions,
}

impl UnpageSession {
    /// The loaded document.
    pub fn document(&self) -> &SourceDocument {
        &self.document
    }

    /// Locate one region.
    pub fn locate(&self, identifier: &str) -> Result<Option<LocatedRegion>> {
        self.locator()?.locate(identifier)
    }

    /// Locate one region, treating absence as an error.
    pub fn require(&self, identifier: &str) -> Result<LocatedRegion> {
        self.locator()?.require(identifier)
    }

    /// Locate one region and wrap it in the shell.
    pub fn assemble(&self, identifier: &str) -> Result<AssembledPage> {
        let locator = self.locator()?;
        let region = locator.require(identifier)?;
        let shell = match locator.tree() {
            Some(tree) => Shell::harvest_tree(tree, self.options.shell.clone())?,
            None => Shell::harvest(&self.document, self.options.shell.clone())?,
        };
        Ok(shell.assemble(&region))
    }

    /// Extract every page of `pages`.
    pub fn extract(&self, pages: &PageMap) -> Result<RunSummary> {
        Pipeline::new(self.options.clone()).run(&self.document, pages)
    }

    fn locator(&self) -> Result<Box<dyn RegionLocator + '_>> {
        self.options
            .strategy
            .locator(&self.document, self.options.locate.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r#"<html><body>
<div id="dashboard" class="page"><h2>Overview</h2></div>
</body></html>"#;

    #[test]
    fn test_unpage_builder() {
        let builder = Unpage::new()
            .with_strategy(Strategy::Pattern)
            .raw()
            .parallel()
            .create_dirs()
            .with_output_dir("out");

        let options = builder.options();
        assert_eq!(options.strategy, Strategy::Pattern);
        assert!(!options.assemble);
        assert!(options.parallel);
        assert!(options.create_dirs);
        assert_eq!(options.output_dir, PathBuf::from("out"));
    }

    #[test]
    fn test_unpage_builder_default() {
        let builder = Unpage::default();
        assert_eq!(builder.options().strategy, Strategy::Structural);
        assert!(builder.options().assemble);
    }

    #[test]
    fn test_session_locate_and_assemble() {
        let session = Unpage::new().with_document(SourceDocument::new(DOC));

        assert!(session.locate("excel").unwrap().is_none());
        assert!(matches!(
            session.require("excel"),
            Err(Error::RegionNotFound(_))
        ));

        let page = session.assemble("dashboard").unwrap();
        assert_eq!(page.title, "Overview");
        assert!(page.html.contains("<h2>Overview</h2>"));
    }

    #[test]
    fn test_load_missing_source_is_fatal() {
        let result = Unpage::new().load("no/such/demo.html");
        assert!(matches!(result, Err(ref e) if e.is_fatal()));
    }
}
