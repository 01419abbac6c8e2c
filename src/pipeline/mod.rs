//! The extraction pipeline: locate, assemble and write every configured page.
//!
//! A run loads nothing itself; it takes an already loaded
//! [`SourceDocument`] so that a load failure stays the caller's (fatal)
//! problem. Per-page failures are recorded in the [`RunSummary`] and never
//! stop the remaining pages.
//!
//! # Example
//!
//! ```no_run
//! use unpage::pipeline::{ExtractOptions, Pipeline};
//! use unpage::{load_file, PageMap};
//!
//! fn main() -> unpage::Result<()> {
//!     let doc = load_file("demo-complete-umroh-app.html")?;
//!     let pages = PageMap::from_pairs(["dashboard", "groundHandling=ground-handling"])?;
//!
//!     let summary = Pipeline::new(ExtractOptions::default()).run(&doc, &pages)?;
//!     println!("{}", summary);
//!     Ok(())
//! }
//! ```

mod options;
mod result;

pub use options::{ExtractOptions, DEFAULT_OUTPUT_DIR};
pub use result::{ExtractionResult, FailureKind, Outcome, RunSummary};

use crate::assemble::Shell;
use crate::error::Result;
use crate::model::{LocatedRegion, PageMap, PageSpec, SourceDocument};
use crate::write::PageWriter;
use rayon::prelude::*;
use scraper::Html;

/// Drives the locate → assemble → write stages for a page map.
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    options: ExtractOptions,
}

impl Pipeline {
    /// Create a pipeline.
    pub fn new(options: ExtractOptions) -> Self {
        Self { options }
    }

    /// Pipeline options.
    pub fn options(&self) -> &ExtractOptions {
        &self.options
    }

    /// Extract every page of `pages` from `document`.
    ///
    /// Fails only when the run cannot start (for example an invalid
    /// container selector); everything that goes wrong for a single page is
    /// reported in the returned summary.
    pub fn run(&self, document: &SourceDocument, pages: &PageMap) -> Result<RunSummary> {
        let options = &self.options;
        let locator = options.strategy.locator(document, options.locate.clone())?;
        let shell = if options.assemble {
            Some(build_shell(document, locator.tree(), options)?)
        } else {
            None
        };
        let writer = PageWriter::new(&options.output_dir).with_create_dirs(options.create_dirs);

        log::info!(
            "extracting {} pages with the {} locator",
            pages.len(),
            locator.name()
        );

        // The parsed tree is single-threaded, so locating always runs in order.
        let located: Vec<(&PageSpec, Result<Option<LocatedRegion>>)> = pages
            .iter()
            .map(|spec| (spec, locator.locate(&spec.identifier)))
            .collect();

        let finish =
            |(spec, region): (&PageSpec, Result<Option<LocatedRegion>>)| -> ExtractionResult {
                let result = finish_page(spec, region, shell.as_ref(), &writer);
                report(&result);
                result
            };

        let results: Vec<ExtractionResult> = if options.parallel {
            located.into_par_iter().map(finish).collect()
        } else {
            located.into_iter().map(finish).collect()
        };

        let summary = RunSummary::new(
            document.path().map(Into::into),
            options.strategy,
            options.output_dir.clone(),
            results,
        );
        log::info!("{}", summary);
        Ok(summary)
    }
}

/// Harvest from the locator's tree when it has one; parse otherwise.
fn build_shell(
    document: &SourceDocument,
    tree: Option<&Html>,
    options: &ExtractOptions,
) -> Result<Shell> {
    match tree {
        Some(tree) => Shell::harvest_tree(tree, options.shell.clone()),
        None => Shell::harvest(document, options.shell.clone()),
    }
}

fn finish_page(
    spec: &PageSpec,
    region: Result<Option<LocatedRegion>>,
    shell: Option<&Shell>,
    writer: &PageWriter,
) -> ExtractionResult {
    let region = match region {
        Ok(Some(region)) => region,
        Ok(None) => {
            return ExtractionResult {
                identifier: spec.identifier.clone(),
                output_slot: spec.output_slot.clone(),
                outcome: Outcome::NotFound,
            }
        }
        Err(e) => return ExtractionResult::failed(&spec.identifier, &spec.output_slot, &e),
    };

    let (title, contents) = match shell {
        Some(shell) => {
            let page = shell.assemble(&region);
            (page.title, page.html)
        }
        None => (region.display_title(), region.content),
    };

    match writer.write(spec, &contents) {
        Ok(path) => ExtractionResult {
            identifier: spec.identifier.clone(),
            output_slot: spec.output_slot.clone(),
            outcome: Outcome::Written {
                path,
                bytes: contents.len(),
                title,
            },
        },
        Err(e) => ExtractionResult::failed(&spec.identifier, &spec.output_slot, &e),
    }
}

fn report(result: &ExtractionResult) {
    match &result.outcome {
        Outcome::Written { path, .. } => {
            log::info!("extracted {} to {}", result.identifier, path.display())
        }
        Outcome::NotFound => log::warn!("could not find page {}", result.identifier),
        Outcome::Failed { message, .. } => {
            log::warn!("failed to extract {}: {}", result.identifier, message)
        }
    }
}
