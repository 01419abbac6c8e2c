//! Region locators.
//!
//! A [`RegionLocator`] is bound to one source document and answers "where is
//! the page with this identifier?" for any number of identifiers. Two
//! strategies implement it:
//!
//! - [`StructuralLocator`] parses the document into a tree once and matches
//!   container elements by `id` and class. It also extracts a title.
//! - [`PatternLocator`] scans the raw text, finding the opening tag with a
//!   regular expression and the end of the region by balanced tag counting.
//!
//! # Example
//!
//! ```
//! use unpage::locate::{LocateOptions, Strategy};
//! use unpage::SourceDocument;
//!
//! let doc = SourceDocument::new(r#"<div id="dashboard" class="page"><h2>Overview</h2></div>"#);
//! let locator = Strategy::Structural.locator(&doc, LocateOptions::default())?;
//! let region = locator.locate("dashboard")?.expect("page exists");
//! assert_eq!(region.title.as_deref(), Some("Overview"));
//! # Ok::<(), unpage::Error>(())
//! ```

mod options;
mod pattern;
mod structural;

pub use options::LocateOptions;
pub use pattern::PatternLocator;
pub use structural::StructuralLocator;

use crate::error::{Error, Result};
use crate::model::{LocatedRegion, SourceDocument};
use scraper::Html;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Trait for region locators.
pub trait RegionLocator {
    /// Short name of the strategy.
    fn name(&self) -> &str;

    /// Find the region for `identifier`.
    ///
    /// A missing region is `Ok(None)`, not an error.
    fn locate(&self, identifier: &str) -> Result<Option<LocatedRegion>>;

    /// Find the region for `identifier`, treating absence as an error.
    fn require(&self, identifier: &str) -> Result<LocatedRegion> {
        self.locate(identifier)?
            .ok_or_else(|| Error::RegionNotFound(identifier.to_string()))
    }

    /// The parsed document tree, for locators that build one.
    fn tree(&self) -> Option<&Html> {
        None
    }
}

/// Which locator to use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Parse the document into a tree
    #[default]
    Structural,

    /// Scan the raw text
    Pattern,
}

impl Strategy {
    /// Build a locator for this strategy over `document`.
    pub fn locator<'a>(
        self,
        document: &'a SourceDocument,
        options: LocateOptions,
    ) -> Result<Box<dyn RegionLocator + 'a>> {
        Ok(match self {
            Strategy::Structural => Box::new(StructuralLocator::new(document, options)?),
            Strategy::Pattern => Box::new(PatternLocator::new(document.text(), options)?),
        })
    }

    /// Strategy name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Structural => "structural",
            Strategy::Pattern => "pattern",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Strategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "structural" | "tree" => Ok(Strategy::Structural),
            "pattern" | "regex" => Ok(Strategy::Pattern),
            other => Err(Error::Config(format!("unknown strategy: {}", other))),
        }
    }
}
