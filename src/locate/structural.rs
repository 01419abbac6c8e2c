//! Tree-based region locator.

use crate::error::{Error, Result};
use crate::model::{LocatedRegion, SourceDocument};
use scraper::{ElementRef, Html, Selector};

use super::{LocateOptions, RegionLocator};

/// Locates regions by walking a parsed HTML tree.
///
/// The document is parsed once in [`StructuralLocator::new`] and the tree is
/// reused for every identifier. Matching ignores attribute order, nesting
/// depth and any text outside the container element.
pub struct StructuralLocator {
    html: Html,
    containers: Selector,
    titles: Option<Selector>,
    options: LocateOptions,
}

impl StructuralLocator {
    /// Parse the document and prepare selectors.
    pub fn new(document: &SourceDocument, options: LocateOptions) -> Result<Self> {
        let containers = parse_selector(&options.container_tag)?;
        let titles = if options.title_tags.is_empty() {
            None
        } else {
            Some(parse_selector(&options.title_tags.join(", "))?)
        };

        let html = Html::parse_document(document.text());
        log::debug!(
            "parsed document tree ({} bytes, {} parse errors)",
            document.len(),
            html.errors.len()
        );

        Ok(Self {
            html,
            containers,
            titles,
            options,
        })
    }

    fn is_container(&self, element: &ElementRef<'_>, identifier: &str) -> bool {
        let value = element.value();
        value.id() == Some(identifier)
            && value.classes().any(|c| c == self.options.container_class)
    }

    fn title_of(&self, element: ElementRef<'_>) -> Option<String> {
        let titles = self.titles.as_ref()?;
        let heading = element.select(titles).next()?;
        let text = heading.text().collect::<String>();
        let text = text.trim();
        (!text.is_empty()).then(|| text.to_string())
    }
}

impl RegionLocator for StructuralLocator {
    fn name(&self) -> &str {
        "structural"
    }

    fn locate(&self, identifier: &str) -> Result<Option<LocatedRegion>> {
        let mut matches = self
            .html
            .select(&self.containers)
            .filter(|el| self.is_container(el, identifier));

        let element = match matches.next() {
            Some(el) => el,
            None => return Ok(None),
        };

        let duplicates = matches.count();
        if duplicates > 0 {
            log::warn!(
                "'{}' matches {} elements, using the first",
                identifier,
                duplicates + 1
            );
        }

        let mut region = LocatedRegion::new(identifier, element.html());
        if let Some(title) = self.title_of(element) {
            region = region.with_title(title);
        }
        Ok(Some(region))
    }

    fn tree(&self) -> Option<&Html> {
        Some(&self.html)
    }
}

fn parse_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| Error::Selector(format!("{}: {:?}", selector, e)))
}
