//! Page assembly: wrapping a located region in a standalone HTML document.
//!
//! The [`Shell`] is built once per run. Styles are harvested from the source
//! document at that point and reused unchanged for every page, so all pages
//! of a run share byte-identical head markup.

mod options;

pub use options::{ShellOptions, INTER_FONT_LINK, MATERIAL_ICONS_LINK};

use crate::error::{Error, Result};
use crate::model::{AssembledPage, LocatedRegion, SourceDocument};
use scraper::{Html, Selector};

/// Shared wrapper markup for assembled pages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shell {
    options: ShellOptions,
    styles: String,
}

impl Shell {
    /// Create a shell with no harvested styles.
    pub fn new(options: ShellOptions) -> Self {
        Self {
            options,
            styles: String::new(),
        }
    }

    /// Create a shell, harvesting `<style>` elements from `document` when
    /// the options ask for it.
    pub fn harvest(document: &SourceDocument, options: ShellOptions) -> Result<Self> {
        if !options.harvest_styles {
            return Ok(Self::new(options));
        }
        Self::harvest_tree(&Html::parse_document(document.text()), options)
    }

    /// Create a shell from an already parsed document tree.
    pub fn harvest_tree(tree: &Html, options: ShellOptions) -> Result<Self> {
        if !options.harvest_styles {
            return Ok(Self::new(options));
        }

        let styles = harvest_styles(tree)?;
        log::debug!("harvested {} bytes of style markup", styles.len());
        Ok(Self { options, styles })
    }

    /// Harvested style markup.
    pub fn styles(&self) -> &str {
        &self.styles
    }

    /// Shell options.
    pub fn options(&self) -> &ShellOptions {
        &self.options
    }

    /// Wrap a region in the shell.
    ///
    /// Region markup is embedded verbatim.
    pub fn assemble(&self, region: &LocatedRegion) -> AssembledPage {
        let title = region.display_title();
        let mut html = String::with_capacity(region.content.len() + self.styles.len() + 512);

        html.push_str("<!DOCTYPE html>\n");
        html.push_str(&format!("<html lang=\"{}\">\n", self.options.lang));
        html.push_str("<head>\n");
        html.push_str("    <meta charset=\"UTF-8\">\n");
        html.push_str(
            "    <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n",
        );
        if self.options.site_title.is_empty() {
            html.push_str(&format!("    <title>{}</title>\n", title));
        } else {
            html.push_str(&format!(
                "    <title>{} - {}</title>\n",
                title, self.options.site_title
            ));
        }
        for link in &self.options.head_links {
            html.push_str(&format!("    {}\n", link));
        }
        if !self.styles.is_empty() {
            html.push_str(&format!("    {}\n", self.styles));
        }
        html.push_str("</head>\n");
        html.push_str("<body>\n");
        html.push_str(&format!(
            "    <div class=\"{}\">\n",
            self.options.wrapper_class
        ));
        html.push_str(&format!("        {}\n", region.content));
        html.push_str("    </div>\n");
        html.push_str("</body>\n");
        html.push_str("</html>");

        AssembledPage {
            identifier: region.identifier.clone(),
            title,
            html,
        }
    }
}

impl Default for Shell {
    fn default() -> Self {
        Self::new(ShellOptions::default())
    }
}

/// Collect every `<style>` element of the document, in document order.
fn harvest_styles(tree: &Html) -> Result<String> {
    let selector = Selector::parse("style").map_err(|e| Error::Selector(format!("{:?}", e)))?;
    Ok(tree
        .select(&selector)
        .map(|style| style.html())
        .collect::<Vec<_>>()
        .join("\n"))
}
