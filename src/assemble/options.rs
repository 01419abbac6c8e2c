//! Shell options and configuration.

/// Material Icons stylesheet link.
pub const MATERIAL_ICONS_LINK: &str =
    r#"<link href="https://fonts.googleapis.com/icon?family=Material+Icons" rel="stylesheet">"#;

/// Inter font stylesheet link.
pub const INTER_FONT_LINK: &str = r#"<link href="https://fonts.googleapis.com/css2?family=Inter:wght@100;200;300;400;500;600;700;800;900&display=swap" rel="stylesheet">"#;

/// Options for the markup wrapped around every assembled page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellOptions {
    /// Value of the `lang` attribute on `<html>`
    pub lang: String,

    /// Text appended to every page title (`{page} - {site}`)
    pub site_title: String,

    /// Extra `<head>` markup, one entry per line (stylesheet links etc.)
    pub head_links: Vec<String>,

    /// Class of the `<div>` wrapping the page content
    pub wrapper_class: String,

    /// Copy `<style>` elements from the source document into every page
    pub harvest_styles: bool,
}

impl ShellOptions {
    /// Create new shell options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the document language.
    pub fn with_lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = lang.into();
        self
    }

    /// Set the site title.
    pub fn with_site_title(mut self, title: impl Into<String>) -> Self {
        self.site_title = title.into();
        self
    }

    /// Replace the head links.
    pub fn with_head_links<I, S>(mut self, links: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.head_links = links.into_iter().map(Into::into).collect();
        self
    }

    /// Set the wrapper class.
    pub fn with_wrapper_class(mut self, class: impl Into<String>) -> Self {
        self.wrapper_class = class.into();
        self
    }

    /// Enable or disable style harvesting.
    pub fn with_harvest_styles(mut self, harvest: bool) -> Self {
        self.harvest_styles = harvest;
        self
    }
}

impl Default for ShellOptions {
    fn default() -> Self {
        Self {
            lang: "id".to_string(),
            site_title: "Umroh Management System".to_string(),
            head_links: vec![MATERIAL_ICONS_LINK.to_string(), INTER_FONT_LINK.to_string()],
            wrapper_class: "container".to_string(),
            harvest_styles: true,
        }
    }
}
