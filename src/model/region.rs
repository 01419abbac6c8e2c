//! Located and assembled page content.

use serde::{Deserialize, Serialize};
use std::ops::Range;

/// The markup of one page region found in a source document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocatedRegion {
    /// Identifier the region was located by
    pub identifier: String,

    /// Region markup, including its container element
    pub content: String,

    /// Text of the region's first heading, if the strategy extracts one
    pub title: Option<String>,

    /// Byte range of the region in the source document, if known
    pub span: Option<Range<usize>>,
}

impl LocatedRegion {
    /// Create a region without title or span.
    pub fn new(identifier: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            content: content.into(),
            title: None,
            span: None,
        }
    }

    /// Set the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the source span.
    pub fn with_span(mut self, span: Range<usize>) -> Self {
        self.span = Some(span);
        self
    }

    /// The title, or the identifier with its first letter capitalized.
    pub fn display_title(&self) -> String {
        match self.title.as_deref() {
            Some(title) if !title.is_empty() => title.to_string(),
            _ => capitalize(&self.identifier),
        }
    }
}

/// A standalone HTML document built around one region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssembledPage {
    /// Identifier of the embedded region
    pub identifier: String,

    /// Title used in the `<title>` element
    pub title: String,

    /// Complete document markup
    pub html: String,
}

/// Uppercase the first character and lowercase the rest.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
