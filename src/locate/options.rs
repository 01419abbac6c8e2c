//! Locator options and configuration.

/// Options describing what a page container looks like.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocateOptions {
    /// Tag name of page containers
    pub container_tag: String,

    /// Class every page container carries
    pub container_class: String,

    /// Heading tags searched (in document order) for a page title
    pub title_tags: Vec<String>,
}

impl LocateOptions {
    /// Create new locate options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the container tag name.
    pub fn with_container_tag(mut self, tag: impl Into<String>) -> Self {
        self.container_tag = tag.into().to_ascii_lowercase();
        self
    }

    /// Set the container class.
    pub fn with_container_class(mut self, class: impl Into<String>) -> Self {
        self.container_class = class.into();
        self
    }

    /// Set the heading tags used for titles.
    pub fn with_title_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.title_tags = tags.into_iter().map(Into::into).collect();
        self
    }
}

impl Default for LocateOptions {
    fn default() -> Self {
        Self {
            container_tag: "div".to_string(),
            container_class: "page".to_string(),
            title_tags: vec!["h2".to_string(), "h3".to_string()],
        }
    }
}
