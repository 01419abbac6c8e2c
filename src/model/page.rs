//! Page mapping configuration.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Component, Path};

/// One configured page: where to find it and where to write it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageSpec {
    /// Value of the `id` attribute marking the region
    pub identifier: String,

    /// Directory name under the output base directory
    pub output_slot: String,
}

impl PageSpec {
    /// Create a page spec.
    pub fn new(identifier: impl Into<String>, output_slot: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            output_slot: output_slot.into(),
        }
    }

    /// Parse an `id[=slot]` pair. The slot defaults to the identifier.
    pub fn parse(pair: &str) -> Result<Self> {
        let (identifier, slot) = match pair.split_once('=') {
            Some((id, slot)) => (id.trim(), slot.trim()),
            None => (pair.trim(), pair.trim()),
        };

        if identifier.is_empty() {
            return Err(Error::Config(format!("empty identifier in '{}'", pair)));
        }
        if slot.is_empty() {
            return Err(Error::Config(format!("empty output slot in '{}'", pair)));
        }

        Ok(Self::new(identifier, slot))
    }

    /// Check that the output slot is a single plain path segment.
    pub fn validate(&self) -> Result<()> {
        if self.identifier.is_empty() {
            return Err(Error::Config("empty identifier".into()));
        }

        let mut components = Path::new(&self.output_slot).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) => Ok(()),
            _ => Err(Error::Config(format!(
                "output slot '{}' for '{}' must be a single directory name",
                self.output_slot, self.identifier
            ))),
        }
    }
}

/// Ordered, duplicate-free list of pages to extract.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PageMap {
    pages: Vec<PageSpec>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PageMapFile {
    List(Vec<PageSpec>),
    Object(serde_json::Map<String, serde_json::Value>),
}

impl PageMap {
    /// Create an empty page map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a page map, rejecting duplicate identifiers and bad slots.
    pub fn from_specs(specs: impl IntoIterator<Item = PageSpec>) -> Result<Self> {
        let mut map = Self::new();
        for spec in specs {
            map.push(spec)?;
        }
        Ok(map)
    }

    /// Build a page map from `id[=slot]` pairs.
    pub fn from_pairs<I, S>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let specs = pairs
            .into_iter()
            .map(|p| PageSpec::parse(p.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        Self::from_specs(specs)
    }

    /// Parse a page map from JSON.
    ///
    /// Accepts either an object mapping identifiers to slots (key order is
    /// kept) or an array of `{"identifier", "output_slot"}` records.
    pub fn from_json(json: &str) -> Result<Self> {
        match serde_json::from_str::<PageMapFile>(json)? {
            PageMapFile::List(specs) => Self::from_specs(specs),
            PageMapFile::Object(object) => {
                let mut specs = Vec::with_capacity(object.len());
                for (identifier, slot) in object {
                    let slot = slot.as_str().ok_or_else(|| {
                        Error::Config(format!("output slot for '{}' must be a string", identifier))
                    })?;
                    specs.push(PageSpec::new(identifier, slot));
                }
                Self::from_specs(specs)
            }
        }
    }

    /// Read a JSON page map from disk.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Append a page.
    pub fn push(&mut self, spec: PageSpec) -> Result<()> {
        spec.validate()?;
        if self.get(&spec.identifier).is_some() {
            return Err(Error::Config(format!(
                "duplicate identifier '{}'",
                spec.identifier
            )));
        }
        if self.pages.iter().any(|p| p.output_slot == spec.output_slot) {
            return Err(Error::Config(format!(
                "output slot '{}' is used by more than one page",
                spec.output_slot
            )));
        }
        self.pages.push(spec);
        Ok(())
    }

    /// Look up a page by identifier.
    pub fn get(&self, identifier: &str) -> Option<&PageSpec> {
        self.pages.iter().find(|p| p.identifier == identifier)
    }

    /// Iterate pages in configuration order.
    pub fn iter(&self) -> std::slice::Iter<'_, PageSpec> {
        self.pages.iter()
    }

    /// Number of configured pages.
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// Check if no pages are configured.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

impl<'a> IntoIterator for &'a PageMap {
    type Item = &'a PageSpec;
    type IntoIter = std::slice::Iter<'a, PageSpec>;

    fn into_iter(self) -> Self::IntoIter {
        self.pages.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pair_with_slot() {
        let spec = PageSpec::parse("groundHandling=ground-handling").unwrap();
        assert_eq!(spec.identifier, "groundHandling");
        assert_eq!(spec.output_slot, "ground-handling");
    }

    #[test]
    fn test_parse_pair_default_slot() {
        let spec = PageSpec::parse("dashboard").unwrap();
        assert_eq!(spec.output_slot, "dashboard");
    }

    #[test]
    fn test_parse_pair_empty() {
        assert!(PageSpec::parse("=slot").is_err());
        assert!(PageSpec::parse("id=").is_err());
    }

    #[test]
    fn test_slot_must_be_single_segment() {
        assert!(PageSpec::new("a", "a").validate().is_ok());
        assert!(PageSpec::new("a", "../a").validate().is_err());
        assert!(PageSpec::new("a", "nested/a").validate().is_err());
        assert!(PageSpec::new("a", "/abs").validate().is_err());
        assert!(PageSpec::new("a", "..").validate().is_err());
    }

    #[test]
    fn test_duplicate_identifier_rejected() {
        let result = PageMap::from_pairs(["dashboard", "dashboard=other"]);
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_duplicate_slot_rejected() {
        let result = PageMap::from_pairs(["dashboard=home", "overview=home"]);
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_from_json_object_keeps_order() {
        let map = PageMap::from_json(
            r#"{"dashboard": "dashboard", "groundHandling": "ground-handling", "excel": "excel"}"#,
        )
        .unwrap();
        let ids: Vec<_> = map.iter().map(|p| p.identifier.as_str()).collect();
        assert_eq!(ids, ["dashboard", "groundHandling", "excel"]);
        assert_eq!(map.get("groundHandling").unwrap().output_slot, "ground-handling");
    }

    #[test]
    fn test_from_json_list() {
        let map = PageMap::from_json(
            r#"[{"identifier": "jamaah", "output_slot": "pilgrims"}]"#,
        )
        .unwrap();
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("jamaah").unwrap().output_slot, "pilgrims");
    }

    #[test]
    fn test_from_json_rejects_non_string_slot() {
        assert!(PageMap::from_json(r#"{"dashboard": 3}"#).is_err());
        assert!(PageMap::from_json("not json").is_err());
    }
}
