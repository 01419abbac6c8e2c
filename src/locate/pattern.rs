//! Pattern-based region locator.
//!
//! A regular expression finds the opening container tag; the end of the
//! region is then found by counting nested open and close tags of the same
//! name. Comments and `<script>`/`<style>` bodies are not markup: opening
//! tags inside them never match, and markers such as `<!-- Main Content -->`
//! inside a region never end it early.

use crate::error::{Error, Result};
use crate::model::LocatedRegion;
use regex::Regex;
use std::ops::Range;

use super::{LocateOptions, RegionLocator};

/// Locates regions by scanning the raw document text.
pub struct PatternLocator<'a> {
    text: &'a str,
    options: LocateOptions,
    class_attr: Regex,
    opaque: Vec<Range<usize>>,
}

/// Boundaries of one matched region.
#[derive(Debug, Clone, PartialEq, Eq)]
struct RegionBounds {
    /// Opening tag, from `<` to `>` inclusive
    open: Range<usize>,
    /// Content between the opening and the closing tag
    inner: Range<usize>,
    /// Whole region including the closing tag
    outer: Range<usize>,
}

impl<'a> PatternLocator<'a> {
    /// Create a locator over the given document text.
    pub fn new(text: &'a str, options: LocateOptions) -> Result<Self> {
        let class_attr = Regex::new(r#"(?i)\sclass\s*=\s*(?:"([^"]*)"|'([^']*)')"#)
            .map_err(|e| Error::Config(e.to_string()))?;
        let opaque = opaque_ranges(text, &options.container_tag);
        Ok(Self {
            text,
            options,
            class_attr,
            opaque,
        })
    }

    fn opening_tag_regex(&self, identifier: &str) -> Result<Regex> {
        let tag = regex::escape(&self.options.container_tag);
        let id = regex::escape(identifier);
        let pattern = format!(
            r#"<(?i:{tag})(?:\s[^>]*)?\s(?i:id)\s*=\s*(?:"{id}"|'{id}')[^>]*>"#,
            tag = tag,
            id = id
        );
        Regex::new(&pattern)
            .map_err(|e| Error::Config(format!("pattern for '{}': {}", identifier, e)))
    }

    fn has_container_class(&self, open_tag: &str) -> bool {
        self.class_attr.captures(open_tag).map_or(false, |caps| {
            caps.get(1)
                .or_else(|| caps.get(2))
                .map_or(false, |m| {
                    m.as_str()
                        .split_whitespace()
                        .any(|c| c == self.options.container_class)
                })
        })
    }

    /// Whether `pos` lies inside a comment or a script/style body.
    fn is_opaque(&self, pos: usize) -> bool {
        let i = self.opaque.partition_point(|r| r.end <= pos);
        self.opaque.get(i).map_or(false, |r| r.start <= pos)
    }

    /// Byte positions of every opening tag that marks the identifier's page.
    fn opening_tags(&self, identifier: &str) -> Result<Vec<Range<usize>>> {
        let re = self.opening_tag_regex(identifier)?;
        Ok(re
            .find_iter(self.text)
            .filter(|m| !self.is_opaque(m.start()) && self.has_container_class(m.as_str()))
            .map(|m| m.range())
            .collect())
    }

    fn bounds(&self, open: Range<usize>) -> Option<RegionBounds> {
        let tag = &self.options.container_tag;
        let (close_start, close_end) = find_balanced_close(self.text, open.end, tag)?;
        Some(RegionBounds {
            inner: open.end..close_start,
            outer: open.start..close_end,
            open,
        })
    }
}

impl RegionLocator for PatternLocator<'_> {
    fn name(&self) -> &str {
        "pattern"
    }

    fn locate(&self, identifier: &str) -> Result<Option<LocatedRegion>> {
        let tags = self.opening_tags(identifier)?;
        let open = match tags.as_slice() {
            [] => return Ok(None),
            [only] => only.clone(),
            _ => {
                return Err(Error::AmbiguousIdentifier {
                    identifier: identifier.to_string(),
                    count: tags.len(),
                })
            }
        };

        let bounds = self
            .bounds(open.clone())
            .ok_or_else(|| Error::MalformedBoundary {
                identifier: identifier.to_string(),
                reason: format!(
                    "no closing </{}> balances the tag at byte {}",
                    self.options.container_tag, open.start
                ),
            })?;

        log::debug!(
            "'{}' spans bytes {}..{} (opening tag {}..{})",
            identifier,
            bounds.outer.start,
            bounds.outer.end,
            bounds.open.start,
            bounds.open.end
        );

        // Only the identifier and container class survive from the opening tag.
        let tag = &self.options.container_tag;
        let content = format!(
            r#"<{tag} id="{id}" class="{class}">{inner}</{tag}>"#,
            tag = tag,
            id = identifier,
            class = self.options.container_class,
            inner = &self.text[bounds.inner.clone()],
        );

        Ok(Some(
            LocatedRegion::new(identifier, content).with_span(bounds.outer),
        ))
    }
}

/// Find the close tag that balances an already-open `tag`, scanning from
/// `from`. Returns the start and end byte offsets of that close tag.
fn find_balanced_close(text: &str, from: usize, tag: &str) -> Option<(usize, usize)> {
    let bytes = text.as_bytes();
    let mut depth = 1usize;
    let mut pos = from;

    while let Some(offset) = text[pos..].find('<') {
        let at = pos + offset;

        if let Some(end) = opaque_end(text, at, tag) {
            pos = end;
            continue;
        }

        if closes_tag(bytes, at, tag) {
            let end = text[at..].find('>').map(|end| at + end + 1)?;
            depth -= 1;
            if depth == 0 {
                return Some((at, end));
            }
            pos = end;
            continue;
        }

        if opens_tag(bytes, at, tag) {
            depth += 1;
            pos = text[at..].find('>').map(|end| at + end + 1)?;
            continue;
        }

        pos = at + 1;
    }

    None
}

/// Comment and raw-text (`<script>`, `<style>`) ranges of `text`, in order.
///
/// Tags inside these ranges are not markup. A raw-text element named `tag`
/// is not skipped.
fn opaque_ranges(text: &str, tag: &str) -> Vec<Range<usize>> {
    let mut ranges = Vec::new();
    let mut pos = 0;

    while let Some(offset) = text[pos..].find('<') {
        let at = pos + offset;
        match opaque_end(text, at, tag) {
            Some(end) => {
                ranges.push(at..end);
                pos = end;
            }
            None => pos = at + 1,
        }
    }

    ranges
}

/// End of the comment or raw-text element starting at `at`, if one does.
/// An unterminated one runs to the end of the text.
fn opaque_end(text: &str, at: usize, tag: &str) -> Option<usize> {
    let bytes = text.as_bytes();

    if bytes[at..].starts_with(b"<!--") {
        return Some(
            text[at + 4..]
                .find("-->")
                .map_or(text.len(), |end| at + 4 + end + 3),
        );
    }

    let raw = ["script", "style"]
        .into_iter()
        .find(|raw| *raw != tag && opens_tag(bytes, at, raw))?;
    Some(match find_ci(text, at + 1, &format!("</{}", raw)) {
        Some(close) => text[close..].find('>').map_or(text.len(), |end| close + end + 1),
        None => text.len(),
    })
}

/// `<tag` followed by whitespace, `/` or `>`.
fn opens_tag(bytes: &[u8], at: usize, tag: &str) -> bool {
    let name_end = at + 1 + tag.len();
    bytes.get(at) == Some(&b'<')
        && bytes
            .get(at + 1..name_end)
            .map_or(false, |name| name.eq_ignore_ascii_case(tag.as_bytes()))
        && bytes
            .get(name_end)
            .map_or(false, |b| b.is_ascii_whitespace() || *b == b'/' || *b == b'>')
}

/// `</tag` followed by whitespace or `>`.
fn closes_tag(bytes: &[u8], at: usize, tag: &str) -> bool {
    let name_end = at + 2 + tag.len();
    bytes.get(at..at + 2) == Some(b"</".as_slice())
        && bytes
            .get(at + 2..name_end)
            .map_or(false, |name| name.eq_ignore_ascii_case(tag.as_bytes()))
        && bytes
            .get(name_end)
            .map_or(false, |b| b.is_ascii_whitespace() || *b == b'>')
}

/// ASCII case-insensitive substring search starting at `from`.
fn find_ci(text: &str, from: usize, needle: &str) -> Option<usize> {
    let bytes = text.as_bytes();
    let needle = needle.as_bytes();
    let last = bytes.len().checked_sub(needle.len())?;
    (from..=last).find(|&i| bytes[i..i + needle.len()].eq_ignore_ascii_case(needle))
}
