//! Data types shared by the extraction pipeline.
//!
//! A run loads one [`SourceDocument`], walks a [`PageMap`] of [`PageSpec`]s,
//! turns each into a [`LocatedRegion`] and, when assembling, an
//! [`AssembledPage`].

mod document;
mod page;
mod region;

pub use document::SourceDocument;
pub use page::{PageMap, PageSpec};
pub use region::{capitalize, AssembledPage, LocatedRegion};
