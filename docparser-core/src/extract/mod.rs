//! Extractors run against an opened document handle.

pub mod metadata;
pub mod page;

pub use metadata::MetadataExtractor;
pub use page::PageTextExtractor;
