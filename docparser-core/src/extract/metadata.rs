use crate::error::Result;
use crate::preprocessors::DocumentHandle;
use crate::preprocessors::pdf::date::format_timestamp;
use crate::types::{MetadataField, MetadataMap};

/// Reads the fixed document-level fields from a handle.
///
/// Every field defaults to the empty string at read time; `logs` is left
/// empty for the parse handler to fill.
#[derive(Debug, Clone, Copy, Default)]
pub struct MetadataExtractor;

impl MetadataExtractor {
    pub fn new() -> Self {
        Self
    }

    pub fn extract(&self, handle: &dyn DocumentHandle) -> Result<MetadataMap> {
        let info = handle.info()?;
        let mut metadata = MetadataMap::new();

        metadata.set(MetadataField::Title, info.title);
        metadata.set(MetadataField::Author, info.author);
        metadata.set(MetadataField::Subject, info.subject);
        metadata.set(MetadataField::Creator, info.creator);
        metadata.set(MetadataField::Producer, info.producer);
        metadata.set(
            MetadataField::CreationDate,
            info.creation_date.as_ref().map(format_timestamp),
        );
        metadata.set(
            MetadataField::ModificationDate,
            info.modification_date.as_ref().map(format_timestamp),
        );
        metadata.set(MetadataField::Keywords, info.keywords);
        metadata.set(
            MetadataField::NumberOfPages,
            Some(handle.page_count().to_string()),
        );

        Ok(metadata)
    }
}
