use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

// ===== METADATA FIELDS =====
// The response carries a fixed key set. Every key is present in every
// MetadataMap from construction onwards; absent document values are "".

/// One of the fixed metadata keys returned for every parsed document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetadataField {
    Title,
    Author,
    Subject,
    Creator,
    Producer,
    CreationDate,
    ModificationDate,
    Keywords,
    NumberOfPages,
    Logs,
}

/// All metadata keys, in the order they are documented
pub const METADATA_FIELDS: [MetadataField; 10] = [
    MetadataField::Title,
    MetadataField::Author,
    MetadataField::Subject,
    MetadataField::Creator,
    MetadataField::Producer,
    MetadataField::CreationDate,
    MetadataField::ModificationDate,
    MetadataField::Keywords,
    MetadataField::NumberOfPages,
    MetadataField::Logs,
];

impl MetadataField {
    /// Wire key for this field
    pub fn key(&self) -> &'static str {
        match self {
            MetadataField::Title => "title",
            MetadataField::Author => "author",
            MetadataField::Subject => "subject",
            MetadataField::Creator => "creator",
            MetadataField::Producer => "producer",
            MetadataField::CreationDate => "creation_date",
            MetadataField::ModificationDate => "modification_date",
            MetadataField::Keywords => "keywords",
            MetadataField::NumberOfPages => "number_of_pages",
            MetadataField::Logs => "logs",
        }
    }
}

impl fmt::Display for MetadataField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Field name -> field value. Seeded with every [`MetadataField`] mapped to
/// the empty string, so no key is ever missing and no value is ever null.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetadataMap {
    values: HashMap<String, String>,
}

impl MetadataMap {
    pub fn new() -> Self {
        let values = METADATA_FIELDS
            .iter()
            .map(|field| (field.key().to_string(), String::new()))
            .collect();
        Self { values }
    }

    /// Set a field; `None` stores the empty string
    pub fn set(&mut self, field: MetadataField, value: Option<String>) {
        self.values
            .insert(field.key().to_string(), value.unwrap_or_default());
    }

    pub fn get(&self, field: MetadataField) -> &str {
        self.values
            .get(field.key())
            .map(String::as_str)
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &String)> {
        self.values.iter()
    }

    pub fn into_inner(self) -> HashMap<String, String> {
        self.values
    }
}

impl Default for MetadataMap {
    fn default() -> Self {
        Self::new()
    }
}

// ===== PAGES =====

/// 1-based page number -> extracted plain text.
/// Ordered by page number; pages are contiguous from 1 to N.
pub type PageMap = BTreeMap<u32, String>;

// ===== RAW DOCUMENT INFORMATION =====

/// Document-information fields as read from the document itself.
/// Every field is optional at the source; defaulting happens in the
/// metadata extractor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentInfo {
    pub title: Option<String>,
    pub author: Option<String>,
    pub subject: Option<String>,
    pub creator: Option<String>,
    pub producer: Option<String>,
    pub creation_date: Option<DateTime<Utc>>,
    pub modification_date: Option<DateTime<Utc>>,
    pub keywords: Option<String>,
}

// ===== RESPONSE =====

/// Result of parsing one document. Built once by the parse handler and never
/// mutated afterwards; callers get read-only views or take it apart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseResponse {
    pages: PageMap,
    metadata: MetadataMap,
}

impl ParseResponse {
    pub(crate) fn new(pages: PageMap, metadata: MetadataMap) -> Self {
        Self { pages, metadata }
    }

    pub fn pages(&self) -> &PageMap {
        &self.pages
    }

    pub fn metadata(&self) -> &MetadataMap {
        &self.metadata
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Consume the response, e.g. to move the maps into a wire message
    pub fn into_parts(self) -> (PageMap, MetadataMap) {
        (self.pages, self.metadata)
    }
}
