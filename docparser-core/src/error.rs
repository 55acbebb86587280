//! Document error types
//!
//! Every failure of a parse request maps onto one of these variants. None of
//! them is recovered inside the handler; they propagate to the caller.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DocumentError {
    /// Byte buffer is not an openable document of a supported format
    #[error("Failed to open document: {0}")]
    Open(String),

    /// The document-information structure itself is unreadable
    #[error("Failed to read document metadata: {0}")]
    MetadataRead(String),

    /// Page outside `1..=page_count`
    #[error("Page {page} not found (document has {page_count} pages)")]
    PageOutOfRange { page: u32, page_count: u32 },

    /// Page content could not be decoded
    #[error("Failed to extract text from page {page}: {reason}")]
    PageExtraction { page: u32, reason: String },

    /// Releasing the document handle failed
    #[error("Failed to release document: {0}")]
    Close(String),
}

impl DocumentError {
    /// Stable snake_case label for logs and transport-level error reporting
    pub fn kind(&self) -> &'static str {
        match self {
            DocumentError::Open(_) => "open",
            DocumentError::MetadataRead(_) => "metadata_read",
            DocumentError::PageOutOfRange { .. } | DocumentError::PageExtraction { .. } => {
                "page_extraction"
            }
            DocumentError::Close(_) => "close",
        }
    }
}

/// Result type alias for document operations
pub type Result<T> = std::result::Result<T, DocumentError>;
