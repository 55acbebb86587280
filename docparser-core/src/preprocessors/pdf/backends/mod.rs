//! PDF Backend trait and document handle
//!
//! Defines the interface that all PDF backends must implement. A backend
//! opens raw bytes into a [`DocumentHandle`]; the handle answers page count,
//! document-information and per-page text queries until it is closed.

use crate::error::Result;
use crate::types::DocumentInfo;

/// Backend trait for PDF opening
pub trait PdfBackend: Send + Sync {
    /// Open PDF bytes as a document handle.
    ///
    /// Fails with [`crate::DocumentError::Open`] when the bytes are not a
    /// readable PDF.
    fn open(&self, pdf_bytes: &[u8]) -> Result<Box<dyn DocumentHandle>>;

    /// Backend identifier for logging/debugging
    fn name(&self) -> &str;

    /// Check if backend is healthy/ready
    fn is_healthy(&self) -> bool;
}

/// An opened document. Owned by exactly one parse request and used from
/// the thread that opened it.
pub trait DocumentHandle {
    /// Number of pages (may be zero)
    fn page_count(&self) -> u32;

    /// Document-information fields; absent fields are `None`.
    ///
    /// Fails with [`crate::DocumentError::MetadataRead`] only if the
    /// information structure itself is unreadable.
    fn info(&self) -> Result<DocumentInfo>;

    /// Plain text of one 1-based page, in the backend's reading order
    fn page_text(&mut self, page: u32) -> Result<String>;

    /// Release resources held by the handle. Called once by the parser.
    fn close(&mut self) -> Result<()> {
        Ok(())
    }
}

#[cfg(feature = "lopdf-backend")]
pub mod lopdf_backend;

#[cfg(feature = "lopdf-backend")]
pub use lopdf_backend::LopdfBackend;
