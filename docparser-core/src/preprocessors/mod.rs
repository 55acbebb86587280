//! Document Preprocessors
//!
//! This module provides the opening layer: raw uploaded bytes in, an opened
//! document handle out.
//!
//! ## Architecture
//!
//! ```text
//! Raw bytes
//!     ↓
//! [Format-specific Preprocessor → Backend]
//!     ↓
//! DocumentHandle (page count, document info, per-page text)
//!     ↓
//! [Metadata / Page Text extractors]
//! ```
//!
//! ## Available Preprocessors
//!
//! - `PdfPreprocessor` - PDF documents via the lopdf backend

pub mod pdf;
pub mod preprocessor;

// Re-export main types
pub use pdf::{DocumentHandle, PdfBackend, PdfBackendImpl, PdfPreprocessor};
pub use preprocessor::Preprocessor;

// Re-export backends
#[cfg(feature = "lopdf-backend")]
pub use pdf::LopdfBackend;
