// Docparser Core Library
//
// Opens PDF bytes through a pluggable backend and turns them into per-page
// text plus a fixed set of document metadata fields.

pub mod digest;
pub mod error;
pub mod extract;
pub mod log;
pub mod preprocessors;
pub mod processor;
pub mod sink;
pub mod types;

// Re-export main types and functions for easy use
pub use error::{DocumentError, Result};
pub use extract::{MetadataExtractor, PageTextExtractor};
pub use log::ProcessingLog;
pub use preprocessors::{DocumentHandle, PdfBackend, PdfPreprocessor, Preprocessor};
pub use processor::DocumentParser;
pub use sink::{CapturingSink, EventLevel, EventSink, TracingSink};
pub use types::*;

// Re-export backends for direct use
#[cfg(feature = "lopdf-backend")]
pub use preprocessors::LopdfBackend;
