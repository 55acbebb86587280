// Preprocessor abstraction for document opening
//
// This module defines the boundary between raw uploaded bytes and the
// extraction logic. Preprocessors own format detection and opening; the
// parse handler and extractors only ever see a DocumentHandle.

use crate::error::Result;
use crate::preprocessors::pdf::backends::DocumentHandle;

/// Preprocessor trait - opens documents of one format
///
/// Everything after `open` works against [`DocumentHandle`] and is
/// backend-agnostic.
pub trait Preprocessor: Send + Sync {
    /// Open raw document bytes
    fn open(&self, bytes: &[u8]) -> Result<Box<dyn DocumentHandle>>;

    /// Get preprocessor name for debugging/logging
    fn name(&self) -> &str;

    /// Check if the underlying backend is ready
    fn is_healthy(&self) -> bool;
}
