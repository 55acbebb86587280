//! PDF Preprocessor
//!
//! Main preprocessor for PDF documents. Uses pluggable backends to open PDF
//! bytes into a document handle.

pub mod backends;
pub mod date;
pub mod text_string;

use crate::error::Result;
use crate::preprocessors::preprocessor::Preprocessor;

pub use backends::{DocumentHandle, PdfBackend};

#[cfg(feature = "lopdf-backend")]
pub use backends::LopdfBackend;

/// Backend enum for runtime backend selection
pub enum PdfBackendImpl {
    #[cfg(feature = "lopdf-backend")]
    Lopdf(LopdfBackend),
}

impl PdfBackend for PdfBackendImpl {
    fn open(&self, pdf_bytes: &[u8]) -> Result<Box<dyn DocumentHandle>> {
        match self {
            #[cfg(feature = "lopdf-backend")]
            PdfBackendImpl::Lopdf(backend) => backend.open(pdf_bytes),
        }
    }

    fn name(&self) -> &str {
        match self {
            #[cfg(feature = "lopdf-backend")]
            PdfBackendImpl::Lopdf(backend) => backend.name(),
        }
    }

    fn is_healthy(&self) -> bool {
        match self {
            #[cfg(feature = "lopdf-backend")]
            PdfBackendImpl::Lopdf(backend) => backend.is_healthy(),
        }
    }
}

/// PDF Preprocessor with pluggable backend
pub struct PdfPreprocessor {
    backend: PdfBackendImpl,
}

impl PdfPreprocessor {
    /// Create PdfPreprocessor with the lopdf backend
    #[cfg(feature = "lopdf-backend")]
    pub fn new_with_lopdf() -> Self {
        Self {
            backend: PdfBackendImpl::Lopdf(LopdfBackend::new()),
        }
    }
}

impl Preprocessor for PdfPreprocessor {
    fn open(&self, bytes: &[u8]) -> Result<Box<dyn DocumentHandle>> {
        self.backend.open(bytes)
    }

    fn name(&self) -> &str {
        self.backend.name()
    }

    fn is_healthy(&self) -> bool {
        self.backend.is_healthy()
    }
}
