use crate::error::{DocumentError, Result};
use crate::preprocessors::DocumentHandle;

/// Single-page text extractor.
///
/// Holds a start/end page window that is reconfigured before every page, so
/// each call produces exactly one page's text. One instance is reused
/// serially across all pages of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageTextExtractor {
    start_page: u32,
    end_page: u32,
}

impl PageTextExtractor {
    pub fn new() -> Self {
        Self {
            start_page: 1,
            end_page: 1,
        }
    }

    /// Bind the extractor to one 1-based page
    pub fn set_page(&mut self, page: u32) {
        self.start_page = page;
        self.end_page = page;
    }

    pub fn current_page(&self) -> u32 {
        self.start_page
    }

    /// Extract the text of the currently bound page, unmodified
    pub fn extract(&self, handle: &mut dyn DocumentHandle) -> Result<String> {
        debug_assert_eq!(self.start_page, self.end_page);

        let page = self.start_page;
        let page_count = handle.page_count();
        if page == 0 || page > page_count {
            return Err(DocumentError::PageOutOfRange { page, page_count });
        }

        handle.page_text(page)
    }

    /// Bind to `page` and extract it
    pub fn extract_page(&mut self, handle: &mut dyn DocumentHandle, page: u32) -> Result<String> {
        self.set_page(page);
        self.extract(handle)
    }
}

impl Default for PageTextExtractor {
    fn default() -> Self {
        Self::new()
    }
}
