//! lopdf backend for PDF processing
//!
//! Reads the PDF object graph in-process with the `lopdf` crate. No native
//! libraries or external processes are involved, so the backend is always
//! healthy once compiled in.
//!
//! # Resource Management
//! The parsed object graph lives in the [`LopdfDocument`] handle and is
//! dropped when the handle is closed (or dropped on an error path).

use super::{DocumentHandle, PdfBackend};
use crate::error::{DocumentError, Result};
use crate::preprocessors::pdf::date::parse_pdf_date;
use crate::preprocessors::pdf::text_string::decode_text_string;
use crate::types::DocumentInfo;
use ::lopdf::{Dictionary, Document, Object};

/// Pure-Rust PDF backend built on `lopdf`
#[derive(Debug, Clone, Copy, Default)]
pub struct LopdfBackend;

impl LopdfBackend {
    pub fn new() -> Self {
        Self
    }
}

impl PdfBackend for LopdfBackend {
    fn open(&self, pdf_bytes: &[u8]) -> Result<Box<dyn DocumentHandle>> {
        if pdf_bytes.is_empty() {
            return Err(DocumentError::Open("empty input".to_string()));
        }

        let document =
            Document::load_mem(pdf_bytes).map_err(|e| DocumentError::Open(e.to_string()))?;

        // Page numbers in page-tree order; keys are 1..=N
        let page_count = document.get_pages().len();
        let page_count = u32::try_from(page_count)
            .map_err(|_| DocumentError::Open(format!("too many pages: {page_count}")))?;

        Ok(Box::new(LopdfDocument {
            document: Some(document),
            page_count,
        }))
    }

    fn name(&self) -> &str {
        "LopdfBackend"
    }

    fn is_healthy(&self) -> bool {
        true
    }
}

/// Opened lopdf document
pub struct LopdfDocument {
    document: Option<Document>,
    page_count: u32,
}

impl LopdfDocument {
    fn document(&self) -> Result<&Document> {
        self.document
            .as_ref()
            .ok_or_else(|| DocumentError::Close("document already released".to_string()))
    }

    /// Trailer `/Info` entry, following one level of indirection.
    /// A missing entry is not an error; an unreadable one is.
    fn info_dictionary<'a>(&self, document: &'a Document) -> Result<Option<&'a Dictionary>> {
        let entry = match document.trailer.get(b"Info") {
            Ok(entry) => entry,
            Err(_) => return Ok(None),
        };

        let object = resolve(document, entry).map_err(|e| {
            DocumentError::MetadataRead(format!("dangling /Info reference: {e}"))
        })?;

        object
            .as_dict()
            .map(Some)
            .map_err(|e| DocumentError::MetadataRead(format!("/Info is not a dictionary: {e}")))
    }
}

impl DocumentHandle for LopdfDocument {
    fn page_count(&self) -> u32 {
        self.page_count
    }

    fn info(&self) -> Result<DocumentInfo> {
        let document = self.document()?;
        let Some(info) = self.info_dictionary(document)? else {
            return Ok(DocumentInfo::default());
        };

        let text = |key: &[u8]| text_field(document, info, key);
        let date = |key: &[u8]| text_field(document, info, key).and_then(|s| parse_pdf_date(&s));

        Ok(DocumentInfo {
            title: text(b"Title"),
            author: text(b"Author"),
            subject: text(b"Subject"),
            creator: text(b"Creator"),
            producer: text(b"Producer"),
            creation_date: date(b"CreationDate"),
            modification_date: date(b"ModDate"),
            keywords: text(b"Keywords"),
        })
    }

    fn page_text(&mut self, page: u32) -> Result<String> {
        if page == 0 || page > self.page_count {
            return Err(DocumentError::PageOutOfRange {
                page,
                page_count: self.page_count,
            });
        }

        self.document()?
            .extract_text(&[page])
            .map_err(|e| DocumentError::PageExtraction {
                page,
                reason: e.to_string(),
            })
    }

    fn close(&mut self) -> Result<()> {
        match self.document.take() {
            Some(document) => {
                drop(document);
                Ok(())
            }
            None => Err(DocumentError::Close("document already released".to_string())),
        }
    }
}

fn resolve<'a>(document: &'a Document, object: &'a Object) -> ::lopdf::Result<&'a Object> {
    match object {
        Object::Reference(id) => document.get_object(*id),
        other => Ok(other),
    }
}

/// A string-valued entry of the information dictionary. Entries that are
/// missing, dangling or not strings read as absent.
fn text_field(document: &Document, info: &Dictionary, key: &[u8]) -> Option<String> {
    let value = info.get(key).ok()?;
    let value = resolve(document, value).ok()?;
    value.as_str().ok().map(decode_text_string)
}
