// gRPC adapter
//
// Thin translation between the wire messages and DocumentParser. Hashing and
// parsing are CPU-bound, so both run on tokio's blocking pool.

use crate::config::ErrorMode;
use crate::proto::document_parser_service_server::DocumentParserService;
use crate::proto::{DocumentParserRequest, DocumentParserResponse};
use docparser_core::digest::document_sha256;
use docparser_core::{DocumentError, DocumentParser, ParseResponse};
use std::collections::HashMap;
use std::sync::Arc;
use tonic::metadata::MetadataValue;
use tonic::{Request, Response, Status};
use tracing::{Instrument, Span};
use uuid::Uuid;

/// Response header carrying the failure kind in `empty_response` mode
pub const ERROR_HEADER: &str = "x-docparser-error";

/// Failure kind reported when the blocking task itself dies
const INTERNAL_KIND: &str = "internal";

pub struct ParserService {
    parser: Arc<DocumentParser>,
    error_mode: ErrorMode,
}

impl ParserService {
    pub fn new(parser: Arc<DocumentParser>, error_mode: ErrorMode) -> Self {
        Self { parser, error_mode }
    }

    async fn parse_blocking(&self, bytes: Vec<u8>) -> Result<DocumentParserResponse, Failure> {
        let parser = self.parser.clone();
        let span = Span::current();
        let parsed = tokio::task::spawn_blocking(move || parse_in_span(&parser, &bytes, &span))
            .await
            .map_err(|e| Failure::Internal(e.to_string()))?;

        parsed
            .and_then(into_wire)
            .map_err(Failure::Document)
    }

    fn reply_with_failure(
        &self,
        failure: Failure,
    ) -> Result<Response<DocumentParserResponse>, Status> {
        tracing::error!(kind = failure.kind(), "Failed to process document: {}", failure);

        match self.error_mode {
            ErrorMode::EmptyResponse => {
                let mut response = Response::new(DocumentParserResponse::default());
                response
                    .metadata_mut()
                    .insert(ERROR_HEADER, MetadataValue::from_static(failure.kind()));
                Ok(response)
            }
            ErrorMode::Status => Err(failure.into_status()),
        }
    }
}

#[tonic::async_trait]
impl DocumentParserService for ParserService {
    async fn process_document(
        &self,
        request: Request<DocumentParserRequest>,
    ) -> Result<Response<DocumentParserResponse>, Status> {
        let bytes = request.into_inner().file_content;
        let span = request_span(bytes.len());

        async move {
            match self.parse_blocking(bytes).await {
                Ok(reply) => {
                    tracing::debug!(pages = reply.pages.len(), "Document processed");
                    Ok(Response::new(reply))
                }
                Err(failure) => self.reply_with_failure(failure),
            }
        }
        .instrument(span)
        .await
    }
}

/// Per-call span; `sha256` is filled in once the blocking task runs
fn request_span(byte_count: usize) -> Span {
    tracing::info_span!(
        "process_document",
        request_id = %Uuid::new_v4(),
        bytes = byte_count,
        sha256 = tracing::field::Empty,
    )
}

/// Blocking half of a call: fingerprint the upload, then parse it
fn parse_in_span(
    parser: &DocumentParser,
    bytes: &[u8],
    span: &Span,
) -> docparser_core::Result<ParseResponse> {
    let _entered = span.enter();
    span.record("sha256", document_sha256(bytes).as_str());
    parser.parse(bytes)
}

#[derive(Debug)]
enum Failure {
    Document(DocumentError),
    Internal(String),
}

impl Failure {
    fn kind(&self) -> &'static str {
        match self {
            Failure::Document(e) => e.kind(),
            Failure::Internal(_) => INTERNAL_KIND,
        }
    }

    fn into_status(self) -> Status {
        match self {
            Failure::Document(e) if e.kind() == "open" => Status::invalid_argument(e.to_string()),
            Failure::Document(e) => Status::internal(e.to_string()),
            Failure::Internal(message) => Status::internal(message),
        }
    }
}

impl std::fmt::Display for Failure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Failure::Document(e) => write!(f, "{e}"),
            Failure::Internal(message) => write!(f, "parse task failed: {message}"),
        }
    }
}

/// Convert a parse result into the wire message.
///
/// Page numbers travel as int32; anything past `i32::MAX` can't be encoded.
pub fn into_wire(response: ParseResponse) -> Result<DocumentParserResponse, DocumentError> {
    let (pages, metadata) = response.into_parts();

    let pages = pages
        .into_iter()
        .map(|(page, text)| {
            i32::try_from(page)
                .map(|number| (number, text))
                .map_err(|_| DocumentError::PageExtraction {
                    page,
                    reason: "page number exceeds int32 range".to_string(),
                })
        })
        .collect::<Result<HashMap<i32, String>, _>>()?;

    Ok(DocumentParserResponse {
        pages,
        metadata: metadata.into_inner(),
    })
}
