//! gRPC adapter tests.
//!
//! Most cases call the service trait method directly with a `tonic::Request`.
//! The route check goes through a real socket so the served path is the one
//! existing clients dial.

use docparser_core::{CapturingSink, DocumentParser};
use docparser_server::proto::document_parser_service_server::DocumentParserService;
use docparser_server::proto::{DocumentParserRequest, DocumentParserResponse};
use docparser_server::{ErrorMode, ParserService, ERROR_HEADER};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};
use std::sync::Arc;
use tonic::{Code, Request, Response, Status};

// ============================================================================
// Helpers
// ============================================================================

fn pdf_with_pages(texts: &[&str], title: Option<&str>) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let mut kids: Vec<Object> = Vec::new();
    for text in texts {
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 12.into()]),
                Operation::new("Td", vec![72.into(), 720.into()]),
                Operation::new("Tj", vec![Object::string_literal(*text)]),
                Operation::new("ET", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    if let Some(title) = title {
        let info_id = doc.add_object(dictionary! {
            "Title" => Object::string_literal(title),
        });
        doc.trailer.set("Info", info_id);
    }

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).unwrap();
    bytes
}

fn service(error_mode: ErrorMode) -> ParserService {
    let parser = DocumentParser::new_lopdf_with_sink(Arc::new(CapturingSink::new()));
    ParserService::new(Arc::new(parser), error_mode)
}

async fn call(
    service: &ParserService,
    file_content: Vec<u8>,
) -> Result<Response<DocumentParserResponse>, Status> {
    service
        .process_document(Request::new(DocumentParserRequest { file_content }))
        .await
}

fn error_header(response: &Response<DocumentParserResponse>) -> Option<String> {
    response
        .metadata()
        .get(ERROR_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}

// ============================================================================
// Successful calls
// ============================================================================

mod success {
    use super::*;

    #[tokio::test]
    async fn two_page_document_round_trips_to_wire_maps() {
        let bytes = pdf_with_pages(&["Hello page", "Goodbye page"], Some("Greetings"));

        let response = call(&service(ErrorMode::EmptyResponse), bytes).await.unwrap();

        assert_eq!(error_header(&response), None);
        let reply = response.into_inner();
        let mut numbers: Vec<i32> = reply.pages.keys().copied().collect();
        numbers.sort_unstable();
        assert_eq!(numbers, vec![1, 2]);
        assert!(reply.pages[&1].contains("Hello page"));
        assert!(reply.pages[&2].contains("Goodbye page"));
        assert_eq!(reply.metadata["title"], "Greetings");
        assert_eq!(reply.metadata["number_of_pages"], "2");
        assert_eq!(reply.metadata.len(), 10);
    }

    #[tokio::test]
    async fn zero_page_document_is_not_an_error() {
        let bytes = pdf_with_pages(&[], None);

        let response = call(&service(ErrorMode::Status), bytes).await.unwrap();

        assert_eq!(error_header(&response), None);
        let reply = response.into_inner();
        assert!(reply.pages.is_empty());
        assert_eq!(reply.metadata["number_of_pages"], "0");
        assert_eq!(reply.metadata["title"], "");
    }

    #[tokio::test]
    async fn concurrent_calls_share_one_service() {
        let service = Arc::new(service(ErrorMode::EmptyResponse));
        let bytes = pdf_with_pages(&["shared"], Some("Shared"));

        let calls: Vec<_> = (0..4)
            .map(|_| {
                let service = service.clone();
                let bytes = bytes.clone();
                tokio::spawn(async move { call(&service, bytes).await })
            })
            .collect();

        for handle in calls {
            let reply = handle.await.unwrap().unwrap().into_inner();
            assert_eq!(reply.metadata["title"], "Shared");
            assert_eq!(reply.pages.len(), 1);
        }
    }
}

// ============================================================================
// Failed calls
// ============================================================================

mod failure {
    use super::*;

    #[tokio::test]
    async fn invalid_bytes_yield_empty_maps_with_error_header() {
        let response = call(&service(ErrorMode::EmptyResponse), b"not a pdf".to_vec())
            .await
            .unwrap();

        assert_eq!(error_header(&response).as_deref(), Some("open"));
        let reply = response.into_inner();
        assert!(reply.pages.is_empty());
        assert!(reply.metadata.is_empty());
    }

    #[tokio::test]
    async fn empty_request_yields_empty_maps() {
        let response = call(&service(ErrorMode::EmptyResponse), Vec::new())
            .await
            .unwrap();

        assert_eq!(error_header(&response).as_deref(), Some("open"));
        assert_eq!(response.into_inner(), DocumentParserResponse::default());
    }

    #[tokio::test]
    async fn status_mode_rejects_invalid_bytes() {
        let status = call(&service(ErrorMode::Status), b"not a pdf".to_vec())
            .await
            .unwrap_err();

        assert_eq!(status.code(), Code::InvalidArgument);
    }
}

// ============================================================================
// Wire route
// ============================================================================

mod route {
    use super::*;
    use docparser_server::proto::document_parser_service_server::DocumentParserServiceServer;
    use tokio::net::TcpListener;
    use tokio_stream::wrappers::TcpListenerStream;
    use tonic::codec::ProstCodec;
    use tonic::codegen::http::uri::PathAndQuery;
    use tonic::transport::{Endpoint, Server};

    /// Route used by existing Python clients (`stub.processDocument`)
    const PROCESS_DOCUMENT_ROUTE: &str = "/document_parser.DocumentParserService/processDocument";

    #[tokio::test]
    async fn camel_case_route_is_served() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();
        let server = Server::builder()
            .add_service(DocumentParserServiceServer::new(service(ErrorMode::Status)))
            .serve_with_incoming(TcpListenerStream::new(listener));
        let server = tokio::spawn(server);

        let channel = Endpoint::from_shared(format!("http://{address}"))
            .unwrap()
            .connect()
            .await
            .unwrap();
        let mut grpc = tonic::client::Grpc::new(channel);
        grpc.ready().await.unwrap();

        let codec: ProstCodec<DocumentParserRequest, DocumentParserResponse> =
            ProstCodec::default();
        let request = Request::new(DocumentParserRequest {
            file_content: pdf_with_pages(&["over the wire"], Some("Routed")),
        });
        let reply = grpc
            .unary(request, PathAndQuery::from_static(PROCESS_DOCUMENT_ROUTE), codec)
            .await
            .unwrap()
            .into_inner();

        assert_eq!(reply.metadata["title"], "Routed");
        assert!(reply.pages[&1].contains("over the wire"));

        server.abort();
    }
}
