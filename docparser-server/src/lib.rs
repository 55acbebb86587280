// Parsing lives in docparser-core
// This crate adds the gRPC surface, configuration and process setup

pub mod config;
pub mod service;
pub mod telemetry;

/// Generated wire types for `document_parser.proto`
pub mod proto {
    tonic::include_proto!("document_parser");
}

pub use config::{ErrorMode, LogFormat, ServerConfig};
pub use service::{ParserService, ERROR_HEADER};
pub use telemetry::init_tracing;
