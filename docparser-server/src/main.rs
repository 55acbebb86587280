use anyhow::{bail, Context, Result};
use clap::Parser;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tokio_stream::wrappers::TcpListenerStream;
use tonic::transport::Server;

use docparser_core::DocumentParser;
use docparser_server::proto::document_parser_service_server::DocumentParserServiceServer;
use docparser_server::{init_tracing, ParserService, ServerConfig};

#[derive(Parser)]
#[command(name = "docparser-server")]
#[command(about = "gRPC service returning per-page text and metadata for PDF documents")]
struct Args {
    /// Path to config file (YAML format)
    #[arg(short, long)]
    config: Option<String>,

    /// Bind address, overrides config and DOCPARSER_HOST
    #[arg(long)]
    host: Option<String>,

    /// Bind port, overrides config and DOCPARSER_PORT
    #[arg(short, long)]
    port: Option<u16>,

    /// Print the effective configuration and exit
    #[arg(long)]
    show_config: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = resolve_config(&args)?;

    if args.show_config {
        print!("{}", serde_yaml::to_string(&config)?);
        return Ok(());
    }

    init_tracing(&config.log_level, config.log_format);

    let parser = DocumentParser::new_lopdf();
    if !parser.is_healthy() {
        bail!("PDF backend {} is not ready", parser.backend_name());
    }
    tracing::info!(
        backend = parser.backend_name(),
        error_mode = %config.error_mode,
        "Document parser ready"
    );

    let address = config.bind_address();
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind gRPC server to {address}"))?;

    let service = ParserService::new(Arc::new(parser), config.error_mode);
    let server = DocumentParserServiceServer::new(service)
        .max_decoding_message_size(config.max_message_bytes)
        .max_encoding_message_size(config.max_message_bytes);

    println!("gRPC server started on port {}", config.port);
    tracing::info!(%address, "Listening");

    Server::builder()
        .add_service(server)
        .serve_with_incoming_shutdown(TcpListenerStream::new(listener), shutdown_signal())
        .await
        .context("gRPC server terminated with an error")?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Defaults, then YAML file, then environment, then CLI flags
fn resolve_config(args: &Args) -> Result<ServerConfig> {
    let mut config = ServerConfig::load_with_fallback(args.config.as_deref()).apply_env()?;

    if let Some(host) = &args.host {
        config.host = host.clone();
    }
    if let Some(port) = args.port {
        config.port = port;
    }

    Ok(config)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown...");
        },
    }
}
