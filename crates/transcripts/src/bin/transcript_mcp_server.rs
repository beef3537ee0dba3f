//cargo run --package transcripts --bin transcript_mcp_server -- --transport sse
use clap::{Parser, ValueEnum};
use rmcp::{transport::sse_server::SseServer, transport::stdio, ServiceExt};
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing_subscriber::{util::SubscriberInitExt, EnvFilter};
use transcripts::{mcp::TranscriptMcpServer, TranscriptConfig, TranscriptService};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Transport {
    Stdio,
    Sse,
}

#[derive(Parser)]
#[command(author, version, about = "YouTube transcript MCP server", long_about = None)]
struct Args {
    /// Path to a .toml or .json configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[arg(long, value_enum, env = "TRANSPORT", default_value = "stdio", ignore_case = true)]
    transport: Transport,

    /// Listen address for the SSE transport
    #[arg(long, default_value = "0.0.0.0:8000")]
    bind: SocketAddr,

    /// Log at debug level
    #[arg(long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let args = Args::parse();

    let level = if args.debug { tracing::Level::DEBUG } else { tracing::Level::INFO };

    // Set up logging to stderr (MCP uses stdout for protocol communication)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .finish()
        .init();

    let config = TranscriptConfig::load(args.config.as_deref())?;
    tracing::info!(
        "Starting YouTube transcript MCP server ({:?}, yt-dlp: {}, timeout: {}s)",
        args.transport,
        config.yt_dlp_path.display(),
        config.timeout_secs
    );

    let service = TranscriptService::from_config(&config);

    match args.transport {
        Transport::Stdio => serve_stdio(service).await,
        Transport::Sse => serve_sse(service, args.bind).await,
    }
}

async fn serve_stdio(service: TranscriptService) -> color_eyre::Result<()> {
    let server = TranscriptMcpServer::new(service);

    let service = match server.serve(stdio()).await {
        Ok(service) => service,
        Err(e) => {
            tracing::error!("Failed to start MCP server: {:?}", e);
            return Err(e.into());
        }
    };

    tracing::info!("MCP server started, listening on stdio");

    tokio::select! {
        result = service.waiting() => {
            match result {
                Ok(_) => tracing::info!("MCP server completed successfully"),
                Err(e) => {
                    tracing::error!("MCP server error: {:?}", e);
                    return Err(e.into());
                }
            }
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Received Ctrl+C, shutting down gracefully");
        }
    }

    tracing::info!("MCP server shut down");
    Ok(())
}

async fn serve_sse(service: TranscriptService, bind: SocketAddr) -> color_eyre::Result<()> {
    let cancellation = SseServer::serve(bind)
        .await?
        .with_service(move || TranscriptMcpServer::new(service.clone()));

    tracing::info!("MCP server listening for SSE connections on {}", bind);

    tokio::signal::ctrl_c().await?;
    tracing::info!("Received Ctrl+C, shutting down gracefully");
    cancellation.cancel();

    tracing::info!("MCP server shut down");
    Ok(())
}
