//! MCP Server Entry Point
//!
//! Initializes logging, loads configuration, and serves both MCP transports
//! over HTTP.

use anyhow::Result;
use tracing::{Level, error, info};
use tracing_subscriber::{EnvFilter, fmt};

use firecrawl_mcp_server::core::{Config, HttpTransport, McpServer};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration from environment (and .env, if present)
    let config = Config::from_env();

    init_logging(&config.logging.level);

    info!("Starting {} v{}", config.server.name, config.server.version);

    if config.firecrawl.api_key.is_missing() {
        error!("FIRECRAWL_API_KEY is not set; firecrawl_scrape and firecrawl_search will fail");
    }

    let server = McpServer::new(config.clone())?;

    info!("Server initialized");

    HttpTransport::new(config.transport).run(server).await?;

    info!("Server shutting down");

    Ok(())
}

/// Initialize the logging subsystem.
///
/// Logs go to stderr so they never mix with protocol output.
fn init_logging(level: &str) {
    let level = match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}
