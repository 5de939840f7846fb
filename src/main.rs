//! Plex MCP Server entry point.
//!
//! Loads configuration, points logging at stderr, builds the server with
//! its Plex client, and parks on the configured transport until shutdown.

use anyhow::{Context, Result};
use tracing::{Level, info};
use tracing_subscriber::{EnvFilter, fmt};

use plex_mcp_server::core::config::LoggingConfig;
use plex_mcp_server::core::{Config, McpServer, TransportService};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env();
    init_logging(&config.logging);

    info!("{} v{} starting", config.server.name, config.server.version);
    info!("Plex server: {}", config.plex.base_url);

    let server = McpServer::new(config.clone()).context("failed to initialize MCP server")?;

    let transport = TransportService::new(config.transport);
    transport.run(server).await?;

    info!("Transport closed, exiting");
    Ok(())
}

/// Set up the tracing subscriber.
///
/// Logs always go to stderr so the stdio transport keeps stdout free for
/// protocol messages.
fn init_logging(config: &LoggingConfig) {
    let level: Level = config.level.parse().unwrap_or(Level::INFO);
    let filter = EnvFilter::from_default_env().add_directive(level.into());

    let builder = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr);

    if config.with_timestamps {
        builder.init();
    } else {
        builder.without_time().init();
    }
}
