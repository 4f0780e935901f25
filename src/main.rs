mod api;
mod config;
mod parse;
mod report;
mod server;
mod types;

use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use rmcp::{transport::stdio, ServiceExt};
use tracing::{error, info};

use api::{ApiClient, BoardApi};
use config::AppConfig;
use server::HotBoardServer;
use types::BoardRequest;

const TOOL_NAME: &str = "douyin-hot-mcp";

#[derive(Parser)]
#[command(name = TOOL_NAME, version, about = "MCP server for the Douyin hot board")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the MCP tools over stdio (the default).
    Serve,
    /// Issue one probe call and print the rendered board, without serving.
    Probe,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // stdout carries the MCP transport, so logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    // Auto-generate config file on first run
    let config_path = AppConfig::config_path()?;
    if !config_path.exists() {
        let path = AppConfig::save_default()?;
        info!("created default config: {}", path.display());
    }

    let config = AppConfig::load()?;
    info!(
        "starting {} (api: {}, token configured: {})",
        TOOL_NAME,
        config.api.base_url,
        config.api.token_configured()
    );

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(config).await,
        Command::Probe => probe(config).await,
    }
}

async fn serve(config: AppConfig) -> Result<()> {
    let api: Arc<dyn BoardApi> = Arc::new(ApiClient::new(&config.api)?);
    let service = HotBoardServer::new(api, config.api)
        .serve(stdio())
        .await
        .inspect_err(|e| error!("failed to start server: {}", e))?;

    service.waiting().await?;
    info!("server shut down");
    Ok(())
}

/// One-shot check against the live API: fetch with default parameters and
/// print a 5-entry board. Parse failures are reported but still exit
/// cleanly; only a failed HTTP call is an error.
async fn probe(config: AppConfig) -> Result<()> {
    let client = ApiClient::new(&config.api)?;
    let raw = client.fetch_board(&BoardRequest::default()).await?;

    let board = parse::parse_board(&raw);
    if board.success {
        println!("{}", report::render_board(&board, 5));
    } else {
        println!("{}", report::render_failure(&board));
        println!("(API reachable; payload did not match the expected shape)");
    }
    Ok(())
}
