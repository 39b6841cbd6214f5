//! splunk-mcp - MCP server for Splunk saved searches.
//!
//! Responsibilities:
//! - Load `.env` and environment configuration.
//! - Serve the saved-search tools over stdio, or run `doctor`, `tools` or `searches`.
//!
//! Does NOT handle:
//! - Tool semantics (see `splunk_mcp::proxy`).
//!
//! Invariants:
//! - `load_dotenv()` runs BEFORE CLI parsing so `.env` can provide clap env defaults.
//! - stdout carries only JSON-RPC (serve) or JSON reports; all logs go to stderr.
//! - Configuration errors exit with status 1 before anything is served.

mod args;

use std::sync::Arc;

use anyhow::{Context, Result};
use args::{Cli, Command};
use clap::Parser;
use rmcp::ServiceExt;
use rmcp::transport::stdio;
use splunk_config::{Config, ConfigLoader};
use splunk_mcp::doctor::run_diagnostics;
use splunk_mcp::{ProxyError, SavedSearchHandler, SavedSearchProxy, SavedSearchTool};
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

const EXIT_FAILURE: i32 = 1;

#[tokio::main]
async fn main() {
    if let Err(e) = ConfigLoader::new().load_dotenv() {
        eprintln!("Failed to load environment: {}", e);
        std::process::exit(EXIT_FAILURE);
    }

    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    let exit_code = match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{:#}", e);
            EXIT_FAILURE
        }
    };

    std::process::exit(exit_code);
}

async fn run(cli: Cli) -> Result<i32> {
    match cli.resolved_command() {
        Command::Tools => {
            let tools: Vec<_> = SavedSearchTool::ALL
                .into_iter()
                .map(SavedSearchTool::descriptor)
                .collect();
            println!("{}", serde_json::to_string_pretty(&tools)?);
            Ok(0)
        }
        Command::Doctor => {
            let config = load_config(&cli)?;
            let report = run_diagnostics(&config).await;
            println!("{}", serde_json::to_string_pretty(&report)?);
            Ok(if report.all_passed() { 0 } else { EXIT_FAILURE })
        }
        Command::Searches { pattern } => {
            let config = load_config(&cli)?;
            let proxy = SavedSearchProxy::new(&config).context("Failed to build Splunk client")?;
            let searches = proxy
                .saved_searches_matching(pattern.as_deref().unwrap_or_default())
                .await?;
            println!("{}", serde_json::to_string_pretty(&searches)?);
            Ok(0)
        }
        Command::Serve => {
            let config = load_config(&cli)?;
            serve(config, !cli.no_probe).await?;
            Ok(0)
        }
    }
}

fn load_config(cli: &Cli) -> Result<Config, ProxyError> {
    let mut loader = ConfigLoader::new().from_env()?;

    // CLI overrides (highest priority); blank values fall back to the environment
    if let Some(app) = cli.app.as_deref().map(str::trim).filter(|a| !a.is_empty()) {
        loader = loader.with_app(app.to_string());
    }

    Ok(loader.build()?)
}

async fn serve(config: Config, probe: bool) -> Result<()> {
    let proxy = Arc::new(SavedSearchProxy::new(&config).context("Failed to build Splunk client")?);

    info!(
        base_url = %config.connection.base_url,
        app = %config.search.app,
        auth = config.auth.strategy.kind(),
        "Starting splunk-mcp"
    );

    if probe {
        match proxy.probe().await {
            Ok(info) => info!(
                server = %info.server_name,
                version = %info.version,
                "Connected to Splunk"
            ),
            Err(e) => warn!(error = %e, "Splunk probe failed; serving anyway"),
        }
    }

    let service = SavedSearchHandler::new(proxy)
        .serve(stdio())
        .await
        .inspect_err(|e| error!("serving error: {:?}", e))?;

    service.waiting().await?;
    info!("MCP client disconnected, shutting down");
    Ok(())
}
