//! CLI argument definitions.
//!
//! Responsibilities:
//! - Define the CLI structure using clap derive macros.
//!
//! Non-responsibilities:
//! - Does not load configuration or run commands (see `main.rs`).

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "splunk-mcp")]
#[command(about = "MCP server exposing Splunk saved searches as tools", long_about = None)]
#[command(version)]
#[command(
    after_help = "Examples:\n  splunk-mcp                 # serve MCP over stdio\n  splunk-mcp doctor          # check credentials and saved searches\n  splunk-mcp tools           # print tool descriptors\n  splunk-mcp searches --pattern network\n  splunk-mcp --app netops serve\n"
)]
pub struct Cli {
    /// Splunk app namespace holding the saved searches
    #[arg(long, global = true, env = "SPLUNK_APP")]
    pub app: Option<String>,

    /// Skip the connectivity probe before serving
    #[arg(long, global = true)]
    pub no_probe: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Serve the MCP tools over stdio (default)
    Serve,

    /// Run diagnostics and print a JSON report
    Doctor,

    /// Print the tool descriptors as JSON
    Tools,

    /// List enabled saved searches in the app as JSON
    Searches {
        /// Only include saved searches whose name contains this text (case-insensitive)
        #[arg(long)]
        pattern: Option<String>,
    },
}

impl Cli {
    pub fn resolved_command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Serve)
    }
}
