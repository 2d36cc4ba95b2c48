//! Command-line interface definition.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// slotwatch - spots left in the next group session
#[derive(Debug, Parser)]
#[command(name = "slotwatch")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, short, env = "SLOTWATCH_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug output
    #[arg(long, short = 'v', global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Serve the availability endpoint until SIGINT/SIGTERM
    Serve {
        /// Address to listen on (overrides `[server] bind_address`)
        #[arg(long)]
        bind: Option<String>,

        /// Log as JSON lines
        #[arg(long)]
        json_logs: bool,
    },

    /// Resolve availability once and print the response body
    Check,

    /// Show the spots counter in the terminal, refreshing periodically
    Watch {
        /// Availability endpoint (overrides `[poller] api_url`)
        #[arg(long)]
        url: Option<String>,

        /// Seconds between refreshes (overrides `[poller] interval_secs`)
        #[arg(long)]
        interval: Option<u64>,

        /// Refresh once and exit
        #[arg(long)]
        once: bool,
    },

    /// Configuration commands
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Configuration actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Dump current configuration
    Dump,

    /// Validate configuration
    Validate,

    /// Show configuration file path
    Path,
}
