//! CLI command definitions and dispatch for the `onb` binary.
//!
//! Uses clap derive macros for argument parsing. The CLI follows a verb-noun
//! pattern (e.g., `onb create notebook`, `onb list notebooks`).

pub mod notebook;
pub mod status;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Manage your research notebooks.
#[derive(Parser)]
#[command(name = "onb", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a new resource.
    Create {
        #[command(subcommand)]
        resource: CreateResource,
    },

    /// List resources.
    #[command(alias = "ls")]
    List {
        #[command(subcommand)]
        resource: ListResource,
    },

    /// Show details of a notebook.
    Show {
        /// Notebook ID to display.
        id: String,
    },

    /// Delete a resource.
    #[command(alias = "rm")]
    Delete {
        #[command(subcommand)]
        resource: DeleteResource,
    },

    /// Show system status (entity counts, data directory, version).
    Status,

    /// Start the REST API server.
    Serve {
        /// Port to listen on (overrides config.toml).
        #[arg(short, long)]
        port: Option<u16>,

        /// Host interface to bind (overrides config.toml).
        #[arg(long)]
        host: Option<String>,

        /// Export spans via OpenTelemetry (stdout exporter).
        #[arg(long)]
        otel: bool,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum CreateResource {
    /// Create a new notebook.
    Notebook {
        /// Notebook name (prompted if omitted).
        #[arg(short, long)]
        name: Option<String>,

        /// Short description.
        #[arg(short, long)]
        description: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum ListResource {
    /// List notebooks.
    Notebooks {
        /// Include archived notebooks.
        #[arg(long)]
        all: bool,
    },
}

#[derive(Subcommand)]
pub enum DeleteResource {
    /// Delete a notebook and everything in it.
    Notebook {
        /// Notebook ID to delete.
        id: String,

        /// Skip the confirmation prompt.
        #[arg(short, long)]
        force: bool,
    },
}
