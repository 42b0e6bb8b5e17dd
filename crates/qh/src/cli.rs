//! CLI argument parsing using clap derive macros.
//!
//! This module defines the command-line interface for the qh CLI.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// qh - Translate search queries between tags, raw tuples and API payloads
#[derive(Parser, Debug)]
#[command(name = "qh")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbose output (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Disable colors in output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// IANA timezone for datetime expansion (default: from config, then UTC)
    #[arg(long, global = true, env = "QH_TIMEZONE")]
    pub timezone: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build the API filter payload
    Api {
        #[command(flatten)]
        input: QueryInput,

        /// Raw query added to the OR-group (repeatable)
        #[arg(long = "or", value_name = "RAW_QUERY", action = clap::ArgAction::Append)]
        or: Vec<String>,
    },

    /// Show the query tags for a query
    Tags {
        #[command(flatten)]
        input: QueryInput,
    },

    /// Print the raw query tuples for a query
    Raw {
        #[command(flatten)]
        input: QueryInput,

        /// Print all tuples as one JSON array
        #[arg(long)]
        combined: bool,
    },

    /// View and manage configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

/// Where a query is read from.
#[derive(Args, Debug, Default)]
pub struct QueryInput {
    /// Raw query tuples as JSON, e.g. '["web","name","="]'
    #[arg(value_name = "RAW_QUERY")]
    pub queries: Vec<String>,

    /// Read a JSON array of query tags from a file ("-" for stdin)
    #[arg(long, value_name = "FILE", conflicts_with = "queries")]
    pub tags: Option<PathBuf>,
}

/// Supported shells for completions
#[derive(ValueEnum, Clone, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    Powershell,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Write a starter config file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print config file path
    Path,
}
