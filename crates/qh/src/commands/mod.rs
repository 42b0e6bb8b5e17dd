//! Command implementations for the qh CLI.
//!
//! This module contains the actual command handlers that are invoked by the CLI.

pub mod api;
pub mod completions;
pub mod config;
pub mod raw;
pub mod tags;

use std::fs;
use std::io::{self, Read};
use std::path::Path;
use std::sync::Arc;

use query_helper_rs::prelude::*;

use crate::cli::{Cli, QueryInput};
use config::Config;

/// Error type for command execution.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    /// Query translation error.
    #[error("query error: {0}")]
    Query(#[from] QueryError),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for command execution.
pub type Result<T> = std::result::Result<T, CommandError>;

/// Context for command execution, containing common dependencies.
pub struct CommandContext {
    /// Whether to output JSON.
    pub json_output: bool,
    /// Whether to use colors.
    pub use_colors: bool,
    /// Whether to be quiet (errors only).
    pub quiet: bool,
    /// Timezone given on the command line.
    pub timezone: Option<String>,
}

impl CommandContext {
    /// Creates a new command context from CLI arguments.
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            json_output: cli.json,
            use_colors: !cli.no_color,
            quiet: cli.quiet,
            timezone: cli.timezone.clone(),
        }
    }

    /// Applies output preferences from the config file. Command line flags
    /// can only turn colors off, never back on.
    pub fn with_config(mut self, config: &Config) -> Self {
        if config.output.color == Some(false) {
            self.use_colors = false;
        }
        self
    }

    /// Builds an engine from the config file and command line overrides.
    pub fn query_helper(&self, config: &Config) -> Result<QueryHelper> {
        let timezone = self
            .timezone
            .as_deref()
            .or(config.timezone.as_deref())
            .unwrap_or("UTC");
        let context = QueryContext::from_timezone_name(timezone)
            .map_err(|e| CommandError::Config(e.to_string()))?;

        let mut helper = QueryHelper::with_key_item_sets(context, &config.key_sets);
        if !config.references.is_empty() {
            let store: Arc<dyn ReferenceSource> =
                Arc::new(ReferenceStore::from(config.references.clone()));
            helper.set_reference(Some(store));
        }

        tracing::debug!(
            timezone,
            keys = helper.key_registry().len(),
            references = config.references.len(),
            "query helper ready"
        );
        Ok(helper)
    }
}

/// Loads the query described by `input` into the engine.
///
/// Tags replace the filter list wholesale; raw queries are decoded one by one
/// and undecodable entries are dropped with a warning.
pub fn load_query(helper: &mut QueryHelper, input: &QueryInput) -> Result<()> {
    match &input.tags {
        Some(path) => {
            let content = read_input(path)?;
            let tags: Vec<QueryTag> = serde_json::from_str(&content)?;
            helper.set_filters_as_query_tag(&tags, None);
        }
        None => {
            helper.set_filters_as_raw_query_string(input.queries.as_slice());
        }
    }
    Ok(())
}

/// Reads a file, or stdin when the path is `-`.
fn read_input(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut content = String::new();
        io::stdin().read_to_string(&mut content)?;
        Ok(content)
    } else {
        Ok(fs::read_to_string(path)?)
    }
}

/// Returns a warning line for every filter key missing from the registry.
///
/// Nothing is reported when no keys are configured.
pub fn unknown_key_warnings(helper: &QueryHelper) -> Vec<String> {
    let registry = helper.key_registry();
    if registry.is_empty() {
        return Vec::new();
    }

    let mut seen = Vec::new();
    let mut warnings = Vec::new();
    let keys = helper
        .filters()
        .iter()
        .chain(helper.or_filters())
        .filter_map(QueryFilter::key);

    for key in keys {
        if registry.contains(key) || seen.contains(&key) {
            continue;
        }
        seen.push(key);

        let warning = match registry.suggest(key) {
            Some(suggestion) => format!("unknown key '{key}' (did you mean '{suggestion}'?)"),
            None => format!("unknown key '{key}'"),
        };
        warnings.push(warning);
    }

    warnings
}

/// Prints unknown-key warnings to stderr unless quiet.
pub fn report_unknown_keys(ctx: &CommandContext, helper: &QueryHelper) {
    if ctx.quiet {
        return;
    }
    for warning in unknown_key_warnings(helper) {
        if ctx.use_colors {
            use owo_colors::OwoColorize;
            eprintln!("{} {warning}", "warning:".yellow().bold());
        } else {
            eprintln!("warning: {warning}");
        }
    }
}
