//! Raw command implementation.
//!
//! Normalizes a query into its raw tuple form, e.g. to store tags a UI
//! produced as a saved search.

use super::config::Config;
use super::{load_query, CommandContext, Result};
use crate::cli::QueryInput;
use crate::output::{format_raw_queries_json, format_raw_queries_lines};

/// Encodes the query's tuples, one string each or all in one.
///
/// # Arguments
///
/// * `ctx` - Command context with the timezone override
/// * `config` - Loaded config
/// * `input` - Raw query strings or a tags file
/// * `combined` - Encode every tuple into a single JSON array
///
/// # Errors
///
/// Returns an error if the input cannot be read or the tuples cannot be
/// encoded.
pub fn build(
    ctx: &CommandContext,
    config: &Config,
    input: &QueryInput,
    combined: bool,
) -> Result<Vec<String>> {
    let mut helper = ctx.query_helper(config)?;
    load_query(&mut helper, input)?;

    if combined {
        Ok(vec![helper.raw_query_string()?])
    } else {
        Ok(helper.raw_query_strings()?)
    }
}

/// Executes the raw command.
///
/// # Arguments
///
/// * `ctx` - Command context with output settings
/// * `config` - Loaded config
/// * `input` - Raw query strings or a tags file
/// * `combined` - Print one combined array instead of one tuple per line
///
/// # Errors
///
/// Returns an error if the tuples cannot be built or printed.
pub fn execute(
    ctx: &CommandContext,
    config: &Config,
    input: &QueryInput,
    combined: bool,
) -> Result<()> {
    let raw_queries = build(ctx, config, input, combined)?;

    if ctx.json_output {
        println!("{}", format_raw_queries_json(&raw_queries)?);
    } else if !ctx.quiet {
        print!("{}", format_raw_queries_lines(&raw_queries));
    }

    Ok(())
}
