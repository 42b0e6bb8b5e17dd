//! Tags command implementation.
//!
//! Shows a query as the tags a search box would display.

use query_helper_rs::tag::QueryTag;

use super::config::Config;
use super::{load_query, report_unknown_keys, CommandContext, Result};
use crate::cli::QueryInput;
use crate::output::{format_tags_json, format_tags_table};

/// Builds the tag list for a query.
///
/// # Arguments
///
/// * `ctx` - Command context with the timezone override
/// * `config` - Loaded config supplying key sets and references
/// * `input` - Raw query strings or a tags file
///
/// # Errors
///
/// Returns an error if the tags file cannot be read or decoded, or if the
/// timezone is unknown.
pub fn build(ctx: &CommandContext, config: &Config, input: &QueryInput) -> Result<Vec<QueryTag>> {
    let mut helper = ctx.query_helper(config)?;
    load_query(&mut helper, input)?;
    report_unknown_keys(ctx, &helper);
    Ok(helper.query_tags())
}

/// Executes the tags command.
///
/// # Errors
///
/// Returns an error if the tags cannot be built or printed.
pub fn execute(ctx: &CommandContext, config: &Config, input: &QueryInput) -> Result<()> {
    let tags = build(ctx, config, input)?;

    if ctx.json_output {
        println!("{}", format_tags_json(&tags)?);
    } else if !ctx.quiet {
        print!("{}", format_tags_table(&tags, ctx.use_colors));
    }

    Ok(())
}
