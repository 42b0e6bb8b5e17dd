//! Api command implementation.
//!
//! Builds the filter payload a remote query API consumes.

use query_helper_rs::prelude::*;

use super::config::Config;
use super::{load_query, report_unknown_keys, CommandContext, Result};
use crate::cli::QueryInput;
use crate::output::{format_api_query_json, format_api_query_table};

/// Options for the api command.
pub struct ApiOptions<'a> {
    /// The AND-group query.
    pub input: &'a QueryInput,
    /// Raw queries for the OR-group.
    pub or: &'a [String],
}

/// Builds the API payload for the given options.
///
/// OR-group entries are decoded strictly: a malformed entry or one missing a
/// key or operator fails the whole command.
///
/// # Arguments
///
/// * `ctx` - Command context with the timezone override
/// * `config` - Loaded config supplying key sets and references
/// * `opts` - AND-group input and raw `--or` entries
///
/// # Errors
///
/// Returns `CommandError::Json` for an undecodable `--or` entry,
/// `CommandError::Query` for one without a key or operator, and
/// `CommandError::Config` for an unknown timezone.
pub fn build(ctx: &CommandContext, config: &Config, opts: &ApiOptions) -> Result<ApiQuery> {
    let mut helper = ctx.query_helper(config)?;
    load_query(&mut helper, opts.input)?;

    let or_filters = opts
        .or
        .iter()
        .map(|raw| serde_json::from_str::<RawQuery>(raw).map(QueryFilter::from))
        .collect::<std::result::Result<Vec<_>, _>>()?;
    helper.set_or_filters(or_filters)?;

    report_unknown_keys(ctx, &helper);
    Ok(helper.api_query())
}

/// Executes the api command.
///
/// # Arguments
///
/// * `ctx` - Command context with output settings
/// * `config` - Loaded config
/// * `opts` - Api command options
///
/// # Errors
///
/// Returns an error if the payload cannot be built or printed.
pub fn execute(ctx: &CommandContext, config: &Config, opts: &ApiOptions) -> Result<()> {
    let query = build(ctx, config, opts)?;

    if ctx.json_output {
        println!("{}", format_api_query_json(&query)?);
    } else if !ctx.quiet {
        print!("{}", format_api_query_table(&query, ctx.use_colors));
    }

    Ok(())
}
