//! Output formatting utilities for the qh CLI.
//!
//! This module provides functions for formatting engine projections as
//! tables or JSON:
//!
//! - [`api`] - API filter payload
//! - [`tags`] - Query tags
//! - [`raw`] - Raw query tuples
//! - [`helpers`] - Common formatting utilities (truncation, operators, values)

mod api;
pub mod helpers;
mod raw;
mod tags;

pub use api::{format_api_query_json, format_api_query_table};
pub use raw::{format_raw_queries_json, format_raw_queries_lines};
pub use tags::{format_tags_json, format_tags_table};
