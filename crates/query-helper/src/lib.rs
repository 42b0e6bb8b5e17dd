//! Query translation engine.
//!
//! Converts a search query between three forms:
//!
//! - query tags, the structured form a search box edits
//! - raw queries, compact `[value, key?, operator?]` JSON tuples for URLs and
//!   saved searches
//! - the API filter payload sent to a remote query service
//!
//! # Quick Start
//!
//! ```
//! use query_helper_rs::prelude::*;
//!
//! let sets = vec![KeyItemSet::new(
//!     "Fields",
//!     vec![KeyItem::new("created_at", "Created").with_data_type(DataType::Datetime)],
//! )];
//!
//! let mut helper = QueryHelper::with_key_item_sets(QueryContext::default(), &sets);
//! helper.set_filters_as_raw_query_string([r#"["2024","created_at",">=t"]"#, r#"["report"]"#]);
//!
//! let api = helper.api_query();
//! assert_eq!(api.filter[0].o, ApiOperator::DatetimeGte);
//! assert_eq!(api.keyword, "report");
//! ```

pub mod api;
pub mod context;
pub mod datetime;
pub mod engine;
pub mod error;
pub mod filter;
pub mod keys;
pub mod operator;
pub mod prelude;
pub mod raw_query;
pub mod reference;
pub mod tag;
pub mod value;

pub use context::QueryContext;
pub use engine::QueryHelper;
pub use error::{QueryError, QueryResult};
