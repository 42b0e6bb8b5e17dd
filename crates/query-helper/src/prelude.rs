//! Prelude module for convenient imports.
//!
//! ```
//! use query_helper_rs::prelude::*;
//!
//! let helper = QueryHelper::new(QueryContext::default());
//! assert!(helper.api_query().is_empty());
//! ```

// Engine
pub use crate::context::{parse_timezone, QueryContext};
pub use crate::engine::QueryHelper;

// Error types
pub use crate::error::{QueryError, QueryResult};

// Representations
pub use crate::api::{ApiFilter, ApiQuery};
pub use crate::filter::{FilterRecord, QueryFilter};
pub use crate::raw_query::{RawQuery, RawQueryStrings};
pub use crate::tag::{QueryTag, TagValue};
pub use crate::value::{FilterValue, Scalar};

// Operators
pub use crate::operator::{ApiOperator, RawOperator, TagOperator, UnknownOperator};

// Collaborators
pub use crate::datetime::{CalendarExpander, DatetimeExpander};
pub use crate::keys::{DataType, KeyItem, KeyItemSet, KeyRegistry};
pub use crate::reference::{ReferenceItem, ReferenceMap, ReferenceSource, ReferenceStore};
