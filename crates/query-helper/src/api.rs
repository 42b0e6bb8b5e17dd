//! Backend-facing filter payload.

use serde::{Deserialize, Serialize};

use crate::operator::ApiOperator;
use crate::value::FilterValue;

/// One predicate as sent to the remote query API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiFilter {
    pub k: String,
    pub v: FilterValue,
    pub o: ApiOperator,
}

impl ApiFilter {
    pub fn new(key: impl Into<String>, value: impl Into<FilterValue>, operator: ApiOperator) -> Self {
        Self {
            k: key.into(),
            v: value.into(),
            o: operator,
        }
    }
}

/// The full payload: AND-ed filters, OR-ed filters, and free-text keyword.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiQuery {
    /// Predicates the consumer combines with AND.
    pub filter: Vec<ApiFilter>,

    /// Predicates the consumer combines with OR.
    pub filter_or: Vec<ApiFilter>,

    /// Keyword tokens joined by single spaces.
    pub keyword: String,
}

impl ApiQuery {
    /// Returns true when the payload constrains nothing.
    pub fn is_empty(&self) -> bool {
        self.filter.is_empty() && self.filter_or.is_empty() && self.keyword.is_empty()
    }
}
