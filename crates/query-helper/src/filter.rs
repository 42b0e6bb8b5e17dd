//! The engine's internal filter representation.

use serde::{Deserialize, Serialize};

use crate::operator::RawOperator;
use crate::value::{FilterValue, Scalar};

/// One filter held by the engine.
///
/// The variant is decided once, when the filter is built, from the presence
/// of a key, the operator family, and the shape of the value. Every public
/// representation is projected from a list of these.
///
/// The serde form is the flat `{k, v, o}` record (see [`FilterRecord`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "FilterRecord", into = "FilterRecord")]
pub enum QueryFilter {
    /// Free-text search input with no key.
    Keyword { value: FilterValue },

    /// Keyed predicate on a single value, or on null.
    Comparison {
        key: String,
        value: Option<Scalar>,
        operator: Option<RawOperator>,
    },

    /// Keyed predicate over a list of values.
    SetMembership {
        key: String,
        values: Vec<Option<Scalar>>,
        operator: Option<RawOperator>,
    },

    /// Keyed predicate with a datetime operator (`>t`, `=t`, ...). The value is
    /// kept as authored; it is only expanded into concrete bounds when the
    /// API payload is built.
    DatetimeRange {
        key: String,
        value: FilterValue,
        operator: RawOperator,
    },
}

impl QueryFilter {
    /// Classifies a `{k, v, o}` triple.
    ///
    /// A missing or empty key yields a keyword filter; its operator, if any,
    /// is dropped.
    pub fn new(key: Option<String>, value: FilterValue, operator: Option<RawOperator>) -> Self {
        let Some(key) = key.filter(|k| !k.is_empty()) else {
            return QueryFilter::Keyword { value };
        };

        match (operator, value) {
            (Some(op), value) if op.is_datetime() => QueryFilter::DatetimeRange {
                key,
                value,
                operator: op,
            },
            (operator, FilterValue::Many(values)) => QueryFilter::SetMembership {
                key,
                values,
                operator,
            },
            (operator, FilterValue::One(value)) => QueryFilter::Comparison {
                key,
                value: Some(value),
                operator,
            },
            (operator, FilterValue::Null) => QueryFilter::Comparison {
                key,
                value: None,
                operator,
            },
        }
    }

    /// Creates a keyword filter.
    pub fn keyword(value: impl Into<FilterValue>) -> Self {
        QueryFilter::Keyword {
            value: value.into(),
        }
    }

    /// Creates a keyed filter.
    pub fn keyed(
        key: impl Into<String>,
        value: impl Into<FilterValue>,
        operator: Option<RawOperator>,
    ) -> Self {
        Self::new(Some(key.into()), value.into(), operator)
    }

    /// Returns the key, or `None` for keyword filters.
    pub fn key(&self) -> Option<&str> {
        match self {
            QueryFilter::Keyword { .. } => None,
            QueryFilter::Comparison { key, .. }
            | QueryFilter::SetMembership { key, .. }
            | QueryFilter::DatetimeRange { key, .. } => Some(key),
        }
    }

    /// Returns the operator, or `None` when absent or for keyword filters.
    pub fn operator(&self) -> Option<RawOperator> {
        match self {
            QueryFilter::Keyword { .. } => None,
            QueryFilter::Comparison { operator, .. } | QueryFilter::SetMembership { operator, .. } => {
                *operator
            }
            QueryFilter::DatetimeRange { operator, .. } => Some(*operator),
        }
    }

    /// Returns the value in its transport shape.
    pub fn value(&self) -> FilterValue {
        match self {
            QueryFilter::Keyword { value } | QueryFilter::DatetimeRange { value, .. } => value.clone(),
            QueryFilter::Comparison { value, .. } => FilterValue::from_option(value.clone()),
            QueryFilter::SetMembership { values, .. } => FilterValue::Many(values.clone()),
        }
    }

    /// Returns true for keyword filters.
    pub fn is_keyword(&self) -> bool {
        matches!(self, QueryFilter::Keyword { .. })
    }

    /// Returns the flat record form.
    pub fn to_record(&self) -> FilterRecord {
        FilterRecord {
            k: self.key().map(str::to_string),
            v: self.value(),
            o: self.operator(),
        }
    }
}

/// Flat `{k, v, o}` form of a [`QueryFilter`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FilterRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub k: Option<String>,

    #[serde(default)]
    pub v: FilterValue,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub o: Option<RawOperator>,
}

impl From<FilterRecord> for QueryFilter {
    fn from(record: FilterRecord) -> Self {
        QueryFilter::new(record.k, record.v, record.o)
    }
}

impl From<QueryFilter> for FilterRecord {
    fn from(filter: QueryFilter) -> Self {
        filter.to_record()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_keyword() {
        let f = QueryFilter::new(None, FilterValue::from("foo"), Some(RawOperator::Equal));
        assert_eq!(f, QueryFilter::keyword("foo"));
        assert!(f.is_keyword());
        assert_eq!(f.operator(), None);
    }

    #[test]
    fn test_classify_empty_key_as_keyword() {
        let f = QueryFilter::new(Some(String::new()), FilterValue::from("foo"), None);
        assert!(f.is_keyword());
    }

    #[test]
    fn test_classify_keyed_shapes() {
        let f = QueryFilter::keyed("name", "web", Some(RawOperator::Equal));
        assert!(matches!(f, QueryFilter::Comparison { value: Some(_), .. }));

        let f = QueryFilter::keyed("name", FilterValue::Null, Some(RawOperator::NotEqual));
        assert!(matches!(f, QueryFilter::Comparison { value: None, .. }));

        let f = QueryFilter::keyed("tag", FilterValue::many(["a", "b"]), Some(RawOperator::Equal));
        assert!(matches!(f, QueryFilter::SetMembership { .. }));

        let f = QueryFilter::keyed("created_at", "2024-01", Some(RawOperator::DatetimeEqual));
        assert!(matches!(f, QueryFilter::DatetimeRange { .. }));
    }

    #[test]
    fn test_record_serde() {
        let f: QueryFilter = serde_json::from_str(r#"{"k": "tag", "v": ["a", "b"], "o": "="}"#).unwrap();
        assert_eq!(f.key(), Some("tag"));
        assert_eq!(f.operator(), Some(RawOperator::Equal));
        assert_eq!(f.value(), FilterValue::many(["a", "b"]));

        let json = serde_json::to_string(&QueryFilter::keyword("foo")).unwrap();
        assert_eq!(json, r#"{"v":"foo"}"#);
    }

    #[test]
    fn test_record_missing_value_is_null() {
        let f: QueryFilter = serde_json::from_str(r#"{"k": "status", "o": "!="}"#).unwrap();
        assert_eq!(
            f,
            QueryFilter::Comparison {
                key: "status".to_string(),
                value: None,
                operator: Some(RawOperator::NotEqual),
            }
        );
    }
}
