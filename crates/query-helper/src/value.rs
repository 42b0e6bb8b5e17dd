//! Raw filter values.
//!
//! Values travel through every representation unchanged: a tag's value name,
//! the first slot of a raw query tuple, and the `v` of an API filter are all
//! the same JSON scalar, null, or array of those.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Number;

/// A single non-null value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Bool(bool),
    Number(Number),
    Text(String),
}

impl Scalar {
    /// Returns the text when this is a string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Scalar::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Bool(b) => write!(f, "{b}"),
            Scalar::Number(n) => write!(f, "{n}"),
            Scalar::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Scalar::Text(s.to_string())
    }
}

impl From<String> for Scalar {
    fn from(s: String) -> Self {
        Scalar::Text(s)
    }
}

impl From<i64> for Scalar {
    fn from(n: i64) -> Self {
        Scalar::Number(n.into())
    }
}

impl From<bool> for Scalar {
    fn from(b: bool) -> Self {
        Scalar::Bool(b)
    }
}

/// Value of a filter: null, one scalar, or a list of nullable scalars.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    Many(Vec<Option<Scalar>>),
    One(Scalar),
    #[default]
    Null,
}

impl FilterValue {
    /// Builds a list value from anything convertible to scalars.
    pub fn many<I, T>(values: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Scalar>,
    {
        FilterValue::Many(values.into_iter().map(|v| Some(v.into())).collect())
    }

    /// Builds a value from an optional scalar.
    pub fn from_option(value: Option<Scalar>) -> Self {
        match value {
            Some(s) => FilterValue::One(s),
            None => FilterValue::Null,
        }
    }

    /// Returns true for the null value.
    pub fn is_null(&self) -> bool {
        matches!(self, FilterValue::Null)
    }

    /// Returns the elements of this value: one for a scalar or null, all of
    /// them for a list.
    pub fn elements(&self) -> Vec<Option<&Scalar>> {
        match self {
            FilterValue::Many(values) => values.iter().map(Option::as_ref).collect(),
            FilterValue::One(s) => vec![Some(s)],
            FilterValue::Null => vec![None],
        }
    }
}

impl From<Scalar> for FilterValue {
    fn from(value: Scalar) -> Self {
        FilterValue::One(value)
    }
}

impl From<&str> for FilterValue {
    fn from(s: &str) -> Self {
        FilterValue::One(s.into())
    }
}

impl From<String> for FilterValue {
    fn from(s: String) -> Self {
        FilterValue::One(s.into())
    }
}

impl From<i64> for FilterValue {
    fn from(n: i64) -> Self {
        FilterValue::One(n.into())
    }
}

impl From<bool> for FilterValue {
    fn from(b: bool) -> Self {
        FilterValue::One(b.into())
    }
}

impl fmt::Display for FilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterValue::One(s) => write!(f, "{s}"),
            FilterValue::Null => f.write_str("null"),
            FilterValue::Many(values) => {
                let parts: Vec<String> = values
                    .iter()
                    .map(|v| v.as_ref().map(Scalar::to_string).unwrap_or_default())
                    .collect();
                f.write_str(&parts.join(","))
            }
        }
    }
}
