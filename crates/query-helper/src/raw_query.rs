//! The compact positional tuple form used for persistence.
//!
//! A raw query is a JSON array `[value, key?, operator?]`. Trailing absent
//! fields are omitted rather than padded with `null`, so a keyword is a
//! one-element array and a keyed filter without an operator is a pair.

use std::fmt;

use serde::de::{self, IgnoredAny, SeqAccess, Visitor};
use serde::ser::SerializeSeq;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::filter::QueryFilter;
use crate::operator::RawOperator;
use crate::value::{FilterValue, Scalar};

/// One filter in tuple form.
#[derive(Debug, Clone, PartialEq)]
pub struct RawQuery {
    pub value: FilterValue,
    pub key: Option<String>,
    pub operator: Option<RawOperator>,
}

impl RawQuery {
    /// A keyword tuple: `[value]`.
    pub fn keyword(value: impl Into<FilterValue>) -> Self {
        Self {
            value: value.into(),
            key: None,
            operator: None,
        }
    }

    /// A keyed tuple: `[value, key]` or `[value, key, operator]`.
    pub fn keyed(
        value: impl Into<FilterValue>,
        key: impl Into<String>,
        operator: Option<RawOperator>,
    ) -> Self {
        Self {
            value: value.into(),
            key: Some(key.into()),
            operator,
        }
    }
}

impl From<&QueryFilter> for RawQuery {
    fn from(filter: &QueryFilter) -> Self {
        match filter.key() {
            Some(key) => RawQuery::keyed(filter.value(), key, filter.operator()),
            None => RawQuery::keyword(filter.value()),
        }
    }
}

impl From<RawQuery> for QueryFilter {
    fn from(raw: RawQuery) -> Self {
        QueryFilter::new(raw.key, raw.value, raw.operator)
    }
}

impl Serialize for RawQuery {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = match (&self.key, &self.operator) {
            (None, _) => 1,
            (Some(_), None) => 2,
            (Some(_), Some(_)) => 3,
        };

        let mut seq = serializer.serialize_seq(Some(len))?;
        seq.serialize_element(&self.value)?;
        if let Some(key) = &self.key {
            seq.serialize_element(key)?;
            if let Some(operator) = &self.operator {
                seq.serialize_element(operator)?;
            }
        }
        seq.end()
    }
}

impl<'de> Deserialize<'de> for RawQuery {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_seq(RawQueryVisitor)
    }
}

struct RawQueryVisitor;

impl<'de> Visitor<'de> for RawQueryVisitor {
    type Value = RawQuery;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("an array of [value, key?, operator?]")
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<RawQuery, A::Error> {
        let value: FilterValue = seq
            .next_element()?
            .ok_or_else(|| de::Error::invalid_length(0, &self))?;

        // Keys are usually strings, but numeric keys show up in persisted
        // state and are accepted in their stringified form.
        let key = seq
            .next_element::<Option<Scalar>>()?
            .flatten()
            .map(|k| k.to_string());
        let operator = seq.next_element::<Option<RawOperator>>()?.flatten();

        while seq.next_element::<IgnoredAny>()?.is_some() {}

        Ok(RawQuery {
            value,
            key,
            operator,
        })
    }
}

/// Input accepted when decoding raw query strings: nothing, one string, or a
/// list of optional strings.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum RawQueryStrings<'a> {
    #[default]
    None,
    One(&'a str),
    Many(Vec<Option<&'a str>>),
}

impl<'a> RawQueryStrings<'a> {
    /// Returns the non-empty entries in order.
    pub fn entries(self) -> Vec<&'a str> {
        match self {
            RawQueryStrings::None => Vec::new(),
            RawQueryStrings::One(s) => [s].into_iter().filter(|s| !s.is_empty()).collect(),
            RawQueryStrings::Many(items) => items
                .into_iter()
                .flatten()
                .filter(|s| !s.is_empty())
                .collect(),
        }
    }
}

impl<'a> From<&'a str> for RawQueryStrings<'a> {
    fn from(s: &'a str) -> Self {
        RawQueryStrings::One(s)
    }
}

impl<'a> From<&'a String> for RawQueryStrings<'a> {
    fn from(s: &'a String) -> Self {
        RawQueryStrings::One(s)
    }
}

impl<'a> From<Option<&'a str>> for RawQueryStrings<'a> {
    fn from(s: Option<&'a str>) -> Self {
        s.map_or(RawQueryStrings::None, RawQueryStrings::One)
    }
}

impl<'a> From<Vec<Option<&'a str>>> for RawQueryStrings<'a> {
    fn from(items: Vec<Option<&'a str>>) -> Self {
        RawQueryStrings::Many(items)
    }
}

impl<'a> From<&'a [&'a str]> for RawQueryStrings<'a> {
    fn from(items: &'a [&'a str]) -> Self {
        RawQueryStrings::Many(items.iter().map(|s| Some(*s)).collect())
    }
}

impl<'a, const N: usize> From<[&'a str; N]> for RawQueryStrings<'a> {
    fn from(items: [&'a str; N]) -> Self {
        RawQueryStrings::Many(items.into_iter().map(Some).collect())
    }
}

impl<'a> From<&'a [String]> for RawQueryStrings<'a> {
    fn from(items: &'a [String]) -> Self {
        RawQueryStrings::Many(items.iter().map(|s| Some(s.as_str())).collect())
    }
}

impl<'a> From<&'a [Option<String>]> for RawQueryStrings<'a> {
    fn from(items: &'a [Option<String>]) -> Self {
        RawQueryStrings::Many(items.iter().map(|s| s.as_deref()).collect())
    }
}
