//! Operator vocabularies and the lookup tables between them.
//!
//! Three vocabularies exist:
//!
//! - [`TagOperator`] - what a user picks in the search box
//! - [`RawOperator`] - what the compact tuple form persists; a superset of the
//!   tag operators that also carries datetime variants (`>t`, `=t`, ...)
//! - [`ApiOperator`] - what the remote query API understands
//!
//! Everything here is plain lookup data with no state.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Operator chosen on a query tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TagOperator {
    /// Contains (empty spelling).
    #[serde(rename = "")]
    Contain,
    /// Does not contain (`!`).
    #[serde(rename = "!")]
    NotContain,
    #[serde(rename = ">")]
    Greater,
    #[serde(rename = ">=")]
    GreaterOrEqual,
    #[serde(rename = "<")]
    Less,
    #[serde(rename = "<=")]
    LessOrEqual,
    #[serde(rename = "=")]
    Equal,
    #[serde(rename = "!=")]
    NotEqual,
    /// Regular expression match (`$`).
    #[serde(rename = "$")]
    Regex,
}

impl TagOperator {
    /// Every tag operator, in display order.
    pub const ALL: [TagOperator; 9] = [
        TagOperator::Contain,
        TagOperator::NotContain,
        TagOperator::Greater,
        TagOperator::GreaterOrEqual,
        TagOperator::Less,
        TagOperator::LessOrEqual,
        TagOperator::Equal,
        TagOperator::NotEqual,
        TagOperator::Regex,
    ];

    /// Returns the wire spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            TagOperator::Contain => "",
            TagOperator::NotContain => "!",
            TagOperator::Greater => ">",
            TagOperator::GreaterOrEqual => ">=",
            TagOperator::Less => "<",
            TagOperator::LessOrEqual => "<=",
            TagOperator::Equal => "=",
            TagOperator::NotEqual => "!=",
            TagOperator::Regex => "$",
        }
    }

    /// Maps to the raw operator with the same spelling.
    pub fn to_raw(self) -> RawOperator {
        match self {
            TagOperator::Contain => RawOperator::Contain,
            TagOperator::NotContain => RawOperator::NotContain,
            TagOperator::Greater => RawOperator::Greater,
            TagOperator::GreaterOrEqual => RawOperator::GreaterOrEqual,
            TagOperator::Less => RawOperator::Less,
            TagOperator::LessOrEqual => RawOperator::LessOrEqual,
            TagOperator::Equal => RawOperator::Equal,
            TagOperator::NotEqual => RawOperator::NotEqual,
            TagOperator::Regex => RawOperator::Regex,
        }
    }

    /// Maps to the datetime raw operator (`>` becomes `>t`).
    ///
    /// Operators without a datetime form (`""`, `!`, `!=`, `$`) keep their
    /// plain raw spelling.
    pub fn to_datetime_raw(self) -> RawOperator {
        match self {
            TagOperator::Greater => RawOperator::DatetimeGreater,
            TagOperator::GreaterOrEqual => RawOperator::DatetimeGreaterOrEqual,
            TagOperator::Less => RawOperator::DatetimeLess,
            TagOperator::LessOrEqual => RawOperator::DatetimeLessOrEqual,
            TagOperator::Equal => RawOperator::DatetimeEqual,
            other => other.to_raw(),
        }
    }
}

impl fmt::Display for TagOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Operator stored in the raw tuple form and in internal filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RawOperator {
    #[serde(rename = "")]
    Contain,
    #[serde(rename = "!")]
    NotContain,
    #[serde(rename = ">")]
    Greater,
    #[serde(rename = ">=")]
    GreaterOrEqual,
    #[serde(rename = "<")]
    Less,
    #[serde(rename = "<=")]
    LessOrEqual,
    #[serde(rename = "=")]
    Equal,
    #[serde(rename = "!=")]
    NotEqual,
    #[serde(rename = "$")]
    Regex,
    #[serde(rename = ">t")]
    DatetimeGreater,
    #[serde(rename = ">=t")]
    DatetimeGreaterOrEqual,
    #[serde(rename = "<t")]
    DatetimeLess,
    #[serde(rename = "<=t")]
    DatetimeLessOrEqual,
    #[serde(rename = "=t")]
    DatetimeEqual,
}

impl RawOperator {
    /// Returns the wire spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            RawOperator::Contain => "",
            RawOperator::NotContain => "!",
            RawOperator::Greater => ">",
            RawOperator::GreaterOrEqual => ">=",
            RawOperator::Less => "<",
            RawOperator::LessOrEqual => "<=",
            RawOperator::Equal => "=",
            RawOperator::NotEqual => "!=",
            RawOperator::Regex => "$",
            RawOperator::DatetimeGreater => ">t",
            RawOperator::DatetimeGreaterOrEqual => ">=t",
            RawOperator::DatetimeLess => "<t",
            RawOperator::DatetimeLessOrEqual => "<=t",
            RawOperator::DatetimeEqual => "=t",
        }
    }

    /// Returns true for the `...t` datetime operators.
    pub fn is_datetime(&self) -> bool {
        self.datetime_tag_operator().is_some()
    }

    /// Returns true when the spelling begins with `!`.
    pub fn is_negative(&self) -> bool {
        self.as_str().starts_with('!')
    }

    /// Datetime raw operator to tag operator (`>=t` becomes `>=`).
    pub fn datetime_tag_operator(&self) -> Option<TagOperator> {
        match self {
            RawOperator::DatetimeGreater => Some(TagOperator::Greater),
            RawOperator::DatetimeGreaterOrEqual => Some(TagOperator::GreaterOrEqual),
            RawOperator::DatetimeLess => Some(TagOperator::Less),
            RawOperator::DatetimeLessOrEqual => Some(TagOperator::LessOrEqual),
            RawOperator::DatetimeEqual => Some(TagOperator::Equal),
            _ => None,
        }
    }

    /// Raw operator to tag operator.
    ///
    /// Datetime operators go through the datetime table; plain operators
    /// share their spelling with a tag operator.
    pub fn tag_operator(&self) -> TagOperator {
        match self {
            RawOperator::Contain => TagOperator::Contain,
            RawOperator::NotContain => TagOperator::NotContain,
            RawOperator::Greater => TagOperator::Greater,
            RawOperator::GreaterOrEqual => TagOperator::GreaterOrEqual,
            RawOperator::Less => TagOperator::Less,
            RawOperator::LessOrEqual => TagOperator::LessOrEqual,
            RawOperator::Equal => TagOperator::Equal,
            RawOperator::NotEqual => TagOperator::NotEqual,
            RawOperator::Regex => TagOperator::Regex,
            RawOperator::DatetimeGreater => TagOperator::Greater,
            RawOperator::DatetimeGreaterOrEqual => TagOperator::GreaterOrEqual,
            RawOperator::DatetimeLess => TagOperator::Less,
            RawOperator::DatetimeLessOrEqual => TagOperator::LessOrEqual,
            RawOperator::DatetimeEqual => TagOperator::Equal,
        }
    }

    /// Singular API operator for this raw operator.
    pub fn api_operator(&self) -> ApiOperator {
        match self {
            RawOperator::Contain => ApiOperator::Contain,
            RawOperator::NotContain => ApiOperator::NotContain,
            RawOperator::Greater => ApiOperator::Gt,
            RawOperator::GreaterOrEqual => ApiOperator::Gte,
            RawOperator::Less => ApiOperator::Lt,
            RawOperator::LessOrEqual => ApiOperator::Lte,
            RawOperator::Equal => ApiOperator::Eq,
            RawOperator::NotEqual => ApiOperator::Not,
            RawOperator::Regex => ApiOperator::Regex,
            RawOperator::DatetimeGreater => ApiOperator::DatetimeGt,
            RawOperator::DatetimeGreaterOrEqual => ApiOperator::DatetimeGte,
            RawOperator::DatetimeLess => ApiOperator::DatetimeLt,
            RawOperator::DatetimeLessOrEqual => ApiOperator::DatetimeLte,
            // Lower bound of the range; the expander emits the upper bound.
            RawOperator::DatetimeEqual => ApiOperator::DatetimeGte,
        }
    }

    /// Plural API operator, if the API has one that takes a list.
    pub fn plural_api_operator(&self) -> Option<ApiOperator> {
        match self {
            RawOperator::Contain => Some(ApiOperator::ContainIn),
            RawOperator::NotContain => Some(ApiOperator::NotContainIn),
            RawOperator::Equal => Some(ApiOperator::In),
            RawOperator::NotEqual => Some(ApiOperator::NotIn),
            RawOperator::Regex => Some(ApiOperator::RegexIn),
            _ => None,
        }
    }
}

impl fmt::Display for RawOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when an operator spelling is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown operator: {0:?}")]
pub struct UnknownOperator(pub String);

impl FromStr for RawOperator {
    type Err = UnknownOperator;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let op = match s {
            "" => RawOperator::Contain,
            "!" => RawOperator::NotContain,
            ">" => RawOperator::Greater,
            ">=" => RawOperator::GreaterOrEqual,
            "<" => RawOperator::Less,
            "<=" => RawOperator::LessOrEqual,
            "=" => RawOperator::Equal,
            "!=" => RawOperator::NotEqual,
            "$" => RawOperator::Regex,
            ">t" => RawOperator::DatetimeGreater,
            ">=t" => RawOperator::DatetimeGreaterOrEqual,
            "<t" => RawOperator::DatetimeLess,
            "<=t" => RawOperator::DatetimeLessOrEqual,
            "=t" => RawOperator::DatetimeEqual,
            other => return Err(UnknownOperator(other.to_string())),
        };
        Ok(op)
    }
}

impl FromStr for TagOperator {
    type Err = UnknownOperator;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TagOperator::ALL
            .into_iter()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| UnknownOperator(s.to_string()))
    }
}

/// Operator understood by the remote query API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiOperator {
    Contain,
    NotContain,
    Gt,
    Gte,
    Lt,
    Lte,
    Eq,
    Not,
    Regex,
    ContainIn,
    NotContainIn,
    In,
    NotIn,
    RegexIn,
    DatetimeGt,
    DatetimeGte,
    DatetimeLt,
    DatetimeLte,
}

impl ApiOperator {
    /// Returns the wire spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            ApiOperator::Contain => "contain",
            ApiOperator::NotContain => "not_contain",
            ApiOperator::Gt => "gt",
            ApiOperator::Gte => "gte",
            ApiOperator::Lt => "lt",
            ApiOperator::Lte => "lte",
            ApiOperator::Eq => "eq",
            ApiOperator::Not => "not",
            ApiOperator::Regex => "regex",
            ApiOperator::ContainIn => "contain_in",
            ApiOperator::NotContainIn => "not_contain_in",
            ApiOperator::In => "in",
            ApiOperator::NotIn => "not_in",
            ApiOperator::RegexIn => "regex_in",
            ApiOperator::DatetimeGt => "datetime_gt",
            ApiOperator::DatetimeGte => "datetime_gte",
            ApiOperator::DatetimeLt => "datetime_lt",
            ApiOperator::DatetimeLte => "datetime_lte",
        }
    }
}

impl fmt::Display for ApiOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// API operator for a null predicate, normalized by sign.
///
/// A negative operator (`!`, `!=`) becomes `not`; anything else, including an
/// absent operator, becomes `eq`.
pub fn null_api_operator(operator: Option<RawOperator>) -> ApiOperator {
    null_raw_operator(operator).api_operator()
}

/// Raw operator for a null predicate: `!=` when negative, `=` otherwise.
pub fn null_raw_operator(operator: Option<RawOperator>) -> RawOperator {
    if operator.is_some_and(|op| op.is_negative()) {
        RawOperator::NotEqual
    } else {
        RawOperator::Equal
    }
}

/// Tag operator for a null value: `!` when negative, `=` otherwise.
pub fn null_tag_operator(operator: Option<RawOperator>) -> TagOperator {
    if operator.is_some_and(|op| op.is_negative()) {
        TagOperator::NotContain
    } else {
        TagOperator::Equal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_operator_spellings_roundtrip() {
        for op in TagOperator::ALL {
            assert_eq!(op.as_str().parse::<TagOperator>().unwrap(), op);
        }
    }

    #[test]
    fn test_raw_operator_parse() {
        assert_eq!("".parse::<RawOperator>().unwrap(), RawOperator::Contain);
        assert_eq!(">=t".parse::<RawOperator>().unwrap(), RawOperator::DatetimeGreaterOrEqual);
        assert_eq!(
            "~".parse::<RawOperator>().unwrap_err(),
            UnknownOperator("~".to_string())
        );
    }

    #[test]
    fn test_raw_operator_serde_uses_wire_spelling() {
        let json = serde_json::to_string(&RawOperator::DatetimeEqual).unwrap();
        assert_eq!(json, r#""=t""#);
        let op: RawOperator = serde_json::from_str(r#""!=""#).unwrap();
        assert_eq!(op, RawOperator::NotEqual);
    }

    #[test]
    fn test_datetime_table() {
        assert_eq!(TagOperator::Greater.to_datetime_raw(), RawOperator::DatetimeGreater);
        assert_eq!(TagOperator::Equal.to_datetime_raw(), RawOperator::DatetimeEqual);
        assert_eq!(TagOperator::NotEqual.to_datetime_raw(), RawOperator::NotEqual);
        assert_eq!(TagOperator::Contain.to_datetime_raw(), RawOperator::Contain);

        assert_eq!(
            RawOperator::DatetimeLessOrEqual.datetime_tag_operator(),
            Some(TagOperator::LessOrEqual)
        );
        assert_eq!(RawOperator::LessOrEqual.datetime_tag_operator(), None);
        assert!(RawOperator::DatetimeEqual.is_datetime());
        assert!(!RawOperator::Equal.is_datetime());
    }

    #[test]
    fn test_plural_table() {
        assert_eq!(RawOperator::Equal.plural_api_operator(), Some(ApiOperator::In));
        assert_eq!(RawOperator::NotEqual.plural_api_operator(), Some(ApiOperator::NotIn));
        assert_eq!(RawOperator::Contain.plural_api_operator(), Some(ApiOperator::ContainIn));
        assert_eq!(RawOperator::Greater.plural_api_operator(), None);
        assert_eq!(RawOperator::DatetimeEqual.plural_api_operator(), None);
    }

    #[test]
    fn test_singular_table() {
        assert_eq!(RawOperator::Contain.api_operator(), ApiOperator::Contain);
        assert_eq!(RawOperator::NotContain.api_operator(), ApiOperator::NotContain);
        assert_eq!(RawOperator::GreaterOrEqual.api_operator(), ApiOperator::Gte);
        assert_eq!(RawOperator::NotEqual.api_operator(), ApiOperator::Not);
        assert_eq!(RawOperator::Regex.api_operator(), ApiOperator::Regex);
    }

    #[test]
    fn test_null_normalization() {
        assert_eq!(null_api_operator(Some(RawOperator::NotEqual)), ApiOperator::Not);
        assert_eq!(null_api_operator(Some(RawOperator::NotContain)), ApiOperator::Not);
        assert_eq!(null_api_operator(Some(RawOperator::Greater)), ApiOperator::Eq);
        assert_eq!(null_api_operator(None), ApiOperator::Eq);

        assert_eq!(null_tag_operator(Some(RawOperator::NotEqual)), TagOperator::NotContain);
        assert_eq!(null_tag_operator(Some(RawOperator::Contain)), TagOperator::Equal);
    }

    #[test]
    fn test_api_operator_serde() {
        let json = serde_json::to_string(&ApiOperator::NotContainIn).unwrap();
        assert_eq!(json, r#""not_contain_in""#);
        assert_eq!(ApiOperator::DatetimeLte.to_string(), "datetime_lte");
    }
}
