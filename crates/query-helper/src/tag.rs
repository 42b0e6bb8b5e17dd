//! Query tags: the display/editing form of a filter.

use serde::{Deserialize, Serialize};

use crate::keys::KeyItem;
use crate::operator::TagOperator;
use crate::value::Scalar;

/// The value side of a tag: raw value plus its display label.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TagValue {
    /// Raw value; `None` is the null value.
    #[serde(default)]
    pub name: Option<Scalar>,

    #[serde(default)]
    pub label: String,
}

impl TagValue {
    pub fn new(name: Option<Scalar>, label: impl Into<String>) -> Self {
        Self {
            name,
            label: label.into(),
        }
    }

    /// A value labelled by its own string form.
    pub fn plain(name: impl Into<Scalar>) -> Self {
        let name = name.into();
        let label = name.to_string();
        Self {
            name: Some(name),
            label,
        }
    }

    /// The null value, labelled `Null`.
    pub fn null() -> Self {
        Self::new(None, "Null")
    }
}

/// A single user-facing search condition, or a bare keyword when `key` is
/// absent.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct QueryTag {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<KeyItem>,

    pub value: TagValue,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operator: Option<TagOperator>,

    /// Invalid tags are skipped on ingestion.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub invalid: bool,
}

impl QueryTag {
    /// Creates a keyword tag.
    pub fn keyword(value: impl Into<Scalar>) -> Self {
        Self {
            key: None,
            value: TagValue::plain(value),
            operator: None,
            invalid: false,
        }
    }

    /// Creates a keyed tag.
    pub fn new(key: KeyItem, value: TagValue, operator: TagOperator) -> Self {
        Self {
            key: Some(key),
            value,
            operator: Some(operator),
            invalid: false,
        }
    }

    /// Marks the tag invalid.
    pub fn invalidated(mut self) -> Self {
        self.invalid = true;
        self
    }

    /// Returns the key name, if any.
    pub fn key_name(&self) -> Option<&str> {
        self.key.as_ref().map(|k| k.name.as_str())
    }
}
