//! Key metadata and the name lookup built from it.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use strsim::levenshtein;

/// Maximum Levenshtein distance to consider a key name as a suggestion.
const MAX_SUGGESTION_DISTANCE: usize = 3;

/// Data type of a selectable key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataType {
    String,
    Integer,
    Float,
    Boolean,
    Datetime,
    Object,
}

/// Display metadata for one filterable key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyItem {
    /// Key name as sent to the API.
    pub name: String,

    /// Human-readable label.
    #[serde(default)]
    pub label: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_type: Option<DataType>,

    /// Name of the reference dictionary that labels this key's values.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

impl KeyItem {
    /// Creates a key item with no data type or reference.
    pub fn new(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            data_type: None,
            reference: None,
        }
    }

    /// The stand-in used for names missing from the registry: the name is
    /// its own label.
    pub fn fallback(name: impl Into<String>) -> Self {
        let name = name.into();
        Self::new(name.clone(), name)
    }

    /// Sets the data type.
    pub fn with_data_type(mut self, data_type: DataType) -> Self {
        self.data_type = Some(data_type);
        self
    }

    /// Sets the reference dictionary name.
    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }

    /// Returns true if values of this key are datetimes.
    pub fn is_datetime(&self) -> bool {
        self.data_type == Some(DataType::Datetime)
    }
}

/// A titled group of key items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyItemSet {
    pub title: String,
    #[serde(default)]
    pub items: Vec<KeyItem>,
}

impl KeyItemSet {
    /// Creates a titled group.
    pub fn new(title: impl Into<String>, items: Vec<KeyItem>) -> Self {
        Self {
            title: title.into(),
            items,
        }
    }
}

/// Name to key item lookup flattened from one or more [`KeyItemSet`]s.
///
/// When two sets carry the same name, the item from the later set wins.
#[derive(Debug, Clone, Default)]
pub struct KeyRegistry {
    items: HashMap<String, KeyItem>,
}

impl KeyRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a registry from key item sets.
    pub fn build(sets: &[KeyItemSet]) -> Self {
        let items = sets
            .iter()
            .flat_map(|set| set.items.iter())
            .map(|item| (item.name.clone(), item.clone()))
            .collect();
        Self { items }
    }

    /// Looks up a registered key.
    pub fn get(&self, name: &str) -> Option<&KeyItem> {
        self.items.get(name)
    }

    /// Returns the registered key, or a fallback whose label is the name.
    pub fn resolve(&self, name: &str) -> KeyItem {
        self.get(name)
            .cloned()
            .unwrap_or_else(|| KeyItem::fallback(name))
    }

    /// Returns true if the name is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.items.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Finds the closest registered name for an unknown key.
    ///
    /// Returns `None` for exact matches and for names further than the
    /// suggestion threshold from every registered key.
    pub fn suggest(&self, name: &str) -> Option<&str> {
        let query = name.to_lowercase();

        let (best, distance) = self
            .items
            .keys()
            .map(|candidate| (candidate.as_str(), levenshtein(&query, &candidate.to_lowercase())))
            .min_by(|(a, da), (b, db)| da.cmp(db).then_with(|| a.cmp(b)))?;

        if distance > 0 && distance <= MAX_SUGGESTION_DISTANCE {
            Some(best)
        } else {
            None
        }
    }
}
