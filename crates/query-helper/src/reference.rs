//! Foreign-reference label resolution.
//!
//! Some keys store an id (a project id, a user id) whose human label lives in
//! a dictionary owned and refreshed by someone else. The engine only reads
//! point entries; a dictionary that is missing or not yet populated is a cache
//! miss and the raw value becomes its own label.

use std::collections::HashMap;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::value::Scalar;

/// One entry of a reference dictionary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceItem {
    pub name: String,
    pub label: String,
}

impl ReferenceItem {
    pub fn new(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
        }
    }
}

/// Dictionary of id to item for one reference name.
pub type ReferenceMap = HashMap<String, ReferenceItem>;

/// Read-only view over externally owned reference dictionaries.
pub trait ReferenceSource: Send + Sync {
    /// Returns true if a dictionary exists for this reference name.
    fn has_reference(&self, reference: &str) -> bool;

    /// Looks up one id in one dictionary.
    fn lookup(&self, reference: &str, id: &str) -> Option<ReferenceItem>;
}

/// Live reference store.
///
/// Writers refresh whole dictionaries or single entries while readers keep
/// resolving against whatever snapshot is visible at call time.
#[derive(Debug, Default)]
pub struct ReferenceStore {
    maps: RwLock<HashMap<String, ReferenceMap>>,
}

impl ReferenceStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the dictionary for a reference name.
    pub fn replace(&self, reference: impl Into<String>, map: ReferenceMap) {
        self.maps.write().insert(reference.into(), map);
    }

    /// Inserts or updates one entry, creating the dictionary if needed.
    pub fn insert(&self, reference: &str, id: impl Into<String>, item: ReferenceItem) {
        self.maps
            .write()
            .entry(reference.to_string())
            .or_default()
            .insert(id.into(), item);
    }

    /// Drops the dictionary for a reference name.
    pub fn remove_reference(&self, reference: &str) -> Option<ReferenceMap> {
        self.maps.write().remove(reference)
    }

    /// Returns the reference names currently loaded.
    pub fn references(&self) -> Vec<String> {
        let mut names: Vec<String> = self.maps.read().keys().cloned().collect();
        names.sort();
        names
    }
}

impl From<HashMap<String, ReferenceMap>> for ReferenceStore {
    fn from(maps: HashMap<String, ReferenceMap>) -> Self {
        Self {
            maps: RwLock::new(maps),
        }
    }
}

impl ReferenceSource for ReferenceStore {
    fn has_reference(&self, reference: &str) -> bool {
        self.maps.read().contains_key(reference)
    }

    fn lookup(&self, reference: &str, id: &str) -> Option<ReferenceItem> {
        self.maps.read().get(reference)?.get(id).cloned()
    }
}

/// Resolves the display label for a value of a referencing key.
///
/// Uses the dictionary entry's label when both the dictionary and the entry
/// exist; otherwise the stringified value.
pub fn resolve_label(
    source: Option<&dyn ReferenceSource>,
    reference: Option<&str>,
    value: &Scalar,
) -> String {
    let id = value.to_string();
    match (source, reference) {
        (Some(source), Some(reference)) => source
            .lookup(reference, &id)
            .map(|item| item.label)
            .unwrap_or(id),
        _ => id,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> ReferenceStore {
        let store = ReferenceStore::new();
        store.insert("project", "p-1", ReferenceItem::new("p-1", "Website"));
        store.insert("project", "42", ReferenceItem::new("42", "Numbered"));
        store
    }

    #[test]
    fn test_resolve_label_hit() {
        let store = store();
        let label = resolve_label(Some(&store), Some("project"), &Scalar::from("p-1"));
        assert_eq!(label, "Website");
    }

    #[test]
    fn test_resolve_label_numeric_id() {
        let store = store();
        let label = resolve_label(Some(&store), Some("project"), &Scalar::from(42i64));
        assert_eq!(label, "Numbered");
    }

    #[test]
    fn test_resolve_label_entry_miss() {
        let store = store();
        let label = resolve_label(Some(&store), Some("project"), &Scalar::from("p-9"));
        assert_eq!(label, "p-9");
    }

    #[test]
    fn test_resolve_label_dictionary_miss() {
        let store = store();
        let label = resolve_label(Some(&store), Some("user"), &Scalar::from("u-1"));
        assert_eq!(label, "u-1");
    }

    #[test]
    fn test_resolve_label_without_store_or_reference() {
        let store = store();
        assert_eq!(resolve_label(None, Some("project"), &Scalar::from("p-1")), "p-1");
        assert_eq!(resolve_label(Some(&store), None, &Scalar::from("p-1")), "p-1");
    }

    #[test]
    fn test_store_refresh_is_visible() {
        let store = store();
        let mut map = ReferenceMap::new();
        map.insert("p-1".to_string(), ReferenceItem::new("p-1", "Renamed"));
        store.replace("project", map);

        assert_eq!(store.lookup("project", "p-1").unwrap().label, "Renamed");
        assert!(store.lookup("project", "42").is_none());
        assert!(store.has_reference("project"));

        store.remove_reference("project");
        assert!(!store.has_reference("project"));
        assert!(store.references().is_empty());
    }
}
