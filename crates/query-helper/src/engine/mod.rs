//! The query translation engine.
//!
//! [`QueryHelper`] holds one list of filters (plus an OR-group) and projects
//! it into each public representation:
//!
//! - [`QueryHelper::query_tags`] - tags for display and editing
//! - [`QueryHelper::raw_queries`] / [`QueryHelper::raw_query_strings`] - compact
//!   tuples for URLs and storage
//! - [`QueryHelper::api_query`] - the backend filter payload
//!
//! Every `set_filters_as_*` call replaces the whole list; nothing is merged.
//!
//! # Example
//!
//! ```
//! use query_helper_rs::{QueryContext, QueryHelper};
//!
//! let mut helper = QueryHelper::new(QueryContext::default());
//! helper.set_filters_as_raw_query_string([r#"["web","name","="]"#, r#"["foo"]"#]);
//!
//! let api = helper.api_query();
//! assert_eq!(api.filter.len(), 1);
//! assert_eq!(api.keyword, "foo");
//! ```

mod expand;
mod tags;


use std::fmt;
use std::sync::Arc;

use crate::api::ApiQuery;
use crate::context::QueryContext;
use crate::error::{QueryError, QueryResult};
use crate::filter::QueryFilter;
use crate::keys::{KeyItemSet, KeyRegistry};
use crate::operator::RawOperator;
use crate::raw_query::{RawQuery, RawQueryStrings};
use crate::reference::ReferenceSource;
use crate::tag::QueryTag;

/// Stateful translator between tags, raw tuples, and API payloads.
///
/// Getters never modify state. Writers must be serialized by the caller.
#[derive(Clone, Default)]
pub struct QueryHelper {
    context: QueryContext,
    references: Option<Arc<dyn ReferenceSource>>,
    keys: KeyRegistry,
    filters: Vec<QueryFilter>,
    or_filters: Vec<QueryFilter>,
}

impl fmt::Debug for QueryHelper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryHelper")
            .field("timezone", &self.context.timezone())
            .field("keys", &self.keys.len())
            .field("has_references", &self.references.is_some())
            .field("filters", &self.filters)
            .field("or_filters", &self.or_filters)
            .finish()
    }
}

impl QueryHelper {
    /// Creates an engine with no filters.
    pub fn new(context: QueryContext) -> Self {
        Self {
            context,
            ..Self::default()
        }
    }

    /// Creates an engine with its key registry built from `sets`.
    pub fn with_key_item_sets(context: QueryContext, sets: &[KeyItemSet]) -> Self {
        let mut helper = Self::new(context);
        helper.set_key_item_sets(sets);
        helper
    }

    // ==================== Configuration ====================

    /// Attaches (or detaches) the reference dictionaries used for labels.
    pub fn set_reference(&mut self, references: Option<Arc<dyn ReferenceSource>>) -> &mut Self {
        self.references = references;
        self
    }

    /// Rebuilds the key registry.
    pub fn set_key_item_sets(&mut self, sets: &[KeyItemSet]) -> &mut Self {
        self.keys = KeyRegistry::build(sets);
        self
    }

    pub fn context(&self) -> &QueryContext {
        &self.context
    }

    pub fn key_registry(&self) -> &KeyRegistry {
        &self.keys
    }

    // ==================== Setters ====================

    /// Replaces the filters with those described by a tag list.
    ///
    /// Invalid tags are skipped. Keyless tags become keyword filters, in
    /// order, ahead of the keyed ones. Keyed tags are grouped by key and
    /// effective operator (first-seen key, then first-seen operator) and each
    /// group becomes one filter whose value is the list of the group's values.
    /// On datetime keys the operator takes its datetime form.
    pub fn set_filters_as_query_tag(
        &mut self,
        tags: &[QueryTag],
        key_item_sets: Option<&[KeyItemSet]>,
    ) -> &mut Self {
        if let Some(sets) = key_item_sets {
            self.set_key_item_sets(sets);
        }
        self.filters = tags::filters_from_tags(tags, &self.keys);
        self
    }

    /// Replaces the filters with the given tuples.
    pub fn set_filters_as_raw_query<I>(&mut self, raw_queries: I) -> &mut Self
    where
        I: IntoIterator<Item = RawQuery>,
    {
        self.filters = raw_queries.into_iter().map(QueryFilter::from).collect();
        self
    }

    /// Replaces the filters with JSON-encoded tuples.
    ///
    /// Entries are decoded one by one. An entry that fails to decode is logged
    /// and dropped; the remaining entries still load.
    pub fn set_filters_as_raw_query_string<'a>(
        &mut self,
        input: impl Into<RawQueryStrings<'a>>,
    ) -> &mut Self {
        let mut filters = Vec::new();
        for entry in input.into().entries() {
            match serde_json::from_str::<RawQuery>(entry) {
                Ok(raw) => filters.push(QueryFilter::from(raw)),
                Err(e) => {
                    tracing::warn!(input = entry, error = %e, "raw query string parsing error");
                }
            }
        }
        self.filters = filters;
        self
    }

    /// Replaces the filters verbatim.
    pub fn set_filters<I>(&mut self, filters: I) -> &mut Self
    where
        I: IntoIterator<Item = QueryFilter>,
    {
        self.filters = filters.into_iter().collect();
        self
    }

    /// Appends one filter.
    pub fn add_filter(&mut self, filter: QueryFilter) -> &mut Self {
        self.filters.push(filter);
        self
    }

    /// Appends several filters.
    pub fn add_filters<I>(&mut self, filters: I) -> &mut Self
    where
        I: IntoIterator<Item = QueryFilter>,
    {
        self.filters.extend(filters);
        self
    }

    /// Replaces the OR-group.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::InvalidOrFilter`] if any entry lacks a key or a
    /// non-empty operator. Nothing is changed in that case.
    pub fn set_or_filters<I>(&mut self, or_filters: I) -> QueryResult<&mut Self>
    where
        I: IntoIterator<Item = QueryFilter>,
    {
        let or_filters: Vec<QueryFilter> = or_filters.into_iter().collect();
        validate_or_filters(&or_filters)?;
        self.or_filters = or_filters;
        Ok(self)
    }

    /// Appends one entry to the OR-group.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::InvalidOrFilter`] if the entry lacks a key or a
    /// non-empty operator.
    pub fn add_or_filter(&mut self, or_filter: QueryFilter) -> QueryResult<&mut Self> {
        self.add_or_filters([or_filter])
    }

    /// Appends several entries to the OR-group, all or none.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::InvalidOrFilter`] naming the first bad entry.
    pub fn add_or_filters<I>(&mut self, or_filters: I) -> QueryResult<&mut Self>
    where
        I: IntoIterator<Item = QueryFilter>,
    {
        let or_filters: Vec<QueryFilter> = or_filters.into_iter().collect();
        validate_or_filters(&or_filters)?;
        self.or_filters.extend(or_filters);
        Ok(self)
    }

    // ==================== Getters ====================

    pub fn filters(&self) -> &[QueryFilter] {
        &self.filters
    }

    pub fn or_filters(&self) -> &[QueryFilter] {
        &self.or_filters
    }

    /// Projects the filters into tags, one tag per value.
    pub fn query_tags(&self) -> Vec<QueryTag> {
        tags::tags_from_filters(&self.filters, &self.keys, self.references.as_deref())
    }

    /// Projects the filters into tuples.
    ///
    /// Datetime values stay as authored; they are only expanded in
    /// [`QueryHelper::api_query`].
    pub fn raw_queries(&self) -> Vec<RawQuery> {
        self.filters.iter().map(RawQuery::from).collect()
    }

    /// Each tuple as its own JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::Json`] if encoding fails.
    pub fn raw_query_strings(&self) -> QueryResult<Vec<String>> {
        self.raw_queries()
            .iter()
            .map(|raw| serde_json::to_string(raw).map_err(QueryError::from))
            .collect()
    }

    /// All tuples as one JSON array string.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::Json`] if encoding fails.
    pub fn raw_query_string(&self) -> QueryResult<String> {
        Ok(serde_json::to_string(&self.raw_queries())?)
    }

    /// Builds the backend payload from the AND-group and the OR-group.
    pub fn api_query(&self) -> ApiQuery {
        let and_group = expand::expand_filters(&self.filters, &self.context);
        let or_group = expand::expand_filters(&self.or_filters, &self.context);

        tracing::debug!(
            filters = and_group.filters.len(),
            or_filters = or_group.filters.len(),
            keywords = and_group.keywords.len(),
            "built api query"
        );

        ApiQuery {
            filter: and_group.filters,
            filter_or: or_group.filters,
            keyword: and_group.keywords.join(" "),
        }
    }
}

/// Checks that every OR-group entry has a key and a non-empty operator.
fn validate_or_filters(or_filters: &[QueryFilter]) -> QueryResult<()> {
    for (index, filter) in or_filters.iter().enumerate() {
        let has_key = filter.key().is_some();
        let has_operator = !matches!(filter.operator(), None | Some(RawOperator::Contain));
        if !has_key || !has_operator {
            return Err(QueryError::invalid_or_filter(index));
        }
    }
    Ok(())
}
