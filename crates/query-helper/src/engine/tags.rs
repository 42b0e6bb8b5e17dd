//! Conversion between query tags and filters.

use indexmap::IndexMap;

use crate::filter::QueryFilter;
use crate::keys::{DataType, KeyRegistry};
use crate::operator::{null_tag_operator, RawOperator};
use crate::reference::{resolve_label, ReferenceSource};
use crate::tag::{QueryTag, TagValue};
use crate::value::{FilterValue, Scalar};

type Groups = IndexMap<String, IndexMap<Option<RawOperator>, Vec<Option<Scalar>>>>;

/// Builds filters from a tag list.
pub(super) fn filters_from_tags(tags: &[QueryTag], keys: &KeyRegistry) -> Vec<QueryFilter> {
    let mut keywords = Vec::new();
    let mut groups = Groups::new();

    for tag in tags.iter().filter(|tag| !tag.invalid) {
        let Some(key) = tag.key.as_ref() else {
            keywords.push(QueryFilter::keyword(FilterValue::from_option(
                tag.value.name.clone(),
            )));
            continue;
        };

        // The registry decides whether the key is a datetime, not the tag.
        let is_datetime = keys
            .get(&key.name)
            .map_or_else(|| key.is_datetime(), |item| item.is_datetime());
        let operator = tag.operator.map(|op| {
            if is_datetime {
                op.to_datetime_raw()
            } else {
                op.to_raw()
            }
        });

        groups
            .entry(key.name.clone())
            .or_default()
            .entry(operator)
            .or_default()
            .push(tag.value.name.clone());
    }

    let keyed = groups.into_iter().flat_map(|(key, by_operator)| {
        by_operator.into_iter().map(move |(operator, values)| {
            QueryFilter::new(Some(key.clone()), FilterValue::Many(values), operator)
        })
    });

    keywords.into_iter().chain(keyed).collect()
}

/// Projects filters into tags, one per value element.
pub(super) fn tags_from_filters(
    filters: &[QueryFilter],
    keys: &KeyRegistry,
    references: Option<&dyn ReferenceSource>,
) -> Vec<QueryTag> {
    let mut tags = Vec::new();

    for filter in filters {
        let value = filter.value();
        let Some(key_name) = filter.key() else {
            // A keyless null has nothing to show, so it gets no tag.
            tags.extend(
                value
                    .elements()
                    .into_iter()
                    .flatten()
                    .map(|scalar| QueryTag::keyword(scalar.clone())),
            );
            continue;
        };

        let key = keys.resolve(key_name);
        let operator = filter.operator();

        for element in value.elements() {
            let tag = match (element, operator) {
                (None, _) => QueryTag {
                    key: Some(key.clone()),
                    value: TagValue::null(),
                    operator: Some(null_tag_operator(operator)),
                    invalid: false,
                },
                (Some(scalar), Some(op)) if op.is_datetime() => QueryTag {
                    key: Some(key.clone().with_data_type(DataType::Datetime)),
                    value: TagValue::plain(scalar.clone()),
                    operator: op.datetime_tag_operator(),
                    invalid: false,
                },
                (Some(scalar), _) => QueryTag {
                    key: Some(key.clone()),
                    value: TagValue::new(
                        Some(scalar.clone()),
                        resolve_label(references, key.reference.as_deref(), scalar),
                    ),
                    operator: operator.map(|op| op.tag_operator()),
                    invalid: false,
                },
            };
            tags.push(tag);
        }
    }

    tags
}
