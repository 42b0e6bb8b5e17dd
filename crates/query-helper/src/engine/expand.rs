//! Expansion of filters into API predicates and keyword tokens.

use crate::api::ApiFilter;
use crate::context::QueryContext;
use crate::filter::QueryFilter;
use crate::operator::{null_api_operator, ApiOperator, RawOperator};
use crate::value::{FilterValue, Scalar};

/// Output of expanding one filter group.
#[derive(Debug, Default)]
pub(super) struct Expansion {
    pub filters: Vec<ApiFilter>,
    pub keywords: Vec<String>,
}

/// Expands a filter list, in order.
pub(super) fn expand_filters(filters: &[QueryFilter], context: &QueryContext) -> Expansion {
    let mut out = Expansion::default();

    for filter in filters {
        match filter {
            QueryFilter::Keyword { value } => push_keywords(&mut out.keywords, value),

            QueryFilter::DatetimeRange {
                key,
                value,
                operator,
            } => {
                let expanded =
                    context
                        .expander()
                        .expand(key, value, *operator, context.timezone());
                match expanded {
                    Some(filters) => out.filters.extend(filters),
                    None => tracing::debug!(key = %key, "datetime filter expanded to nothing"),
                }
            }

            QueryFilter::Comparison {
                key,
                value: None,
                operator,
            } => out.filters.push(null_filter(key, *operator)),

            QueryFilter::Comparison {
                key,
                value: Some(value),
                operator,
            } => out.filters.push(ApiFilter::new(
                key.as_str(),
                value.clone(),
                singular_operator(*operator),
            )),

            QueryFilter::SetMembership {
                key,
                values,
                operator,
            } => expand_set(&mut out.filters, key, values, *operator),
        }
    }

    out
}

/// Keyword tokens: one per list element (null becomes an empty token), or
/// one trimmed token for a scalar. A null keyword contributes nothing.
fn push_keywords(keywords: &mut Vec<String>, value: &FilterValue) {
    match value {
        FilterValue::Many(values) => keywords.extend(values.iter().map(|v| {
            v.as_ref()
                .map(|s| s.to_string().trim().to_string())
                .unwrap_or_default()
        })),
        FilterValue::One(scalar) => keywords.push(scalar.to_string().trim().to_string()),
        FilterValue::Null => {}
    }
}

fn expand_set(
    filters: &mut Vec<ApiFilter>,
    key: &str,
    values: &[Option<Scalar>],
    operator: Option<RawOperator>,
) {
    // An empty list is not a null check: it takes the plural or per-element
    // path like any other list.
    if !values.is_empty() && values.iter().all(Option::is_none) {
        filters.push(null_filter(key, operator));
        return;
    }

    let plural = operator
        .unwrap_or(RawOperator::Contain)
        .plural_api_operator();
    if let Some(plural) = plural {
        filters.push(ApiFilter::new(key, FilterValue::Many(values.to_vec()), plural));
        return;
    }

    // No list form: one row per element, combined by the consumer's group
    // semantics.
    let singular = singular_operator(operator);
    for value in values {
        match value {
            Some(value) => filters.push(ApiFilter::new(key, value.clone(), singular)),
            None => filters.push(null_filter(key, operator)),
        }
    }
}

fn null_filter(key: &str, operator: Option<RawOperator>) -> ApiFilter {
    ApiFilter::new(key, FilterValue::Null, null_api_operator(operator))
}

fn singular_operator(operator: Option<RawOperator>) -> ApiOperator {
    operator.unwrap_or(RawOperator::Contain).api_operator()
}
