//! Integration tests for translating between tags, raw queries and API payloads.
//!
//! Inputs are written as the JSON a search UI or a saved search would hand
//! over, and outputs are compared as JSON the remote API would receive.

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use serde_json::json;

use query_helper_rs::prelude::*;

fn key_sets() -> Vec<KeyItemSet> {
    serde_json::from_value(json!([
        {
            "title": "Issue",
            "items": [
                {"name": "title", "label": "Title", "dataType": "string"},
                {"name": "status", "label": "Status"},
                {"name": "created_at", "label": "Created", "dataType": "datetime"}
            ]
        },
        {
            "title": "Relations",
            "items": [
                {"name": "project_id", "label": "Project", "reference": "project"},
                {"name": "status", "label": "State"}
            ]
        }
    ]))
    .unwrap()
}

fn context(timezone: &str) -> QueryContext {
    let now = Utc.with_ymd_and_hms(2024, 5, 15, 3, 30, 0).unwrap();
    QueryContext::from_timezone_name(timezone)
        .unwrap()
        .with_expander(Arc::new(CalendarExpander::at(now)))
}

/// Test: Tags from the search box become an API payload and a saved search
#[test]
fn test_tags_to_api_and_raw() {
    let tags: Vec<QueryTag> = serde_json::from_value(json!([
        {"key": {"name": "status", "label": "State"}, "value": {"name": "open", "label": "open"}, "operator": "="},
        {"value": {"name": "crash", "label": "crash"}},
        {"key": {"name": "status", "label": "State"}, "value": {"name": "triage", "label": "triage"}, "operator": "="},
        {"key": {"name": "created_at", "label": "Created"}, "value": {"name": "2024-03", "label": "2024-03"}, "operator": "="},
        {"key": {"name": "title", "label": "Title"}, "value": {"name": "draft", "label": "draft"}, "operator": "!", "invalid": true}
    ]))
    .unwrap();

    let mut helper = QueryHelper::with_key_item_sets(context("UTC"), &key_sets());
    helper.set_filters_as_query_tag(&tags, None);

    let api = serde_json::to_value(helper.api_query()).unwrap();
    assert_eq!(
        api,
        json!({
            "filter": [
                {"k": "status", "v": ["open", "triage"], "o": "in"},
                {"k": "created_at", "v": "2024-03-01T00:00:00.000Z", "o": "datetime_gte"},
                {"k": "created_at", "v": "2024-04-01T00:00:00.000Z", "o": "datetime_lt"}
            ],
            "filterOr": [],
            "keyword": "crash"
        })
    );

    assert_eq!(
        helper.raw_query_strings().unwrap(),
        vec![
            r#"["crash"]"#,
            r#"[["open","triage"],"status","="]"#,
            r#"[["2024-03"],"created_at","=t"]"#,
        ]
    );
}

/// Test: A saved search restores into tags with resolved labels
#[test]
fn test_saved_search_to_tags() {
    let store = Arc::new(ReferenceStore::new());
    store.insert("project", "7", ReferenceItem::new("7", "Backend"));
    let source: Arc<dyn ReferenceSource> = store;

    let mut helper = QueryHelper::with_key_item_sets(context("UTC"), &key_sets());
    helper.set_reference(Some(source)).set_filters_as_raw_query_string(
        r#"[["7","8"],"project_id","="]"#,
    );

    let tags = serde_json::to_value(helper.query_tags()).unwrap();
    assert_eq!(
        tags,
        json!([
            {
                "key": {"name": "project_id", "label": "Project", "reference": "project"},
                "value": {"name": "7", "label": "Backend"},
                "operator": "="
            },
            {
                "key": {"name": "project_id", "label": "Project", "reference": "project"},
                "value": {"name": "8", "label": "8"},
                "operator": "="
            }
        ])
    );
}

/// Test: Later key sets override earlier ones by name
#[test]
fn test_registry_duplicate_name_last_wins() {
    let helper = QueryHelper::with_key_item_sets(context("UTC"), &key_sets());
    assert_eq!(helper.key_registry().resolve("status").label, "State");
    assert_eq!(helper.key_registry().resolve("assignee").label, "assignee");
}

/// Test: Datetime bounds follow the configured timezone
#[test]
fn test_relative_datetime_in_timezone() {
    let mut helper = QueryHelper::new(context("Asia/Seoul"));
    helper.set_filters_as_raw_query([RawQuery::keyed(
        "today",
        "created_at",
        Some(RawOperator::DatetimeEqual),
    )]);

    // 2024-05-15 03:30 UTC is 12:30 on the 15th in Seoul.
    let api = serde_json::to_value(helper.api_query()).unwrap();
    assert_eq!(
        api["filter"],
        json!([
            {"k": "created_at", "v": "2024-05-14T15:00:00.000Z", "o": "datetime_gte"},
            {"k": "created_at", "v": "2024-05-15T15:00:00.000Z", "o": "datetime_lt"}
        ])
    );
}

/// Test: Filters round-trip through their record JSON form
#[test]
fn test_filter_records_round_trip() {
    let records = json!([
        {"v": "foo"},
        {"k": "status", "v": null, "o": "!="},
        {"k": "title", "v": ["a", "b"], "o": "$"}
    ]);

    let filters: Vec<QueryFilter> = serde_json::from_value(records.clone()).unwrap();
    let mut helper = QueryHelper::new(context("UTC"));
    helper.set_filters(filters);

    assert_eq!(serde_json::to_value(helper.filters()).unwrap(), records);

    let api = serde_json::to_value(helper.api_query()).unwrap();
    assert_eq!(
        api,
        json!({
            "filter": [
                {"k": "status", "v": null, "o": "not"},
                {"k": "title", "v": ["a", "b"], "o": "regex_in"}
            ],
            "filterOr": [],
            "keyword": "foo"
        })
    );
}

/// Test: A bad OR entry leaves the helper as it was
#[test]
fn test_or_filter_validation_keeps_state() {
    let mut helper = QueryHelper::new(context("UTC"));
    helper.set_filters([QueryFilter::keyword("kept")]);

    let err = helper
        .add_or_filter(QueryFilter::keyword(1i64))
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "or-filter at position 0 must have a key and a non-empty operator"
    );
    assert_eq!(helper.filters(), &[QueryFilter::keyword("kept")]);
    assert!(helper.or_filters().is_empty());
}
