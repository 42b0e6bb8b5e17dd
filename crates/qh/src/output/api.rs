//! API payload output formatting.

use query_helper_rs::api::{ApiFilter, ApiQuery};

use super::helpers::{format_header, format_operator, format_value};

/// Formats the API payload as JSON.
pub fn format_api_query_json(query: &ApiQuery) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(query)
}

/// Formats the API payload as a table, one section per group.
pub fn format_api_query_table(query: &ApiQuery, use_colors: bool) -> String {
    if query.is_empty() {
        return "Empty query.\n".to_string();
    }

    let mut output = String::new();
    push_group(&mut output, "filter (all of)", &query.filter, use_colors);
    push_group(&mut output, "filterOr (any of)", &query.filter_or, use_colors);

    if !query.keyword.is_empty() {
        output.push_str(&format_header("keyword", use_colors));
        output.push('\n');
        output.push_str(&format!("  {:?}\n", query.keyword));
    }

    output
}

fn push_group(output: &mut String, title: &str, filters: &[ApiFilter], use_colors: bool) {
    if filters.is_empty() {
        return;
    }

    output.push_str(&format_header(title, use_colors));
    output.push('\n');
    for filter in filters {
        output.push_str(&format!(
            "  {:<20} {} {}\n",
            filter.k,
            format_operator(filter.o.as_str(), 14, use_colors),
            format_value(&filter.v)
        ));
    }
}
