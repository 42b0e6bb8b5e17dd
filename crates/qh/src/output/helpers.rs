//! Common helper functions for output formatting.

use owo_colors::OwoColorize;
use query_helper_rs::operator::TagOperator;
use query_helper_rs::value::FilterValue;

/// Truncates a string to a maximum number of characters.
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() > max_len {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{kept}...")
    } else {
        s.to_string()
    }
}

/// Human-readable name of a tag operator.
pub fn describe_operator(operator: Option<TagOperator>) -> &'static str {
    match operator {
        None | Some(TagOperator::Contain) => "contains",
        Some(TagOperator::NotContain) => "not contains",
        Some(TagOperator::Greater) => ">",
        Some(TagOperator::GreaterOrEqual) => ">=",
        Some(TagOperator::Less) => "<",
        Some(TagOperator::LessOrEqual) => "<=",
        Some(TagOperator::Equal) => "=",
        Some(TagOperator::NotEqual) => "!=",
        Some(TagOperator::Regex) => "matches",
    }
}

/// Formats an operator for a table cell, padded to `width`.
pub fn format_operator(operator: &str, width: usize, use_colors: bool) -> String {
    let padded = format!("{operator:<width$}");
    if use_colors {
        padded.cyan().to_string()
    } else {
        padded
    }
}

/// Formats a filter value as compact JSON.
pub fn format_value(value: &FilterValue) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| value.to_string())
}

/// Formats a section header.
pub fn format_header(text: &str, use_colors: bool) -> String {
    if use_colors {
        text.dimmed().to_string()
    } else {
        text.to_string()
    }
}
