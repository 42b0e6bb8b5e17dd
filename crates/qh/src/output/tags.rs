//! Query tag output formatting.

use owo_colors::OwoColorize;
use query_helper_rs::tag::QueryTag;
use serde::Serialize;

use super::helpers::{describe_operator, format_header, format_operator, truncate_str};

/// JSON output structure for the tags command.
#[derive(Serialize)]
pub struct TagsOutput<'a> {
    pub tags: &'a [QueryTag],
}

/// Formats query tags as JSON.
pub fn format_tags_json(tags: &[QueryTag]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&TagsOutput { tags })
}

/// Formats query tags as a table.
pub fn format_tags_table(tags: &[QueryTag], use_colors: bool) -> String {
    if tags.is_empty() {
        return "No tags.\n".to_string();
    }

    let mut output = String::new();

    let header = format!("{:<20} {:<12} {:<20} {}", "Key", "Operator", "Value", "Label");
    output.push_str(&format_header(&header, use_colors));
    output.push('\n');

    for tag in tags {
        let key = match &tag.key {
            Some(key) if key.label != key.name => format!("{} ({})", key.label, key.name),
            Some(key) => key.name.clone(),
            None => "(keyword)".to_string(),
        };
        let key = truncate_str(&key, 20);
        let operator = if tag.key.is_some() {
            describe_operator(tag.operator)
        } else {
            ""
        };
        let value = tag
            .value
            .name
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_else(|| "null".to_string());
        let value = truncate_str(&value, 20);

        let label = if tag.value.name.is_none() && use_colors {
            tag.value.label.dimmed().to_string()
        } else {
            tag.value.label.clone()
        };

        output.push_str(&format!(
            "{:<20} {} {:<20} {}\n",
            key,
            format_operator(operator, 12, use_colors),
            value,
            label
        ));
    }

    output
}
