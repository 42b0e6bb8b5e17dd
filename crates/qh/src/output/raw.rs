//! Raw query output formatting.

use serde::Serialize;

/// JSON output structure for the raw command.
#[derive(Serialize)]
pub struct RawQueriesOutput<'a> {
    pub raw_queries: &'a [String],
}

/// Formats encoded tuples as JSON.
pub fn format_raw_queries_json(raw_queries: &[String]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&RawQueriesOutput { raw_queries })
}

/// Formats encoded tuples one per line.
pub fn format_raw_queries_lines(raw_queries: &[String]) -> String {
    let mut output = String::new();
    for raw in raw_queries {
        output.push_str(raw);
        output.push('\n');
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_raw_queries_lines() {
        let raws = vec![r#"["foo"]"#.to_string(), r#"["web","name","="]"#.to_string()];
        assert_eq!(format_raw_queries_lines(&raws), "[\"foo\"]\n[\"web\",\"name\",\"=\"]\n");
        assert_eq!(format_raw_queries_lines(&[]), "");
    }

    #[test]
    fn test_format_raw_queries_json() {
        let raws = vec![r#"["foo"]"#.to_string()];
        let json: serde_json::Value =
            serde_json::from_str(&format_raw_queries_json(&raws).unwrap()).unwrap();
        assert_eq!(json["raw_queries"][0], r#"["foo"]"#);
    }
}
