//! Result set export.
//!
//! Two formats: pretty-printed JSON of the whole set, and a delimited-text
//! rendering where every cell is JSON-string-quoted. The quoting carries the
//! tool's historical behavior: each value is coerced to a string (missing
//! and null become empty) and then run through a JSON string escape, rather
//! than minimal CSV quoting. Embedded commas survive only because every
//! cell is quoted. Numbers come out as `"1"`, not `1`.
//!
//! Both exporters yield `None` for an empty set; nothing gets written.

use serde_json::Value;

use apify_client::ResultSet;

/// Download name for the JSON export.
pub const JSON_FILENAME: &str = "apify_results.json";

/// Download name for the delimited-text export.
pub const CSV_FILENAME: &str = "apify_results.csv";

/// Pretty-printed JSON (2-space indent) of the full result set. Parsing it
/// back yields the original set unchanged.
pub fn to_json(results: &ResultSet) -> Option<String> {
    if results.is_empty() {
        return None;
    }
    serde_json::to_string_pretty(results).ok()
}

/// Delimited-text rendering of the result set.
///
/// The field list comes from the first record's keys, in that record's own
/// key order. Header cells are the bare field names; every data cell is
/// coerced to a string and JSON-quoted. Records missing a field get an
/// empty-string cell for it; fields that only appear on later records are
/// dropped.
pub fn to_csv(results: &ResultSet) -> Option<String> {
    let first = results.first()?;
    let fields: Vec<&String> = first.keys().collect();

    let mut lines = Vec::with_capacity(results.len() + 1);
    lines.push(
        fields
            .iter()
            .map(|field| field.as_str())
            .collect::<Vec<_>>()
            .join(","),
    );
    for record in results {
        let row: Vec<String> = fields
            .iter()
            .map(|field| quote_cell(record.get(*field)))
            .collect();
        lines.push(row.join(","));
    }
    Some(lines.join("\n"))
}

/// One cell: coerce the value to a string, then JSON-string-escape it.
///
/// Missing and null values coerce to the empty string, strings pass through
/// verbatim, numbers and booleans use their display form, and nested arrays
/// or objects are flattened to compact JSON before quoting.
fn quote_cell(value: Option<&Value>) -> String {
    let text = match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Number(n)) => n.to_string(),
        Some(nested) => serde_json::to_string(nested).unwrap_or_default(),
    };
    // serde_json's string serialization is exactly the quote-and-escape
    // procedure the cells need.
    serde_json::to_string(&text).unwrap_or_default()
}
