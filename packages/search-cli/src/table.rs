//! Plain-text table rendering for a result set.
//!
//! Columns come from the first record's keys, in that record's own key
//! order, the same field list the CSV export uses. Cells render like the
//! original tool's results table: strings verbatim, numbers and booleans in
//! display form, null blank, nested values as compact JSON.

use apify_client::ResultSet;
use console::truncate_str;
use serde_json::Value;

/// Cells wider than this get truncated with an ellipsis.
const MAX_CELL_WIDTH: usize = 40;

/// Render the result set as a table, or `None` when there is nothing to
/// show.
pub fn render(results: &ResultSet) -> Option<String> {
    let first = results.first()?;
    let fields: Vec<String> = first.keys().cloned().collect();

    let rows: Vec<Vec<String>> = results
        .iter()
        .map(|record| {
            fields
                .iter()
                .map(|field| cell_text(record.get(field)))
                .collect()
        })
        .collect();

    let widths: Vec<usize> = fields
        .iter()
        .enumerate()
        .map(|(i, field)| {
            rows.iter()
                .map(|row| row[i].chars().count())
                .chain(std::iter::once(field.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    out.push_str(&format_row(&fields, &widths));
    out.push('\n');
    out.push_str(&separator(&widths));
    for row in &rows {
        out.push('\n');
        out.push_str(&format_row(row, &widths));
    }
    Some(out)
}

fn format_row<S: AsRef<str>>(cells: &[S], widths: &[usize]) -> String {
    cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell.as_ref()))
        .collect::<Vec<_>>()
        .join(" | ")
}

fn separator(widths: &[usize]) -> String {
    widths
        .iter()
        .map(|width| "-".repeat(*width))
        .collect::<Vec<_>>()
        .join("-+-")
}

fn cell_text(value: Option<&Value>) -> String {
    let text = match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Number(n)) => n.to_string(),
        Some(nested) => serde_json::to_string(nested).unwrap_or_default(),
    };
    truncate_str(&text, MAX_CELL_WIDTH, "…").into_owned()
}

#[cfg(test)]
mod tests {
    use apify_client::Record;

    use super::*;

    fn record(pairs: &[(&str, Value)]) -> Record {
        let mut record = Record::new();
        for (key, value) in pairs {
            record.insert(key.to_string(), value.clone());
        }
        record
    }

    #[test]
    fn renders_header_separator_and_rows() {
        let results = vec![
            record(&[
                ("text", serde_json::json!("hello")),
                ("likes", serde_json::json!(7)),
            ]),
            record(&[("text", serde_json::json!("bye"))]),
        ];

        let table = render(&results).unwrap();
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines[0], "text  | likes");
        assert_eq!(lines[1], "------+------");
        assert_eq!(lines[2], "hello | 7    ");
        assert_eq!(lines[3], "bye   |      ");
    }

    #[test]
    fn nested_values_render_as_compact_json() {
        let results = vec![record(&[("meta", serde_json::json!({"k": 1}))])];

        let table = render(&results).unwrap();

        assert!(table.contains("{\"k\":1}"));
    }

    #[test]
    fn empty_set_renders_nothing() {
        assert!(render(&Vec::new()).is_none());
    }
}
