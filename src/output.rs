//! Output layer — one display line per visible record.

use combomatch_core::{HighlightQuery, Record};
use serde_json::Value;

/// The text shown for `record`: its display field, or the compact JSON when
/// the field is missing.
pub fn display_text(record: &Value, display_field: &str) -> String {
    match record.field(display_field) {
        Some(text) => text.into_owned(),
        None => record.to_string(),
    }
}

/// Render each record's display text, highlighting `query` when it is set.
pub fn render_lines<'a>(
    records: impl Iterator<Item = &'a Value>,
    display_field: &str,
    query: Option<&HighlightQuery<'_>>,
) -> Vec<String> {
    records
        .map(|record| {
            let text = display_text(record, display_field);
            match query {
                Some(q) => q.render(&text),
                None => text,
            }
        })
        .collect()
}
