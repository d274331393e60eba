//! Input layer — reads records from JSON lines or a JSON array.
//!
//! Either form is accepted: a document whose first non-blank character is
//! `[` is parsed as one array of objects, anything else as one object per
//! line. Blank lines are skipped. Non-object values are rejected, since they
//! have no fields to match against.

use anyhow::{bail, Context, Result};
use serde_json::Value;

/// Parse `text` into a list of JSON object records.
pub fn parse_records(text: &str) -> Result<Vec<Value>> {
    let trimmed = text.trim_start();
    let records = if trimmed.starts_with('[') {
        parse_array(trimmed)?
    } else {
        parse_lines(text)?
    };
    tracing::debug!(records = records.len(), "input: parsed records");
    Ok(records)
}

fn parse_array(text: &str) -> Result<Vec<Value>> {
    let values: Vec<Value> = serde_json::from_str(text).context("input is not a valid JSON array")?;
    for (i, value) in values.iter().enumerate() {
        if !value.is_object() {
            bail!("array element {i} is not a JSON object");
        }
    }
    Ok(values)
}

fn parse_lines(text: &str) -> Result<Vec<Value>> {
    let mut records = Vec::new();
    for (n, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let value: Value = serde_json::from_str(line)
            .with_context(|| format!("line {}: invalid JSON", n + 1))?;
        if !value.is_object() {
            bail!("line {}: not a JSON object", n + 1);
        }
        records.push(value);
    }
    Ok(records)
}
