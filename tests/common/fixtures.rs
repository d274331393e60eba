//! Static record corpora used across harnesses.

use serde_json::{json, Value};

/// Airport display names with their IATA codes.
pub const AIRPORTS: &[(&str, &str)] = &[
    ("Aberdeen, SD", "ABR"),
    ("Abilene, TX", "ABI"),
    ("Akron, OH", "CAK"),
    ("Albany, NY", "ALB"),
    ("Albany, OR", "CVO"),
    ("Albuquerque, NM", "ABQ"),
    ("Anchorage, AK", "ANC"),
    ("New York, NY (JFK)", "JFK"),
    ("Portland, ME", "PWM"),
    ("Portland, OR", "PDX"),
    ("Salt Lake City, UT", "SLC"),
];

/// The two-record corpus from the basic AND/OR scenarios.
pub fn albanys() -> Vec<Value> {
    vec![json!({ "name": "Albany, NY" }), json!({ "name": "Albany, OR" })]
}

/// Every airport as `{ "name": ..., "code": ... }`.
pub fn airports() -> Vec<Value> {
    AIRPORTS
        .iter()
        .map(|(name, code)| json!({ "name": name, "code": code }))
        .collect()
}

/// [`airports`] as JSON lines, the way the CLI reads them.
pub fn airports_jsonl() -> String {
    airports()
        .iter()
        .map(Value::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

/// `n` synthetic records for throughput-style tests.
pub fn numbered_records(n: usize) -> Vec<Value> {
    (0..n)
        .map(|i| json!({ "name": format!("{} record {i}", AIRPORTS[i % AIRPORTS.len()].0) }))
        .collect()
}
