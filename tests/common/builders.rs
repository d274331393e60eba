//! Test builders — short constructors for records, engines and result lists.
//!
//! These are designed for readability in test assertions, not for production
//! use. They panic on invalid input rather than returning `Result`.

use combomatch_core::{FilterEngine, MatchMode, MatchPolicy, MemoryStore, Record, RecordStore};
use serde_json::{Map, Value};

/// A JSON object record from `(field, value)` pairs.
///
/// ```rust
/// let r = record(&[("name", "Albany, NY"), ("code", "ALB")]);
/// ```
pub fn record(fields: &[(&str, &str)]) -> Value {
    let map: Map<String, Value> = fields
        .iter()
        .map(|(k, v)| (k.to_string(), Value::String(v.to_string())))
        .collect();
    Value::Object(map)
}

/// Engine over the `name` field with the given policy.
pub fn engine(policy: MatchPolicy) -> FilterEngine {
    FilterEngine::builder().policy(policy).build()
}

/// Engine in anchored (starts-with) mode.
pub fn anchored_engine() -> FilterEngine {
    FilterEngine::builder().mode(MatchMode::AnchoredWhole).build()
}

/// Display names of the records `engine` accepts for `query`, in input order.
pub fn accepted_names(engine: &mut FilterEngine, records: &[Value], query: &str) -> Vec<String> {
    let predicate = engine.make_predicate(query).expect("query compiles");
    records
        .iter()
        .filter(|r| predicate.test(*r).expect("matcher does not fail"))
        .map(|r| name_of(r))
        .collect()
}

/// Display names currently visible in `store`.
pub fn visible_names(store: &MemoryStore<Value>) -> Vec<String> {
    assert!(store.count() <= store.len());
    store.visible().map(name_of).collect()
}

fn name_of(record: &Value) -> String {
    record
        .field("name")
        .map(|n| n.into_owned())
        .unwrap_or_default()
}
