//! Assertion macros for combomatch harnesses.
//!
//! These wrap `pretty_assertions` and add failure messages that say which
//! query and which policy produced the unexpected result set.

// ---------------------------------------------------------------------------
// Result-set assertions
// ---------------------------------------------------------------------------

/// Assert the exact list of display names an engine accepts for a query.
///
/// ```rust
/// assert_accepts!(engine, albanys(), "albany or" => ["Albany, OR"]);
/// ```
#[macro_export]
macro_rules! assert_accepts {
    ($engine:expr, $records:expr, $query:expr => [$($name:expr),* $(,)?]) => {{
        let engine: &mut combomatch_core::FilterEngine = &mut $engine;
        let query: &str = $query;
        let policy = engine.config().policy;
        let actual = $crate::common::accepted_names(engine, &$records, query);
        let expected: Vec<String> = vec![$($name.to_string()),*];
        pretty_assertions::assert_eq!(
            actual,
            expected,
            "assert_accepts! failed for query {:?} under {} policy",
            query,
            policy
        );
    }};
}

/// Assert that an engine accepts nothing for a query.
#[macro_export]
macro_rules! assert_rejects_all {
    ($engine:expr, $records:expr, $query:expr) => {{
        let engine: &mut combomatch_core::FilterEngine = &mut $engine;
        let query: &str = $query;
        let actual = $crate::common::accepted_names(engine, &$records, query);
        if !actual.is_empty() {
            panic!(
                "assert_rejects_all! failed for query {:?}: {} record(s) accepted: {:?}",
                query,
                actual.len(),
                actual
            );
        }
    }};
}

// ---------------------------------------------------------------------------
// Highlight assertions
// ---------------------------------------------------------------------------

/// Assert that highlighted spans are sorted, non-empty and never touch.
pub fn assert_spans_disjoint(spans: &[combomatch_core::HighlightSpan]) {
    for span in spans {
        assert!(!span.is_empty(), "empty span in {spans:?}");
    }
    for pair in spans.windows(2) {
        assert!(
            pair[0].end < pair[1].start,
            "spans overlap or touch: {:?} then {:?}",
            pair[0],
            pair[1]
        );
    }
}
