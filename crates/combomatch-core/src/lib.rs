//! combomatch-core — multi-term filter and highlight engine.
//!
//! A query typed into a combo box is split into whitespace-separated terms.
//! Each term is escaped, compiled to a case-(in)sensitive pattern, and tested
//! against every record through a pluggable [`FieldMatcher`]. The per-term
//! results are folded into one verdict under an AND or OR [`MatchPolicy`].
//! Separately, the [`Highlighter`] wraps every term found in a record's
//! display text in a marker.
//!
//! # Architecture
//!
//! ```text
//! Config ──► FilterEngine ──► Predicate ──► RecordStore
//!                 │                             │
//!                 └──────── QuerySession ───────┘
//!
//! Highlighter (independent of the verdict)
//! ```

pub mod aggregate;
pub mod config;
pub mod engine;
pub mod error;
pub mod highlight;
pub mod matcher;
pub mod pattern;
pub mod session;
pub mod store;
pub mod tokenizer;
pub mod types;

pub use aggregate::{aggregate, Tally};
pub use config::Config;
pub use engine::{
    CompiledQuery, CompiledTerm, EngineConfig, FilterEngine, FilterEngineBuilder, Predicate,
};
pub use error::{ConfigError, MatchError, MatchResult, PatternError};
pub use highlight::{merge_spans, HighlightMarker, HighlightQuery, HighlightSpan, Highlighter};
pub use matcher::{
    DisplayFieldMatcher, ExactFieldMatcher, FieldCombine, FieldMatcher, FnMatcher,
    MultiFieldMatcher,
};
pub use pattern::{EscapeSet, MatchPattern, PatternBuilder};
pub use session::{ListState, QueryPlan, QuerySession};
pub use store::{MemoryStore, RecordStore};
pub use tokenizer::tokenize;
pub use types::{CaseSensitivity, MatchMode, MatchPolicy, Record};
