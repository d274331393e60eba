//! combomatch — filter and highlight a record list from the command line.
//!
//! Records come in as JSON, go through a [`QuerySession`] built from the
//! loaded [`Config`], and come out as one highlighted display line each.
//!
//! # Architecture
//!
//! ```text
//! input ──► MemoryStore ──► QuerySession ──► output
//!                                 │
//!                           Config + overrides
//! ```

pub mod input;
pub mod output;

pub use combomatch_core as core;

use anyhow::Result;
use combomatch_core::{
    Config, HighlightMarker, Highlighter, ListState, MatchMode, MatchPolicy, MemoryStore,
    QueryPlan, RecordStore,
};
use std::io::Write;

/// Command-line values that take precedence over the config file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub display_field: Option<String>,
    pub match_fields: Vec<String>,
    pub or: bool,
    pub anchored: bool,
    pub case_sensitive: bool,
    pub min_chars: Option<usize>,
}

impl Overrides {
    /// Overlay these values on `config`. Flags that were not given leave the
    /// config untouched.
    pub fn apply(&self, config: &mut Config) {
        if let Some(field) = &self.display_field {
            config.filter.display_field = field.clone();
        }
        if !self.match_fields.is_empty() {
            config.filter.match_fields = self.match_fields.clone();
        }
        if self.or {
            config.filter.policy = MatchPolicy::Or;
        }
        if self.anchored {
            config.filter.mode = MatchMode::AnchoredWhole;
        }
        if self.case_sensitive {
            config.filter.case_sensitive = true;
        }
        if let Some(n) = self.min_chars {
            config.list.min_chars = n;
        }
    }
}

/// Per-invocation output settings.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub query: String,
    /// Use the configured marker instead of ANSI reverse video.
    pub markup: bool,
    /// Print only the number of visible records.
    pub count_only: bool,
}

/// Filter `input` with `opts.query` and write the result to `out`.
///
/// A query shorter than `min_chars` leaves the list unfiltered and
/// unhighlighted. When nothing matches, the configured empty text is written
/// instead of any records.
pub fn run<W: Write>(
    config: &Config,
    opts: &RunOptions,
    input: &str,
    out: &mut W,
) -> Result<ListState> {
    config.validate()?;

    let mut store: MemoryStore<serde_json::Value> =
        input::parse_records(input)?.into_iter().collect();
    let mut session = config.session();
    let state = session.run(&mut store, QueryPlan::typed(&opts.query))?;
    tracing::info!(
        query = %opts.query,
        ?state,
        total = store.len(),
        "run: query finished"
    );

    if opts.count_only {
        writeln!(out, "{}", store.count())?;
        return Ok(state);
    }

    if state == ListState::Collapsed {
        writeln!(out, "{}", config.list.empty_text)?;
        return Ok(state);
    }

    let marker = if opts.markup {
        config.marker()
    } else {
        HighlightMarker::ansi()
    };
    let highlighter = Highlighter::new(marker, config.escape_set());
    let query = match state {
        ListState::Unchanged => None,
        _ => Some(highlighter.prepare(&opts.query, config.case())),
    };
    let display_field = &config.filter.display_field;
    for line in output::render_lines(store.visible(), display_field, query.as_ref()) {
        writeln!(out, "{line}")?;
    }
    Ok(state)
}
