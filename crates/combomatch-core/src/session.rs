//! Query session — drives the engine and a store as the user types.
//!
//! A session applies the widget-side rules that sit in front of the engine:
//!
//! - a non-empty query shorter than `min_chars` does not run at all;
//! - an empty query with `force_all` set lifts the filter instead of running it;
//! - after filtering, a non-empty view expands the list and an empty one
//!   collapses it.

use crate::engine::FilterEngine;
use crate::error::MatchResult;
use crate::store::RecordStore;

/// Minimum query length (in characters) before filtering runs.
pub const DEFAULT_MIN_CHARS: usize = 2;

/// Message shown by the list surface when nothing matches.
pub const DEFAULT_EMPTY_TEXT: &str = "No matches found!";

/// One query request from the input side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryPlan<'q> {
    pub query: &'q str,
    /// Show every record when the query is empty (e.g. the trigger button).
    pub force_all: bool,
}

impl<'q> QueryPlan<'q> {
    pub fn typed(query: &'q str) -> Self {
        Self {
            query,
            force_all: false,
        }
    }

    pub fn forced(query: &'q str) -> Self {
        Self {
            query,
            force_all: true,
        }
    }
}

/// What the list surface should do after a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListState {
    /// The query was below the length threshold; nothing changed.
    Unchanged,
    /// Show the list with this many records.
    Expanded(usize),
    /// Hide the list; the surface shows the empty text.
    Collapsed,
}

/// An engine plus the input-side threshold.
#[derive(Debug, Clone)]
pub struct QuerySession {
    engine: FilterEngine,
    min_chars: usize,
}

impl QuerySession {
    pub fn new(engine: FilterEngine, min_chars: usize) -> Self {
        Self { engine, min_chars }
    }

    pub fn engine(&self) -> &FilterEngine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut FilterEngine {
        &mut self.engine
    }

    pub fn min_chars(&self) -> usize {
        self.min_chars
    }

    /// Run `plan` against `store` and report the resulting list state.
    pub fn run<S: RecordStore>(
        &mut self,
        store: &mut S,
        plan: QueryPlan<'_>,
    ) -> MatchResult<ListState> {
        let len = plan.query.chars().count();
        if !plan.force_all && len > 0 && len < self.min_chars {
            tracing::debug!(
                query = plan.query,
                min_chars = self.min_chars,
                "session: below threshold"
            );
            return Ok(ListState::Unchanged);
        }

        if plan.query.is_empty() && plan.force_all {
            store.clear_filter();
        } else {
            let predicate = self.engine.make_predicate(plan.query)?;
            store.apply_filter(|record| predicate.test(record));
        }

        let count = store.count();
        let state = if count > 0 {
            ListState::Expanded(count)
        } else {
            ListState::Collapsed
        };
        tracing::debug!(
            query = plan.query,
            force_all = plan.force_all,
            ?state,
            "session: query done"
        );
        Ok(state)
    }
}
