//! Filter engine — turns a query into a record-acceptance predicate.
//!
//! # Pipeline
//!
//! ```text
//! query ─► tokenize ─► escape + compile ─► FieldMatcher (per term) ─► aggregate
//!   │                          │
//!   └── anchored mode: whole query, one anchored pattern, no aggregation
//! ```
//!
//! Compiled patterns are cached against the last query seen. Calling
//! [`FilterEngine::make_predicate`] with the same query again reuses them; a
//! different query rebuilds them. Per-record verdicts are never cached.

use std::sync::Arc;

use crate::aggregate::Tally;
use crate::error::MatchResult;
use crate::matcher::{DisplayFieldMatcher, FieldMatcher};
use crate::pattern::{EscapeSet, MatchPattern, PatternBuilder};
use crate::tokenizer::tokenize;
use crate::types::{CaseSensitivity, MatchMode, MatchPolicy, Record};

/// Display field used when none is configured.
pub const DEFAULT_DISPLAY_FIELD: &str = "name";

// ---------------------------------------------------------------------------
// Engine configuration
// ---------------------------------------------------------------------------

/// Engine-level settings, fixed for the lifetime of a [`FilterEngine`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EngineConfig {
    pub mode: MatchMode,
    pub policy: MatchPolicy,
    pub case: CaseSensitivity,
    pub escape: EscapeSet,
}

// ---------------------------------------------------------------------------
// Compiled query
// ---------------------------------------------------------------------------

/// One term and its compiled pattern.
#[derive(Debug, Clone)]
pub struct CompiledTerm {
    pub text: String,
    pub pattern: MatchPattern,
}

#[derive(Debug, Clone)]
enum Plan {
    /// Per-term patterns. Empty when the query has no terms.
    Terms(Vec<CompiledTerm>),
    /// The whole query as one start-anchored pattern.
    Anchored(CompiledTerm),
    /// Nothing to test; every record is accepted.
    AcceptAll,
}

/// The patterns compiled for one query.
#[derive(Debug, Clone)]
pub struct CompiledQuery {
    query: String,
    plan: Plan,
}

impl CompiledQuery {
    fn compile(query: &str, config: &EngineConfig) -> MatchResult<Self> {
        let builder = PatternBuilder::new(config.escape.clone(), config.case);
        let plan = match config.mode {
            MatchMode::AnchoredWhole if query.is_empty() => Plan::AcceptAll,
            MatchMode::AnchoredWhole => Plan::Anchored(CompiledTerm {
                text: query.to_string(),
                pattern: builder.build_anchored(query)?,
            }),
            MatchMode::Substring => {
                let terms = tokenize(query)
                    .into_iter()
                    .map(|term| -> MatchResult<CompiledTerm> {
                        Ok(CompiledTerm {
                            text: term.to_string(),
                            pattern: builder.build(term)?,
                        })
                    })
                    .collect::<MatchResult<Vec<_>>>()?;
                if terms.is_empty() {
                    Plan::AcceptAll
                } else {
                    Plan::Terms(terms)
                }
            }
        };
        Ok(Self {
            query: query.to_string(),
            plan,
        })
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// The compiled terms, in query order. Anchored mode yields the whole
    /// query as its single term; a query with no terms yields none.
    pub fn terms(&self) -> &[CompiledTerm] {
        match &self.plan {
            Plan::Terms(terms) => terms,
            Plan::Anchored(term) => std::slice::from_ref(term),
            Plan::AcceptAll => &[],
        }
    }

    /// True if this query accepts every record without consulting a matcher.
    pub fn accepts_all(&self) -> bool {
        matches!(self.plan, Plan::AcceptAll)
    }
}

// ---------------------------------------------------------------------------
// Predicate
// ---------------------------------------------------------------------------

/// Record-acceptance test for one query, borrowed from a [`FilterEngine`].
pub struct Predicate<'e> {
    compiled: &'e CompiledQuery,
    matcher: &'e dyn FieldMatcher,
    policy: MatchPolicy,
}

impl Predicate<'_> {
    /// Accept or reject `record`.
    ///
    /// In substring mode the matcher runs once for every term, then the
    /// results are aggregated under the engine's policy. In anchored mode it
    /// runs once with the whole query. Matcher errors propagate unchanged.
    pub fn test(&self, record: &dyn Record) -> MatchResult<bool> {
        match &self.compiled.plan {
            Plan::AcceptAll => Ok(true),
            Plan::Anchored(whole) => self.matcher.test(&whole.text, &whole.pattern, record),
            Plan::Terms(terms) => {
                let mut tally = Tally::default();
                for term in terms {
                    tally.record(self.matcher.test(&term.text, &term.pattern, record)?);
                }
                Ok(tally.verdict(self.policy))
            }
        }
    }

    pub fn compiled(&self) -> &CompiledQuery {
        self.compiled
    }
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// Builds and caches per-query predicates.
#[derive(Clone)]
pub struct FilterEngine {
    config: EngineConfig,
    matcher: Arc<dyn FieldMatcher>,
    cache: Option<CompiledQuery>,
    generation: u64,
}

impl std::fmt::Debug for FilterEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilterEngine")
            .field("config", &self.config)
            .field("cached_query", &self.cached_query())
            .field("generation", &self.generation)
            .finish_non_exhaustive()
    }
}

impl Default for FilterEngine {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl FilterEngine {
    pub fn new(config: EngineConfig, matcher: Arc<dyn FieldMatcher>) -> Self {
        Self {
            config,
            matcher,
            cache: None,
            generation: 0,
        }
    }

    pub fn builder() -> FilterEngineBuilder {
        FilterEngineBuilder::default()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The query whose patterns are currently cached, if any.
    pub fn cached_query(&self) -> Option<&str> {
        self.cache.as_ref().map(CompiledQuery::query)
    }

    /// Number of times patterns have been (re)compiled.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Compile `query` (or reuse the cached compilation) and return its
    /// predicate.
    ///
    /// Fails only if a term is too large for the regex engine.
    pub fn make_predicate(&mut self, query: &str) -> MatchResult<Predicate<'_>> {
        let compiled = match self.cache.take() {
            Some(cached) if cached.query == query => cached,
            _ => {
                let compiled = CompiledQuery::compile(query, &self.config)?;
                self.generation += 1;
                tracing::debug!(
                    query,
                    terms = compiled.terms().len(),
                    mode = %self.config.mode,
                    policy = %self.config.policy,
                    generation = self.generation,
                    "filter: compiled query"
                );
                compiled
            }
        };
        let compiled = self.cache.insert(compiled);
        Ok(Predicate {
            compiled,
            matcher: self.matcher.as_ref(),
            policy: self.config.policy,
        })
    }

    /// Convenience: compile `query` and test a single record.
    pub fn accepts(&mut self, query: &str, record: &dyn Record) -> MatchResult<bool> {
        self.make_predicate(query)?.test(record)
    }

    /// Drop the cached patterns.
    pub fn invalidate(&mut self) {
        self.cache = None;
    }
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Fluent constructor for [`FilterEngine`].
///
/// ```
/// use combomatch_core::{FilterEngine, MatchPolicy};
///
/// let engine = FilterEngine::builder()
///     .display_field("airport")
///     .policy(MatchPolicy::Or)
///     .build();
/// assert_eq!(engine.config().policy, MatchPolicy::Or);
/// ```
pub struct FilterEngineBuilder {
    config: EngineConfig,
    display_field: String,
    matcher: Option<Arc<dyn FieldMatcher>>,
}

impl Default for FilterEngineBuilder {
    fn default() -> Self {
        Self {
            config: EngineConfig::default(),
            display_field: DEFAULT_DISPLAY_FIELD.to_string(),
            matcher: None,
        }
    }
}

impl FilterEngineBuilder {
    pub fn mode(mut self, mode: MatchMode) -> Self {
        self.config.mode = mode;
        self
    }

    pub fn policy(mut self, policy: MatchPolicy) -> Self {
        self.config.policy = policy;
        self
    }

    pub fn case(mut self, case: impl Into<CaseSensitivity>) -> Self {
        self.config.case = case.into();
        self
    }

    pub fn escape(mut self, escape: EscapeSet) -> Self {
        self.config.escape = escape;
        self
    }

    /// Field tested by the default matcher. Ignored if [`matcher`](Self::matcher)
    /// is set.
    pub fn display_field(mut self, field: impl Into<String>) -> Self {
        self.display_field = field.into();
        self
    }

    /// Replace the default display-field matcher.
    pub fn matcher(mut self, matcher: impl FieldMatcher + 'static) -> Self {
        self.matcher = Some(Arc::new(matcher));
        self
    }

    pub fn shared_matcher(mut self, matcher: Arc<dyn FieldMatcher>) -> Self {
        self.matcher = Some(matcher);
        self
    }

    pub fn build(self) -> FilterEngine {
        let matcher = self
            .matcher
            .unwrap_or_else(|| Arc::new(DisplayFieldMatcher::new(self.display_field)));
        FilterEngine::new(self.config, matcher)
    }
}
