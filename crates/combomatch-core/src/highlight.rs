//! Highlighter — marks every query term found in a record's display text.
//!
//! Highlighting does not look at the filter verdict: every term that occurs
//! is marked, whether or not the record passed an AND/OR filter.
//!
//! # Span merging
//!
//! Each term is searched for independently and the resulting spans are
//! merged, so `"alb bany"` against `"Albany"` produces one span covering the
//! whole word rather than two nested or abutting markers:
//!
//! ```text
//! alb   [0,3)
//! bany    [2,6)
//! ────────────
//! merged [0,6)  →  <mark>Albany</mark>
//! ```

use crate::pattern::{EscapeSet, MatchPattern, PatternBuilder};
use crate::tokenizer::tokenize;
use crate::types::CaseSensitivity;

/// Default CSS class wrapped around each match.
pub const DEFAULT_HIGHLIGHT_CLASS: &str = "x-ux-combomatch";

// ---------------------------------------------------------------------------
// Spans
// ---------------------------------------------------------------------------

/// Byte range `[start, end)` of matched text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HighlightSpan {
    pub start: usize,
    pub end: usize,
}

impl HighlightSpan {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// True if the two spans share a byte or touch end-to-start.
    pub fn meets(&self, other: &HighlightSpan) -> bool {
        self.start <= other.end && other.start <= self.end
    }
}

/// Sort spans and fold overlapping or touching ones together.
///
/// The result is sorted and pairwise disjoint with a gap of at least one byte
/// between neighbours. Empty spans are dropped.
pub fn merge_spans(mut spans: Vec<HighlightSpan>) -> Vec<HighlightSpan> {
    spans.retain(|s| !s.is_empty());
    spans.sort_unstable();

    let mut merged: Vec<HighlightSpan> = Vec::with_capacity(spans.len());
    for span in spans {
        match merged.last_mut() {
            Some(last) if last.meets(&span) => last.end = last.end.max(span.end),
            _ => merged.push(span),
        }
    }
    merged
}

// ---------------------------------------------------------------------------
// Marker
// ---------------------------------------------------------------------------

/// Text placed before and after each highlighted span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightMarker {
    pub open: String,
    pub close: String,
}

impl HighlightMarker {
    pub fn new(open: impl Into<String>, close: impl Into<String>) -> Self {
        Self {
            open: open.into(),
            close: close.into(),
        }
    }

    /// `<span class="{class}">` … `</span>`.
    pub fn span_class(class: &str) -> Self {
        Self::new(format!(r#"<span class="{class}">"#), "</span>")
    }

    /// Bold reverse-video ANSI escape, for terminals.
    pub fn ansi() -> Self {
        Self::new("\x1b[1;7m", "\x1b[0m")
    }

    /// Remove every marker from `rendered`, giving back the plain text.
    pub fn strip(&self, rendered: &str) -> String {
        rendered.replace(&self.open, "").replace(&self.close, "")
    }
}

impl Default for HighlightMarker {
    fn default() -> Self {
        Self::span_class(DEFAULT_HIGHLIGHT_CLASS)
    }
}

// ---------------------------------------------------------------------------
// Highlighter
// ---------------------------------------------------------------------------

/// Renders display text with query matches wrapped in a [`HighlightMarker`].
#[derive(Debug, Clone, Default)]
pub struct Highlighter {
    marker: HighlightMarker,
    escape: EscapeSet,
}

impl Highlighter {
    pub fn new(marker: HighlightMarker, escape: EscapeSet) -> Self {
        Self { marker, escape }
    }

    pub fn marker(&self) -> &HighlightMarker {
        &self.marker
    }

    /// Compile every term of `query` once, for rendering many lines.
    pub fn prepare(&self, query: &str, case: CaseSensitivity) -> HighlightQuery<'_> {
        let builder = PatternBuilder::new(self.escape.clone(), case);
        let patterns = tokenize(query)
            .into_iter()
            .filter_map(|term| match builder.build(term) {
                Ok(pattern) => Some(pattern),
                Err(err) => {
                    tracing::warn!(term, error = %err, "highlight: skipping uncompilable term");
                    None
                }
            })
            .collect::<Vec<_>>();
        tracing::debug!(query, terms = patterns.len(), "highlight: compiled query");
        HighlightQuery {
            highlighter: self,
            patterns,
        }
    }

    /// Merged spans of every query term found in `text`.
    pub fn spans(&self, query: &str, text: &str, case: CaseSensitivity) -> Vec<HighlightSpan> {
        self.prepare(query, case).spans(text)
    }

    /// `text` with every match of every query term wrapped in the marker.
    ///
    /// Returns `text` unchanged when the query has no terms. Text outside the
    /// spans is copied verbatim; escaping for the output context is up to the
    /// caller. Use [`prepare`](Self::prepare) when rendering many lines.
    pub fn render(&self, query: &str, text: &str, case: CaseSensitivity) -> String {
        self.prepare(query, case).render(text)
    }

    /// Wrap pre-computed, merged `spans` of `text` in the marker.
    pub fn wrap(&self, text: &str, spans: &[HighlightSpan]) -> String {
        let extra = spans.len() * (self.marker.open.len() + self.marker.close.len());
        let mut out = String::with_capacity(text.len() + extra);
        let mut cursor = 0;
        for span in spans {
            out.push_str(&text[cursor..span.start]);
            out.push_str(&self.marker.open);
            out.push_str(&text[span.start..span.end]);
            out.push_str(&self.marker.close);
            cursor = span.end;
        }
        out.push_str(&text[cursor..]);
        out
    }
}

/// A query's compiled terms, borrowed from the [`Highlighter`] that built
/// them.
#[derive(Debug, Clone)]
pub struct HighlightQuery<'h> {
    highlighter: &'h Highlighter,
    patterns: Vec<MatchPattern>,
}

impl HighlightQuery<'_> {
    /// Number of compiled terms.
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn spans(&self, text: &str) -> Vec<HighlightSpan> {
        let spans = self
            .patterns
            .iter()
            .flat_map(|pattern| pattern.find_iter(text))
            .collect();
        merge_spans(spans)
    }

    pub fn render(&self, text: &str) -> String {
        let spans = self.spans(text);
        if spans.is_empty() {
            return text.to_string();
        }
        self.highlighter.wrap(text, &spans)
    }
}
