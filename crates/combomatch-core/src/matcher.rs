//! Field matchers — the pluggable "does this term match this record" test.
//!
//! The engine calls [`FieldMatcher::test`] once per (term, record) pair and
//! uses whatever it returns, unmodified. [`DisplayFieldMatcher`] is the
//! default. The other implementations cover the usual overrides: several
//! fields at once, exact equality on a field, or an arbitrary closure.

use crate::error::MatchError;
use crate::pattern::MatchPattern;
use crate::types::Record;

/// Tests one term against one record.
///
/// `term` is the raw (unescaped) term text; `pattern` is its compiled form.
/// Errors are returned to the caller of the predicate untouched.
pub trait FieldMatcher: Send + Sync {
    fn test(&self, term: &str, pattern: &MatchPattern, record: &dyn Record)
        -> Result<bool, MatchError>;
}

// ---------------------------------------------------------------------------
// Display field (default)
// ---------------------------------------------------------------------------

/// Matches when the pattern occurs in one named field. A missing field never
/// matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayFieldMatcher {
    field: String,
}

impl DisplayFieldMatcher {
    pub fn new(field: impl Into<String>) -> Self {
        Self { field: field.into() }
    }

    pub fn field(&self) -> &str {
        &self.field
    }
}

impl FieldMatcher for DisplayFieldMatcher {
    fn test(
        &self,
        _term: &str,
        pattern: &MatchPattern,
        record: &dyn Record,
    ) -> Result<bool, MatchError> {
        Ok(record
            .field(&self.field)
            .is_some_and(|text| pattern.is_match(&text)))
    }
}

// ---------------------------------------------------------------------------
// Several fields
// ---------------------------------------------------------------------------

/// How [`MultiFieldMatcher`] combines its fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FieldCombine {
    /// The pattern must occur in at least one field.
    #[default]
    Any,
    /// The pattern must occur in every field.
    All,
}

/// Tests the pattern against several fields, e.g. a display name and a code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultiFieldMatcher {
    fields: Vec<String>,
    combine: FieldCombine,
}

impl MultiFieldMatcher {
    pub fn new<I, S>(fields: I, combine: FieldCombine) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fields: fields.into_iter().map(Into::into).collect(),
            combine,
        }
    }

    pub fn any<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(fields, FieldCombine::Any)
    }

    pub fn all<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(fields, FieldCombine::All)
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }
}

impl FieldMatcher for MultiFieldMatcher {
    fn test(
        &self,
        _term: &str,
        pattern: &MatchPattern,
        record: &dyn Record,
    ) -> Result<bool, MatchError> {
        let hit = |name: &String| record.field(name).is_some_and(|text| pattern.is_match(&text));
        Ok(match self.combine {
            FieldCombine::Any => self.fields.iter().any(hit),
            FieldCombine::All => !self.fields.is_empty() && self.fields.iter().all(hit),
        })
    }
}

// ---------------------------------------------------------------------------
// Exact equality
// ---------------------------------------------------------------------------

/// Accepts when the raw term equals a field's text exactly, otherwise defers
/// to a fallback matcher (usually the display-field matcher).
pub struct ExactFieldMatcher<M = DisplayFieldMatcher> {
    field: String,
    fallback: M,
}

impl<M: FieldMatcher> ExactFieldMatcher<M> {
    pub fn new(field: impl Into<String>, fallback: M) -> Self {
        Self {
            field: field.into(),
            fallback,
        }
    }
}

impl<M: FieldMatcher> FieldMatcher for ExactFieldMatcher<M> {
    fn test(
        &self,
        term: &str,
        pattern: &MatchPattern,
        record: &dyn Record,
    ) -> Result<bool, MatchError> {
        if record.field(&self.field).is_some_and(|value| value == term) {
            return Ok(true);
        }
        self.fallback.test(term, pattern, record)
    }
}

// ---------------------------------------------------------------------------
// Closure
// ---------------------------------------------------------------------------

/// Adapts a closure into a [`FieldMatcher`].
///
/// ```
/// use combomatch_core::{FnMatcher, MatchError, MatchPattern, Record};
///
/// let by_code = FnMatcher::new(|term: &str, _: &MatchPattern, rec: &dyn Record| {
///     Ok::<_, MatchError>(rec.field("code").is_some_and(|code| code.eq_ignore_ascii_case(term)))
/// });
/// # let _ = by_code;
/// ```
pub struct FnMatcher<F> {
    f: F,
}

impl<F> FnMatcher<F>
where
    F: Fn(&str, &MatchPattern, &dyn Record) -> Result<bool, MatchError> + Send + Sync,
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> FieldMatcher for FnMatcher<F>
where
    F: Fn(&str, &MatchPattern, &dyn Record) -> Result<bool, MatchError> + Send + Sync,
{
    fn test(
        &self,
        term: &str,
        pattern: &MatchPattern,
        record: &dyn Record,
    ) -> Result<bool, MatchError> {
        (self.f)(term, pattern, record)
    }
}
