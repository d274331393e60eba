//! Pattern building — escaping terms and compiling them into [`MatchPattern`]s.
//!
//! Every term goes through [`EscapeSet::escape`] before it reaches the regex
//! compiler, so user input is always matched as literal text. The default
//! escape set covers every metacharacter of the `regex` crate dialect;
//! [`EscapeSet::brackets`] reproduces the narrower bracket-only set for
//! callers who want to keep `.`/`*`/`|` live.

use crate::error::PatternError;
use crate::highlight::HighlightSpan;
use crate::types::CaseSensitivity;
use regex::{Regex, RegexBuilder};

/// Every character the `regex` crate treats as syntax.
pub const REGEX_META_CHARS: &str = r"\.+*?()|[]{}^$#&-~";

/// Backslash, parentheses, braces and brackets only.
pub const BRACKET_META_CHARS: &str = r"\(){}[]";

/// True if `\c` is a literal escape of `c` in the `regex` dialect. Escaping
/// anything else either changes its meaning (`\d`, `\<`) or is an error.
pub fn is_meta_char(c: char) -> bool {
    REGEX_META_CHARS.contains(c)
}

// ---------------------------------------------------------------------------
// EscapeSet
// ---------------------------------------------------------------------------

/// The set of characters that get a backslash in front of them before
/// compilation. Only regex metacharacters are ever escaped; other members
/// of the set are kept but have no effect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EscapeSet {
    chars: Vec<char>,
}

impl EscapeSet {
    /// Build a set from the characters of `chars`. Duplicates are ignored.
    pub fn from_chars(chars: &str) -> Self {
        chars.chars().collect()
    }

    /// The bracket-only set: `\ ( ) { } [ ]`.
    pub fn brackets() -> Self {
        Self::from_chars(BRACKET_META_CHARS)
    }

    pub fn contains(&self, c: char) -> bool {
        self.chars.contains(&c)
    }

    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    /// Members of the set that are not regex metacharacters.
    pub fn non_meta(&self) -> impl Iterator<Item = char> + '_ {
        self.chars.iter().copied().filter(|c| !is_meta_char(*c))
    }

    /// Prefix every character of `term` that is in the set, and is a regex
    /// metacharacter, with `\`.
    pub fn escape(&self, term: &str) -> String {
        let mut out = String::with_capacity(term.len() + 4);
        for c in term.chars() {
            if self.contains(c) && is_meta_char(c) {
                out.push('\\');
            }
            out.push(c);
        }
        out
    }
}

impl Default for EscapeSet {
    fn default() -> Self {
        Self::from_chars(REGEX_META_CHARS)
    }
}

impl FromIterator<char> for EscapeSet {
    fn from_iter<I: IntoIterator<Item = char>>(iter: I) -> Self {
        let mut chars: Vec<char> = Vec::new();
        for c in iter {
            if !chars.contains(&c) {
                chars.push(c);
            }
        }
        Self { chars }
    }
}

// ---------------------------------------------------------------------------
// MatchPattern
// ---------------------------------------------------------------------------

/// A compiled, case-policy-aware matcher for one escaped term (or, in
/// anchored mode, one whole query).
#[derive(Debug, Clone)]
pub struct MatchPattern {
    regex: Regex,
    case: CaseSensitivity,
    anchored: bool,
}

impl MatchPattern {
    /// Compile already-escaped text into a substring matcher.
    pub fn compile(escaped: &str, case: CaseSensitivity) -> Result<Self, PatternError> {
        Self::with_source(escaped.to_string(), case, false)
    }

    /// Compile already-escaped text into a matcher anchored at the start of
    /// the haystack.
    pub fn compile_anchored(escaped: &str, case: CaseSensitivity) -> Result<Self, PatternError> {
        Self::with_source(format!("^(?:{escaped})"), case, true)
    }

    fn with_source(
        source: String,
        case: CaseSensitivity,
        anchored: bool,
    ) -> Result<Self, PatternError> {
        let regex = RegexBuilder::new(&source)
            .case_insensitive(!case.is_sensitive())
            .build()
            .map_err(|source_err| PatternError {
                pattern: source.clone(),
                source: source_err,
            })?;
        Ok(Self { regex, case, anchored })
    }

    /// True if the pattern occurs anywhere in `haystack` (or at its start,
    /// for anchored patterns).
    pub fn is_match(&self, haystack: &str) -> bool {
        self.regex.is_match(haystack)
    }

    /// Leftmost-first, non-overlapping occurrences in `haystack`.
    pub fn find_iter<'a>(&'a self, haystack: &'a str) -> impl Iterator<Item = HighlightSpan> + 'a {
        self.regex
            .find_iter(haystack)
            .filter(|m| !m.is_empty())
            .map(|m| HighlightSpan::new(m.start(), m.end()))
    }

    /// The regex source this pattern was compiled from.
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    pub fn case(&self) -> CaseSensitivity {
        self.case
    }

    pub fn is_anchored(&self) -> bool {
        self.anchored
    }
}

// ---------------------------------------------------------------------------
// PatternBuilder
// ---------------------------------------------------------------------------

/// Escapes and compiles terms under one escape set and case policy.
#[derive(Debug, Clone, Default)]
pub struct PatternBuilder {
    escape: EscapeSet,
    case: CaseSensitivity,
}

impl PatternBuilder {
    pub fn new(escape: EscapeSet, case: CaseSensitivity) -> Self {
        Self { escape, case }
    }

    pub fn escape_set(&self) -> &EscapeSet {
        &self.escape
    }

    pub fn case(&self) -> CaseSensitivity {
        self.case
    }

    /// Escape `term` and compile it as a substring pattern.
    pub fn build(&self, term: &str) -> Result<MatchPattern, PatternError> {
        self.build_with(term, MatchPattern::compile)
    }

    /// Escape the whole `query` and compile it as a start-anchored pattern.
    pub fn build_anchored(&self, query: &str) -> Result<MatchPattern, PatternError> {
        self.build_with(query, MatchPattern::compile_anchored)
    }

    fn build_with(
        &self,
        text: &str,
        compile: fn(&str, CaseSensitivity) -> Result<MatchPattern, PatternError>,
    ) -> Result<MatchPattern, PatternError> {
        let escaped = self.escape.escape(text);
        match compile(&escaped, self.case) {
            Ok(pattern) => Ok(pattern),
            Err(err) => {
                // A narrow custom escape set can leave `*` or `|` live.
                tracing::warn!(
                    term = text,
                    error = %err,
                    "pattern: escaped term did not compile, matching it literally"
                );
                compile(&regex::escape(text), self.case)
            }
        }
    }
}
