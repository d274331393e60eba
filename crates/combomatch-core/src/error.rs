//! Error types for the filter engine.
//!
//! Nothing in the tokenize → escape → compile → aggregate path fails for
//! ordinary input. The variants here cover the edges: patterns that exceed the
//! regex size limit, user-supplied matchers that fail, and bad configuration.

/// Result type for engine operations.
pub type MatchResult<T> = std::result::Result<T, MatchError>;

/// A term could not be compiled into a [`MatchPattern`](crate::MatchPattern).
#[derive(Debug, thiserror::Error)]
#[error("failed to compile pattern {pattern:?}: {source}")]
pub struct PatternError {
    pub pattern: String,
    #[source]
    pub source: regex::Error,
}

/// Errors raised while testing a record against a query.
#[derive(Debug, thiserror::Error)]
pub enum MatchError {
    /// The query produced a pattern the regex engine refused.
    #[error(transparent)]
    Pattern(#[from] PatternError),

    /// A caller-supplied [`FieldMatcher`](crate::FieldMatcher) failed.
    #[error("field matcher failed: {0}")]
    Matcher(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl MatchError {
    /// Wrap any error raised inside a custom matcher.
    pub fn matcher(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        MatchError::Matcher(err.into())
    }
}

/// Errors raised while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config source error: {0}")]
    Source(#[from] config::ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}
