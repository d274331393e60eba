//! Core types for combomatch-core.
//!
//! This module defines the configuration enums shared by every layer of the
//! engine ([`MatchPolicy`], [`CaseSensitivity`], [`MatchMode`]) and the
//! [`Record`] trait through which the engine reads externally owned records.

use serde::Deserialize;
use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap};

/// How per-term results are combined into one accept/reject decision.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchPolicy {
    /// Every term must match.
    #[default]
    And,
    /// At least one term must match.
    Or,
}

impl std::fmt::Display for MatchPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchPolicy::And => write!(f, "and"),
            MatchPolicy::Or => write!(f, "or"),
        }
    }
}

/// Whether matching folds case.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum CaseSensitivity {
    Sensitive,
    #[default]
    Insensitive,
}

impl CaseSensitivity {
    pub fn is_sensitive(self) -> bool {
        matches!(self, CaseSensitivity::Sensitive)
    }
}

impl From<bool> for CaseSensitivity {
    fn from(case_sensitive: bool) -> Self {
        if case_sensitive {
            CaseSensitivity::Sensitive
        } else {
            CaseSensitivity::Insensitive
        }
    }
}

impl std::fmt::Display for CaseSensitivity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CaseSensitivity::Sensitive => write!(f, "sensitive"),
            CaseSensitivity::Insensitive => write!(f, "insensitive"),
        }
    }
}

/// Which matching path the engine takes for a query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Split the query into terms and look for each one anywhere in the field.
    #[default]
    Substring,
    /// Test the whole, unsplit query as a prefix of the field.
    #[serde(rename = "anchored", alias = "anchored_whole")]
    AnchoredWhole,
}

impl std::fmt::Display for MatchMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchMode::Substring => write!(f, "substring"),
            MatchMode::AnchoredWhole => write!(f, "anchored"),
        }
    }
}

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// Read access to a key/value record owned by someone else.
///
/// The engine only ever asks for a field's text. Implementations return
/// `None` when the field is missing or has no sensible text form.
pub trait Record {
    fn field(&self, name: &str) -> Option<Cow<'_, str>>;
}

impl Record for serde_json::Map<String, serde_json::Value> {
    fn field(&self, name: &str) -> Option<Cow<'_, str>> {
        match self.get(name)? {
            serde_json::Value::String(s) => Some(Cow::Borrowed(s.as_str())),
            serde_json::Value::Number(n) => Some(Cow::Owned(n.to_string())),
            serde_json::Value::Bool(b) => Some(Cow::Owned(b.to_string())),
            _ => None,
        }
    }
}

impl Record for serde_json::Value {
    fn field(&self, name: &str) -> Option<Cow<'_, str>> {
        self.as_object()?.field(name)
    }
}

impl Record for HashMap<String, String> {
    fn field(&self, name: &str) -> Option<Cow<'_, str>> {
        self.get(name).map(|s| Cow::Borrowed(s.as_str()))
    }
}

impl Record for BTreeMap<String, String> {
    fn field(&self, name: &str) -> Option<Cow<'_, str>> {
        self.get(name).map(|s| Cow::Borrowed(s.as_str()))
    }
}
