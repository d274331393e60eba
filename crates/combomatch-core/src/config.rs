//! Configuration types for combomatch.
//!
//! [`Config::load`] reads `~/.config/combomatch/config.toml`, creating it with
//! hardcoded defaults if it does not yet exist. [`Config::load_from`] layers an
//! explicit file over the defaults. [`Config::defaults`] returns the built-in
//! defaults without touching the filesystem (useful in tests).

use crate::engine::{EngineConfig, FilterEngine, DEFAULT_DISPLAY_FIELD};
use crate::error::ConfigError;
use crate::highlight::{HighlightMarker, Highlighter};
use crate::matcher::{DisplayFieldMatcher, MultiFieldMatcher};
use crate::pattern::{EscapeSet, REGEX_META_CHARS};
use crate::session::{QuerySession, DEFAULT_EMPTY_TEXT, DEFAULT_MIN_CHARS};
use crate::types::{CaseSensitivity, MatchMode, MatchPolicy};
use serde::Deserialize;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[filter]
display_field  = "name"
match_fields   = []
mode           = "substring"
policy         = "and"
case_sensitive = false
escape_chars   = '\.+*?()|[]{}^$#&-~'

[highlight]
open  = '<span class="x-ux-combomatch">'
close = '</span>'

[list]
min_chars  = 2
empty_text = "No matches found!"
"#;

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level configuration, loaded from `~/.config/combomatch/config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub filter: FilterConfig,
    #[serde(default)]
    pub highlight: HighlightConfig,
    #[serde(default)]
    pub list: ListConfig,
}

/// `[filter]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct FilterConfig {
    #[serde(default = "default_display_field")]
    pub display_field: String,
    /// Extra fields tested alongside the display field (any-field match).
    #[serde(default)]
    pub match_fields: Vec<String>,
    #[serde(default)]
    pub mode: MatchMode,
    #[serde(default)]
    pub policy: MatchPolicy,
    #[serde(default)]
    pub case_sensitive: bool,
    #[serde(default = "default_escape_chars")]
    pub escape_chars: String,
}

fn default_display_field() -> String { DEFAULT_DISPLAY_FIELD.to_string() }
fn default_escape_chars() -> String { REGEX_META_CHARS.to_string() }

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            display_field: default_display_field(),
            match_fields: Vec::new(),
            mode: MatchMode::default(),
            policy: MatchPolicy::default(),
            case_sensitive: false,
            escape_chars: default_escape_chars(),
        }
    }
}

/// `[highlight]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct HighlightConfig {
    #[serde(default = "default_open")]
    pub open: String,
    #[serde(default = "default_close")]
    pub close: String,
}

fn default_open() -> String { HighlightMarker::default().open }
fn default_close() -> String { HighlightMarker::default().close }

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            open: default_open(),
            close: default_close(),
        }
    }
}

/// `[list]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct ListConfig {
    #[serde(default = "default_min_chars")]
    pub min_chars: usize,
    #[serde(default = "default_empty_text")]
    pub empty_text: String,
}

fn default_min_chars() -> usize { DEFAULT_MIN_CHARS }
fn default_empty_text() -> String { DEFAULT_EMPTY_TEXT.to_string() }

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            min_chars: default_min_chars(),
            empty_text: default_empty_text(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load from `~/.config/combomatch/config.toml`, layered on top of the
    /// built-in defaults. Creates the file with defaults if it does not exist.
    pub fn load() -> Result<Self, ConfigError> {
        let path = config_path();

        if !path.exists() {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, DEFAULT_CONFIG.trim_start())?;
            tracing::info!(path = %path.display(), "config: wrote default config");
        }

        Self::layered(&path, false)
    }

    /// Load an explicit file, layered on top of the built-in defaults. The
    /// file must exist.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::layered(path.as_ref(), true)
    }

    fn layered(path: &Path, required: bool) -> Result<Self, ConfigError> {
        let cfg: Self = config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from(path).required(required))
            .build()?
            .try_deserialize()?;
        cfg.validate()?;
        tracing::debug!(path = %path.display(), "config: loaded");
        Ok(cfg)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }

    /// Reject values the engine cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.filter.display_field.trim().is_empty() {
            return Err(ConfigError::Invalid("filter.display_field must not be empty".into()));
        }
        if self.filter.match_fields.iter().any(|f| f.trim().is_empty()) {
            return Err(ConfigError::Invalid(
                "filter.match_fields must not contain empty names".into(),
            ));
        }
        let rejected: String = self.escape_set().non_meta().collect();
        if !rejected.is_empty() {
            return Err(ConfigError::Invalid(format!(
                "filter.escape_chars may only contain regex metacharacters ({REGEX_META_CHARS}), got {rejected:?}"
            )));
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Builders for the runtime objects
    // -----------------------------------------------------------------------

    pub fn case(&self) -> CaseSensitivity {
        CaseSensitivity::from(self.filter.case_sensitive)
    }

    pub fn escape_set(&self) -> EscapeSet {
        EscapeSet::from_chars(&self.filter.escape_chars)
    }

    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            mode: self.filter.mode,
            policy: self.filter.policy,
            case: self.case(),
            escape: self.escape_set(),
        }
    }

    /// An engine matching the display field, plus any `match_fields`.
    pub fn engine(&self) -> FilterEngine {
        let builder = FilterEngine::builder()
            .mode(self.filter.mode)
            .policy(self.filter.policy)
            .case(self.case())
            .escape(self.escape_set());

        if self.filter.match_fields.is_empty() {
            builder
                .matcher(DisplayFieldMatcher::new(&self.filter.display_field))
                .build()
        } else {
            let fields = std::iter::once(&self.filter.display_field)
                .chain(&self.filter.match_fields)
                .cloned();
            builder.matcher(MultiFieldMatcher::any(fields)).build()
        }
    }

    pub fn marker(&self) -> HighlightMarker {
        HighlightMarker::new(&self.highlight.open, &self.highlight.close)
    }

    pub fn highlighter(&self) -> Highlighter {
        Highlighter::new(self.marker(), self.escape_set())
    }

    pub fn session(&self) -> QuerySession {
        QuerySession::new(self.engine(), self.list.min_chars)
    }
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

fn config_path() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
                .join(".config")
        })
        .join("combomatch")
        .join("config.toml")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
