//! Rune settings read from TOML
//!
//! The default runes live in `defaults/conf.default.toml`, which is compiled in. A
//! `[runes]` table in a user file can replace any of `assign`, `quote`, `section_open`
//! and `section_close`:
//!
//!     [runes]
//!     assign = [":"]
//!     section_open = "<"
//!     section_close = ">"

use crate::conf::error::OptionsError;
use crate::conf::options::ParserOptions;
use crate::conf::parsing::Parser;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../../defaults/conf.default.toml");

/// Top-level settings.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub runes: RuneSettings,
}

/// Rune configuration as written in a settings file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RuneSettings {
    pub assign: Vec<char>,
    pub quote: Vec<char>,
    pub section_open: char,
    pub section_close: char,
}

impl TryFrom<&RuneSettings> for ParserOptions {
    type Error = OptionsError;

    fn try_from(runes: &RuneSettings) -> Result<Self, Self::Error> {
        ParserOptions::new(
            runes.assign.iter().copied(),
            runes.quote.iter().copied(),
            runes.section_open,
            runes.section_close,
        )
    }
}

impl Settings {
    /// Build a parser from these settings, validating the runes.
    pub fn parser(&self) -> Result<Parser, OptionsError> {
        Ok(Parser::new(ParserOptions::try_from(&self.runes)?))
    }
}

/// Stacks rune settings: the embedded defaults first, then settings files in the order
/// they were added, then overrides. Later layers win key by key, so a file that only sets
/// `quote` keeps the default assign and section runes.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    pub fn new() -> Self {
        let defaults = File::from_str(DEFAULT_TOML, FileFormat::Toml);
        Self {
            builder: Config::builder().add_source(defaults),
        }
    }

    /// Add a TOML settings file that must exist.
    pub fn with_file(self, path: impl AsRef<Path>) -> Self {
        self.layer(path.as_ref(), true)
    }

    /// Add a TOML settings file that is skipped when absent, such as a per-user file.
    pub fn with_optional_file(self, path: impl AsRef<Path>) -> Self {
        self.layer(path.as_ref(), false)
    }

    fn layer(mut self, path: &Path, required: bool) -> Self {
        let file = File::from(path).format(FileFormat::Toml).required(required);
        self.builder = self.builder.add_source(file);
        self
    }

    /// Override one dotted key, e.g. `runes.section_open`, above every file.
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Merge the layers into [Settings]. Runes are checked later, by [Settings::parser].
    pub fn build(self) -> Result<Settings, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// The embedded default runes, with nothing layered on top.
pub fn load_defaults() -> Result<Settings, ConfigError> {
    Loader::new().build()
}
