//! Output formats for parsed documents
//!
//! All formats work on the [flattened](Parsed::flatten) projection, so output is
//! ordered by section name and key regardless of how the document stores them.

use crate::conf::document::{Parsed, GLOBAL};
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Yaml,
    Tree,
}

impl Format {
    pub const NAMES: [&'static str; 3] = ["json", "yaml", "tree"];
}

#[derive(Debug, Error)]
pub enum FormatError {
    #[error("unknown format {0:?} (expected one of: json, yaml, tree)")]
    Unknown(String),

    #[error("json serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("yaml serialization failed: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl FromStr for Format {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "json" => Ok(Format::Json),
            "yaml" => Ok(Format::Yaml),
            "tree" => Ok(Format::Tree),
            other => Err(FormatError::Unknown(other.to_string())),
        }
    }
}

pub fn serialize(doc: &Parsed, format: Format) -> Result<String, FormatError> {
    match format {
        Format::Json => to_json(doc),
        Format::Yaml => to_yaml(doc),
        Format::Tree => Ok(to_tree(doc)),
    }
}

pub fn to_json(doc: &Parsed) -> Result<String, FormatError> {
    Ok(serde_json::to_string_pretty(&doc.flatten())?)
}

pub fn to_yaml(doc: &Parsed) -> Result<String, FormatError> {
    Ok(serde_yaml::to_string(&doc.flatten())?)
}

/// Indented listing: one header per section instance, one line per key with its last
/// value, and the history length when the key was assigned more than once.
///
///     [color] #1
///       name = blue (2)
pub fn to_tree(doc: &Parsed) -> String {
    let mut lines = Vec::new();
    for (name, instances) in doc.flatten() {
        for (i, section) in instances.iter().enumerate() {
            if name == GLOBAL {
                lines.push("(global)".to_string());
            } else {
                lines.push(format!("[{}] #{}", name, i));
            }
            for (key, history) in section {
                let last = history.last().map_or("", String::as_str);
                let line = match history.len() {
                    0 | 1 => format!("  {} = {:?}", key, last),
                    n => format!("  {} = {:?} ({})", key, last, n),
                };
                lines.push(line);
            }
        }
    }
    let mut out = lines.join("\n");
    out.push('\n');
    out
}
