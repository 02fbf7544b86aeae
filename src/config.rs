//! Extraction settings.
//!
//! Defaults reproduce the standard capture/extract cycle: read
//! `network.har`, write `melbourne_housing.csv`. A JSON config file can
//! override any section; command-line flags override the file.

use crate::extract::{EmbeddedPatterns, ListingHeuristic};
use crate::spreadsheets::OutputFormat;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ExtractConfig {
    pub capture_path: PathBuf,
    pub output_path: PathBuf,
    /// Inferred from `output_path` when unset.
    pub format: Option<OutputFormat>,
    /// Search HTML and JavaScript bodies for embedded JSON.
    pub scan_markup: bool,
    pub filters: EntryFilters,
    pub heuristic: ListingHeuristic,
    pub embedded: EmbeddedPatterns,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            capture_path: PathBuf::from("network.har"),
            output_path: PathBuf::from("melbourne_housing.csv"),
            format: None,
            scan_markup: true,
            filters: EntryFilters::default(),
            heuristic: ListingHeuristic::default(),
            embedded: EmbeddedPatterns::default(),
        }
    }
}

/// Restricts which capture entries are scanned. Empty means everything.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct EntryFilters {
    /// Keep entries whose request URL contains this text.
    pub url_contains: Option<String>,
    /// Keep entries whose GraphQL request declares this operation.
    pub operation_name: Option<String>,
}

impl ExtractConfig {
    /// Loads `path` when given, otherwise the built-in defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn output_format(&self) -> OutputFormat {
        self.format
            .unwrap_or_else(|| OutputFormat::from_path(&self.output_path))
    }
}
