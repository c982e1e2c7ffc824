//! Loading structured-text files into a [`Mapping`].
//!
//! A file is read in one shot and decoded per its format into the nested
//! value tree. I/O failures and decode failures are distinct error kinds,
//! each carrying the failing path.

use std::fs;
use std::path::Path;

use crate::error::ConfigError;
use crate::value::Mapping;

/// Supported structured-text formats, detected from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Json,
    Toml,
}

impl SourceFormat {
    /// Detect the format from `path`'s extension (case-insensitive).
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Ok(SourceFormat::Json),
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Ok(SourceFormat::Toml),
            _ => Err(ConfigError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }
}

/// Read and decode `path`, detecting the format from its extension.
pub fn load_mapping(path: &Path) -> Result<Mapping, ConfigError> {
    let format = SourceFormat::from_path(path)?;
    load_mapping_as(path, format)
}

/// Read and decode `path` as `format`, ignoring the extension.
pub fn load_mapping_as(path: &Path, format: SourceFormat) -> Result<Mapping, ConfigError> {
    let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    match format {
        SourceFormat::Json => serde_json::from_str(&content).map_err(|e| ConfigError::Json {
            path: path.to_path_buf(),
            source: e,
        }),
        SourceFormat::Toml => toml::from_str(&content).map_err(|e| ConfigError::Toml {
            path: path.to_path_buf(),
            source: Box::new(e),
        }),
    }
}
