use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required key: {key}")]
    MissingKey { key: String },

    #[error("invalid path segment '{segment}' in key: {key}")]
    InvalidPath { key: String, segment: String },

    #[error("invalid type for key '{key}': expected {expected}, got {actual}")]
    TypeMismatch {
        key: String,
        expected: &'static str,
        actual: &'static str,
    },

    #[error("multiple errors: [{}]", .0.iter().map(|e| e.to_string()).collect::<Vec<_>>().join(", "))]
    Multi(Vec<ConfigError>),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to parse TOML in {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: Box<toml::de::Error>,
    },

    #[error("unsupported config format: {path}")]
    UnsupportedFormat { path: PathBuf },

    #[error("env var '{var}' conflicts with non-mapping value at segment '{segment}'")]
    EnvConflict { var: String, segment: String },

    #[error("failed to initialize file watcher: {0}")]
    Notify(#[from] notify::Error),
}
