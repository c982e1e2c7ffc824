//! Fluent assembly of a [`Config`] from multiple sources.
//!
//! Each source is applied as it is added — later sources override earlier
//! ones at the same key, nested mappings merging rather than replacing.
//! A failing source is recorded and does not stop subsequent calls;
//! [`build`](ConfigBuilder::build) either hands back the accumulated config
//! or an aggregate error carrying every recorded failure in call order.

use std::path::Path;

use crate::config::Config;
use crate::error::ConfigError;
use crate::value::{Mapping, Value};

/// Error-collecting builder over layered configuration sources.
///
/// ```no_run
/// use layerfig::ConfigBuilder;
///
/// let config = ConfigBuilder::new()
///     .with_file("defaults.json")
///     .with_file("local.toml")
///     .with_env("APP")
///     .with_value("debug", true)
///     .build()?;
/// # Ok::<(), layerfig::ConfigError>(())
/// ```
pub struct ConfigBuilder {
    config: Config,
    errors: Vec<ConfigError>,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: Config::new(),
            errors: Vec::new(),
        }
    }

    /// Add a structured file source, format detected from the extension.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        if let Err(e) = self.config.load_file(path) {
            self.errors.push(e);
        }
        self
    }

    /// Add a JSON file source regardless of its extension.
    pub fn with_json(mut self, path: impl AsRef<Path>) -> Self {
        if let Err(e) = self.config.load_json(path) {
            self.errors.push(e);
        }
        self
    }

    /// Add a TOML file source regardless of its extension.
    pub fn with_toml(mut self, path: impl AsRef<Path>) -> Self {
        if let Err(e) = self.config.load_toml(path) {
            self.errors.push(e);
        }
        self
    }

    /// Add process environment variables matching `prefix`.
    pub fn with_env(mut self, prefix: &str) -> Self {
        if let Err(e) = self.config.load_env(prefix) {
            self.errors.push(e);
        }
        self
    }

    /// Like [`with_env`](Self::with_env), with an injected variable source.
    pub fn with_env_from(
        mut self,
        prefix: &str,
        vars: impl IntoIterator<Item = (String, String)>,
    ) -> Self {
        if let Err(e) = self.config.load_env_from(prefix, vars) {
            self.errors.push(e);
        }
        self
    }

    /// Merge an already-built config in as a source.
    pub fn with_config(mut self, other: Config) -> Self {
        self.config.merge(other);
        self
    }

    /// Set a single value at a dotted key, e.g. `("database.url", "pg://")`.
    ///
    /// The key is expanded into a nested mapping and deep-merged, so
    /// sibling keys from earlier sources survive and later calls to the
    /// same key win.
    pub fn with_value(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.config.merge_mapping(nested_overlay(key, value.into()));
        self
    }

    /// Finish building. `Ok` if every source applied cleanly, otherwise
    /// [`ConfigError::Multi`] with every recorded error in call order.
    ///
    /// Zero sources yield a valid empty config.
    pub fn build(self) -> Result<Config, ConfigError> {
        if self.errors.is_empty() {
            Ok(self.config)
        } else {
            Err(ConfigError::Multi(self.errors))
        }
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Expand a dotted key into a single-leaf nested mapping:
/// `("database.url", v)` becomes `{database: {url: v}}`.
fn nested_overlay(dotted_key: &str, value: Value) -> Mapping {
    let mut segments = dotted_key.split('.').rev();
    let Some(leaf) = segments.next() else {
        return Mapping::new();
    };

    let mut map = Mapping::new();
    map.insert(leaf.to_string(), value);
    for segment in segments {
        let mut outer = Mapping::new();
        outer.insert(segment.to_string(), Value::Mapping(map));
        map = outer;
    }
    map
}
