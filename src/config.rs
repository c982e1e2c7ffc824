//! The configuration store: one nested value tree, a last-modified stamp,
//! loaders that merge sources in, and typed accessors over dot-paths.

use std::path::Path;
use std::time::SystemTime;

use crate::coerce;
use crate::env;
use crate::error::ConfigError;
use crate::file::{self, SourceFormat};
use crate::merge;
use crate::path;
use crate::value::{Mapping, Value};

/// An in-memory configuration tree.
///
/// Sources are merged in with "later overrides earlier, mappings merge into
/// mappings" semantics; values are read back through dot-paths like
/// `"database.url"` with lazy typed coercion.
///
/// `last_modified` starts at `UNIX_EPOCH` and is stamped by the watcher on
/// each applied reload; the polling fallback compares file mtimes against it.
#[derive(Debug, Clone)]
pub struct Config {
    data: Mapping,
    last_modified: SystemTime,
}

impl Config {
    pub fn new() -> Self {
        Self {
            data: Mapping::new(),
            last_modified: SystemTime::UNIX_EPOCH,
        }
    }

    pub fn from_mapping(data: Mapping) -> Self {
        Self {
            data,
            last_modified: SystemTime::UNIX_EPOCH,
        }
    }

    pub fn data(&self) -> &Mapping {
        &self.data
    }

    pub fn last_modified(&self) -> SystemTime {
        self.last_modified
    }

    /// Stamp the store as modified now.
    pub fn touch(&mut self) {
        self.last_modified = SystemTime::now();
    }

    /// Deep-merge another config's tree into this one.
    pub fn merge(&mut self, other: Config) {
        merge::deep_merge(&mut self.data, other.data);
    }

    /// Deep-merge a raw mapping into this one.
    pub fn merge_mapping(&mut self, src: Mapping) {
        merge::deep_merge(&mut self.data, src);
    }

    /// Load a structured file (format detected from the extension) and
    /// merge it in.
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let mapping = file::load_mapping(path.as_ref())?;
        merge::deep_merge(&mut self.data, mapping);
        Ok(())
    }

    /// Load a file as JSON regardless of its extension and merge it in.
    pub fn load_json(&mut self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let mapping = file::load_mapping_as(path.as_ref(), SourceFormat::Json)?;
        merge::deep_merge(&mut self.data, mapping);
        Ok(())
    }

    /// Load a file as TOML regardless of its extension and merge it in.
    pub fn load_toml(&mut self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let mapping = file::load_mapping_as(path.as_ref(), SourceFormat::Toml)?;
        merge::deep_merge(&mut self.data, mapping);
        Ok(())
    }

    /// Load process environment variables matching `prefix`.
    pub fn load_env(&mut self, prefix: &str) -> Result<(), ConfigError> {
        env::load_env(&mut self.data, prefix, std::env::vars())
    }

    /// Like [`load_env`](Self::load_env), with an injected variable source
    /// for deterministic tests.
    pub fn load_env_from(
        &mut self,
        prefix: &str,
        vars: impl IntoIterator<Item = (String, String)>,
    ) -> Result<(), ConfigError> {
        env::load_env(&mut self.data, prefix, vars)
    }

    /// Resolve `key` to its raw stored value.
    pub fn get_value(&self, key: &str) -> Result<&Value, ConfigError> {
        path::get_value(&self.data, key)
    }

    pub fn get_string(&self, key: &str) -> Result<String, ConfigError> {
        Ok(coerce::to_string(self.get_value(key)?))
    }

    pub fn get_int(&self, key: &str) -> Result<i64, ConfigError> {
        coerce::to_int(self.get_value(key)?, key)
    }

    pub fn get_bool(&self, key: &str) -> Result<bool, ConfigError> {
        coerce::to_bool(self.get_value(key)?, key)
    }

    /// Check that every key in `keys` resolves, in order, returning the
    /// first resolution error. A key holding an explicit null passes.
    pub fn validate(&self, keys: &[&str]) -> Result<(), ConfigError> {
        for key in keys {
            self.get_value(key)?;
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    fn config(json: &str) -> Config {
        Config::from_mapping(serde_json::from_str(json).unwrap())
    }

    fn write_file(dir: &tempfile::TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn new_config_is_empty() {
        let cfg = Config::new();
        assert!(cfg.data().is_empty());
        assert_eq!(cfg.last_modified(), SystemTime::UNIX_EPOCH);
    }

    #[test]
    fn stored_int_reads_as_string() {
        let cfg = config(r#"{"k": 42}"#);
        assert_eq!(cfg.get_string("k").unwrap(), "42");
    }

    #[test]
    fn stored_string_reads_as_int() {
        let cfg = config(r#"{"k": "42"}"#);
        assert_eq!(cfg.get_int("k").unwrap(), 42);
    }

    #[test]
    fn typed_getters_cover_nested_paths() {
        let cfg = config(r#"{"db": {"host": "localhost", "port": 5432, "replica": false}}"#);
        assert_eq!(cfg.get_string("db.host").unwrap(), "localhost");
        assert_eq!(cfg.get_int("db.port").unwrap(), 5432);
        assert!(!cfg.get_bool("db.replica").unwrap());
    }

    #[test]
    fn merge_overrides_and_preserves() {
        let mut cfg = config(r#"{"db": {"host": "localhost", "port": 5432}}"#);
        cfg.merge(config(r#"{"db": {"host": "192.168.1.100"}}"#));
        assert_eq!(cfg.get_string("db.host").unwrap(), "192.168.1.100");
        assert_eq!(cfg.get_int("db.port").unwrap(), 5432);
    }

    #[test]
    fn load_file_merges_over_existing_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "override.json", r#"{"db": {"host": "remote"}}"#);

        let mut cfg = config(r#"{"db": {"host": "localhost", "port": 5432}}"#);
        cfg.load_file(&path).unwrap();
        assert_eq!(cfg.get_string("db.host").unwrap(), "remote");
        assert_eq!(cfg.get_int("db.port").unwrap(), 5432);
    }

    #[test]
    fn load_file_propagates_decode_failures() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "bad.json", "{broken");
        let mut cfg = Config::new();
        assert!(matches!(
            cfg.load_file(&path).unwrap_err(),
            ConfigError::Json { .. }
        ));
    }

    #[test]
    fn load_toml_forces_the_format() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "settings.conf", "host = \"tomlhost\"\n");
        let mut cfg = Config::new();
        cfg.load_toml(&path).unwrap();
        assert_eq!(cfg.get_string("host").unwrap(), "tomlhost");
    }

    #[test]
    fn env_values_coerce_through_typed_getters() {
        let mut cfg = Config::new();
        cfg.load_env_from(
            "APP",
            [
                ("APP__PORT".to_string(), "8080".to_string()),
                ("APP__DEBUG".to_string(), "yes".to_string()),
            ],
        )
        .unwrap();
        assert_eq!(cfg.get_int("port").unwrap(), 8080);
        assert!(cfg.get_bool("debug").unwrap());
    }

    #[test]
    fn validate_passes_when_all_keys_resolve() {
        let cfg = config(r#"{"db": {"host": "x"}, "debug": true}"#);
        assert!(cfg.validate(&["db.host", "debug"]).is_ok());
    }

    #[test]
    fn validate_returns_first_error_and_stops() {
        let cfg = config(r#"{"a": 1}"#);
        let err = cfg.validate(&["a", "missing1", "missing2"]).unwrap_err();
        assert!(matches!(err, ConfigError::MissingKey { key } if key == "missing1"));
    }

    #[test]
    fn validate_reports_path_errors() {
        let cfg = config(r#"{"a": "string"}"#);
        let err = cfg.validate(&["a.b"]).unwrap_err();
        match err {
            ConfigError::InvalidPath { key, segment } => {
                assert_eq!(key, "a.b");
                assert_eq!(segment, "a");
            }
            other => panic!("expected InvalidPath, got: {other:?}"),
        }
    }

    #[test]
    fn validate_accepts_explicit_null() {
        let cfg = config(r#"{"feature": null}"#);
        assert!(cfg.validate(&["feature"]).is_ok());
    }

    #[test]
    fn touch_advances_last_modified() {
        let mut cfg = Config::new();
        cfg.touch();
        assert!(cfg.last_modified() > SystemTime::UNIX_EPOCH);
    }
}
