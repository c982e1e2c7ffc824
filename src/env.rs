//! Environment variables as a configuration source.
//!
//! Variable names map to nested keys: the configured prefix is stripped,
//! the remainder splits on double underscores (empty segments are ignored),
//! and segments are lowercased. `APP__DATABASE__URL` with prefix `APP`
//! lands at `database.url`.
//!
//! Values are stored verbatim as strings and coerced lazily by the typed
//! getters, so `APP__PORT=8080` reads back as `8080` through `get_int`.
//!
//! Takes an iterator so tests can pass synthetic data instead of
//! `std::env::vars()`.

use crate::error::ConfigError;
use crate::value::{Mapping, Value};

/// Apply all variables in `vars` whose names start with `prefix` onto `data`.
///
/// Intermediate mappings are created as needed. If an intermediate segment
/// already holds a non-mapping value, loading fails with
/// [`ConfigError::EnvConflict`] rather than silently overwriting it.
pub fn load_env(
    data: &mut Mapping,
    prefix: &str,
    vars: impl IntoIterator<Item = (String, String)>,
) -> Result<(), ConfigError> {
    for (name, value) in vars {
        let Some(rest) = name.strip_prefix(prefix) else {
            continue;
        };

        let segments: Vec<String> = rest
            .split("__")
            .filter(|s| !s.is_empty())
            .map(|s| s.to_lowercase())
            .collect();
        if segments.is_empty() {
            continue;
        }

        insert_nested(data, &name, &segments, value)?;
    }
    Ok(())
}

fn insert_nested(
    data: &mut Mapping,
    var: &str,
    segments: &[String],
    value: String,
) -> Result<(), ConfigError> {
    let Some((leaf, parents)) = segments.split_last() else {
        return Ok(());
    };

    let mut current = data;
    for segment in parents {
        let entry = current
            .entry(segment.clone())
            .or_insert_with(|| Value::Mapping(Mapping::new()));
        current = match entry {
            Value::Mapping(map) => map,
            _ => {
                return Err(ConfigError::EnvConflict {
                    var: var.to_string(),
                    segment: segment.clone(),
                });
            }
        };
    }

    current.insert(leaf.clone(), Value::String(value));
    Ok(())
}
