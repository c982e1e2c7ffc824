//! Dot-path resolution over a nested [`Mapping`].

use crate::error::ConfigError;
use crate::value::{Mapping, Value};

/// Walk `key` (split on `.`) through `data` and return the raw value.
///
/// At every non-final segment the current value must be a mapping, or
/// resolution fails with [`ConfigError::InvalidPath`]. An absent segment at
/// any level fails with [`ConfigError::MissingKey`]. A key holding an
/// explicit null is present, not missing.
pub fn get_value<'a>(data: &'a Mapping, key: &str) -> Result<&'a Value, ConfigError> {
    let mut current = data;
    let parts: Vec<&str> = key.split('.').collect();

    for (i, part) in parts.iter().enumerate() {
        let Some(val) = current.get(*part) else {
            return Err(ConfigError::MissingKey {
                key: key.to_string(),
            });
        };

        if i == parts.len() - 1 {
            return Ok(val);
        }

        match val {
            Value::Mapping(next) => current = next,
            _ => {
                return Err(ConfigError::InvalidPath {
                    key: key.to_string(),
                    segment: (*part).to_string(),
                });
            }
        }
    }

    // split() always yields at least one part, so the loop always returns.
    Err(ConfigError::MissingKey {
        key: key.to_string(),
    })
}
