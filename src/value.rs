//! The dynamic value tree that configuration sources decode into.
//!
//! Every source — JSON file, TOML file, environment variables, programmatic
//! overrides — produces a [`Mapping`] of [`Value`] nodes, and every layer
//! operation (merge, path lookup, coercion) is defined over this one shape.
//! The variants are a closed set so the merge and coercion rules can be
//! matched exhaustively.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A nested string-keyed configuration tree.
pub type Mapping = BTreeMap<String, Value>;

/// A single node in the configuration tree: a scalar, an array, or a nested
/// mapping.
///
/// Deserialization is untagged, so a JSON or TOML document decodes directly
/// into the natural variant (`null` → [`Null`](Value::Null), numbers into
/// [`Integer`](Value::Integer) before [`Float`](Value::Float)).
///
/// An explicit `null` is a present value — lookups find it, and only the
/// string coercion accepts it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    Array(Vec<Value>),
    Mapping(Mapping),
}

impl Value {
    /// The type name used in error messages, e.g. `"string"` or `"mapping"`.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Integer(_) => "int",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Mapping(_) => "mapping",
        }
    }

    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Value::Mapping(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_mapping_mut(&mut self) -> Option<&mut Mapping> {
        match self {
            Value::Mapping(map) => Some(map),
            _ => None,
        }
    }
}

/// Textual rendering used by the string coercion's fallback: strings are
/// bare, floats drop trailing zeros, arrays and mappings render bracketed.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Integer(i) => write!(f, "{i}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::String(s) => f.write_str(s),
            Value::Array(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Value::Mapping(map) => {
                f.write_str("{")?;
                for (i, (key, val)) in map.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key}: {val}")?;
                }
                f.write_str("}")
            }
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Integer(v.into())
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Integer(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Value::Array(v)
    }
}

impl From<Mapping> for Value {
    fn from(v: Mapping) -> Self {
        Value::Mapping(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapping(json: &str) -> Mapping {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn json_decodes_into_natural_variants() {
        let map = mapping(
            r#"{"s": "text", "i": 42, "f": 1.5, "b": true, "n": null, "a": [1, 2]}"#,
        );
        assert_eq!(map["s"], Value::String("text".into()));
        assert_eq!(map["i"], Value::Integer(42));
        assert_eq!(map["f"], Value::Float(1.5));
        assert_eq!(map["b"], Value::Bool(true));
        assert_eq!(map["n"], Value::Null);
        assert_eq!(
            map["a"],
            Value::Array(vec![Value::Integer(1), Value::Integer(2)])
        );
    }

    #[test]
    fn json_nested_objects_decode_as_mappings() {
        let map = mapping(r#"{"db": {"host": "localhost", "port": 5432}}"#);
        let db = map["db"].as_mapping().unwrap();
        assert_eq!(db["host"], Value::String("localhost".into()));
        assert_eq!(db["port"], Value::Integer(5432));
    }

    #[test]
    fn toml_decodes_through_the_same_shape() {
        let map: Mapping = toml::from_str("[db]\nhost = \"localhost\"\nport = 5432\n").unwrap();
        let db = map["db"].as_mapping().unwrap();
        assert_eq!(db["host"], Value::String("localhost".into()));
        assert_eq!(db["port"], Value::Integer(5432));
    }

    #[test]
    fn display_renders_floats_without_trailing_zeros() {
        assert_eq!(Value::Float(3.0).to_string(), "3");
        assert_eq!(Value::Float(1.5).to_string(), "1.5");
    }

    #[test]
    fn display_renders_strings_bare() {
        assert_eq!(Value::String("hello".into()).to_string(), "hello");
    }

    #[test]
    fn display_renders_containers_bracketed() {
        let arr = Value::Array(vec![Value::Integer(1), Value::String("x".into())]);
        assert_eq!(arr.to_string(), "[1, x]");

        let map = mapping(r#"{"a": 1, "b": true}"#);
        assert_eq!(Value::Mapping(map).to_string(), "{a: 1, b: true}");
    }

    #[test]
    fn type_names_match_error_vocabulary() {
        assert_eq!(Value::Null.type_name(), "null");
        assert_eq!(Value::Integer(1).type_name(), "int");
        assert_eq!(Value::Mapping(Mapping::new()).type_name(), "mapping");
    }
}
