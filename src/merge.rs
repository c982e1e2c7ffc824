use crate::value::{Mapping, Value};

/// Deep-merge `src` into `dest`, node by node.
/// If both sides have a Mapping for the same key, recurse.
/// Otherwise, `src`'s value wins — including replacing a mapping with a
/// scalar or vice versa.
///
/// Mutates `dest` in place and consumes `src`. Never fails: arbitrary value
/// replacement is always permitted.
pub fn deep_merge(dest: &mut Mapping, src: Mapping) {
    for (key, src_val) in src {
        match (dest.remove(&key), src_val) {
            (Some(Value::Mapping(mut dest_map)), Value::Mapping(src_map)) => {
                deep_merge(&mut dest_map, src_map);
                dest.insert(key, Value::Mapping(dest_map));
            }
            (_, src_val) => {
                dest.insert(key, src_val);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapping(json: &str) -> Mapping {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn disjoint_keys_merge() {
        let mut dest = mapping(r#"{"host": "localhost"}"#);
        deep_merge(&mut dest, mapping(r#"{"port": 3000}"#));
        assert_eq!(dest["host"], Value::String("localhost".into()));
        assert_eq!(dest["port"], Value::Integer(3000));
    }

    #[test]
    fn same_scalar_key_src_wins() {
        let mut dest = mapping(r#"{"port": 8080}"#);
        deep_merge(&mut dest, mapping(r#"{"port": 3000}"#));
        assert_eq!(dest["port"], Value::Integer(3000));
    }

    #[test]
    fn nested_mappings_recurse() {
        let mut dest = mapping(r#"{"db": {"host": "localhost", "port": 5432}}"#);
        deep_merge(&mut dest, mapping(r#"{"db": {"host": "192.168.1.100"}}"#));
        let db = dest["db"].as_mapping().unwrap();
        assert_eq!(db["host"], Value::String("192.168.1.100".into()));
        assert_eq!(db["port"], Value::Integer(5432));
    }

    #[test]
    fn src_mapping_replaces_scalar() {
        let mut dest = mapping(r#"{"a": 1}"#);
        deep_merge(&mut dest, mapping(r#"{"a": {"x": 10}}"#));
        assert_eq!(dest, mapping(r#"{"a": {"x": 10}}"#));
    }

    #[test]
    fn src_scalar_replaces_mapping() {
        let mut dest = mapping(r#"{"db": {"url": "x"}}"#);
        deep_merge(&mut dest, mapping(r#"{"db": "flat_string"}"#));
        assert_eq!(dest["db"], Value::String("flat_string".into()));
    }

    #[test]
    fn empty_src_is_a_noop() {
        let mut dest = mapping(r#"{"port": 8080}"#);
        let before = dest.clone();
        deep_merge(&mut dest, Mapping::new());
        assert_eq!(dest, before);
    }

    #[test]
    fn empty_dest_takes_src() {
        let src = mapping(r#"{"port": 3000}"#);
        let mut dest = Mapping::new();
        deep_merge(&mut dest, src.clone());
        assert_eq!(dest, src);
    }

    #[test]
    fn merge_is_idempotent_for_scalar_leaves() {
        let src = mapping(r#"{"a": 1, "b": {"c": "x"}}"#);
        let mut dest = mapping(r#"{"a": 0, "b": {"d": true}}"#);
        deep_merge(&mut dest, src.clone());
        let once = dest.clone();
        deep_merge(&mut dest, src);
        assert_eq!(dest, once);
    }

    #[test]
    fn deeply_nested_three_levels() {
        let mut dest = mapping(r#"{"a": {"b": {"c": {"val": 1, "other": "keep"}}}}"#);
        deep_merge(&mut dest, mapping(r#"{"a": {"b": {"c": {"val": 99}}}}"#));
        let c = dest["a"].as_mapping().unwrap()["b"].as_mapping().unwrap()["c"]
            .as_mapping()
            .unwrap();
        assert_eq!(c["val"], Value::Integer(99));
        assert_eq!(c["other"], Value::String("keep".into()));
    }

    #[test]
    fn multiple_sequential_merges() {
        let mut dest = mapping(r#"{"host": "a"}"#);
        deep_merge(&mut dest, mapping(r#"{"port": 1000}"#));
        deep_merge(&mut dest, mapping(r#"{"host": "c"}"#));
        assert_eq!(dest["host"], Value::String("c".into()));
        assert_eq!(dest["port"], Value::Integer(1000));
    }

    #[test]
    fn arrays_are_replaced_whole() {
        let mut dest = mapping(r#"{"tags": [1, 2, 3]}"#);
        deep_merge(&mut dest, mapping(r#"{"tags": [4]}"#));
        assert_eq!(dest["tags"], Value::Array(vec![Value::Integer(4)]));
    }
}
