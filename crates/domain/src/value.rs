//! Nested variable values
//!
//! A [`VarValue`] is the resolved form of a variable set: a recursively
//! nested mapping from string keys to scalars, sequences, or further
//! mappings. Structures are built once per resolution and never mutated
//! afterwards; the merge helpers below consume their inputs and return a
//! fresh value.

use std::fmt;

use indexmap::IndexMap;
use indexmap::map::Entry;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

/// A mapping from string keys to nested values, in insertion order.
///
/// Insertion order is irrelevant for resolution; it only keeps error
/// messages and rendered output deterministic.
pub type Mapping = IndexMap<String, VarValue>;

/// A single value inside a resolved variable structure.
///
/// Keys are case-sensitive. Floats use [`OrderedFloat`] so that whole
/// structures are `Eq`-comparable, which collision detection relies on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VarValue {
    /// An explicit null.
    Null,
    /// A boolean scalar.
    Bool(bool),
    /// An integer scalar.
    Int(i64),
    /// A floating-point scalar.
    Float(OrderedFloat<f64>),
    /// A string scalar.
    String(String),
    /// An ordered sequence of values.
    Sequence(Vec<VarValue>),
    /// A nested mapping.
    Mapping(Mapping),
}

impl VarValue {
    /// Returns an empty mapping value.
    #[must_use]
    pub fn empty_mapping() -> Self {
        Self::Mapping(Mapping::new())
    }

    /// Returns true for [`VarValue::Null`].
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns the string slice if this value is a string scalar.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the underlying mapping if this value is one.
    #[must_use]
    pub const fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Self::Mapping(map) => Some(map),
            _ => None,
        }
    }

    /// Returns the underlying sequence if this value is one.
    #[must_use]
    pub fn as_sequence(&self) -> Option<&[VarValue]> {
        match self {
            Self::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// Walks the structure along a `.`-separated key path.
    ///
    /// Any absent intermediate key yields `None`; this is a plain lookup,
    /// never an error. Empty path components are skipped, so a trailing
    /// dot is harmless.
    #[must_use]
    pub fn lookup(&self, path: &str) -> Option<&VarValue> {
        let mut current = self;
        for component in path.split('.').filter(|c| !c.is_empty()) {
            current = match current {
                Self::Mapping(map) => map.get(component)?,
                _ => return None,
            };
        }
        Some(current)
    }

    /// Recursively merges `over` into `base`, `over` winning on conflicts.
    ///
    /// Two mappings at the same key merge key-wise; any non-mapping
    /// overriding value fully replaces whatever the base held at that key
    /// (no sequence concatenation, no scalar coercion).
    #[must_use]
    pub fn deep_merge(base: Self, over: Self) -> Self {
        match (base, over) {
            (Self::Mapping(mut base), Self::Mapping(over)) => {
                for (key, over_value) in over {
                    match base.entry(key) {
                        Entry::Occupied(mut occupied) => {
                            let base_value = occupied.insert(Self::Null);
                            occupied.insert(Self::deep_merge(base_value, over_value));
                        }
                        Entry::Vacant(vacant) => {
                            vacant.insert(over_value);
                        }
                    }
                }
                Self::Mapping(base)
            }
            (_, over) => over,
        }
    }

    /// Enumerates the fully-qualified dotted paths of every leaf value.
    ///
    /// A leaf is any non-mapping value, or an empty mapping. A non-mapping
    /// root has no addressable keys and yields an empty list.
    #[must_use]
    pub fn fq_keys(&self) -> Vec<String> {
        let mut keys = Vec::new();
        self.collect_fq_keys(String::new(), &mut keys);
        keys
    }

    fn collect_fq_keys(&self, prefix: String, out: &mut Vec<String>) {
        match self {
            Self::Mapping(map) if !map.is_empty() => {
                for (key, value) in map {
                    let path = if prefix.is_empty() {
                        key.clone()
                    } else {
                        format!("{prefix}.{key}")
                    };
                    value.collect_fq_keys(path, out);
                }
            }
            _ => {
                if !prefix.is_empty() {
                    out.push(prefix);
                }
            }
        }
    }
}

impl fmt::Display for VarValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::String(s) => write!(f, "{s}"),
            Self::Sequence(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            Self::Mapping(map) => {
                write!(f, "{{")?;
                for (i, (key, value)) in map.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{key}: {value}")?;
                }
                write!(f, "}}")
            }
        }
    }
}

impl From<bool> for VarValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for VarValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for VarValue {
    fn from(value: f64) -> Self {
        Self::Float(OrderedFloat(value))
    }
}

impl From<&str> for VarValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for VarValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<Vec<VarValue>> for VarValue {
    fn from(items: Vec<VarValue>) -> Self {
        Self::Sequence(items)
    }
}

impl From<Mapping> for VarValue {
    fn from(map: Mapping) -> Self {
        Self::Mapping(map)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn yaml(content: &str) -> VarValue {
        serde_yaml::from_str(content).expect("fixture must be valid YAML")
    }

    #[test]
    fn deserializes_scalars_with_natural_variants() {
        assert_eq!(yaml("42"), VarValue::Int(42));
        assert_eq!(yaml("4.5"), VarValue::from(4.5));
        assert_eq!(yaml("true"), VarValue::Bool(true));
        assert_eq!(yaml("hello"), VarValue::from("hello"));
        assert_eq!(yaml("~"), VarValue::Null);
    }

    #[test]
    fn deserializes_nested_structures_from_json_and_yaml() {
        let from_yaml = yaml("db:\n  port: 5432\n  hosts:\n    - a\n    - b\n");
        let from_json: VarValue =
            serde_json::from_str(r#"{"db": {"port": 5432, "hosts": ["a", "b"]}}"#).unwrap();
        assert_eq!(from_yaml, from_json);
    }

    #[test]
    fn lookup_walks_dotted_paths() {
        let value = yaml("net:\n  host: x\n  port: 80\n");
        assert_eq!(value.lookup("net.host"), Some(&VarValue::from("x")));
        assert_eq!(value.lookup("net.port"), Some(&VarValue::Int(80)));
        assert_eq!(value.lookup("net.missing"), None);
        assert_eq!(value.lookup("net.host.deeper"), None);
        assert_eq!(value.lookup(""), Some(&value));
    }

    #[test]
    fn deep_merge_is_self_overriding_and_keywise() {
        let parent = yaml("b:\n  x: 2\n  y: 3\nc: 4\n");
        let child = yaml("a: 1\nb:\n  x: 1\n");
        let merged = VarValue::deep_merge(parent, child);
        assert_eq!(merged, yaml("b:\n  x: 1\n  y: 3\nc: 4\na: 1\n"));
    }

    #[test]
    fn deep_merge_replaces_sequences_wholesale() {
        let base = yaml("items: [1, 2, 3]\n");
        let over = yaml("items: [4]\n");
        assert_eq!(VarValue::deep_merge(base, over), yaml("items: [4]\n"));
    }

    #[test]
    fn deep_merge_non_mapping_override_wins() {
        let base = yaml("db:\n  port: 5432\n");
        let over = yaml("db: disabled\n");
        assert_eq!(VarValue::deep_merge(base, over), yaml("db: disabled\n"));
    }

    #[test]
    fn fq_keys_enumerates_leaf_paths() {
        let value = yaml("db:\n  port: 5432\n  tags: [a]\nname: prod\nempty: {}\n");
        let mut keys = value.fq_keys();
        keys.sort();
        assert_eq!(keys, vec!["db.port", "db.tags", "empty", "name"]);
    }

    #[test]
    fn fq_keys_of_non_mapping_root_is_empty() {
        assert!(VarValue::Int(1).fq_keys().is_empty());
    }

    #[test]
    fn display_renders_scalars_bare() {
        assert_eq!(VarValue::Int(5432).to_string(), "5432");
        assert_eq!(VarValue::from("x").to_string(), "x");
        assert_eq!(yaml("[1, two]").to_string(), "[1, two]");
        assert_eq!(yaml("a: 1").to_string(), "{a: 1}");
    }
}
