//! Dotted path expressions and the evaluator used by document search.
//!
//! A path such as `limits.cpu.value` is a sequence of non-empty segments,
//! each naming a mapping key. Evaluation walks the value tree directly; it
//! never encodes the tree to text first.
//!
//! ```
//! use jsonstore_types::{PathExpr, Value};
//!
//! let tree = Value::mapping().with("limits", Value::mapping().with("cpu", "300m"));
//! let path: PathExpr = "limits.cpu".parse().unwrap();
//! assert!(path.matches(&tree, "300m"));
//! assert!(!path.matches(&tree, "250m"));
//! ```

use std::fmt;
use std::str::FromStr;

use crate::error::PathError;
use crate::value::Value;

/// Separator between path segments.
pub const SEGMENT_DELIMITER: char = '.';

/// A parsed path expression: one or more non-empty mapping-key segments.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PathExpr {
    segments: Vec<String>,
}

impl PathExpr {
    /// Parse a dotted path expression.
    ///
    /// Segments address mapping keys only; `items.0` looks up the key `"0"`,
    /// it does not index into a sequence.
    pub fn parse(text: &str) -> Result<Self, PathError> {
        if text.is_empty() {
            return Err(PathError::Empty);
        }
        let segments: Vec<String> = text.split(SEGMENT_DELIMITER).map(str::to_string).collect();
        if let Some(position) = segments.iter().position(String::is_empty) {
            return Err(PathError::EmptySegment { position });
        }
        Ok(Self { segments })
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Number of segments. Always at least one.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Resolve this path against `root`.
    ///
    /// Returns `None` as soon as a segment cannot be followed, either because
    /// the current value is not a mapping or because the key is missing.
    pub fn resolve<'a>(&self, root: &'a Value) -> Option<&'a Value> {
        resolve_segments(root, &self.segments)
    }

    /// Text of the resolved leaf, if it is comparable (see [`leaf_text`]).
    pub fn resolve_text<'a>(&self, root: &'a Value) -> Option<&'a str> {
        self.resolve(root).and_then(leaf_text)
    }

    /// True when the path resolves to a comparable leaf equal to `expected`.
    pub fn matches(&self, root: &Value, expected: &str) -> bool {
        self.resolve_text(root) == Some(expected)
    }
}

impl FromStr for PathExpr {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for PathExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                write!(f, "{SEGMENT_DELIMITER}")?;
            }
            f.write_str(segment)?;
        }
        Ok(())
    }
}

/// Descend from `root` through each key in `segments`.
///
/// An empty slice resolves to `root` itself.
pub fn resolve_segments<'a, S: AsRef<str>>(root: &'a Value, segments: &[S]) -> Option<&'a Value> {
    segments.iter().try_fold(root, |current, segment| match current {
        Value::Mapping(map) => map.get(segment.as_ref()),
        _ => None,
    })
}

/// The text a leaf compares as during search.
///
/// Text compares literally and booleans as `"true"`/`"false"`. Numbers, null,
/// sequences and mappings have no comparable text and never match.
pub fn leaf_text(value: &Value) -> Option<&str> {
    match value {
        Value::Text(s) => Some(s),
        Value::Bool(true) => Some("true"),
        Value::Bool(false) => Some("false"),
        Value::Null | Value::Number(_) | Value::Sequence(_) | Value::Mapping(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn datacenter() -> Value {
        Value::from(json!({
            "monitoring": { "enabled": "true" },
            "limits": {
                "cpu": { "enabled": false, "value": "300m", "cores": 4 }
            },
            "zones": ["a", "b"],
            "owner": null,
            "empty": ""
        }))
    }

    #[test]
    fn parse_splits_on_dots() {
        let path = PathExpr::parse("limits.cpu.value").unwrap();
        assert_eq!(path.segments(), ["limits", "cpu", "value"]);
        assert_eq!(path.len(), 3);
        assert_eq!(path.to_string(), "limits.cpu.value");
    }

    #[test]
    fn parse_rejects_empty_input() {
        assert_eq!(PathExpr::parse(""), Err(PathError::Empty));
    }

    #[test]
    fn parse_rejects_empty_segments() {
        assert_eq!(
            PathExpr::parse("a..b"),
            Err(PathError::EmptySegment { position: 1 })
        );
        assert_eq!(
            PathExpr::parse(".a"),
            Err(PathError::EmptySegment { position: 0 })
        );
        assert_eq!(
            PathExpr::parse("a."),
            Err(PathError::EmptySegment { position: 1 })
        );
    }

    #[test]
    fn resolves_nested_text() {
        let tree = datacenter();
        let path: PathExpr = "limits.cpu.value".parse().unwrap();
        assert_eq!(path.resolve(&tree), Some(&Value::from("300m")));
        assert!(path.matches(&tree, "300m"));
        assert!(!path.matches(&tree, "250m"));
    }

    #[test]
    fn booleans_compare_as_tokens() {
        let tree = datacenter();
        let path: PathExpr = "limits.cpu.enabled".parse().unwrap();
        assert!(path.matches(&tree, "false"));
        assert!(!path.matches(&tree, "true"));
        assert!(!path.matches(&tree, "False"));
    }

    #[test]
    fn numbers_never_match() {
        let tree = datacenter();
        let path: PathExpr = "limits.cpu.cores".parse().unwrap();
        assert!(path.resolve(&tree).is_some());
        assert!(!path.matches(&tree, "4"));
    }

    #[test]
    fn null_sequence_and_mapping_never_match() {
        let tree = datacenter();
        for (expr, text) in [("owner", "null"), ("zones", r#"["a","b"]"#), ("limits", "")] {
            let path = PathExpr::parse(expr).unwrap();
            assert!(path.resolve(&tree).is_some(), "{expr} should resolve");
            assert!(!path.matches(&tree, text), "{expr} should not match");
        }
    }

    #[test]
    fn absence_is_distinct_from_empty_text() {
        let tree = datacenter();
        let present = PathExpr::parse("empty").unwrap();
        let absent = PathExpr::parse("missing").unwrap();
        assert_eq!(present.resolve_text(&tree), Some(""));
        assert_eq!(absent.resolve_text(&tree), None);
        assert!(present.matches(&tree, ""));
        assert!(!absent.matches(&tree, ""));
    }

    #[test]
    fn does_not_index_sequences() {
        let tree = datacenter();
        let path = PathExpr::parse("zones.0").unwrap();
        assert!(path.resolve(&tree).is_none());
    }

    #[test]
    fn descending_through_a_leaf_is_absence() {
        let tree = datacenter();
        let path = PathExpr::parse("limits.cpu.value.unit").unwrap();
        assert!(path.resolve(&tree).is_none());
    }

    #[test]
    fn resolve_segments_with_no_segments_is_root() {
        let tree = Value::from("root");
        let none: [&str; 0] = [];
        assert_eq!(resolve_segments(&tree, &none), Some(&tree));
    }

    proptest! {
        #[test]
        fn nested_text_leaf_always_resolves(
            keys in prop::collection::vec("[a-z]{1,6}", 1..6),
            leaf in ".*",
        ) {
            let mut tree = Value::from(leaf.clone());
            for key in keys.iter().rev() {
                tree = Value::mapping().with(key.clone(), tree);
            }
            let path = PathExpr::parse(&keys.join(".")).unwrap();
            prop_assert!(path.matches(&tree, &leaf));
        }

        #[test]
        fn number_leaf_never_matches_its_text(
            key in "[a-z]{1,6}",
            n in any::<i64>(),
        ) {
            let tree = Value::mapping().with(key.clone(), n);
            let path = PathExpr::parse(&key).unwrap();
            prop_assert!(!path.matches(&tree, &n.to_string()));
        }

        #[test]
        fn evaluation_is_deterministic(expr in "[a-c]{1,2}(\\.[a-c]{1,2}){0,3}") {
            let tree = Value::from(json!({"a": {"b": "x", "c": {"a": true}}, "b": "y"}));
            let path = PathExpr::parse(&expr).unwrap();
            prop_assert_eq!(path.resolve_text(&tree), path.resolve_text(&tree));
        }
    }
}
