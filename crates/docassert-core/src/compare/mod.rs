//! Semantic equality comparison of document trees.
//!
//! The comparator walks two trees in lock-step and stops at the first
//! divergence. Types are checked before structure and structure before
//! content, so the reported [`Mismatch`] is the shallowest and most
//! specific explanation available. Object keys are matched by name while
//! array elements are matched by position.

mod array;
mod mismatch;
mod object;
mod path;
mod scalar;

pub use mismatch::{Mismatch, MismatchKind};
pub use path::{Path, PathSegment};

use tracing::debug;

use crate::Node;

/// Compares two document trees starting at the root.
///
/// ```
/// # use docassert_core::{compare, MismatchKind, Node};
/// let expected = Node::from_json_str(r#"{"a":{"b":[1,2]}}"#)?;
/// let actual = Node::from_json_str(r#"{"a":{"b":[1,3]}}"#)?;
/// let mismatch = compare(&expected, &actual).unwrap_err();
/// assert_eq!(mismatch.kind(), MismatchKind::ValueMismatch);
/// assert_eq!(mismatch.path().to_string(), "a.b[1]");
/// # Ok::<(), docassert_core::ParseError>(())
/// ```
pub fn compare(expected: &Node, actual: &Node) -> Result<(), Mismatch> {
    compare_at(expected, actual, &Path::new())
}

/// Compares two document trees whose roots sit at `path`.
///
/// ```
/// # use docassert_core::{compare_at, Node, Path};
/// let expected = Node::from_json_str("[true]")?;
/// let actual = Node::from_json_str("[false]")?;
/// let mismatch = compare_at(&expected, &actual, &Path::new().key("flags")).unwrap_err();
/// assert_eq!(mismatch.path().to_string(), "flags[0]");
/// # Ok::<(), docassert_core::ParseError>(())
/// ```
pub fn compare_at(expected: &Node, actual: &Node, path: &Path) -> Result<(), Mismatch> {
    let result = compare_impl(expected, actual, path);
    if let Err(mismatch) = &result {
        debug!(path = %mismatch.path(), kind = ?mismatch.kind(), "documents diverge");
    }
    result
}

pub(super) fn compare_impl(expected: &Node, actual: &Node, path: &Path) -> Result<(), Mismatch> {
    let (expected_kind, actual_kind) = (expected.kind(), actual.kind());
    if expected_kind != actual_kind {
        return Err(Mismatch::Type {
            path: path.clone(),
            expected: expected_kind,
            actual: actual_kind,
        });
    }

    match (expected, actual) {
        (Node::Object(left), Node::Object(right)) => {
            object::compare_objects(expected, left, actual, right, path)
        }
        (Node::Array(left), Node::Array(right)) => {
            array::compare_arrays(expected, left, actual, right, path)
        }
        _ => scalar::compare_scalars(expected, actual, path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn node(json: &str) -> Node {
        Node::from_json_str(json).unwrap()
    }

    fn mismatch(expected: &str, actual: &str) -> Mismatch {
        compare(&node(expected), &node(actual)).unwrap_err()
    }

    #[test]
    fn identical_documents_match() {
        let doc = node(r#"{"a":[1,{"b":null}],"c":"x","d":2.5,"e":false}"#);
        assert_eq!(compare(&doc, &doc.clone()), Ok(()));
    }

    #[test]
    fn object_key_order_is_irrelevant() {
        assert_eq!(compare(&node(r#"{"a":1,"b":2}"#), &node(r#"{"b":2,"a":1}"#)), Ok(()));
    }

    #[test]
    fn array_order_is_relevant() {
        let err = mismatch("[1,2]", "[2,1]");
        assert_eq!(err.kind(), MismatchKind::ValueMismatch);
        assert_eq!(err.path().to_string(), "[0]");
    }

    #[test]
    fn type_is_checked_before_content() {
        for (expected, actual) in [("{}", "[]"), ("[]", "{}"), ("{}", "1"), ("[1]", "\"[1]\"")] {
            let err = mismatch(expected, actual);
            assert_eq!(err.kind(), MismatchKind::TypeMismatch, "{expected} vs {actual}");
            assert!(err.path().is_root());
        }
    }

    #[test]
    fn type_mismatch_names_both_kinds() {
        let err = mismatch(r#"{"a":{}}"#, r#"{"a":[]}"#);
        assert_eq!(
            err,
            Mismatch::Type {
                path: Path::new().key("a"),
                expected: crate::NodeKind::Object,
                actual: crate::NodeKind::Array,
            }
        );
        assert_eq!(
            err.to_string(),
            "Token of path 'a' of type Object is different from 'a' of type Array"
        );
    }

    #[test]
    fn key_count_precedes_key_presence() {
        let err = mismatch(r#"{"a":1}"#, r#"{"a":1,"b":2}"#);
        assert_eq!(err.kind(), MismatchKind::KeyCountMismatch);
        let Mismatch::KeyCount { expected_len, actual_len, .. } = err else {
            panic!("expected key count mismatch");
        };
        assert_eq!((expected_len, actual_len), (1, 2));
    }

    #[test]
    fn missing_key_names_the_key() {
        let err = mismatch(r#"{"a":1,"b":2}"#, r#"{"a":1,"c":2}"#);
        let Mismatch::MissingKey { key, path, .. } = &err else {
            panic!("expected missing key, got {err:?}");
        };
        assert_eq!(key, "b");
        assert_eq!(path.to_string(), "b");
    }

    #[test]
    fn missing_key_follows_expected_insertion_order() {
        let err = mismatch(r#"{"z":1,"a":2}"#, r#"{"x":1,"y":2}"#);
        let Mismatch::MissingKey { key, .. } = err else {
            panic!("expected missing key");
        };
        assert_eq!(key, "z");
    }

    #[test]
    fn first_failing_key_short_circuits() {
        let err = mismatch(r#"{"a":1,"b":2}"#, r#"{"a":9,"b":9}"#);
        assert_eq!(err.path().to_string(), "a");
    }

    #[test]
    fn array_length_is_checked_before_elements() {
        let err = mismatch("[1,2,3]", "[9,2]");
        let Mismatch::ArrayLength { expected_len, actual_len, .. } = err else {
            panic!("expected array length mismatch");
        };
        assert_eq!((expected_len, actual_len), (3, 2));
    }

    #[test]
    fn nested_paths_are_reported() {
        let err = mismatch(r#"{"a":{"b":[1,2]}}"#, r#"{"a":{"b":[1,3]}}"#);
        assert_eq!(err.kind(), MismatchKind::ValueMismatch);
        assert_eq!(err.path().to_string(), "a.b[1]");
        assert_eq!(
            err.to_string(),
            "Values for path 'a.b[1]' are different.\nExpected: 2\nActual: 3"
        );
    }

    #[test]
    fn number_and_string_are_different_types() {
        let err = mismatch(r#"{"a":1}"#, r#"{"a":"1"}"#);
        assert_eq!(err.kind(), MismatchKind::TypeMismatch);
    }

    #[test]
    fn integer_and_float_are_different_types() {
        let err = mismatch("[1]", "[1.0]");
        assert_eq!(
            err.to_string(),
            "Token of path '[0]' of type Integer is different from '[0]' of type Float"
        );
    }

    #[test]
    fn string_values_render_quoted() {
        let err = mismatch(r#"{"name":"Hilton"}"#, r#"{"name":"Hyatt"}"#);
        assert_eq!(
            err.to_string(),
            "Values for path 'name' are different.\nExpected: \"Hilton\"\nActual: \"Hyatt\""
        );
    }

    #[test]
    fn explicit_start_path_prefixes_reports() {
        let err = compare_at(&node("[1]"), &node("[2]"), &Path::new().key("root").key("items"))
            .unwrap_err();
        assert_eq!(err.path().to_string(), "root.items[0]");
    }

    fn arb_json_value() -> impl Strategy<Value = serde_json::Value> {
        use proptest::{collection::btree_map, collection::vec, string::string_regex};

        let leaf = prop_oneof![
            Just(serde_json::Value::Null),
            any::<bool>().prop_map(serde_json::Value::Bool),
            any::<i32>().prop_map(|i| serde_json::Value::Number(i.into())),
            proptest::num::f64::NORMAL.prop_filter_map("finite", |f| {
                serde_json::Number::from_f64(f).map(serde_json::Value::Number)
            }),
            string_regex("[a-zA-Z0-9]{0,8}").unwrap().prop_map(serde_json::Value::String),
        ];
        leaf.prop_recursive(4, 16, 4, move |inner| {
            prop_oneof![
                vec(inner.clone(), 0..4).prop_map(serde_json::Value::Array),
                btree_map(string_regex("[a-zA-Z0-9]{1,8}").unwrap(), inner, 0..4).prop_map(|map| {
                    let mut object = serde_json::Map::new();
                    for (k, v) in map {
                        object.insert(k, v);
                    }
                    serde_json::Value::Object(object)
                }),
            ]
        })
    }

    fn reversed_keys(value: &serde_json::Value) -> serde_json::Value {
        match value {
            serde_json::Value::Object(map) => {
                let mut object = serde_json::Map::new();
                for (k, v) in map.iter().rev() {
                    object.insert(k.clone(), reversed_keys(v));
                }
                serde_json::Value::Object(object)
            }
            serde_json::Value::Array(items) => {
                serde_json::Value::Array(items.iter().map(reversed_keys).collect())
            }
            other => other.clone(),
        }
    }

    proptest! {
        #[test]
        fn comparison_is_reflexive(json in arb_json_value()) {
            let lhs = Node::from_json_value(json.clone()).unwrap();
            let rhs = Node::from_json_value(json).unwrap();
            prop_assert_eq!(compare(&lhs, &rhs), Ok(()));
        }

        #[test]
        fn key_order_never_matters(json in arb_json_value()) {
            let lhs = Node::from_json_value(json.clone()).unwrap();
            let rhs = Node::from_json_value(reversed_keys(&json)).unwrap();
            prop_assert_eq!(compare(&lhs, &rhs), Ok(()));
        }

        #[test]
        fn verdicts_are_deterministic(lhs in arb_json_value(), rhs in arb_json_value()) {
            let lhs = Node::from_json_value(lhs).unwrap();
            let rhs = Node::from_json_value(rhs).unwrap();
            let first = compare(&lhs, &rhs);
            let second = compare(&lhs, &rhs);
            let first_text = first.as_ref().map_err(ToString::to_string);
            let second_text = second.as_ref().map_err(ToString::to_string);
            prop_assert_eq!(first_text, second_text);
            prop_assert_eq!(first, second);
        }

        #[test]
        fn verdict_agrees_with_structural_equality(lhs in arb_json_value(), rhs in arb_json_value()) {
            let lhs = Node::from_json_value(lhs).unwrap();
            let rhs = Node::from_json_value(rhs).unwrap();
            prop_assert_eq!(compare(&lhs, &rhs).is_ok(), lhs == rhs);
        }
    }
}
