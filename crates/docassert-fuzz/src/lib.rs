//! Fuzzing harnesses for `docassert`.
//!
//! Each public function accepts raw bytes and drives the parsers or the
//! semantic comparator, swallowing recoverable errors. The comparator
//! harness also checks the invariants every verdict must satisfy.
//!
//! # Examples
//!
//! ```
//! docassert_fuzz::fuzz_parse(b"{\"a\":1}");
//! docassert_fuzz::fuzz_compare(&[1, 2, 3, 4]);
//! docassert_fuzz::fuzz_xml(b"<a x='1'><b/></a>");
//! ```
#![forbid(unsafe_code)]
#![warn(missing_docs)]

use arbitrary::Unstructured;
use docassert_core::{compare, Node, XmlDocument};
use serde_json::{Map as JsonMap, Number as JsonNumber, Value as JsonValue};

const MAX_DEPTH: usize = 4;
const MAX_ARRAY_LEN: u8 = 6;
const MAX_OBJECT_LEN: u8 = 6;
const MAX_STRING_LEN: u8 = 12;

/// Feeds arbitrary bytes through the JSON and YAML parsers.
///
/// ```
/// docassert_fuzz::fuzz_parse(b"{\"key\":\"value\"}");
/// ```
pub fn fuzz_parse(data: &[u8]) {
    if let Ok(text) = std::str::from_utf8(data) {
        if let Ok(node) = Node::from_json_str(text) {
            assert_eq!(compare(&node, &node), Ok(()), "parsed JSON must equal itself");
        }
        let _ = Node::from_yaml_str(text);
    }
}

/// Compares randomly generated trees and checks comparator invariants.
///
/// Every tree must equal itself, every verdict must be reproducible, and
/// the verdict must agree with structural equality.
///
/// ```
/// docassert_fuzz::fuzz_compare(b"seed");
/// ```
pub fn fuzz_compare(data: &[u8]) {
    let mut unstructured = Unstructured::new(data);
    let Some(lhs) = random_node(&mut unstructured) else {
        return;
    };
    let Some(rhs) = random_node(&mut unstructured) else {
        return;
    };

    assert_eq!(compare(&lhs, &lhs), Ok(()));
    let first = compare(&lhs, &rhs);
    let second = compare(&lhs, &rhs);
    assert_eq!(first, second, "verdicts must be deterministic");
    assert_eq!(first.is_ok(), lhs == rhs, "verdict must agree with structural equality");
}

/// Feeds arbitrary bytes through the XML parser and renderer.
///
/// A parsed document must survive a render and re-parse unchanged.
///
/// ```
/// docassert_fuzz::fuzz_xml(b"<a>text</a>");
/// ```
pub fn fuzz_xml(data: &[u8]) {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    if let Ok(doc) = XmlDocument::parse(text) {
        let rendered = doc.to_pretty_string();
        let reparsed = XmlDocument::parse(&rendered).expect("rendered XML must parse");
        assert_eq!(reparsed, doc);
    }
}

fn random_node(unstructured: &mut Unstructured<'_>) -> Option<Node> {
    let value = json_value_from_unstructured(unstructured, 0).ok()?;
    Node::from_json_value(value).ok()
}

fn json_value_from_unstructured(
    unstructured: &mut Unstructured<'_>,
    depth: usize,
) -> Result<JsonValue, arbitrary::Error> {
    if depth >= MAX_DEPTH {
        return json_leaf(unstructured);
    }

    let choice = unstructured.int_in_range::<u8>(0..=5)?;
    match choice {
        0 => Ok(JsonValue::Null),
        1 => Ok(JsonValue::Bool(unstructured.arbitrary()?)),
        2 => Ok(JsonValue::Number(random_number(unstructured)?)),
        3 => Ok(JsonValue::String(random_string(unstructured)?)),
        4 => {
            let len = usize::from(unstructured.int_in_range::<u8>(0..=MAX_ARRAY_LEN)?);
            let mut items = Vec::with_capacity(len);
            for _ in 0..len {
                items.push(json_value_from_unstructured(unstructured, depth + 1)?);
            }
            Ok(JsonValue::Array(items))
        }
        _ => {
            let len = usize::from(unstructured.int_in_range::<u8>(0..=MAX_OBJECT_LEN)?);
            let mut map = JsonMap::new();
            for _ in 0..len {
                let key = random_string(unstructured)?;
                let value = json_value_from_unstructured(unstructured, depth + 1)?;
                map.insert(key, value);
            }
            Ok(JsonValue::Object(map))
        }
    }
}

fn json_leaf(unstructured: &mut Unstructured<'_>) -> Result<JsonValue, arbitrary::Error> {
    let choice = unstructured.int_in_range::<u8>(0..=3)?;
    match choice {
        0 => Ok(JsonValue::Null),
        1 => Ok(JsonValue::Bool(unstructured.arbitrary()?)),
        2 => Ok(JsonValue::Number(random_number(unstructured)?)),
        _ => Ok(JsonValue::String(random_string(unstructured)?)),
    }
}

fn random_number(unstructured: &mut Unstructured<'_>) -> Result<JsonNumber, arbitrary::Error> {
    if unstructured.arbitrary()? {
        let int = unstructured.arbitrary::<i64>()?;
        Ok(JsonNumber::from(int))
    } else {
        let numerator = f64::from(unstructured.arbitrary::<i32>()?);
        let denominator = f64::from(unstructured.int_in_range::<u16>(1..=1024)?);
        JsonNumber::from_f64(numerator / denominator).ok_or(arbitrary::Error::IncorrectFormat)
    }
}

fn random_string(unstructured: &mut Unstructured<'_>) -> Result<String, arbitrary::Error> {
    let len = usize::from(unstructured.int_in_range::<u8>(0..=MAX_STRING_LEN)?);
    let mut string = String::with_capacity(len);
    for _ in 0..len {
        let byte = unstructured.int_in_range::<u8>(0x20..=0x7e)?;
        string.push(char::from(byte));
    }
    Ok(string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_harness_handles_utf8() {
        fuzz_parse(br"{}");
        fuzz_parse(&[0xff, 0xfe]);
    }

    #[test]
    fn compare_harness_runs() {
        fuzz_compare(b"compare");
        fuzz_compare(&[5, 3, 9, 1, 0, 200, 17, 4, 4, 4, 2, 8, 99, 1]);
    }

    #[test]
    fn xml_harness_runs() {
        fuzz_xml(b"<a b=\"&amp;\"><c>1 &lt; 2</c><d/></a>");
        fuzz_xml(b"not xml");
    }
}
