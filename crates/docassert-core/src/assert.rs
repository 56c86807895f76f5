//! Text-level assertions that parse two documents and explain how they differ.
//!
//! Each `are_*` function returns an [`AssertionError`] whose `Display` output
//! is ready to be used as a test failure message. The `assert_*!` macros
//! panic with that message.

use thiserror::Error;
use tracing::debug;

use crate::{Mismatch, Node, ParseError, XmlDocument};

const EXPECTED_BANNER: &str = "################### Expected:";
const ACTUAL_BANNER: &str = "******************* Actual:";
const XML_EXPECTED_BANNER: &str = "################### expected:";
const XML_ACTUAL_BANNER: &str = "################### actual:";

/// Failure of a document assertion.
#[derive(Debug, Error)]
pub enum AssertionError {
    /// The expected document could not be parsed.
    #[error("failed to parse expected document: {0}")]
    ParseExpected(ParseError),
    /// The actual document could not be parsed.
    #[error("failed to parse actual document: {0}")]
    ParseActual(ParseError),
    /// Both documents parsed but are not equal.
    #[error("{report}")]
    NotEqual {
        /// The located divergence, when the comparison produces one.
        mismatch: Option<Mismatch>,
        /// Full failure report with both documents.
        report: String,
    },
}

impl AssertionError {
    /// Returns the located divergence, if any.
    #[must_use]
    pub fn mismatch(&self) -> Option<&Mismatch> {
        match self {
            Self::NotEqual { mismatch, .. } => mismatch.as_ref(),
            _ => None,
        }
    }
}

/// Asserts that two JSON documents are semantically equal.
///
/// Object key order is ignored, array order and scalar types are not. On
/// failure the report shows both whole documents followed by the first
/// divergence.
///
/// ```
/// # use docassert_core::are_json_objects_semantically_equal;
/// assert!(are_json_objects_semantically_equal(r#"{"a":1,"b":[2]}"#, r#"{"b":[2],"a":1}"#).is_ok());
///
/// let err = are_json_objects_semantically_equal(r#"{"a":1}"#, r#"{"a":2}"#).unwrap_err();
/// assert!(err.to_string().ends_with("Values for path 'a' are different.\nExpected: 1\nActual: 2"));
/// ```
pub fn are_json_objects_semantically_equal(
    expected: &str,
    actual: &str,
) -> Result<(), AssertionError> {
    let (expected, actual) = parse_pair(expected, actual, Node::from_json_str)?;
    semantically_equal(&expected, &actual)
}

/// Asserts that two YAML documents are semantically equal.
///
/// ```
/// # use docassert_core::are_yaml_documents_semantically_equal;
/// assert!(are_yaml_documents_semantically_equal("a: 1\nb: 2\n", "b: 2\na: 1\n").is_ok());
/// ```
pub fn are_yaml_documents_semantically_equal(
    expected: &str,
    actual: &str,
) -> Result<(), AssertionError> {
    let (expected, actual) = parse_pair(expected, actual, Node::from_yaml_str)?;
    semantically_equal(&expected, &actual)
}

/// Asserts that two JSON documents are structurally equal.
///
/// Unlike [`are_json_objects_semantically_equal`] the report does not
/// locate the divergence; it only shows both documents.
///
/// ```
/// # use docassert_core::are_json_objects_equal;
/// let err = are_json_objects_equal("[1,2]", "[2,1]").unwrap_err();
/// assert!(err.mismatch().is_none());
/// assert!(err.to_string().starts_with("JSON documents are not equal."));
/// ```
pub fn are_json_objects_equal(expected: &str, actual: &str) -> Result<(), AssertionError> {
    let (expected, actual) = parse_pair(expected, actual, Node::from_json_str)?;
    if expected == actual {
        return Ok(());
    }
    debug!("JSON documents are not equal");
    let mut report = String::from("JSON documents are not equal.\n\n");
    report.push_str(&json_report(&expected, &actual));
    Err(AssertionError::NotEqual { mismatch: None, report })
}

/// Asserts that two XML documents are equal.
///
/// Whitespace between elements, comments and attribute order are ignored.
///
/// ```
/// # use docassert_core::are_xml_documents_equal;
/// assert!(are_xml_documents_equal("<a x='1' y='2'/>", "<a y=\"2\" x=\"1\"></a>").is_ok());
/// assert!(are_xml_documents_equal("<a><b/><c/></a>", "<a><c/><b/></a>").is_err());
/// ```
pub fn are_xml_documents_equal(expected: &str, actual: &str) -> Result<(), AssertionError> {
    let (expected, actual) = parse_pair(expected, actual, XmlDocument::parse)?;
    if expected == actual {
        return Ok(());
    }
    debug!(root = expected.root().name(), "XML documents are not equal");
    let report = format!(
        "XML documents are not equal.\n\n{XML_EXPECTED_BANNER}\n{}\n\n{XML_ACTUAL_BANNER}\n{}\n",
        expected.to_pretty_string(),
        actual.to_pretty_string(),
    );
    Err(AssertionError::NotEqual { mismatch: None, report })
}

/// Asserts that two optional collections have the same length, then runs
/// `assert_item` on each pair in order.
///
/// A missing `expected` collection requires a missing `actual` collection.
///
/// # Panics
///
/// Panics when presence or length differ, or when `assert_item` panics.
///
/// ```
/// # use docassert_core::assert_collection;
/// let mut seen = 0;
/// assert_collection(Some(&[1, 2][..]), Some(&[1, 2][..]), |e, a| {
///     assert_eq!(e, a);
///     seen += 1;
/// });
/// assert_eq!(seen, 2);
/// assert_collection::<u8, _>(None, None, |_, _| unreachable!());
/// ```
pub fn assert_collection<T, F>(expected: Option<&[T]>, actual: Option<&[T]>, mut assert_item: F)
where
    F: FnMut(&T, &T),
{
    let Some(expected) = expected else {
        assert!(actual.is_none(), "expected no collection, but actual collection is present");
        return;
    };
    let Some(actual) = actual else {
        panic!("expected a collection of {} items, but actual collection is missing", expected.len());
    };
    assert_eq!(expected.len(), actual.len(), "collections have different lengths");
    for (left, right) in expected.iter().zip(actual) {
        assert_item(left, right);
    }
}

fn parse_pair<T, P>(expected: &str, actual: &str, parse: P) -> Result<(T, T), AssertionError>
where
    P: Fn(&str) -> Result<T, ParseError>,
{
    let expected = parse(expected).map_err(AssertionError::ParseExpected)?;
    let actual = parse(actual).map_err(AssertionError::ParseActual)?;
    Ok((expected, actual))
}

fn semantically_equal(expected: &Node, actual: &Node) -> Result<(), AssertionError> {
    crate::compare(expected, actual).map_err(|mismatch| {
        let mut report = json_report(expected, actual);
        report.push('\n');
        report.push_str(&mismatch.to_string());
        AssertionError::NotEqual { mismatch: Some(mismatch), report }
    })
}

fn json_report(expected: &Node, actual: &Node) -> String {
    format!(
        "{EXPECTED_BANNER}\n{}\n\n{ACTUAL_BANNER}\n{}\n",
        expected.to_pretty_string(),
        actual.to_pretty_string(),
    )
}

/// Panics unless two JSON strings are semantically equal.
///
/// ```
/// docassert_core::assert_json_semantic_eq!(r#"{"a":1,"b":2}"#, r#"{"b":2,"a":1}"#);
/// ```
///
/// ```should_panic
/// docassert_core::assert_json_semantic_eq!("[1,2]", "[2,1]");
/// ```
#[macro_export]
macro_rules! assert_json_semantic_eq {
    ($expected:expr, $actual:expr $(,)?) => {{
        if let Err(err) = $crate::are_json_objects_semantically_equal(&$expected, &$actual) {
            panic!("\n{}", err);
        }
    }};
}

/// Panics unless two JSON strings are structurally equal.
///
/// ```
/// docassert_core::assert_json_eq!("{\"a\":[1]}", "{ \"a\": [ 1 ] }");
/// ```
#[macro_export]
macro_rules! assert_json_eq {
    ($expected:expr, $actual:expr $(,)?) => {{
        if let Err(err) = $crate::are_json_objects_equal(&$expected, &$actual) {
            panic!("\n{}", err);
        }
    }};
}

/// Panics unless two XML strings are equal.
///
/// ```
/// docassert_core::assert_xml_eq!("<a><b>1</b></a>", "<a>\n  <b>1</b>\n</a>");
/// ```
#[macro_export]
macro_rules! assert_xml_eq {
    ($expected:expr, $actual:expr $(,)?) => {{
        if let Err(err) = $crate::are_xml_documents_equal(&$expected, &$actual) {
            panic!("\n{}", err);
        }
    }};
}
