//! Semantic equality assertions for JSON, YAML and XML documents.
//!
//! `docassert-core` parses structured documents into a small tree model and
//! compares them the way a test author means "equal": object keys are
//! unordered, arrays are ordered, and scalars must agree in both value and
//! type. When two documents differ, the first divergence is reported with
//! its path and both sides rendered for a test failure log.
//!
//! ```
//! use docassert_core::{MismatchKind, Node};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let expected = Node::from_json_str(r#"{"name":"Hilton","tags":["a","b"]}"#)?;
//!     let actual = Node::from_json_str(r#"{"tags":["a","c"],"name":"Hilton"}"#)?;
//!
//!     let mismatch = expected.compare(&actual).unwrap_err();
//!     assert_eq!(mismatch.kind(), MismatchKind::ValueMismatch);
//!     assert_eq!(mismatch.path().to_string(), "tags[1]");
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod assert;
pub mod compare;
mod error;
mod node;
mod number;
pub mod xml;

pub use assert::{
    are_json_objects_equal, are_json_objects_semantically_equal, are_xml_documents_equal,
    are_yaml_documents_semantically_equal, assert_collection, AssertionError,
};
pub use compare::{compare, compare_at, Mismatch, MismatchKind, Path, PathSegment};
pub use error::ParseError;
pub use node::{Node, NodeKind};
pub use number::Number;
pub use xml::{XmlDocument, XmlElement, XmlNode};

/// Returns the semantic version of the `docassert-core` crate.
///
/// ```
/// assert!(!docassert_core::version().is_empty());
/// ```
#[must_use]
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
