use quick_xml::events::attributes::AttrError;
use thiserror::Error;

/// Errors that can occur while parsing input text into a document tree.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The provided JSON input was invalid.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// The provided YAML input was invalid or used keys, tags or numbers
    /// the document model cannot hold.
    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    /// Encountered a number that fits none of the supported representations.
    #[error("number {value} cannot be represented")]
    NumberOutOfRange {
        /// The textual representation of the offending number.
        value: String,
    },
    /// Attempted to construct a float that is not finite.
    #[error("non-finite number encountered: {value}")]
    NotFinite {
        /// The offending numeric value.
        value: f64,
    },
    /// The XML reader rejected the input.
    #[error("invalid XML: {0}")]
    Xml(#[from] quick_xml::Error),
    /// An XML attribute was malformed.
    #[error("invalid XML attribute: {0}")]
    XmlAttribute(#[from] AttrError),
    /// XML names or text were not valid UTF-8.
    #[error("invalid UTF-8 in XML: {0}")]
    Utf8(#[from] std::str::Utf8Error),
    /// An end tag did not match the innermost open element.
    #[error("unexpected end tag </{found}>, expected </{expected}>")]
    UnexpectedEndTag {
        /// Name of the open element.
        expected: String,
        /// Name found in the end tag.
        found: String,
    },
    /// An end tag appeared with no element open.
    #[error("end tag </{found}> has no matching start tag")]
    UnmatchedEndTag {
        /// Name found in the end tag.
        found: String,
    },
    /// The input ended while an element was still open.
    #[error("element <{name}> is not closed")]
    UnclosedElement {
        /// Name of the unclosed element.
        name: String,
    },
    /// The XML input contained no root element.
    #[error("XML document has no root element")]
    MissingRoot,
    /// The XML input contained more than one top-level element.
    #[error("XML document has multiple root elements (second is <{name}>)")]
    MultipleRoots {
        /// Name of the second top-level element.
        name: String,
    },
    /// Non-whitespace text appeared outside the root element.
    #[error("XML text outside the root element: {text:?}")]
    TextOutsideRoot {
        /// The stray text.
        text: String,
    },
}
