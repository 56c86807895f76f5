//! Minimal XML element trees for document equality assertions.
//!
//! Only the parts of a document that carry meaning for equality are kept:
//! element names, attributes and text. Comments, processing instructions,
//! the XML declaration and the doctype are dropped while parsing.

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use quick_xml::escape::escape;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use tracing::trace;

use crate::ParseError;

const INDENT: &str = "  ";

/// A parsed XML document with exactly one root element.
///
/// ```
/// # use docassert_core::XmlDocument;
/// let lhs: XmlDocument = r#"<a x="1" y="2"><b/></a>"#.parse()?;
/// let rhs: XmlDocument = "<a y='2' x='1'>\n  <b></b>\n</a>".parse()?;
/// assert_eq!(lhs, rhs);
/// # Ok::<(), docassert_core::ParseError>(())
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct XmlDocument {
    root: XmlElement,
}

/// An XML element. Attribute order is ignored by equality, child order is not.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct XmlElement {
    name: String,
    attributes: IndexMap<String, String>,
    children: Vec<XmlNode>,
}

/// A child of an [`XmlElement`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum XmlNode {
    /// A nested element.
    Element(XmlElement),
    /// Character data between two element boundaries, with entities and
    /// CDATA sections resolved and surrounding XML whitespace trimmed.
    Text(String),
}

impl XmlDocument {
    /// Parses XML text.
    ///
    /// ```
    /// # use docassert_core::{ParseError, XmlDocument};
    /// let err = XmlDocument::parse("<a><b></a>").unwrap_err();
    /// assert!(matches!(err, ParseError::UnexpectedEndTag { .. }));
    /// ```
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        let mut reader = Reader::from_str(input);
        reader.config_mut().check_end_names = false;

        let mut stack: Vec<XmlElement> = Vec::new();
        let mut root: Option<XmlElement> = None;
        // Character data seen since the last element boundary.
        let mut text = String::new();

        loop {
            match reader.read_event()? {
                Event::Start(start) => {
                    flush_text(&mut stack, &mut text)?;
                    let element = XmlElement::from_start(&start)?;
                    if stack.is_empty() {
                        ensure_single_root(root.as_ref(), &element)?;
                    }
                    stack.push(element);
                }
                Event::Empty(start) => {
                    flush_text(&mut stack, &mut text)?;
                    let element = XmlElement::from_start(&start)?;
                    attach(&mut stack, &mut root, element)?;
                }
                Event::End(end) => {
                    flush_text(&mut stack, &mut text)?;
                    let found = std::str::from_utf8(end.name().as_ref())?.to_owned();
                    let Some(element) = stack.pop() else {
                        return Err(ParseError::UnmatchedEndTag { found });
                    };
                    if element.name != found {
                        return Err(ParseError::UnexpectedEndTag { expected: element.name, found });
                    }
                    attach(&mut stack, &mut root, element)?;
                }
                Event::Text(chunk) => text.push_str(&chunk.unescape()?),
                Event::CData(data) => {
                    let data = data.into_inner();
                    text.push_str(std::str::from_utf8(&data)?);
                }
                Event::Comment(_) | Event::Decl(_) | Event::PI(_) | Event::DocType(_) => {}
                Event::Eof => {
                    flush_text(&mut stack, &mut text)?;
                    break;
                }
            }
        }

        if let Some(open) = stack.pop() {
            return Err(ParseError::UnclosedElement { name: open.name });
        }
        let root = root.ok_or(ParseError::MissingRoot)?;
        trace!(root = %root.name, "parsed XML document");
        Ok(Self { root })
    }

    /// Returns the root element.
    #[must_use]
    pub fn root(&self) -> &XmlElement {
        &self.root
    }

    /// Renders the document as indented XML.
    ///
    /// ```
    /// # use docassert_core::XmlDocument;
    /// let doc = XmlDocument::parse(r#"<?xml version="1.0"?><a k="v"><b>t</b><c/></a>"#)?;
    /// assert_eq!(doc.to_pretty_string(), "<a k=\"v\">\n  <b>t</b>\n  <c />\n</a>");
    /// # Ok::<(), docassert_core::ParseError>(())
    /// ```
    #[must_use]
    pub fn to_pretty_string(&self) -> String {
        let mut output = String::new();
        self.root.render(&mut output, 0);
        output
    }
}

impl FromStr for XmlDocument {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for XmlDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_pretty_string())
    }
}

impl XmlElement {
    fn from_start(start: &BytesStart<'_>) -> Result<Self, ParseError> {
        let name = std::str::from_utf8(start.name().as_ref())?.to_owned();
        let mut attributes = IndexMap::new();
        for attribute in start.attributes() {
            let attribute = attribute?;
            let key = std::str::from_utf8(attribute.key.as_ref())?.to_owned();
            let value = attribute.unescape_value()?.into_owned();
            attributes.insert(key, value);
        }
        Ok(Self { name, attributes, children: Vec::new() })
    }

    /// Returns the qualified element name as written.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the attribute value for `key`, if present.
    #[must_use]
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// Returns the attributes in source order.
    #[must_use]
    pub fn attributes(&self) -> &IndexMap<String, String> {
        &self.attributes
    }

    /// Returns the child nodes in document order.
    #[must_use]
    pub fn children(&self) -> &[XmlNode] {
        &self.children
    }

    fn render(&self, output: &mut String, depth: usize) {
        let indent = INDENT.repeat(depth);
        output.push_str(&indent);
        output.push('<');
        output.push_str(&self.name);
        for (key, value) in &self.attributes {
            output.push(' ');
            output.push_str(key);
            output.push_str("=\"");
            output.push_str(&escape(value.as_str()));
            output.push('"');
        }

        if self.children.is_empty() {
            output.push_str(" />");
            return;
        }
        output.push('>');

        if let [XmlNode::Text(text)] = self.children.as_slice() {
            output.push_str(&escape(text.as_str()));
        } else {
            for child in &self.children {
                output.push('\n');
                match child {
                    XmlNode::Element(element) => element.render(output, depth + 1),
                    XmlNode::Text(text) => {
                        output.push_str(&INDENT.repeat(depth + 1));
                        output.push_str(&escape(text.as_str()));
                    }
                }
            }
            output.push('\n');
            output.push_str(&indent);
        }

        output.push_str("</");
        output.push_str(&self.name);
        output.push('>');
    }
}

fn ensure_single_root(root: Option<&XmlElement>, next: &XmlElement) -> Result<(), ParseError> {
    match root {
        Some(_) => Err(ParseError::MultipleRoots { name: next.name.clone() }),
        None => Ok(()),
    }
}

fn attach(
    stack: &mut [XmlElement],
    root: &mut Option<XmlElement>,
    element: XmlElement,
) -> Result<(), ParseError> {
    match stack.last_mut() {
        Some(parent) => {
            parent.children.push(XmlNode::Element(element));
            Ok(())
        }
        None => {
            ensure_single_root(root.as_ref(), &element)?;
            *root = Some(element);
            Ok(())
        }
    }
}

fn is_xml_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r')
}

/// Closes the pending text node of the innermost open element.
fn flush_text(stack: &mut [XmlElement], pending: &mut String) -> Result<(), ParseError> {
    let text = pending.trim_matches(is_xml_whitespace);
    if !text.is_empty() {
        let Some(parent) = stack.last_mut() else {
            return Err(ParseError::TextOutsideRoot { text: text.to_owned() });
        };
        parent.children.push(XmlNode::Text(text.to_owned()));
    }
    pending.clear();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &str) -> XmlDocument {
        XmlDocument::parse(input).unwrap()
    }

    #[test]
    fn insignificant_whitespace_and_comments_are_ignored() {
        let compact = parse("<a><b>x</b></a>");
        let spaced = parse("<?xml version=\"1.0\"?>\n<!-- note -->\n<a>\n  <b> x </b>\n</a>\n");
        assert_eq!(compact, spaced);
    }

    #[test]
    fn child_order_matters() {
        assert_ne!(parse("<a><b/><c/></a>"), parse("<a><c/><b/></a>"));
    }

    #[test]
    fn attribute_values_matter() {
        assert_ne!(parse(r#"<a x="1"/>"#), parse(r#"<a x="2"/>"#));
    }

    #[test]
    fn cdata_and_entities_become_text() {
        let doc = parse("<a><![CDATA[1 < 2]]></a>");
        let entity = parse("<a>1 &lt; 2</a>");
        assert_eq!(doc, entity);
        assert_eq!(doc.root().children(), [XmlNode::Text("1 < 2".to_owned())]);
    }

    #[test]
    fn comments_do_not_join_separated_words() {
        let split = parse("<a>x <!-- c --> y</a>");
        assert_ne!(split, parse("<a>xy</a>"));
        assert_eq!(split.root().children(), [XmlNode::Text("x  y".to_owned())]);
    }

    #[test]
    fn text_and_cdata_merge_before_trimming() {
        let doc = parse("<a> left <![CDATA[ mid ]]> right </a>");
        assert_eq!(doc.root().children(), [XmlNode::Text("left  mid  right".to_owned())]);
    }

    #[test]
    fn cdata_and_text_share_the_whitespace_rule() {
        let text = parse("<a>\u{a0}x\u{a0}</a>");
        let cdata = parse("<a><![CDATA[\u{a0}x\u{a0}]]></a>");
        assert_eq!(text, cdata);
        assert_eq!(text.root().children(), [XmlNode::Text("\u{a0}x\u{a0}".to_owned())]);
    }

    #[test]
    fn attributes_are_unescaped() {
        let doc = parse(r#"<a title="&quot;hi&quot; &amp; bye"/>"#);
        assert_eq!(doc.root().attribute("title"), Some("\"hi\" & bye"));
    }

    #[test]
    fn rendering_escapes_and_indents() {
        let doc = parse(r#"<r a="&lt;"><m>x<n/>y</m></r>"#);
        assert_eq!(
            doc.to_pretty_string(),
            "<r a=\"&lt;\">\n  <m>\n    x\n    <n />\n    y\n  </m>\n</r>"
        );
    }

    #[test]
    fn missing_root_is_rejected() {
        let err = XmlDocument::parse("<!-- nothing -->").unwrap_err();
        assert!(matches!(err, ParseError::MissingRoot));
    }

    #[test]
    fn multiple_roots_are_rejected() {
        let err = XmlDocument::parse("<a/><b/>").unwrap_err();
        assert!(matches!(err, ParseError::MultipleRoots { ref name } if name == "b"));
    }

    #[test]
    fn unclosed_elements_are_rejected() {
        let err = XmlDocument::parse("<a><b>").unwrap_err();
        assert!(matches!(err, ParseError::UnclosedElement { .. } | ParseError::Xml(_)), "{err:?}");
    }

    #[test]
    fn stray_end_tags_are_rejected() {
        let err = XmlDocument::parse("<a/></b>").unwrap_err();
        assert!(matches!(err, ParseError::UnmatchedEndTag { .. } | ParseError::Xml(_)), "{err:?}");
    }

    #[test]
    fn text_outside_root_is_rejected() {
        let err = XmlDocument::parse("<a/>tail").unwrap_err();
        assert!(matches!(err, ParseError::TextOutsideRoot { .. }));
    }
}
