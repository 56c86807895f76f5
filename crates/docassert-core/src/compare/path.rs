use std::fmt::{self, Write as _};

/// Represents a single step from a container into one of its children.
///
/// ```
/// # use docassert_core::PathSegment;
/// let key = PathSegment::key("name");
/// let index = PathSegment::index(2);
/// assert!(matches!(key, PathSegment::Key(_)));
/// assert!(matches!(index, PathSegment::Index(2)));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// Object key lookup.
    Key(String),
    /// Array index lookup.
    Index(usize),
}

impl PathSegment {
    /// Creates a key segment.
    #[must_use]
    pub fn key<S>(value: S) -> Self
    where
        S: Into<String>,
    {
        Self::Key(value.into())
    }

    /// Creates an index segment.
    #[must_use]
    pub fn index(value: usize) -> Self {
        Self::Index(value)
    }
}

/// Characters that force a key into the bracketed, quoted form.
const SPECIAL_KEY_CHARS: [char; 18] = [
    '.', ' ', '\'', '/', '"', '[', ']', '(', ')', '\t', '\n', '\r', '\x0c', '\x08', '\\',
    '\u{85}', '\u{2028}', '\u{2029}',
];

fn needs_quoting(key: &str) -> bool {
    key.is_empty() || key.contains(SPECIAL_KEY_CHARS) || key.chars().any(char::is_control)
}

fn write_quoted_key(f: &mut fmt::Formatter<'_>, key: &str) -> fmt::Result {
    f.write_str("['")?;
    for ch in key.chars() {
        match ch {
            '\'' => f.write_str("\\'")?,
            '\\' => f.write_str("\\\\")?,
            '\t' => f.write_str("\\t")?,
            '\n' => f.write_str("\\n")?,
            '\r' => f.write_str("\\r")?,
            '\x0c' => f.write_str("\\f")?,
            '\x08' => f.write_str("\\b")?,
            c if c.is_control() || matches!(c, '\u{2028}' | '\u{2029}') => {
                write!(f, "\\u{:04x}", u32::from(c))?;
            }
            c => f.write_char(c)?,
        }
    }
    f.write_str("']")
}

/// Location of a node within the root document, used only for diagnostics.
///
/// Paths render as dotted keys and bracketed indices; the root renders as
/// an empty string. Keys containing separators are quoted.
///
/// ```
/// # use docassert_core::{Path, PathSegment};
/// let path = Path::new()
///     .with_segment(PathSegment::key("items"))
///     .with_segment(PathSegment::index(2))
///     .with_segment(PathSegment::key("name"));
/// assert_eq!(path.to_string(), "items[2].name");
///
/// let odd = Path::from(PathSegment::key("a.b"));
/// assert_eq!(odd.to_string(), "['a.b']");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Path(Vec<PathSegment>);

impl Path {
    /// Creates an empty path.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a new segment, returning the extended path.
    #[must_use]
    pub fn with_segment(mut self, segment: PathSegment) -> Self {
        self.0.push(segment);
        self
    }

    /// Returns a child path for an object key.
    #[must_use]
    pub fn key<S>(&self, key: S) -> Self
    where
        S: Into<String>,
    {
        self.clone().with_segment(PathSegment::key(key))
    }

    /// Returns a child path for an array index.
    #[must_use]
    pub fn index(&self, index: usize) -> Self {
        self.clone().with_segment(PathSegment::index(index))
    }

    /// Returns the underlying segments.
    #[must_use]
    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    /// Returns the number of segments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Indicates whether the path has no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Indicates whether the path points at the document root.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.is_empty()
    }

    /// Returns the parent path, or `None` at the root.
    ///
    /// ```
    /// # use docassert_core::{Path, PathSegment};
    /// let path = Path::from(PathSegment::index(1));
    /// assert!(path.parent().unwrap().is_root());
    /// assert!(Path::new().parent().is_none());
    /// ```
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        let (_, rest) = self.0.split_last()?;
        Some(Self(rest.to_vec()))
    }
}

impl From<Vec<PathSegment>> for Path {
    fn from(value: Vec<PathSegment>) -> Self {
        Self(value)
    }
}

impl From<PathSegment> for Path {
    fn from(value: PathSegment) -> Self {
        Self(vec![value])
    }
}

impl FromIterator<PathSegment> for Path {
    fn from_iter<I: IntoIterator<Item = PathSegment>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, segment) in self.0.iter().enumerate() {
            match segment {
                PathSegment::Index(index) => write!(f, "[{index}]")?,
                PathSegment::Key(key) if needs_quoting(key) => write_quoted_key(f, key)?,
                PathSegment::Key(key) => {
                    if idx > 0 {
                        f.write_str(".")?;
                    }
                    f.write_str(key)?;
                }
            }
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a PathSegment;
    type IntoIter = std::slice::Iter<'a, PathSegment>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_renders_empty() {
        assert_eq!(Path::new().to_string(), "");
    }

    #[test]
    fn leading_index_has_no_dot() {
        let path = Path::new().index(0).key("id");
        assert_eq!(path.to_string(), "[0].id");
    }

    #[test]
    fn nested_arrays_chain_brackets() {
        let path = Path::new().key("grid").index(1).index(3);
        assert_eq!(path.to_string(), "grid[1][3]");
    }

    #[test]
    fn quoted_keys_escape_single_quotes() {
        let path = Path::new().key("root").key("it's here");
        assert_eq!(path.to_string(), "root['it\\'s here']");
    }

    #[test]
    fn empty_keys_are_quoted() {
        assert_eq!(Path::new().key("").to_string(), "['']");
        assert_eq!(Path::new().key("").key("a").to_string(), "[''].a");
        assert_eq!(Path::new().key("a").key("").index(0).to_string(), "a[''][0]");
    }

    #[test]
    fn separator_and_escape_characters_are_quoted() {
        let cases = [
            ("a/b", "['a/b']"),
            ("say \"hi\"", "['say \"hi\"']"),
            ("back\\slash", "['back\\\\slash']"),
            ("tab\there", "['tab\\there']"),
            ("line\nbreak", "['line\\nbreak']"),
            ("feed\x0c", "['feed\\f']"),
            ("bell\x07", "['bell\\u0007']"),
        ];
        for (key, rendered) in cases {
            assert_eq!(Path::new().key(key).to_string(), rendered, "{key:?}");
        }
    }

    #[test]
    fn collects_from_segments() {
        let path: Path = [PathSegment::key("a"), PathSegment::index(4)].into_iter().collect();
        assert_eq!(path.len(), 2);
        assert_eq!(path.to_string(), "a[4]");
    }
}
