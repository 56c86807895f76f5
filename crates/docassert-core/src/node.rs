use std::fmt;

use indexmap::IndexMap;
use serde::de::{self, Deserializer, EnumAccess, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::{Mismatch, Number, ParseError};

/// The document model compared by the semantic comparator.
///
/// Objects keep the insertion order of their keys for iteration and
/// rendering, while equality between two objects ignores key order.
///
/// ```
/// # use docassert_core::Node;
/// let lhs = Node::from_json_str(r#"{"a":1,"b":2}"#)?;
/// let rhs = Node::from_json_str(r#"{"b":2,"a":1}"#)?;
/// assert_eq!(lhs, rhs);
/// # Ok::<(), docassert_core::ParseError>(())
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    /// JSON `null`.
    Null,
    /// JSON boolean.
    Bool(bool),
    /// JSON number.
    Number(Number),
    /// JSON string.
    String(String),
    /// JSON array.
    Array(Vec<Node>),
    /// JSON object in insertion order.
    Object(IndexMap<String, Node>),
}

/// Logical type tag of a [`Node`].
///
/// Two nodes can only be semantically equal when their kinds match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    /// An object node.
    Object,
    /// An array node.
    Array,
    /// An integral number.
    Integer,
    /// A floating-point number.
    Float,
    /// A string.
    String,
    /// A boolean.
    Boolean,
    /// `null`.
    Null,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Object => "Object",
            Self::Array => "Array",
            Self::Integer => "Integer",
            Self::Float => "Float",
            Self::String => "String",
            Self::Boolean => "Boolean",
            Self::Null => "Null",
        };
        f.write_str(name)
    }
}

impl Node {
    /// Parses a JSON string into a document tree.
    ///
    /// ```
    /// # use docassert_core::Node;
    /// let node = Node::from_json_str("{\"hello\":\"world\"}")?;
    /// assert!(matches!(node, Node::Object(_)));
    /// # Ok::<(), docassert_core::ParseError>(())
    /// ```
    pub fn from_json_str(input: &str) -> Result<Self, ParseError> {
        let value: JsonValue = serde_json::from_str(input)?;
        Self::from_json_value(value)
    }

    /// Parses a YAML string into a document tree.
    ///
    /// ```
    /// # use docassert_core::Node;
    /// let node = Node::from_yaml_str("---\nanswer: 42\n")?;
    /// assert!(matches!(node, Node::Object(_)));
    /// # Ok::<(), docassert_core::ParseError>(())
    /// ```
    pub fn from_yaml_str(input: &str) -> Result<Self, ParseError> {
        let YamlNode(node) = serde_yaml::from_str(input)?;
        Ok(node)
    }

    /// Converts a serde JSON value into a [`Node`].
    pub fn from_json_value(value: JsonValue) -> Result<Self, ParseError> {
        match value {
            JsonValue::Null => Ok(Self::Null),
            JsonValue::Bool(v) => Ok(Self::Bool(v)),
            JsonValue::Number(num) => Ok(Self::Number(Number::from_json_number(&num)?)),
            JsonValue::String(s) => Ok(Self::String(s)),
            JsonValue::Array(values) => {
                let mut items = Vec::with_capacity(values.len());
                for value in values {
                    items.push(Self::from_json_value(value)?);
                }
                Ok(Self::Array(items))
            }
            JsonValue::Object(map) => {
                let mut object = IndexMap::with_capacity(map.len());
                for (key, value) in map {
                    object.insert(key, Self::from_json_value(value)?);
                }
                Ok(Self::Object(object))
            }
        }
    }

    /// Returns the logical type tag of the node.
    ///
    /// ```
    /// # use docassert_core::{Node, NodeKind};
    /// assert_eq!(Node::from_json_str("1")?.kind(), NodeKind::Integer);
    /// assert_eq!(Node::from_json_str("1.5")?.kind(), NodeKind::Float);
    /// # Ok::<(), docassert_core::ParseError>(())
    /// ```
    #[must_use]
    pub fn kind(&self) -> NodeKind {
        match self {
            Self::Null => NodeKind::Null,
            Self::Bool(_) => NodeKind::Boolean,
            Self::Number(n) if n.is_integer() => NodeKind::Integer,
            Self::Number(_) => NodeKind::Float,
            Self::String(_) => NodeKind::String,
            Self::Array(_) => NodeKind::Array,
            Self::Object(_) => NodeKind::Object,
        }
    }

    /// Converts the node into a serde JSON value, keeping object key order.
    #[must_use]
    pub fn to_json_value(&self) -> JsonValue {
        match self {
            Self::Null => JsonValue::Null,
            Self::Bool(v) => JsonValue::Bool(*v),
            Self::Number(n) => JsonValue::Number(n.to_json_number()),
            Self::String(s) => JsonValue::String(s.clone()),
            Self::Array(values) => JsonValue::Array(values.iter().map(Self::to_json_value).collect()),
            Self::Object(map) => {
                let mut object = serde_json::Map::with_capacity(map.len());
                for (key, value) in map {
                    object.insert(key.clone(), value.to_json_value());
                }
                JsonValue::Object(object)
            }
        }
    }

    /// Renders the node as indented JSON text.
    ///
    /// ```
    /// # use docassert_core::Node;
    /// let node = Node::from_json_str(r#"{"b":[1],"a":null}"#)?;
    /// assert_eq!(node.to_pretty_string(), "{\n  \"b\": [\n    1\n  ],\n  \"a\": null\n}");
    /// # Ok::<(), docassert_core::ParseError>(())
    /// ```
    #[must_use]
    pub fn to_pretty_string(&self) -> String {
        // Serializing a `serde_json::Value` into a `String` cannot fail.
        serde_json::to_string_pretty(&self.to_json_value()).unwrap_or_default()
    }

    /// Renders the node as compact JSON text.
    #[must_use]
    pub fn to_compact_string(&self) -> String {
        self.to_json_value().to_string()
    }

    /// Compares this node, taken as the expected document, with `actual`.
    ///
    /// ```
    /// # use docassert_core::{MismatchKind, Node};
    /// let expected = Node::from_json_str("[1,2]")?;
    /// let actual = Node::from_json_str("[2,1]")?;
    /// let mismatch = expected.compare(&actual).unwrap_err();
    /// assert_eq!(mismatch.kind(), MismatchKind::ValueMismatch);
    /// assert_eq!(mismatch.path().to_string(), "[0]");
    /// # Ok::<(), docassert_core::ParseError>(())
    /// ```
    pub fn compare(&self, actual: &Self) -> Result<(), Mismatch> {
        crate::compare::compare(self, actual)
    }
}

impl TryFrom<JsonValue> for Node {
    type Error = ParseError;

    fn try_from(value: JsonValue) -> Result<Self, Self::Error> {
        Self::from_json_value(value)
    }
}

/// Reads YAML straight into a [`Node`] so integers of any width the YAML
/// parser recognizes keep their exact value.
struct YamlNode(Node);

impl<'de> Deserialize<'de> for YamlNode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(YamlNodeVisitor).map(YamlNode)
    }
}

struct YamlNodeVisitor;

impl<'de> Visitor<'de> for YamlNodeVisitor {
    type Value = Node;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a YAML scalar, sequence or mapping")
    }

    fn visit_bool<E>(self, v: bool) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(Node::Bool(v))
    }

    fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(Node::Number(Number::integer(v)))
    }

    fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(Node::Number(Number::integer(v)))
    }

    fn visit_i128<E>(self, v: i128) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(Node::Number(Number::integer(v)))
    }

    fn visit_u128<E>(self, v: u128) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        match i128::try_from(v) {
            Ok(value) => Ok(Node::Number(Number::integer(value))),
            Err(_) => Ok(Node::Number(Number::BigInteger(v.to_string()))),
        }
    }

    fn visit_f64<E>(self, v: f64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Number::float(v).map(Node::Number).map_err(E::custom)
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(Node::String(v.to_owned()))
    }

    fn visit_string<E>(self, v: String) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(Node::String(v))
    }

    fn visit_unit<E>(self) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(Node::Null)
    }

    fn visit_none<E>(self) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(Node::Null)
    }

    fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(self)
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or_default());
        while let Some(YamlNode(item)) = seq.next_element()? {
            items.push(item);
        }
        Ok(Node::Array(items))
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut object = IndexMap::with_capacity(map.size_hint().unwrap_or_default());
        while let Some(YamlKey(key)) = map.next_key()? {
            let YamlNode(value) = map.next_value()?;
            if object.contains_key(&key) {
                return Err(de::Error::custom(format_args!("duplicate mapping key {key:?}")));
            }
            object.insert(key, value);
        }
        Ok(Node::Object(object))
    }

    fn visit_enum<A>(self, data: A) -> Result<Self::Value, A::Error>
    where
        A: EnumAccess<'de>,
    {
        let (tag, _) = data.variant::<String>()?;
        Err(de::Error::custom(format_args!("unsupported YAML tag !{tag}")))
    }
}

/// Mapping keys must be strings.
struct YamlKey(String);

impl<'de> Deserialize<'de> for YamlKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct KeyVisitor;

        impl<'de> Visitor<'de> for KeyVisitor {
            type Value = String;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a string mapping key")
            }

            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(v.to_owned())
            }

            fn visit_string<E>(self, v: String) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(v)
            }
        }

        deserializer.deserialize_any(KeyVisitor).map(YamlKey)
    }
}
