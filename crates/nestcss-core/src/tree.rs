//! Style tree model.
//!
//! A [`StyleNode`] maps identifiers to either a literal value (a declaration)
//! or another node (a nested selector scope). Key order is insertion order and
//! drives the order of the generated CSS.

use std::fmt;

use indexmap::IndexMap;
use serde::de::{self, Deserialize, Deserializer, MapAccess, Visitor};

use crate::StyleError;

// ---------------------------------------------------------------------------
// Values
// ---------------------------------------------------------------------------

/// A literal declaration value.
#[derive(Debug, Clone, PartialEq)]
pub enum StyleValue {
    Text(String),
    Number(f64),
}

impl fmt::Display for StyleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StyleValue::Text(text) => f.write_str(text),
            StyleValue::Number(n) => f.write_str(&format_number(*n)),
        }
    }
}

/// Largest magnitude below which every integer is exact in an `f64`.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Format a number the way a browser would: no `.0` on integers, and
/// `Infinity` for infinite values.
pub fn format_number(n: f64) -> String {
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if n.fract() == 0.0 && n.abs() < MAX_EXACT_INTEGER {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}

impl From<&str> for StyleValue {
    fn from(value: &str) -> Self {
        StyleValue::Text(value.to_string())
    }
}

impl From<String> for StyleValue {
    fn from(value: String) -> Self {
        StyleValue::Text(value)
    }
}

impl From<f64> for StyleValue {
    fn from(value: f64) -> Self {
        StyleValue::Number(value)
    }
}

impl From<i32> for StyleValue {
    fn from(value: i32) -> Self {
        StyleValue::Number(f64::from(value))
    }
}

impl From<u32> for StyleValue {
    fn from(value: u32) -> Self {
        StyleValue::Number(f64::from(value))
    }
}

// ---------------------------------------------------------------------------
// Tree
// ---------------------------------------------------------------------------

/// One entry of a [`StyleNode`].
#[derive(Debug, Clone, PartialEq)]
pub enum StyleEntry {
    /// `property: value` at the current selector.
    Value(StyleValue),
    /// A nested selector scope.
    Nested(StyleNode),
}

impl From<StyleValue> for StyleEntry {
    fn from(value: StyleValue) -> Self {
        StyleEntry::Value(value)
    }
}

macro_rules! entry_from_value {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for StyleEntry {
                fn from(value: $ty) -> Self {
                    StyleEntry::Value(value.into())
                }
            }
        )*
    };
}

entry_from_value!(&str, String, f64, i32, u32);

impl From<StyleNode> for StyleEntry {
    fn from(node: StyleNode) -> Self {
        StyleEntry::Nested(node)
    }
}

/// A nested map of style rules.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleNode {
    entries: IndexMap<String, StyleEntry>,
}

impl StyleNode {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: add a declaration.
    pub fn set(mut self, key: impl Into<String>, value: impl Into<StyleValue>) -> Self {
        self.insert(key, StyleEntry::Value(value.into()));
        self
    }

    /// Builder: add a nested scope.
    pub fn nest(mut self, key: impl Into<String>, node: StyleNode) -> Self {
        self.insert(key, StyleEntry::Nested(node));
        self
    }

    /// Insert an entry. Replacing an existing key keeps its original position.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        entry: impl Into<StyleEntry>,
    ) -> Option<StyleEntry> {
        self.entries.insert(key.into(), entry.into())
    }

    pub fn get(&self, key: &str) -> Option<&StyleEntry> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &StyleEntry)> + '_ {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

// ---------------------------------------------------------------------------
// Deserialization
// ---------------------------------------------------------------------------

struct StyleNodeVisitor;

impl<'de> Visitor<'de> for StyleNodeVisitor {
    type Value = StyleNode;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a map of style rules")
    }

    fn visit_map<A>(self, mut map: A) -> Result<StyleNode, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut node = StyleNode::new();
        while let Some((key, entry)) = map.next_entry::<String, StyleEntry>()? {
            node.entries.insert(key, entry);
        }
        Ok(node)
    }
}

impl<'de> Deserialize<'de> for StyleNode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(StyleNodeVisitor)
    }
}

struct StyleEntryVisitor;

impl<'de> Visitor<'de> for StyleEntryVisitor {
    type Value = StyleEntry;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a string, a number, or a nested map of style rules")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<StyleEntry, E> {
        Ok(StyleEntry::Value(StyleValue::Text(v.to_string())))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<StyleEntry, E> {
        Ok(StyleEntry::Value(StyleValue::Text(v)))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<StyleEntry, E> {
        Ok(StyleEntry::Value(StyleValue::Number(v as f64)))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<StyleEntry, E> {
        Ok(StyleEntry::Value(StyleValue::Number(v as f64)))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<StyleEntry, E> {
        Ok(StyleEntry::Value(StyleValue::Number(v)))
    }

    // Unvalidated leaves are written as their string form.
    fn visit_bool<E: de::Error>(self, v: bool) -> Result<StyleEntry, E> {
        Ok(StyleEntry::Value(StyleValue::Text(v.to_string())))
    }

    fn visit_map<A>(self, map: A) -> Result<StyleEntry, A::Error>
    where
        A: MapAccess<'de>,
    {
        StyleNodeVisitor.visit_map(map).map(StyleEntry::Nested)
    }
}

impl<'de> Deserialize<'de> for StyleEntry {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(StyleEntryVisitor)
    }
}

impl TryFrom<serde_json::Value> for StyleNode {
    type Error = StyleError;

    fn try_from(value: serde_json::Value) -> Result<Self, StyleError> {
        if !value.is_object() {
            return Err(StyleError::InvalidInput {
                expected: "a style object",
                received: json_type_name(&value).to_string(),
            });
        }
        StyleNode::deserialize(value).map_err(|e| StyleError::Malformed {
            message: e.to_string(),
        })
    }
}

fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
