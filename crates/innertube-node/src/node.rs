use indexmap::IndexMap;
use serde_json::Value;

use crate::array::NodeArray;
use crate::store::NodeId;
use crate::text::Text;
use crate::thumbnail::Thumbnails;

/// A typed node produced by a registered constructor.
///
/// The tag equals the sanitized class name of the wrapper the node was
/// parsed from. Fields are typed-key projections of the raw body, in
/// constructor insertion order.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    tag: String,
    fields: IndexMap<String, FieldValue>,
}

/// A typed field of a [`Node`].
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Text(Text),
    Thumbnails(Thumbnails),
    /// A nested parsed wrapper.
    Node(NodeId),
    /// A list of nested parsed wrappers.
    Nodes(NodeArray),
    /// A plain list of field values.
    List(Vec<FieldValue>),
    /// Untyped passthrough for shapes the constructor does not model.
    Raw(Value),
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("cannot cast `{actual}` to one of [{}]", expected.join(", "))]
pub struct CastError {
    pub actual: String,
    pub expected: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("node `{tag}` has no key `{key}`")]
pub struct KeyError {
    pub tag: String,
    pub key: String,
}

impl Node {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            fields: IndexMap::new(),
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Identity check against one or more type tags.
    pub fn is(&self, tags: &[&str]) -> bool {
        tags.iter().any(|t| *t == self.tag)
    }

    /// Cast-or-fail to a type tag set. Returns the node itself on success.
    pub fn cast(&self, tags: &[&str]) -> Result<&Node, CastError> {
        if self.is(tags) {
            Ok(self)
        } else {
            Err(CastError {
                actual: self.tag.clone(),
                expected: tags.iter().map(|t| (*t).to_string()).collect(),
            })
        }
    }

    pub fn has_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// Fetch-or-fail for a dynamic key.
    pub fn key(&self, key: &str) -> Result<&FieldValue, KeyError> {
        self.fields.get(key).ok_or_else(|| KeyError {
            tag: self.tag.clone(),
            key: key.to_string(),
        })
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut FieldValue> {
        self.fields.get_mut(key)
    }

    /// Insert or replace a field.
    pub fn set(&mut self, key: impl Into<String>, value: FieldValue) {
        self.fields.insert(key.into(), value);
    }

    /// Insert a field only when the value is present.
    pub fn set_opt(&mut self, key: impl Into<String>, value: Option<FieldValue>) {
        if let Some(value) = value {
            self.fields.insert(key.into(), value);
        }
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl FieldValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            FieldValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            FieldValue::Float(f) => Some(*f),
            FieldValue::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// String view of `Str` and `Text` fields.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Str(s) => Some(s),
            FieldValue::Text(t) => Some(t.as_str()),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&Text> {
        match self {
            FieldValue::Text(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_thumbnails(&self) -> Option<&Thumbnails> {
        match self {
            FieldValue::Thumbnails(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_node(&self) -> Option<NodeId> {
        match self {
            FieldValue::Node(id) => Some(*id),
            _ => None,
        }
    }

    pub fn as_nodes(&self) -> Option<&NodeArray> {
        match self {
            FieldValue::Nodes(array) => Some(array),
            _ => None,
        }
    }

    pub fn as_raw(&self) -> Option<&Value> {
        match self {
            FieldValue::Raw(value) => Some(value),
            _ => None,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Str(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Str(s)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

impl From<i64> for FieldValue {
    fn from(i: i64) -> Self {
        FieldValue::Int(i)
    }
}
