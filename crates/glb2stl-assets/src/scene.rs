//! Read-only tree view of the JSON chunk
//!
//! Lookups go through [`Node`], which remembers the path it was reached by so
//! a missing key is reported as e.g. `accessors[2].bufferView`.

use std::collections::BTreeMap;

use serde_json::{Number, Value};

use crate::error::ConvertError;

/// A JSON value from the scene description.
#[derive(Debug, Clone, PartialEq)]
pub enum SceneValue {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Array(Vec<SceneValue>),
    Object(BTreeMap<String, SceneValue>),
}

impl SceneValue {
    fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Number(_) => "number",
            Self::String(_) => "string",
            Self::Array(_) => "array",
            Self::Object(_) => "object",
        }
    }
}

impl From<Value> for SceneValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(b),
            Value::Number(n) => Self::Number(n),
            Value::String(s) => Self::String(s),
            Value::Array(items) => Self::Array(items.into_iter().map(Self::from).collect()),
            Value::Object(map) => {
                Self::Object(map.into_iter().map(|(k, v)| (k, Self::from(v))).collect())
            }
        }
    }
}

/// The parsed JSON chunk of a container.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneDescriptor {
    root: SceneValue,
}

impl SceneDescriptor {
    /// Parse the JSON chunk bytes.
    pub fn parse(json: &[u8]) -> Result<Self, ConvertError> {
        let value: Value = serde_json::from_slice(json)
            .map_err(|e| ConvertError::Format(format!("malformed JSON chunk: {e}")))?;
        Ok(Self { root: value.into() })
    }

    /// The document root.
    pub fn root(&self) -> Node<'_> {
        Node {
            value: &self.root,
            path: String::new(),
        }
    }

    /// Number of entries in the top-level `meshes` array, zero if absent.
    pub fn mesh_count(&self) -> usize {
        match self.root().field("meshes").map(|n| n.value) {
            Ok(SceneValue::Array(items)) => items.len(),
            _ => 0,
        }
    }
}

/// A position in the scene tree.
#[derive(Debug, Clone)]
pub struct Node<'a> {
    value: &'a SceneValue,
    path: String,
}

impl<'a> Node<'a> {
    pub fn value(&self) -> &'a SceneValue {
        self.value
    }

    pub fn path(&self) -> &str {
        if self.path.is_empty() {
            "<root>"
        } else {
            &self.path
        }
    }

    /// Look up a required object key.
    pub fn field(&self, key: &str) -> Result<Node<'a>, ConvertError> {
        self.optional_field(key)?
            .ok_or_else(|| ConvertError::Schema(format!("missing `{}`", self.child_path(key))))
    }

    /// Look up an object key that may be absent.
    pub fn optional_field(&self, key: &str) -> Result<Option<Node<'a>>, ConvertError> {
        let SceneValue::Object(map) = self.value else {
            return Err(self.type_error("object"));
        };
        Ok(map.get(key).map(|value| Node {
            value,
            path: self.child_path(key),
        }))
    }

    /// Look up a required array element.
    pub fn index(&self, i: usize) -> Result<Node<'a>, ConvertError> {
        let SceneValue::Array(items) = self.value else {
            return Err(self.type_error("array"));
        };
        let path = format!("{}[{}]", self.path, i);
        items
            .get(i)
            .map(|value| Node {
                value,
                path: path.clone(),
            })
            .ok_or_else(|| {
                ConvertError::Schema(format!("missing `{}` (array has {} entries)", path, items.len()))
            })
    }

    /// Interpret this node as a non-negative integer index or count.
    pub fn as_usize(&self) -> Result<usize, ConvertError> {
        match self.value {
            SceneValue::Number(n) => n
                .as_u64()
                .and_then(|n| usize::try_from(n).ok())
                .ok_or_else(|| {
                    ConvertError::Schema(format!(
                        "`{}` must be a non-negative integer, found {}",
                        self.path(),
                        n
                    ))
                }),
            _ => Err(self.type_error("non-negative integer")),
        }
    }

    /// Follow this node as an index into the top-level array `collection`.
    pub fn resolve(&self, root: &Node<'a>, collection: &str) -> Result<Node<'a>, ConvertError> {
        let i = self.as_usize()?;
        root.field(collection)?.index(i)
    }

    fn child_path(&self, key: &str) -> String {
        if self.path.is_empty() {
            key.to_string()
        } else {
            format!("{}.{}", self.path, key)
        }
    }

    fn type_error(&self, expected: &str) -> ConvertError {
        ConvertError::Schema(format!(
            "`{}` must be {}, found {}",
            self.path(),
            expected,
            self.value.kind()
        ))
    }
}
