//! Type-schema nodes: the recursive data-shape description of the
//! hand-written schema documents.
//!
//! A node is parsed from a JSON value:
//!
//! - a string is a type name, emitted verbatim (`"string"`, `"number | null"`);
//! - an object maps field names to nodes; a trailing `!` on a key makes the
//!   field required;
//! - a list wraps its first element, which becomes an array type.
//!
//! The `!` marker is consumed here and only survives as [`Field::required`].

use serde_json::Value;

use crate::error::{Error, Result};
use crate::ir::emit::Emit;
use crate::ir::types::{TsPrimitive, TsProp, TsType};

/// Suffix marking a field (or request sub-shape) as required.
pub const REQUIRED_MARKER: char = '!';

/// Split a source key into its bare name and whether it carried the marker.
///
/// ```
/// use querygen_core::schema::node::split_marker;
///
/// assert_eq!(split_marker("id!"), ("id", true));
/// assert_eq!(split_marker("age"), ("age", false));
/// ```
pub fn split_marker(key: &str) -> (&str, bool) {
    match key.strip_suffix(REQUIRED_MARKER) {
        Some(name) => (name, true),
        None => (key, false),
    }
}

/// A node of the type-schema tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaNode {
    /// Opaque type name.
    Primitive(String),
    /// Ordered fields, in source order.
    Object(Vec<Field>),
    /// Array of the wrapped node.
    Array(Box<SchemaNode>),
}

/// One field of an object node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// Field name without the required marker.
    pub name: String,
    /// The source key carried the required marker.
    pub required: bool,
    /// Field type.
    pub node: SchemaNode,
}

impl SchemaNode {
    /// Parse a node from a JSON value.
    ///
    /// Returns `Ok(None)` for the no-data markers (`null` and `[]`). Inside
    /// an object such a value becomes the `undefined` type instead. `location`
    /// is the dotted path used in error messages.
    pub fn from_value(value: &Value, location: &str) -> Result<Option<Self>> {
        match value {
            Value::Null => Ok(None),
            Value::String(name) => {
                let name = name.trim();
                if name.is_empty() {
                    return Err(Error::InvalidSchema {
                        location: location.to_string(),
                        reason: "empty type name".to_string(),
                    });
                }
                Ok(Some(SchemaNode::Primitive(name.to_string())))
            }
            Value::Object(map) => {
                let mut fields = Vec::with_capacity(map.len());
                for (key, child) in map {
                    let (name, required) = split_marker(key);
                    let child_location = format!("{location}.{name}");
                    let node = SchemaNode::from_value(child, &child_location)?
                        .unwrap_or_else(|| SchemaNode::Primitive("undefined".to_string()));
                    fields.push(Field {
                        name: name.to_string(),
                        required,
                        node,
                    });
                }
                Ok(Some(SchemaNode::Object(fields)))
            }
            // Only the first element describes the item type.
            Value::Array(items) => match items.first() {
                Some(first) => Ok(SchemaNode::from_value(first, &format!("{location}[0]"))?
                    .map(|node| SchemaNode::Array(Box::new(node)))),
                None => Ok(None),
            },
            Value::Bool(_) | Value::Number(_) => Err(Error::InvalidSchema {
                location: location.to_string(),
                reason: format!("expected a type name, object or list, found `{value}`"),
            }),
        }
    }

    /// Convert to the TypeScript type AST.
    pub fn to_ts_type(&self) -> TsType {
        match self {
            SchemaNode::Primitive(name) if name == "undefined" => {
                TsType::Primitive(TsPrimitive::Undefined)
            }
            SchemaNode::Primitive(name) => TsType::Ref(name.clone()),
            SchemaNode::Object(fields) => TsType::Object(
                fields
                    .iter()
                    .map(|field| {
                        if field.required {
                            TsProp::required(&field.name, field.node.to_ts_type())
                        } else {
                            TsProp::optional(&field.name, field.node.to_ts_type())
                        }
                    })
                    .collect(),
            ),
            SchemaNode::Array(inner) => inner.to_ts_type().array_of(),
        }
    }

    /// True for object nodes, which are declared as interfaces.
    pub fn is_object(&self) -> bool {
        matches!(self, SchemaNode::Object(_))
    }
}

/// Render a node as a TypeScript type fragment.
pub fn synthesize(node: &SchemaNode) -> String {
    node.to_ts_type().emit()
}
