//! OpenAPI specification structs for serde deserialization.
//!
//! This module defines the subset of OpenAPI 3.x needed to name accessors,
//! compose request/response type expressions and emit the declarations
//! module. Maps keep document order.

use std::fmt;

use indexmap::IndexMap;
use serde::Deserialize;
use serde::de::{self, Deserializer, Visitor};

use crate::error::Result;

/// Root OpenAPI specification.
#[derive(Debug, Clone, Deserialize)]
pub struct OpenApiSpec {
    /// Version string (`3.0.3`, `3.1.0`).
    pub openapi: Option<String>,
    /// Path templates to their operations, in document order.
    #[serde(default)]
    pub paths: IndexMap<String, PathItem>,
    /// Reusable definitions.
    pub components: Option<Components>,
}

/// Components section containing reusable schemas.
#[derive(Debug, Clone, Deserialize)]
pub struct Components {
    /// Named schemas, referenced as `#/components/schemas/<name>`.
    pub schemas: Option<IndexMap<String, Schema>>,
}

/// A path item containing operations for different HTTP methods.
#[derive(Debug, Clone, Deserialize)]
pub struct PathItem {
    /// GET operation.
    pub get: Option<Operation>,
    /// PUT operation.
    pub put: Option<Operation>,
    /// POST operation.
    pub post: Option<Operation>,
    /// DELETE operation.
    pub delete: Option<Operation>,
    /// OPTIONS operation.
    pub options: Option<Operation>,
    /// HEAD operation.
    pub head: Option<Operation>,
    /// PATCH operation.
    pub patch: Option<Operation>,
    /// TRACE operation.
    pub trace: Option<Operation>,
    /// Path-level parameters shared by all operations.
    pub parameters: Option<Vec<Parameter>>,
}

impl PathItem {
    /// Present operations as `(verb, operation)`, in the order the verbs are
    /// listed by the OpenAPI specification.
    pub fn operations(&self) -> impl Iterator<Item = (&'static str, &Operation)> {
        [
            ("get", self.get.as_ref()),
            ("put", self.put.as_ref()),
            ("post", self.post.as_ref()),
            ("delete", self.delete.as_ref()),
            ("options", self.options.as_ref()),
            ("head", self.head.as_ref()),
            ("patch", self.patch.as_ref()),
            ("trace", self.trace.as_ref()),
        ]
        .into_iter()
        .filter_map(|(verb, op)| op.map(|op| (verb, op)))
    }

    /// Path-level parameters overlaid with the operation's own; the
    /// operation wins when name and location clash.
    pub fn merged_parameters<'a>(&'a self, op: &'a Operation) -> Vec<&'a Parameter> {
        let mut merged: Vec<&Parameter> = self.parameters.iter().flatten().collect();
        for param in op.parameters.iter().flatten() {
            merged.retain(|p| !(p.name == param.name && p.location == param.location));
            merged.push(param);
        }
        merged
    }
}

/// An API operation (endpoint).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    /// Unique name, used for accessor and declaration names.
    pub operation_id: Option<String>,
    /// Operation-level parameters.
    pub parameters: Option<Vec<Parameter>>,
    /// Request body, if any.
    pub request_body: Option<RequestBody>,
    /// Responses keyed by status code.
    #[serde(default)]
    pub responses: IndexMap<StatusCode, Response>,
}

/// A parameter (query, path, header or cookie).
#[derive(Debug, Clone, Deserialize)]
pub struct Parameter {
    /// Parameter name.
    pub name: String,
    /// `query`, `path`, `header` or `cookie`.
    #[serde(rename = "in")]
    pub location: String,
    /// Must be supplied.
    #[serde(default)]
    pub required: bool,
    /// Value schema.
    pub schema: Option<Schema>,
}

/// A request body definition.
#[derive(Debug, Clone, Deserialize)]
pub struct RequestBody {
    /// Must be supplied.
    #[serde(default)]
    pub required: bool,
    /// Media types to schemas.
    pub content: Option<IndexMap<String, MediaType>>,
}

/// A response definition.
#[derive(Debug, Clone, Deserialize)]
pub struct Response {
    /// Media types to schemas.
    pub content: Option<IndexMap<String, MediaType>>,
}

impl Response {
    /// Has at least one media type.
    pub fn has_content(&self) -> bool {
        self.content.as_ref().is_some_and(|c| !c.is_empty())
    }
}

/// Media type content (e.g., application/json).
#[derive(Debug, Clone, Deserialize)]
pub struct MediaType {
    /// Payload schema.
    pub schema: Option<Schema>,
}

/// Response key: a status code or `default`.
///
/// YAML documents write status codes as bare integers, so both integer and
/// string keys are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StatusCode(pub String);

impl StatusCode {
    /// Key text as written.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for StatusCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct StatusVisitor;

        impl Visitor<'_> for StatusVisitor {
            type Value = StatusCode;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a status code or `default`")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<StatusCode, E> {
                Ok(StatusCode(v.to_string()))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<StatusCode, E> {
                Ok(StatusCode(v.to_string()))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<StatusCode, E> {
                Ok(StatusCode(v.to_string()))
            }
        }

        deserializer.deserialize_any(StatusVisitor)
    }
}

/// JSON Schema definition used in OpenAPI.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schema {
    /// The type of the schema (string, number, integer, boolean, object, array).
    #[serde(rename = "type")]
    pub schema_type: Option<SchemaType>,

    /// Reference to another schema.
    #[serde(rename = "$ref")]
    pub ref_path: Option<String>,

    /// Properties for object types, in document order.
    pub properties: Option<IndexMap<String, Schema>>,

    /// Required property names for object types.
    pub required: Option<Vec<String>>,

    /// Item schema for array types.
    pub items: Option<Box<Schema>>,

    /// Enum values.
    #[serde(rename = "enum")]
    pub enum_values: Option<Vec<serde_json::Value>>,

    /// Union type (any of these schemas).
    pub any_of: Option<Vec<Schema>>,

    /// Union type (exactly one of these schemas).
    pub one_of: Option<Vec<Schema>>,

    /// Intersection type (all of these schemas combined).
    pub all_of: Option<Vec<Schema>>,

    /// Additional properties for object types (for Record/dict types).
    pub additional_properties: Option<AdditionalProperties>,

    /// Constant value - schema matches only this exact value.
    #[serde(rename = "const")]
    pub const_value: Option<serde_json::Value>,

    /// OpenAPI 3.0 nullable flag (3.1 uses type arrays instead).
    pub nullable: Option<bool>,
}

/// Schema type can be a single type or an array of types (for nullable).
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SchemaType {
    /// `type: string`
    Single(String),
    /// `type: [string, "null"]`
    Multiple(Vec<String>),
}

/// Additional properties can be a boolean or a schema.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum AdditionalProperties {
    /// `true` (open) or `false` (closed).
    Bool(bool),
    /// Value schema of the extra properties.
    Schema(Box<Schema>),
}

impl OpenApiSpec {
    /// Parse an OpenAPI document from YAML text.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Parse an OpenAPI document from JSON text.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Build from an already decoded JSON value.
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }

    /// Component schemas, empty when the document has none.
    pub fn schemas(&self) -> impl Iterator<Item = (&String, &Schema)> {
        self.components
            .iter()
            .filter_map(|c| c.schemas.as_ref())
            .flatten()
    }
}

impl Schema {
    /// Check if this schema is nullable (nullable flag or `null` in a type array).
    pub fn is_nullable(&self) -> bool {
        if self.nullable == Some(true) {
            return true;
        }
        match &self.schema_type {
            Some(SchemaType::Multiple(types)) => types.iter().any(|t| t == "null"),
            _ => false,
        }
    }
}
