//! Hand-written schema documents and their normalization.
//!
//! Two layouts are accepted:
//!
//! - **flat**: a JSON array of operations; the path sub-shape is keyed
//!   `params`;
//! - **split**: a JSON object with an `operations` (or `apis`) array and an
//!   optional `types` dictionary; the path sub-shape is keyed `path`.
//!
//! An operation looks like
//!
//! ```json
//! {
//!   "name": "getUser",
//!   "method": "get",
//!   "url": "/users/:id",
//!   "request": { "params!": { "id!": "string" }, "query": { "expand": "boolean" } },
//!   "response": { "data!": { "id!": "string", "name": "string" } }
//! }
//! ```

use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::ir::api::{
    NamedType, NormalizedApi, OperationDescriptor, RequestShape, RequestSlots, ResponseShape,
    SubShape,
};

use super::node::{REQUIRED_MARKER, SchemaNode};

/// Anything that can be turned into a [`NormalizedApi`].
pub trait DescriptorSource {
    /// Normalize into operation descriptors and named types.
    fn normalize(&self) -> Result<NormalizedApi>;
}

/// One operation as written in the document.
#[derive(Debug, Clone, Deserialize)]
struct RawOperation {
    name: String,
    #[serde(default)]
    method: Option<String>,
    url: String,
    #[serde(default)]
    request: Option<Map<String, Value>>,
    #[serde(default)]
    response: Option<Value>,
}

#[derive(Debug, Clone, Deserialize)]
struct RawSplitDocument {
    #[serde(alias = "apis", default)]
    operations: Vec<RawOperation>,
    #[serde(default)]
    types: IndexMap<String, Value>,
}

/// Flat list layout: `[operation, ...]`.
#[derive(Debug, Clone)]
pub struct FlatDocument {
    operations: Vec<RawOperation>,
}

impl FlatDocument {
    /// Request member holding URL placeholder values.
    pub const PATH_KEY: &'static str = "params";

    /// Parse from an already decoded JSON value.
    pub fn from_value(value: Value) -> Result<Self> {
        Ok(Self {
            operations: serde_json::from_value(value)?,
        })
    }

    /// Parse from JSON text.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(Self {
            operations: serde_json::from_str(json)?,
        })
    }
}

impl DescriptorSource for FlatDocument {
    fn normalize(&self) -> Result<NormalizedApi> {
        let api = NormalizedApi {
            types: Vec::new(),
            operations: normalize_operations(&self.operations, Self::PATH_KEY)?,
            path_key: Self::PATH_KEY,
            declarations: None,
        };
        api.validate()?;
        Ok(api)
    }
}

/// Split layout: `{ "operations": [...], "types": {...} }`.
#[derive(Debug, Clone)]
pub struct SplitDocument {
    raw: RawSplitDocument,
}

impl SplitDocument {
    /// Request member holding URL placeholder values.
    pub const PATH_KEY: &'static str = "path";

    /// Parse from an already decoded JSON value.
    pub fn from_value(value: Value) -> Result<Self> {
        Ok(Self {
            raw: serde_json::from_value(value)?,
        })
    }

    /// Parse from JSON text.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(Self {
            raw: serde_json::from_str(json)?,
        })
    }
}

impl DescriptorSource for SplitDocument {
    fn normalize(&self) -> Result<NormalizedApi> {
        let mut types = Vec::with_capacity(self.raw.types.len());
        for (name, value) in &self.raw.types {
            let location = format!("types.{name}");
            let node = SchemaNode::from_value(value, &location)?.ok_or_else(|| {
                Error::InvalidSchema {
                    location,
                    reason: "named type has no definition".to_string(),
                }
            })?;
            types.push(NamedType {
                name: name.clone(),
                node,
            });
        }

        let api = NormalizedApi {
            types,
            operations: normalize_operations(&self.raw.operations, Self::PATH_KEY)?,
            path_key: Self::PATH_KEY,
            declarations: None,
        };
        api.validate()?;
        Ok(api)
    }
}

fn normalize_operations(raw: &[RawOperation], path_key: &str) -> Result<Vec<OperationDescriptor>> {
    raw.iter().map(|op| normalize_operation(op, path_key)).collect()
}

fn normalize_operation(raw: &RawOperation, path_key: &str) -> Result<OperationDescriptor> {
    if raw.name.trim().is_empty() {
        return Err(Error::InvalidSchema {
            location: raw.url.clone(),
            reason: "operation name is empty".to_string(),
        });
    }

    let request = match &raw.request {
        Some(request) => {
            let location = format!("{}.request", raw.name);
            let slots = RequestSlots {
                query: sub_shape(request, "query", &location)?,
                body: sub_shape(request, "body", &location)?,
                path: sub_shape(request, path_key, &location)?,
            };
            slots.is_concrete().then_some(RequestShape::Slots(slots))
        }
        None => None,
    };

    let response = match &raw.response {
        Some(value) => SchemaNode::from_value(value, &format!("{}.response", raw.name))?
            .map(ResponseShape::Schema),
        None => None,
    };

    Ok(OperationDescriptor {
        name: raw.name.clone(),
        http_method: raw.method.clone().filter(|m| !m.trim().is_empty()),
        url_template: raw.url.clone(),
        request,
        response,
    })
}

/// The plain key wins over the marked one; neither present means absent.
fn sub_shape(request: &Map<String, Value>, key: &str, location: &str) -> Result<SubShape> {
    if let Some(value) = request.get(key) {
        let node = SchemaNode::from_value(value, &format!("{location}.{key}"))?;
        if node.is_some() {
            return Ok(SubShape::from_node(node, false));
        }
    }
    let marked = format!("{key}{REQUIRED_MARKER}");
    match request.get(&marked) {
        Some(value) => Ok(SubShape::from_node(
            SchemaNode::from_value(value, &format!("{location}.{key}"))?,
            true,
        )),
        None => Ok(SubShape::Absent),
    }
}
