//! API-level IR for normalized operations.
//!
//! Every input variant normalizes into a [`NormalizedApi`]:
//! - OperationDescriptor: one accessor to emit
//! - RequestShape / SubShape: what the accessor takes
//! - ResponseShape: what the fetcher resolves to
//! - NamedType: standalone declarations of the split variant

use std::collections::HashSet;

use crate::error::{Error, Result};
use crate::schema::node::SchemaNode;

use super::types::{TsPrimitive, TsProp, TsType};
use super::utils::pascal_identifier_stem;

/// Accessor kind (query vs mutation)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessorKind {
    /// GET requests: `use<Name>Query`
    Read,
    /// Anything else: `use<Name>Mutation`
    Write,
}

/// Normalized operation, the unit of emission
#[derive(Debug, Clone, PartialEq)]
pub struct OperationDescriptor {
    /// Unique per module; base of accessor name and cache key
    pub name: String,
    /// HTTP verb as written in the source (None = GET)
    pub http_method: Option<String>,
    /// URL with `:name` / `{name}` placeholders
    pub url_template: String,
    /// Request shape (None = no request argument)
    pub request: Option<RequestShape>,
    /// Response shape (None = `any`)
    pub response: Option<ResponseShape>,
}

impl OperationDescriptor {
    /// Read for a missing or case-insensitive `get` method, write otherwise.
    pub fn kind(&self) -> AccessorKind {
        match self.http_method.as_deref() {
            None => AccessorKind::Read,
            Some(m) if m.trim().eq_ignore_ascii_case("get") => AccessorKind::Read,
            Some(_) => AccessorKind::Write,
        }
    }

    /// Method string handed to the fetcher.
    pub fn method_literal(&self) -> String {
        self.http_method
            .as_deref()
            .map(|m| m.trim().to_ascii_uppercase())
            .unwrap_or_else(|| "GET".to_string())
    }

    /// PascalCase base for type and accessor names.
    pub fn type_base(&self) -> String {
        pascal_identifier_stem(&self.name)
    }

    /// `use<Name>Query` or `use<Name>Mutation`.
    pub fn accessor_name(&self) -> String {
        let suffix = match self.kind() {
            AccessorKind::Read => "Query",
            AccessorKind::Write => "Mutation",
        };
        format!("use{}{suffix}", self.type_base())
    }

    /// Whether the accessor takes a typed request argument.
    pub fn has_request(&self) -> bool {
        match &self.request {
            Some(RequestShape::Slots(slots)) => slots.is_concrete(),
            Some(RequestShape::TypeExpr { .. }) => true,
            None => false,
        }
    }

    /// Request members the fetcher call reads.
    pub fn request_members(&self) -> RequestMembers {
        match &self.request {
            Some(RequestShape::Slots(slots)) if slots.is_concrete() => RequestMembers::ALL,
            Some(RequestShape::TypeExpr { members, .. }) => *members,
            _ => RequestMembers::default(),
        }
    }
}

/// One of the three request sub-shapes
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubShape {
    /// Not given: emitted as a required `undefined` field
    #[default]
    Absent,
    /// Given without the required marker
    Optional(SchemaNode),
    /// Given with the required marker
    Required(SchemaNode),
}

impl SubShape {
    /// Build from a parsed node and whether its key carried the marker.
    pub fn from_node(node: Option<SchemaNode>, required: bool) -> Self {
        match (node, required) {
            (None, _) => SubShape::Absent,
            (Some(node), true) => SubShape::Required(node),
            (Some(node), false) => SubShape::Optional(node),
        }
    }

    /// Carries a schema.
    pub fn is_concrete(&self) -> bool {
        !matches!(self, SubShape::Absent)
    }

    /// Member of the composite request interface.
    pub fn to_prop(&self, key: &str) -> TsProp {
        match self {
            SubShape::Absent => TsProp::required(key, TsType::Primitive(TsPrimitive::Undefined)),
            SubShape::Optional(node) => TsProp::optional(key, node.to_ts_type()),
            SubShape::Required(node) => TsProp::required(key, node.to_ts_type()),
        }
    }
}

/// The query, body and path sub-shapes of a request
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RequestSlots {
    /// Query-string parameters
    pub query: SubShape,
    /// Request body
    pub body: SubShape,
    /// URL placeholder values
    pub path: SubShape,
}

impl RequestSlots {
    /// At least one sub-shape carries a schema.
    pub fn is_concrete(&self) -> bool {
        self.query.is_concrete() || self.body.is_concrete() || self.path.is_concrete()
    }

    /// Members in `query`, `body`, path order; the path member uses `path_key`.
    pub fn to_props(&self, path_key: &str) -> Vec<TsProp> {
        vec![
            self.query.to_prop("query"),
            self.body.to_prop("body"),
            self.path.to_prop(path_key),
        ]
    }
}

/// Members present on a request type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RequestMembers {
    /// `query`
    pub query: bool,
    /// `body`
    pub body: bool,
    /// The path member (`params` or `path`)
    pub path: bool,
}

impl RequestMembers {
    /// Composite request interfaces declare every member.
    pub const ALL: Self = Self {
        query: true,
        body: true,
        path: true,
    };
}

/// What an accessor takes
#[derive(Debug, Clone, PartialEq)]
pub enum RequestShape {
    /// Composite of schema sub-shapes, declared as `<Name>Request`
    Slots(RequestSlots),
    /// Inline type expression and the members it is known to carry
    TypeExpr {
        /// Type of the `request` argument
        ty: TsType,
        /// Members the fetcher call may read
        members: RequestMembers,
    },
}

/// What the fetcher resolves to
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseShape {
    /// Schema node, declared as `<Name>Response`
    Schema(SchemaNode),
    /// Inline type expression
    TypeExpr(TsType),
}

/// Named type from a type dictionary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedType {
    /// Declared name
    pub name: String,
    /// Definition
    pub node: SchemaNode,
}

/// Complete normalized API
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedApi {
    /// Named types, emitted before all operations
    pub types: Vec<NamedType>,
    /// Operations in source order
    pub operations: Vec<OperationDescriptor>,
    /// Request member holding URL placeholder values (`params` or `path`)
    pub path_key: &'static str,
    /// Import specifier of the declarations module, if any
    pub declarations: Option<String>,
}

impl NormalizedApi {
    /// Nothing to emit.
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Reject operations that share a name or would export the same symbols.
    pub fn validate(&self) -> Result<()> {
        let mut names = HashSet::new();
        let mut stems = HashSet::new();
        for op in &self.operations {
            if !names.insert(op.name.as_str()) || !stems.insert(op.type_base()) {
                return Err(Error::DuplicateOperation(op.name.clone()));
            }
        }
        Ok(())
    }
}
