//! OpenAPI document to operation descriptors.
//!
//! Request and response types are not synthesized here: they are inline
//! type expressions indexing into the declarations module, e.g.
//! `operations['showPet']['parameters']`.

use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::ir::api::{
    NormalizedApi, OperationDescriptor, RequestMembers, RequestShape, ResponseShape,
};
use crate::ir::types::TsType;
use crate::ir::utils::escape_js_string_in;
use crate::schema::DescriptorSource;
use crate::url::placeholders;

use super::spec::{OpenApiSpec, Operation, PathItem, StatusCode};

/// Request member holding URL placeholder values.
pub const PATH_KEY: &str = "path";

/// A parsed OpenAPI document plus the import specifier of its declarations
/// module.
#[derive(Debug, Clone)]
pub struct OpenApiDocument {
    /// Parsed document.
    pub spec: OpenApiSpec,
    /// Import specifier, e.g. `./petstore.typed`.
    pub declarations: String,
}

impl OpenApiDocument {
    /// Wrap a parsed document.
    pub fn new(spec: OpenApiSpec, declarations: impl Into<String>) -> Self {
        Self {
            spec,
            declarations: declarations.into(),
        }
    }
}

impl DescriptorSource for OpenApiDocument {
    fn normalize(&self) -> Result<NormalizedApi> {
        let mut operations = Vec::new();
        for (path, item) in &self.spec.paths {
            for (method, op) in item.operations() {
                operations.push(normalize_operation(path, method, item, op)?);
            }
        }
        debug!(operations = operations.len(), "normalized OpenAPI document");

        let api = NormalizedApi {
            types: Vec::new(),
            operations,
            path_key: PATH_KEY,
            declarations: Some(self.declarations.clone()),
        };
        api.validate()?;
        Ok(api)
    }
}

fn normalize_operation(
    path: &str,
    method: &str,
    item: &PathItem,
    op: &Operation,
) -> Result<OperationDescriptor> {
    let id = op
        .operation_id
        .as_deref()
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| Error::MissingOperationId {
            path: path.to_string(),
            method: method.to_string(),
        })?;

    let params = item.merged_parameters(op);
    for placeholder in placeholders(path) {
        let declared = params
            .iter()
            .any(|p| p.location == "path" && p.name == placeholder);
        if !declared {
            warn!(operation = id, placeholder = %placeholder, "path placeholder has no parameter");
        }
    }

    let base = format!("operations['{}']", escape_js_string_in(id, '\''));
    let body = op.request_body.as_ref().map(|b| {
        let marker = if b.required { "" } else { "?" };
        format!("{{ body{marker}: Values<NonNullable<{base}['requestBody']>['content']> }}")
    });
    let members = RequestMembers {
        query: params.iter().any(|p| p.location == "query"),
        body: body.is_some(),
        path: params.iter().any(|p| p.location == "path"),
    };
    let request = match (params.is_empty(), body) {
        (true, None) => None,
        (false, None) => Some(format!("{base}['parameters']")),
        (true, Some(body)) => Some(body),
        (false, Some(body)) => Some(format!("{base}['parameters'] & {body}")),
    };

    let ok = StatusCode("200".to_string());
    let response = op
        .responses
        .get(&ok)
        .filter(|r| r.has_content())
        .map(|_| format!("Values<{base}['responses'][200]['content']>"));

    Ok(OperationDescriptor {
        name: id.to_string(),
        http_method: Some(method.to_string()),
        url_template: path.to_string(),
        request: request.map(|expr| RequestShape::TypeExpr {
            ty: TsType::Ref(expr),
            members,
        }),
        response: response.map(|expr| ResponseShape::TypeExpr(TsType::Ref(expr))),
    })
}
