//! Declarations module for an OpenAPI document.
//!
//! Emits three exported interfaces that accessors index into:
//!
//! ```ts
//! export interface paths { "/pets": { get: operations["listPets"]; }; }
//! export interface components { schemas: { Pet: { ... }; }; }
//! export interface operations {
//!   listPets: {
//!     parameters: { query?: { limit?: number; }; };
//!     requestBody?: { content: { "application/json": ... }; };
//!     responses: { "200": { content: { "application/json": Pet[]; }; }; };
//!   };
//! }
//! ```

use indexmap::IndexMap;

use crate::ir::emit::Emit;
use crate::ir::types::{TsItem, TsLiteral, TsModule, TsPrimitive, TsProp, TsType, TsTypeDef};
use crate::ir::utils::{escape_js_string, make_string_record, make_unknown_record};

use super::spec::{
    AdditionalProperties, MediaType, OpenApiSpec, Operation, Parameter, PathItem, Schema,
    SchemaType,
};

const SCHEMA_REF_PREFIX: &str = "#/components/schemas/";

/// Parameter locations, in emission order.
const PARAM_LOCATIONS: [&str; 4] = ["query", "header", "path", "cookie"];

/// Build the declarations module AST.
pub fn declarations_module(spec: &OpenApiSpec) -> TsModule {
    let paths = spec
        .paths
        .iter()
        .map(|(path, item)| TsProp::required(path, path_item_type(item)))
        .collect();

    let schemas = spec
        .schemas()
        .map(|(name, schema)| TsProp::required(name, schema_to_ts_type(schema)))
        .collect();

    let operations = spec
        .paths
        .iter()
        .flat_map(|(_, item)| {
            item.operations().filter_map(move |(_, op)| {
                let id = op.operation_id.as_ref()?;
                Some(TsProp::required(id, operation_type(item, op)))
            })
        })
        .collect();

    TsModule {
        imports: Vec::new(),
        items: vec![
            TsItem::Type(TsTypeDef::interface("paths", paths)),
            TsItem::Type(TsTypeDef::interface(
                "components",
                vec![TsProp::required("schemas", TsType::Object(schemas))],
            )),
            TsItem::Type(TsTypeDef::interface("operations", operations)),
        ],
    }
}

/// Emit the declarations module text.
pub fn generate_declarations(spec: &OpenApiSpec) -> String {
    declarations_module(spec).emit()
}

/// `operations["<id>"]` for each verb of a path.
fn path_item_type(item: &PathItem) -> TsType {
    TsType::Object(
        item.operations()
            .filter_map(|(verb, op)| {
                let id = op.operation_id.as_ref()?;
                Some(TsProp::required(
                    verb,
                    TsType::Ref(format!("operations[\"{}\"]", escape_js_string(id))),
                ))
            })
            .collect(),
    )
}

fn operation_type(item: &PathItem, op: &Operation) -> TsType {
    let mut props = vec![TsProp::required(
        "parameters",
        parameters_type(&item.merged_parameters(op)),
    )];

    if let Some(body) = &op.request_body {
        let content = TsProp::required("content", content_type(body.content.as_ref()));
        let body_type = TsType::Object(vec![content]);
        props.push(if body.required {
            TsProp::required("requestBody", body_type)
        } else {
            TsProp::optional("requestBody", body_type)
        });
    }

    let responses = op
        .responses
        .iter()
        .map(|(status, response)| {
            let members = match &response.content {
                Some(content) if !content.is_empty() => {
                    vec![TsProp::required("content", content_type(Some(content)))]
                }
                _ => Vec::new(),
            };
            TsProp::required(status.as_str(), TsType::Object(members))
        })
        .collect();
    props.push(TsProp::required("responses", TsType::Object(responses)));

    TsType::Object(props)
}

/// One member per location that has parameters; a location is optional
/// unless one of its parameters is required.
fn parameters_type(params: &[&Parameter]) -> TsType {
    let mut members = Vec::new();
    for location in PARAM_LOCATIONS {
        let in_location: Vec<_> = params.iter().filter(|p| p.location == location).collect();
        if in_location.is_empty() {
            continue;
        }
        let fields: Vec<_> = in_location
            .iter()
            .map(|p| {
                let ty = p
                    .schema
                    .as_ref()
                    .map(schema_to_ts_type)
                    .unwrap_or(TsType::Primitive(TsPrimitive::String));
                if p.required {
                    TsProp::required(&p.name, ty)
                } else {
                    TsProp::optional(&p.name, ty)
                }
            })
            .collect();
        let any_required = in_location.iter().any(|p| p.required);
        members.push(if any_required {
            TsProp::required(location, TsType::Object(fields))
        } else {
            TsProp::optional(location, TsType::Object(fields))
        });
    }
    TsType::Object(members)
}

/// `{ "<media type>": <schema type>; ... }`
fn content_type(content: Option<&IndexMap<String, MediaType>>) -> TsType {
    TsType::Object(
        content
            .into_iter()
            .flatten()
            .map(|(media, mt)| {
                let ty = mt
                    .schema
                    .as_ref()
                    .map(schema_to_ts_type)
                    .unwrap_or(TsType::Primitive(TsPrimitive::Unknown));
                TsProp::required(media, ty)
            })
            .collect(),
    )
}

/// Convert a Schema to TsType
pub fn schema_to_ts_type(schema: &Schema) -> TsType {
    let base = schema_to_ts_type_inner(schema);
    if schema.nullable == Some(true) {
        TsType::Union(vec![base, TsType::Primitive(TsPrimitive::Null)])
    } else {
        base
    }
}

fn schema_to_ts_type_inner(schema: &Schema) -> TsType {
    // Handle $ref first
    if let Some(ref_path) = &schema.ref_path {
        return ref_to_type(ref_path);
    }

    if let Some(const_value) = &schema.const_value {
        return json_value_to_ts_type(const_value);
    }

    // Handle allOf (intersection)
    if let Some(all_of) = &schema.all_of {
        return match all_of.as_slice() {
            [] => TsType::Primitive(TsPrimitive::Unknown),
            [single] => schema_to_ts_type(single),
            many => TsType::Intersection(many.iter().map(schema_to_ts_type).collect()),
        };
    }

    // anyOf and oneOf are both plain unions here
    if let Some(variants) = schema.any_of.as_ref().or(schema.one_of.as_ref()) {
        return TsType::Union(variants.iter().map(schema_to_ts_type).collect());
    }

    if let Some(values) = &schema.enum_values {
        return TsType::Union(values.iter().map(json_value_to_ts_type).collect());
    }

    match &schema.schema_type {
        Some(SchemaType::Single(t)) => schema_type_to_ts(t, schema),
        Some(SchemaType::Multiple(types)) => {
            let ts_types: Vec<_> = types.iter().map(|t| schema_type_to_ts(t, schema)).collect();
            match <[TsType; 1]>::try_from(ts_types) {
                Ok([single]) => single,
                Err(many) => TsType::Union(many),
            }
        }
        None if schema.properties.is_some() || schema.additional_properties.is_some() => {
            object_type(schema)
        }
        None => TsType::Primitive(TsPrimitive::Unknown),
    }
}

/// `#/components/schemas/Pet` -> `components["schemas"]["Pet"]`
fn ref_to_type(ref_path: &str) -> TsType {
    match ref_path.strip_prefix(SCHEMA_REF_PREFIX) {
        Some(name) => TsType::Ref(format!(
            "components[\"schemas\"][\"{}\"]",
            escape_js_string(name)
        )),
        None => TsType::Primitive(TsPrimitive::Unknown),
    }
}

/// Convert JSON value to TsType literal
fn json_value_to_ts_type(value: &serde_json::Value) -> TsType {
    match value {
        serde_json::Value::Null => TsType::Literal(TsLiteral::Null),
        serde_json::Value::Bool(b) => TsType::Literal(TsLiteral::Bool(*b)),
        serde_json::Value::Number(n) => match n.as_i64() {
            Some(i) => TsType::Literal(TsLiteral::Int(i)),
            None => TsType::Literal(TsLiteral::Number(n.as_f64().unwrap_or(0.0))),
        },
        serde_json::Value::String(s) => TsType::Literal(TsLiteral::String(s.clone())),
        _ => TsType::Primitive(TsPrimitive::Unknown),
    }
}

/// Convert single schema type to TsType
fn schema_type_to_ts(schema_type: &str, schema: &Schema) -> TsType {
    match schema_type {
        "string" => TsType::Primitive(TsPrimitive::String),
        "number" | "integer" => TsType::Primitive(TsPrimitive::Number),
        "boolean" => TsType::Primitive(TsPrimitive::Boolean),
        "null" => TsType::Primitive(TsPrimitive::Null),
        "array" => schema
            .items
            .as_deref()
            .map(schema_to_ts_type)
            .unwrap_or(TsType::Primitive(TsPrimitive::Unknown))
            .array_of(),
        "object" => object_type(schema),
        _ => TsType::Primitive(TsPrimitive::Unknown),
    }
}

fn object_type(schema: &Schema) -> TsType {
    let props = schema.properties.as_ref().map(|properties| {
        let required = schema.required.as_deref().unwrap_or_default();
        properties
            .iter()
            .map(|(name, prop)| {
                let ty = schema_to_ts_type(prop);
                if required.contains(name) {
                    TsProp::required(name, ty)
                } else {
                    TsProp::optional(name, ty)
                }
            })
            .collect::<Vec<_>>()
    });

    let additional = match &schema.additional_properties {
        None => None,
        Some(AdditionalProperties::Bool(false)) => None,
        Some(AdditionalProperties::Bool(true)) => Some(make_unknown_record()),
        Some(AdditionalProperties::Schema(s)) => Some(make_string_record(schema_to_ts_type(s))),
    };

    match (props, additional) {
        (Some(props), Some(record)) => TsType::Intersection(vec![TsType::Object(props), record]),
        (Some(props), None) => TsType::Object(props),
        (None, Some(record)) => record,
        (None, None) => match schema.additional_properties {
            Some(AdditionalProperties::Bool(false)) => TsType::Object(Vec::new()),
            _ => make_unknown_record(),
        },
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn schema(json: &str) -> Schema {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_schema_ref() {
        let ty = schema_to_ts_type(&schema(r##"{ "$ref": "#/components/schemas/Pet" }"##));
        assert_eq!(ty.emit(), "components[\"schemas\"][\"Pet\"]");
    }

    #[test]
    fn test_schema_object_required() {
        let ty = schema_to_ts_type(&schema(
            r#"{
                "type": "object",
                "required": ["id"],
                "properties": { "id": { "type": "integer" }, "tag": { "type": "string" } }
            }"#,
        ));
        assert_eq!(ty.emit(), "{\n  id: number;\n  tag?: string;\n}");
    }

    #[test]
    fn test_schema_enum_and_nullable() {
        let ty = schema_to_ts_type(&schema(
            r#"{ "type": "string", "enum": ["a", "b"], "nullable": true }"#,
        ));
        assert_eq!(ty.emit(), "\"a\" | \"b\" | null");

        let ty = schema_to_ts_type(&schema(r#"{ "type": ["integer", "null"] }"#));
        assert_eq!(ty.emit(), "number | null");
    }

    #[test]
    fn test_schema_array_and_record() {
        let ty = schema_to_ts_type(&schema(
            r#"{ "type": "array", "items": { "type": "object", "additionalProperties": { "type": "number" } } }"#,
        ));
        assert_eq!(ty.emit(), "Record<string, number>[]");

        let ty = schema_to_ts_type(&schema(r#"{ "type": "object" }"#));
        assert_eq!(ty.emit(), "Record<string, unknown>");
    }

    #[test]
    fn test_schema_composition() {
        let ty = schema_to_ts_type(&schema(
            r##"{ "allOf": [{ "$ref": "#/components/schemas/A" }, { "$ref": "#/components/schemas/B" }] }"##,
        ));
        assert_eq!(
            ty.emit(),
            "components[\"schemas\"][\"A\"] & components[\"schemas\"][\"B\"]"
        );

        let ty = schema_to_ts_type(&schema(r#"{ "oneOf": [{ "type": "string" }, { "type": "number" }] }"#));
        assert_eq!(ty.emit(), "string | number");
    }

    #[test]
    fn test_declarations_module() {
        let spec = OpenApiSpec::from_yaml(
            r#"
openapi: 3.0.0
paths:
  /pets/{petId}:
    get:
      operationId: showPet
      parameters:
        - { name: petId, in: path, required: true, schema: { type: string } }
        - { name: verbose, in: query, schema: { type: boolean } }
      responses:
        200:
          content:
            application/json:
              schema: { $ref: '#/components/schemas/Pet' }
    put:
      operationId: replacePet
      requestBody:
        required: true
        content:
          application/json:
            schema: { $ref: '#/components/schemas/Pet' }
      responses:
        "204": {}
components:
  schemas:
    Pet:
      type: object
      required: [id]
      properties:
        id: { type: string }
"#,
        )
        .unwrap();
        let code = generate_declarations(&spec);

        assert!(code.contains(
            "export interface paths {\n  \"/pets/{petId}\": {\n    get: operations[\"showPet\"];\n    put: operations[\"replacePet\"];\n  };\n}\n"
        ));
        assert!(code.contains(
            "export interface components {\n  schemas: {\n    Pet: {\n      id: string;\n    };\n  };\n}\n"
        ));
        assert!(code.contains(
            "    parameters: {\n      query?: {\n        verbose?: boolean;\n      };\n      path: {\n        petId: string;\n      };\n    };\n"
        ));
        assert!(code.contains(
            "      \"200\": {\n        content: {\n          \"application/json\": components[\"schemas\"][\"Pet\"];\n        };\n      };\n"
        ));
        assert!(code.contains(
            "    requestBody: {\n      content: {\n        \"application/json\": components[\"schemas\"][\"Pet\"];\n      };\n    };\n"
        ));
        assert!(code.contains("      \"204\": {};\n"));
    }
}
