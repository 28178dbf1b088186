//! Code generation from the normalized API to the TypeScript AST.
//!
//! One exported accessor per operation, preceded by its request and response
//! declarations. The generated AST can then be emitted via the `Emit` trait.

use crate::config::{FetcherRef, GeneratorConfig};
use crate::url::{HELPER_NAME, resolve, runtime_helper};

use super::api::{
    AccessorKind, NamedType, NormalizedApi, OperationDescriptor, RequestMembers, RequestShape,
    ResponseShape,
};
use super::emit::Emit;
use super::types::{
    ImportClause, ImportItem, ObjectEntry, TsExpr, TsFunction, TsImport, TsItem, TsModule,
    TsParam, TsPrimitive, TsStmt, TsType, TsTypeDef, TypeDefKind,
};

/// Local binding of the injected fetch wrapper.
const FETCHER: &str = "fetcher";

/// Name of the `Values<T>` helper used by inline type expressions.
const VALUES_HELPER: &str = "Values";

/// Generate a complete TypeScript module from the normalized API.
pub fn codegen_module(api: &NormalizedApi, config: &GeneratorConfig) -> TsModule {
    let ns = config.framework.namespace();

    let mut imports = vec![
        codegen_fetcher_import(&config.fetcher),
        TsImport {
            clause: ImportClause::Namespace(ns.to_string()),
            from: config.framework.package().to_string(),
        },
    ];

    let mut items = Vec::new();

    if let Some(declarations) = &api.declarations {
        imports.push(TsImport {
            clause: ImportClause::Named(vec![
                ImportItem {
                    name: "operations".into(),
                    alias: None,
                },
                ImportItem {
                    name: "components".into(),
                    alias: None,
                },
            ]),
            from: declarations.clone(),
        });
        items.push(TsItem::Type(TsTypeDef {
            name: VALUES_HELPER.into(),
            type_params: vec!["T".into()],
            kind: TypeDefKind::TypeAlias {
                ty: TsType::reference("T[keyof T]"),
            },
            is_export: false,
        }));
    }

    items.extend(api.types.iter().map(|t| TsItem::Type(codegen_named_type(t))));
    items.push(TsItem::Function(runtime_helper()));

    for op in &api.operations {
        items.extend(codegen_operation(op, api.path_key, ns));
    }

    TsModule { imports, items }
}

/// Generate the module text in one go.
pub fn generate_typescript(api: &NormalizedApi, config: &GeneratorConfig) -> String {
    codegen_module(api, config).emit()
}

/// `import { symbol as fetcher } from "module";`
fn codegen_fetcher_import(fetcher: &FetcherRef) -> TsImport {
    let name = fetcher.symbol.clone().unwrap_or_else(|| "default".into());
    let alias = (name != FETCHER).then(|| FETCHER.to_string());
    TsImport {
        clause: ImportClause::Named(vec![ImportItem { name, alias }]),
        from: fetcher.module.clone(),
    }
}

/// Objects become interfaces, everything else a type alias.
fn codegen_named_type(named: &NamedType) -> TsTypeDef {
    match named.node.to_ts_type() {
        TsType::Object(props) => TsTypeDef::interface(&named.name, props),
        other => TsTypeDef::alias(&named.name, other),
    }
}

/// Declarations and accessor of a single operation.
fn codegen_operation(op: &OperationDescriptor, path_key: &str, ns: &str) -> Vec<TsItem> {
    let base = op.type_base();
    let mut items = Vec::new();

    let request_type = match &op.request {
        Some(RequestShape::Slots(slots)) if slots.is_concrete() => {
            let name = format!("{base}Request");
            items.push(TsItem::Type(TsTypeDef::interface(
                &name,
                slots.to_props(path_key),
            )));
            Some(TsType::Ref(name))
        }
        Some(RequestShape::TypeExpr { ty, .. }) => Some(ty.clone()),
        _ => None,
    };

    let response_type = match &op.response {
        Some(ResponseShape::Schema(node)) => {
            let name = format!("{base}Response");
            items.push(TsItem::Type(TsTypeDef::alias(&name, node.to_ts_type())));
            TsType::Ref(name)
        }
        Some(ResponseShape::TypeExpr(ty)) => ty.clone(),
        None => TsType::Primitive(TsPrimitive::Any),
    };

    items.push(TsItem::Function(codegen_accessor(
        op,
        request_type,
        &response_type,
        path_key,
        ns,
    )));
    items
}

/// `fetcher<Response>({ method, url, query, body })`
///
/// Only members the request type declares are read; without a path member
/// the URL is passed as a literal.
fn codegen_fetch_call(
    op: &OperationDescriptor,
    members: RequestMembers,
    response_type: &TsType,
    path_key: &str,
) -> TsExpr {
    let request = || TsExpr::ident("request");
    let mut entries = vec![ObjectEntry::Prop(
        "method".into(),
        TsExpr::string(op.method_literal()),
    )];

    let url = if members.path {
        TsExpr::call(
            TsExpr::ident(HELPER_NAME),
            vec![
                TsExpr::string(&op.url_template),
                TsExpr::member(request(), path_key),
            ],
        )
    } else {
        TsExpr::string(resolve(&op.url_template, None))
    };
    entries.push(ObjectEntry::Prop("url".into(), url));

    if members.query {
        entries.push(ObjectEntry::Prop("query".into(), TsExpr::member(request(), "query")));
    }
    if members.body {
        entries.push(ObjectEntry::Prop("body".into(), TsExpr::member(request(), "body")));
    }

    TsExpr::call_generic(
        TsExpr::ident(FETCHER),
        response_type.clone(),
        vec![TsExpr::Object(entries)],
    )
}

/// Cache key: `["name", JSON.stringify(request)]` for reads with a request,
/// `["name"]` otherwise.
fn codegen_cache_key(op: &OperationDescriptor, has_request: bool) -> TsExpr {
    let mut parts = vec![TsExpr::string(&op.name)];
    if has_request && op.kind() == AccessorKind::Read {
        parts.push(TsExpr::call(
            TsExpr::member(TsExpr::ident("JSON"), "stringify"),
            vec![TsExpr::ident("request")],
        ));
    }
    TsExpr::Array(parts)
}

/// `use<Name>Query` / `use<Name>Mutation`
fn codegen_accessor(
    op: &OperationDescriptor,
    request_type: Option<TsType>,
    response_type: &TsType,
    path_key: &str,
    ns: &str,
) -> TsFunction {
    let has_request = request_type.is_some();
    let (hook, options_type, key_prop, fn_prop) = match op.kind() {
        AccessorKind::Read => ("useQuery", "QueryOptions", "queryKey", "queryFn"),
        AccessorKind::Write => ("useMutation", "MutationOptions", "mutationKey", "mutationFn"),
    };

    let mut params = Vec::new();
    if let Some(ty) = request_type {
        params.push(TsParam {
            name: "request".into(),
            ty: Some(ty),
            optional: false,
        });
    }
    params.push(TsParam {
        name: "options".into(),
        ty: Some(TsType::Ref(format!(
            "{ns}.{options_type}<{}>",
            response_type.emit()
        ))),
        optional: true,
    });

    let hook_args = TsExpr::Object(vec![
        ObjectEntry::Prop(key_prop.into(), codegen_cache_key(op, has_request)),
        ObjectEntry::Prop(
            fn_prop.into(),
            TsExpr::Arrow {
                params: vec![],
                body: Box::new(codegen_fetch_call(
                    op,
                    op.request_members(),
                    response_type,
                    path_key,
                )),
            },
        ),
        ObjectEntry::Spread(TsExpr::ident("options")),
    ]);

    TsFunction {
        name: op.accessor_name(),
        params,
        return_type: None,
        body: vec![TsStmt::Return(Some(TsExpr::call_generic(
            TsExpr::member(TsExpr::ident(ns), hook),
            response_type.clone(),
            vec![hook_args],
        )))],
        is_export: true,
    }
}
