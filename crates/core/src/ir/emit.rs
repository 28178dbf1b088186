//! TypeScript code emission via the Emit trait.
//!
//! Every AST node implements `Emit`. Nodes that may span several lines
//! (object types, object literals, statements) also take an indentation
//! level so nested structures line up: two spaces per level.

use super::types::{
    ImportClause, ImportItem, ObjectEntry, TsExpr, TsFunction, TsImport, TsItem, TsLiteral,
    TsModule, TsParam, TsPrimitive, TsProp, TsStmt, TsType, TsTypeDef, TypeDefKind, VarKind,
};
use super::utils::{escape_js_string, quote_if_needed};

/// Trait for emitting TypeScript code from AST nodes.
pub trait Emit {
    /// Convert the AST node to its TypeScript string representation.
    fn emit(&self) -> String;
}

fn pad(indent: usize) -> String {
    "  ".repeat(indent)
}

// =============================================================================
// Primitive Types
// =============================================================================

impl Emit for TsPrimitive {
    fn emit(&self) -> String {
        match self {
            TsPrimitive::String => "string",
            TsPrimitive::Number => "number",
            TsPrimitive::Boolean => "boolean",
            TsPrimitive::Null => "null",
            TsPrimitive::Undefined => "undefined",
            TsPrimitive::Unknown => "unknown",
            TsPrimitive::Any => "any",
            TsPrimitive::Never => "never",
        }
        .to_string()
    }
}

impl Emit for TsLiteral {
    fn emit(&self) -> String {
        match self {
            TsLiteral::String(s) => format!("\"{}\"", escape_js_string(s)),
            TsLiteral::Number(n) => n.to_string(),
            TsLiteral::Int(i) => i.to_string(),
            TsLiteral::Bool(b) => b.to_string(),
            TsLiteral::Null => "null".to_string(),
        }
    }
}

// =============================================================================
// Types
// =============================================================================

impl Emit for TsType {
    fn emit(&self) -> String {
        self.emit_at(0)
    }
}

impl TsType {
    /// Emit with nested object members indented one level deeper than `indent`.
    pub fn emit_at(&self, indent: usize) -> String {
        match self {
            TsType::Primitive(p) => p.emit(),
            TsType::Array(inner) => {
                let inner_str = inner.emit_at(indent);
                // Wrap complex types in parentheses
                let compound = match &**inner {
                    TsType::Union(_) | TsType::Intersection(_) => true,
                    TsType::Ref(name) => name.contains(['|', '&']),
                    _ => false,
                };
                if compound {
                    format!("({inner_str})[]")
                } else {
                    format!("{inner_str}[]")
                }
            }
            TsType::Union(types) => types
                .iter()
                .map(|t| t.emit_at(indent))
                .collect::<Vec<_>>()
                .join(" | "),
            TsType::Intersection(types) => types
                .iter()
                .map(|t| {
                    let s = t.emit_at(indent);
                    if matches!(t, TsType::Union(_)) {
                        format!("({s})")
                    } else {
                        s
                    }
                })
                .collect::<Vec<_>>()
                .join(" & "),
            TsType::Object(props) => {
                if props.is_empty() {
                    "{}".to_string()
                } else {
                    format!("{{\n{}{}}}", emit_props(props, indent + 1), pad(indent))
                }
            }
            TsType::Record { key, value } => {
                format!("Record<{}, {}>", key.emit_at(indent), value.emit_at(indent))
            }
            TsType::Literal(lit) => lit.emit(),
            TsType::Ref(name) => name.clone(),
        }
    }
}

impl TsProp {
    /// `key?: type`, without the trailing separator.
    pub fn emit_at(&self, indent: usize) -> String {
        let opt = if self.optional { "?" } else { "" };
        format!("{}{}: {}", quote_if_needed(&self.name), opt, self.ty.emit_at(indent))
    }
}

impl Emit for TsProp {
    fn emit(&self) -> String {
        self.emit_at(0)
    }
}

/// One `key: type;` line per property at the given indentation.
fn emit_props(props: &[TsProp], indent: usize) -> String {
    props
        .iter()
        .map(|p| format!("{}{};\n", pad(indent), p.emit_at(indent)))
        .collect()
}

// =============================================================================
// Type Definitions
// =============================================================================

impl Emit for TsTypeDef {
    fn emit(&self) -> String {
        let export = if self.is_export { "export " } else { "" };
        let generics = if self.type_params.is_empty() {
            String::new()
        } else {
            format!("<{}>", self.type_params.join(", "))
        };
        match &self.kind {
            TypeDefKind::Interface { properties } => format!(
                "{export}interface {}{generics} {{\n{}}}\n",
                self.name,
                emit_props(properties, 1)
            ),
            TypeDefKind::TypeAlias { ty } => {
                format!("{export}type {}{generics} = {};\n", self.name, ty.emit())
            }
        }
    }
}

// =============================================================================
// Expressions
// =============================================================================

impl Emit for TsExpr {
    fn emit(&self) -> String {
        self.emit_at(0)
    }
}

impl TsExpr {
    /// Emit with multi-line object literals indented relative to `indent`.
    pub fn emit_at(&self, indent: usize) -> String {
        match self {
            TsExpr::Ident(name) => name.clone(),
            TsExpr::Literal(lit) => lit.emit(),
            TsExpr::Call {
                callee,
                type_args,
                args,
            } => {
                let type_args_str = if type_args.is_empty() {
                    String::new()
                } else {
                    let types: Vec<_> = type_args.iter().map(|t| t.emit_at(indent)).collect();
                    format!("<{}>", types.join(", "))
                };
                let args_str = args
                    .iter()
                    .map(|a| a.emit_at(indent))
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("{}{}({})", callee.emit_at(indent), type_args_str, args_str)
            }
            TsExpr::Arrow { params, body } => {
                let params_str = params.iter().map(|p| p.emit()).collect::<Vec<_>>().join(", ");
                format!("({}) => {}", params_str, body.emit_at(indent))
            }
            TsExpr::Object(entries) => {
                if entries.is_empty() {
                    return "{}".to_string();
                }
                let inner = pad(indent + 1);
                let mut output = String::from("{\n");
                for entry in entries {
                    match entry {
                        ObjectEntry::Prop(key, value) => output.push_str(&format!(
                            "{inner}{}: {},\n",
                            quote_if_needed(key),
                            value.emit_at(indent + 1)
                        )),
                        ObjectEntry::Spread(expr) => {
                            output.push_str(&format!("{inner}...{},\n", expr.emit_at(indent + 1)));
                        }
                    }
                }
                output.push_str(&pad(indent));
                output.push('}');
                output
            }
            TsExpr::Member { object, prop } => format!("{}.{}", object.emit_at(indent), prop),
            TsExpr::Array(items) => {
                let items_str = items
                    .iter()
                    .map(|i| i.emit_at(indent))
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("[{items_str}]")
            }
        }
    }
}

impl Emit for TsParam {
    fn emit(&self) -> String {
        let opt = if self.optional { "?" } else { "" };
        match &self.ty {
            Some(ty) => format!("{}{}: {}", self.name, opt, ty.emit()),
            None => format!("{}{}", self.name, opt),
        }
    }
}

// =============================================================================
// Statements
// =============================================================================

impl Emit for VarKind {
    fn emit(&self) -> String {
        match self {
            VarKind::Const => "const".to_string(),
            VarKind::Let => "let".to_string(),
        }
    }
}

impl Emit for TsStmt {
    fn emit(&self) -> String {
        self.emit_indented(1)
    }
}

impl TsStmt {
    /// Emit with specified indentation level (2 spaces per level)
    pub fn emit_indented(&self, indent: usize) -> String {
        let prefix = pad(indent);
        match self {
            TsStmt::VarDecl { kind, name, init } => {
                format!("{prefix}{} {name} = {};\n", kind.emit(), init.emit_at(indent))
            }
            TsStmt::Return(expr) => match expr {
                Some(e) => format!("{prefix}return {};\n", e.emit_at(indent)),
                None => format!("{prefix}return;\n"),
            },
            TsStmt::If { cond, then_body } => {
                let mut output = format!("{prefix}if ({cond}) {{\n");
                for stmt in then_body {
                    output.push_str(&stmt.emit_indented(indent + 1));
                }
                output.push_str(&format!("{prefix}}}\n"));
                output
            }
            TsStmt::Raw(code) => code
                .lines()
                .map(|line| {
                    if line.is_empty() {
                        "\n".to_string()
                    } else {
                        format!("{prefix}{line}\n")
                    }
                })
                .collect(),
        }
    }
}

// =============================================================================
// Functions
// =============================================================================

impl Emit for TsFunction {
    fn emit(&self) -> String {
        let export = if self.is_export { "export " } else { "" };
        let params_str = self.params.iter().map(|p| p.emit()).collect::<Vec<_>>().join(", ");
        let return_type_str = self
            .return_type
            .as_ref()
            .map(|t| format!(": {}", t.emit()))
            .unwrap_or_default();

        let mut output = format!(
            "{export}function {}({params_str}){return_type_str}",
            self.name
        );
        if self.body.is_empty() {
            output.push_str(" {}\n");
        } else {
            output.push_str(" {\n");
            for stmt in &self.body {
                output.push_str(&stmt.emit_indented(1));
            }
            output.push_str("}\n");
        }
        output
    }
}

// =============================================================================
// Imports
// =============================================================================

impl Emit for ImportItem {
    fn emit(&self) -> String {
        match &self.alias {
            Some(alias) => format!("{} as {}", self.name, alias),
            None => self.name.clone(),
        }
    }
}

impl Emit for TsImport {
    fn emit(&self) -> String {
        match &self.clause {
            ImportClause::Named(items) => {
                let items_str = items.iter().map(|i| i.emit()).collect::<Vec<_>>().join(", ");
                format!("import {{ {} }} from \"{}\";\n", items_str, self.from)
            }
            ImportClause::Namespace(ns) => format!("import * as {ns} from \"{}\";\n", self.from),
        }
    }
}

// =============================================================================
// Module
// =============================================================================

impl Emit for TsItem {
    fn emit(&self) -> String {
        match self {
            TsItem::Type(def) => def.emit(),
            TsItem::Function(func) => func.emit(),
        }
    }
}

impl Emit for TsModule {
    fn emit(&self) -> String {
        let mut output = String::new();

        for import in &self.imports {
            output.push_str(&import.emit());
        }

        if !self.imports.is_empty() && !self.items.is_empty() {
            output.push('\n');
        }

        let items: Vec<_> = self.items.iter().map(Emit::emit).collect();
        output.push_str(&items.join("\n"));

        output
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn prop(name: &str, ty: TsType, optional: bool) -> TsProp {
        TsProp {
            name: name.into(),
            ty,
            optional,
        }
    }

    #[test]
    fn test_emit_primitive() {
        assert_eq!(TsPrimitive::String.emit(), "string");
        assert_eq!(TsPrimitive::Undefined.emit(), "undefined");
        assert_eq!(TsPrimitive::Never.emit(), "never");
        assert_eq!(TsPrimitive::Any.emit(), "any");
    }

    #[test]
    fn test_emit_literal() {
        assert_eq!(TsLiteral::String("hello".into()).emit(), "\"hello\"");
        assert_eq!(TsLiteral::String("say \"hi\"".into()).emit(), "\"say \\\"hi\\\"\"");
        assert_eq!(TsLiteral::Int(42).emit(), "42");
        assert_eq!(TsLiteral::Bool(false).emit(), "false");
    }

    #[test]
    fn test_emit_array_type() {
        let ty = TsType::reference("User").array_of().array_of();
        assert_eq!(ty.emit(), "User[][]");
    }

    #[test]
    fn test_emit_union_array() {
        let inner = TsType::Union(vec![
            TsType::Primitive(TsPrimitive::String),
            TsType::Primitive(TsPrimitive::Null),
        ]);
        assert_eq!(inner.array_of().emit(), "(string | null)[]");
    }

    #[test]
    fn test_emit_nested_object_type() {
        let ty = TsType::Object(vec![
            prop("id", TsType::Primitive(TsPrimitive::Number), false),
            prop(
                "profile",
                TsType::Object(vec![prop("bio", TsType::reference("string"), true)]),
                true,
            ),
        ]);
        assert_eq!(
            ty.emit(),
            "{\n  id: number;\n  profile?: {\n    bio?: string;\n  };\n}"
        );
    }

    #[test]
    fn test_emit_empty_object_type() {
        assert_eq!(TsType::Object(vec![]).emit(), "{}");
    }

    #[test]
    fn test_emit_quoted_keys() {
        let ty = TsType::Object(vec![prop("200", TsType::Primitive(TsPrimitive::Never), true)]);
        assert_eq!(ty.emit(), "{\n  \"200\"?: never;\n}");
    }

    #[test]
    fn test_emit_type_def_interface() {
        let def = TsTypeDef::interface(
            "Item",
            vec![
                prop("id", TsType::Primitive(TsPrimitive::Number), false),
                prop("name", TsType::Primitive(TsPrimitive::String), true),
            ],
        );
        assert_eq!(def.emit(), "export interface Item {\n  id: number;\n  name?: string;\n}\n");
    }

    #[test]
    fn test_emit_generic_private_alias() {
        let def = TsTypeDef {
            name: "Values".into(),
            type_params: vec!["T".into()],
            kind: TypeDefKind::TypeAlias {
                ty: TsType::reference("T[keyof T]"),
            },
            is_export: false,
        };
        assert_eq!(def.emit(), "type Values<T> = T[keyof T];\n");
    }

    #[test]
    fn test_emit_imports() {
        let named = TsImport {
            clause: ImportClause::Named(vec![ImportItem {
                name: "apiFetcher".into(),
                alias: Some("fetcher".into()),
            }]),
            from: "./utils/fetcher".into(),
        };
        assert_eq!(named.emit(), "import { apiFetcher as fetcher } from \"./utils/fetcher\";\n");

        let namespace = TsImport {
            clause: ImportClause::Namespace("reactQuery".into()),
            from: "@tanstack/react-query".into(),
        };
        assert_eq!(
            namespace.emit(),
            "import * as reactQuery from \"@tanstack/react-query\";\n"
        );
    }

    #[test]
    fn test_emit_object_literal_nested() {
        let expr = TsExpr::Object(vec![
            ObjectEntry::Prop(
                "queryFn".into(),
                TsExpr::Arrow {
                    params: vec![],
                    body: Box::new(TsExpr::call(
                        TsExpr::ident("fetcher"),
                        vec![TsExpr::Object(vec![ObjectEntry::Prop(
                            "method".into(),
                            TsExpr::string("GET"),
                        )])],
                    )),
                },
            ),
            ObjectEntry::Spread(TsExpr::ident("options")),
        ]);
        assert_eq!(
            expr.emit(),
            "{\n  queryFn: () => fetcher({\n    method: \"GET\",\n  }),\n  ...options,\n}"
        );
    }

    #[test]
    fn test_emit_generic_call() {
        let expr = TsExpr::call_generic(
            TsExpr::member(TsExpr::ident("vueQuery"), "useQuery"),
            TsType::reference("GetUserResponse"),
            vec![],
        );
        assert_eq!(expr.emit(), "vueQuery.useQuery<GetUserResponse>()");
    }

    #[test]
    fn test_emit_function_with_if() {
        let func = TsFunction {
            name: "getUrl".into(),
            params: vec![TsParam {
                name: "url".into(),
                ty: Some(TsType::Primitive(TsPrimitive::String)),
                optional: false,
            }],
            return_type: Some(TsType::Primitive(TsPrimitive::String)),
            body: vec![
                TsStmt::If {
                    cond: "!url".into(),
                    then_body: vec![TsStmt::Return(Some(TsExpr::string("")))],
                },
                TsStmt::Return(Some(TsExpr::ident("url"))),
            ],
            is_export: false,
        };
        assert_eq!(
            func.emit(),
            "function getUrl(url: string): string {\n  if (!url) {\n    return \"\";\n  }\n  return url;\n}\n"
        );
    }

    #[test]
    fn test_emit_module_separates_items() {
        let module = TsModule {
            imports: vec![TsImport {
                clause: ImportClause::Namespace("reactQuery".into()),
                from: "@tanstack/react-query".into(),
            }],
            items: vec![
                TsItem::Type(TsTypeDef::alias("Id", TsType::Primitive(TsPrimitive::String))),
                TsItem::Type(TsTypeDef::alias("Ids", TsType::reference("Id").array_of())),
            ],
        };
        assert_eq!(
            module.emit(),
            "import * as reactQuery from \"@tanstack/react-query\";\n\nexport type Id = string;\n\nexport type Ids = Id[];\n"
        );
    }
}
