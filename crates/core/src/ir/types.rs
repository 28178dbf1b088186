//! TypeScript IR types for code generation.
//!
//! This module defines the TypeScript type system representation:
//! - TsType: Types (primitives, arrays, unions, objects, opaque references)
//! - TsExpr: Expressions (identifiers, calls, arrows, object literals)
//! - TsStmt / TsFunction / TsModule: the items of a generated module

/// TypeScript type representation
#[derive(Debug, Clone, PartialEq)]
pub enum TsType {
    /// Built-in types: string, number, boolean, null, undefined, unknown, any, never
    Primitive(TsPrimitive),
    /// Array type: T[]
    Array(Box<TsType>),
    /// Union type: A | B | C
    Union(Vec<TsType>),
    /// Intersection type: A & B & C
    Intersection(Vec<TsType>),
    /// Object type, one property per line
    Object(Vec<TsProp>),
    /// Record type: Record<K, V>
    Record {
        /// Key type.
        key: Box<TsType>,
        /// Value type.
        value: Box<TsType>,
    },
    /// Literal type: "foo", 42, true
    Literal(TsLiteral),
    /// Opaque type name or expression, emitted verbatim
    Ref(String),
}

impl TsType {
    /// Shorthand for an opaque reference.
    pub fn reference(name: impl Into<String>) -> Self {
        TsType::Ref(name.into())
    }

    /// Wrap this type in an array.
    pub fn array_of(self) -> Self {
        TsType::Array(Box::new(self))
    }
}

/// TypeScript built-in types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TsPrimitive {
    /// `string`
    String,
    /// `number`
    Number,
    /// `boolean`
    Boolean,
    /// `null`
    Null,
    /// `undefined`
    Undefined,
    /// `unknown`
    Unknown,
    /// `any`
    Any,
    /// `never`
    Never,
}

/// Object property definition
#[derive(Debug, Clone, PartialEq)]
pub struct TsProp {
    /// Property key, quoted on emission when it is not an identifier.
    pub name: String,
    /// Property type.
    pub ty: TsType,
    /// Emitted with a `?` marker.
    pub optional: bool,
}

impl TsProp {
    /// A property that must be present.
    pub fn required(name: impl Into<String>, ty: TsType) -> Self {
        Self {
            name: name.into(),
            ty,
            optional: false,
        }
    }

    /// A property that may be absent.
    pub fn optional(name: impl Into<String>, ty: TsType) -> Self {
        Self {
            name: name.into(),
            ty,
            optional: true,
        }
    }
}

/// TypeScript literal values
#[derive(Debug, Clone, PartialEq)]
pub enum TsLiteral {
    /// String literal, escaped on emission.
    String(String),
    /// Floating point literal.
    Number(f64),
    /// Integer literal.
    Int(i64),
    /// `true` / `false`
    Bool(bool),
    /// `null`
    Null,
}

/// TypeScript expression
#[derive(Debug, Clone, PartialEq)]
pub enum TsExpr {
    /// Identifier: foo
    Ident(String),
    /// Literal value: "bar", 42
    Literal(TsLiteral),
    /// Function call: foo<T>(a, b)
    Call {
        /// Function being called.
        callee: Box<TsExpr>,
        /// Explicit type arguments.
        type_args: Vec<TsType>,
        /// Call arguments.
        args: Vec<TsExpr>,
    },
    /// Arrow function: (x) => x.foo
    Arrow {
        /// Parameters.
        params: Vec<TsParam>,
        /// Expression body.
        body: Box<TsExpr>,
    },
    /// Object literal, one entry per line
    Object(Vec<ObjectEntry>),
    /// Member access: foo.bar
    Member {
        /// Object being accessed.
        object: Box<TsExpr>,
        /// Property name.
        prop: String,
    },
    /// Array literal: [a, b, c]
    Array(Vec<TsExpr>),
}

impl TsExpr {
    /// Identifier expression.
    pub fn ident(name: impl Into<String>) -> Self {
        TsExpr::Ident(name.into())
    }

    /// String literal expression.
    pub fn string(value: impl Into<String>) -> Self {
        TsExpr::Literal(TsLiteral::String(value.into()))
    }

    /// `object.prop`
    pub fn member(object: TsExpr, prop: impl Into<String>) -> Self {
        TsExpr::Member {
            object: Box::new(object),
            prop: prop.into(),
        }
    }

    /// `callee(args)`
    pub fn call(callee: TsExpr, args: Vec<TsExpr>) -> Self {
        TsExpr::Call {
            callee: Box::new(callee),
            type_args: Vec::new(),
            args,
        }
    }

    /// `callee<T>(args)`
    pub fn call_generic(callee: TsExpr, type_arg: TsType, args: Vec<TsExpr>) -> Self {
        TsExpr::Call {
            callee: Box::new(callee),
            type_args: vec![type_arg],
            args,
        }
    }
}

/// Entry of an object literal
#[derive(Debug, Clone, PartialEq)]
pub enum ObjectEntry {
    /// `key: value`
    Prop(String, TsExpr),
    /// `...expr`
    Spread(TsExpr),
}

/// Function parameter
#[derive(Debug, Clone, PartialEq)]
pub struct TsParam {
    /// Parameter name.
    pub name: String,
    /// Type annotation, if any.
    pub ty: Option<TsType>,
    /// Emitted with a `?` marker.
    pub optional: bool,
}

// =============================================================================
// Module-Level IR (for printer)
// =============================================================================

/// Import statement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TsImport {
    /// What is bound by the import
    pub clause: ImportClause,
    /// Module path
    pub from: String,
}

/// Bindings introduced by an import
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportClause {
    /// `import { a, b as c } from "..."`
    Named(Vec<ImportItem>),
    /// `import * as ns from "..."`
    Namespace(String),
}

/// Import item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportItem {
    /// Exported name (`default` for the default export).
    pub name: String,
    /// Local binding, when it differs from the exported name.
    pub alias: Option<String>,
}

/// Type definition kind
#[derive(Debug, Clone, PartialEq)]
pub enum TypeDefKind {
    /// interface Foo { ... }
    Interface {
        /// Interface members.
        properties: Vec<TsProp>,
    },
    /// type Foo = ...
    TypeAlias {
        /// Aliased type.
        ty: TsType,
    },
}

/// Type definition
#[derive(Debug, Clone, PartialEq)]
pub struct TsTypeDef {
    /// Declared name.
    pub name: String,
    /// Generic parameters: `Values<T>`.
    pub type_params: Vec<String>,
    /// Interface or alias.
    pub kind: TypeDefKind,
    /// Prefixed with `export`.
    pub is_export: bool,
}

impl TsTypeDef {
    /// `export interface name { ... }`
    pub fn interface(name: impl Into<String>, properties: Vec<TsProp>) -> Self {
        Self {
            name: name.into(),
            type_params: Vec::new(),
            kind: TypeDefKind::Interface { properties },
            is_export: true,
        }
    }

    /// `export type name = ty;`
    pub fn alias(name: impl Into<String>, ty: TsType) -> Self {
        Self {
            name: name.into(),
            type_params: Vec::new(),
            kind: TypeDefKind::TypeAlias { ty },
            is_export: true,
        }
    }
}

/// Statement in a function body
#[derive(Debug, Clone, PartialEq)]
pub enum TsStmt {
    /// const/let declaration
    VarDecl {
        /// `const` or `let`.
        kind: VarKind,
        /// Variable name.
        name: String,
        /// Initializer.
        init: TsExpr,
    },
    /// Return statement
    Return(Option<TsExpr>),
    /// If statement without else branch
    If {
        /// Condition, emitted verbatim.
        cond: String,
        /// Statements run when the condition holds.
        then_body: Vec<TsStmt>,
    },
    /// Raw code block (for loops and other patterns that don't fit the AST)
    Raw(String),
}

/// Variable declaration kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VarKind {
    /// `const`
    Const,
    /// `let`
    Let,
}

/// Function definition
#[derive(Debug, Clone, PartialEq)]
pub struct TsFunction {
    /// Function name.
    pub name: String,
    /// Parameters.
    pub params: Vec<TsParam>,
    /// Declared return type.
    pub return_type: Option<TsType>,
    /// Body statements.
    pub body: Vec<TsStmt>,
    /// Prefixed with `export`.
    pub is_export: bool,
}

/// Top-level item of a module, kept in emission order
#[derive(Debug, Clone, PartialEq)]
pub enum TsItem {
    /// Interface or type alias.
    Type(TsTypeDef),
    /// Function declaration.
    Function(TsFunction),
}

/// Complete TypeScript module
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TsModule {
    /// Import statements, emitted first.
    pub imports: Vec<TsImport>,
    /// Declarations in emission order.
    pub items: Vec<TsItem>,
}
