//! Intermediate representation for accessor generation.
//!
//! Three layers, each testable on its own:
//! 1. API-level IR: normalized operations, shared by every input variant
//! 2. TypeScript AST IR: types, expressions, statements, functions
//! 3. Emission: AST to TypeScript code strings via the `Emit` trait
//!
//! ## Module Structure
//!
//! - `types`: TypeScript AST IR (TsType, TsExpr, TsStmt, TsFunction, TsModule)
//! - `api`: API-level IR (OperationDescriptor, RequestShape, NormalizedApi)
//! - `codegen`: API IR -> TypeScript AST
//! - `emit`: TypeScript AST -> code strings (via Emit trait)
//! - `utils`: identifier and literal helpers

pub mod api;
pub mod codegen;
pub mod emit;
pub mod types;
pub mod utils;

pub use codegen::{codegen_module, generate_typescript};
pub use emit::Emit;
