//! Typed TanStack Query accessor generation.
//!
//! Turns an API description into a TypeScript module of `use<Name>Query` /
//! `use<Name>Mutation` accessors that delegate I/O to a user-supplied fetcher.
//! Three input variants are supported:
//!
//! - a flat JSON list of operations ([`schema::FlatDocument`]);
//! - a split JSON document with a type dictionary ([`schema::SplitDocument`]);
//! - an OpenAPI 3.x document ([`openapi::OpenApiDocument`]), which also yields
//!   a declarations module.
//!
//! All of them normalize into [`ir::api::NormalizedApi`], which a single
//! emitter ([`ir::codegen`]) turns into TypeScript.
//!
//! ```
//! use querygen_core::{Framework, GeneratorConfig, SourceFormat, generate_source};
//!
//! let config = GeneratorConfig::new("./fetcher#apiFetcher".parse()?, Framework::React);
//! let schema = r#"[{ "name": "getUser", "url": "/users/:id",
//!                    "request": { "params!": { "id!": "string" } } }]"#;
//! let artifacts = generate_source(schema, SourceFormat::Json, "api", &config)?
//!     .expect("one operation");
//! assert!(artifacts.module.contains("export function useGetUserQuery("));
//! # Ok::<(), querygen_core::Error>(())
//! ```

pub mod config;
pub mod error;
pub mod generator;
pub mod ir;
pub mod openapi;
pub mod schema;
pub mod url;

pub use config::{FetcherRef, Framework, GeneratorConfig};
pub use error::{Error, Result};
pub use generator::{
    Artifacts, SourceDocument, SourceFormat, generate_dir, generate_file, generate_source,
};
