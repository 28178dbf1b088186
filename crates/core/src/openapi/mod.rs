//! OpenAPI input: document model, descriptor adapter and the declarations
//! module the generated accessors import from.

pub mod adapter;
pub mod spec;
pub mod typed;

pub use adapter::OpenApiDocument;
pub use spec::OpenApiSpec;
pub use typed::generate_declarations;
