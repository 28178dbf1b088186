//! Hand-written schema documents: parsing and normalization.

pub mod document;
pub mod node;

pub use document::{DescriptorSource, FlatDocument, SplitDocument};
pub use node::{Field, SchemaNode, synthesize};
