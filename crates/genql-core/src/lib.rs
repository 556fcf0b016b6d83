//! # genql-core
//!
//! Core data model for the genql schema generator: the closed set of
//! field types, the lookup tables that translate between spec tokens,
//! document keywords and host-language names, and the `Field` / `Model`
//! values that the parser builds and the document reader reconstructs.

pub mod error;
pub mod registry;
pub mod types;

pub use error::SchemaError;
pub use registry::Registry;
