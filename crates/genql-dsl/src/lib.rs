//! # genql-dsl
//!
//! Spec-token parsing and schema document editing for genql.
//!
//! This crate provides:
//! - A parser that turns `name:type[:modifier]` tokens into `Field`s and
//!   `Model`s
//! - A block scanner that locates `model Name { ... }` regions in
//!   arbitrary document text
//! - A reader that reconstructs a `Model` from an existing block
//! - A printer and writer that append models and patch fields into
//!   existing blocks, leaving every other byte untouched
//! - A relation deriver that adds the fields both sides of a relation need
//! - A file-backed document that stages edits in memory and commits them
//!   atomically
//!
//! # Example
//!
//! ```
//! use genql_core::Registry;
//! use genql_dsl::{generate_model, DocumentEdit};
//!
//! let registry = Registry::prisma();
//! let mut edit = DocumentEdit::new("model Book {\n\tid Int @id\n}\n".to_string());
//! let tokens = ["id:id:uuid", "name:string"];
//! let model = generate_model(&registry, &mut edit, "Author", &tokens, &[]).expect("generate failed");
//!
//! assert_eq!(model.len(), 2);
//! assert!(edit.text().contains("model Author {"));
//! ```

pub mod document;
pub mod error;
mod lexer;
pub mod parser;
pub mod printer;
pub mod reader;
pub mod relation;
pub mod scanner;
pub mod token;
pub mod writer;

use genql_core::types::{Model, RelationDecl};
use genql_core::Registry;

pub use document::{DocumentEdit, SchemaDocument};
pub use error::{DslError, Span};
pub use parser::SpecParser;
pub use printer::{print_field_line, print_model};
pub use reader::{model_exists, DocumentReader};
pub use relation::{parse_relation, RelationDeriver};
pub use scanner::{locate_block, BlockSpan, ScanOutcome, ScanState};

/// Builds a model from spec tokens, applies its relations and appends it.
///
/// All edits land in `edit`; nothing reaches disk until the caller commits
/// the edit, so a failure on any token or relation leaves the document as
/// it was loaded.
///
/// # Errors
///
/// Returns the first parse, lookup or patch failure encountered.
pub fn generate_model<S: AsRef<str>>(
    registry: &Registry,
    edit: &mut DocumentEdit,
    name: &str,
    tokens: &[S],
    relations: &[RelationDecl],
) -> Result<Model, DslError> {
    let mut model = SpecParser::new(registry).parse_model(edit.text(), name, tokens)?;

    let deriver = RelationDeriver::new(registry);
    for decl in relations {
        deriver.derive(edit, &mut model, decl)?;
    }

    edit.append_model(&model);
    Ok(model)
}
