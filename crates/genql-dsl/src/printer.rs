//! Renders fields and models in the schema document's block syntax.

use genql_core::types::{Field, Model};

/// One field line as it appears inside a block: tab-indented, newline
/// terminated, with single spaces between name, type and attribute.
pub fn print_field_line(field: &Field) -> String {
    format!("\t{field}\n")
}

/// A complete model block, preceded by a blank separator line.
pub fn print_model(model: &Model) -> String {
    let mut out = format!("\nmodel {} {{\n", model.name());
    for field in model.fields() {
        out.push_str(&print_field_line(field));
    }
    out.push_str("}\n");
    out
}
