//! Pure text edits on a schema document.
//!
//! Both functions return a new string; bytes outside the inserted text
//! are copied unchanged.

use genql_core::types::{Field, Model};

use crate::error::DslError;
use crate::printer::{print_field_line, print_model};
use crate::reader::find_block;

/// Appends the rendered block of `model` to the end of `document`.
pub fn append_model(document: &str, model: &Model) -> String {
    let block = print_model(model);
    let mut out = String::with_capacity(document.len() + block.len());
    out.push_str(document);
    out.push_str(&block);
    out
}

/// Inserts `field` as the last line of the block of `model_name`,
/// immediately before its closing brace.
///
/// No duplicate check is made: patching the same field twice yields two
/// lines.
///
/// # Errors
///
/// `ModelNotFound` or `UnterminatedBlock`; `document` is not modified.
pub fn patch_field(document: &str, field: &Field, model_name: &str) -> Result<String, DslError> {
    let block = find_block(document, model_name)?;
    let line = print_field_line(field);
    let at = block.close_brace;

    tracing::debug!(model = model_name, field = %field.name(), offset = at, "patching field");

    let mut out = String::with_capacity(document.len() + line.len());
    out.push_str(&document[..at]);
    out.push_str(&line);
    out.push_str(&document[at..]);
    Ok(out)
}
