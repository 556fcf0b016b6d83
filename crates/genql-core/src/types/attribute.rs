//! Attribute text understood by the engine.
//!
//! A field's attribute is free text (`@id @default(uuid())`); these helpers
//! build the fragments the parser emits and test for the markers the
//! reader and relation deriver look for.

/// Marks the identifier field of a model.
pub const IDENTIFIER: &str = "@id";

/// Marks a field whose values are unique across rows.
pub const UNIQUE: &str = "@unique";

const DEFAULT_PREFIX: &str = "@default";

/// `@default("<value>")` for a modifier that names no registered keyword.
///
/// `"` and `\` in the value are backslash-escaped so the literal stays one
/// string token.
pub fn literal_default(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    for ch in value.chars() {
        if matches!(ch, '"' | '\\') {
            quoted.push('\\');
        }
        quoted.push(ch);
    }
    format!("{DEFAULT_PREFIX}(\"{quoted}\")")
}

/// `@relation(fields: [<foreign_key>], references: [<reference>])`.
pub fn relation(foreign_key: &str, reference: &str) -> String {
    format!("@relation(fields: [{foreign_key}], references: [{reference}])")
}

/// True when `marker` appears as a whole whitespace-separated word.
///
/// `@id` matches in `@id @default(uuid())` but not in `@idx`.
pub fn has_marker(attribute: &str, marker: &str) -> bool {
    attribute.split_whitespace().any(|word| word == marker)
}

pub fn has_default(attribute: &str) -> bool {
    attribute
        .split_whitespace()
        .any(|word| word.starts_with(DEFAULT_PREFIX))
}

/// Joins attribute fragments with single spaces, skipping empty ones.
pub fn join<I, S>(parts: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out = String::new();
    for part in parts {
        let part = part.as_ref();
        if part.is_empty() {
            continue;
        }
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(part);
    }
    out
}
