//! Immutable lookup tables shared by the parser, the document reader and
//! the downstream generators.
//!
//! A [`Registry`] is built once per process and borrowed by everything
//! that needs to translate between spec tokens, document keywords and
//! host-language type names.

use std::collections::HashMap;

use crate::types::FieldType;

/// Type, modifier and host-language tables.
#[derive(Debug, Clone)]
pub struct Registry {
    types: HashMap<&'static str, FieldType>,
    modifiers: HashMap<&'static str, &'static str>,
    host_types: HashMap<FieldType, &'static str>,
}

impl Registry {
    /// Tables for Prisma documents with TypeScript as the host language.
    pub fn prisma() -> Self {
        let types = HashMap::from([
            ("string", FieldType::String),
            ("int", FieldType::Int),
            ("bigint", FieldType::BigInt),
            ("float", FieldType::Float),
            ("date", FieldType::DateTime),
            ("json", FieldType::Json),
            ("bytes", FieldType::Bytes),
            ("bool", FieldType::Boolean),
        ]);

        let modifiers = HashMap::from([
            ("ai", "@default(autoincrement())"),
            ("uuid", "@default(uuid())"),
            ("true", "@default(true)"),
            ("false", "@default(false)"),
            ("unique", "@unique"),
        ]);

        let host_types = HashMap::from([
            (FieldType::String, "string"),
            (FieldType::Int, "number"),
            (FieldType::BigInt, "number"),
            (FieldType::Float, "number"),
            (FieldType::DateTime, "Date"),
            (FieldType::Json, "any"),
            (FieldType::Bytes, "Uint8Array"),
            (FieldType::Boolean, "boolean"),
        ]);

        Self {
            types,
            modifiers,
            host_types,
        }
    }

    /// Maps a lowercase spec token (`int`, `date`, ...) to its type.
    pub fn type_for_token(&self, token: &str) -> Option<FieldType> {
        self.types.get(token).cloned()
    }

    /// Resolves a type name read back from a document.
    ///
    /// Matches document keywords case-insensitively (`Int`, `int`,
    /// `DATETIME`) and falls back to the spec tokens (`date`, `bool`).
    pub fn type_for_document_name(&self, name: &str) -> Option<FieldType> {
        FieldType::primitives()
            .into_iter()
            .find(|t| {
                t.document_name()
                    .is_some_and(|keyword| keyword.eq_ignore_ascii_case(name))
            })
            .or_else(|| self.type_for_token(&name.to_ascii_lowercase()))
    }

    /// The attribute text a modifier keyword expands to, if registered.
    pub fn modifier_attribute(&self, modifier: &str) -> Option<&'static str> {
        self.modifiers.get(modifier).copied()
    }

    /// The host-language type name for a primitive; `None` for
    /// `NonPrimitive`.
    pub fn host_type(&self, field_type: &FieldType) -> Option<&'static str> {
        self.host_types.get(field_type).copied()
    }

    /// Registered spec tokens, sorted.
    pub fn type_tokens(&self) -> Vec<&'static str> {
        let mut tokens: Vec<&'static str> = self.types.keys().copied().collect();
        tokens.sort_unstable();
        tokens
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::prisma()
    }
}
