//! Materialises relation declarations as fields on both models.

use genql_core::types::{attribute, Field, FieldName, FieldType, Model, RelationDecl, RelationKind};
use genql_core::Registry;

use crate::document::DocumentEdit;
use crate::error::DslError;
use crate::reader::{find_block, DocumentReader};

/// Parses a `field:Partner` relation token.
///
/// # Errors
///
/// `InvalidRelationFormat` unless the token has exactly two non-empty
/// colon-separated parts.
pub fn parse_relation(kind: RelationKind, token: &str) -> Result<RelationDecl, DslError> {
    Ok(RelationDecl::parse(kind, token)?)
}

/// Adds relation fields to the model being built and patches the
/// back-reference into the partner block of a staged document.
pub struct RelationDeriver<'r> {
    reader: DocumentReader<'r>,
}

impl<'r> RelationDeriver<'r> {
    pub fn new(registry: &'r Registry) -> Self {
        Self {
            reader: DocumentReader::new(registry),
        }
    }

    /// Applies `decl` between `local` and its partner.
    ///
    /// Everything the partner side needs is read before anything is
    /// staged, and the local fields are pushed before the partner is
    /// patched, so a failure leaves both `local` and `edit` as they were.
    ///
    /// # Errors
    ///
    /// Lookup failures on the partner block (`ModelNotFound`,
    /// `IdentifierNotFound`, `UnknownType`) or `DuplicateField` when a
    /// derived local field clashes with one already declared.
    pub fn derive(
        &self,
        edit: &mut DocumentEdit,
        local: &mut Model,
        decl: &RelationDecl,
    ) -> Result<(), DslError> {
        let local_name = local.name().to_string();
        let partner = decl.partner.as_str();
        let back_name = local.name().to_field_case();

        let (local_fields, partner_field) = match decl.kind {
            RelationKind::OneToOne | RelationKind::OneToMany => {
                let (id_name, id_type) = self.partner_identifier(edit.text(), partner)?;
                let fk_name = format!("{}Id", decl.field);

                let relation = Field::new(
                    decl.field.clone(),
                    FieldType::NonPrimitive(partner.to_string()),
                )
                .with_attribute(attribute::relation(&fk_name, &id_name));

                let mut foreign_key = Field::new(FieldName::new(fk_name)?, id_type);
                let back = Field::new(
                    FieldName::new(back_name)?,
                    FieldType::NonPrimitive(local_name.clone()),
                );
                let back = if decl.kind == RelationKind::OneToOne {
                    foreign_key = foreign_key.with_attribute(attribute::UNIQUE);
                    back.optional()
                } else {
                    back.array()
                };

                (vec![relation, foreign_key], back)
            }
            RelationKind::ManyToMany => {
                find_block(edit.text(), partner)?;
                let back = Field::new(
                    FieldName::new(pluralize(&back_name))?,
                    FieldType::NonPrimitive(local_name.clone()),
                )
                .array();

                let forward = Field::new(
                    FieldName::new(pluralize(decl.field.as_str()))?,
                    FieldType::NonPrimitive(partner.to_string()),
                )
                .array();
                (vec![forward], back)
            }
        };

        let mut staged = local.clone();
        for field in local_fields {
            let field_name = field.name().to_string();
            staged.push_field(field).map_err(|_| DslError::DuplicateField {
                model: local_name.clone(),
                field: field_name,
            })?;
        }

        edit.patch_field(&partner_field, partner)?;
        *local = staged;

        tracing::debug!(
            kind = %decl.kind,
            local = %local_name,
            partner,
            field = %decl.field,
            "relation derived"
        );
        Ok(())
    }

    fn partner_identifier(&self, document: &str, partner: &str) -> Result<(String, FieldType), DslError> {
        let id_type = self.reader.id_field_type(document, partner)?;
        let model = self.reader.read_model(document, partner)?;
        let id_name = model
            .identifier()
            .map(|f| f.name().to_string())
            .ok_or_else(|| DslError::IdentifierNotFound {
                model: partner.to_string(),
            })?;
        Ok((id_name, id_type))
    }
}

/// Appends `s` unless the name already ends in `s`.
fn pluralize(name: &str) -> String {
    if name.ends_with('s') {
        name.to_string()
    } else {
        format!("{name}s")
    }
}
