use genql_core::types::{attribute, Field, FieldName, FieldType, Model, ModelName};
use genql_core::Registry;

use crate::error::DslError;
use crate::scanner::{locate_block, strip_line_comment, BlockSpan, Lexical, ScanOutcome};

/// Returns true if `document` declares a `model <name>` header.
///
/// Matching is on whole identifiers: `User` does not match
/// `model UserProfile`.
pub fn model_exists(document: &str, name: &str) -> bool {
    !matches!(locate_block(document, name), ScanOutcome::NotFound)
}

/// Locates a model block or reports why it cannot be used.
pub(crate) fn find_block(document: &str, name: &str) -> Result<BlockSpan, DslError> {
    match locate_block(document, name) {
        ScanOutcome::Found(span) => Ok(span),
        ScanOutcome::Unterminated { .. } => Err(DslError::UnterminatedBlock {
            name: name.to_string(),
        }),
        ScanOutcome::NotFound => Err(DslError::ModelNotFound {
            name: name.to_string(),
        }),
    }
}

/// Reconstructs models and identifier types from existing document text.
///
/// Reading is permissive: a type name the registry does not know is taken
/// as a model reference, so anything the writer produced reads back.
pub struct DocumentReader<'r> {
    registry: &'r Registry,
}

impl<'r> DocumentReader<'r> {
    pub fn new(registry: &'r Registry) -> Self {
        Self { registry }
    }

    /// Rebuilds the `Model` declared by the block of `name`.
    ///
    /// Blank lines, `//` comments and `@@` block attributes are skipped.
    /// A repeated field name keeps its first occurrence.
    ///
    /// # Errors
    ///
    /// `ModelNotFound`, `UnterminatedBlock`, or `MalformedFieldLine` for a
    /// line with fewer than two words or an unusable field name.
    pub fn read_model(&self, document: &str, name: &str) -> Result<Model, DslError> {
        let block = find_block(document, name)?;
        let mut model = Model::new(ModelName::new(name)?);

        for line in block.body(document).lines() {
            let words: Vec<&str> = strip_line_comment(line).split_whitespace().collect();
            if words.is_empty() || words[0].starts_with("@@") {
                continue;
            }

            let field = self.field_from_words(name, line, &words)?;
            let field_name = field.name().to_string();
            if model.push_field(field).is_err() {
                tracing::warn!(
                    model = name,
                    field = %field_name,
                    "field declared more than once; keeping the first line"
                );
            }
        }

        Ok(model)
    }

    /// The declared type of the identifier field of model `name`.
    ///
    /// Finds the first `@id` marker in the block and takes the run of
    /// letters immediately before it as the type name.
    ///
    /// # Errors
    ///
    /// `ModelNotFound`, `IdentifierNotFound` if the block has no `@id`,
    /// `UnknownType` if the recovered name is not a registered type.
    pub fn id_field_type(&self, document: &str, name: &str) -> Result<FieldType, DslError> {
        let block = find_block(document, name)?;
        let body = block.body(document);

        let marker_at = find_identifier_marker(body).ok_or_else(|| {
            DslError::IdentifierNotFound {
                model: name.to_string(),
            }
        })?;

        let type_name: String = {
            let mut reversed: Vec<char> = body[..marker_at]
                .chars()
                .rev()
                .skip_while(|c| !c.is_ascii_alphabetic())
                .take_while(|c| c.is_ascii_alphabetic())
                .collect();
            reversed.reverse();
            reversed.into_iter().collect()
        };

        self.registry
            .type_for_document_name(&type_name)
            .ok_or_else(|| DslError::UnknownType {
                model: name.to_string(),
                type_name,
            })
    }

    fn field_from_words(&self, model: &str, line: &str, words: &[&str]) -> Result<Field, DslError> {
        let malformed = || DslError::MalformedFieldLine {
            model: model.to_string(),
            line: line.trim().to_string(),
        };

        let [name, type_word, rest @ ..] = words else {
            return Err(malformed());
        };
        let name = FieldName::new(*name).map_err(|_| malformed())?;

        let mut base: &str = type_word;
        let mut is_array = false;
        let mut is_optional = false;
        loop {
            if let Some(stripped) = base.strip_suffix('?') {
                is_optional = true;
                base = stripped;
            } else if let Some(stripped) = base.strip_suffix("[]") {
                is_array = true;
                base = stripped;
            } else {
                break;
            }
        }
        if base.is_empty() {
            return Err(malformed());
        }

        let field_type = self
            .registry
            .type_for_document_name(base)
            .unwrap_or_else(|| FieldType::NonPrimitive(base.to_string()));

        let mut field = Field::new(name, field_type).with_attribute(rest.join(" "));
        if is_array {
            field = field.array();
        }
        if is_optional {
            field = field.optional();
        }
        Ok(field)
    }
}

/// Offset of the first standalone `@id` in `body`.
///
/// `@idx`, the `@id` inside `@@id([...])` and any `@id` in a comment or
/// string literal do not count.
fn find_identifier_marker(body: &str) -> Option<usize> {
    let marker = attribute::IDENTIFIER;
    let mut lexical = Lexical::default();
    let mut chars = body.char_indices().peekable();
    while let Some((at, ch)) = chars.next() {
        let next = chars.peek().map(|&(_, c)| c);
        if !lexical.step(ch, next) || !body[at..].starts_with(marker) {
            continue;
        }
        let before_ok = !body[..at].ends_with('@');
        let after_ok = body[at + marker.len()..]
            .chars()
            .next()
            .map_or(true, |c| !(c.is_ascii_alphanumeric() || c == '_'));
        if before_ok && after_ok {
            return Some(at);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = "generator client {\n  provider = \"prisma-client-js\"\n}\n\nmodel User {\n\tid    Int     @id @default(autoincrement())\n\tname  String\n\ttags  String[]\n\tbio   String?  @default(\"none\")\n\tposts Post[]\n}\n\nmodel Post {\n  id       String @id @default(uuid())\n  // written by\n  author   User?\n  @@index([author])\n}\n";

    #[test]
    fn model_exists_uses_whole_names() {
        assert!(model_exists(DOC, "User"));
        assert!(model_exists(DOC, "Post"));
        assert!(!model_exists(DOC, "Use"));
        assert!(!model_exists(DOC, "client"));
    }

    #[test]
    fn read_model_reconstructs_fields() {
        let registry = Registry::prisma();
        let model = DocumentReader::new(&registry).read_model(DOC, "User").unwrap();
        assert_eq!(model.name().as_str(), "User");
        assert_eq!(model.len(), 5);

        let id = model.field("id").unwrap();
        assert_eq!(id.field_type(), &FieldType::Int);
        assert_eq!(id.attribute(), "@id @default(autoincrement())");
        assert!(id.is_identifier());

        assert!(model.field("tags").unwrap().is_array());

        let bio = model.field("bio").unwrap();
        assert!(bio.is_optional());
        assert_eq!(bio.attribute(), "@default(\"none\")");

        let posts = model.field("posts").unwrap();
        assert_eq!(posts.field_type(), &FieldType::NonPrimitive("Post".into()));
        assert!(posts.is_array());
    }

    #[test]
    fn read_model_skips_comments_and_block_attributes() {
        let registry = Registry::prisma();
        let model = DocumentReader::new(&registry).read_model(DOC, "Post").unwrap();
        let names: Vec<&str> = model.fields().iter().map(|f| f.name().as_str()).collect();
        assert_eq!(names, ["id", "author"]);
    }

    #[test]
    fn read_model_missing() {
        let registry = Registry::prisma();
        let err = DocumentReader::new(&registry).read_model(DOC, "Comment").unwrap_err();
        assert_eq!(err, DslError::ModelNotFound { name: "Comment".into() });
    }

    #[test]
    fn read_model_keeps_first_duplicate() {
        let registry = Registry::prisma();
        let doc = "model A {\n\tx Int\n\tx String\n}\n";
        let model = DocumentReader::new(&registry).read_model(doc, "A").unwrap();
        assert_eq!(model.len(), 1);
        assert_eq!(model.fields()[0].field_type(), &FieldType::Int);
    }

    #[test]
    fn read_model_rejects_single_word_line() {
        let registry = Registry::prisma();
        let doc = "model A {\n\tlonely\n}\n";
        let err = DocumentReader::new(&registry).read_model(doc, "A").unwrap_err();
        assert_eq!(
            err,
            DslError::MalformedFieldLine {
                model: "A".into(),
                line: "lonely".into()
            }
        );
    }

    #[test]
    fn markers_in_either_order_read_back() {
        let registry = Registry::prisma();
        let doc = "model A {\n\tx Int?[]\n}\n";
        let model = DocumentReader::new(&registry).read_model(doc, "A").unwrap();
        let x = model.field("x").unwrap();
        assert!(x.is_array() && x.is_optional());
    }

    #[test]
    fn id_field_type_int() {
        let registry = Registry::prisma();
        let ty = DocumentReader::new(&registry).id_field_type(DOC, "User").unwrap();
        assert_eq!(ty, FieldType::Int);
    }

    #[test]
    fn id_field_type_string() {
        let registry = Registry::prisma();
        let ty = DocumentReader::new(&registry).id_field_type(DOC, "Post").unwrap();
        assert_eq!(ty, FieldType::String);
    }

    #[test]
    fn id_field_type_on_one_line_block() {
        let registry = Registry::prisma();
        let doc = "model User { id Int @id name String }";
        let ty = DocumentReader::new(&registry).id_field_type(doc, "User").unwrap();
        assert_eq!(ty, FieldType::Int);
    }

    #[test]
    fn id_field_type_without_marker() {
        let registry = Registry::prisma();
        let doc = "model Tag {\n\tname String @unique\n}\n";
        let err = DocumentReader::new(&registry).id_field_type(doc, "Tag").unwrap_err();
        assert_eq!(err, DslError::IdentifierNotFound { model: "Tag".into() });
    }

    #[test]
    fn id_marker_in_other_model_is_not_used() {
        let registry = Registry::prisma();
        let doc = "model Tag {\n\tname String\n}\n\nmodel User {\n\tid Int @id\n}\n";
        let err = DocumentReader::new(&registry).id_field_type(doc, "Tag").unwrap_err();
        assert!(matches!(err, DslError::IdentifierNotFound { .. }));
    }

    #[test]
    fn id_field_type_unknown() {
        let registry = Registry::prisma();
        let doc = "model Tag {\n\tid Slug @id\n}\n";
        let err = DocumentReader::new(&registry).id_field_type(doc, "Tag").unwrap_err();
        assert_eq!(
            err,
            DslError::UnknownType {
                model: "Tag".into(),
                type_name: "Slug".into()
            }
        );
    }

    #[test]
    fn compound_id_is_not_an_identifier_marker() {
        assert_eq!(find_identifier_marker("\ta Int\n\t@@id([a, b])\n"), None);
        assert_eq!(find_identifier_marker("\tx Int @idx\n"), None);
        assert_eq!(find_identifier_marker("\tx Int @id\n"), Some(7));
    }

    #[test]
    fn identifier_marker_in_comment_or_string_is_skipped() {
        let body = "\t// old: code Slug @id\n\tnote String @default(\"@id\")\n\tid String @id\n";
        assert_eq!(find_identifier_marker(body), body.rfind("@id"));

        let registry = Registry::prisma();
        let doc = format!("model Tag {{{body}}}\n");
        let ty = DocumentReader::new(&registry).id_field_type(&doc, "Tag").unwrap();
        assert_eq!(ty, FieldType::String);
    }

    #[test]
    fn read_model_keeps_braces_and_slashes_in_defaults() {
        let registry = Registry::prisma();
        let doc = "model A {\n\ttmpl String @default(\"}\") // closes\n\turl String @default(\"a//b\")\n\tid Int @id\n}\n";
        let model = DocumentReader::new(&registry).read_model(doc, "A").unwrap();
        assert_eq!(model.len(), 3);
        assert_eq!(model.field("tmpl").unwrap().attribute(), "@default(\"}\")");
        assert_eq!(model.field("url").unwrap().attribute(), "@default(\"a//b\")");
    }
}
