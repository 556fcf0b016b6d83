use genql_core::types::{FieldType, RelationKind};
use genql_core::Registry;
use genql_dsl::{generate_model, parse_relation, DocumentEdit, DocumentReader};

const LIBRARY: &str = "model Book {\n\tid String @id @default(uuid())\n\ttitle String\n}\n\nmodel Publisher {\n\tcode Int @id @default(autoincrement())\n}\n";

#[test]
fn author_one_to_many_books() {
    let registry = Registry::prisma();
    let mut edit = DocumentEdit::new(LIBRARY.to_string());
    let relations = [parse_relation(RelationKind::OneToMany, "book:Book").unwrap()];

    let author = generate_model(&registry, &mut edit, "Author", &["id:id:ai", "name:string"], &relations)
        .unwrap();

    let reader = DocumentReader::new(&registry);
    let book = reader.read_model(edit.text(), "Book").unwrap();
    let back = book.field("author").unwrap();
    assert!(back.is_array());
    assert!(!back.is_optional());
    assert_eq!(back.field_type(), &FieldType::NonPrimitive("Author".into()));

    let book_id = reader.id_field_type(edit.text(), "Book").unwrap();
    assert_eq!(author.field("bookId").unwrap().field_type(), &book_id);

    // the appended block reads back as the model that was built
    assert_eq!(reader.read_model(edit.text(), "Author").unwrap(), author);
}

#[test]
fn one_to_one_references_partner_identifier_name() {
    let registry = Registry::prisma();
    let mut edit = DocumentEdit::new(LIBRARY.to_string());
    let relations = [parse_relation(RelationKind::OneToOne, "publisher:Publisher").unwrap()];

    let imprint = generate_model(&registry, &mut edit, "Imprint", &["id:id:uuid"], &relations)
        .unwrap();

    let relation = imprint.field("publisher").unwrap();
    assert_eq!(
        relation.attribute(),
        "@relation(fields: [publisherId], references: [code])"
    );
    let fk = imprint.field("publisherId").unwrap();
    assert_eq!(fk.field_type(), &FieldType::Int);
    assert!(fk.is_unique());
    assert!(edit.text().contains("\tcode Int @id @default(autoincrement())\n\timprint Imprint?\n}"));
}

#[test]
fn several_relations_patch_each_partner() {
    let registry = Registry::prisma();
    let mut edit = DocumentEdit::new(LIBRARY.to_string());
    let relations = [
        parse_relation(RelationKind::ManyToMany, "book:Book").unwrap(),
        parse_relation(RelationKind::OneToMany, "publisher:Publisher").unwrap(),
    ];

    let tag = generate_model(&registry, &mut edit, "Genre", &["id:id:ai"], &relations).unwrap();

    let names: Vec<&str> = tag.fields().iter().map(|f| f.name().as_str()).collect();
    assert_eq!(names, ["id", "books", "publisher", "publisherId"]);
    assert!(edit.text().contains("\ttitle String\n\tgenres Genre[]\n}"));
    assert!(edit.text().contains("\tgenre Genre[]\n}"));
    assert!(edit.text().ends_with("model Genre {\n\tid Int @id @default(autoincrement())\n\tbooks Book[]\n\tpublisher Publisher @relation(fields: [publisherId], references: [code])\n\tpublisherId Int\n}\n"));
}
