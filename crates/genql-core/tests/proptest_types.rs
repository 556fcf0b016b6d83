use genql_core::types::{Field, FieldName, FieldType, Model, ModelName, RelationDecl, RelationKind};
use genql_core::Registry;
use proptest::prelude::*;

fn primitive() -> impl Strategy<Value = FieldType> {
    prop::sample::select(FieldType::primitives().to_vec())
}

proptest! {
    #[test]
    fn field_name_display_roundtrip(s in "[A-Za-z_][A-Za-z0-9_]{0,30}") {
        let name = FieldName::new(&s).unwrap();
        let back = FieldName::new(name.to_string()).unwrap();
        prop_assert_eq!(name, back);
    }

    #[test]
    fn model_name_rejects_leading_digit(s in "[0-9][A-Za-z0-9]{0,20}") {
        prop_assert!(ModelName::new(&s).is_err());
    }

    #[test]
    fn document_keyword_resolves_back(t in primitive()) {
        let registry = Registry::prisma();
        let keyword = t.document_name().unwrap();
        prop_assert_eq!(registry.type_for_document_name(keyword), Some(t.clone()));
        prop_assert_eq!(
            registry.type_for_document_name(&keyword.to_ascii_uppercase()),
            Some(t)
        );
    }

    #[test]
    fn field_line_starts_with_name_and_type(
        name in "[a-z][a-zA-Z0-9]{0,15}",
        t in primitive(),
        array in any::<bool>(),
        optional in any::<bool>(),
    ) {
        let mut field = Field::new(FieldName::new(&name).unwrap(), t.clone());
        if array {
            field = field.array();
        }
        if optional {
            field = field.optional();
        }
        let line = field.to_string();
        let mut words = line.split_whitespace();
        prop_assert_eq!(words.next(), Some(name.as_str()));
        let ty = words.next().unwrap();
        prop_assert!(ty.starts_with(t.document_name().unwrap()));
        prop_assert_eq!(ty.contains("[]"), array);
        prop_assert_eq!(ty.ends_with('?'), optional);
    }

    #[test]
    fn model_keeps_insertion_order(names in prop::collection::hash_set("[a-z]{1,8}", 1..10)) {
        let names: Vec<String> = names.into_iter().collect();
        let fields = names
            .iter()
            .map(|n| Field::new(FieldName::new(n).unwrap(), FieldType::String))
            .collect();
        let model = Model::with_fields(ModelName::new("M").unwrap(), fields).unwrap();
        let back: Vec<&str> = model.fields().iter().map(|f| f.name().as_str()).collect();
        prop_assert_eq!(back, names.iter().map(String::as_str).collect::<Vec<_>>());
    }

    #[test]
    fn relation_with_extra_colon_is_rejected(a in "[a-z]{1,6}", b in "[A-Z][a-z]{0,6}", c in "[a-z]{0,6}") {
        let token = format!("{a}:{b}:{c}");
        prop_assert!(RelationDecl::parse(RelationKind::OneToMany, &token).is_err());
    }
}
