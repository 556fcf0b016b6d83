use genql_core::types::{RelationDecl, RelationKind};
use genql_core::Registry;
use genql_dsl::{generate_model, parse_relation, print_model, DocumentReader};

use crate::cli::{GlobalOpts, ModelArgs};
use crate::error::CliError;
use crate::output::{OutputContext, OutputMode};

/// Run the `model` command: build a model, derive its relations and
/// append it to the document in a single commit.
pub fn run(args: ModelArgs, global: &GlobalOpts, output: &OutputContext) -> Result<(), CliError> {
    let (_config, document) = super::open_document(global)?;
    let registry = Registry::prisma();
    let relations = collect_relations(&args)?;

    let mut edit = document.begin()?;
    let model = generate_model(
        &registry,
        &mut edit,
        &args.name,
        args.fields.as_slice(),
        &relations,
    )?;
    let partners = partner_names(&relations);

    let id_type = DocumentReader::new(&registry)
        .id_field_type(edit.text(), &args.name)
        .ok();

    if args.dry_run {
        tracing::info!(model = %args.name, "dry run; document left unchanged");
    } else {
        document.commit(edit)?;
    }

    match output.mode {
        OutputMode::Human => {
            if args.dry_run {
                print!("{}", print_model(&model).trim_start());
                if !partners.is_empty() {
                    output.status(&format!("would patch: {}", partners.join(", ")));
                }
                output.status("dry run: document not written");
            } else {
                output.success(&format!(
                    "Added model {} ({} fields) to {}.",
                    model.name(),
                    model.len(),
                    document.path().display()
                ));
                if !partners.is_empty() {
                    output.status(&format!("patched: {}", partners.join(", ")));
                }
            }
        }
        OutputMode::Json => {
            let json = serde_json::json!({
                "model": super::show::model_to_json(&model, &registry, id_type.as_ref()),
                "partners": partners,
                "path": document.path().display().to_string(),
                "dry_run": args.dry_run,
            });
            output.print_json(&json);
        }
        OutputMode::Plain => {
            println!("{}\t{}\t{}", model.name(), model.len(), partners.join(","));
        }
    }

    Ok(())
}

/// Parses the relation flags in a fixed order: one-to-one, one-to-many,
/// many-to-many, each in command-line order.
fn collect_relations(args: &ModelArgs) -> Result<Vec<RelationDecl>, CliError> {
    let groups = [
        (RelationKind::OneToOne, &args.one_to_one),
        (RelationKind::OneToMany, &args.one_to_many),
        (RelationKind::ManyToMany, &args.many_to_many),
    ];

    let mut relations = Vec::new();
    for (kind, tokens) in groups {
        for token in tokens {
            relations.push(parse_relation(kind, token)?);
        }
    }
    Ok(relations)
}

/// Distinct partner names in first-seen order.
fn partner_names(relations: &[RelationDecl]) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for decl in relations {
        let name = decl.partner.to_string();
        if !names.contains(&name) {
            names.push(name);
        }
    }
    names
}
