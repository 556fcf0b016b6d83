use genql_core::types::{FieldType, Model};
use genql_core::Registry;
use genql_dsl::{print_model, DocumentReader};

use crate::cli::{GlobalOpts, ShowArgs};
use crate::error::CliError;
use crate::output::{OutputContext, OutputMode};

/// Run the `show` command: read a model back from the document.
pub fn run(args: ShowArgs, global: &GlobalOpts, output: &OutputContext) -> Result<(), CliError> {
    let (_config, document) = super::open_document(global)?;
    let registry = Registry::prisma();
    let text = document.load()?;

    let reader = DocumentReader::new(&registry);
    let model = reader.read_model(&text, &args.name)?;
    let id_type = match reader.id_field_type(&text, &args.name) {
        Ok(ty) => Some(ty),
        Err(e) => {
            tracing::info!(model = %args.name, reason = %e, "no identifier type");
            None
        }
    };

    match output.mode {
        OutputMode::Human => {
            print!("{}", print_model(&model).trim_start());
            match &id_type {
                Some(ty) => output.status(&format!("id type: {ty}")),
                None => output.warn(&format!("model '{}' has no @id field", args.name)),
            }
        }
        OutputMode::Json => output.print_json(&model_to_json(&model, &registry, id_type.as_ref())),
        OutputMode::Plain => {
            for field in model.fields() {
                println!(
                    "{}\t{}\t{}",
                    field.name(),
                    field.type_expression(),
                    field.attribute()
                );
            }
        }
    }

    Ok(())
}

/// JSON shape shared by `show` and `model --format json`.
pub fn model_to_json(
    model: &Model,
    registry: &Registry,
    id_type: Option<&FieldType>,
) -> serde_json::Value {
    let fields: Vec<serde_json::Value> = model
        .fields()
        .iter()
        .map(|f| {
            serde_json::json!({
                "name": f.name().as_str(),
                "type": f.field_type().rendered_name(),
                "host_type": registry.host_type(f.field_type()),
                "is_array": f.is_array(),
                "is_optional": f.is_optional(),
                "attribute": f.attribute(),
                "is_identifier": f.is_identifier(),
            })
        })
        .collect();

    serde_json::json!({
        "name": model.name().as_str(),
        "fields": fields,
        "id_type": id_type.map(FieldType::rendered_name),
    })
}
