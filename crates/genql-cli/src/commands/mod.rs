pub mod completions;
pub mod init;
pub mod model;
pub mod show;

use genql_dsl::SchemaDocument;

use crate::cli::GlobalOpts;
use crate::config::{load_config, resolve_document_path, GenqlConfig};
use crate::error::CliError;

/// Load the configuration and resolve the schema document it points at.
pub fn open_document(global: &GlobalOpts) -> Result<(GenqlConfig, SchemaDocument), CliError> {
    let config = load_config(global.config.as_deref())?;
    let path = resolve_document_path(&config, global);
    tracing::info!(path = %path.display(), "using schema document");
    Ok((config, SchemaDocument::new(path)))
}
