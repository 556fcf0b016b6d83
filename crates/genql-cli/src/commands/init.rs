use std::fs;
use std::path::Path;

use crate::cli::{GlobalOpts, InitArgs};
use crate::config::InitConfig;
use crate::error::CliError;
use crate::output::{OutputContext, OutputMode};

/// Run the `init` command: write a fresh schema document.
pub fn run(args: InitArgs, global: &GlobalOpts, output: &OutputContext) -> Result<(), CliError> {
    let (config, document) = super::open_document(global)?;
    let path = document.path();

    if path.exists() {
        if !args.force {
            return Err(CliError::DocumentExists {
                path: path.to_path_buf(),
            });
        }
        output.warn(&format!("overwriting {}", path.display()));
    }

    let provider = args.provider.as_deref().unwrap_or(&config.init.provider);
    let contents = document_header(provider, &config.init);

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        create_dir(parent)?;
    }
    write_file(path, &contents)?;

    match output.mode {
        OutputMode::Human => {
            output.success(&format!(
                "Created {} for provider '{provider}'.",
                path.display()
            ));
            output.status("Next: genql model <Name> <name:type[:modifier]>...");
        }
        OutputMode::Json => {
            output.print_json(&serde_json::json!({
                "path": path.display().to_string(),
                "provider": provider,
            }));
        }
        OutputMode::Plain => println!("{}\t{provider}", path.display()),
    }

    Ok(())
}

/// Generator and datasource blocks every document starts with.
fn document_header(provider: &str, init: &InitConfig) -> String {
    format!(
        "generator client {{\n  provider = \"prisma-client-js\"\n}}\n\n\
         datasource db {{\n  provider = \"{provider}\"\n  url      = env(\"{}\")\n}}\n",
        init.database_url_env
    )
}

fn create_dir(path: &Path) -> Result<(), CliError> {
    fs::create_dir_all(path).map_err(|e| CliError::Io {
        path: path.to_path_buf(),
        source: e,
    })
}

fn write_file(path: &Path, content: &str) -> Result<(), CliError> {
    fs::write(path, content).map_err(|e| CliError::Io {
        path: path.to_path_buf(),
        source: e,
    })
}
