use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

/// Prisma model generator driven by compact field specs.
///
/// genql appends new models to a Prisma schema document and patches the
/// back-references relations need into the models already there.
#[derive(Parser)]
#[command(
    name = "genql",
    version,
    about = "Prisma model generator driven by compact field specs",
    after_help = "Use 'genql <command> --help' for more information about a command.\n\
                  Field specs: name:type[:modifier], e.g. id:id:uuid email:string:unique tags:string[]",
    propagate_version = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOpts,
}

/// Global options available to all subcommands.
#[derive(Args, Debug)]
pub struct GlobalOpts {
    /// Configuration file path [env: GENQL_CONFIG]
    #[arg(short = 'c', long = "config", global = true, env = "GENQL_CONFIG")]
    pub config: Option<PathBuf>,

    /// Schema document path, overriding the configuration [env: GENQL_SCHEMA]
    #[arg(short = 's', long = "schema", global = true, env = "GENQL_SCHEMA")]
    pub schema: Option<PathBuf>,

    /// Output format: human (default), json, plain
    #[arg(
        long,
        global = true,
        default_value = "human",
        value_parser = ["human", "json", "plain"]
    )]
    pub format: String,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short = 'v', long = "verbose", global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all non-error output
    #[arg(short = 'q', long = "quiet", global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output [env: NO_COLOR]
    #[arg(long = "no-color", global = true, env = "NO_COLOR")]
    pub no_color: bool,
}

/// Top-level subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Create a schema document with generator and datasource blocks
    Init(InitArgs),

    /// Generate a Prisma model and append it to the schema document
    Model(ModelArgs),

    /// Show a model read back from the schema document
    Show(ShowArgs),

    /// Generate shell completion scripts
    Completions(CompletionsArgs),
}

/// Arguments for `genql init`.
#[derive(Args)]
pub struct InitArgs {
    /// Overwrite an existing document
    #[arg(short = 'f', long = "force")]
    pub force: bool,

    /// Datasource provider (default from configuration: postgresql)
    #[arg(short = 'p', long = "provider")]
    pub provider: Option<String>,
}

/// Arguments for `genql model`.
#[derive(Args)]
pub struct ModelArgs {
    /// Model name, e.g. User
    pub name: String,

    /// Field specs: name:type[:modifier]
    #[arg(required = true, value_name = "FIELD")]
    pub fields: Vec<String>,

    /// One-to-one relation field:Partner (repeatable)
    #[arg(long = "one-to-one", value_name = "FIELD:MODEL")]
    pub one_to_one: Vec<String>,

    /// One-to-many relation field:Partner (repeatable)
    #[arg(long = "one-to-many", value_name = "FIELD:MODEL")]
    pub one_to_many: Vec<String>,

    /// Many-to-many relation field:Partner (repeatable)
    #[arg(long = "many-to-many", value_name = "FIELD:MODEL")]
    pub many_to_many: Vec<String>,

    /// Print the model block without writing the document
    #[arg(short = 'n', long = "dry-run")]
    pub dry_run: bool,
}

/// Arguments for `genql show`.
#[derive(Args)]
pub struct ShowArgs {
    /// Model name
    pub name: String,
}

/// Arguments for `genql completions`.
#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_parser = ["bash", "zsh", "fish", "powershell", "elvish"])]
    pub shell: String,
}
