mod cli;
mod commands;
mod config;
#[allow(unused_assignments)]
mod diagnostic;
mod error;
mod logging;
mod output;

use clap::Parser;

fn main() {
    let cli = cli::Cli::parse();
    let output = output::OutputContext::from_global(&cli.global);
    logging::init(&cli.global, output.use_color);

    let result = match cli.command {
        cli::Commands::Init(args) => commands::init::run(args, &cli.global, &output),
        cli::Commands::Model(args) => commands::model::run(args, &cli.global, &output),
        cli::Commands::Show(args) => commands::show::run(args, &cli.global, &output),
        cli::Commands::Completions(args) => commands::completions::run(args),
    };

    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            tracing::debug!(error = ?e, "command failed");
            output.print_error(&e);
            std::process::exit(e.exit_code() as i32);
        }
    }
}
