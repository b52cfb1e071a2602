// printqr-cli/src/main.rs
//
// Entry point for the pqr binary: initializes logging, parses arguments,
// and dispatches to the command implementations.

use std::process;

use clap::Parser;
use printqr_cli::cli::{Cli, Commands};
use printqr_cli::commands::generate::{run_generate, SettingsSource};
use printqr_cli::commands::{edit, info, init};
use printqr_cli::terminal;

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();

    let result = match &cli.command {
        Commands::Prompts(args) => run_generate(&args.generate, SettingsSource::Prompts, cli.debug),
        Commands::Args(args) => {
            let entries = args.entries();
            run_generate(&args.generate, SettingsSource::Flags(entries), cli.debug)
        }
        Commands::Encoded(args) => run_generate(
            &args.generate,
            SettingsSource::File(args.file.clone()),
            cli.debug,
        ),
        Commands::Init(args) => init::run_init(args),
        Commands::Edit => edit::run_edit(),
        Commands::Info(args) => info::run_info(&args.topic),
    };

    if let Err(e) = result {
        terminal::print_error(&format!("{e:#}"));
        process::exit(1);
    }
}
