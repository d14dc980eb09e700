//! Grabador: command-line interface for Grabar
//!
//! ## Usage
//!
//! ```bash
//! grabador replay session.yaml -o tests/recorded.spec.ts
//! grabador snippet toHaveText -s '#status' -p text=Saved
//! grabador catalog --category network
//! grabador config -c grabar.yaml
//! ```

use clap::Parser;
use grabador::{handlers, logging, Cli, CliConfig, CliResult, ColorChoice, Commands, Verbosity};
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();
    let config = build_config(&cli);
    logging::init(&config);

    match cli.command {
        Commands::Replay(args) => handlers::execute_replay(&config, &args),
        Commands::Snippet(args) => handlers::execute_snippet(&args),
        Commands::Catalog(args) => handlers::execute_catalog(&config, &args),
        Commands::Config(args) => handlers::execute_config(&config, &args),
    }
}

fn build_config(cli: &Cli) -> CliConfig {
    let color: ColorChoice = cli.color.clone().into();
    CliConfig::new()
        .with_verbosity(Verbosity::from_flags(cli.quiet, cli.verbose))
        .with_color(color)
}
