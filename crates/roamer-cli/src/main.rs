//! Roamer CLI: dry-run matching and calendar planning
//!
//! ## Usage
//!
//! ```bash
//! roamer match goa "Goa International Airport" "Goa"
//! roamer plan 15/Jul/2025 "May 2025" --call-site airport
//! roamer clean
//! roamer config --call-site airport
//! ```

use clap::Parser;
use roamer_cli::{handlers, init_tracing, Cli, CliConfig, CliResult, Commands, Verbosity};
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
    config.color.apply();
    init_tracing(config.verbosity);

    let mut out = std::io::stdout().lock();
    match &cli.command {
        Commands::Match(args) => handlers::run_match(args, &mut out),
        Commands::Plan(args) => handlers::run_plan(&config.load_suite()?, args, &mut out),
        Commands::Clean(args) => handlers::run_clean(&config.load_suite()?, args, &mut out),
        Commands::Config(args) => handlers::run_config(&config.load_suite()?, args, &mut out),
    }
}

fn build_config(cli: &Cli) -> CliConfig {
    CliConfig::new()
        .with_verbosity(Verbosity::from_flags(cli.quiet, cli.verbose))
        .with_color(cli.color.into())
        .with_config_path(cli.config.clone())
}
