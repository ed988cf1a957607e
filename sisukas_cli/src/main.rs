mod cli;
mod commands;
mod errors;
mod files;
mod ui;

use std::process::ExitCode;

use clap::Parser;
use log::LevelFilter;

use cli::{SisukasCli, SisukasCliCommand};
use errors::CliError;

fn main() -> ExitCode {
    let cli = SisukasCli::parse();
    initialize_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            ui::debug(&e.to_string());
            ExitCode::FAILURE
        }
    }
}

/// `RUST_LOG` still overrides the level picked by `--verbose`.
fn initialize_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(level)
        .parse_default_env()
        .format_timestamp_secs()
        .target(env_logger::Target::Stderr)
        .init();
}

fn run(cli: SisukasCli) -> Result<(), CliError> {
    match cli.command {
        SisukasCliCommand::Filter {
            courses,
            filters,
            sources,
        } => commands::filter_courses(&courses, &filters, &sources, cli.format),
        SisukasCliCommand::Fields { sources } => commands::list_fields(&sources, cli.format),
        SisukasCliCommand::Hash { filters } => commands::hash_filters(&filters, cli.format),
    }
}
