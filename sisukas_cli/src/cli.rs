use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use super::ui::OutputFormat;

/// Defines the top-level interface for the Sisukas CLI with clap.
#[derive(Parser, Debug)]
#[command(name = "sisukas")]
#[command(version, about = "Sisukas CLI: Filter a course catalog in the terminal.")]
pub struct SisukasCli {
    /// Enable verbose output?
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value_t = OutputFormat::default())]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: SisukasCliCommand,
}

/// Defines the available subcommands of the Sisukas CLI.
#[derive(Subcommand, Debug, PartialEq)]
pub enum SisukasCliCommand {
    /// Apply a saved filter to a course catalog.
    Filter {
        /// Course catalog JSON file (an array of courses).
        #[arg(long, env = "SISUKAS_COURSES")]
        courses: PathBuf,
        /// Saved filter JSON file ({"groups": [...]}).
        #[arg(long, env = "SISUKAS_FILTERS")]
        filters: PathBuf,
        #[command(flatten)]
        sources: SourceArgs,
    },
    /// List the fields a filter can refer to.
    Fields {
        #[command(flatten)]
        sources: SourceArgs,
    },
    /// Print the share id of a saved filter.
    Hash {
        /// Saved filter JSON file.
        #[arg(long, env = "SISUKAS_FILTERS")]
        filters: PathBuf,
    },
}

/// Data backing the membership and period fields.
#[derive(Args, Debug, Clone, PartialEq, Default)]
pub struct SourceArgs {
    /// Membership sets JSON file. Format: {"major": {"DSD24": ["CS-A1110", ...]}}
    #[arg(long)]
    pub memberships: Option<PathBuf>,
    /// Academic periods JSON file (an array of periods).
    #[arg(long)]
    pub periods: Option<PathBuf>,
}
