//! CLI argument definitions for the TPT dashboard.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use tpt_cli::filter_args::FilterArgs;

#[derive(Parser)]
#[command(
    name = "tpt",
    version,
    about = "TPT dashboard - enrollment and outcome metrics from register extracts",
    long_about = "Summarize TB preventive therapy register extracts.\n\n\
                  Reports enrollment volume and demographics for the selected\n\
                  cohort, HIV testing coverage, and the treatment success rate\n\
                  of the cohort whose outcomes are reported in the selected years."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Compute dashboard metrics for a filter selection.
    Summary(SummaryArgs),

    /// List the filter options offered by an extract.
    Options(OptionsArgs),
}

#[derive(Parser)]
pub struct SummaryArgs {
    /// Register extract (CSV).
    #[arg(value_name = "CSV")]
    pub input: PathBuf,

    #[command(flatten)]
    pub filters: FilterArgs,

    /// Output format on stdout. JSON prints `null` when nothing matches.
    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: OutputFormatArg,

    /// Also write metrics.json and one CSV per grouped table here.
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Do not warn about register codes outside the lookup tables.
    #[arg(long = "quiet-unmapped")]
    pub quiet_unmapped: bool,
}

#[derive(Parser)]
pub struct OptionsArgs {
    /// Register extract (CSV).
    #[arg(value_name = "CSV")]
    pub input: PathBuf,

    /// Region selection used to list facilities (repeatable; default: the
    /// dashboard's initial selection).
    #[arg(long = "region", value_name = "REGION")]
    pub regions: Vec<String>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormatArg {
    Table,
    Json,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
