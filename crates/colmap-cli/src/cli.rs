//! CLI argument definitions for colmap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "colmap",
    version,
    about = "Map spreadsheet columns onto a reference layout using a language model",
    long_about = "Map the columns of one spreadsheet onto the column layout of another.\n\n\
                  A language model suggests which column corresponds to each reference\n\
                  column; suggestions are checked against the real columns before the\n\
                  data is reshaped and written as CSV or XLSX. Inputs may be CSV, TSV,\n\
                  or XLSX (first worksheet)."
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

    /// Include prompts and raw oracle responses in debug logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Ask the oracle for a mapping and write the reshaped table.
    Map(MapArgs),

    /// Print the oracle prompt for two files without sending it.
    Prompt(PairArgs),

    /// Show the columns and first rows of one or more files.
    Columns(ColumnsArgs),
}

#[derive(Parser)]
pub struct PairArgs {
    /// Table whose column layout the output follows (CSV, TSV, or XLSX).
    #[arg(value_name = "REFERENCE")]
    pub reference: PathBuf,

    /// Table whose data is mapped onto the reference layout.
    #[arg(value_name = "TO_MAP")]
    pub to_map: PathBuf,
}

#[derive(Parser)]
pub struct MapArgs {
    #[command(flatten)]
    pub files: PairArgs,

    /// Output path; `.xlsx` writes a workbook, anything else CSV.
    #[arg(long = "output", short = 'o', value_name = "PATH", default_value = "mapped_output.csv")]
    pub output: PathBuf,

    /// Also write the mapping report as JSON.
    #[arg(long = "report", value_name = "PATH")]
    pub report: Option<PathBuf>,

    /// Use a recorded oracle response instead of calling the service.
    #[arg(long = "response-file", value_name = "PATH")]
    pub response_file: Option<PathBuf>,

    /// Oracle settings file (TOML).
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Model identifier.
    #[arg(long = "model", env = "COLMAP_MODEL", value_name = "MODEL")]
    pub model: Option<String>,

    /// API key for the oracle service.
    #[arg(long = "api-key", env = "GEMINI_API_KEY", hide_env_values = true, value_name = "KEY")]
    pub api_key: Option<String>,

    /// API base URL.
    #[arg(long = "endpoint", value_name = "URL")]
    pub endpoint: Option<String>,

    /// Oracle request timeout in seconds.
    #[arg(long = "timeout-secs", value_name = "SECS")]
    pub timeout_secs: Option<u64>,

    /// Sampling temperature for the oracle.
    #[arg(long = "temperature", value_name = "T")]
    pub temperature: Option<f32>,

    /// Number of output rows to preview.
    #[arg(long = "preview-rows", value_name = "N", default_value_t = 5)]
    pub preview_rows: usize,

    /// Run the mapping and show the results without writing files.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

#[derive(Parser)]
pub struct ColumnsArgs {
    /// Files to inspect.
    #[arg(value_name = "FILE", required = true)]
    pub files: Vec<PathBuf>,

    /// Number of rows to preview per file.
    #[arg(long = "preview-rows", value_name = "N", default_value_t = 5)]
    pub preview_rows: usize,
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
