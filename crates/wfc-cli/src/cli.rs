//! CLI argument definitions for the waveform catalog extractor.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "wfc",
    version,
    about = "Waveform catalog extractor - build CSV tables from waveform record headers",
    long_about = "Scan a waveform database tree (p<group>/p<subject>/<record>) and extract\n\
                  record, segment, signal and numerics metadata into CSV tables\n\
                  ready for bulk loading into a relational database."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for warnings only).
    #[command(flatten)]
    pub verbosity: Verbosity<InfoLevel>,

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
    /// Extract all four tables (records, segments, signals, numerics).
    Extract(ExtractArgs),

    /// Rewrite only the records table, leaving the other tables untouched.
    UpdateRecords(UpdateRecordsArgs),
}

#[derive(Parser)]
pub struct ExtractArgs {
    /// Waveform data root (e.g. /data/mimic4wdb/0.1.0/waves).
    #[arg(long = "data-dir", value_name = "DIR")]
    pub data_dir: PathBuf,

    /// Output directory for the CSV tables.
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: PathBuf,

    /// Skip numerics files (they can be very large).
    #[arg(long = "skip-numerics")]
    pub skip_numerics: bool,
}

#[derive(Parser)]
pub struct UpdateRecordsArgs {
    /// Waveform data root (e.g. /data/mimic4wdb/0.1.0/waves).
    #[arg(long = "data-dir", value_name = "DIR")]
    pub data_dir: PathBuf,

    /// Output path of the records table.
    #[arg(long = "output-file", value_name = "FILE")]
    pub output_file: PathBuf,
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
