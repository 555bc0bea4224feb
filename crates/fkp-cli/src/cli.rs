//! CLI argument definitions for the 4klang patch transpiler.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "fkp-transpiler",
    version,
    about = "4klang patch transpiler - convert legacy binary patches to a structured schema",
    long_about = "Convert 4klang patch (.4kp) and instrument (.4ki) containers into a\n\
                  schema-neutral JSON structure in the target synthesizer vocabulary.\n\
                  Decoding is one-directional: containers are read, never written back."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
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
    /// Convert a container into the target vocabulary.
    Convert(ConvertArgs),

    /// Dump the decoded structure of a container without converting it.
    Dump(DumpArgs),

    /// List the unit-type discriminant table.
    Units,
}

#[derive(Parser)]
pub struct ConvertArgs {
    /// Path to the .4kp or .4ki container.
    #[arg(value_name = "CONTAINER")]
    pub input: PathBuf,

    /// Write output to a file instead of stdout.
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Container shape (auto detects from the file size).
    #[arg(long = "kind", value_enum, default_value = "auto")]
    pub kind: KindArg,

    /// Emit compact JSON instead of pretty-printed.
    #[arg(long = "compact")]
    pub compact: bool,

    /// Derive instrument voice counts from the patch polyphony field.
    ///
    /// By default every converted instrument gets exactly one voice.
    #[arg(long = "voices-from-polyphony")]
    pub voices_from_polyphony: bool,
}

#[derive(Parser)]
pub struct DumpArgs {
    /// Path to the .4kp or .4ki container.
    #[arg(value_name = "CONTAINER")]
    pub input: PathBuf,

    /// Write output to a file instead of stdout.
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Container shape (auto detects from the file size).
    #[arg(long = "kind", value_enum, default_value = "auto")]
    pub kind: KindArg,

    /// Emit compact JSON instead of pretty-printed.
    #[arg(long = "compact")]
    pub compact: bool,
}

/// Container shape choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum KindArg {
    Auto,
    Patch,
    Instrument,
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
