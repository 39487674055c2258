//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use codebase_cli::logging::LogFormat;
use codebase_model::CodesetType;
use colorchoice_clap::Color;
use tracing::level_filters::LevelFilter;

#[derive(Parser)]
#[command(
    name = "codebase",
    version,
    about = "Query an immunization codebase dataset",
    long_about = "Load an immunization codebase XML file and resolve codes against it.\n\n\
                  Codesets are named by their dataset type, e.g. VACCINATION_CVX_CODE,\n\
                  BODY_ROUTE or VACCINATION_NDC_CODE_UNIT_OF_SALE."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Codebase XML file (default: $CODEBASE_DATASET, else bundled data/Compiled.xml).
    #[arg(long = "dataset", value_name = "PATH", global = true)]
    pub dataset: Option<PathBuf>,

    /// Print results as JSON instead of a table.
    #[arg(long = "json", global = true)]
    pub json: bool,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format.
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
    /// List the codesets present in the dataset.
    Codesets,

    /// Resolve a value in a codeset.
    Lookup(LookupArgs),

    /// Resolve a value using NDC spelling variants only.
    Variants(CodeArgs),

    /// Follow a code's link into another codeset.
    Related(RelatedArgs),

    /// Resolve the vaccine product for a CVX/MVX pair on a date.
    Product(ProductArgs),
}

#[derive(Args)]
pub struct CodeArgs {
    /// Codeset type, e.g. PERSON_LANGUAGE.
    #[arg(value_name = "CODESET", value_parser = parse_codeset)]
    pub codeset: CodesetType,

    /// Raw code value.
    #[arg(value_name = "VALUE")]
    pub value: String,
}

#[derive(Args)]
pub struct LookupArgs {
    #[command(flatten)]
    pub code: CodeArgs,

    /// Follow deprecated codes to their replacement.
    #[arg(long = "map")]
    pub map: bool,
}

#[derive(Args)]
pub struct RelatedArgs {
    #[command(flatten)]
    pub code: CodeArgs,

    /// Codeset to follow the link into.
    #[arg(value_name = "TARGET", value_parser = parse_codeset)]
    pub target: CodesetType,
}

#[derive(Args)]
pub struct ProductArgs {
    /// Vaccine CVX code.
    #[arg(value_name = "CVX")]
    pub vaccine: String,

    /// Manufacturer MVX code.
    #[arg(value_name = "MVX")]
    pub manufacturer: String,

    /// Administration date, yyyyMMdd.
    #[arg(value_name = "DATE")]
    pub date: String,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

impl From<LogLevelArg> for LevelFilter {
    fn from(level: LogLevelArg) -> Self {
        match level {
            LogLevelArg::Error => Self::ERROR,
            LogLevelArg::Warn => Self::WARN,
            LogLevelArg::Info => Self::INFO,
            LogLevelArg::Debug => Self::DEBUG,
            LogLevelArg::Trace => Self::TRACE,
        }
    }
}

impl From<LogFormatArg> for LogFormat {
    fn from(format: LogFormatArg) -> Self {
        match format {
            LogFormatArg::Pretty => Self::Pretty,
            LogFormatArg::Compact => Self::Compact,
            LogFormatArg::Json => Self::Json,
        }
    }
}

fn parse_codeset(value: &str) -> Result<CodesetType, String> {
    value.parse::<CodesetType>().map_err(|e| e.to_string())
}
