//! Immunization codebase query CLI.

use std::io::{self, IsTerminal};

use clap::{ColorChoice, Parser};
use codebase_cli::logging::{LogConfig, LogFormat, init_logging};
use tracing::level_filters::LevelFilter;

mod cli;
mod commands;

use crate::cli::{Cli, Command};
use crate::commands::{
    Outcome, load_map, run_codesets, run_lookup, run_product, run_related, run_variants,
};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }

    let exit_code = match run(&cli) {
        Ok(Outcome::Found) => 0,
        Ok(Outcome::NotFound) => 1,
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

fn run(cli: &Cli) -> anyhow::Result<Outcome> {
    let map = load_map(cli.dataset.as_deref())?;
    match &cli.command {
        Command::Codesets => run_codesets(&map, cli.json),
        Command::Lookup(args) => run_lookup(&map, args, cli.json),
        Command::Variants(args) => run_variants(&map, args, cli.json),
        Command::Related(args) => run_related(&map, args, cli.json),
        Command::Product(args) => run_product(&map, args, cli.json),
    }
}

/// Explicit `--log-level` beats `-v/-q`, which beat `RUST_LOG`.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let explicit = cli.log_level.map(LevelFilter::from);
    let with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    LogConfig {
        level_filter: explicit.unwrap_or_else(|| cli.verbosity.tracing_level_filter()),
        use_env_filter: explicit.is_none() && !cli.verbosity.is_present(),
        format: LogFormat::from(cli.log_format),
        log_file: cli.log_file.clone(),
        with_ansi,
        ..LogConfig::default()
    }
}
