use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info_span;

use codebase_cli::report::{code_table, codeset_summaries, codeset_table, to_json};
use codebase_core::{CodeMap, Mapping, load_from_path};
use codebase_ingest::dataset_path;
use codebase_model::CodeEntry;

use crate::cli::{CodeArgs, LookupArgs, ProductArgs, RelatedArgs};

/// Outcome of a query subcommand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Found,
    NotFound,
}

pub fn load_map(dataset: Option<&Path>) -> Result<CodeMap> {
    let path: PathBuf = dataset.map_or_else(dataset_path, Path::to_path_buf);
    let _span = info_span!("load", path = %path.display()).entered();
    load_from_path(&path).with_context(|| format!("load dataset {}", path.display()))
}

pub fn run_codesets(map: &CodeMap, json: bool) -> Result<Outcome> {
    let summaries = codeset_summaries(map);
    if json {
        println!("{}", to_json(&summaries)?);
    } else {
        println!("{}", codeset_table(&summaries));
    }
    Ok(if summaries.is_empty() {
        Outcome::NotFound
    } else {
        Outcome::Found
    })
}

pub fn run_lookup(map: &CodeMap, args: &LookupArgs, json: bool) -> Result<Outcome> {
    let mapping = if args.map { Mapping::Map } else { Mapping::NoMap };
    let found = map.get_code_for_codeset_with(args.code.codeset, &args.code.value, mapping);
    print_entry(found, json)
}

pub fn run_variants(map: &CodeMap, args: &CodeArgs, json: bool) -> Result<Outcome> {
    print_entry(map.check_variants(args.codeset, &args.value), json)
}

pub fn run_related(map: &CodeMap, args: &RelatedArgs, json: bool) -> Result<Outcome> {
    let found = map
        .get_code_for_codeset(args.code.codeset, &args.code.value)
        .and_then(|entry| map.get_related_code(entry, args.target));
    print_entry(found, json)
}

pub fn run_product(map: &CodeMap, args: &ProductArgs, json: bool) -> Result<Outcome> {
    let found = map.get_product_for(&args.vaccine, &args.manufacturer, &args.date);
    print_entry(found, json)
}

fn print_entry(entry: Option<&CodeEntry>, json: bool) -> Result<Outcome> {
    if json {
        println!("{}", to_json(&entry)?);
    } else if let Some(entry) = entry {
        println!("{}", code_table(&[entry]));
    } else {
        eprintln!("not found");
    }
    Ok(match entry {
        Some(_) => Outcome::Found,
        None => Outcome::NotFound,
    })
}
