//! Table and JSON rendering of query results.

use anyhow::{Context, Result};
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use serde::Serialize;

use codebase_core::CodeMap;
use codebase_model::{CodeEntry, CodeStatus, CodesetType};

/// One row of the `codesets` listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CodesetSummary {
    pub codeset: CodesetType,
    pub label: Option<String>,
    pub codes: usize,
}

pub fn codeset_summaries(map: &CodeMap) -> Vec<CodesetSummary> {
    map.codesets()
        .into_iter()
        .filter_map(|codeset| map.codeset(codeset))
        .map(|index| CodesetSummary {
            codeset: index.codeset_type(),
            label: index.label().map(ToString::to_string),
            codes: index.len(),
        })
        .collect()
}

pub fn codeset_table(summaries: &[CodesetSummary]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Codeset"),
        header_cell("Label"),
        header_cell("Codes"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    for summary in summaries {
        table.add_row(vec![
            Cell::new(summary.codeset),
            Cell::new(summary.label.as_deref().unwrap_or("-")),
            Cell::new(summary.codes),
        ]);
    }
    table
}

/// Table of resolved entries, one row each.
pub fn code_table(entries: &[&CodeEntry]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Codeset"),
        header_cell("Value"),
        header_cell("Label"),
        header_cell("Status"),
        header_cell("Maps To"),
        header_cell("Valid From"),
        header_cell("Valid Until"),
        header_cell("Links"),
    ]);
    apply_table_style(&mut table);
    for entry in entries {
        let links = entry
            .related_codes
            .iter()
            .map(|(codeset, value)| format!("{codeset}={value}"))
            .collect::<Vec<_>>()
            .join("\n");
        table.add_row(vec![
            Cell::new(entry.codeset_type),
            Cell::new(&entry.value).add_attribute(Attribute::Bold),
            Cell::new(entry.display_name()),
            status_cell(entry.status),
            optional_cell(entry.maps_to.as_deref()),
            optional_cell(entry.use_date.valid_from.map(|d| d.to_string()).as_deref()),
            optional_cell(entry.use_date.valid_until.map(|d| d.to_string()).as_deref()),
            optional_cell(Some(links.as_str()).filter(|links| !links.is_empty())),
        ]);
    }
    table
}

/// Pretty JSON for any serializable result.
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).context("serialize result as JSON")
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn status_cell(status: CodeStatus) -> Cell {
    let cell = Cell::new(status.as_str());
    match status {
        CodeStatus::Valid => cell.fg(Color::Green),
        CodeStatus::Deprecated => cell.fg(Color::Yellow),
        CodeStatus::Invalid | CodeStatus::Unrecognized => cell.fg(Color::Red),
        CodeStatus::Ignore => cell.add_attribute(Attribute::Dim),
    }
}

fn optional_cell(value: Option<&str>) -> Cell {
    match value {
        Some(value) => Cell::new(value),
        None => Cell::new("-").add_attribute(Attribute::Dim),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_table_lists_links() {
        let entry = CodeEntry::new(CodesetType::VaccineProduct, "ADACEL")
            .with_label("Adacel")
            .with_related(CodesetType::VaccinationCvxCode, "115")
            .with_related(CodesetType::VaccinationManufacturerCode, "PMC");
        let rendered = code_table(&[&entry]).to_string();
        assert!(rendered.contains("ADACEL"));
        assert!(rendered.contains("115"));
        assert!(rendered.contains("PMC"));
    }

    #[test]
    fn missing_values_render_as_dash() {
        let entry = CodeEntry::new(CodesetType::BodyRoute, "IV");
        let rendered = code_table(&[&entry]).to_string();
        assert!(rendered.contains('-'));
        assert!(rendered.contains("IV"));
    }
}
