//! Building a [`CodeMap`] from a parsed dataset.

use std::collections::HashMap;
use std::path::Path;

use codebase_ingest::{load_dataset, load_dataset_from_str};
use codebase_model::{CodesetType, Dataset};

use crate::code_map::CodeMap;
use crate::index::CodesetIndex;
use crate::product::ProductResolver;

/// Build the read-only code map for `dataset`.
///
/// Codesets that appear more than once are merged. Within a codeset a
/// repeated value replaces the earlier entry. References are stored by value
/// and resolved at query time, so dangling links are not an error.
pub fn build(dataset: &Dataset) -> CodeMap {
    let source = dataset.source.as_deref().unwrap_or("<memory>");
    let mut indexes: HashMap<CodesetType, CodesetIndex> = HashMap::new();
    let mut duplicates = 0usize;

    for record in &dataset.codesets {
        let index = indexes
            .entry(record.codeset_type)
            .or_insert_with(|| CodesetIndex::new(record.codeset_type));
        index.set_label(record.label.clone());

        for code in &record.codes {
            let mut entry = code.clone();
            entry.codeset_type = record.codeset_type;
            if entry.value.trim().is_empty() {
                tracing::debug!(
                    source = %source,
                    codeset = %record.codeset_type,
                    "Skipping code with blank value"
                );
                continue;
            }
            if let Some(replaced) = index.insert(entry) {
                duplicates += 1;
                tracing::debug!(
                    source = %source,
                    codeset = %record.codeset_type,
                    code = %replaced.value,
                    "Duplicate code value, keeping the later entry"
                );
            }
        }
    }

    let products = indexes
        .get(&CodesetType::VaccineProduct)
        .map(|index| ProductResolver::from_entries(index.entries()))
        .unwrap_or_default();

    let map = CodeMap::from_parts(indexes, products);
    tracing::info!(
        source = %source,
        codesets = map.codesets().len(),
        codes = map.len(),
        duplicates,
        product_pairs = map.products().pair_count(),
        "Built code map"
    );
    map
}

/// Load a codebase XML file and build its code map.
///
/// Fails before any map exists if the file cannot be read or parsed.
pub fn load_from_path(path: &Path) -> codebase_ingest::Result<CodeMap> {
    let dataset = load_dataset(path)?;
    Ok(build(&dataset))
}

/// Parse codebase XML content and build its code map.
pub fn load_from_str(content: &str, source_name: &str) -> codebase_ingest::Result<CodeMap> {
    let dataset = load_dataset_from_str(content, source_name)?;
    Ok(build(&dataset))
}

#[cfg(test)]
mod tests {
    use codebase_model::{CodeEntry, CodesetRecord};

    use super::*;

    fn language(value: &str, label: &str) -> CodeEntry {
        CodeEntry::new(CodesetType::PersonLanguage, value).with_label(label)
    }

    #[test]
    fn repeated_codesets_merge_and_last_write_wins() {
        let dataset = Dataset::new()
            .with_codeset(
                CodesetRecord::new(CodesetType::PersonLanguage)
                    .with_label("Language")
                    .with_code(language("en", "English"))
                    .with_code(language("es", "Spanish")),
            )
            .with_codeset(
                CodesetRecord::new(CodesetType::PersonLanguage)
                    .with_code(language("en", "English (US)")),
            );
        let map = build(&dataset);

        let index = map.codeset(CodesetType::PersonLanguage).unwrap();
        assert_eq!(index.len(), 2);
        assert_eq!(index.label(), Some("Language"));
        assert_eq!(
            map.get_code_for_codeset(CodesetType::PersonLanguage, "en")
                .and_then(|e| e.label.as_deref()),
            Some("English (US)")
        );
    }

    #[test]
    fn blank_values_are_skipped() {
        let mut blank = language("x", "Blank");
        blank.value = " ".to_string();
        let dataset = Dataset::new().with_codeset(
            CodesetRecord::new(CodesetType::PersonLanguage)
                .with_code(blank)
                .with_code(language("en", "English")),
        );
        let map = build(&dataset);
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn products_are_indexed_by_pair() {
        let product = CodeEntry::new(CodesetType::VaccineProduct, "ADACEL")
            .with_related(CodesetType::VaccinationCvxCode, "115")
            .with_related(CodesetType::VaccinationManufacturerCode, "PMC");
        let dataset = Dataset::new()
            .with_codeset(CodesetRecord::new(CodesetType::VaccineProduct).with_code(product));
        let map = build(&dataset);

        assert_eq!(map.products().pair_count(), 1);
        assert_eq!(
            map.get_product_for("115", "PMC", "20100101")
                .map(|p| p.value.as_str()),
            Some("ADACEL")
        );
    }

    #[test]
    fn empty_dataset_builds_empty_map() {
        let map = build(&Dataset::new());
        assert!(map.is_empty());
        assert_eq!(map.products().pair_count(), 0);
    }
}
