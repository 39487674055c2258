//! Codebase XML loading.
//!
//! The reference file is a `<codebase>` root holding one `<codeset>` per
//! reference table:
//!
//! ```text
//! <codebase>
//!   <codeset type="VACCINATION_CVX_CODE" label="Vaccine CVX Code">
//!     <code>
//!       <value>03</value>
//!       <label>MMR</label>
//!       <concept-type>vaccine</concept-type>
//!       <code-status status="Valid"/>
//!       <use-date not-before="19710101" not-after=""/>
//!       <reference>
//!         <link-to codeset="VACCINATION_MANUFACTURER_CODE" value="MSD"/>
//!       </reference>
//!     </code>
//!   </codeset>
//! </codebase>
//! ```
//!
//! A retired code redirects with
//! `<code-status status="Deprecated"><deprecated new-code-value="..."/></code-status>`.
//!
//! Records the model cannot represent (unknown codeset types, links into
//! unknown codesets, blank values) are skipped with a warning. A malformed
//! document or an unparseable date fails the whole load.

use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use codebase_model::{
    CodeEntry, CodeStatus, CodesetRecord, CodesetType, CvxConceptType, Dataset, UseDate,
    parse_date,
};
use serde::Deserialize;

use crate::error::{IngestError, Result};

/// Maximum number of individual warnings logged per category before only the
/// summary is reported.
const MAX_DETAILED_WARNINGS: u32 = 5;

// =============================================================================
// Public Loading Functions
// =============================================================================

/// Load a dataset from a codebase XML file.
pub fn load_dataset(path: &Path) -> Result<Dataset> {
    let content = fs::read_to_string(path).map_err(|e| IngestError::io(path, e))?;
    let source_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    load_dataset_from_str(&content, &source_name)
}

/// Load a dataset from codebase XML content.
///
/// `source_name` is used in diagnostics and recorded on the dataset.
pub fn load_dataset_from_str(content: &str, source_name: &str) -> Result<Dataset> {
    let raw: RawCodebase = quick_xml::de::from_str(content).map_err(|e| IngestError::Xml {
        source_name: source_name.to_string(),
        message: e.to_string(),
    })?;

    let mut dataset = Dataset::new();
    dataset.source = Some(source_name.to_string());
    let mut skipped = SkipCounts::default();

    for raw_codeset in raw.codesets {
        let Ok(codeset_type) = raw_codeset.codeset_type.parse::<CodesetType>() else {
            skipped.codesets += 1;
            if skipped.codesets <= MAX_DETAILED_WARNINGS {
                tracing::warn!(
                    source = %source_name,
                    codeset_type = %raw_codeset.codeset_type,
                    codes = raw_codeset.codes.len(),
                    "Skipping codeset with unknown type"
                );
            }
            continue;
        };

        let mut record = CodesetRecord::new(codeset_type);
        record.label = non_empty(raw_codeset.label.as_deref());

        for raw_code in raw_codeset.codes {
            if let Some(code) = convert_code(codeset_type, raw_code, source_name, &mut skipped)? {
                record.push(code);
            }
        }
        dataset.push(record);
    }

    skipped.report(source_name);
    tracing::debug!(
        source = %source_name,
        codesets = dataset.codesets.len(),
        codes = dataset.code_count(),
        "Parsed reference dataset"
    );

    Ok(dataset)
}

// =============================================================================
// XML Shape
// =============================================================================

#[derive(Debug, Deserialize)]
struct RawCodebase {
    #[serde(rename = "codeset", default)]
    codesets: Vec<RawCodeset>,
}

#[derive(Debug, Deserialize)]
struct RawCodeset {
    #[serde(rename = "@type", default)]
    codeset_type: String,
    #[serde(rename = "@label", default)]
    label: Option<String>,
    #[serde(rename = "code", default)]
    codes: Vec<RawCode>,
}

#[derive(Debug, Deserialize)]
struct RawCode {
    #[serde(default)]
    value: Option<String>,
    #[serde(default)]
    label: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(rename = "concept-type", default)]
    concept_type: Option<String>,
    #[serde(rename = "code-status", default)]
    code_status: Option<RawCodeStatus>,
    #[serde(rename = "use-date", default)]
    use_date: Option<RawUseDate>,
    #[serde(default)]
    reference: Option<RawReference>,
}

#[derive(Debug, Deserialize)]
struct RawCodeStatus {
    #[serde(rename = "@status", default)]
    status: Option<String>,
    #[serde(default)]
    deprecated: Option<RawDeprecated>,
}

#[derive(Debug, Deserialize)]
struct RawDeprecated {
    #[serde(rename = "@new-code-value", default)]
    new_code_value: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawUseDate {
    #[serde(rename = "@not-before", default)]
    not_before: Option<String>,
    #[serde(rename = "@not-expected-before", default)]
    not_expected_before: Option<String>,
    #[serde(rename = "@not-expected-after", default)]
    not_expected_after: Option<String>,
    #[serde(rename = "@not-after", default)]
    not_after: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawReference {
    #[serde(rename = "link-to", default)]
    links: Vec<RawLinkTo>,
}

#[derive(Debug, Deserialize)]
struct RawLinkTo {
    #[serde(rename = "@codeset", default)]
    codeset: String,
    #[serde(rename = "@value", default)]
    value: String,
}

// =============================================================================
// Conversion
// =============================================================================

#[derive(Default)]
struct SkipCounts {
    codesets: u32,
    blank_values: u32,
    links: u32,
    concept_types: u32,
}

impl SkipCounts {
    fn report(&self, source_name: &str) {
        if self.codesets > 0 || self.blank_values > 0 || self.links > 0 || self.concept_types > 0
        {
            tracing::warn!(
                source = %source_name,
                unknown_codesets = self.codesets,
                blank_values = self.blank_values,
                unknown_links = self.links,
                unknown_concept_types = self.concept_types,
                "Reference dataset contains records that were skipped"
            );
        }
    }
}

fn convert_code(
    codeset_type: CodesetType,
    raw: RawCode,
    source_name: &str,
    skipped: &mut SkipCounts,
) -> Result<Option<CodeEntry>> {
    let Some(value) = non_empty(raw.value.as_deref()) else {
        skipped.blank_values += 1;
        return Ok(None);
    };

    let mut code = CodeEntry::new(codeset_type, value);
    if let Some(label) = non_empty(raw.label.as_deref()) {
        code = code.with_label(label);
    }
    if let Some(description) = non_empty(raw.description.as_deref()) {
        code = code.with_description(description);
    }

    if let Some(status) = raw.code_status {
        code = code.with_status(CodeStatus::parse(
            status.status.as_deref().unwrap_or_default(),
        ));
        code.maps_to = status
            .deprecated
            .and_then(|deprecated| non_empty(deprecated.new_code_value.as_deref()));
    }

    if let Some(use_date) = raw.use_date {
        let use_date = convert_use_date(&use_date, &code.value, source_name)?;
        code = code.with_use_date(use_date);
    }

    if let Some(concept) = non_empty(raw.concept_type.as_deref()) {
        match CvxConceptType::from_value(&concept) {
            Some(concept_type) => code.concept_type = Some(concept_type),
            None => {
                skipped.concept_types += 1;
                if skipped.concept_types <= MAX_DETAILED_WARNINGS {
                    tracing::warn!(
                        source = %source_name,
                        code = %code.value,
                        concept_type = %concept,
                        "Unknown CVX concept type"
                    );
                }
            }
        }
    }

    for link in raw.reference.map(|r| r.links).unwrap_or_default() {
        let target_value = link.value.trim();
        match link.codeset.parse::<CodesetType>() {
            Ok(target) if !target_value.is_empty() => {
                code = code.with_related(target, target_value);
            }
            _ => {
                skipped.links += 1;
                if skipped.links <= MAX_DETAILED_WARNINGS {
                    tracing::warn!(
                        source = %source_name,
                        code = %code.value,
                        codeset = %link.codeset,
                        value = %link.value,
                        "Skipping link to unknown codeset"
                    );
                }
            }
        }
    }

    Ok(Some(code))
}

fn convert_use_date(raw: &RawUseDate, code: &str, source_name: &str) -> Result<UseDate> {
    let date = |field: &'static str, value: &Option<String>| -> Result<Option<NaiveDate>> {
        let Some(value) = non_empty(value.as_deref()) else {
            return Ok(None);
        };
        parse_date(&value)
            .map(Some)
            .ok_or_else(|| IngestError::InvalidDate {
                field,
                value,
                code: code.to_string(),
                source_name: source_name.to_string(),
            })
    };

    Ok(UseDate {
        valid_from: date("not-before", &raw.not_before)?,
        valid_until: date("not-after", &raw.not_after)?,
        expected_from: date("not-expected-before", &raw.not_expected_before)?,
        expected_until: date("not-expected-after", &raw.not_expected_after)?,
    })
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(ToString::to_string)
}
