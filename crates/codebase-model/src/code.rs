//! Code entries: one row of a reference codeset.
//!
//! A [`CodeEntry`] carries:
//! - the canonical `value` and display `label`
//! - a [`CodeStatus`]; deprecated entries may name a replacement via `maps_to`
//! - a [`UseDate`] validity window (used for vaccine products)
//! - `related_codes`, links into other codesets (an NDC names its MVX
//!   manufacturer, a product names its CVX and MVX)
//!
//! References are stored by value. Nothing here checks that a referenced
//! entry exists; resolution happens at query time.
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use codebase_model::{CodeEntry, CodesetType};
//!
//! let ymd = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap();
//! let product = CodeEntry::new(CodesetType::VaccineProduct, "DECAVAC")
//!     .with_related(CodesetType::VaccinationCvxCode, "113")
//!     .with_related(CodesetType::VaccinationManufacturerCode, "PMC")
//!     .with_valid_range(Some(ymd(2003, 1, 1)), None);
//!
//! assert!(product.use_date.contains(ymd(2016, 1, 1)));
//! assert_eq!(product.related(CodesetType::VaccinationCvxCode), Some("113"));
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::codeset::CodesetType;
use crate::concept::CvxConceptType;

/// Lifecycle status of a code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CodeStatus {
    #[default]
    Valid,
    /// Retired; may redirect through `maps_to`.
    Deprecated,
    Invalid,
    /// Recognized but carries no meaning for processing.
    Ignore,
    /// Status text in the source that matched none of the above.
    Unrecognized,
}

impl CodeStatus {
    /// Parses a status attribute. Blank input is `Valid`.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_uppercase().as_str() {
            "" | "VALID" => Self::Valid,
            "DEPRECATED" => Self::Deprecated,
            "INVALID" => Self::Invalid,
            "IGNORE" | "IGNORED" => Self::Ignore,
            _ => Self::Unrecognized,
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Valid => "Valid",
            Self::Deprecated => "Deprecated",
            Self::Invalid => "Invalid",
            Self::Ignore => "Ignore",
            Self::Unrecognized => "Unrecognized",
        }
    }
}

impl fmt::Display for CodeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Validity window of a code.
///
/// `valid_from` / `valid_until` bound the hard range and are both inclusive.
/// The `expected_*` bounds are informational only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UseDate {
    pub valid_from: Option<NaiveDate>,
    pub valid_until: Option<NaiveDate>,
    pub expected_from: Option<NaiveDate>,
    pub expected_until: Option<NaiveDate>,
}

impl UseDate {
    /// Returns true when `date` falls inside `[valid_from, valid_until]`.
    /// A missing bound is open.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.valid_from.is_none_or(|from| from <= date)
            && self.valid_until.is_none_or(|until| date <= until)
    }

    /// Distance in days from `date` to the nearest edge of the range; zero
    /// when the range contains the date.
    pub fn distance_days(&self, date: NaiveDate) -> i64 {
        if let Some(from) = self.valid_from
            && date < from
        {
            return from.signed_duration_since(date).num_days();
        }
        if let Some(until) = self.valid_until
            && date > until
        {
            return date.signed_duration_since(until).num_days();
        }
        0
    }

    /// Returns true when no bound at all is recorded.
    pub fn is_unbounded(&self) -> bool {
        self.valid_from.is_none() && self.valid_until.is_none()
    }
}

/// One reference-data record.
///
/// Two entries are equal when they belong to the same codeset and carry the
/// same value; the remaining fields are payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CodeEntry {
    /// Canonical code value (trimmed).
    pub value: String,

    /// Display name.
    pub label: Option<String>,

    pub description: Option<String>,

    /// Owning codeset.
    pub codeset_type: CodesetType,

    pub status: CodeStatus,

    /// Replacement value in the same codeset for a retired code.
    pub maps_to: Option<String>,

    pub use_date: UseDate,

    /// Reference values into other codesets, one per target codeset.
    pub related_codes: BTreeMap<CodesetType, String>,

    /// Only recorded for CVX codes.
    pub concept_type: Option<CvxConceptType>,
}

impl CodeEntry {
    /// Create a valid entry with no payload beyond its value.
    pub fn new(codeset_type: CodesetType, value: impl Into<String>) -> Self {
        Self {
            value: value.into().trim().to_string(),
            label: None,
            description: None,
            codeset_type,
            status: CodeStatus::Valid,
            maps_to: None,
            use_date: UseDate::default(),
            related_codes: BTreeMap::new(),
            concept_type: None,
        }
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn with_status(mut self, status: CodeStatus) -> Self {
        self.status = status;
        self
    }

    /// Mark the entry deprecated and redirect it to `target`.
    #[must_use]
    pub fn with_maps_to(mut self, target: impl Into<String>) -> Self {
        self.status = CodeStatus::Deprecated;
        self.maps_to = Some(target.into());
        self
    }

    #[must_use]
    pub fn with_valid_range(
        mut self,
        valid_from: Option<NaiveDate>,
        valid_until: Option<NaiveDate>,
    ) -> Self {
        self.use_date.valid_from = valid_from;
        self.use_date.valid_until = valid_until;
        self
    }

    #[must_use]
    pub fn with_use_date(mut self, use_date: UseDate) -> Self {
        self.use_date = use_date;
        self
    }

    /// Record a link into another codeset. The first link per codeset wins.
    #[must_use]
    pub fn with_related(mut self, codeset: CodesetType, value: impl Into<String>) -> Self {
        self.related_codes
            .entry(codeset)
            .or_insert_with(|| value.into());
        self
    }

    #[must_use]
    pub fn with_concept_type(mut self, concept_type: CvxConceptType) -> Self {
        self.concept_type = Some(concept_type);
        self
    }

    pub fn is_deprecated(&self) -> bool {
        self.status == CodeStatus::Deprecated
    }

    /// The redirect target, if one is recorded and non-blank.
    pub fn maps_to(&self) -> Option<&str> {
        self.maps_to
            .as_deref()
            .map(str::trim)
            .filter(|target| !target.is_empty())
    }

    /// The reference value recorded for `codeset`, if any.
    pub fn related(&self, codeset: CodesetType) -> Option<&str> {
        self.related_codes.get(&codeset).map(String::as_str)
    }

    /// Label when present, otherwise the value.
    pub fn display_name(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.value)
    }
}

impl PartialEq for CodeEntry {
    fn eq(&self, other: &Self) -> bool {
        self.codeset_type == other.codeset_type && self.value == other.value
    }
}

impl Eq for CodeEntry {}

impl Hash for CodeEntry {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.codeset_type.hash(state);
        self.value.hash(state);
    }
}

impl fmt::Display for CodeEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.label {
            Some(label) => write!(f, "{} {} ({})", self.codeset_type, self.value, label),
            None => write!(f, "{} {}", self.codeset_type, self.value),
        }
    }
}
