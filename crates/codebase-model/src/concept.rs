//! CVX concept types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;

/// Classification of a CVX code.
///
/// CDC publishes CVX codes for administrable vaccines but also for
/// "unspecified formulation" placeholders, non-vaccine products (e.g. immune
/// globulins) and codes that were never used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CvxConceptType {
    NonVaccine,
    Vaccine,
    Unspecified,
    NeverActive,
    ForeignVaccine,
}

impl CvxConceptType {
    pub const fn all() -> &'static [CvxConceptType] {
        &[
            Self::NonVaccine,
            Self::Vaccine,
            Self::Unspecified,
            Self::NeverActive,
            Self::ForeignVaccine,
        ]
    }

    /// Returns the value as written in the reference file.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NonVaccine => "non vaccine",
            Self::Vaccine => "vaccine",
            Self::Unspecified => "unspecified",
            Self::NeverActive => "never active",
            Self::ForeignVaccine => "foreign vaccine",
        }
    }

    /// Looks up a concept type by its exact reference-file value.
    pub fn from_value(value: &str) -> Option<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|concept| concept.as_str() == value)
    }
}

impl fmt::Display for CvxConceptType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for CvxConceptType {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['_', '-'], " ");
        Self::from_value(&normalized).ok_or_else(|| ModelError::UnknownConceptType(s.to_string()))
    }
}
