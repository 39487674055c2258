//! Codeset types.
//!
//! A codeset is one reference table of the immunization codebase (vaccine
//! CVX codes, MVX manufacturer codes, NDC package identifiers, routes, ...).
//! The set of tables is closed and known at compile time.
//!
//! Each variant carries the wire name used by the `type` attribute of a
//! `<codeset>` element in the reference file, e.g. `VACCINATION_CVX_CODE`.
//!
//! # Example
//!
//! ```
//! use codebase_model::CodesetType;
//!
//! let codeset: CodesetType = "vaccination-ndc-code-unit-of-sale".parse().unwrap();
//! assert_eq!(codeset, CodesetType::VaccinationNdcCodeUnitOfSale);
//! assert!(codeset.is_ndc());
//! assert_eq!(codeset.as_str(), "VACCINATION_NDC_CODE_UNIT_OF_SALE");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;

/// Identifies which reference table a code belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CodesetType {
    /// Dose administration units (mL, ...).
    AdministrationUnit,
    /// Route of administration (IM, IV, SC, ...).
    BodyRoute,
    /// Administration site (LA, RD, ...).
    BodySite,
    /// CDC CVX vaccine codes.
    VaccinationCvxCode,
    /// CPT procedure codes for vaccines.
    VaccinationCptCode,
    /// CDC MVX manufacturer codes.
    VaccinationManufacturerCode,
    /// NDC codes, either packaging level.
    VaccinationNdcCode,
    /// NDC codes for the unit of sale (outer package).
    VaccinationNdcCodeUnitOfSale,
    /// NDC codes for the unit of use (inner package / vial).
    VaccinationNdcCodeUnitOfUse,
    /// Vaccine products linking a CVX and an MVX over a date range.
    VaccineProduct,
    /// Vaccine groups (series families).
    VaccineGroup,
    /// Vaccine trade names.
    VaccinationTradeName,
    /// ISO 639 person languages.
    PersonLanguage,
    PatientRace,
    PatientEthnicity,
    PatientSex,
    PatientRegistryStatus,
    /// Administered vs. historical record source.
    VaccinationInformationSource,
    VaccinationCompletion,
    VaccinationRefusal,
    /// VFC eligibility / financial class.
    FinancialStatusCode,
    VaccinationFundingSource,
    /// Vaccine Information Statement document types.
    VaccinationVisDocType,
    /// LOINC observation identifiers.
    ObservationIdentifier,
}

impl CodesetType {
    /// Returns all codeset types in declaration order.
    pub const fn all() -> &'static [CodesetType] {
        &[
            Self::AdministrationUnit,
            Self::BodyRoute,
            Self::BodySite,
            Self::VaccinationCvxCode,
            Self::VaccinationCptCode,
            Self::VaccinationManufacturerCode,
            Self::VaccinationNdcCode,
            Self::VaccinationNdcCodeUnitOfSale,
            Self::VaccinationNdcCodeUnitOfUse,
            Self::VaccineProduct,
            Self::VaccineGroup,
            Self::VaccinationTradeName,
            Self::PersonLanguage,
            Self::PatientRace,
            Self::PatientEthnicity,
            Self::PatientSex,
            Self::PatientRegistryStatus,
            Self::VaccinationInformationSource,
            Self::VaccinationCompletion,
            Self::VaccinationRefusal,
            Self::FinancialStatusCode,
            Self::VaccinationFundingSource,
            Self::VaccinationVisDocType,
            Self::ObservationIdentifier,
        ]
    }

    /// Returns the wire name used in the reference file.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::AdministrationUnit => "ADMINISTRATION_UNIT",
            Self::BodyRoute => "BODY_ROUTE",
            Self::BodySite => "BODY_SITE",
            Self::VaccinationCvxCode => "VACCINATION_CVX_CODE",
            Self::VaccinationCptCode => "VACCINATION_CPT_CODE",
            Self::VaccinationManufacturerCode => "VACCINATION_MANUFACTURER_CODE",
            Self::VaccinationNdcCode => "VACCINATION_NDC_CODE",
            Self::VaccinationNdcCodeUnitOfSale => "VACCINATION_NDC_CODE_UNIT_OF_SALE",
            Self::VaccinationNdcCodeUnitOfUse => "VACCINATION_NDC_CODE_UNIT_OF_USE",
            Self::VaccineProduct => "VACCINE_PRODUCT",
            Self::VaccineGroup => "VACCINE_GROUP",
            Self::VaccinationTradeName => "VACCINATION_TRADE_NAME",
            Self::PersonLanguage => "PERSON_LANGUAGE",
            Self::PatientRace => "PATIENT_RACE",
            Self::PatientEthnicity => "PATIENT_ETHNICITY",
            Self::PatientSex => "PATIENT_SEX",
            Self::PatientRegistryStatus => "PATIENT_REGISTRY_STATUS",
            Self::VaccinationInformationSource => "VACCINATION_INFORMATION_SOURCE",
            Self::VaccinationCompletion => "VACCINATION_COMPLETION",
            Self::VaccinationRefusal => "VACCINATION_REFUSAL",
            Self::FinancialStatusCode => "FINANCIAL_STATUS_CODE",
            Self::VaccinationFundingSource => "VACCINATION_FUNDING_SOURCE",
            Self::VaccinationVisDocType => "VACCINATION_VIS_DOC_TYPE",
            Self::ObservationIdentifier => "OBSERVATION_IDENTIFIER",
        }
    }

    /// Returns true for the NDC family (general, unit of sale, unit of use).
    pub const fn is_ndc(&self) -> bool {
        matches!(
            self,
            Self::VaccinationNdcCode
                | Self::VaccinationNdcCodeUnitOfSale
                | Self::VaccinationNdcCodeUnitOfUse
        )
    }
}

impl fmt::Display for CodesetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for CodesetType {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_uppercase().replace(['-', ' '], "_");
        Self::all()
            .iter()
            .copied()
            .find(|codeset| codeset.as_str() == normalized)
            .ok_or_else(|| ModelError::UnknownCodeset(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_names_round_trip() {
        for codeset in CodesetType::all() {
            assert_eq!(codeset.as_str().parse::<CodesetType>(), Ok(*codeset));
        }
    }

    #[test]
    fn parse_is_lenient_about_case_and_separators() {
        assert_eq!(
            "body route".parse::<CodesetType>(),
            Ok(CodesetType::BodyRoute)
        );
        assert_eq!(
            " Person-Language ".parse::<CodesetType>(),
            Ok(CodesetType::PersonLanguage)
        );
        assert!("NOT_A_CODESET".parse::<CodesetType>().is_err());
    }

    #[test]
    fn serde_uses_wire_names() {
        let json = serde_json::to_string(&CodesetType::VaccinationNdcCodeUnitOfUse).unwrap();
        assert_eq!(json, "\"VACCINATION_NDC_CODE_UNIT_OF_USE\"");
    }

    #[test]
    fn ndc_family() {
        let ndc: Vec<_> = CodesetType::all()
            .iter()
            .filter(|codeset| codeset.is_ndc())
            .collect();
        assert_eq!(ndc.len(), 3);
        assert!(!CodesetType::VaccinationCvxCode.is_ndc());
    }
}
