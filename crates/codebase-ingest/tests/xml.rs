#![allow(missing_docs)]

use chrono::NaiveDate;
use codebase_ingest::{IngestError, data_root, load_dataset, load_dataset_from_str};
use codebase_model::{CodeStatus, CodesetType, CvxConceptType};

fn codes(
    dataset: &codebase_model::Dataset,
    codeset: CodesetType,
) -> Vec<&codebase_model::CodeEntry> {
    dataset
        .codesets
        .iter()
        .filter(|record| record.codeset_type == codeset)
        .flat_map(|record| record.codes.iter())
        .collect()
}

#[test]
fn loads_bundled_dataset() {
    let dataset = load_dataset(&data_root().join("Compiled.xml")).expect("load Compiled.xml");
    assert_eq!(dataset.source.as_deref(), Some("Compiled.xml"));
    assert!(dataset.code_count() > 30);

    let routes = codes(&dataset, CodesetType::BodyRoute);
    let iv = routes.iter().find(|code| code.value == "IV").expect("IV route");
    assert_eq!(iv.label.as_deref(), Some("Intravenous"));

    let cvx = codes(&dataset, CodesetType::VaccinationCvxCode);
    let mmr = cvx.iter().find(|code| code.value == "03").expect("CVX 03");
    assert_eq!(mmr.label.as_deref(), Some("MMR"));
    assert_eq!(mmr.concept_type, Some(CvxConceptType::Vaccine));
    assert_eq!(
        mmr.related(CodesetType::VaccinationManufacturerCode),
        Some("MSD")
    );
    assert_eq!(mmr.use_date.valid_from, NaiveDate::from_ymd_opt(1971, 1, 1));
    assert_eq!(mmr.use_date.valid_until, None);
}

#[test]
fn reads_status_and_redirect() {
    let dataset = load_dataset(&data_root().join("Compiled.xml")).expect("load Compiled.xml");
    let languages = codes(&dataset, CodesetType::PersonLanguage);

    let ar = languages.iter().find(|code| code.value == "Ar").unwrap();
    assert_eq!(ar.status, CodeStatus::Deprecated);
    assert_eq!(ar.maps_to(), None);

    let sp = languages.iter().find(|code| code.value == "Sp").unwrap();
    assert!(sp.is_deprecated());
    assert_eq!(sp.maps_to(), Some("es"));
}

#[test]
fn reads_description_status_and_use_date() {
    let xml = r#"
        <codebase>
          <codeset type="VACCINE_PRODUCT">
            <code>
              <value>TENIVAC</value>
              <label> Tenivac </label>
              <description>Td, adsorbed</description>
              <code-status status="Invalid"/>
              <use-date not-before="2003-01-01" not-expected-after="2020-06-30"/>
            </code>
          </codeset>
        </codebase>
    "#;
    let dataset = load_dataset_from_str(xml, "fields").expect("load inline document");
    let products = codes(&dataset, CodesetType::VaccineProduct);
    let tenivac = products.first().expect("TENIVAC");

    assert_eq!(tenivac.label.as_deref(), Some("Tenivac"));
    assert_eq!(tenivac.description.as_deref(), Some("Td, adsorbed"));
    assert_eq!(tenivac.status, CodeStatus::Invalid);
    assert_eq!(tenivac.maps_to(), None);
    assert_eq!(tenivac.use_date.valid_from, NaiveDate::from_ymd_opt(2003, 1, 1));
    assert_eq!(tenivac.use_date.valid_until, None);
    assert_eq!(
        tenivac.use_date.expected_until,
        NaiveDate::from_ymd_opt(2020, 6, 30)
    );
}

#[test]
fn skips_unknown_codesets_links_and_blank_values() {
    let xml = r#"
        <codebase>
          <codeset type="NOT_A_REAL_CODESET">
            <code><value>X</value></code>
          </codeset>
          <codeset type="BODY_ROUTE">
            <code><value>  </value><label>blank</label></code>
            <code>
              <value> IM </value>
              <reference>
                <link-to codeset="MYSTERY" value="1"/>
                <link-to codeset="BODY_SITE" value="LD"/>
              </reference>
            </code>
          </codeset>
        </codebase>
    "#;
    let dataset = load_dataset_from_str(xml, "inline").expect("parse inline xml");
    assert_eq!(dataset.codesets.len(), 1);
    let route = &dataset.codesets[0];
    assert_eq!(route.codeset_type, CodesetType::BodyRoute);
    assert_eq!(route.codes.len(), 1);
    assert_eq!(route.codes[0].value, "IM");
    assert_eq!(route.codes[0].related_codes.len(), 1);
    assert_eq!(route.codes[0].related(CodesetType::BodySite), Some("LD"));
}

#[test]
fn empty_codebase_is_empty_dataset() {
    let dataset = load_dataset_from_str("<codebase/>", "empty").unwrap();
    assert!(dataset.codesets.is_empty());
}

#[test]
fn truncated_document_is_xml_error() {
    let err = load_dataset_from_str(r#"<codebase><codeset type="BODY_ROUTE">"#, "broken")
        .unwrap_err();
    assert!(matches!(err, IngestError::Xml { ref source_name, .. } if source_name == "broken"));
}

#[test]
fn invalid_date_fails_the_load() {
    let xml = r#"
        <codebase>
          <codeset type="VACCINE_PRODUCT">
            <code>
              <value>TENIVAC</value>
              <use-date not-before="1970-99-01"/>
            </code>
          </codeset>
        </codebase>
    "#;
    let err = load_dataset_from_str(xml, "dates").unwrap_err();
    assert!(matches!(
        err,
        IngestError::InvalidDate { field: "not-before", .. }
    ));
}

#[test]
fn missing_file_is_io_error() {
    let err = load_dataset(&data_root().join("does-not-exist.xml")).unwrap_err();
    assert!(matches!(err, IngestError::Io { .. }));
}
