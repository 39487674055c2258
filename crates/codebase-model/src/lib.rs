//! Reference data model for immunization codesets.
//!
//! - [`CodesetType`]: the closed set of reference tables
//! - [`CodeEntry`]: one record, with status, redirect, validity window and
//!   cross-codeset links
//! - [`Dataset`]: the raw collection a loader produces and the index builder
//!   consumes
//! - [`CvxConceptType`]: classification carried on CVX codes

#![deny(unsafe_code)]

pub mod code;
pub mod codeset;
pub mod concept;
pub mod dataset;
pub mod date;
pub mod error;

pub use code::{CodeEntry, CodeStatus, UseDate};
pub use codeset::CodesetType;
pub use concept::CvxConceptType;
pub use dataset::{CodesetRecord, Dataset};
pub use date::parse_date;
pub use error::{ModelError, Result};
