//! Reference dataset loading for the immunization codebase.
//!
//! Reads the codebase XML file into a [`codebase_model::Dataset`]. The loader
//! only transports records; it does not check references between codes or
//! overlapping validity ranges.
//!
//! # Example
//!
//! ```rust,ignore
//! let dataset = codebase_ingest::load_dataset(&codebase_ingest::dataset_path())?;
//! println!("{} codes", dataset.code_count());
//! ```

#![deny(unsafe_code)]

pub mod error;
pub mod paths;
pub mod xml;

pub use error::{IngestError, Result};
pub use paths::{DATASET_ENV_VAR, data_root, dataset_path};
pub use xml::{load_dataset, load_dataset_from_str};
