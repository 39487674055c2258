//! In-memory immunization code index.
//!
//! [`build`] turns a parsed [`codebase_model::Dataset`] into a read-only
//! [`CodeMap`]; [`load_from_path`] and [`load_from_str`] parse and build in
//! one step.
//!
//! ```rust,ignore
//! use codebase_core::{Mapping, load_from_path};
//! use codebase_model::CodesetType;
//!
//! let map = load_from_path(&codebase_ingest::dataset_path())?;
//! let spanish = map.get_code_for_codeset_with(CodesetType::PersonLanguage, "Sp", Mapping::Map);
//! let product = map.get_product_for("113", "PMC", "20160101");
//! ```

#![deny(unsafe_code)]

pub mod builder;
pub mod code_map;
pub mod index;
pub mod product;
pub mod variants;

pub use builder::{build, load_from_path, load_from_str};
pub use code_map::{CodeMap, MAX_MAPPING_HOPS, Mapping};
pub use index::CodesetIndex;
pub use product::ProductResolver;
pub use variants::{ndc_variants, variants_for};
