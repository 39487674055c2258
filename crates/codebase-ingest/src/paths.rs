//! Dataset path resolution.

use std::path::PathBuf;

/// Environment variable for overriding the reference dataset location.
pub const DATASET_ENV_VAR: &str = "CODEBASE_DATASET";

/// File name of the bundled reference dataset.
pub const DEFAULT_DATASET_FILE: &str = "Compiled.xml";

/// Get the reference dataset path.
///
/// Resolution order:
/// 1. `CODEBASE_DATASET` environment variable
/// 2. `data/Compiled.xml` relative to the workspace root
pub fn dataset_path() -> PathBuf {
    if let Ok(path) = std::env::var(DATASET_ENV_VAR)
        && !path.trim().is_empty()
    {
        return PathBuf::from(path);
    }
    data_root().join(DEFAULT_DATASET_FILE)
}

/// The bundled `data/` directory.
pub fn data_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../data")
}
