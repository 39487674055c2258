//! Raw reference dataset as handed over by a loader.
//!
//! A [`Dataset`] is a typed but otherwise unchecked collection of codesets.
//! It may contain duplicate values, dangling references, and a codeset type
//! more than once; the index builder decides how to treat those.

use serde::{Deserialize, Serialize};

use crate::code::CodeEntry;
use crate::codeset::CodesetType;

/// One `<codeset>` block from the source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CodesetRecord {
    pub codeset_type: CodesetType,
    pub label: Option<String>,
    pub codes: Vec<CodeEntry>,
}

impl CodesetRecord {
    pub fn new(codeset_type: CodesetType) -> Self {
        Self {
            codeset_type,
            label: None,
            codes: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Append a code. The entry is re-homed to this codeset.
    pub fn push(&mut self, mut code: CodeEntry) {
        code.codeset_type = self.codeset_type;
        self.codes.push(code);
    }

    #[must_use]
    pub fn with_code(mut self, code: CodeEntry) -> Self {
        self.push(code);
        self
    }
}

/// The full parsed reference dataset.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dataset {
    /// Source name for diagnostics (file name or label).
    pub source: Option<String>,
    pub codesets: Vec<CodesetRecord>,
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, codeset: CodesetRecord) {
        self.codesets.push(codeset);
    }

    #[must_use]
    pub fn with_codeset(mut self, codeset: CodesetRecord) -> Self {
        self.push(codeset);
        self
    }

    /// Total number of code records across all codesets.
    pub fn code_count(&self) -> usize {
        self.codesets.iter().map(|codeset| codeset.codes.len()).sum()
    }
}
