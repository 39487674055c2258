//! Per-codeset exact-match index.

use std::collections::HashMap;

use codebase_model::{CodeEntry, CodesetType};

/// Exact-match mapping from code value to entry for one codeset.
///
/// Keys are the trimmed code values. Lookups trim their input the same way
/// and never match on blank input.
#[derive(Debug, Clone)]
pub struct CodesetIndex {
    codeset_type: CodesetType,
    label: Option<String>,
    entries: HashMap<String, CodeEntry>,
}

impl CodesetIndex {
    pub fn new(codeset_type: CodesetType) -> Self {
        Self {
            codeset_type,
            label: None,
            entries: HashMap::new(),
        }
    }

    pub fn codeset_type(&self) -> CodesetType {
        self.codeset_type
    }

    /// Display label of the codeset as given by the source.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub(crate) fn set_label(&mut self, label: Option<String>) {
        if label.is_some() {
            self.label = label;
        }
    }

    /// Insert an entry, replacing and returning any entry with the same value.
    /// Entries with a blank value are dropped.
    pub(crate) fn insert(&mut self, entry: CodeEntry) -> Option<CodeEntry> {
        let key = entry.value.trim().to_string();
        if key.is_empty() {
            return None;
        }
        self.entries.insert(key, entry)
    }

    /// Look up an entry by raw value.
    pub fn lookup(&self, value: &str) -> Option<&CodeEntry> {
        let key = value.trim();
        if key.is_empty() {
            return None;
        }
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries sorted by value.
    pub fn entries(&self) -> Vec<&CodeEntry> {
        let mut entries: Vec<&CodeEntry> = self.entries.values().collect();
        entries.sort_by(|a, b| a.value.cmp(&b.value));
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn route_index() -> CodesetIndex {
        let mut index = CodesetIndex::new(CodesetType::BodyRoute);
        index.insert(CodeEntry::new(CodesetType::BodyRoute, "IV").with_label("Intravenous"));
        index.insert(CodeEntry::new(CodesetType::BodyRoute, "IM").with_label("Intramuscular"));
        index
    }

    #[test]
    fn exact_lookup_trims_input() {
        let index = route_index();
        assert_eq!(index.lookup("IV").unwrap().label.as_deref(), Some("Intravenous"));
        assert!(index.lookup(" IM ").is_some());
        assert!(index.lookup("iv").is_none());
    }

    #[test]
    fn blank_input_never_matches() {
        let index = route_index();
        assert!(index.lookup("").is_none());
        assert!(index.lookup("   ").is_none());
    }

    #[test]
    fn last_write_wins() {
        let mut index = route_index();
        let replaced = index
            .insert(CodeEntry::new(CodesetType::BodyRoute, "IV").with_label("IV push"));
        assert_eq!(replaced.unwrap().label.as_deref(), Some("Intravenous"));
        assert_eq!(index.lookup("IV").unwrap().label.as_deref(), Some("IV push"));
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn blank_value_is_dropped() {
        let mut index = route_index();
        let mut blank = CodeEntry::new(CodesetType::BodyRoute, "X");
        blank.value = "  ".to_string();
        assert!(index.insert(blank).is_none());
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn entries_are_sorted() {
        let index = route_index();
        let values: Vec<&str> = index.entries().iter().map(|e| e.value.as_str()).collect();
        assert_eq!(values, vec!["IM", "IV"]);
    }
}
