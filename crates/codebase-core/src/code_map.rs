//! The code map: all codeset indexes plus product resolution.
//!
//! A [`CodeMap`] is built once by [`crate::builder`] and is read-only
//! afterwards. Every query takes `&self`, so a map can be shared across
//! threads behind an `Arc` and replaced wholesale when the reference data is
//! reloaded.
//!
//! # Queries
//!
//! | Query                          | Resolution                                          |
//! |--------------------------------|-----------------------------------------------------|
//! | [`CodeMap::get_code_for_codeset`] | exact value, then NDC variants (NDC codesets only) |
//! | [`CodeMap::get_code_for_codeset_with`] | as above, then follow deprecated redirects  |
//! | [`CodeMap::check_variants`]    | NDC variants only, within the given codeset        |
//! | [`CodeMap::get_related_code`]  | link recorded on the entry, into the target codeset |
//! | [`CodeMap::get_product_for`]   | date-ranged product for a CVX/MVX pair              |
//!
//! Misses, blank input and unparseable dates all answer `None`.

use std::collections::HashMap;

use codebase_model::{CodeEntry, CodesetType};

use crate::index::CodesetIndex;
use crate::product::ProductResolver;
use crate::variants::variants_for;

/// Upper bound on deprecated-code redirects followed in one lookup.
pub const MAX_MAPPING_HOPS: usize = 8;

/// Whether a lookup follows deprecated-code redirects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mapping {
    /// Return the entry matching the raw value.
    #[default]
    NoMap,
    /// Follow `maps_to` to the replacement entry.
    Map,
}

/// Read-only index over a reference dataset.
#[derive(Debug, Clone, Default)]
pub struct CodeMap {
    indexes: HashMap<CodesetType, CodesetIndex>,
    products: ProductResolver,
}

impl CodeMap {
    pub(crate) fn from_parts(
        indexes: HashMap<CodesetType, CodesetIndex>,
        products: ProductResolver,
    ) -> Self {
        Self { indexes, products }
    }

    /// Canonical entry for `value` in `codeset`, without following redirects.
    pub fn get_code_for_codeset(&self, codeset: CodesetType, value: &str) -> Option<&CodeEntry> {
        self.get_code_for_codeset_with(codeset, value, Mapping::NoMap)
    }

    /// Entry for `value` in `codeset`; with [`Mapping::Map`] a deprecated
    /// entry is replaced by the end of its `maps_to` chain.
    ///
    /// A redirect that does not resolve leaves the matched entry in place: a
    /// deprecated code without a replacement is still an answer.
    pub fn get_code_for_codeset_with(
        &self,
        codeset: CodesetType,
        value: &str,
        mapping: Mapping,
    ) -> Option<&CodeEntry> {
        let index = self.indexes.get(&codeset)?;
        let found = index
            .lookup(value)
            .or_else(|| self.check_variants(codeset, value));

        let Some(found) = found else {
            tracing::trace!(%codeset, value, "Code not found");
            return None;
        };

        match mapping {
            Mapping::NoMap => Some(found),
            Mapping::Map => Some(follow_maps_to(index, found)),
        }
    }

    /// First NDC spelling variant of `value` present in `codeset`.
    ///
    /// Only NDC codesets have variants; every other codeset answers `None`.
    pub fn check_variants(&self, codeset: CodesetType, value: &str) -> Option<&CodeEntry> {
        let index = self.indexes.get(&codeset)?;
        variants_for(codeset, value)
            .iter()
            .find_map(|candidate| index.lookup(candidate))
    }

    /// Entry in `target` that `entry` links to.
    pub fn get_related_code(&self, entry: &CodeEntry, target: CodesetType) -> Option<&CodeEntry> {
        let value = entry.related(target)?;
        self.indexes.get(&target)?.lookup(value)
    }

    /// Vaccine product for a CVX/MVX pair valid on `date` (`yyyyMMdd`).
    pub fn get_product_for(
        &self,
        vaccine: &str,
        manufacturer: &str,
        date: &str,
    ) -> Option<&CodeEntry> {
        self.products.resolve(vaccine, manufacturer, date)
    }

    /// Index for one codeset, if the dataset contained it.
    pub fn codeset(&self, codeset: CodesetType) -> Option<&CodesetIndex> {
        self.indexes.get(&codeset)
    }

    /// Loaded codesets in declaration order.
    pub fn codesets(&self) -> Vec<CodesetType> {
        CodesetType::all()
            .iter()
            .copied()
            .filter(|codeset| self.indexes.contains_key(codeset))
            .collect()
    }

    pub fn products(&self) -> &ProductResolver {
        &self.products
    }

    /// Total number of indexed entries.
    pub fn len(&self) -> usize {
        self.indexes.values().map(CodesetIndex::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Follow `maps_to` from `start` within one codeset.
///
/// Stops at an entry without a redirect, at an unresolved target, on a
/// revisit, or after [`MAX_MAPPING_HOPS`].
fn follow_maps_to<'a>(index: &'a CodesetIndex, start: &'a CodeEntry) -> &'a CodeEntry {
    let mut current = start;
    let mut visited: Vec<&str> = vec![start.value.as_str()];

    for _ in 0..MAX_MAPPING_HOPS {
        let Some(target) = current.maps_to() else {
            break;
        };
        let Some(next) = index.lookup(target) else {
            tracing::trace!(code = %current.value, maps_to = target, "Unresolved maps-to target");
            break;
        };
        if visited.contains(&next.value.as_str()) {
            tracing::debug!(
                codeset = %index.codeset_type(),
                code = %start.value,
                "maps-to cycle"
            );
            break;
        }
        visited.push(next.value.as_str());
        current = next;
    }

    current
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index_of(codeset: CodesetType, entries: Vec<CodeEntry>) -> CodesetIndex {
        let mut index = CodesetIndex::new(codeset);
        for entry in entries {
            index.insert(entry);
        }
        index
    }

    #[test]
    fn chain_is_followed_to_the_end() {
        let index = index_of(
            CodesetType::PersonLanguage,
            vec![
                CodeEntry::new(CodesetType::PersonLanguage, "a").with_maps_to("b"),
                CodeEntry::new(CodesetType::PersonLanguage, "b").with_maps_to("c"),
                CodeEntry::new(CodesetType::PersonLanguage, "c"),
            ],
        );
        let start = index.lookup("a").unwrap();
        assert_eq!(follow_maps_to(&index, start).value, "c");
    }

    #[test]
    fn unresolved_target_keeps_last_entry() {
        let index = index_of(
            CodesetType::PersonLanguage,
            vec![CodeEntry::new(CodesetType::PersonLanguage, "a").with_maps_to("gone")],
        );
        let start = index.lookup("a").unwrap();
        assert_eq!(follow_maps_to(&index, start).value, "a");
    }

    #[test]
    fn cycles_terminate() {
        let index = index_of(
            CodesetType::PersonLanguage,
            vec![
                CodeEntry::new(CodesetType::PersonLanguage, "a").with_maps_to("b"),
                CodeEntry::new(CodesetType::PersonLanguage, "b").with_maps_to("a"),
                CodeEntry::new(CodesetType::PersonLanguage, "self").with_maps_to("self"),
            ],
        );
        assert_eq!(follow_maps_to(&index, index.lookup("a").unwrap()).value, "b");
        assert_eq!(
            follow_maps_to(&index, index.lookup("self").unwrap()).value,
            "self"
        );
    }

    #[test]
    fn long_chains_are_bounded() {
        let mut entries: Vec<CodeEntry> = (0..20)
            .map(|i| {
                CodeEntry::new(CodesetType::PersonLanguage, format!("c{i}"))
                    .with_maps_to(format!("c{}", i + 1))
            })
            .collect();
        entries.push(CodeEntry::new(CodesetType::PersonLanguage, "c20"));
        let index = index_of(CodesetType::PersonLanguage, entries);

        let end = follow_maps_to(&index, index.lookup("c0").unwrap());
        assert_eq!(end.value, format!("c{MAX_MAPPING_HOPS}"));
    }

    #[test]
    fn empty_map_answers_none() {
        let map = CodeMap::default();
        assert!(map.is_empty());
        assert!(map.get_code_for_codeset(CodesetType::BodyRoute, "IV").is_none());
        assert!(
            map.check_variants(CodesetType::VaccinationNdcCode, "49281-0400-05")
                .is_none()
        );
        assert!(map.get_product_for("113", "PMC", "20160101").is_none());
        assert!(map.codesets().is_empty());
    }
}
