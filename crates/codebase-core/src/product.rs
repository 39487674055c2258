//! Date-ranged vaccine product resolution.
//!
//! A vaccine product entry links one CVX code and one MVX code and carries
//! the date range in which it was on the market. Several products can share
//! the same (CVX, MVX) pair over time, e.g. CVX 113 from PMC was TENIVAC up
//! to 2002 and DECAVAC from 2003.
//!
//! # Selection
//!
//! 1. Candidates are the products recorded for the exact (CVX, MVX) pair.
//! 2. Among candidates whose range contains the date, the tightest wins:
//!    latest `valid_from`, then earliest `valid_until`, then lowest value.
//! 3. Otherwise the candidate whose range lies closest to the date wins
//!    (days before `valid_from` or after `valid_until`), with the same
//!    tie-break as above.
//!
//! Registries query historical dates against sparse range data, so a pair
//! with candidates always produces an answer.

use std::cmp::{Ordering, Reverse};
use std::collections::HashMap;

use chrono::NaiveDate;
use codebase_model::{CodeEntry, CodesetType, parse_date};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct ProductKey {
    vaccine: String,
    manufacturer: String,
}

impl ProductKey {
    fn new(vaccine: &str, manufacturer: &str) -> Self {
        Self {
            vaccine: vaccine.trim().to_string(),
            manufacturer: manufacturer.trim().to_string(),
        }
    }
}

/// Vaccine products grouped by (CVX, MVX) pair.
#[derive(Debug, Clone, Default)]
pub struct ProductResolver {
    products: HashMap<ProductKey, Vec<CodeEntry>>,
}

impl ProductResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Group product entries by their CVX and MVX links.
    ///
    /// Entries missing either link are ignored.
    pub fn from_entries<'a>(entries: impl IntoIterator<Item = &'a CodeEntry>) -> Self {
        let mut resolver = Self::new();
        for entry in entries {
            resolver.insert(entry.clone());
        }
        resolver
    }

    /// Add a product. Returns false when the entry lacks a CVX or MVX link.
    pub fn insert(&mut self, entry: CodeEntry) -> bool {
        let (Some(vaccine), Some(manufacturer)) = (
            entry.related(CodesetType::VaccinationCvxCode),
            entry.related(CodesetType::VaccinationManufacturerCode),
        ) else {
            return false;
        };
        let key = ProductKey::new(vaccine, manufacturer);
        self.products.entry(key).or_default().push(entry);
        true
    }

    /// Products recorded for the pair, in insertion order.
    pub fn candidates(&self, vaccine: &str, manufacturer: &str) -> &[CodeEntry] {
        self.products
            .get(&ProductKey::new(vaccine, manufacturer))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Number of distinct (CVX, MVX) pairs.
    pub fn pair_count(&self) -> usize {
        self.products.len()
    }

    /// Resolve the product for a pair on a textual date (`yyyyMMdd` or
    /// `yyyy-MM-dd`). An unparseable date resolves to `None`.
    pub fn resolve(&self, vaccine: &str, manufacturer: &str, date: &str) -> Option<&CodeEntry> {
        let Some(date) = parse_date(date) else {
            tracing::trace!(date, "Unparseable product query date");
            return None;
        };
        self.resolve_on(vaccine, manufacturer, date)
    }

    /// Resolve the product for a pair on `date`.
    pub fn resolve_on(
        &self,
        vaccine: &str,
        manufacturer: &str,
        date: NaiveDate,
    ) -> Option<&CodeEntry> {
        let candidates = self.candidates(vaccine, manufacturer);

        let exact = candidates
            .iter()
            .filter(|product| product.use_date.contains(date))
            .min_by(|a, b| tightness(a, b));
        if exact.is_some() {
            return exact;
        }

        let closest = candidates.iter().min_by(|a, b| {
            a.use_date
                .distance_days(date)
                .cmp(&b.use_date.distance_days(date))
                .then_with(|| tightness(a, b))
        });
        if let Some(product) = closest {
            tracing::trace!(
                vaccine,
                manufacturer,
                %date,
                product = %product.value,
                "No product range contains date, using closest"
            );
        }
        closest
    }
}

/// Orders the tighter range first: latest start, then earliest end, then
/// value for a total order.
fn tightness(a: &CodeEntry, b: &CodeEntry) -> Ordering {
    let start = |entry: &CodeEntry| Reverse(entry.use_date.valid_from);
    let end = |entry: &CodeEntry| entry.use_date.valid_until.unwrap_or(NaiveDate::MAX);
    start(a)
        .cmp(&start(b))
        .then_with(|| end(a).cmp(&end(b)))
        .then_with(|| a.value.cmp(&b.value))
}
