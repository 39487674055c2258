//! NDC spelling variants.
//!
//! NDC product identifiers reach a registry in several shapes:
//!
//! - dashed 10-digit labeler-product-package in one of the FDA layouts
//!   `4-4-2`, `5-3-2`, `5-4-1`
//! - the HIPAA 11-digit `5-4-2` layout, dashed or not
//! - either of the above with one extra leading filler digit
//!
//! The reference file stores the `5-4-2` layout, sometimes dashed and
//! sometimes not. [`ndc_variants`] rewrites a raw value into every `5-4-2`
//! spelling it can stand for so a caller can retry an index lookup.
//!
//! ```
//! use codebase_core::variants::ndc_variants;
//!
//! assert_eq!(
//!     ndc_variants("149281-0400-05"),
//!     vec!["49281-0400-05".to_string(), "49281040005".to_string()]
//! );
//! assert!(ndc_variants("not an ndc").is_empty());
//! ```

use codebase_model::CodesetType;

const LABELER_WIDTH: usize = 5;
const PRODUCT_WIDTH: usize = 4;
const PACKAGE_WIDTH: usize = 2;
const HIPAA_DIGITS: usize = LABELER_WIDTH + PRODUCT_WIDTH + PACKAGE_WIDTH;

/// Candidate spellings of `raw` for a lookup in `codeset`.
///
/// Only the NDC family has variant rules; every other codeset yields no
/// candidates. The three NDC codesets share the `5-4-2` layout, so the
/// candidates do not depend on which of them is queried. Keeping unit-of-sale
/// and unit-of-use apart is up to the caller, which looks candidates up in
/// the queried codeset only.
pub fn variants_for(codeset: CodesetType, raw: &str) -> Vec<String> {
    if codeset.is_ndc() {
        ndc_variants(raw)
    } else {
        Vec::new()
    }
}

/// Labeler, product and package segments in the `5-4-2` layout.
#[derive(Debug, Clone, PartialEq, Eq)]
struct NdcSegments {
    labeler: String,
    product: String,
    package: String,
}

impl NdcSegments {
    fn padded(labeler: &str, product: &str, package: &str) -> Self {
        Self {
            labeler: format!("{:0>width$}", labeler, width = LABELER_WIDTH),
            product: format!("{:0>width$}", product, width = PRODUCT_WIDTH),
            package: format!("{:0>width$}", package, width = PACKAGE_WIDTH),
        }
    }

    fn dashed(&self) -> String {
        format!("{}-{}-{}", self.labeler, self.product, self.package)
    }

    fn undashed(&self) -> String {
        format!("{}{}{}", self.labeler, self.product, self.package)
    }
}

/// Candidate `5-4-2` spellings of a raw NDC value, most specific first.
///
/// Every layout the input can stand for is emitted in the input's own dash
/// style first, then all of them again in the other style. Whitespace is
/// ignored. Anything other than digits and dashes, or a digit count that
/// matches no NDC layout, yields no candidates.
pub fn ndc_variants(raw: &str) -> Vec<String> {
    let compact: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
    if compact.is_empty() || !compact.chars().all(|c| c.is_ascii_digit() || c == '-') {
        return Vec::new();
    }

    let dashed = compact.contains('-');
    let layouts = if dashed {
        layouts_from_dashed(&compact)
    } else {
        layouts_from_digits(&compact)
    };

    let (same_style, other_style): (fn(&NdcSegments) -> String, fn(&NdcSegments) -> String) =
        if dashed {
            (NdcSegments::dashed, NdcSegments::undashed)
        } else {
            (NdcSegments::undashed, NdcSegments::dashed)
        };

    let mut candidates: Vec<String> = Vec::with_capacity(layouts.len() * 2);
    for candidate in layouts
        .iter()
        .map(same_style)
        .chain(layouts.iter().map(other_style))
    {
        if !candidates.contains(&candidate) {
            candidates.push(candidate);
        }
    }
    candidates
}

fn layouts_from_dashed(value: &str) -> Vec<NdcSegments> {
    let segments: Vec<&str> = value.split('-').collect();
    let [labeler, product, package] = segments.as_slice() else {
        return Vec::new();
    };

    let labeler = match labeler.len() {
        4 | 5 => *labeler,
        // One leading filler digit in front of a 5-digit labeler.
        6 => &labeler[1..],
        _ => return Vec::new(),
    };
    if !(1..=PRODUCT_WIDTH).contains(&product.len()) || !(1..=PACKAGE_WIDTH).contains(&package.len())
    {
        return Vec::new();
    }

    vec![NdcSegments::padded(labeler, product, package)]
}

fn layouts_from_digits(value: &str) -> Vec<NdcSegments> {
    match value.len() {
        HIPAA_DIGITS => vec![split_hipaa(value)],
        12 => vec![split_hipaa(&value[1..])],
        10 => vec![
            // 4-4-2
            NdcSegments::padded(&value[..4], &value[4..8], &value[8..]),
            // 5-3-2
            NdcSegments::padded(&value[..5], &value[5..8], &value[8..]),
            // 5-4-1
            NdcSegments::padded(&value[..5], &value[5..9], &value[9..]),
        ],
        _ => Vec::new(),
    }
}

fn split_hipaa(value: &str) -> NdcSegments {
    let (labeler, rest) = value.split_at(LABELER_WIDTH);
    let (product, package) = rest.split_at(PRODUCT_WIDTH);
    NdcSegments::padded(labeler, product, package)
}
