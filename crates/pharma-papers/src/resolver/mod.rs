//! Affiliation resolver: registry lookup plus company name extraction.
//!
//! [`match_affiliation`] is a pure function of one affiliation string and a
//! [`CompanyRegistry`]. Matching is lexical: the longest registry entry that
//! occurs as a substring of the lowercased affiliation wins. A readable name
//! is then cut from the words around the match, with institutional prefixes
//! and suffixes removed.
//!
//! # Example
//!
//! ```
//! use pharma_papers::registry::CompanyRegistry;
//! use pharma_papers::resolver::match_affiliation;
//!
//! let registry = CompanyRegistry::new(["gsk", "glaxosmithkline"], None, vec![]);
//! let found = match_affiliation("Employee of GlaxoSmithKline Inc.", &registry).unwrap();
//! assert_eq!(found.matched_company_raw, "glaxosmithkline");
//! ```

mod extract;
mod paper;

pub use paper::{AffiliationSummary, extract_corresponding_email, qualify_paper, summarize_authors};

use crate::registry::CompanyRegistry;

/// Result of resolving one affiliation string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AffiliationMatch {
    /// The affiliation text as given.
    pub raw_affiliation: String,

    /// Registry entry (lowercase) that matched.
    pub matched_company_raw: String,

    /// Human-readable company name for reporting.
    pub extracted_company_name: String,
}

/// Resolve an affiliation against the registry.
///
/// Returns `None` for blank text or when no registry entry occurs in it.
/// Among equally long matching entries the lexicographically smallest wins.
#[must_use]
pub fn match_affiliation(
    affiliation: &str,
    registry: &CompanyRegistry,
) -> Option<AffiliationMatch> {
    if affiliation.trim().is_empty() {
        return None;
    }

    let lower = affiliation.to_lowercase();

    let mut best: Option<(&str, usize)> = None;
    for name in registry.names() {
        if !lower.contains(name) {
            continue;
        }
        let len = name.chars().count();
        if best.is_none_or(|(_, best_len)| len > best_len) {
            best = Some((name, len));
        }
    }

    let (matched, _) = best?;
    let extracted = extract::extract_company_name(affiliation, matched)
        .unwrap_or_else(|| extract::title_case(matched));

    tracing::trace!(matched, extracted = %extracted, "Matched affiliation");

    Some(AffiliationMatch {
        raw_affiliation: affiliation.to_string(),
        matched_company_raw: matched.to_string(),
        extracted_company_name: extracted,
    })
}
