//! Company registry: the reference set of pharma/biotech company names.
//!
//! The registry is built once per session by [`RegistryBuilder`] from a
//! built-in baseline list plus three remote sources, persisted with a
//! time-based expiry, and then passed by reference into the affiliation
//! resolver. It is never mutated after construction.

pub mod baseline;
mod builder;
pub mod filter;
pub mod sources;
mod store;

pub use builder::RegistryBuilder;
pub use sources::{ClinicalTrialsSource, CompanySource, OpenFdaSource, WikidataSource};
pub use store::RegistryStore;

use std::collections::BTreeSet;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier of a source contributing names to the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SourceId {
    /// ClinicalTrials.gov sponsors and collaborators.
    #[serde(rename = "clinical_trials", alias = "clinicaltrials.gov")]
    ClinicalTrials,
    /// openFDA drug label manufacturers.
    #[serde(rename = "openfda", alias = "openfda.gov")]
    OpenFda,
    /// Wikidata pharmaceutical companies.
    #[serde(rename = "wikidata", alias = "wikidata.org")]
    Wikidata,
    /// Built-in baseline list.
    #[serde(rename = "hardcoded")]
    Hardcoded,
}

impl SourceId {
    /// Stable identifier used in logs and the persisted registry.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ClinicalTrials => "clinical_trials",
            Self::OpenFda => "openfda",
            Self::Wikidata => "wikidata",
            Self::Hardcoded => "hardcoded",
        }
    }
}

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Word substitutions applied by [`expand_variants`] (long form, short form).
pub const VARIANT_SUBSTITUTIONS: &[(&str, &str)] =
    &[("pharmaceuticals", "pharma"), ("biotechnology", "biotech"), ("laboratories", "labs")];

/// An immutable set of lowercase company names plus provenance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompanyRegistry {
    names: BTreeSet<String>,
    last_updated: Option<DateTime<Utc>>,
    sources_used: Vec<SourceId>,
}

impl CompanyRegistry {
    /// Build a registry from raw names; names are trimmed, lowercased and
    /// empty entries dropped.
    #[must_use]
    pub fn new<I, S>(
        names: I,
        last_updated: Option<DateTime<Utc>>,
        sources_used: Vec<SourceId>,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let names = names
            .into_iter()
            .filter_map(|name| normalize_name(name.as_ref()))
            .collect();
        Self {
            names,
            last_updated,
            sources_used,
        }
    }

    /// The built-in baseline list alone, never persisted.
    #[must_use]
    pub fn baseline() -> Self {
        Self::new(baseline::COMPANIES.iter(), None, vec![SourceId::Hardcoded])
    }

    /// Names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Check membership of an already-lowercase name.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Number of names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Check if the registry has no names.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// When the names were fetched, if ever.
    #[must_use]
    pub const fn last_updated(&self) -> Option<DateTime<Utc>> {
        self.last_updated
    }

    /// Sources that contributed to the current names, in fetch order.
    #[must_use]
    pub fn sources_used(&self) -> &[SourceId] {
        &self.sources_used
    }

    /// Check whether the registry is still valid at `now` (`now < last_updated + expiry`).
    ///
    /// A registry that was never populated is never fresh.
    #[must_use]
    pub fn is_fresh_at(&self, now: DateTime<Utc>, expiry: Duration) -> bool {
        let Some(updated) = self.last_updated else {
            return false;
        };
        let Ok(expiry) = chrono::Duration::from_std(expiry) else {
            return true;
        };
        updated.checked_add_signed(expiry).is_none_or(|expires_at| now < expires_at)
    }

    /// Keep only the names accepted by `keep`, preserving provenance.
    #[must_use]
    pub fn retain(&self, mut keep: impl FnMut(&str) -> bool) -> Self {
        Self {
            names: self.names.iter().filter(|name| keep(name.as_str())).cloned().collect(),
            last_updated: self.last_updated,
            sources_used: self.sources_used.clone(),
        }
    }
}

/// Summary of a registry for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryStats {
    /// Number of names.
    pub total_companies: usize,
    /// Persisted registry location.
    pub cache_file: PathBuf,
    /// First names in sorted order.
    pub sample_companies: Vec<String>,
    /// Contributing sources.
    pub sources_used: Vec<SourceId>,
    /// Fetch time of the names.
    pub last_updated: Option<DateTime<Utc>>,
}

impl RegistryStats {
    /// Number of sample names reported.
    pub const SAMPLE_SIZE: usize = 10;

    /// Summarize `registry` as persisted at `cache_file`.
    #[must_use]
    pub fn new(registry: &CompanyRegistry, cache_file: impl Into<PathBuf>) -> Self {
        Self {
            total_companies: registry.len(),
            cache_file: cache_file.into(),
            sample_companies: registry
                .names()
                .take(Self::SAMPLE_SIZE)
                .map(str::to_string)
                .collect(),
            sources_used: registry.sources_used().to_vec(),
            last_updated: registry.last_updated(),
        }
    }
}

/// Expand names with their common short forms.
///
/// Every name is lowercased; substitutions from [`VARIANT_SUBSTITUTIONS`] are
/// applied to each name and, transitively, to the variants they produce, so
/// expanding an already expanded set adds nothing.
#[must_use]
pub fn expand_variants<I, S>(names: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut expanded = BTreeSet::new();
    let mut pending: Vec<String> =
        names.into_iter().filter_map(|name| normalize_name(name.as_ref())).collect();

    while let Some(name) = pending.pop() {
        for (long, short) in VARIANT_SUBSTITUTIONS {
            if name.contains(long) {
                let variant = name.replace(long, short);
                if !expanded.contains(&variant) {
                    pending.push(variant);
                }
            }
        }
        expanded.insert(name);
    }

    expanded
}

fn normalize_name(name: &str) -> Option<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() { None } else { Some(trimmed.to_lowercase()) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_normalizes_names() {
        let registry = CompanyRegistry::new(["  Pfizer ", "", "   ", "MODERNA"], None, vec![]);
        let names: Vec<_> = registry.names().collect();
        assert_eq!(names, ["moderna", "pfizer"]);
    }

    #[test]
    fn test_baseline_registry() {
        let registry = CompanyRegistry::baseline();
        assert_eq!(registry.len(), baseline::COMPANIES.len());
        assert_eq!(registry.sources_used(), [SourceId::Hardcoded]);
        assert!(registry.last_updated().is_none());
        assert!(registry.contains("pfizer"));
    }

    #[test]
    fn test_never_populated_is_not_fresh() {
        let registry = CompanyRegistry::new(["pfizer"], None, vec![]);
        assert!(!registry.is_fresh_at(Utc::now(), Duration::from_secs(60)));
    }

    #[test]
    fn test_expand_variants() {
        let expanded = expand_variants(["Acadia Pharmaceuticals", "Charles River Laboratories"]);
        assert!(expanded.contains("acadia pharmaceuticals"));
        assert!(expanded.contains("acadia pharma"));
        assert!(expanded.contains("charles river laboratories"));
        assert!(expanded.contains("charles river labs"));
        assert_eq!(expanded.len(), 4);
    }

    #[test]
    fn test_expand_variants_combines_substitutions() {
        let expanded = expand_variants(["acme biotechnology pharmaceuticals"]);
        assert!(expanded.contains("acme biotech pharma"));
        assert!(expanded.contains("acme biotechnology pharma"));
        assert!(expanded.contains("acme biotech pharmaceuticals"));
        assert_eq!(expanded.len(), 4);
    }

    #[test]
    fn test_expand_variants_is_idempotent() {
        let once = expand_variants(baseline::COMPANIES.iter());
        let twice = expand_variants(once.iter());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_source_id_serde_accepts_legacy_names() {
        let sources: Vec<SourceId> = serde_json::from_str(
            r#"["clinicaltrials.gov", "openfda", "wikidata.org", "hardcoded"]"#,
        )
        .unwrap();
        assert_eq!(
            sources,
            [SourceId::ClinicalTrials, SourceId::OpenFda, SourceId::Wikidata, SourceId::Hardcoded]
        );
        assert_eq!(
            serde_json::to_string(&SourceId::ClinicalTrials).unwrap(),
            "\"clinical_trials\""
        );
    }

    #[test]
    fn test_stats_samples_first_names() {
        let registry = CompanyRegistry::baseline();
        let stats = RegistryStats::new(&registry, "cache.json");
        assert_eq!(stats.sample_companies.len(), RegistryStats::SAMPLE_SIZE);
        assert_eq!(stats.total_companies, registry.len());
        assert_eq!(stats.cache_file, PathBuf::from("cache.json"));
    }
}
