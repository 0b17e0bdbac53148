//! Fetch-and-merge pass with persisted expiry.

use std::time::Duration;

use chrono::Utc;

use super::filter::{is_plausible_company_name, is_strict_company_name};
use super::sources::{CompanySource, default_sources};
use super::store::RegistryStore;
use super::{CompanyRegistry, RegistryStats, SourceId, baseline, expand_variants};
use crate::client::HttpClient;
use crate::config::Config;
use crate::error::{RegistryError, RegistryResult};

/// Builds a [`CompanyRegistry`] from the baseline list, remote sources and
/// the persisted copy.
pub struct RegistryBuilder {
    sources: Vec<Box<dyn CompanySource>>,
    store: RegistryStore,
    expiry: Duration,
}

impl RegistryBuilder {
    /// Create a builder with the production sources.
    ///
    /// # Errors
    ///
    /// Returns error if HTTP client initialization fails.
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        Ok(Self::from_http(&HttpClient::new(config)?, config))
    }

    /// Create a builder on top of an existing HTTP client.
    #[must_use]
    pub fn from_http(http: &HttpClient, config: &Config) -> Self {
        Self {
            sources: default_sources(http, config),
            store: RegistryStore::new(&config.cache_file),
            expiry: config.cache_expiry,
        }
    }

    /// Create a builder with explicit sources and store.
    #[must_use]
    pub fn with_sources(sources: Vec<Box<dyn CompanySource>>, store: RegistryStore) -> Self {
        Self {
            sources,
            store,
            expiry: crate::config::api::CACHE_EXPIRY,
        }
    }

    /// The backing store.
    #[must_use]
    pub fn store(&self) -> &RegistryStore {
        &self.store
    }

    /// Return a registry, fetching only when needed.
    ///
    /// With `hardcoded_only` the baseline is returned without touching the
    /// cache or the network. Otherwise a fresh persisted registry is reused
    /// unless `force_refresh` is set.
    pub async fn load_or_fetch(
        &self,
        force_refresh: bool,
        hardcoded_only: bool,
    ) -> RegistryResult<CompanyRegistry> {
        if hardcoded_only {
            let registry = CompanyRegistry::baseline();
            tracing::info!(companies = registry.len(), "Using hardcoded company list");
            return Ok(registry);
        }

        if !force_refresh {
            if let Some(cached) = self.load_fresh() {
                return Ok(cached);
            }
        }

        let registry = self.merge_sources().await?;
        self.persist(&registry);
        Ok(registry)
    }

    /// Delete the persisted registry, refetch, and keep only names that pass
    /// the strict filter. The result replaces the persisted registry.
    pub async fn rebuild_cleaned(&self) -> RegistryResult<CompanyRegistry> {
        if self.store.remove()? {
            tracing::info!(
                path = %self.store.path().display(),
                "Removed persisted company registry"
            );
        }

        let merged = self.merge_sources().await?;
        let cleaned = merged.retain(is_strict_company_name);

        tracing::info!(
            before = merged.len(),
            after = cleaned.len(),
            "Cleaned company registry"
        );

        if cleaned.is_empty() {
            return Err(RegistryError::Unavailable(
                "no company names passed the strict filter".into(),
            ));
        }

        self.persist(&cleaned);
        Ok(cleaned)
    }

    /// Summarize `registry` against this builder's store.
    #[must_use]
    pub fn stats(&self, registry: &CompanyRegistry) -> RegistryStats {
        RegistryStats::new(registry, self.store.path())
    }

    fn load_fresh(&self) -> Option<CompanyRegistry> {
        match self.store.load() {
            Ok(Some(cached)) if cached.is_empty() => {
                tracing::debug!("Persisted company registry is empty");
                None
            }
            Ok(Some(cached)) if cached.is_fresh_at(Utc::now(), self.expiry) => {
                tracing::info!(companies = cached.len(), "Using cached company registry");
                Some(cached)
            }
            Ok(Some(_)) => {
                tracing::info!("Persisted company registry expired");
                None
            }
            Ok(None) => None,
            Err(e) => {
                tracing::warn!(error = %e, "Ignoring unreadable company registry");
                None
            }
        }
    }

    /// Baseline plus every reachable source, filtered and expanded. Never
    /// touches the store.
    async fn merge_sources(&self) -> RegistryResult<CompanyRegistry> {
        let mut names: Vec<String> =
            baseline::COMPANIES.iter().map(|name| (*name).to_string()).collect();
        let mut sources_used = vec![SourceId::Hardcoded];

        for source in &self.sources {
            let id = source.id();
            match source.fetch_names().await {
                Ok(raw) => {
                    let fetched = raw.len();
                    let before = names.len();
                    names.extend(
                        raw.into_iter()
                            .filter(|name| is_plausible_company_name(name))
                            .map(|name| name.trim().to_lowercase()),
                    );
                    tracing::info!(
                        source = %id,
                        fetched,
                        admitted = names.len() - before,
                        "Fetched company names"
                    );
                    sources_used.push(id);
                }
                Err(error) => {
                    let e = RegistryError::source_fetch(id, error);
                    tracing::warn!(source = %id, error = %e, "Skipping company source");
                }
            }
        }

        if sources_used.len() == 1 && !self.sources.is_empty() {
            tracing::warn!("All company sources failed, using hardcoded companies only");
        }

        let expanded = expand_variants(&names);
        if expanded.is_empty() {
            return Err(RegistryError::Unavailable("company registry is empty".into()));
        }

        let registry = CompanyRegistry::new(expanded, Some(Utc::now()), sources_used);
        tracing::info!(
            companies = registry.len(),
            sources = ?registry.sources_used(),
            "Built company registry"
        );

        Ok(registry)
    }

    fn persist(&self, registry: &CompanyRegistry) {
        if let Err(e) = self.store.save(registry) {
            tracing::warn!(
                path = %self.store.path().display(),
                error = %e,
                "Failed to persist company registry"
            );
        }
    }
}

impl std::fmt::Debug for RegistryBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistryBuilder")
            .field("sources", &self.sources.iter().map(|s| s.id()).collect::<Vec<_>>())
            .field("store", &self.store)
            .field("expiry", &self.expiry)
            .finish()
    }
}
