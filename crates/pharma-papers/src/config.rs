//! Configuration for the PubMed pharma/biotech paper search.

use std::path::PathBuf;
use std::time::Duration;

/// API configuration constants.
pub mod api {
    use std::time::Duration;

    /// NCBI E-utilities base URL.
    pub const EUTILS_API: &str = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils";

    /// ClinicalTrials.gov v2 API.
    pub const CLINICAL_TRIALS_API: &str = "https://clinicaltrials.gov/api/v2";

    /// openFDA API.
    pub const OPENFDA_API: &str = "https://api.fda.gov";

    /// Wikidata SPARQL endpoint.
    pub const WIKIDATA_SPARQL: &str = "https://query.wikidata.org/sparql";

    /// Tool name reported to NCBI and used in the User-Agent.
    pub const TOOL_NAME: &str = "pharma-papers";

    /// Request timeout.
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

    /// Connection timeout.
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Retries for transient failures (5xx, timeouts).
    pub const MAX_RETRIES: u32 = 3;

    /// PubMed ids fetched per efetch request.
    pub const BATCH_SIZE: usize = 10;

    /// Delay between efetch batches (NCBI allows ~3 req/s without a key).
    pub const BATCH_DELAY: Duration = Duration::from_millis(500);

    /// Lifetime of the persisted company registry (7 days).
    pub const CACHE_EXPIRY: Duration = Duration::from_secs(7 * 24 * 60 * 60);

    /// Default location of the persisted company registry.
    pub const DEFAULT_CACHE_FILE: &str = "pharma_companies_cache.json";

    /// Default contact email sent to NCBI.
    pub const DEFAULT_EMAIL: &str = "user@example.com";

    /// Default number of PubMed ids requested.
    pub const DEFAULT_MAX_RESULTS: usize = 100;
}

/// Search and registry configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Contact email sent with E-utilities requests.
    pub email: String,

    /// NCBI API key (optional, raises the E-utilities rate limit).
    pub api_key: Option<String>,

    /// Base URL for E-utilities (for testing with mock servers).
    pub eutils_url: String,

    /// Base URL for the ClinicalTrials.gov API.
    pub clinical_trials_url: String,

    /// Base URL for the openFDA API.
    pub openfda_url: String,

    /// Wikidata SPARQL endpoint.
    pub wikidata_url: String,

    /// Request timeout.
    pub request_timeout: Duration,

    /// Connection timeout.
    pub connect_timeout: Duration,

    /// Retries for transient HTTP failures.
    pub max_retries: u32,

    /// PubMed ids per efetch batch.
    pub batch_size: usize,

    /// Delay between efetch batches.
    pub batch_delay: Duration,

    /// Path of the persisted company registry.
    pub cache_file: PathBuf,

    /// How long a persisted registry stays valid.
    pub cache_expiry: Duration,
}

impl Config {
    /// Create a configuration with production endpoints.
    #[must_use]
    pub fn new(email: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            email: email.into(),
            api_key,
            eutils_url: api::EUTILS_API.to_string(),
            clinical_trials_url: api::CLINICAL_TRIALS_API.to_string(),
            openfda_url: api::OPENFDA_API.to_string(),
            wikidata_url: api::WIKIDATA_SPARQL.to_string(),
            request_timeout: api::REQUEST_TIMEOUT,
            connect_timeout: api::CONNECT_TIMEOUT,
            max_retries: api::MAX_RETRIES,
            batch_size: api::BATCH_SIZE,
            batch_delay: api::BATCH_DELAY,
            cache_file: PathBuf::from(api::DEFAULT_CACHE_FILE),
            cache_expiry: api::CACHE_EXPIRY,
        }
    }

    /// Create a test configuration with every endpoint on one mock server.
    #[must_use]
    pub fn for_testing(base_url: &str) -> Self {
        Self {
            email: "test@example.com".to_string(),
            api_key: None,
            eutils_url: format!("{}/eutils", base_url),
            clinical_trials_url: format!("{}/ctgov", base_url),
            openfda_url: format!("{}/openfda", base_url),
            wikidata_url: format!("{}/sparql", base_url),
            request_timeout: Duration::from_secs(5),
            connect_timeout: Duration::from_secs(2),
            max_retries: 0,                       // Fail fast in tests
            batch_size: api::BATCH_SIZE,
            batch_delay: Duration::from_millis(0), // No delay in tests
            cache_file: std::env::temp_dir().join(api::DEFAULT_CACHE_FILE),
            cache_expiry: api::CACHE_EXPIRY,
        }
    }

    /// Create configuration from environment variables.
    ///
    /// Reads `PUBMED_EMAIL`, `NCBI_API_KEY` and `PHARMA_COMPANY_CACHE`.
    pub fn from_env() -> anyhow::Result<Self> {
        let email =
            std::env::var("PUBMED_EMAIL").unwrap_or_else(|_| api::DEFAULT_EMAIL.to_string());
        let api_key = std::env::var("NCBI_API_KEY").ok().filter(|k| !k.is_empty());
        let mut config = Self::new(email, api_key);
        if let Ok(path) = std::env::var("PHARMA_COMPANY_CACHE") {
            if path.trim().is_empty() {
                anyhow::bail!("PHARMA_COMPANY_CACHE is set but empty");
            }
            config.cache_file = PathBuf::from(path);
        }
        Ok(config)
    }

    /// Point the persisted registry at another file.
    #[must_use]
    pub fn with_cache_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.cache_file = path.into();
        self
    }

    /// Check if an NCBI API key is configured.
    #[must_use]
    pub const fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(api::DEFAULT_EMAIL, None)
    }
}
