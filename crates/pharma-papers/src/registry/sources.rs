//! Remote sources of candidate company names.
//!
//! Each source returns raw names; filtering and normalization happen in the
//! builder so every source is treated the same way.

use async_trait::async_trait;
use serde::Deserialize;

use super::SourceId;
use crate::client::HttpClient;
use crate::config::Config;
use crate::error::ClientResult;

/// A remote provider of candidate company names.
#[async_trait]
pub trait CompanySource: Send + Sync {
    /// Identifier recorded in the registry provenance.
    fn id(&self) -> SourceId;

    /// Fetch raw candidate names.
    async fn fetch_names(&self) -> ClientResult<Vec<String>>;
}

/// The three production sources in fetch order.
#[must_use]
pub fn default_sources(http: &HttpClient, config: &Config) -> Vec<Box<dyn CompanySource>> {
    vec![
        Box::new(ClinicalTrialsSource::new(http.clone(), &config.clinical_trials_url)),
        Box::new(OpenFdaSource::new(http.clone(), &config.openfda_url)),
        Box::new(WikidataSource::new(http.clone(), &config.wikidata_url)),
    ]
}

// =============================================================================
// ClinicalTrials.gov
// =============================================================================

const CLINICAL_TRIALS_TERM: &str = "pharmaceutical OR pharma OR biotech OR biotechnology";
const CLINICAL_TRIALS_PAGE_SIZE: u32 = 1000;

/// Lead sponsors and collaborators of industry-related studies.
#[derive(Debug, Clone)]
pub struct ClinicalTrialsSource {
    http: HttpClient,
    base_url: String,
}

#[derive(Debug, Default, Deserialize)]
struct StudiesResponse {
    #[serde(default)]
    studies: Vec<Study>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Study {
    #[serde(default)]
    protocol_section: ProtocolSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProtocolSection {
    #[serde(default)]
    sponsor_collaborators_module: SponsorCollaborators,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SponsorCollaborators {
    lead_sponsor: Option<Organization>,
    #[serde(default)]
    collaborators: Vec<Organization>,
}

#[derive(Debug, Default, Deserialize)]
struct Organization {
    #[serde(default)]
    name: String,
}

impl ClinicalTrialsSource {
    /// Create a source against the given API base URL.
    #[must_use]
    pub fn new(http: HttpClient, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl CompanySource for ClinicalTrialsSource {
    fn id(&self) -> SourceId {
        SourceId::ClinicalTrials
    }

    async fn fetch_names(&self) -> ClientResult<Vec<String>> {
        let url = format!("{}/studies", self.base_url);
        let params = [
            ("query.term".to_string(), CLINICAL_TRIALS_TERM.to_string()),
            ("fields".to_string(), "LeadSponsorName,CollaboratorName".to_string()),
            ("pageSize".to_string(), CLINICAL_TRIALS_PAGE_SIZE.to_string()),
            ("format".to_string(), "json".to_string()),
        ];

        let response: StudiesResponse = self.http.get_json(&url, &params).await?;

        let names: Vec<String> = response
            .studies
            .into_iter()
            .flat_map(|study| {
                let module = study.protocol_section.sponsor_collaborators_module;
                module.lead_sponsor.into_iter().chain(module.collaborators)
            })
            .map(|org| org.name)
            .filter(|name| !name.is_empty())
            .collect();

        tracing::debug!(source = %self.id(), count = names.len(), "Fetched sponsor names");
        Ok(names)
    }
}

// =============================================================================
// openFDA
// =============================================================================

const OPENFDA_LIMIT: u32 = 1000;

/// Manufacturer names from openFDA drug labels.
#[derive(Debug, Clone)]
pub struct OpenFdaSource {
    http: HttpClient,
    base_url: String,
}

#[derive(Debug, Default, Deserialize)]
struct CountResponse {
    #[serde(default)]
    results: Vec<CountTerm>,
}

#[derive(Debug, Default, Deserialize)]
struct CountTerm {
    #[serde(default)]
    term: String,
}

impl OpenFdaSource {
    /// Create a source against the given API base URL.
    #[must_use]
    pub fn new(http: HttpClient, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl CompanySource for OpenFdaSource {
    fn id(&self) -> SourceId {
        SourceId::OpenFda
    }

    async fn fetch_names(&self) -> ClientResult<Vec<String>> {
        let url = format!("{}/drug/label.json", self.base_url);
        let params = [
            ("search".to_string(), "openfda.manufacturer_name:*".to_string()),
            ("count".to_string(), "openfda.manufacturer_name.exact".to_string()),
            ("limit".to_string(), OPENFDA_LIMIT.to_string()),
        ];

        let response: CountResponse = self.http.get_json(&url, &params).await?;

        let names: Vec<String> = response
            .results
            .into_iter()
            .map(|result| result.term)
            .filter(|term| !term.is_empty())
            .collect();

        tracing::debug!(source = %self.id(), count = names.len(), "Fetched manufacturer names");
        Ok(names)
    }
}

// =============================================================================
// Wikidata
// =============================================================================

/// English labels of pharmaceutical companies (Q169336) and subclasses.
const WIKIDATA_QUERY: &str = r#"SELECT DISTINCT ?companyLabel WHERE {
  ?company wdt:P31/wdt:P279* wd:Q169336 .
  ?company rdfs:label ?companyLabel .
  FILTER(LANG(?companyLabel) = "en")
}
LIMIT 1000"#;

const SPARQL_RESULTS_JSON: &str = "application/sparql-results+json";

/// Pharmaceutical companies from the Wikidata knowledge graph.
#[derive(Debug, Clone)]
pub struct WikidataSource {
    http: HttpClient,
    endpoint: String,
}

#[derive(Debug, Default, Deserialize)]
struct SparqlResponse {
    #[serde(default)]
    results: SparqlResults,
}

#[derive(Debug, Default, Deserialize)]
struct SparqlResults {
    #[serde(default)]
    bindings: Vec<SparqlBinding>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SparqlBinding {
    company_label: Option<SparqlValue>,
}

#[derive(Debug, Default, Deserialize)]
struct SparqlValue {
    #[serde(default)]
    value: String,
}

impl WikidataSource {
    /// Create a source against the given SPARQL endpoint.
    #[must_use]
    pub fn new(http: HttpClient, endpoint: impl Into<String>) -> Self {
        Self {
            http,
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl CompanySource for WikidataSource {
    fn id(&self) -> SourceId {
        SourceId::Wikidata
    }

    async fn fetch_names(&self) -> ClientResult<Vec<String>> {
        let params = [
            ("query".to_string(), WIKIDATA_QUERY.to_string()),
            ("format".to_string(), "json".to_string()),
        ];

        let response: SparqlResponse =
            self.http.get_json_accepting(&self.endpoint, &params, SPARQL_RESULTS_JSON).await?;

        let names: Vec<String> = response
            .results
            .bindings
            .into_iter()
            .filter_map(|binding| binding.company_label)
            .map(|label| label.value)
            .filter(|value| !value.is_empty())
            .collect();

        tracing::debug!(source = %self.id(), count = names.len(), "Fetched company labels");
        Ok(names)
    }
}
