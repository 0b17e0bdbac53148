//! PubMed E-utilities client (esearch + efetch).

use serde::Deserialize;

use super::HttpClient;
use super::xml::parse_efetch_xml;
use crate::config::{Config, api};
use crate::error::ClientResult;
use crate::models::PaperRecord;

/// Client for the NCBI E-utilities PubMed endpoints.
#[derive(Clone)]
pub struct PubMedClient {
    http: HttpClient,
    eutils_url: String,
    email: String,
    api_key: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ESearchResponse {
    #[serde(default)]
    esearchresult: ESearchResult,
}

#[derive(Debug, Default, Deserialize)]
struct ESearchResult {
    #[serde(default)]
    idlist: Vec<String>,
}

impl PubMedClient {
    /// Create a new client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns error if HTTP client initialization fails.
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        Ok(Self::with_http(HttpClient::new(config)?, config))
    }

    /// Create a client on top of an existing HTTP client.
    #[must_use]
    pub fn with_http(http: HttpClient, config: &Config) -> Self {
        Self {
            http,
            eutils_url: config.eutils_url.clone(),
            email: config.email.clone(),
            api_key: config.api_key.clone(),
        }
    }

    /// Check if an NCBI API key is configured.
    #[must_use]
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Search PubMed and return matching PMIDs in relevance order.
    ///
    /// # Errors
    ///
    /// Returns error on API failure.
    pub async fn search(&self, query: &str, max_results: usize) -> ClientResult<Vec<String>> {
        let url = format!("{}/esearch.fcgi", self.eutils_url);

        let mut params = self.common_params();
        params.extend([
            ("term".to_string(), query.to_string()),
            ("retmax".to_string(), max_results.to_string()),
            ("sort".to_string(), "relevance".to_string()),
            ("retmode".to_string(), "json".to_string()),
        ]);

        let response: ESearchResponse = self.http.get_json(&url, &params).await?;
        tracing::debug!(
            count = response.esearchresult.idlist.len(),
            "PubMed search returned ids"
        );
        Ok(response.esearchresult.idlist)
    }

    /// Fetch and parse full records for a batch of PMIDs.
    ///
    /// # Errors
    ///
    /// Returns error on API failure or malformed XML.
    pub async fn fetch_records(&self, pmids: &[String]) -> ClientResult<Vec<PaperRecord>> {
        if pmids.is_empty() {
            return Ok(Vec::new());
        }

        let url = format!("{}/efetch.fcgi", self.eutils_url);

        let mut params = self.common_params();
        params.extend([
            ("id".to_string(), pmids.join(",")),
            ("rettype".to_string(), "medline".to_string()),
            ("retmode".to_string(), "xml".to_string()),
        ]);

        let body = self.http.get_text(&url, &params).await?;
        parse_efetch_xml(&body)
    }

    fn common_params(&self) -> Vec<(String, String)> {
        let mut params = vec![
            ("db".to_string(), "pubmed".to_string()),
            ("tool".to_string(), api::TOOL_NAME.to_string()),
            ("email".to_string(), self.email.clone()),
        ];

        if let Some(key) = &self.api_key {
            params.push(("api_key".to_string(), key.clone()));
        }

        params
    }
}

impl std::fmt::Debug for PubMedClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PubMedClient")
            .field("eutils_url", &self.eutils_url)
            .field("has_api_key", &self.has_api_key())
            .finish()
    }
}
