//! Search pipeline: PubMed query, batched record fetch, qualification.

use std::time::Duration;

use crate::client::PubMedClient;
use crate::config::Config;
use crate::error::{QueryError, SearchResult};
use crate::models::QualifiedPaper;
use crate::registry::CompanyRegistry;
use crate::resolver::qualify_paper;

/// Finds papers with at least one company-affiliated author.
#[derive(Debug)]
pub struct PaperSearch {
    client: PubMedClient,
    registry: CompanyRegistry,
    batch_size: usize,
    batch_delay: Duration,
}

impl PaperSearch {
    /// Create a search over `registry` using the batching settings in `config`.
    #[must_use]
    pub fn new(client: PubMedClient, registry: CompanyRegistry, config: &Config) -> Self {
        Self {
            client,
            registry,
            batch_size: config.batch_size.max(1),
            batch_delay: config.batch_delay,
        }
    }

    /// Search PubMed and return the qualifying papers in result order.
    ///
    /// A failed search is an error; a failed record batch is logged and
    /// skipped.
    pub async fn run(&self, query: &str, max_results: usize) -> SearchResult<Vec<QualifiedPaper>> {
        if query.trim().is_empty() {
            return Err(QueryError::Empty.into());
        }

        tracing::info!(query, max_results, "Searching PubMed");
        let pmids = self.client.search(query, max_results).await?;

        if pmids.is_empty() {
            tracing::info!("No papers found");
            return Ok(Vec::new());
        }

        tracing::info!(count = pmids.len(), "Found papers, fetching details");
        let papers = self.process_ids(&pmids).await;

        tracing::info!(
            searched = pmids.len(),
            qualified = papers.len(),
            "Filtered papers with company affiliations"
        );
        Ok(papers)
    }

    /// Fetch records batch by batch and keep the qualifying ones.
    pub async fn process_ids(&self, pmids: &[String]) -> Vec<QualifiedPaper> {
        let mut papers = Vec::new();
        let batches = pmids.chunks(self.batch_size);
        let total = batches.len();

        for (index, batch) in batches.enumerate() {
            if index > 0 && !self.batch_delay.is_zero() {
                tokio::time::sleep(self.batch_delay).await;
            }

            let records = match self.client.fetch_records(batch).await {
                Ok(records) => records,
                Err(e) => {
                    tracing::warn!(batch = index + 1, total, error = %e, "Skipping failed batch");
                    continue;
                }
            };

            tracing::debug!(
                batch = index + 1,
                total,
                records = records.len(),
                "Fetched batch"
            );

            for record in &records {
                match qualify_paper(record, &self.registry) {
                    Some(paper) => {
                        tracing::debug!(
                            pmid = %paper.pmid,
                            companies = ?paper.company_affiliations,
                            "Paper qualifies"
                        );
                        papers.push(paper);
                    }
                    None => tracing::trace!(pmid = %record.pmid, "No company affiliation"),
                }
            }
        }

        papers
    }
}
