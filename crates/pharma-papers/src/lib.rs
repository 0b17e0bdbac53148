//! PubMed Pharma Papers
//!
//! Finds PubMed papers with at least one author affiliated to a
//! pharmaceutical or biotech company.
//!
//! # Overview
//!
//! - **Company registry**: a baseline list merged with names from
//!   ClinicalTrials.gov, openFDA and Wikidata, filtered, expanded with short
//!   forms and cached on disk for 7 days
//! - **Affiliation resolver**: longest-substring match of each author
//!   affiliation against the registry, plus extraction of a readable company
//!   name from the surrounding words
//! - **Search pipeline**: E-utilities search, batched record fetch and
//!   paper-level qualification, with CSV output
//!
//! # Example
//!
//! ```no_run
//! use pharma_papers::{Config, PaperSearch, PubMedClient, RegistryBuilder};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let registry = RegistryBuilder::new(&config)?.load_or_fetch(false, false).await?;
//!     let search = PaperSearch::new(PubMedClient::new(&config)?, registry, &config);
//!
//!     for paper in search.run("CRISPR therapeutics", 50).await? {
//!         println!("{} {}", paper.pmid, paper.companies_joined());
//!     }
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod formatters;
pub mod models;
pub mod query;
pub mod registry;
pub mod resolver;
pub mod search;

pub use client::{HttpClient, PubMedClient};
pub use config::Config;
pub use error::{ClientError, PersistenceError, QueryError, RegistryError, SearchError};
pub use models::{AuthorRecord, PaperRecord, QualifiedPaper};
pub use registry::{CompanyRegistry, RegistryBuilder, RegistryStats, SourceId};
pub use resolver::{AffiliationMatch, match_affiliation, qualify_paper};
pub use search::PaperSearch;
