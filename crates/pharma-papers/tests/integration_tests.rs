//! Integration tests against the live NCBI and company data APIs.
//!
//! Run with: `cargo test --features integration -- --nocapture`

#![cfg(feature = "integration")]

use pharma_papers::registry::{
    ClinicalTrialsSource, CompanySource, OpenFdaSource, WikidataSource,
};
use pharma_papers::{CompanyRegistry, Config, HttpClient, PaperSearch, PubMedClient};

fn create_config() -> Config {
    let dir = std::env::temp_dir().join("pharma-papers-integration");
    std::fs::create_dir_all(&dir).expect("create temp dir");
    Config::from_env()
        .expect("config from env")
        .with_cache_file(dir.join("companies.json"))
}

// =============================================================================
// PubMed
// =============================================================================

#[tokio::test]
async fn test_pubmed_search_returns_ids() {
    let config = create_config();
    let client = PubMedClient::new(&config).expect("client");

    let ids = client.search("pembrolizumab[ti]", 5).await.expect("search");
    assert!(!ids.is_empty());
    assert!(ids.len() <= 5);
    assert!(ids.iter().all(|id| id.chars().all(|c| c.is_ascii_digit())));
}

#[tokio::test]
async fn test_pubmed_fetch_known_record() {
    let config = create_config();
    let client = PubMedClient::new(&config).expect("client");

    // Pembrolizumab KEYNOTE-006 (NEJM 2015), Merck-affiliated authors
    let records = client.fetch_records(&["25891173".to_string()]).await.expect("fetch");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].pmid, "25891173");
    assert!(!records[0].authors.is_empty());
}

#[tokio::test]
async fn test_end_to_end_search() {
    let config = create_config();
    let search = PaperSearch::new(
        PubMedClient::new(&config).expect("client"),
        CompanyRegistry::baseline(),
        &config,
    );

    let papers = search.run("pfizer[ad] AND vaccine", 10).await.expect("search");
    assert!(!papers.is_empty());
    for paper in &papers {
        assert!(!paper.non_academic_authors.is_empty());
        assert!(!paper.company_affiliations.is_empty());
    }
}

// =============================================================================
// Company sources
// =============================================================================

async fn assert_source_returns_names(source: &dyn CompanySource) {
    let names = source.fetch_names().await.expect("fetch names");
    println!("{}: {} names", source.id(), names.len());
    assert!(!names.is_empty());
}

#[tokio::test]
async fn test_clinical_trials_source() {
    let config = create_config();
    let http = HttpClient::new(&config).expect("http");
    assert_source_returns_names(&ClinicalTrialsSource::new(
        http,
        &config.clinical_trials_url,
    ))
    .await;
}

#[tokio::test]
async fn test_openfda_source() {
    let config = create_config();
    let http = HttpClient::new(&config).expect("http");
    assert_source_returns_names(&OpenFdaSource::new(http, &config.openfda_url)).await;
}

#[tokio::test]
async fn test_wikidata_source() {
    let config = create_config();
    let http = HttpClient::new(&config).expect("http");
    assert_source_returns_names(&WikidataSource::new(http, &config.wikidata_url)).await;
}
