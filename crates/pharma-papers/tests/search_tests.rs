//! End-to-end tests for the search pipeline against a mocked E-utilities API.

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use pharma_papers::config::Config;
use pharma_papers::error::{ClientError, QueryError, SearchError};
use pharma_papers::formatters::format_papers_csv;
use pharma_papers::{CompanyRegistry, PaperSearch, PubMedClient};

const ESEARCH_PATH: &str = "/eutils/esearch.fcgi";
const EFETCH_PATH: &str = "/eutils/efetch.fcgi";

fn setup_search(mock_server: &MockServer, batch_size: usize) -> PaperSearch {
    let mut config = Config::for_testing(&mock_server.uri());
    config.batch_size = batch_size;
    let client = PubMedClient::new(&config).unwrap();
    PaperSearch::new(client, CompanyRegistry::baseline(), &config)
}

fn esearch_body(ids: &[&str]) -> serde_json::Value {
    json!({
        "header": {"type": "esearch", "version": "0.3"},
        "esearchresult": {
            "count": ids.len().to_string(),
            "retmax": ids.len().to_string(),
            "idlist": ids
        }
    })
}

fn article(pmid: &str, title: &str, authors: &[(&str, &str, &str)]) -> String {
    let authors: String = authors
        .iter()
        .map(|(fore, last, affiliation)| {
            format!(
                "<Author ValidYN=\"Y\"><LastName>{last}</LastName><ForeName>{fore}</ForeName>\
                 <AffiliationInfo><Affiliation>{affiliation}</Affiliation></AffiliationInfo></Author>"
            )
        })
        .collect();

    format!(
        "<PubmedArticle><MedlineCitation Status=\"MEDLINE\" Owner=\"NLM\">\
         <PMID Version=\"1\">{pmid}</PMID><Article>\
         <Journal><JournalIssue><PubDate><Year>2023</Year><Month>Nov</Month></PubDate></JournalIssue></Journal>\
         <ArticleTitle>{title}</ArticleTitle><AuthorList>{authors}</AuthorList>\
         </Article></MedlineCitation></PubmedArticle>"
    )
}

fn article_set(articles: &[String]) -> String {
    format!("<?xml version=\"1.0\"?><PubmedArticleSet>{}</PubmedArticleSet>", articles.concat())
}

async fn mount_esearch(mock_server: &MockServer, ids: &[&str]) {
    Mock::given(method("GET"))
        .and(path(ESEARCH_PATH))
        .and(query_param("db", "pubmed"))
        .and(query_param("retmode", "json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(esearch_body(ids)))
        .expect(1)
        .mount(mock_server)
        .await;
}

// =============================================================================
// Qualification
// =============================================================================

#[tokio::test]
async fn test_only_company_affiliated_papers_are_returned() {
    let mock_server = MockServer::start().await;
    mount_esearch(&mock_server, &["101", "102", "103"]).await;

    let xml = article_set(&[
        article(
            "101",
            "Gene editing in primates",
            &[
                ("Ann", "Lee", "Department of Genetics, Harvard Medical School, Boston, MA"),
                ("Bo", "Chen", "Editas Medicine, Cambridge, MA, USA. bo.chen@editasmed.com"),
            ],
        ),
        article("102", "Academic only", &[("Cy", "Diaz", "Stanford University, Stanford, CA")]),
        article(
            "103",
            "A GSK study",
            &[
                ("Di", "Evans", "Employee of GlaxoSmithKline Inc., Brentford, UK"),
                ("Ed", "Fox", "GlaxoSmithKline Inc., Brentford, UK"),
            ],
        ),
    ]);

    Mock::given(method("GET"))
        .and(path(EFETCH_PATH))
        .and(query_param("id", "101,102,103"))
        .and(query_param("retmode", "xml"))
        .respond_with(ResponseTemplate::new(200).set_body_string(xml))
        .expect(1)
        .mount(&mock_server)
        .await;

    let search = setup_search(&mock_server, 10);
    let papers = search.run("gene editing", 3).await.unwrap();

    assert_eq!(papers.len(), 2);

    assert_eq!(papers[0].pmid, "101");
    assert_eq!(papers[0].publication_date, "2023-Nov");
    assert_eq!(papers[0].non_academic_authors, ["Bo Chen"]);
    assert_eq!(papers[0].company_affiliations, ["Editas Medicine, Cambridge, MA"]);
    assert_eq!(papers[0].corresponding_author_email.as_deref(), Some("bo.chen@editasmed.com"));

    assert_eq!(papers[1].pmid, "103");
    assert_eq!(papers[1].non_academic_authors, ["Di Evans", "Ed Fox"]);
    assert_eq!(
        papers[1].company_affiliations,
        ["of GlaxoSmithKline Inc., Brentford", "GlaxoSmithKline Inc., Brentford, UK"]
    );
    assert!(papers[1].corresponding_author_email.is_none());
}

#[tokio::test]
async fn test_no_ids_skips_fetch() {
    let mock_server = MockServer::start().await;
    mount_esearch(&mock_server, &[]).await;

    Mock::given(method("GET"))
        .and(path(EFETCH_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string(article_set(&[])))
        .expect(0)
        .mount(&mock_server)
        .await;

    let search = setup_search(&mock_server, 10);
    let papers = search.run("nothing matches this", 10).await.unwrap();
    assert!(papers.is_empty());
}

#[tokio::test]
async fn test_empty_query_is_rejected() {
    let mock_server = MockServer::start().await;
    let search = setup_search(&mock_server, 10);

    let err = search.run("   ", 10).await.unwrap_err();
    assert!(matches!(err, SearchError::Query(QueryError::Empty)));
}

// =============================================================================
// Batching
// =============================================================================

#[tokio::test]
async fn test_failed_batch_is_skipped() {
    let mock_server = MockServer::start().await;
    mount_esearch(&mock_server, &["201", "202", "203"]).await;

    let first_batch = article_set(&[
        article("201", "First", &[("Ann", "Lee", "Moderna Inc, Cambridge, MA")]),
        article("202", "Second", &[("Bo", "Chen", "Yale University")]),
    ]);

    Mock::given(method("GET"))
        .and(path(EFETCH_PATH))
        .and(query_param("id", "201,202"))
        .respond_with(ResponseTemplate::new(200).set_body_string(first_batch))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path(EFETCH_PATH))
        .and(query_param("id", "203"))
        .respond_with(ResponseTemplate::new(503).set_body_string("Service Unavailable"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let search = setup_search(&mock_server, 2);
    let papers = search.run("mrna vaccine", 3).await.unwrap();

    assert_eq!(papers.len(), 1);
    assert_eq!(papers[0].pmid, "201");
    assert_eq!(papers[0].company_affiliations, ["Moderna Inc, Cambridge, MA"]);
}

#[tokio::test]
async fn test_search_failure_is_an_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(ESEARCH_PATH))
        .respond_with(ResponseTemplate::new(400).set_body_string("Invalid term"))
        .mount(&mock_server)
        .await;

    let search = setup_search(&mock_server, 10);
    let err = search.run("bad[[query", 10).await.unwrap_err();

    assert!(matches!(err, SearchError::Client(ClientError::BadRequest { .. })), "{err:?}");
}

#[tokio::test]
async fn test_results_render_as_csv() {
    let mock_server = MockServer::start().await;
    mount_esearch(&mock_server, &["301"]).await;

    Mock::given(method("GET"))
        .and(path(EFETCH_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string(article_set(&[article(
            "301",
            "Biosimilar \"switching\" outcomes",
            &[("Ann", "Lee", "Amgen Inc., Thousand Oaks, CA")],
        )])))
        .mount(&mock_server)
        .await;

    let search = setup_search(&mock_server, 10);
    let papers = search.run("biosimilar", 1).await.unwrap();
    let csv = format_papers_csv(&papers);

    let mut lines = csv.lines();
    assert!(lines.next().unwrap().starts_with("\"PubmedID\",\"Title\""));
    assert_eq!(
        lines.next().unwrap(),
        "\"301\",\"Biosimilar \"\"switching\"\" outcomes\",\"2023-Nov\",\"Ann Lee\",\
         \"Amgen Inc., Thousand Oaks\",\"\""
    );
    assert!(lines.next().is_none());
}
