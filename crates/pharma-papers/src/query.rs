//! PubMed query syntax analysis.
//!
//! A surface scan only: it reports operators, field tags, phrases and other
//! components, and flags obvious mistakes before a search is sent.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::error::QueryError;

static BOOLEAN_OPERATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(AND|OR|NOT)\b").expect("valid regex"));

static FIELD_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]+)\]").expect("valid regex"));

static PHRASE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#""([^"]+)""#).expect("valid regex"));

static WILDCARD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\w+\*").expect("valid regex"));

static DATE_FILTERS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)\d{4}/\d{2}/\d{2}:\d{4}/\d{2}/\d{2}\[dp\]",
        r"(?i)\d{4}/\d{2}/\d{2}\[dp\]",
        r"(?i)\d{4}:\d{4}\[dp\]",
        r"(?i)last \d+ (days?|months?|years?)\[dp\]",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("date filter pattern is valid"))
    .collect()
});

static MESH_TERM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)([^"\[\]]+)\[mh\]"#).expect("valid regex"));

/// Field tags accepted by PubMed (lowercase).
const KNOWN_FIELD_TAGS: &[&str] = &[
    "ti", "title", "tiab", "au", "author", "ta", "journal", "ad", "affiliation", "mh", "mesh",
    "dp", "pdat", "edat", "epdat", "ppdat", "pt", "ptyp", "la", "lang", "si", "uid", "pmid", "doi",
    "isbn", "issn", "vol", "ip", "pg", "vi", "is", "aid", "lid", "crdt", "dcom", "lr", "mhda", "pl",
    "sb", "so", "stat", "da", "own", "nlm", "pmc", "pmcr", "pubm",
];

/// Components found in a query, by category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct QueryComponents {
    /// `AND`, `OR`, `NOT` as written.
    pub boolean_operators: Vec<String>,
    /// Contents of every `[...]` tag.
    pub field_tags: Vec<String>,
    /// Contents of every `"..."` phrase.
    pub phrases: Vec<String>,
    /// Words ending in `*`.
    pub wildcards: Vec<String>,
    /// `[dp]` date expressions.
    pub date_filters: Vec<String>,
    /// Terms tagged `[mh]`.
    pub mesh_terms: Vec<String>,
}

/// Result of [`analyze_query`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryAnalysis {
    /// The analyzed query.
    pub query: String,
    /// False when the query has a structural error.
    pub valid: bool,
    /// Human-readable issues, including non-fatal ones.
    pub warnings: Vec<String>,
    /// Components found.
    pub components: QueryComponents,
}

/// Analyze PubMed query syntax.
///
/// Unknown field tags and unbalanced quotes produce warnings; unbalanced
/// parentheses also mark the query invalid.
pub fn analyze_query(query: &str) -> Result<QueryAnalysis, QueryError> {
    if query.trim().is_empty() {
        return Err(QueryError::Empty);
    }

    let components = QueryComponents {
        boolean_operators: all_groups(&BOOLEAN_OPERATOR, query),
        field_tags: all_groups(&FIELD_TAG, query),
        phrases: all_groups(&PHRASE, query),
        wildcards: WILDCARD.find_iter(query).map(|m| m.as_str().to_string()).collect(),
        date_filters: DATE_FILTERS
            .iter()
            .flat_map(|pattern| pattern.find_iter(query).map(|m| m.as_str().to_string()))
            .collect(),
        mesh_terms: all_groups(&MESH_TERM, query)
            .into_iter()
            .map(|term| term.trim().to_string())
            .filter(|term| !term.is_empty())
            .collect(),
    };

    let mut valid = true;
    let mut warnings: Vec<String> = components
        .field_tags
        .iter()
        .filter(|tag| !KNOWN_FIELD_TAGS.contains(&tag.to_lowercase().as_str()))
        .map(|tag| format!("Unknown field tag: [{tag}]"))
        .collect();

    if query.matches('(').count() != query.matches(')').count() {
        valid = false;
        warnings.push("Unbalanced parentheses in query".to_string());
    }

    if query.matches('"').count() % 2 != 0 {
        warnings.push("Unbalanced quotes in query".to_string());
    }

    Ok(QueryAnalysis {
        query: query.to_string(),
        valid,
        warnings,
        components,
    })
}

fn all_groups(pattern: &Regex, text: &str) -> Vec<String> {
    pattern
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Query syntax reference printed by `--query-help`.
pub const QUERY_HELP: &str = r#"PUBMED QUERY SYNTAX

Boolean operators (uppercase recommended)
  AND  both terms            cancer AND chemotherapy
  OR   either term           (aspirin OR ibuprofen) AND headache
  NOT  exclude a term        diabetes NOT "type 1"

Field tags
  [ti] [tiab]    title, title/abstract   "gene therapy"[ti]
  [au]           author                  smith ja[au]
  [ta]           journal                 nature[ta]
  [ad]           affiliation             pfizer[ad]
  [mh]           MeSH heading            "Neoplasms"[mh]
  [mh:noexp]     MeSH, no subheadings
  [pt]           publication type        "Clinical Trial"[pt]
  [la]           language                english[la]

Dates
  2023/05/12[dp]               exact date
  2020/01/01:2023/12/31[dp]    date range
  2018:2023[dp]                year range
  last 6 months[dp]            relative range

Phrases and wildcards
  "stem cell therapy"          exact phrase
  therap*                      therapy, therapies, therapeutic, ...

Examples
  ("COVID-19"[mh] OR "SARS-CoV-2"[mh]) AND vaccine[ti] AND (pfizer[ad] OR moderna[ad])
  ("machine learning"[tiab]) AND "drug discovery"[tiab] AND 2020:2025[dp]
  (cancer[mh] OR tumor[tiab]) AND immunotherapy[tiab] AND (pharma*[ad] OR biotech*[ad])

  get-papers-list "cancer drug discovery"
  get-papers-list "CRISPR therapeutics" -f results.csv -d

More: https://pubmed.ncbi.nlm.nih.gov/help/
"#;
