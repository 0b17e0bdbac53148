//! Paper data model for PubMed articles.

use serde::{Deserialize, Serialize};

/// Placeholder used when no publication date can be recovered.
pub const UNKNOWN_DATE: &str = "Unknown";

/// One author of a paper with their (possibly empty) affiliation text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorRecord {
    /// Display name ("ForeName LastName" or a collective name).
    pub name: String,

    /// All affiliation lines for this author joined with `"; "`.
    #[serde(default)]
    pub affiliation: String,
}

impl AuthorRecord {
    /// Create an author record.
    #[must_use]
    pub fn new(name: impl Into<String>, affiliation: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            affiliation: affiliation.into(),
        }
    }

    /// Check whether this author carries any affiliation text.
    #[must_use]
    pub fn has_affiliation(&self) -> bool {
        !self.affiliation.trim().is_empty()
    }
}

/// A PubMed article as parsed from efetch XML.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaperRecord {
    /// PubMed identifier.
    pub pmid: String,

    /// Article title with whitespace collapsed.
    #[serde(default)]
    pub title: String,

    /// Publication date (`YYYY`, `YYYY-Mon` or `YYYY-MM-DD`), or "Unknown".
    #[serde(default = "unknown_date")]
    pub publication_date: String,

    /// Authors in list order.
    #[serde(default)]
    pub authors: Vec<AuthorRecord>,
}

fn unknown_date() -> String {
    UNKNOWN_DATE.to_string()
}

impl Default for PaperRecord {
    fn default() -> Self {
        Self {
            pmid: String::new(),
            title: String::new(),
            publication_date: unknown_date(),
            authors: Vec::new(),
        }
    }
}

/// A paper with at least one author affiliated to a pharma/biotech company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualifiedPaper {
    /// PubMed identifier.
    pub pmid: String,

    /// Article title.
    pub title: String,

    /// Publication date.
    pub publication_date: String,

    /// Authors whose affiliation matched, first-seen order, deduplicated.
    pub non_academic_authors: Vec<String>,

    /// Extracted company names, first-seen order, deduplicated.
    pub company_affiliations: Vec<String>,

    /// First email found in any author's affiliation.
    #[serde(default)]
    pub corresponding_author_email: Option<String>,
}

impl QualifiedPaper {
    /// Non-academic author names joined for tabular output.
    #[must_use]
    pub fn authors_joined(&self) -> String {
        self.non_academic_authors.join("; ")
    }

    /// Company names joined for tabular output.
    #[must_use]
    pub fn companies_joined(&self) -> String {
        self.company_affiliations.join("; ")
    }

    /// Corresponding email or an empty string.
    #[must_use]
    pub fn email_or_empty(&self) -> &str {
        self.corresponding_author_email.as_deref().unwrap_or("")
    }
}
