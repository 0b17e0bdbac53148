//! Paper-level aggregation of per-author matches.

use std::sync::LazyLock;

use regex::Regex;

use super::match_affiliation;
use crate::models::{AuthorRecord, PaperRecord, QualifiedPaper};
use crate::registry::CompanyRegistry;

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").expect("valid regex")
});

/// Company-affiliated authors and companies found in one author list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AffiliationSummary {
    /// Matched author names, deduplicated in first-seen order.
    pub non_academic_authors: Vec<String>,
    /// Extracted company names, deduplicated in first-seen order.
    pub company_affiliations: Vec<String>,
}

impl AffiliationSummary {
    /// A paper qualifies when at least one author matched.
    #[must_use]
    pub fn qualifies(&self) -> bool {
        !self.non_academic_authors.is_empty()
    }
}

/// Resolve every author's affiliation and collect the matches.
#[must_use]
pub fn summarize_authors(
    authors: &[AuthorRecord],
    registry: &CompanyRegistry,
) -> AffiliationSummary {
    let mut summary = AffiliationSummary::default();

    for author in authors.iter().filter(|author| author.has_affiliation()) {
        let Some(found) = match_affiliation(&author.affiliation, registry) else {
            continue;
        };

        let name = author.name.trim();
        if !name.is_empty() && !summary.non_academic_authors.iter().any(|n| n == name) {
            summary.non_academic_authors.push(name.to_string());
        }

        let company = found.extracted_company_name.trim();
        if !company.is_empty() && !summary.company_affiliations.iter().any(|c| c == company) {
            summary.company_affiliations.push(company.to_string());
        }
    }

    summary
}

/// Return the paper with its company-affiliated authors, or `None` if no
/// author matched.
#[must_use]
pub fn qualify_paper(record: &PaperRecord, registry: &CompanyRegistry) -> Option<QualifiedPaper> {
    let summary = summarize_authors(&record.authors, registry);
    if !summary.qualifies() {
        return None;
    }

    Some(QualifiedPaper {
        pmid: record.pmid.clone(),
        title: record.title.clone(),
        publication_date: record.publication_date.clone(),
        non_academic_authors: summary.non_academic_authors,
        company_affiliations: summary.company_affiliations,
        corresponding_author_email: extract_corresponding_email(&record.authors),
    })
}

/// First email address found in any author's affiliation, in author order.
#[must_use]
pub fn extract_corresponding_email(authors: &[AuthorRecord]) -> Option<String> {
    authors
        .iter()
        .find_map(|author| EMAIL.find(&author.affiliation))
        .map(|m| m.as_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> CompanyRegistry {
        CompanyRegistry::new(["pfizer", "moderna"], None, vec![])
    }

    #[test]
    fn test_deduplicates_in_first_seen_order() {
        let authors = vec![
            AuthorRecord::new("Ann Lee", "Moderna Inc, Cambridge"),
            AuthorRecord::new("Bo Chen", "Pfizer Inc, New York"),
            AuthorRecord::new("Ann Lee", "Pfizer Inc, New York"),
            AuthorRecord::new("Cy Diaz", "Moderna Inc, Cambridge"),
        ];
        let summary = summarize_authors(&authors, &registry());
        assert_eq!(summary.non_academic_authors, ["Ann Lee", "Bo Chen", "Cy Diaz"]);
        assert_eq!(
            summary.company_affiliations,
            ["Moderna Inc, Cambridge", "Pfizer Inc, New York"]
        );
        assert!(summary.qualifies());
    }

    #[test]
    fn test_authors_without_affiliation_are_skipped() {
        let authors = vec![AuthorRecord::new("Ann Lee", ""), AuthorRecord::new("Bo Chen", "  ")];
        assert!(!summarize_authors(&authors, &registry()).qualifies());
    }

    #[test]
    fn test_email_first_in_author_order() {
        let authors = vec![
            AuthorRecord::new("Ann Lee", "Harvard Medical School"),
            AuthorRecord::new("Bo Chen", "Pfizer Inc. Electronic address: bo.chen@pfizer.com."),
            AuthorRecord::new("Cy Diaz", "cy@moderna.com"),
        ];
        assert_eq!(extract_corresponding_email(&authors).as_deref(), Some("bo.chen@pfizer.com"));
    }

    #[test]
    fn test_no_email() {
        let authors = vec![AuthorRecord::new("Ann Lee", "Pfizer Inc, New York")];
        assert!(extract_corresponding_email(&authors).is_none());
    }

    #[test]
    fn test_qualify_paper_copies_metadata() {
        let record = PaperRecord {
            pmid: "123".to_string(),
            title: "Title".to_string(),
            publication_date: "2024-Mar".to_string(),
            authors: vec![
                AuthorRecord::new("Ann Lee", "Dept of Medicine, Yale University"),
                AuthorRecord::new("Bo Chen", "Pfizer Inc, New York, NY. bo@pfizer.com"),
            ],
        };
        let paper = qualify_paper(&record, &registry()).unwrap();
        assert_eq!(paper.pmid, "123");
        assert_eq!(paper.publication_date, "2024-Mar");
        assert_eq!(paper.non_academic_authors, ["Bo Chen"]);
        assert_eq!(paper.corresponding_author_email.as_deref(), Some("bo@pfizer.com"));
    }
}
