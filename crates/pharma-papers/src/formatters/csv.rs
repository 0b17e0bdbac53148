//! CSV output for qualified papers.

use std::io::{self, Write};

use crate::models::QualifiedPaper;

/// Column headers in output order.
pub const CSV_HEADERS: [&str; 6] = [
    "PubmedID",
    "Title",
    "Publication Date",
    "Non-academic Author(s)",
    "Company Affiliation(s)",
    "Corresponding Author Email",
];

/// Write papers as CSV with every field quoted.
pub fn write_papers_csv<W: Write>(out: &mut W, papers: &[QualifiedPaper]) -> io::Result<()> {
    write_row(out, CSV_HEADERS)?;

    for paper in papers {
        let title = paper.title.split_whitespace().collect::<Vec<_>>().join(" ");
        let authors = paper.authors_joined();
        let companies = paper.companies_joined();
        write_row(
            out,
            [
                paper.pmid.as_str(),
                title.as_str(),
                paper.publication_date.as_str(),
                authors.trim(),
                companies.trim(),
                paper.email_or_empty().trim(),
            ],
        )?;
    }

    out.flush()
}

/// Render papers as a CSV string.
#[must_use]
pub fn format_papers_csv(papers: &[QualifiedPaper]) -> String {
    let mut buf = Vec::new();
    // Writing into a Vec cannot fail.
    let _ = write_papers_csv(&mut buf, papers);
    String::from_utf8_lossy(&buf).into_owned()
}

fn write_row<W: Write, const N: usize>(out: &mut W, fields: [&str; N]) -> io::Result<()> {
    let line = fields.iter().map(|field| quote(field)).collect::<Vec<_>>().join(",");
    out.write_all(line.as_bytes())?;
    out.write_all(b"\r\n")
}

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paper() -> QualifiedPaper {
        QualifiedPaper {
            pmid: "38000001".to_string(),
            title: "A \"novel\"\n  kinase inhibitor".to_string(),
            publication_date: "2024-Jan".to_string(),
            non_academic_authors: vec!["Ann Lee".to_string(), "Bo Chen".to_string()],
            company_affiliations: vec!["Pfizer Inc, New York".to_string()],
            corresponding_author_email: Some("ann@pfizer.com".to_string()),
        }
    }

    #[test]
    fn test_header_only_for_empty_input() {
        let csv = format_papers_csv(&[]);
        assert_eq!(
            csv,
            "\"PubmedID\",\"Title\",\"Publication Date\",\"Non-academic Author(s)\",\
             \"Company Affiliation(s)\",\"Corresponding Author Email\"\r\n"
        );
    }

    #[test]
    fn test_row_is_quoted_and_escaped() {
        let csv = format_papers_csv(&[paper()]);
        let row = csv.lines().nth(1).unwrap();
        assert_eq!(
            row,
            "\"38000001\",\"A \"\"novel\"\" kinase inhibitor\",\"2024-Jan\",\
             \"Ann Lee; Bo Chen\",\"Pfizer Inc, New York\",\"ann@pfizer.com\""
        );
    }

    #[test]
    fn test_missing_email_is_empty_field() {
        let mut paper = paper();
        paper.corresponding_author_email = None;
        let csv = format_papers_csv(&[paper]);
        assert!(csv.lines().nth(1).unwrap().ends_with(",\"\""));
    }
}
