//! PubMed efetch XML parser using quick-xml.
//!
//! Only the fields the affiliation pipeline needs are extracted: PMID, title,
//! publication date and the author list with affiliations.

use quick_xml::Reader;
use quick_xml::events::Event;

use crate::error::{ClientError, ClientResult};
use crate::models::paper::UNKNOWN_DATE;
use crate::models::{AuthorRecord, PaperRecord};

type XmlResult<T> = Result<T, quick_xml::Error>;

/// Date parts as they appear in `<PubDate>` or `<ArticleDate>`.
#[derive(Debug, Default)]
struct DateParts {
    year: String,
    month: String,
    day: String,
}

/// Parse every `<PubmedArticle>` in an efetch response.
///
/// Articles that fail to parse or carry no PMID are skipped and logged.
///
/// # Errors
///
/// Returns [`ClientError::Xml`] if the document itself is malformed.
pub fn parse_efetch_xml(xml: &str) -> ClientResult<Vec<PaperRecord>> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut records = Vec::new();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) if e.name().as_ref() == b"PubmedArticle" => {
                match parse_article(&mut reader) {
                    Ok(record) if record.pmid.is_empty() => {
                        tracing::warn!("Skipping PubMed article without PMID");
                    }
                    Ok(record) => records.push(record),
                    Err(e) => tracing::warn!(error = %e, "Failed to parse PubMed article"),
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(ClientError::xml(e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(records)
}

fn parse_article(reader: &mut Reader<&[u8]>) -> XmlResult<PaperRecord> {
    let mut record = PaperRecord::default();
    let mut pub_date = DateParts::default();
    let mut article_date = DateParts::default();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => match e.name().as_ref() {
                // Nested PMIDs (comments/corrections) must not overwrite the citation's own
                b"PMID" if record.pmid.is_empty() => {
                    record.pmid = read_text(reader)?.trim().to_string();
                }
                b"ArticleTitle" => {
                    record.title =
                        collapse_whitespace(&read_text_content(reader, b"ArticleTitle")?);
                }
                b"PubDate" => pub_date = read_date_parts(reader, b"PubDate")?,
                b"ArticleDate" => article_date = read_date_parts(reader, b"ArticleDate")?,
                b"AuthorList" => record.authors = parse_author_list(reader)?,
                b"PubmedData" => skip_element(reader, b"PubmedData")?,
                _ => {}
            },
            Event::End(e) if e.name().as_ref() == b"PubmedArticle" => break,
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    record.publication_date = format_publication_date(&pub_date, &article_date);
    Ok(record)
}

/// Journal issue date first (month kept verbatim), then the electronic
/// article date with zero-padded month and day.
fn format_publication_date(pub_date: &DateParts, article_date: &DateParts) -> String {
    if !pub_date.year.is_empty() {
        let mut date = pub_date.year.clone();
        if !pub_date.month.is_empty() {
            date.push_str(&format!("-{}", pub_date.month));
            if !pub_date.day.is_empty() {
                date.push_str(&format!("-{}", pub_date.day));
            }
        }
        return date;
    }

    if !article_date.year.is_empty() {
        let mut date = article_date.year.clone();
        if !article_date.month.is_empty() {
            date.push_str(&format!("-{:0>2}", article_date.month));
            if !article_date.day.is_empty() {
                date.push_str(&format!("-{:0>2}", article_date.day));
            }
        }
        return date;
    }

    UNKNOWN_DATE.to_string()
}

fn read_date_parts(reader: &mut Reader<&[u8]>, end_tag: &[u8]) -> XmlResult<DateParts> {
    let mut parts = DateParts::default();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => match e.name().as_ref() {
                b"Year" => parts.year = read_text(reader)?.trim().to_string(),
                b"Month" => parts.month = read_text(reader)?.trim().to_string(),
                b"Day" => parts.day = read_text(reader)?.trim().to_string(),
                _ => {}
            },
            Event::End(e) if e.name().as_ref() == end_tag => break,
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(parts)
}

fn parse_author_list(reader: &mut Reader<&[u8]>) -> XmlResult<Vec<AuthorRecord>> {
    let mut authors = Vec::new();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) if e.name().as_ref() == b"Author" => {
                if let Some(author) = parse_author(reader)? {
                    authors.push(author);
                }
            }
            Event::End(e) if e.name().as_ref() == b"AuthorList" => break,
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(authors)
}

/// Returns `None` for authors without any usable name.
fn parse_author(reader: &mut Reader<&[u8]>) -> XmlResult<Option<AuthorRecord>> {
    let mut last_name = None;
    let mut fore_name = None;
    let mut collective_name = None;
    let mut affiliations = Vec::new();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => match e.name().as_ref() {
                b"LastName" => last_name = non_empty(read_text(reader)?),
                b"ForeName" => fore_name = non_empty(read_text(reader)?),
                b"CollectiveName" => {
                    collective_name = non_empty(read_text_content(reader, b"CollectiveName")?);
                }
                b"Affiliation" => {
                    let text = collapse_whitespace(&read_text_content(reader, b"Affiliation")?);
                    if !text.is_empty() {
                        affiliations.push(text);
                    }
                }
                _ => {}
            },
            Event::End(e) if e.name().as_ref() == b"Author" => break,
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    let name = match (fore_name, last_name) {
        (Some(fore), Some(last)) => format!("{fore} {last}"),
        (None, Some(last)) => last,
        _ => match collective_name {
            Some(collective) => collective,
            None => return Ok(None),
        },
    };

    Ok(Some(AuthorRecord::new(name, affiliations.join("; "))))
}

fn non_empty(text: String) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() { None } else { Some(trimmed.to_string()) }
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn skip_element(reader: &mut Reader<&[u8]>, end_tag: &[u8]) -> XmlResult<()> {
    let mut buf = Vec::new();
    let mut depth = 1;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(_) => depth += 1,
            Event::End(e) => {
                depth -= 1;
                if depth == 0 && e.name().as_ref() == end_tag {
                    break;
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(())
}

/// Read text content until the next end tag.
fn read_text(reader: &mut Reader<&[u8]>) -> XmlResult<String> {
    let mut buf = Vec::new();
    let mut text = String::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Text(e) => text.push_str(&e.unescape()?),
            Event::End(_) => break,
            Event::Start(_) => text.push_str(&read_text(reader)?),
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(text)
}

/// Read text content of a specific element, flattening nested markup (`<i>`, `<sup>`).
fn read_text_content(reader: &mut Reader<&[u8]>, end_tag: &[u8]) -> XmlResult<String> {
    let mut buf = Vec::new();
    let mut text = String::new();
    let mut depth = 1;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Text(e) => {
                if !text.is_empty() {
                    text.push(' ');
                }
                text.push_str(&e.unescape()?);
            }
            Event::Start(_) => depth += 1,
            Event::End(e) => {
                depth -= 1;
                if depth == 0 && e.name().as_ref() == end_tag {
                    break;
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(text)
}
