//! Context-window extraction of a readable company name.

use std::sync::LazyLock;

use regex::Regex;

/// Words kept before the matched word.
const WINDOW_BEFORE: usize = 1;
/// Words kept from the matched word onwards (inclusive).
const WINDOW_AFTER: usize = 4;

static INSTITUTION_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(department of|school of|division of|faculty of|institute of|center for|centre for)",
    )
    .expect("valid regex")
});

static INSTITUTION_SUFFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(university|college|hospital|medical center|research center).*$")
        .expect("valid regex")
});

const TRIM_CHARS: &[char] = &[' ', '.', ',', ';', ':', '-'];

/// Extract a company name from the words around `matched` in `affiliation`.
///
/// `matched` is the lowercase registry entry. A word lines up with the match
/// when its cleaned form contains `matched` or is contained in it, so a word
/// made only of punctuation (cleaned to empty) lines up with any match.
/// Returns `None` when no word lines up or the cleaned window is empty.
pub(crate) fn extract_company_name(affiliation: &str, matched: &str) -> Option<String> {
    let words: Vec<&str> = affiliation.split_whitespace().collect();

    let position = words.iter().position(|word| {
        let cleaned = clean_word(word);
        cleaned.contains(matched) || matched.contains(cleaned.as_str())
    })?;

    let start = position.saturating_sub(WINDOW_BEFORE);
    let end = (position + WINDOW_AFTER).min(words.len());
    let candidate = words[start..end].join(" ");

    let candidate = INSTITUTION_PREFIX.replace(&candidate, "");
    let candidate = INSTITUTION_SUFFIX.replace(&candidate, "");
    let candidate = candidate.trim_matches(TRIM_CHARS);

    if candidate.is_empty() { None } else { Some(candidate.to_string()) }
}

/// Lowercase a word and drop everything except word characters and whitespace.
fn clean_word(word: &str) -> String {
    word.chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Capitalize the first letter of each space-separated word and lowercase the rest.
pub(crate) fn title_case(name: &str) -> String {
    name.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_around_match() {
        let name = extract_company_name(
            "Clinical Development, Novartis Pharma AG, Basel, Switzerland",
            "novartis",
        );
        assert_eq!(name.as_deref(), Some("Development, Novartis Pharma AG, Basel"));
    }

    #[test]
    fn test_strips_institutional_prefix() {
        let name = extract_company_name(
            "Center for Drug Evaluation and Research, FDA",
            "center for drug evaluation",
        );
        assert_eq!(name.as_deref(), Some("Drug Evaluation"));
    }

    #[test]
    fn test_strips_institutional_suffix() {
        let name = extract_company_name("Amgen Inc., University of Washington", "amgen");
        assert_eq!(name.as_deref(), Some("Amgen Inc"));
    }

    #[test]
    fn test_multi_word_match_uses_contained_word() {
        let name = extract_company_name("Eli Lilly and Company, Indianapolis", "eli lilly");
        assert_eq!(name.as_deref(), Some("Eli Lilly and Company"));
    }

    #[test]
    fn test_punctuation_only_word_lines_up() {
        let name = extract_company_name("Biogen; - Acme Labs Boston MA USA", "acme labs");
        assert_eq!(name.as_deref(), Some("Biogen; - Acme Labs Boston"));
    }

    #[test]
    fn test_ampersand_anchors_window() {
        let name = extract_company_name("Research & Development, Pfizer Inc, Groton", "pfizer");
        assert_eq!(name.as_deref(), Some("Research & Development, Pfizer Inc"));
    }

    #[test]
    fn test_word_alignment() {
        assert!(extract_company_name("Biopharmaceuticals", "pharmaceutical").is_some());
        assert!(extract_company_name("the j&j team", "johnson & johnson").is_none());
    }

    #[test]
    fn test_empty_after_cleanup() {
        assert!(extract_company_name("Hospital Pharmacy", "pharma").is_none());
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("glaxosmithkline"), "Glaxosmithkline");
        assert_eq!(title_case("bristol myers squibb"), "Bristol Myers Squibb");
        assert_eq!(title_case("car-t"), "Car-t");
    }
}
