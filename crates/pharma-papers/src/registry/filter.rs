//! Name filters applied to candidate company names from remote sources.

use std::sync::LazyLock;

use regex::Regex;

/// Identifier-like and placeholder shapes, matched against the lowercase name.
static EXCLUDE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"^[a-z0-9_\-]{10,}$",
        r"^\d+.*alloy",
        r"^[a-z]\d+_\d+",
        r"^misc\d+",
        r"^test",
        r"^example",
        r"^sample",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("exclude pattern is valid"))
    .collect()
});

static ALLOWED_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9\s\-&.,()]+$").expect("valid regex"));

static IDENTIFIER_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9_\-]{8,}$").expect("valid regex"));

static LONG_NUMBER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d{4,}").expect("valid regex"));

/// Industry keywords that admit a name on their own.
pub const INDUSTRY_KEYWORDS: &[&str] = &[
    "pharmaceutical",
    "pharma",
    "biotech",
    "biotechnology",
    "biopharmaceutical",
    "therapeutics",
    "medicines",
    "drug",
    "vaccine",
    "biology",
    "clinical",
    "research",
    "laboratory",
    "labs",
    "life sciences",
    "healthcare",
    "medical",
    "therapy",
    "treatment",
    "diagnostic",
    "genomics",
    "bioscience",
    "biomedical",
    "oncology",
    "immunology",
];

/// Name fragments common in company names but not covered by the keywords.
const NAME_FRAGMENTS: &[&str] = &["laboratories", "biosciences"];

/// Fragments of well-known firms admitted even without an industry keyword.
pub const MAJOR_COMPANIES: &[&str] = &[
    "pfizer",
    "roche",
    "novartis",
    "merck",
    "gsk",
    "sanofi",
    "abbvie",
    "johnson",
    "bristol",
    "amgen",
    "gilead",
    "biogen",
    "celgene",
    "takeda",
    "bayer",
    "boehringer",
    "lilly",
    "astrazeneca",
    "regeneron",
    "vertex",
    "alexion",
    "incyte",
    "illumina",
    "moderna",
    "biontech",
    "genentech",
    "genmab",
    "seagen",
    "bluebird",
    "crispr",
    "editas",
    "intellia",
    "sangamo",
    "kite",
    "juno",
    "novocure",
    "neurocrine",
    "sage",
    "alkermes",
    "acadia",
    "arena",
    "biomarin",
    "ultragenyx",
    "sarepta",
    "alnylam",
    "ionis",
];

/// Keywords accepted by [`is_strict_company_name`] in place of a space.
const STRICT_KEYWORDS: &[&str] = &[
    "pharma",
    "biotech",
    "therapeutic",
    "lab",
    "medicine",
    "clinical",
];

/// Check whether a raw candidate looks like a pharma/biotech company name.
///
/// A name without an industry keyword or a known company fragment is rejected
/// even when it has substantial words.
#[must_use]
pub fn is_plausible_company_name(name: &str) -> bool {
    let trimmed = name.trim();
    if trimmed.chars().count() < 3 {
        return false;
    }

    let lower = trimmed.to_lowercase();
    if EXCLUDE_PATTERNS.iter().any(|pattern| pattern.is_match(&lower)) {
        return false;
    }

    if !ALLOWED_CHARS.is_match(name) {
        return false;
    }

    INDUSTRY_KEYWORDS.iter().any(|keyword| lower.contains(keyword))
        || NAME_FRAGMENTS.iter().any(|fragment| lower.contains(fragment))
        || MAJOR_COMPANIES.iter().any(|company| lower.contains(company))
}

/// Stricter check used when rebuilding a cleaned registry.
///
/// Expects an already lowercase name.
#[must_use]
pub fn is_strict_company_name(name: &str) -> bool {
    if name.chars().count() < 3 {
        return false;
    }
    if IDENTIFIER_TOKEN.is_match(name) {
        return false;
    }
    if LONG_NUMBER.is_match(name) {
        return false;
    }

    name.contains(' ') || STRICT_KEYWORDS.iter().any(|keyword| name.contains(keyword))
}
