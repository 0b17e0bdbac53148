//! Plain-text reports for the maintenance commands.

use crate::query::QueryAnalysis;
use crate::registry::RegistryStats;

/// Format registry statistics for `--show-company-stats`.
#[must_use]
pub fn format_registry_stats(stats: &RegistryStats) -> String {
    let mut output = String::from("Company Database Statistics\n");

    output.push_str(&format!("Total companies: {}\n", stats.total_companies));
    output.push_str(&format!("Cache file: {}\n", stats.cache_file.display()));

    let sources = if stats.sources_used.is_empty() {
        "none".to_string()
    } else {
        stats.sources_used.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
    };
    output.push_str(&format!("Sources used: {sources}\n"));

    match stats.last_updated {
        Some(ts) => output.push_str(&format!(
            "Last updated: {}\n",
            ts.format("%Y-%m-%d %H:%M:%S UTC")
        )),
        None => output.push_str("Last updated: never\n"),
    }

    if !stats.sample_companies.is_empty() {
        output.push_str("Sample companies:\n");
        for name in &stats.sample_companies {
            output.push_str(&format!("  - {name}\n"));
        }
    }

    output
}

/// Format a query analysis for `--validate-query`.
#[must_use]
pub fn format_query_analysis(analysis: &QueryAnalysis) -> String {
    let mut output = format!("Query: {}\n", analysis.query);
    output.push_str(&format!("Valid: {}\n", if analysis.valid { "yes" } else { "no" }));

    let c = &analysis.components;
    let sections: [(&str, &[String]); 6] = [
        ("Boolean operators", &c.boolean_operators),
        ("Field tags", &c.field_tags),
        ("Phrases", &c.phrases),
        ("Wildcards", &c.wildcards),
        ("Date filters", &c.date_filters),
        ("MeSH terms", &c.mesh_terms),
    ];

    for (label, items) in sections {
        if !items.is_empty() {
            output.push_str(&format!("{label}: {}\n", items.join(", ")));
        }
    }
    if sections.iter().all(|(_, items)| items.is_empty()) {
        output.push_str("Simple keyword search (no advanced syntax detected)\n");
    }

    if !analysis.warnings.is_empty() {
        output.push_str("Warnings:\n");
        for warning in &analysis.warnings {
            output.push_str(&format!("  - {warning}\n"));
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::analyze_query;
    use crate::registry::{CompanyRegistry, SourceId};

    #[test]
    fn test_stats_report() {
        let registry = CompanyRegistry::new(["pfizer", "moderna"], None, vec![SourceId::Hardcoded]);
        let text = format_registry_stats(&RegistryStats::new(&registry, "cache.json"));

        assert!(text.contains("Total companies: 2"));
        assert!(text.contains("Cache file: cache.json"));
        assert!(text.contains("Sources used: hardcoded"));
        assert!(text.contains("Last updated: never"));
        assert!(text.contains("  - moderna\n  - pfizer\n"));
    }

    #[test]
    fn test_query_report() {
        let analysis = analyze_query("(cancer[mh] AND pfizer[ad]").unwrap();
        let text = format_query_analysis(&analysis);

        assert!(text.contains("Valid: no"));
        assert!(text.contains("Field tags: mh, ad"));
        assert!(text.contains("MeSH terms: (cancer"));
        assert!(text.contains("  - Unbalanced parentheses in query"));
        assert!(!text.contains("Phrases"));
        assert!(!text.contains("Simple keyword search"));
    }

    #[test]
    fn test_query_report_plain_keywords() {
        let analysis = analyze_query("kinase inhibitor").unwrap();
        let text = format_query_analysis(&analysis);
        assert!(text.contains("Valid: yes"));
        assert!(text.contains("Simple keyword search"));
    }
}
