//! Output formatting for search results and maintenance reports.

pub mod csv;
pub mod text;

pub use csv::{format_papers_csv, write_papers_csv};
pub use text::{format_query_analysis, format_registry_stats};
