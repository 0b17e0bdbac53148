//! Data models for PubMed records and qualification results.
//!
//! Records are assembled by the efetch parser; qualified papers are the
//! output of paper-level aggregation.

pub mod paper;

pub use paper::{AuthorRecord, PaperRecord, QualifiedPaper};
