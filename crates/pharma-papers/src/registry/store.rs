//! File persistence for the company registry.

use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use super::{CompanyRegistry, SourceId};
use crate::error::PersistenceError;

/// On-disk shape of a persisted registry. Every field is optional on read.
#[derive(Debug, Default, Serialize, Deserialize)]
struct CacheRecord {
    #[serde(default)]
    companies: Vec<String>,
    #[serde(default)]
    last_updated: Option<String>,
    #[serde(default)]
    sources_used: Vec<SourceId>,
}

/// A registry persisted as one JSON file.
#[derive(Debug, Clone)]
pub struct RegistryStore {
    path: PathBuf,
}

impl RegistryStore {
    /// Create a store backed by `path`. Nothing is read until [`Self::load`].
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
        }
    }

    /// Location of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the persisted registry; `Ok(None)` if no file exists.
    pub fn load(&self) -> Result<Option<CompanyRegistry>, PersistenceError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(PersistenceError::io(&self.path, e)),
        };

        let record: CacheRecord = serde_json::from_str(&content)?;
        let last_updated = record.last_updated.as_deref().and_then(parse_timestamp);

        Ok(Some(CompanyRegistry::new(record.companies, last_updated, record.sources_used)))
    }

    /// Write the registry atomically: a temporary file in the same directory
    /// is fully written and synced, then renamed over the target.
    pub fn save(&self, registry: &CompanyRegistry) -> Result<(), PersistenceError> {
        let record = CacheRecord {
            companies: registry.names().map(str::to_string).collect(),
            last_updated: registry.last_updated().map(|ts| ts.to_rfc3339()),
            sources_used: registry.sources_used().to_vec(),
        };
        let json = serde_json::to_string_pretty(&record)?;

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut file = NamedTempFile::new_in(dir).map_err(|e| PersistenceError::io(dir, e))?;
        file.write_all(json.as_bytes()).map_err(|e| PersistenceError::io(file.path(), e))?;
        file.as_file().sync_all().map_err(|e| PersistenceError::io(file.path(), e))?;
        file.persist(&self.path).map_err(|e| PersistenceError::io(&self.path, e.error))?;

        tracing::debug!(
            path = %self.path.display(),
            companies = registry.len(),
            "Saved company registry"
        );
        Ok(())
    }

    /// Delete the persisted registry. Returns whether a file was removed.
    pub fn remove(&self) -> Result<bool, PersistenceError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(PersistenceError::io(&self.path, e)),
        }
    }
}

/// Parse RFC 3339, or a naive ISO-8601 timestamp taken as UTC.
fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    tracing::warn!(timestamp = raw, "Ignoring unparseable registry timestamp");
    None
}
