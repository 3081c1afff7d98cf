//! Record sources: the adapter trait, the local JSON document-snapshot
//! loader, and the layered fallback chain.
//!
//! The snapshot loader accepts the legacy on-wire field names
//! (`Year`/`Pathogen`/`Positive`/`Negative`/`Unknown`). `Unknown` is dead
//! data: accepted on input, forced to 0, never surfaced. Documents marked
//! not publicly viewable are skipped.

use crate::{StoreError, StoreResult};
use pd_core::Record;
use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// A source of raw records. The core treats every source as a black box;
/// retry/batch/pagination policies belong behind this seam.
pub trait RecordSource {
    /// Fetch all records. An `Ok(vec![])` is a valid answer the caller
    /// must tolerate.
    fn fetch(&self) -> StoreResult<Vec<Record>>;

    /// Human-readable source label for diagnostics.
    fn describe(&self) -> String;
}

// ----------------------------- Wire-facing shape -----------------------------

/// One document as stored in the remote collection (and its local
/// snapshots). Missing numeric fields coerce to 0 rather than rejecting
/// the document.
#[derive(Debug, Deserialize)]
struct RawDocument {
    #[serde(rename = "Year")]
    year: i32,
    #[serde(rename = "Pathogen")]
    pathogen: String,
    #[serde(rename = "Positive", default)]
    positive: u64,
    #[serde(rename = "Negative", default)]
    negative: u64,
    // Accepted but never used; the field is forced to zero downstream.
    #[serde(rename = "Unknown", default)]
    #[allow(dead_code)]
    unknown: u64,
    #[serde(rename = "isPubliclyViewable", default = "default_viewable")]
    publicly_viewable: bool,
}

fn default_viewable() -> bool {
    true
}

impl RawDocument {
    fn into_record(self) -> Record {
        Record::new(self.year, self.pathogen, self.positive, self.negative)
    }
}

// ----------------------------- Local JSON snapshot -----------------------------

/// Loads a JSON array of documents from a local snapshot file.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self { path: path.as_ref().to_path_buf() }
    }
}

impl RecordSource for JsonFileSource {
    fn fetch(&self) -> StoreResult<Vec<Record>> {
        let file = File::open(&self.path)
            .map_err(|e| StoreError::Path(format!("{}: {e}", self.path.display())))?;
        let docs: Vec<RawDocument> = serde_json::from_reader(BufReader::new(file))?;

        let mut records: Vec<Record> = Vec::with_capacity(docs.len());
        for doc in docs {
            if !doc.publicly_viewable {
                continue;
            }
            let rec = doc.into_record();
            // All-zero documents carry no signal; drop them on ingest.
            if rec.is_zero() {
                continue;
            }
            records.push(rec);
        }
        debug!(count = records.len(), path = %self.path.display(), "loaded snapshot records");
        Ok(records)
    }

    fn describe(&self) -> String {
        format!("json snapshot {}", self.path.display())
    }
}

// ----------------------------- Fallback chain -----------------------------

/// Ordered fallback over sources: the first source that succeeds with a
/// non-empty record list wins. Failures and empty answers fall through
/// with a warning. `Unavailable` only if every source fails or comes back
/// empty — terminating the chain with a synthetic source makes the chain
/// effectively total.
pub struct FallbackChain {
    sources: Vec<Box<dyn RecordSource>>,
}

impl FallbackChain {
    pub fn new() -> Self {
        Self { sources: Vec::new() }
    }

    pub fn push(mut self, source: Box<dyn RecordSource>) -> Self {
        self.sources.push(source);
        self
    }
}

impl Default for FallbackChain {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordSource for FallbackChain {
    fn fetch(&self) -> StoreResult<Vec<Record>> {
        for source in &self.sources {
            match source.fetch() {
                Ok(records) if !records.is_empty() => {
                    debug!(source = %source.describe(), count = records.len(), "source selected");
                    return Ok(records);
                }
                Ok(_) => {
                    warn!(source = %source.describe(), "source returned no records, falling through");
                }
                Err(e) => {
                    warn!(source = %source.describe(), error = %e, "source failed, falling through");
                }
            }
        }
        Err(StoreError::Unavailable(format!(
            "all {} sources exhausted",
            self.sources.len()
        )))
    }

    fn describe(&self) -> String {
        let names: Vec<String> = self.sources.iter().map(|s| s.describe()).collect();
        format!("fallback[{}]", names.join(" -> "))
    }
}
