//! pd_store — Record store adapter.
//!
//! Everything between the remote document collection and the in-memory
//! record list lives here: the source trait, the local JSON snapshot
//! loader, the deterministic synthetic generator, the layered fallback
//! chain, the time-based cache, and CSV export/import.
//!
//! Shared error type (`StoreError`) with `From` conversions used across
//! modules; details live in submodules.

#![forbid(unsafe_code)]

use thiserror::Error;

/// Unified error for pd_store (used by source/cache/csv).
#[derive(Debug, Error)]
pub enum StoreError {
    /// Filesystem / path errors.
    #[error("io/path error: {0}")]
    Path(String),

    /// JSON parse errors for document snapshots.
    #[error("json error: {0}")]
    Json(String),

    /// CSV read/write errors.
    #[error("csv error: {0}")]
    Csv(String),

    /// Every fallback source failed. In practice unreachable when the
    /// synthetic generator terminates the chain.
    #[error("no record source available: {0}")]
    Unavailable(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        StoreError::Path(e.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Json(e.to_string())
    }
}

impl From<csv::Error> for StoreError {
    fn from(e: csv::Error) -> Self {
        StoreError::Csv(e.to_string())
    }
}

pub mod cache;
pub mod export;
pub mod source;
pub mod synthetic;

pub use cache::{Clock, DataCache, SystemClock, CACHE_LIFETIME};
pub use export::{read_csv, write_csv};
pub use source::{FallbackChain, JsonFileSource, RecordSource};
pub use synthetic::SyntheticSource;
