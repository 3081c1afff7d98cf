//! pd_pipeline — dashboard orchestration.
//!
//! Ties the other crates together: fetch records (or reuse the cache),
//! complete the grid under the configured density policy, clamp and apply
//! the filters, then hand the dense grid to a chart builder. Stays free of
//! terminal/CLI concerns; `pd_cli` owns those.

#![forbid(unsafe_code)]

use pd_store::StoreError;
use thiserror::Error;

pub mod dashboard;
pub mod request;

pub use dashboard::Dashboard;
pub use request::{ChartKind, ChartRequest};

/// Single error surface for the orchestration, split by stage so the CLI
/// can bucket exit codes.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("fetch failed: {0}")]
    Fetch(StoreError),

    #[error("export failed: {0}")]
    Export(StoreError),
}

impl PipelineError {
    /// Whether the underlying failure is bad input rather than an
    /// environment problem.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            PipelineError::Fetch(StoreError::Json(_)) | PipelineError::Export(StoreError::Json(_))
        )
    }
}
