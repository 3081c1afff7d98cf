//! pd_grid — Grid completion and the aggregation engine.
//!
//! Pure, deterministic transforms over record lists. No I/O, no RNG, no
//! shared state; every function is total over well-formed input.
//!
//! - `completion`: sparse records → dense (year × pathogen) grid under an
//!   explicit [`pd_core::DensityPolicy`], plus filtering.
//! - `aggregate`: per-year / per-pathogen sums, summary statistics, and
//!   the per-pathogen summary table.

#![forbid(unsafe_code)]

pub mod aggregate;
pub mod completion;

pub use aggregate::{
    aggregate_by_pathogen, aggregate_by_year, summary_statistics, summary_table, PathogenRow,
    SummaryRow, SummaryStats, YearRow,
};
pub use completion::{complete_grid, distinct_pathogens, distinct_years, filter_grid};
