//! Aggregation engine: per-year sums, per-pathogen sums, flat summary
//! statistics, and the per-pathogen summary table.
//!
//! Pure u64 accumulation; ratios, means and percentages are the only
//! floating-point values, and ratios are defined as 0 at zero samples.

use pd_core::Record;
use serde::Serialize;
use std::collections::BTreeMap;

/// Per-year sums across all pathogens in the grid.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct YearRow {
    pub year: i32,
    pub positive: u64,
    pub negative: u64,
    pub total: u64,
}

/// Per-pathogen sums across all years in the grid.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct PathogenRow {
    pub pathogen: String,
    pub positive: u64,
    pub negative: u64,
    pub total: u64,
}

/// Flat summary statistics over a grid (or any record list).
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SummaryStats {
    pub total_samples: u64,
    pub total_positive: u64,
    pub total_negative: u64,
    /// `total_positive / total_samples`; 0 by convention at zero samples.
    pub positive_ratio: f64,
    pub negative_ratio: f64,
    pub pathogen_count: usize,
    /// `(min_year, max_year)`; `None` for an empty grid.
    pub year_range: Option<(i32, i32)>,
    pub years_count: usize,
    pub per_pathogen: Vec<PathogenRow>,
    pub per_year: Vec<YearRow>,
}

/// One row of the per-pathogen summary table.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SummaryRow {
    pub pathogen: String,
    pub positive_sum: u64,
    pub positive_mean: f64,
    pub positive_max: u64,
    pub negative_sum: u64,
    pub negative_mean: f64,
    pub negative_max: u64,
    pub total_sum: u64,
    pub total_mean: f64,
    pub total_max: u64,
    /// `positive_sum / total_sum * 100`, rounded to one decimal;
    /// 0 when `total_sum == 0`.
    pub positive_pct: f64,
    pub negative_pct: f64,
}

/// Group by year, sum positive/negative, derive total. Rows ascend by year.
pub fn aggregate_by_year(grid: &[Record]) -> Vec<YearRow> {
    let mut acc: BTreeMap<i32, (u64, u64)> = BTreeMap::new();
    for r in grid {
        let e = acc.entry(r.year).or_insert((0, 0));
        e.0 += r.positive;
        e.1 += r.negative;
    }
    acc.into_iter()
        .map(|(year, (positive, negative))| YearRow {
            year,
            positive,
            negative,
            total: positive + negative,
        })
        .collect()
}

/// Group by pathogen, sum positive/negative, derive total. Rows ascend by name.
pub fn aggregate_by_pathogen(grid: &[Record]) -> Vec<PathogenRow> {
    let mut acc: BTreeMap<&str, (u64, u64)> = BTreeMap::new();
    for r in grid {
        let e = acc.entry(r.pathogen.as_str()).or_insert((0, 0));
        e.0 += r.positive;
        e.1 += r.negative;
    }
    acc.into_iter()
        .map(|(pathogen, (positive, negative))| PathogenRow {
            pathogen: pathogen.to_string(),
            positive,
            negative,
            total: positive + negative,
        })
        .collect()
}

/// Summary statistics over the grid. Total over well-formed input; the
/// zero-sample case yields zero ratios, never a division fault.
pub fn summary_statistics(grid: &[Record]) -> SummaryStats {
    let per_pathogen = aggregate_by_pathogen(grid);
    let per_year = aggregate_by_year(grid);

    let total_positive: u64 = grid.iter().map(|r| r.positive).sum();
    let total_negative: u64 = grid.iter().map(|r| r.negative).sum();
    let total_samples = total_positive + total_negative;

    let (positive_ratio, negative_ratio) = if total_samples > 0 {
        (
            total_positive as f64 / total_samples as f64,
            total_negative as f64 / total_samples as f64,
        )
    } else {
        (0.0, 0.0)
    };

    let year_range = match (per_year.first(), per_year.last()) {
        (Some(first), Some(last)) => Some((first.year, last.year)),
        _ => None,
    };

    SummaryStats {
        total_samples,
        total_positive,
        total_negative,
        positive_ratio,
        negative_ratio,
        pathogen_count: per_pathogen.len(),
        year_range,
        years_count: per_year.len(),
        per_pathogen,
        per_year,
    }
}

/// Round to one decimal place.
#[inline]
fn round_1dp(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

/// Per-pathogen summary table: sum/mean/max for positive, negative and
/// total, plus share percentages rounded to one decimal. Percentages are
/// 0 when a pathogen's total is 0.
pub fn summary_table(grid: &[Record]) -> Vec<SummaryRow> {
    let mut groups: BTreeMap<&str, Vec<&Record>> = BTreeMap::new();
    for r in grid {
        groups.entry(r.pathogen.as_str()).or_default().push(r);
    }

    groups
        .into_iter()
        .map(|(pathogen, rows)| {
            let n = rows.len() as f64;
            let positive_sum: u64 = rows.iter().map(|r| r.positive).sum();
            let negative_sum: u64 = rows.iter().map(|r| r.negative).sum();
            let total_sum = positive_sum + negative_sum;
            let positive_max = rows.iter().map(|r| r.positive).max().unwrap_or(0);
            let negative_max = rows.iter().map(|r| r.negative).max().unwrap_or(0);
            let total_max = rows.iter().map(|r| r.total()).max().unwrap_or(0);
            let (positive_pct, negative_pct) = if total_sum > 0 {
                (
                    round_1dp(positive_sum as f64 / total_sum as f64 * 100.0),
                    round_1dp(negative_sum as f64 / total_sum as f64 * 100.0),
                )
            } else {
                (0.0, 0.0)
            };
            SummaryRow {
                pathogen: pathogen.to_string(),
                positive_sum,
                positive_mean: positive_sum as f64 / n,
                positive_max,
                negative_sum,
                negative_mean: negative_sum as f64 / n,
                negative_max,
                total_sum,
                total_mean: total_sum as f64 / n,
                total_max,
                positive_pct,
                negative_pct,
            }
        })
        .collect()
}
