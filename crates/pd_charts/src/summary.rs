//! Summary statistics packaged as a chart-level artifact.

use crate::spec::{ChartSpec, SummarySpec};
use pd_core::Record;
use pd_grid::{summary_statistics, summary_table};

pub fn build_summary(grid: &[Record]) -> ChartSpec {
    if grid.is_empty() {
        return crate::empty_spec();
    }
    ChartSpec::Summary(SummarySpec {
        stats: summary_statistics(grid),
        table: summary_table(grid),
    })
}
