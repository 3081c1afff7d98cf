//! pd_charts — pure chart-spec builders.
//!
//! Every builder is a pure `(grid, options) -> ChartSpec` function over a
//! dense grid from `pd_grid`. UI state (bar mode, row order, selection
//! order) is always an explicit parameter; nothing here reads shared
//! mutable state or performs I/O. An empty grid always produces
//! `ChartSpec::Empty`, never an error.

#![forbid(unsafe_code)]

pub mod bars2d;
pub mod bars3d;
pub mod facets;
pub mod heatmap;
pub mod pie;
pub mod spec;
pub mod style;
pub mod summary;
pub mod timeseries;

pub use bars2d::build_bars2d;
pub use bars3d::{build_bars3d, Bars3dOptions};
pub use facets::{build_facets, FacetOptions};
pub use heatmap::build_heatmap;
pub use pie::build_pie;
pub use spec::{
    AxisRange, BarMode, BarSeries, Bars2dSpec, Bars3dSpec, CategoryAxis, ChartSpec, Cuboid,
    Edge3, FacetPanel, FacetSpec, HeatmapSpec, LineDash, LineSeries, Outcome, PieMode, PieSlice,
    PieSpec, Point3, QuadFace, SummarySpec, TimeSeriesSpec, ValueAxis, ValueField, ValueLabel,
};
pub use style::{Camera, HeightScale, Palette, Projection, EDGE_COLOR};
pub use summary::build_summary;
pub use timeseries::build_timeseries;

use pd_core::Record;

/// Message carried by every `ChartSpec::Empty`.
pub const EMPTY_MESSAGE: &str = "No data available for the selected filters.";

pub(crate) fn empty_spec() -> spec::ChartSpec {
    spec::ChartSpec::Empty { message: EMPTY_MESSAGE.to_string() }
}

/// Pathogen display order: names from `preferred` that occur in the grid,
/// in `preferred` order, then the remaining grid pathogens sorted.
pub(crate) fn display_order(grid: &[Record], preferred: &[String]) -> Vec<String> {
    let present = pd_grid::distinct_pathogens(grid);
    let mut out: Vec<String> = preferred
        .iter()
        .filter(|p| present.contains(p))
        .cloned()
        .collect();
    for p in present {
        if !out.contains(&p) {
            out.push(p);
        }
    }
    out
}
