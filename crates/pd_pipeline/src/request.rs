//! What the presentation shell asks the pipeline to draw.

use pd_charts::{BarMode, HeightScale, ValueField};

/// Which chart to build, with its per-chart knobs.
#[derive(Clone, Debug, PartialEq)]
pub enum ChartKind {
    Bars3d { scale: HeightScale, show_values: bool },
    Bars2d { mode: BarMode },
    Facets { max_cols: usize, uniform_scale: bool },
    Heatmap { field: ValueField },
    Pie,
    TimeSeries,
    Summary,
}

/// One render request: the chart plus the filters to apply first.
#[derive(Clone, Debug, PartialEq)]
pub struct ChartRequest {
    pub chart: ChartKind,
    /// Requested inclusive year range; clamped to the data's span.
    /// `None` keeps every year.
    pub year_range: Option<(i32, i32)>,
    /// Pathogens to keep, in display order; capped at the selection
    /// limit. Empty keeps every pathogen.
    pub pathogens: Vec<String>,
}

impl ChartRequest {
    pub fn new(chart: ChartKind) -> Self {
        Self { chart, year_range: None, pathogens: Vec::new() }
    }

    pub fn with_years(mut self, min: i32, max: i32) -> Self {
        self.year_range = Some((min, max));
        self
    }

    pub fn with_pathogens<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.pathogens = names.into_iter().map(Into::into).collect();
        self
    }
}
