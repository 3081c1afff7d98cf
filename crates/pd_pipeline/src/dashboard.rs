//! The dashboard core: source + cache + density policy, and the
//! render path fetch → complete → clamp → filter → build.

use crate::{ChartKind, ChartRequest, PipelineError};
use pd_charts::{
    build_bars2d, build_bars3d, build_facets, build_heatmap, build_pie, build_summary,
    build_timeseries, Bars3dOptions, ChartSpec, FacetOptions, Palette,
};
use pd_core::{DensityPolicy, Record, Selection, YearFilter};
use pd_grid::{complete_grid, distinct_pathogens, distinct_years, filter_grid};
use pd_store::cache::{Clock, DataCache, SystemClock};
use pd_store::{write_csv, RecordSource};
use std::path::Path;
use tracing::{debug, info, warn};

/// Build the capped selection, logging entries that get dropped (blank
/// names, anything past the cap).
fn selection_from(names: &[String]) -> Selection {
    let mut sel = Selection::new();
    for name in names {
        if let Err(e) = sel.try_add(name.clone()) {
            warn!(pathogen = %name, error = %e, "selection entry dropped");
        }
    }
    sel
}

pub struct Dashboard<C: Clock = SystemClock> {
    source: Box<dyn RecordSource>,
    cache: DataCache<C>,
    policy: DensityPolicy,
    palette: Palette,
}

impl Dashboard<SystemClock> {
    pub fn new(source: Box<dyn RecordSource>, policy: DensityPolicy) -> Self {
        Self::with_cache(source, DataCache::new(), policy)
    }
}

impl<C: Clock> Dashboard<C> {
    pub fn with_cache(source: Box<dyn RecordSource>, cache: DataCache<C>, policy: DensityPolicy) -> Self {
        Self { source, cache, policy, palette: Palette::default() }
    }

    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    /// Drop the cache so the next render refetches.
    pub fn refresh(&mut self) {
        self.cache.invalidate();
    }

    fn records(&mut self) -> Result<Vec<Record>, PipelineError> {
        if let Some(hit) = self.cache.get() {
            debug!(count = hit.len(), "cache hit");
            return Ok(hit.to_vec());
        }
        let records = self.source.fetch().map_err(PipelineError::Fetch)?;
        info!(count = records.len(), source = %self.source.describe(), "fetched records");
        self.cache.put(records.clone());
        Ok(records)
    }

    /// The dense grid after completion and both filters. Empty input or
    /// filters that exclude everything yield an empty vec, not an error.
    pub fn filtered_grid(&mut self, request: &ChartRequest) -> Result<Vec<Record>, PipelineError> {
        let records = self.records()?;
        let grid = complete_grid(&records, self.policy);

        let years = distinct_years(&grid);
        let (Some(&lo), Some(&hi)) = (years.first(), years.last()) else {
            return Ok(Vec::new());
        };
        let filter = match request.year_range {
            Some((min, max)) => YearFilter::clamped(min, max, lo, hi),
            None => YearFilter::new(lo, hi),
        };

        let names = if request.pathogens.is_empty() {
            distinct_pathogens(&grid)
        } else {
            // The selection dedupes and enforces the display cap.
            selection_from(&request.pathogens).names().to_vec()
        };

        Ok(filter_grid(&grid, &filter, &names))
    }

    pub fn render(&mut self, request: &ChartRequest) -> Result<ChartSpec, PipelineError> {
        let grid = self.filtered_grid(request)?;
        let order = selection_from(&request.pathogens);
        let order = order.names();

        let spec = match &request.chart {
            ChartKind::Bars3d { scale, show_values } => build_bars3d(
                &grid,
                &Bars3dOptions {
                    scale: *scale,
                    show_values: *show_values,
                    palette: self.palette.clone(),
                    pathogen_order: order.to_vec(),
                    ..Bars3dOptions::default()
                },
            ),
            ChartKind::Bars2d { mode } => build_bars2d(&grid, *mode, order, &self.palette),
            ChartKind::Facets { max_cols, uniform_scale } => build_facets(
                &grid,
                &FacetOptions {
                    max_cols: *max_cols,
                    uniform_scale: *uniform_scale,
                    pathogen_order: order.to_vec(),
                },
            ),
            ChartKind::Heatmap { field } => build_heatmap(&grid, *field, order),
            ChartKind::Pie => build_pie(&grid, order, &self.palette),
            ChartKind::TimeSeries => build_timeseries(&grid, order, &self.palette),
            ChartKind::Summary => build_summary(&grid),
        };
        Ok(spec)
    }

    /// Write the filtered grid as CSV.
    pub fn export_csv(
        &mut self,
        path: impl AsRef<Path>,
        request: &ChartRequest,
    ) -> Result<(), PipelineError> {
        let grid = self.filtered_grid(request)?;
        write_csv(path, &grid).map_err(PipelineError::Export)
    }
}
