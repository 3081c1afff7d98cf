//! Faceted small multiples: one stacked-bar panel per pathogen, laid out
//! on a column-capped grid.

use crate::spec::{ChartSpec, FacetPanel, FacetSpec};
use pd_core::Record;
use std::collections::BTreeMap;

#[derive(Clone, Debug)]
pub struct FacetOptions {
    /// Column cap for the panel grid.
    pub max_cols: usize,
    /// Share one y-range across every panel.
    pub uniform_scale: bool,
    /// Preferred panel order (selection order); unlisted pathogens follow,
    /// sorted.
    pub pathogen_order: Vec<String>,
}

impl Default for FacetOptions {
    fn default() -> Self {
        Self { max_cols: 4, uniform_scale: false, pathogen_order: Vec::new() }
    }
}

fn panel_max(rows: &[(i32, u64, u64)]) -> f64 {
    let stacked = rows.iter().map(|&(_, p, n)| p + n).max().unwrap_or(0);
    (stacked as f64 * 1.15).max(10.0)
}

pub fn build_facets(grid: &[Record], opts: &FacetOptions) -> ChartSpec {
    let pathogens = crate::display_order(grid, &opts.pathogen_order);
    if pathogens.is_empty() {
        return crate::empty_spec();
    }

    // (year, positive, negative) rows per pathogen, chronological.
    let mut by_pathogen: BTreeMap<&str, Vec<(i32, u64, u64)>> = BTreeMap::new();
    for r in grid {
        by_pathogen
            .entry(r.pathogen.as_str())
            .or_default()
            .push((r.year, r.positive, r.negative));
    }
    for rows in by_pathogen.values_mut() {
        rows.sort_by_key(|&(year, _, _)| year);
    }

    // Shared y-range: the largest pathogen grand total (positive + negative
    // summed across all of its years), not the largest single bar.
    let global_max = by_pathogen
        .values()
        .map(|rows| rows.iter().map(|&(_, p, n)| p + n).sum::<u64>())
        .max()
        .map_or(10.0, |m| (m as f64 * 1.15).max(10.0));

    let panels: Vec<FacetPanel> = pathogens
        .iter()
        .map(|pathogen| {
            let rows = by_pathogen.get(pathogen.as_str()).cloned().unwrap_or_default();
            let y_max = if opts.uniform_scale { global_max } else { panel_max(&rows) };
            FacetPanel {
                pathogen: pathogen.clone(),
                years: rows.iter().map(|&(y, _, _)| y).collect(),
                positive: rows.iter().map(|&(_, p, _)| p).collect(),
                negative: rows.iter().map(|&(_, _, n)| n).collect(),
                y_max,
            }
        })
        .collect();

    let columns = opts.max_cols.min(panels.len()).max(1);
    let rows = panels.len().div_ceil(columns);

    ChartSpec::Facets(FacetSpec {
        columns,
        rows,
        uniform_scale: opts.uniform_scale,
        panels,
    })
}
