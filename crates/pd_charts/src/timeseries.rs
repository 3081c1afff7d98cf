//! Year-by-year trend lines.
//!
//! With at most one distinct pathogen the chart shows solid Positive and
//! Negative lines plus a dotted Total. With several it shows, per
//! pathogen in display order, a solid positive and a dashed negative
//! line, then one dotted aggregate Total.

use crate::spec::{ChartSpec, LineDash, LineSeries, TimeSeriesSpec};
use crate::style::Palette;
use pd_core::Record;
use pd_grid::{aggregate_by_year, distinct_pathogens, distinct_years};
use std::collections::BTreeMap;

pub fn build_timeseries(grid: &[Record], pathogen_order: &[String], palette: &Palette) -> ChartSpec {
    if grid.is_empty() {
        return crate::empty_spec();
    }

    let by_year = aggregate_by_year(grid);
    let years: Vec<i32> = by_year.iter().map(|r| r.year).collect();

    let mut series = Vec::new();

    if distinct_pathogens(grid).len() <= 1 {
        series.push(LineSeries {
            name: "Positive".to_string(),
            color: palette.positive.clone(),
            dash: LineDash::Solid,
            years: years.clone(),
            values: by_year.iter().map(|r| r.positive).collect(),
        });
        series.push(LineSeries {
            name: "Negative".to_string(),
            color: palette.negative.clone(),
            dash: LineDash::Solid,
            years: years.clone(),
            values: by_year.iter().map(|r| r.negative).collect(),
        });
    } else {
        let all_years = distinct_years(grid);
        let cells: BTreeMap<(&str, i32), &Record> =
            grid.iter().map(|r| ((r.pathogen.as_str(), r.year), r)).collect();
        for pathogen in crate::display_order(grid, pathogen_order) {
            let row = |pick: fn(&Record) -> u64| -> Vec<u64> {
                all_years
                    .iter()
                    .map(|&y| cells.get(&(pathogen.as_str(), y)).map_or(0, |r| pick(r)))
                    .collect()
            };
            series.push(LineSeries {
                name: format!("{pathogen} - Positive"),
                color: palette.positive.clone(),
                dash: LineDash::Solid,
                years: all_years.clone(),
                values: row(|r| r.positive),
            });
            series.push(LineSeries {
                name: format!("{pathogen} - Negative"),
                color: palette.negative.clone(),
                dash: LineDash::Dash,
                years: all_years.clone(),
                values: row(|r| r.negative),
            });
        }
    }

    series.push(LineSeries {
        name: "Total".to_string(),
        color: palette.total.clone(),
        dash: LineDash::Dot,
        years,
        values: by_year.iter().map(|r| r.total).collect(),
    });

    ChartSpec::TimeSeries(TimeSeriesSpec { series })
}
