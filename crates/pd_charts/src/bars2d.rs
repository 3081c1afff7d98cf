//! 2D bar builder. The mode is an explicit flag:
//!
//! - `Group`: one category per `"{year} - {pathogen}"` pair, two series
//!   (Positive, Negative), zero-filled where the grid has no cell.
//! - `Stack`: categories are years; one series per pathogen × outcome.

use crate::spec::{BarMode, BarSeries, Bars2dSpec, ChartSpec};
use crate::style::Palette;
use pd_core::Record;
use pd_grid::distinct_years;
use std::collections::BTreeMap;

pub fn build_bars2d(
    grid: &[Record],
    mode: BarMode,
    pathogen_order: &[String],
    palette: &Palette,
) -> ChartSpec {
    if grid.is_empty() {
        return crate::empty_spec();
    }

    let years = distinct_years(grid);
    let pathogens = crate::display_order(grid, pathogen_order);
    let cells: BTreeMap<(i32, &str), &Record> =
        grid.iter().map(|r| ((r.year, r.pathogen.as_str()), r)).collect();

    let (categories, series) = match mode {
        BarMode::Group => {
            let mut categories = Vec::with_capacity(years.len() * pathogens.len());
            let mut positive = Vec::with_capacity(categories.capacity());
            let mut negative = Vec::with_capacity(categories.capacity());
            for &year in &years {
                for pathogen in &pathogens {
                    categories.push(format!("{year} - {pathogen}"));
                    let cell = cells.get(&(year, pathogen.as_str()));
                    positive.push(cell.map_or(0, |r| r.positive));
                    negative.push(cell.map_or(0, |r| r.negative));
                }
            }
            let series = vec![
                BarSeries {
                    name: "Positive".to_string(),
                    color: palette.positive.clone(),
                    values: positive,
                },
                BarSeries {
                    name: "Negative".to_string(),
                    color: palette.negative.clone(),
                    values: negative,
                },
            ];
            (categories, series)
        }
        BarMode::Stack => {
            let categories: Vec<String> = years.iter().map(|y| y.to_string()).collect();
            let mut series = Vec::with_capacity(pathogens.len() * 2);
            for pathogen in &pathogens {
                let row = |pick: fn(&Record) -> u64| -> Vec<u64> {
                    years
                        .iter()
                        .map(|&y| cells.get(&(y, pathogen.as_str())).map_or(0, |r| pick(r)))
                        .collect()
                };
                series.push(BarSeries {
                    name: format!("{pathogen} - Positive"),
                    color: palette.positive.clone(),
                    values: row(|r| r.positive),
                });
                series.push(BarSeries {
                    name: format!("{pathogen} - Negative"),
                    color: palette.negative.clone(),
                    values: row(|r| r.negative),
                });
            }
            (categories, series)
        }
    };

    ChartSpec::Bars2d(Bars2dSpec { mode, categories, series })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> Vec<Record> {
        vec![
            Record::new(2020, "A", 10, 5),
            Record::new(2020, "B", 0, 0),
            Record::new(2021, "A", 3, 7),
            Record::new(2021, "B", 1, 2),
        ]
    }

    fn unwrap_bars2d(spec: ChartSpec) -> Bars2dSpec {
        match spec {
            ChartSpec::Bars2d(s) => s,
            other => panic!("expected 2d bars, got {other:?}"),
        }
    }

    #[test]
    fn group_mode_crosses_years_and_pathogens() {
        let s = unwrap_bars2d(build_bars2d(&grid(), BarMode::Group, &[], &Palette::default()));
        assert_eq!(
            s.categories,
            vec!["2020 - A", "2020 - B", "2021 - A", "2021 - B"]
        );
        assert_eq!(s.series.len(), 2);
        assert_eq!(s.series[0].name, "Positive");
        assert_eq!(s.series[0].values, vec![10, 0, 3, 1]);
        assert_eq!(s.series[1].values, vec![5, 0, 7, 2]);
    }

    #[test]
    fn group_mode_zero_fills_missing_cells() {
        let sparse = vec![Record::new(2020, "A", 4, 4), Record::new(2021, "B", 1, 1)];
        let s = unwrap_bars2d(build_bars2d(&sparse, BarMode::Group, &[], &Palette::default()));
        assert_eq!(s.series[0].values, vec![4, 0, 0, 1]);
    }

    #[test]
    fn stack_mode_emits_a_series_per_pathogen_and_outcome() {
        let s = unwrap_bars2d(build_bars2d(&grid(), BarMode::Stack, &[], &Palette::default()));
        assert_eq!(s.categories, vec!["2020", "2021"]);
        let names: Vec<&str> = s.series.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["A - Positive", "A - Negative", "B - Positive", "B - Negative"]
        );
        assert_eq!(s.series[0].values, vec![10, 3]);
        assert_eq!(s.series[3].values, vec![0, 2]);
    }

    #[test]
    fn selection_order_drives_both_modes() {
        let order = vec!["B".to_string()];
        let s = unwrap_bars2d(build_bars2d(&grid(), BarMode::Group, &order, &Palette::default()));
        assert_eq!(s.categories[0], "2020 - B");
        let s = unwrap_bars2d(build_bars2d(&grid(), BarMode::Stack, &order, &Palette::default()));
        assert_eq!(s.series[0].name, "B - Positive");
    }

    #[test]
    fn empty_grid_yields_empty_artifact() {
        assert_eq!(
            build_bars2d(&[], BarMode::Group, &[], &Palette::default()),
            crate::empty_spec()
        );
    }
}
