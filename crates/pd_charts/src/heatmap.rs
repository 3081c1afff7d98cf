//! Pathogen × year heatmap: a zero-filled matrix of one value field,
//! cells summed when the input carries several rows per cell.

use crate::spec::{ChartSpec, HeatmapSpec, ValueField};
use pd_core::Record;
use pd_grid::distinct_years;
use std::collections::BTreeMap;

pub fn build_heatmap(grid: &[Record], field: ValueField, row_order: &[String]) -> ChartSpec {
    if grid.is_empty() {
        return crate::empty_spec();
    }

    let years = distinct_years(grid);
    let pathogens = crate::display_order(grid, row_order);

    let pick = |r: &Record| match field {
        ValueField::Positive => r.positive,
        ValueField::Negative => r.negative,
        ValueField::Total => r.total(),
    };

    let mut cells: BTreeMap<(&str, i32), u64> = BTreeMap::new();
    for r in grid {
        *cells.entry((r.pathogen.as_str(), r.year)).or_insert(0) += pick(r);
    }

    let values: Vec<Vec<u64>> = pathogens
        .iter()
        .map(|pathogen| {
            years
                .iter()
                .map(|&year| cells.get(&(pathogen.as_str(), year)).copied().unwrap_or(0))
                .collect()
        })
        .collect();

    ChartSpec::Heatmap(HeatmapSpec { field, years, pathogens, values })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unwrap_heatmap(spec: ChartSpec) -> HeatmapSpec {
        match spec {
            ChartSpec::Heatmap(s) => s,
            other => panic!("expected heatmap, got {other:?}"),
        }
    }

    #[test]
    fn matrix_is_zero_filled_and_summed() {
        let grid = vec![
            Record::new(2020, "A", 10, 5),
            Record::new(2021, "A", 3, 7),
            Record::new(2020, "B", 0, 0),
            Record::new(2021, "B", 0, 0),
        ];
        let s = unwrap_heatmap(build_heatmap(&grid, ValueField::Total, &[]));
        assert_eq!(s.years, vec![2020, 2021]);
        assert_eq!(s.pathogens, vec!["A", "B"]);
        assert_eq!(s.values, vec![vec![15, 10], vec![0, 0]]);
    }

    #[test]
    fn field_selects_which_count_is_plotted() {
        let grid = vec![Record::new(2020, "A", 10, 5)];
        let pos = unwrap_heatmap(build_heatmap(&grid, ValueField::Positive, &[]));
        assert_eq!(pos.values, vec![vec![10]]);
        let neg = unwrap_heatmap(build_heatmap(&grid, ValueField::Negative, &[]));
        assert_eq!(neg.values, vec![vec![5]]);
    }

    #[test]
    fn duplicate_cells_sum() {
        let grid = vec![
            Record::new(2020, "A", 10, 5),
            Record::new(2020, "A", 1, 1),
        ];
        let s = unwrap_heatmap(build_heatmap(&grid, ValueField::Total, &[]));
        assert_eq!(s.values, vec![vec![17]]);
    }

    #[test]
    fn row_order_puts_listed_pathogens_first() {
        let grid = vec![
            Record::new(2020, "A", 1, 0),
            Record::new(2020, "B", 2, 0),
            Record::new(2020, "C", 3, 0),
        ];
        let order = vec!["C".to_string(), "A".to_string()];
        let s = unwrap_heatmap(build_heatmap(&grid, ValueField::Positive, &order));
        assert_eq!(s.pathogens, vec!["C", "A", "B"]);
        assert_eq!(s.values, vec![vec![3], vec![1], vec![2]]);
    }

    #[test]
    fn empty_grid_yields_empty_artifact() {
        assert_eq!(build_heatmap(&[], ValueField::Total, &[]), crate::empty_spec());
    }
}
