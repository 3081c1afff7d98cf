//! Donut chart of the filtered totals. The mode is data-shape-driven: one
//! pathogen (or none) compares outcomes, several pathogens compare
//! pathogens. Both modes share the grand total in the center annotation.

use crate::spec::{ChartSpec, PieMode, PieSlice, PieSpec};
use crate::style::Palette;
use pd_core::Record;
use pd_grid::{aggregate_by_pathogen, distinct_pathogens};

const HOLE: f64 = 0.4;
const POSITIVE_PULL: f64 = 0.05;

pub fn build_pie(grid: &[Record], pathogen_order: &[String], palette: &Palette) -> ChartSpec {
    if grid.is_empty() {
        return crate::empty_spec();
    }

    let total_positive: u64 = grid.iter().map(|r| r.positive).sum();
    let total_negative: u64 = grid.iter().map(|r| r.negative).sum();
    let grand_total = total_positive + total_negative;

    let spec = if distinct_pathogens(grid).len() <= 1 {
        PieSpec {
            mode: PieMode::Outcome,
            hole: HOLE,
            slices: vec![
                PieSlice {
                    label: "Positive".to_string(),
                    value: total_positive,
                    color: Some(palette.positive.clone()),
                    pull: POSITIVE_PULL,
                },
                PieSlice {
                    label: "Negative".to_string(),
                    value: total_negative,
                    color: Some(palette.negative.clone()),
                    pull: 0.0,
                },
            ],
            annotation: Some(format!("Total: {grand_total}")),
        }
    } else {
        let totals = aggregate_by_pathogen(grid);
        let slices = crate::display_order(grid, pathogen_order)
            .into_iter()
            .map(|pathogen| {
                let value = totals
                    .iter()
                    .find(|row| row.pathogen == pathogen)
                    .map_or(0, |row| row.total);
                PieSlice { label: pathogen, value, color: None, pull: 0.0 }
            })
            .collect();
        PieSpec {
            mode: PieMode::PerPathogen,
            hole: HOLE,
            slices,
            annotation: Some(format!("Total: {grand_total}")),
        }
    };

    ChartSpec::Pie(spec)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unwrap_pie(spec: ChartSpec) -> PieSpec {
        match spec {
            ChartSpec::Pie(s) => s,
            other => panic!("expected pie, got {other:?}"),
        }
    }

    #[test]
    fn single_pathogen_compares_outcomes() {
        let grid = vec![
            Record::new(2020, "A", 10, 5),
            Record::new(2021, "A", 3, 7),
        ];
        let s = unwrap_pie(build_pie(&grid, &[], &Palette::default()));
        assert_eq!(s.mode, PieMode::Outcome);
        assert_eq!(s.hole, 0.4);
        assert_eq!(s.slices.len(), 2);
        assert_eq!((s.slices[0].label.as_str(), s.slices[0].value), ("Positive", 13));
        assert_eq!(s.slices[0].pull, 0.05);
        assert_eq!((s.slices[1].label.as_str(), s.slices[1].value), ("Negative", 12));
        assert_eq!(s.slices[1].pull, 0.0);
        assert_eq!(s.annotation.as_deref(), Some("Total: 25"));
    }

    #[test]
    fn two_pathogens_switch_to_per_pathogen_slices() {
        let grid = vec![
            Record::new(2020, "A", 10, 5),
            Record::new(2020, "B", 3, 7),
        ];
        let s = unwrap_pie(build_pie(&grid, &[], &Palette::default()));
        assert_eq!(s.mode, PieMode::PerPathogen);
        assert_eq!(s.slices.len(), 2);
        assert_eq!((s.slices[0].label.as_str(), s.slices[0].value), ("A", 15));
        assert_eq!((s.slices[1].label.as_str(), s.slices[1].value), ("B", 10));
        // Same grand total either way.
        assert_eq!(s.annotation.as_deref(), Some("Total: 25"));
    }

    #[test]
    fn per_pathogen_slices_follow_display_order() {
        let grid = vec![
            Record::new(2020, "A", 1, 0),
            Record::new(2020, "B", 2, 0),
        ];
        let order = vec!["B".to_string()];
        let s = unwrap_pie(build_pie(&grid, &order, &Palette::default()));
        assert_eq!(s.slices[0].label, "B");
    }

    #[test]
    fn empty_grid_yields_empty_artifact() {
        assert_eq!(build_pie(&[], &[], &Palette::default()), crate::empty_spec());
    }
}
