//! Grid completion: reconstruct a dense (year × pathogen) grid from sparse
//! records, zero-filling gaps per the chosen density policy.
//!
//! Duplicate (year, pathogen) inputs are resolved deterministically:
//! **later entries overwrite** earlier ones.

use pd_core::{sort_records, DensityPolicy, GridOrder, Record, YearFilter};
use std::collections::{BTreeMap, BTreeSet};

/// Distinct years present in `records`, ascending.
pub fn distinct_years(records: &[Record]) -> Vec<i32> {
    let set: BTreeSet<i32> = records.iter().map(|r| r.year).collect();
    set.into_iter().collect()
}

/// Distinct pathogen names present in `records`, ascending.
pub fn distinct_pathogens(records: &[Record]) -> Vec<String> {
    let set: BTreeSet<&str> = records.iter().map(|r| r.pathogen.as_str()).collect();
    set.into_iter().map(str::to_string).collect()
}

/// Complete a sparse record list into a dense grid.
///
/// - `FullRectangle`: one record for every (year, pathogen) pair in the
///   cross product of observed years and pathogens; absent cells become
///   zero records.
/// - `PerPathogenSpan`: zero-fill only inside each pathogen's own observed
///   `[min_year, max_year]`; years outside a pathogen's span are omitted
///   for that pathogen, not zero-filled.
///
/// Output is sorted (year, pathogen). An empty input yields an empty grid.
pub fn complete_grid(records: &[Record], policy: DensityPolicy) -> Vec<Record> {
    // Index by (year, pathogen); later duplicates overwrite.
    let mut index: BTreeMap<(i32, &str), &Record> = BTreeMap::new();
    for r in records {
        index.insert((r.year, r.pathogen.as_str()), r);
    }

    let years = distinct_years(records);
    let pathogens = distinct_pathogens(records);

    let mut out: Vec<Record> = Vec::new();
    match policy {
        DensityPolicy::FullRectangle => {
            out.reserve(years.len() * pathogens.len());
            for &year in &years {
                for pathogen in &pathogens {
                    match index.get(&(year, pathogen.as_str())) {
                        Some(r) => out.push((*r).clone()),
                        None => out.push(Record::zero(year, pathogen.clone())),
                    }
                }
            }
        }
        DensityPolicy::PerPathogenSpan => {
            // Per-pathogen observed spans.
            let mut spans: BTreeMap<&str, (i32, i32)> = BTreeMap::new();
            for r in records {
                spans
                    .entry(r.pathogen.as_str())
                    .and_modify(|(lo, hi)| {
                        *lo = (*lo).min(r.year);
                        *hi = (*hi).max(r.year);
                    })
                    .or_insert((r.year, r.year));
            }
            // Every year inside a span is filled, including years no
            // pathogen observed at all.
            for (&pathogen, &(lo, hi)) in &spans {
                for year in lo..=hi {
                    match index.get(&(year, pathogen)) {
                        Some(r) => out.push((*r).clone()),
                        None => out.push(Record::zero(year, pathogen)),
                    }
                }
            }
            sort_records(&mut out, GridOrder::YearThenPathogen);
        }
    }
    out
}

/// Restrict a grid to the filter's year range and the given pathogen set,
/// preserving grid order.
pub fn filter_grid(grid: &[Record], filter: &YearFilter, pathogens: &[String]) -> Vec<Record> {
    grid.iter()
        .filter(|r| filter.contains(r.year) && pathogens.iter().any(|p| p == &r.pathogen))
        .cloned()
        .collect()
}
