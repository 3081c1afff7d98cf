//! pd_core — Core types, domains, ordering helpers, and deterministic RNG.
//!
//! This crate is **I/O-free**. It defines stable types/APIs used across the
//! dashboard workspace (`pd_store`, `pd_grid`, `pd_charts`, `pd_pipeline`,
//! `pd_cli`).
//!
//! - Observations: `Record` (one year × pathogen test-result count)
//! - Grid domains: `DensityPolicy`, `GridOrder`
//! - Session domains: `Selection` (ordered, capped), `YearFilter`
//! - Seedable RNG (ChaCha20) for **synthetic sample data only**

#![forbid(unsafe_code)]

pub mod errors {
    use std::fmt;

    /// Minimal error set for core-domain validation.
    #[derive(Clone, Debug, Eq, PartialEq)]
    pub enum CoreError {
        EmptyPathogenName,
        SelectionFull,
    }

    impl fmt::Display for CoreError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match self {
                CoreError::EmptyPathogenName => write!(f, "empty pathogen name"),
                CoreError::SelectionFull => write!(f, "selection is at capacity"),
            }
        }
    }

    impl std::error::Error for CoreError {}
}

pub mod record {
    //! One observation per (year, pathogen) cell. `total` is always derived.

    use serde::{Deserialize, Serialize};

    /// A single test-result observation. An `Unknown` count may exist in
    /// source documents; it is forced to 0 on ingest and never carried here.
    #[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
    pub struct Record {
        pub year: i32,
        pub pathogen: String,
        pub positive: u64,
        pub negative: u64,
    }

    impl Record {
        pub fn new(year: i32, pathogen: impl Into<String>, positive: u64, negative: u64) -> Self {
            Self { year, pathogen: pathogen.into(), positive, negative }
        }

        /// Synthesized gap-fill cell: both counts zero.
        pub fn zero(year: i32, pathogen: impl Into<String>) -> Self {
            Self::new(year, pathogen, 0, 0)
        }

        /// Invariant: `total == positive + negative`, at every stage.
        #[inline]
        pub fn total(&self) -> u64 {
            self.positive + self.negative
        }

        #[inline]
        pub fn is_zero(&self) -> bool {
            self.positive == 0 && self.negative == 0
        }
    }
}

pub mod policy {
    //! Gap-filling density policies for grid completion.

    use serde::{Deserialize, Serialize};

    /// Which (year, pathogen) pairs get zero-filled vs. omitted.
    #[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "kebab-case")]
    pub enum DensityPolicy {
        /// Zero-fill every pair in `years(all) × pathogens(all)`.
        #[default]
        FullRectangle,
        /// Zero-fill only within each pathogen's own observed
        /// `[min_year, max_year]`; years outside the span are absent.
        PerPathogenSpan,
    }
}

pub mod order {
    //! Stable ordering helpers for grids and display axes.

    use crate::record::Record;
    use std::cmp::Ordering;

    /// Lexicographic orderings a consumer can request from a grid.
    /// A pure function of the grid, not a stored attribute.
    #[derive(Clone, Copy, Debug, Eq, PartialEq)]
    pub enum GridOrder {
        YearThenPathogen,
        PathogenThenYear,
    }

    pub fn cmp_records(a: &Record, b: &Record, order: GridOrder) -> Ordering {
        match order {
            GridOrder::YearThenPathogen => (a.year, a.pathogen.as_str())
                .cmp(&(b.year, b.pathogen.as_str())),
            GridOrder::PathogenThenYear => (a.pathogen.as_str(), a.year)
                .cmp(&(b.pathogen.as_str(), b.year)),
        }
    }

    pub fn sort_records(records: &mut [Record], order: GridOrder) {
        records.sort_by(|a, b| cmp_records(a, b, order));
    }
}

pub mod selection {
    //! User's ordered, capped choice of pathogens to display.

    use crate::errors::CoreError;
    use serde::{Deserialize, Serialize};

    /// Hard cap on simultaneously displayed pathogens.
    pub const MAX_SELECTED: usize = 18;

    /// Ordered, duplicate-free pathogen selection. Insertion order is
    /// display order; reordering only happens via explicit moves.
    #[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
    pub struct Selection {
        names: Vec<String>,
    }

    impl Selection {
        pub fn new() -> Self {
            Self::default()
        }

        /// Build from an iterator, dropping duplicates and anything past
        /// the cap.
        pub fn from_names<I, S>(names: I) -> Self
        where
            I: IntoIterator<Item = S>,
            S: Into<String>,
        {
            let mut sel = Self::new();
            for n in names {
                sel.add(n.into());
            }
            sel
        }

        /// Append a pathogen. Duplicate or at-capacity adds are no-ops;
        /// returns whether the selection changed.
        pub fn add(&mut self, name: impl Into<String>) -> bool {
            matches!(self.try_add(name), Ok(true))
        }

        /// Append a pathogen, reporting why an add was refused. Duplicates
        /// are idempotent (`Ok(false)`); blank names and adds past the cap
        /// are errors.
        pub fn try_add(&mut self, name: impl Into<String>) -> Result<bool, CoreError> {
            let name = name.into();
            if name.trim().is_empty() {
                return Err(CoreError::EmptyPathogenName);
            }
            if self.names.contains(&name) {
                return Ok(false);
            }
            if self.names.len() >= MAX_SELECTED {
                return Err(CoreError::SelectionFull);
            }
            self.names.push(name);
            Ok(true)
        }

        /// Remove a pathogen; returns whether it was present.
        pub fn remove(&mut self, name: &str) -> bool {
            match self.names.iter().position(|n| n == name) {
                Some(i) => {
                    self.names.remove(i);
                    true
                }
                None => false,
            }
        }

        /// Swap the entry at `index` one step toward the front.
        pub fn move_up(&mut self, index: usize) {
            if index > 0 && index < self.names.len() {
                self.names.swap(index - 1, index);
            }
        }

        /// Swap the entry at `index` one step toward the back.
        pub fn move_down(&mut self, index: usize) {
            if index + 1 < self.names.len() {
                self.names.swap(index, index + 1);
            }
        }

        pub fn contains(&self, name: &str) -> bool {
            self.names.iter().any(|n| n == name)
        }

        pub fn len(&self) -> usize {
            self.names.len()
        }

        pub fn is_empty(&self) -> bool {
            self.names.is_empty()
        }

        pub fn names(&self) -> &[String] {
            &self.names
        }

        /// Names to actually display. An empty selection substitutes the
        /// first pathogen alphabetically from `available` so a render never
        /// sees an empty selection.
        pub fn effective(&self, available: &[String]) -> Vec<String> {
            if !self.names.is_empty() {
                return self.names.clone();
            }
            let mut fallback: Vec<String> = available.to_vec();
            fallback.sort();
            fallback.truncate(1);
            fallback
        }

        /// Display order for an axis: selected names first (in selection
        /// order, restricted to those present in the data), then any
        /// remaining data pathogens in sorted order.
        pub fn display_order(&self, present: &[String]) -> Vec<String> {
            let mut out: Vec<String> = self
                .names
                .iter()
                .filter(|n| present.contains(n))
                .cloned()
                .collect();
            let mut rest: Vec<String> = present
                .iter()
                .filter(|p| !out.contains(p))
                .cloned()
                .collect();
            rest.sort();
            out.extend(rest);
            out
        }
    }
}

pub mod filter {
    //! Inclusive year-range filter, clamped to the observed data range.

    use serde::{Deserialize, Serialize};

    #[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
    pub struct YearFilter {
        pub min: i32,
        pub max: i32,
    }

    impl YearFilter {
        /// Normalize bounds (`min ≤ max`) without clamping.
        pub fn new(min: i32, max: i32) -> Self {
            if min <= max { Self { min, max } } else { Self { min: max, max: min } }
        }

        /// Clamp the requested range to the data's observed `[lo, hi]`.
        pub fn clamped(min: i32, max: i32, lo: i32, hi: i32) -> Self {
            let f = Self::new(min, max);
            Self {
                min: f.min.clamp(lo, hi),
                max: f.max.clamp(lo, hi),
            }
        }

        #[inline]
        pub fn contains(&self, year: i32) -> bool {
            self.min <= year && year <= self.max
        }

        /// Number of years covered, inclusive. Wide enough for the full
        /// `i32` range, so extreme bounds cannot overflow.
        pub fn span(&self) -> u64 {
            u64::from(self.max.abs_diff(self.min)) + 1
        }
    }
}

pub mod rng {
    //! Seeded RNG for **synthetic sample data only** (no OS entropy).

    use rand_chacha::ChaCha20Rng;
    use rand_core::{RngCore, SeedableRng};

    /// Newtype over ChaCha20Rng so sample generation is reproducible
    /// from an integer seed.
    pub struct SampleRng(ChaCha20Rng);

    impl SampleRng {
        pub fn from_seed(seed: u64) -> Self {
            let mut bytes = [0u8; 32];
            bytes[..8].copy_from_slice(&seed.to_le_bytes());
            SampleRng(ChaCha20Rng::from_seed(bytes))
        }

        /// Uniform f64 in `[0, 1)`.
        pub fn next_unit(&mut self) -> f64 {
            // 53 bits of mantissa, the standard conversion.
            (self.0.next_u64() >> 11) as f64 / (1u64 << 53) as f64
        }
    }

    impl Default for SampleRng {
        fn default() -> Self {
            Self::from_seed(0)
        }
    }
}

pub use errors::CoreError;
pub use filter::YearFilter;
pub use order::{cmp_records, sort_records, GridOrder};
pub use policy::DensityPolicy;
pub use record::Record;
pub use selection::{Selection, MAX_SELECTED};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_is_derived_sum() {
        let r = Record::new(2020, "A", 10, 5);
        assert_eq!(r.total(), 15);
        assert!(!r.is_zero());
        assert!(Record::zero(2020, "A").is_zero());
    }

    #[test]
    fn selection_caps_at_18() {
        let mut sel = Selection::new();
        for i in 0..MAX_SELECTED {
            assert!(sel.add(format!("p{i:02}")));
        }
        assert_eq!(sel.len(), MAX_SELECTED);
        // 19th insert is a no-op.
        assert!(!sel.add("p18"));
        assert_eq!(sel.len(), MAX_SELECTED);
        assert!(!sel.contains("p18"));
    }

    #[test]
    fn try_add_reports_why_an_add_was_refused() {
        let mut sel = Selection::new();
        assert_eq!(sel.try_add(""), Err(CoreError::EmptyPathogenName));
        assert_eq!(sel.try_add("Brucella"), Ok(true));
        assert_eq!(sel.try_add("Brucella"), Ok(false));
        for i in 0..MAX_SELECTED {
            let _ = sel.try_add(format!("p{i:02}"));
        }
        assert_eq!(sel.try_add("overflow"), Err(CoreError::SelectionFull));
    }

    #[test]
    fn selection_rejects_duplicates() {
        let mut sel = Selection::new();
        assert!(sel.add("Brucella"));
        assert!(!sel.add("Brucella"));
        assert_eq!(sel.len(), 1);
    }

    #[test]
    fn selection_reorders_by_explicit_moves() {
        let mut sel = Selection::from_names(["a", "b", "c"]);
        sel.move_up(2);
        assert_eq!(sel.names(), &["a", "c", "b"]);
        sel.move_down(0);
        assert_eq!(sel.names(), &["c", "a", "b"]);
        // Out-of-range moves are no-ops.
        sel.move_up(0);
        sel.move_down(2);
        assert_eq!(sel.names(), &["c", "a", "b"]);
    }

    #[test]
    fn empty_selection_substitutes_first_alphabetical() {
        let sel = Selection::new();
        let avail = vec!["Yersinia".to_string(), "Brucella".to_string()];
        assert_eq!(sel.effective(&avail), vec!["Brucella".to_string()]);
    }

    #[test]
    fn display_order_is_selection_first_then_sorted_rest() {
        let sel = Selection::from_names(["c", "a", "zz"]); // "zz" not in data
        let present = vec!["a".to_string(), "b".to_string(), "c".to_string(), "d".to_string()];
        assert_eq!(
            sel.display_order(&present),
            vec!["c".to_string(), "a".to_string(), "b".to_string(), "d".to_string()]
        );
    }

    #[test]
    fn year_filter_clamps_to_observed_range() {
        let f = YearFilter::clamped(1990, 2050, 2018, 2023);
        assert_eq!((f.min, f.max), (2018, 2023));
        assert_eq!(f.span(), 6);
        // Reversed bounds normalize.
        let g = YearFilter::new(2022, 2019);
        assert_eq!((g.min, g.max), (2019, 2022));
    }

    #[test]
    fn year_filter_span_covers_extreme_bounds() {
        let f = YearFilter::new(i32::MIN, i32::MAX);
        assert_eq!(f.span(), 1 << 32);
        assert_eq!(YearFilter::new(2020, 2020).span(), 1);
    }

    #[test]
    fn grid_order_is_a_pure_view() {
        let mut recs = vec![
            Record::new(2021, "a", 1, 0),
            Record::new(2020, "b", 1, 0),
            Record::new(2020, "a", 1, 0),
        ];
        sort_records(&mut recs, GridOrder::YearThenPathogen);
        assert_eq!((recs[0].year, recs[0].pathogen.as_str()), (2020, "a"));
        sort_records(&mut recs, GridOrder::PathogenThenYear);
        assert_eq!((recs[1].year, recs[1].pathogen.as_str()), (2021, "a"));
    }

    #[test]
    fn sample_rng_is_reproducible() {
        let mut a = rng::SampleRng::from_seed(7);
        let mut b = rng::SampleRng::from_seed(7);
        for _ in 0..8 {
            assert_eq!(a.next_unit().to_bits(), b.next_unit().to_bits());
        }
        let x = rng::SampleRng::from_seed(7).next_unit();
        assert!((0.0..1.0).contains(&x));
    }
}
