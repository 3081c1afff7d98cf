//! CSV export/import for record lists.
//!
//! The column layout matches the legacy download format exactly:
//! `Year,Pathogen,Positive,Negative,Unknown`. `Unknown` is always written
//! as 0 and ignored on read.

use crate::StoreResult;
use pd_core::Record;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;
use tracing::debug;

#[derive(Debug, Serialize, Deserialize)]
struct CsvRow {
    #[serde(rename = "Year")]
    year: i32,
    #[serde(rename = "Pathogen")]
    pathogen: String,
    #[serde(rename = "Positive")]
    positive: u64,
    #[serde(rename = "Negative")]
    negative: u64,
    #[serde(rename = "Unknown", default)]
    unknown: u64,
}

/// Write records as CSV with the legacy header.
pub fn write_csv(path: impl AsRef<Path>, records: &[Record]) -> StoreResult<()> {
    let path = path.as_ref();
    let file = File::create(path)?;
    let mut writer = csv::Writer::from_writer(BufWriter::new(file));
    for r in records {
        writer.serialize(CsvRow {
            year: r.year,
            pathogen: r.pathogen.clone(),
            positive: r.positive,
            negative: r.negative,
            unknown: 0,
        })?;
    }
    writer.flush()?;
    debug!(count = records.len(), path = %path.display(), "wrote csv export");
    Ok(())
}

/// Read records from a CSV written by [`write_csv`] (or the legacy app).
pub fn read_csv(path: impl AsRef<Path>) -> StoreResult<Vec<Record>> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let mut reader = csv::Reader::from_reader(BufReader::new(file));
    let mut records = Vec::new();
    for row in reader.deserialize::<CsvRow>() {
        let row = row?;
        records.push(Record::new(row.year, row.pathogen, row.positive, row.negative));
    }
    debug!(count = records.len(), path = %path.display(), "read csv export");
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_round_trip_preserves_records() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("export.csv");
        let records = vec![
            Record::new(2020, "Brucella", 3, 9),
            Record::new(2021, "SARS-CoV2", 120, 40),
        ];
        write_csv(&path, &records).unwrap();
        assert_eq!(read_csv(&path).unwrap(), records);
    }

    #[test]
    fn header_matches_the_legacy_download_format() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("export.csv");
        write_csv(&path, &[Record::new(2020, "A", 1, 2)]).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("Year,Pathogen,Positive,Negative,Unknown"));
        assert_eq!(lines.next(), Some("2020,A,1,2,0"));
    }

    #[test]
    fn reader_tolerates_a_missing_unknown_column() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("legacy.csv");
        std::fs::write(&path, "Year,Pathogen,Positive,Negative\n2019,Coxiella,4,6\n").unwrap();
        let records = read_csv(&path).unwrap();
        assert_eq!(records, vec![Record::new(2019, "Coxiella", 4, 6)]);
    }
}
