// Copyright 2025 the Ridgeline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! CSV loading for weekly traffic exports.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use ridgeline_transforms::RawRow;
use serde::Deserialize;
use tracing::debug;

/// One CSV line. Missing numeric columns read as empty cells.
#[derive(Debug, Deserialize)]
struct CsvRow {
    name: String,
    #[serde(default)]
    date: String,
    #[serde(default)]
    total_1: String,
    #[serde(default)]
    total_2: String,
}

pub(crate) fn load_rows(path: &Path) -> Result<Vec<RawRow>> {
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let rows = parse_rows(file).with_context(|| format!("failed to parse {}", path.display()))?;
    debug!(rows = rows.len(), path = %path.display(), "loaded CSV");
    Ok(rows)
}

pub(crate) fn parse_rows<R: Read>(input: R) -> Result<Vec<RawRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(input);
    let mut rows = Vec::new();
    for (i, result) in reader.deserialize::<CsvRow>().enumerate() {
        // Line numbers are 1-based and skip the header.
        let row = result.with_context(|| format!("malformed record on line {}", i + 2))?;
        rows.push(RawRow::new(row.name, row.date, row.total_1, row.total_2));
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_the_four_traffic_columns() {
        let csv = "name,date,total_1,total_2\nsearch,1546732800,10,2\nmail, 1546732800 ,,3\n";
        let rows = parse_rows(csv.as_bytes()).unwrap();
        assert_eq!(
            rows,
            [
                RawRow::new("search", "1546732800", "10", "2"),
                RawRow::new("mail", "1546732800", "", "3"),
            ]
        );
    }

    #[test]
    fn extra_columns_are_ignored() {
        let csv = "date,name,total_2,total_1,note\n0,a,1,2,hello\n";
        let rows = parse_rows(csv.as_bytes()).unwrap();
        assert_eq!(rows, [RawRow::new("a", "0", "2", "1")]);
    }

    #[test]
    fn missing_name_column_is_an_error() {
        let csv = "date,total_1,total_2\n0,1,2\n";
        let err = parse_rows(csv.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("line 2"), "{err:#}");
    }

    #[test]
    fn missing_file_reports_its_path() {
        let err = load_rows(Path::new("does/not/exist.csv")).unwrap_err();
        assert!(err.to_string().contains("does/not/exist.csv"));
    }
}
