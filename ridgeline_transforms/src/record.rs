// Copyright 2025 the Ridgeline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Raw rows and the typed records derived from them.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

/// One unparsed input row, as read from the weekly traffic table.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RawRow {
    /// Series name.
    pub name: String,
    /// Bucket start in epoch seconds.
    pub date: String,
    /// First traffic component.
    pub total_1: String,
    /// Second traffic component.
    pub total_2: String,
}

impl RawRow {
    /// Creates a raw row from anything string-like.
    pub fn new(
        name: impl Into<String>,
        date: impl Into<String>,
        total_1: impl Into<String>,
        total_2: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            date: date.into(),
            total_1: total_1.into(),
            total_2: total_2.into(),
        }
    }
}

/// A typed observation: one series value at one instant.
#[derive(Clone, Debug, PartialEq)]
pub struct Record {
    /// Series name.
    pub name: String,
    /// Bucket start in epoch milliseconds.
    pub timestamp: i64,
    /// Combined value; `NaN` when either component is not numeric.
    pub value: f64,
}

impl Record {
    /// Creates a record.
    pub fn new(name: impl Into<String>, timestamp: i64, value: f64) -> Self {
        Self {
            name: name.into(),
            timestamp,
            value,
        }
    }

    /// Returns `true` if the value can be drawn.
    pub fn is_defined(&self) -> bool {
        self.value.is_finite()
    }
}

/// Coerces a table cell to a number.
///
/// Surrounding whitespace is ignored and an empty cell reads as `0`. Anything else
/// that does not parse as a finite float becomes `NaN`, including `inf` spellings
/// and literals too large for an `f64`.
pub fn coerce_number(cell: &str) -> f64 {
    let cell = cell.trim();
    if cell.is_empty() {
        return 0.0;
    }
    cell.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(f64::NAN)
}

/// Converts one raw row into a [`Record`].
///
/// `date` is read as epoch seconds and scaled to milliseconds. The value is the sum
/// of both components, so a single non-numeric component yields `NaN`. A row whose
/// date is not numeric keeps its name but is pinned to `timestamp = 0` with a `NaN`
/// value, so it never draws.
pub fn normalize(row: &RawRow) -> Record {
    let value = coerce_number(&row.total_1) + coerce_number(&row.total_2);
    // Two huge components can still overflow.
    let value = if value.is_finite() { value } else { f64::NAN };
    let seconds = coerce_number(&row.date);
    if !seconds.is_finite() {
        tracing::warn!(name = %row.name, date = %row.date, "row has a non-numeric date");
        return Record::new(row.name.clone(), 0, f64::NAN);
    }
    let millis = (seconds * 1000.0)
        .round()
        .clamp(i64::MIN as f64, i64::MAX as f64);
    #[allow(clippy::cast_possible_truncation, reason = "clamped to the i64 range")]
    let timestamp = millis as i64;
    Record::new(row.name.clone(), timestamp, value)
}

/// Normalizes every row in order.
pub fn normalize_rows<'a>(rows: impl IntoIterator<Item = &'a RawRow>) -> Vec<Record> {
    rows.into_iter().map(normalize).collect()
}
