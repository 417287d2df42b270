// Copyright 2025 the Ridgeline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Aggregated series and the dataset that orders them.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use crate::aggregate::SortOrder;
use crate::record::Record;

/// One named, time-ordered sequence of records.
#[derive(Clone, Debug, PartialEq)]
pub struct Series {
    /// Series name shared by every record.
    pub key: String,
    /// Records in ascending timestamp order.
    pub values: Vec<Record>,
    /// Sum of every finite value.
    pub total: f64,
}

impl Series {
    /// Builds a series, sorting `values` by timestamp before summing.
    ///
    /// The sort is stable, so records sharing a timestamp keep their input order.
    pub fn new(key: impl Into<String>, mut values: Vec<Record>) -> Self {
        values.sort_by_key(|r| r.timestamp);
        let total = values
            .iter()
            .map(|r| r.value)
            .filter(|v| v.is_finite())
            .sum();
        Self {
            key: key.into(),
            values,
            total,
        }
    }

    /// Returns the largest finite value, if any.
    pub fn max_value(&self) -> Option<f64> {
        self.values
            .iter()
            .map(|r| r.value)
            .filter(|v| v.is_finite())
            .reduce(f64::max)
    }

    /// Returns the first and last timestamps.
    pub fn extent(&self) -> Option<(i64, i64)> {
        Some((self.values.first()?.timestamp, self.values.last()?.timestamp))
    }
}

/// Series ordered by total for presentation.
///
/// A dataset is produced by [`crate::aggregate`] and is read-only afterwards.
#[derive(Clone, Debug, PartialEq)]
pub struct Dataset {
    series: Vec<Series>,
    order: SortOrder,
}

impl Dataset {
    pub(crate) fn from_sorted(series: Vec<Series>, order: SortOrder) -> Self {
        Self { series, order }
    }

    /// Returns the series in presentation order.
    pub fn series(&self) -> &[Series] {
        &self.series
    }

    /// Returns the number of series.
    pub fn len(&self) -> usize {
        self.series.len()
    }

    /// Returns `true` if there are no series.
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Returns the order the series are sorted in.
    pub fn order(&self) -> SortOrder {
        self.order
    }

    /// Looks up a series by key.
    pub fn get(&self, key: &str) -> Option<&Series> {
        self.series.iter().find(|s| s.key == key)
    }

    /// Iterates every record, series by series, in presentation order.
    pub fn records(&self) -> impl Iterator<Item = &Record> + '_ {
        self.series.iter().flat_map(|s| s.values.iter())
    }

    /// Returns the largest finite value across all series.
    pub fn max_value(&self) -> Option<f64> {
        self.series
            .iter()
            .filter_map(Series::max_value)
            .reduce(f64::max)
    }

    /// Returns the time extent of the first series in presentation order.
    pub fn reference_extent(&self) -> Option<(i64, i64)> {
        self.series.first()?.extent()
    }

    /// Returns the min/max timestamp over every drawable record.
    ///
    /// Falls back to all records when none has a drawable value.
    pub fn global_extent(&self) -> Option<(i64, i64)> {
        let extent = |defined_only: bool| {
            self.records()
                .filter(|r| !defined_only || r.is_defined())
                .fold(None, |acc: Option<(i64, i64)>, r| match acc {
                    None => Some((r.timestamp, r.timestamp)),
                    Some((lo, hi)) => Some((lo.min(r.timestamp), hi.max(r.timestamp))),
                })
        };
        extent(true).or_else(|| extent(false))
    }
}
