// Copyright 2025 the Ridgeline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Grouping records into ordered series.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use hashbrown::HashMap;

use crate::record::Record;
use crate::series::{Dataset, Series};

/// Sorting order for series totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    /// Smallest total first.
    #[default]
    Asc,
    /// Largest total first.
    Desc,
}

/// Errors returned by [`aggregate`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum AggregateError {
    /// There were no records, so there is no series to lay out.
    #[error("no records to aggregate")]
    EmptyInput,
}

/// Groups records by name into a [`Dataset`].
///
/// - Groups keep first-seen order until the final sort.
/// - Each group is sorted by timestamp, then totalled over its finite values.
/// - Groups are stably sorted by total in `order`, so equal totals keep first-seen order.
///
/// Aggregating the flattened records of an aggregated dataset reproduces it exactly.
pub fn aggregate(
    records: impl IntoIterator<Item = Record>,
    order: SortOrder,
) -> Result<Dataset, AggregateError> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<(String, Vec<Record>)> = Vec::new();

    for record in records {
        if let Some(&i) = index.get(record.name.as_str()) {
            groups[i].1.push(record);
            continue;
        }
        index.insert(record.name.clone(), groups.len());
        groups.push((record.name.clone(), alloc::vec![record]));
    }

    if groups.is_empty() {
        return Err(AggregateError::EmptyInput);
    }

    let mut series: Vec<Series> = groups
        .into_iter()
        .map(|(key, values)| Series::new(key, values))
        .collect();

    match order {
        SortOrder::Asc => series.sort_by(|a, b| a.total.total_cmp(&b.total)),
        SortOrder::Desc => series.sort_by(|a, b| b.total.total_cmp(&a.total)),
    }

    tracing::debug!(series = series.len(), ?order, "aggregated records");
    Ok(Dataset::from_sorted(series, order))
}
