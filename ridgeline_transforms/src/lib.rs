// Copyright 2025 the Ridgeline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Record normalization and series aggregation for ridgeline charts.
//!
//! This crate provides the data half of the pipeline:
//! - [`normalize`] turns raw tabular rows into typed [`Record`]s, and
//! - [`aggregate`] groups records into a [`Dataset`] of time-ordered [`Series`].
//!
//! Missing or malformed numbers are carried as `NaN` rather than rejected, so a
//! renderer can treat those points as undefined.

#![no_std]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod aggregate;
#[cfg(not(feature = "std"))]
mod float;
mod record;
mod series;

pub use aggregate::{AggregateError, SortOrder, aggregate};
pub use record::{RawRow, Record, coerce_number, normalize, normalize_rows};
pub use series::{Dataset, Series};
