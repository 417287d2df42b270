// Copyright 2025 the Ridgeline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scales mapping data values into chart coordinates.
//!
//! A ridgeline chart needs exactly two mappings, shared by every row:
//! - a time scale from epoch milliseconds to x, and
//! - a value scale from traffic to an upward y offset from the row baseline.

extern crate alloc;

use alloc::vec::Vec;

use ridgeline_transforms::Dataset;

use crate::layout::LayoutConstants;
use crate::time;

/// A linear mapping from a continuous domain to a continuous range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleLinear {
    domain: (f64, f64),
    range: (f64, f64),
}

impl ScaleLinear {
    /// Creates a new scale mapping `domain` values to `range` values.
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// Maps a value from domain space into range space.
    ///
    /// A zero-width domain maps everything to the start of the range.
    pub fn map(&self, x: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let denom = d1 - d0;
        if denom == 0.0 {
            return r0;
        }
        let t = (x - d0) / denom;
        r0 + t * (r1 - r0)
    }

    /// Returns the configured domain.
    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    /// Returns the configured range.
    pub fn range(&self) -> (f64, f64) {
        self.range
    }
}

/// A time scale: a linear scale over epoch milliseconds with calendar ticks.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleTime {
    inner: ScaleLinear,
}

impl ScaleTime {
    /// Creates a new time scale over a millisecond domain.
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self {
            inner: ScaleLinear::new(domain, range),
        }
    }

    /// Maps a timestamp (epoch milliseconds) into range space.
    pub fn map(&self, t: f64) -> f64 {
        self.inner.map(t)
    }

    /// Returns calendar-aligned tick values (epoch milliseconds).
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let (d0, d1) = self.inner.domain();
        time::nice_time_ticks_millis(d0, d1, count)
    }

    /// Returns the configured domain.
    pub fn domain(&self) -> (f64, f64) {
        self.inner.domain()
    }

    /// Returns the configured range.
    pub fn range(&self) -> (f64, f64) {
        self.inner.range()
    }
}

/// How the shared time domain is derived from a dataset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TimeDomainMode {
    /// The true min/max over every drawable record.
    #[default]
    Global,
    /// The first and last timestamps of the first series in presentation order.
    ///
    /// Series covering a different date range are mis-scaled in this mode.
    ReferenceSeries,
}

/// The pair of scales shared by every row.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Scales {
    /// Timestamp → x, over `[0, width]`.
    pub time: ScaleTime,
    /// Value → y offset, over `[0, -overlap * row_height]`.
    pub value: ScaleLinear,
}

impl Scales {
    /// Derives both scales from a dataset.
    ///
    /// An empty dataset yields degenerate (zero-width) domains.
    pub fn new(
        dataset: &Dataset,
        constants: &LayoutConstants,
        width: f64,
        mode: TimeDomainMode,
    ) -> Self {
        let extent = match mode {
            TimeDomainMode::Global => dataset.global_extent(),
            TimeDomainMode::ReferenceSeries => dataset.reference_extent(),
        };
        let (t0, t1) = extent.unwrap_or((0, 0));
        let max = dataset.max_value().unwrap_or(0.0);
        let band_span = f64::from(constants.overlap()) * constants.row_height();
        tracing::debug!(t0, t1, max, ?mode, "derived scale domains");
        Self {
            time: ScaleTime::new((t0 as f64, t1 as f64), (0.0, width)),
            value: ScaleLinear::new((0.0, max), (0.0, -band_span)),
        }
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use ridgeline_transforms::{Record, SortOrder, aggregate};

    use super::*;
    use crate::layout::Margins;

    fn constants() -> LayoutConstants {
        LayoutConstants::new(5, 15.0, Margins::default()).unwrap()
    }

    #[test]
    fn linear_scale_maps_endpoints_to_range() {
        let s = ScaleLinear::new((0.0, 10.0), (0.0, -75.0));
        assert_eq!(s.map(0.0), 0.0);
        assert_eq!(s.map(10.0), -75.0);
        assert_eq!(s.map(5.0), -37.5);
    }

    #[test]
    fn zero_width_domain_maps_to_range_start() {
        let s = ScaleLinear::new((3.0, 3.0), (10.0, 20.0));
        assert_eq!(s.map(3.0), 10.0);
        assert_eq!(s.map(100.0), 10.0);
    }

    #[test]
    fn scales_map_domain_ends_to_chart_edges() {
        let ds = aggregate(
            vec![
                Record::new("a", 1_000, 2.0),
                Record::new("a", 5_000, 8.0),
                Record::new("b", 3_000, 4.0),
            ],
            SortOrder::Asc,
        )
        .unwrap();
        let scales = Scales::new(&ds, &constants(), 400.0, TimeDomainMode::Global);
        assert_eq!(scales.time.map(1_000.0), 0.0);
        assert_eq!(scales.time.map(5_000.0), 400.0);
        assert_eq!(scales.value.map(0.0), 0.0);
        assert_eq!(scales.value.map(8.0), -75.0);
    }

    #[test]
    fn reference_mode_uses_first_series_extent() {
        let ds = aggregate(
            vec![
                Record::new("short", 2_000, 1.0),
                Record::new("short", 3_000, 1.0),
                Record::new("long", 0, 50.0),
                Record::new("long", 9_000, 50.0),
            ],
            SortOrder::Asc,
        )
        .unwrap();
        let reference = Scales::new(&ds, &constants(), 100.0, TimeDomainMode::ReferenceSeries);
        assert_eq!(reference.time.domain(), (2_000.0, 3_000.0));
        let global = Scales::new(&ds, &constants(), 100.0, TimeDomainMode::Global);
        assert_eq!(global.time.domain(), (0.0, 9_000.0));
    }

    #[test]
    fn nan_values_do_not_affect_the_value_domain() {
        let ds = aggregate(
            vec![Record::new("a", 0, f64::NAN), Record::new("a", 1, 3.0)],
            SortOrder::Asc,
        )
        .unwrap();
        let scales = Scales::new(&ds, &constants(), 100.0, TimeDomainMode::Global);
        assert_eq!(scales.value.domain(), (0.0, 3.0));
    }
}
