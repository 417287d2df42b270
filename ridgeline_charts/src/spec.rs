// Copyright 2025 the Ridgeline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chart configuration and the build entry points.

use ridgeline_transforms::{Dataset, Record, SortOrder, aggregate};

use crate::animation::StageTimings;
use crate::axis::AxisStyle;
use crate::error::{ChartError, ConfigError};
use crate::horizon::HorizonChart;
use crate::layout::{LayoutConstants, Margins, RidgeLayout};
use crate::palette::SequentialScheme;
use crate::scale::{Scales, TimeDomainMode};

/// Everything needed to turn records into an animated horizon chart.
#[derive(Clone, Debug, PartialEq)]
pub struct RidgeHorizonSpec {
    /// Band count, row height and margins.
    pub constants: LayoutConstants,
    /// Presentation order of series by total.
    pub order: SortOrder,
    /// Band color scheme.
    pub scheme: SequentialScheme,
    /// How the shared time domain is derived.
    pub time_domain: TimeDomainMode,
    /// Stage durations and delays.
    pub timings: StageTimings,
    /// Series label font size.
    pub label_font_size: f64,
    /// Time axis styling.
    pub axis: AxisStyle,
}

impl Default for RidgeHorizonSpec {
    fn default() -> Self {
        Self::ascending()
    }
}

impl RidgeHorizonSpec {
    /// Smallest series on top: five bands, 15px rows, room for labels on the left.
    pub fn ascending() -> Self {
        Self {
            constants: LayoutConstants::preset(5, 15.0, Margins::new(0.0, 16.0, 32.0, 112.0)),
            order: SortOrder::Asc,
            scheme: SequentialScheme::OrRd,
            time_domain: TimeDomainMode::Global,
            timings: StageTimings::default(),
            label_font_size: 10.0,
            axis: AxisStyle::default(),
        }
    }

    /// Largest series on top, with slightly taller rows and wider label room.
    pub fn descending() -> Self {
        Self {
            constants: LayoutConstants::preset(5, 17.0, Margins::new(8.0, 16.0, 32.0, 128.0)),
            order: SortOrder::Desc,
            ..Self::ascending()
        }
    }

    /// Sets the layout constants.
    pub fn with_constants(mut self, constants: LayoutConstants) -> Self {
        self.constants = constants;
        self
    }

    /// Sets the presentation order.
    pub fn with_order(mut self, order: SortOrder) -> Self {
        self.order = order;
        self
    }

    /// Sets the band color scheme.
    pub fn with_scheme(mut self, scheme: SequentialScheme) -> Self {
        self.scheme = scheme;
        self
    }

    /// Sets the time domain mode.
    pub fn with_time_domain(mut self, time_domain: TimeDomainMode) -> Self {
        self.time_domain = time_domain;
        self
    }

    /// Sets the animation timings.
    pub fn with_timings(mut self, timings: StageTimings) -> Self {
        self.timings = timings;
        self
    }

    /// Sets the series label font size.
    pub fn with_label_font_size(mut self, size: f64) -> Self {
        self.label_font_size = size;
        self
    }

    /// Sets the time axis style.
    pub fn with_axis(mut self, axis: AxisStyle) -> Self {
        self.axis = axis;
        self
    }

    /// Checks that the scheme can color every band.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let overlap = self.constants.overlap();
        let max = self.scheme.max_steps();
        if overlap > max {
            return Err(ConfigError::OverlapExceedsScheme { overlap, max });
        }
        Ok(())
    }

    /// Aggregates records into a dataset in this spec's order.
    pub fn prepare(
        &self,
        records: impl IntoIterator<Item = Record>,
    ) -> Result<Dataset, ChartError> {
        Ok(aggregate(records, self.order)?)
    }

    /// Lays out and builds the chart scene for `dataset` at `available_width`.
    pub fn build(&self, dataset: &Dataset, available_width: f64) -> Result<HorizonChart, ChartError> {
        self.validate()?;
        if dataset.is_empty() {
            return Err(ChartError::EmptyDataset);
        }
        let layout = RidgeLayout::arrange(&self.constants, available_width, dataset.len());
        let scales = Scales::new(dataset, &self.constants, layout.width, self.time_domain);
        HorizonChart::assemble(self, dataset, layout, scales)
    }
}
