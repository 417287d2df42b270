// Copyright 2025 the Ridgeline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Row stacking and chart dimensions.
//!
//! Rows are stacked top to bottom with a one-pixel gap. Each series draws upward
//! from its row *baseline*, which sits at the bottom of the row, so tall values
//! overlap the rows above.

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use crate::error::ConfigError;

/// Pixel insets around the plot.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Margins {
    /// Top inset.
    pub top: f64,
    /// Right inset.
    pub right: f64,
    /// Bottom inset (room for the time axis).
    pub bottom: f64,
    /// Left inset (room for series labels).
    pub left: f64,
}

impl Margins {
    /// Creates margins from the four insets.
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }
}

/// Fixed layout parameters, validated once at construction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutConstants {
    overlap: u32,
    row_height: f64,
    margins: Margins,
}

impl LayoutConstants {
    /// Validates and creates layout constants.
    ///
    /// `overlap` must be at least 1, `row_height` finite and positive, and every
    /// margin finite and non-negative.
    pub fn new(overlap: u32, row_height: f64, margins: Margins) -> Result<Self, ConfigError> {
        if overlap == 0 {
            return Err(ConfigError::ZeroOverlap);
        }
        if !row_height.is_finite() || row_height <= 0.0 {
            return Err(ConfigError::InvalidRowHeight(row_height));
        }
        let Margins {
            top,
            right,
            bottom,
            left,
        } = margins;
        if [top, right, bottom, left]
            .iter()
            .any(|m| !m.is_finite() || *m < 0.0)
        {
            return Err(ConfigError::InvalidMargins);
        }
        Ok(Self {
            overlap,
            row_height,
            margins,
        })
    }

    /// Creates constants already known to be valid.
    pub(crate) const fn preset(overlap: u32, row_height: f64, margins: Margins) -> Self {
        Self {
            overlap,
            row_height,
            margins,
        }
    }

    /// Number of horizon bands per series.
    pub fn overlap(&self) -> u32 {
        self.overlap
    }

    /// Pixel height of one row (and of one horizon band).
    pub fn row_height(&self) -> f64 {
        self.row_height
    }

    /// Pixel insets around the plot.
    pub fn margins(&self) -> Margins {
        self.margins
    }
}

/// Output of the layout pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RidgeLayout {
    /// Full view width (the host's available width).
    pub svg_width: f64,
    /// Full view height.
    pub svg_height: f64,
    /// Plot width (view width minus left/right margins).
    pub width: f64,
    /// Plot height (all rows).
    pub height: f64,
    /// Row height copied from the constants.
    pub row_height: f64,
    /// Margins copied from the constants.
    pub margins: Margins,
    /// Number of rows.
    pub rows: usize,
}

impl RidgeLayout {
    /// Lays out `series_count` rows inside `available_width`.
    pub fn arrange(constants: &LayoutConstants, available_width: f64, series_count: usize) -> Self {
        let margins = constants.margins();
        let row_height = constants.row_height();
        let svg_width = available_width.max(0.0);
        let width = (svg_width - margins.left - margins.right).max(0.0);
        let height = series_count as f64 * (row_height + 1.0);
        Self {
            svg_width,
            svg_height: height + margins.top + margins.bottom,
            width,
            height,
            row_height,
            margins,
            rows: series_count,
        }
    }

    /// Vertical offset of row `i`'s baseline from the plot top.
    pub fn row_offset(&self, i: usize) -> f64 {
        (i + 1) as f64 * (self.row_height + 1.0)
    }

    /// Vertical center of row `i`, where its label sits.
    pub fn label_y(&self, i: usize) -> f64 {
        i as f64 * (self.row_height + 1.0) + self.row_height / 2.0
    }

    /// Approximate number of time-axis ticks (one per 80 pixels).
    pub fn axis_tick_count(&self) -> usize {
        let n = (self.width / 80.0).floor().clamp(0.0, 1_000.0);
        #[allow(clippy::cast_possible_truncation, reason = "clamped to a small range")]
        {
            n as usize
        }
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    fn constants() -> LayoutConstants {
        LayoutConstants::new(5, 15.0, Margins::new(0.0, 16.0, 32.0, 112.0)).unwrap()
    }

    #[test]
    fn arrange_stacks_rows_with_a_one_pixel_gap() {
        let layout = RidgeLayout::arrange(&constants(), 928.0, 3);
        assert_eq!(layout.width, 800.0);
        assert_eq!(layout.height, 48.0);
        assert_eq!(layout.svg_height, 80.0);
        assert_eq!(layout.row_offset(0), 16.0);
        assert_eq!(layout.row_offset(2), 48.0);
        assert_eq!(layout.label_y(1), 23.5);
        assert_eq!(layout.axis_tick_count(), 10);
    }

    #[test]
    fn narrow_hosts_clamp_width_to_zero() {
        let layout = RidgeLayout::arrange(&constants(), 50.0, 1);
        assert_eq!(layout.width, 0.0);
        assert_eq!(layout.axis_tick_count(), 0);
    }

    #[test]
    fn constants_are_validated() {
        assert_eq!(
            LayoutConstants::new(0, 15.0, Margins::default()),
            Err(ConfigError::ZeroOverlap)
        );
        assert!(matches!(
            LayoutConstants::new(3, f64::NAN, Margins::default()),
            Err(ConfigError::InvalidRowHeight(_))
        ));
        assert_eq!(
            LayoutConstants::new(3, 10.0, Margins::new(0.0, -1.0, 0.0, 0.0)),
            Err(ConfigError::InvalidMargins)
        );
    }
}
