// Copyright 2025 the Ridgeline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Configuration and chart build errors.

use ridgeline_core::SceneError;
use ridgeline_transforms::AggregateError;

/// Errors raised while validating chart configuration.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// At least one horizon band is required.
    #[error("overlap must be at least 1")]
    ZeroOverlap,
    /// Row height must be finite and positive.
    #[error("invalid row height {0}")]
    InvalidRowHeight(f64),
    /// Margins must be finite and non-negative.
    #[error("margins must be finite and non-negative")]
    InvalidMargins,
    /// The color scheme has no variant with enough steps.
    #[error("overlap {overlap} exceeds the {max} steps of the color scheme")]
    OverlapExceedsScheme {
        /// Requested band count.
        overlap: u32,
        /// Largest band count the scheme supports.
        max: u32,
    },
}

/// Errors raised while building a chart.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ChartError {
    /// The configuration is invalid.
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    /// There is no series to lay out.
    #[error("dataset has no series")]
    EmptyDataset,
    /// A scene mutation failed.
    #[error("scene error: {0}")]
    Scene(#[from] SceneError),
}

impl From<AggregateError> for ChartError {
    fn from(err: AggregateError) -> Self {
        match err {
            AggregateError::EmptyInput => Self::EmptyDataset,
        }
    }
}
