// Copyright 2025 the Ridgeline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ridgeline-to-horizon chart building blocks for `ridgeline_core`.
//!
//! This crate turns an aggregated [`Dataset`] into a retained scene and plans the
//! staged transition from a ridgeline plot to a horizon chart:
//! - **Scales** and **layout** place rows and map time and value into pixels.
//! - **Scene building** emits the ridge outline, clipped horizon bands and guides.
//! - **Animation** runs four staged transitions through a pluggable [`Animator`].
//!
//! Text shaping and rendering are out of scope; hosts serialize the scene.
//!
//! ```
//! use ridgeline_charts::{RidgeHorizonSpec, Sequencer, Timeline, plan_stages};
//! use ridgeline_transforms::Record;
//!
//! let spec = RidgeHorizonSpec::ascending();
//! let dataset = spec
//!     .prepare([
//!         Record::new("a", 0, 1.0),
//!         Record::new("a", 604_800_000, 3.0),
//!     ])
//!     .unwrap();
//! let mut chart = spec.build(&dataset, 640.0).unwrap();
//! let plans = plan_stages(&chart.visuals, chart.layout.row_height, &spec.timings);
//! let mut timeline = Timeline::new();
//! let report = pollster::block_on(Sequencer::new(plans).run(&mut chart.scene, &mut timeline));
//! assert_eq!(report.completed.len(), 4);
//! ```

#![no_std]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod animation;
mod axis;
mod curve;
mod ease;
mod error;
#[cfg(not(feature = "std"))]
mod float;
mod horizon;
mod layout;
mod palette;
mod scale;
mod spec;
mod time;
mod timeline;

pub use animation::{
    AnimationError, Animator, CancelHandle, SequenceReport, Sequencer, SequencerState, Stage,
    StageFailure, StagePlan, StageTimings, Tween, TweenProperty, plan_stages,
};
pub use axis::{AxisStyle, AxisTick, TimeAxis};
pub use curve::{basis_area, basis_line, path_length};
pub use ease::Ease;
pub use error::{ChartError, ConfigError};
pub use horizon::{BandHandles, HorizonChart, SeriesVisual};
pub use layout::{LayoutConstants, Margins, RidgeLayout};
pub use palette::{MIN_STEPS, SequentialScheme};
pub use ridgeline_transforms::{Dataset, SortOrder};
pub use scale::{ScaleLinear, ScaleTime, Scales, TimeDomainMode};
pub use spec::RidgeHorizonSpec;
pub use time::{
    MILLIS_PER_DAY, MILLIS_PER_HOUR, TimeInterval, format_time_millis, nice_time_ticks_millis,
};
pub use timeline::{ScheduledRemoval, ScheduledTween, Timeline};
