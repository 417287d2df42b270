// Copyright 2025 the Ridgeline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Staged ridge-to-horizon animation.
//!
//! The transition runs as four strictly sequential stages. Within a stage every
//! tween is started first and then awaited, so a stage ends only once all of its
//! tweens have completed. Removals scheduled for a stage run after that barrier.
//!
//! Driving the tweens is the job of an [`Animator`]: a host with a real frame
//! clock returns completions that resolve when a transition finishes, while
//! [`Timeline`](crate::Timeline) resolves them immediately on a virtual clock.

extern crate alloc;

use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::Cell;
use core::future::Future;

use kurbo::Vec2;
use ridgeline_core::{Dash, Element, ElementId, Scene, SceneError};

use crate::ease::Ease;
use crate::horizon::SeriesVisual;

/// Animation stages in execution order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Stage {
    /// The ridge is drawn and the bands are transparent. Completes immediately.
    RidgeVisible,
    /// Bands fade to full opacity.
    BandFadeIn,
    /// The ridge stroke is erased along its length; the ridge is then removed.
    RidgeFadeOut,
    /// Bands fold down into a single row.
    BandShift,
}

impl Stage {
    /// Every stage in execution order.
    pub const ALL: [Self; 4] = [
        Self::RidgeVisible,
        Self::BandFadeIn,
        Self::RidgeFadeOut,
        Self::BandShift,
    ];
}

/// An animated attribute with its start and end values.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TweenProperty {
    /// Fill opacity.
    FillOpacity {
        /// Start value.
        from: f64,
        /// End value.
        to: f64,
    },
    /// Stroke dash offset.
    DashOffset {
        /// Start value.
        from: f64,
        /// End value.
        to: f64,
    },
    /// Translation.
    Translate {
        /// Start value.
        from: Vec2,
        /// End value.
        to: Vec2,
    },
}

impl TweenProperty {
    /// Writes the value at eased progress `t` onto `element`.
    pub fn apply(&self, element: &mut Element, t: f64) {
        match *self {
            Self::FillOpacity { from, to } => {
                element.fill_opacity = Some(lerp(from, to, t));
            }
            Self::DashOffset { from, to } => {
                let array = element.dash.map_or(0.0, |d| d.array);
                element.dash = Some(Dash {
                    array,
                    offset: lerp(from, to, t),
                });
            }
            Self::Translate { from, to } => element.translate = from.lerp(to, t),
        }
    }
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// One attribute transition on one element.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tween {
    /// Animated element.
    pub target: ElementId,
    /// Animated attribute.
    pub property: TweenProperty,
    /// Delay from the stage start, in milliseconds.
    pub delay_ms: f64,
    /// Duration in milliseconds.
    pub duration_ms: f64,
    /// Timing curve.
    pub ease: Ease,
}

impl Tween {
    /// Eased progress `elapsed_ms` after the stage start.
    pub fn progress(&self, elapsed_ms: f64) -> f64 {
        let local = elapsed_ms - self.delay_ms;
        if local <= 0.0 {
            return self.ease.apply(0.0);
        }
        if self.duration_ms <= 0.0 {
            return 1.0;
        }
        self.ease.apply(local / self.duration_ms)
    }

    /// Time from the stage start to the end of the tween.
    pub fn end_ms(&self) -> f64 {
        self.delay_ms + self.duration_ms.max(0.0)
    }
}

/// Tweens and removals making up one stage.
#[derive(Clone, Debug, PartialEq)]
pub struct StagePlan {
    /// Stage this plan belongs to.
    pub stage: Stage,
    /// Tweens started together at the stage start.
    pub tweens: Vec<Tween>,
    /// Elements removed once every tween has completed, in order.
    pub removals: Vec<ElementId>,
}

impl StagePlan {
    /// Time until the last tween of the stage ends.
    pub fn duration_ms(&self) -> f64 {
        self.tweens.iter().map(Tween::end_ms).fold(0.0, f64::max)
    }
}

/// Stage durations and delays, in milliseconds, plus the band easing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StageTimings {
    /// Band fade-in duration.
    pub band_fade_in_ms: f64,
    /// Pause before the ridge starts to erase.
    pub ridge_fade_out_delay_ms: f64,
    /// Ridge erase duration.
    pub ridge_fade_out_ms: f64,
    /// Band fold duration.
    pub band_shift_ms: f64,
    /// Timing curve of the band fade and fold. The ridge erase is always linear.
    pub band_ease: Ease,
}

impl Default for StageTimings {
    fn default() -> Self {
        Self {
            band_fade_in_ms: 2000.0,
            ridge_fade_out_delay_ms: 1000.0,
            ridge_fade_out_ms: 2000.0,
            band_shift_ms: 2000.0,
            band_ease: Ease::InOutCubic,
        }
    }
}

/// Plans the four stages for a built chart.
pub fn plan_stages(
    visuals: &[SeriesVisual],
    row_height: f64,
    timings: &StageTimings,
) -> [StagePlan; 4] {
    let mut fade_in = Vec::new();
    let mut fade_out = Vec::new();
    let mut removals = Vec::new();
    let mut shift = Vec::new();

    for v in visuals {
        for &band in &v.bands {
            fade_in.push(Tween {
                target: band,
                property: TweenProperty::FillOpacity { from: 0.0, to: 1.0 },
                delay_ms: 0.0,
                duration_ms: timings.band_fade_in_ms,
                ease: timings.band_ease,
            });
        }

        fade_out.push(Tween {
            target: v.ridge_line,
            property: TweenProperty::DashOffset {
                from: 0.0,
                to: -v.total_length,
            },
            delay_ms: timings.ridge_fade_out_delay_ms,
            duration_ms: timings.ridge_fade_out_ms,
            ease: Ease::Linear,
        });
        removals.push(v.ridge_line);
        removals.push(v.ridge_area);

        for (band, &window) in v.clip_windows.iter().enumerate() {
            shift.push(Tween {
                target: window,
                property: TweenProperty::Translate {
                    from: Vec2::new(0.0, -row_height * (band + 1) as f64),
                    to: Vec2::new(0.0, -row_height),
                },
                delay_ms: 0.0,
                duration_ms: timings.band_shift_ms,
                ease: timings.band_ease,
            });
        }
        for (band, &id) in v.bands.iter().enumerate() {
            shift.push(Tween {
                target: id,
                property: TweenProperty::Translate {
                    from: Vec2::ZERO,
                    to: Vec2::new(0.0, row_height * band as f64),
                },
                delay_ms: 0.0,
                duration_ms: timings.band_shift_ms,
                ease: timings.band_ease,
            });
        }
    }

    [
        StagePlan {
            stage: Stage::RidgeVisible,
            tweens: Vec::new(),
            removals: Vec::new(),
        },
        StagePlan {
            stage: Stage::BandFadeIn,
            tweens: fade_in,
            removals: Vec::new(),
        },
        StagePlan {
            stage: Stage::RidgeFadeOut,
            tweens: fade_out,
            removals,
        },
        StagePlan {
            stage: Stage::BandShift,
            tweens: shift,
            removals: Vec::new(),
        },
    ]
}

/// Errors raised while animating.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum AnimationError {
    /// The tween's target is not in the scene.
    #[error("animated element {0} is missing")]
    MissingElement(ElementId),
    /// A scene mutation failed.
    #[error("scene error: {0}")]
    Scene(#[from] SceneError),
}

/// Drives tweens against a scene.
pub trait Animator {
    /// Resolves once a started tween has finished.
    type Completion: Future<Output = Result<(), AnimationError>>;

    /// Called before any tween of `stage` starts.
    fn begin_stage(&mut self, stage: Stage, scene: &Scene) {
        let _ = (stage, scene);
    }

    /// Starts `tween` and returns its completion.
    fn start(&mut self, scene: &mut Scene, tween: &Tween) -> Self::Completion;

    /// Removes `id` (and its subtree) from the scene.
    fn remove(&mut self, scene: &mut Scene, id: ElementId) -> Result<(), AnimationError> {
        scene.remove(id)?;
        Ok(())
    }

    /// Called after the stage barrier and its removals.
    fn end_stage(&mut self, stage: Stage, scene: &mut Scene) {
        let _ = (stage, scene);
    }
}

/// A cloneable flag that stops a [`Sequencer`] at the next stage boundary.
#[derive(Clone, Debug, Default)]
pub struct CancelHandle(Rc<Cell<bool>>);

impl CancelHandle {
    /// Requests cancellation.
    pub fn cancel(&self) {
        self.0.set(true);
    }

    /// Whether cancellation was requested.
    pub fn is_cancelled(&self) -> bool {
        self.0.get()
    }
}

/// Lifecycle of a [`Sequencer`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SequencerState {
    /// Not started.
    Idle,
    /// Running the given stage.
    Running(Stage),
    /// Every stage ran.
    Completed,
    /// Stopped before every stage ran.
    Cancelled,
}

/// A tween or removal that failed during a stage.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StageFailure {
    /// Stage in which the failure happened.
    pub stage: Stage,
    /// Element the failed operation targeted.
    pub target: ElementId,
    /// What went wrong.
    pub error: AnimationError,
}

/// Outcome of [`Sequencer::run`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SequenceReport {
    /// Stages that reached their barrier, in order.
    pub completed: Vec<Stage>,
    /// Failures recovered from along the way.
    pub failures: Vec<StageFailure>,
    /// Whether the run stopped early.
    pub cancelled: bool,
}

/// Runs stage plans in order against a scene.
#[derive(Debug)]
pub struct Sequencer {
    plans: [StagePlan; 4],
    state: SequencerState,
    cancel: CancelHandle,
}

impl Sequencer {
    /// Creates an idle sequencer.
    pub fn new(plans: [StagePlan; 4]) -> Self {
        Self {
            plans,
            state: SequencerState::Idle,
            cancel: CancelHandle::default(),
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SequencerState {
        self.state
    }

    /// Returns a handle that cancels this sequencer.
    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    /// Cancels the sequence. Calling it again has no further effect.
    pub fn teardown(&mut self) {
        self.cancel.cancel();
        if matches!(self.state, SequencerState::Idle | SequencerState::Running(_)) {
            self.state = SequencerState::Cancelled;
        }
    }

    /// Runs every remaining stage.
    ///
    /// Failed tweens and removals are logged and recorded; the sequence moves on.
    /// A finished or cancelled sequencer returns an empty report.
    pub async fn run<A: Animator>(&mut self, scene: &mut Scene, animator: &mut A) -> SequenceReport {
        let mut report = SequenceReport::default();
        match self.state {
            SequencerState::Completed => return report,
            SequencerState::Cancelled => {
                report.cancelled = true;
                return report;
            }
            SequencerState::Idle | SequencerState::Running(_) => {}
        }

        for plan in &self.plans {
            if self.cancel.is_cancelled() {
                tracing::debug!(stage = ?plan.stage, "animation cancelled");
                self.state = SequencerState::Cancelled;
                report.cancelled = true;
                return report;
            }
            self.state = SequencerState::Running(plan.stage);
            tracing::debug!(
                stage = ?plan.stage,
                tweens = plan.tweens.len(),
                removals = plan.removals.len(),
                "starting animation stage"
            );
            animator.begin_stage(plan.stage, scene);

            let pending: Vec<_> = plan
                .tweens
                .iter()
                .map(|tween| (tween.target, animator.start(scene, tween)))
                .collect();
            for (target, completion) in pending {
                if let Err(error) = completion.await {
                    tracing::warn!(stage = ?plan.stage, element = %target, %error, "tween failed");
                    report.failures.push(StageFailure {
                        stage: plan.stage,
                        target,
                        error,
                    });
                }
            }

            for &target in &plan.removals {
                if let Err(error) = animator.remove(scene, target) {
                    tracing::warn!(stage = ?plan.stage, element = %target, %error, "removal failed");
                    report.failures.push(StageFailure {
                        stage: plan.stage,
                        target,
                        error,
                    });
                }
            }

            animator.end_stage(plan.stage, scene);
            report.completed.push(plan.stage);
        }

        self.state = SequencerState::Completed;
        report
    }
}
