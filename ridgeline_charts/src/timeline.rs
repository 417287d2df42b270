// Copyright 2025 the Ridgeline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! An [`Animator`] on a virtual clock.
//!
//! [`Timeline`] applies every tween's end value immediately and records when it
//! would have run. The recorded schedule can be replayed with [`Timeline::sample`]
//! to reconstruct the scene at any instant, or exported by hosts that animate
//! declaratively.

extern crate alloc;

use alloc::vec::Vec;
use core::future::{Ready, ready};

use ridgeline_core::{ElementId, Scene, SceneError};

use crate::animation::{AnimationError, Animator, Stage, Tween};

/// A tween placed on the timeline.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScheduledTween {
    /// Stage that started the tween.
    pub stage: Stage,
    /// Stage start time; the tween's own delay is relative to it.
    pub stage_start_ms: f64,
    /// The tween.
    pub tween: Tween,
}

impl ScheduledTween {
    /// Absolute time at which the tween starts moving.
    pub fn begin_ms(&self) -> f64 {
        self.stage_start_ms + self.tween.delay_ms
    }

    /// Absolute time at which the tween reaches its end value.
    pub fn end_ms(&self) -> f64 {
        self.stage_start_ms + self.tween.end_ms()
    }
}

/// A removal placed on the timeline.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScheduledRemoval {
    /// Stage that removed the element.
    pub stage: Stage,
    /// Absolute removal time.
    pub at_ms: f64,
    /// Removed element.
    pub target: ElementId,
}

/// Records a sequence run against a virtual millisecond clock.
#[derive(Clone, Debug, Default)]
pub struct Timeline {
    clock_ms: f64,
    stage_end_ms: f64,
    stage: Option<Stage>,
    tweens: Vec<ScheduledTween>,
    removals: Vec<ScheduledRemoval>,
    stage_starts: Vec<(Stage, f64)>,
}

impl Timeline {
    /// Creates an empty timeline at time zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Total recorded duration.
    pub fn duration_ms(&self) -> f64 {
        self.clock_ms
    }

    /// Recorded tweens in start order.
    pub fn tweens(&self) -> &[ScheduledTween] {
        &self.tweens
    }

    /// Recorded removals in execution order.
    pub fn removals(&self) -> &[ScheduledRemoval] {
        &self.removals
    }

    /// Start time of every stage that began, in order.
    pub fn stage_starts(&self) -> &[(Stage, f64)] {
        &self.stage_starts
    }

    /// Reconstructs the scene `at_ms` into the run, starting from `initial`.
    ///
    /// `initial` must be the scene as it was before the run started.
    pub fn sample(&self, initial: &Scene, at_ms: f64) -> Result<Scene, SceneError> {
        let mut scene = initial.clone();
        for scheduled in &self.tweens {
            if at_ms < scheduled.stage_start_ms {
                break;
            }
            let t = scheduled.tween.progress(at_ms - scheduled.stage_start_ms);
            let el = scene.get_mut(scheduled.tween.target)?;
            scheduled.tween.property.apply(el, t);
        }
        for removal in &self.removals {
            if removal.at_ms > at_ms {
                break;
            }
            if scene.contains(removal.target) {
                scene.remove(removal.target)?;
            }
        }
        Ok(scene)
    }

    fn current_stage(&self) -> Stage {
        self.stage.unwrap_or(Stage::RidgeVisible)
    }
}

impl Animator for Timeline {
    type Completion = Ready<Result<(), AnimationError>>;

    fn begin_stage(&mut self, stage: Stage, _scene: &Scene) {
        self.stage = Some(stage);
        self.stage_end_ms = self.clock_ms;
        self.stage_starts.push((stage, self.clock_ms));
    }

    fn start(&mut self, scene: &mut Scene, tween: &Tween) -> Self::Completion {
        let Ok(el) = scene.get_mut(tween.target) else {
            return ready(Err(AnimationError::MissingElement(tween.target)));
        };
        tween.property.apply(el, 1.0);
        self.stage_end_ms = self.stage_end_ms.max(self.clock_ms + tween.end_ms());
        self.tweens.push(ScheduledTween {
            stage: self.current_stage(),
            stage_start_ms: self.clock_ms,
            tween: *tween,
        });
        ready(Ok(()))
    }

    fn remove(&mut self, scene: &mut Scene, id: ElementId) -> Result<(), AnimationError> {
        scene.remove(id)?;
        self.removals.push(ScheduledRemoval {
            stage: self.current_stage(),
            at_ms: self.stage_end_ms,
            target: id,
        });
        Ok(())
    }

    fn end_stage(&mut self, stage: Stage, _scene: &mut Scene) {
        tracing::debug!(?stage, end_ms = self.stage_end_ms, "stage reached its barrier");
        self.clock_ms = self.stage_end_ms;
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use kurbo::{Rect, Vec2};
    use ridgeline_core::ElementKind;

    use super::*;
    use crate::animation::{Sequencer, StagePlan, TweenProperty};
    use crate::ease::Ease;

    fn plans(target: ElementId, gone: ElementId) -> [StagePlan; 4] {
        let slide = |delay_ms, to| Tween {
            target,
            property: TweenProperty::Translate {
                from: Vec2::ZERO,
                to,
            },
            delay_ms,
            duration_ms: 100.0,
            ease: Ease::Linear,
        };
        [
            StagePlan {
                stage: Stage::RidgeVisible,
                tweens: Vec::new(),
                removals: Vec::new(),
            },
            StagePlan {
                stage: Stage::BandFadeIn,
                tweens: vec![slide(0.0, Vec2::new(10.0, 0.0))],
                removals: Vec::new(),
            },
            StagePlan {
                stage: Stage::RidgeFadeOut,
                tweens: vec![Tween {
                    target,
                    property: TweenProperty::FillOpacity { from: 1.0, to: 0.0 },
                    delay_ms: 50.0,
                    duration_ms: 100.0,
                    ease: Ease::Linear,
                }],
                removals: vec![gone],
            },
            StagePlan {
                stage: Stage::BandShift,
                tweens: Vec::new(),
                removals: Vec::new(),
            },
        ]
    }

    fn run() -> (Scene, Scene, Timeline, ElementId, ElementId) {
        let mut scene = Scene::new(Rect::new(0.0, 0.0, 10.0, 10.0));
        let root = scene.root();
        let target = scene.append(root, ElementKind::Group).unwrap();
        let gone = scene.append(root, ElementKind::Group).unwrap();
        let initial = scene.clone();
        let mut timeline = Timeline::new();
        let mut seq = Sequencer::new(plans(target, gone));
        pollster::block_on(seq.run(&mut scene, &mut timeline));
        (initial, scene, timeline, target, gone)
    }

    #[test]
    fn clock_advances_at_each_barrier() {
        let (_, _, timeline, _, _) = run();
        assert_eq!(timeline.duration_ms(), 250.0);
        let starts: Vec<f64> = timeline.stage_starts().iter().map(|s| s.1).collect();
        assert_eq!(starts, [0.0, 0.0, 100.0, 250.0]);
        assert_eq!(timeline.tweens()[1].begin_ms(), 150.0);
        assert_eq!(timeline.removals()[0].at_ms, 250.0);
    }

    #[test]
    fn live_scene_holds_the_terminal_state() {
        let (_, scene, _, target, gone) = run();
        let el = scene.get(target).unwrap();
        assert_eq!(el.translate, Vec2::new(10.0, 0.0));
        assert_eq!(el.fill_opacity, Some(0.0));
        assert!(!scene.contains(gone));
    }

    #[test]
    fn sampling_interpolates_between_barriers() {
        let (initial, _, timeline, target, gone) = run();

        let start = timeline.sample(&initial, 0.0).unwrap();
        assert_eq!(start.get(target).unwrap().translate, Vec2::ZERO);

        let mid = timeline.sample(&initial, 50.0).unwrap();
        assert_eq!(mid.get(target).unwrap().translate, Vec2::new(5.0, 0.0));
        assert_eq!(mid.get(target).unwrap().fill_opacity, None);

        let fading = timeline.sample(&initial, 200.0).unwrap();
        assert_eq!(fading.get(target).unwrap().fill_opacity, Some(0.5));
        assert!(fading.contains(gone));

        let end = timeline.sample(&initial, 1_000.0).unwrap();
        assert_eq!(end.get(target).unwrap().fill_opacity, Some(0.0));
        assert!(!end.contains(gone));
    }

    #[test]
    fn missing_targets_resolve_to_errors() {
        let mut scene = Scene::new(Rect::ZERO);
        let mut timeline = Timeline::new();
        let missing = ElementId::from_raw(99);
        let tween = Tween {
            target: missing,
            property: TweenProperty::FillOpacity { from: 0.0, to: 1.0 },
            delay_ms: 0.0,
            duration_ms: 10.0,
            ease: Ease::Linear,
        };
        let result = pollster::block_on(timeline.start(&mut scene, &tween));
        assert_eq!(result, Err(AnimationError::MissingElement(missing)));
        assert!(timeline.tweens().is_empty());
    }
}
