// Copyright 2025 the Ridgeline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bottom time axis generation.
//!
//! The axis is a group of ticks, each a short downward rule with a centered
//! label. Outer ticks and the domain line are omitted.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{BezPath, Point, Vec2};
use peniko::Brush;
use peniko::color::palette::css;
use ridgeline_core::{ElementId, ElementKind, Paint, Scene, SceneError, TextAnchor, TextContent};

use crate::scale::ScaleTime;
use crate::time::format_time_millis;

/// Styling for the bottom time axis.
#[derive(Clone, Debug, PartialEq)]
pub struct AxisStyle {
    /// Length of each tick rule.
    pub tick_size: f64,
    /// Gap between the tick rule and its label.
    pub tick_padding: f64,
    /// Paint for tick rules and labels.
    pub brush: Brush,
    /// Stroke width of tick rules.
    pub stroke_width: f64,
    /// Label font size.
    pub font_size: f64,
}

impl Default for AxisStyle {
    fn default() -> Self {
        Self {
            tick_size: 6.0,
            tick_padding: 3.0,
            brush: css::BLACK.into(),
            stroke_width: 1.0,
            font_size: 10.0,
        }
    }
}

/// One generated tick.
#[derive(Clone, Debug, PartialEq)]
pub struct AxisTick {
    /// Tick value (epoch milliseconds).
    pub value: f64,
    /// Formatted label.
    pub label: String,
    /// Group holding the rule and label.
    pub group: ElementId,
}

/// Scene handles of a generated axis.
#[derive(Clone, Debug, PartialEq)]
pub struct TimeAxis {
    /// Axis group, translated to the axis baseline.
    pub group: ElementId,
    /// Ticks in ascending time order.
    pub ticks: Vec<AxisTick>,
}

impl AxisStyle {
    /// Appends a bottom axis for `scale` under `parent`, with its baseline at `y`.
    pub fn build_bottom(
        &self,
        scene: &mut Scene,
        parent: ElementId,
        scale: &ScaleTime,
        y: f64,
        tick_count: usize,
    ) -> Result<TimeAxis, SceneError> {
        let group = scene.append(parent, ElementKind::Group)?;
        scene.set_translate(group, Vec2::new(0.0, y))?;

        let mut ticks = Vec::new();
        for value in scale.ticks(tick_count) {
            let x = scale.map(value);
            let tick = scene.append(group, ElementKind::Group)?;
            scene.set_translate(tick, Vec2::new(x, 0.0))?;

            let mut rule = BezPath::new();
            rule.move_to((0.0, 0.0));
            rule.line_to((0.0, self.tick_size));
            let rule = scene.append(tick, ElementKind::Path(rule))?;
            scene.set_stroke(rule, Paint::brush(self.brush.clone()), self.stroke_width)?;

            let label = format_time_millis(value);
            let text = TextContent::new(
                Point::new(0.0, self.tick_size + self.tick_padding),
                label.clone(),
            )
            .with_font_size(self.font_size)
            .with_anchor(TextAnchor::Middle)
            .with_dy_em(0.71);
            let text = scene.append(tick, ElementKind::Text(text))?;
            scene.set_fill(text, Paint::brush(self.brush.clone()))?;

            ticks.push(AxisTick {
                value,
                label,
                group: tick,
            });
        }
        Ok(TimeAxis { group, ticks })
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use kurbo::Rect;

    use super::*;
    use crate::time::MILLIS_PER_DAY;

    #[test]
    fn ticks_sit_at_scaled_positions_below_the_baseline() {
        let mut scene = Scene::new(Rect::new(0.0, 0.0, 400.0, 100.0));
        let root = scene.root();
        let span = 28 * MILLIS_PER_DAY;
        let scale = ScaleTime::new((0.0, span as f64), (0.0, 400.0));
        let axis = AxisStyle::default()
            .build_bottom(&mut scene, root, &scale, 64.0, 4)
            .unwrap();

        assert_eq!(scene.get(axis.group).unwrap().translate, Vec2::new(0.0, 64.0));
        assert!(!axis.ticks.is_empty());
        for tick in &axis.ticks {
            let el = scene.get(tick.group).unwrap();
            assert_eq!(el.translate.x, scale.map(tick.value));
            assert_eq!(el.children.len(), 2);
            assert!(!tick.label.is_empty());
        }
        assert!(axis.ticks.windows(2).all(|w| w[0].value < w[1].value));
    }

    #[test]
    fn zero_tick_count_draws_nothing() {
        let mut scene = Scene::new(Rect::ZERO);
        let root = scene.root();
        let scale = ScaleTime::new((0.0, 1.0e9), (0.0, 10.0));
        let axis = AxisStyle::default()
            .build_bottom(&mut scene, root, &scale, 0.0, 0)
            .unwrap();
        assert!(axis.ticks.is_empty());
        assert!(scene.get(axis.group).unwrap().children.is_empty());
    }
}
