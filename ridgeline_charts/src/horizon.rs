// Copyright 2025 the Ridgeline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scene construction for the ridgeline/horizon chart.
//!
//! Every series draws the same outline geometry several times:
//! - once in white as the ridge fill,
//! - `overlap` times as colored horizon bands, each masked by a clip window one
//!   row tall and stacked upward, and
//! - once as a dashed stroke along the upper edge.
//!
//! The bands start fully transparent; the animation fades them in, erases the
//! ridge and then folds the bands down into a single row.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{Point, Rect, Vec2};
use peniko::Color;
use peniko::color::palette::css;
use ridgeline_core::{Dash, ElementId, ElementKind, Paint, Scene, TextAnchor, TextContent};
use ridgeline_transforms::{Dataset, Series};
use smallvec::SmallVec;

use crate::axis::TimeAxis;
use crate::curve::{basis_area, basis_line, path_length};
use crate::error::{ChartError, ConfigError};
use crate::layout::RidgeLayout;
use crate::scale::Scales;
use crate::spec::RidgeHorizonSpec;

/// Element handles inline for the common band counts.
pub type BandHandles = SmallVec<[ElementId; 9]>;

/// Scene handles and derived geometry for one series row.
#[derive(Clone, Debug, PartialEq)]
pub struct SeriesVisual {
    /// Series key.
    pub key: String,
    /// Row index (presentation order).
    pub row: usize,
    /// Row group, translated to the row baseline.
    pub group: ElementId,
    /// Outline area definition shared by the ridge area and every band.
    pub outline: ElementId,
    /// White ridge fill referencing the outline.
    pub ridge_area: ElementId,
    /// Group holding the band groups.
    pub horizon: ElementId,
    /// Clip path definitions, one per band.
    pub clip_paths: BandHandles,
    /// Clip windows (references to the shared clip rectangle), one per band.
    pub clip_windows: BandHandles,
    /// Clipped groups, one per band.
    pub band_groups: BandHandles,
    /// Band fills (references to the outline), one per band.
    pub bands: BandHandles,
    /// Dashed ridge stroke along the upper edge.
    pub ridge_line: ElementId,
    /// Arc length of the ridge stroke.
    pub total_length: f64,
    /// Band colors, lightest first.
    pub colors: SmallVec<[Color; 9]>,
}

/// A fully built chart: its scene plus the handles needed to animate it.
#[derive(Clone, Debug)]
pub struct HorizonChart {
    /// The scene tree.
    pub scene: Scene,
    /// Computed layout.
    pub layout: RidgeLayout,
    /// Shared scales.
    pub scales: Scales,
    /// Shared clip rectangle (one row tall) referenced by every clip window.
    pub clip_rect: ElementId,
    /// Per-series handles in row order.
    pub visuals: Vec<SeriesVisual>,
    /// Bottom time axis.
    pub axis: TimeAxis,
    /// Series name labels in row order.
    pub labels: Vec<ElementId>,
}

impl HorizonChart {
    pub(crate) fn assemble(
        spec: &RidgeHorizonSpec,
        dataset: &Dataset,
        layout: RidgeLayout,
        scales: Scales,
    ) -> Result<Self, ChartError> {
        let margins = layout.margins;
        let mut scene = Scene::new(Rect::new(0.0, 0.0, layout.svg_width, layout.svg_height));
        let root = scene.root();
        let frame = scene.append(root, ElementKind::Group)?;
        scene.set_translate(frame, Vec2::new(margins.left, margins.top))?;
        let back = scene.append(frame, ElementKind::Group)?;
        let front = scene.append(frame, ElementKind::Group)?;

        let axis = spec.axis.build_bottom(
            &mut scene,
            front,
            &scales.time,
            layout.height,
            layout.axis_tick_count(),
        )?;

        let label_group = scene.append(front, ElementKind::Group)?;
        let mut labels = Vec::with_capacity(dataset.len());
        for (row, series) in dataset.series().iter().enumerate() {
            let text = TextContent::new(Point::new(-4.0, layout.label_y(row)), series.key.clone())
                .with_font_size(spec.label_font_size)
                .with_anchor(TextAnchor::End)
                .with_dy_em(0.35);
            labels.push(scene.append(label_group, ElementKind::Text(text))?);
        }

        let defs = scene.append(back, ElementKind::Defs)?;
        let clip_rect = scene.append(
            defs,
            ElementKind::Rect(Rect::new(0.0, 0.0, layout.width, layout.row_height)),
        )?;

        let rows = scene.append(back, ElementKind::Group)?;
        let overlap = spec.constants.overlap();
        let colors = band_colors(spec, overlap)?;
        let mut visuals = Vec::with_capacity(dataset.len());
        for (row, series) in dataset.series().iter().enumerate() {
            let row_scene = RowScene {
                series,
                row,
                layout: &layout,
                scales: &scales,
                clip_rect,
                colors: &colors,
            };
            visuals.push(row_scene.build(&mut scene, rows)?);
        }

        tracing::debug!(
            rows = visuals.len(),
            elements = scene.len(),
            ticks = axis.ticks.len(),
            "built horizon scene"
        );

        Ok(Self {
            scene,
            layout,
            scales,
            clip_rect,
            visuals,
            axis,
            labels,
        })
    }

    /// Returns the handles of the series named `key`.
    pub fn visual(&self, key: &str) -> Option<&SeriesVisual> {
        self.visuals.iter().find(|v| v.key == key)
    }
}

fn band_colors(spec: &RidgeHorizonSpec, overlap: u32) -> Result<SmallVec<[Color; 9]>, ConfigError> {
    (0..overlap)
        .map(|band| {
            spec.scheme
                .band_color(overlap, band)
                .ok_or(ConfigError::OverlapExceedsScheme {
                    overlap,
                    max: spec.scheme.max_steps(),
                })
        })
        .collect()
}

struct RowScene<'a> {
    series: &'a Series,
    row: usize,
    layout: &'a RidgeLayout,
    scales: &'a Scales,
    clip_rect: ElementId,
    colors: &'a [Color],
}

impl RowScene<'_> {
    fn build(&self, scene: &mut Scene, parent: ElementId) -> Result<SeriesVisual, ChartError> {
        let row_height = self.layout.row_height;
        let points: Vec<Option<Point>> = self
            .series
            .values
            .iter()
            .map(|r| {
                r.is_defined().then(|| {
                    Point::new(
                        self.scales.time.map(r.timestamp as f64),
                        self.scales.value.map(r.value),
                    )
                })
            })
            .collect();
        let baseline = self.scales.value.map(0.0);

        let group = scene.append(parent, ElementKind::Group)?;
        scene.set_translate(group, Vec2::new(0.0, self.layout.row_offset(self.row)))?;

        let defs = scene.append(group, ElementKind::Defs)?;
        let mut clip_paths = BandHandles::new();
        let mut clip_windows = BandHandles::new();
        for band in 0..self.colors.len() {
            let clip = scene.append(defs, ElementKind::ClipPath)?;
            let window = scene.append(clip, ElementKind::Use(self.clip_rect))?;
            scene.set_translate(window, Vec2::new(0.0, -row_height * (band + 1) as f64))?;
            clip_paths.push(clip);
            clip_windows.push(window);
        }
        let outline = scene.append(defs, ElementKind::Path(basis_area(&points, baseline)))?;

        let ridge_area = scene.append(group, ElementKind::Use(outline))?;
        scene.set_fill(ridge_area, Paint::brush(css::WHITE))?;

        let horizon = scene.append(group, ElementKind::Group)?;
        let mut band_groups = BandHandles::new();
        let mut bands = BandHandles::new();
        for (&clip, &color) in clip_paths.iter().zip(self.colors) {
            let band_group = scene.append(horizon, ElementKind::Group)?;
            scene.set_clip(band_group, clip)?;
            let band = scene.append(band_group, ElementKind::Use(outline))?;
            scene.set_fill(band, Paint::brush(color))?;
            scene.set_fill_opacity(band, 0.0)?;
            band_groups.push(band_group);
            bands.push(band);
        }

        let stroke = basis_line(&points);
        let total_length = path_length(&stroke);
        let ridge_line = scene.append(group, ElementKind::Path(stroke))?;
        scene.set_fill(ridge_line, Paint::None)?;
        scene.set_stroke(ridge_line, Paint::brush(css::BLACK), 1.0)?;
        scene.set_dash(
            ridge_line,
            Dash {
                array: total_length,
                offset: 0.0,
            },
        )?;

        Ok(SeriesVisual {
            key: self.series.key.clone(),
            row: self.row,
            group,
            outline,
            ridge_area,
            horizon,
            clip_paths,
            clip_windows,
            band_groups,
            bands,
            ridge_line,
            total_length,
            colors: self.colors.iter().copied().collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use ridgeline_transforms::{Record, SortOrder, aggregate};

    use super::*;
    use crate::palette::SequentialScheme;

    fn chart() -> HorizonChart {
        let ds = aggregate(
            vec![
                Record::new("quiet", 0, 1.0),
                Record::new("quiet", 86_400_000, 2.0),
                Record::new("quiet", 172_800_000, 1.0),
                Record::new("busy", 0, 10.0),
                Record::new("busy", 86_400_000, 30.0),
                Record::new("busy", 172_800_000, 20.0),
            ],
            SortOrder::Asc,
        )
        .unwrap();
        RidgeHorizonSpec::ascending().build(&ds, 928.0).unwrap()
    }

    #[test]
    fn rows_are_translated_to_their_baselines() {
        let chart = chart();
        for v in &chart.visuals {
            let group = chart.scene.get(v.group).unwrap();
            assert_eq!(group.translate, Vec2::new(0.0, chart.layout.row_offset(v.row)));
        }
        assert_eq!(chart.visuals[0].key, "quiet");
        assert_eq!(chart.visuals[1].key, "busy");
    }

    #[test]
    fn clip_windows_stack_upward_one_row_per_band() {
        let chart = chart();
        let v = chart.visual("busy").unwrap();
        assert_eq!(v.clip_windows.len(), 5);
        for (band, &window) in v.clip_windows.iter().enumerate() {
            let el = chart.scene.get(window).unwrap();
            assert_eq!(el.href(), Some(chart.clip_rect));
            assert_eq!(el.translate, Vec2::new(0.0, -15.0 * (band + 1) as f64));
        }
    }

    #[test]
    fn bands_start_transparent_with_scheme_colors() {
        let chart = chart();
        let v = chart.visual("quiet").unwrap();
        for (band, (&id, &group)) in v.bands.iter().zip(&v.band_groups).enumerate() {
            let el = chart.scene.get(id).unwrap();
            assert_eq!(el.fill_opacity, Some(0.0));
            assert_eq!(el.href(), Some(v.outline));
            let expected = SequentialScheme::OrRd.band_color(5, band as u32).unwrap();
            assert_eq!(el.fill, Paint::brush(expected));
            assert_eq!(chart.scene.get(group).unwrap().clip, Some(v.clip_paths[band]));
        }
    }

    #[test]
    fn ridge_stroke_is_dashed_by_its_length() {
        let chart = chart();
        for v in &chart.visuals {
            assert!(v.total_length > 0.0);
            let el = chart.scene.get(v.ridge_line).unwrap();
            assert_eq!(
                el.dash,
                Some(Dash {
                    array: v.total_length,
                    offset: 0.0
                })
            );
            assert_eq!(el.fill, Paint::None);
            let area = chart.scene.get(v.ridge_area).unwrap();
            assert_eq!(area.fill, Paint::brush(css::WHITE));
        }
    }

    #[test]
    fn paint_order_is_area_then_bands_then_stroke() {
        let chart = chart();
        let v = &chart.visuals[0];
        let children = &chart.scene.get(v.group).unwrap().children;
        assert_eq!(children[1..], [v.ridge_area, v.horizon, v.ridge_line]);
    }

    #[test]
    fn labels_are_end_anchored_left_of_the_plot() {
        let chart = chart();
        assert_eq!(chart.labels.len(), 2);
        let Some(ElementKind::Text(text)) = chart.scene.get(chart.labels[1]).map(|e| &e.kind) else {
            panic!("label is not text");
        };
        assert_eq!(text.text, "busy");
        assert_eq!(text.pos, Point::new(-4.0, 23.5));
        assert_eq!(text.anchor, TextAnchor::End);
    }
}
