// Copyright 2025 the Ridgeline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! SVG serialization for `ridgeline_core` scenes.
//!
//! Scenes are written as-is; when a [`Timeline`] is attached, every recorded
//! tween becomes a SMIL `<animate>`/`<animateTransform>` child of its target and
//! every removal a `<set display="none">`.

use std::collections::{HashMap, HashSet};

use kurbo::Vec2;
use peniko::Brush;
use ridgeline_charts::{Ease, ScheduledTween, Timeline, TweenProperty};
use ridgeline_core::{Element, ElementId, ElementKind, Paint, Scene, TextAnchor};

#[derive(Clone, Copy, Debug)]
enum Animation {
    Tween(ScheduledTween),
    Remove { at_ms: f64 },
}

#[derive(Debug)]
pub(crate) struct SvgWriter<'a> {
    scene: &'a Scene,
    referenced: HashSet<ElementId>,
    animations: HashMap<ElementId, Vec<Animation>>,
}

impl<'a> SvgWriter<'a> {
    pub(crate) fn new(scene: &'a Scene) -> Self {
        Self {
            scene,
            referenced: scene.referenced().into_iter().collect(),
            animations: HashMap::new(),
        }
    }

    /// Embeds the tweens and removals recorded in `timeline`.
    pub(crate) fn with_timeline(mut self, timeline: &Timeline) -> Self {
        for scheduled in timeline.tweens() {
            self.animations
                .entry(scheduled.tween.target)
                .or_default()
                .push(Animation::Tween(*scheduled));
        }
        for removal in timeline.removals() {
            self.animations
                .entry(removal.target)
                .or_default()
                .push(Animation::Remove {
                    at_ms: removal.at_ms,
                });
        }
        self
    }

    pub(crate) fn to_svg_string(&self) -> String {
        let view_box = self.scene.view_box();
        let mut out = String::new();
        out.push_str(
            r#"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" "#,
        );
        out.push_str(&format!(
            r#"viewBox="{} {} {} {}" width="{}" height="{}" font-family="sans-serif">"#,
            view_box.x0,
            view_box.y0,
            view_box.width(),
            view_box.height(),
            view_box.width(),
            view_box.height()
        ));
        out.push('\n');
        if let Some(root) = self.scene.get(self.scene.root()) {
            for &child in &root.children {
                self.write_element(&mut out, child, 1);
            }
        }
        out.push_str("</svg>\n");
        out
    }

    fn write_element(&self, out: &mut String, id: ElementId, depth: usize) {
        let Some(el) = self.scene.get(id) else {
            return;
        };
        indent(out, depth);
        let tag = match &el.kind {
            ElementKind::Group => "g",
            ElementKind::Defs => "defs",
            ElementKind::ClipPath => "clipPath",
            ElementKind::Rect(_) => "rect",
            ElementKind::Path(_) => "path",
            ElementKind::Use(_) => "use",
            ElementKind::Text(_) => "text",
        };
        out.push('<');
        out.push_str(tag);
        if self.referenced.contains(&id) {
            out.push_str(&format!(r#" id="{id}""#));
        }
        match &el.kind {
            ElementKind::Rect(r) => out.push_str(&format!(
                r#" x="{}" y="{}" width="{}" height="{}""#,
                r.x0,
                r.y0,
                r.width(),
                r.height()
            )),
            ElementKind::Path(p) => out.push_str(&format!(r#" d="{}""#, p.to_svg())),
            ElementKind::Use(target) => {
                out.push_str(&format!(r##" href="#{target}" xlink:href="#{target}""##));
            }
            ElementKind::Text(t) => {
                out.push_str(&format!(
                    r#" x="{}" y="{}" font-size="{}""#,
                    t.pos.x, t.pos.y, t.font_size
                ));
                if t.dy_em != 0.0 {
                    out.push_str(&format!(r#" dy="{}em""#, t.dy_em));
                }
                out.push_str(match t.anchor {
                    TextAnchor::Start => "",
                    TextAnchor::Middle => r#" text-anchor="middle""#,
                    TextAnchor::End => r#" text-anchor="end""#,
                });
            }
            ElementKind::Group | ElementKind::Defs | ElementKind::ClipPath => {}
        }
        write_presentation(out, el);

        let animations = self.animations.get(&id).map(Vec::as_slice).unwrap_or(&[]);
        let text = match &el.kind {
            ElementKind::Text(t) => Some(t.text.as_str()),
            _ => None,
        };
        if el.children.is_empty() && animations.is_empty() && text.is_none() {
            out.push_str("/>\n");
            return;
        }

        out.push('>');
        if let Some(text) = text {
            out.push_str(&escape_xml(text));
        }
        if !el.children.is_empty() || !animations.is_empty() {
            out.push('\n');
            for animation in animations {
                indent(out, depth + 1);
                write_animation(out, animation);
            }
            for &child in &el.children {
                self.write_element(out, child, depth + 1);
            }
            indent(out, depth);
        }
        out.push_str(&format!("</{tag}>\n"));
    }
}

fn indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str("  ");
    }
}

fn write_presentation(out: &mut String, el: &Element) {
    if el.translate != Vec2::ZERO {
        out.push_str(&format!(
            r#" transform="translate({},{})""#,
            el.translate.x, el.translate.y
        ));
    }
    if let Some(clip) = el.clip {
        out.push_str(&format!(r#" clip-path="url(#{clip})""#));
    }
    write_paint(out, "fill", &el.fill, el.fill_opacity);
    write_paint(out, "stroke", &el.stroke, None);
    if let Some(width) = el.stroke_width {
        out.push_str(&format!(r#" stroke-width="{width}""#));
    }
    if let Some(dash) = el.dash {
        out.push_str(&format!(
            r#" stroke-dasharray="{}" stroke-dashoffset="{}""#,
            dash.array, dash.offset
        ));
    }
}

fn write_paint(out: &mut String, name: &str, paint: &Paint, opacity: Option<f64>) {
    let alpha = match paint {
        Paint::Inherit => None,
        Paint::None => {
            out.push_str(&format!(r#" {name}="none""#));
            None
        }
        Paint::Brush(brush) => {
            let (value, alpha) = svg_paint(brush);
            out.push_str(&format!(r#" {name}="{value}""#));
            alpha
        }
    };
    let combined = match (alpha, opacity) {
        (None, None) => None,
        (a, o) => Some(a.unwrap_or(1.0) * o.unwrap_or(1.0)),
    };
    if let Some(o) = combined {
        out.push_str(&format!(r#" {name}-opacity="{o}""#));
    }
}

fn write_animation(out: &mut String, animation: &Animation) {
    let scheduled = match animation {
        Animation::Remove { at_ms } => {
            out.push_str(&format!(
                r#"<set attributeName="display" to="none" begin="{at_ms}ms" fill="freeze"/>"#
            ));
            out.push('\n');
            return;
        }
        Animation::Tween(scheduled) => scheduled,
    };
    let tween = &scheduled.tween;
    let (element, attribute, from, to) = match tween.property {
        TweenProperty::FillOpacity { from, to } => {
            ("animate", "fill-opacity", from.to_string(), to.to_string())
        }
        TweenProperty::DashOffset { from, to } => (
            "animate",
            "stroke-dashoffset",
            from.to_string(),
            to.to_string(),
        ),
        TweenProperty::Translate { from, to } => (
            "animateTransform",
            "transform",
            format!("{} {}", from.x, from.y),
            format!("{} {}", to.x, to.y),
        ),
    };
    out.push_str(&format!(
        r#"<{element} attributeName="{attribute}" from="{from}" to="{to}" begin="{}ms" dur="{}ms" fill="freeze""#,
        scheduled.begin_ms(),
        tween.duration_ms
    ));
    if matches!(tween.property, TweenProperty::Translate { .. }) {
        out.push_str(r#" type="translate""#);
    }
    write_timing(out, tween.ease);
    out.push_str("/>\n");
}

fn write_timing(out: &mut String, ease: Ease) {
    if let Some([x1, y1, x2, y2]) = ease.cubic_bezier() {
        out.push_str(&format!(
            r#" calcMode="spline" keyTimes="0;1" keySplines="{x1} {y1} {x2} {y2}""#
        ));
    }
}

fn svg_paint(brush: &Brush) -> (String, Option<f64>) {
    match brush {
        Brush::Solid(color) => {
            let rgba = color.to_rgba8();
            let fill = format!("#{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b);
            let fill_opacity = if rgba.a == 255 {
                None
            } else {
                Some(f64::from(rgba.a) / 255.0)
            };
            (fill, fill_opacity)
        }
        _ => ("none".to_string(), None),
    }
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use ridgeline_charts::{HorizonChart, RidgeHorizonSpec, Sequencer, plan_stages};
    use ridgeline_transforms::Record;

    use super::*;

    fn chart() -> (RidgeHorizonSpec, HorizonChart) {
        let spec = RidgeHorizonSpec::ascending();
        let dataset = spec
            .prepare([
                Record::new("R&D", 0, 2.0),
                Record::new("R&D", 604_800_000, 6.0),
                Record::new("R&D", 1_209_600_000, 3.0),
            ])
            .unwrap();
        let chart = spec.build(&dataset, 640.0).unwrap();
        (spec, chart)
    }

    #[test]
    fn static_output_matches_the_view_and_initial_state() {
        let (_, chart) = chart();
        let svg = SvgWriter::new(&chart.scene).to_svg_string();
        let view = chart.scene.view_box();
        assert!(svg.contains(&format!(
            r#"viewBox="0 0 {} {}""#,
            view.width(),
            view.height()
        )));
        assert_eq!(svg.matches(r#"fill-opacity="0""#).count(), 5);
        assert_eq!(svg.matches("<clipPath").count(), 5);
        assert!(svg.contains("stroke-dasharray"));
        assert!(svg.contains("R&amp;D"));
        assert!(!svg.contains("<animate"));
        assert!(svg.ends_with("</svg>\n"));
    }

    #[test]
    fn referenced_elements_get_ids() {
        let (_, chart) = chart();
        let svg = SvgWriter::new(&chart.scene).to_svg_string();
        let outline = chart.visuals[0].outline;
        assert!(svg.contains(&format!(r#"<path id="{outline}""#)));
        assert!(svg.contains(&format!(r##"href="#{outline}""##)));
        assert!(svg.contains(&format!(r#"id="{}""#, chart.clip_rect)));
    }

    #[test]
    fn animated_output_embeds_every_tween_and_removal() {
        let (spec, mut chart) = chart();
        let initial = chart.scene.clone();
        let plans = plan_stages(&chart.visuals, chart.layout.row_height, &spec.timings);
        let mut timeline = Timeline::new();
        pollster::block_on(Sequencer::new(plans).run(&mut chart.scene, &mut timeline));

        let svg = SvgWriter::new(&initial)
            .with_timeline(&timeline)
            .to_svg_string();
        assert_eq!(svg.matches(r#"attributeName="fill-opacity""#).count(), 5);
        assert_eq!(svg.matches(r#"attributeName="stroke-dashoffset""#).count(), 1);
        assert_eq!(svg.matches("<animateTransform").count(), 10);
        assert_eq!(svg.matches(r#"<set attributeName="display""#).count(), 2);
        assert!(svg.contains(r#"begin="3000ms" dur="2000ms""#));
        assert!(svg.contains(r#"keySplines="0.65 0 0.35 1""#));
    }

    #[test]
    fn paint_opacity_combines_alpha_and_fill_opacity() {
        let mut out = String::new();
        let half = peniko::Color::from_rgba8(255, 0, 0, 51);
        write_paint(&mut out, "fill", &Paint::brush(half), Some(0.5));
        assert_eq!(out, r##" fill="#ff0000" fill-opacity="0.1""##);
    }
}
