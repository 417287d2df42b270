// Copyright 2025 the Ridgeline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Uniform cubic B-spline ("basis") curve generation.
//!
//! The spline starts and ends on the first and last input points and passes
//! near, but generally not through, the points in between. Undefined points
//! (`None`) break the curve: each run of defined points becomes its own subpath.

use kurbo::{BezPath, ParamCurveArclen, Point};

/// Accuracy used when measuring path lengths.
const ARCLEN_ACCURACY: f64 = 1e-3;

/// Streams points into a [`BezPath`] as a basis spline.
///
/// `area_side` tracks which edge of an area is being drawn: `Some(false)` for the
/// top edge (opens the subpath), `Some(true)` for the return edge (continues and
/// closes it). Standalone lines use `None`.
#[derive(Debug)]
struct BasisCurve<'a> {
    path: &'a mut BezPath,
    area_side: Option<bool>,
    count: u8,
    p0: Point,
    p1: Point,
}

impl<'a> BasisCurve<'a> {
    fn new(path: &'a mut BezPath, area_side: Option<bool>) -> Self {
        Self {
            path,
            area_side,
            count: 0,
            p0: Point::ORIGIN,
            p1: Point::ORIGIN,
        }
    }

    fn line_start(&mut self) {
        self.count = 0;
    }

    fn point(&mut self, p: Point) {
        match self.count {
            0 => {
                self.count = 1;
                if self.area_side == Some(true) {
                    self.path.line_to(p);
                } else {
                    self.path.move_to(p);
                }
            }
            1 => self.count = 2,
            2 => {
                self.count = 3;
                let (p0, p1) = (self.p0, self.p1);
                self.path.line_to((
                    (5.0 * p0.x + p1.x) / 6.0,
                    (5.0 * p0.y + p1.y) / 6.0,
                ));
                self.bezier(p);
            }
            _ => self.bezier(p),
        }
        self.p0 = self.p1;
        self.p1 = p;
    }

    fn bezier(&mut self, p: Point) {
        let (p0, p1) = (self.p0, self.p1);
        self.path.curve_to(
            ((2.0 * p0.x + p1.x) / 3.0, (2.0 * p0.y + p1.y) / 3.0),
            ((p0.x + 2.0 * p1.x) / 3.0, (p0.y + 2.0 * p1.y) / 3.0),
            (
                (p0.x + 4.0 * p1.x + p.x) / 6.0,
                (p0.y + 4.0 * p1.y + p.y) / 6.0,
            ),
        );
    }

    fn line_end(&mut self) {
        match self.count {
            3 => {
                let p1 = self.p1;
                self.bezier(p1);
                self.path.line_to(p1);
            }
            2 => self.path.line_to(self.p1),
            _ => {}
        }
        if self.area_side == Some(true) || (self.area_side.is_none() && self.count == 1) {
            self.path.close_path();
        }
        self.area_side = self.area_side.map(|side| !side);
    }
}

fn defined_runs(points: &[Option<Point>]) -> impl Iterator<Item = &[Option<Point>]> {
    points
        .split(|p| p.is_none())
        .filter(|run| !run.is_empty())
}

/// Builds a closed basis-spline area between `points` and a horizontal `baseline`.
///
/// Each run of defined points yields one closed subpath: the top edge left to
/// right, then the baseline right to left.
pub fn basis_area(points: &[Option<Point>], baseline: f64) -> BezPath {
    let mut path = BezPath::new();
    for run in defined_runs(points) {
        let mut curve = BasisCurve::new(&mut path, Some(false));
        curve.line_start();
        for p in run.iter().flatten() {
            curve.point(*p);
        }
        curve.line_end();
        curve.line_start();
        for p in run.iter().rev().flatten() {
            curve.point(Point::new(p.x, baseline));
        }
        curve.line_end();
    }
    path
}

/// Builds an open basis-spline polyline through `points`.
///
/// A run holding a single defined point becomes a degenerate closed subpath.
pub fn basis_line(points: &[Option<Point>]) -> BezPath {
    let mut path = BezPath::new();
    for run in defined_runs(points) {
        let mut curve = BasisCurve::new(&mut path, None);
        curve.line_start();
        for p in run.iter().flatten() {
            curve.point(*p);
        }
        curve.line_end();
    }
    path
}

/// Total arc length of every segment in `path`.
pub fn path_length(path: &BezPath) -> f64 {
    path.segments().map(|seg| seg.arclen(ARCLEN_ACCURACY)).sum()
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use kurbo::PathEl;

    use super::*;

    fn count(path: &BezPath, f: impl Fn(&PathEl) -> bool) -> usize {
        path.elements().iter().filter(|el| f(el)).count()
    }

    #[test]
    fn line_starts_and_ends_on_the_outer_points() {
        let pts = [
            Some(Point::new(0.0, 0.0)),
            Some(Point::new(10.0, -6.0)),
            Some(Point::new(20.0, 0.0)),
        ];
        let path = basis_line(&pts);
        let els = path.elements();
        assert_eq!(els.first(), Some(&PathEl::MoveTo(Point::new(0.0, 0.0))));
        assert_eq!(els.last(), Some(&PathEl::LineTo(Point::new(20.0, 0.0))));
        assert_eq!(count(&path, |el| matches!(el, PathEl::CurveTo(..))), 2);
        assert_eq!(count(&path, |el| matches!(el, PathEl::ClosePath)), 0);
    }

    #[test]
    fn two_points_draw_a_straight_segment() {
        let path = basis_line(&[Some(Point::new(0.0, 0.0)), Some(Point::new(3.0, 4.0))]);
        assert_eq!(path.elements().len(), 2);
        assert!((path_length(&path) - 5.0).abs() < 1e-9);
    }

    #[test]
    fn single_point_line_is_closed() {
        let path = basis_line(&[None, Some(Point::new(4.0, 2.0)), None]);
        assert_eq!(
            path.elements(),
            &[PathEl::MoveTo(Point::new(4.0, 2.0)), PathEl::ClosePath]
        );
    }

    #[test]
    fn area_closes_onto_the_baseline() {
        let pts = [
            Some(Point::new(0.0, -5.0)),
            Some(Point::new(10.0, -8.0)),
            Some(Point::new(20.0, -2.0)),
        ];
        let path = basis_area(&pts, 0.0);
        let els = path.elements();
        assert_eq!(els.len(), 11);
        assert_eq!(els[0], PathEl::MoveTo(Point::new(0.0, -5.0)));
        assert_eq!(els[5], PathEl::LineTo(Point::new(20.0, 0.0)));
        assert_eq!(els[9], PathEl::LineTo(Point::new(0.0, 0.0)));
        assert_eq!(els[10], PathEl::ClosePath);
    }

    #[test]
    fn undefined_points_split_the_area_into_subpaths() {
        let pts = vec![
            Some(Point::new(0.0, -1.0)),
            Some(Point::new(1.0, -2.0)),
            None,
            Some(Point::new(3.0, -3.0)),
            Some(Point::new(4.0, -1.0)),
        ];
        let path = basis_area(&pts, 0.0);
        assert_eq!(count(&path, |el| matches!(el, PathEl::MoveTo(_))), 2);
        assert_eq!(count(&path, |el| matches!(el, PathEl::ClosePath)), 2);
        let line = basis_line(&pts);
        assert_eq!(count(&line, |el| matches!(el, PathEl::MoveTo(_))), 2);
    }

    #[test]
    fn fully_undefined_input_yields_an_empty_path() {
        assert!(basis_area(&[None, None], 0.0).elements().is_empty());
        assert!(basis_line(&[]).elements().is_empty());
        assert_eq!(path_length(&BezPath::new()), 0.0);
    }
}
