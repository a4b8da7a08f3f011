// Copyright 2026 the Draftgeom Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use tracing::trace;

use crate::bezpath::seg_from;
use crate::{PathBuilder, PathCursor, PathEl, Point, Tolerances};

/// Replaces curves with lines.
///
/// Each quadratic or cubic command is split into enough uniform steps that
/// the resulting polyline stays within the flatness tolerance of the curve
/// (see [`PathSeg::subdivisions`]). Moves, lines and closes pass through.
///
/// [`PathSeg::subdivisions`]: crate::PathSeg::subdivisions
#[derive(Clone, Debug)]
pub struct FlattenBuilder<B> {
    target: B,
    tolerance: f64,
    cursor: PathCursor,
}

impl<B: PathBuilder> FlattenBuilder<B> {
    /// Flatten to within `tolerance` of the input curves.
    pub fn new(target: B, tolerance: f64) -> FlattenBuilder<B> {
        FlattenBuilder {
            target,
            tolerance,
            cursor: PathCursor::new(),
        }
    }

    /// Flatten with the flatness of `tol`.
    pub fn with_tolerances(target: B, tol: &Tolerances) -> FlattenBuilder<B> {
        FlattenBuilder::new(target, tol.flatness)
    }

    /// The maximum distance between a curve and its polyline.
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// The downstream builder.
    pub fn target(&self) -> &B {
        &self.target
    }

    /// Consume the filter, returning the downstream builder.
    pub fn into_inner(self) -> B {
        self.target
    }

    fn flatten(&mut self, el: PathEl) {
        let last = self.cursor.last_point().unwrap_or(Point::ZERO);
        self.cursor.push(el);
        let Some(seg) = seg_from(last, el) else {
            return;
        };
        let target = &mut self.target;
        let mut count = 0;
        seg.flatten(self.tolerance, |_, p| {
            target.line_to(p);
            count += 1;
        });
        trace!(count, "curve flattened");
    }
}

impl<B: PathBuilder> PathBuilder for FlattenBuilder<B> {
    fn move_to(&mut self, p: Point) {
        self.cursor.push(PathEl::MoveTo(p));
        self.target.move_to(p);
    }

    fn line_to(&mut self, p: Point) {
        self.cursor.push(PathEl::LineTo(p));
        self.target.line_to(p);
    }

    fn quad_to(&mut self, p1: Point, p2: Point) {
        self.flatten(PathEl::QuadTo(p1, p2));
    }

    fn curve_to(&mut self, p1: Point, p2: Point, p3: Point) {
        self.flatten(PathEl::CurveTo(p1, p2, p3));
    }

    fn close_path(&mut self) {
        self.cursor.push(PathEl::ClosePath);
        self.target.close_path();
    }

    fn finish(&mut self) {
        self.target.finish();
    }

    fn last_point(&self) -> Option<Point> {
        self.cursor.last_point()
    }

    fn last_control_point(&self) -> Option<Point> {
        self.cursor.last_control_point()
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        parse_svg_path, BezPath, CubicBez, FlattenBuilder, ParamCurve, PathBuilder, PathEl,
        PathSeg, Point, Tolerances,
    };

    fn flatten(data: &str, tolerance: f64) -> BezPath {
        let mut flatten = FlattenBuilder::new(BezPath::new(), tolerance);
        parse_svg_path(data, &mut flatten).unwrap();
        flatten.finish();
        flatten.into_inner()
    }

    #[test]
    fn lines_pass_through() {
        let data = "M0 0H10V10Z";
        assert_eq!(flatten(data, 0.1).to_svg(), data);
    }

    #[test]
    fn quad_becomes_lines() {
        // The second difference is 10, so 0.01 needs ⌈√250⌉ = 16 steps.
        let path = flatten("M0 0 Q5 5 10 0", 0.01);
        assert_eq!(path.elements().len(), 17);
        assert!(path
            .elements()
            .iter()
            .skip(1)
            .all(|el| matches!(el, PathEl::LineTo(_))));
        assert_eq!(path.elements()[16], PathEl::LineTo(Point::new(10.0, 0.0)));
    }

    #[test]
    fn vertices_lie_on_the_curve() {
        let c = CubicBez::new((0.0, 0.0), (0.0, 30.0), (40.0, -30.0), (40.0, 0.0));
        let path = flatten("M0 0 C0 30 40 -30 40 0", 0.05);
        let n = PathSeg::Cubic(c).subdivisions(0.05);
        assert_eq!(path.elements().len(), n + 1);
        for (i, el) in path.elements().iter().enumerate().skip(1) {
            let PathEl::LineTo(p) = *el else {
                panic!("unexpected {el:?}");
            };
            assert!(p.distance(c.eval(i as f64 / n as f64)) < 1e-9);
        }
    }

    #[test]
    fn tracks_input_position() {
        let mut flatten = FlattenBuilder::with_tolerances(BezPath::new(), &Tolerances::DEFAULT);
        assert_eq!(flatten.tolerance(), 0.1);
        flatten.move_to(Point::new(0.0, 0.0));
        flatten.quad_to(Point::new(5.0, 5.0), Point::new(10.0, 0.0));
        assert_eq!(flatten.last_point(), Some(Point::new(10.0, 0.0)));
        assert_eq!(flatten.last_control_point(), Some(Point::new(5.0, 5.0)));
    }
}
