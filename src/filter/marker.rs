// Copyright 2026 the Draftgeom Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use tracing::trace;

use super::indexed_segments;
use crate::{geom, Affine, BezPath, ParamCurve, PathBuilder, PathEl, Point, Vec2};

/// Places copies of a marker shape along a path.
///
/// The stream is buffered. On `finish`, the marker is stamped at the start
/// and end of the path and, if enabled, at every vertex in between; only the
/// markers are forwarded, not the path itself. The marker is drawn in its
/// own coordinates with the vertex at the origin and the path direction
/// along +x, so an arrowhead pointing along +x follows the path.
///
/// The start marker is turned to point away from the path, the end marker
/// along its final direction, and interior markers along the bisector of
/// the incoming and outgoing directions.
#[derive(Clone, Debug)]
pub struct MarkerBuilder<B> {
    target: B,
    marker: BezPath,
    start: bool,
    end: bool,
    mid: bool,
    path: BezPath,
}

impl<B: PathBuilder> MarkerBuilder<B> {
    /// Stamp `marker` at both ends of the stream.
    pub fn new(target: B, marker: BezPath) -> MarkerBuilder<B> {
        MarkerBuilder {
            target,
            marker,
            start: true,
            end: true,
            mid: false,
            path: BezPath::new(),
        }
    }

    /// Whether to stamp the start of the path.
    pub fn with_start(mut self, start: bool) -> MarkerBuilder<B> {
        self.start = start;
        self
    }

    /// Whether to stamp the end of the path.
    pub fn with_end(mut self, end: bool) -> MarkerBuilder<B> {
        self.end = end;
        self
    }

    /// Whether to stamp the vertices between segments.
    pub fn with_mid(mut self, mid: bool) -> MarkerBuilder<B> {
        self.mid = mid;
        self
    }

    /// The downstream builder.
    pub fn target(&self) -> &B {
        &self.target
    }

    /// Consume the filter, returning the downstream builder.
    pub fn into_inner(self) -> B {
        self.target
    }

    fn stamp(&mut self, at: Point, direction: Vec2) {
        let angle = direction.atan2();
        trace!(point = ?at, angle, "marker stamped");
        let placed = Affine::translate(at.to_vec2()) * Affine::rotate(angle) * &self.marker;
        placed.replay(&mut self.target);
    }

    fn flush(&mut self) {
        let path = std::mem::take(&mut self.path);
        let segs = indexed_segments(path.elements());
        let (Some(&(_, first)), Some(&(_, last))) = (segs.first(), segs.last()) else {
            return;
        };
        if self.start {
            self.stamp(first.start(), -first.start_direction());
        }
        if self.mid {
            for pair in segs.windows(2) {
                let ((i, a), (j, b)) = (pair[0], pair[1]);
                // Segments of different sub-paths share no vertex.
                if j != i + 1 {
                    continue;
                }
                let incoming = geom::unit(a.end_direction());
                let outgoing = geom::unit(b.start_direction());
                let bisector = incoming + outgoing;
                let direction = if bisector.hypot2() > 0.0 {
                    bisector
                } else {
                    incoming
                };
                self.stamp(a.end(), direction);
            }
        }
        if self.end {
            self.stamp(last.end(), last.end_direction());
        }
    }
}

impl<B: PathBuilder> PathBuilder for MarkerBuilder<B> {
    fn move_to(&mut self, p: Point) {
        self.path.push(PathEl::MoveTo(p));
    }

    fn line_to(&mut self, p: Point) {
        self.path.push(PathEl::LineTo(p));
    }

    fn quad_to(&mut self, p1: Point, p2: Point) {
        self.path.push(PathEl::QuadTo(p1, p2));
    }

    fn curve_to(&mut self, p1: Point, p2: Point, p3: Point) {
        self.path.push(PathEl::CurveTo(p1, p2, p3));
    }

    fn close_path(&mut self) {
        self.path.push(PathEl::ClosePath);
    }

    fn finish(&mut self) {
        self.flush();
        self.target.finish();
    }

    fn last_point(&self) -> Option<Point> {
        PathBuilder::last_point(&self.path)
    }

    fn last_control_point(&self) -> Option<Point> {
        PathBuilder::last_control_point(&self.path)
    }
}

#[cfg(test)]
mod tests {
    use crate::{parse_svg_path, BezPath, MarkerBuilder, PathBuilder, PathEl, Point};

    /// A triangle pointing along +x with its tip at the origin.
    fn arrow() -> BezPath {
        BezPath::from_svg("M0 0 L-2 1 L-2 -1 Z").unwrap()
    }

    fn assert_near(p0: Point, p1: Point) {
        assert!((p1 - p0).hypot() < 1e-9, "{p0:?} != {p1:?}");
    }

    fn end_point(el: PathEl) -> Point {
        match el {
            PathEl::MoveTo(p) | PathEl::LineTo(p) => p,
            el => panic!("unexpected {el:?}"),
        }
    }

    fn moves(path: &BezPath) -> Vec<Point> {
        path.elements()
            .iter()
            .filter_map(|el| match el {
                PathEl::MoveTo(p) => Some(*p),
                _ => None,
            })
            .collect()
    }

    fn tips(path: &BezPath) -> Vec<(Point, Point)> {
        // Each stamp is move, line, line, close; the line after the tip
        // tells the direction.
        path.elements()
            .chunks(4)
            .map(|stamp| match (stamp[0], stamp[1]) {
                (PathEl::MoveTo(tip), PathEl::LineTo(back)) => (tip, back),
                els => panic!("unexpected {els:?}"),
            })
            .collect()
    }

    #[test]
    fn stamps_both_ends() {
        let mut markers = MarkerBuilder::new(BezPath::new(), arrow());
        parse_svg_path("M0 0 L10 0 L10 10", &mut markers).unwrap();
        markers.finish();
        let out = markers.into_inner();
        assert_eq!(moves(&out).len(), 2);
        let tips = tips(&out);
        // The start marker points back along -x, so its base is at +x.
        assert_near(tips[0].0, Point::new(0.0, 0.0));
        assert_near(tips[0].1, Point::new(2.0, -1.0));
        // The end marker points along +y.
        assert_near(tips[1].0, Point::new(10.0, 10.0));
        assert_near(tips[1].1, Point::new(9.0, 8.0));
    }

    #[test]
    fn mid_markers_follow_the_bisector() {
        let mut markers = MarkerBuilder::new(BezPath::new(), BezPath::from_svg("M0 0 L1 0").unwrap())
            .with_start(false)
            .with_end(false)
            .with_mid(true);
        parse_svg_path("M0 0 L10 0 L10 10 M20 0 L30 0", &mut markers).unwrap();
        markers.finish();
        let out = markers.into_inner();
        // One interior vertex; the sub-path break is not a vertex.
        assert_eq!(out.elements().len(), 2);
        let diagonal = std::f64::consts::FRAC_1_SQRT_2;
        assert_near(end_point(out.elements()[0]), Point::new(10.0, 0.0));
        assert_near(end_point(out.elements()[1]), Point::new(10.0 + diagonal, diagonal));
    }

    #[test]
    fn empty_path_stamps_nothing() {
        let mut markers = MarkerBuilder::new(BezPath::new(), arrow());
        markers.move_to(Point::new(1.0, 1.0));
        markers.finish();
        assert!(markers.into_inner().elements().is_empty());
    }
}
