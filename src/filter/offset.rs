// Copyright 2026 the Draftgeom Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use tracing::trace;

use crate::{
    geom, intersect_line_line, IntersectionStatus, Line, PathBuilder, PathCursor, PathEl, Point,
    Tolerances,
};

/// Shifts a polyline sideways by a fixed distance.
///
/// Each line moves along its perpendicular ([`Vec2::turn_90`] of its
/// direction) by `distance`; negative distances shift the other way.
/// Consecutive shifted lines are joined where they meet, unless that point
/// is farther than `miter_limit · |distance|` from the shifted vertices, in
/// which case the join is bevelled. Loops formed where the shifted path
/// crosses itself are cut out.
///
/// Each sub-path is forwarded when the next one starts, when it is closed,
/// or on `finish`.
///
/// # Panics
///
/// Only straight lines can be offset: `quad_to` and `curve_to` panic. Put a
/// [`FlattenBuilder`](crate::FlattenBuilder) in front to offset curves.
///
/// [`Vec2::turn_90`]: crate::Vec2::turn_90
#[derive(Clone, Debug)]
pub struct OffsetBuilder<B> {
    target: B,
    distance: f64,
    miter_limit: f64,
    tol: Tolerances,
    points: Vec<Point>,
    cursor: PathCursor,
}

impl<B: PathBuilder> OffsetBuilder<B> {
    /// Offset the stream by `distance`.
    pub fn new(target: B, distance: f64) -> OffsetBuilder<B> {
        OffsetBuilder {
            target,
            distance,
            miter_limit: 4.0,
            tol: Tolerances::DEFAULT,
            points: Vec::new(),
            cursor: PathCursor::new(),
        }
    }

    /// Set the miter limit, as a multiple of the offset distance.
    ///
    /// The default is 4.
    pub fn with_miter_limit(mut self, miter_limit: f64) -> OffsetBuilder<B> {
        self.miter_limit = miter_limit;
        self
    }

    /// Set the tolerances for the self-intersection search.
    pub fn with_tolerances(mut self, tol: Tolerances) -> OffsetBuilder<B> {
        self.tol = tol;
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

    fn flush(&mut self, closed: bool) {
        let mut points = std::mem::take(&mut self.points);
        points.dedup();
        if closed && points.len() > 1 && points.first() == points.last() {
            points.pop();
        }
        if points.len() < 2 {
            return;
        }
        let shifted = self.shift(&points, closed);
        let joined = self.join(&shifted, closed);
        let cleaned = remove_loops(joined, closed, &self.tol);
        let mut iter = cleaned.into_iter();
        if let Some(p) = iter.next() {
            self.target.move_to(p);
        }
        for p in iter {
            self.target.line_to(p);
        }
        if closed {
            self.target.close_path();
        }
    }

    fn shift(&self, points: &[Point], closed: bool) -> Vec<Line> {
        let mut lines: Vec<Line> = points
            .windows(2)
            .map(|w| Line::new(w[0], w[1]))
            .collect();
        if closed && points.len() > 2 {
            if let (Some(&last), Some(&first)) = (points.last(), points.first()) {
                lines.push(Line::new(last, first));
            }
        }
        lines
            .into_iter()
            .map(|line| {
                let v = geom::perp(line.p0, line.p1) * self.distance;
                Line::new(line.p0 + v, line.p1 + v)
            })
            .collect()
    }

    fn join(&self, lines: &[Line], closed: bool) -> Vec<Point> {
        let limit = self.miter_limit * self.distance.abs();
        let mut out = Vec::with_capacity(lines.len() + 1);
        let corner = |out: &mut Vec<Point>, a: Line, b: Line| {
            match geom::line_intersection(a, b, limit) {
                Some(p) => out.push(p),
                None => {
                    out.push(a.p1);
                    out.push(b.p0);
                }
            }
        };
        let (Some(&first), Some(&last)) = (lines.first(), lines.last()) else {
            return out;
        };
        if closed {
            corner(&mut out, last, first);
        } else {
            out.push(first.p0);
        }
        for pair in lines.windows(2) {
            corner(&mut out, pair[0], pair[1]);
        }
        if !closed {
            out.push(last.p1);
        } else if out.len() > 1 && out.first() == out.last() {
            out.pop();
        }
        out
    }
}

/// Cut out the loops of a polyline: wherever two non-adjacent edges cross,
/// the vertices between them are replaced by the crossing point.
fn remove_loops(mut points: Vec<Point>, closed: bool, tol: &Tolerances) -> Vec<Point> {
    'scan: loop {
        let n = points.len();
        let edges = if closed { n } else { n.saturating_sub(1) };
        for i in 0..edges {
            for j in i + 2..edges {
                // In a closed polyline the last edge touches the first.
                if closed && i == 0 && j == edges - 1 {
                    continue;
                }
                let a = Line::new(points[i], points[(i + 1) % n]);
                let b = Line::new(points[j], points[(j + 1) % n]);
                let hits = intersect_line_line(a, b, tol);
                if hits.status() == IntersectionStatus::Intersection {
                    let p = hits.first_point();
                    trace!(i, j, point = ?p, "offset loop removed");
                    points.splice(i + 1..=j, [p]);
                    continue 'scan;
                }
            }
        }
        return points;
    }
}

impl<B: PathBuilder> PathBuilder for OffsetBuilder<B> {
    fn move_to(&mut self, p: Point) {
        self.flush(false);
        self.points.push(p);
        self.cursor.push(PathEl::MoveTo(p));
    }

    fn line_to(&mut self, p: Point) {
        if self.points.is_empty() {
            self.points
                .push(self.cursor.last_point().unwrap_or(Point::ZERO));
        }
        self.points.push(p);
        self.cursor.push(PathEl::LineTo(p));
    }

    fn quad_to(&mut self, _p1: Point, _p2: Point) {
        panic!("OffsetBuilder only offsets lines; flatten curves first");
    }

    fn curve_to(&mut self, _p1: Point, _p2: Point, _p3: Point) {
        panic!("OffsetBuilder only offsets lines; flatten curves first");
    }

    fn close_path(&mut self) {
        self.flush(true);
        self.cursor.push(PathEl::ClosePath);
    }

    fn finish(&mut self) {
        self.flush(false);
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
        parse_svg_path, BezPath, FlattenBuilder, OffsetBuilder, PathBuilder, PathEl, Point,
    };

    fn offset(data: &str, distance: f64) -> BezPath {
        let mut offset = OffsetBuilder::new(BezPath::new(), distance);
        parse_svg_path(data, &mut offset).unwrap();
        offset.finish();
        offset.into_inner()
    }

    fn assert_points(path: &BezPath, expected: &[(f64, f64)]) {
        let points: Vec<Point> = path
            .elements()
            .iter()
            .filter_map(|el| match el {
                PathEl::MoveTo(p) | PathEl::LineTo(p) => Some(*p),
                _ => None,
            })
            .collect();
        assert_eq!(points.len(), expected.len(), "{points:?}");
        for (p, e) in points.iter().zip(expected) {
            assert!(p.distance(Point::from(*e)) < 1e-9, "{p:?} != {e:?}");
        }
    }

    #[test]
    fn shifts_a_line() {
        // turn_90 of +x is +y.
        assert_points(&offset("M0 0 L10 0", 2.0), &[(0.0, 2.0), (10.0, 2.0)]);
        assert_points(&offset("M0 0 L10 0", -2.0), &[(0.0, -2.0), (10.0, -2.0)]);
    }

    #[test]
    fn miter_joins() {
        let path = offset("M0 0 L10 0 L10 10", -1.0);
        assert_points(&path, &[(0.0, -1.0), (11.0, -1.0), (11.0, 10.0)]);
    }

    #[test]
    fn closed_square_grows() {
        let path = offset("M0 0 L10 0 L10 10 L0 10 Z", -1.0);
        assert_points(&path, &[(-1.0, -1.0), (11.0, -1.0), (11.0, 11.0), (-1.0, 11.0)]);
        assert_eq!(path.elements().last(), Some(&PathEl::ClosePath));
    }

    #[test]
    fn sharp_turns_are_bevelled() {
        // Nearly reversing direction puts the miter point far away.
        let path = offset("M0 0 L10 0 L0 0.1", 1.0);
        assert_eq!(path.elements().len(), 4);
    }

    #[test]
    fn loops_are_removed() {
        // The shifted last edge crosses the shifted first edge, cutting off
        // the corner between them.
        let path = offset("M0 0 L10 0 L10 1 L0 6", 2.0);
        assert_eq!(path.elements().len(), 3, "{:?}", path.elements());
        match path.elements()[1] {
            PathEl::LineTo(p) => {
                assert!(p.distance(Point::new(3.527864045, 2.0)) < 1e-6, "{p:?}");
            }
            el => panic!("unexpected {el:?}"),
        }
    }

    #[test]
    #[should_panic(expected = "flatten curves first")]
    fn curves_panic() {
        offset("M0 0 Q5 5 10 0", 1.0);
    }

    #[test]
    fn flattened_curves_offset() {
        let mut chain = FlattenBuilder::new(OffsetBuilder::new(BezPath::new(), 1.0), 0.01);
        parse_svg_path("M0 0 Q5 5 10 0", &mut chain).unwrap();
        chain.finish();
        let path = chain.into_inner().into_inner();
        assert!(path.elements().len() > 3);
    }
}
