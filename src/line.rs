// Copyright 2026 the Draftgeom Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lines.

use std::ops::Mul;

use crate::{Affine, ConstPoint, ParamCurve, ParamCurveDeriv, Point};

/// A single line.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Line {
    /// The line's start point.
    pub p0: Point,
    /// The line's end point.
    pub p1: Point,
}

impl Line {
    /// Create a new line.
    #[inline]
    pub fn new(p0: impl Into<Point>, p1: impl Into<Point>) -> Line {
        Line {
            p0: p0.into(),
            p1: p1.into(),
        }
    }

    /// Returns a copy of this `Line` with the end points swapped so that it
    /// points in the opposite direction.
    #[must_use]
    #[inline]
    pub fn reversed(&self) -> Line {
        Line {
            p0: self.p1,
            p1: self.p0,
        }
    }

    /// The length of the line.
    #[inline]
    pub fn length(&self) -> f64 {
        self.p0.distance(self.p1)
    }

    /// The midpoint of the line.
    #[must_use]
    #[inline]
    pub fn midpoint(&self) -> Point {
        self.p0.midpoint(self.p1)
    }

    /// The parameter of the point on the segment nearest `p`, and the
    /// squared distance to it.
    ///
    /// A zero-length segment collapses to its start point.
    pub fn nearest(&self, p: Point) -> (f64, f64) {
        let d = self.p1 - self.p0;
        let len2 = d.hypot2();
        if len2 == 0.0 {
            return (0.0, p.distance_squared(self.p0));
        }
        let t = (d.dot(p - self.p0) / len2).clamp(0.0, 1.0);
        (t, p.distance_squared(self.eval(t)))
    }

    /// Is this line finite?
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.p0.is_finite() && self.p1.is_finite()
    }
}

impl From<(Point, Point)> for Line {
    #[inline]
    fn from((from, to): (Point, Point)) -> Self {
        Line::new(from, to)
    }
}

impl ParamCurve for Line {
    #[inline]
    fn eval(&self, t: f64) -> Point {
        self.p0.lerp(self.p1, t)
    }

    #[inline]
    fn split(&self, t: f64) -> (Line, Line) {
        let p = self.eval(t);
        (Line::new(self.p0, p), Line::new(p, self.p1))
    }

    #[inline]
    fn start(&self) -> Point {
        self.p0
    }

    #[inline]
    fn end(&self) -> Point {
        self.p1
    }
}

impl ParamCurveDeriv for Line {
    type DerivResult = ConstPoint;

    #[inline]
    fn deriv(&self) -> ConstPoint {
        ConstPoint((self.p1 - self.p0).to_point())
    }
}

impl Mul<Line> for Affine {
    type Output = Line;

    #[inline]
    fn mul(self, other: Line) -> Line {
        Line {
            p0: self * other.p0,
            p1: self * other.p1,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{Affine, Line, ParamCurve, ParamCurveDeriv, Point, Vec2};

    #[test]
    fn split_is_continuous() {
        let l = Line::new((0.0, 0.0), (4.0, 2.0));
        let (a, b) = l.split(0.25);
        assert_eq!(a.p1, b.p0);
        assert_eq!(a.p1, Point::new(1.0, 0.5));
        assert_eq!(l.tangent(0.7), Vec2::new(4.0, 2.0));
    }

    #[test]
    fn nearest() {
        let l = Line::new((0.0, 0.0), (10.0, 0.0));
        assert_eq!(l.nearest(Point::new(3.0, 4.0)), (0.3, 16.0));
        assert_eq!(l.nearest(Point::new(-3.0, 4.0)), (0.0, 25.0));
        assert_eq!(l.nearest(Point::new(13.0, 4.0)), (1.0, 25.0));
        let degenerate = Line::new((1.0, 1.0), (1.0, 1.0));
        assert_eq!(degenerate.nearest(Point::new(4.0, 5.0)), (0.0, 25.0));
    }

    #[test]
    fn subsegment_and_transform() {
        let l = Line::new((0.0, 0.0), (8.0, 0.0));
        let s = l.subsegment(0.25..0.75);
        assert!((s.p0.x - 2.0).abs() < 1e-12);
        assert!((s.p1.x - 6.0).abs() < 1e-12);
        let moved = Affine::translate((1.0, 2.0)) * l;
        assert_eq!(moved.reversed().p1, Point::new(1.0, 2.0));
    }
}
