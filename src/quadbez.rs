// Copyright 2026 the Draftgeom Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Quadratic Bézier segments.

use std::ops::Mul;

use crate::{Affine, CubicBez, Line, ParamCurve, ParamCurveDeriv, Point, Polynomial};

/// A single quadratic Bézier segment.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[allow(missing_docs)]
pub struct QuadBez {
    pub p0: Point,
    pub p1: Point,
    pub p2: Point,
}

impl QuadBez {
    /// Create a new quadratic Bézier segment.
    #[inline]
    pub fn new<P: Into<Point>>(p0: P, p1: P, p2: P) -> QuadBez {
        QuadBez {
            p0: p0.into(),
            p1: p1.into(),
            p2: p2.into(),
        }
    }

    /// Raise the order by 1.
    ///
    /// Returns a cubic Bézier segment that exactly represents this quadratic.
    #[inline]
    pub fn raise(&self) -> CubicBez {
        CubicBez::new(
            self.p0,
            self.p0 + (2.0 / 3.0) * (self.p1 - self.p0),
            self.p2 + (2.0 / 3.0) * (self.p1 - self.p2),
            self.p2,
        )
    }

    /// The x and y coordinates as polynomials in `t`.
    pub fn polynomials(&self) -> (Polynomial, Polynomial) {
        let c0 = self.p0.to_vec2();
        let c1 = 2.0 * (self.p1 - self.p0);
        let c2 = self.p0.to_vec2() - 2.0 * self.p1.to_vec2() + self.p2.to_vec2();
        (
            Polynomial::new(&[c0.x, c1.x, c2.x]),
            Polynomial::new(&[c0.y, c1.y, c2.y]),
        )
    }

    /// Is this curve finite?
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.p0.is_finite() && self.p1.is_finite() && self.p2.is_finite()
    }
}

impl ParamCurve for QuadBez {
    #[inline]
    fn eval(&self, t: f64) -> Point {
        let mt = 1.0 - t;
        (self.p0.to_vec2() * (mt * mt)
            + (self.p1.to_vec2() * (mt * 2.0) + self.p2.to_vec2() * t) * t)
            .to_point()
    }

    /// Subdivide using de Casteljau.
    fn split(&self, t: f64) -> (QuadBez, QuadBez) {
        let p01 = self.p0.lerp(self.p1, t);
        let p12 = self.p1.lerp(self.p2, t);
        let pm = p01.lerp(p12, t);
        (
            QuadBez::new(self.p0, p01, pm),
            QuadBez::new(pm, p12, self.p2),
        )
    }

    #[inline]
    fn start(&self) -> Point {
        self.p0
    }

    #[inline]
    fn end(&self) -> Point {
        self.p2
    }
}

impl ParamCurveDeriv for QuadBez {
    type DerivResult = Line;

    #[inline]
    fn deriv(&self) -> Line {
        Line::new(
            (2.0 * (self.p1 - self.p0)).to_point(),
            (2.0 * (self.p2 - self.p1)).to_point(),
        )
    }
}

impl Mul<QuadBez> for Affine {
    type Output = QuadBez;

    #[inline]
    fn mul(self, other: QuadBez) -> QuadBez {
        QuadBez {
            p0: self * other.p0,
            p1: self * other.p1,
            p2: self * other.p2,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{ParamCurve, ParamCurveDeriv, Point, QuadBez};

    fn assert_near(p0: Point, p1: Point, epsilon: f64) {
        assert!((p1 - p0).hypot() < epsilon, "{p0:?} != {p1:?}");
    }

    #[test]
    fn split_matches_eval() {
        let q = QuadBez::new((0.0, 0.0), (1.0, 2.0), (3.0, 0.0));
        for i in 0..=10 {
            let t = i as f64 / 10.0;
            let (a, b) = q.split(t);
            assert_eq!(a.p2, b.p0);
            assert_near(a.p2, q.eval(t), 1e-12);
            assert_eq!(a.p0, q.p0);
            assert_eq!(b.p2, q.p2);
        }
    }

    #[test]
    fn raise_is_exact() {
        let q = QuadBez::new((0.0, 0.0), (4.0, 6.0), (8.0, -2.0));
        let c = q.raise();
        for i in 0..=8 {
            let t = i as f64 / 8.0;
            assert_near(q.eval(t), c.eval(t), 1e-12);
        }
    }

    #[test]
    fn polynomials_match_eval() {
        let q = QuadBez::new((1.0, 5.0), (2.0, -3.0), (7.0, 4.0));
        let (x, y) = q.polynomials();
        for t in [0.0, 0.3, 0.5, 1.0] {
            assert_near(Point::new(x.eval(t), y.eval(t)), q.eval(t), 1e-12);
        }
        let d = q.deriv();
        assert_near(d.eval(0.5), Point::new(6.0, -1.0), 1e-12);
    }
}
