// Copyright 2026 the Draftgeom Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cubic Bézier segments.

use std::ops::Mul;

use crate::{Affine, ParamCurve, ParamCurveDeriv, Point, Polynomial, QuadBez};

/// A single cubic Bézier segment.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[allow(missing_docs)]
pub struct CubicBez {
    pub p0: Point,
    pub p1: Point,
    pub p2: Point,
    pub p3: Point,
}

impl CubicBez {
    /// Create a new cubic Bézier segment.
    #[inline]
    pub fn new<P: Into<Point>>(p0: P, p1: P, p2: P, p3: P) -> CubicBez {
        CubicBez {
            p0: p0.into(),
            p1: p1.into(),
            p2: p2.into(),
            p3: p3.into(),
        }
    }

    /// The x and y coordinates as polynomials in `t`.
    pub fn polynomials(&self) -> (Polynomial, Polynomial) {
        let p0 = self.p0.to_vec2();
        let p1 = self.p1.to_vec2();
        let p2 = self.p2.to_vec2();
        let p3 = self.p3.to_vec2();
        let c1 = 3.0 * (p1 - p0);
        let c2 = 3.0 * (p0 - 2.0 * p1 + p2);
        let c3 = p3 - p0 + 3.0 * (p1 - p2);
        (
            Polynomial::new(&[p0.x, c1.x, c2.x, c3.x]),
            Polynomial::new(&[p0.y, c1.y, c2.y, c3.y]),
        )
    }

    /// Returns a cubic Bézier segment that traverses this one in reverse.
    #[must_use]
    #[inline]
    pub fn reversed(&self) -> CubicBez {
        CubicBez::new(self.p3, self.p2, self.p1, self.p0)
    }

    /// Is this curve finite?
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.p0.is_finite() && self.p1.is_finite() && self.p2.is_finite() && self.p3.is_finite()
    }
}

impl ParamCurve for CubicBez {
    #[inline]
    fn eval(&self, t: f64) -> Point {
        let mt = 1.0 - t;
        let v = self.p0.to_vec2() * (mt * mt * mt)
            + (self.p1.to_vec2() * (mt * mt * 3.0)
                + (self.p2.to_vec2() * (mt * 3.0) + self.p3.to_vec2() * t) * t)
                * t;
        v.to_point()
    }

    /// Subdivide using de Casteljau.
    ///
    /// Both halves share the same computed split point, so the end of the
    /// first is exactly the start of the second.
    fn split(&self, t: f64) -> (CubicBez, CubicBez) {
        let p01 = self.p0.lerp(self.p1, t);
        let p12 = self.p1.lerp(self.p2, t);
        let p23 = self.p2.lerp(self.p3, t);
        let p012 = p01.lerp(p12, t);
        let p123 = p12.lerp(p23, t);
        let pm = p012.lerp(p123, t);
        (
            CubicBez::new(self.p0, p01, p012, pm),
            CubicBez::new(pm, p123, p23, self.p3),
        )
    }

    #[inline]
    fn start(&self) -> Point {
        self.p0
    }

    #[inline]
    fn end(&self) -> Point {
        self.p3
    }
}

impl ParamCurveDeriv for CubicBez {
    type DerivResult = QuadBez;

    #[inline]
    fn deriv(&self) -> QuadBez {
        QuadBez::new(
            (3.0 * (self.p1 - self.p0)).to_point(),
            (3.0 * (self.p2 - self.p1)).to_point(),
            (3.0 * (self.p3 - self.p2)).to_point(),
        )
    }
}

impl Mul<CubicBez> for Affine {
    type Output = CubicBez;

    #[inline]
    fn mul(self, c: CubicBez) -> CubicBez {
        CubicBez {
            p0: self * c.p0,
            p1: self * c.p1,
            p2: self * c.p2,
            p3: self * c.p3,
        }
    }
}
