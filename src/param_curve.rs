// Copyright 2026 the Draftgeom Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A trait for curves parametrized by a scalar.

use std::ops::Range;

use crate::{Point, Vec2};

/// A curve parametrized by a scalar.
///
/// The parameter `t` runs from `0` at the start of the curve to `1` at the end.
pub trait ParamCurve: Sized {
    /// Evaluate the curve at parameter `t`.
    ///
    /// Generally `t` is in the range [0..1].
    fn eval(&self, t: f64) -> Point;

    /// Split the curve at parameter `t`.
    ///
    /// The first curve covers `[0, t]` and the second `[t, 1]`. The end of the
    /// first is bit-identical to the start of the second.
    fn split(&self, t: f64) -> (Self, Self);

    /// Get a subsegment of the curve for the given parameter range.
    fn subsegment(&self, range: Range<f64>) -> Self {
        let (_, tail) = self.split(range.start);
        if range.start >= 1.0 {
            return tail;
        }
        let t = (range.end - range.start) / (1.0 - range.start);
        tail.split(t).0
    }

    /// The start point.
    fn start(&self) -> Point {
        self.eval(0.0)
    }

    /// The end point.
    fn end(&self) -> Point {
        self.eval(1.0)
    }
}

/// A differentiable parametrized curve.
pub trait ParamCurveDeriv {
    /// The parametric curve obtained by taking the derivative of this one.
    type DerivResult: ParamCurve;

    /// The derivative of the curve.
    ///
    /// Note that the type of the return value is somewhat inaccurate, as
    /// the derivative of a curve (mapping of param to point) is a mapping
    /// of param to vector. We choose to accept this rather than have a
    /// more complex type scheme.
    fn deriv(&self) -> Self::DerivResult;

    /// The tangent vector at parameter `t`, not normalized.
    #[inline]
    fn tangent(&self, t: f64) -> Vec2 {
        self.deriv().eval(t).to_vec2()
    }
}

/// A trivial "curve" that is just a constant.
#[derive(Clone, Copy, Debug)]
pub struct ConstPoint(pub Point);

impl ParamCurve for ConstPoint {
    #[inline]
    fn eval(&self, _t: f64) -> Point {
        self.0
    }

    #[inline]
    fn split(&self, _t: f64) -> (ConstPoint, ConstPoint) {
        (*self, *self)
    }
}

impl ParamCurveDeriv for ConstPoint {
    type DerivResult = ConstPoint;

    #[inline]
    fn deriv(&self) -> ConstPoint {
        ConstPoint(Point::ZERO)
    }
}
