// Copyright 2026 the Draftgeom Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Circles, the primitive that clipping filters cut paths against.

use std::ops::{Add, Sub};

use crate::{Point, Vec2};

/// A circle.
#[derive(Clone, Copy, Default, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Circle {
    /// The center.
    pub center: Point,
    /// The radius.
    pub radius: f64,
}

impl Circle {
    /// A new circle from center and radius.
    #[inline]
    pub fn new(center: impl Into<Point>, radius: f64) -> Circle {
        Circle {
            center: center.into(),
            radius,
        }
    }

    /// Whether the point lies strictly inside the circle.
    #[inline]
    pub fn contains(&self, pt: Point) -> bool {
        pt.distance_squared(self.center) < self.radius * self.radius
    }

    /// Is this circle finite?
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.center.is_finite() && self.radius.is_finite()
    }
}

impl Add<Vec2> for Circle {
    type Output = Circle;

    #[inline]
    fn add(self, v: Vec2) -> Circle {
        Circle::new(self.center + v, self.radius)
    }
}

impl Sub<Vec2> for Circle {
    type Output = Circle;

    #[inline]
    fn sub(self, v: Vec2) -> Circle {
        Circle::new(self.center - v, self.radius)
    }
}

#[cfg(test)]
mod tests {
    use crate::{Circle, Point, Vec2};

    #[test]
    fn contains() {
        let c = Circle::new((1.0, 1.0), 2.0) + Vec2::new(1.0, 0.0);
        assert!(c.contains(Point::new(2.0, 2.5)));
        assert!(!c.contains(Point::new(4.0, 1.0)));
        assert!(!c.contains(Point::new(5.0, 1.0)));
    }
}
