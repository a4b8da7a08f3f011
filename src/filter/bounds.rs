// Copyright 2026 the Draftgeom Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::{PathBuilder, PathCursor, PathEl, Point, Rect};

/// An accumulator for the bounding box of a set of points.
///
/// Accumulators can be filled independently, on separate threads if need be,
/// and merged with [`combine`](BoundsCalculator::combine), which is
/// commutative and associative. The empty accumulator is its identity.
///
/// # Examples
///
/// ```
/// use draftgeom::{BoundsCalculator, Point, Rect};
///
/// let left: BoundsCalculator = [Point::new(0.0, 5.0), Point::new(2.0, 1.0)].into_iter().collect();
/// let right: BoundsCalculator = [Point::new(9.0, 3.0)].into_iter().collect();
/// assert_eq!(left.combine(right).bounds(), Some(Rect::new(0.0, 1.0, 9.0, 5.0)));
/// assert_eq!(BoundsCalculator::new().bounds(), None);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoundsCalculator {
    min: Point,
    max: Point,
}

impl BoundsCalculator {
    /// An accumulator holding no points.
    #[inline]
    pub const fn new() -> BoundsCalculator {
        BoundsCalculator {
            min: Point::new(f64::INFINITY, f64::INFINITY),
            max: Point::new(f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }

    /// Add a point.
    #[inline]
    pub fn add_point(&mut self, p: Point) {
        self.min = Point::new(self.min.x.min(p.x), self.min.y.min(p.y));
        self.max = Point::new(self.max.x.max(p.x), self.max.y.max(p.y));
    }

    /// Add the corners of a rectangle.
    pub fn add_rect(&mut self, rect: Rect) {
        let rect = rect.abs();
        self.add_point(Point::new(rect.x0, rect.y0));
        self.add_point(Point::new(rect.x1, rect.y1));
    }

    /// Merge two accumulators.
    #[inline]
    #[must_use]
    pub fn combine(self, other: BoundsCalculator) -> BoundsCalculator {
        BoundsCalculator {
            min: Point::new(self.min.x.min(other.min.x), self.min.y.min(other.min.y)),
            max: Point::new(self.max.x.max(other.max.x), self.max.y.max(other.max.y)),
        }
    }

    /// Returns `true` if no point has been added.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x
    }

    /// The bounding box of the points added, if any.
    pub fn bounds(&self) -> Option<Rect> {
        if self.is_empty() {
            None
        } else {
            Some(Rect::new(self.min.x, self.min.y, self.max.x, self.max.y))
        }
    }
}

impl Default for BoundsCalculator {
    fn default() -> BoundsCalculator {
        BoundsCalculator::new()
    }
}

impl FromIterator<Point> for BoundsCalculator {
    fn from_iter<I: IntoIterator<Item = Point>>(iter: I) -> BoundsCalculator {
        let mut calc = BoundsCalculator::new();
        calc.extend(iter);
        calc
    }
}

impl Extend<Point> for BoundsCalculator {
    fn extend<I: IntoIterator<Item = Point>>(&mut self, iter: I) {
        for p in iter {
            self.add_point(p);
        }
    }
}

/// A [`PathBuilder`] that measures the bounding box of a stream.
///
/// Control points are included, so the box contains every curve but may be
/// larger than its tightest bounds.
#[derive(Clone, Debug, Default)]
pub struct BoundsBuilder {
    calc: BoundsCalculator,
    cursor: PathCursor,
}

impl BoundsBuilder {
    /// A builder that has seen no points.
    #[inline]
    pub fn new() -> BoundsBuilder {
        BoundsBuilder::default()
    }

    /// The accumulated bounds.
    #[inline]
    pub fn calculator(&self) -> BoundsCalculator {
        self.calc
    }

    /// The bounding box of the stream so far, if it had any points.
    #[inline]
    pub fn bounds(&self) -> Option<Rect> {
        self.calc.bounds()
    }
}

impl PathBuilder for BoundsBuilder {
    fn move_to(&mut self, p: Point) {
        self.calc.add_point(p);
        self.cursor.push(PathEl::MoveTo(p));
    }

    fn line_to(&mut self, p: Point) {
        self.calc.add_point(p);
        self.cursor.push(PathEl::LineTo(p));
    }

    fn quad_to(&mut self, p1: Point, p2: Point) {
        self.calc.extend([p1, p2]);
        self.cursor.push(PathEl::QuadTo(p1, p2));
    }

    fn curve_to(&mut self, p1: Point, p2: Point, p3: Point) {
        self.calc.extend([p1, p2, p3]);
        self.cursor.push(PathEl::CurveTo(p1, p2, p3));
    }

    fn close_path(&mut self) {
        self.cursor.push(PathEl::ClosePath);
    }

    fn last_point(&self) -> Option<Point> {
        self.cursor.last_point()
    }

    fn last_control_point(&self) -> Option<Point> {
        self.cursor.last_control_point()
    }
}
