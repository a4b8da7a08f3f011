// Copyright 2026 the Draftgeom Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The streaming path sink that producers, filters and materializers share.

use crate::{append_arc, PathEl, Point, Vec2};

/// A sink for a stream of path commands.
///
/// A stream is a sequence of sub-paths, each starting with
/// [`move_to`](PathBuilder::move_to), followed by exactly one call to
/// [`finish`](PathBuilder::finish). Filters buffer state and flush it on
/// `finish`, so a builder must not be reused for a second stream.
///
/// Only the primitive commands and the two position queries are required.
/// Elliptical arcs and smooth (reflected-control) curves are derived from
/// them, so every sink supports them.
///
/// # Examples
///
/// ```
/// use draftgeom::{BezPath, PathBuilder, PathEl, Point, Vec2};
///
/// let mut path = BezPath::new();
/// path.move_to(Point::new(0.0, 0.0));
/// path.arc_to(Vec2::new(5.0, 5.0), 0.0, false, true, Point::new(10.0, 0.0));
/// assert!(matches!(path.elements().last(), Some(PathEl::CurveTo(..))));
/// assert_eq!(path.last_point(), Some(Point::new(10.0, 0.0)));
/// ```
pub trait PathBuilder {
    /// Start a new sub-path at `p`.
    fn move_to(&mut self, p: Point);

    /// Add a straight line to `p`.
    fn line_to(&mut self, p: Point);

    /// Add a quadratic Bézier with control point `p1`, ending at `p2`.
    fn quad_to(&mut self, p1: Point, p2: Point);

    /// Add a cubic Bézier with control points `p1` and `p2`, ending at `p3`.
    fn curve_to(&mut self, p1: Point, p2: Point, p3: Point);

    /// Close the current sub-path with a line back to its start.
    fn close_path(&mut self);

    /// End the stream, flushing any buffered state downstream.
    fn finish(&mut self) {}

    /// The end point of the most recent command, if any.
    fn last_point(&self) -> Option<Point>;

    /// The last control point of the most recent command.
    ///
    /// After a move or a line, this is the same as
    /// [`last_point`](PathBuilder::last_point).
    fn last_control_point(&self) -> Option<Point>;

    /// Add an elliptical arc in SVG endpoint parameterization.
    ///
    /// `x_rotation` is in degrees. The arc is emitted as one cubic per
    /// quarter turn or less, ending exactly at `p`. Coincident endpoints
    /// emit nothing; a zero radius emits a line.
    fn arc_to(&mut self, radii: Vec2, x_rotation: f64, large_arc: bool, sweep: bool, p: Point) {
        append_arc(self, radii, x_rotation.to_radians(), large_arc, sweep, p);
    }

    /// Add a quadratic Bézier whose control point is the reflection of the
    /// previous control point about the current point.
    fn smooth_quad_to(&mut self, p2: Point) {
        let p1 = reflected_control(self.last_point(), self.last_control_point());
        self.quad_to(p1, p2);
    }

    /// Add a cubic Bézier whose first control point is the reflection of the
    /// previous control point about the current point.
    fn smooth_curve_to(&mut self, p2: Point, p3: Point) {
        let p1 = reflected_control(self.last_point(), self.last_control_point());
        self.curve_to(p1, p2, p3);
    }

    /// Replay a stored path element.
    fn push(&mut self, el: PathEl) {
        match el {
            PathEl::MoveTo(p) => self.move_to(p),
            PathEl::LineTo(p) => self.line_to(p),
            PathEl::QuadTo(p1, p2) => self.quad_to(p1, p2),
            PathEl::CurveTo(p1, p2, p3) => self.curve_to(p1, p2, p3),
            PathEl::ClosePath => self.close_path(),
        }
    }
}

fn reflected_control(last: Option<Point>, ctrl: Option<Point>) -> Point {
    match (last, ctrl) {
        (Some(last), Some(ctrl)) => last + (last - ctrl),
        (Some(last), None) => last,
        (None, _) => Point::ZERO,
    }
}

macro_rules! forward_path_builder {
    () => {
        fn move_to(&mut self, p: Point) {
            (**self).move_to(p);
        }

        fn line_to(&mut self, p: Point) {
            (**self).line_to(p);
        }

        fn quad_to(&mut self, p1: Point, p2: Point) {
            (**self).quad_to(p1, p2);
        }

        fn curve_to(&mut self, p1: Point, p2: Point, p3: Point) {
            (**self).curve_to(p1, p2, p3);
        }

        fn close_path(&mut self) {
            (**self).close_path();
        }

        fn finish(&mut self) {
            (**self).finish();
        }

        fn last_point(&self) -> Option<Point> {
            (**self).last_point()
        }

        fn last_control_point(&self) -> Option<Point> {
            (**self).last_control_point()
        }

        fn arc_to(&mut self, radii: Vec2, x_rotation: f64, large_arc: bool, sweep: bool, p: Point) {
            (**self).arc_to(radii, x_rotation, large_arc, sweep, p);
        }

        fn smooth_quad_to(&mut self, p2: Point) {
            (**self).smooth_quad_to(p2);
        }

        fn smooth_curve_to(&mut self, p2: Point, p3: Point) {
            (**self).smooth_curve_to(p2, p3);
        }

        fn push(&mut self, el: PathEl) {
            (**self).push(el);
        }
    };
}

impl<B: PathBuilder + ?Sized> PathBuilder for &mut B {
    forward_path_builder!();
}

impl<B: PathBuilder + ?Sized> PathBuilder for Box<B> {
    forward_path_builder!();
}

/// Tracks the current point of a command stream.
///
/// Filters keep one of these for the stream they receive, so they can
/// answer [`PathBuilder::last_point`] about their input regardless of what
/// they forward.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PathCursor {
    start: Option<Point>,
    last: Option<Point>,
    last_ctrl: Option<Point>,
}

impl PathCursor {
    /// A cursor before any command.
    #[inline]
    pub fn new() -> PathCursor {
        PathCursor::default()
    }

    /// Record a path element.
    pub fn push(&mut self, el: PathEl) {
        match el {
            PathEl::MoveTo(p) => {
                self.start = Some(p);
                self.set(p, p);
            }
            PathEl::LineTo(p) => self.set(p, p),
            PathEl::QuadTo(p1, p2) => self.set(p1, p2),
            PathEl::CurveTo(_, p2, p3) => self.set(p2, p3),
            PathEl::ClosePath => {
                if let Some(start) = self.start {
                    self.set(start, start);
                }
            }
        }
    }

    fn set(&mut self, ctrl: Point, p: Point) {
        self.last_ctrl = Some(ctrl);
        self.last = Some(p);
    }

    /// The start of the current sub-path.
    #[inline]
    pub fn start(&self) -> Option<Point> {
        self.start
    }

    /// The current point.
    #[inline]
    pub fn last_point(&self) -> Option<Point> {
        self.last
    }

    /// The last control point.
    #[inline]
    pub fn last_control_point(&self) -> Option<Point> {
        self.last_ctrl
    }
}

#[cfg(test)]
mod tests {
    use crate::{BezPath, PathBuilder, PathCursor, PathEl, Point};

    #[test]
    fn smooth_curves_reflect_control() {
        let mut path = BezPath::new();
        path.move_to(Point::new(0.0, 0.0));
        path.curve_to(Point::new(0.0, 5.0), Point::new(5.0, 10.0), Point::new(10.0, 10.0));
        path.smooth_curve_to(Point::new(20.0, 0.0), Point::new(20.0, 5.0));
        assert_eq!(
            path.elements()[2],
            PathEl::CurveTo(
                Point::new(15.0, 10.0),
                Point::new(20.0, 0.0),
                Point::new(20.0, 5.0)
            )
        );
        path.line_to(Point::new(30.0, 5.0));
        path.smooth_quad_to(Point::new(40.0, 5.0));
        assert_eq!(
            path.elements()[4],
            PathEl::QuadTo(Point::new(30.0, 5.0), Point::new(40.0, 5.0))
        );
    }

    #[test]
    fn forwards_through_references() {
        fn emit(mut sink: impl PathBuilder) {
            sink.move_to(Point::new(1.0, 1.0));
            sink.line_to(Point::new(2.0, 1.0));
        }
        let mut path = BezPath::new();
        emit(&mut path);
        let mut boxed: Box<dyn PathBuilder> = Box::new(path);
        boxed.close_path();
        assert_eq!(boxed.last_point(), Some(Point::new(1.0, 1.0)));
    }

    #[test]
    fn cursor() {
        let mut cursor = PathCursor::new();
        assert_eq!(cursor.last_point(), None);
        cursor.push(PathEl::MoveTo(Point::new(1.0, 2.0)));
        cursor.push(PathEl::QuadTo(Point::new(3.0, 4.0), Point::new(5.0, 6.0)));
        assert_eq!(cursor.last_control_point(), Some(Point::new(3.0, 4.0)));
        cursor.push(PathEl::ClosePath);
        assert_eq!(cursor.last_point(), Some(Point::new(1.0, 2.0)));
        assert_eq!(cursor.start(), Some(Point::new(1.0, 2.0)));
    }
}
