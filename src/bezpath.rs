// Copyright 2026 the Draftgeom Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bézier paths (up to cubic).

use std::ops::Mul;

use crate::{
    Affine, CubicBez, Line, ParamCurve, ParamCurveDeriv, PathBuilder, Point, QuadBez, Tolerances,
    Vec2,
};

/// The most lines a single curve is flattened into.
pub const MAX_SUBDIVISIONS: usize = 1 << 16;

/// A path that can contain Bézier segments up to cubic, possibly with
/// multiple subpaths.
///
/// This is the materialized end of a builder chain: it implements
/// [`PathBuilder`] by storing every command, and can [`replay`] them into
/// another builder.
///
/// [`replay`]: BezPath::replay
#[derive(Clone, Default, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BezPath(Vec<PathEl>);

/// The element of a Bézier path.
///
/// A valid path has `MoveTo` at the beginning of each subpath.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PathEl {
    /// Move directly to the point without drawing anything, starting a new
    /// subpath.
    MoveTo(Point),
    /// Draw a line from the current location to the point.
    LineTo(Point),
    /// Draw a quadratic bezier using the current location and the two points.
    QuadTo(Point, Point),
    /// Draw a cubic bezier using the current location and the three points.
    CurveTo(Point, Point, Point),
    /// Close off the path.
    ClosePath,
}

/// A segment of a Bézier path.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PathSeg {
    /// A line segment.
    Line(Line),
    /// A quadratic bezier segment.
    Quad(QuadBez),
    /// A cubic bezier segment.
    Cubic(CubicBez),
}

impl BezPath {
    /// Create a new path.
    #[inline]
    pub fn new() -> BezPath {
        BezPath::default()
    }

    /// Create a path from a vector of path elements.
    #[inline]
    pub fn from_vec(v: Vec<PathEl>) -> BezPath {
        BezPath(v)
    }

    /// Push a generic path element onto the path.
    #[inline]
    pub fn push(&mut self, el: PathEl) {
        self.0.push(el);
    }

    /// Push a "move to" element onto the path.
    pub fn move_to<P: Into<Point>>(&mut self, p: P) {
        self.push(PathEl::MoveTo(p.into()));
    }

    /// Push a "line to" element onto the path.
    pub fn line_to<P: Into<Point>>(&mut self, p: P) {
        self.push(PathEl::LineTo(p.into()));
    }

    /// Push a "quad to" element onto the path.
    pub fn quad_to<P: Into<Point>>(&mut self, p1: P, p2: P) {
        self.push(PathEl::QuadTo(p1.into(), p2.into()));
    }

    /// Push a "curve to" element onto the path.
    pub fn curve_to<P: Into<Point>>(&mut self, p1: P, p2: P, p3: P) {
        self.push(PathEl::CurveTo(p1.into(), p2.into(), p3.into()));
    }

    /// Push a "close path" element onto the path.
    pub fn close_path(&mut self) {
        self.push(PathEl::ClosePath);
    }

    /// Get the path elements.
    #[inline]
    pub fn elements(&self) -> &[PathEl] {
        &self.0
    }

    /// Consume the path, returning its elements.
    #[inline]
    pub fn into_elements(self) -> Vec<PathEl> {
        self.0
    }

    /// Returns an iterator over the path's elements.
    pub fn iter(&self) -> impl Iterator<Item = PathEl> + '_ {
        self.0.iter().copied()
    }

    /// Iterate over the path segments.
    ///
    /// A `ClosePath` yields the closing line, unless the subpath already
    /// ends at its start.
    pub fn segments(&self) -> impl Iterator<Item = PathSeg> + '_ {
        segments(self.iter())
    }

    /// Returns `true` if the path contains no segments.
    pub fn is_empty(&self) -> bool {
        !self
            .0
            .iter()
            .any(|el| matches!(el, PathEl::LineTo(..) | PathEl::QuadTo(..) | PathEl::CurveTo(..)))
    }

    /// Apply an affine transform to the path.
    pub fn apply_affine(&mut self, affine: Affine) {
        for el in self.0.iter_mut() {
            *el = affine * (*el);
        }
    }

    /// Send every element to `builder`, in order.
    ///
    /// This does not call [`PathBuilder::finish`].
    pub fn replay<B: PathBuilder + ?Sized>(&self, builder: &mut B) {
        for el in self.iter() {
            builder.push(el);
        }
    }

    /// Whether `p` is inside the path by the non-zero winding rule.
    ///
    /// Open subpaths are treated as closed, and curves are flattened to
    /// within a tenth of a unit first.
    pub fn contains(&self, p: Point) -> bool {
        self.contains_within(p, Tolerances::DEFAULT.flatness)
    }

    /// Like [`contains`], with curves flattened to within `tolerance`.
    ///
    /// [`contains`]: BezPath::contains
    pub fn contains_within(&self, p: Point, tolerance: f64) -> bool {
        let mut winding = 0;
        let mut add_edge = |a: Point, b: Point| {
            if a.y <= p.y {
                if b.y > p.y && (b - a).cross(p - a) > 0.0 {
                    winding += 1;
                }
            } else if b.y <= p.y && (b - a).cross(p - a) < 0.0 {
                winding -= 1;
            }
        };
        let mut start = None;
        let mut last = Point::ZERO;
        for el in self.iter() {
            match el {
                PathEl::MoveTo(to) => {
                    if let Some(start) = start {
                        add_edge(last, start);
                    }
                    start = Some(to);
                    last = to;
                }
                PathEl::ClosePath => {
                    if let Some(start) = start {
                        add_edge(last, start);
                        last = start;
                    }
                }
                el => {
                    if let Some(seg) = seg_from(last, el) {
                        seg.flatten(tolerance, |a, b| add_edge(a, b));
                        last = seg.end();
                    }
                }
            }
        }
        if let Some(start) = start {
            add_edge(last, start);
        }
        winding != 0
    }
}

impl PathBuilder for BezPath {
    fn move_to(&mut self, p: Point) {
        self.push(PathEl::MoveTo(p));
    }

    fn line_to(&mut self, p: Point) {
        self.push(PathEl::LineTo(p));
    }

    fn quad_to(&mut self, p1: Point, p2: Point) {
        self.push(PathEl::QuadTo(p1, p2));
    }

    fn curve_to(&mut self, p1: Point, p2: Point, p3: Point) {
        self.push(PathEl::CurveTo(p1, p2, p3));
    }

    fn close_path(&mut self) {
        self.push(PathEl::ClosePath);
    }

    fn last_point(&self) -> Option<Point> {
        match self.0.last()? {
            PathEl::MoveTo(p) | PathEl::LineTo(p) | PathEl::QuadTo(_, p) => Some(*p),
            PathEl::CurveTo(_, _, p) => Some(*p),
            PathEl::ClosePath => self.subpath_start(),
        }
    }

    fn last_control_point(&self) -> Option<Point> {
        match self.0.last()? {
            PathEl::QuadTo(p1, _) => Some(*p1),
            PathEl::CurveTo(_, p2, _) => Some(*p2),
            _ => self.last_point(),
        }
    }

    fn push(&mut self, el: PathEl) {
        self.0.push(el);
    }
}

impl BezPath {
    fn subpath_start(&self) -> Option<Point> {
        self.0.iter().rev().find_map(|el| match el {
            PathEl::MoveTo(p) => Some(*p),
            _ => None,
        })
    }
}

impl FromIterator<PathEl> for BezPath {
    fn from_iter<T: IntoIterator<Item = PathEl>>(iter: T) -> Self {
        BezPath(iter.into_iter().collect())
    }
}

impl Extend<PathEl> for BezPath {
    fn extend<I: IntoIterator<Item = PathEl>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl<'a> IntoIterator for &'a BezPath {
    type Item = PathEl;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, PathEl>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter().copied()
    }
}

impl Mul<PathEl> for Affine {
    type Output = PathEl;

    fn mul(self, other: PathEl) -> PathEl {
        match other {
            PathEl::MoveTo(p) => PathEl::MoveTo(self * p),
            PathEl::LineTo(p) => PathEl::LineTo(self * p),
            PathEl::QuadTo(p1, p2) => PathEl::QuadTo(self * p1, self * p2),
            PathEl::CurveTo(p1, p2, p3) => PathEl::CurveTo(self * p1, self * p2, self * p3),
            PathEl::ClosePath => PathEl::ClosePath,
        }
    }
}

impl Mul<PathSeg> for Affine {
    type Output = PathSeg;

    fn mul(self, other: PathSeg) -> PathSeg {
        match other {
            PathSeg::Line(line) => PathSeg::Line(self * line),
            PathSeg::Quad(quad) => PathSeg::Quad(self * quad),
            PathSeg::Cubic(cubic) => PathSeg::Cubic(self * cubic),
        }
    }
}

impl Mul<&BezPath> for Affine {
    type Output = BezPath;

    fn mul(self, other: &BezPath) -> BezPath {
        other.iter().map(|el| self * el).collect()
    }
}

impl Mul<BezPath> for Affine {
    type Output = BezPath;

    fn mul(self, mut other: BezPath) -> BezPath {
        other.apply_affine(self);
        other
    }
}

/// The segment that `el` draws from `last`, if it draws one.
pub(crate) fn seg_from(last: Point, el: PathEl) -> Option<PathSeg> {
    match el {
        PathEl::LineTo(p) => Some(PathSeg::Line(Line::new(last, p))),
        PathEl::QuadTo(p1, p2) => Some(PathSeg::Quad(QuadBez::new(last, p1, p2))),
        PathEl::CurveTo(p1, p2, p3) => Some(PathSeg::Cubic(CubicBez::new(last, p1, p2, p3))),
        PathEl::MoveTo(_) | PathEl::ClosePath => None,
    }
}

/// Iterate over the segments drawn by a sequence of path elements.
pub fn segments<I: IntoIterator<Item = PathEl>>(elements: I) -> Segments<I::IntoIter> {
    Segments {
        elements: elements.into_iter(),
        start: Point::ZERO,
        last: Point::ZERO,
    }
}

/// An iterator that transforms path elements to path segments.
///
/// This struct is created by the [`segments`] function.
pub struct Segments<I: Iterator<Item = PathEl>> {
    elements: I,
    start: Point,
    last: Point,
}

impl<I: Iterator<Item = PathEl>> Iterator for Segments<I> {
    type Item = PathSeg;

    fn next(&mut self) -> Option<PathSeg> {
        for el in &mut self.elements {
            let seg = match el {
                PathEl::MoveTo(p) => {
                    self.start = p;
                    self.last = p;
                    continue;
                }
                PathEl::ClosePath => {
                    if self.last == self.start {
                        continue;
                    }
                    PathSeg::Line(Line::new(self.last, self.start))
                }
                el => match seg_from(self.last, el) {
                    Some(seg) => seg,
                    None => continue,
                },
            };
            self.last = seg.end();
            return Some(seg);
        }
        None
    }
}

impl ParamCurve for PathSeg {
    fn eval(&self, t: f64) -> Point {
        match *self {
            PathSeg::Line(line) => line.eval(t),
            PathSeg::Quad(quad) => quad.eval(t),
            PathSeg::Cubic(cubic) => cubic.eval(t),
        }
    }

    fn split(&self, t: f64) -> (PathSeg, PathSeg) {
        match *self {
            PathSeg::Line(line) => {
                let (a, b) = line.split(t);
                (PathSeg::Line(a), PathSeg::Line(b))
            }
            PathSeg::Quad(quad) => {
                let (a, b) = quad.split(t);
                (PathSeg::Quad(a), PathSeg::Quad(b))
            }
            PathSeg::Cubic(cubic) => {
                let (a, b) = cubic.split(t);
                (PathSeg::Cubic(a), PathSeg::Cubic(b))
            }
        }
    }

    fn start(&self) -> Point {
        match *self {
            PathSeg::Line(line) => line.p0,
            PathSeg::Quad(quad) => quad.p0,
            PathSeg::Cubic(cubic) => cubic.p0,
        }
    }

    fn end(&self) -> Point {
        match *self {
            PathSeg::Line(line) => line.p1,
            PathSeg::Quad(quad) => quad.p2,
            PathSeg::Cubic(cubic) => cubic.p3,
        }
    }
}

impl PathSeg {
    /// The tangent vector at parameter `t`, not normalized.
    pub fn tangent(&self, t: f64) -> Vec2 {
        match *self {
            PathSeg::Line(line) => line.tangent(t),
            PathSeg::Quad(quad) => quad.tangent(t),
            PathSeg::Cubic(cubic) => cubic.tangent(t),
        }
    }

    /// The direction the segment leaves its start point in.
    ///
    /// Uses the first control point that differs from the start, so it is
    /// defined for curves whose first control point coincides with the start.
    /// Returns [`Vec2::ZERO`] for a segment collapsed to a point.
    pub fn start_direction(&self) -> Vec2 {
        let start = self.start();
        self.points()
            .into_iter()
            .skip(1)
            .map(|p| p - start)
            .find(|v| v.hypot2() > 0.0)
            .unwrap_or(Vec2::ZERO)
    }

    /// The direction the segment arrives at its end point in.
    pub fn end_direction(&self) -> Vec2 {
        let end = self.end();
        self.points()
            .into_iter()
            .rev()
            .skip(1)
            .map(|p| end - p)
            .find(|v| v.hypot2() > 0.0)
            .unwrap_or(Vec2::ZERO)
    }

    fn points(&self) -> smallvec::SmallVec<[Point; 4]> {
        match *self {
            PathSeg::Line(l) => smallvec::smallvec![l.p0, l.p1],
            PathSeg::Quad(q) => smallvec::smallvec![q.p0, q.p1, q.p2],
            PathSeg::Cubic(c) => smallvec::smallvec![c.p0, c.p1, c.p2, c.p3],
        }
    }

    /// Returns a new `PathSeg` describing the same path as `self`, but with
    /// the points reversed.
    pub fn reverse(&self) -> PathSeg {
        match *self {
            PathSeg::Line(line) => PathSeg::Line(line.reversed()),
            PathSeg::Quad(q) => PathSeg::Quad(QuadBez::new(q.p2, q.p1, q.p0)),
            PathSeg::Cubic(c) => PathSeg::Cubic(c.reversed()),
        }
    }

    /// The element that draws this segment from its start point.
    pub fn as_path_el(&self) -> PathEl {
        match *self {
            PathSeg::Line(line) => PathEl::LineTo(line.p1),
            PathSeg::Quad(q) => PathEl::QuadTo(q.p1, q.p2),
            PathSeg::Cubic(c) => PathEl::CurveTo(c.p1, c.p2, c.p3),
        }
    }

    /// Number of uniform parameter steps that keep a polyline within
    /// `tolerance` of the segment.
    ///
    /// This is Wang's bound: for degree `n` it is
    /// `⌈√(n(n−1) · M / (8 · tolerance))⌉`, where `M` is the largest second
    /// difference of the control points. Lines need one step, and no
    /// segment gets more than [`MAX_SUBDIVISIONS`].
    pub fn subdivisions(&self, tolerance: f64) -> usize {
        let (degree, m) = match *self {
            PathSeg::Line(_) => return 1,
            PathSeg::Quad(q) => (2.0, (q.p0.to_vec2() - 2.0 * q.p1.to_vec2() + q.p2.to_vec2()).hypot()),
            PathSeg::Cubic(c) => {
                let d0 = c.p0.to_vec2() - 2.0 * c.p1.to_vec2() + c.p2.to_vec2();
                let d1 = c.p1.to_vec2() - 2.0 * c.p2.to_vec2() + c.p3.to_vec2();
                (3.0, d0.hypot().max(d1.hypot()))
            }
        };
        let n = (degree * (degree - 1.0) * m / (8.0 * tolerance)).sqrt().ceil();
        if n.is_nan() {
            1
        } else {
            n.clamp(1.0, MAX_SUBDIVISIONS as f64) as usize
        }
    }

    /// Approximate the segment with lines, calling `callback` with the ends
    /// of each one, in order.
    pub fn flatten(&self, tolerance: f64, mut callback: impl FnMut(Point, Point)) {
        let n = self.subdivisions(tolerance);
        let mut last = self.start();
        for i in 1..=n {
            let p = if i == n {
                self.end()
            } else {
                self.eval(i as f64 / n as f64)
            };
            callback(last, p);
            last = p;
        }
    }

    /// The parameter of the point nearest `p` and the squared distance to it.
    ///
    /// Curves are searched on their flattening, so the result is accurate to
    /// about `accuracy`.
    pub fn nearest(&self, p: Point, accuracy: f64) -> (f64, f64) {
        if let PathSeg::Line(line) = self {
            return line.nearest(p);
        }
        let n = self.subdivisions(accuracy);
        let step = 1.0 / n as f64;
        let mut best = (0.0, f64::INFINITY);
        for i in 0..n {
            let t0 = i as f64 * step;
            let chord = Line::new(self.eval(t0), self.eval(t0 + step));
            let (u, _) = chord.nearest(p);
            let t = (t0 + u * step).clamp(0.0, 1.0);
            let dist2 = p.distance_squared(self.eval(t));
            if dist2 < best.1 {
                best = (t, dist2);
            }
        }
        best
    }
}
