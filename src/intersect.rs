// Copyright 2026 the Draftgeom Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Intersection tests between segments, circles and paths.
//!
//! Every test returns an [`Intersection`]: a status plus the crossing
//! parameters, sorted ascending. Degenerate input is never an error; it is
//! classified by [`IntersectionStatus`].

use std::slice;

use smallvec::SmallVec;

use crate::geom::distance_from_line;
use crate::{
    BezPath, Circle, CubicBez, Line, ParamCurve, PathSeg, Point, Polynomial, QuadBez, Roots,
    Tolerances,
};

/// How two shapes relate.
///
/// Only [`IntersectionStatus::Intersection`] carries hits; every other variant
/// explains why there are none.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum IntersectionStatus {
    /// The shapes cross at one or more points.
    Intersection,
    /// The shapes do not meet, and nothing more specific applies.
    NoIntersection,
    /// The first shape lies entirely inside the second.
    Inside,
    /// The first shape lies entirely outside the second.
    Outside,
    /// The shapes touch without crossing.
    Tangent,
    /// Two lines lie on top of each other.
    Coincident,
    /// Two lines are parallel and apart.
    Parallel,
}

/// A single crossing.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IntersectionPoint {
    /// The parameter on the first shape.
    pub t: f64,
    /// The crossing point.
    pub point: Point,
}

/// The result of an intersection test.
#[derive(Clone, Debug, PartialEq)]
pub struct Intersection {
    status: IntersectionStatus,
    hits: SmallVec<[IntersectionPoint; 4]>,
}

impl Intersection {
    /// A result without hits.
    ///
    /// # Panics
    ///
    /// Panics if `status` is [`IntersectionStatus::Intersection`], which
    /// requires at least one hit. Use [`Intersection::from_hits`] instead.
    pub fn new(status: IntersectionStatus) -> Intersection {
        assert_ne!(
            status,
            IntersectionStatus::Intersection,
            "an intersection needs at least one hit"
        );
        Intersection {
            status,
            hits: SmallVec::new(),
        }
    }

    /// A result from a set of hits, in any order.
    ///
    /// The hits are sorted by parameter. An empty set gives
    /// [`IntersectionStatus::NoIntersection`].
    pub fn from_hits(hits: impl IntoIterator<Item = IntersectionPoint>) -> Intersection {
        let mut hits: SmallVec<[IntersectionPoint; 4]> = hits.into_iter().collect();
        hits.sort_by(|a, b| a.t.total_cmp(&b.t));
        let status = if hits.is_empty() {
            IntersectionStatus::NoIntersection
        } else {
            IntersectionStatus::Intersection
        };
        Intersection { status, hits }
    }

    /// The status.
    #[inline]
    pub fn status(&self) -> IntersectionStatus {
        self.status
    }

    /// Whether there are no hits.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    /// The number of hits.
    #[inline]
    pub fn len(&self) -> usize {
        self.hits.len()
    }

    /// The hits, sorted ascending by parameter.
    #[inline]
    pub fn hits(&self) -> &[IntersectionPoint] {
        &self.hits
    }

    /// Iterate over the hits.
    #[inline]
    pub fn iter(&self) -> slice::Iter<'_, IntersectionPoint> {
        self.hits.iter()
    }

    /// The smallest parameter.
    ///
    /// # Panics
    ///
    /// Panics if there are no hits. Check [`Intersection::is_empty`] first.
    pub fn first_t(&self) -> f64 {
        self.first().t
    }

    /// The largest parameter.
    ///
    /// # Panics
    ///
    /// Panics if there are no hits.
    pub fn last_t(&self) -> f64 {
        self.last().t
    }

    /// The point with the smallest parameter.
    ///
    /// # Panics
    ///
    /// Panics if there are no hits.
    pub fn first_point(&self) -> Point {
        self.first().point
    }

    /// The point with the largest parameter.
    ///
    /// # Panics
    ///
    /// Panics if there are no hits.
    pub fn last_point(&self) -> Point {
        self.last().point
    }

    fn first(&self) -> &IntersectionPoint {
        match self.hits.first() {
            Some(hit) => hit,
            None => panic!("no hits in a {:?} result", self.status),
        }
    }

    fn last(&self) -> &IntersectionPoint {
        match self.hits.last() {
            Some(hit) => hit,
            None => panic!("no hits in a {:?} result", self.status),
        }
    }
}

impl<'a> IntoIterator for &'a Intersection {
    type Item = &'a IntersectionPoint;
    type IntoIter = slice::Iter<'a, IntersectionPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.hits.iter()
    }
}

/// Intersect a line segment with a circle.
///
/// When neither end of the segment lies on the circle and there is no
/// crossing, the status tells whether the segment is [`Inside`] or
/// [`Outside`]. A segment touching the circle is [`Tangent`].
///
/// [`Inside`]: IntersectionStatus::Inside
/// [`Outside`]: IntersectionStatus::Outside
/// [`Tangent`]: IntersectionStatus::Tangent
pub fn intersect_line_circle(line: Line, circle: Circle, tol: &Tolerances) -> Intersection {
    let d = line.p1 - line.p0;
    let f = line.p0 - circle.center;
    let a = d.hypot2();
    let b = 2.0 * d.dot(f);
    let c = f.hypot2() - circle.radius * circle.radius;
    if a == 0.0 {
        return Intersection::new(if c < 0.0 {
            IntersectionStatus::Inside
        } else {
            IntersectionStatus::Outside
        });
    }
    let deter = b * b - 4.0 * a * c;
    // deter / 4a is r² minus the squared distance from the center to the line.
    if (deter / (4.0 * a)).abs() <= tol.epsilon {
        return Intersection::new(IntersectionStatus::Tangent);
    }
    if deter < 0.0 {
        return Intersection::new(IntersectionStatus::Outside);
    }
    let e = deter.sqrt();
    let u1 = (-b + e) / (2.0 * a);
    let u2 = (-b - e) / (2.0 * a);
    let in_range = |u: f64| (0.0..=1.0).contains(&u);
    if !in_range(u1) && !in_range(u2) {
        let same_side = (u1 < 0.0 && u2 < 0.0) || (u1 > 1.0 && u2 > 1.0);
        return Intersection::new(if same_side {
            IntersectionStatus::Outside
        } else {
            IntersectionStatus::Inside
        });
    }
    Intersection::from_hits(
        [u2, u1]
            .into_iter()
            .filter(|u| in_range(*u))
            .map(|t| IntersectionPoint {
                t,
                point: line.eval(t),
            }),
    )
}

/// Intersect a quadratic Bézier with a circle.
pub fn intersect_quad_circle(quad: QuadBez, circle: Circle, tol: &Tolerances) -> Intersection {
    let (x, y) = quad.polynomials();
    curve_circle(x, y, quad.p0, circle, tol, |t| quad.eval(t))
}

/// Intersect a cubic Bézier with a circle.
pub fn intersect_cubic_circle(cubic: CubicBez, circle: Circle, tol: &Tolerances) -> Intersection {
    let (x, y) = cubic.polynomials();
    curve_circle(x, y, cubic.p0, circle, tol, |t| cubic.eval(t))
}

/// Intersect any segment with a circle.
pub fn intersect_seg_circle(seg: PathSeg, circle: Circle, tol: &Tolerances) -> Intersection {
    match seg {
        PathSeg::Line(line) => intersect_line_circle(line, circle, tol),
        PathSeg::Quad(quad) => intersect_quad_circle(quad, circle, tol),
        PathSeg::Cubic(cubic) => intersect_cubic_circle(cubic, circle, tol),
    }
}

/// Roots of `|curve(t) - center|² - r²` on `[0, 1]`, classified.
fn curve_circle(
    x: Polynomial,
    y: Polynomial,
    start: Point,
    circle: Circle,
    tol: &Tolerances,
    eval: impl Fn(f64) -> Point,
) -> Intersection {
    let dx = &x - &Polynomial::new(&[circle.center.x]);
    let dy = &y - &Polynomial::new(&[circle.center.y]);
    let r2 = circle.radius * circle.radius;
    let dist = &(&(&dx * &dx) + &(&dy * &dy)) - &Polynomial::new(&[r2]);
    let roots = dist.roots_in_interval_with(0.0, 1.0, tol);
    if roots.is_empty() {
        return Intersection::new(if circle.contains(start) {
            IntersectionStatus::Inside
        } else {
            IntersectionStatus::Outside
        });
    }
    let slope = dist.deriv();
    let (x_deriv, y_deriv) = (x.deriv(), y.deriv());
    // On the circle the slope is 2·r·|c′|·cos θ, θ being the angle between
    // the curve and the radius; near zero it touches without crossing.
    let crossings = roots
        .into_iter()
        .filter(|&t| {
            let speed = x_deriv.eval(t).hypot(y_deriv.eval(t));
            let limit = tol.epsilon.sqrt() * 2.0 * circle.radius * speed;
            slope.eval(t).abs() > limit
        })
        .map(|t| IntersectionPoint { t, point: eval(t) });
    let result = Intersection::from_hits(crossings);
    if result.is_empty() {
        Intersection::new(IntersectionStatus::Tangent)
    } else {
        result
    }
}

/// Intersect two line segments.
///
/// The parameter of each hit is on `a`. Lines closer to parallel than
/// `tol.epsilon` (relative to their lengths) are [`Coincident`] when `a`
/// lies on the infinite line through `b`, within `tol.geometric`, and
/// [`Parallel`] otherwise. Coincident segments report no hits; the caller
/// picks a representative endpoint.
///
/// [`Coincident`]: IntersectionStatus::Coincident
/// [`Parallel`]: IntersectionStatus::Parallel
pub fn intersect_line_line(a: Line, b: Line, tol: &Tolerances) -> Intersection {
    let da = a.p1 - a.p0;
    let db = b.p1 - b.p0;
    let ab = a.p0 - b.p0;
    let ua_t = db.cross(ab);
    let ub_t = da.cross(ab);
    let u_b = da.cross(db);
    if u_b.abs() > tol.epsilon * da.hypot() * db.hypot() {
        let ua = ua_t / u_b;
        let ub = ub_t / u_b;
        if (0.0..=1.0).contains(&ua) && (0.0..=1.0).contains(&ub) {
            return Intersection::from_hits([IntersectionPoint {
                t: ua,
                point: a.eval(ua),
            }]);
        }
        return Intersection::new(IntersectionStatus::NoIntersection);
    }
    if distance_from_line(a.p0, b.p0, b.p1) <= tol.geometric
        && distance_from_line(a.p1, b.p0, b.p1) <= tol.geometric
    {
        Intersection::new(IntersectionStatus::Coincident)
    } else {
        Intersection::new(IntersectionStatus::Parallel)
    }
}

/// Intersect a quadratic Bézier with a line segment.
///
/// The parameter of each hit is on the curve.
pub fn intersect_quad_line(quad: QuadBez, line: Line, tol: &Tolerances) -> Intersection {
    let (x, y) = quad.polynomials();
    curve_line(x, y, line, tol, |t| quad.eval(t))
}

/// Intersect a cubic Bézier with a line segment.
///
/// The parameter of each hit is on the curve.
pub fn intersect_cubic_line(cubic: CubicBez, line: Line, tol: &Tolerances) -> Intersection {
    let (x, y) = cubic.polynomials();
    curve_line(x, y, line, tol, |t| cubic.eval(t))
}

/// Roots of the implicit line equation along the curve, restricted to both
/// the curve's and the segment's parameter range.
fn curve_line(
    x: Polynomial,
    y: Polynomial,
    line: Line,
    tol: &Tolerances,
    eval: impl Fn(f64) -> Point,
) -> Intersection {
    let d = line.p1 - line.p0;
    let len2 = d.hypot2();
    if len2 == 0.0 {
        return Intersection::new(IntersectionStatus::NoIntersection);
    }
    let n = d.turn_90();
    let implicit = &(x - Polynomial::new(&[line.p0.x])) * &Polynomial::new(&[n.x])
        + &(y - Polynomial::new(&[line.p0.y])) * &Polynomial::new(&[n.y]);
    let roots = unit_roots(&implicit, tol);
    Intersection::from_hits(roots.into_iter().filter_map(|t| {
        let point = eval(t);
        let s = (point - line.p0).dot(d) / len2;
        (s >= -tol.epsilon && s <= 1.0 + tol.epsilon).then_some(IntersectionPoint { t, point })
    }))
}

/// Closed-form roots clamped into `[0, 1]`, allowing `tol.epsilon` of slack.
fn unit_roots(p: &Polynomial, tol: &Tolerances) -> Roots {
    if p.simplify(tol.epsilon).degree() == 0 {
        return Roots::new();
    }
    p.roots_with(tol)
        .into_iter()
        .filter(|t| *t >= -tol.epsilon && *t <= 1.0 + tol.epsilon)
        .map(|t| t.clamp(0.0, 1.0))
        .collect()
}

/// Hit-test a point against the outline of a path.
///
/// If some part of the outline lies within `radius` of `p`, the result has a
/// single hit at the nearest outline point. Its parameter is normalized over
/// the whole path: segment `i` of `n` covers `[i / n, (i + 1) / n]`.
/// Otherwise the status is [`Inside`] or [`Outside`], by the non-zero
/// winding rule on the path flattened to `tol.flatness`.
///
/// [`Inside`]: IntersectionStatus::Inside
/// [`Outside`]: IntersectionStatus::Outside
pub fn intersect_point_path(
    p: Point,
    path: &BezPath,
    radius: f64,
    tol: &Tolerances,
) -> Intersection {
    let segments: Vec<PathSeg> = path.segments().collect();
    let n = segments.len() as f64;
    let mut best: Option<(f64, IntersectionPoint)> = None;
    for (i, seg) in segments.iter().enumerate() {
        let (t, dist2) = seg.nearest(p, tol.flatness);
        if dist2 <= radius * radius && best.map_or(true, |(d, _)| dist2 < d) {
            let hit = IntersectionPoint {
                t: (i as f64 + t) / n,
                point: seg.eval(t),
            };
            best = Some((dist2, hit));
        }
    }
    match best {
        Some((_, hit)) => Intersection::from_hits([hit]),
        None if path.contains_within(p, tol.flatness) => {
            Intersection::new(IntersectionStatus::Inside)
        }
        None => Intersection::new(IntersectionStatus::Outside),
    }
}
