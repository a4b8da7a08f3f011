// Copyright 2026 the Draftgeom Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Free-standing helpers on points and segments.
//!
//! Degenerate input never fails here: a zero-length segment collapses to its
//! start point, and the vector helpers return zero rather than `NaN`.

use crate::{Line, Point, Vec2};

/// Distance from `p` to the infinite line through `a` and `b`.
///
/// If `a` and `b` coincide, this is the distance from `p` to `a`.
pub fn distance_from_line(p: Point, a: Point, b: Point) -> f64 {
    let d = b - a;
    let len = d.hypot();
    if len == 0.0 {
        return p.distance(a);
    }
    d.cross(p - a).abs() / len
}

/// Distance from `p` to the segment from `a` to `b`.
#[inline]
pub fn distance_from_segment(p: Point, a: Point, b: Point) -> f64 {
    Line::new(a, b).nearest(p).1.sqrt()
}

/// The unit normal of the direction from `a` to `b`, turned a quarter turn.
///
/// Returns [`Vec2::ZERO`] when `a` and `b` coincide.
pub fn perp(a: Point, b: Point) -> Vec2 {
    unit(b - a).turn_90()
}

/// `v` scaled to unit length, or [`Vec2::ZERO`] for the zero vector.
pub fn unit(v: Vec2) -> Vec2 {
    let len = v.hypot();
    if len == 0.0 {
        Vec2::ZERO
    } else {
        v / len
    }
}

/// The point where the infinite lines through two segments cross.
///
/// The crossing is rejected when it lies farther than `limit` from the end of
/// `a` or from the start of `b`, which bounds miter joins between consecutive
/// segments. Pass `f64::INFINITY` for no limit. Parallel lines give `None`.
pub fn line_intersection(a: Line, b: Line, limit: f64) -> Option<Point> {
    let da = a.p1 - a.p0;
    let db = b.p1 - b.p0;
    let denom = da.cross(db);
    if denom == 0.0 {
        return None;
    }
    let t = (b.p0 - a.p0).cross(db) / denom;
    let p = a.p0 + t * da;
    if !p.is_finite() || p.distance(a.p1) > limit || p.distance(b.p0) > limit {
        return None;
    }
    Some(p)
}
