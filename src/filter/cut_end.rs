// Copyright 2026 the Draftgeom Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use tracing::trace;

use super::indexed_segments;
use crate::{
    intersect_seg_circle, BezPath, Circle, IntersectionStatus, ParamCurve, PathBuilder, PathEl,
    Point, Tolerances,
};

/// Cuts off the end of a path that lies inside a circle.
///
/// The mirror image of [`ClipStartBuilder`](crate::ClipStartBuilder): the
/// whole stream is buffered, and on `finish` the segments are searched from
/// the end for the last one crossing the circle. Everything before that
/// crossing is forwarded, the crossing segment split at it.
///
/// A path ending outside the circle is forwarded unchanged. A path ending
/// inside without ever crossing it forwards nothing but `finish`.
#[derive(Clone, Debug)]
pub struct CutEndBuilder<B> {
    target: B,
    circle: Circle,
    tol: Tolerances,
    path: BezPath,
}

impl<B: PathBuilder> CutEndBuilder<B> {
    /// Cut the end of the stream against `circle`.
    pub fn new(target: B, circle: Circle) -> CutEndBuilder<B> {
        CutEndBuilder {
            target,
            circle,
            tol: Tolerances::DEFAULT,
            path: BezPath::new(),
        }
    }

    /// Set the tolerances for the crossing search.
    pub fn with_tolerances(mut self, tol: Tolerances) -> CutEndBuilder<B> {
        self.tol = tol;
        self
    }

    /// The downstream builder.
    pub fn target(&self) -> &B {
        &self.target
    }

    /// Consume the filter, returning the downstream builder.
    pub fn into_inner(self) -> B {
        self.target
    }

    fn flush(&mut self) {
        let Some(end) = PathBuilder::last_point(&self.path) else {
            return;
        };
        let elements = std::mem::take(&mut self.path).into_elements();
        if !self.circle.contains(end) {
            for el in elements {
                self.target.push(el);
            }
            return;
        }
        for (i, seg) in indexed_segments(&elements).into_iter().rev() {
            let hits = intersect_seg_circle(seg, self.circle, &self.tol);
            if hits.status() != IntersectionStatus::Intersection {
                continue;
            }
            let t = hits.last_t();
            trace!(segment = i, t, "cut-end parameter chosen");
            let (before, _) = seg.split(t);
            for &el in &elements[..i] {
                self.target.push(el);
            }
            self.target.push(before.as_path_el());
            return;
        }
        trace!("cut-end found no crossing");
    }
}

impl<B: PathBuilder> PathBuilder for CutEndBuilder<B> {
    fn move_to(&mut self, p: Point) {
        self.path.push(PathEl::MoveTo(p));
    }

    fn line_to(&mut self, p: Point) {
        self.path.push(PathEl::LineTo(p));
    }

    fn quad_to(&mut self, p1: Point, p2: Point) {
        self.path.push(PathEl::QuadTo(p1, p2));
    }

    fn curve_to(&mut self, p1: Point, p2: Point, p3: Point) {
        self.path.push(PathEl::CurveTo(p1, p2, p3));
    }

    fn close_path(&mut self) {
        self.path.push(PathEl::ClosePath);
    }

    fn finish(&mut self) {
        self.flush();
        self.target.finish();
    }

    fn last_point(&self) -> Option<Point> {
        PathBuilder::last_point(&self.path)
    }

    fn last_control_point(&self) -> Option<Point> {
        PathBuilder::last_control_point(&self.path)
    }
}
