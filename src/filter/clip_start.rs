// Copyright 2026 the Draftgeom Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use tracing::trace;

use crate::bezpath::seg_from;
use crate::{
    intersect_seg_circle, Circle, IntersectionStatus, Line, ParamCurve, PathBuilder, PathCursor,
    PathEl, PathSeg, Point, Tolerances,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ClipState {
    AwaitingCrossing,
    Passthrough,
}

/// Drops the start of a path that lies inside a circle.
///
/// Commands are held back until the path first leaves the circle. The
/// crossing segment is split there, the remainder is forwarded after a
/// `move_to` at the crossing point, and from then on every command passes
/// through unchanged. A path that starts outside (or on) the circle passes
/// through entirely; one that never leaves it forwards nothing but `finish`.
///
/// This is how a connector is trimmed back to the outline of the figure it
/// starts at.
#[derive(Clone, Debug)]
pub struct ClipStartBuilder<B> {
    target: B,
    circle: Circle,
    tol: Tolerances,
    state: ClipState,
    cursor: PathCursor,
}

impl<B: PathBuilder> ClipStartBuilder<B> {
    /// Clip the start of the stream against `circle`.
    pub fn new(target: B, circle: Circle) -> ClipStartBuilder<B> {
        ClipStartBuilder {
            target,
            circle,
            tol: Tolerances::DEFAULT,
            state: ClipState::AwaitingCrossing,
            cursor: PathCursor::new(),
        }
    }

    /// Set the tolerances for the crossing search.
    pub fn with_tolerances(mut self, tol: Tolerances) -> ClipStartBuilder<B> {
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

    fn segment(&mut self, el: PathEl) {
        let last = self.cursor.last_point().unwrap_or(Point::ZERO);
        self.cursor.push(el);
        match self.state {
            ClipState::Passthrough => self.target.push(el),
            ClipState::AwaitingCrossing => {
                if let Some(seg) = seg_from(last, el) {
                    self.try_cross(seg);
                }
            }
        }
    }

    /// Forward the part of `seg` after its first exit from the circle.
    fn try_cross(&mut self, seg: PathSeg) {
        let hits = intersect_seg_circle(seg, self.circle, &self.tol);
        if hits.status() != IntersectionStatus::Intersection {
            return;
        }
        let t = hits.first_t();
        let (_, after) = seg.split(t);
        trace!(t, point = ?after.start(), "clip-start crossing found");
        self.state = ClipState::Passthrough;
        self.target.move_to(after.start());
        self.target.push(after.as_path_el());
    }
}

impl<B: PathBuilder> PathBuilder for ClipStartBuilder<B> {
    fn move_to(&mut self, p: Point) {
        self.cursor.push(PathEl::MoveTo(p));
        if self.state == ClipState::AwaitingCrossing && !self.circle.contains(p) {
            trace!(point = ?p, "clip-start path begins outside the circle");
            self.state = ClipState::Passthrough;
        }
        if self.state == ClipState::Passthrough {
            self.target.move_to(p);
        }
    }

    fn line_to(&mut self, p: Point) {
        self.segment(PathEl::LineTo(p));
    }

    fn quad_to(&mut self, p1: Point, p2: Point) {
        self.segment(PathEl::QuadTo(p1, p2));
    }

    fn curve_to(&mut self, p1: Point, p2: Point, p3: Point) {
        self.segment(PathEl::CurveTo(p1, p2, p3));
    }

    fn close_path(&mut self) {
        match self.state {
            ClipState::Passthrough => {
                self.cursor.push(PathEl::ClosePath);
                self.target.close_path();
            }
            ClipState::AwaitingCrossing => {
                // The closing segment is tested like any line.
                let last = self.cursor.last_point();
                let start = self.cursor.start();
                self.cursor.push(PathEl::ClosePath);
                if let (Some(last), Some(start)) = (last, start) {
                    if last != start {
                        self.try_cross(PathSeg::Line(Line::new(last, start)));
                    }
                }
            }
        }
    }

    fn finish(&mut self) {
        self.target.finish();
    }

    fn last_point(&self) -> Option<Point> {
        self.cursor.last_point()
    }

    fn last_control_point(&self) -> Option<Point> {
        self.cursor.last_control_point()
    }
}
