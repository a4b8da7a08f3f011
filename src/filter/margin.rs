// Copyright 2026 the Draftgeom Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use smallvec::SmallVec;
use tracing::trace;

use super::el_end;
use crate::{geom, BezPath, PathBuilder, PathEl, Point};

/// Pulls the ends of an open path back by fixed distances.
///
/// The start moves toward the next distinct point of the path, and the end
/// toward the previous one; for a curve that point is its nearest control
/// point. Each move stops at that point, so a short segment collapses rather
/// than turning around. Closed sub-paths have no ends and are left alone.
///
/// The stream is buffered and forwarded on `finish`.
#[derive(Clone, Debug)]
pub struct MarginBuilder<B> {
    target: B,
    start_margin: f64,
    end_margin: f64,
    path: BezPath,
}

impl<B: PathBuilder> MarginBuilder<B> {
    /// Inset the start by `start_margin` and the end by `end_margin`.
    pub fn new(target: B, start_margin: f64, end_margin: f64) -> MarginBuilder<B> {
        MarginBuilder {
            target,
            start_margin,
            end_margin,
            path: BezPath::new(),
        }
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
        let mut els = std::mem::take(&mut self.path).into_elements();
        let subpaths: Vec<usize> = els
            .iter()
            .enumerate()
            .filter(|(_, el)| matches!(el, PathEl::MoveTo(_)))
            .map(|(i, _)| i)
            .collect();
        if let (Some(&first), Some(&last)) = (subpaths.first(), subpaths.last()) {
            let first_end = subpaths.get(1).copied().unwrap_or(els.len());
            if !is_closed(&els[first..first_end]) {
                inset_start(&mut els[first..first_end], self.start_margin);
            }
            if !is_closed(&els[last..]) {
                inset_end(&mut els[last..], self.end_margin);
            }
        }
        for el in els {
            self.target.push(el);
        }
    }
}

fn is_closed(subpath: &[PathEl]) -> bool {
    subpath.contains(&PathEl::ClosePath)
}

fn points(el: PathEl) -> SmallVec<[Point; 3]> {
    match el {
        PathEl::MoveTo(p) | PathEl::LineTo(p) => smallvec::smallvec![p],
        PathEl::QuadTo(p1, p2) => smallvec::smallvec![p1, p2],
        PathEl::CurveTo(p1, p2, p3) => smallvec::smallvec![p1, p2, p3],
        PathEl::ClosePath => SmallVec::new(),
    }
}

fn with_end(el: PathEl, p: Point) -> PathEl {
    match el {
        PathEl::MoveTo(_) => PathEl::MoveTo(p),
        PathEl::LineTo(_) => PathEl::LineTo(p),
        PathEl::QuadTo(p1, _) => PathEl::QuadTo(p1, p),
        PathEl::CurveTo(p1, p2, _) => PathEl::CurveTo(p1, p2, p),
        PathEl::ClosePath => PathEl::ClosePath,
    }
}

/// Move `p` toward `toward` by `distance`, stopping there.
fn pull(p: Point, toward: Point, distance: f64) -> Point {
    let v = toward - p;
    p + geom::unit(v) * distance.min(v.hypot())
}

fn inset_start(subpath: &mut [PathEl], margin: f64) {
    let Some(PathEl::MoveTo(p0)) = subpath.first().copied() else {
        return;
    };
    let next = subpath[1..]
        .iter()
        .flat_map(|el| points(*el))
        .find(|q| *q != p0);
    if let Some(q) = next {
        let p = pull(p0, q, margin);
        trace!(from = ?p0, to = ?p, "margin moved path start");
        subpath[0] = PathEl::MoveTo(p);
    }
}

fn inset_end(subpath: &mut [PathEl], margin: f64) {
    if subpath.len() < 2 {
        return;
    }
    let last = subpath.len() - 1;
    let Some(end) = el_end(subpath[last]) else {
        return;
    };
    let mut before: SmallVec<[Point; 3]> = points(subpath[last]);
    before.pop();
    let prev = before
        .into_iter()
        .rev()
        .chain(subpath[..last].iter().rev().flat_map(|el| points(*el).into_iter().rev()))
        .find(|q| *q != end);
    if let Some(q) = prev {
        let p = pull(end, q, margin);
        trace!(from = ?end, to = ?p, "margin moved path end");
        subpath[last] = with_end(subpath[last], p);
    }
}

impl<B: PathBuilder> PathBuilder for MarginBuilder<B> {
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

#[cfg(test)]
mod tests {
    use crate::{parse_svg_path, BezPath, MarginBuilder, PathBuilder, PathEl, Point};

    fn margin(data: &str, start: f64, end: f64) -> BezPath {
        let mut margin = MarginBuilder::new(BezPath::new(), start, end);
        parse_svg_path(data, &mut margin).unwrap();
        margin.finish();
        margin.into_inner()
    }

    #[test]
    fn insets_both_ends() {
        assert_eq!(margin("M0 0 L10 0", 2.0, 3.0).to_svg(), "M2 0H7");
        assert_eq!(margin("M0 0 L10 0 L10 10", 1.0, 1.0).to_svg(), "M1 0H10V9");
    }

    #[test]
    fn clamps_instead_of_inverting() {
        let path = margin("M0 0 L10 0", 8.0, 8.0);
        assert_eq!(
            path.elements(),
            &[
                PathEl::MoveTo(Point::new(8.0, 0.0)),
                PathEl::LineTo(Point::new(8.0, 0.0))
            ]
        );
    }

    #[test]
    fn skips_repeated_points() {
        assert_eq!(margin("M0 0 L0 0 L0 10", 2.0, 0.0).to_svg(), "M0 2V0V10");
    }

    #[test]
    fn curves_move_toward_controls() {
        let path = margin("M0 0 C0 10 10 10 10 0", 5.0, 5.0);
        assert_eq!(
            path.elements(),
            &[
                PathEl::MoveTo(Point::new(0.0, 5.0)),
                PathEl::CurveTo(Point::new(0.0, 10.0), Point::new(10.0, 10.0), Point::new(10.0, 5.0)),
            ]
        );
    }

    #[test]
    fn closed_paths_are_unchanged() {
        let data = "M0 0 L10 0 L10 10 Z";
        assert_eq!(margin(data, 2.0, 2.0), BezPath::from_svg(data).unwrap());
    }

    #[test]
    fn ends_of_separate_subpaths() {
        assert_eq!(
            margin("M0 0 L10 0 M0 5 L10 5", 1.0, 1.0).to_svg(),
            "M1 0H10M0 5H9"
        );
    }
}
