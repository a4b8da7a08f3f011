// Copyright 2026 the Draftgeom Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::{Insets, PathBuilder, PathCursor, PathEl, Point, Rect};

/// A piecewise linear map of one axis, in three pieces.
#[derive(Clone, Copy, Debug, PartialEq)]
struct AxisMap {
    /// Source breakpoints between the pieces.
    split: [f64; 2],
    /// `(source start, destination start, scale)` per piece.
    pieces: [(f64, f64, f64); 3],
}

impl AxisMap {
    fn new(src: [f64; 4], dst: [f64; 4]) -> AxisMap {
        let piece = |i: usize| {
            let src_len = src[i + 1] - src[i];
            let dst_len = dst[i + 1] - dst[i];
            // An empty source piece can only move.
            let scale = if src_len == 0.0 { 1.0 } else { dst_len / src_len };
            (src[i], dst[i], scale)
        };
        AxisMap {
            split: [src[1], src[2]],
            pieces: [piece(0), piece(1), piece(2)],
        }
    }

    fn apply(&self, x: f64) -> f64 {
        let i = if x < self.split[0] {
            0
        } else if x <= self.split[1] {
            1
        } else {
            2
        };
        let (src, dst, scale) = self.pieces[i];
        dst + (x - src) * scale
    }
}

/// Stretches a path the way nine-slice scaling stretches an image.
///
/// Two rectangles with insets each divide the plane into a 3 × 3 grid. A
/// point in a cell of the source grid is mapped into the matching cell of
/// the destination grid: corner cells move and scale by their own insets,
/// edge cells stretch along one axis, and the center stretches along both.
/// Points outside the source rectangle follow the map of the nearest cell.
///
/// Insets are usually fixed while the rectangle changes size, so a figure's
/// corners keep their shape when it is resized.
#[derive(Clone, Debug)]
pub struct NineRegionsBuilder<B> {
    target: B,
    x: AxisMap,
    y: AxisMap,
    identity: bool,
    cursor: PathCursor,
}

impl<B: PathBuilder> NineRegionsBuilder<B> {
    /// Map from the grid of `src` inset by `src_insets` to the grid of `dst`
    /// inset by `dst_insets`.
    pub fn new(
        target: B,
        src: Rect,
        src_insets: Insets,
        dst: Rect,
        dst_insets: Insets,
    ) -> NineRegionsBuilder<B> {
        let src = src.abs();
        let dst = dst.abs();
        let axes = |r: Rect, i: Insets| {
            (
                [r.x0, r.x0 + i.x0, r.x1 - i.x1, r.x1],
                [r.y0, r.y0 + i.y0, r.y1 - i.y1, r.y1],
            )
        };
        let (src_x, src_y) = axes(src, src_insets);
        let (dst_x, dst_y) = axes(dst, dst_insets);
        NineRegionsBuilder {
            target,
            x: AxisMap::new(src_x, dst_x),
            y: AxisMap::new(src_y, dst_y),
            identity: src == dst && src_insets == dst_insets,
            cursor: PathCursor::new(),
        }
    }

    /// Map a single point.
    pub fn map_point(&self, p: Point) -> Point {
        if self.identity {
            p
        } else {
            Point::new(self.x.apply(p.x), self.y.apply(p.y))
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
}

impl<B: PathBuilder> PathBuilder for NineRegionsBuilder<B> {
    fn move_to(&mut self, p: Point) {
        self.cursor.push(PathEl::MoveTo(p));
        self.target.move_to(self.map_point(p));
    }

    fn line_to(&mut self, p: Point) {
        self.cursor.push(PathEl::LineTo(p));
        self.target.line_to(self.map_point(p));
    }

    fn quad_to(&mut self, p1: Point, p2: Point) {
        self.cursor.push(PathEl::QuadTo(p1, p2));
        let (p1, p2) = (self.map_point(p1), self.map_point(p2));
        self.target.quad_to(p1, p2);
    }

    fn curve_to(&mut self, p1: Point, p2: Point, p3: Point) {
        self.cursor.push(PathEl::CurveTo(p1, p2, p3));
        let (p1, p2, p3) = (self.map_point(p1), self.map_point(p2), self.map_point(p3));
        self.target.curve_to(p1, p2, p3);
    }

    fn close_path(&mut self) {
        self.cursor.push(PathEl::ClosePath);
        self.target.close_path();
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

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use crate::{BezPath, Insets, NineRegionsBuilder, PathBuilder, Point, Rect};

    fn assert_near(p0: Point, p1: Point) {
        assert!((p1 - p0).hypot() < 1e-9, "{p0:?} != {p1:?}");
    }

    #[test]
    fn corners_keep_their_size() {
        let nine = NineRegionsBuilder::new(
            BezPath::new(),
            Rect::new(0.0, 0.0, 100.0, 100.0),
            Insets::uniform(10.0),
            Rect::new(0.0, 0.0, 200.0, 50.0),
            Insets::uniform(10.0),
        );
        // Inside the top left corner cell nothing moves.
        assert_near(nine.map_point(Point::new(5.0, 5.0)), Point::new(5.0, 5.0));
        // The bottom right corner cell moves with the corner.
        assert_near(nine.map_point(Point::new(95.0, 95.0)), Point::new(195.0, 45.0));
        // Edge cells stretch along the edge only.
        assert_near(nine.map_point(Point::new(50.0, 5.0)), Point::new(100.0, 5.0));
        assert_near(nine.map_point(Point::new(5.0, 50.0)), Point::new(5.0, 25.0));
        // The center stretches both ways.
        assert_near(nine.map_point(Point::new(30.0, 70.0)), Point::new(55.0, 32.5));
    }

    #[test]
    fn corners_scale_with_insets() {
        let nine = NineRegionsBuilder::new(
            BezPath::new(),
            Rect::new(0.0, 0.0, 100.0, 100.0),
            Insets::uniform(10.0),
            Rect::new(10.0, 10.0, 110.0, 110.0),
            Insets::uniform(20.0),
        );
        assert_near(nine.map_point(Point::new(5.0, 5.0)), Point::new(20.0, 20.0));
        // Outside the rectangle, the corner map extends.
        assert_near(nine.map_point(Point::new(-5.0, 0.0)), Point::new(0.0, 10.0));
    }

    #[test]
    fn empty_inset_translates() {
        let nine = NineRegionsBuilder::new(
            BezPath::new(),
            Rect::new(0.0, 0.0, 10.0, 10.0),
            Insets::ZERO,
            Rect::new(5.0, 5.0, 15.0, 15.0),
            Insets::uniform(2.0),
        );
        assert_near(nine.map_point(Point::new(-1.0, -1.0)), Point::new(4.0, 4.0));
        assert!(nine.map_point(Point::new(0.0, 0.0)).is_finite());
    }

    #[test]
    fn maps_path_commands() {
        let mut nine = NineRegionsBuilder::new(
            BezPath::new(),
            Rect::new(0.0, 0.0, 10.0, 10.0),
            Insets::ZERO,
            Rect::new(0.0, 0.0, 20.0, 10.0),
            Insets::ZERO,
        );
        nine.move_to(Point::new(0.0, 0.0));
        nine.line_to(Point::new(10.0, 10.0));
        nine.close_path();
        nine.finish();
        assert_eq!(nine.last_point(), Some(Point::new(0.0, 0.0)));
        assert_eq!(nine.into_inner().to_svg(), "M0 0L20 10Z");
    }

    fn rect() -> impl Strategy<Value = Rect> {
        (-100.0f64..100.0, -100.0f64..100.0, 0.1f64..100.0, 0.1f64..100.0)
            .prop_map(|(x, y, w, h)| Rect::new(x, y, x + w, y + h))
    }

    proptest! {
        #[test]
        fn same_grid_is_identity(r in rect(), x in -500.0f64..500.0, y in -500.0f64..500.0) {
            let nine = NineRegionsBuilder::new(BezPath::new(), r, Insets::ZERO, r, Insets::ZERO);
            let p = Point::new(x, y);
            prop_assert_eq!(nine.map_point(p), p);
        }

        #[test]
        fn equal_grids_map_within_rounding(
            r in rect(),
            x in -500.0f64..500.0,
            y in -500.0f64..500.0,
        ) {
            // Same sizes in different places only translate.
            let moved = Rect::new(r.x0 + 7.0, r.y0 - 3.0, r.x1 + 7.0, r.y1 - 3.0);
            let nine = NineRegionsBuilder::new(BezPath::new(), r, Insets::ZERO, moved, Insets::ZERO);
            let p = nine.map_point(Point::new(x, y));
            prop_assert!((p.x - (x + 7.0)).abs() < 1e-9);
            prop_assert!((p.y - (y - 3.0)).abs() < 1e-9);
        }
    }
}
