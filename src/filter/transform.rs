// Copyright 2026 the Draftgeom Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::{Affine, PathBuilder, PathCursor, PathEl, Point};

/// Applies an affine map to every coordinate before forwarding it.
///
/// With the identity map, commands pass through untouched.
#[derive(Clone, Debug)]
pub struct TransformBuilder<B> {
    target: B,
    transform: Affine,
    identity: bool,
    cursor: PathCursor,
}

impl<B: PathBuilder> TransformBuilder<B> {
    /// Map the stream through `transform`.
    pub fn new(target: B, transform: Affine) -> TransformBuilder<B> {
        TransformBuilder {
            target,
            transform,
            identity: transform.is_identity(),
            cursor: PathCursor::new(),
        }
    }

    /// The map applied to coordinates.
    pub fn transform(&self) -> Affine {
        self.transform
    }

    /// The downstream builder.
    pub fn target(&self) -> &B {
        &self.target
    }

    /// Consume the filter, returning the downstream builder.
    pub fn into_inner(self) -> B {
        self.target
    }

    fn forward(&mut self, el: PathEl) {
        self.cursor.push(el);
        if self.identity {
            self.target.push(el);
        } else {
            self.target.push(self.transform * el);
        }
    }
}

impl<B: PathBuilder> PathBuilder for TransformBuilder<B> {
    fn move_to(&mut self, p: Point) {
        self.forward(PathEl::MoveTo(p));
    }

    fn line_to(&mut self, p: Point) {
        self.forward(PathEl::LineTo(p));
    }

    fn quad_to(&mut self, p1: Point, p2: Point) {
        self.forward(PathEl::QuadTo(p1, p2));
    }

    fn curve_to(&mut self, p1: Point, p2: Point, p3: Point) {
        self.forward(PathEl::CurveTo(p1, p2, p3));
    }

    fn close_path(&mut self) {
        self.forward(PathEl::ClosePath);
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
