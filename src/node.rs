// Copyright 2026 the Draftgeom Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Editable path nodes.
//!
//! Editing tools work on vertices with attached control handles rather than on
//! segments. A [`NodePath`] stores one sub-path that way, and can be rebuilt
//! from, or replayed into, any [`PathBuilder`].

use crate::{Affine, BezPath, PathBuilder, PathCursor, PathEl, Point, QuadBez, Vec2};

/// Which control handles a node carries.
///
/// The incoming control shapes the segment ending at the node, the outgoing
/// control the segment starting at it. A segment with neither is a straight
/// line.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NodeKind {
    /// The start of a sub-path. It has no incoming segment.
    Move {
        /// The vertex.
        point: Point,
        /// Control for the first segment.
        ctrl_out: Option<Point>,
    },
    /// A vertex without handles.
    Corner(Point),
    /// A vertex with an incoming handle only.
    SmoothIn {
        /// The vertex.
        point: Point,
        /// Control for the segment ending here.
        ctrl_in: Point,
    },
    /// A vertex with an outgoing handle only.
    SmoothOut {
        /// The vertex.
        point: Point,
        /// Control for the segment starting here.
        ctrl_out: Point,
    },
    /// A vertex with both handles.
    SmoothBoth {
        /// The vertex.
        point: Point,
        /// Control for the segment ending here.
        ctrl_in: Point,
        /// Control for the segment starting here.
        ctrl_out: Point,
    },
}

/// One vertex of an editable path.
///
/// Nodes are values; every `with_*` method returns a modified copy. The
/// `colinear` and `equidistant` hints tell editing tools how to move the
/// handles together and have no effect on the geometry.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BezierNode {
    /// The vertex and its handles.
    pub kind: NodeKind,
    /// Keep the two handles on one line through the vertex.
    pub colinear: bool,
    /// Keep the two handles at the same distance from the vertex.
    pub equidistant: bool,
}

impl BezierNode {
    /// A node with both hints off.
    #[inline]
    pub fn new(kind: NodeKind) -> BezierNode {
        BezierNode {
            kind,
            colinear: false,
            equidistant: false,
        }
    }

    /// A sub-path start without handles.
    #[inline]
    pub fn move_to(point: Point) -> BezierNode {
        BezierNode::new(NodeKind::Move {
            point,
            ctrl_out: None,
        })
    }

    /// A vertex without handles.
    #[inline]
    pub fn corner(point: Point) -> BezierNode {
        BezierNode::new(NodeKind::Corner(point))
    }

    /// Is this a sub-path start?
    #[inline]
    pub fn is_move(&self) -> bool {
        matches!(self.kind, NodeKind::Move { .. })
    }

    /// The vertex.
    pub fn point(&self) -> Point {
        match self.kind {
            NodeKind::Move { point, .. }
            | NodeKind::Corner(point)
            | NodeKind::SmoothIn { point, .. }
            | NodeKind::SmoothOut { point, .. }
            | NodeKind::SmoothBoth { point, .. } => point,
        }
    }

    /// The incoming handle, if any.
    pub fn ctrl_in(&self) -> Option<Point> {
        match self.kind {
            NodeKind::SmoothIn { ctrl_in, .. } | NodeKind::SmoothBoth { ctrl_in, .. } => {
                Some(ctrl_in)
            }
            _ => None,
        }
    }

    /// The outgoing handle, if any.
    pub fn ctrl_out(&self) -> Option<Point> {
        match self.kind {
            NodeKind::Move { ctrl_out, .. } => ctrl_out,
            NodeKind::SmoothOut { ctrl_out, .. } | NodeKind::SmoothBoth { ctrl_out, .. } => {
                Some(ctrl_out)
            }
            _ => None,
        }
    }

    fn rebuild(&self, point: Point, ctrl_in: Option<Point>, ctrl_out: Option<Point>) -> BezierNode {
        let kind = if self.is_move() {
            NodeKind::Move { point, ctrl_out }
        } else {
            match (ctrl_in, ctrl_out) {
                (None, None) => NodeKind::Corner(point),
                (Some(ctrl_in), None) => NodeKind::SmoothIn { point, ctrl_in },
                (None, Some(ctrl_out)) => NodeKind::SmoothOut { point, ctrl_out },
                (Some(ctrl_in), Some(ctrl_out)) => NodeKind::SmoothBoth {
                    point,
                    ctrl_in,
                    ctrl_out,
                },
            }
        };
        BezierNode { kind, ..*self }
    }

    /// The incoming handle relative to the vertex.
    #[inline]
    pub fn in_handle(&self) -> Option<Vec2> {
        self.ctrl_in().map(|c| c - self.point())
    }

    /// The outgoing handle relative to the vertex.
    #[inline]
    pub fn out_handle(&self) -> Option<Vec2> {
        self.ctrl_out().map(|c| c - self.point())
    }

    /// Replace the vertex, leaving the handles where they are.
    pub fn with_point(&self, point: Point) -> BezierNode {
        self.rebuild(point, self.ctrl_in(), self.ctrl_out())
    }

    /// Set or remove the incoming handle.
    ///
    /// # Panics
    ///
    /// Panics when adding an incoming handle to a move node.
    pub fn with_ctrl_in(&self, ctrl_in: Option<Point>) -> BezierNode {
        assert!(
            !(self.is_move() && ctrl_in.is_some()),
            "a move node has no incoming segment"
        );
        self.rebuild(self.point(), ctrl_in, self.ctrl_out())
    }

    /// Set or remove the outgoing handle.
    pub fn with_ctrl_out(&self, ctrl_out: Option<Point>) -> BezierNode {
        self.rebuild(self.point(), self.ctrl_in(), ctrl_out)
    }

    /// Set the editing hints.
    #[inline]
    pub fn with_hints(&self, colinear: bool, equidistant: bool) -> BezierNode {
        BezierNode {
            colinear,
            equidistant,
            ..*self
        }
    }

    /// Apply an affine map to the vertex and its handles.
    pub fn transformed(&self, affine: Affine) -> BezierNode {
        self.rebuild(
            affine * self.point(),
            self.ctrl_in().map(|p| affine * p),
            self.ctrl_out().map(|p| affine * p),
        )
    }

    /// Whether both handles lie on opposite sides of the vertex on one line.
    ///
    /// The angle between the two handle directions may deviate from a
    /// straight line by about `tolerance` radians. Nodes with fewer than two
    /// handles, or with a handle on the vertex, are not colinear.
    pub fn compute_is_colinear(&self, tolerance: f64) -> bool {
        let (Some(ctrl_in), Some(ctrl_out)) = (self.ctrl_in(), self.ctrl_out()) else {
            return false;
        };
        let a = self.point() - ctrl_in;
        let b = ctrl_out - self.point();
        let scale = a.hypot() * b.hypot();
        if scale == 0.0 {
            return false;
        }
        a.dot(b) > 0.0 && a.cross(b).abs() <= tolerance * scale
    }

    /// Whether both handles are the same distance from the vertex, within
    /// `tolerance`.
    pub fn compute_is_equidistant(&self, tolerance: f64) -> bool {
        let (Some(ctrl_in), Some(ctrl_out)) = (self.ctrl_in(), self.ctrl_out()) else {
            return false;
        };
        let p = self.point();
        (p.distance(ctrl_in) - p.distance(ctrl_out)).abs() <= tolerance
    }
}

/// One sub-path as a list of nodes.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodePath {
    nodes: Vec<BezierNode>,
    closed: bool,
}

impl NodePath {
    /// Create an empty node path.
    #[inline]
    pub fn new() -> NodePath {
        NodePath::default()
    }

    /// Append a node.
    ///
    /// # Panics
    ///
    /// Panics if the first node is not a move node, or a later one is.
    pub fn push(&mut self, node: BezierNode) {
        assert_eq!(
            node.is_move(),
            self.nodes.is_empty(),
            "a node path has exactly one move node, at its start"
        );
        self.nodes.push(node);
    }

    /// The nodes.
    #[inline]
    pub fn nodes(&self) -> &[BezierNode] {
        &self.nodes
    }

    /// Mutable access to a node, for editing in place.
    ///
    /// Replacing a node with one of the other role (move or not) breaks
    /// the path; use the `with_*` methods on the existing node.
    #[inline]
    pub fn node_mut(&mut self, index: usize) -> Option<&mut BezierNode> {
        self.nodes.get_mut(index)
    }

    /// Does the sub-path end with a close?
    #[inline]
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Mark the sub-path closed or open.
    #[inline]
    pub fn set_closed(&mut self, closed: bool) {
        self.closed = closed;
    }

    /// The number of nodes.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if there are no nodes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Apply an affine map to every node.
    pub fn apply_affine(&mut self, affine: Affine) {
        for node in &mut self.nodes {
            *node = node.transformed(affine);
        }
    }

    /// Emit the sub-path as commands.
    ///
    /// A segment between two nodes with no handles facing each other is a
    /// line; otherwise it is a cubic, with a missing handle placed on its
    /// vertex. This does not call [`PathBuilder::finish`].
    pub fn replay<B: PathBuilder + ?Sized>(&self, builder: &mut B) {
        let Some(first) = self.nodes.first() else {
            return;
        };
        builder.move_to(first.point());
        for pair in self.nodes.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            match (a.ctrl_out(), b.ctrl_in()) {
                (None, None) => builder.line_to(b.point()),
                (c1, c2) => builder.curve_to(
                    c1.unwrap_or(a.point()),
                    c2.unwrap_or(b.point()),
                    b.point(),
                ),
            }
        }
        if self.closed {
            builder.close_path();
        }
    }

    /// Convert a path into node paths, one per sub-path.
    pub fn from_path(path: &BezPath) -> Vec<NodePath> {
        let mut builder = NodePathBuilder::new();
        path.replay(&mut builder);
        builder.into_paths()
    }
}

/// A [`PathBuilder`] that collects nodes.
///
/// Quadratic segments are stored as the equivalent cubics.
#[derive(Clone, Debug, Default)]
pub struct NodePathBuilder {
    paths: Vec<NodePath>,
    cursor: PathCursor,
}

impl NodePathBuilder {
    /// Create a builder with no paths.
    #[inline]
    pub fn new() -> NodePathBuilder {
        NodePathBuilder::default()
    }

    /// The sub-paths collected so far.
    #[inline]
    pub fn paths(&self) -> &[NodePath] {
        &self.paths
    }

    /// Consume the builder, returning the sub-paths.
    #[inline]
    pub fn into_paths(self) -> Vec<NodePath> {
        self.paths
    }

    /// The open sub-path to extend, starting one at the current point if
    /// there is none.
    fn current(&mut self) -> &mut NodePath {
        let start_new = self.paths.last().map_or(true, |path| path.closed);
        if start_new {
            let p = self.cursor.last_point().unwrap_or(Point::ZERO);
            let mut path = NodePath::new();
            path.push(BezierNode::move_to(p));
            self.paths.push(path);
        }
        let last = self.paths.len() - 1;
        &mut self.paths[last]
    }

    fn push_curve(&mut self, c1: Point, c2: Point, p: Point) {
        let path = self.current();
        if let Some(prev) = path.nodes.last_mut() {
            *prev = prev.with_ctrl_out(Some(c1));
        }
        path.push(BezierNode::new(NodeKind::SmoothIn {
            point: p,
            ctrl_in: c2,
        }));
    }
}

impl PathBuilder for NodePathBuilder {
    fn move_to(&mut self, p: Point) {
        let mut path = NodePath::new();
        path.push(BezierNode::move_to(p));
        // A move right after another replaces it.
        if self.paths.last().is_some_and(|path| path.len() == 1 && !path.closed) {
            self.paths.pop();
        }
        self.paths.push(path);
        self.cursor.push(PathEl::MoveTo(p));
    }

    fn line_to(&mut self, p: Point) {
        self.current().push(BezierNode::corner(p));
        self.cursor.push(PathEl::LineTo(p));
    }

    fn quad_to(&mut self, p1: Point, p2: Point) {
        let p0 = self.cursor.last_point().unwrap_or(Point::ZERO);
        let cubic = QuadBez::new(p0, p1, p2).raise();
        self.push_curve(cubic.p1, cubic.p2, p2);
        self.cursor.push(PathEl::QuadTo(p1, p2));
    }

    fn curve_to(&mut self, p1: Point, p2: Point, p3: Point) {
        self.push_curve(p1, p2, p3);
        self.cursor.push(PathEl::CurveTo(p1, p2, p3));
    }

    fn close_path(&mut self) {
        if let Some(path) = self.paths.last_mut() {
            path.closed = true;
        }
        self.cursor.push(PathEl::ClosePath);
    }

    fn last_point(&self) -> Option<Point> {
        self.cursor.last_point()
    }

    fn last_control_point(&self) -> Option<Point> {
        self.cursor.last_control_point()
    }
}

impl From<&NodePath> for BezPath {
    fn from(nodes: &NodePath) -> BezPath {
        let mut path = BezPath::new();
        nodes.replay(&mut path);
        path
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        Affine, BezPath, BezierNode, NodeKind, NodePath, NodePathBuilder, PathBuilder, PathEl,
        Point, Vec2,
    };

    fn smooth(point: (f64, f64), ctrl_in: (f64, f64), ctrl_out: (f64, f64)) -> BezierNode {
        BezierNode::new(NodeKind::SmoothBoth {
            point: point.into(),
            ctrl_in: ctrl_in.into(),
            ctrl_out: ctrl_out.into(),
        })
    }

    #[test]
    fn handles_change_kind() {
        let node = BezierNode::corner(Point::new(1.0, 1.0));
        let node = node.with_ctrl_in(Some(Point::new(0.0, 1.0)));
        assert!(matches!(node.kind, NodeKind::SmoothIn { .. }));
        let node = node.with_ctrl_out(Some(Point::new(2.0, 1.0)));
        assert!(matches!(node.kind, NodeKind::SmoothBoth { .. }));
        let node = node.with_ctrl_in(None);
        assert_eq!(
            node.kind,
            NodeKind::SmoothOut {
                point: Point::new(1.0, 1.0),
                ctrl_out: Point::new(2.0, 1.0)
            }
        );
        assert_eq!(node.out_handle(), Some(Vec2::new(1.0, 0.0)));
        let moved = BezierNode::move_to(Point::ZERO).with_ctrl_out(Some(Point::new(1.0, 0.0)));
        assert!(moved.is_move());
        assert_eq!(moved.ctrl_out(), Some(Point::new(1.0, 0.0)));
    }

    #[test]
    #[should_panic(expected = "no incoming segment")]
    fn move_has_no_ctrl_in() {
        BezierNode::move_to(Point::ZERO).with_ctrl_in(Some(Point::new(1.0, 1.0)));
    }

    #[test]
    fn hints_are_not_geometry() {
        let node = smooth((5.0, 5.0), (3.0, 5.0), (9.0, 5.0)).with_hints(true, false);
        assert!(node.colinear);
        assert!(node.compute_is_colinear(1e-9));
        assert!(!node.compute_is_equidistant(1e-9));
        assert!(node.with_ctrl_out(Some(Point::new(7.0, 5.0))).compute_is_equidistant(1e-9));
        // Handles on the same side of the vertex are not colinear.
        assert!(!smooth((5.0, 5.0), (3.0, 5.0), (4.0, 5.0)).compute_is_colinear(1e-9));
        assert!(!smooth((5.0, 5.0), (3.0, 5.0), (5.0, 8.0)).compute_is_colinear(1e-9));
        assert!(!BezierNode::corner(Point::ZERO).compute_is_colinear(1e-9));
    }

    #[test]
    fn transformed_moves_handles() {
        let node = smooth((1.0, 0.0), (0.0, 0.0), (2.0, 0.0)).transformed(Affine::scale(2.0));
        assert_eq!(node.point(), Point::new(2.0, 0.0));
        assert_eq!(node.ctrl_in(), Some(Point::new(0.0, 0.0)));
        assert_eq!(node.ctrl_out(), Some(Point::new(4.0, 0.0)));
    }

    #[test]
    #[should_panic(expected = "exactly one move node")]
    fn move_in_middle_panics() {
        let mut path = NodePath::new();
        path.push(BezierNode::move_to(Point::ZERO));
        path.push(BezierNode::move_to(Point::new(1.0, 1.0)));
    }

    #[test]
    fn builder_round_trip() {
        let path = BezPath::from_svg("M0 0 L10 0 C15 0 20 5 20 10 L0 10 Z M30 30 L40 40").unwrap();
        let nodes = NodePath::from_path(&path);
        assert_eq!(nodes.len(), 2);
        assert!(nodes[0].is_closed());
        assert!(!nodes[1].is_closed());
        assert_eq!(nodes[0].len(), 4);
        assert!(matches!(nodes[0].nodes()[1].kind, NodeKind::SmoothOut { .. }));
        assert!(matches!(nodes[0].nodes()[2].kind, NodeKind::SmoothIn { .. }));

        let mut replayed = BezPath::new();
        for sub in &nodes {
            sub.replay(&mut replayed);
        }
        assert_eq!(replayed, path);
    }

    #[test]
    fn quads_become_cubics() {
        let mut builder = NodePathBuilder::new();
        builder.move_to(Point::new(0.0, 0.0));
        builder.quad_to(Point::new(3.0, 3.0), Point::new(6.0, 0.0));
        let path = BezPath::from(&builder.paths()[0]);
        let PathEl::CurveTo(p1, p2, p3) = path.elements()[1] else {
            panic!("expected a cubic, got {:?}", path.elements()[1]);
        };
        assert!(p1.distance(Point::new(2.0, 2.0)) < 1e-12);
        assert!(p2.distance(Point::new(4.0, 2.0)) < 1e-12);
        assert_eq!(p3, Point::new(6.0, 0.0));
    }

    #[test]
    fn lines_after_close_start_new_subpath() {
        let mut builder = NodePathBuilder::new();
        builder.move_to(Point::new(1.0, 1.0));
        builder.line_to(Point::new(2.0, 1.0));
        builder.close_path();
        builder.line_to(Point::new(1.0, 5.0));
        let paths = builder.into_paths();
        assert_eq!(paths.len(), 2);
        assert_eq!(paths[1].nodes()[0].point(), Point::new(1.0, 1.0));
    }
}
