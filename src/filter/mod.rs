// Copyright 2026 the Draftgeom Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Path builders that rewrite a command stream on its way to another builder.
//!
//! Each filter owns its downstream builder, implements [`PathBuilder`] itself,
//! and hands the downstream builder back from `into_inner`. Filters are
//! single-use: feed one stream, call [`finish`](PathBuilder::finish) once.
//! Their [`last_point`](PathBuilder::last_point) reports the position of the
//! stream they receive, not of what they forward.
//!
//! ```
//! use draftgeom::{BezPath, Circle, ClipStartBuilder, CutEndBuilder, PathBuilder, Point};
//!
//! // Trim a connector where it enters and leaves two round figures.
//! let mut chain = ClipStartBuilder::new(
//!     CutEndBuilder::new(BezPath::new(), Circle::new((100.0, 0.0), 10.0)),
//!     Circle::new((0.0, 0.0), 10.0),
//! );
//! chain.move_to(Point::new(0.0, 0.0));
//! chain.line_to(Point::new(100.0, 0.0));
//! chain.finish();
//! let path = chain.into_inner().into_inner();
//! assert_eq!(path.to_svg(), "M10 0H90");
//! ```

mod bounds;
mod clip_start;
mod cut_end;
mod flatten;
mod margin;
mod marker;
mod nine_regions;
mod offset;
mod transform;

pub use bounds::{BoundsBuilder, BoundsCalculator};
pub use clip_start::ClipStartBuilder;
pub use cut_end::CutEndBuilder;
pub use flatten::FlattenBuilder;
pub use margin::MarginBuilder;
pub use marker::MarkerBuilder;
pub use nine_regions::NineRegionsBuilder;
pub use offset::OffsetBuilder;
pub use transform::TransformBuilder;

use crate::bezpath::seg_from;
use crate::{Line, PathEl, PathSeg, Point};

/// The segments drawn by `elements`, each paired with the index of the
/// element that draws it.
fn indexed_segments(elements: &[PathEl]) -> Vec<(usize, PathSeg)> {
    let mut start = Point::ZERO;
    let mut last = Point::ZERO;
    let mut segs = Vec::new();
    for (i, &el) in elements.iter().enumerate() {
        let seg = match el {
            PathEl::MoveTo(p) => {
                start = p;
                last = p;
                continue;
            }
            PathEl::ClosePath => {
                let from = last;
                last = start;
                if from == start {
                    continue;
                }
                PathSeg::Line(Line::new(from, start))
            }
            el => match seg_from(last, el) {
                Some(seg) => {
                    last = el_end(el).unwrap_or(last);
                    seg
                }
                None => continue,
            },
        };
        segs.push((i, seg));
    }
    segs
}

/// The point an element ends at, if it has one of its own.
fn el_end(el: PathEl) -> Option<Point> {
    match el {
        PathEl::MoveTo(p) | PathEl::LineTo(p) | PathEl::QuadTo(_, p) | PathEl::CurveTo(_, _, p) => {
            Some(p)
        }
        PathEl::ClosePath => None,
    }
}
