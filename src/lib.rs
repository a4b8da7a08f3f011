// Copyright 2026 the Draftgeom Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The geometry kernel of a vector drawing editor.
//!
//! The draftgeom library contains the numeric and geometric machinery that sits
//! underneath figure editing: a closed-form polynomial root solver, curve
//! subdivision, intersection tests with a typed result model, and a push-style
//! pipeline of path builders that clip, cut, inset, offset, transform, measure
//! and decorate paths as they stream through.
//!
//! # Examples
//!
//! Finding where a line enters and leaves a circle:
//! ```
//! use draftgeom::{intersect_line_circle, Circle, IntersectionStatus, Line, Point, Tolerances};
//!
//! let line = Line::new((-20.0, 0.0), (20.0, 0.0));
//! let circle = Circle::new((0.0, 0.0), 5.0);
//! let hits = intersect_line_circle(line, circle, &Tolerances::DEFAULT);
//! assert_eq!(hits.status(), IntersectionStatus::Intersection);
//! assert_eq!(hits.len(), 2);
//! assert!((hits.first_point().x + 5.0).abs() < 1e-9);
//! ```
//!
//! Streaming a path through a filter chain and back out as text:
//! ```
//! use draftgeom::{parse_svg_path, PathBuilder, Precision, SvgPathWriter, TransformBuilder, Affine};
//!
//! let mut chain = TransformBuilder::new(
//!     SvgPathWriter::new(Precision::Double),
//!     Affine::translate((10.0, 0.0)),
//! );
//! parse_svg_path("M0 0 L5 0 L5 5 Z", &mut chain).unwrap();
//! chain.finish();
//! assert_eq!(chain.into_inner().into_string(), "M10 0H15V5Z");
//! ```
//!
//! # Features
//!
//! - `serde`: Implement `serde::Deserialize` and `serde::Serialize` on the value types.

#![allow(clippy::many_single_char_names, clippy::excessive_precision)]

mod affine;
mod arc;
mod bezpath;
mod builder;
mod circle;
mod cubicbez;
pub mod filter;
pub mod geom;
mod insets;
mod intersect;
mod line;
mod node;
mod param_curve;
mod point;
mod poly;
mod quadbez;
mod rect;
mod svg;
mod tolerance;
mod vec2;

pub use crate::affine::*;
pub use crate::arc::*;
pub use crate::bezpath::*;
pub use crate::builder::*;
pub use crate::circle::*;
pub use crate::cubicbez::*;
pub use crate::filter::{
    BoundsBuilder, BoundsCalculator, ClipStartBuilder, CutEndBuilder, FlattenBuilder,
    MarginBuilder, MarkerBuilder, NineRegionsBuilder, OffsetBuilder, TransformBuilder,
};
pub use crate::insets::*;
pub use crate::intersect::*;
pub use crate::line::*;
pub use crate::node::*;
pub use crate::param_curve::*;
pub use crate::point::*;
pub use crate::poly::*;
pub use crate::quadbez::*;
pub use crate::rect::*;
pub use crate::svg::*;
pub use crate::tolerance::*;
pub use crate::vec2::*;
