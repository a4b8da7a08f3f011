// Copyright 2026 the Draftgeom Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Distances from the edges of a rectangle toward its interior.

/// Insets from the edges of a rectangle.
///
/// Each value is the distance from the corresponding edge toward the center,
/// so subtracting insets from a [`Rect`](crate::Rect) shrinks it.
///
/// # Examples
///
/// ```
/// use draftgeom::{Insets, Rect};
///
/// let rect = Rect::new(0., 0., 10., 10.);
/// let inner = rect - Insets::uniform_xy(3., 0.);
/// assert_eq!(inner.width(), 4.0);
/// assert_eq!(inner.x0, 3.0);
/// ```
#[derive(Clone, Copy, Default, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Insets {
    /// The inset of the left edge.
    pub x0: f64,
    /// The inset of the top edge (in y-down spaces).
    pub y0: f64,
    /// The inset of the right edge.
    pub x1: f64,
    /// The inset of the bottom edge (in y-down spaces).
    pub y1: f64,
}

impl Insets {
    /// Zero'd insets.
    pub const ZERO: Insets = Insets::uniform(0.);

    /// New uniform insets.
    #[inline]
    pub const fn uniform(d: f64) -> Insets {
        Insets::new(d, d, d, d)
    }

    /// New insets with uniform values along each axis.
    #[inline]
    pub const fn uniform_xy(x: f64, y: f64) -> Insets {
        Insets::new(x, y, x, y)
    }

    /// New insets. The ordering of the arguments is "left, top, right, bottom",
    /// assuming a y-down coordinate space.
    #[inline]
    pub const fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Insets {
        Insets { x0, y0, x1, y1 }
    }
}
