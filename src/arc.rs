// Copyright 2026 the Draftgeom Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Elliptical arcs, and their expansion into cubic Béziers.

use std::f64::consts::{FRAC_PI_2, PI};

use crate::{CubicBez, PathBuilder, Point, Vec2};

// Note: the endpoint to center conversion follows the SVG implementation notes,
// sections F.6.5 and F.6.6.

/// An elliptical arc in SVG endpoint parameterization.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SvgArc {
    /// The arc's start point.
    pub from: Point,
    /// The arc's end point.
    pub to: Point,
    /// The arc's radii, where the vector's x-component is the radius in the
    /// positive x direction after applying `x_rotation`.
    pub radii: Vec2,
    /// How much the arc is rotated, in radians.
    pub x_rotation: f64,
    /// Does this arc sweep through more than π radians?
    pub large_arc: bool,
    /// Determines if the arc should begin moving at positive angles.
    pub sweep: bool,
}

/// An elliptical arc in center parameterization.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Arc {
    /// The arc's center point.
    pub center: Point,
    /// The arc's radii, where the vector's x-component is the radius in the
    /// positive x direction after applying `x_rotation`.
    pub radii: Vec2,
    /// The start angle in radians.
    pub start_angle: f64,
    /// The angle between the start and end of the arc, in radians. Positive
    /// values sweep toward increasing angles.
    pub sweep_angle: f64,
    /// How much the arc is rotated, in radians.
    pub x_rotation: f64,
}

impl SvgArc {
    /// Checks that arc is actually a straight line.
    ///
    /// In this case, it can be replaced with a line.
    pub fn is_straight_line(&self) -> bool {
        self.radii.x.abs() <= 1e-5 || self.radii.y.abs() <= 1e-5 || self.from == self.to
    }
}

impl Arc {
    /// Creates an `Arc` from a `SvgArc`.
    ///
    /// Radii too small to span the chord are scaled up uniformly until they
    /// do. Returns `None` if `arc` is actually a straight line.
    pub fn from_svg_arc(arc: &SvgArc) -> Option<Arc> {
        if arc.is_straight_line() {
            return None;
        }

        let mut rx = arc.radii.x.abs();
        let mut ry = arc.radii.y.abs();

        let (sin_phi, cos_phi) = (arc.x_rotation % (2.0 * PI)).sin_cos();
        let hd = (arc.from - arc.to) * 0.5;
        let mid = arc.from.midpoint(arc.to);

        // The chord midpoint in the frame of the unrotated ellipse.
        let p = Vec2::new(
            cos_phi * hd.x + sin_phi * hd.y,
            -sin_phi * hd.x + cos_phi * hd.y,
        );

        let lambda = p.x * p.x / (rx * rx) + p.y * p.y / (ry * ry);
        if lambda > 1.0 {
            let scale = lambda.sqrt();
            rx *= scale;
            ry *= scale;
        }

        let rxry = rx * ry;
        let rxpy = rx * p.y;
        let rypx = ry * p.x;
        let sum_of_sq = rxpy * rxpy + rypx * rypx;

        let sign = if arc.large_arc == arc.sweep { -1.0 } else { 1.0 };
        let coe = sign * ((rxry * rxry - sum_of_sq) / sum_of_sq).abs().sqrt();
        let cx = coe * rxpy / ry;
        let cy = -coe * rypx / rx;

        let center = Point::new(
            cos_phi * cx - sin_phi * cy + mid.x,
            sin_phi * cx + cos_phi * cy + mid.y,
        );

        let start_v = Vec2::new((p.x - cx) / rx, (p.y - cy) / ry);
        let end_v = Vec2::new((-p.x - cx) / rx, (-p.y - cy) / ry);
        let start_angle = start_v.atan2();
        let mut sweep_angle = (end_v.atan2() - start_angle) % (2.0 * PI);

        if arc.sweep && sweep_angle < 0.0 {
            sweep_angle += 2.0 * PI;
        } else if !arc.sweep && sweep_angle > 0.0 {
            sweep_angle -= 2.0 * PI;
        }

        Some(Arc {
            center,
            radii: Vec2::new(rx, ry),
            start_angle,
            sweep_angle,
            x_rotation: arc.x_rotation,
        })
    }

    /// The point at `angle` on the full ellipse.
    pub fn sample(&self, angle: f64) -> Point {
        self.center + sample_ellipse(self.radii, self.x_rotation, angle)
    }

    /// Approximate the arc with cubic Béziers, one per quarter turn or less.
    ///
    /// Each segment uses control arms of length `4/3 · tan(θ/4)` along the
    /// tangents of the ellipse, the standard four-segment circle
    /// approximation generalized to any sweep.
    pub fn cubics(&self) -> impl Iterator<Item = CubicBez> {
        let n = (self.sweep_angle.abs() / FRAC_PI_2 - 1e-9).ceil().max(1.0);
        let angle_step = self.sweep_angle / n;
        let arm_len = (4.0 / 3.0) * (0.25 * angle_step).tan();
        let arc = *self;
        (0..n as usize).map(move |i| {
            let angle0 = arc.start_angle + angle_step * i as f64;
            let angle1 = angle0 + angle_step;
            let p0 = arc.sample(angle0);
            let p3 = arc.sample(angle1);
            let p1 = p0 + arm_len * sample_ellipse(arc.radii, arc.x_rotation, angle0 + FRAC_PI_2);
            let p2 = p3 - arm_len * sample_ellipse(arc.radii, arc.x_rotation, angle1 + FRAC_PI_2);
            CubicBez::new(p0, p1, p2, p3)
        })
    }
}

/// Append an SVG arc from the builder's current point to `p`.
///
/// `x_rotation` is in radians. This is the expansion behind
/// [`PathBuilder::arc_to`]; the last cubic ends exactly at `p`.
pub fn append_arc<B: PathBuilder + ?Sized>(
    builder: &mut B,
    radii: Vec2,
    x_rotation: f64,
    large_arc: bool,
    sweep: bool,
    p: Point,
) {
    let from = builder.last_point().unwrap_or(Point::ZERO);
    let svg_arc = SvgArc {
        from,
        to: p,
        radii,
        x_rotation,
        large_arc,
        sweep,
    };
    if from == p {
        return;
    }
    let Some(arc) = Arc::from_svg_arc(&svg_arc) else {
        builder.line_to(p);
        return;
    };
    let mut cubics = arc.cubics().peekable();
    while let Some(c) = cubics.next() {
        let end = if cubics.peek().is_none() { p } else { c.p3 };
        builder.curve_to(c.p1, c.p2, end);
    }
}

fn sample_ellipse(radii: Vec2, x_rotation: f64, angle: f64) -> Vec2 {
    let (angle_sin, angle_cos) = angle.sin_cos();
    let u = radii.x * angle_cos;
    let v = radii.y * angle_sin;
    rotate_pt(Vec2::new(u, v), x_rotation)
}

fn rotate_pt(pt: Vec2, angle: f64) -> Vec2 {
    let (angle_sin, angle_cos) = angle.sin_cos();
    Vec2::new(
        pt.x * angle_cos - pt.y * angle_sin,
        pt.x * angle_sin + pt.y * angle_cos,
    )
}

#[cfg(test)]
mod tests {
    use std::f64::consts::PI;

    use crate::{Arc, BezPath, ParamCurve, PathBuilder, PathEl, Point, SvgArc, Vec2};

    fn assert_near(p0: Point, p1: Point, epsilon: f64) {
        assert!((p1 - p0).hypot() < epsilon, "{p0:?} != {p1:?}");
    }

    #[test]
    fn semicircle_ends_at_target_for_all_flags() {
        for (large_arc, sweep) in [(false, false), (false, true), (true, false), (true, true)] {
            let mut path = BezPath::new();
            path.move_to(Point::new(0.0, 0.0));
            path.arc_to(Vec2::new(5.0, 5.0), 0.0, large_arc, sweep, Point::new(10.0, 0.0));
            let curves = &path.elements()[1..];
            assert_eq!(curves.len(), 2, "flags {large_arc} {sweep}");
            match curves[1] {
                PathEl::CurveTo(_, _, p3) => assert_eq!(p3, Point::new(10.0, 0.0)),
                el => panic!("unexpected {el:?}"),
            }
            // The midpoint of the arc is at the top or bottom of the circle.
            match curves[0] {
                PathEl::CurveTo(_, _, p3) => {
                    assert_near(p3, Point::new(5.0, if sweep { -5.0 } else { 5.0 }), 1e-9);
                }
                el => panic!("unexpected {el:?}"),
            }
        }
    }

    #[test]
    fn cubics_stay_on_circle() {
        let arc = Arc {
            center: Point::new(1.0, 2.0),
            radii: Vec2::new(3.0, 3.0),
            start_angle: 0.0,
            sweep_angle: 1.5 * PI,
            x_rotation: 0.0,
        };
        let cubics: Vec<_> = arc.cubics().collect();
        assert_eq!(cubics.len(), 3);
        for c in cubics {
            for i in 0..=4 {
                let r = c.eval(i as f64 / 4.0).distance(arc.center);
                assert!((r - 3.0).abs() < 3e-3, "radius {r}");
            }
        }
    }

    #[test]
    fn small_radii_are_scaled() {
        let arc = Arc::from_svg_arc(&SvgArc {
            from: Point::new(0.0, 0.0),
            to: Point::new(10.0, 0.0),
            radii: Vec2::new(1.0, 1.0),
            x_rotation: 0.0,
            large_arc: false,
            sweep: true,
        })
        .unwrap();
        assert!((arc.radii.x - 5.0).abs() < 1e-12);
        assert_near(arc.center, Point::new(5.0, 0.0), 1e-12);
    }

    #[test]
    fn degenerate_arcs() {
        let mut path = BezPath::new();
        path.move_to(Point::new(0.0, 0.0));
        path.arc_to(Vec2::new(5.0, 5.0), 0.0, false, false, Point::new(0.0, 0.0));
        assert_eq!(path.elements().len(), 1);
        path.arc_to(Vec2::new(0.0, 5.0), 0.0, false, false, Point::new(4.0, 0.0));
        assert_eq!(path.elements()[1], PathEl::LineTo(Point::new(4.0, 0.0)));
    }

    #[test]
    fn rotated_ellipse() {
        let mut path = BezPath::new();
        path.move_to(Point::new(0.0, 0.0));
        path.arc_to(Vec2::new(8.0, 4.0), 30.0, true, true, Point::new(6.0, 6.0));
        assert_eq!(path.last_point(), Some(Point::new(6.0, 6.0)));
        assert!(path.elements().len() >= 3);
    }
}
