// Copyright 2026 the Draftgeom Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Polynomials with real coefficients and their real roots.
//!
//! Closed-form solutions are used up to degree four. Higher degrees are only
//! supported on a bounded interval, where the roots of the derivative bracket
//! the roots of the polynomial and each bracket is refined by bisection.

use std::ops::{Add, Mul, Sub};

use arrayvec::ArrayVec;
use smallvec::{smallvec, SmallVec};

use crate::Tolerances;

/// Real roots, in ascending order.
pub type Roots = SmallVec<[f64; 4]>;

/// A polynomial in one variable.
///
/// The coefficient of `x^i` is stored at index `i`, so the degree is the
/// number of coefficients minus one. There is always at least one
/// coefficient.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Polynomial {
    coeffs: SmallVec<[f64; 8]>,
}

impl Polynomial {
    /// Create a polynomial from coefficients, constant term first.
    ///
    /// `Polynomial::new(&[c, b, a])` is `a x² + b x + c`. An empty slice
    /// gives the zero polynomial.
    pub fn new(coeffs: &[f64]) -> Polynomial {
        if coeffs.is_empty() {
            return Polynomial {
                coeffs: smallvec![0.0],
            };
        }
        Polynomial {
            coeffs: SmallVec::from_slice(coeffs),
        }
    }

    /// Create a polynomial from coefficients, highest degree first.
    ///
    /// `Polynomial::from_highest_first(&[a, b, c])` is `a x² + b x + c`.
    pub fn from_highest_first(coeffs: &[f64]) -> Polynomial {
        let mut p = Polynomial::new(coeffs);
        if !coeffs.is_empty() {
            p.coeffs.reverse();
        }
        p
    }

    /// The coefficients, constant term first.
    #[inline]
    pub fn coeffs(&self) -> &[f64] {
        &self.coeffs
    }

    /// The nominal degree, counting leading zero coefficients.
    #[inline]
    pub fn degree(&self) -> usize {
        self.coeffs.len() - 1
    }

    /// Evaluate the polynomial at `x` using Horner's scheme.
    pub fn eval(&self, x: f64) -> f64 {
        let mut acc = 0.0;
        for c in self.coeffs.iter().rev() {
            acc = acc * x + c;
        }
        acc
    }

    /// The derivative.
    #[must_use]
    pub fn deriv(&self) -> Polynomial {
        if self.coeffs.len() == 1 {
            return Polynomial::new(&[0.0]);
        }
        Polynomial {
            coeffs: self
                .coeffs
                .iter()
                .enumerate()
                .skip(1)
                .map(|(i, c)| i as f64 * c)
                .collect(),
        }
    }

    /// Strip leading coefficients whose magnitude is at most `epsilon`.
    ///
    /// The degree of the result is the effective degree of `self`. The
    /// constant term is never stripped.
    #[must_use]
    pub fn simplify(&self, epsilon: f64) -> Polynomial {
        let mut coeffs = self.coeffs.clone();
        while coeffs.len() > 1 && coeffs[coeffs.len() - 1].abs() <= epsilon {
            coeffs.pop();
        }
        Polynomial { coeffs }
    }

    /// Divide every coefficient by `s`, in place.
    pub fn divide_scalar(&mut self, s: f64) {
        for c in &mut self.coeffs {
            *c /= s;
        }
    }

    /// All real roots, using the default tolerances.
    ///
    /// See [`Polynomial::roots_with`].
    ///
    /// # Panics
    ///
    /// Panics if the effective degree is greater than four.
    pub fn roots(&self) -> Roots {
        self.roots_with(&Tolerances::DEFAULT)
    }

    /// All real roots of a polynomial of effective degree at most four.
    ///
    /// Leading coefficients within `tol.epsilon` of zero are stripped first.
    /// Repeated roots are reported once. The result is sorted ascending.
    /// A constant polynomial has no isolated roots, so the result is empty.
    ///
    /// Callers can rely on `|p(root)|` being small, not on bit-exact values.
    ///
    /// # Panics
    ///
    /// Panics if the effective degree is greater than four. Use
    /// [`Polynomial::roots_in_interval`] for higher degrees.
    pub fn roots_with(&self, tol: &Tolerances) -> Roots {
        let p = self.simplify(tol.epsilon);
        let c = &p.coeffs;
        let found: ArrayVec<f64, 4> = match p.degree() {
            0 => ArrayVec::new(),
            1 => solve_linear(c[0], c[1]),
            2 => solve_quadratic(c[0], c[1], c[2], tol.epsilon),
            3 => solve_cubic(c[0], c[1], c[2], c[3], tol.epsilon),
            4 => solve_quartic(c[0], c[1], c[2], c[3], c[4], tol.epsilon),
            degree => panic!("closed-form roots need an effective degree of at most 4, got {degree}"),
        };
        let d = p.deriv();
        let mut roots: Roots = found
            .into_iter()
            .filter(|r| r.is_finite())
            .map(|r| p.polish(&d, r))
            .collect();
        roots.sort_by(f64::total_cmp);
        roots.dedup_by(|a, b| (*a - *b).abs() <= tol.epsilon);
        roots
    }

    /// Real roots within `[min, max]`, using the default tolerances.
    pub fn roots_in_interval(&self, min: f64, max: f64) -> Roots {
        self.roots_in_interval_with(min, max, &Tolerances::DEFAULT)
    }

    /// Real roots within `[min, max]`, for any degree.
    ///
    /// The roots of the derivative split the interval into monotonic
    /// brackets. The derivative roots come from the closed-form solver once
    /// its degree is at most four, and from this method recursively above
    /// that. Each bracket is then searched with [`Polynomial::bisection_with`].
    ///
    /// The result is sorted ascending, with duplicates removed.
    pub fn roots_in_interval_with(&self, min: f64, max: f64, tol: &Tolerances) -> Roots {
        let p = self.simplify(tol.epsilon);
        let mut roots = Roots::new();
        match p.degree() {
            0 => {}
            1 => {
                if let Some(root) = p.bisection_with(min, max, tol) {
                    roots.push(root);
                }
            }
            _ => {
                let d = p.deriv();
                let d_roots = if d.simplify(tol.epsilon).degree() <= 4 {
                    d.roots_with(tol)
                        .into_iter()
                        .filter(|r| *r > min && *r < max)
                        .collect()
                } else {
                    d.roots_in_interval_with(min, max, tol)
                };
                let mut lo = min;
                for hi in d_roots.into_iter().chain(std::iter::once(max)) {
                    if let Some(root) = p.bisection_with(lo, hi, tol) {
                        if roots
                            .last()
                            .map_or(true, |last| (root - last).abs() > tol.epsilon)
                        {
                            roots.push(root);
                        }
                    }
                    lo = hi;
                }
            }
        }
        roots
    }

    /// Bisection search for a root in `[min, max]`, with the default tolerances.
    pub fn bisection(&self, min: f64, max: f64) -> Option<f64> {
        self.bisection_with(min, max, &Tolerances::DEFAULT)
    }

    /// Bisection search for a root in `[min, max]`.
    ///
    /// An endpoint whose value is within `tol.epsilon` of zero is returned
    /// directly. Otherwise the values at the endpoints must differ in sign,
    /// or `None` is returned. The bracket is halved
    /// [`Tolerances::bisection_iterations`] times, or until the midpoint
    /// value is within `tol.epsilon` of zero.
    pub fn bisection_with(&self, mut min: f64, mut max: f64, tol: &Tolerances) -> Option<f64> {
        let mut min_value = self.eval(min);
        let max_value = self.eval(max);
        if min_value.abs() <= tol.epsilon {
            return Some(min);
        }
        if max_value.abs() <= tol.epsilon {
            return Some(max);
        }
        let product = min_value * max_value;
        if product.is_nan() || product > 0.0 {
            return None;
        }
        let mut result = 0.5 * (min + max);
        for _ in 0..tol.bisection_iterations(max - min) {
            result = 0.5 * (min + max);
            let value = self.eval(result);
            if value.abs() <= tol.epsilon {
                break;
            }
            if value * min_value < 0.0 {
                max = result;
            } else {
                min = result;
                min_value = value;
            }
        }
        Some(result)
    }

    /// Newton steps from a closed-form root, kept only while they shrink the
    /// residual.
    fn polish(&self, deriv: &Polynomial, mut x: f64) -> f64 {
        for _ in 0..2 {
            let value = self.eval(x);
            let slope = deriv.eval(x);
            if value == 0.0 || slope == 0.0 {
                break;
            }
            let next = x - value / slope;
            if !(next.is_finite() && self.eval(next).abs() < value.abs()) {
                break;
            }
            x = next;
        }
        x
    }

    fn zip_with(&self, other: &Polynomial, f: impl Fn(f64, f64) -> f64) -> Polynomial {
        let n = self.coeffs.len().max(other.coeffs.len());
        let get = |p: &Polynomial, i: usize| p.coeffs.get(i).copied().unwrap_or(0.0);
        Polynomial {
            coeffs: (0..n).map(|i| f(get(self, i), get(other, i))).collect(),
        }
    }
}

impl Add for &Polynomial {
    type Output = Polynomial;

    fn add(self, other: &Polynomial) -> Polynomial {
        self.zip_with(other, |a, b| a + b)
    }
}

impl Add for Polynomial {
    type Output = Polynomial;

    #[inline]
    fn add(self, other: Polynomial) -> Polynomial {
        &self + &other
    }
}

impl Sub for &Polynomial {
    type Output = Polynomial;

    fn sub(self, other: &Polynomial) -> Polynomial {
        self.zip_with(other, |a, b| a - b)
    }
}

impl Sub for Polynomial {
    type Output = Polynomial;

    #[inline]
    fn sub(self, other: Polynomial) -> Polynomial {
        &self - &other
    }
}

impl Mul for &Polynomial {
    type Output = Polynomial;

    fn mul(self, other: &Polynomial) -> Polynomial {
        let mut coeffs: SmallVec<[f64; 8]> =
            smallvec![0.0; self.coeffs.len() + other.coeffs.len() - 1];
        for (i, a) in self.coeffs.iter().enumerate() {
            for (j, b) in other.coeffs.iter().enumerate() {
                coeffs[i + j] += a * b;
            }
        }
        Polynomial { coeffs }
    }
}

impl Mul for Polynomial {
    type Output = Polynomial;

    #[inline]
    fn mul(self, other: Polynomial) -> Polynomial {
        &self * &other
    }
}

impl Mul<f64> for Polynomial {
    type Output = Polynomial;

    fn mul(mut self, s: f64) -> Polynomial {
        for c in &mut self.coeffs {
            *c *= s;
        }
        self
    }
}

/// Whether `value` is zero relative to the magnitude `scale` of the terms
/// it was computed from.
#[inline]
fn near_zero(value: f64, scale: f64, epsilon: f64) -> bool {
    value.abs() <= epsilon * scale
}

/// Root of `c1 x + c0`.
fn solve_linear(c0: f64, c1: f64) -> ArrayVec<f64, 4> {
    let mut result = ArrayVec::new();
    result.push(-c0 / c1);
    result
}

/// Roots of `c2 x² + c1 x + c0`, `c2` non-zero.
///
/// A discriminant within `epsilon` of zero, relative to `b²` and `4c`,
/// yields the double root once.
fn solve_quadratic(c0: f64, c1: f64, c2: f64, epsilon: f64) -> ArrayVec<f64, 4> {
    let mut result = ArrayVec::new();
    let b = c1 / c2;
    let c = c0 / c2;
    let d = b * b - 4.0 * c;
    if near_zero(d, b * b + 4.0 * c.abs(), epsilon) {
        result.push(-0.5 * b);
    } else if d > 0.0 {
        // See https://math.stackexchange.com/questions/866331
        let root1 = -0.5 * (b + d.sqrt().copysign(b));
        result.push(root1);
        result.push(c / root1);
    }
    result
}

/// Roots of `c3 x³ + c2 x² + c1 x + c0`, `c3` non-zero.
///
/// The cubic is depressed to `y³ + a y + b` with `x = y - c2 / 3`, and the
/// sign of `Δ = b²/4 + a³/27` selects Cardano's formula (one real root), the
/// trigonometric form (three real roots) or the repeated-root case. `Δ` is
/// compared to `epsilon` relative to the size of its two terms, so close but
/// distinct roots are not mistaken for a repeated one.
fn solve_cubic(c0: f64, c1: f64, c2: f64, c3: f64, epsilon: f64) -> ArrayVec<f64, 4> {
    let mut result = ArrayVec::new();
    let c2 = c2 / c3;
    let c1 = c1 / c3;
    let c0 = c0 / c3;

    let a = (3.0 * c1 - c2 * c2) / 3.0;
    let b = (2.0 * c2 * c2 * c2 - 9.0 * c1 * c2 + 27.0 * c0) / 27.0;
    let offset = c2 / 3.0;
    let mut discrim = b * b / 4.0 + a * a * a / 27.0;
    let half_b = b / 2.0;

    if near_zero(discrim, half_b * half_b + (a / 3.0).abs().powi(3), epsilon) {
        discrim = 0.0;
    }

    if discrim > 0.0 {
        let e = discrim.sqrt();
        let root = (-half_b + e).cbrt() + (-half_b - e).cbrt();
        result.push(root - offset);
    } else if discrim < 0.0 {
        let distance = (-a / 3.0).sqrt();
        let angle = (-discrim).sqrt().atan2(-half_b) / 3.0;
        let (sin, cos) = angle.sin_cos();
        let sqrt3 = 3.0f64.sqrt();
        result.push(2.0 * distance * cos - offset);
        result.push(-distance * (cos + sqrt3 * sin) - offset);
        result.push(-distance * (cos - sqrt3 * sin) - offset);
    } else {
        let tmp = (-half_b).cbrt();
        result.push(2.0 * tmp - offset);
        // Repeated root; reported once.
        result.push(-tmp - offset);
    }
    result
}

/// Roots of `c4 x⁴ + c3 x³ + c2 x² + c1 x + c0`, `c4` non-zero.
///
/// Ferrari's method: the largest root of the resolvent cubic splits the
/// quartic into two quadratics. Residuals within `epsilon` of zero, relative
/// to the terms they are computed from, are snapped to zero so near-double
/// roots do not fall into a complex branch.
fn solve_quartic(c0: f64, c1: f64, c2: f64, c3: f64, c4: f64, epsilon: f64) -> ArrayVec<f64, 4> {
    let mut result = ArrayVec::new();
    let c3 = c3 / c4;
    let c2 = c2 / c4;
    let c1 = c1 / c4;
    let c0 = c0 / c4;

    let resolvent = solve_cubic(
        -c3 * c3 * c0 + 4.0 * c2 * c0 - c1 * c1,
        c3 * c1 - 4.0 * c0,
        -c2,
        1.0,
        epsilon,
    );
    let Some(y) = resolvent.into_iter().reduce(f64::max) else {
        return result;
    };

    let mut discrim = c3 * c3 / 4.0 - c2 + y;
    if near_zero(discrim, c3 * c3 / 4.0 + c2.abs() + y.abs(), epsilon) {
        discrim = 0.0;
    }

    if discrim > 0.0 {
        let e = discrim.sqrt();
        let t1 = 3.0 * c3 * c3 / 4.0 - e * e - 2.0 * c2;
        let t2 = (4.0 * c3 * c2 - 8.0 * c1 - c3 * c3 * c3) / (4.0 * e);
        let scale = 3.0 * c3 * c3 / 4.0
            + e * e
            + 2.0 * c2.abs()
            + ((4.0 * c3 * c2).abs() + 8.0 * c1.abs() + c3.abs().powi(3)) / (4.0 * e);
        let mut plus = t1 + t2;
        let mut minus = t1 - t2;
        if near_zero(plus, scale, epsilon) {
            plus = 0.0;
        }
        if near_zero(minus, scale, epsilon) {
            minus = 0.0;
        }
        if plus >= 0.0 {
            let f = plus.sqrt();
            result.push(-c3 / 4.0 + (e + f) / 2.0);
            result.push(-c3 / 4.0 + (e - f) / 2.0);
        }
        if minus >= 0.0 {
            let f = minus.sqrt();
            result.push(-c3 / 4.0 + (f - e) / 2.0);
            result.push(-c3 / 4.0 - (f + e) / 2.0);
        }
    } else if discrim == 0.0 {
        let mut t2 = y * y - 4.0 * c0;
        if t2 >= 0.0 || near_zero(t2, y * y + 4.0 * c0.abs(), epsilon) {
            if t2 < 0.0 {
                t2 = 0.0;
            }
            let t2 = 2.0 * t2.sqrt();
            let t1 = 3.0 * c3 * c3 / 4.0 - 2.0 * c2;
            let scale = 3.0 * c3 * c3 / 4.0 + 2.0 * c2.abs() + t2;
            if t1 + t2 >= 0.0 || near_zero(t1 + t2, scale, epsilon) {
                let d = (t1 + t2).max(0.0).sqrt();
                result.push(-c3 / 4.0 + d / 2.0);
                result.push(-c3 / 4.0 - d / 2.0);
            }
            if t1 - t2 >= 0.0 || near_zero(t1 - t2, scale, epsilon) {
                let d = (t1 - t2).max(0.0).sqrt();
                result.push(-c3 / 4.0 + d / 2.0);
                result.push(-c3 / 4.0 - d / 2.0);
            }
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn from_roots(roots: &[f64]) -> Polynomial {
        roots.iter().fold(Polynomial::new(&[1.0]), |acc, r| {
            acc * Polynomial::new(&[-r, 1.0])
        })
    }

    fn verify(roots: Roots, expected: &[f64], epsilon: f64) {
        assert_eq!(
            expected.len(),
            roots.len(),
            "expected {expected:?}, got {roots:?}"
        );
        let mut expected = expected.to_vec();
        expected.sort_by(f64::total_cmp);
        for (r, e) in roots.iter().zip(&expected) {
            assert!((r - e).abs() < epsilon, "expected {expected:?}, got {roots:?}");
        }
    }

    #[test]
    fn eval_and_deriv() {
        // 2x³ - 3x + 1
        let p = Polynomial::from_highest_first(&[2.0, 0.0, -3.0, 1.0]);
        assert_eq!(p.coeffs(), &[1.0, -3.0, 0.0, 2.0]);
        assert_eq!(p.degree(), 3);
        assert_eq!(p.eval(2.0), 11.0);
        assert_eq!(p.deriv().coeffs(), &[-3.0, 0.0, 6.0]);
        assert_eq!(Polynomial::new(&[5.0]).deriv().coeffs(), &[0.0]);
    }

    #[test]
    fn arithmetic() {
        let a = Polynomial::new(&[1.0, 1.0]);
        let b = Polynomial::new(&[-1.0, 1.0]);
        assert_eq!((&a * &b).coeffs(), &[-1.0, 0.0, 1.0]);
        assert_eq!((&a + &b).coeffs(), &[0.0, 2.0]);
        assert_eq!((&a - &b).coeffs(), &[2.0, 0.0]);
        assert_eq!((a * 3.0).coeffs(), &[3.0, 3.0]);
        let mut c = Polynomial::new(&[2.0, 4.0]);
        c.divide_scalar(2.0);
        assert_eq!(c.coeffs(), &[1.0, 2.0]);
    }

    #[test]
    fn simplify_strips_near_zero_leading_terms() {
        let p = Polynomial::from_highest_first(&[1e-12, 0.0, 1.0, -2.0]);
        assert_eq!(p.simplify(EPS).degree(), 1);
        verify(p.roots(), &[2.0], 1e-12);
        assert_eq!(Polynomial::new(&[0.0, 0.0]).simplify(EPS).degree(), 0);
        assert!(Polynomial::new(&[3.0]).roots().is_empty());
    }

    const EPS: f64 = crate::EPSILON;

    #[test]
    fn quadratic() {
        verify(
            Polynomial::new(&[-5.0, 0.0, 1.0]).roots(),
            &[-(5.0f64.sqrt()), 5.0f64.sqrt()],
            1e-12,
        );
        verify(Polynomial::new(&[5.0, 0.0, 1.0]).roots(), &[], 1e-12);
        // Double root reported once.
        verify(Polynomial::new(&[1.0, 2.0, 1.0]).roots(), &[-1.0], 1e-12);
    }

    #[test]
    fn cubic_branches() {
        // Δ > 0, one real root.
        verify(
            Polynomial::new(&[-5.0, 0.0, 0.0, 1.0]).roots(),
            &[5.0f64.cbrt()],
            1e-12,
        );
        // Δ < 0, three real roots.
        verify(
            Polynomial::new(&[0.0, -1.0, 0.0, 1.0]).roots(),
            &[-1.0, 0.0, 1.0],
            1e-12,
        );
        // Δ = 0, a simple and a double root.
        verify(
            Polynomial::new(&[-2.0, -3.0, 0.0, 1.0]).roots(),
            &[-1.0, 2.0],
            1e-9,
        );
        // Triple root.
        verify(from_roots(&[1.5, 1.5, 1.5]).roots(), &[1.5], 1e-6);
    }

    #[test]
    fn quartic() {
        verify(from_roots(&[1.0, 2.0, 3.0, 4.0]).roots(), &[1.0, 2.0, 3.0, 4.0], 1e-9);
        verify(from_roots(&[-3.0, -0.5, 0.25, 7.0]).roots(), &[-3.0, -0.5, 0.25, 7.0], 1e-9);
        // x⁴ + 1 has no real roots.
        verify(Polynomial::new(&[1.0, 0.0, 0.0, 0.0, 1.0]).roots(), &[], 1e-9);
        // x⁴ - 5x² + 4 = (x² - 1)(x² - 4)
        verify(
            Polynomial::new(&[4.0, 0.0, -5.0, 0.0, 1.0]).roots(),
            &[-2.0, -1.0, 1.0, 2.0],
            1e-9,
        );
        // Two double roots, each reported once.
        verify(from_roots(&[-1.0, -1.0, 2.0, 2.0]).roots(), &[-1.0, 2.0], 1e-6);
    }

    #[test]
    #[should_panic(expected = "effective degree of at most 4")]
    fn closed_form_rejects_quintic() {
        let _ = from_roots(&[1.0, 2.0, 3.0, 4.0, 5.0]).roots();
    }

    #[test]
    fn bisection() {
        let p = Polynomial::new(&[-2.0, 0.0, 1.0]);
        let root = p.bisection(0.0, 2.0).unwrap();
        assert!((root - 2.0f64.sqrt()).abs() < 1e-6);
        assert!(p.eval(root).abs() < 1e-5);
        // No sign change.
        assert_eq!(p.bisection(2.0, 3.0), None);
        // Endpoint on the root is returned directly.
        assert_eq!(Polynomial::new(&[-1.0, 1.0]).bisection(1.0, 3.0), Some(1.0));
    }

    #[test]
    fn roots_in_interval_high_degree() {
        let expected = [-2.5, -1.0, 0.5, 1.25, 3.0, 4.5];
        let p = from_roots(&expected);
        let roots = p.roots_in_interval(-1.5, 3.5);
        verify(roots, &[-1.0, 0.5, 1.25, 3.0], 1e-5);
        let roots = p.roots_in_interval(-10.0, 10.0);
        verify(roots, &expected, 1e-5);
    }

    #[test]
    fn roots_in_interval_finds_tangent_root() {
        // (x - 0.5)² touches zero without a sign change.
        let p = from_roots(&[0.5, 0.5]);
        verify(p.roots_in_interval(0.0, 1.0), &[0.5], 1e-6);
    }

    #[test]
    fn randomized_quartics() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        for _ in 0..200 {
            let mut roots: Vec<f64> = Vec::new();
            while roots.len() < 4 {
                let r: f64 = rng.random_range(-5.0..5.0);
                if roots.iter().all(|x| (x - r).abs() > 0.5) {
                    roots.push(r);
                }
            }
            let p = from_roots(&roots);
            verify(p.roots(), &roots, 1e-6);
            for r in p.roots() {
                assert!(p.eval(r).abs() < 1e-6, "p({r}) = {}", p.eval(r));
            }
        }
    }

    #[test]
    fn close_roots_are_kept_apart() {
        for roots in [&[0.1, 0.11, 0.12][..], &[0.1, 0.2, 0.3, 0.4][..], &[0.5, 0.501][..]] {
            let p = from_roots(roots);
            let found = p.roots();
            verify(found.clone(), roots, 1e-6);
            for r in found {
                assert!(p.eval(r).abs() <= EPS, "p({r}) = {}", p.eval(r));
            }
        }
    }

    proptest! {
        #[test]
        fn unit_interval_roots_have_small_residuals(
            raw in prop::collection::vec(0.0f64..1.0, 1..=4),
        ) {
            let mut roots = raw.clone();
            roots.sort_by(f64::total_cmp);
            prop_assume!(roots.windows(2).all(|w| w[1] - w[0] > 0.05));
            let p = from_roots(&roots);
            let found = p.roots();
            prop_assert_eq!(found.len(), roots.len());
            for (f, r) in found.iter().zip(&roots) {
                prop_assert!((f - r).abs() < 1e-6, "found {:?} expected {:?}", found, roots);
                prop_assert!(p.eval(*f).abs() <= EPS);
            }
        }

        #[test]
        fn closed_form_recovers_known_roots(
            raw in prop::collection::vec(-5.0f64..5.0, 1..=4),
        ) {
            let mut roots = raw.clone();
            roots.sort_by(f64::total_cmp);
            prop_assume!(roots.windows(2).all(|w| w[1] - w[0] > 0.5));
            let p = from_roots(&roots);
            let found = p.roots();
            prop_assert_eq!(found.len(), roots.len());
            for (f, r) in found.iter().zip(&roots) {
                prop_assert!((f - r).abs() < 1e-6, "found {:?} expected {:?}", found, roots);
            }
        }
    }
}
