// Copyright 2026 the Draftgeom Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Numeric tolerances shared by the solver, the intersection tests and the filters.

/// The zero threshold used throughout the kernel, 2⁻²⁶.
pub const EPSILON: f64 = 1.0 / 67_108_864.0;

/// Decimal digits of accuracy that bisection refines a bracket to.
pub const BISECTION_ACCURACY: i32 = 6;

/// A bundle of tolerances, passed explicitly into numeric routines.
///
/// Every routine that compares against zero or decides whether two points
/// coincide takes a `&Tolerances`, so tests can exercise alternate values
/// deterministically.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tolerances {
    /// Threshold below which polynomial coefficients and values are treated
    /// as zero; discriminants are compared to it relative to the size of
    /// their terms. By default, [`EPSILON`].
    pub epsilon: f64,
    /// Decimal digits of accuracy for bisection. By default, [`BISECTION_ACCURACY`].
    pub accuracy: i32,
    /// Distance under which two points are considered the same, in user units.
    pub geometric: f64,
    /// Maximum distance between a curve and its flattened polyline.
    pub flatness: f64,
}

impl Default for Tolerances {
    #[inline]
    fn default() -> Tolerances {
        Self::DEFAULT
    }
}

impl Tolerances {
    /// The default tolerances.
    pub const DEFAULT: Tolerances = Tolerances {
        epsilon: EPSILON,
        accuracy: BISECTION_ACCURACY,
        geometric: 1e-9,
        flatness: 0.1,
    };

    /// Return a copy with a different zero threshold.
    #[inline]
    #[must_use]
    pub const fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Return a copy with a different flattening tolerance.
    #[inline]
    #[must_use]
    pub const fn with_flatness(mut self, flatness: f64) -> Self {
        self.flatness = flatness;
        self
    }

    /// Number of bisection steps needed to shrink `width` below the accuracy.
    ///
    /// This is `⌈(ln(width) + ln(10)·accuracy) / ln(2)⌉`, clamped at zero.
    pub fn bisection_iterations(&self, width: f64) -> usize {
        if width.is_nan() || width <= 0.0 {
            return 0;
        }
        let n = (width.ln() + std::f64::consts::LN_10 * f64::from(self.accuracy))
            / std::f64::consts::LN_2;
        n.ceil().max(0.0) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn epsilon_is_two_to_minus_26() {
        assert_eq!(EPSILON, 2f64.powi(-26));
    }

    #[test]
    fn bisection_iterations() {
        let tol = Tolerances::DEFAULT;
        // 1 / 2^20 < 1e-6 <= 1 / 2^19
        assert_eq!(tol.bisection_iterations(1.0), 20);
        assert_eq!(tol.bisection_iterations(0.0), 0);
        assert_eq!(tol.bisection_iterations(-1.0), 0);
        let coarse = Tolerances {
            accuracy: 1,
            ..Tolerances::DEFAULT
        };
        assert_eq!(coarse.bisection_iterations(1.0), 4);
    }
}
