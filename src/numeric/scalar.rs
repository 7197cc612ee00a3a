// SPDX-License-Identifier: MIT
//
// Copyright (c) 2025 Alexandre Severino
//
// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to deal
// in the Software without restriction, including without limitation the rights
// to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
// copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in
// all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
// SOFTWARE.

use std::fmt::Debug;

use num_traits::Float;

/// Floating-point scalar used by every geometric routine in the crate.
///
/// All approximate comparisons go through [`Scalar::tolerance`], a single
/// fixed epsilon per type. Inputs are expected to be normalized to roughly
/// the unit box (see [`crate::geometry::normalize::Normalizer`]) so that the
/// fixed epsilon stays meaningful.
pub trait Scalar: Float + Debug + Default + Send + Sync + 'static {
    fn tolerance() -> Self;

    fn cast_f64(value: f64) -> Self;

    fn as_f64(self) -> f64;

    fn tolerance_squared() -> Self {
        let tol = Self::tolerance();
        tol * tol
    }

    fn from_num_den(num: i32, den: i32) -> Self {
        Self::cast_f64(num as f64 / den as f64)
    }

    /// Returns -1, 0, or +1, treating anything within tolerance as zero.
    fn sign(&self) -> i8 {
        if self.is_positive_tol() {
            1
        } else if self.is_negative_tol() {
            -1
        } else {
            0
        }
    }

    fn is_positive_tol(&self) -> bool {
        *self > Self::tolerance()
    }

    fn is_negative_tol(&self) -> bool {
        *self < -Self::tolerance()
    }

    fn is_zero_tol(&self) -> bool {
        self.abs() <= Self::tolerance()
    }

    fn approx_eq(&self, other: &Self) -> bool {
        (*self - *other).abs() <= Self::tolerance()
    }
}

impl Scalar for f64 {
    fn tolerance() -> Self {
        1e-9
    }

    fn cast_f64(value: f64) -> Self {
        value
    }

    fn as_f64(self) -> f64 {
        self
    }
}

impl Scalar for f32 {
    fn tolerance() -> Self {
        1e-5
    }

    fn cast_f64(value: f64) -> Self {
        value as f32
    }

    fn as_f64(self) -> f64 {
        self as f64
    }
}

#[cfg(test)]
mod tests {
    use super::Scalar;

    #[test]
    fn sign_respects_tolerance() {
        assert_eq!(1e-12_f64.sign(), 0);
        assert_eq!((-1e-12_f64).sign(), 0);
        assert_eq!(0.5_f64.sign(), 1);
        assert_eq!((-0.5_f64).sign(), -1);
        assert_eq!(1e-7_f32.sign(), 0);
    }

    #[test]
    fn approx_eq_uses_fixed_epsilon() {
        assert!(1.0_f64.approx_eq(&(1.0 + 1e-10)));
        assert!(!1.0_f64.approx_eq(&(1.0 + 1e-6)));
        assert_eq!(f64::from_num_den(1, 4), 0.25);
    }
}
