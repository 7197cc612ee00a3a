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

use crate::{
    geometry::{point::Point, util::bounding_box},
    numeric::scalar::Scalar,
};

/// Maps coordinates into the unit box and back.
///
/// Every axis is scaled by the same factor, the largest extent, so shapes
/// keep their proportions and the fixed tolerance applies uniformly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Normalizer<T: Scalar, const N: usize> {
    pub min: Point<T, N>,
    pub d_max: T,
}

impl<T: Scalar, const N: usize> Normalizer<T, N> {
    pub fn from_points(points: &[Point<T, N>]) -> Self {
        let Some((lo, hi)) = bounding_box(points) else {
            return Self::identity();
        };
        let d_max = (0..N).fold(T::zero(), |acc, i| acc.max(hi[i] - lo[i]));
        if d_max.is_zero_tol() {
            return Self {
                min: lo,
                d_max: T::one(),
            };
        }
        Self { min: lo, d_max }
    }

    pub fn identity() -> Self {
        Self {
            min: Point::origin(),
            d_max: T::one(),
        }
    }

    pub fn normalize(&self, p: &Point<T, N>) -> Point<T, N> {
        Point::new(std::array::from_fn(|i| (p[i] - self.min[i]) / self.d_max))
    }

    pub fn unnormalize(&self, p: &Point<T, N>) -> Point<T, N> {
        Point::new(std::array::from_fn(|i| p[i] * self.d_max + self.min[i]))
    }

    pub fn normalize_all(&self, points: &[Point<T, N>]) -> Vec<Point<T, N>> {
        points.iter().map(|p| self.normalize(p)).collect()
    }

    pub fn unnormalize_all(&self, points: &[Point<T, N>]) -> Vec<Point<T, N>> {
        points.iter().map(|p| self.unnormalize(p)).collect()
    }
}
