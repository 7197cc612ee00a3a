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
    geometry::point::{Point, Point2},
    numeric::scalar::Scalar,
};

/// Shoelace area; positive for counter-clockwise loops.
pub fn polygon_signed_area<T: Scalar>(points: &[Point2<T>]) -> T {
    let n = points.len();
    if n < 3 {
        return T::zero();
    }
    let twice = (0..n).fold(T::zero(), |acc, i| {
        let p = &points[i];
        let q = &points[(i + 1) % n];
        acc + (p.x() * q.y() - q.x() * p.y())
    });
    twice / T::from_num_den(2, 1)
}

pub fn polygon_area<T: Scalar>(points: &[Point2<T>]) -> T {
    polygon_signed_area(points).abs()
}

pub fn is_counter_clockwise<T: Scalar>(points: &[Point2<T>]) -> bool {
    polygon_signed_area(points) > T::zero()
}

pub fn triangle_area<T: Scalar, const N: usize>(a: &Point<T, N>, b: &Point<T, N>, c: &Point<T, N>) -> T {
    // Heron-free form: |ab|^2 |ac|^2 - (ab . ac)^2 = (2 area)^2
    let ab = a.vector_to(b);
    let ac = a.vector_to(c);
    let g = ab.norm_squared() * ac.norm_squared() - ab.dot(&ac) * ab.dot(&ac);
    g.max(T::zero()).sqrt() / T::from_num_den(2, 1)
}

pub fn triangle_centroid<T: Scalar, const N: usize>(
    a: &Point<T, N>,
    b: &Point<T, N>,
    c: &Point<T, N>,
) -> Point<T, N> {
    let third = T::from_num_den(1, 3);
    Point::new(std::array::from_fn(|i| (a[i] + b[i] + c[i]) * third))
}

/// Axis-aligned bounds `(min, max)`; `None` for an empty slice.
pub fn bounding_box<T: Scalar, const N: usize>(points: &[Point<T, N>]) -> Option<(Point<T, N>, Point<T, N>)> {
    let first = points.first()?;
    let mut lo = *first;
    let mut hi = *first;
    for p in &points[1..] {
        for i in 0..N {
            lo[i] = lo[i].min(p[i]);
            hi[i] = hi[i].max(p[i]);
        }
    }
    Some((lo, hi))
}
