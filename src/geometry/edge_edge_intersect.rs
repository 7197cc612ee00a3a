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

use crate::{geometry::point::Point2, numeric::scalar::Scalar};

/// Knobs for [`segments_intersect`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IntersectionOptions {
    /// Count a touch at an endpoint of either segment as an intersection.
    pub include_end_points: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SegmentIntersection<T: Scalar> {
    None,
    /// Single crossing at `a0 + (a1 - a0) * alpha_a == b0 + (b1 - b0) * alpha_b`.
    Point {
        point: Point2<T>,
        alpha_a: T,
        alpha_b: T,
    },
    /// Collinear segments sharing more than a point.
    Overlap,
}

/// Intersection of the closed segments `a0a1` and `b0b1`.
pub fn edge_edge_intersection_2<T: Scalar>(
    a0: &Point2<T>,
    a1: &Point2<T>,
    b0: &Point2<T>,
    b1: &Point2<T>,
) -> SegmentIntersection<T> {
    let da = a0.vector_to(a1);
    let db = b0.vector_to(b1);
    let w = a0.vector_to(b0);
    let denom = da.cross(&db);

    if denom.is_zero_tol() {
        if !w.cross(&da).is_zero_tol() {
            return SegmentIntersection::None;
        }
        // collinear: compare projections on the longer axis
        let len2 = da.norm_squared();
        if len2.is_zero_tol() {
            return SegmentIntersection::None;
        }
        let t0 = w.dot(&da) / len2;
        let t1 = a0.vector_to(b1).dot(&da) / len2;
        let (lo, hi) = if t0 <= t1 { (t0, t1) } else { (t1, t0) };
        let overlap = hi.min(T::one()) - lo.max(T::zero());
        if overlap.is_positive_tol() {
            return SegmentIntersection::Overlap;
        }
        if overlap.is_zero_tol() {
            // touching at a single shared endpoint
            let alpha_a = if lo.max(T::zero()).approx_eq(&T::zero()) {
                T::zero()
            } else {
                T::one()
            };
            let point = a0.lerp(a1, alpha_a);
            let alpha_b = if point.approx_eq(b0) { T::zero() } else { T::one() };
            return SegmentIntersection::Point {
                point,
                alpha_a,
                alpha_b,
            };
        }
        return SegmentIntersection::None;
    }

    let alpha_a = w.cross(&db) / denom;
    let alpha_b = w.cross(&da) / denom;
    let lo = -T::tolerance();
    let hi = T::one() + T::tolerance();
    if alpha_a < lo || alpha_a > hi || alpha_b < lo || alpha_b > hi {
        return SegmentIntersection::None;
    }
    SegmentIntersection::Point {
        point: a0.lerp(a1, alpha_a),
        alpha_a,
        alpha_b,
    }
}

/// Whether the segments intersect. With `include_end_points` unset, only a
/// crossing strictly inside both segments counts.
pub fn segments_intersect<T: Scalar>(
    a0: &Point2<T>,
    a1: &Point2<T>,
    b0: &Point2<T>,
    b1: &Point2<T>,
    options: &IntersectionOptions,
) -> bool {
    match edge_edge_intersection_2(a0, a1, b0, b1) {
        SegmentIntersection::None => false,
        SegmentIntersection::Overlap => options.include_end_points,
        SegmentIntersection::Point {
            alpha_a, alpha_b, ..
        } => options.include_end_points || (is_interior(alpha_a) && is_interior(alpha_b)),
    }
}

#[inline]
pub(crate) fn is_interior<T: Scalar>(alpha: T) -> bool {
    alpha.is_positive_tol() && (T::one() - alpha).is_positive_tol()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> Point2<f64> {
        Point2::new([x, y])
    }

    #[test]
    fn crossing_reports_parameters() {
        match edge_edge_intersection_2(&p(0.0, 0.0), &p(2.0, 0.0), &p(1.0, -1.0), &p(1.0, 3.0)) {
            SegmentIntersection::Point {
                point,
                alpha_a,
                alpha_b,
            } => {
                assert!(point.approx_eq(&p(1.0, 0.0)));
                assert!((alpha_a - 0.5).abs() < 1e-12);
                assert!((alpha_b - 0.25).abs() < 1e-12);
            }
            other => panic!("expected a crossing, got {other:?}"),
        }
    }

    #[test]
    fn shared_endpoint_depends_on_options() {
        let (a0, a1, b1) = (p(0.0, 0.0), p(1.0, 0.0), p(1.0, 1.0));
        let strict = IntersectionOptions::default();
        let inclusive = IntersectionOptions {
            include_end_points: true,
        };
        assert!(!segments_intersect(&a0, &a1, &a1, &b1, &strict));
        assert!(segments_intersect(&a0, &a1, &a1, &b1, &inclusive));
    }

    #[test]
    fn collinear_overlap_is_detected() {
        let r = edge_edge_intersection_2(&p(0.0, 0.0), &p(2.0, 0.0), &p(1.0, 0.0), &p(3.0, 0.0));
        assert_eq!(r, SegmentIntersection::Overlap);
        let r = edge_edge_intersection_2(&p(0.0, 0.0), &p(1.0, 0.0), &p(2.0, 0.0), &p(3.0, 0.0));
        assert_eq!(r, SegmentIntersection::None);
    }
}
