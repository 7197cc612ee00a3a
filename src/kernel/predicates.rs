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
    geometry::point::Point2,
    kernel::orientation::orient2d,
    numeric::scalar::Scalar,
};

/// Incircle determinant. Positive when `d` lies inside the circle through the
/// counter-clockwise triangle `abc`, negative outside, zero on it.
pub fn incircle<T: Scalar>(a: &Point2<T>, b: &Point2<T>, c: &Point2<T>, d: &Point2<T>) -> T {
    let (adx, ady) = (a.x() - d.x(), a.y() - d.y());
    let (bdx, bdy) = (b.x() - d.x(), b.y() - d.y());
    let (cdx, cdy) = (c.x() - d.x(), c.y() - d.y());

    let ad = adx * adx + ady * ady;
    let bd = bdx * bdx + bdy * bdy;
    let cd = cdx * cdx + cdy * cdy;

    ad * (bdx * cdy - cdx * bdy) + bd * (cdx * ady - adx * cdy) + cd * (adx * bdy - bdx * ady)
}

/// Angle-based Delaunay test for the edge `ab` shared by the triangles with
/// apexes `c` and `d`: true when the angles at `c` and `d` sum past pi, i.e.
/// when `d` lies inside the circumcircle of `abc`.
///
/// Works on normalized sines and cosines, which stays well-conditioned for
/// the long thin triangles the super-triangle produces.
pub fn should_flip_edge_stable<T: Scalar>(
    a: &Point2<T>,
    b: &Point2<T>,
    c: &Point2<T>,
    d: &Point2<T>,
) -> bool {
    let (ca, cb) = (c.vector_to(a), c.vector_to(b));
    let (da, db) = (d.vector_to(a), d.vector_to(b));

    let len_c = (ca.norm_squared() * cb.norm_squared()).sqrt();
    let len_d = (da.norm_squared() * db.norm_squared()).sqrt();
    if len_c.is_zero_tol() || len_d.is_zero_tol() {
        return false;
    }

    let cos_c = ca.dot(&cb) / len_c;
    let cos_d = da.dot(&db) / len_d;

    if cos_c >= T::zero() && cos_d >= T::zero() {
        return false;
    }
    if cos_c < T::zero() && cos_d < T::zero() {
        return true;
    }

    let sin_c = ca.cross(&cb).abs() / len_c;
    let sin_d = da.cross(&db).abs() / len_d;

    (sin_c * cos_d + cos_c * sin_d).is_negative_tol()
}

/// Whether the quad around diagonal `ab` (apexes `c`, `d` on either side) is
/// strictly convex, so flipping to `cd` yields two valid triangles.
pub fn is_quad_convex<T: Scalar>(a: &Point2<T>, b: &Point2<T>, c: &Point2<T>, d: &Point2<T>) -> bool {
    let sa = orient2d(c, d, a).sign();
    let sb = orient2d(c, d, b).sign();
    let sc = orient2d(a, b, c).sign();
    let sd = orient2d(a, b, d).sign();
    sa * sb < 0 && sc * sd < 0
}

/// Closed point-in-triangle test, independent of the triangle's winding.
pub fn point_in_triangle<T: Scalar>(p: &Point2<T>, a: &Point2<T>, b: &Point2<T>, c: &Point2<T>) -> bool {
    let s = [
        orient2d(a, b, p).sign(),
        orient2d(b, c, p).sign(),
        orient2d(c, a, p).sign(),
    ];
    let has_neg = s.iter().any(|&v| v < 0);
    let has_pos = s.iter().any(|&v| v > 0);
    !(has_neg && has_pos)
}

/// Open point-in-triangle test for a counter-clockwise triangle.
pub fn point_strictly_in_triangle<T: Scalar>(
    p: &Point2<T>,
    a: &Point2<T>,
    b: &Point2<T>,
    c: &Point2<T>,
) -> bool {
    orient2d(a, b, p).is_positive_tol()
        && orient2d(b, c, p).is_positive_tol()
        && orient2d(c, a, p).is_positive_tol()
}

/// Even-odd ray cast against the closed loop `polygon`.
pub fn point_in_polygon<T: Scalar>(p: &Point2<T>, polygon: &[Point2<T>]) -> bool {
    let n = polygon.len();
    if n < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let (pi, pj) = (&polygon[i], &polygon[j]);
        if (pi.y() > p.y()) != (pj.y() > p.y()) {
            let x = pi.x() + (p.y() - pi.y()) * (pj.x() - pi.x()) / (pj.y() - pi.y());
            if p.x() < x {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> Point2<f64> {
        Point2::new([x, y])
    }

    #[test]
    fn incircle_sign() {
        let (a, b, c) = (p(0.0, 0.0), p(1.0, 0.0), p(0.0, 1.0));
        assert!(incircle(&a, &b, &c, &p(0.4, 0.4)) > 0.0);
        assert!(incircle(&a, &b, &c, &p(2.0, 2.0)) < 0.0);
        assert!(incircle(&a, &b, &c, &p(1.0, 1.0)).abs() < 1e-12);
    }

    #[test]
    fn flip_predicate_matches_incircle() {
        let (a, b) = (p(0.0, 0.0), p(1.0, 0.0));
        // long thin pair: apexes close to the edge, flip wanted
        assert!(should_flip_edge_stable(&a, &b, &p(0.5, 0.1), &p(0.5, -0.1)));
        // well-shaped pair: no flip
        assert!(!should_flip_edge_stable(&a, &b, &p(0.5, 2.0), &p(0.5, -2.0)));
        // cocircular square: no flip either way
        assert!(!should_flip_edge_stable(&a, &p(1.0, 1.0), &p(0.0, 1.0), &b));
    }

    #[test]
    fn quad_convexity() {
        let (a, b) = (p(0.0, 0.0), p(1.0, 1.0));
        assert!(is_quad_convex(&a, &b, &p(0.0, 1.0), &p(1.0, 0.0)));
        // reflex at b: the other diagonal would leave the quad
        assert!(!is_quad_convex(&a, &b, &p(0.0, 1.0), &p(2.0, 1.5)));
    }

    #[test]
    fn polygon_containment() {
        let square = [p(0.0, 0.0), p(1.0, 0.0), p(1.0, 1.0), p(0.0, 1.0)];
        assert!(point_in_polygon(&p(0.5, 0.5), &square));
        assert!(!point_in_polygon(&p(1.5, 0.5), &square));
        assert!(point_in_triangle(&p(0.5, 0.0), &square[0], &square[1], &square[2]));
        assert!(!point_strictly_in_triangle(&p(0.5, 0.0), &square[0], &square[1], &square[2]));
    }
}
