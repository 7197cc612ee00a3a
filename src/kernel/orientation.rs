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
    geometry::point::{Point2, Point3},
    numeric::scalar::Scalar,
};

/// Returns:
/// - >0 if counter-clockwise
/// - <0 if clockwise
/// - =0 if collinear
#[inline]
pub fn orient2d<T: Scalar>(a: &Point2<T>, b: &Point2<T>, c: &Point2<T>) -> T {
    (b.x() - a.x()) * (c.y() - a.y()) - (b.y() - a.y()) * (c.x() - a.x())
}

/// Signed volume of the tetrahedron; positive when `d` is above the CCW
/// triangle `abc`.
pub fn orient3d<T: Scalar>(a: &Point3<T>, b: &Point3<T>, c: &Point3<T>, d: &Point3<T>) -> T {
    let ab = a.vector_to(b);
    let ac = a.vector_to(c);
    let ad = a.vector_to(d);
    ab.cross(&ac).dot(&ad)
}

/// True when `c` lies strictly left of the directed line `a -> b`.
#[inline]
pub fn is_left_of<T: Scalar>(a: &Point2<T>, b: &Point2<T>, c: &Point2<T>) -> bool {
    orient2d(a, b, c).is_positive_tol()
}

/// True when `c` lies strictly right of the directed line `a -> b`.
#[inline]
pub fn is_right_of<T: Scalar>(a: &Point2<T>, b: &Point2<T>, c: &Point2<T>) -> bool {
    orient2d(a, b, c).is_negative_tol()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ccw_test() {
        let a = Point2::new([0.0, 0.0]);
        let b = Point2::new([1.0, 0.0]);
        let c = Point2::new([0.0, 1.0]);

        assert!(orient2d(&a, &b, &c) > 0.0);
        assert!(is_left_of(&a, &b, &c));
        assert!(is_right_of(&a, &c, &b));
    }

    #[test]
    fn orientation_3d_signs() {
        let a = Point3::new([0.0, 0.0, 0.0]);
        let b = Point3::new([1.0, 0.0, 0.0]);
        let c = Point3::new([0.0, 1.0, 0.0]);

        assert!(orient3d(&a, &b, &c, &Point3::new([0.0, 0.0, 1.0])) > 0.0);
        assert!(orient3d(&a, &b, &c, &Point3::new([0.0, 0.0, -1.0])) < 0.0);
    }
}
