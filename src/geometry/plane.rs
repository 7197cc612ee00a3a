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
    geometry::{
        point::{Point, Point2, Point3},
        vector::{Vector, Vector3},
    },
    numeric::scalar::Scalar,
};

/// Which side of a plane a point lies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaneSide {
    Front,
    Back,
    On,
}

/// Oriented hyperplane `normal . x + d = 0`. Front is where the normal points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Plane<T: Scalar, const N: usize> {
    pub normal: Vector<T, N>,
    pub d: T,
}

impl<T: Scalar, const N: usize> Plane<T, N> {
    pub fn new(normal: Vector<T, N>, d: T) -> Self {
        Plane { normal, d }
    }

    pub fn from_point_normal(point: &Point<T, N>, normal: &Vector<T, N>) -> Self {
        let d = -normal.dot(&point.as_vector());
        Plane { normal: *normal, d }
    }

    pub fn signed_distance(&self, p: &Point<T, N>) -> T {
        let n2 = self.normal.norm_squared();
        if n2.is_zero_tol() {
            return T::zero();
        }
        (self.normal.dot(&p.as_vector()) + self.d) / n2.sqrt()
    }

    pub fn side(&self, p: &Point<T, N>) -> PlaneSide {
        match self.signed_distance(p).sign() {
            1 => PlaneSide::Front,
            -1 => PlaneSide::Back,
            _ => PlaneSide::On,
        }
    }

    /// Crossing point of segment `ab`, if its endpoints lie strictly on
    /// opposite sides.
    pub fn intersect_segment(&self, a: &Point<T, N>, b: &Point<T, N>) -> Option<(T, Point<T, N>)> {
        let da = self.signed_distance(a);
        let db = self.signed_distance(b);
        if da.sign() * db.sign() >= 0 {
            return None;
        }
        let t = da / (da - db);
        Some((t, a.lerp(b, t)))
    }
}

impl<T: Scalar> Plane<T, 3> {
    pub fn from_points(p1: &Point3<T>, p2: &Point3<T>, p3: &Point3<T>) -> Self {
        let normal = p1.vector_to(p2).cross(&p1.vector_to(p3));
        Plane::from_point_normal(p1, &normal)
    }

    pub fn origin(&self) -> Point3<T> {
        let n2 = self.normal.norm_squared();
        if n2.is_zero_tol() {
            return Point3::origin();
        }
        Point::new(self.normal.scale(-self.d / n2).coords)
    }

    /// Orthonormal in-plane axes `(u, v)` with `u x v` along the normal.
    pub fn basis(&self) -> (Vector3<T>, Vector3<T>) {
        let n = self.normal.normalized().unwrap_or(self.normal);
        let u = n.any_perpendicular();
        let v = n.cross(&u);
        (u, v)
    }

    /// 2D coordinates of `p` in the plane basis.
    pub fn project_2d(&self, p: &Point3<T>) -> Point2<T> {
        let (u, v) = self.basis();
        let w = self.origin().vector_to(p);
        Point2::new([w.dot(&u), w.dot(&v)])
    }
}
