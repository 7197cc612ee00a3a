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

use crate::{geometry::point::Point, numeric::scalar::Scalar};

pub mod constrained;
pub mod delaunay;
pub mod ear_clipping;

pub use constrained::{CdtOptions, ConstrainedDelaunay};
pub use delaunay::{Delaunay, DelaunayOptions};
pub use ear_clipping::triangulate_polygon;

pub trait Triangulate2D<T: Scalar> {
    fn triangulate(points: &[Point<T, 2>]) -> Triangulation<T>;
}

/// Plain triangulation output: CCW index triples into `points`.
#[derive(Clone, Debug)]
pub struct Triangulation<T: Scalar> {
    pub points: Vec<Point<T, 2>>,
    pub triangles: Vec<[usize; 3]>,
}

impl<T: Scalar> Triangulation<T> {
    pub fn triangle_points(&self) -> Vec<[Point<T, 2>; 3]> {
        self.triangles
            .iter()
            .map(|t| t.map(|i| self.points[i]))
            .collect()
    }
}
