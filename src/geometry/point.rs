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

use std::ops::{Add, Index, IndexMut, Sub};

use crate::{geometry::vector::Vector, numeric::scalar::Scalar};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point<T: Scalar, const N: usize> {
    pub coords: [T; N],
}

pub type Point2<T> = Point<T, 2>;
pub type Point3<T> = Point<T, 3>;

impl<T: Scalar, const N: usize> Default for Point<T, N> {
    fn default() -> Self {
        Self::origin()
    }
}

impl<T: Scalar, const N: usize> Point<T, N> {
    pub fn new(coords: [T; N]) -> Self {
        Self { coords }
    }

    pub fn from_vals<V>(vals: [V; N]) -> Self
    where
        V: Into<T>,
    {
        Self {
            coords: vals.map(|v| v.into()),
        }
    }

    pub fn origin() -> Self {
        Self {
            coords: [T::zero(); N],
        }
    }

    /// Component-wise comparison within `T::tolerance()`.
    pub fn approx_eq(&self, other: &Self) -> bool {
        self.coords
            .iter()
            .zip(other.coords.iter())
            .all(|(a, b)| a.approx_eq(b))
    }

    pub fn vector_to(&self, other: &Self) -> Vector<T, N> {
        Vector::new(std::array::from_fn(|i| other.coords[i] - self.coords[i]))
    }

    pub fn as_vector(&self) -> Vector<T, N> {
        Vector::new(self.coords)
    }

    pub fn add_vector(&self, v: &Vector<T, N>) -> Self {
        Self::new(std::array::from_fn(|i| self.coords[i] + v.coords[i]))
    }

    pub fn distance_squared_to(&self, other: &Self) -> T {
        self.vector_to(other).norm_squared()
    }

    pub fn distance_to(&self, other: &Self) -> T {
        self.distance_squared_to(other).sqrt()
    }

    pub fn midpoint(&self, other: &Self) -> Self {
        self.lerp(other, T::from_num_den(1, 2))
    }

    /// `self + (other - self) * t`
    pub fn lerp(&self, other: &Self, t: T) -> Self {
        Self::new(std::array::from_fn(|i| {
            self.coords[i] + (other.coords[i] - self.coords[i]) * t
        }))
    }
}

impl<T: Scalar> Point<T, 2> {
    pub fn x(&self) -> T {
        self.coords[0]
    }

    pub fn y(&self) -> T {
        self.coords[1]
    }
}

impl<T: Scalar> Point<T, 3> {
    pub fn x(&self) -> T {
        self.coords[0]
    }

    pub fn y(&self) -> T {
        self.coords[1]
    }

    pub fn z(&self) -> T {
        self.coords[2]
    }

    pub fn xy(&self) -> Point<T, 2> {
        Point::new([self.coords[0], self.coords[1]])
    }
}

impl<T: Scalar, const N: usize> Index<usize> for Point<T, N> {
    type Output = T;

    fn index(&self, i: usize) -> &T {
        &self.coords[i]
    }
}

impl<T: Scalar, const N: usize> IndexMut<usize> for Point<T, N> {
    fn index_mut(&mut self, i: usize) -> &mut T {
        &mut self.coords[i]
    }
}

impl<T: Scalar, const N: usize> Sub for Point<T, N> {
    type Output = Vector<T, N>;

    fn sub(self, rhs: Self) -> Vector<T, N> {
        rhs.vector_to(&self)
    }
}

impl<'a, T: Scalar, const N: usize> Sub<&'a Point<T, N>> for &'a Point<T, N> {
    type Output = Vector<T, N>;

    fn sub(self, rhs: &'a Point<T, N>) -> Vector<T, N> {
        rhs.vector_to(self)
    }
}

impl<T: Scalar, const N: usize> Add<Vector<T, N>> for Point<T, N> {
    type Output = Point<T, N>;

    fn add(self, rhs: Vector<T, N>) -> Point<T, N> {
        self.add_vector(&rhs)
    }
}

impl<T: Scalar, const N: usize> From<[T; N]> for Point<T, N> {
    fn from(coords: [T; N]) -> Self {
        Self { coords }
    }
}
