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

use ahash::AHashMap;
use smallvec::SmallVec;

use crate::{geometry::point::Point, numeric::scalar::Scalar};

/// Position to handle map over a uniform grid.
///
/// Two positions are the same key when every coordinate agrees within
/// `T::tolerance()`. Cells are slightly larger than the tolerance, so a
/// lookup only has to visit the neighboring cells.
#[derive(Debug, Clone)]
pub struct PositionIndex<T: Scalar, const N: usize> {
    hash_inv: f64,
    cells: AHashMap<[i64; N], SmallVec<[usize; 2]>>,
    entries: Vec<(Point<T, N>, usize)>,
}

impl<T: Scalar, const N: usize> Default for PositionIndex<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Scalar, const N: usize> PositionIndex<T, N> {
    pub fn new() -> Self {
        let mut cell = 4.0 * T::tolerance().as_f64();
        if !cell.is_finite() || cell <= 0.0 {
            cell = 1e-9;
        }
        Self {
            hash_inv: 1.0 / cell,
            cells: AHashMap::new(),
            entries: Vec::new(),
        }
    }

    /// Indexes `points[i]` under handle `i`; later duplicates map to the
    /// first occurrence.
    pub fn from_points(points: &[Point<T, N>]) -> Self {
        let mut index = Self::new();
        for (i, p) in points.iter().enumerate() {
            index.insert(p, i);
        }
        index
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline(always)]
    fn floor_sat_i64(x: f64) -> i64 {
        if !x.is_finite() {
            return if x.is_sign_positive() { i64::MAX } else { i64::MIN };
        }
        x.floor() as i64
    }

    fn cell_key(&self, p: &Point<T, N>) -> [i64; N] {
        std::array::from_fn(|i| Self::floor_sat_i64(p[i].as_f64() * self.hash_inv))
    }

    /// Handle stored for a position equal to `p`, if any.
    pub fn find(&self, p: &Point<T, N>) -> Option<usize> {
        let center = self.cell_key(p);
        let combos = 3usize.pow(N as u32);
        for combo in 0..combos {
            let mut rest = combo;
            let key: [i64; N] = std::array::from_fn(|i| {
                let offset = (rest % 3) as i64 - 1;
                rest /= 3;
                center[i].saturating_add(offset)
            });
            let Some(bucket) = self.cells.get(&key) else { continue };
            for &e in bucket {
                let (q, handle) = &self.entries[e];
                if q.approx_eq(p) {
                    return Some(*handle);
                }
            }
        }
        None
    }

    /// Stores `handle` for `p` unless an equal position is already present.
    /// Returns the handle now associated with `p`.
    pub fn insert(&mut self, p: &Point<T, N>, handle: usize) -> usize {
        if let Some(existing) = self.find(p) {
            return existing;
        }
        let key = self.cell_key(p);
        self.cells.entry(key).or_default().push(self.entries.len());
        self.entries.push((*p, handle));
        handle
    }

    /// Welds `p` to a dense id, allocating the next id for a new position.
    pub fn get_or_insert(&mut self, p: &Point<T, N>) -> usize {
        let next = self.entries.len();
        self.insert(p, next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn welds_within_tolerance() {
        let mut index = PositionIndex::<f64, 3>::new();
        let a = index.get_or_insert(&Point::new([0.1, 0.2, 0.3]));
        let b = index.get_or_insert(&Point::new([0.1 + 1e-10, 0.2, 0.3 - 1e-10]));
        let c = index.get_or_insert(&Point::new([0.1, 0.2, 0.31]));
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn duplicates_map_to_first_handle() {
        let pts = [
            Point::new([0.0, 0.0]),
            Point::new([1.0, 0.0]),
            Point::new([0.0, 0.0]),
        ];
        let index = PositionIndex::<f64, 2>::from_points(&pts);
        assert_eq!(index.find(&pts[2]), Some(0));
        assert_eq!(index.find(&Point::new([1.0, 0.0])), Some(1));
        assert_eq!(index.find(&Point::new([0.5, 0.5])), None);
    }
}
