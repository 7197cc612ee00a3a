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
        edge_edge_intersect::{SegmentIntersection, edge_edge_intersection_2, is_interior},
        point::Point2,
    },
    kernel::predicates::point_in_polygon,
    numeric::scalar::Scalar,
};

/// Node of a circular polygon list used by the clipper.
#[derive(Debug, Clone)]
pub struct ClipVertex<T: Scalar> {
    pub coordinate: Point2<T>,
    pub next: usize,
    pub prev: usize,
    pub is_intersection: bool,
    /// The twin intersection node in the other polygon's list.
    pub neighbor: Option<usize>,
    /// Walking forward from here enters the other polygon.
    pub is_entry: bool,
    /// Parameter along the original edge the node was inserted on.
    pub alpha: T,
    /// Start of the next output loop, chained from each loop's start.
    pub next_poly: Option<usize>,
    pub is_taken: bool,
}

impl<T: Scalar> ClipVertex<T> {
    fn new(coordinate: Point2<T>) -> Self {
        Self {
            coordinate,
            next: usize::MAX,
            prev: usize::MAX,
            is_intersection: false,
            neighbor: None,
            is_entry: false,
            alpha: T::zero(),
            next_poly: None,
            is_taken: false,
        }
    }
}

/// Where two edges meet in a way the clipper cannot resolve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Degeneracy<T: Scalar> {
    pub at: Point2<T>,
}

/// Both polygons as circular lists over one arena. Polygon 0 is the
/// subject, polygon 1 the clip polygon.
#[derive(Debug, Clone)]
pub struct ClipArena<T: Scalar> {
    pub vertices: Vec<ClipVertex<T>>,
    /// Arena indices of each polygon's original vertices, in input order.
    pub originals: [Vec<usize>; 2],
    intersections: usize,
}

impl<T: Scalar> ClipArena<T> {
    pub fn new(a: &[Point2<T>], b: &[Point2<T>]) -> Self {
        let mut arena = Self {
            vertices: Vec::with_capacity(a.len() + b.len()),
            originals: [Vec::new(), Vec::new()],
            intersections: 0,
        };
        arena.originals[0] = arena.push_ring(a);
        arena.originals[1] = arena.push_ring(b);
        arena
    }

    fn push_ring(&mut self, ring: &[Point2<T>]) -> Vec<usize> {
        let base = self.vertices.len();
        let n = ring.len();
        for (i, p) in ring.iter().enumerate() {
            let mut v = ClipVertex::new(*p);
            v.next = base + (i + 1) % n;
            v.prev = base + (i + n - 1) % n;
            self.vertices.push(v);
        }
        (base..base + n).collect()
    }

    pub fn head(&self, polygon: usize) -> usize {
        self.originals[polygon][0]
    }

    pub fn has_intersections(&self) -> bool {
        self.intersections > 0
    }

    pub fn original_coordinates(&self, polygon: usize) -> Vec<Point2<T>> {
        self.originals[polygon]
            .iter()
            .map(|&i| self.vertices[i].coordinate)
            .collect()
    }

    /// Arena indices of one polygon's list, starting at its head.
    pub fn ring(&self, polygon: usize) -> Vec<usize> {
        let head = self.head(polygon);
        let mut out = vec![head];
        let mut cur = self.vertices[head].next;
        while cur != head && out.len() <= self.vertices.len() {
            out.push(cur);
            cur = self.vertices[cur].next;
        }
        out
    }

    /// Inserts an intersection node between the original vertices `start`
    /// and `end`, after any nodes already there with a smaller alpha.
    pub fn insert_between(&mut self, start: usize, end: usize, coordinate: Point2<T>, alpha: T) -> usize {
        let mut cur = start;
        loop {
            let nx = self.vertices[cur].next;
            if nx == end || self.vertices[nx].alpha > alpha {
                break;
            }
            cur = nx;
        }

        let idx = self.vertices.len();
        let nx = self.vertices[cur].next;
        let mut v = ClipVertex::new(coordinate);
        v.is_intersection = true;
        v.alpha = alpha;
        v.prev = cur;
        v.next = nx;
        self.vertices.push(v);
        self.vertices[cur].next = idx;
        self.vertices[nx].prev = idx;
        idx
    }

    /// Phase one: every proper crossing of an edge of polygon 0 with an
    /// edge of polygon 1 becomes a linked pair of intersection nodes.
    pub(crate) fn insert_intersections(&mut self) -> Result<(), Degeneracy<T>> {
        let (na, nb) = (self.originals[0].len(), self.originals[1].len());
        for i in 0..na {
            let (s, e) = (self.originals[0][i], self.originals[0][(i + 1) % na]);
            let (ps, pe) = (self.vertices[s].coordinate, self.vertices[e].coordinate);
            for j in 0..nb {
                let (bs, be) = (self.originals[1][j], self.originals[1][(j + 1) % nb]);
                let (qs, qe) = (self.vertices[bs].coordinate, self.vertices[be].coordinate);

                match edge_edge_intersection_2(&ps, &pe, &qs, &qe) {
                    SegmentIntersection::None => {}
                    SegmentIntersection::Overlap => return Err(Degeneracy { at: ps }),
                    SegmentIntersection::Point {
                        point,
                        alpha_a,
                        alpha_b,
                    } => {
                        if !is_interior(alpha_a) || !is_interior(alpha_b) {
                            return Err(Degeneracy { at: point });
                        }
                        let ia = self.insert_between(s, e, point, alpha_a);
                        let ib = self.insert_between(bs, be, point, alpha_b);
                        self.vertices[ia].neighbor = Some(ib);
                        self.vertices[ib].neighbor = Some(ia);
                        self.intersections += 1;
                    }
                }
            }
        }
        Ok(())
    }

    /// Phase two: alternate entry and exit flags along each list, seeded by
    /// whether its first vertex lies inside the other polygon.
    pub(crate) fn mark_entries(&mut self) {
        for polygon in 0..2 {
            let other = self.original_coordinates(1 - polygon);
            let head = self.head(polygon);
            let mut inside = point_in_polygon(&self.vertices[head].coordinate, &other);
            for idx in self.ring(polygon) {
                if self.vertices[idx].is_intersection {
                    self.vertices[idx].is_entry = !inside;
                    inside = !inside;
                }
            }
        }
    }

    pub(crate) fn mark_taken(&mut self, idx: usize) {
        self.vertices[idx].is_taken = true;
        if let Some(nb) = self.vertices[idx].neighbor {
            self.vertices[nb].is_taken = true;
        }
    }
}
