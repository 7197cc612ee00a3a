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

use std::cmp::Ordering;

use tracing::{debug, instrument, warn};

use crate::{
    error::{IncompleteTraversal, StepBudget},
    geometry::point::Point2,
    kernel::{orientation::orient2d, predicates::point_in_triangle},
    numeric::scalar::Scalar,
};

pub type TriangleList<T> = Vec<[Point2<T>; 3]>;

/// Ear-clips a counter-clockwise hull with clockwise holes.
///
/// Holes are spliced into the hull through a bridge to a visible hull
/// vertex, rightmost hole first. A simple polygon of `n` vertices without
/// holes yields `n - 2` triangles.
#[instrument(skip_all, fields(hull = hull.len(), holes = holes.len()))]
pub fn triangulate_polygon<T: Scalar>(
    hull: &[Point2<T>],
    holes: &[Vec<Point2<T>>],
) -> Result<TriangleList<T>, IncompleteTraversal<TriangleList<T>>> {
    triangulate_polygon_with_budget(hull, holes, StepBudget::default())
}

pub fn triangulate_polygon_with_budget<T: Scalar>(
    hull: &[Point2<T>],
    holes: &[Vec<Point2<T>>],
    mut budget: StepBudget,
) -> Result<TriangleList<T>, IncompleteTraversal<TriangleList<T>>> {
    let mut ring = hull.to_vec();

    let mut order: Vec<&Vec<Point2<T>>> = holes.iter().filter(|h| h.len() >= 3).collect();
    order.sort_by(|a, b| {
        rightmost(b)
            .map(|(_, p)| p.x())
            .partial_cmp(&rightmost(a).map(|(_, p)| p.x()))
            .unwrap_or(Ordering::Equal)
    });
    for hole in order {
        match bridge_hole(&ring, hole) {
            Some(merged) => ring = merged,
            None => warn!("hole could not be bridged to the hull and was skipped"),
        }
    }

    clip_ears(&ring, &mut budget)
}

fn rightmost<T: Scalar>(points: &[Point2<T>]) -> Option<(usize, Point2<T>)> {
    points
        .iter()
        .copied()
        .enumerate()
        .max_by(|(_, a), (_, b)| a.x().partial_cmp(&b.x()).unwrap_or(Ordering::Equal))
}

/// Splices `hole` into `outer` through the edge from the hole's rightmost
/// vertex `m` to a mutually visible vertex of `outer`.
fn bridge_hole<T: Scalar>(outer: &[Point2<T>], hole: &[Point2<T>]) -> Option<Vec<Point2<T>>> {
    let n = outer.len();
    let (m_idx, m) = rightmost(hole)?;

    // closest edge hit by the ray m + t (1, 0)
    let mut hit: Option<(T, usize)> = None;
    for i in 0..n {
        let (a, b) = (outer[i], outer[(i + 1) % n]);
        if (a.y() - m.y()) * (b.y() - m.y()) > T::zero() || (a.y() - b.y()).is_zero_tol() {
            continue;
        }
        let x = a.x() + (m.y() - a.y()) * (b.x() - a.x()) / (b.y() - a.y());
        if x < m.x() {
            continue;
        }
        if hit.is_none_or(|(best, _)| x < best) {
            hit = Some((x, i));
        }
    }
    let (ix, edge) = hit?;
    let i_pt = Point2::new([ix, m.y()]);
    let (a_idx, b_idx) = (edge, (edge + 1) % n);
    let mut p_idx = if outer[a_idx].x() > outer[b_idx].x() { a_idx } else { b_idx };

    if !i_pt.approx_eq(&outer[a_idx]) && !i_pt.approx_eq(&outer[b_idx]) {
        // a reflex vertex inside (m, i, p) would block the bridge; take the
        // one closest in angle to the ray instead
        let p = outer[p_idx];
        let mut best: Option<(T, T)> = None;
        for j in 0..n {
            if j == p_idx {
                continue;
            }
            let q = outer[j];
            let reflex = orient2d(&outer[(j + n - 1) % n], &q, &outer[(j + 1) % n]) <= T::zero();
            if !reflex || !point_in_triangle(&q, &m, &i_pt, &p) || q.approx_eq(&m) {
                continue;
            }
            let dist = m.distance_to(&q);
            if dist.is_zero_tol() {
                continue;
            }
            let slope = (q.y() - m.y()).abs() / dist;
            let better = best.is_none_or(|(s, d)| slope < s || (slope.approx_eq(&s) && dist < d));
            if better {
                best = Some((slope, dist));
                p_idx = j;
            }
        }
    }

    let mut merged = Vec::with_capacity(n + hole.len() + 2);
    merged.extend_from_slice(&outer[..=p_idx]);
    for k in 0..=hole.len() {
        merged.push(hole[(m_idx + k) % hole.len()]);
    }
    merged.push(outer[p_idx]);
    merged.extend_from_slice(&outer[p_idx + 1..]);
    Some(merged)
}

fn is_ear<T: Scalar>(ring: &[Point2<T>], idx: &[usize], at: usize) -> bool {
    let n = idx.len();
    let a = ring[idx[(at + n - 1) % n]];
    let b = ring[idx[at]];
    let c = ring[idx[(at + 1) % n]];
    if !orient2d(&a, &b, &c).is_positive_tol() {
        return false;
    }

    idx.iter().enumerate().all(|(k, &v)| {
        if k == at || k == (at + n - 1) % n || k == (at + 1) % n {
            return true;
        }
        let q = ring[v];
        if q.approx_eq(&a) || q.approx_eq(&b) || q.approx_eq(&c) {
            return true;
        }
        let prev = ring[idx[(k + n - 1) % n]];
        let next = ring[idx[(k + 1) % n]];
        let convex = orient2d(&prev, &q, &next).is_positive_tol();
        convex || !point_in_triangle(&q, &a, &b, &c)
    })
}

fn clip_ears<T: Scalar>(
    ring: &[Point2<T>],
    budget: &mut StepBudget,
) -> Result<TriangleList<T>, IncompleteTraversal<TriangleList<T>>> {
    let mut triangles = Vec::with_capacity(ring.len().saturating_sub(2));
    let mut idx: Vec<usize> = (0..ring.len()).collect();
    let mut at = 0;
    let mut misses = 0;

    while idx.len() > 3 {
        if let Err(cause) = budget.tick("ear clipping") {
            warn!(%cause, "ear clipping stopped early");
            return Err(IncompleteTraversal::new(cause, triangles));
        }
        let n = idx.len();
        at %= n;

        if is_ear(ring, &idx, at) {
            triangles.push([ring[idx[(at + n - 1) % n]], ring[idx[at]], ring[idx[(at + 1) % n]]]);
            idx.remove(at);
            misses = 0;
            continue;
        }

        at += 1;
        misses += 1;
        if misses > n {
            // no ear left: only a collinear vertex can go without a triangle
            let collinear = (0..n).find(|&k| {
                orient2d(&ring[idx[(k + n - 1) % n]], &ring[idx[k]], &ring[idx[(k + 1) % n]]).is_zero_tol()
            });
            match collinear {
                Some(k) => {
                    idx.remove(k);
                    misses = 0;
                }
                None => {
                    warn!(remaining = n, "no ear found; polygon is not simple");
                    return Ok(triangles);
                }
            }
        }
    }

    if idx.len() == 3 {
        triangles.push([ring[idx[0]], ring[idx[1]], ring[idx[2]]]);
    }
    debug!(triangles = triangles.len(), "polygon triangulated");
    Ok(triangles)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> Point2<f64> {
        Point2::new([x, y])
    }

    #[test]
    fn bridge_visits_hole_and_returns() {
        let outer = [p(0.0, 0.0), p(4.0, 0.0), p(4.0, 4.0), p(0.0, 4.0)];
        let hole = [p(1.0, 1.0), p(1.0, 2.0), p(2.0, 2.0), p(2.0, 1.0)];
        let merged = bridge_hole(&outer, &hole).unwrap();
        assert_eq!(merged.len(), outer.len() + hole.len() + 2);
        for q in hole.iter().chain(outer.iter()) {
            assert!(merged.iter().any(|m| m.approx_eq(q)));
        }
    }
}
