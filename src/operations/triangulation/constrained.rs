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

use std::collections::VecDeque;

use ahash::AHashSet;
use tracing::{debug, instrument, warn};

use crate::{
    error::{BudgetExceeded, IncompleteTraversal, StepBudget},
    geometry::{
        edge_edge_intersect::{IntersectionOptions, segments_intersect},
        point::Point2,
    },
    kernel::predicates::{is_quad_convex, should_flip_edge_stable},
    mesh::{basic_types::Mesh, spatial_hash::PositionIndex},
    numeric::scalar::Scalar,
    operations::triangulation::delaunay::{Delaunay, DelaunayOptions},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CdtOptions {
    /// Delete the triangles outside the hull and inside the holes.
    pub remove_enclosed_triangles: bool,
    pub delaunay: DelaunayOptions,
    /// Queue steps allowed while recovering one constraint edge.
    pub recovery_budget: usize,
    /// Flips allowed while re-establishing Delaunay after one recovery.
    pub restore_budget: usize,
}

impl Default for CdtOptions {
    fn default() -> Self {
        Self {
            remove_enclosed_triangles: true,
            delaunay: DelaunayOptions::default(),
            recovery_budget: StepBudget::DEFAULT_LIMIT,
            restore_budget: StepBudget::DEFAULT_LIMIT,
        }
    }
}

#[inline]
fn undirected(a: usize, b: usize) -> (usize, usize) {
    if a < b { (a, b) } else { (b, a) }
}

/// Delaunay triangulation forced to contain the edges of a hull loop and
/// any number of hole loops.
///
/// Vertex handles are indices into `hull ++ holes ++ interior`.
#[derive(Debug, Clone)]
pub struct ConstrainedDelaunay<T: Scalar> {
    pub triangulation: Delaunay<T>,
    /// Directed constraint edges in loop order.
    pub constraints: Vec<[usize; 2]>,
    /// Constraint edges that could not be forced into the triangulation.
    pub unrecovered: Vec<[usize; 2]>,
}

impl<T: Scalar> ConstrainedDelaunay<T> {
    /// The hull must wind counter-clockwise and every hole clockwise. Loops
    /// are expected to be simple, mutually disjoint, and free of duplicate
    /// points; none of this is checked.
    #[instrument(skip_all, fields(hull = hull.len(), holes = holes.len(), interior = interior.len()))]
    pub fn build(
        hull: &[Point2<T>],
        holes: &[Vec<Point2<T>>],
        interior: &[Point2<T>],
        options: &CdtOptions,
    ) -> Result<Self, IncompleteTraversal<Self>> {
        let mut points = Vec::with_capacity(hull.len() + holes.iter().map(Vec::len).sum::<usize>() + interior.len());
        points.extend_from_slice(hull);
        for hole in holes {
            points.extend_from_slice(hole);
        }
        points.extend_from_slice(interior);

        // constraints are recovered while the super-triangle still encloses
        // everything, so a hull edge never lacks the faces to flip through
        let mut cdt = Self {
            triangulation: Delaunay::with_super_triangle(&points),
            constraints: Vec::new(),
            unrecovered: Vec::new(),
        };
        if let Err(cause) = cdt.triangulation.insert_all(&options.delaunay) {
            return Err(cdt.abort(cause));
        }

        let index = PositionIndex::from_points(&points);
        let loops: Vec<Vec<usize>> = std::iter::once(hull)
            .chain(holes.iter().map(Vec::as_slice))
            .map(|ring| ring.iter().filter_map(|p| index.find(p)).collect())
            .collect();

        let mut constrained: AHashSet<(usize, usize)> = AHashSet::new();
        for ring in &loops {
            let n = ring.len();
            for i in 0..n {
                let (v1, v2) = (ring[i], ring[(i + 1) % n]);
                if v1 == v2 {
                    continue;
                }
                match recover_edge(&mut cdt.triangulation.mesh, v1, v2, &constrained, options) {
                    Ok(true) => {
                        cdt.constraints.push([v1, v2]);
                        constrained.insert(undirected(v1, v2));
                    }
                    Ok(false) => {
                        warn!(v1, v2, "constraint edge could not be recovered");
                        cdt.unrecovered.push([v1, v2]);
                    }
                    Err(cause) => return Err(cdt.abort(cause)),
                }
            }
        }

        if options.remove_enclosed_triangles {
            cdt.remove_enclosed(&constrained);
        }
        cdt.triangulation.remove_super_triangle();

        debug!(
            constraints = cdt.constraints.len(),
            unrecovered = cdt.unrecovered.len(),
            faces = cdt.triangulation.mesh.face_count(),
            "constrained triangulation built"
        );
        Ok(cdt)
    }

    fn abort(mut self, cause: BudgetExceeded) -> IncompleteTraversal<Self> {
        warn!(%cause, "constrained triangulation stopped early");
        self.triangulation.remove_super_triangle();
        IncompleteTraversal::new(cause, self)
    }

    /// Flood-fills from the right side of every constraint edge without
    /// crossing constraints, then deletes every face reached.
    fn remove_enclosed(&mut self, constrained: &AHashSet<(usize, usize)>) {
        let mesh = &mut self.triangulation.mesh;
        let mut visited = vec![false; mesh.faces.len()];
        let mut queue = VecDeque::new();

        for &[v1, v2] in &self.constraints {
            let Some(h) = mesh.half_edge_between(v2, v1) else { continue };
            if let Some(f) = mesh.half_edges[h].face {
                if !visited[f] {
                    visited[f] = true;
                    queue.push_back(f);
                }
            }
        }

        let mut doomed = Vec::new();
        while let Some(f) = queue.pop_front() {
            doomed.push(f);
            for h in mesh.face_half_edges(f) {
                if constrained.contains(&undirected(mesh.source(h), mesh.target(h))) {
                    continue;
                }
                let Some(t) = mesh.half_edges[h].twin else { continue };
                let Some(g) = mesh.half_edges[t].face else { continue };
                if !visited[g] {
                    visited[g] = true;
                    queue.push_back(g);
                }
            }
        }

        debug!(removed = doomed.len(), "enclosed triangles removed");
        for f in doomed {
            let _ = mesh.delete_face(f, true);
        }
    }

    pub fn constraint_edges(&self) -> &[[usize; 2]] {
        &self.constraints
    }

    pub fn mesh(&self) -> &Mesh<T, 2> {
        &self.triangulation.mesh
    }

    pub fn triangles(&self) -> Vec<[usize; 3]> {
        self.triangulation.triangles()
    }

    pub fn triangle_points(&self) -> Vec<[Point2<T>; 3]> {
        self.triangulation.triangle_points()
    }

    pub fn points(&self) -> Vec<Point2<T>> {
        self.triangulation.points()
    }
}

/// Every interior edge properly crossing the open segment `v1 v2`, one
/// half-edge per edge, in arena order.
fn crossing_edges<T: Scalar>(mesh: &Mesh<T, 2>, v1: usize, v2: usize) -> VecDeque<usize> {
    let p1 = mesh.vertices[v1].position;
    let p2 = mesh.vertices[v2].position;
    let strict = IntersectionOptions::default();

    mesh.live_half_edges()
        .filter(|&h| mesh.half_edges[h].twin.is_some_and(|t| h < t))
        .filter(|&h| {
            let (s, r) = (mesh.source(h), mesh.target(h));
            if s == v1 || s == v2 || r == v1 || r == v2 {
                return false;
            }
            segments_intersect(&mesh.vertices[s].position, &mesh.vertices[r].position, &p1, &p2, &strict)
        })
        .collect()
}

/// Positions of the quad around `e`: tail, head, apex of `e`, apex across.
fn quad<T: Scalar>(mesh: &Mesh<T, 2>, e: usize, t: usize) -> [Point2<T>; 4] {
    [mesh.source(e), mesh.target(e), mesh.apex(e), mesh.apex(t)].map(|v| mesh.vertices[v].position)
}

/// Forces `v1 v2` into the triangulation by flipping the edges that cross
/// it, then re-establishes Delaunay among the edges the flips created.
/// Returns whether the edge exists afterwards.
fn recover_edge<T: Scalar>(
    mesh: &mut Mesh<T, 2>,
    v1: usize,
    v2: usize,
    constrained: &AHashSet<(usize, usize)>,
    options: &CdtOptions,
) -> Result<bool, BudgetExceeded> {
    if mesh.vertices[v1].half_edge.is_none() || mesh.vertices[v2].half_edge.is_none() {
        return Ok(false);
    }
    if mesh.are_vertices_connected(v1, v2) {
        return Ok(true);
    }

    let p1 = mesh.vertices[v1].position;
    let p2 = mesh.vertices[v2].position;
    let strict = IntersectionOptions::default();
    let mut queue = crossing_edges(mesh, v1, v2);
    let mut created = Vec::new();
    let mut budget = StepBudget::new(options.recovery_budget);
    let mut stalled = 0;

    while let Some(e) = queue.pop_front() {
        budget.tick("constraint edge recovery")?;
        let Some(t) = mesh.half_edges[e].twin else { continue };
        let [a, b, c, d] = quad(mesh, e, t);
        if !is_quad_convex(&a, &b, &c, &d) {
            queue.push_back(e);
            stalled += 1;
            if stalled > queue.len() {
                break;
            }
            continue;
        }
        if mesh.flip_edge(e).is_err() {
            continue;
        }
        stalled = 0;

        let (s, r) = (mesh.source(e), mesh.target(e));
        let touches = s == v1 || s == v2 || r == v1 || r == v2;
        if !touches && segments_intersect(&mesh.vertices[s].position, &mesh.vertices[r].position, &p1, &p2, &strict) {
            queue.push_back(e);
        } else {
            created.push(e);
        }
    }

    let recovered = mesh.are_vertices_connected(v1, v2);
    let target = undirected(v1, v2);
    let mut restore = StepBudget::new(options.restore_budget);
    loop {
        let mut flipped = false;
        for &e in &created {
            let key = undirected(mesh.source(e), mesh.target(e));
            if key == target || constrained.contains(&key) {
                continue;
            }
            let Some(t) = mesh.half_edges[e].twin else { continue };
            let [a, b, c, d] = quad(mesh, e, t);
            if should_flip_edge_stable(&a, &b, &c, &d) && is_quad_convex(&a, &b, &c, &d) {
                restore.tick("constraint delaunay restoration")?;
                if mesh.flip_edge(e).is_ok() {
                    flipped = true;
                }
            }
        }
        if !flipped {
            break;
        }
    }
    Ok(recovered)
}
