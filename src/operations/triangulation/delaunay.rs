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

use tracing::{debug, instrument, warn};

use crate::{
    error::{BudgetExceeded, IncompleteTraversal, StepBudget},
    geometry::{point::Point2, util::bounding_box},
    kernel::{
        orientation::is_right_of,
        predicates::{incircle, should_flip_edge_stable},
    },
    mesh::basic_types::Mesh,
    numeric::scalar::Scalar,
    operations::triangulation::{Triangulate2D, Triangulation},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelaunayOptions {
    /// Steps the point-location walk may take per inserted point.
    pub walk_budget: usize,
    /// Flips edge restoration may perform per inserted point.
    pub flip_budget: usize,
}

impl Default for DelaunayOptions {
    fn default() -> Self {
        Self {
            walk_budget: StepBudget::DEFAULT_LIMIT,
            flip_budget: StepBudget::DEFAULT_LIMIT,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Location {
    Inside(usize),
    Outside,
    Vertex(usize),
}

/// Incremental Delaunay triangulation on the half-edge store.
///
/// Vertex handle `i` is input point `i`. Points that could not be placed
/// (duplicates, or points the walk lost) are listed in `missed_points` and
/// stay as unconnected vertex records.
#[derive(Debug, Clone)]
pub struct Delaunay<T: Scalar> {
    pub mesh: Mesh<T, 2>,
    pub missed_points: Vec<usize>,
    pub flips: usize,
    input_count: usize,
    super_vertices: Option<[usize; 3]>,
}

impl<T: Scalar> Delaunay<T> {
    #[instrument(skip_all, fields(points = points.len()))]
    pub fn build(points: &[Point2<T>], options: &DelaunayOptions) -> Result<Self, IncompleteTraversal<Self>> {
        let mut dt = Self::with_super_triangle(points);
        let outcome = dt.insert_all(options);
        dt.remove_super_triangle();

        match outcome {
            Ok(()) => {
                debug!(
                    faces = dt.mesh.face_count(),
                    flips = dt.flips,
                    missed = dt.missed_points.len(),
                    "delaunay triangulation built"
                );
                Ok(dt)
            }
            Err(cause) => {
                warn!(%cause, "delaunay insertion stopped early");
                Err(IncompleteTraversal::new(cause, dt))
            }
        }
    }

    /// Seeds the store with every input point as an unconnected vertex plus
    /// one enclosing triangle.
    pub(crate) fn with_super_triangle(points: &[Point2<T>]) -> Self {
        let mut mesh = Mesh::with_capacity(points.len() + 3, 2 * points.len() + 1);
        for p in points {
            mesh.add_vertex(*p);
        }

        let (lo, hi) = bounding_box(points).unwrap_or((Point2::origin(), Point2::new([T::one(), T::one()])));
        let half = T::from_num_den(1, 2);
        let delta = (hi.x() - lo.x()).max(hi.y() - lo.y());
        let cx = (lo.x() + hi.x()) * half;
        let cy = (lo.y() + hi.y()) * half;

        // equilateral triangle whose incircle of radius r is centered on the bbox
        let r = T::cast_f64(64.0) * delta + T::one();
        let sqrt_3 = T::cast_f64(3.0).sqrt();
        let two = T::from_num_den(2, 1);
        let s0 = mesh.add_vertex(Point2::new([cx - sqrt_3 * r, cy - r]));
        let s1 = mesh.add_vertex(Point2::new([cx + sqrt_3 * r, cy - r]));
        let s2 = mesh.add_vertex(Point2::new([cx, cy + two * r]));
        mesh.add_triangle(s0, s1, s2);

        Self {
            mesh,
            missed_points: Vec::new(),
            flips: 0,
            input_count: points.len(),
            super_vertices: Some([s0, s1, s2]),
        }
    }

    pub(crate) fn insert_all(&mut self, options: &DelaunayOptions) -> Result<(), BudgetExceeded> {
        let mut walk = StepBudget::new(options.walk_budget);
        let mut flip = StepBudget::new(options.flip_budget);
        let mut hint = 0;

        for v in 0..self.input_count {
            walk.reset();
            flip.reset();
            self.insert_point(v, &mut hint, &mut walk, &mut flip)?;
        }
        Ok(())
    }

    fn insert_point(
        &mut self,
        v: usize,
        hint: &mut usize,
        walk: &mut StepBudget,
        flip: &mut StepBudget,
    ) -> Result<(), BudgetExceeded> {
        let p = self.mesh.vertices[v].position;
        let face = match self.locate(&p, *hint, walk)? {
            Location::Inside(f) => f,
            Location::Outside | Location::Vertex(_) => {
                warn!(point = v, "point could not be inserted");
                self.missed_points.push(v);
                return Ok(());
            }
        };

        let Ok(split) = self.mesh.split_face_at_vertex(face, v) else {
            self.missed_points.push(v);
            return Ok(());
        };
        *hint = split.faces[0];
        self.restore_delaunay(split.outer.to_vec(), flip)
    }

    /// Walks from `start` toward `p`, crossing any edge `p` lies strictly
    /// right of.
    fn locate(&self, p: &Point2<T>, start: usize, budget: &mut StepBudget) -> Result<Location, BudgetExceeded> {
        let mut face = if self.mesh.faces.get(start).is_some_and(|f| !f.removed) {
            start
        } else {
            match self.mesh.live_faces().last() {
                Some(f) => f,
                None => return Ok(Location::Outside),
            }
        };
        let mut entered: Option<usize> = None;

        loop {
            budget.tick("delaunay point location")?;

            for v in self.mesh.face_vertices(face) {
                if self.mesh.vertices[v].position.approx_eq(p) {
                    return Ok(Location::Vertex(v));
                }
            }

            let first = entered.map_or(self.mesh.faces[face].half_edge, |h| self.mesh.half_edges[h].next);
            let mut crossed = None;
            let mut h = first;
            for _ in 0..3 {
                let a = &self.mesh.vertices[self.mesh.source(h)].position;
                let b = &self.mesh.vertices[self.mesh.target(h)].position;
                if is_right_of(a, b, p) {
                    crossed = Some(h);
                    break;
                }
                h = self.mesh.half_edges[h].next;
            }

            let Some(h) = crossed else {
                return Ok(Location::Inside(face));
            };
            match self.mesh.half_edges[h].twin {
                Some(t) => {
                    face = match self.mesh.half_edges[t].face {
                        Some(f) => f,
                        None => return Ok(Location::Outside),
                    };
                    entered = Some(t);
                }
                None => return Ok(Location::Outside),
            }
        }
    }

    /// Pops edges and flips every one that fails the Delaunay test against
    /// its far apex; a flip pushes the two edges now facing the inserted
    /// vertex.
    pub(crate) fn restore_delaunay(&mut self, mut stack: Vec<usize>, budget: &mut StepBudget) -> Result<(), BudgetExceeded> {
        while let Some(e) = stack.pop() {
            let Some(t) = self.mesh.half_edges[e].twin else { continue };
            let pos = |v: usize| self.mesh.vertices[v].position;
            let a = pos(self.mesh.source(e));
            let b = pos(self.mesh.target(e));
            let c = pos(self.mesh.apex(e));
            let d = pos(self.mesh.apex(t));
            if !should_flip_edge_stable(&a, &b, &c, &d) {
                continue;
            }

            budget.tick("delaunay edge restoration")?;
            let (t_next, t_prev) = (self.mesh.half_edges[t].next, self.mesh.half_edges[t].prev);
            if self.mesh.flip_edge(e).is_ok() {
                self.flips += 1;
                stack.push(t_next);
                stack.push(t_prev);
            }
        }
        Ok(())
    }

    /// Deletes every face touching a super vertex and tombstones the three
    /// super vertices.
    pub(crate) fn remove_super_triangle(&mut self) {
        let Some(supers) = self.super_vertices.take() else { return };
        let doomed: Vec<usize> = self
            .mesh
            .live_faces()
            .filter(|&f| self.mesh.face_vertices(f).iter().any(|v| supers.contains(v)))
            .collect();
        for f in doomed {
            let _ = self.mesh.delete_face(f, true);
        }
        for s in supers {
            self.mesh.vertices[s].removed = true;
            self.mesh.vertices[s].half_edge = None;
        }
    }

    pub fn point_count(&self) -> usize {
        self.input_count
    }

    pub fn points(&self) -> Vec<Point2<T>> {
        self.mesh.vertices[..self.input_count]
            .iter()
            .map(|v| v.position)
            .collect()
    }

    /// Triangles as CCW triples of input point indices.
    pub fn triangles(&self) -> Vec<[usize; 3]> {
        self.mesh.triangle_indices()
    }

    pub fn triangle_points(&self) -> Vec<[Point2<T>; 3]> {
        self.mesh.triangles()
    }

    /// Edge-local empty-circle check over every interior edge.
    pub fn is_delaunay(&self) -> bool {
        self.mesh.live_half_edges().all(|h| {
            let Some(t) = self.mesh.half_edges[h].twin else { return true };
            if t < h {
                return true;
            }
            let pos = |v: usize| &self.mesh.vertices[v].position;
            let value = incircle(
                pos(self.mesh.source(h)),
                pos(self.mesh.target(h)),
                pos(self.mesh.apex(h)),
                pos(self.mesh.apex(t)),
            );
            !value.is_positive_tol()
        })
    }

    pub fn to_triangulation(&self) -> Triangulation<T> {
        Triangulation {
            points: self.points(),
            triangles: self.triangles(),
        }
    }
}

impl<T: Scalar> Triangulate2D<T> for Delaunay<T> {
    fn triangulate(points: &[Point2<T>]) -> Triangulation<T> {
        match Self::build(points, &DelaunayOptions::default()) {
            Ok(dt) => dt.to_triangulation(),
            Err(incomplete) => incomplete.partial.to_triangulation(),
        }
    }
}
