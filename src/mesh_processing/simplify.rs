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

use std::{cmp::Ordering, collections::BinaryHeap};

use tracing::{debug, instrument, warn};

use crate::{
    error::{IncompleteTraversal, StepBudget},
    geometry::{point::Point3, vector::Vector3},
    mesh::{basic_types::Mesh, edge_collapse::CollapseReject},
    numeric::scalar::Scalar,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimplifyOptions<T: Scalar> {
    /// Stop once the live face count is at or below this.
    pub target_faces: usize,
    /// Stop before contracting an edge whose error exceeds this.
    pub max_cost: Option<T>,
    pub contraction_budget: usize,
}

impl<T: Scalar> SimplifyOptions<T> {
    pub fn new(target_faces: usize) -> Self {
        Self {
            target_faces,
            max_cost: None,
            contraction_budget: StepBudget::DEFAULT_LIMIT,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SimplifyReport {
    pub contractions: usize,
    pub faces: usize,
    /// Candidates refused by the link condition or the fold check.
    pub rejected: usize,
}

/// Symmetric 4x4 error quadric, upper triangle row by row.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Quadric<T: Scalar>([T; 10]);

impl<T: Scalar> Quadric<T> {
    fn zero() -> Self {
        Self([T::zero(); 10])
    }

    fn from_plane(n: &Vector3<T>, d: T) -> Self {
        let (a, b, c) = (n[0], n[1], n[2]);
        Self([a * a, a * b, a * c, a * d, b * b, b * c, b * d, c * c, c * d, d * d])
    }

    fn add(&self, other: &Self) -> Self {
        let mut out = self.0;
        for (o, x) in out.iter_mut().zip(other.0.iter()) {
            *o = *o + *x;
        }
        Self(out)
    }

    fn evaluate(&self, p: &Point3<T>) -> T {
        let q = &self.0;
        let (x, y, z) = (p.x(), p.y(), p.z());
        let two = T::from_num_den(2, 1);
        q[0] * x * x
            + two * q[1] * x * y
            + two * q[2] * x * z
            + two * q[3] * x
            + q[4] * y * y
            + two * q[5] * y * z
            + two * q[6] * y
            + q[7] * z * z
            + two * q[8] * z
            + q[9]
    }
}

#[derive(Debug, Clone, Copy)]
struct Candidate<T: Scalar> {
    cost: T,
    half_edge: usize,
    position: Point3<T>,
    stamps: (u32, u32),
}

impl<T: Scalar> PartialEq for Candidate<T> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<T: Scalar> Eq for Candidate<T> {}

impl<T: Scalar> PartialOrd for Candidate<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T: Scalar> Ord for Candidate<T> {
    // reversed: BinaryHeap pops the cheapest first
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .partial_cmp(&self.cost)
            .unwrap_or(Ordering::Equal)
            .then_with(|| other.half_edge.cmp(&self.half_edge))
    }
}

impl<T: Scalar> Mesh<T, 3> {
    /// Garland-Heckbert simplification: contracts the interior edge of
    /// least quadric error until `target_faces` or `max_cost` is reached.
    ///
    /// Each merged vertex lands on whichever of the two endpoints or their
    /// midpoint has the smallest error. Contractions that would break the
    /// link condition or fold a neighboring face are skipped.
    #[instrument(skip_all, fields(faces = self.face_count(), target = options.target_faces))]
    pub fn simplify(&mut self, options: &SimplifyOptions<T>) -> Result<SimplifyReport, IncompleteTraversal<SimplifyReport>> {
        let mut quadrics = vec![Quadric::zero(); self.vertices.len()];
        for f in self.live_faces().collect::<Vec<_>>() {
            let [a, b, c] = self.face_positions(f);
            let Some(n) = a.vector_to(&b).cross(&a.vector_to(&c)).normalized() else { continue };
            let q = Quadric::from_plane(&n, -n.dot(&a.as_vector()));
            for v in self.face_vertices(f) {
                quadrics[v] = quadrics[v].add(&q);
            }
        }

        let mut stamps = vec![0u32; self.vertices.len()];
        let mut heap = BinaryHeap::new();
        let seeds: Vec<usize> = self
            .live_half_edges()
            .filter(|&h| self.half_edges[h].twin.is_some_and(|t| h < t))
            .collect();
        for h in seeds {
            heap.push(self.candidate(h, &quadrics, &stamps));
        }

        let mut report = SimplifyReport {
            faces: self.face_count(),
            ..Default::default()
        };
        let mut budget = StepBudget::new(options.contraction_budget);

        while report.faces > options.target_faces {
            let Some(c) = heap.pop() else { break };
            let h = c.half_edge;
            if self.half_edges[h].removed || self.half_edges[h].face.is_none() {
                continue;
            }
            let (u, v) = (self.source(h), self.target(h));
            if (stamps[u], stamps[v]) != c.stamps {
                continue;
            }
            if options.max_cost.is_some_and(|max| c.cost > max) {
                break;
            }

            if let Err(cause) = budget.tick("qem contraction") {
                warn!(%cause, "simplification stopped early");
                return Err(IncompleteTraversal::new(cause, report));
            }
            if let Err(reject) = self.check_link_condition(h).and_then(|()| self.check_fold(h, &c.position)) {
                debug!(half_edge = h, ?reject, "contraction rejected");
                report.rejected += 1;
                continue;
            }

            let merged = quadrics[u].add(&quadrics[v]);
            let Ok(incoming) = self.contract_edge(h, c.position) else {
                report.rejected += 1;
                continue;
            };
            quadrics[u] = merged;
            stamps[u] += 1;
            report.contractions += 1;
            report.faces -= 2;

            for r in incoming {
                heap.push(self.candidate(r, &quadrics, &stamps));
            }
        }

        debug!(
            contractions = report.contractions,
            faces = report.faces,
            rejected = report.rejected,
            "simplification finished"
        );
        Ok(report)
    }

    fn candidate(&self, h: usize, quadrics: &[Quadric<T>], stamps: &[u32]) -> Candidate<T> {
        let (u, v) = (self.source(h), self.target(h));
        let q = quadrics[u].add(&quadrics[v]);
        let pu = self.vertices[u].position;
        let pv = self.vertices[v].position;

        let mut best = (q.evaluate(&pu), pu);
        for p in [pv, pu.midpoint(&pv)] {
            let cost = q.evaluate(&p);
            if cost < best.0 {
                best = (cost, p);
            }
        }
        Candidate {
            cost: best.0,
            half_edge: h,
            position: best.1,
            stamps: (stamps[u], stamps[v]),
        }
    }

    /// Rejects a merge position that would flip or flatten any face that
    /// survives the contraction of `h`.
    fn check_fold(&self, h: usize, position: &Point3<T>) -> Result<(), CollapseReject> {
        let (u, v) = (self.source(h), self.target(h));
        for w in [u, v] {
            for out in self.outgoing_half_edges(w) {
                let Some(f) = self.half_edges[out].face else { continue };
                let corners = self.face_vertices(f);
                if corners.contains(&u) && corners.contains(&v) {
                    continue;
                }
                let before = self.face_positions(f);
                let after = corners.map(|c| if c == w { *position } else { self.vertices[c].position });
                let n0 = before[0].vector_to(&before[1]).cross(&before[0].vector_to(&before[2]));
                let n1 = after[0].vector_to(&after[1]).cross(&after[0].vector_to(&after[2]));
                if n1.is_zero_tol() {
                    return Err(CollapseReject::DegenerateFace);
                }
                if !n0.dot(&n1).is_positive_tol() {
                    return Err(CollapseReject::NormalFlip);
                }
            }
        }
        Ok(())
    }
}
