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

use smallvec::SmallVec;

use crate::{error::MeshError, geometry::point::Point, impl_mesh};

/// Why an edge may not be contracted without breaking the manifold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollapseReject {
    BorderForbidden,
    LinkCondition, // common neighbors != the two apexes
    LowValence,    // an apex would be left with two faces
    DegenerateFace,
    NormalFlip,
}

impl_mesh! {
    /// Link condition for the interior edge `he`: the endpoints may share
    /// no neighbors besides the two apexes, and both apexes must keep at
    /// least three incident faces.
    pub fn check_link_condition(&self, he: usize) -> Result<(), CollapseReject> {
        let Some(t) = self.half_edges[he].twin else {
            return Err(CollapseReject::BorderForbidden);
        };
        let (u, v) = (self.source(he), self.target(he));
        if self.is_boundary_vertex(u) || self.is_boundary_vertex(v) {
            return Err(CollapseReject::BorderForbidden);
        }

        let x = self.apex(he);
        let y = self.apex(t);
        let ring_v = self.one_ring_neighbors(v);
        let common = self
            .one_ring_neighbors(u)
            .into_iter()
            .filter(|n| *n != v && ring_v.contains(n))
            .count();
        if common != 2 || x == y {
            return Err(CollapseReject::LinkCondition);
        }

        for apex in [x, y] {
            if self.outgoing_half_edges(apex).len() <= 3 {
                return Err(CollapseReject::LowValence);
            }
        }
        Ok(())
    }

    /// Collapses `e = u -> v` into `u`, placed at `merge_position`.
    ///
    /// Removes the faces on both sides of `e`, pairs up the half-edges that
    /// were twinned to the removed ones, and redirects every half-edge that
    /// pointed at `v` to `u`. Returns the live half-edges now ending at `u`.
    /// The link condition is not checked here.
    pub fn contract_edge(&mut self, e: usize, merge_position: Point<T, N>) -> Result<Vec<usize>, MeshError> {
        self.check_half_edge(e)?;
        let u = self.source(e);
        let v = self.target(e);

        let b = self.half_edges[e].next; // v -> x
        let c = self.half_edges[e].prev; // x -> u
        let x = self.target(b);
        let far = self.half_edges[e].twin.map(|t| {
            let d = self.half_edges[t].next; // u -> y
            let g = self.half_edges[t].prev; // y -> v
            (t, d, g, self.target(d))
        });

        let incoming_u = self.incoming_half_edges(u);
        let incoming_v = self.incoming_half_edges(v);
        let outgoing_u = self.outgoing_half_edges(u);
        let outgoing_v = self.outgoing_half_edges(v);
        let outgoing_x = self.outgoing_half_edges(x);
        let outgoing_y = far.map(|(_, _, _, y)| self.outgoing_half_edges(y)).unwrap_or_default();

        let mut dead: SmallVec<[usize; 6]> = SmallVec::from_slice(&[e, b, c]);
        let mut dead_faces: SmallVec<[usize; 2]> = SmallVec::new();
        dead_faces.extend(self.half_edges[e].face);
        if let Some((t, d, g, _)) = far {
            dead.extend([t, d, g]);
            dead_faces.extend(self.half_edges[t].face);
        }

        for &h in incoming_v.iter().chain(outgoing_v.iter()).chain(dead.iter()) {
            self.unregister_edge(h);
        }

        self.pair_twins(self.half_edges[b].twin, self.half_edges[c].twin);
        if let Some((_, d, g, _)) = far {
            self.pair_twins(self.half_edges[d].twin, self.half_edges[g].twin);
        }

        for &h in &dead {
            let he = &mut self.half_edges[h];
            he.removed = true;
            he.face = None;
            he.twin = None;
        }
        for &f in &dead_faces {
            self.faces[f].removed = true;
        }

        for &h in &incoming_v {
            if !self.half_edges[h].removed {
                self.half_edges[h].vertex = u;
            }
        }
        for &h in incoming_v.iter().chain(outgoing_v.iter()) {
            if !self.half_edges[h].removed {
                self.register_edge(h);
            }
        }

        self.vertices[u].position = merge_position;
        self.vertices[v].removed = true;
        self.vertices[v].half_edge = None;

        let first_live = |mesh: &Self, hs: &[usize]| hs.iter().copied().find(|&h| !mesh.half_edges[h].removed);
        let rep_u = first_live(self, &outgoing_u).or_else(|| first_live(self, &outgoing_v));
        self.vertices[u].half_edge = rep_u;
        self.repair_representative(x, &outgoing_x);
        if let Some((_, _, _, y)) = far {
            self.repair_representative(y, &outgoing_y);
        }

        let mut result = Vec::with_capacity(incoming_u.len() + incoming_v.len());
        for h in incoming_u.into_iter().chain(incoming_v) {
            if !self.half_edges[h].removed && !result.contains(&h) {
                result.push(h);
            }
        }
        Ok(result)
    }

    fn pair_twins(&mut self, a: Option<usize>, b: Option<usize>) {
        if let Some(a) = a {
            self.half_edges[a].twin = b;
        }
        if let Some(b) = b {
            self.half_edges[b].twin = a;
        }
    }

    fn repair_representative(&mut self, v: usize, candidates: &[usize]) {
        let stale = self.vertices[v]
            .half_edge
            .is_none_or(|h| self.half_edges[h].removed);
        if stale {
            self.vertices[v].half_edge = candidates
                .iter()
                .copied()
                .find(|&h| !self.half_edges[h].removed);
        }
    }
}
