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

use crate::{error::TopologyError, geometry::point::Point, impl_mesh};

impl_mesh! {
    #[inline]
    pub fn source(&self, he: usize) -> usize {
        self.half_edges[self.half_edges[he].prev].vertex
    }

    #[inline]
    pub fn target(&self, he: usize) -> usize {
        self.half_edges[he].vertex
    }

    /// Vertex opposite `he` within its face.
    #[inline]
    pub fn apex(&self, he: usize) -> usize {
        self.half_edges[self.half_edges[he].next].vertex
    }

    #[inline]
    pub fn twin(&self, he: usize) -> Option<usize> {
        self.half_edges[he].twin
    }

    pub fn face_half_edges(&self, f: usize) -> [usize; 3] {
        let h0 = self.faces[f].half_edge;
        let h1 = self.half_edges[h0].next;
        [h0, h1, self.half_edges[h1].next]
    }

    /// Corner vertices in CCW order, starting at the tail of the face's
    /// representative half-edge.
    pub fn face_vertices(&self, f: usize) -> [usize; 3] {
        let [h0, h1, _] = self.face_half_edges(f);
        [self.source(h0), self.target(h0), self.target(h1)]
    }

    pub fn face_positions(&self, f: usize) -> [Point<T, N>; 3] {
        self.face_vertices(f).map(|v| self.vertices[v].position)
    }

    pub fn half_edge_between(&self, from: usize, to: usize) -> Option<usize> {
        self.edge_map
            .get(&(from, to))
            .copied()
            .filter(|&h| !self.half_edges[h].removed)
    }

    pub fn are_vertices_connected(&self, a: usize, b: usize) -> bool {
        self.half_edge_between(a, b).is_some() || self.half_edge_between(b, a).is_some()
    }

    #[inline]
    pub fn is_boundary_half_edge(&self, he: usize) -> bool {
        self.half_edges[he].twin.is_none()
    }

    /// Next outgoing half-edge counter-clockwise around `source(h)`.
    #[inline]
    pub fn rot_ccw_around_vertex(&self, h: usize) -> Option<usize> {
        self.half_edges[self.half_edges[h].prev].twin
    }

    /// Next outgoing half-edge clockwise around `source(h)`.
    #[inline]
    pub fn rot_cw_around_vertex(&self, h: usize) -> Option<usize> {
        self.half_edges[h].twin.map(|t| self.half_edges[t].next)
    }

    /// Outgoing half-edges of `v` in CCW order. On a border fan the sweep
    /// starts at the clockwise-most edge.
    pub fn outgoing_half_edges(&self, v: usize) -> Vec<usize> {
        let Some(start) = self.vertices[v].half_edge else { return Vec::new() };
        if self.half_edges[start].removed {
            return Vec::new();
        }
        let limit = self.half_edges.len();

        let mut ccw = vec![start];
        let mut closed = false;
        let mut cur = start;
        for _ in 0..limit {
            match self.rot_ccw_around_vertex(cur) {
                Some(h) if h == start => {
                    closed = true;
                    break;
                }
                Some(h) => {
                    ccw.push(h);
                    cur = h;
                }
                None => break,
            }
        }
        if closed {
            return ccw;
        }

        let mut cw = Vec::new();
        cur = start;
        for _ in 0..limit {
            match self.rot_cw_around_vertex(cur) {
                Some(h) if h != start => {
                    cw.push(h);
                    cur = h;
                }
                _ => break,
            }
        }
        cw.reverse();
        cw.extend(ccw);
        cw
    }

    /// Half-edges whose head is `v`, one per incident face.
    pub fn incoming_half_edges(&self, v: usize) -> Vec<usize> {
        self.outgoing_half_edges(v)
            .into_iter()
            .map(|h| self.half_edges[h].prev)
            .collect()
    }

    pub fn one_ring_neighbors(&self, v: usize) -> Vec<usize> {
        let mut ring = Vec::new();
        for h in self.outgoing_half_edges(v) {
            for n in [self.target(h), self.source(self.half_edges[h].prev)] {
                if !ring.contains(&n) {
                    ring.push(n);
                }
            }
        }
        ring
    }

    pub fn is_boundary_vertex(&self, v: usize) -> bool {
        self.outgoing_half_edges(v).into_iter().any(|h| {
            self.is_boundary_half_edge(h) || self.is_boundary_half_edge(self.half_edges[h].prev)
        })
    }

    pub fn live_faces(&self) -> impl Iterator<Item = usize> + '_ {
        self.faces
            .iter()
            .enumerate()
            .filter(|(_, f)| !f.removed)
            .map(|(i, _)| i)
    }

    pub fn live_half_edges(&self) -> impl Iterator<Item = usize> + '_ {
        self.half_edges
            .iter()
            .enumerate()
            .filter(|(_, h)| !h.removed)
            .map(|(i, _)| i)
    }

    pub fn face_count(&self) -> usize {
        self.faces.iter().filter(|f| !f.removed).count()
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.iter().filter(|v| !v.removed).count()
    }

    /// Live faces as plain position triples.
    pub fn triangles(&self) -> Vec<[Point<T, N>; 3]> {
        self.live_faces().map(|f| self.face_positions(f)).collect()
    }

    /// Live faces as vertex handle triples.
    pub fn triangle_indices(&self) -> Vec<[usize; 3]> {
        self.live_faces().map(|f| self.face_vertices(f)).collect()
    }

    /// Checks every half-edge invariant on the live records.
    pub fn validate_connectivity(&self) -> Result<(), TopologyError> {
        let live = |h: usize| h < self.half_edges.len() && !self.half_edges[h].removed;

        for (i, he) in self.half_edges.iter().enumerate() {
            if he.removed {
                continue;
            }
            if !live(he.next) || !live(he.prev) || he.vertex >= self.vertices.len() {
                return Err(TopologyError::DanglingLink { half_edge: i });
            }
            if self.vertices[he.vertex].removed {
                return Err(TopologyError::DanglingLink { half_edge: i });
            }
            if self.half_edges[he.next].prev != i {
                return Err(TopologyError::NextPrevMismatch { half_edge: i });
            }
            if self.half_edges[he.prev].next != i {
                return Err(TopologyError::PrevNextMismatch { half_edge: i });
            }

            if let Some(t) = he.twin {
                if !live(t) {
                    return Err(TopologyError::DanglingLink { half_edge: i });
                }
                if self.half_edges[t].twin != Some(i) {
                    return Err(TopologyError::TwinMismatch { half_edge: i });
                }
                let (tail, head) = (self.source(i), self.target(i));
                let (t_tail, t_head) = (self.source(t), self.target(t));
                let same = |a: usize, b: usize| {
                    a == b || self.vertices[a].position.approx_eq(&self.vertices[b].position)
                };
                if !same(t_head, tail) || !same(t_tail, head) {
                    return Err(TopologyError::TwinGeometry { half_edge: i });
                }
            }

            match he.face {
                Some(f) if f < self.faces.len() && !self.faces[f].removed => {}
                _ => return Err(TopologyError::DanglingLink { half_edge: i }),
            }
        }

        for (f, face) in self.faces.iter().enumerate() {
            if face.removed {
                continue;
            }
            if !live(face.half_edge) {
                return Err(TopologyError::FaceCycle { face: f });
            }
            let [h0, h1, h2] = self.face_half_edges(f);
            let closes = self.half_edges[h2].next == h0;
            let owned = [h0, h1, h2]
                .iter()
                .all(|&h| self.half_edges[h].face == Some(f));
            if !closes || !owned {
                return Err(TopologyError::FaceCycle { face: f });
            }
        }

        for (v, vertex) in self.vertices.iter().enumerate() {
            if vertex.removed {
                continue;
            }
            if let Some(h) = vertex.half_edge {
                if !live(h) || self.source(h) != v {
                    return Err(TopologyError::VertexHalfEdge { vertex: v });
                }
            }
        }
        Ok(())
    }
}
