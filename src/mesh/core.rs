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

use crate::{
    error::MeshError,
    geometry::point::Point,
    impl_mesh,
    mesh::{
        basic_types::SplitResult,
        face::Face,
        half_edge::HalfEdge,
        spatial_hash::PositionIndex,
        vertex::Vertex,
    },
};

impl_mesh! {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(vertices: usize, faces: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertices),
            half_edges: Vec::with_capacity(faces * 3),
            faces: Vec::with_capacity(faces),
            edge_map: AHashMap::with_capacity(faces * 3),
        }
    }

    /// Builds a connected mesh from an indexed triangle list.
    pub fn from_triangles(positions: &[Point<T, N>], triangles: &[[usize; 3]]) -> Self {
        let mut mesh = Self::with_capacity(positions.len(), triangles.len());
        for p in positions {
            mesh.add_vertex(*p);
        }
        for &[a, b, c] in triangles {
            mesh.add_triangle_connected(a, b, c);
        }
        mesh
    }

    pub fn add_vertex(&mut self, position: Point<T, N>) -> usize {
        let idx = self.vertices.len();
        self.vertices.push(Vertex::new(position));
        idx
    }

    /// Appends the CCW triangle `(v0, v1, v2)` over existing vertices.
    /// Twins are left unset; see [`Self::add_triangle_connected`] and
    /// [`Self::connect_twins`].
    pub fn add_triangle(&mut self, v0: usize, v1: usize, v2: usize) -> usize {
        let face_idx = self.faces.len();
        let base = self.half_edges.len();
        let verts = [v0, v1, v2];

        for i in 0..3 {
            let mut he = HalfEdge::new(verts[(i + 1) % 3]);
            he.face = Some(face_idx);
            he.next = base + (i + 1) % 3;
            he.prev = base + (i + 2) % 3;
            self.half_edges.push(he);
        }
        self.faces.push(Face::new(base));

        for i in 0..3 {
            self.register_edge(base + i);
            let v = &mut self.vertices[verts[i]];
            let stale = v
                .half_edge
                .is_none_or(|h| self.half_edges[h].removed);
            if stale {
                v.half_edge = Some(base + i);
            }
        }
        face_idx
    }

    /// Appends a triangle with three fresh vertex records.
    pub fn add_triangle_from_points(
        &mut self,
        pa: Point<T, N>,
        pb: Point<T, N>,
        pc: Point<T, N>,
    ) -> usize {
        let a = self.add_vertex(pa);
        let b = self.add_vertex(pb);
        let c = self.add_vertex(pc);
        self.add_triangle(a, b, c)
    }

    /// Like [`Self::add_triangle`], then links each new half-edge to an
    /// existing unpaired reverse edge over the same vertex records.
    pub fn add_triangle_connected(&mut self, v0: usize, v1: usize, v2: usize) -> usize {
        let f = self.add_triangle(v0, v1, v2);
        for h in self.face_half_edges(f) {
            let (from, to) = (self.source(h), self.target(h));
            if let Some(r) = self.half_edge_between(to, from) {
                if self.half_edges[r].twin.is_none() {
                    self.half_edges[h].twin = Some(r);
                    self.half_edges[r].twin = Some(h);
                }
            }
        }
        f
    }

    /// Linear search of `candidates` for the opposite of `e`: a live
    /// half-edge running from `head(e)` to `tail(e)`, matched by vertex
    /// record or by approximately equal positions.
    pub fn find_twin(&self, e: usize, candidates: &[usize]) -> Option<usize> {
        let (tail, head) = (self.source(e), self.target(e));
        let (p_tail, p_head) = (&self.vertices[tail].position, &self.vertices[head].position);

        candidates.iter().copied().find(|&c| {
            if c == e || self.half_edges[c].removed {
                return false;
            }
            if self.half_edges[c].twin.is_some_and(|t| t != e) {
                return false;
            }
            let (c_tail, c_head) = (self.source(c), self.target(c));
            if c_tail == head && c_head == tail {
                return true;
            }
            self.vertices[c_tail].position.approx_eq(p_head)
                && self.vertices[c_head].position.approx_eq(p_tail)
        })
    }

    /// Pairs up unpaired half-edges among `candidates` by position.
    /// Candidates are bucketed by welded endpoint pair so each
    /// [`Self::find_twin`] call only scans edges sharing its endpoints.
    /// Returns the number of twin pairs created.
    pub fn connect_twins(&mut self, candidates: &[usize]) -> usize {
        let mut welder = PositionIndex::<T, N>::new();
        let mut buckets: AHashMap<(usize, usize), SmallVec<[usize; 2]>> = AHashMap::new();
        let mut keys = Vec::with_capacity(candidates.len());

        for &h in candidates {
            let a = self.vertices[self.source(h)].position;
            let b = self.vertices[self.target(h)].position;
            let ka = welder.get_or_insert(&a);
            let kb = welder.get_or_insert(&b);
            let key = (ka.min(kb), ka.max(kb));
            buckets.entry(key).or_default().push(h);
            keys.push(key);
        }

        let mut linked = 0;
        for (&h, key) in candidates.iter().zip(keys.iter()) {
            if self.half_edges[h].removed || self.half_edges[h].twin.is_some() {
                continue;
            }
            let Some(bucket) = buckets.get(key) else { continue };
            if let Some(t) = self.find_twin(h, bucket) {
                self.half_edges[h].twin = Some(t);
                self.half_edges[t].twin = Some(h);
                linked += 1;
            }
        }
        linked
    }

    /// Replaces the diagonal of the quad formed by the two faces around `e`.
    ///
    /// For `e = u -> v` with apex `c` on its side and `d` across, the same two
    /// half-edge records end up as `d -> c` (kept on `face(e)`) and `c -> d`.
    /// The four outer half-edges keep their twins. Convexity is not checked.
    pub fn flip_edge(&mut self, e: usize) -> Result<(), MeshError> {
        self.check_half_edge(e)?;
        let t = self.half_edges[e].twin.ok_or(MeshError::BorderEdge(e))?;
        self.check_half_edge(t)?;

        let (b, c_he) = (self.half_edges[e].next, self.half_edges[e].prev);
        let (e2, f2) = (self.half_edges[t].next, self.half_edges[t].prev);
        let f0 = self.half_edges[e].face.ok_or(MeshError::InvalidHalfEdge(e))?;
        let f1 = self.half_edges[t].face.ok_or(MeshError::InvalidHalfEdge(t))?;

        let u = self.half_edges[t].vertex;
        let v = self.half_edges[e].vertex;
        let c = self.half_edges[b].vertex;
        let d = self.half_edges[e2].vertex;

        self.unregister_edge(e);
        self.unregister_edge(t);

        self.half_edges[e].vertex = c;
        self.half_edges[t].vertex = d;

        // face(e): d -> c -> u -> d
        self.link(e, c_he);
        self.link(c_he, e2);
        self.link(e2, e);
        // face(t): c -> d -> v -> c
        self.link(t, f2);
        self.link(f2, b);
        self.link(b, t);

        for h in [e, c_he, e2] {
            self.half_edges[h].face = Some(f0);
        }
        for h in [t, f2, b] {
            self.half_edges[h].face = Some(f1);
        }
        self.faces[f0].half_edge = e;
        self.faces[f1].half_edge = t;

        self.vertices[u].half_edge = Some(e2);
        self.vertices[v].half_edge = Some(b);

        self.register_edge(e);
        self.register_edge(t);
        Ok(())
    }

    /// Inserts a vertex at `p` inside face `f` and fans it into three faces.
    pub fn split_face(&mut self, f: usize, p: Point<T, N>) -> Result<SplitResult, MeshError> {
        self.check_face(f)?;
        let w = self.add_vertex(p);
        self.split_face_at_vertex(f, w)
    }

    /// [`Self::split_face`] for an already allocated, unconnected vertex.
    pub fn split_face_at_vertex(&mut self, f: usize, w: usize) -> Result<SplitResult, MeshError> {
        self.check_face(f)?;
        if w >= self.vertices.len() || self.vertices[w].removed {
            return Err(MeshError::InvalidVertex(w));
        }

        let h0 = self.faces[f].half_edge;
        let h1 = self.half_edges[h0].next;
        let h2 = self.half_edges[h1].next;
        let a = self.half_edges[h2].vertex;
        let b = self.half_edges[h0].vertex;
        let c = self.half_edges[h1].vertex;

        self.faces[f].removed = true;

        let faces = [self.faces.len(), self.faces.len() + 1, self.faces.len() + 2];
        let base = self.half_edges.len();
        // n_i runs into w, m_i runs out of w
        let (n0, m0, n1, m1, n2, m2) = (base, base + 1, base + 2, base + 3, base + 4, base + 5);
        for head in [w, a, w, b, w, c] {
            self.half_edges.push(HalfEdge::new(head));
        }

        let cycles = [[h0, n0, m0], [h1, n1, m1], [h2, n2, m2]];
        for (cycle, &face) in cycles.iter().zip(faces.iter()) {
            self.faces.push(Face::new(cycle[0]));
            for i in 0..3 {
                self.link(cycle[i], cycle[(i + 1) % 3]);
                self.half_edges[cycle[i]].face = Some(face);
            }
        }

        for (x, y) in [(n0, m1), (n1, m2), (n2, m0)] {
            self.half_edges[x].twin = Some(y);
            self.half_edges[y].twin = Some(x);
        }
        for h in base..base + 6 {
            self.register_edge(h);
        }
        self.vertices[w].half_edge = Some(m0);

        Ok(SplitResult {
            vertex: w,
            faces,
            outer: [h0, h1, h2],
        })
    }

    /// Tombstones face `f` and its half-edges. With `clear_twins`, the
    /// neighbors' twin links are cleared so they become border edges;
    /// otherwise the caller is expected to re-link them.
    pub fn delete_face(&mut self, f: usize, clear_twins: bool) -> Result<(), MeshError> {
        self.check_face(f)?;
        let hs = self.face_half_edges(f);

        // replacement representatives, found before anything is unlinked
        let mut repairs: SmallVec<[(usize, Option<usize>); 3]> = SmallVec::new();
        for &h in &hs {
            let v = self.source(h);
            if self.vertices[v].half_edge != Some(h) {
                continue;
            }
            let prev = self.half_edges[h].prev;
            let ccw = self.half_edges[prev].twin;
            let cw = self.half_edges[h].twin.map(|t| self.half_edges[t].next);
            repairs.push((v, ccw.or(cw)));
        }

        for &h in &hs {
            self.unregister_edge(h);
            if clear_twins {
                if let Some(t) = self.half_edges[h].twin {
                    if self.half_edges[t].twin == Some(h) {
                        self.half_edges[t].twin = None;
                    }
                }
            }
            let he = &mut self.half_edges[h];
            he.removed = true;
            he.face = None;
            he.twin = None;
        }
        self.faces[f].removed = true;

        for (v, replacement) in repairs {
            self.vertices[v].half_edge = replacement.filter(|&r| !self.half_edges[r].removed);
        }
        Ok(())
    }

    /// Drops every tombstone and renumbers the arenas. Returns the old to new
    /// vertex map.
    pub fn compact(&mut self) -> Vec<Option<usize>> {
        let vertex_map = renumber(self.vertices.iter().map(|v| v.removed));
        let he_map = renumber(self.half_edges.iter().map(|h| h.removed));
        let face_map = renumber(self.faces.iter().map(|f| f.removed));

        let vertices = self
            .vertices
            .iter()
            .filter(|v| !v.removed)
            .map(|v| Vertex {
                position: v.position,
                half_edge: v.half_edge.and_then(|h| he_map[h]),
                removed: false,
            })
            .collect();

        let half_edges = self
            .half_edges
            .iter()
            .filter(|h| !h.removed)
            .map(|h| HalfEdge {
                vertex: vertex_map[h.vertex].unwrap_or(usize::MAX),
                face: h.face.and_then(|f| face_map[f]),
                next: he_map[h.next].unwrap_or(usize::MAX),
                prev: he_map[h.prev].unwrap_or(usize::MAX),
                twin: h.twin.and_then(|t| he_map[t]),
                removed: false,
            })
            .collect();

        let faces = self
            .faces
            .iter()
            .filter(|f| !f.removed)
            .map(|f| Face::new(he_map[f.half_edge].unwrap_or(usize::MAX)))
            .collect();

        self.vertices = vertices;
        self.half_edges = half_edges;
        self.faces = faces;
        self.edge_map.clear();
        for h in 0..self.half_edges.len() {
            self.register_edge(h);
        }
        vertex_map
    }

    pub(crate) fn link(&mut self, from: usize, to: usize) {
        self.half_edges[from].next = to;
        self.half_edges[to].prev = from;
    }

    pub(crate) fn register_edge(&mut self, h: usize) {
        let key = (self.source(h), self.target(h));
        let taken = self
            .edge_map
            .get(&key)
            .is_some_and(|&other| other != h && !self.half_edges[other].removed);
        if !taken {
            self.edge_map.insert(key, h);
        }
    }

    pub(crate) fn unregister_edge(&mut self, h: usize) {
        let key = (self.source(h), self.target(h));
        if self.edge_map.get(&key) == Some(&h) {
            self.edge_map.remove(&key);
        }
    }

    pub(crate) fn check_half_edge(&self, h: usize) -> Result<(), MeshError> {
        match self.half_edges.get(h) {
            Some(he) if !he.removed => Ok(()),
            _ => Err(MeshError::InvalidHalfEdge(h)),
        }
    }

    pub(crate) fn check_face(&self, f: usize) -> Result<(), MeshError> {
        match self.faces.get(f) {
            Some(face) if !face.removed => Ok(()),
            _ => Err(MeshError::InvalidFace(f)),
        }
    }
}

fn renumber(removed: impl Iterator<Item = bool>) -> Vec<Option<usize>> {
    let mut next = 0;
    removed
        .map(|gone| {
            if gone {
                None
            } else {
                next += 1;
                Some(next - 1)
            }
        })
        .collect()
}
