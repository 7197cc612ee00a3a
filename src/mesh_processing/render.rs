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

use crate::{
    geometry::{point::Point3, vector::Vector3},
    mesh::{basic_types::Mesh, spatial_hash::PositionIndex},
    numeric::scalar::Scalar,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderStyle {
    /// Three unique vertices per face, each carrying the face normal.
    HardEdges,
    /// Vertices welded by position, normals averaged over incident faces.
    SoftEdges,
    /// One vertex per vertex record; distinct records at the same position
    /// keep separate normals.
    SoftAndHardEdges,
}

/// Flat buffers ready for upload. Triangles wind counter-clockwise.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderMesh<T: Scalar> {
    pub positions: Vec<Point3<T>>,
    pub normals: Vec<Vector3<T>>,
    pub indices: Vec<[usize; 3]>,
}

impl<T: Scalar> RenderMesh<T> {
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len()
    }
}

impl<T: Scalar> Mesh<T, 3> {
    /// Area-weighted normal of face `f`, not normalized.
    pub fn face_normal(&self, f: usize) -> Vector3<T> {
        let [a, b, c] = self.face_positions(f);
        a.vector_to(&b).cross(&a.vector_to(&c))
    }

    pub fn to_render_mesh(&self, style: RenderStyle) -> RenderMesh<T> {
        let mut out = RenderMesh::default();

        if style == RenderStyle::HardEdges {
            for f in self.live_faces() {
                let n = self.face_normal(f).normalized().unwrap_or_else(Vector3::zero);
                let base = out.positions.len();
                for p in self.face_positions(f) {
                    out.positions.push(p);
                    out.normals.push(n);
                }
                out.indices.push([base, base + 1, base + 2]);
            }
            return out;
        }

        let mut welder = PositionIndex::<T, 3>::new();
        let mut slots: AHashMap<usize, usize> = AHashMap::new();
        for f in self.live_faces() {
            let n = self.face_normal(f);
            let corners = self.face_vertices(f);
            let mut tri = [0; 3];
            for (k, v) in corners.into_iter().enumerate() {
                let p = self.vertices[v].position;
                let key = match style {
                    RenderStyle::SoftEdges => welder.get_or_insert(&p),
                    _ => v,
                };
                let slot = *slots.entry(key).or_insert_with(|| {
                    out.positions.push(p);
                    out.normals.push(Vector3::zero());
                    out.positions.len() - 1
                });
                out.normals[slot] = out.normals[slot] + n;
                tri[k] = slot;
            }
            out.indices.push(tri);
        }
        for n in &mut out.normals {
            *n = n.normalized().unwrap_or(*n);
        }
        out
    }
}
