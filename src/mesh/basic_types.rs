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
    mesh::{face::Face, half_edge::HalfEdge, vertex::Vertex},
    numeric::scalar::Scalar,
};

/// Records touched by [`Mesh::split_face`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitResult {
    pub vertex: usize,
    /// `(a, b, w)`, `(b, c, w)`, `(c, a, w)` for the split face `(a, b, c)`.
    pub faces: [usize; 3],
    /// The three surviving boundary half-edges, each opposite the new vertex.
    pub outer: [usize; 3],
}

/// Half-edge triangle mesh stored as arenas with tombstones.
///
/// Faces wind counter-clockwise: the interior lies left of every half-edge.
/// Handles stay valid across mutations; removed records are only flagged
/// until [`Mesh::compact`] runs.
#[derive(Debug, Clone)]
pub struct Mesh<T: Scalar, const N: usize> {
    pub vertices: Vec<Vertex<T, N>>,
    pub half_edges: Vec<HalfEdge>,
    pub faces: Vec<Face>,

    /// Directed `(tail, head)` vertex pair to live half-edge.
    pub edge_map: AHashMap<(usize, usize), usize>,
}

impl<T: Scalar, const N: usize> Default for Mesh<T, N> {
    fn default() -> Self {
        Self {
            vertices: Vec::new(),
            half_edges: Vec::new(),
            faces: Vec::new(),
            edge_map: AHashMap::new(),
        }
    }
}
