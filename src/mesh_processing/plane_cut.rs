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
use tracing::{debug, instrument, warn};

use crate::{
    geometry::{
        plane::Plane,
        point::{Point2, Point3},
        util::{is_counter_clockwise, triangle_area},
    },
    mesh::{basic_types::Mesh, spatial_hash::PositionIndex},
    numeric::scalar::Scalar,
    operations::triangulation::ear_clipping::triangulate_polygon,
};

/// The two closed halves of a cut. `front` lies where the plane normal
/// points.
#[derive(Debug, Clone)]
pub struct CutResult<T: Scalar> {
    pub front: Mesh<T, 3>,
    pub back: Mesh<T, 3>,
    /// Cap loops that were filled on each half.
    pub caps: usize,
}

type Ring<T> = SmallVec<[(Point3<T>, bool); 4]>;

/// Splits `mesh` along `plane` and closes both halves with cap faces.
///
/// Every output triangle gets its own vertex records; twins are matched
/// by position afterwards. Returns `None` when the plane does not pass
/// through the mesh.
#[instrument(skip_all, fields(faces = mesh.face_count()))]
pub fn cut_mesh<T: Scalar>(mesh: &Mesh<T, 3>, plane: &Plane<T, 3>) -> Option<CutResult<T>> {
    let mut front = Mesh::new();
    let mut back = Mesh::new();
    let mut segments: Vec<(Point3<T>, Point3<T>)> = Vec::new();
    let mut crossed = false;

    for f in mesh.live_faces() {
        let corners = mesh.face_positions(f);
        let dist = corners.map(|p| plane.signed_distance(&p));
        let signs = dist.map(|d| d.sign());
        if signs.contains(&1) && signs.contains(&-1) {
            crossed = true;
        }

        let (front_ring, back_ring) = split_triangle(&corners, &dist, &signs);
        if front_ring.len() >= 3 && !front_ring.iter().all(|(_, on)| *on) {
            let n = front_ring.len();
            for i in 0..n {
                let (p, p_on) = front_ring[i];
                let (q, q_on) = front_ring[(i + 1) % n];
                if p_on && q_on {
                    segments.push((p, q));
                }
            }
        }
        fan_into(&mut front, &front_ring);
        if signs.iter().any(|&s| s < 0) {
            fan_into(&mut back, &back_ring);
        }
    }

    if !crossed && (front.face_count() == 0 || back.face_count() == 0) {
        debug!("plane does not cross the mesh");
        return None;
    }

    let loops = chain_loops(&segments);
    let mut caps = 0;
    for ring in &loops {
        if cap_loop(&mut front, &mut back, plane, ring) {
            caps += 1;
        }
    }

    for half in [&mut front, &mut back] {
        let all: Vec<usize> = half.live_half_edges().collect();
        half.connect_twins(&all);
    }

    debug!(
        front = front.face_count(),
        back = back.face_count(),
        caps,
        "mesh cut"
    );
    Some(CutResult { front, back, caps })
}

/// Sutherland-Hodgman against both half-spaces at once. Each ring entry
/// carries whether the point lies on the plane.
fn split_triangle<T: Scalar>(corners: &[Point3<T>; 3], dist: &[T; 3], signs: &[i8; 3]) -> (Ring<T>, Ring<T>) {
    let mut front = Ring::new();
    let mut back = Ring::new();
    for i in 0..3 {
        let j = (i + 1) % 3;
        let (p, sp, sq) = (corners[i], signs[i], signs[j]);
        if sp >= 0 {
            front.push((p, sp == 0));
        }
        if sp <= 0 {
            back.push((p, sp == 0));
        }
        if sp * sq < 0 {
            let t = dist[i] / (dist[i] - dist[j]);
            let x = p.lerp(&corners[j], t);
            front.push((x, true));
            back.push((x, true));
        }
    }
    (front, back)
}

/// Fans a convex ring of at most four points into `mesh`, skipping slivers.
fn fan_into<T: Scalar>(mesh: &mut Mesh<T, 3>, ring: &Ring<T>) {
    if ring.len() < 3 {
        return;
    }
    let (a, _) = ring[0];
    for k in 1..ring.len() - 1 {
        let (b, _) = ring[k];
        let (c, _) = ring[k + 1];
        if triangle_area(&a, &b, &c).is_zero_tol() {
            continue;
        }
        mesh.add_triangle_from_points(a, b, c);
    }
}

/// Chains directed cut segments into closed loops; open chains are dropped.
fn chain_loops<T: Scalar>(segments: &[(Point3<T>, Point3<T>)]) -> Vec<Vec<Point3<T>>> {
    let mut index = PositionIndex::<T, 3>::new();
    let mut positions: Vec<Point3<T>> = Vec::new();
    let mut next: AHashMap<usize, usize> = AHashMap::new();

    let mut id_of = |p: &Point3<T>, positions: &mut Vec<Point3<T>>| {
        let id = index.get_or_insert(p);
        if id == positions.len() {
            positions.push(*p);
        }
        id
    };
    for (a, b) in segments {
        let ia = id_of(a, &mut positions);
        let ib = id_of(b, &mut positions);
        if ia != ib {
            next.insert(ia, ib);
        }
    }

    let mut used = vec![false; positions.len()];
    let mut loops = Vec::new();
    for start in 0..positions.len() {
        if used[start] || !next.contains_key(&start) {
            continue;
        }
        let mut ring = Vec::new();
        let mut cur = start;
        let closed = loop {
            used[cur] = true;
            ring.push(positions[cur]);
            match next.get(&cur) {
                Some(&n) if n == start => break true,
                Some(&n) if !used[n] => cur = n,
                _ => break false,
            }
        };
        if closed && ring.len() >= 3 {
            loops.push(ring);
        } else {
            warn!(points = ring.len(), "open cut chain skipped");
        }
    }
    loops
}

/// Ear-clips one loop in the plane basis and adds it to both halves,
/// facing away from each.
fn cap_loop<T: Scalar>(front: &mut Mesh<T, 3>, back: &mut Mesh<T, 3>, plane: &Plane<T, 3>, ring: &[Point3<T>]) -> bool {
    let mut flat: Vec<Point2<T>> = ring.iter().map(|p| plane.project_2d(p)).collect();
    let mut lifted = ring.to_vec();
    if !is_counter_clockwise(&flat) {
        flat.reverse();
        lifted.reverse();
    }

    let triangles = match triangulate_polygon(&flat, &[]) {
        Ok(t) => t,
        Err(incomplete) => {
            warn!(cause = %incomplete.cause, "cap triangulation incomplete");
            incomplete.into_partial()
        }
    };

    let lookup = PositionIndex::from_points(&flat);
    let mut added = false;
    for [a, b, c] in triangles {
        let (Some(ia), Some(ib), Some(ic)) = (lookup.find(&a), lookup.find(&b), lookup.find(&c)) else {
            continue;
        };
        let (pa, pb, pc) = (lifted[ia], lifted[ib], lifted[ic]);
        if triangle_area(&pa, &pb, &pc).is_zero_tol() {
            continue;
        }
        back.add_triangle_from_points(pa, pb, pc);
        front.add_triangle_from_points(pa, pc, pb);
        added = true;
    }
    added
}
