use hedge::{
    geometry::point::{Point, Point2},
    mesh::{CollapseReject, Mesh},
};

type T = f64;

fn p2(x: f64, y: f64) -> Point2<T> {
    Point::from_vals([x, y])
}

/// Unit square split along the 0 -> 2 diagonal:
///  v3(0,1) ---- v2(1,1)
///     |        /  |
///     |      /    |
///  v0(0,0) ---- v1(1,0)
fn square() -> Mesh<T, 2> {
    let positions = [p2(0.0, 0.0), p2(1.0, 0.0), p2(1.0, 1.0), p2(0.0, 1.0)];
    Mesh::from_triangles(&positions, &[[0, 1, 2], [0, 2, 3]])
}

/// `n x n` vertex grid over `[0, n-1]^2`, vertex `r * n + c` at `(c, r)`.
fn grid(n: usize) -> Mesh<T, 2> {
    let mut positions = Vec::new();
    for r in 0..n {
        for c in 0..n {
            positions.push(p2(c as f64, r as f64));
        }
    }
    let mut triangles = Vec::new();
    for r in 0..n - 1 {
        for c in 0..n - 1 {
            let a = r * n + c;
            let (b, cc, d) = (a + 1, a + n + 1, a + n);
            triangles.push([a, b, cc]);
            triangles.push([a, cc, d]);
        }
    }
    Mesh::from_triangles(&positions, &triangles)
}

#[test]
fn test_from_triangles_links_shared_edge() {
    let mesh = square();
    assert_eq!(mesh.face_count(), 2);
    mesh.validate_connectivity().unwrap();

    let diag = mesh.half_edge_between(0, 2).unwrap();
    let back = mesh.half_edge_between(2, 0).unwrap();
    assert_eq!(mesh.twin(diag), Some(back));
    assert_eq!(mesh.live_half_edges().filter(|&h| mesh.is_boundary_half_edge(h)).count(), 4);
}

#[test]
fn test_boundary_queries() {
    let mesh = square();
    for v in 0..4 {
        assert!(mesh.is_boundary_vertex(v));
    }
    assert_eq!(mesh.outgoing_half_edges(0).len(), 2);
    let mut ring = mesh.one_ring_neighbors(0);
    ring.sort();
    assert_eq!(ring, vec![1, 2, 3]);
}

#[test]
fn test_flip_edge_and_back() {
    let mut mesh = square();
    let diag = mesh.half_edge_between(0, 2).unwrap();

    mesh.flip_edge(diag).unwrap();
    mesh.validate_connectivity().unwrap();
    assert!(!mesh.are_vertices_connected(0, 2));
    assert!(mesh.are_vertices_connected(1, 3));
    assert_eq!(mesh.face_count(), 2);

    mesh.flip_edge(diag).unwrap();
    mesh.validate_connectivity().unwrap();
    assert!(mesh.are_vertices_connected(0, 2));
    assert!(!mesh.are_vertices_connected(1, 3));
}

#[test]
fn test_flip_border_edge_is_rejected() {
    let mut mesh = square();
    let border = mesh.half_edge_between(0, 1).unwrap();
    assert!(mesh.flip_edge(border).is_err());
    mesh.validate_connectivity().unwrap();
}

#[test]
fn test_split_face() {
    let mut mesh = Mesh::<T, 2>::new();
    let a = mesh.add_vertex(p2(0.0, 0.0));
    let b = mesh.add_vertex(p2(3.0, 0.0));
    let c = mesh.add_vertex(p2(0.0, 3.0));
    let f = mesh.add_triangle(a, b, c);

    let split = mesh.split_face(f, p2(1.0, 1.0)).unwrap();
    mesh.validate_connectivity().unwrap();
    assert_eq!(mesh.face_count(), 3);
    assert!(mesh.faces[f].removed);

    let w = split.vertex;
    assert_eq!(mesh.outgoing_half_edges(w).len(), 3);
    assert!(!mesh.is_boundary_vertex(w));
    for v in [a, b, c] {
        assert!(mesh.are_vertices_connected(v, w));
    }
    for h in split.outer {
        assert_eq!(mesh.apex(h), w);
    }
}

#[test]
fn test_delete_face_clears_twins() {
    let mut mesh = square();
    mesh.delete_face(1, true).unwrap();
    mesh.validate_connectivity().unwrap();

    assert_eq!(mesh.face_count(), 1);
    assert!(mesh.half_edge_between(0, 2).is_none());
    let diag = mesh.half_edge_between(2, 0).unwrap();
    assert!(mesh.is_boundary_half_edge(diag));
    assert!(mesh.vertices[3].half_edge.is_none());
    assert!(mesh.delete_face(1, true).is_err());
}

#[test]
fn test_delete_face_keeps_twins_for_replacement() {
    let mut mesh = square();
    let old = mesh.half_edge_between(0, 2).unwrap();
    let diag = mesh.half_edge_between(2, 0).unwrap();

    mesh.delete_face(1, false).unwrap();
    assert_eq!(mesh.twin(diag), Some(old));
    assert!(mesh.validate_connectivity().is_err());

    let f = mesh.add_triangle(0, 2, 3);
    let fresh = mesh.half_edge_between(0, 2).unwrap();
    assert_ne!(fresh, old);
    mesh.half_edges[fresh].twin = Some(diag);
    mesh.half_edges[diag].twin = Some(fresh);

    mesh.validate_connectivity().unwrap();
    assert_eq!(mesh.face_count(), 2);
    assert_eq!(mesh.half_edges[fresh].face, Some(f));
    assert_eq!(mesh.twin(diag), Some(fresh));
}

#[test]
fn test_compact_renumbers() {
    let mut mesh = square();
    mesh.delete_face(1, true).unwrap();
    mesh.vertices[3].removed = true;

    let map = mesh.compact();
    assert_eq!(map, vec![Some(0), Some(1), Some(2), None]);
    assert_eq!(mesh.faces.len(), 1);
    assert_eq!(mesh.half_edges.len(), 3);
    mesh.validate_connectivity().unwrap();
    assert!(mesh.half_edge_between(0, 1).is_some());
}

#[test]
fn test_link_condition() {
    let mesh = grid(5);
    let border = mesh.half_edge_between(0, 1).unwrap();
    assert_eq!(mesh.check_link_condition(border), Err(CollapseReject::BorderForbidden));

    let inner = mesh.half_edge_between(12, 13).unwrap();
    assert_eq!(mesh.check_link_condition(inner), Ok(()));
}

#[test]
fn test_contract_edge() {
    let mut mesh = grid(5);
    let before = mesh.face_count();
    let e = mesh.half_edge_between(12, 13).unwrap();
    let mid = p2(2.5, 2.0);

    let incoming = mesh.contract_edge(e, mid).unwrap();
    mesh.validate_connectivity().unwrap();

    assert_eq!(mesh.face_count(), before - 2);
    assert!(mesh.vertices[13].removed);
    assert!(mesh.vertices[12].position.approx_eq(&mid));
    assert!(!incoming.is_empty());
    for h in incoming {
        assert_eq!(mesh.target(h), 12);
    }
    for n in [8, 14, 19] {
        assert!(mesh.are_vertices_connected(12, n));
    }
    assert!(mesh.half_edge_between(12, 13).is_none());
}
