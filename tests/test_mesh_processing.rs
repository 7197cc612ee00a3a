use hedge::{
    geometry::{
        Normalizer, Plane,
        point::{Point, Point2, Point3},
        util::triangle_area,
        vector::Vector3,
    },
    mesh::Mesh,
    mesh_processing::{RenderStyle, SimplifyOptions, cut_mesh},
};

fn p3(x: f64, y: f64, z: f64) -> Point3<f64> {
    Point::from_vals([x, y, z])
}

/// Closed unit cube, outward-facing CCW triangles.
fn cube() -> Mesh<f64, 3> {
    let positions = [
        p3(0.0, 0.0, 0.0),
        p3(1.0, 0.0, 0.0),
        p3(1.0, 1.0, 0.0),
        p3(0.0, 1.0, 0.0),
        p3(0.0, 0.0, 1.0),
        p3(1.0, 0.0, 1.0),
        p3(1.0, 1.0, 1.0),
        p3(0.0, 1.0, 1.0),
    ];
    let triangles = [
        [0, 2, 1],
        [0, 3, 2],
        [4, 5, 6],
        [4, 6, 7],
        [0, 1, 5],
        [0, 5, 4],
        [3, 7, 6],
        [3, 6, 2],
        [0, 4, 7],
        [0, 7, 3],
        [1, 2, 6],
        [1, 6, 5],
    ];
    Mesh::from_triangles(&positions, &triangles)
}

/// Flat `n x n` grid in the z = 0 plane.
fn flat_grid(n: usize) -> Mesh<f64, 3> {
    let mut positions = Vec::new();
    for r in 0..n {
        for c in 0..n {
            positions.push(p3(c as f64, r as f64, 0.0));
        }
    }
    let mut triangles = Vec::new();
    for r in 0..n - 1 {
        for c in 0..n - 1 {
            let a = r * n + c;
            triangles.push([a, a + 1, a + n + 1]);
            triangles.push([a, a + n + 1, a + n]);
        }
    }
    Mesh::from_triangles(&positions, &triangles)
}

fn surface_area(mesh: &Mesh<f64, 3>) -> f64 {
    mesh.triangles().iter().map(|[a, b, c]| triangle_area(a, b, c)).sum()
}

#[test]
fn test_cube_is_closed() {
    let mesh = cube();
    mesh.validate_connectivity().unwrap();
    assert!(mesh.live_half_edges().all(|h| !mesh.is_boundary_half_edge(h)));
    assert!((surface_area(&mesh) - 6.0).abs() < 1e-9);
}

#[test]
fn test_plane_cut_preserves_area_and_caps() {
    let mesh = cube();
    let plane = Plane::from_point_normal(&p3(0.5, 0.5, 0.5), &Vector3::new([0.0, 0.0, 1.0]));
    let cut = cut_mesh(&mesh, &plane).unwrap();

    assert_eq!(cut.caps, 1);
    for half in [&cut.front, &cut.back] {
        half.validate_connectivity().unwrap();
        assert!((surface_area(half) - 4.0).abs() < 1e-9);
        assert!(half.live_half_edges().all(|h| !half.is_boundary_half_edge(h)));
    }
    for [a, b, c] in cut.front.triangles() {
        for q in [a, b, c] {
            assert!(q.z() >= 0.5 - 1e-9);
        }
    }
}

#[test]
fn test_plane_missing_mesh() {
    let mesh = cube();
    let plane = Plane::from_point_normal(&p3(0.0, 0.0, 2.0), &Vector3::new([0.0, 0.0, 1.0]));
    assert!(cut_mesh(&mesh, &plane).is_none());
}

#[test]
fn test_simplify_flat_grid() {
    let mut mesh = flat_grid(5);
    let before = mesh.face_count();
    let report = mesh.simplify(&SimplifyOptions::new(20)).unwrap();

    assert!(report.contractions > 0);
    assert_eq!(report.faces, mesh.face_count());
    assert!(report.faces < before);
    assert!(report.faces >= 20);
    mesh.validate_connectivity().unwrap();
    // flat and fold-free: the covered area does not change
    assert!((surface_area(&mesh) - 16.0).abs() < 1e-9);
}

#[test]
fn test_simplify_respects_max_cost() {
    let mut mesh = cube();
    let options = SimplifyOptions {
        max_cost: Some(-1.0),
        ..SimplifyOptions::new(0)
    };
    let report = mesh.simplify(&options).unwrap();
    assert_eq!(report.contractions, 0);
    assert_eq!(mesh.face_count(), 12);
}

#[test]
fn test_simplify_budget() {
    let mut mesh = flat_grid(5);
    let options = SimplifyOptions {
        contraction_budget: 1,
        ..SimplifyOptions::new(0)
    };
    let err = mesh.simplify(&options).unwrap_err();
    assert!(err.partial.contractions <= 1);
    mesh.validate_connectivity().unwrap();
}

#[test]
fn test_render_styles() {
    let mesh = cube();

    let hard = mesh.to_render_mesh(RenderStyle::HardEdges);
    assert_eq!(hard.vertex_count(), 36);
    assert_eq!(hard.triangle_count(), 12);

    let shared = mesh.to_render_mesh(RenderStyle::SoftAndHardEdges);
    assert_eq!(shared.vertex_count(), 8);

    let soft = mesh.to_render_mesh(RenderStyle::SoftEdges);
    assert_eq!(soft.vertex_count(), 8);
    for n in &soft.normals {
        assert!((n.norm() - 1.0).abs() < 1e-9);
    }
    // the corner normal points out of the cube
    let corner = soft.positions.iter().position(|q| q.approx_eq(&p3(1.0, 1.0, 1.0))).unwrap();
    let n = soft.normals[corner];
    assert!(n[0] > 0.0 && n[1] > 0.0 && n[2] > 0.0);
}

#[test]
fn test_render_welds_separate_records() {
    let mesh = cube();
    let plane = Plane::from_point_normal(&p3(0.5, 0.5, 0.5), &Vector3::new([0.0, 0.0, 1.0]));
    let cut = cut_mesh(&mesh, &plane).unwrap();

    let faces = cut.front.face_count();
    let shared = cut.front.to_render_mesh(RenderStyle::SoftAndHardEdges);
    let soft = cut.front.to_render_mesh(RenderStyle::SoftEdges);
    assert_eq!(shared.vertex_count(), 3 * faces);
    assert!(soft.vertex_count() < shared.vertex_count());
}

#[test]
fn test_normalizer_round_trip() {
    let points = [
        Point2::new([-3.0, 2.0]),
        Point2::new([5.0, 4.0]),
        Point2::new([1.0, -6.0]),
    ];
    let normalizer = Normalizer::from_points(&points);
    let unit = normalizer.normalize_all(&points);
    for q in &unit {
        assert!(q.x() >= -1e-12 && q.x() <= 1.0 + 1e-12);
        assert!(q.y() >= -1e-12 && q.y() <= 1.0 + 1e-12);
    }
    let back = normalizer.unnormalize_all(&unit);
    for (a, b) in back.iter().zip(points.iter()) {
        assert!(a.approx_eq(b));
    }
}
