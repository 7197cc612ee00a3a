use hedge::{
    geometry::{
        point::Point2,
        util::{triangle_area, triangle_centroid},
    },
    kernel::point_in_polygon,
    operations::triangulation::{CdtOptions, ConstrainedDelaunay},
};

fn p(x: f64, y: f64) -> Point2<f64> {
    Point2::new([x, y])
}

fn unit_square() -> Vec<Point2<f64>> {
    vec![p(0.0, 0.0), p(1.0, 0.0), p(1.0, 1.0), p(0.0, 1.0)]
}

fn total_area(triangles: &[[Point2<f64>; 3]]) -> f64 {
    triangles.iter().map(|[a, b, c]| triangle_area(a, b, c)).sum()
}

#[test]
fn test_square_with_triangular_hole() {
    // clockwise
    let hole = vec![p(0.4, 0.4), p(0.4, 0.6), p(0.6, 0.4)];
    let cdt = ConstrainedDelaunay::build(&unit_square(), &[hole.clone()], &[], &CdtOptions::default()).unwrap();

    let triangles = cdt.triangle_points();
    assert_eq!(triangles.len(), 7);
    assert!((total_area(&triangles) - 0.98).abs() < 1e-9);
    for [a, b, c] in &triangles {
        let centroid = triangle_centroid(a, b, c);
        assert!(!point_in_polygon(&centroid, &hole));
    }

    assert!(cdt.unrecovered.is_empty());
    assert_eq!(cdt.constraint_edges().len(), 7);
    for &[a, b] in cdt.constraint_edges() {
        assert!(cdt.mesh().are_vertices_connected(a, b));
    }
    cdt.mesh().validate_connectivity().unwrap();
}

#[test]
fn test_interior_points_are_inserted() {
    let interior = [p(0.5, 0.5)];
    let cdt = ConstrainedDelaunay::build(&unit_square(), &[], &interior, &CdtOptions::default()).unwrap();

    let triangles = cdt.triangles();
    assert_eq!(triangles.len(), 4);
    assert!(triangles.iter().all(|t| t.contains(&4)));
}

#[test]
fn test_concave_hull_keeps_notch_edges() {
    let hull = vec![p(0.0, 0.0), p(2.0, 0.0), p(2.0, 1.0), p(1.0, 1.0), p(1.0, 2.0), p(0.0, 2.0)];
    let cdt = ConstrainedDelaunay::build(&hull, &[], &[], &CdtOptions::default()).unwrap();

    let triangles = cdt.triangle_points();
    assert_eq!(triangles.len(), 4);
    assert!((total_area(&triangles) - 3.0).abs() < 1e-9);
    assert!(cdt.mesh().are_vertices_connected(2, 3));
    assert!(cdt.mesh().are_vertices_connected(3, 4));
}

#[test]
fn test_keep_enclosed_triangles() {
    let hull = vec![p(0.0, 0.0), p(2.0, 0.0), p(2.0, 1.0), p(1.0, 1.0), p(1.0, 2.0), p(0.0, 2.0)];
    let options = CdtOptions {
        remove_enclosed_triangles: false,
        ..Default::default()
    };
    let cdt = ConstrainedDelaunay::build(&hull, &[], &[], &options).unwrap();

    // the notch is filled: the convex hull has area 3.5
    let triangles = cdt.triangle_points();
    assert_eq!(triangles.len(), 5);
    assert!((total_area(&triangles) - 3.5).abs() < 1e-9);
}

#[test]
fn test_long_constraint_through_point_cloud() {
    let hull = vec![p(0.0, 0.0), p(10.0, 0.0), p(10.0, 1.0), p(0.0, 1.0)];
    let mut interior = Vec::new();
    for i in 1..10 {
        interior.push(p(i as f64, 0.3));
        interior.push(p(i as f64 + 0.5, 0.7));
    }
    let cdt = ConstrainedDelaunay::build(&hull, &[], &interior, &CdtOptions::default()).unwrap();

    assert!(cdt.unrecovered.is_empty());
    for &[a, b] in cdt.constraint_edges() {
        assert!(cdt.mesh().are_vertices_connected(a, b));
    }
    assert!((total_area(&cdt.triangle_points()) - 10.0).abs() < 1e-9);
}
